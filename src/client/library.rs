//! Study library
//!
//! Data access for summaries, quizzes and flashcards on top of `ApiClient`.
//! Reads go through the query cache; mutations invalidate what they change.
//! Cloning a `Library` shares its cache, so it can be moved into spawned tasks.

use std::path::{Path, PathBuf};

use crate::client::api::{pdf_file_name, ApiClient};
use crate::client::cache::{CachedValue, QueryCache, QueryKey};
use crate::client::session::Session;
use crate::shared::error::{ClientError, StorageError};
use crate::shared::models::{Flashcard, FlashcardSet, Quiz, QuizListing, Summary};

/// Extra attempts made for the summaries list after a failed fetch
const SUMMARIES_RETRIES: usize = 1;

/// A rendered PDF ready to be written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PdfExport {
    /// Write the document into `dir`, returning the full path
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf, StorageError> {
        std::fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes).map_err(|e| StorageError::io(&path, e))?;
        Ok(path)
    }
}

#[derive(Debug, Clone)]
pub struct Library {
    api: ApiClient,
    cache: QueryCache,
}

impl Library {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cache: QueryCache::new(),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn is_cached(&self, key: &QueryKey) -> bool {
        self.cache.contains(key)
    }

    pub async fn invalidate(&self, key: &QueryKey) -> bool {
        self.cache.invalidate(key).await
    }

    /// Forget every cached query, e.g. after sign-out.
    ///
    /// Reads still in flight when this runs do not repopulate the cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub async fn summaries(&self, session: &Session) -> Result<Vec<Summary>, ClientError> {
        if let Some(hit) = self.cache.get::<Vec<Summary>>(&QueryKey::Summaries).await {
            return Ok(hit);
        }

        let generation = self.cache.generation();
        let mut attempt = 0;
        let summaries = loop {
            match self.api.list_summaries(&session.token).await {
                Ok(summaries) => break summaries,
                Err(e) if attempt < SUMMARIES_RETRIES && !e.is_unauthorized() => {
                    attempt += 1;
                    tracing::warn!(error = %e, attempt, "Retrying summaries fetch");
                }
                Err(e) => return Err(e),
            }
        };

        self.cache
            .insert(QueryKey::Summaries, summaries.clone(), generation)
            .await;
        Ok(summaries)
    }

    pub async fn summary(&self, session: &Session, id: &str) -> Result<Summary, ClientError> {
        let key = QueryKey::Summary(id.to_string());
        if let Some(hit) = self.cache.get::<Summary>(&key).await {
            return Ok(hit);
        }
        let generation = self.cache.generation();
        let summary = self.api.get_summary(&session.token, id).await?;
        self.cache.insert(key, summary.clone(), generation).await;
        Ok(summary)
    }

    /// Summarize a video and add it to the library
    pub async fn create_summary(
        &self,
        session: &Session,
        youtube_url: &str,
    ) -> Result<Summary, ClientError> {
        let youtube_url = youtube_url.trim();
        if youtube_url.is_empty() {
            return Err(ClientError::fetch(None, "Please enter a video link."));
        }

        let summary = self.api.create_summary(&session.token, youtube_url).await?;
        tracing::info!(summary = %summary.id, "Summary created");

        self.cache.invalidate(&QueryKey::Summaries).await;
        let generation = self.cache.generation();
        self.cache
            .insert(QueryKey::Summary(summary.id.clone()), summary.clone(), generation)
            .await;
        Ok(summary)
    }

    pub async fn delete_summary(&self, session: &Session, id: &str) -> Result<(), ClientError> {
        self.api.delete_summary(&session.token, id).await?;
        tracing::info!(summary = %id, "Summary deleted");

        self.cache.invalidate(&QueryKey::Summaries).await;
        self.cache.invalidate(&QueryKey::Summary(id.to_string())).await;
        Ok(())
    }

    pub async fn quizzes(&self, session: &Session) -> Result<Vec<QuizListing>, ClientError> {
        if let Some(hit) = self.cache.get::<Vec<QuizListing>>(&QueryKey::Quizzes).await {
            return Ok(hit);
        }
        let generation = self.cache.generation();
        let quizzes = self.api.list_quizzes(&session.token).await?;
        self.cache
            .insert(QueryKey::Quizzes, quizzes.clone(), generation)
            .await;
        Ok(quizzes)
    }

    pub async fn generate_quiz(&self, session: &Session, summary_id: &str) -> Result<Quiz, ClientError> {
        let quiz = self.api.generate_quiz(&session.token, summary_id).await?;
        tracing::info!(quiz = %quiz.id, summary = %summary_id, "Quiz generated");
        self.cache.invalidate(&QueryKey::Quizzes).await;
        Ok(quiz)
    }

    pub async fn delete_quiz(&self, session: &Session, id: &str) -> Result<(), ClientError> {
        self.api.delete_quiz(&session.token, id).await?;
        tracing::info!(quiz = %id, "Quiz deleted");
        self.cache.invalidate(&QueryKey::Quizzes).await;
        Ok(())
    }

    pub async fn flashcards(
        &self,
        session: &Session,
        summary_id: &str,
    ) -> Result<Vec<Flashcard>, ClientError> {
        let key = QueryKey::Flashcards(summary_id.to_string());
        if let Some(hit) = self.cache.get::<Vec<Flashcard>>(&key).await {
            return Ok(hit);
        }
        let generation = self.cache.generation();
        let cards = self.api.flashcards_by_summary(&session.token, summary_id).await?;
        self.cache.insert(key, cards.clone(), generation).await;
        Ok(cards)
    }

    pub async fn flashcard(&self, session: &Session, id: &str) -> Result<Flashcard, ClientError> {
        let key = QueryKey::Flashcard(id.to_string());
        if let Some(hit) = self.cache.get::<Flashcard>(&key).await {
            return Ok(hit);
        }
        let generation = self.cache.generation();
        let card = self.api.get_flashcard(&session.token, id).await?;
        self.cache.insert(key, card.clone(), generation).await;
        Ok(card)
    }

    pub async fn generate_flashcards(
        &self,
        session: &Session,
        summary_id: &str,
    ) -> Result<FlashcardSet, ClientError> {
        let set = self.api.generate_flashcards(&session.token, summary_id).await?;
        tracing::info!(summary = %summary_id, cards = set.flashcards.len(), "Flashcards generated");
        self.cache
            .invalidate(&QueryKey::Flashcards(summary_id.to_string()))
            .await;
        Ok(set)
    }

    pub async fn delete_flashcards(&self, session: &Session, summary_id: &str) -> Result<(), ClientError> {
        self.api
            .delete_flashcards_by_summary(&session.token, summary_id)
            .await?;
        tracing::info!(summary = %summary_id, "Flashcards deleted");

        self.cache
            .invalidate(&QueryKey::Flashcards(summary_id.to_string()))
            .await;
        self.cache
            .invalidate_where(|_, value| {
                matches!(value, CachedValue::Flashcard(card) if card.summary_id == summary_id)
            })
            .await;
        Ok(())
    }

    pub async fn export_pdf(&self, session: &Session, summary: &Summary) -> Result<PdfExport, ClientError> {
        let bytes = self.api.export_pdf(&session.token, summary).await?;
        tracing::info!(summary = %summary.id, size = bytes.len(), "PDF exported");
        Ok(PdfExport {
            file_name: pdf_file_name(&summary.title),
            bytes,
        })
    }
}
