/**
 * API Client
 *
 * Typed HTTP client for the StudyReel backend. The backend is a collaborator:
 * this module only encodes its contract (paths, bodies, bearer auth, error
 * bodies) and never retries on its own.
 */

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::client::config::Config;
use crate::shared::error::ClientError;
use crate::shared::models::{
    AuthResponse, CreateSummaryRequest, ErrorBody, Flashcard, FlashcardSet, GenerateRequest,
    LoginRequest, Quiz, QuizListing, RegisterRequest, Summary,
};

/// HTTP client bound to one API origin
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: Config,
    client: Client,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::fetch(None, format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Login user with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let builder = self
            .client
            .post(self.config.api_url("/api/auth/login"))
            .json(&request);
        self.send_auth(builder, "Login failed").await
    }

    /// Register a new account
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ClientError> {
        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let builder = self
            .client
            .post(self.config.api_url("/api/auth/register"))
            .json(&request);
        self.send_auth(builder, "Registration failed").await
    }

    pub async fn list_summaries(&self, token: &str) -> Result<Vec<Summary>, ClientError> {
        let builder = self.authorized(Method::GET, "/api/summaries", token);
        self.fetch_json(builder, "Failed to fetch summaries.").await
    }

    pub async fn get_summary(&self, token: &str, id: &str) -> Result<Summary, ClientError> {
        let builder = self.authorized(Method::GET, &format!("/api/summaries/{}", id), token);
        self.fetch_json(builder, "Failed to fetch summary").await
    }

    /// Ask the backend to summarize a video
    pub async fn create_summary(
        &self,
        token: &str,
        youtube_url: &str,
    ) -> Result<Summary, ClientError> {
        let request = CreateSummaryRequest {
            youtube_url: youtube_url.to_string(),
        };
        let builder = self
            .authorized(Method::POST, "/api/summaries", token)
            .json(&request);
        self.fetch_json(builder, "Failed to generate summary.").await
    }

    pub async fn delete_summary(&self, token: &str, id: &str) -> Result<(), ClientError> {
        let builder = self.authorized(Method::DELETE, &format!("/api/summaries/{}", id), token);
        self.send(builder, "Failed to delete summary.").await?;
        Ok(())
    }

    pub async fn list_quizzes(&self, token: &str) -> Result<Vec<QuizListing>, ClientError> {
        let builder = self.authorized(Method::GET, "/api/quiz", token);
        self.fetch_json(builder, "Failed to fetch quizzes.").await
    }

    pub async fn get_quiz(&self, token: &str, id: &str) -> Result<Quiz, ClientError> {
        let builder = self.authorized(Method::GET, &format!("/api/quiz/{}", id), token);
        self.fetch_json(builder, "Failed to fetch quiz data.").await
    }

    pub async fn generate_quiz(&self, token: &str, summary_id: &str) -> Result<Quiz, ClientError> {
        let request = GenerateRequest {
            summary_id: summary_id.to_string(),
        };
        let builder = self
            .authorized(Method::POST, "/api/quiz/generate", token)
            .json(&request);
        self.fetch_json(builder, "Failed to generate quiz.").await
    }

    pub async fn delete_quiz(&self, token: &str, id: &str) -> Result<(), ClientError> {
        let builder = self.authorized(Method::DELETE, &format!("/api/quiz/{}", id), token);
        self.send(builder, "Failed to delete quiz.").await?;
        Ok(())
    }

    pub async fn generate_flashcards(
        &self,
        token: &str,
        summary_id: &str,
    ) -> Result<FlashcardSet, ClientError> {
        let request = GenerateRequest {
            summary_id: summary_id.to_string(),
        };
        let builder = self
            .authorized(Method::POST, "/api/flashcards/generate", token)
            .json(&request);
        self.fetch_json(builder, "Failed to generate flashcards.").await
    }

    pub async fn flashcards_by_summary(
        &self,
        token: &str,
        summary_id: &str,
    ) -> Result<Vec<Flashcard>, ClientError> {
        let path = format!("/api/flashcards/summary/{}", summary_id);
        let builder = self.authorized(Method::GET, &path, token);
        self.fetch_json(builder, "Failed to load flashcards").await
    }

    pub async fn get_flashcard(&self, token: &str, id: &str) -> Result<Flashcard, ClientError> {
        let builder = self.authorized(Method::GET, &format!("/api/flashcards/{}", id), token);
        self.fetch_json(builder, "Failed to load flashcard").await
    }

    pub async fn delete_flashcards_by_summary(
        &self,
        token: &str,
        summary_id: &str,
    ) -> Result<(), ClientError> {
        let path = format!("/api/flashcards/summary/{}", summary_id);
        let builder = self.authorized(Method::DELETE, &path, token);
        self.send(builder, "Failed to delete flashcards").await?;
        Ok(())
    }

    /// Render a summary to PDF on the backend and return the document bytes
    pub async fn export_pdf(&self, token: &str, summary: &Summary) -> Result<Vec<u8>, ClientError> {
        let builder = self
            .authorized(Method::POST, "/api/pdf/generate-pdf", token)
            .json(summary);
        let response = self.send(builder, "PDF generation failed.").await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::fetch(None, format!("Network error: {}", e)))?;
        Ok(bytes.to_vec())
    }

    fn authorized(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.client
            .request(method, self.config.api_url(path))
            .bearer_auth(token)
    }

    async fn send_auth(
        &self,
        builder: RequestBuilder,
        fallback: &str,
    ) -> Result<AuthResponse, ClientError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::authentication(format!("Network error: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = error_message(response, fallback).await;
            tracing::warn!(status = status.as_u16(), %message, "Authentication rejected");
            return Err(ClientError::authentication(message));
        }

        response
            .json::<AuthResponse>()
            .await
            .map_err(|e| ClientError::authentication(format!("Failed to parse response: {}", e)))
    }

    async fn send(&self, builder: RequestBuilder, fallback: &str) -> Result<Response, ClientError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::fetch(None, format!("Network error: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = error_message(response, fallback).await;
            tracing::warn!(status, %message, "API request failed");
            return Err(ClientError::fetch(Some(status), message));
        }

        Ok(response)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        fallback: &str,
    ) -> Result<T, ClientError> {
        let response = self.send(builder, fallback).await?;
        let status = response.status().as_u16();
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::fetch(Some(status), format!("Failed to parse response: {}", e)))
    }
}

/// `message` from the error body, or `fallback` when the body has none
async fn error_message(response: Response, fallback: &str) -> String {
    response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Download name for an exported summary
pub fn pdf_file_name(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}.pdf", stem)
}
