//! Client-side query cache
//!
//! Typed results of read endpoints, keyed by what was asked for. Entries live
//! until a mutation invalidates them or their time-to-live runs out.
//!
//! Every invalidation bumps a generation counter. A read captures the
//! generation before fetching and only stores its result if no invalidation
//! happened meanwhile, so a slow response can never resurrect cleared data.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::shared::models::{Flashcard, QuizListing, Summary};

const MAX_ENTRIES: u64 = 1000;
const TIME_TO_LIVE: Duration = Duration::from_secs(300);

/// Identity of a cached query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Summaries,
    Summary(String),
    Quizzes,
    /// Flashcards of one summary
    Flashcards(String),
    Flashcard(String),
}

#[derive(Debug, Clone)]
pub enum CachedValue {
    Summaries(Vec<Summary>),
    Summary(Summary),
    Quizzes(Vec<QuizListing>),
    Flashcards(Vec<Flashcard>),
    Flashcard(Flashcard),
}

/// Payload types that can be stored in the cache
pub trait Cacheable: Sized {
    fn into_cached(self) -> CachedValue;
    fn from_cached(value: CachedValue) -> Option<Self>;
}

macro_rules! cacheable {
    ($ty:ty, $variant:ident) => {
        impl Cacheable for $ty {
            fn into_cached(self) -> CachedValue {
                CachedValue::$variant(self)
            }

            fn from_cached(value: CachedValue) -> Option<Self> {
                match value {
                    CachedValue::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

cacheable!(Vec<Summary>, Summaries);
cacheable!(Summary, Summary);
cacheable!(Vec<QuizListing>, Quizzes);
cacheable!(Vec<Flashcard>, Flashcards);
cacheable!(Flashcard, Flashcard);

/// Shared query cache; clones see the same entries
#[derive(Clone)]
pub struct QueryCache {
    entries: Cache<QueryKey, CachedValue>,
    generation: Arc<AtomicU64>,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.entries.entry_count())
            .field("generation", &self.generation())
            .finish()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        let entries = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(TIME_TO_LIVE)
            .build();
        Self {
            entries,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Current invalidation generation; capture it before fetching
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Cached payload for `key`, if present and of type `T`
    pub async fn get<T: Cacheable>(&self, key: &QueryKey) -> Option<T> {
        let hit = self.entries.get(key).await.and_then(T::from_cached);
        if hit.is_some() {
            tracing::debug!(?key, "Cache hit");
        }
        hit
    }

    /// Store `value` unless the cache was invalidated since `generation`.
    ///
    /// Returns whether the value was kept.
    pub async fn insert<T: Cacheable>(&self, key: QueryKey, value: T, generation: u64) -> bool {
        if self.generation() != generation {
            tracing::debug!(?key, "Dropping result fetched before an invalidation");
            return false;
        }
        self.entries.insert(key.clone(), value.into_cached()).await;

        // An invalidation may have landed between the check and the insert
        if self.generation() != generation {
            self.entries.invalidate(&key).await;
            return false;
        }
        true
    }

    /// Drop one entry; returns whether it was present
    pub async fn invalidate(&self, key: &QueryKey) -> bool {
        self.bump();
        let removed = self.entries.remove(key).await.is_some();
        if removed {
            tracing::debug!(?key, "Invalidated cached query");
        }
        removed
    }

    /// Drop every entry matching `predicate`; returns how many were dropped
    pub async fn invalidate_where<F>(&self, predicate: F) -> usize
    where
        F: Fn(&QueryKey, &CachedValue) -> bool,
    {
        self.bump();
        let matching: Vec<QueryKey> = self
            .entries
            .iter()
            .filter(|(key, value)| predicate(key, value))
            .map(|(key, _)| QueryKey::clone(&key))
            .collect();

        for key in &matching {
            self.entries.invalidate(key).await;
        }
        matching.len()
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Forget everything, including results of reads still in flight
    pub fn clear(&self) {
        self.bump();
        self.entries.invalidate_all();
        tracing::debug!("Cleared query cache");
    }
}
