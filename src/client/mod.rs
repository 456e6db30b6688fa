//! Client Core
//!
//! UI-independent client logic: configuration, durable storage, the session
//! container, the typed API client with its query cache, and the quiz and
//! flashcard state machines.
//!
//! # Architecture
//!
//! - **`config`** - API origin, timeout, data directory
//! - **`storage`** - durable key-value storage for the session
//! - **`session`** - session state container (sign in/up/out, restore)
//! - **`api`** - HTTP client for the StudyReel backend
//! - **`cache`** / **`library`** - cached reads and invalidating mutations
//! - **`quiz`** - quiz interaction state machine
//! - **`flashcards`** - flashcard deck navigation

pub mod api;
pub mod cache;
pub mod config;
pub mod flashcards;
pub mod library;
pub mod quiz;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use api::{pdf_file_name, ApiClient};
pub use cache::{QueryCache, QueryKey};
pub use config::Config;
pub use flashcards::FlashcardDeck;
pub use library::{Library, PdfExport};
pub use quiz::{fetch_quiz, Advance, QuizPage, QuizPhase, QuizResult, QuizRun, QuizState, Selection};
pub use session::{AuthFlow, Session, SessionStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
