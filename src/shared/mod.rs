//! Shared Module
//!
//! Types used across the client core and the desktop shell: wire models for
//! the StudyReel API, error types, and validated configuration.

/// Request and response bodies
pub mod models;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::{ClientError, StorageError};
pub use models::{AuthResponse, Flashcard, FlashcardSet, Question, Quiz, QuizListing, Summary, User};
