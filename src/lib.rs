//! StudyReel - Client Library
//!
//! StudyReel turns a video link into an AI-generated summary, then into
//! flashcards, quizzes and PDF exports. All generation happens on the
//! StudyReel backend; this crate is the client side.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire models, error types, configuration
//!
//! - **`client`** - UI-independent client core
//!   - Session state container with durable persistence
//!   - Typed API client, query cache and study library
//!   - Quiz interaction state machine and flashcard deck
//!
//! - **`egui_app`** - Native desktop shell (egui/eframe, `desktop` feature)
//!
//! # Usage
//!
//! ```rust,no_run
//! use studyreel::client::{ApiClient, Config, FileStore, QuizPage, SessionStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let api = ApiClient::new(config.clone())?;
//! let mut session = SessionStore::init(FileStore::open(config.session_path())?);
//!
//! if !session.is_authenticated() {
//!     session.sign_in(&api, "ada@example.com", "hunter2").await?;
//! }
//!
//! let mut page = QuizPage::new("quiz-id");
//! page.load(&api, session.require()?).await;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Fallible operations return `Result<T, ClientError>`; nothing in the core
//! retries except the summaries list, which is fetched at most twice.

/// Shared types and data structures
pub mod shared;

/// Client core
pub mod client;

/// egui native desktop app
#[cfg(feature = "desktop")]
pub mod egui_app;
