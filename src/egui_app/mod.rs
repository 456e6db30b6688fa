//! egui Native Desktop App Module
//!
//! Desktop shell over the client core: sign in, submit videos, browse
//! summaries and quizzes, take quizzes and study flashcards.
//!
//! # Module Structure
//!
//! ```text
//! egui_app/
//! ├── mod.rs      - Module exports
//! ├── main.rs     - Binary entry point
//! ├── types.rs    - Views and the session guard
//! ├── state/      - AppState and background requests
//! ├── views/      - One render function per view
//! └── theme/      - Colors and frame styles
//! ```

pub mod state;
pub mod theme;
pub mod types;
pub mod views;

// Re-export commonly used types
pub use state::AppState;
pub use types::AppView;
