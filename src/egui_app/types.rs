/**
 * View Types
 *
 * Screens of the desktop shell and the session guard deciding which one may
 * be shown.
 */

/// Current app view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppView {
    /// Sign in / sign up
    Auth,
    /// Video submission and saved summaries
    Dashboard,
    /// Saved quizzes
    Quizzes,
    /// Taking the quiz with this id
    Quiz(String),
    /// Flashcards of the summary with this id
    Flashcards(String),
}

impl AppView {
    pub fn requires_session(&self) -> bool {
        !matches!(self, AppView::Auth)
    }

    /// Redirect to the auth screen without a session, and away from it with one
    pub fn guard(self, authenticated: bool) -> AppView {
        match (self.requires_session(), authenticated) {
            (true, false) => AppView::Auth,
            (false, true) => AppView::Dashboard,
            _ => self,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AppView::Auth => "Welcome",
            AppView::Dashboard => "Dashboard",
            AppView::Quizzes => "Quizzes",
            AppView::Quiz(_) => "Quiz Time!",
            AppView::Flashcards(_) => "Flashcards",
        }
    }
}
