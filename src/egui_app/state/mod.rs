use std::future::Future;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};

use tokio::runtime::Runtime;

use crate::client::{
    fetch_quiz, ApiClient, AuthFlow, Config, FileStore, FlashcardDeck, Library, QuizPage, Session,
    SessionStore,
};
use crate::egui_app::AppView;
use crate::shared::error::ClientError;
use crate::shared::models::{AuthResponse, Flashcard, Quiz, QuizListing, Summary};

type Outcome<T> = Result<T, ClientError>;

/// Completed dashboard or quiz-list mutation
#[derive(Debug)]
pub enum LibraryAction {
    SummaryCreated(Summary),
    SummaryDeleted(String),
    QuizGenerated(Quiz),
    QuizDeleted(String),
    FlashcardsGenerated { summary_id: String },
    FlashcardsDeleted { summary_id: String },
    PdfSaved(PathBuf),
}

/// Central application state shared across egui views.
///
/// Network work runs on the tokio runtime; each in-flight request is a
/// receiver polled once per frame. A pending receiver disables the control
/// that started it.
pub struct AppState {
    runtime: Runtime,
    pub config: Config,
    pub session: SessionStore<FileStore>,
    pub library: Library,
    pub current_view: AppView,

    pub name_input: String,
    pub email_input: String,
    pub password_input: String,
    pub confirm_password_input: String,
    pub is_signup_mode: bool,
    pub auth_error: Option<String>,
    auth_result: Option<Receiver<(AuthFlow, Outcome<AuthResponse>)>>,

    pub video_url_input: String,
    pub summaries: Option<Vec<Summary>>,
    summaries_result: Option<Receiver<Outcome<Vec<Summary>>>>,
    pub quizzes: Option<Vec<QuizListing>>,
    quizzes_result: Option<Receiver<Outcome<Vec<QuizListing>>>>,
    action_result: Option<Receiver<Outcome<LibraryAction>>>,

    pub quiz_page: Option<QuizPage>,
    quiz_result: Option<Receiver<Outcome<Quiz>>>,

    pub deck: Option<FlashcardDeck>,
    pub deck_error: Option<String>,
    deck_result: Option<Receiver<Outcome<Vec<Flashcard>>>>,

    pub error: Option<String>,
    pub notice: Option<String>,
}

impl AppState {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        Self::with_config(Config::from_env()?)
    }

    pub fn with_config(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let session = SessionStore::init(FileStore::open(config.session_path())?);
        let library = Library::new(ApiClient::new(config.clone())?);
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        let mut state = Self {
            runtime,
            config,
            session,
            library,
            current_view: AppView::Auth,
            name_input: String::new(),
            email_input: String::new(),
            password_input: String::new(),
            confirm_password_input: String::new(),
            is_signup_mode: false,
            auth_error: None,
            auth_result: None,
            video_url_input: String::new(),
            summaries: None,
            summaries_result: None,
            quizzes: None,
            quizzes_result: None,
            action_result: None,
            quiz_page: None,
            quiz_result: None,
            deck: None,
            deck_error: None,
            deck_result: None,
            error: None,
            notice: None,
        };
        state.navigate(AppView::Dashboard);
        Ok(state)
    }

    fn spawn<T, F>(&self, future: F) -> Receiver<T>
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
    {
        let (tx, rx) = channel();
        self.runtime.spawn(async move {
            let _ = tx.send(future.await);
        });
        rx
    }

    fn current_session(&mut self) -> Option<Session> {
        let session = self.session.session().cloned();
        if session.is_none() {
            self.navigate(AppView::Auth);
        }
        session
    }

    pub fn is_authenticating(&self) -> bool {
        self.auth_result.is_some()
    }

    pub fn is_loading_summaries(&self) -> bool {
        self.summaries_result.is_some()
    }

    pub fn is_loading_quizzes(&self) -> bool {
        self.quizzes_result.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.action_result.is_some()
    }

    pub fn is_loading_deck(&self) -> bool {
        self.deck_result.is_some()
    }

    /// Switch views, applying the session guard and starting the new view's loads
    pub fn navigate(&mut self, view: AppView) {
        let view = view.guard(self.session.is_authenticated());

        if matches!(self.current_view, AppView::Quiz(_)) && self.current_view != view {
            if let Some(page) = self.quiz_page.take() {
                page.leave();
            }
            self.quiz_result = None;
        }
        self.error = None;
        self.current_view = view.clone();

        match view {
            AppView::Dashboard if self.summaries.is_none() => self.refresh_summaries(),
            AppView::Quizzes if self.quizzes.is_none() => self.refresh_quizzes(),
            AppView::Quiz(id) => self.open_quiz(id),
            AppView::Flashcards(summary_id) => self.open_flashcards(summary_id),
            _ => {}
        }
    }

    /// Drain finished background requests
    pub fn poll(&mut self) {
        if let Some((flow, result)) = take(&mut self.auth_result) {
            self.finish_auth(flow, result);
        }
        if let Some(result) = take(&mut self.summaries_result) {
            match result {
                Ok(summaries) => self.summaries = Some(summaries),
                Err(e) => self.error = Some(e.to_string()),
            }
        }
        if let Some(result) = take(&mut self.quizzes_result) {
            match result {
                Ok(quizzes) => self.quizzes = Some(quizzes),
                Err(e) => self.error = Some(e.to_string()),
            }
        }
        if let Some(result) = take(&mut self.action_result) {
            match result {
                Ok(action) => self.finish_action(action),
                Err(e) => self.error = Some(e.to_string()),
            }
        }
        if let Some(result) = take(&mut self.quiz_result) {
            if let Some(page) = self.quiz_page.as_mut() {
                page.resolve(result);
            }
        }
        if let Some(result) = take(&mut self.deck_result) {
            match result {
                Ok(cards) => self.deck = Some(FlashcardDeck::new(cards)),
                Err(e) => self.deck_error = Some(e.to_string()),
            }
        }
    }

    fn finish_auth(&mut self, flow: AuthFlow, result: Outcome<AuthResponse>) {
        let accepted = self.session.complete_auth(flow, result).map(|_| ());
        match accepted {
            Ok(()) => {
                self.auth_error = None;
                self.password_input.clear();
                self.confirm_password_input.clear();
                self.is_signup_mode = false;
                self.navigate(AppView::Dashboard);
            }
            Err(e) => self.auth_error = Some(e.to_string()),
        }
    }

    fn finish_action(&mut self, action: LibraryAction) {
        match action {
            LibraryAction::SummaryCreated(summary) => {
                self.notice = Some(format!("Summary ready: {}", summary.title));
                self.video_url_input.clear();
                self.refresh_summaries();
            }
            LibraryAction::SummaryDeleted(id) => {
                if let Some(summaries) = self.summaries.as_mut() {
                    summaries.retain(|s| s.id != id);
                }
            }
            LibraryAction::QuizGenerated(quiz) => {
                self.quizzes = None;
                self.navigate(AppView::Quiz(quiz.id));
            }
            LibraryAction::QuizDeleted(id) => {
                if let Some(quizzes) = self.quizzes.as_mut() {
                    quizzes.retain(|q| q.id != id);
                }
            }
            LibraryAction::FlashcardsGenerated { summary_id } => {
                self.navigate(AppView::Flashcards(summary_id));
            }
            LibraryAction::FlashcardsDeleted { summary_id } => {
                self.notice = Some("Flashcards deleted successfully!".to_string());
                self.deck = None;
                if self.current_view == AppView::Flashcards(summary_id) {
                    self.navigate(AppView::Dashboard);
                }
            }
            LibraryAction::PdfSaved(path) => {
                self.notice = Some(format!("Saved {}", path.display()));
            }
        }
    }

    pub fn toggle_auth_mode(&mut self) {
        self.is_signup_mode = !self.is_signup_mode;
        self.auth_error = None;
        self.confirm_password_input.clear();
    }

    pub fn handle_login(&mut self) {
        if self.is_authenticating() {
            return;
        }
        if self.email_input.trim().is_empty() || self.password_input.is_empty() {
            self.auth_error = Some("Email and password are required".to_string());
            return;
        }

        self.auth_error = None;
        let api = self.library.api().clone();
        let email = self.email_input.trim().to_string();
        let password = self.password_input.clone();
        self.auth_result = Some(self.spawn(async move {
            (AuthFlow::SignIn, api.login(&email, &password).await)
        }));
    }

    pub fn handle_signup(&mut self) {
        if self.is_authenticating() {
            return;
        }
        if self.name_input.trim().is_empty() {
            self.auth_error = Some("Name is required".to_string());
            return;
        }
        if self.email_input.trim().is_empty() || self.password_input.is_empty() {
            self.auth_error = Some("Email and password are required".to_string());
            return;
        }
        if self.password_input != self.confirm_password_input {
            self.auth_error = Some("Passwords do not match".to_string());
            return;
        }

        self.auth_error = None;
        let api = self.library.api().clone();
        let name = self.name_input.trim().to_string();
        let email = self.email_input.trim().to_string();
        let password = self.password_input.clone();
        self.auth_result = Some(self.spawn(async move {
            (AuthFlow::SignUp, api.register(&name, &email, &password).await)
        }));
    }

    /// Sign out and drop everything loaded for the previous user.
    ///
    /// Pending requests are abandoned with their receivers, so their results
    /// can never land in the next session.
    pub fn logout(&mut self) {
        if let Some(page) = self.quiz_page.take() {
            page.leave();
        }
        self.summaries_result = None;
        self.quizzes_result = None;
        self.action_result = None;
        self.quiz_result = None;
        self.deck_result = None;

        self.session.sign_out();
        self.library.clear_cache();
        self.summaries = None;
        self.quizzes = None;
        self.deck = None;
        self.deck_error = None;
        self.video_url_input.clear();
        self.notice = None;
        self.navigate(AppView::Auth);
    }

    pub fn refresh_summaries(&mut self) {
        let Some(session) = self.current_session() else {
            return;
        };
        let library = self.library.clone();
        self.summaries_result =
            Some(self.spawn(async move { library.summaries(&session).await }));
    }

    pub fn refresh_quizzes(&mut self) {
        let Some(session) = self.current_session() else {
            return;
        };
        let library = self.library.clone();
        self.quizzes_result = Some(self.spawn(async move { library.quizzes(&session).await }));
    }

    fn run_action<F, Fut>(&mut self, action: F)
    where
        F: FnOnce(Library, Session) -> Fut,
        Fut: Future<Output = Outcome<LibraryAction>> + Send + 'static,
    {
        if self.is_busy() {
            return;
        }
        let Some(session) = self.current_session() else {
            return;
        };
        self.error = None;
        self.notice = None;
        self.action_result = Some(self.spawn(action(self.library.clone(), session)));
    }

    pub fn submit_video(&mut self) {
        let url = self.video_url_input.clone();
        self.run_action(|library, session| async move {
            library
                .create_summary(&session, &url)
                .await
                .map(LibraryAction::SummaryCreated)
        });
    }

    pub fn delete_summary(&mut self, id: String) {
        self.run_action(|library, session| async move {
            library.delete_summary(&session, &id).await?;
            Ok(LibraryAction::SummaryDeleted(id))
        });
    }

    pub fn generate_quiz(&mut self, summary_id: String) {
        self.run_action(|library, session| async move {
            library
                .generate_quiz(&session, &summary_id)
                .await
                .map(LibraryAction::QuizGenerated)
        });
    }

    pub fn delete_quiz(&mut self, id: String) {
        self.run_action(|library, session| async move {
            library.delete_quiz(&session, &id).await?;
            Ok(LibraryAction::QuizDeleted(id))
        });
    }

    pub fn generate_flashcards(&mut self, summary_id: String) {
        self.run_action(|library, session| async move {
            library.generate_flashcards(&session, &summary_id).await?;
            Ok(LibraryAction::FlashcardsGenerated { summary_id })
        });
    }

    pub fn delete_flashcards(&mut self, summary_id: String) {
        self.run_action(|library, session| async move {
            library.delete_flashcards(&session, &summary_id).await?;
            Ok(LibraryAction::FlashcardsDeleted { summary_id })
        });
    }

    pub fn export_pdf(&mut self, summary: Summary) {
        let dir = dirs::download_dir().unwrap_or_else(|| self.config.data_dir().join("exports"));
        self.run_action(|library, session| async move {
            let export = library.export_pdf(&session, &summary).await?;
            let path = export.save_to(&dir)?;
            Ok(LibraryAction::PdfSaved(path))
        });
    }

    fn open_quiz(&mut self, id: String) {
        let Some(session) = self.current_session() else {
            return;
        };
        let page = QuizPage::new(id.clone());
        let cancel = page.cancel_token();
        let api = self.library.api().clone();
        self.quiz_page = Some(page);
        self.quiz_result = Some(self.spawn(async move {
            fetch_quiz(&api, &session, &id, &cancel).await
        }));
    }

    fn open_flashcards(&mut self, summary_id: String) {
        let Some(session) = self.current_session() else {
            return;
        };
        self.deck = None;
        self.deck_error = None;
        let library = self.library.clone();
        self.deck_result = Some(self.spawn(async move {
            library.flashcards(&session, &summary_id).await
        }));
    }
}

/// Take a finished result out of `slot`, leaving `None` behind
fn take<T>(slot: &mut Option<Receiver<T>>) -> Option<T> {
    let rx = slot.as_ref()?;
    match rx.try_recv() {
        Ok(value) => {
            *slot = None;
            Some(value)
        }
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => {
            *slot = None;
            None
        }
    }
}
