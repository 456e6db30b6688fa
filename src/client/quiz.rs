//! # Quiz Interaction State Machine
//!
//! One question at a time: pick an answer (locked once picked), see whether it
//! was right, move on. The score counts correct picks and is frozen when the
//! last question is advanced past.
//!
//! ```text
//! Loading ──ok──> Ready(0) ──advance──> … ──> Ready(last) ──advance──> Finished
//!    └──err──> Error
//! ```
//!
//! `QuizPage` wraps the load step. Its cancellation token is cancelled when
//! the page is left; a cancelled load never touches page state.

use tokio_util::sync::CancellationToken;

use crate::client::api::ApiClient;
use crate::client::session::Session;
use crate::shared::error::ClientError;
use crate::shared::models::{Question, Quiz};

/// Final tally of a completed quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
}

/// Outcome of `select_answer`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Recorded { correct: bool },
    /// An answer is already locked in, or the quiz is over
    Ignored,
}

/// Outcome of `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next { index: usize },
    Finished(QuizResult),
    /// No answer selected yet for the current question
    Unanswered,
    AlreadyFinished,
}

/// Observable state of a quiz page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPhase {
    Loading,
    Ready { index: usize },
    Finished(QuizResult),
    Error(String),
}

/// Progress through a loaded quiz
#[derive(Debug, Clone)]
pub struct QuizRun {
    quiz: Quiz,
    index: usize,
    selected: Option<String>,
    correct: Option<bool>,
    score: usize,
    finished: bool,
}

impl QuizRun {
    /// Start at the first question; a quiz without questions is already finished
    pub fn new(quiz: Quiz) -> Self {
        let finished = quiz.questions.is_empty();
        Self {
            quiz,
            index: 0,
            selected: None,
            correct: None,
            score: 0,
            finished,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn total(&self) -> usize {
        self.quiz.questions.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Question on screen, `None` once finished
    pub fn current_question(&self) -> Option<&Question> {
        if self.finished {
            return None;
        }
        self.quiz.questions.get(self.index)
    }

    pub fn selected_answer(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Correctness of the locked-in answer for the current question
    pub fn is_correct(&self) -> Option<bool> {
        self.correct
    }

    pub fn is_last_question(&self) -> bool {
        self.index + 1 >= self.total()
    }

    pub fn result(&self) -> Option<QuizResult> {
        self.finished.then_some(QuizResult {
            score: self.score,
            total: self.total(),
        })
    }

    pub fn phase(&self) -> QuizPhase {
        match self.result() {
            Some(result) => QuizPhase::Finished(result),
            None => QuizPhase::Ready { index: self.index },
        }
    }

    /// Lock in `answer` for the current question
    pub fn select_answer(&mut self, answer: &str) -> Selection {
        if self.selected.is_some() {
            return Selection::Ignored;
        }
        let Some(question) = self.current_question() else {
            return Selection::Ignored;
        };

        let correct = answer == question.correct_answer;
        self.selected = Some(answer.to_string());
        self.correct = Some(correct);
        if correct {
            self.score += 1;
        }
        Selection::Recorded { correct }
    }

    /// Move past the current question once an answer is locked in
    pub fn advance(&mut self) -> Advance {
        if self.finished {
            return Advance::AlreadyFinished;
        }
        if self.selected.is_none() {
            return Advance::Unanswered;
        }

        if self.is_last_question() {
            self.finished = true;
            let result = QuizResult {
                score: self.score,
                total: self.total(),
            };
            tracing::debug!(quiz = %self.quiz.id, score = result.score, total = result.total, "Quiz finished");
            return Advance::Finished(result);
        }

        self.index += 1;
        self.selected = None;
        self.correct = None;
        Advance::Next { index: self.index }
    }
}

#[derive(Debug, Clone)]
pub enum QuizState {
    Loading,
    Ready(QuizRun),
    Error { message: String },
}

/// A quiz page instance: one load, then interaction
#[derive(Debug)]
pub struct QuizPage {
    quiz_id: String,
    state: QuizState,
    cancel: CancellationToken,
}

impl QuizPage {
    pub fn new(quiz_id: impl Into<String>) -> Self {
        Self {
            quiz_id: quiz_id.into(),
            state: QuizState::Loading,
            cancel: CancellationToken::new(),
        }
    }

    pub fn quiz_id(&self) -> &str {
        &self.quiz_id
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn phase(&self) -> QuizPhase {
        match &self.state {
            QuizState::Loading => QuizPhase::Loading,
            QuizState::Ready(run) => run.phase(),
            QuizState::Error { message } => QuizPhase::Error(message.clone()),
        }
    }

    pub fn run(&self) -> Option<&QuizRun> {
        match &self.state {
            QuizState::Ready(run) => Some(run),
            _ => None,
        }
    }

    /// Token to hand to the fetch so leaving the page abandons it
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Abandon any in-flight load
    pub fn leave(&self) {
        self.cancel.cancel();
    }

    pub fn is_left(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Apply the result of the load.
    ///
    /// Ignored unless the page is still loading and has not been left.
    pub fn resolve(&mut self, result: Result<Quiz, ClientError>) {
        if !matches!(self.state, QuizState::Loading) || self.is_left() {
            tracing::debug!(quiz = %self.quiz_id, "Discarding quiz load result");
            return;
        }

        self.state = match result {
            Ok(quiz) => {
                tracing::info!(quiz = %quiz.id, questions = quiz.questions.len(), "Quiz loaded");
                QuizState::Ready(QuizRun::new(quiz))
            }
            Err(ClientError::Cancelled) => return,
            Err(e) => {
                tracing::warn!(quiz = %self.quiz_id, error = %e, "Quiz load failed");
                QuizState::Error {
                    message: e.to_string(),
                }
            }
        };
    }

    /// Fetch the quiz and apply the result
    pub async fn load(&mut self, api: &ApiClient, session: &Session) {
        let result = fetch_quiz(api, session, &self.quiz_id, &self.cancel).await;
        self.resolve(result);
    }

    pub fn select_answer(&mut self, answer: &str) -> Selection {
        match &mut self.state {
            QuizState::Ready(run) => run.select_answer(answer),
            _ => Selection::Ignored,
        }
    }

    pub fn advance(&mut self) -> Advance {
        match &mut self.state {
            QuizState::Ready(run) => run.advance(),
            _ => Advance::Unanswered,
        }
    }
}

/// Fetch a quiz unless `cancel` fires first
pub async fn fetch_quiz(
    api: &ApiClient,
    session: &Session,
    quiz_id: &str,
    cancel: &CancellationToken,
) -> Result<Quiz, ClientError> {
    tokio::select! {
        _ = cancel.cancelled() => Err(ClientError::Cancelled),
        result = api.get_quiz(&session.token, quiz_id) => {
            if cancel.is_cancelled() {
                Err(ClientError::Cancelled)
            } else {
                result
            }
        }
    }
}
