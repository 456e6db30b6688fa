//! Session State Container
//!
//! Owns the authenticated identity (user + bearer token) and mirrors it to
//! durable storage under the `token` and `user` keys. User and token only
//! ever change together: `establish_session` writes both, `clear_session`
//! removes both.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use studyreel::client::{ApiClient, Config, MemoryStore, SessionStore};
//!
//! # async fn example() -> Result<(), studyreel::shared::error::ClientError> {
//! let api = ApiClient::new(Config::new())?;
//! let mut session = SessionStore::init(MemoryStore::new());
//!
//! session.sign_in(&api, "ada@example.com", "hunter2").await?;
//! assert!(session.is_authenticated());
//!
//! session.sign_out();
//! # Ok(())
//! # }
//! ```

use std::fmt;

use reqwest::Url;

use crate::client::api::ApiClient;
use crate::client::storage::KeyValueStore;
use crate::shared::error::{ClientError, StorageError};
use crate::shared::models::{AuthResponse, User};

/// Storage key of the bearer token
pub const TOKEN_KEY: &str = "token";
/// Storage key of the serialized user record
pub const USER_KEY: &str = "user";

/// Authenticated identity and the credential proving it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

impl Session {
    /// Value of the `Authorization` header for this session
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Which credential exchange produced an auth response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    SignIn,
    SignUp,
}

impl fmt::Display for AuthFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFlow::SignIn => write!(f, "Sign in"),
            AuthFlow::SignUp => write!(f, "Sign up"),
        }
    }
}

/// Session container over a durable key-value store
#[derive(Debug)]
pub struct SessionStore<S: KeyValueStore> {
    store: S,
    session: Option<Session>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Construct the container and restore any persisted session.
    ///
    /// Incomplete or unreadable records are treated as signed out and removed
    /// from the store.
    pub fn init(mut store: S) -> Self {
        let session = restore(&mut store);
        match &session {
            Some(session) => {
                tracing::info!(user = %session.user.email, "Restored persisted session")
            }
            None => tracing::debug!("No persisted session"),
        }
        Self { store, session }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Current session or `NotAuthenticated`
    pub fn require(&self) -> Result<&Session, ClientError> {
        self.session.as_ref().ok_or(ClientError::NotAuthenticated)
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    /// Presence of a user is the authorization gate
    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Replace the session with `user` and `token`, in memory and on disk.
    ///
    /// On storage failure nothing changes in memory and the previously
    /// persisted entries are put back.
    pub fn establish_session(&mut self, user: User, token: String) -> Result<&Session, ClientError> {
        let user_json = serde_json::to_string(&user).map_err(StorageError::from)?;
        let previous_token = self.store.get(TOKEN_KEY)?;
        let previous_user = self.store.get(USER_KEY)?;

        self.store.set(TOKEN_KEY, &token)?;
        if let Err(e) = self.store.set(USER_KEY, &user_json) {
            self.put_back(TOKEN_KEY, previous_token.as_deref());
            self.put_back(USER_KEY, previous_user.as_deref());
            return Err(e.into());
        }

        Ok(self.session.insert(Session { user, token }))
    }

    fn put_back(&mut self, key: &str, previous: Option<&str>) {
        let result = match previous {
            Some(value) => self.store.set(key, value),
            None => self.store.remove(key),
        };
        if let Err(e) = result {
            tracing::warn!(key, error = %e, "Failed to roll back persisted session entry");
        }
    }

    /// Drop the session from memory and remove both durable entries.
    ///
    /// Never fails: storage errors are logged, memory is always cleared.
    pub fn clear_session(&mut self) {
        self.session = None;
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key, error = %e, "Failed to remove persisted session entry");
            }
        }
    }

    /// Adopt a successful login or register response
    pub fn accept(&mut self, response: AuthResponse) -> Result<&Session, ClientError> {
        self.establish_session(response.user, response.token)
    }

    /// Adopt the outcome of a login or register call, logging either way.
    ///
    /// The session is unchanged on failure.
    pub fn complete_auth(
        &mut self,
        flow: AuthFlow,
        result: Result<AuthResponse, ClientError>,
    ) -> Result<&Session, ClientError> {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "{} failed", flow);
                return Err(e);
            }
        };
        let session = self.accept(response)?;
        tracing::info!(user = %session.user.email, "{} successful", flow);
        Ok(session)
    }

    /// Sign in with email and password; the session is unchanged on failure
    pub async fn sign_in(
        &mut self,
        api: &ApiClient,
        email: &str,
        password: &str,
    ) -> Result<&Session, ClientError> {
        let result = api.login(email, password).await;
        self.complete_auth(AuthFlow::SignIn, result)
    }

    /// Register a new account and sign in as it
    pub async fn sign_up(
        &mut self,
        api: &ApiClient,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<&Session, ClientError> {
        let result = api.register(name, email, password).await;
        self.complete_auth(AuthFlow::SignUp, result)
    }

    /// Finish an OAuth redirect carrying `token` and URL-encoded JSON `user`
    /// query parameters.
    pub fn complete_redirect(&mut self, callback_url: &str) -> Result<&Session, ClientError> {
        let url = Url::parse(callback_url)
            .map_err(|e| ClientError::authentication(format!("Invalid authentication response: {}", e)))?;

        let mut token = None;
        let mut raw_user = None;
        for (key, value) in url.query_pairs() {
            match &*key {
                TOKEN_KEY => token = Some(value.into_owned()),
                USER_KEY => raw_user = Some(value.into_owned()),
                _ => {}
            }
        }

        let (Some(token), Some(raw_user)) = (token.filter(|t| !t.is_empty()), raw_user) else {
            return Err(ClientError::authentication(
                "Invalid authentication response. Please try logging in again.",
            ));
        };
        let user: User = serde_json::from_str(&raw_user).map_err(|e| {
            tracing::warn!(error = %e, "Unparsable user in authentication redirect");
            ClientError::authentication("Failed to parse user data. Please try logging in again.")
        })?;

        let session = self.establish_session(user, token)?;
        tracing::info!(user = %session.user.email, "Redirect sign in successful");
        Ok(session)
    }

    /// Clear the session
    pub fn sign_out(&mut self) {
        self.clear_session();
        tracing::info!("Sign out successful");
    }
}

fn restore<S: KeyValueStore>(store: &mut S) -> Option<Session> {
    let read = |store: &S, key: &str| match store.get(key) {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read persisted session entry");
            None
        }
    };
    let token = read(&*store, TOKEN_KEY);
    let raw_user = read(&*store, USER_KEY);

    let outcome = match (token, raw_user) {
        (Some(token), Some(raw_user)) => match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => return Some(Session { user, token }),
            Err(e) => Err(ClientError::malformed_session(e.to_string())),
        },
        (None, None) => return None,
        _ => Ok(()),
    };

    match outcome {
        Err(e) => tracing::warn!(error = %e, "Discarding persisted session"),
        Ok(()) => tracing::warn!("Discarding incomplete persisted session"),
    }
    for key in [TOKEN_KEY, USER_KEY] {
        if let Err(e) = store.remove(key) {
            tracing::warn!(key, error = %e, "Failed to remove persisted session entry");
        }
    }
    None
}
