//! Sign-in, sign-out and own password changes

use std::sync::Arc;

use validator::Validate;

use crate::{
    api::LibraryApi,
    error::{AppError, AppResult, ErrorClass},
    models::{Credentials, PasswordChange, User},
    store::{SessionAction, SessionStore},
};

#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn LibraryApi>,
    session: SessionStore,
}

impl AuthService {
    pub fn new(api: Arc<dyn LibraryApi>, session: SessionStore) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Authenticate and, on success, make the user the current session
    pub async fn login(&self, credentials: &Credentials) -> AppResult<User> {
        self.session.dispatch(SessionAction::BeginAuth);

        match self.authenticate(credentials).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, role = %user.role, "Signed in");
                self.session.dispatch(SessionAction::AuthSucceeded(user.clone()));
                Ok(user)
            }
            Err(e) => {
                // keep sending the token of whoever was signed in before
                self.api.set_token(self.session.token());
                tracing::warn!(login = %credentials.username, "Sign-in failed: {}", e);
                self.session.dispatch(failure_action(&e));
                Err(e)
            }
        }
    }

    async fn authenticate(&self, credentials: &Credentials) -> AppResult<User> {
        credentials.validate()?;
        let response = self.api.login(credentials).await?;
        self.api.set_token(Some(response.token.clone()));

        let mut user = match response.user {
            Some(user) => user,
            None => self.api.me().await?,
        };
        user.token = Some(response.token);
        Ok(user)
    }

    /// Drop the session locally; the server keeps no session state
    pub fn logout(&self) {
        self.api.set_token(None);
        self.session.dispatch(SessionAction::Logout);
        tracing::info!("Signed out");
    }

    /// Submit a new password for the signed-in user.
    ///
    /// `current_password` is checked by the server before it accepts the change.
    pub async fn reset_password(
        &self,
        current_password: Option<String>,
        new_password: String,
    ) -> AppResult<()> {
        if !self.session.select(|s| s.is_authenticated()) {
            let e = AppError::NotAuthenticated;
            self.session.dispatch(failure_action(&e));
            return Err(e);
        }

        let change = PasswordChange {
            current_password,
            new_password,
        };
        let result = match change.validate() {
            Ok(()) => self.api.change_password(&change).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(()) => {
                tracing::info!("Password changed");
                self.session.dispatch(SessionAction::ResetToIdle);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Password change failed: {}", e);
                self.session.dispatch(failure_action(&e));
                Err(e)
            }
        }
    }

    /// Dismiss the current notification without signing out
    pub fn acknowledge(&self) {
        self.session.dispatch(SessionAction::ResetToIdle);
    }

    pub fn toggle_dark_mode(&self) -> bool {
        self.session.dispatch(SessionAction::ToggleDarkMode);
        self.session.select(|s| s.dark_mode)
    }
}

fn failure_action(error: &AppError) -> SessionAction {
    match error.class() {
        ErrorClass::Business => SessionAction::AuthFailed(error.to_string()),
        ErrorClass::Transport => SessionAction::AuthErrored(error.to_string()),
    }
}
