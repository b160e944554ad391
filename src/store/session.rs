//! Session slice: the signed-in actor

use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use super::{Action, Reducer, SessionStorage, SliceState, Store};
use crate::models::{Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
    Error,
}

impl AuthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthStatus::Idle => "idle",
            AuthStatus::Loading => "loading",
            AuthStatus::Success => "success",
            AuthStatus::Failed => "failed",
            AuthStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub user: Option<User>,
    /// Always `user.role`; set and cleared together with `user`
    pub role: Option<Role>,
    pub status: AuthStatus,
    pub response: Option<String>,
    pub error: Option<String>,
    pub dark_mode: bool,
}

impl SessionState {
    /// State seeded from a persisted user record
    pub fn signed_in(user: User) -> Self {
        Self {
            role: Some(user.role),
            user: Some(user),
            ..Self::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.token.as_deref())
    }
}

impl SliceState for SessionState {}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    BeginAuth,
    /// At most once per login attempt
    AuthSucceeded(User),
    AuthFailed(String),
    AuthErrored(String),
    /// Dismisses a notification without logging out
    ResetToIdle,
    Logout,
    ToggleDarkMode,
}

impl SessionAction {
    pub fn name(&self) -> &'static str {
        match self {
            SessionAction::BeginAuth => "begin-auth",
            SessionAction::AuthSucceeded(_) => "auth-succeeded",
            SessionAction::AuthFailed(_) => "auth-failed",
            SessionAction::AuthErrored(_) => "auth-errored",
            SessionAction::ResetToIdle => "reset-to-idle",
            SessionAction::Logout => "logout",
            SessionAction::ToggleDarkMode => "toggle-dark-mode",
        }
    }
}

impl Action for SessionAction {}

pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Action = SessionAction;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State {
        match action {
            SessionAction::BeginAuth => SessionState {
                status: AuthStatus::Loading,
                ..state
            },
            SessionAction::AuthSucceeded(user) => SessionState {
                status: AuthStatus::Success,
                role: Some(user.role),
                user: Some(user),
                error: None,
                response: None,
                ..state
            },
            SessionAction::AuthFailed(message) => SessionState {
                status: AuthStatus::Failed,
                response: Some(message),
                error: None,
                ..state
            },
            SessionAction::AuthErrored(message) => SessionState {
                status: AuthStatus::Error,
                error: Some(message),
                response: None,
                ..state
            },
            SessionAction::ResetToIdle => SessionState {
                status: AuthStatus::Idle,
                response: None,
                ..state
            },
            SessionAction::Logout => SessionState {
                user: None,
                role: None,
                status: AuthStatus::Idle,
                error: None,
                ..state
            },
            SessionAction::ToggleDarkMode => SessionState {
                dark_mode: !state.dark_mode,
                ..state
            },
        }
    }
}

enum Effect {
    Persist(User),
    Remove,
}

/// Session container: the pure slice plus its persistence side effects
#[derive(Clone)]
pub struct SessionStore {
    store: Store<SessionReducer>,
    storage: Arc<dyn SessionStorage>,
    /// Held across a transition and its effect so the stored record
    /// follows the same order as the slice
    dispatch_lock: Arc<Mutex<()>>,
}

impl SessionStore {
    pub fn new(initial: SessionState, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            store: Store::new(initial),
            storage,
            dispatch_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Seed the slice from the persisted record, if any.
    ///
    /// An unreadable record is discarded and the session starts anonymous.
    pub fn restore(storage: Arc<dyn SessionStorage>, dark_mode: bool) -> Self {
        let initial = match storage.load() {
            Ok(Some(user)) => {
                tracing::info!(user_id = user.id, role = %user.role, "Restored persisted session");
                SessionState::signed_in(user)
            }
            Ok(None) => SessionState::default(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session record: {}", e);
                if let Err(e) = storage.clear() {
                    tracing::warn!("Failed to remove session record: {}", e);
                }
                SessionState::default()
            }
        };
        Self::new(SessionState { dark_mode, ..initial }, storage)
    }

    /// Apply a transition, then persist or remove the session record
    /// when the transition calls for it. Storage failures are logged and
    /// never alter the state.
    pub fn dispatch(&self, action: SessionAction) {
        let effect = match &action {
            SessionAction::AuthSucceeded(user) => Some(Effect::Persist(user.clone())),
            SessionAction::Logout => Some(Effect::Remove),
            _ => None,
        };
        tracing::debug!(action = action.name(), "session transition");
        let _guard = self
            .dispatch_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.store.dispatch(action);

        match effect {
            Some(Effect::Persist(user)) => {
                if let Err(e) = self.storage.save(&user) {
                    tracing::warn!(user_id = user.id, "Failed to persist session: {}", e);
                }
            }
            Some(Effect::Remove) => {
                if let Err(e) = self.storage.clear() {
                    tracing::warn!("Failed to remove persisted session: {}", e);
                }
            }
            None => {}
        }
    }

    pub fn state(&self) -> SessionState {
        self.store.state()
    }

    pub fn select<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
        self.store.select(f)
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.store.subscribe()
    }

    pub fn token(&self) -> Option<String> {
        self.select(|s| s.token().map(str::to_string))
    }
}
