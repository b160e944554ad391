//! Transient notification banner derived from a slice's messages

use crate::store::{AuthStatus, EntityListState, ListStatus, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    /// Request declined by the server
    Rejected,
    /// Network or unexpected failure
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    fn new(kind: BannerKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn for_list<T>(state: &EntityListState<T>) -> Option<Self> {
        if let Some(error) = &state.error {
            return Some(Self::new(BannerKind::Failure, error.as_str()));
        }
        if let Some(response) = &state.response {
            return Some(Self::new(BannerKind::Rejected, response.as_str()));
        }
        (state.status == ListStatus::Added).then(|| Self::new(BannerKind::Success, "Saved"))
    }

    pub fn for_session(state: &SessionState) -> Option<Self> {
        match state.status {
            AuthStatus::Failed => state
                .response
                .as_deref()
                .map(|m| Self::new(BannerKind::Rejected, m)),
            AuthStatus::Error => state
                .error
                .as_deref()
                .map(|m| Self::new(BannerKind::Failure, m)),
            AuthStatus::Success => state
                .user
                .as_ref()
                .map(|u| Self::new(BannerKind::Success, format!("Welcome, {}", u.display_name()))),
            AuthStatus::Idle | AuthStatus::Loading => None,
        }
    }
}

impl std::fmt::Display for Banner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.kind {
            BannerKind::Success => "ok",
            BannerKind::Rejected => "refused",
            BannerKind::Failure => "error",
        };
        write!(f, "[{}] {}", prefix, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, User};
    use crate::store::{ListAction, ListReducer, Reducer, SessionAction, SessionReducer};

    #[test]
    fn test_list_banner_follows_last_transition() {
        let state: EntityListState<i32> = EntityListState::default();
        assert_eq!(Banner::for_list(&state), None);

        let state = ListReducer::<i32>::reduce(state, ListAction::FetchFailed("Duplicate barcode".to_string()));
        assert_eq!(
            Banner::for_list(&state),
            Some(Banner::new(BannerKind::Rejected, "Duplicate barcode"))
        );

        let state = ListReducer::<i32>::reduce(state, ListAction::FetchErrored("connection reset".to_string()));
        assert_eq!(Banner::for_list(&state).map(|b| b.kind), Some(BannerKind::Failure));

        let state = ListReducer::<i32>::reduce(state, ListAction::MutationCompleted);
        assert_eq!(Banner::for_list(&state).map(|b| b.kind), Some(BannerKind::Success));

        let state = ListReducer::<i32>::reduce(state, ListAction::ResetToIdle);
        assert_eq!(Banner::for_list(&state), None);
    }

    #[test]
    fn test_session_banner() {
        let user = User {
            id: 7,
            login: Some("admin".to_string()),
            firstname: Some("Ada".to_string()),
            lastname: None,
            email: None,
            role: Role::Admin,
            token: None,
        };
        let state = SessionReducer::reduce(SessionState::default(), SessionAction::AuthSucceeded(user));
        assert_eq!(Banner::for_session(&state).unwrap().to_string(), "[ok] Welcome, Ada");

        let state = SessionReducer::reduce(state, SessionAction::ResetToIdle);
        assert_eq!(Banner::for_session(&state), None);
    }
}
