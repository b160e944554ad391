//! Locally cached copy of a backend-owned collection

use std::marker::PhantomData;

use super::{Action, Reducer, SliceState, Store};

/// Secondary status tag, flipped by create/update side effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStatus {
    #[default]
    Idle,
    Added,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityListState<T> {
    pub entities: Vec<T>,
    pub loading: bool,
    /// Transport or unexpected failure
    pub error: Option<String>,
    /// Business rejection reported by the server
    pub response: Option<String>,
    pub status: ListStatus,
}

impl<T> Default for EntityListState<T> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            loading: false,
            error: None,
            response: None,
            status: ListStatus::Idle,
        }
    }
}

impl<T> SliceState for EntityListState<T> where T: Clone + PartialEq + Send + Sync + 'static {}

#[derive(Debug, Clone, PartialEq)]
pub enum ListAction<T> {
    BeginFetch,
    /// Replaces the whole sequence; no merge with prior contents
    FetchSucceeded(Vec<T>),
    FetchFailed(String),
    FetchErrored(String),
    MutationCompleted,
    ResetToIdle,
}

impl<T: Send + 'static> Action for ListAction<T> {}

pub struct ListReducer<T>(PhantomData<T>);

impl<T> Reducer for ListReducer<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    type State = EntityListState<T>;
    type Action = ListAction<T>;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State {
        match action {
            ListAction::BeginFetch => EntityListState {
                loading: true,
                ..state
            },
            ListAction::FetchSucceeded(entities) => EntityListState {
                entities,
                loading: false,
                error: None,
                response: None,
                ..state
            },
            ListAction::FetchFailed(message) => EntityListState {
                loading: false,
                response: Some(message),
                error: None,
                ..state
            },
            ListAction::FetchErrored(message) => EntityListState {
                loading: false,
                error: Some(message),
                response: None,
                ..state
            },
            ListAction::MutationCompleted => EntityListState {
                status: ListStatus::Added,
                error: None,
                response: None,
                ..state
            },
            ListAction::ResetToIdle => EntityListState {
                status: ListStatus::Idle,
                error: None,
                response: None,
                ..state
            },
        }
    }
}

pub type EntityList<T> = Store<ListReducer<T>>;
