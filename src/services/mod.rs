//! Async operations that talk to the server and drive the slices.
//!
//! Every operation follows the same shape: dispatch the begin transition,
//! await one API call, then dispatch the succeeded transition or the
//! failed/errored one depending on the error class.

pub mod auth;
pub mod catalog;
pub mod librarians;
pub mod loans;
pub mod members;
pub mod stats;

use std::future::Future;
use std::sync::Arc;

use crate::{
    api::LibraryApi,
    error::{AppError, AppResult, ErrorClass},
    store::{AppStore, EntityList, ListAction},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub members: members::MembersService,
    pub librarians: librarians::LibrariansService,
    pub loans: loans::LoansService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services over the given API and slices.
    ///
    /// The API picks up the token of a session restored from storage.
    pub fn new(api: Arc<dyn LibraryApi>, store: &AppStore) -> Self {
        api.set_token(store.session.token());
        Self {
            auth: auth::AuthService::new(api.clone(), store.session.clone()),
            catalog: catalog::CatalogService::new(api.clone(), store.books.clone()),
            members: members::MembersService::new(api.clone(), store.members.clone()),
            librarians: librarians::LibrariansService::new(api.clone(), store.librarians.clone()),
            loans: loans::LoansService::new(api.clone(), store.loans.clone()),
            stats: stats::StatsService::new(api),
        }
    }
}

/// Failure transition matching the error class
fn failure_action<T>(error: &AppError) -> ListAction<T> {
    match error.class() {
        ErrorClass::Business => ListAction::FetchFailed(error.to_string()),
        ErrorClass::Transport => ListAction::FetchErrored(error.to_string()),
    }
}

/// Run a collection read against `list`: begin-fetch, then replace the
/// entities or record the failure.
async fn load_into<T, Fut>(list: &EntityList<T>, label: &'static str, request: Fut) -> AppResult<usize>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    Fut: Future<Output = AppResult<Vec<T>>>,
{
    list.dispatch(ListAction::BeginFetch);
    match request.await {
        Ok(entities) => {
            let count = entities.len();
            tracing::debug!(list = label, count, "Loaded collection");
            list.dispatch(ListAction::FetchSucceeded(entities));
            Ok(count)
        }
        Err(e) => {
            tracing::warn!(list = label, "Failed to load collection: {}", e);
            list.dispatch(failure_action(&e));
            Err(e)
        }
    }
}

/// Run a create/update/delete whose completion is signalled on `list`
/// with mutation-completed. The entities are not refetched.
async fn mutate<T, R, Fut>(list: &EntityList<T>, label: &'static str, request: Fut) -> AppResult<R>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    Fut: Future<Output = AppResult<R>>,
{
    match request.await {
        Ok(result) => {
            tracing::info!(operation = label, "Mutation completed");
            list.dispatch(ListAction::MutationCompleted);
            Ok(result)
        }
        Err(e) => {
            tracing::warn!(operation = label, "Mutation failed: {}", e);
            list.dispatch(failure_action(&e));
            Err(e)
        }
    }
}
