//! One-shot data fetches owned by the view that starts them.
//!
//! A [`Fetch`] issues exactly one request when started and keeps the outcome
//! in its own state, independent of the store slices. There is no retry, no
//! caching and no refetch; start a new [`Fetch`] to read again. Dropping the
//! handle aborts a request still in flight.

use std::future::Future;

use tokio::{sync::watch, task::JoinHandle};

use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    /// Decoded payload; `T::default()` until the request succeeds
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T: Default> FetchState<T> {
    fn pending() -> Self {
        Self {
            data: T::default(),
            loading: true,
            error: None,
        }
    }
}

pub struct Fetch<T> {
    rx: watch::Receiver<FetchState<T>>,
    task: JoinHandle<()>,
}

impl<T> Fetch<T>
where
    T: Default + Clone + Send + Sync + 'static,
{
    /// Issue the request on the current runtime
    pub fn start<Fut>(label: &'static str, request: Fut) -> Self
    where
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(FetchState::pending());

        let task = tokio::spawn(async move {
            let next = match request.await {
                Ok(data) => FetchState {
                    data,
                    loading: false,
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(fetch = label, "Fetch failed: {}", e);
                    FetchState {
                        data: T::default(),
                        loading: false,
                        error: Some(e.to_string()),
                    }
                }
            };
            if tx.send(next).is_err() {
                tracing::debug!(fetch = label, "Fetch result discarded");
            }
        });

        Self { rx, task }
    }

    pub fn state(&self) -> FetchState<T> {
        self.rx.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.rx.borrow().loading
    }

    /// Wait until the request has resolved or rejected
    pub async fn settled(&mut self) -> FetchState<T> {
        if let Ok(state) = self.rx.wait_for(|s| !s.loading).await {
            return state.clone();
        }
        // the task died without reporting (runtime shutdown)
        self.rx.borrow().clone()
    }
}

impl<T> Drop for Fetch<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
