//! Client-side state containers ("slices").
//!
//! Each slice owns one subtree of the client state and exposes a fixed set
//! of transitions through a pure [`Reducer`]. A [`Store`] holds the current
//! state of one slice, applies actions one at a time and publishes every
//! new state to its subscribers.
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └────────── services ──────────┘
//! ```

mod entity_list;
mod persist;
mod session;

use std::sync::Arc;

use tokio::sync::watch;

pub use entity_list::{EntityList, EntityListState, ListAction, ListReducer, ListStatus};
pub use persist::{FileSessionStorage, MemorySessionStorage, SessionStorage};
pub use session::{AuthStatus, SessionAction, SessionReducer, SessionState, SessionStore};

use crate::models::{Book, Librarian, Loan, Member};

/// Marker trait for slice state.
///
/// States are replaced wholesale on every transition, never patched in place
/// from outside the reducer.
pub trait SliceState: Clone + PartialEq + Default + Send + Sync + 'static {}

/// Marker trait for the transitions a slice accepts.
pub trait Action: Send + 'static {}

/// Reducer transforms state based on actions.
///
/// It must be a pure, total function: (State, Action) -> State
pub trait Reducer {
    type State: SliceState;
    type Action: Action;

    fn reduce(state: Self::State, action: Self::Action) -> Self::State;
}

/// Container holding the current state of one slice.
///
/// Cheap to clone; clones share the same state.
pub struct Store<R: Reducer> {
    tx: Arc<watch::Sender<R::State>>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<R: Reducer> Default for Store<R> {
    fn default() -> Self {
        Self::new(R::State::default())
    }
}

impl<R: Reducer> Store<R> {
    pub fn new(initial: R::State) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Apply one transition. The replacement happens under the channel's
    /// write lock, so readers never see a half-applied transition.
    pub fn dispatch(&self, action: R::Action) {
        self.tx.send_modify(|state| {
            let current = std::mem::take(state);
            *state = R::reduce(current, action);
        });
    }

    /// Snapshot of the current state
    pub fn state(&self) -> R::State {
        self.tx.borrow().clone()
    }

    /// Read a projection of the current state without cloning all of it
    pub fn select<T>(&self, f: impl FnOnce(&R::State) -> T) -> T {
        f(&self.tx.borrow())
    }

    /// Receiver notified after every transition
    pub fn subscribe(&self) -> watch::Receiver<R::State> {
        self.tx.subscribe()
    }
}

/// All slices of the application
#[derive(Clone)]
pub struct AppStore {
    pub session: SessionStore,
    pub members: EntityList<Member>,
    pub librarians: EntityList<Librarian>,
    pub books: EntityList<Book>,
    pub loans: EntityList<Loan>,
}

impl AppStore {
    /// Build the slices, seeding the session from `storage`
    pub fn new(storage: Arc<dyn SessionStorage>, dark_mode: bool) -> Self {
        Self {
            session: SessionStore::restore(storage, dark_mode),
            members: Store::default(),
            librarians: Store::default(),
            books: Store::default(),
            loans: Store::default(),
        }
    }
}
