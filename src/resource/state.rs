//! Tri-state load lifecycle

use crate::error::FetchError;

/// Observable progress of a collection fetch
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Ready(Vec<T>),
    Failed(FetchError),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    /// Loaded items, or an empty slice for every other state
    pub fn items(&self) -> &[T] {
        match self {
            LoadState::Ready(items) => items,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// What a consumer observes: the state plus the independent loading flag.
///
/// Both fields change in one update, so `loading == false` always pairs with
/// the terminal state of the invocation that cleared it.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceView<T> {
    pub state: LoadState<T>,
    pub loading: bool,
}

impl<T> Default for ResourceView<T> {
    fn default() -> Self {
        ResourceView {
            state: LoadState::Idle,
            loading: false,
        }
    }
}

impl<T> ResourceView<T> {
    /// True once an invocation has finished, successfully or not
    pub fn is_settled(&self) -> bool {
        !self.loading && matches!(self.state, LoadState::Ready(_) | LoadState::Failed(_))
    }
}
