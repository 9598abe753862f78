//! Shared-state handle abstraction.
//!
//! DESIGN
//! ======
//! Session and notice state are owned values injected through context. In the
//! browser they live in `RwSignal`s so views re-render; tests and non-reactive
//! hosts use `LocalCell`. Auth actions and the request pipeline are written
//! against `StateCell` so both work unchanged.

#[cfg(test)]
#[path = "cell_test.rs"]
mod cell_test;

use std::sync::{Arc, Mutex, PoisonError};

use leptos::prelude::{RwSignal, Update, WithUntracked};

/// Read/write access to a shared state value.
pub trait StateCell<T>: Clone + Send + Sync + 'static {
    /// Run `f` against the current value without registering reactive reads.
    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> R;

    /// Mutate the value in place, notifying subscribers if any.
    fn write_with(&self, f: impl FnOnce(&mut T));
}

impl<T: Send + Sync + 'static> StateCell<T> for RwSignal<T> {
    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.with_untracked(f)
    }

    fn write_with(&self, f: impl FnOnce(&mut T)) {
        self.update(f);
    }
}

/// Mutex-backed cell for hosts without a reactive runtime.
#[derive(Debug, Default)]
pub struct LocalCell<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> LocalCell<T> {
    pub fn new(value: T) -> Self {
        Self { inner: Arc::new(Mutex::new(value)) }
    }
}

impl<T> Clone for LocalCell<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T: Send + 'static> StateCell<T> for LocalCell<T> {
    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write_with(&self, f: impl FnOnce(&mut T)) {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}
