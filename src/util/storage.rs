//! Key/value storage tiers (browser `localStorage` / `sessionStorage`).
//!
//! SYSTEM CONTEXT
//! ==============
//! The token store and preference cache talk to `StorageTier` so the same
//! logic runs against the browser in `csr` builds and an in-memory map in
//! tests. All operations are best-effort; failures surface as `None`/`false`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Which browser storage area a tier maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TierKind {
    /// Survives browser restarts (`localStorage`).
    Durable,
    /// Cleared with the tab (`sessionStorage`).
    Session,
}

impl TierKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Durable => "durable",
            Self::Session => "session",
        }
    }
}

pub trait StorageTier: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str);
}

/// In-memory tier for tests and builds without a browser.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageTier for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        true
    }

    fn remove(&self, key: &str) {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
    }
}

/// Browser-backed tier. Looks the storage area up on every call so the value
/// stays `Send + Sync` and survives storage being unavailable (private mode).
#[derive(Clone, Copy, Debug)]
pub struct BrowserStorage {
    kind: TierKind,
}

impl BrowserStorage {
    pub fn new(kind: TierKind) -> Self {
        Self { kind }
    }

    #[cfg(feature = "csr")]
    fn area(self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match self.kind {
            TierKind::Durable => window.local_storage().ok().flatten(),
            TierKind::Session => window.session_storage().ok().flatten(),
        }
    }
}

impl StorageTier for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            self.area()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (self.kind, key);
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> bool {
        #[cfg(feature = "csr")]
        {
            self.area().is_some_and(|area| area.set_item(key, value).is_ok())
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            false
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(area) = self.area() {
                let _ = area.remove_item(key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
        }
    }
}
