//! Active dialect
//!
//! The dialect used for parsing lives in two layers. A process-wide default is changed with
//! [`set_dialect`]. Scoped overrides made with [`with_dialect`] or a [`DialectGuard`] apply
//! to the current thread only and are undone when the scope ends, including on unwind.

use crate::cuke::gherkin::DEFAULT_DIALECT;
use once_cell::sync::Lazy;
use std::cell::RefCell;
use std::sync::{PoisonError, RwLock};

static DEFAULT: Lazy<RwLock<String>> = Lazy::new(|| RwLock::new(DEFAULT_DIALECT.to_string()));

thread_local! {
    static OVERRIDE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Locale code of the dialect new parses will use.
pub fn dialect() -> String {
    OVERRIDE
        .with(|current| current.borrow().clone())
        .unwrap_or_else(default_dialect)
}

/// The process-wide default, ignoring scoped overrides.
pub fn default_dialect() -> String {
    DEFAULT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Change the process-wide default dialect.
///
/// The code is not checked here; parsing with an unknown code fails with a `ParseError`.
pub fn set_dialect(code: impl Into<String>) {
    *DEFAULT.write().unwrap_or_else(PoisonError::into_inner) = code.into();
}

/// Run `f` with `code` as the active dialect on this thread.
pub fn with_dialect<T>(code: &str, f: impl FnOnce() -> T) -> T {
    let _guard = DialectGuard::set(code);
    f()
}

/// Restores the previous scoped dialect when dropped.
#[must_use = "the dialect override ends when the guard is dropped"]
#[derive(Debug)]
pub struct DialectGuard {
    previous: Option<String>,
}

impl DialectGuard {
    pub fn set(code: &str) -> Self {
        let previous = OVERRIDE.with(|current| current.replace(Some(code.to_string())));
        Self { previous }
    }
}

impl Drop for DialectGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        OVERRIDE.with(|current| *current.borrow_mut() = previous);
    }
}
