//! Interned names for declarations and types
//!
//! Every declaration name in the graph is a [`Symbol`]. Two declarations have
//! the same name exactly when their symbols compare equal, which keeps the
//! name scans of registration cheap.

/// Handle for an interned name
pub use lasso::Spur as Symbol;
use lasso::ThreadedRodeo;
use std::fmt;
use std::sync::Arc;

/// String interner shared between the graph builders of one session
///
/// Cloning is cheap and every clone hands out the same symbols, so source
/// units built on different threads can still compare names.
#[derive(Clone)]
pub struct Interner {
    inner: Arc<ThreadedRodeo>,
}

impl Interner {
    /// Create an empty interner
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ThreadedRodeo::new()),
        }
    }

    /// Intern `name`, returning the existing symbol if it was seen before
    pub fn intern(&self, name: &str) -> Symbol {
        self.inner.get_or_intern(name)
    }

    /// Symbol for `name` if it has already been interned
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.inner.get(name)
    }

    /// Text of `symbol`
    ///
    /// Symbols from a different interner resolve to `"<unknown>"` instead of
    /// panicking.
    #[must_use]
    pub fn resolve(&self, symbol: Symbol) -> &str {
        self.inner.try_resolve(&symbol).unwrap_or("<unknown>")
    }

    /// Number of distinct names interned so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether nothing has been interned yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Interner {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Interner").field("len", &self.len()).finish()
    }
}
