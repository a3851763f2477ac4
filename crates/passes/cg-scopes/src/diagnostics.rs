//! Explicit sink for registration diagnostics

use crate::error::RegistrationError;
use crate::ScopeId;
use std::slice;

/// A registration problem and the scope it happened in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Scope the declaration was registered against
    pub scope: ScopeId,
    /// What went wrong
    pub error: RegistrationError,
}

/// Diagnostics collected while registering declarations
///
/// Passed into every registration call so that failures are part of the
/// call's contract instead of going to a global logger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic
    pub fn report(&mut self, scope: ScopeId, error: RegistrationError) {
        tracing::warn!(?scope, %error, "registration diagnostic");
        self.items.push(Diagnostic { scope, error });
    }

    /// Diagnostics in report order
    pub fn iter(&self) -> slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Number of diagnostics reported
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether registration has been clean so far
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Take the diagnostics out of the sink
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl<'sink> IntoIterator for &'sink Diagnostics {
    type Item = &'sink Diagnostic;
    type IntoIter = slice::Iter<'sink, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
