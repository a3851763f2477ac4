//! Scope stack for a single traversal of one source unit

use crate::config::RegistrationConfig;
use crate::diagnostics::Diagnostics;
use crate::error::ScopeError;
use crate::register::Registration;
use crate::scope::{Anchor, ScopeId, ScopeTree};
use cg_graph::{DeclId, Graph, ValueDecl};

/// Tracks the active scope while a frontend walks a source unit
///
/// Frontends push a scope when they enter a nesting construct, register the
/// declarations they meet against the active scope and pop on the way out.
/// The global scope is always at the bottom and cannot be left.
#[derive(Debug, Clone)]
pub struct ScopeManager {
    tree: ScopeTree,
    /// Entered scopes above the global scope
    stack: Vec<ScopeId>,
    diagnostics: Diagnostics,
}

impl ScopeManager {
    /// Start a traversal at the global scope of a fresh tree
    #[must_use]
    pub fn new(config: RegistrationConfig) -> Self {
        Self {
            tree: ScopeTree::with_policy(config.replacement),
            stack: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Innermost active scope
    #[must_use]
    pub fn current(&self) -> ScopeId {
        self.stack.last().copied().unwrap_or_else(|| self.tree.global())
    }

    /// Number of scopes entered and not yet left
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Enter a new child of the current scope
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::AlreadyAnchored` if `anchor` is a container that
    /// already has a scope.
    pub fn enter_scope(&mut self, graph: &Graph, anchor: Option<Anchor>) -> Result<ScopeId, ScopeError> {
        let scope = self.tree.enter(graph, self.current(), anchor)?;
        self.stack.push(scope);
        Ok(scope)
    }

    /// Enter a scope anchored to the container owned by `decl`
    ///
    /// Declarations that own no container get an anchor-less block scope.
    ///
    /// # Errors
    ///
    /// Same as [`ScopeManager::enter_scope`].
    pub fn enter_declaration(&mut self, graph: &Graph, decl: DeclId) -> Result<ScopeId, ScopeError> {
        let anchor = graph.container_of(decl).map(Anchor::Container);
        self.enter_scope(graph, anchor)
    }

    /// Leave the current scope, returning it
    ///
    /// Returns `None` when only the global scope is active.
    pub fn leave_scope(&mut self) -> Option<ScopeId> {
        let left = self.stack.pop();
        if left.is_none() {
            tracing::warn!("attempted to leave the global scope");
        }
        left
    }

    /// Register `decl` in the current scope
    pub fn add_declaration(&mut self, graph: &mut Graph, decl: DeclId) -> Option<Registration> {
        let scope = self.current();
        self.tree
            .add_declaration(graph, scope, decl, &mut self.diagnostics)
    }

    /// Register a value declaration in the current scope
    pub fn add_value_declaration(&mut self, graph: &mut Graph, decl: ValueDecl) -> Registration {
        let scope = self.current();
        self.tree
            .add_value_declaration(graph, scope, decl, &mut self.diagnostics)
    }

    /// Tree built so far
    #[must_use]
    pub fn tree(&self) -> &ScopeTree {
        &self.tree
    }

    /// Diagnostics reported so far
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Finish the traversal and hand back the tree and its diagnostics
    #[must_use]
    pub fn finish(self) -> (ScopeTree, Diagnostics) {
        if !self.stack.is_empty() {
            tracing::debug!(open = self.stack.len(), "finished with scopes still open");
        }
        (self.tree, self.diagnostics)
    }
}

impl Default for ScopeManager {
    fn default() -> Self {
        Self::new(RegistrationConfig::default())
    }
}
