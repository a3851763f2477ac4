//! Lexical scope tree

use crate::diagnostics::Diagnostics;
use crate::error::{RegistrationError, ScopeError};
use crate::register::{self, Registration};
use cg_graph::{ContainerId, ContainerKind, DeclId, Graph, ReplacementPolicy, ValueDecl};
use la_arena::{Arena, Idx};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a scope
pub type ScopeId = Idx<Scope>;

/// Non-container construct a scope can be anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstructKind {
    /// Bare block statement
    Block,
    /// `if` statement
    If,
    /// `while` loop
    While,
    /// `do`/`while` loop
    DoWhile,
    /// Counted `for` loop
    For,
    /// `for`-each loop over a collection
    ForEach,
    /// `switch` or `match`
    Switch,
    /// `try` body
    Try,
    /// `catch` clause
    Catch,
    /// `assert` statement
    Assert,
    /// Lambda or closure body
    Lambda,
}

impl ConstructKind {
    /// Kebab-case name used in dumps
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::If => "if",
            Self::While => "while",
            Self::DoWhile => "do-while",
            Self::For => "for",
            Self::ForEach => "for-each",
            Self::Switch => "switch",
            Self::Try => "try",
            Self::Catch => "catch",
            Self::Assert => "assert",
            Self::Lambda => "lambda",
        }
    }
}

/// What a scope is attached to in the syntax tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// A namespace, record or function that owns typed collections
    Container(ContainerId),
    /// A statement-level construct; declarations inside it are owned by
    /// nodes deeper in its subtree
    Construct(ConstructKind),
}

/// Kind of scope, derived from its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeKind {
    /// Root of the tree, never anchored
    Global,
    /// Anchored to a namespace container
    Namespace,
    /// Anchored to a record container
    Record,
    /// Function, method, constructor or lambda body
    Function,
    /// Block or any anchor-less nesting level
    Block,
    /// Body of any loop construct
    Loop,
    /// Switch body
    Switch,
    /// Try or catch body
    Try,
}

impl ScopeKind {
    fn of(anchor: Option<Anchor>, graph: &Graph) -> Self {
        match anchor {
            None => Self::Block,
            Some(Anchor::Container(container)) => match graph.container(container).kind() {
                ContainerKind::Namespace => Self::Namespace,
                ContainerKind::Record => Self::Record,
                ContainerKind::Function => Self::Function,
            },
            Some(Anchor::Construct(construct)) => match construct {
                ConstructKind::While
                | ConstructKind::DoWhile
                | ConstructKind::For
                | ConstructKind::ForEach => Self::Loop,
                ConstructKind::Switch => Self::Switch,
                ConstructKind::Try | ConstructKind::Catch => Self::Try,
                ConstructKind::Lambda => Self::Function,
                ConstructKind::Block | ConstructKind::If | ConstructKind::Assert => Self::Block,
            },
        }
    }

    /// Name used in dumps
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Namespace => "namespace",
            Self::Record => "record",
            Self::Function => "function",
            Self::Block => "block",
            Self::Loop => "loop",
            Self::Switch => "switch",
            Self::Try => "try",
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One level of lexical nesting
///
/// Every scope keeps the flat, append-only log of value declarations that
/// were registered directly in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    parent: Option<ScopeId>,
    kind: ScopeKind,
    anchor: Option<Anchor>,
    value_declarations: Vec<DeclId>,
}

impl Scope {
    fn new(parent: Option<ScopeId>, kind: ScopeKind, anchor: Option<Anchor>) -> Self {
        Self {
            parent,
            kind,
            anchor,
            value_declarations: Vec::new(),
        }
    }

    /// Enclosing scope, `None` only for the global scope
    #[must_use]
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Kind derived from the anchor at creation
    #[must_use]
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Syntax node this scope is attached to
    #[must_use]
    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    /// Container this scope is anchored to, if any
    #[must_use]
    pub fn container(&self) -> Option<ContainerId> {
        match self.anchor {
            Some(Anchor::Container(container)) => Some(container),
            _ => None,
        }
    }

    /// Whether this is the root scope of the tree
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.parent.is_none()
    }

    /// Every value declaration registered here, in call order, duplicates
    /// included
    #[must_use]
    pub fn value_declarations(&self) -> &[DeclId] {
        &self.value_declarations
    }
}

/// Scope tree of one source unit
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Arena<Scope>,
    global: ScopeId,
    /// Container -> the one scope anchored to it
    anchored: FxHashMap<ContainerId, ScopeId>,
    policy: ReplacementPolicy,
}

impl ScopeTree {
    /// Create a tree holding only the global scope
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(ReplacementPolicy::default())
    }

    /// Create a tree whose registrations use `policy` for name collisions
    #[must_use]
    pub fn with_policy(policy: ReplacementPolicy) -> Self {
        let mut scopes = Arena::new();
        let global = scopes.alloc(Scope::new(None, ScopeKind::Global, None));

        Self {
            scopes,
            global,
            anchored: FxHashMap::default(),
            policy,
        }
    }

    /// Root scope
    #[must_use]
    pub fn global(&self) -> ScopeId {
        self.global
    }

    /// How registrations treat same-name entries
    #[must_use]
    pub fn policy(&self) -> ReplacementPolicy {
        self.policy
    }

    /// Create a child scope of `parent` attached to `anchor`
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::AlreadyAnchored` if `anchor` is a container that
    /// another scope is already anchored to.
    pub fn enter(
        &mut self,
        graph: &Graph,
        parent: ScopeId,
        anchor: Option<Anchor>,
    ) -> Result<ScopeId, ScopeError> {
        if let Some(Anchor::Container(container)) = anchor {
            if let Some(&existing) = self.anchored.get(&container) {
                return Err(ScopeError::AlreadyAnchored {
                    container,
                    existing,
                });
            }
        }

        let kind = ScopeKind::of(anchor, graph);
        let scope = self.scopes.alloc(Scope::new(Some(parent), kind, anchor));
        if let Some(Anchor::Container(container)) = anchor {
            self.anchored.insert(container, scope);
        }
        Ok(scope)
    }

    /// Scope behind `scope`
    #[must_use]
    pub fn get(&self, scope: ScopeId) -> &Scope {
        &self.scopes[scope]
    }

    /// Register any declaration in `scope`
    ///
    /// Non-value declarations (namespaces, records, includes, translation
    /// units) are rejected: a diagnostic is reported and `None` is returned.
    pub fn add_declaration(
        &mut self,
        graph: &mut Graph,
        scope: ScopeId,
        decl: DeclId,
        diagnostics: &mut Diagnostics,
    ) -> Option<Registration> {
        let Some(value) = graph.value_decl(decl) else {
            let data = graph.decl(decl);
            diagnostics.report(
                scope,
                RegistrationError::NotAValueDeclaration {
                    decl,
                    kind: data.kind,
                    location: data.location,
                },
            );
            return None;
        };

        Some(self.add_value_declaration(graph, scope, value, diagnostics))
    }

    /// Register a value declaration in `scope`
    ///
    /// The declaration is always appended to the scope's flat log. When the
    /// scope is anchored to a container with a collection for this kind of
    /// declaration, it is also published there with the tree's replacement
    /// policy.
    pub fn add_value_declaration(
        &mut self,
        graph: &mut Graph,
        scope: ScopeId,
        decl: ValueDecl,
        diagnostics: &mut Diagnostics,
    ) -> Registration {
        let data = &mut self.scopes[scope];
        data.value_declarations.push(decl.id());
        register::publish(graph, scope, data, decl, self.policy, diagnostics)
    }

    /// Scope anchored to `container`
    #[must_use]
    pub fn scope_for(&self, container: ContainerId) -> Option<ScopeId> {
        self.anchored.get(&container).copied()
    }

    /// `scope` followed by each enclosing scope up to the global scope
    #[must_use]
    pub fn ancestors(&self, scope: ScopeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: Some(scope),
        }
    }

    /// Direct children of `scope` in creation order
    pub fn children(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        self.scopes
            .iter()
            .filter(move |(_, data)| data.parent == Some(scope))
            .map(|(id, _)| id)
    }

    /// All scopes in creation order
    pub fn iter(&self) -> impl Iterator<Item = (ScopeId, &Scope)> + '_ {
        self.scopes.iter()
    }

    /// Number of scopes, the global scope included
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Never true; the global scope always exists
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator returned by [`ScopeTree::ancestors`]
pub struct Ancestors<'tree> {
    tree: &'tree ScopeTree,
    next: Option<ScopeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = ScopeId;

    fn next(&mut self) -> Option<ScopeId> {
        let current = self.next?;
        self.next = self.tree.get(current).parent;
        Some(current)
    }
}
