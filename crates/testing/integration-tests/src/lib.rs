//! Shared helpers for the cross-crate registration tests

use cg_graph::{Collection, DeclId, DeclKind, Graph};
use cg_intern::Interner;
use cg_scopes::{RegistrationConfig, ScopeManager};
use cg_span::{FileId, Location, Span};

/// A graph, its interner and a scope manager for one simulated source unit
pub struct Unit {
    /// Interner for every name declared in the unit
    pub interner: Interner,
    /// Declarations and containers of the unit
    pub graph: Graph,
    /// Active-scope stack and the tree it builds
    pub scopes: ScopeManager,
    file: FileId,
    offset: u32,
}

impl Unit {
    /// Unit with its own interner
    #[must_use]
    pub fn new(config: RegistrationConfig) -> Self {
        Self::with_interner(Interner::new(), config)
    }

    /// Unit sharing symbols with other units built from the same interner
    #[must_use]
    pub fn with_interner(interner: Interner, config: RegistrationConfig) -> Self {
        Self {
            interner,
            graph: Graph::new(),
            scopes: ScopeManager::new(config),
            file: FileId(0),
            offset: 0,
        }
    }

    /// Declare `name` at the next fake source position
    pub fn declare(&mut self, name: &str, kind: DeclKind) -> DeclId {
        let start = self.offset;
        self.offset += u32::try_from(name.len()).unwrap_or(u32::MAX) + 1;
        let location = Location::new(self.file, Span::new(start, self.offset - 1));
        self.graph
            .declare_at(self.interner.intern(name), kind, location)
    }

    /// Declare and register in the active scope
    pub fn register(&mut self, name: &str, kind: DeclKind) -> DeclId {
        let decl = self.declare(name, kind);
        self.scopes.add_declaration(&mut self.graph, decl);
        decl
    }

    /// Names of the entries of `collection` in the container owned by `owner`
    #[must_use]
    pub fn names(&self, owner: DeclId, collection: Collection) -> Vec<&str> {
        let Some(container) = self.graph.container_of(owner) else {
            return Vec::new();
        };
        self.graph
            .entries(container, collection)
            .iter()
            .map(|decl| self.interner.resolve(self.graph.decl(*decl).name))
            .collect()
    }
}
