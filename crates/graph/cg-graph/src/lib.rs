//! Declaration graph storage
//!
//! Declarations and the containers that own them live in two arenas owned by
//! [`Graph`]. Scopes, containers and downstream passes refer to declarations
//! only through [`DeclId`] handles, so every view of a declaration points at
//! the same entity and "same declaration" is a handle comparison.
//!
//! Container collections change only through [`Graph::insert_member`], which
//! implements the name-keyed replacement rule used during registration.

mod container;
mod decl;
mod error;

pub use container::{
    Collection, Container, ContainerId, ContainerKind, FunctionMembers, Members,
    NamespaceMembers, RecordKind, RecordMembers,
};
pub use decl::{DeclId, DeclKind, Declaration, ValueDecl};
pub use error::GraphError;

use cg_intern::Symbol;
use cg_span::Location;
use la_arena::Arena;
use serde::{Deserialize, Serialize};

/// How [`Graph::insert_member`] treats entries that share the new entry's name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplacementPolicy {
    /// Evict every entry with the same name, then append
    ///
    /// Same-name overloads collapse into the last one registered.
    #[default]
    LastWriteWins,
    /// Append without evicting; only an identical handle is skipped
    KeepOverloads,
}

/// What [`Graph::insert_member`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    /// The same declaration was already in the collection; nothing changed
    AlreadyPresent,
    /// Appended with no name collision
    Appended,
    /// Appended after removing these same-name entries
    Replaced {
        /// Removed entries, in their previous order
        evicted: Vec<DeclId>,
    },
}

/// Arena storage for one graph build
#[derive(Debug, Clone, Default)]
pub struct Graph {
    decls: Arena<Declaration>,
    containers: Arena<Container>,
}

impl Graph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a declaration without a source location
    ///
    /// Namespaces, records, functions, methods and constructors get a fresh
    /// container of the matching kind.
    pub fn declare(&mut self, name: Symbol, kind: DeclKind) -> DeclId {
        self.alloc(name, kind, None)
    }

    /// Allocate a declaration written at `location`
    pub fn declare_at(&mut self, name: Symbol, kind: DeclKind, location: Location) -> DeclId {
        self.alloc(name, kind, Some(location))
    }

    fn alloc(&mut self, name: Symbol, kind: DeclKind, location: Option<Location>) -> DeclId {
        let id = self.decls.alloc(Declaration {
            name,
            kind,
            location,
            ty: None,
            container: None,
        });

        let container_kind = match kind {
            DeclKind::Namespace => Some(ContainerKind::Namespace),
            DeclKind::Record => Some(ContainerKind::Record),
            DeclKind::Function | DeclKind::Method | DeclKind::Constructor => {
                Some(ContainerKind::Function)
            }
            _ => None,
        };
        if let Some(container_kind) = container_kind {
            let container = self.containers.alloc(Container::new(id, container_kind));
            self.decls[id].container = Some(container);
        }

        id
    }

    /// Record the declared type of `decl`
    pub fn set_type(&mut self, decl: DeclId, ty: Symbol) {
        self.decls[decl].ty = Some(ty);
    }

    /// Declaration behind `id`
    #[must_use]
    pub fn decl(&self, id: DeclId) -> &Declaration {
        &self.decls[id]
    }

    /// Checked value handle for `id`, `None` for non-value kinds
    #[must_use]
    pub fn value_decl(&self, id: DeclId) -> Option<ValueDecl> {
        let kind = self.decls[id].kind;
        kind.is_value().then(|| ValueDecl::new(id, kind))
    }

    /// Container behind `id`
    #[must_use]
    pub fn container(&self, id: ContainerId) -> &Container {
        &self.containers[id]
    }

    /// Container owned by `decl`, if its kind owns one
    #[must_use]
    pub fn container_of(&self, decl: DeclId) -> Option<ContainerId> {
        self.decls[decl].container
    }

    /// Entries of `collection` in `container`
    ///
    /// Empty when the container does not have that collection.
    #[must_use]
    pub fn entries(&self, container: ContainerId, collection: Collection) -> &[DeclId] {
        self.containers[container]
            .collection(collection)
            .unwrap_or(&[])
    }

    /// Set the flavour of the record declared by `record`
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotARecord`] if `record` is not a record.
    pub fn set_record_kind(&mut self, record: DeclId, kind: RecordKind) -> Result<(), GraphError> {
        self.record_members_mut(record)?.record_kind = kind;
        Ok(())
    }

    /// Append a super type to the record declared by `record`
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotARecord`] if `record` is not a record.
    pub fn add_super_type(&mut self, record: DeclId, ty: Symbol) -> Result<(), GraphError> {
        let members = self.record_members_mut(record)?;
        if !members.super_types.contains(&ty) {
            members.super_types.push(ty);
        }
        Ok(())
    }

    /// Attach the receiver variable of a function-like declaration
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NotFunctionLike`] if `function` is not a
    /// function, method or constructor, and [`GraphError::ReceiverNotVariable`]
    /// if `receiver` is not a variable.
    pub fn set_receiver(&mut self, function: DeclId, receiver: DeclId) -> Result<(), GraphError> {
        let receiver_kind = self.decls[receiver].kind;
        if receiver_kind != DeclKind::Variable {
            return Err(GraphError::ReceiverNotVariable {
                receiver,
                kind: receiver_kind,
            });
        }

        let decl = &self.decls[function];
        let not_function = GraphError::NotFunctionLike {
            decl: function,
            kind: decl.kind,
        };
        let Some(container) = decl.container else {
            return Err(not_function);
        };
        match self.containers[container].members_mut() {
            Members::Function(members) => {
                members.receiver = Some(receiver);
                Ok(())
            }
            _ => Err(not_function),
        }
    }

    fn record_members_mut(&mut self, record: DeclId) -> Result<&mut RecordMembers, GraphError> {
        let decl = &self.decls[record];
        let not_record = GraphError::NotARecord {
            decl: record,
            kind: decl.kind,
        };
        let Some(container) = decl.container else {
            return Err(not_record);
        };
        match self.containers[container].members_mut() {
            Members::Record(members) => Ok(members),
            _ => Err(not_record),
        }
    }

    /// Insert `decl` into `collection` of `container`, keeping at most one
    /// entry per name under [`ReplacementPolicy::LastWriteWins`]
    ///
    /// An identical handle already in the collection is left alone. Otherwise
    /// every entry whose name equals `decl`'s name is removed (subject to
    /// `policy`) and `decl` is appended, so it always ends up last.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CollectionMismatch`] if `container` has no such
    /// collection.
    pub fn insert_member(
        &mut self,
        container: ContainerId,
        collection: Collection,
        decl: DeclId,
        policy: ReplacementPolicy,
    ) -> Result<Insertion, GraphError> {
        let decls = &self.decls;
        let name = decls[decl].name;
        let target = &mut self.containers[container];
        let kind = target.kind();
        let Some(entries) = target.collection_mut(collection) else {
            return Err(GraphError::CollectionMismatch {
                container,
                kind,
                collection,
            });
        };

        if entries.contains(&decl) {
            return Ok(Insertion::AlreadyPresent);
        }

        let evicted = match policy {
            ReplacementPolicy::LastWriteWins => {
                let (evicted, kept): (Vec<DeclId>, Vec<DeclId>) = entries
                    .drain(..)
                    .partition(|existing| decls[*existing].name == name);
                *entries = kept;
                evicted
            }
            ReplacementPolicy::KeepOverloads => Vec::new(),
        };
        entries.push(decl);

        if evicted.is_empty() {
            Ok(Insertion::Appended)
        } else {
            tracing::debug!(
                ?container,
                %collection,
                ?decl,
                evicted = evicted.len(),
                "replaced same-name entries"
            );
            Ok(Insertion::Replaced { evicted })
        }
    }

    /// All declarations in allocation order
    pub fn declarations(&self) -> impl Iterator<Item = (DeclId, &Declaration)> + '_ {
        self.decls.iter()
    }

    /// All containers in allocation order
    pub fn containers(&self) -> impl Iterator<Item = (ContainerId, &Container)> + '_ {
        self.containers.iter()
    }

    /// Number of declarations allocated so far
    #[must_use]
    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Fixtures are built from known-good kinds")]
mod tests {
    use super::*;
    use cg_intern::Interner;
    use cg_span::{FileId, Span};

    fn record_with_container(graph: &mut Graph, interner: &Interner) -> (DeclId, ContainerId) {
        let record = graph.declare(interner.intern("R"), DeclKind::Record);
        let container = graph.container_of(record).unwrap();
        (record, container)
    }

    #[test]
    fn test_container_kinds_follow_declaration_kinds() {
        let interner = Interner::new();
        let mut graph = Graph::new();

        let cases = [
            (DeclKind::Namespace, Some(ContainerKind::Namespace)),
            (DeclKind::Record, Some(ContainerKind::Record)),
            (DeclKind::Function, Some(ContainerKind::Function)),
            (DeclKind::Method, Some(ContainerKind::Function)),
            (DeclKind::Constructor, Some(ContainerKind::Function)),
            (DeclKind::Field, None),
            (DeclKind::Parameter, None),
            (DeclKind::Variable, None),
            (DeclKind::Include, None),
        ];

        for (kind, expected) in cases {
            let decl = graph.declare(interner.intern("n"), kind);
            let actual = graph.container_of(decl).map(|id| graph.container(id).kind());
            assert_eq!(actual, expected, "{kind}");
            if let Some(container) = graph.container_of(decl) {
                assert_eq!(graph.container(container).owner(), decl);
            }
        }
    }

    #[test]
    fn test_value_decl_rejects_structural_kinds() {
        let interner = Interner::new();
        let mut graph = Graph::new();
        let field = graph.declare(interner.intern("x"), DeclKind::Field);
        let namespace = graph.declare(interner.intern("ns"), DeclKind::Namespace);

        assert_eq!(graph.value_decl(field).map(ValueDecl::id), Some(field));
        assert!(graph.value_decl(namespace).is_none());
    }

    #[test]
    fn test_insert_is_idempotent_for_same_handle() {
        let interner = Interner::new();
        let mut graph = Graph::new();
        let (_, record) = record_with_container(&mut graph, &interner);
        let field = graph.declare(interner.intern("x"), DeclKind::Field);

        let first = graph.insert_member(record, Collection::RecordFields, field, ReplacementPolicy::LastWriteWins);
        let second = graph.insert_member(record, Collection::RecordFields, field, ReplacementPolicy::LastWriteWins);

        assert_eq!(first, Ok(Insertion::Appended));
        assert_eq!(second, Ok(Insertion::AlreadyPresent));
        assert_eq!(graph.entries(record, Collection::RecordFields), &[field]);
    }

    #[test]
    fn test_insert_replaces_same_name_and_moves_to_end() {
        let interner = Interner::new();
        let mut graph = Graph::new();
        let (_, record) = record_with_container(&mut graph, &interner);
        let run_v1 = graph.declare(interner.intern("run"), DeclKind::Method);
        let stop = graph.declare(interner.intern("stop"), DeclKind::Method);
        let run_v2 = graph.declare(interner.intern("run"), DeclKind::Method);

        for method in [run_v1, stop] {
            graph
                .insert_member(record, Collection::RecordMethods, method, ReplacementPolicy::LastWriteWins)
                .unwrap();
        }
        let outcome = graph
            .insert_member(record, Collection::RecordMethods, run_v2, ReplacementPolicy::LastWriteWins)
            .unwrap();

        assert_eq!(outcome, Insertion::Replaced { evicted: vec![run_v1] });
        assert_eq!(graph.entries(record, Collection::RecordMethods), &[stop, run_v2]);
    }

    #[test]
    fn test_keep_overloads_only_skips_identical_handles() {
        let interner = Interner::new();
        let mut graph = Graph::new();
        let (_, record) = record_with_container(&mut graph, &interner);
        let run_v1 = graph.declare(interner.intern("run"), DeclKind::Method);
        let run_v2 = graph.declare(interner.intern("run"), DeclKind::Method);

        for method in [run_v1, run_v2, run_v1] {
            graph
                .insert_member(record, Collection::RecordMethods, method, ReplacementPolicy::KeepOverloads)
                .unwrap();
        }

        assert_eq!(graph.entries(record, Collection::RecordMethods), &[run_v1, run_v2]);
    }

    #[test]
    fn test_insert_evicts_every_same_name_entry() {
        let interner = Interner::new();
        let mut graph = Graph::new();
        let (_, record) = record_with_container(&mut graph, &interner);
        let stop = graph.declare(interner.intern("stop"), DeclKind::Method);
        let run_int = graph.declare(interner.intern("run"), DeclKind::Method);
        let run_str = graph.declare(interner.intern("run"), DeclKind::Method);
        let run_new = graph.declare(interner.intern("run"), DeclKind::Method);

        for method in [stop, run_int, run_str] {
            graph
                .insert_member(record, Collection::RecordMethods, method, ReplacementPolicy::KeepOverloads)
                .unwrap();
        }
        let outcome = graph
            .insert_member(record, Collection::RecordMethods, run_new, ReplacementPolicy::LastWriteWins)
            .unwrap();

        assert_eq!(outcome, Insertion::Replaced { evicted: vec![run_int, run_str] });
        assert_eq!(graph.entries(record, Collection::RecordMethods), &[stop, run_new]);
    }

    #[test]
    fn test_insert_into_foreign_collection_fails() {
        let interner = Interner::new();
        let mut graph = Graph::new();
        let (_, record) = record_with_container(&mut graph, &interner);
        let param = graph.declare(interner.intern("p"), DeclKind::Parameter);

        let result = graph.insert_member(
            record,
            Collection::FunctionParameters,
            param,
            ReplacementPolicy::LastWriteWins,
        );

        assert_eq!(
            result,
            Err(GraphError::CollectionMismatch {
                container: record,
                kind: ContainerKind::Record,
                collection: Collection::FunctionParameters,
            })
        );
        assert!(graph.entries(record, Collection::FunctionParameters).is_empty());
    }

    #[test]
    fn test_record_metadata() {
        let interner = Interner::new();
        let mut graph = Graph::new();
        let (record, container) = record_with_container(&mut graph, &interner);
        let base = interner.intern("Base");

        graph.set_record_kind(record, RecordKind::Struct).unwrap();
        graph.add_super_type(record, base).unwrap();
        graph.add_super_type(record, base).unwrap();

        let members = graph.container(container).members().as_record();
        assert_eq!(members.map(RecordMembers::record_kind), Some(RecordKind::Struct));
        assert_eq!(members.map(RecordMembers::super_types), Some(&[base][..]));

        let field = graph.declare(interner.intern("x"), DeclKind::Field);
        assert_eq!(
            graph.set_record_kind(field, RecordKind::Class),
            Err(GraphError::NotARecord { decl: field, kind: DeclKind::Field })
        );
    }

    #[test]
    fn test_receiver() {
        let interner = Interner::new();
        let mut graph = Graph::new();
        let method = graph.declare(interner.intern("area"), DeclKind::Method);
        let receiver = graph.declare(interner.intern("s"), DeclKind::Variable);
        let param = graph.declare(interner.intern("p"), DeclKind::Parameter);

        graph.set_receiver(method, receiver).unwrap();
        assert!(matches!(
            graph.set_receiver(method, param),
            Err(GraphError::ReceiverNotVariable { .. })
        ));
        assert!(matches!(
            graph.set_receiver(param, receiver),
            Err(GraphError::NotFunctionLike { .. })
        ));

        let container = graph.container_of(method).unwrap();
        let members = graph.container(container).members();
        assert!(members.as_record().is_none());
        assert_eq!(members.as_function().and_then(FunctionMembers::receiver), Some(receiver));
    }

    #[test]
    fn test_location_and_type_are_kept() {
        let interner = Interner::new();
        let mut graph = Graph::new();
        let location = Location::new(FileId(1), Span::new(3, 9));
        let field = graph.declare_at(interner.intern("x"), DeclKind::Field, location);
        let int = interner.intern("int");
        graph.set_type(field, int);

        let decl = graph.decl(field);
        assert_eq!(decl.location, Some(location));
        assert_eq!(decl.ty, Some(int));
        assert_eq!(decl.container(), None);
        assert_eq!(graph.decl_count(), 1);
    }
}
