//! Classification of a declaration against a scope's anchor

use crate::scope::{Anchor, Scope};
use cg_graph::{Collection, ContainerId, ContainerKind, DeclKind, Graph};

/// Typed collection that receives a `decl` registered under a `container`
/// anchor
///
/// The table is closed: every pair not listed maps to nothing. A method or
/// constructor registered directly under a namespace is only logged; it
/// belongs in the collections of its record.
#[must_use]
pub fn classify(container: ContainerKind, decl: DeclKind) -> Option<Collection> {
    match (container, decl) {
        (ContainerKind::Namespace, DeclKind::Field) => Some(Collection::NamespaceFields),
        (ContainerKind::Namespace, DeclKind::Function) => Some(Collection::NamespaceFunctions),
        (ContainerKind::Record, DeclKind::Constructor) => Some(Collection::RecordConstructors),
        (ContainerKind::Record, DeclKind::Method) => Some(Collection::RecordMethods),
        (ContainerKind::Record, DeclKind::Field) => Some(Collection::RecordFields),
        (ContainerKind::Function, DeclKind::Parameter) => Some(Collection::FunctionParameters),
        _ => None,
    }
}

/// Where a registration publishes, beyond the scope's own log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Publish into this collection
    Collection {
        /// Container the scope is anchored to
        container: ContainerId,
        /// Collection of that container
        collection: Collection,
    },
    /// Global scope without an anchor; nothing to publish into
    Unanchored,
    /// The anchor has no collection for this kind of declaration
    NoMapping,
}

/// Resolve the publication target for a `kind` declaration in `scope`
#[must_use]
pub fn target(graph: &Graph, scope: &Scope, kind: DeclKind) -> Target {
    match scope.anchor() {
        None if scope.is_global() => Target::Unanchored,
        Some(Anchor::Container(container)) => {
            match classify(graph.container(container).kind(), kind) {
                Some(collection) => Target::Collection {
                    container,
                    collection,
                },
                None => Target::NoMapping,
            }
        }
        None | Some(Anchor::Construct(_)) => Target::NoMapping,
    }
}
