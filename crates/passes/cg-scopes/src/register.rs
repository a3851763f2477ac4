//! Registration of declarations into scopes and container collections

use crate::classify::{self, Target};
use crate::diagnostics::Diagnostics;
use crate::scope::{Scope, ScopeId};
use cg_graph::{Collection, ContainerId, Graph, Insertion, ReplacementPolicy, ValueDecl};

/// Outcome of registering a value declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// Logged in the scope and published into a container collection
    Published {
        /// Container the scope is anchored to
        container: ContainerId,
        /// Collection that received the declaration
        collection: Collection,
        /// What the collection did with it
        insertion: Insertion,
    },
    /// Logged in the unanchored global scope only
    Unanchored,
    /// Logged in the scope only; its anchor has no matching collection
    NoTarget,
}

impl Registration {
    /// Whether the declaration reached a container collection
    #[must_use]
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

/// Publish `decl`, already logged in `scope`, into the collection its anchor
/// maps it to
pub fn publish(
    graph: &mut Graph,
    scope: ScopeId,
    data: &Scope,
    decl: ValueDecl,
    policy: ReplacementPolicy,
    diagnostics: &mut Diagnostics,
) -> Registration {
    match classify::target(graph, data, decl.kind()) {
        Target::Collection {
            container,
            collection,
        } => match graph.insert_member(container, collection, decl.id(), policy) {
            Ok(insertion) => {
                tracing::debug!(
                    ?scope,
                    decl = ?decl.id(),
                    %collection,
                    ?insertion,
                    "published declaration"
                );
                Registration::Published {
                    container,
                    collection,
                    insertion,
                }
            }
            Err(error) => {
                diagnostics.report(scope, error.into());
                Registration::NoTarget
            }
        },
        Target::Unanchored => Registration::Unanchored,
        Target::NoMapping => {
            tracing::trace!(
                ?scope,
                decl = ?decl.id(),
                kind = %decl.kind(),
                "no collection for declaration"
            );
            Registration::NoTarget
        }
    }
}
