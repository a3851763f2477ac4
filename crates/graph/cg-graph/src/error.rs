//! Errors for structural misuse of the graph

use crate::{Collection, ContainerId, ContainerKind, DeclId, DeclKind};

/// Errors raised when a caller asks a node for something its kind lacks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The container has no collection of the requested kind
    #[error("{kind} container {container:?} has no {collection} collection")]
    CollectionMismatch {
        /// Container that was addressed
        container: ContainerId,
        /// Its actual kind
        kind: ContainerKind,
        /// Collection that was requested
        collection: Collection,
    },

    /// Record metadata was set on something that is not a record
    #[error("{kind} declaration {decl:?} is not a record")]
    NotARecord {
        /// Offending declaration
        decl: DeclId,
        /// Its actual kind
        kind: DeclKind,
    },

    /// Function metadata was set on something that is not a function
    #[error("{kind} declaration {decl:?} is not a function, method or constructor")]
    NotFunctionLike {
        /// Offending declaration
        decl: DeclId,
        /// Its actual kind
        kind: DeclKind,
    },

    /// Receivers must be variables
    #[error("receiver {receiver:?} is a {kind}, expected a variable")]
    ReceiverNotVariable {
        /// Offending receiver
        receiver: DeclId,
        /// Its actual kind
        kind: DeclKind,
    },
}
