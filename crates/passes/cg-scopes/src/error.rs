//! Error types for scope construction and registration

use crate::ScopeId;
use cg_graph::{ContainerId, DeclId, DeclKind, GraphError};
use cg_span::Location;
use std::io;
use std::path::PathBuf;
use toml::de::Error as TomlError;

/// Registration failures; recorded as diagnostics, never fatal
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// Only value declarations can be registered in a scope
    #[error(
        "a {kind} declaration cannot be added to a value declaration scope ({decl:?}{})",
        .location.map_or_else(String::new, |at| format!(" at {at}"))
    )]
    NotAValueDeclaration {
        /// The rejected declaration
        decl: DeclId,
        /// Its kind
        kind: DeclKind,
        /// Where it was written, when known
        location: Option<Location>,
    },

    /// The graph refused the publication
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Errors building the scope tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    /// A container can be the anchor of only one scope
    #[error("container {container:?} is already anchored by scope {existing:?}")]
    AlreadyAnchored {
        /// Container that was anchored twice
        container: ContainerId,
        /// Scope that anchored it first
        existing: ScopeId,
    },
}

/// Errors loading a [`crate::RegistrationConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read {}", .path.display())]
    Io {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// The document is not a valid config
    #[error("invalid registration config: {0}")]
    Parse(#[from] TomlError),
}
