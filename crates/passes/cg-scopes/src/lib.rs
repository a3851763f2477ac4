//! Scope tree and declaration registration
//!
//! While a frontend walks a source unit it keeps a tree of lexical scopes.
//! Each declaration it meets is registered against the active scope:
//!
//! 1. the declaration is appended to the scope's flat value log, and
//! 2. if the scope is anchored to a namespace, record or function, the
//!    declaration is published into the matching typed collection of that
//!    container (see [`classify()`]), replacing same-name entries.
//!
//! Later passes (name resolution, call graphs, data flow) read the flat logs
//! and the typed collections; nothing here resolves names across scopes.

mod classify;
mod config;
mod diagnostics;
mod dump;
mod error;
mod manager;
mod register;
mod scope;

pub use classify::{Target, classify, target};
pub use config::RegistrationConfig;
pub use diagnostics::{Diagnostic, Diagnostics};
pub use dump::{Dump, dump};
pub use error::{ConfigError, RegistrationError, ScopeError};
pub use manager::ScopeManager;
pub use register::Registration;
pub use scope::{Ancestors, Anchor, ConstructKind, Scope, ScopeId, ScopeKind, ScopeTree};

pub use cg_graph::ReplacementPolicy;
