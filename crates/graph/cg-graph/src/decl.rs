//! Declarations stored in the graph arena

use crate::ContainerId;
use cg_intern::Symbol;
use cg_span::Location;
use la_arena::Idx;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a declaration; equal handles mean the same declaration
pub type DeclId = Idx<Declaration>;

/// What kind of program entity a declaration introduces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclKind {
    /// Field of a record, or a global variable of a namespace
    Field,
    /// Function bound to a record
    Method,
    /// Record constructor
    Constructor,
    /// Free function
    Function,
    /// Formal parameter of a function, method or constructor
    Parameter,
    /// Local variable or any other value not covered above
    Variable,
    /// Namespace or package
    Namespace,
    /// Class, struct, interface and friends
    Record,
    /// Whole source unit
    TranslationUnit,
    /// Include or import
    Include,
}

impl DeclKind {
    /// Whether the declaration introduces a value that can live in a
    /// value-declaration scope
    #[must_use]
    pub fn is_value(self) -> bool {
        matches!(
            self,
            Self::Field
                | Self::Method
                | Self::Constructor
                | Self::Function
                | Self::Parameter
                | Self::Variable
        )
    }

    /// Methods and constructors are functions too
    #[must_use]
    pub fn is_function_like(self) -> bool {
        matches!(self, Self::Function | Self::Method | Self::Constructor)
    }

    /// Lowercase name used in messages and dumps
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::Function => "function",
            Self::Parameter => "parameter",
            Self::Variable => "variable",
            Self::Namespace => "namespace",
            Self::Record => "record",
            Self::TranslationUnit => "translation-unit",
            Self::Include => "include",
        }
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A declared program entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declared name; unique only within one typed collection
    pub name: Symbol,
    /// Entity kind; fixed at allocation
    pub kind: DeclKind,
    /// Source location, when the frontend knows it
    pub location: Option<Location>,
    /// Declared type name, when the frontend knows it
    pub ty: Option<Symbol>,
    /// Container owned by this declaration (namespaces, records, functions)
    pub(crate) container: Option<ContainerId>,
}

impl Declaration {
    /// Container owned by this declaration, if its kind owns one
    #[must_use]
    pub fn container(&self) -> Option<ContainerId> {
        self.container
    }
}

/// A declaration known to introduce a value
///
/// Only [`crate::Graph::value_decl`] hands these out, so code taking a
/// `ValueDecl` never sees namespaces, records or includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueDecl {
    id: DeclId,
    kind: DeclKind,
}

impl ValueDecl {
    pub(crate) fn new(id: DeclId, kind: DeclKind) -> Self {
        Self { id, kind }
    }

    /// Underlying declaration handle
    #[must_use]
    pub fn id(self) -> DeclId {
        self.id
    }

    /// Kind of the declaration; always a value kind
    #[must_use]
    pub fn kind(self) -> DeclKind {
        self.kind
    }
}

impl From<ValueDecl> for DeclId {
    fn from(value: ValueDecl) -> Self {
        value.id
    }
}
