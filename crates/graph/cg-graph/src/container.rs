//! Container nodes and their typed declaration collections

use crate::DeclId;
use cg_intern::Symbol;
use la_arena::Idx;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a container node
pub type ContainerId = Idx<Container>;

/// Syntactic unit that owns declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerKind {
    /// Namespace or package
    Namespace,
    /// Class, struct, interface, union or enum
    Record,
    /// Functions, methods and constructors
    Function,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Namespace => "namespace",
            Self::Record => "record",
            Self::Function => "function",
        })
    }
}

/// Flavour of a record as written in the source language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    /// `class`
    #[default]
    Class,
    /// `struct`
    Struct,
    /// `interface` or protocol
    Interface,
    /// `union`
    Union,
    /// Enumeration; its constants are registered as fields
    Enum,
}

impl RecordKind {
    /// Source-level keyword
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Union => "union",
            Self::Enum => "enum",
        }
    }
}

/// One typed collection of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collection {
    /// Global variables of a namespace
    NamespaceFields,
    /// Free functions of a namespace
    NamespaceFunctions,
    /// Fields of a record
    RecordFields,
    /// Methods of a record
    RecordMethods,
    /// Constructors of a record
    RecordConstructors,
    /// Formal parameters of a function, method or constructor
    FunctionParameters,
}

impl Collection {
    /// The only container kind that has this collection
    #[must_use]
    pub fn container_kind(self) -> ContainerKind {
        match self {
            Self::NamespaceFields | Self::NamespaceFunctions => ContainerKind::Namespace,
            Self::RecordFields | Self::RecordMethods | Self::RecordConstructors => {
                ContainerKind::Record
            }
            Self::FunctionParameters => ContainerKind::Function,
        }
    }

    /// Short name used in dumps and log events
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NamespaceFields | Self::RecordFields => "fields",
            Self::NamespaceFunctions => "functions",
            Self::RecordMethods => "methods",
            Self::RecordConstructors => "constructors",
            Self::FunctionParameters => "parameters",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}.{}", self.container_kind(), self.as_str())
    }
}

/// Collections of a namespace container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceMembers {
    pub(crate) fields: Vec<DeclId>,
    pub(crate) functions: Vec<DeclId>,
}

/// Collections and metadata of a record container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordMembers {
    pub(crate) record_kind: RecordKind,
    pub(crate) super_types: Vec<Symbol>,
    pub(crate) fields: Vec<DeclId>,
    pub(crate) methods: Vec<DeclId>,
    pub(crate) constructors: Vec<DeclId>,
}

impl RecordMembers {
    /// Flavour of the record
    #[must_use]
    pub fn record_kind(&self) -> RecordKind {
        self.record_kind
    }

    /// Super types in declaration order
    #[must_use]
    pub fn super_types(&self) -> &[Symbol] {
        &self.super_types
    }
}

/// Parameters and receiver of a function container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionMembers {
    pub(crate) parameters: Vec<DeclId>,
    pub(crate) receiver: Option<DeclId>,
}

impl FunctionMembers {
    /// Receiver variable of a method declared outside its record
    #[must_use]
    pub fn receiver(&self) -> Option<DeclId> {
        self.receiver
    }
}

/// Kind-specific storage of a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Members {
    /// Storage of a namespace
    Namespace(NamespaceMembers),
    /// Storage of a record
    Record(RecordMembers),
    /// Storage of a function, method or constructor
    Function(FunctionMembers),
}

impl Members {
    /// Record storage, `None` for other container kinds
    #[must_use]
    pub fn as_record(&self) -> Option<&RecordMembers> {
        match self {
            Self::Record(members) => Some(members),
            Self::Namespace(_) | Self::Function(_) => None,
        }
    }

    /// Function storage, `None` for other container kinds
    #[must_use]
    pub fn as_function(&self) -> Option<&FunctionMembers> {
        match self {
            Self::Function(members) => Some(members),
            Self::Namespace(_) | Self::Record(_) => None,
        }
    }
}

/// A namespace, record or function together with the declarations it owns
///
/// The typed collections only change through [`crate::Graph::insert_member`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    owner: DeclId,
    members: Members,
}

impl Container {
    pub(crate) fn new(owner: DeclId, kind: ContainerKind) -> Self {
        let members = match kind {
            ContainerKind::Namespace => Members::Namespace(NamespaceMembers::default()),
            ContainerKind::Record => Members::Record(RecordMembers::default()),
            ContainerKind::Function => Members::Function(FunctionMembers::default()),
        };
        Self { owner, members }
    }

    /// Declaration this container belongs to
    #[must_use]
    pub fn owner(&self) -> DeclId {
        self.owner
    }

    /// Kind, derived from the stored members
    #[must_use]
    pub fn kind(&self) -> ContainerKind {
        match self.members {
            Members::Namespace(_) => ContainerKind::Namespace,
            Members::Record(_) => ContainerKind::Record,
            Members::Function(_) => ContainerKind::Function,
        }
    }

    /// Kind-specific storage
    #[must_use]
    pub fn members(&self) -> &Members {
        &self.members
    }

    pub(crate) fn members_mut(&mut self) -> &mut Members {
        &mut self.members
    }

    /// Entries of `collection`, or `None` if this container has no such
    /// collection
    #[must_use]
    pub fn collection(&self, collection: Collection) -> Option<&[DeclId]> {
        let entries = match (&self.members, collection) {
            (Members::Namespace(ns), Collection::NamespaceFields) => &ns.fields,
            (Members::Namespace(ns), Collection::NamespaceFunctions) => &ns.functions,
            (Members::Record(record), Collection::RecordFields) => &record.fields,
            (Members::Record(record), Collection::RecordMethods) => &record.methods,
            (Members::Record(record), Collection::RecordConstructors) => &record.constructors,
            (Members::Function(function), Collection::FunctionParameters) => &function.parameters,
            _ => return None,
        };
        Some(entries)
    }

    pub(crate) fn collection_mut(&mut self, collection: Collection) -> Option<&mut Vec<DeclId>> {
        let entries = match (&mut self.members, collection) {
            (Members::Namespace(ns), Collection::NamespaceFields) => &mut ns.fields,
            (Members::Namespace(ns), Collection::NamespaceFunctions) => &mut ns.functions,
            (Members::Record(record), Collection::RecordFields) => &mut record.fields,
            (Members::Record(record), Collection::RecordMethods) => &mut record.methods,
            (Members::Record(record), Collection::RecordConstructors) => &mut record.constructors,
            (Members::Function(function), Collection::FunctionParameters) => {
                &mut function.parameters
            }
            _ => return None,
        };
        Some(entries)
    }

    /// Every collection this container exposes, in a fixed order
    #[must_use]
    pub fn collections(&self) -> &'static [Collection] {
        match self.kind() {
            ContainerKind::Namespace => {
                &[Collection::NamespaceFields, Collection::NamespaceFunctions]
            }
            ContainerKind::Record => &[
                Collection::RecordConstructors,
                Collection::RecordMethods,
                Collection::RecordFields,
            ],
            ContainerKind::Function => &[Collection::FunctionParameters],
        }
    }
}
