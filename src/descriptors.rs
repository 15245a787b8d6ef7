//! Data-type descriptors
//!
//! This module defines the taxonomy of logical value kinds and the
//! recursive, exhaustively-tagged descriptor union that capability
//! schemas are expressed in. Descriptors carry serde derives so that a
//! schema received as JSON deserializes directly into the tagged form
//! the node factory dispatches on.

use crate::constraints::Constraints;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar logical types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    /// Boolean value, encoded as `"true"`/`"false"`
    Boolean,
    /// Signed integer, encoded as base-10 text
    Integer,
    /// Real number, encoded with at least one fractional digit
    Real,
    /// Plain text
    String,
    /// Calendar date, encoded as `yyyy-MM-dd`
    Date,
    /// Time of day, encoded as `HH:mm:ss[.fff]` with an offset marker
    Time,
    /// Instant, encoded as `yyyy-MM-ddTHH:mm:ss[.fff]Z`
    Timestamp,
    /// Binary payload (placeholder support only)
    Binary,
    /// Any type (placeholder support only)
    Any,
}

impl ScalarKind {
    /// Get the kind as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::Boolean => "boolean",
            ScalarKind::Integer => "integer",
            ScalarKind::Real => "real",
            ScalarKind::String => "string",
            ScalarKind::Date => "date",
            ScalarKind::Time => "time",
            ScalarKind::Timestamp => "timestamp",
            ScalarKind::Binary => "binary",
            ScalarKind::Any => "any",
        }
    }

    /// Check if this kind is numeric
    pub fn is_numeric(&self) -> bool {
        matches!(self, ScalarKind::Integer | ScalarKind::Real)
    }

    /// Check if this kind is a date/time kind
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            ScalarKind::Date | ScalarKind::Time | ScalarKind::Timestamp
        )
    }

    /// Check if values of this kind have a defined ordering for range
    /// constraints
    pub fn is_ordered(&self) -> bool {
        self.is_numeric() || self.is_temporal()
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of a constructed node: every scalar kind plus the composites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Leaf scalar node
    Scalar(ScalarKind),
    /// Homogeneous sequence node
    List,
    /// Named-element structure node
    Structure,
}

impl ValueKind {
    /// Get the kind as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Scalar(kind) => kind.as_str(),
            ValueKind::List => "list",
            ValueKind::Structure => "structure",
        }
    }
}

impl From<ScalarKind> for ValueKind {
    fn from(kind: ScalarKind) -> Self {
        ValueKind::Scalar(kind)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recursively-nestable data-type descriptor.
///
/// The union is exhaustive over the schema language; the node factory
/// matches it exactly once per element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TypeDescriptor {
    /// A scalar leaf type
    Basic {
        /// The scalar kind
        kind: ScalarKind,
    },
    /// An ordered sequence of one element type
    List {
        /// Descriptor of the element type
        element: Box<TypeDescriptor>,
    },
    /// A Basic or List type further restricted by constraints
    Constrained {
        /// The restricted type
        inner: Box<TypeDescriptor>,
        /// The restriction set
        constraints: Constraints,
    },
    /// A structure of named elements, in declaration order
    Structure {
        /// Element name to element type
        elements: IndexMap<String, TypeDescriptor>,
    },
}

impl TypeDescriptor {
    /// Create a basic descriptor
    pub fn basic(kind: ScalarKind) -> Self {
        TypeDescriptor::Basic { kind }
    }

    /// Create a list descriptor
    pub fn list(element: TypeDescriptor) -> Self {
        TypeDescriptor::List {
            element: Box::new(element),
        }
    }

    /// Create a constrained descriptor
    pub fn constrained(inner: TypeDescriptor, constraints: Constraints) -> Self {
        TypeDescriptor::Constrained {
            inner: Box::new(inner),
            constraints,
        }
    }

    /// The scalar kind, if this is a basic descriptor
    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            TypeDescriptor::Basic { kind } => Some(*kind),
            _ => None,
        }
    }
}
