//! Parameter value nodes
//!
//! A node is the runtime, independently-editable representation of one
//! schema element: a leaf scalar, a constraint-validated scalar or a
//! homogeneous list. Nodes are created once per schema element by the
//! factory, mutated only by their owning editor surface, and carry
//! their value as string-encoded text regardless of logical type.

pub mod basic;
pub mod constrained;
pub mod factory;
pub mod list;

pub use basic::BasicNode;
pub use constrained::ConstrainedNode;
pub use factory::build_node;
pub use list::ListNode;

use crate::descriptors::ValueKind;
use crate::error::Result;
use serde_json::Value as JsonValue;
use std::any::Any;
use std::fmt;

/// Key of the scalar wire object `{"value": "<string>"}`
pub(crate) const VALUE_KEY: &str = "value";

/// Capability interface of every constructed node
pub trait TypeNode: fmt::Debug {
    /// The kind of this node
    fn kind(&self) -> ValueKind;

    /// The current string-encoded logical value
    fn value(&self) -> String;

    /// Assign a new value. Non-editable nodes refuse mutation; values
    /// outside declared constraints are accepted verbatim and surface
    /// through [`TypeNode::validate`] instead.
    fn set_value(&mut self, value: &str) -> Result<()>;

    /// Whether the owning editor surface may mutate this node
    fn is_editable(&self) -> bool;

    /// Check the current value against the node's type and constraints
    fn validate(&self) -> Result<()>;

    /// A new, independent node of the same kind and constraints,
    /// initialized to that kind's default value
    fn clone_node(&self) -> Box<dyn TypeNode>;

    /// The JSON wire encoding of this node
    fn to_json(&self) -> JsonValue;

    /// Upcast for consumers that need the concrete node type, e.g. a
    /// list editor reaching its add/remove gates
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Extract the string value of a prior scalar encoding, if well-formed
pub(crate) fn prior_value_text(prior: &JsonValue) -> Option<&str> {
    prior.get(VALUE_KEY).and_then(JsonValue::as_str)
}

/// Whether a child encoding is empty and must be omitted from composite
/// encodings rather than emitted as a placeholder
pub(crate) fn is_empty_encoding(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(text) => text.is_empty(),
        JsonValue::Object(map) => map.is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        _ => false,
    }
}
