//! # paramtree
//!
//! Typed parameter tree construction, constraint validation and JSON
//! round-tripping for remote device capabilities.
//!
//! A capability browser shows an operator the commands and properties a
//! remote device declares, each with a typed parameter schema. This
//! crate is the engine behind that surface: it turns a recursively
//! nested data-type descriptor (basic scalar, list, constrained type,
//! structure) into a tree of independently-editable value nodes that
//! validate continuously against their declared constraints, step
//! within resolved bounds, and encode to and from a fixed JSON wire
//! form.
//!
//! ## Example
//!
//! ```rust
//! use paramtree::{build_node, Constraints, ScalarKind, TypeDescriptor, TypeNode};
//!
//! let descriptor = TypeDescriptor::constrained(
//!     TypeDescriptor::basic(ScalarKind::Integer),
//!     Constraints::new()
//!         .with_minimal_inclusive("2")
//!         .with_maximal_inclusive("5"),
//! );
//!
//! let node = build_node(Some(&descriptor), None, true)?.expect("editor available");
//! assert_eq!(node.to_json().to_string(), r#"{"value":"2"}"#);
//! # Ok::<(), paramtree::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;

// Leaf utilities
pub mod helpers;
pub mod isodates;

// Schema model
pub mod constraints;
pub mod descriptors;

// Value model
pub mod nodes;
pub mod steppers;

// Re-exports for convenience
pub use constraints::{BoundKind, Cardinality, Constraints};
pub use descriptors::{ScalarKind, TypeDescriptor, ValueKind};
pub use error::{Error, Result, ValidationError};
pub use nodes::{build_node, BasicNode, ConstrainedNode, ListNode, TypeNode};
pub use steppers::{Steppable, StepperModel};

/// Version of the paramtree library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
