//! Node factory
//!
//! The factory maps a data-type descriptor (plus an optional prior JSON
//! encoding of the same shape) to a concrete node. The descriptor union
//! is matched exhaustively here, once; schema shapes without editor
//! support are reported and surfaced as an absent node, never as a
//! crash.

use crate::constraints::Constraints;
use crate::descriptors::TypeDescriptor;
use crate::error::{Error, Result};
use crate::nodes::{BasicNode, ConstrainedNode, ListNode, TypeNode};
use serde_json::Value as JsonValue;

/// Build a node tree for a descriptor.
///
/// Fails with [`Error::NullArgument`] when the descriptor is absent and
/// with [`Error::IllegalRange`] when a constraint range is impossible.
/// Returns `Ok(None)` for shapes with no editor support (structures,
/// and constrained types wrapping anything other than a basic or list
/// type); the caller must treat that as "no editor available for this
/// element".
pub fn build_node(
    descriptor: Option<&TypeDescriptor>,
    prior: Option<&JsonValue>,
    editable: bool,
) -> Result<Option<Box<dyn TypeNode>>> {
    let descriptor =
        descriptor.ok_or_else(|| Error::NullArgument("type descriptor".to_string()))?;

    match descriptor {
        TypeDescriptor::Basic { kind } => {
            let node = match prior {
                Some(prior) => BasicNode::from_prior(*kind, editable, prior),
                None => BasicNode::new(*kind, editable),
            };
            Ok(Some(Box::new(node)))
        }
        TypeDescriptor::List { element } => Ok(ListNode::new(
            (**element).clone(),
            &Constraints::default(),
            editable,
            prior,
        )?
        .map(|node| Box::new(node) as Box<dyn TypeNode>)),
        TypeDescriptor::Constrained { inner, constraints } => match inner.as_ref() {
            TypeDescriptor::Basic { kind } => Ok(Some(Box::new(ConstrainedNode::new(
                *kind,
                constraints.clone(),
                editable,
                prior,
            )?))),
            TypeDescriptor::List { element } => Ok(ListNode::new(
                (**element).clone(),
                constraints,
                editable,
                prior,
            )?
            .map(|node| Box::new(node) as Box<dyn TypeNode>)),
            other => {
                tracing::warn!(
                    "constrained type wraps a shape with no editor support: {:?}",
                    other
                );
                Ok(None)
            }
        },
        TypeDescriptor::Structure { elements } => {
            tracing::warn!(
                "structure editors are not supported ({} elements declared)",
                elements.len()
            );
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::Constraints;
    use crate::descriptors::{ScalarKind, ValueKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_absent_descriptor_is_fatal() {
        let result = build_node(None, None, true);
        assert!(matches!(result, Err(Error::NullArgument(_))));
    }

    #[test]
    fn test_basic_dispatch() {
        let descriptor = TypeDescriptor::basic(ScalarKind::Boolean);
        let node = build_node(Some(&descriptor), None, true).unwrap().unwrap();
        assert_eq!(node.kind(), ValueKind::Scalar(ScalarKind::Boolean));
        assert_eq!(node.value(), "false");
    }

    #[test]
    fn test_constrained_basic_dispatch() {
        let descriptor = TypeDescriptor::constrained(
            TypeDescriptor::basic(ScalarKind::Integer),
            Constraints::new()
                .with_minimal_inclusive("2")
                .with_maximal_inclusive("5"),
        );
        let node = build_node(Some(&descriptor), None, true).unwrap().unwrap();
        assert_eq!(node.value(), "2");
    }

    #[test]
    fn test_constrained_list_dispatch() {
        let descriptor = TypeDescriptor::constrained(
            TypeDescriptor::list(TypeDescriptor::basic(ScalarKind::Integer)),
            Constraints::new().with_element_count(2),
        );
        let node = build_node(Some(&descriptor), None, true).unwrap().unwrap();
        assert_eq!(node.kind(), ValueKind::List);
        assert_eq!(node.to_json(), json!([{"value": "0"}, {"value": "0"}]));
    }

    #[test]
    fn test_structure_is_reported_absent() {
        let descriptor = TypeDescriptor::Structure {
            elements: indexmap::IndexMap::new(),
        };
        assert!(build_node(Some(&descriptor), None, true).unwrap().is_none());
    }

    #[test]
    fn test_constrained_structure_is_reported_absent() {
        let descriptor = TypeDescriptor::constrained(
            TypeDescriptor::Structure {
                elements: indexmap::IndexMap::new(),
            },
            Constraints::new(),
        );
        assert!(build_node(Some(&descriptor), None, true).unwrap().is_none());
    }

    #[test]
    fn test_doubly_constrained_is_reported_absent() {
        let descriptor = TypeDescriptor::constrained(
            TypeDescriptor::constrained(
                TypeDescriptor::basic(ScalarKind::Integer),
                Constraints::new(),
            ),
            Constraints::new(),
        );
        assert!(build_node(Some(&descriptor), None, true).unwrap().is_none());
    }

    #[test]
    fn test_illegal_range_propagates() {
        let descriptor = TypeDescriptor::constrained(
            TypeDescriptor::basic(ScalarKind::Integer),
            Constraints::new()
                .with_minimal_inclusive("5")
                .with_maximal_inclusive("2"),
        );
        assert!(matches!(
            build_node(Some(&descriptor), None, true),
            Err(Error::IllegalRange(_))
        ));
    }

    #[test]
    fn test_nested_list_dispatch() {
        let descriptor = TypeDescriptor::list(TypeDescriptor::list(TypeDescriptor::basic(
            ScalarKind::String,
        )));
        let node = build_node(Some(&descriptor), None, true).unwrap().unwrap();
        assert_eq!(node.kind(), ValueKind::List);
        // one placeholder row holding one placeholder row
        assert_eq!(node.to_json(), json!([[{"value": ""}]]));
    }
}
