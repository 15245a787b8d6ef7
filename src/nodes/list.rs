//! List nodes
//!
//! A list node is an ordered, homogeneous sequence of child nodes. A
//! declared `element_count` fixes the size and disables add/remove;
//! otherwise the optional min/max element counts bound an editable
//! list. The JSON encoding is an array of child encodings in order,
//! with empty child encodings omitted rather than emitted as
//! placeholders.

use crate::constraints::Constraints;
use crate::descriptors::{TypeDescriptor, ValueKind};
use crate::error::{Error, Result, ValidationError};
use crate::nodes::{factory, is_empty_encoding, TypeNode};
use serde_json::Value as JsonValue;
use std::any::Any;

/// An editable or fixed-size homogeneous sequence node
#[derive(Debug)]
pub struct ListNode {
    element: TypeDescriptor,
    children: Vec<Box<dyn TypeNode>>,
    min_count: usize,
    max_count: Option<usize>,
    fixed: bool,
    editable: bool,
}

impl ListNode {
    /// Build a list node for one element type.
    ///
    /// With a fixed `element_count` of N the node holds exactly N
    /// children, seeded from the prior array where present (extra
    /// entries truncated, missing entries filled with element
    /// defaults), and add/remove are disabled. Otherwise the list is
    /// editable and the initial size is the prior array length, floored
    /// by the minimal element count and by one placeholder row.
    ///
    /// Returns `Ok(None)` when no editor is available for the element
    /// type; the caller treats that like any other unsupported shape.
    pub fn new(
        element: TypeDescriptor,
        constraints: &Constraints,
        editable: bool,
        prior: Option<&JsonValue>,
    ) -> Result<Option<Self>> {
        let cardinality = constraints.cardinality();
        let prior_items: Vec<&JsonValue> = prior
            .and_then(JsonValue::as_array)
            .map(|items| items.iter().collect())
            .unwrap_or_default();

        let target = match cardinality.fixed {
            Some(count) => count,
            None => prior_items.len().max(cardinality.min.max(1)),
        };

        let mut children = Vec::with_capacity(target);
        for index in 0..target {
            match factory::build_node(Some(&element), prior_items.get(index).copied(), editable)? {
                Some(child) => children.push(child),
                None => return Ok(None),
            }
        }

        Ok(Some(Self {
            element,
            children,
            min_count: cardinality.min,
            max_count: cardinality.max,
            fixed: cardinality.fixed.is_some(),
            editable,
        }))
    }

    /// Number of child nodes
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the list currently has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether the size is pinned by a fixed element count
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// The child nodes, in order
    pub fn children(&self) -> &[Box<dyn TypeNode>] {
        &self.children
    }

    /// Mutable access to one child
    pub fn child_mut(&mut self, index: usize) -> Option<&mut Box<dyn TypeNode>> {
        self.children.get_mut(index)
    }

    /// Whether a row may currently be added
    pub fn can_add(&self) -> bool {
        !self.fixed
            && self.editable
            && self.max_count.map_or(true, |max| self.children.len() < max)
    }

    /// Whether a row may currently be removed. The floor is the minimal
    /// element count, and never less than the single placeholder row an
    /// otherwise-unconstrained list keeps.
    pub fn can_remove(&self) -> bool {
        !self.fixed && self.editable && self.children.len() > self.min_count.max(1)
    }

    /// Append a new child carrying the element type's default value
    pub fn add_element(&mut self) -> Result<()> {
        if !self.can_add() {
            return Err(Error::Validation(
                ValidationError::new("cannot add a list element")
                    .with_reason(format!("current size: {}", self.children.len())),
            ));
        }
        let child = self.build_child(None)?;
        self.children.push(child);
        Ok(())
    }

    /// Remove the child at `index`
    pub fn remove_element(&mut self, index: usize) -> Result<()> {
        if !self.can_remove() {
            return Err(Error::Validation(
                ValidationError::new("cannot remove a list element")
                    .with_reason(format!("current size: {}", self.children.len())),
            ));
        }
        if index >= self.children.len() {
            return Err(Error::Value(format!(
                "element index {} out of range for list of {}",
                index,
                self.children.len()
            )));
        }
        self.children.remove(index);
        Ok(())
    }

    fn build_child(&self, prior: Option<&JsonValue>) -> Result<Box<dyn TypeNode>> {
        factory::build_node(Some(&self.element), prior, self.editable)?.ok_or_else(|| {
            Error::Unsupported("no editor available for the list element type".to_string())
        })
    }
}

impl TypeNode for ListNode {
    fn kind(&self) -> ValueKind {
        ValueKind::List
    }

    fn value(&self) -> String {
        self.to_json().to_string()
    }

    fn set_value(&mut self, _value: &str) -> Result<()> {
        Err(Error::Value(
            "list values are edited through their elements".to_string(),
        ))
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn validate(&self) -> Result<()> {
        let len = self.children.len();
        if len < self.min_count {
            return Err(Error::Validation(
                ValidationError::new(format!("list must hold at least {} elements", self.min_count))
                    .with_reason(format!("current size: {}", len)),
            ));
        }
        if let Some(max) = self.max_count {
            if len > max {
                return Err(Error::Validation(
                    ValidationError::new(format!("list must hold at most {} elements", max))
                        .with_reason(format!("current size: {}", len)),
                ));
            }
        }
        for child in &self.children {
            child.validate()?;
        }
        Ok(())
    }

    fn clone_node(&self) -> Box<dyn TypeNode> {
        Box::new(ListNode {
            element: self.element.clone(),
            children: self.children.iter().map(|child| child.clone_node()).collect(),
            min_count: self.min_count,
            max_count: self.max_count,
            fixed: self.fixed,
            editable: self.editable,
        })
    }

    fn to_json(&self) -> JsonValue {
        JsonValue::Array(
            self.children
                .iter()
                .map(|child| child.to_json())
                .filter(|encoded| !is_empty_encoding(encoded))
                .collect(),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
