//! Basic value nodes
//!
//! A basic node is the leaf of a parameter tree: one scalar kind, one
//! string-encoded value, one editability flag. Construction without a
//! prior value yields the kind's default; a prior value that fails to
//! parse falls back to the default rather than erroring.

use crate::descriptors::{ScalarKind, ValueKind};
use crate::error::{Error, Result, ValidationError};
use crate::nodes::{prior_value_text, TypeNode, VALUE_KEY};
use crate::{helpers, isodates};
use chrono::{Local, Timelike, Utc};
use serde_json::{json, Value as JsonValue};
use std::any::Any;

/// A leaf node for one scalar kind
#[derive(Debug, Clone)]
pub struct BasicNode {
    kind: ScalarKind,
    value: String,
    editable: bool,
}

/// The default string encoding of a scalar kind. Temporal kinds default
/// to the current date/time; Binary and Any carry explicit placeholder
/// values signaling unimplemented support.
pub(crate) fn default_value(kind: ScalarKind) -> String {
    match kind {
        ScalarKind::Boolean => "false".to_string(),
        ScalarKind::Integer => "0".to_string(),
        ScalarKind::Real => "0.0".to_string(),
        ScalarKind::String => String::new(),
        ScalarKind::Date => helpers::format_date(Local::now().date_naive()),
        ScalarKind::Time => {
            let now = Local::now().time();
            let truncated = now.with_nanosecond(0).unwrap_or(now);
            helpers::format_time(truncated, helpers::local_offset())
        }
        ScalarKind::Timestamp => {
            let now = Utc::now();
            helpers::format_timestamp(now.with_nanosecond(0).unwrap_or(now))
        }
        ScalarKind::Binary => "not implemented 01".to_string(),
        ScalarKind::Any => "not implemented 02".to_string(),
    }
}

/// Parse a prior text value and re-encode it canonically, or `None`
/// when it does not parse as the kind. String-ish kinds adopt verbatim.
pub(crate) fn try_adopt(kind: ScalarKind, text: &str) -> Option<String> {
    match kind {
        ScalarKind::Boolean => {
            helpers::parse_boolean(text).map(|b| helpers::format_boolean(b).to_string())
        }
        ScalarKind::Integer => helpers::parse_integer(text).map(helpers::format_integer),
        ScalarKind::Real => helpers::parse_real(text).map(helpers::format_real),
        ScalarKind::Date => isodates::parse_date(text).map(helpers::format_date),
        ScalarKind::Time => {
            isodates::parse_time(text).map(|t| helpers::format_time(t, helpers::local_offset()))
        }
        ScalarKind::Timestamp => isodates::parse_date_time(text).map(helpers::format_timestamp),
        ScalarKind::String | ScalarKind::Binary | ScalarKind::Any => Some(text.to_string()),
    }
}

impl BasicNode {
    /// Create a node carrying the kind's default value
    pub fn new(kind: ScalarKind, editable: bool) -> Self {
        Self {
            kind,
            value: default_value(kind),
            editable,
        }
    }

    /// Create a node seeded from a previously-produced JSON encoding.
    /// A malformed encoding or an unparsable value yields the default.
    pub fn from_prior(kind: ScalarKind, editable: bool, prior: &JsonValue) -> Self {
        let value = prior_value_text(prior)
            .and_then(|text| try_adopt(kind, text))
            .unwrap_or_else(|| default_value(kind));
        Self {
            kind,
            value,
            editable,
        }
    }

    /// The scalar kind of this node
    pub fn scalar_kind(&self) -> ScalarKind {
        self.kind
    }

    /// Install a value without an editability check. Reserved for owning
    /// wrappers that gate mutation themselves.
    pub(crate) fn assign(&mut self, value: String) {
        self.value = value;
    }
}

impl TypeNode for BasicNode {
    fn kind(&self) -> ValueKind {
        ValueKind::Scalar(self.kind)
    }

    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) -> Result<()> {
        if !self.editable {
            return Err(Error::Validation(
                ValidationError::new("node is not editable")
                    .with_reason(format!("kind: {}", self.kind)),
            ));
        }
        self.value = value.to_string();
        Ok(())
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn validate(&self) -> Result<()> {
        let well_formed = match self.kind {
            ScalarKind::Boolean => helpers::parse_boolean(&self.value).is_some(),
            ScalarKind::Integer => helpers::parse_integer(&self.value).is_some(),
            ScalarKind::Real => helpers::parse_real(&self.value).is_some(),
            ScalarKind::Date => isodates::parse_date(&self.value).is_some(),
            ScalarKind::Time => isodates::parse_time(&self.value).is_some(),
            ScalarKind::Timestamp => isodates::parse_date_time(&self.value).is_some(),
            ScalarKind::String | ScalarKind::Binary | ScalarKind::Any => true,
        };
        if well_formed {
            Ok(())
        } else {
            Err(Error::Validation(
                ValidationError::new(format!("value is not a valid {}", self.kind))
                    .with_reason(format!("value: '{}'", self.value)),
            ))
        }
    }

    fn clone_node(&self) -> Box<dyn TypeNode> {
        Box::new(BasicNode::new(self.kind, self.editable))
    }

    fn to_json(&self) -> JsonValue {
        json!({ VALUE_KEY: self.value })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
