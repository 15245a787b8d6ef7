//! Constraint model and validator
//!
//! Constraints restrict a basic or list type: value ranges with
//! independent inclusive and exclusive bounds per side, element
//! cardinality for lists, plus pattern, length and value-set checks.
//! Every field is independently optional. When both an inclusive and an
//! exclusive bound are declared for the same side, the exclusive bound
//! is authoritative; that precedence lives in one resolution function
//! instead of being re-derived at call sites.

use crate::descriptors::ScalarKind;
use crate::error::{Error, Result, ValidationError};
use crate::{helpers, isodates};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a resolved bound includes its own value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    /// The bound value itself is legal
    Inclusive,
    /// The bound value itself is not legal
    Exclusive,
}

/// Declared constraints of a data type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    /// Smallest legal value, itself included
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimal_inclusive: Option<String>,
    /// Largest legal value, itself included
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximal_inclusive: Option<String>,
    /// All legal values are greater than this one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimal_exclusive: Option<String>,
    /// All legal values are smaller than this one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximal_exclusive: Option<String>,
    /// Fixed element count; also disables list editing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_count: Option<usize>,
    /// Smallest legal element count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimal_element_count: Option<usize>,
    /// Largest legal element count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximal_element_count: Option<usize>,
    /// Regular expression the encoded value must match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Exact length of the encoded value, in characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    /// Exhaustive set of legal encoded values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set: Option<Vec<String>>,
}

/// Element cardinality resolved from constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cardinality {
    /// Fixed size, when `element_count` is declared
    pub fixed: Option<usize>,
    /// Lower bound (0 when unconstrained)
    pub min: usize,
    /// Upper bound (unbounded when absent)
    pub max: Option<usize>,
}

impl Constraints {
    /// Create an empty constraint set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimal inclusive bound
    pub fn with_minimal_inclusive(mut self, value: impl Into<String>) -> Self {
        self.minimal_inclusive = Some(value.into());
        self
    }

    /// Set the maximal inclusive bound
    pub fn with_maximal_inclusive(mut self, value: impl Into<String>) -> Self {
        self.maximal_inclusive = Some(value.into());
        self
    }

    /// Set the minimal exclusive bound
    pub fn with_minimal_exclusive(mut self, value: impl Into<String>) -> Self {
        self.minimal_exclusive = Some(value.into());
        self
    }

    /// Set the maximal exclusive bound
    pub fn with_maximal_exclusive(mut self, value: impl Into<String>) -> Self {
        self.maximal_exclusive = Some(value.into());
        self
    }

    /// Set a fixed element count
    pub fn with_element_count(mut self, count: usize) -> Self {
        self.element_count = Some(count);
        self
    }

    /// Set the minimal element count
    pub fn with_minimal_element_count(mut self, count: usize) -> Self {
        self.minimal_element_count = Some(count);
        self
    }

    /// Set the maximal element count
    pub fn with_maximal_element_count(mut self, count: usize) -> Self {
        self.maximal_element_count = Some(count);
        self
    }

    /// Set the pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the exact length
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Set the legal value set
    pub fn with_set(mut self, set: Vec<String>) -> Self {
        self.set = Some(set);
        self
    }

    /// Check if any range bound is declared
    pub fn has_range(&self) -> bool {
        self.minimal_inclusive.is_some()
            || self.maximal_inclusive.is_some()
            || self.minimal_exclusive.is_some()
            || self.maximal_exclusive.is_some()
    }

    /// The effective lower bound text: exclusive wins over inclusive
    pub fn lower_bound(&self) -> Option<(&str, BoundKind)> {
        match &self.minimal_exclusive {
            Some(value) => Some((value, BoundKind::Exclusive)),
            None => self
                .minimal_inclusive
                .as_deref()
                .map(|value| (value, BoundKind::Inclusive)),
        }
    }

    /// The effective upper bound text: exclusive wins over inclusive
    pub fn upper_bound(&self) -> Option<(&str, BoundKind)> {
        match &self.maximal_exclusive {
            Some(value) => Some((value, BoundKind::Exclusive)),
            None => self
                .maximal_inclusive
                .as_deref()
                .map(|value| (value, BoundKind::Inclusive)),
        }
    }

    /// Resolve the element cardinality. A fixed `element_count` pins both
    /// ends; otherwise the optional min/max counts apply.
    pub fn cardinality(&self) -> Cardinality {
        match self.element_count {
            Some(count) => Cardinality {
                fixed: Some(count),
                min: count,
                max: Some(count),
            },
            None => Cardinality {
                fixed: None,
                min: self.minimal_element_count.unwrap_or(0),
                max: self.maximal_element_count,
            },
        }
    }

    /// Validate a string-encoded scalar value against this constraint
    /// set: range (for ordered kinds), pattern, value set and length.
    pub fn validate_scalar(&self, kind: ScalarKind, value: &str) -> Result<()> {
        if kind.is_ordered() && self.has_range() {
            self.check_range(kind, value)?;
        }

        if let Some(ref pattern) = self.pattern {
            let regex = Regex::new(pattern)
                .map_err(|e| Error::Value(format!("invalid pattern '{}': {}", pattern, e)))?;
            if !regex.is_match(value) {
                return Err(Error::Validation(
                    ValidationError::new(format!("value does not match pattern '{}'", pattern))
                        .with_reason(format!("value: '{}'", value)),
                ));
            }
        }

        if let Some(ref set) = self.set {
            if !set.iter().any(|allowed| allowed == value) {
                return Err(Error::Validation(
                    ValidationError::new("value is not in the declared set")
                        .with_reason(format!("allowed values: {:?}", set)),
                ));
            }
        }

        if let Some(length) = self.length {
            let actual = value.chars().count();
            if actual != length {
                return Err(Error::Validation(
                    ValidationError::new(format!("length must be exactly {}", length))
                        .with_reason(format!("actual length: {}", actual)),
                ));
            }
        }

        Ok(())
    }

    fn check_range(&self, kind: ScalarKind, value: &str) -> Result<()> {
        match kind {
            ScalarKind::Integer => self.check_parsed_range(kind, value, helpers::parse_integer),
            ScalarKind::Real => self.check_parsed_range(kind, value, helpers::parse_real),
            ScalarKind::Date => self.check_parsed_range(kind, value, isodates::parse_date),
            ScalarKind::Time => self.check_parsed_range(kind, value, isodates::parse_time),
            ScalarKind::Timestamp => {
                self.check_parsed_range(kind, value, isodates::parse_date_time)
            }
            // unordered kinds carry no range semantics
            _ => Ok(()),
        }
    }

    fn check_parsed_range<T, P>(&self, kind: ScalarKind, value: &str, parse: P) -> Result<()>
    where
        T: PartialOrd + fmt::Display,
        P: Fn(&str) -> Option<T>,
    {
        let parsed = parse(value).ok_or_else(|| {
            Error::Validation(
                ValidationError::new(format!("value is not a valid {}", kind))
                    .with_reason(format!("value: '{}'", value)),
            )
        })?;
        let lower = self.parse_bound(kind, self.lower_bound(), &parse)?;
        let upper = self.parse_bound(kind, self.upper_bound(), &parse)?;

        if let Some((bound, bound_kind)) = lower {
            let violated = match bound_kind {
                BoundKind::Inclusive => parsed < bound,
                BoundKind::Exclusive => parsed <= bound,
            };
            if violated {
                let relation = match bound_kind {
                    BoundKind::Inclusive => ">=",
                    BoundKind::Exclusive => ">",
                };
                return Err(Error::Validation(
                    ValidationError::new(format!("value must be {} {}", relation, bound))
                        .with_reason(format!("value: {}", parsed)),
                ));
            }
        }

        if let Some((bound, bound_kind)) = upper {
            let violated = match bound_kind {
                BoundKind::Inclusive => parsed > bound,
                BoundKind::Exclusive => parsed >= bound,
            };
            if violated {
                let relation = match bound_kind {
                    BoundKind::Inclusive => "<=",
                    BoundKind::Exclusive => "<",
                };
                return Err(Error::Validation(
                    ValidationError::new(format!("value must be {} {}", relation, bound))
                        .with_reason(format!("value: {}", parsed)),
                ));
            }
        }

        Ok(())
    }

    fn parse_bound<T, P>(
        &self,
        kind: ScalarKind,
        bound: Option<(&str, BoundKind)>,
        parse: &P,
    ) -> Result<Option<(T, BoundKind)>>
    where
        P: Fn(&str) -> Option<T>,
    {
        match bound {
            None => Ok(None),
            Some((text, bound_kind)) => parse(text)
                .map(|parsed| Some((parsed, bound_kind)))
                .ok_or_else(|| {
                    Error::Value(format!(
                        "constraint bound '{}' is not a valid {}",
                        text, kind
                    ))
                }),
        }
    }
}
