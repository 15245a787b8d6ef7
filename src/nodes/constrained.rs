//! Constraint-validated basic nodes
//!
//! A constrained node wraps a basic value node with a constraint set.
//! For the steppable kinds (Integer, Real, Date, Time) it also owns a
//! stepper model resolved from the constraints, so a bound editor can
//! offer next/previous exploration that stops at the effective bounds.

use crate::constraints::Constraints;
use crate::descriptors::{ScalarKind, ValueKind};
use crate::error::{Error, Result, ValidationError};
use crate::nodes::{basic, prior_value_text, BasicNode, TypeNode};
use crate::steppers::{self, StepperModel};
use crate::{helpers, isodates};
use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use serde_json::Value as JsonValue;
use std::any::Any;

/// Stepper model of a constrained node, typed per kind
#[derive(Debug, Clone)]
enum Stepper {
    Integer(StepperModel<i64>),
    Real(StepperModel<f64>),
    Date(StepperModel<NaiveDate>),
    Time(StepperModel<NaiveTime>),
}

/// A basic value node restricted by a constraint set
#[derive(Debug)]
pub struct ConstrainedNode {
    base: BasicNode,
    constraints: Constraints,
    stepper: Option<Stepper>,
    initial: String,
}

impl ConstrainedNode {
    /// Build a constrained node. Fails with
    /// [`Error::IllegalRange`](crate::error::Error::IllegalRange) when
    /// the effective minimum exceeds the effective maximum, and with a
    /// value error when a bound does not parse as the kind; no partial
    /// node is returned in either case.
    ///
    /// The initial value is the effective minimum for numeric kinds and
    /// "now" clamped into the effective range for date/time kinds. A
    /// parsable prior value then overrides it verbatim, even when it
    /// lies outside the bounds.
    pub fn new(
        kind: ScalarKind,
        constraints: Constraints,
        editable: bool,
        prior: Option<&JsonValue>,
    ) -> Result<Self> {
        let stepper = match kind {
            ScalarKind::Integer => Some(Stepper::Integer(steppers::integer_stepper(&constraints)?)),
            ScalarKind::Real => Some(Stepper::Real(steppers::real_stepper(&constraints)?)),
            ScalarKind::Date => {
                let today = Local::now().date_naive();
                Some(Stepper::Date(steppers::date_stepper(&constraints, today)?))
            }
            ScalarKind::Time => {
                let now = Local::now().time();
                let truncated = now.with_nanosecond(0).unwrap_or(now);
                Some(Stepper::Time(steppers::time_stepper(
                    &constraints,
                    truncated,
                )?))
            }
            _ => None,
        };

        let initial = match &stepper {
            Some(Stepper::Integer(model)) => helpers::format_integer(model.value()),
            Some(Stepper::Real(model)) => helpers::format_real(model.value()),
            Some(Stepper::Date(model)) => helpers::format_date(model.value()),
            Some(Stepper::Time(model)) => {
                helpers::format_time(model.value(), helpers::local_offset())
            }
            None => basic::default_value(kind),
        };

        let mut base = BasicNode::new(kind, editable);
        base.assign(initial.clone());

        let mut node = Self {
            base,
            constraints,
            stepper,
            initial,
        };

        if let Some(adopted) = prior
            .and_then(prior_value_text)
            .and_then(|text| basic::try_adopt(kind, text))
        {
            node.base.assign(adopted);
            node.sync_stepper();
        }

        Ok(node)
    }

    /// The constraint set of this node
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// The value one step up, when the stepper permits it
    pub fn next_value(&self) -> Option<String> {
        match self.stepper.as_ref()? {
            Stepper::Integer(model) => model.get_next().map(helpers::format_integer),
            Stepper::Real(model) => model.get_next().map(helpers::format_real),
            Stepper::Date(model) => model.get_next().map(helpers::format_date),
            Stepper::Time(model) => model
                .get_next()
                .map(|t| helpers::format_time(t, helpers::local_offset())),
        }
    }

    /// The value one step down, when the stepper permits it
    pub fn previous_value(&self) -> Option<String> {
        match self.stepper.as_ref()? {
            Stepper::Integer(model) => model.get_previous().map(helpers::format_integer),
            Stepper::Real(model) => model.get_previous().map(helpers::format_real),
            Stepper::Date(model) => model.get_previous().map(helpers::format_date),
            Stepper::Time(model) => model
                .get_previous()
                .map(|t| helpers::format_time(t, helpers::local_offset())),
        }
    }

    /// Step the node's value up, when permitted
    pub fn step_next(&mut self) -> Option<String> {
        let next = self.next_value()?;
        self.base.assign(next.clone());
        self.sync_stepper();
        Some(next)
    }

    /// Step the node's value down, when permitted
    pub fn step_previous(&mut self) -> Option<String> {
        let previous = self.previous_value()?;
        self.base.assign(previous.clone());
        self.sync_stepper();
        Some(previous)
    }

    /// Re-seat the stepper on the node's current value, when it parses
    fn sync_stepper(&mut self) {
        let text = self.base.value();
        match &mut self.stepper {
            Some(Stepper::Integer(model)) => {
                if let Some(value) = helpers::parse_integer(&text) {
                    model.set_value(value);
                }
            }
            Some(Stepper::Real(model)) => {
                if let Some(value) = helpers::parse_real(&text) {
                    model.set_value(value);
                }
            }
            Some(Stepper::Date(model)) => {
                if let Some(value) = isodates::parse_date(&text) {
                    model.set_value(value);
                }
            }
            Some(Stepper::Time(model)) => {
                if let Some(value) = isodates::parse_time(&text) {
                    model.set_value(value);
                }
            }
            None => {}
        }
    }
}

impl TypeNode for ConstrainedNode {
    fn kind(&self) -> ValueKind {
        self.base.kind()
    }

    fn value(&self) -> String {
        self.base.value()
    }

    fn set_value(&mut self, value: &str) -> Result<()> {
        if !self.base.is_editable() {
            return Err(Error::Validation(
                ValidationError::new("node is not editable")
                    .with_reason(format!("kind: {}", self.base.scalar_kind())),
            ));
        }
        self.base.assign(value.to_string());
        self.sync_stepper();
        Ok(())
    }

    fn is_editable(&self) -> bool {
        self.base.is_editable()
    }

    fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.constraints
            .validate_scalar(self.base.scalar_kind(), &self.base.value())
    }

    fn clone_node(&self) -> Box<dyn TypeNode> {
        let mut stepper = self.stepper.clone();
        match &mut stepper {
            Some(Stepper::Integer(model)) => {
                if let Some(value) = helpers::parse_integer(&self.initial) {
                    model.set_value(value);
                }
            }
            Some(Stepper::Real(model)) => {
                if let Some(value) = helpers::parse_real(&self.initial) {
                    model.set_value(value);
                }
            }
            Some(Stepper::Date(model)) => {
                if let Some(value) = isodates::parse_date(&self.initial) {
                    model.set_value(value);
                }
            }
            Some(Stepper::Time(model)) => {
                if let Some(value) = isodates::parse_time(&self.initial) {
                    model.set_value(value);
                }
            }
            None => {}
        }

        let mut base = BasicNode::new(self.base.scalar_kind(), self.base.is_editable());
        base.assign(self.initial.clone());

        Box::new(ConstrainedNode {
            base,
            constraints: self.constraints.clone(),
            stepper,
            initial: self.initial.clone(),
        })
    }

    fn to_json(&self) -> JsonValue {
        self.base.to_json()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
