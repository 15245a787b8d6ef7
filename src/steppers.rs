//! Bounded stepper models
//!
//! A stepper model backs an incrementable input: it holds the current
//! value and the effective bounds resolved from a constraint set, and
//! refuses to step past a bound. Assigning a value outside the bounds is
//! permitted (no clamping on assignment); only exploration via
//! next/previous is blocked.
//!
//! Step sizes are fixed per kind: 1 for integers, 0.1 for reals, one
//! day for dates, one minute for times of day. The epsilon applied when
//! converting an exclusive bound into an effective inclusive one is a
//! separate unit: 1 for integers, 0.001 for reals, one day for dates,
//! one second for times of day.

use crate::constraints::{BoundKind, Constraints};
use crate::error::{Error, Result};
use crate::{helpers, isodates};
use chrono::{Duration, NaiveDate, NaiveTime};
use std::fmt;

/// Stepping arithmetic for a stepper value type
pub trait Steppable: Copy + PartialOrd + fmt::Display + Sized {
    /// The value one step up
    fn forward(self) -> Self;
    /// The value one step down
    fn backward(self) -> Self;
    /// The first legal value above an exclusive lower bound
    fn after_exclusive(self) -> Self;
    /// The last legal value below an exclusive upper bound
    fn before_exclusive(self) -> Self;
}

impl Steppable for i64 {
    fn forward(self) -> Self {
        self.saturating_add(1)
    }

    fn backward(self) -> Self {
        self.saturating_sub(1)
    }

    fn after_exclusive(self) -> Self {
        self.saturating_add(1)
    }

    fn before_exclusive(self) -> Self {
        self.saturating_sub(1)
    }
}

impl Steppable for f64 {
    fn forward(self) -> Self {
        self + 0.1
    }

    fn backward(self) -> Self {
        self - 0.1
    }

    fn after_exclusive(self) -> Self {
        self + 0.001
    }

    fn before_exclusive(self) -> Self {
        self - 0.001
    }
}

impl Steppable for NaiveDate {
    fn forward(self) -> Self {
        self.succ_opt().unwrap_or(self)
    }

    fn backward(self) -> Self {
        self.pred_opt().unwrap_or(self)
    }

    fn after_exclusive(self) -> Self {
        self.forward()
    }

    fn before_exclusive(self) -> Self {
        self.backward()
    }
}

impl Steppable for NaiveTime {
    fn forward(self) -> Self {
        self.overflowing_add_signed(Duration::minutes(1)).0
    }

    fn backward(self) -> Self {
        self.overflowing_sub_signed(Duration::minutes(1)).0
    }

    fn after_exclusive(self) -> Self {
        self.overflowing_add_signed(Duration::seconds(1)).0
    }

    fn before_exclusive(self) -> Self {
        self.overflowing_sub_signed(Duration::seconds(1)).0
    }
}

/// A bounded value holder supporting next/previous stepping
#[derive(Debug, Clone, PartialEq)]
pub struct StepperModel<T> {
    value: T,
    effective_min: Option<T>,
    effective_max: Option<T>,
}

impl<T: Steppable> StepperModel<T> {
    /// Create a model from a value and resolved effective bounds
    pub fn new(value: T, effective_min: Option<T>, effective_max: Option<T>) -> Self {
        Self {
            value,
            effective_min,
            effective_max,
        }
    }

    /// The current value
    pub fn value(&self) -> T {
        self.value
    }

    /// The effective lower bound, if any
    pub fn effective_min(&self) -> Option<T> {
        self.effective_min
    }

    /// The effective upper bound, if any
    pub fn effective_max(&self) -> Option<T> {
        self.effective_max
    }

    /// Assign a value. Values outside the bounds are accepted verbatim.
    pub fn set_value(&mut self, value: T) {
        self.value = value;
    }

    /// The value one step up, or `None` when stepping would exceed the
    /// effective maximum
    pub fn get_next(&self) -> Option<T> {
        let candidate = self.value.forward();
        if let Some(max) = self.effective_max {
            if candidate > max {
                return None;
            }
        }
        // wrapped or saturated stepping makes no progress
        if candidate <= self.value {
            return None;
        }
        Some(candidate)
    }

    /// The value one step down, or `None` when stepping would fall below
    /// the effective minimum
    pub fn get_previous(&self) -> Option<T> {
        let candidate = self.value.backward();
        if let Some(min) = self.effective_min {
            if candidate < min {
                return None;
            }
        }
        if candidate >= self.value {
            return None;
        }
        Some(candidate)
    }

    /// Step the model itself up, when permitted
    pub fn step_next(&mut self) -> Option<T> {
        let next = self.get_next()?;
        self.value = next;
        Some(next)
    }

    /// Step the model itself down, when permitted
    pub fn step_previous(&mut self) -> Option<T> {
        let previous = self.get_previous()?;
        self.value = previous;
        Some(previous)
    }
}

/// Resolve the effective bounds of a constraint set for one value type.
/// Exclusive bounds are tightened by the type's epsilon; an inverted
/// effective range is a construction-time failure.
fn resolve_bounds<T, P>(
    constraints: &Constraints,
    parse: P,
    kind_label: &str,
) -> Result<(Option<T>, Option<T>)>
where
    T: Steppable,
    P: Fn(&str) -> Option<T>,
{
    let parse_required = |text: &str| -> Result<T> {
        parse(text).ok_or_else(|| {
            Error::Value(format!(
                "constraint bound '{}' is not a valid {}",
                text, kind_label
            ))
        })
    };

    let min = match constraints.lower_bound() {
        None => None,
        Some((text, BoundKind::Inclusive)) => Some(parse_required(text)?),
        Some((text, BoundKind::Exclusive)) => Some(parse_required(text)?.after_exclusive()),
    };
    let max = match constraints.upper_bound() {
        None => None,
        Some((text, BoundKind::Inclusive)) => Some(parse_required(text)?),
        Some((text, BoundKind::Exclusive)) => Some(parse_required(text)?.before_exclusive()),
    };

    if let (Some(min), Some(max)) = (&min, &max) {
        if min > max {
            return Err(Error::IllegalRange(format!(
                "effective minimum {} exceeds effective maximum {}",
                min, max
            )));
        }
    }

    Ok((min, max))
}

fn clamp_into<T: PartialOrd + Copy>(candidate: T, min: Option<T>, max: Option<T>) -> T {
    if let Some(min) = min {
        if candidate < min {
            return min;
        }
    }
    if let Some(max) = max {
        if candidate > max {
            return max;
        }
    }
    candidate
}

/// Build an integer stepper model. The initial value is the effective
/// minimum when one is declared, otherwise 0.
pub fn integer_stepper(constraints: &Constraints) -> Result<StepperModel<i64>> {
    let (min, max) = resolve_bounds(constraints, helpers::parse_integer, "integer")?;
    Ok(StepperModel::new(min.unwrap_or(0), min, max))
}

/// Build a real stepper model. The initial value is the effective
/// minimum when one is declared, otherwise 0.0.
pub fn real_stepper(constraints: &Constraints) -> Result<StepperModel<f64>> {
    let (min, max) = resolve_bounds(constraints, helpers::parse_real, "real")?;
    Ok(StepperModel::new(min.unwrap_or(0.0), min, max))
}

/// Build a date stepper model. The candidate initial value (typically
/// "today") is clamped into the effective range rather than rejected.
pub fn date_stepper(
    constraints: &Constraints,
    candidate: NaiveDate,
) -> Result<StepperModel<NaiveDate>> {
    let (min, max) = resolve_bounds(constraints, isodates::parse_date, "date")?;
    Ok(StepperModel::new(clamp_into(candidate, min, max), min, max))
}

/// Build a time stepper model. The candidate initial value (typically
/// "now") is clamped into the effective range rather than rejected.
pub fn time_stepper(
    constraints: &Constraints,
    candidate: NaiveTime,
) -> Result<StepperModel<NaiveTime>> {
    let (min, max) = resolve_bounds(constraints, isodates::parse_time, "time")?;
    Ok(StepperModel::new(clamp_into(candidate, min, max), min, max))
}
