//! Joint range descriptions.
//!
//! A [`JointSpec`] describes the fixed motion range of a single 1-DOF
//! joint. Arm joints are revolute and measured in radians; finger joints
//! express normalized closure, so their range is a unitless `[0.01, 1.0]`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Result, RigError};

/// Immutable description of one joint's motion range.
///
/// Defined once at session start; the simulation never mutates it. The
/// position invariant `min <= q <= max` is enforced against these bounds
/// by whoever owns the joint state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointSpec {
    /// Joint name, unique within a catalog (e.g. `right_elbow_pitch`).
    pub name: String,
    /// Minimum reachable position.
    pub min: f64,
    /// Maximum reachable position.
    pub max: f64,
}

impl JointSpec {
    /// Create a new joint spec.
    #[must_use]
    pub fn new(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            min,
            max,
        }
    }

    /// The neutral position, halfway through the range.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Total width of the range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Clamp a position to the range.
    #[must_use]
    pub fn clamp(&self, position: f64) -> f64 {
        position.clamp(self.min, self.max)
    }

    /// Check whether a position lies within the range.
    #[must_use]
    pub fn contains(&self, position: f64) -> bool {
        position >= self.min && position <= self.max
    }

    /// Map a normalized value in `[0, 1]` into the range.
    ///
    /// The input is clamped to `[0, 1]` first, so the result always lands
    /// inside `[min, max]`.
    #[must_use]
    pub fn denormalize(&self, t: f64) -> f64 {
        self.min + t.clamp(0.0, 1.0) * self.span()
    }

    /// Validate the spec: finite bounds, `min < max`, non-empty name.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(RigError::invalid_config("joint name must not be empty"));
        }
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(RigError::InvalidJointSpec {
                name: self.name.clone(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}
