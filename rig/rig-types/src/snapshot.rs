//! Read-only telemetry views of the simulation state.
//!
//! A [`RigSnapshot`] is what the engine hands to transports and consumers:
//! one [`JointReading`] per joint in catalog order, plus the whole-body
//! counters. Values are rounded for presentation by the engine; the field
//! names here are the wire names a JSON consumer sees.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A read-only view of one joint at snapshot time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointReading {
    /// Joint name from the catalog.
    pub name: String,
    /// Position, rounded to 3 decimals.
    pub q: f64,
    /// Velocity, rounded to 3 decimals.
    pub dq: f64,
    /// Estimated torque, rounded to 3 decimals.
    pub tau_est: f64,
    /// Temperature in °C, rounded to 1 decimal.
    pub temperature: f64,
    /// Static lower position bound.
    pub min: f64,
    /// Static upper position bound.
    pub max: f64,
}

impl JointReading {
    /// Check that every value is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.q.is_finite()
            && self.dq.is_finite()
            && self.tau_est.is_finite()
            && self.temperature.is_finite()
            && self.min.is_finite()
            && self.max.is_finite()
    }
}

/// A read-only aggregate of the full simulation state.
///
/// Joint order equals catalog declaration order and is stable across calls
/// and sessions. Snapshots are plain values: taking one never mutates the
/// engine, and two snapshots without an intervening step compare equal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RigSnapshot {
    /// Per-joint readings in catalog order.
    pub joints: Vec<JointReading>,
    /// Number of steps taken since session start.
    pub tick: u64,
    /// Battery charge in percent, rounded to 1 decimal.
    pub battery: f64,
    /// CPU load in percent, rounded to 1 decimal.
    pub cpu: f64,
}

impl RigSnapshot {
    /// Look up a joint reading by name.
    #[must_use]
    pub fn joint(&self, name: &str) -> Option<&JointReading> {
        self.joints.iter().find(|j| j.name == name)
    }

    /// Check that every value in the snapshot is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.battery.is_finite() && self.cpu.is_finite() && self.joints.iter().all(JointReading::is_finite)
    }
}
