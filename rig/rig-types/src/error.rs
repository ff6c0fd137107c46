//! Error types for rig operations.
//!
//! The simulation itself is infallible at runtime: every numeric input is
//! clamped, never rejected. Errors exist for construction-time validation,
//! joint lookup, and divergence checks.

use thiserror::Error;

/// Errors that can occur configuring or inspecting a simulation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RigError {
    /// A joint spec has unusable bounds.
    #[error("invalid joint spec for {name}: [{min}, {max}]")]
    InvalidJointSpec {
        /// Name of the offending joint.
        name: String,
        /// Declared minimum.
        min: f64,
        /// Declared maximum.
        max: f64,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },

    /// A joint lookup by name found nothing.
    #[error("joint not found: {name}")]
    JointNotFound {
        /// Name of the missing joint.
        name: String,
    },

    /// Simulation state contains `NaN` or `Inf`.
    #[error("simulation diverged: {reason}")]
    Diverged {
        /// Description of what went non-finite.
        reason: String,
    },
}

impl RigError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create a joint-not-found error.
    #[must_use]
    pub fn joint_not_found(name: impl Into<String>) -> Self {
        Self::JointNotFound { name: name.into() }
    }

    /// Create a diverged error.
    #[must_use]
    pub fn diverged(reason: impl Into<String>) -> Self {
        Self::Diverged {
            reason: reason.into(),
        }
    }

    /// Check if this is a divergence error.
    #[must_use]
    pub fn is_diverged(&self) -> bool {
        matches!(self, Self::Diverged { .. })
    }

    /// Check if this is a configuration error.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}
