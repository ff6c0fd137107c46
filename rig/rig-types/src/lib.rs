//! Core data types for the rig upper-body telemetry simulator.
//!
//! This crate provides the foundational types shared by the simulation
//! engine and its transport wrappers:
//!
//! - [`JointSpec`] - Immutable motion range description for one joint
//! - [`catalog`] - The fixed 26-joint upper-body catalog (two arms, two hands)
//! - [`SimConfig`] - Motion, thermal, retargeting, and resource model tuning
//! - [`RigSnapshot`] / [`JointReading`] - Read-only telemetry views
//! - [`RigError`] - Error taxonomy for configuration and lookup failures
//!
//! # Design Philosophy
//!
//! These types are **pure data**. They have no simulation behavior, only
//! constructors, validation, and clamping helpers. They're the common
//! language between:
//!
//! - The simulation engine (`rig-core`)
//! - Transport layers streaming snapshots to remote consumers
//! - Test harnesses replaying deterministic sessions
//!
//! The crate has no I/O and no async; `serde` derives are available behind
//! the `serde` feature for transports that serialize snapshots.
//!
//! # Example
//!
//! ```
//! use rig_types::{catalog, JointSpec};
//!
//! let joints = catalog::upper_body();
//! assert_eq!(joints.len(), catalog::JOINT_COUNT);
//!
//! // Every joint starts a session at its midpoint.
//! let elbow = JointSpec::new("right_elbow_pitch", -1.6, 2.53);
//! assert!(elbow.contains(elbow.midpoint()));
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
// Allow certain clippy lints that are overly pedantic for type definitions
#![allow(
    clippy::missing_const_for_fn,  // Many methods can't be const due to String fields
    clippy::missing_errors_doc,    // Error docs added where non-obvious
    clippy::suboptimal_flops       // mul_add style changes aren't always clearer
)]

pub mod catalog;
mod config;
mod error;
mod joint;
mod snapshot;

pub use config::{MotionConfig, ResourceConfig, RetargetConfig, SimConfig, ThermalConfig};
pub use error::RigError;
pub use joint::JointSpec;
pub use snapshot::{JointReading, RigSnapshot};

/// Result type for rig operations.
pub type Result<T> = std::result::Result<T, RigError>;
