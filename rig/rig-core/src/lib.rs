//! Simulation engine for the rig upper-body telemetry simulator.
//!
//! This crate evolves the state of a 26-joint manipulator (two arms, two
//! hands) and exposes read-only snapshots of it. It builds on [`rig_types`]
//! for the data structures.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        Engine                              │
//! │  Owns: joints, battery, cpu, tick, config, rng             │
//! │  Provides: advance(dt), snapshot(), joint lookup           │
//! └─────────────────────────┬──────────────────────────────────┘
//!                           │ steps each
//!                           ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │                      JointModel                            │
//! │  Countdown retargeting → bounded motion profile →          │
//! │  inelastic limit stop → torque estimate → thermal model    │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Sessions
//!
//! One engine per consumer session, never shared: [`Engine::new`] is the
//! session factory, and `advance`/`snapshot` take `&mut self`/`&self` so
//! the borrow checker enforces the single sequential caller the model
//! assumes. The engine does no I/O and no timing of its own; the driving
//! loop measures wall-clock elapsed time and passes it as `dt`.
//!
//! # Determinism
//!
//! Randomness is the only non-determinism and it is injectable:
//! [`Engine::seeded`] gives a reproducible session, [`Engine::with_rng`]
//! accepts any `RngCore` source.
//!
//! # Example
//!
//! ```
//! use rig_core::Engine;
//!
//! let mut engine = Engine::seeded(7);
//! for _ in 0..50 {
//!     engine.advance(0.1);
//! }
//!
//! let snapshot = engine.snapshot();
//! assert_eq!(snapshot.tick, 50);
//! assert!(snapshot.is_finite());
//! assert!(snapshot.battery < 100.0);
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
// Allow certain clippy lints that are overly pedantic here
#![allow(
    clippy::missing_const_for_fn,  // Accessors stay non-const for uniformity
    clippy::cast_precision_loss,   // usize to f64 is fine for joint counts
    clippy::suboptimal_flops       // mul_add style changes aren't always clearer
)]

mod engine;
mod joint;

pub use engine::Engine;
pub use joint::JointModel;

// Re-export the types consumers need alongside the engine.
pub use rig_types::{JointReading, RigSnapshot, SimConfig};
