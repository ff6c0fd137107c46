//! Whole-body simulation engine.
//!
//! The [`Engine`] owns the full joint collection plus the whole-body
//! resource counters (battery, CPU load, tick) and advances them together.
//! It is the session unit: construct one per consumer, drive it from a
//! single sequential loop, and drop it when the session ends. Nothing is
//! shared between engines.

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use rig_types::{catalog, JointReading, Result, RigError, RigSnapshot, SimConfig};

use crate::joint::JointModel;

/// Round to a fixed number of decimals, for presentation only.
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Simulation engine for the 26-joint upper body.
///
/// Created via [`Engine::new`] (entropy-seeded), [`Engine::seeded`]
/// (reproducible), or [`Engine::with_rng`] (caller-supplied randomness).
/// All joints start at their range midpoint with zero velocity, battery at
/// 100%, CPU at its configured start value, tick at 0.
pub struct Engine {
    joints: Vec<JointModel>,
    battery: f64,
    cpu: f64,
    tick: u64,
    config: SimConfig,
    rng: Box<dyn RngCore + Send>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("joints", &self.joints.len())
            .field("battery", &self.battery)
            .field("cpu", &self.cpu)
            .field("tick", &self.tick)
            .finish_non_exhaustive()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create a fresh session with the default configuration and an
    /// entropy-seeded random source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SimConfig::default())
    }

    /// Create a reproducible session: same seed, same trajectory.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(
            SimConfig::default(),
            Box::new(SmallRng::seed_from_u64(seed)),
        )
    }

    /// Create a session with a custom configuration and entropy seeding.
    #[must_use]
    pub fn with_config(config: SimConfig) -> Self {
        Self::with_rng(config, Box::new(SmallRng::from_entropy()))
    }

    /// Create a session with a custom configuration and random source.
    #[must_use]
    pub fn with_rng(config: SimConfig, mut rng: Box<dyn RngCore + Send>) -> Self {
        let joints = catalog::upper_body()
            .into_iter()
            .map(|spec| JointModel::new(spec, &config, &mut rng))
            .collect();
        let cpu = config.resources.cpu_start;
        Self {
            joints,
            battery: 100.0,
            cpu,
            tick: 0,
            config,
            rng,
        }
    }

    /// Number of steps taken since session start.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Current battery charge in percent (unrounded).
    #[must_use]
    pub fn battery(&self) -> f64 {
        self.battery
    }

    /// Current CPU load in percent (unrounded).
    #[must_use]
    pub fn cpu(&self) -> f64 {
        self.cpu
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Read-only view of every joint, in catalog order.
    #[must_use]
    pub fn joints(&self) -> &[JointModel] {
        &self.joints
    }

    /// Look up a joint by name.
    pub fn joint(&self, name: &str) -> Result<&JointModel> {
        self.joints
            .iter()
            .find(|j| j.spec().name == name)
            .ok_or_else(|| RigError::joint_not_found(name))
    }

    /// Look up a joint by name for mutation (e.g. commanding a target).
    pub fn joint_mut(&mut self, name: &str) -> Result<&mut JointModel> {
        self.joints
            .iter_mut()
            .find(|j| j.spec().name == name)
            .ok_or_else(|| RigError::joint_not_found(name))
    }

    /// Advance the whole body by `dt` seconds.
    ///
    /// Never fails: `dt` is sanitized by clamping into the configured
    /// window. The resource models deliberately run on the *previous*
    /// step's joint velocities: activity is measured before the joints
    /// advance, so battery and CPU lag actual motion by one tick. The
    /// drain and load curves are calibrated against that lag; do not
    /// reorder the stages.
    pub fn advance(&mut self, dt: f64) {
        let dt = self.config.clamp_timestep(dt);
        self.tick += 1;

        let joint_movement = self.mean_abs_velocity();
        self.drain_battery(dt, joint_movement);
        self.update_cpu(joint_movement);

        for joint in &mut self.joints {
            joint.step(dt, &self.config, &mut self.rng);
        }
    }

    /// Produce a read-only snapshot of the current state.
    ///
    /// Pure read: the engine is not mutated, and two snapshots without an
    /// intervening [`advance`](Self::advance) compare equal. Values are
    /// rounded for presentation (3 decimals for position/velocity/torque,
    /// 1 for temperature, battery, and CPU) from the unrounded internal
    /// state; rounding never feeds back into the simulation.
    #[must_use]
    pub fn snapshot(&self) -> RigSnapshot {
        let joints = self
            .joints
            .iter()
            .map(|joint| JointReading {
                name: joint.spec().name.clone(),
                q: round_to(joint.q(), 3),
                dq: round_to(joint.dq(), 3),
                tau_est: round_to(joint.tau_est(), 3),
                temperature: round_to(joint.temperature(), 1),
                min: joint.spec().min,
                max: joint.spec().max,
            })
            .collect();
        RigSnapshot {
            joints,
            tick: self.tick,
            battery: round_to(self.battery, 1),
            cpu: round_to(self.cpu, 1),
        }
    }

    /// Check the whole state for `NaN`/`Inf`.
    ///
    /// The numeric policies are self-stabilizing via clamping, so this
    /// should never fail for any sequence of calls. Soak tests and
    /// long-lived deployments use it as a diagnostic.
    pub fn check_finite(&self) -> Result<()> {
        if !self.battery.is_finite() || !self.cpu.is_finite() {
            return Err(RigError::diverged("non-finite resource counter"));
        }
        for joint in &self.joints {
            if !joint.is_finite() {
                return Err(RigError::diverged(format!(
                    "non-finite state in joint {}",
                    joint.spec().name
                )));
            }
        }
        Ok(())
    }

    /// Mean absolute joint velocity across the body.
    fn mean_abs_velocity(&self) -> f64 {
        if self.joints.is_empty() {
            return 0.0;
        }
        let total: f64 = self.joints.iter().map(|j| j.dq().abs()).sum();
        total / self.joints.len() as f64
    }

    /// Drain the battery from activity. Uses the CPU load of the previous
    /// tick (this runs before [`Self::update_cpu`]). Battery only falls.
    fn drain_battery(&mut self, dt: f64, joint_movement: f64) {
        let resources = &self.config.resources;
        let activity = 0.5 * (self.cpu / 100.0) + 0.5 * joint_movement;
        let drain = (resources.battery_idle_drain + activity * resources.battery_activity_drain)
            * dt
            * resources.battery_drain_scale;
        self.battery = (self.battery - drain).clamp(0.0, 100.0);
    }

    /// Re-derive the CPU load from scratch: noisy baseline plus a joint
    /// activity term. No smoothing; the load is intentionally jumpy.
    fn update_cpu(&mut self, joint_movement: f64) {
        let resources = &self.config.resources;
        let base = resources.cpu_base
            + self
                .rng
                .gen_range(-resources.cpu_base_jitter..=resources.cpu_base_jitter);
        let load = base
            + joint_movement * resources.cpu_movement_gain
            + self.rng.gen_range(-resources.cpu_noise..=resources.cpu_noise);
        self.cpu = load.clamp(resources.cpu_min, resources.cpu_max);
    }
}
