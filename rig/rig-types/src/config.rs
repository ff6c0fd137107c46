//! Configuration for the simulation models.
//!
//! [`SimConfig`] gathers every numeric policy knob of the simulation: the
//! motion profile, the torque/thermal model, target retargeting cadence,
//! and the whole-body resource models. The defaults reproduce the shipped
//! calibration exactly; tests and tools override individual groups through
//! the builder methods.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Result, RigError};

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimConfig {
    /// Motion profile and torque model.
    pub motion: MotionConfig,
    /// Thermal model.
    pub thermal: ThermalConfig,
    /// Target selection cadence.
    pub retarget: RetargetConfig,
    /// Battery and CPU models.
    pub resources: ResourceConfig,
    /// Smallest accepted timestep (seconds). Smaller inputs are clamped up.
    pub min_timestep: f64,
    /// Largest accepted timestep (seconds). Larger inputs are clamped down.
    pub max_timestep: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            motion: MotionConfig::default(),
            thermal: ThermalConfig::default(),
            retarget: RetargetConfig::default(),
            resources: ResourceConfig::default(),
            min_timestep: 0.001,
            max_timestep: 0.1,
        }
    }
}

impl SimConfig {
    /// Sanitize a caller-supplied timestep.
    ///
    /// Non-finite inputs collapse to the minimum timestep; everything else
    /// is clamped into `[min_timestep, max_timestep]`. This is the only
    /// input sanitization the simulation needs; no timestep is ever
    /// rejected with an error.
    #[must_use]
    pub fn clamp_timestep(&self, dt: f64) -> f64 {
        if dt.is_finite() {
            dt.clamp(self.min_timestep, self.max_timestep)
        } else {
            self.min_timestep
        }
    }

    /// Set the motion configuration.
    #[must_use]
    pub fn motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    /// Set the thermal configuration.
    #[must_use]
    pub fn thermal(mut self, thermal: ThermalConfig) -> Self {
        self.thermal = thermal;
        self
    }

    /// Set the retargeting configuration.
    #[must_use]
    pub fn retarget(mut self, retarget: RetargetConfig) -> Self {
        self.retarget = retarget;
        self
    }

    /// Set the resource model configuration.
    #[must_use]
    pub fn resources(mut self, resources: ResourceConfig) -> Self {
        self.resources = resources;
        self
    }

    /// Validate the whole configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.min_timestep.is_finite()
            || !self.max_timestep.is_finite()
            || self.min_timestep <= 0.0
            || self.min_timestep > self.max_timestep
        {
            return Err(RigError::invalid_config(
                "timestep window must satisfy 0 < min <= max",
            ));
        }
        self.motion.validate()?;
        self.thermal.validate()?;
        self.retarget.validate()?;
        self.resources.validate()?;
        Ok(())
    }
}

/// Motion profile limits and the lumped torque model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionConfig {
    /// Maximum joint speed (rad/s).
    pub max_velocity: f64,
    /// Maximum change of joint speed per second (rad/s²).
    pub max_acceleration: f64,
    /// Distance from target below which the desired speed ramps linearly
    /// to zero (rad). Produces a smooth stop instead of bang-bang chatter.
    pub approach_distance: f64,
    /// Lumped joint inertia for the torque estimate.
    pub inertia: f64,
    /// Lumped viscous damping for the torque estimate.
    pub damping: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            max_velocity: 0.5,
            max_acceleration: 0.2,
            approach_distance: 0.1,
            inertia: 0.1,
            damping: 0.05,
        }
    }
}

impl MotionConfig {
    /// Validate the motion configuration.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("max_velocity", self.max_velocity),
            ("max_acceleration", self.max_acceleration),
            ("approach_distance", self.approach_distance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RigError::invalid_config(format!(
                    "{name} must be positive and finite"
                )));
            }
        }
        if !self.inertia.is_finite()
            || self.inertia < 0.0
            || !self.damping.is_finite()
            || self.damping < 0.0
        {
            return Err(RigError::invalid_config(
                "inertia and damping must be non-negative and finite",
            ));
        }
        Ok(())
    }
}

/// Thermal model: heat from torque, passive cooling toward ambient.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThermalConfig {
    /// Heating per unit of absolute torque (°C/s per Nm).
    pub heat_rate: f64,
    /// Cooling per degree of gap from ambient (1/s).
    pub cooling_rate: f64,
    /// Ambient temperature the joint cools toward (°C).
    pub ambient: f64,
    /// Lower clamp on joint temperature (°C). Also the session start value.
    pub min_temperature: f64,
    /// Upper clamp on joint temperature (°C).
    pub max_temperature: f64,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            heat_rate: 0.2,
            cooling_rate: 0.05,
            ambient: 36.0,
            min_temperature: 35.0,
            max_temperature: 75.0,
        }
    }
}

impl ThermalConfig {
    /// Clamp a temperature to the allowed window.
    #[must_use]
    pub fn clamp(&self, temperature: f64) -> f64 {
        temperature.clamp(self.min_temperature, self.max_temperature)
    }

    /// Validate the thermal configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.heat_rate.is_finite()
            || self.heat_rate < 0.0
            || !self.cooling_rate.is_finite()
            || self.cooling_rate < 0.0
        {
            return Err(RigError::invalid_config(
                "thermal rates must be non-negative and finite",
            ));
        }
        if !self.min_temperature.is_finite()
            || !self.max_temperature.is_finite()
            || self.min_temperature >= self.max_temperature
        {
            return Err(RigError::invalid_config(
                "temperature window must satisfy min < max",
            ));
        }
        if !self.ambient.is_finite() {
            return Err(RigError::invalid_config("ambient must be finite"));
        }
        Ok(())
    }
}

/// Cadence and shape of random target selection.
///
/// Every joint counts down to its next target change; the first countdown
/// uses a shorter window than subsequent ones so joints start out
/// desynchronized rather than retargeting in lockstep.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RetargetConfig {
    /// Shortest first countdown after session start (seconds).
    pub initial_delay_min: f64,
    /// Longest first countdown after session start (seconds).
    pub initial_delay_max: f64,
    /// Shortest countdown between subsequent target changes (seconds).
    pub delay_min: f64,
    /// Longest countdown between subsequent target changes (seconds).
    pub delay_max: f64,
    /// Half-width of the additive bias that pulls targets toward midrange.
    pub midrange_bias: f64,
}

impl Default for RetargetConfig {
    fn default() -> Self {
        Self {
            initial_delay_min: 1.0,
            initial_delay_max: 5.0,
            delay_min: 2.0,
            delay_max: 8.0,
            midrange_bias: 0.3,
        }
    }
}

impl RetargetConfig {
    /// Validate the retargeting configuration.
    pub fn validate(&self) -> Result<()> {
        for (name, min, max) in [
            ("initial_delay", self.initial_delay_min, self.initial_delay_max),
            ("delay", self.delay_min, self.delay_max),
        ] {
            if !min.is_finite() || !max.is_finite() || min <= 0.0 || min >= max {
                return Err(RigError::invalid_config(format!(
                    "{name} window must satisfy 0 < min < max"
                )));
            }
        }
        if !self.midrange_bias.is_finite() || self.midrange_bias < 0.0 {
            return Err(RigError::invalid_config(
                "midrange_bias must be non-negative and finite",
            ));
        }
        Ok(())
    }
}

/// Whole-body battery and CPU models.
///
/// Both are driven by joint activity (mean absolute joint speed). The CPU
/// load is re-derived from scratch every tick with additive noise. It is
/// intentionally jumpy, with no smoothing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResourceConfig {
    /// Battery drain per second at zero activity (% per scaled second).
    pub battery_idle_drain: f64,
    /// Additional battery drain per unit of activity.
    pub battery_activity_drain: f64,
    /// Scale applied to the battery drain per step.
    pub battery_drain_scale: f64,
    /// CPU load reported before the first tick (%).
    pub cpu_start: f64,
    /// Baseline CPU load (%).
    pub cpu_base: f64,
    /// Half-width of the baseline fluctuation (%).
    pub cpu_base_jitter: f64,
    /// CPU load added per unit of joint activity (%).
    pub cpu_movement_gain: f64,
    /// Half-width of the additive CPU noise (%).
    pub cpu_noise: f64,
    /// Lower clamp on reported CPU load (%).
    pub cpu_min: f64,
    /// Upper clamp on reported CPU load (%).
    pub cpu_max: f64,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            battery_idle_drain: 0.001,
            battery_activity_drain: 0.004,
            battery_drain_scale: 10.0,
            cpu_start: 10.0,
            cpu_base: 8.0,
            cpu_base_jitter: 2.0,
            cpu_movement_gain: 30.0,
            cpu_noise: 5.0,
            cpu_min: 5.0,
            cpu_max: 95.0,
        }
    }
}

impl ResourceConfig {
    /// Validate the resource configuration.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("battery_idle_drain", self.battery_idle_drain),
            ("battery_activity_drain", self.battery_activity_drain),
            ("cpu_base_jitter", self.cpu_base_jitter),
            ("cpu_noise", self.cpu_noise),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RigError::invalid_config(format!(
                    "{name} must be non-negative and finite"
                )));
            }
        }
        if !self.battery_drain_scale.is_finite() || self.battery_drain_scale <= 0.0 {
            return Err(RigError::invalid_config(
                "battery_drain_scale must be positive and finite",
            ));
        }
        if !self.cpu_min.is_finite() || !self.cpu_max.is_finite() || self.cpu_min >= self.cpu_max {
            return Err(RigError::invalid_config(
                "cpu window must satisfy min < max",
            ));
        }
        for (name, value) in [
            ("cpu_start", self.cpu_start),
            ("cpu_base", self.cpu_base),
            ("cpu_movement_gain", self.cpu_movement_gain),
        ] {
            if !value.is_finite() {
                return Err(RigError::invalid_config(format!("{name} must be finite")));
            }
        }
        Ok(())
    }
}
