//! Per-joint motion and thermal model.
//!
//! A [`JointModel`] owns the complete state of one 1-DOF joint and advances
//! it by bounded time increments. Each step runs four stages in order:
//!
//! 1. **Retargeting** - a countdown timer; on expiry a new target is drawn
//!    with a midrange-biased scheme and the countdown resets.
//! 2. **Motion** - a velocity/acceleration-bounded approach toward the
//!    target with a linear slowdown band near it. Not a full trapezoidal
//!    planner; it just looks like one from the outside.
//! 3. **Limits** - positions leaving the range are clamped and the velocity
//!    zeroed (inelastic stop, no bounce).
//! 4. **Torque + thermal** - a lumped-parameter torque estimate feeds a
//!    heat/cooling balance clamped to the allowed temperature window.

use rand::Rng;
use rig_types::{JointSpec, MotionConfig, SimConfig};

/// Three-way sign with an explicit zero case.
///
/// `f64::signum` maps `±0.0` to `±1.0`; here a zero input means "no
/// direction", so it maps to `0.0`. The zero case is only reachable when a
/// distance or velocity difference is exactly zero, where a zero step and
/// "no direction change" coincide.
fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// State and stepping logic for a single joint.
///
/// Positions start at the spec midpoint with zero velocity; the first
/// retarget countdown is drawn from the configured initial window so that
/// joints created together do not change targets in lockstep.
#[derive(Debug, Clone)]
pub struct JointModel {
    spec: JointSpec,
    q: f64,
    dq: f64,
    target_q: f64,
    tau_est: f64,
    temperature: f64,
    retarget_in: f64,
}

impl JointModel {
    /// Create a joint at its neutral position.
    ///
    /// The initial retarget countdown is drawn from
    /// `[initial_delay_min, initial_delay_max)` using the supplied source.
    pub fn new<R: Rng>(spec: JointSpec, config: &SimConfig, rng: &mut R) -> Self {
        let q = spec.midpoint();
        let retarget_in =
            rng.gen_range(config.retarget.initial_delay_min..config.retarget.initial_delay_max);
        Self {
            q,
            dq: 0.0,
            target_q: q,
            tau_est: 0.0,
            temperature: config.thermal.min_temperature,
            retarget_in,
            spec,
        }
    }

    /// The immutable spec this joint was built from.
    #[must_use]
    pub fn spec(&self) -> &JointSpec {
        &self.spec
    }

    /// Current position.
    #[must_use]
    pub fn q(&self) -> f64 {
        self.q
    }

    /// Current velocity.
    #[must_use]
    pub fn dq(&self) -> f64 {
        self.dq
    }

    /// Current target position.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target_q
    }

    /// Latest torque estimate.
    #[must_use]
    pub fn tau_est(&self) -> f64 {
        self.tau_est
    }

    /// Current temperature in °C.
    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Seconds until the next scheduled target change.
    #[must_use]
    pub fn retarget_in(&self) -> f64 {
        self.retarget_in
    }

    /// Command a target position directly, clamped into the joint range.
    ///
    /// The scheduled countdown keeps running; the commanded target holds
    /// until it expires.
    pub fn set_target(&mut self, target: f64) {
        self.target_q = self.spec.clamp(target);
    }

    /// Check that every state value is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.q.is_finite()
            && self.dq.is_finite()
            && self.target_q.is_finite()
            && self.tau_est.is_finite()
            && self.temperature.is_finite()
            && self.retarget_in.is_finite()
    }

    /// Advance this joint by `dt` seconds.
    ///
    /// `dt` is sanitized through [`SimConfig::clamp_timestep`], so any
    /// caller-supplied value is safe; out-of-range steps are silently
    /// clamped rather than rejected.
    pub fn step<R: Rng>(&mut self, dt: f64, config: &SimConfig, rng: &mut R) {
        let dt = config.clamp_timestep(dt);
        self.retarget(dt, config, rng);
        let applied = self.integrate_motion(dt, &config.motion);
        self.tau_est = config.motion.inertia * applied / dt + config.motion.damping * self.dq;
        let heating = config.thermal.heat_rate * self.tau_est.abs();
        let cooling = config.thermal.cooling_rate * (config.thermal.ambient - self.temperature);
        self.temperature = config
            .thermal
            .clamp(self.temperature + (heating + cooling) * dt);
    }

    /// Count down to the next target change and draw one when due.
    ///
    /// Targets are drawn with a self-normalizing additive bias: a uniform
    /// sample in `[0, 1]` is nudged by a uniform bias in `[-b, b]` and
    /// renormalized by `1 + |bias|`. This clusters targets toward midrange
    /// more often than toward the extremes. It is an approximation, not a
    /// calibrated probability distribution, chosen for how the resulting
    /// motion looks, not for statistical properties.
    fn retarget<R: Rng>(&mut self, dt: f64, config: &SimConfig, rng: &mut R) {
        self.retarget_in -= dt;
        if self.retarget_in > 0.0 {
            return;
        }

        let bias = rng.gen_range(-config.retarget.midrange_bias..=config.retarget.midrange_bias);
        let sample = rng.gen_range(0.0..1.0);
        let normalized = ((sample + bias) / (1.0 + bias.abs())).clamp(0.0, 1.0);
        self.target_q = self.spec.denormalize(normalized);
        self.retarget_in = rng.gen_range(config.retarget.delay_min..config.retarget.delay_max);
    }

    /// Run the bounded motion profile and return the applied velocity change.
    ///
    /// Desired speed is full `max_velocity` toward the target until the
    /// remaining distance enters the approach band, where it ramps linearly
    /// to zero. The velocity change per step is capped by
    /// `max_acceleration * dt`; position integrates with the new velocity.
    /// A position leaving the range is clamped with the velocity zeroed.
    fn integrate_motion(&mut self, dt: f64, motion: &MotionConfig) -> f64 {
        let distance = self.target_q - self.q;
        let desired = if distance.abs() > motion.approach_distance {
            motion.max_velocity * sign(distance)
        } else {
            motion.max_velocity * distance / motion.approach_distance
        };

        let diff = desired - self.dq;
        let max_delta = motion.max_acceleration * dt;
        let applied = if diff.abs() > max_delta {
            max_delta * sign(diff)
        } else {
            diff
        };

        self.dq += applied;
        self.q += self.dq * dt;

        if self.q < self.spec.min {
            self.q = self.spec.min;
            self.dq = 0.0;
        } else if self.q > self.spec.max {
            self.q = self.spec.max;
            self.dq = 0.0;
        }

        applied
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use rig_types::RetargetConfig;

    /// Config whose retarget windows are far beyond any test horizon, so a
    /// commanded target stays put.
    fn quiet_config() -> SimConfig {
        SimConfig::default().retarget(RetargetConfig {
            initial_delay_min: 1.0e8,
            initial_delay_max: 1.0e9,
            delay_min: 1.0e8,
            delay_max: 1.0e9,
            ..RetargetConfig::default()
        })
    }

    fn elbow(config: &SimConfig, rng: &mut SmallRng) -> JointModel {
        JointModel::new(JointSpec::new("right_elbow_pitch", -1.6, 2.53), config, rng)
    }

    #[test]
    fn test_sign_zero_case() {
        assert_eq!(sign(3.0), 1.0);
        assert_eq!(sign(-3.0), -1.0);
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
    }

    #[test]
    fn test_starts_at_midpoint_and_ambient_floor() {
        let config = SimConfig::default();
        let mut rng = SmallRng::seed_from_u64(1);
        let joint = elbow(&config, &mut rng);
        assert_relative_eq!(joint.q(), 0.465, epsilon = 1e-12);
        assert_eq!(joint.dq(), 0.0);
        assert_eq!(joint.temperature(), 35.0);
        assert!(joint.retarget_in() >= config.retarget.initial_delay_min);
    }

    #[test]
    fn test_stationary_joint_stays_put() {
        let config = quiet_config();
        let mut rng = SmallRng::seed_from_u64(2);
        let mut joint = elbow(&config, &mut rng);
        for _ in 0..100 {
            joint.step(0.1, &config, &mut rng);
        }
        // Target equals position, so nothing moves; the only thermal
        // activity is passive drift from the 35.0 floor toward ambient 36.
        assert_relative_eq!(joint.q(), 0.465, epsilon = 1e-12);
        assert_eq!(joint.dq(), 0.0);
        assert!(joint.temperature() > 35.0);
        assert!(joint.temperature() < 36.0);
    }

    #[test]
    fn test_accelerates_then_cruises_at_max_velocity() {
        let config = quiet_config();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut joint = elbow(&config, &mut rng);
        joint.set_target(2.53);

        let mut peak = 0.0f64;
        for _ in 0..40 {
            joint.step(0.1, &config, &mut rng);
            assert!(joint.dq() <= config.motion.max_velocity + 1e-12);
            peak = peak.max(joint.dq());
        }
        // 0.5 rad/s at 0.2 rad/s² takes 2.5 s; 4 s in we must be cruising.
        assert_relative_eq!(peak, config.motion.max_velocity, epsilon = 1e-9);
    }

    #[test]
    fn test_settles_on_limit_without_residual_velocity() {
        let config = quiet_config();
        let mut rng = SmallRng::seed_from_u64(4);
        let mut joint = elbow(&config, &mut rng);
        joint.set_target(2.53);

        for _ in 0..200 {
            joint.step(0.1, &config, &mut rng);
            assert!(joint.q() <= 2.53);
        }
        assert_eq!(joint.q(), 2.53);
        assert_eq!(joint.dq(), 0.0);
    }

    #[test]
    fn test_interior_target_smooth_stop() {
        let config = quiet_config();
        let mut rng = SmallRng::seed_from_u64(5);
        let mut joint = elbow(&config, &mut rng);
        // Close enough that the approach band governs the whole move.
        joint.set_target(joint.q() + 0.05);
        let target = joint.target();

        for _ in 0..400 {
            joint.step(0.05, &config, &mut rng);
        }
        assert_relative_eq!(joint.q(), target, epsilon = 1e-6);
        assert!(joint.dq().abs() < 1e-6);
    }

    #[test]
    fn test_limits_hold_under_extreme_dt() {
        let config = quiet_config();
        let mut rng = SmallRng::seed_from_u64(6);
        let mut joint = JointModel::new(
            JointSpec::new("right_wrist_pitch", -0.471, 0.349),
            &config,
            &mut rng,
        );
        joint.set_target(0.349);
        for _ in 0..1000 {
            // 50 s steps clamp down to 0.1 s; nothing escapes the range.
            joint.step(50.0, &config, &mut rng);
            assert!(joint.q() >= -0.471 && joint.q() <= 0.349);
            assert!(joint.temperature() >= 35.0 && joint.temperature() <= 75.0);
            assert!(joint.is_finite());
        }
    }

    #[test]
    fn test_retarget_stays_in_range() {
        // Fast retargeting: a new target every step, always inside bounds.
        let config = SimConfig::default().retarget(RetargetConfig {
            initial_delay_min: 0.001,
            initial_delay_max: 0.002,
            delay_min: 0.001,
            delay_max: 0.002,
            ..RetargetConfig::default()
        });
        let mut rng = SmallRng::seed_from_u64(7);
        let mut joint = elbow(&config, &mut rng);
        for _ in 0..500 {
            joint.step(0.1, &config, &mut rng);
            assert!(joint.target() >= -1.6 && joint.target() <= 2.53);
            assert!(joint.retarget_in() > 0.0);
        }
    }

    #[test]
    fn test_heat_rises_under_motion() {
        let config = quiet_config();
        let mut rng = SmallRng::seed_from_u64(8);
        let mut joint = elbow(&config, &mut rng);
        joint.set_target(2.53);
        for _ in 0..30 {
            joint.step(0.1, &config, &mut rng);
        }
        assert!(joint.temperature() > 35.0);
        assert!(joint.temperature() <= 75.0);
    }
}
