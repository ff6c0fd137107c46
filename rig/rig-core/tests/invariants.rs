//! Whole-engine invariant and scenario tests.
//!
//! These drive the engine exactly the way a transport loop would (repeated
//! `advance` calls with varying timesteps) and assert the numeric
//! guarantees the telemetry contract promises.

use approx::assert_relative_eq;
use rig_core::Engine;
use rig_types::catalog;

/// Every clamp holds after every call, for a spread of step sizes.
#[test]
fn clamps_hold_for_all_step_sizes() {
    let steps = [0.001, 0.01, 0.033, 0.1, 0.5, 50.0, 0.0, -1.0];
    let mut engine = Engine::seeded(11);

    for round in 0..200 {
        engine.advance(steps[round % steps.len()]);

        for joint in engine.joints() {
            let spec = joint.spec();
            assert!(joint.q() >= spec.min && joint.q() <= spec.max);
            assert!(joint.target() >= spec.min && joint.target() <= spec.max);
            assert!(joint.dq().abs() <= engine.config().motion.max_velocity + 1e-12);
            assert!(joint.temperature() >= 35.0 && joint.temperature() <= 75.0);
        }
        assert!(engine.battery() >= 0.0 && engine.battery() <= 100.0);
        assert!(engine.cpu() >= 5.0 && engine.cpu() <= 95.0);
    }
}

/// Battery only ever falls over a session.
#[test]
fn battery_is_non_increasing() {
    let mut engine = Engine::seeded(12);
    let mut previous = engine.battery();
    for _ in 0..500 {
        engine.advance(0.1);
        assert!(engine.battery() <= previous);
        previous = engine.battery();
    }
    // 50 simulated seconds of activity must have cost something.
    assert!(engine.battery() < 100.0);
}

/// Tick is 0 before any call and increments by exactly one per call,
/// regardless of how wild the supplied timestep is.
#[test]
fn tick_increments_once_per_advance() {
    let mut engine = Engine::seeded(13);
    assert_eq!(engine.tick(), 0);
    for expected in 1..=50u64 {
        engine.advance(if expected % 2 == 0 { 50.0 } else { 0.0 });
        assert_eq!(engine.tick(), expected);
    }
}

/// Snapshots are pure reads: two without an intervening advance are equal.
#[test]
fn snapshot_is_idempotent() {
    let mut engine = Engine::seeded(14);
    for _ in 0..25 {
        engine.advance(0.1);
    }
    assert_eq!(engine.snapshot(), engine.snapshot());
}

/// An extreme timestep spike behaves exactly like the clamp ceiling.
#[test]
fn extreme_timestep_equals_clamped_timestep() {
    let mut spiked = Engine::seeded(15);
    let mut clamped = Engine::seeded(15);
    for _ in 0..100 {
        spiked.advance(50.0);
        clamped.advance(0.1);
    }
    assert_eq!(spiked.snapshot(), clamped.snapshot());
}

/// A zero (or negative) timestep behaves exactly like the clamp floor.
#[test]
fn degenerate_timestep_equals_minimum_timestep() {
    let mut zero = Engine::seeded(16);
    let mut floor = Engine::seeded(16);
    for _ in 0..100 {
        zero.advance(0.0);
        floor.advance(0.001);
    }
    assert_eq!(zero.snapshot(), floor.snapshot());
}

/// Fresh-session scenario: the documented starting state, via snapshot.
#[test]
fn fresh_session_snapshot() {
    let engine = Engine::seeded(17);
    let snapshot = engine.snapshot();

    assert_eq!(snapshot.tick, 0);
    assert_eq!(snapshot.battery, 100.0);
    assert_eq!(snapshot.cpu, 10.0);
    assert_eq!(snapshot.joints.len(), catalog::JOINT_COUNT);

    let specs = catalog::upper_body();
    for (reading, spec) in snapshot.joints.iter().zip(&specs) {
        assert_eq!(reading.name, spec.name);
        assert_eq!(reading.min, spec.min);
        assert_eq!(reading.max, spec.max);
        assert_eq!(reading.dq, 0.0);
        assert_eq!(reading.temperature, 35.0);
        // Midpoint survives the 3-decimal presentation rounding.
        assert_relative_eq!(reading.q, spec.midpoint(), epsilon = 5e-4);
    }
}

/// Joint order in snapshots matches catalog declaration order, every time.
#[test]
fn snapshot_order_is_stable() {
    let mut engine = Engine::seeded(18);
    let names: Vec<String> = catalog::upper_body().into_iter().map(|s| s.name).collect();
    for _ in 0..20 {
        engine.advance(0.1);
        let snapshot = engine.snapshot();
        let got: Vec<&str> = snapshot.joints.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(got, names.iter().map(String::as_str).collect::<Vec<_>>());
    }
}

/// Soak: a thousand steps produce no NaN/Inf anywhere and keep every clamp.
#[test]
fn thousand_step_soak_stays_finite() {
    let mut engine = Engine::seeded(19);
    for _ in 0..1000 {
        engine.advance(0.1);
        engine.check_finite().expect("state must stay finite");
    }
    let snapshot = engine.snapshot();
    assert!(snapshot.is_finite());
    assert!(snapshot.battery >= 0.0 && snapshot.battery <= 100.0);
    assert!(snapshot.cpu >= 5.0 && snapshot.cpu <= 95.0);
    for reading in &snapshot.joints {
        assert!(reading.q >= reading.min && reading.q <= reading.max);
        assert!(reading.temperature >= 35.0 && reading.temperature <= 75.0);
    }
}

/// Two engines with the same seed walk the same trajectory; different
/// seeds diverge. Randomness is fully injectable.
#[test]
fn seeds_determine_trajectories() {
    let mut a = Engine::seeded(20);
    let mut b = Engine::seeded(20);
    let mut c = Engine::seeded(21);
    for _ in 0..200 {
        a.advance(0.1);
        b.advance(0.1);
        c.advance(0.1);
    }
    assert_eq!(a.snapshot(), b.snapshot());
    assert_ne!(a.snapshot(), c.snapshot());
}

/// Sessions are independent: advancing one engine never touches another.
#[test]
fn sessions_are_isolated() {
    let mut active = Engine::seeded(22);
    let idle = Engine::seeded(22);
    let before = idle.snapshot();
    for _ in 0..50 {
        active.advance(0.1);
    }
    assert_eq!(idle.snapshot(), before);
    assert_ne!(active.snapshot(), before);
}
