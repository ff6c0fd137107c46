//! The fixed upper-body joint catalog.
//!
//! 26 joints total: two 7-DOF arms and two 6-DOF hands. Left-arm ranges
//! mirror the right arm with swapped, negated bounds (so for example the
//! left shoulder pitch sweeps `[-3.14, 1.57]` where the right sweeps
//! `[-1.57, 3.14]`); the elbow roll and wrist ranges are symmetric and
//! identical on both sides. Finger joints express normalized closure in
//! `[0.01, 1.0]` rather than radians.
//!
//! Declaration order is part of the contract: telemetry snapshots list
//! joints in exactly this order, stable across calls and sessions.

use crate::JointSpec;

/// Number of joints in the upper-body catalog.
pub const JOINT_COUNT: usize = 26;

/// Lower bound shared by all finger joints (normalized closure).
pub const FINGER_MIN: f64 = 0.01;

/// Upper bound shared by all finger joints (normalized closure).
pub const FINGER_MAX: f64 = 1.0;

const FINGERS: [&str; 6] = [
    "thumb",
    "thumb_rotation",
    "index",
    "middle",
    "ring",
    "pinky",
];

fn joints(entries: &[(&str, f64, f64)]) -> Vec<JointSpec> {
    entries
        .iter()
        .map(|&(name, min, max)| JointSpec::new(name, min, max))
        .collect()
}

fn hand(prefix: &str) -> Vec<JointSpec> {
    FINGERS
        .iter()
        .map(|finger| JointSpec::new(format!("{prefix}_{finger}"), FINGER_MIN, FINGER_MAX))
        .collect()
}

/// The seven right-arm joints, shoulder to wrist.
#[must_use]
pub fn right_arm() -> Vec<JointSpec> {
    joints(&[
        ("right_shoulder_pitch", -1.57, 3.14),
        ("right_shoulder_roll", -3.4, 0.38),
        ("right_shoulder_yaw", -2.66, 3.01),
        ("right_elbow_pitch", -1.6, 2.53),
        ("right_elbow_roll", -2.967, 2.967),
        ("right_wrist_pitch", -0.471, 0.349),
        ("right_wrist_yaw", -1.012, 1.012),
    ])
}

/// The seven left-arm joints, mirrored from the right arm.
#[must_use]
pub fn left_arm() -> Vec<JointSpec> {
    joints(&[
        ("left_shoulder_pitch", -3.14, 1.57),
        ("left_shoulder_roll", -0.38, 3.4),
        ("left_shoulder_yaw", -3.01, 2.66),
        ("left_elbow_pitch", -2.53, 1.6),
        ("left_elbow_roll", -2.967, 2.967),
        ("left_wrist_pitch", -0.471, 0.349),
        ("left_wrist_yaw", -1.012, 1.012),
    ])
}

/// The six right-hand finger joints.
#[must_use]
pub fn right_hand() -> Vec<JointSpec> {
    hand("right")
}

/// The six left-hand finger joints.
#[must_use]
pub fn left_hand() -> Vec<JointSpec> {
    hand("left")
}

/// The full catalog in declaration order: right arm, left arm, right hand,
/// left hand.
#[must_use]
pub fn upper_body() -> Vec<JointSpec> {
    let mut all = right_arm();
    all.extend(left_arm());
    all.extend(right_hand());
    all.extend(left_hand());
    all
}
