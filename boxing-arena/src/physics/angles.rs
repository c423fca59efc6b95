//! Joint angle calculation using dot product
//!
//! Calculates the interior angle at a joint from the two bones meeting there,
//! e.g. shoulder→elbow (upper arm) and elbow→wrist (forearm).

/// Bones shorter than this (pixels) make the angle undefined
const MIN_BONE_LENGTH: f32 = 0.0001;

/// Calculate the interior angle at `b` in degrees for the chain `a`-`b`-`c`
///
/// Uses dot product formula: cos(θ) = (v1 · v2) / (|v1| × |v2|)
///
/// Returns angle in degrees:
/// - 0° = fully folded (`c` back on top of `a`)
/// - 90° = right angle
/// - 180° = fully straight
///
/// Returns `None` when either bone has zero length (duplicated keypoint),
/// so callers can skip the rule instead of comparing against NaN.
pub fn joint_angle(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> Option<f32> {
    // Vector from joint to first point
    let v1 = (a.0 - b.0, a.1 - b.1);

    // Vector from joint to second point
    let v2 = (c.0 - b.0, c.1 - b.1);

    let dot = v1.0 * v2.0 + v1.1 * v2.1;

    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();

    if !(mag1 >= MIN_BONE_LENGTH && mag2 >= MIN_BONE_LENGTH) {
        return None;
    }

    // Clamp: floating-point drift can push |cos| slightly past 1
    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);

    Some(cos_angle.acos().to_degrees())
}

/// Elbow angle for one arm (shoulder, elbow, wrist)
pub fn elbow_angle(shoulder: (f32, f32), elbow: (f32, f32), wrist: (f32, f32)) -> Option<f32> {
    joint_angle(shoulder, elbow, wrist)
}
