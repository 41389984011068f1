//! Rotation vector to tilt conversion.

use crate::models::Tilt;

/// Builds the 3×3 row-major rotation matrix for a unit quaternion rotation
/// vector `(x, y, z[, w])`.
///
/// When `w` is missing it is recovered from the other three components.
/// Fewer than three components yield the identity.
#[must_use]
pub fn rotation_matrix(vector: &[f32]) -> [f32; 9] {
    let [q1, q2, q3] = match vector {
        [x, y, z, ..] => [*x, *y, *z],
        _ => return [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };
    let q0 = vector
        .get(3)
        .copied()
        .unwrap_or_else(|| (1.0 - q1 * q1 - q2 * q2 - q3 * q3).max(0.0).sqrt());

    let sq_q1 = 2.0 * q1 * q1;
    let sq_q2 = 2.0 * q2 * q2;
    let sq_q3 = 2.0 * q3 * q3;
    let q1_q2 = 2.0 * q1 * q2;
    let q3_q0 = 2.0 * q3 * q0;
    let q1_q3 = 2.0 * q1 * q3;
    let q2_q0 = 2.0 * q2 * q0;
    let q2_q3 = 2.0 * q2 * q3;
    let q1_q0 = 2.0 * q1 * q0;

    [
        1.0 - sq_q2 - sq_q3,
        q1_q2 - q3_q0,
        q1_q3 + q2_q0,
        q1_q2 + q3_q0,
        1.0 - sq_q1 - sq_q3,
        q2_q3 - q1_q0,
        q1_q3 - q2_q0,
        q2_q3 + q1_q0,
        1.0 - sq_q1 - sq_q2,
    ]
}

/// Converts a rotation vector sample into `(roll, pitch)` tilt.
///
/// Near ±90° pitch the roll becomes unstable (gimbal lock). That is left
/// as is.
///
/// # Examples
///
/// ```
/// use asmr_keyboard::models::Tilt;
/// use asmr_keyboard::sensor::tilt_from_rotation_vector;
///
/// // Identity rotation: device flat, no tilt
/// assert_eq!(tilt_from_rotation_vector(&[0.0, 0.0, 0.0, 1.0]), Tilt::ZERO);
/// ```
#[must_use]
pub fn tilt_from_rotation_vector(vector: &[f32]) -> Tilt {
    let r = rotation_matrix(vector);
    // asin is undefined outside [-1, 1]; rounding can push |R[7]| just past 1
    let pitch = (-r[7]).clamp(-1.0, 1.0).asin();
    let roll = (-r[6]).atan2(r[8]);
    Tilt::new(roll, pitch)
}

/// The rotation vector for a device pitched by `pitch` about X then rolled
/// by `roll` about Y.
///
/// Inverse of [`tilt_from_rotation_vector`] away from gimbal lock; used by
/// the simulated sensor and by tests.
#[must_use]
pub fn rotation_vector_from_tilt(tilt: Tilt) -> [f32; 4] {
    // q = q_x(-pitch) * q_y(roll)
    let (sp, cp) = (-tilt.y / 2.0).sin_cos();
    let (sr, cr) = (tilt.x / 2.0).sin_cos();
    [sp * cr, cp * sr, sp * sr, cp * cr]
}
