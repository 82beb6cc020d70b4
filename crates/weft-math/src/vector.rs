//! Guarded vector helpers.
//!
//! Coincident point masses and points sitting exactly at a sphere center
//! produce zero-length vectors; every normalization in the core goes
//! through [`unit_or_zero`] so those cases yield a zero correction.

use glam::Vec3;
use weft_types::constants::EPSILON;

/// Unit vector along `v`, or the zero vector if `v` has (near) zero length.
#[inline]
pub fn unit_or_zero(v: Vec3) -> Vec3 {
    let len_sq = v.length_squared();
    if len_sq <= EPSILON || !len_sq.is_finite() {
        Vec3::ZERO
    } else {
        v / len_sq.sqrt()
    }
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    (a - b).length()
}

/// Integer cell coordinate of `value` in a grid of cells `size` wide.
///
/// Non-positive sizes collapse everything into cell 0.
#[inline]
pub fn cell_index(value: f32, size: f32) -> i64 {
    if size <= 0.0 || !size.is_finite() {
        return 0;
    }
    (value / size).floor() as i64
}
