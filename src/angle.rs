//! Angle utilities for full-circle (2π-periodic) gradient orientations.

use std::f32::consts::{PI, TAU};

/// Wraps an angle into the range [0, 2π).
#[inline]
pub fn wrap_two_pi(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can return exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Smallest unsigned difference between two directed angles, in [0, π].
#[inline]
pub fn angular_distance(a: f32, b: f32) -> f32 {
    let diff = wrap_two_pi(a - b);
    if diff > PI {
        TAU - diff
    } else {
        diff
    }
}

/// Maps a wrapped angle to a histogram bin over [0, 2π).
#[inline]
pub(crate) fn angle_to_bin(angle: f32, num_bins: usize) -> usize {
    let idx = (wrap_two_pi(angle) * num_bins as f32 / TAU) as usize;
    idx.min(num_bins - 1)
}
