//! Easing functions for the toolbar slide animation.
//!
//! Easing functions map a linear progress value (0.0 to 1.0) to a transformed
//! value. Every function here is monotonic and maps 0.0 to exactly 0.0 and
//! 1.0 to exactly 1.0, so a slide always ends precisely on its target.

use std::f32::consts::PI;

/// Available easing functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (starts slow, accelerates).
    EaseIn,
    /// Quadratic ease-out (starts fast, decelerates).
    EaseOut,
    /// Sinusoidal ease-in-out.
    EaseInOutSine,
    /// Hermite smoothstep, `3t² − 2t³`. Used for toolbar slides.
    #[default]
    SmoothStep,
}

/// Apply an easing function to a progress value.
///
/// Input is clamped to `0.0..=1.0`.
///
/// # Example
///
/// ```
/// use horizon_dock_core::easing::{ease, Easing};
///
/// assert_eq!(ease(Easing::Linear, 0.5), 0.5);
/// assert_eq!(ease(Easing::SmoothStep, 1.0), 1.0);
/// assert!(ease(Easing::EaseIn, 0.5) < 0.5);
/// ```
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::EaseIn => t * t,
        Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        Easing::EaseInOutSine => ease_in_out_sine(t),
        Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
    }
}

/// Interpolate between two values using an easing function.
///
/// Returns `start` at `t <= 0` and `end` at `t >= 1` exactly.
#[inline]
pub fn lerp_eased(easing: Easing, start: f32, end: f32, t: f32) -> f32 {
    if t <= 0.0 {
        return start;
    }
    if t >= 1.0 {
        return end;
    }
    start + (end - start) * ease(easing, t)
}

#[inline]
fn ease_in_out_sine(t: f32) -> f32 {
    // cos rounding can leave tiny residue at the ends
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        -((PI * t).cos() - 1.0) / 2.0
    }
}
