// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing curves for tween sequences.
//!
//! Every curve maps a normalized progress `t` in `[0, 1]` to an eased value.
//! Callers clamp `t` before easing; a few curves (spring, back, elastic)
//! intentionally overshoot outside `[0, 1]` for inputs inside it.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

const BACK_C1: f32 = 1.70158;
const BACK_C3: f32 = BACK_C1 + 1.0;

const BOUNCE_N1: f32 = 7.5625;
const BOUNCE_D1: f32 = 2.75;

const ELASTIC_C4: f32 = 2.0 * PI / 3.0;
const ELASTIC_C5: f32 = 2.0 * PI / 4.5;

// Step levels, rounded to six digits.
const STEP1_LEVELS: [f32; 2] = [0.0, 1.0];
const STEP4_LEVELS: [f32; 4] = [0.0, 0.333333, 0.666667, 1.0];
const STEP8_LEVELS: [f32; 8] = [
    0.0, 0.142857, 0.285714, 0.428571, 0.571429, 0.714286, 0.857143, 1.0,
];
const STEP16_LEVELS: [f32; 16] = [
    0.0, 0.066667, 0.133333, 0.2, 0.266667, 0.333333, 0.4, 0.466667, 0.533333, 0.6, 0.666667,
    0.733333, 0.8, 0.866667, 0.933333, 1.0,
];

/// Easing curve applied to a sequence's normalized progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EaseKind {
    /// Constant speed
    #[default]
    Linear,
    /// Quadratic acceleration
    QuadIn,
    /// Quadratic deceleration
    QuadOut,
    /// Quadratic acceleration then deceleration
    QuadInOut,
    /// Cubic acceleration
    CubicIn,
    /// Cubic deceleration
    CubicOut,
    /// Cubic acceleration then deceleration
    CubicInOut,
    /// Damped oscillation that settles past the end value
    Spring,
    /// Pulls back before accelerating
    BackIn,
    /// Overshoots the end before settling
    BackOut,
    /// Bounces off the start
    BounceIn,
    /// Bounces into the end
    BounceOut,
    /// Bounces at both ends
    BounceInOut,
    /// Exponentially growing oscillation
    ElasticIn,
    /// Exponentially decaying oscillation
    ElasticOut,
    /// Elastic at both ends
    ElasticInOut,
    /// Two levels: jumps once at the midpoint
    Step1,
    /// Four evenly spaced levels
    Step4,
    /// Eight evenly spaced levels
    Step8,
    /// Sixteen evenly spaced levels
    Step16,
}

impl EaseKind {
    /// Every curve, in declaration order
    pub const ALL: [EaseKind; 20] = [
        EaseKind::Linear,
        EaseKind::QuadIn,
        EaseKind::QuadOut,
        EaseKind::QuadInOut,
        EaseKind::CubicIn,
        EaseKind::CubicOut,
        EaseKind::CubicInOut,
        EaseKind::Spring,
        EaseKind::BackIn,
        EaseKind::BackOut,
        EaseKind::BounceIn,
        EaseKind::BounceOut,
        EaseKind::BounceInOut,
        EaseKind::ElasticIn,
        EaseKind::ElasticOut,
        EaseKind::ElasticInOut,
        EaseKind::Step1,
        EaseKind::Step4,
        EaseKind::Step8,
        EaseKind::Step16,
    ];

    /// Apply the curve to a normalized progress value
    pub fn ease(self, t: f32) -> f32 {
        match self {
            EaseKind::Linear => t,
            EaseKind::QuadIn => t * t,
            EaseKind::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            EaseKind::QuadInOut => split(t, quad_in_half, quad_out_half),
            EaseKind::CubicIn => t * t * t,
            EaseKind::CubicOut => 1.0 - (1.0 - t).powi(3),
            EaseKind::CubicInOut => split(t, cubic_in_half, cubic_out_half),
            EaseKind::Spring => {
                ((t * PI * (0.2 + 2.5 * t * t * t)).sin() * (1.0 - t).powf(2.2) + t)
                    * (1.0 + 1.2 * (1.0 - t))
            }
            EaseKind::BackIn => BACK_C3 * t * t * t - BACK_C1 * t * t,
            EaseKind::BackOut => {
                let it = t - 1.0;
                1.0 + BACK_C3 * it * it * it + BACK_C1 * it * it
            }
            EaseKind::BounceIn => 1.0 - bounce_out(1.0 - t),
            EaseKind::BounceOut => bounce_out(t),
            EaseKind::BounceInOut => split(t, bounce_in_half, bounce_out_half),
            EaseKind::ElasticIn => elastic_guard(t).unwrap_or_else(|| {
                -(10.0 * t - 10.0).exp2() * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
            }),
            EaseKind::ElasticOut => elastic_guard(t).unwrap_or_else(|| {
                (-10.0 * t).exp2() * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
            }),
            EaseKind::ElasticInOut => elastic_guard(t)
                .unwrap_or_else(|| split(t, elastic_in_half, elastic_out_half)),
            EaseKind::Step1 => staircase(t, &STEP1_LEVELS),
            EaseKind::Step4 => staircase(t, &STEP4_LEVELS),
            EaseKind::Step8 => staircase(t, &STEP8_LEVELS),
            EaseKind::Step16 => staircase(t, &STEP16_LEVELS),
        }
    }

    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            EaseKind::Linear => "Linear",
            EaseKind::QuadIn => "Quad In",
            EaseKind::QuadOut => "Quad Out",
            EaseKind::QuadInOut => "Quad In Out",
            EaseKind::CubicIn => "Cubic In",
            EaseKind::CubicOut => "Cubic Out",
            EaseKind::CubicInOut => "Cubic In Out",
            EaseKind::Spring => "Spring",
            EaseKind::BackIn => "Back In",
            EaseKind::BackOut => "Back Out",
            EaseKind::BounceIn => "Bounce In",
            EaseKind::BounceOut => "Bounce Out",
            EaseKind::BounceInOut => "Bounce In Out",
            EaseKind::ElasticIn => "Elastic In",
            EaseKind::ElasticOut => "Elastic Out",
            EaseKind::ElasticInOut => "Elastic In Out",
            EaseKind::Step1 => "Step 1",
            EaseKind::Step4 => "Step 4",
            EaseKind::Step8 => "Step 8",
            EaseKind::Step16 => "Step 16",
        }
    }
}

/// Free-function form of [`EaseKind::ease`]
pub fn ease(kind: EaseKind, t: f32) -> f32 {
    kind.ease(t)
}

fn bounce_out(t: f32) -> f32 {
    if t < 1.0 / BOUNCE_D1 {
        BOUNCE_N1 * t * t
    } else if t < 2.0 / BOUNCE_D1 {
        let t = t - 1.5 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.75
    } else if t < 2.5 / BOUNCE_D1 {
        let t = t - 2.25 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.984375
    }
}

/// Exact endpoints for the elastic family, whose closed forms are only
/// approximately 0 and 1 at the boundaries.
fn elastic_guard(t: f32) -> Option<f32> {
    if t < f32::EPSILON {
        Some(0.0)
    } else if t > 1.0 - f32::EPSILON {
        Some(1.0)
    } else {
        None
    }
}

/// Quantize `t` into one equal-width band per level. Upper band edges are
/// inclusive.
fn staircase(t: f32, levels: &[f32]) -> f32 {
    let bands = levels.len() as f32;
    let band = ((t * bands).ceil() - 1.0).clamp(0.0, bands - 1.0);
    levels[band as usize]
}

/// First half below 0.5, second half from 0.5 on
fn split(t: f32, first: fn(f32) -> f32, second: fn(f32) -> f32) -> f32 {
    if t < 0.5 {
        first(t)
    } else {
        second(t)
    }
}

fn quad_in_half(t: f32) -> f32 {
    2.0 * t * t
}

fn quad_out_half(t: f32) -> f32 {
    1.0 - (-2.0 * t + 2.0).powi(2) * 0.5
}

fn cubic_in_half(t: f32) -> f32 {
    4.0 * t * t * t
}

fn cubic_out_half(t: f32) -> f32 {
    1.0 - (-2.0 * t + 2.0).powi(3) * 0.5
}

fn bounce_in_half(t: f32) -> f32 {
    (1.0 - bounce_out(1.0 - 2.0 * t)) * 0.5
}

fn bounce_out_half(t: f32) -> f32 {
    (1.0 + bounce_out(2.0 * t - 1.0)) * 0.5
}

fn elastic_in_half(t: f32) -> f32 {
    -(20.0 * t - 10.0).exp2() * ((t * 20.0 - 11.125) * ELASTIC_C5).sin() * 0.5
}

fn elastic_out_half(t: f32) -> f32 {
    (-20.0 * t + 10.0).exp2() * ((t * 20.0 - 11.125) * ELASTIC_C5).sin() * 0.5 + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_linear_is_identity() {
        for i in 0..=100 {
            let t = i as f32 / 100.0;
            assert_eq!(EaseKind::Linear.ease(t), t);
        }
    }

    #[test]
    fn test_power_curve_endpoints() {
        for kind in [
            EaseKind::QuadIn,
            EaseKind::QuadOut,
            EaseKind::QuadInOut,
            EaseKind::CubicIn,
            EaseKind::CubicOut,
            EaseKind::CubicInOut,
        ] {
            assert_eq!(kind.ease(0.0), 0.0, "{kind:?} at 0");
            assert_eq!(kind.ease(1.0), 1.0, "{kind:?} at 1");
        }
        assert!(approx(EaseKind::QuadIn.ease(0.5), 0.25));
        assert!(approx(EaseKind::CubicOut.ease(0.5), 0.875));
    }

    #[test]
    fn test_in_out_curves_are_continuous_at_midpoint() {
        let halves: [(EaseKind, fn(f32) -> f32); 4] = [
            (EaseKind::QuadInOut, quad_in_half),
            (EaseKind::CubicInOut, cubic_in_half),
            (EaseKind::BounceInOut, bounce_in_half),
            (EaseKind::ElasticInOut, elastic_in_half),
        ];
        for (kind, first_half) in halves {
            let left = first_half(0.5);
            let mid = kind.ease(0.5);
            assert!(
                approx(left, mid),
                "{kind:?} jumps at the midpoint: {left} vs {mid}"
            );
        }
        assert!(approx(EaseKind::QuadInOut.ease(0.5), 0.5));
        assert!(approx(EaseKind::CubicInOut.ease(0.5), 0.5));
        assert!(approx(EaseKind::BounceInOut.ease(0.5), 0.5));
        assert!(approx(EaseKind::ElasticInOut.ease(0.5), 0.5));
    }

    #[test]
    fn test_back_curves_overshoot() {
        assert!(EaseKind::BackIn.ease(0.2) < 0.0);
        assert!(EaseKind::BackOut.ease(0.8) > 1.0);
        assert!(approx(EaseKind::BackIn.ease(1.0), 1.0));
        assert!(approx(EaseKind::BackOut.ease(0.0), 0.0));
    }

    #[test]
    fn test_spring_endpoints() {
        assert!(approx(EaseKind::Spring.ease(0.0), 0.0));
        assert!(approx(EaseKind::Spring.ease(1.0), 1.0));
    }

    #[test]
    fn test_bounce_segments() {
        assert_eq!(EaseKind::BounceOut.ease(0.0), 0.0);
        assert!(approx(EaseKind::BounceOut.ease(1.0), 1.0));
        assert!(approx(EaseKind::BounceIn.ease(0.0), 0.0));
        assert!(approx(EaseKind::BounceIn.ease(1.0), 1.0));
        // First breakpoint lands on the floor.
        assert!(approx(EaseKind::BounceOut.ease(1.0 / 2.75), 1.0));
        assert!(approx(EaseKind::BounceOut.ease(1.5 / 2.75), 0.75));
    }

    #[test]
    fn test_elastic_exact_endpoints() {
        for kind in [EaseKind::ElasticIn, EaseKind::ElasticOut, EaseKind::ElasticInOut] {
            assert_eq!(kind.ease(0.0), 0.0);
            assert_eq!(kind.ease(1.0), 1.0);
            assert!(kind.ease(0.5).is_finite());
        }
    }

    #[test]
    fn test_step_levels() {
        assert_eq!(EaseKind::Step1.ease(0.5), 0.0);
        assert_eq!(EaseKind::Step1.ease(0.51), 1.0);

        assert_eq!(EaseKind::Step4.ease(0.0), 0.0);
        assert_eq!(EaseKind::Step4.ease(0.25), 0.0);
        assert!(approx(EaseKind::Step4.ease(0.3), 1.0 / 3.0));
        assert!(approx(EaseKind::Step4.ease(0.75), 2.0 / 3.0));
        assert_eq!(EaseKind::Step4.ease(0.9), 1.0);

        assert!(approx(EaseKind::Step8.ease(0.2), 1.0 / 7.0));
        assert_eq!(EaseKind::Step8.ease(1.0), 1.0);

        assert!(approx(EaseKind::Step16.ease(0.1), 1.0 / 15.0));
        assert_eq!(EaseKind::Step16.ease(0.0625), 0.0);
        assert_eq!(EaseKind::Step16.ease(1.0), 1.0);

        assert_eq!(EaseKind::Step4.ease(0.4), 0.333333);
        assert_eq!(EaseKind::Step8.ease(0.3), 0.285714);
        assert_eq!(EaseKind::Step16.ease(0.5), 0.466667);
    }

    #[test]
    fn test_all_curves_reach_the_end() {
        for kind in EaseKind::ALL {
            assert!(approx(ease(kind, 1.0), 1.0), "{} ends at {}", kind.name(), ease(kind, 1.0));
        }
    }
}
