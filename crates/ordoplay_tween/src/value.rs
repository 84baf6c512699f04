// SPDX-License-Identifier: MIT OR Apache-2.0
//! Channel values and interpolation helpers.

use serde::{Deserialize, Serialize};

/// Shape of the value a property channel carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueShape {
    /// On/off flag
    Flag,
    /// Three components (position, Euler rotation, scale)
    Vec3,
    /// Four components (RGBA color)
    Vec4,
    /// Single float (alpha)
    Scalar,
}

/// A concrete value read from or written to a target channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChannelValue {
    /// Enabled flag
    Flag(bool),
    /// Position, Euler angles in degrees, or scale
    Vec3([f32; 3]),
    /// RGBA color
    Color([f32; 4]),
    /// Alpha
    Scalar(f32),
}

impl ChannelValue {
    /// Shape of this value
    pub fn shape(&self) -> ValueShape {
        match self {
            ChannelValue::Flag(_) => ValueShape::Flag,
            ChannelValue::Vec3(_) => ValueShape::Vec3,
            ChannelValue::Color(_) => ValueShape::Vec4,
            ChannelValue::Scalar(_) => ValueShape::Scalar,
        }
    }

    /// Get as Vec3 if possible
    pub fn as_vec3(&self) -> Option<[f32; 3]> {
        match self {
            ChannelValue::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as color if possible
    pub fn as_color(&self) -> Option<[f32; 4]> {
        match self {
            ChannelValue::Color(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as scalar if possible
    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            ChannelValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }
}

/// Interpolation utilities
pub struct Interpolation;

impl Interpolation {
    /// Linear interpolation between two floats. `t` is not clamped here;
    /// sequences clamp progress before blending.
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Interpolate Vec3
    pub fn lerp_vec3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
        [
            Self::lerp(a[0], b[0], t),
            Self::lerp(a[1], b[1], t),
            Self::lerp(a[2], b[2], t),
        ]
    }

    /// Interpolate Vec4
    pub fn lerp_vec4(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
        [
            Self::lerp(a[0], b[0], t),
            Self::lerp(a[1], b[1], t),
            Self::lerp(a[2], b[2], t),
            Self::lerp(a[3], b[3], t),
        ]
    }

    /// Offset `origin` by `delta` scaled by `t`
    pub fn offset_vec3(origin: [f32; 3], delta: [f32; 3], t: f32) -> [f32; 3] {
        [
            origin[0] + delta[0] * t,
            origin[1] + delta[1] * t,
            origin[2] + delta[2] * t,
        ]
    }
}

/// First three components of an authored 4-component value
pub(crate) fn truncate(v: [f32; 4]) -> [f32; 3] {
    [v[0], v[1], v[2]]
}
