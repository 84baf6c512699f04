// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property targets and their capability facets.
//!
//! A target is a host-owned entity. The engine never touches it directly;
//! at init time it asks the target for the one facet a sequence's
//! [`PropertyKind`] needs and keeps that handle until the next init.
//! Facet setters take `&self`, so hosts use interior mutability.

use crate::property::{PropertyKind, Space};
use crate::value::ChannelValue;
use std::fmt;
use std::rc::Rc;

/// Shared handle to a host entity
pub type TargetHandle = Rc<dyn PropertyTarget>;

/// Enabled flag capability
pub trait EnableFacet {
    /// Whether the entity is enabled
    fn is_enabled(&self) -> bool;
    /// Enable or disable the entity
    fn set_enabled(&self, enabled: bool);
}

/// Translation capability
pub trait PositionFacet {
    /// Current position in `space`
    fn position(&self, space: Space) -> [f32; 3];
    /// Set the position in `space`
    fn set_position(&self, space: Space, position: [f32; 3]);
}

/// Orientation capability, exchanged as Euler angles in degrees.
///
/// The host composes the angles into whatever orientation representation
/// it stores.
pub trait RotationFacet {
    /// Current orientation in `space`
    fn euler_angles(&self, space: Space) -> [f32; 3];
    /// Set the orientation in `space`
    fn set_euler_angles(&self, space: Space, angles: [f32; 3]);
}

/// Local scale capability
pub trait ScaleFacet {
    /// Current local scale
    fn scale(&self) -> [f32; 3];
    /// Set the local scale
    fn set_scale(&self, scale: [f32; 3]);
}

/// RGBA color capability
pub trait ColorFacet {
    /// Current color
    fn color(&self) -> [f32; 4];
    /// Set the color
    fn set_color(&self, color: [f32; 4]);
}

/// Scalar opacity capability
pub trait AlphaFacet {
    /// Current alpha
    fn alpha(&self) -> f32;
    /// Set the alpha
    fn set_alpha(&self, alpha: f32);
}

/// A host entity that can be animated.
///
/// Each resolver returns `None` when the entity lacks that capability.
pub trait PropertyTarget {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Resolve the enabled flag facet
    fn enable_facet(self: Rc<Self>) -> Option<Rc<dyn EnableFacet>> {
        None
    }

    /// Resolve the position facet
    fn position_facet(self: Rc<Self>) -> Option<Rc<dyn PositionFacet>> {
        None
    }

    /// Resolve the rotation facet
    fn rotation_facet(self: Rc<Self>) -> Option<Rc<dyn RotationFacet>> {
        None
    }

    /// Resolve the scale facet
    fn scale_facet(self: Rc<Self>) -> Option<Rc<dyn ScaleFacet>> {
        None
    }

    /// Resolve the color facet
    fn color_facet(self: Rc<Self>) -> Option<Rc<dyn ColorFacet>> {
        None
    }

    /// Resolve the alpha facet
    fn alpha_facet(self: Rc<Self>) -> Option<Rc<dyn AlphaFacet>> {
        None
    }
}

/// A facet resolved for one property kind
#[derive(Clone)]
pub(crate) enum Facet {
    Enable(Rc<dyn EnableFacet>),
    Position(Rc<dyn PositionFacet>, Space),
    Rotation(Rc<dyn RotationFacet>, Space),
    Scale(Rc<dyn ScaleFacet>),
    Color(Rc<dyn ColorFacet>),
    Alpha(Rc<dyn AlphaFacet>),
}

impl Facet {
    /// Resolve the facet `kind` needs on `target`
    pub(crate) fn resolve(target: &TargetHandle, kind: PropertyKind) -> Option<Self> {
        let target = Rc::clone(target);
        match kind {
            PropertyKind::Enabled => target.enable_facet().map(Facet::Enable),
            PropertyKind::Position(space) => {
                target.position_facet().map(|f| Facet::Position(f, space))
            }
            PropertyKind::Rotation(space) => {
                target.rotation_facet().map(|f| Facet::Rotation(f, space))
            }
            PropertyKind::Scale => target.scale_facet().map(Facet::Scale),
            PropertyKind::Color => target.color_facet().map(Facet::Color),
            PropertyKind::Alpha => target.alpha_facet().map(Facet::Alpha),
        }
    }

    /// Read the current value
    pub(crate) fn read(&self) -> ChannelValue {
        match self {
            Facet::Enable(f) => ChannelValue::Flag(f.is_enabled()),
            Facet::Position(f, space) => ChannelValue::Vec3(f.position(*space)),
            Facet::Rotation(f, space) => ChannelValue::Vec3(f.euler_angles(*space)),
            Facet::Scale(f) => ChannelValue::Vec3(f.scale()),
            Facet::Color(f) => ChannelValue::Color(f.color()),
            Facet::Alpha(f) => ChannelValue::Scalar(f.alpha()),
        }
    }

    /// Write a value; values of the wrong shape are dropped
    pub(crate) fn write(&self, value: ChannelValue) {
        match (self, value) {
            (Facet::Enable(f), ChannelValue::Flag(v)) => f.set_enabled(v),
            (Facet::Position(f, space), ChannelValue::Vec3(v)) => f.set_position(*space, v),
            (Facet::Rotation(f, space), ChannelValue::Vec3(v)) => f.set_euler_angles(*space, v),
            (Facet::Scale(f), ChannelValue::Vec3(v)) => f.set_scale(v),
            (Facet::Color(f), ChannelValue::Color(v)) => f.set_color(v),
            (Facet::Alpha(f), ChannelValue::Scalar(v)) => f.set_alpha(v),
            (facet, value) => {
                tracing::warn!("Dropped {:?} value written to {:?} facet", value.shape(), facet);
            }
        }
    }
}

impl fmt::Debug for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Facet::Enable(_) => "Enable",
            Facet::Position(..) => "Position",
            Facet::Rotation(..) => "Rotation",
            Facet::Scale(_) => "Scale",
            Facet::Color(_) => "Color",
            Facet::Alpha(_) => "Alpha",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Lamp {
        on: Cell<bool>,
        alpha: Cell<f32>,
    }

    impl EnableFacet for Lamp {
        fn is_enabled(&self) -> bool {
            self.on.get()
        }
        fn set_enabled(&self, enabled: bool) {
            self.on.set(enabled);
        }
    }

    impl AlphaFacet for Lamp {
        fn alpha(&self) -> f32 {
            self.alpha.get()
        }
        fn set_alpha(&self, alpha: f32) {
            self.alpha.set(alpha);
        }
    }

    impl PropertyTarget for Lamp {
        fn name(&self) -> &str {
            "lamp"
        }
        fn enable_facet(self: Rc<Self>) -> Option<Rc<dyn EnableFacet>> {
            Some(self)
        }
        fn alpha_facet(self: Rc<Self>) -> Option<Rc<dyn AlphaFacet>> {
            Some(self)
        }
    }

    fn lamp() -> TargetHandle {
        Rc::new(Lamp {
            on: Cell::new(true),
            alpha: Cell::new(0.5),
        })
    }

    #[test]
    fn test_resolve_supported_facets() {
        let target = lamp();
        assert!(Facet::resolve(&target, PropertyKind::Enabled).is_some());
        assert!(Facet::resolve(&target, PropertyKind::Alpha).is_some());
        assert!(Facet::resolve(&target, PropertyKind::Scale).is_none());
        assert!(Facet::resolve(&target, PropertyKind::Position(Space::World)).is_none());
    }

    #[test]
    fn test_read_write_roundtrip() {
        let target = lamp();
        let Some(facet) = Facet::resolve(&target, PropertyKind::Alpha) else {
            panic!("alpha facet should resolve");
        };
        assert_eq!(facet.read(), ChannelValue::Scalar(0.5));
        facet.write(ChannelValue::Scalar(0.9));
        assert_eq!(facet.read(), ChannelValue::Scalar(0.9));

        // Mismatched shapes leave the target untouched.
        facet.write(ChannelValue::Flag(false));
        assert_eq!(facet.read(), ChannelValue::Scalar(0.9));
    }
}
