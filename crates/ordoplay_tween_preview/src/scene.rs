// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory scene entity driven by the preview host.

use ordoplay_tween::{
    AlphaFacet, ColorFacet, EnableFacet, PositionFacet, PropertyTarget, RotationFacet, ScaleFacet,
    Space, TargetHandle,
};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Local and world copies of a three-component channel
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Spaced {
    local: [f32; 3],
    world: [f32; 3],
}

impl Spaced {
    fn get(&self, space: Space) -> [f32; 3] {
        match space {
            Space::Local => self.local,
            Space::World => self.world,
        }
    }

    fn set(&mut self, space: Space, value: [f32; 3]) {
        match space {
            Space::Local => self.local = value,
            Space::World => self.world = value,
        }
    }
}

/// Scene entity exposing every animatable facet.
///
/// The scene has no hierarchy, so world and local transforms are
/// independent copies.
pub struct SceneNode {
    name: String,
    enabled: Cell<bool>,
    position: Cell<Spaced>,
    rotation: Cell<Spaced>,
    scale: Cell<[f32; 3]>,
    color: Cell<[f32; 4]>,
    alpha: Cell<f32>,
}

impl SceneNode {
    /// Create an enabled node at the origin with unit scale and white color
    pub fn new(name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            enabled: Cell::new(true),
            position: Cell::new(Spaced::default()),
            rotation: Cell::new(Spaced::default()),
            scale: Cell::new([1.0; 3]),
            color: Cell::new([1.0; 4]),
            alpha: Cell::new(1.0),
        })
    }

    /// Shared handle for binding to sequences
    pub fn handle(self: &Rc<Self>) -> TargetHandle {
        Rc::clone(self) as TargetHandle
    }
}

impl fmt::Display for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = self.position.get();
        let rotation = self.rotation.get();
        write!(
            f,
            "{} enabled={} pos={:.2?} rot={:.1?} scale={:.2?} color={:.2?} alpha={:.2}",
            self.name,
            self.enabled.get(),
            position.local,
            rotation.local,
            self.scale.get(),
            self.color.get(),
            self.alpha.get()
        )
    }
}

impl EnableFacet for SceneNode {
    fn is_enabled(&self) -> bool {
        self.enabled.get()
    }
    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }
}

impl PositionFacet for SceneNode {
    fn position(&self, space: Space) -> [f32; 3] {
        self.position.get().get(space)
    }
    fn set_position(&self, space: Space, position: [f32; 3]) {
        let mut spaced = self.position.get();
        spaced.set(space, position);
        self.position.set(spaced);
    }
}

impl RotationFacet for SceneNode {
    fn euler_angles(&self, space: Space) -> [f32; 3] {
        self.rotation.get().get(space)
    }
    fn set_euler_angles(&self, space: Space, angles: [f32; 3]) {
        let mut spaced = self.rotation.get();
        spaced.set(space, angles);
        self.rotation.set(spaced);
    }
}

impl ScaleFacet for SceneNode {
    fn scale(&self) -> [f32; 3] {
        self.scale.get()
    }
    fn set_scale(&self, scale: [f32; 3]) {
        self.scale.set(scale);
    }
}

impl ColorFacet for SceneNode {
    fn color(&self) -> [f32; 4] {
        self.color.get()
    }
    fn set_color(&self, color: [f32; 4]) {
        self.color.set(color);
    }
}

impl AlphaFacet for SceneNode {
    fn alpha(&self) -> f32 {
        self.alpha.get()
    }
    fn set_alpha(&self, alpha: f32) {
        self.alpha.set(alpha);
    }
}

impl PropertyTarget for SceneNode {
    fn name(&self) -> &str {
        &self.name
    }
    fn enable_facet(self: Rc<Self>) -> Option<Rc<dyn EnableFacet>> {
        Some(self)
    }
    fn position_facet(self: Rc<Self>) -> Option<Rc<dyn PositionFacet>> {
        Some(self)
    }
    fn rotation_facet(self: Rc<Self>) -> Option<Rc<dyn RotationFacet>> {
        Some(self)
    }
    fn scale_facet(self: Rc<Self>) -> Option<Rc<dyn ScaleFacet>> {
        Some(self)
    }
    fn color_facet(self: Rc<Self>) -> Option<Rc<dyn ColorFacet>> {
        Some(self)
    }
    fn alpha_facet(self: Rc<Self>) -> Option<Rc<dyn AlphaFacet>> {
        Some(self)
    }
}
