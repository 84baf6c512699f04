// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory targets for unit tests.

use crate::property::Space;
use crate::target::{
    AlphaFacet, ColorFacet, EnableFacet, PositionFacet, PropertyTarget, RotationFacet, ScaleFacet,
    TargetHandle,
};
use std::cell::Cell;
use std::rc::Rc;

/// Snapshot of every channel on a [`Node`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NodeState {
    enabled: bool,
    position: [f32; 3],
    world_position: [f32; 3],
    euler: [f32; 3],
    world_euler: [f32; 3],
    scale: [f32; 3],
    color: [f32; 4],
    alpha: f32,
}

/// Target exposing every facet
pub(crate) struct Node {
    name: String,
    pub(crate) enabled: Cell<bool>,
    pub(crate) position: Cell<[f32; 3]>,
    pub(crate) world_position: Cell<[f32; 3]>,
    pub(crate) euler: Cell<[f32; 3]>,
    pub(crate) world_euler: Cell<[f32; 3]>,
    pub(crate) scale: Cell<[f32; 3]>,
    pub(crate) color: Cell<[f32; 4]>,
    pub(crate) alpha: Cell<f32>,
}

impl Node {
    pub(crate) fn new(name: &str) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_owned(),
            enabled: Cell::new(true),
            position: Cell::new([0.0; 3]),
            world_position: Cell::new([0.0; 3]),
            euler: Cell::new([0.0; 3]),
            world_euler: Cell::new([0.0; 3]),
            scale: Cell::new([1.0; 3]),
            color: Cell::new([1.0; 4]),
            alpha: Cell::new(1.0),
        })
    }

    pub(crate) fn handle(self: &Rc<Self>) -> TargetHandle {
        Rc::clone(self) as TargetHandle
    }

    pub(crate) fn snapshot(&self) -> NodeState {
        NodeState {
            enabled: self.enabled.get(),
            position: self.position.get(),
            world_position: self.world_position.get(),
            euler: self.euler.get(),
            world_euler: self.world_euler.get(),
            scale: self.scale.get(),
            color: self.color.get(),
            alpha: self.alpha.get(),
        }
    }
}

impl EnableFacet for Node {
    fn is_enabled(&self) -> bool {
        self.enabled.get()
    }
    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }
}

impl PositionFacet for Node {
    fn position(&self, space: Space) -> [f32; 3] {
        match space {
            Space::Local => self.position.get(),
            Space::World => self.world_position.get(),
        }
    }
    fn set_position(&self, space: Space, position: [f32; 3]) {
        match space {
            Space::Local => self.position.set(position),
            Space::World => self.world_position.set(position),
        }
    }
}

impl RotationFacet for Node {
    fn euler_angles(&self, space: Space) -> [f32; 3] {
        match space {
            Space::Local => self.euler.get(),
            Space::World => self.world_euler.get(),
        }
    }
    fn set_euler_angles(&self, space: Space, angles: [f32; 3]) {
        match space {
            Space::Local => self.euler.set(angles),
            Space::World => self.world_euler.set(angles),
        }
    }
}

impl ScaleFacet for Node {
    fn scale(&self) -> [f32; 3] {
        self.scale.get()
    }
    fn set_scale(&self, scale: [f32; 3]) {
        self.scale.set(scale);
    }
}

impl ColorFacet for Node {
    fn color(&self) -> [f32; 4] {
        self.color.get()
    }
    fn set_color(&self, color: [f32; 4]) {
        self.color.set(color);
    }
}

impl AlphaFacet for Node {
    fn alpha(&self) -> f32 {
        self.alpha.get()
    }
    fn set_alpha(&self, alpha: f32) {
        self.alpha.set(alpha);
    }
}

impl PropertyTarget for Node {
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

/// Target exposing only a scale facet
pub(crate) struct ScaleOnly {
    name: String,
    scale: Cell<[f32; 3]>,
}

impl ScaleOnly {
    pub(crate) fn new(name: &str) -> TargetHandle {
        Rc::new(Self {
            name: name.to_owned(),
            scale: Cell::new([1.0; 3]),
        })
    }
}

impl ScaleFacet for ScaleOnly {
    fn scale(&self) -> [f32; 3] {
        self.scale.get()
    }
    fn set_scale(&self, scale: [f32; 3]) {
        self.scale.set(scale);
    }
}

impl PropertyTarget for ScaleOnly {
    fn name(&self) -> &str {
        &self.name
    }
    fn scale_facet(self: Rc<Self>) -> Option<Rc<dyn ScaleFacet>> {
        Some(self)
    }
}
