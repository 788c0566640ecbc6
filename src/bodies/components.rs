//! Components for the solar-system scene graph

use bevy::prelude::*;

/// Root group holding the sun and every planet's orbit pivot
#[derive(Component)]
pub struct SolarSystem;

/// Invisible anchor whose yaw is the body's orbital phase
#[derive(Component)]
pub struct OrbitPivot;

/// Static orbit marker; spawned at the world root, outside the animated hierarchy
#[derive(Component)]
pub struct OrbitPath;

/// Mesh that can be picked by clicking. Carries the same `Name` as its body.
#[derive(Component)]
pub struct BodyPart;

/// Entities making up one body. Lives on the pivot (planets) or the surface (stars).
///
/// Picking walks up from the hit mesh to this component to find which body was clicked.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct CelestialBody {
    pub name: String,
    pub surface: Entity,
    pub pivot: Option<Entity>,
    pub atmosphere: Option<Entity>,
    pub ring: Option<Entity>,
    pub orbit_path: Option<Entity>,
}

/// Self-rotation of a surface mesh, advanced once per frame
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Spin {
    pub rate: f32,
    pub angle: f32,
}

impl Spin {
    pub fn new(rate: f32) -> Self {
        Self { rate, angle: 0.0 }
    }
}

/// Orbital revolution of a pivot, advanced once per frame
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Revolution {
    pub rate: f32,
    pub angle: f32,
}

impl Revolution {
    pub fn new(rate: f32) -> Self {
        Self { rate, angle: 0.0 }
    }
}
