//! Click picking: cast a ray through the pointer, fly to what it hits and show its overlay.

use bevy::camera::CameraProjection;
use bevy::camera::primitives::Aabb;
use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings, RayCastVisibility};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::bodies::{BodyPart, CelestialBody};
use crate::interaction::flight::{CameraFlight, CameraFlights};
use crate::interaction::pointer_capture::PointerCapture;
use crate::interaction::resize::ViewportSize;
use crate::ui::MainCamera;
use crate::ui::overlay::InfoOverlays;

/// Convert a window-space pointer position (origin top-left) to normalized device coordinates
pub fn pointer_to_ndc(pointer: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        (pointer.x / viewport.x) * 2.0 - 1.0,
        -(pointer.y / viewport.y) * 2.0 + 1.0,
    )
}

/// Ray from the camera's near plane through `ndc`
pub fn ray_through_ndc(
    projection: &Projection,
    camera_transform: &GlobalTransform,
    ndc: Vec2,
) -> Option<Ray3d> {
    let world_from_ndc =
        Mat4::from(camera_transform.affine()) * projection.get_clip_from_view().inverse();
    // Bevy uses reverse-z: 1 is the near plane.
    let near = world_from_ndc.project_point3(ndc.extend(1.0));
    let far = world_from_ndc.project_point3(ndc.extend(f32::EPSILON));
    if !near.is_finite() || !far.is_finite() {
        return None;
    }
    let direction = Dir3::new(far - near).ok()?;
    Some(Ray3d::new(near, direction))
}

/// World-space axis-aligned bounds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl WorldBounds {
    /// Bounds of a local-space `Aabb` after applying `transform`
    pub fn from_aabb(aabb: &Aabb, transform: &GlobalTransform) -> Self {
        let center = Vec3::from(aabb.center);
        let half = Vec3::from(aabb.half_extents);
        let mut bounds = WorldBounds {
            min: Vec3::INFINITY,
            max: Vec3::NEG_INFINITY,
        };
        for x in [-1.0, 1.0] {
            for y in [-1.0, 1.0] {
                for z in [-1.0, 1.0] {
                    let corner = transform.transform_point(center + half * Vec3::new(x, y, z));
                    bounds.min = bounds.min.min(corner);
                    bounds.max = bounds.max.max(corner);
                }
            }
        }
        bounds
    }

    pub fn union(self, other: WorldBounds) -> WorldBounds {
        WorldBounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Bounds of `root` and all of its descendants that have an `Aabb`
pub fn subtree_bounds(
    root: Entity,
    bounds: &Query<(&Aabb, &GlobalTransform)>,
    children: &Query<&Children>,
) -> Option<WorldBounds> {
    std::iter::once(root)
        .chain(children.iter_descendants(root))
        .filter_map(|entity| bounds.get(entity).ok())
        .map(|(aabb, transform)| WorldBounds::from_aabb(aabb, transform))
        .reduce(WorldBounds::union)
}

/// The body a picked mesh belongs to: the nearest `CelestialBody` at or above it
pub fn owning_body<'a>(
    entity: Entity,
    bodies: &'a Query<&CelestialBody>,
    parents: &Query<&ChildOf>,
) -> Option<&'a CelestialBody> {
    std::iter::once(entity)
        .chain(parents.iter_ancestors(entity))
        .find_map(|e| bodies.get(e).ok())
}

#[allow(clippy::too_many_arguments)]
pub fn handle_click(
    mouse: Res<ButtonInput<MouseButton>>,
    capture: Res<PointerCapture>,
    window: Single<&Window, With<PrimaryWindow>>,
    camera: Single<(&Projection, &GlobalTransform, &Transform), With<MainCamera>>,
    viewport: Res<ViewportSize>,
    mut ray_cast: MeshRayCast,
    parts: Query<(), With<BodyPart>>,
    bodies: Query<&CelestialBody>,
    parents: Query<&ChildOf>,
    bounds: Query<(&Aabb, &GlobalTransform)>,
    children: Query<&Children>,
    mut flights: ResMut<CameraFlights>,
    mut overlays: ResMut<InfoOverlays>,
) {
    if !mouse.just_pressed(MouseButton::Left) || capture.is_captured() {
        return;
    }
    let Some(pointer) = window.cursor_position() else {
        return;
    };
    let viewport = if viewport.is_valid() {
        viewport.as_vec2()
    } else {
        Vec2::new(window.width(), window.height())
    };
    let (projection, camera_global, camera_transform) = *camera;

    let ndc = pointer_to_ndc(pointer, viewport);
    let Some(ray) = ray_through_ndc(projection, camera_global, ndc) else {
        warn!("handle_click: could not build a ray through {:?}", ndc);
        return;
    };

    // Orbit paths carry no BodyPart, so they never block a pick.
    let filter = |entity: Entity| parts.contains(entity);
    let settings = MeshRayCastSettings::default()
        .with_visibility(RayCastVisibility::Visible)
        .with_filter(&filter);
    let hit = ray_cast.cast_ray(ray, &settings).first().map(|(entity, _)| *entity);

    let Some(hit) = hit else {
        if let Some(hidden) = overlays.hide() {
            debug!("Nothing picked; hid overlay '{}'", hidden);
        }
        return;
    };

    let Some(body) = owning_body(hit, &bodies, &parents) else {
        warn!("handle_click: picked entity {:?} belongs to no body", hit);
        return;
    };
    let name = body.name.as_str();

    match subtree_bounds(hit, &bounds, &children) {
        Some(world_bounds) => {
            debug!(
                "Picked '{}': center {:?}, size {:?}",
                name,
                world_bounds.center(),
                world_bounds.size()
            );
            if let Some(previous) = flights.current() {
                debug!("Cancelling camera flight {:?}", previous);
            }
            let handle = flights.start(CameraFlight::new(
                camera_transform.translation,
                world_bounds.center(),
                world_bounds.size(),
            ));
            debug!("Camera flight {:?} towards '{}'", handle, name);
        }
        None => warn!("handle_click: '{}' has no bounds yet; not moving camera", name),
    }

    if let Err(err) = overlays.reveal(name) {
        warn!("{:#}", err);
    }
}
