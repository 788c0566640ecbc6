//! Builds renderable bodies from descriptors.
//!
//! A planet becomes a small hierarchy:
//!
//! ```text
//! group
//! └── pivot (OrbitPivot, Revolution)
//!     ├── surface (BodyPart, Spin) at x = distance * ORBIT_SCALE
//!     │   └── atmosphere (BodyPart, optional)
//!     └── ring (BodyPart, optional) at x = distance * ORBIT_SCALE
//! orbit path (OrbitPath) at the world root
//! ```
//!
//! Orbit paths stay outside the group on purpose: they are static markers and
//! must not inherit the pivot's rotation.

use anyhow::Result;
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use crate::bodies::catalog::{BodyKind, CelestialBodyDescriptor, RingDescriptor};
use crate::bodies::components::{BodyPart, CelestialBody, OrbitPath, OrbitPivot, Revolution, Spin};
use crate::textures::TextureSource;

/// Orbital distances are stretched so orbits stay clear of the (oversized) bodies.
pub const ORBIT_SCALE: f32 = 1.5;
pub const ATMOSPHERE_OFFSET: f32 = 0.05;
const ORBIT_PATH_THICKNESS: f32 = 0.2;

pub fn scaled_distance(orbital_distance: f32) -> f32 {
    orbital_distance * ORBIT_SCALE
}

/// Spawn one body under `group`. Nothing is spawned if the descriptor is invalid.
pub fn spawn_body(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    textures: &mut impl TextureSource,
    descriptor: &CelestialBodyDescriptor,
    group: Entity,
) -> Result<CelestialBody> {
    descriptor.validate()?;

    match descriptor.kind {
        BodyKind::Star => Ok(spawn_star(commands, meshes, materials, textures, descriptor, group)),
        BodyKind::Planet => Ok(spawn_planet(
            commands, meshes, materials, textures, descriptor, group,
        )),
    }
}

fn spawn_star(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    textures: &mut impl TextureSource,
    descriptor: &CelestialBodyDescriptor,
    group: Entity,
) -> CelestialBody {
    let material = materials.add(StandardMaterial {
        base_color_texture: Some(textures.request(&descriptor.textures.surface)),
        unlit: true,
        ..default()
    });

    let surface = commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(descriptor.radius).mesh().uv(30, 30))),
            MeshMaterial3d(material),
            Transform::default(),
            Spin::new(descriptor.rates.spin),
            BodyPart,
            Name::new(descriptor.name.clone()),
            ChildOf(group),
        ))
        .id();

    let body = CelestialBody {
        name: descriptor.name.clone(),
        surface,
        pivot: None,
        atmosphere: None,
        ring: None,
        orbit_path: None,
    };
    commands.entity(surface).insert(body.clone());
    body
}

fn spawn_planet(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    textures: &mut impl TextureSource,
    descriptor: &CelestialBodyDescriptor,
    group: Entity,
) -> CelestialBody {
    let name = &descriptor.name;
    let distance = scaled_distance(descriptor.orbital_distance);

    let mut pivot_cmd = commands.spawn((
        Transform::default(),
        Visibility::default(),
        OrbitPivot,
        Name::new(name.clone()),
        ChildOf(group),
    ));
    if let Some(rate) = descriptor.rates.revolution {
        pivot_cmd.insert(Revolution::new(rate));
    }
    let pivot = pivot_cmd.id();

    let surface_material = materials.add(StandardMaterial {
        base_color_texture: Some(textures.request(&descriptor.textures.surface)),
        perceptual_roughness: 1.0,
        ..default()
    });
    let surface = commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(descriptor.radius).mesh().uv(30, 30))),
            MeshMaterial3d(surface_material),
            Transform::from_xyz(distance, 0.0, 0.0),
            Spin::new(descriptor.rates.spin),
            BodyPart,
            Name::new(name.clone()),
            ChildOf(pivot),
        ))
        .id();

    let atmosphere = descriptor.textures.atmosphere.as_deref().map(|path| {
        // Additive blending lets the dark parts of the cloud map vanish.
        let material = materials.add(StandardMaterial {
            base_color_texture: Some(textures.request(path)),
            alpha_mode: AlphaMode::Add,
            ..default()
        });
        commands
            .spawn((
                Mesh3d(meshes.add(
                    Sphere::new(descriptor.radius + ATMOSPHERE_OFFSET)
                        .mesh()
                        .uv(30, 30),
                )),
                MeshMaterial3d(material),
                Transform::default(),
                BodyPart,
                Name::new(name.clone()),
                ChildOf(surface),
            ))
            .id()
    });

    let ring = descriptor.ring.as_ref().map(|ring| {
        spawn_ring(
            commands, meshes, materials, textures, ring, name, distance, pivot,
        )
    });

    let orbit_path = spawn_orbit_path(commands, meshes, materials, name, distance);

    let body = CelestialBody {
        name: name.clone(),
        surface,
        pivot: Some(pivot),
        atmosphere,
        ring,
        orbit_path: Some(orbit_path),
    };
    commands.entity(pivot).insert(body.clone());
    body
}

#[allow(clippy::too_many_arguments)]
fn spawn_ring(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    textures: &mut impl TextureSource,
    ring: &RingDescriptor,
    name: &str,
    distance: f32,
    pivot: Entity,
) -> Entity {
    let material = materials.add(StandardMaterial {
        base_color_texture: Some(textures.request(ring.texture())),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    // Annulus is built in the XY plane; tip it into the orbital (XZ) plane.
    commands
        .spawn((
            Mesh3d(meshes.add(
                Annulus::new(ring.inner_radius(), ring.outer_radius())
                    .mesh()
                    .resolution(32),
            )),
            MeshMaterial3d(material),
            Transform::from_xyz(distance, 0.0, 0.0)
                .with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            BodyPart,
            Name::new(name.to_owned()),
            ChildOf(pivot),
        ))
        .id()
}

fn spawn_orbit_path(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    name: &str,
    distance: f32,
) -> Entity {
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    // Bevy tori already lie in the XZ plane, so no extra rotation is needed.
    commands
        .spawn((
            Mesh3d(meshes.add(
                Torus {
                    minor_radius: ORBIT_PATH_THICKNESS,
                    major_radius: distance,
                }
                .mesh()
                .minor_resolution(36)
                .major_resolution(128),
            )),
            MeshMaterial3d(material),
            Transform::default(),
            OrbitPath,
            Name::new(format!("{name} orbit")),
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::catalog;
    use bevy::ecs::system::RunSystemOnce;

    struct StubTextures {
        requested: Vec<String>,
    }

    impl TextureSource for StubTextures {
        fn request(&mut self, path: &str) -> Handle<Image> {
            self.requested.push(path.to_owned());
            Handle::default()
        }
    }

    fn test_world() -> (World, Entity) {
        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        world.init_resource::<Assets<StandardMaterial>>();
        let group = world
            .spawn((Transform::default(), Visibility::default()))
            .id();
        (world, group)
    }

    fn spawn(
        world: &mut World,
        group: Entity,
        descriptor: CelestialBodyDescriptor,
    ) -> (Result<CelestialBody>, Vec<String>) {
        world
            .run_system_once(
                move |mut commands: Commands,
                      mut meshes: ResMut<Assets<Mesh>>,
                      mut materials: ResMut<Assets<StandardMaterial>>| {
                    let mut textures = StubTextures {
                        requested: Vec::new(),
                    };
                    let body = spawn_body(
                        &mut commands,
                        &mut meshes,
                        &mut materials,
                        &mut textures,
                        &descriptor,
                        group,
                    );
                    (body, textures.requested)
                },
            )
            .expect("system should run")
    }

    fn parent_of(world: &World, entity: Entity) -> Option<Entity> {
        world.get::<ChildOf>(entity).map(|c| c.parent())
    }

    #[test]
    fn test_surface_offset_is_scaled_distance() {
        for descriptor in catalog::planets().unwrap() {
            let (mut world, group) = test_world();
            let expected = descriptor.orbital_distance * 1.5;
            let (body, _) = spawn(&mut world, group, descriptor);
            let body = body.unwrap();

            let pivot = body.pivot.expect("planets have a pivot");
            let surface = world.get::<Transform>(body.surface).unwrap();
            assert!((surface.translation.x - expected).abs() < 1e-4);
            assert_eq!(surface.translation.y, 0.0);
            assert_eq!(surface.translation.z, 0.0);
            assert_eq!(parent_of(&world, body.surface), Some(pivot));
            assert_eq!(parent_of(&world, pivot), Some(group));
            assert!(world.get::<Revolution>(pivot).is_some());
            assert!(world.get::<OrbitPivot>(pivot).is_some());
            assert!(world.get::<Spin>(body.surface).is_some());
            assert_eq!(world.get::<CelestialBody>(pivot), Some(&body));
        }
    }

    #[test]
    fn test_atmosphere_carries_body_name() {
        let earth = catalog::planets().unwrap().remove(2);
        let (mut world, group) = test_world();
        let (body, requested) = spawn(&mut world, group, earth);
        let body = body.unwrap();

        let atmosphere = body.atmosphere.expect("earth has clouds");
        assert_eq!(world.get::<Name>(atmosphere).unwrap().as_str(), "earth");
        assert_eq!(parent_of(&world, atmosphere), Some(body.surface));
        assert!(world.get::<BodyPart>(atmosphere).is_some());
        assert_eq!(requested, vec!["earth.png", "clouds.jpg"]);
    }

    #[test]
    fn test_ring_is_sibling_of_surface() {
        let saturn = catalog::planets().unwrap().remove(5);
        let (mut world, group) = test_world();
        let (body, _) = spawn(&mut world, group, saturn);
        let body = body.unwrap();

        let ring = body.ring.expect("saturn has a ring");
        assert_eq!(parent_of(&world, ring), body.pivot);
        let transform = world.get::<Transform>(ring).unwrap();
        assert!((transform.translation.x - 207.0).abs() < 1e-4);
        let expected = Quat::from_rotation_x(-FRAC_PI_2);
        assert!(transform.rotation.abs_diff_eq(expected, 1e-6));
        assert_eq!(world.get::<Name>(ring).unwrap().as_str(), "saturn");
    }

    #[test]
    fn test_orbit_path_is_outside_group() {
        let mars = catalog::planets().unwrap().remove(3);
        let (mut world, group) = test_world();
        let (body, _) = spawn(&mut world, group, mars);
        let body = body.unwrap();

        let path = body.orbit_path.expect("planets have an orbit path");
        assert!(world.get::<OrbitPath>(path).is_some());
        assert_eq!(parent_of(&world, path), None);
        assert!(world.get::<BodyPart>(path).is_none());
    }

    #[test]
    fn test_star_has_no_pivot_or_path() {
        let (mut world, group) = test_world();
        let (body, requested) = spawn(&mut world, group, catalog::sun());
        let body = body.unwrap();

        assert_eq!(body.pivot, None);
        assert_eq!(body.orbit_path, None);
        assert_eq!(world.get::<CelestialBody>(body.surface), Some(&body));
        assert_eq!(parent_of(&world, body.surface), Some(group));
        assert_eq!(requested, vec!["sun.jpg"]);
    }

    #[test]
    fn test_invalid_descriptor_spawns_nothing() {
        let (mut world, group) = test_world();
        let before = world.query::<Entity>().iter(&world).count();

        let mut broken = catalog::planets().unwrap().remove(0);
        broken.radius = -3.2;
        let (body, requested) = spawn(&mut world, group, broken);

        assert!(body.is_err());
        assert!(requested.is_empty());
        assert_eq!(world.query::<Entity>().iter(&world).count(), before);
    }
}
