//! Celestial bodies
//!
//! Descriptors for the sun and planets, the factory that turns them into
//! entity hierarchies, and the startup system assembling the solar system.

use bevy::prelude::*;

pub mod catalog;
pub mod components;
pub mod factory;

pub use components::{BodyPart, CelestialBody, OrbitPivot, Revolution, SolarSystem, Spin};
pub use factory::spawn_body;

use crate::textures::{AssetServerTextures, TextureRegistry};

/// Plugin spawning the solar system at startup
pub struct BodiesPlugin;

impl Plugin for BodiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_solar_system);
    }
}

/// Spawn the root group, the sun and every planet from the catalog
pub fn spawn_solar_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    mut registry: ResMut<TextureRegistry>,
) {
    let descriptors = match catalog::solar_system() {
        Ok(descriptors) => descriptors,
        Err(err) => {
            error!("Invalid body catalog: {:#}", err);
            return;
        }
    };

    let group = commands
        .spawn((
            SolarSystem,
            Transform::default(),
            Visibility::default(),
            Name::new("Solar System"),
        ))
        .id();

    let mut textures = AssetServerTextures {
        server: &asset_server,
        registry: &mut registry,
    };

    let mut spawned = 0;
    for descriptor in &descriptors {
        match spawn_body(
            &mut commands,
            &mut meshes,
            &mut materials,
            &mut textures,
            descriptor,
            group,
        ) {
            Ok(body) => {
                debug!(
                    "Spawned {}: surface {:?}, pivot {:?}, atmosphere {}, ring {}, orbit path {}",
                    body.name,
                    body.surface,
                    body.pivot,
                    body.atmosphere.is_some(),
                    body.ring.is_some(),
                    body.orbit_path.is_some()
                );
                spawned += 1;
            }
            Err(err) => warn!("Skipping body '{}': {:#}", descriptor.name, err),
        }
    }
    info!("Solar system ready: {} bodies", spawned);
}
