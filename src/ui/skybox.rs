use anyhow::{Result, bail, ensure};
use bevy::core_pipeline::Skybox;
use bevy::prelude::Plugin;
use bevy::{
    prelude::*,
    render::render_resource::{TextureViewDescriptor, TextureViewDimension},
};

use crate::textures::{
    AssetServerTextures, TextureLoadState, TextureRegistry, TextureSource, poll_texture_states,
};
use crate::ui::MainCamera;

pub const SKYBOX_TEXTURE: &str = "stars.jpg";
const CUBE_FACES: u32 = 6;
const SKYBOX_BRIGHTNESS: f32 = 1000.0;

pub struct SkyboxPlugin;

impl Plugin for SkyboxPlugin {
    fn build(&self, app: &mut bevy::prelude::App) {
        app.add_systems(Startup, request_skybox)
            .add_systems(Update, asset_loaded.after(poll_texture_states));
    }
}

#[derive(Resource)]
pub struct Cubemap {
    pub activated: bool,
    pub is_loaded: bool,
    pub image_handle: Handle<Image>,
}

fn request_skybox(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut registry: ResMut<TextureRegistry>,
) {
    let mut textures = AssetServerTextures {
        server: &asset_server,
        registry: &mut registry,
    };
    commands.insert_resource(Cubemap {
        is_loaded: false,
        image_handle: textures.request(SKYBOX_TEXTURE),
        activated: true,
    });
}

/// Repeat a single square face six times and view it as a cube texture.
///
/// The star field looks the same in every direction, so one image serves all faces.
pub fn tile_as_cube(image: &mut Image) -> Result<()> {
    let size = image.texture_descriptor.size;
    ensure!(
        size.width == size.height,
        "skybox face must be square, got {}x{}",
        size.width,
        size.height
    );
    let Some(face) = image.data.as_ref() else {
        bail!("skybox image has no CPU-side data");
    };

    let stacked = face.repeat(CUBE_FACES as usize);
    image.data = Some(stacked);
    image.texture_descriptor.size.height = size.height * CUBE_FACES;
    image.reinterpret_stacked_2d_as_array(CUBE_FACES)?;
    image.texture_view_descriptor = Some(TextureViewDescriptor {
        dimension: Some(TextureViewDimension::Cube),
        ..default()
    });
    Ok(())
}

fn asset_loaded(
    mut commands: Commands,
    registry: Res<TextureRegistry>,
    mut images: ResMut<Assets<Image>>,
    mut cubemap: ResMut<Cubemap>,
    mut camera_query: Query<(Entity, Option<&Skybox>), With<MainCamera>>,
) {
    if cubemap.activated && !cubemap.is_loaded {
        match registry.state(SKYBOX_TEXTURE) {
            Some(TextureLoadState::Ready) => {}
            Some(TextureLoadState::Failed) => {
                warn!("Skybox disabled: '{}' failed to load", SKYBOX_TEXTURE);
                cubemap.activated = false;
                return;
            }
            _ => return,
        }

        let Some(mut image) = images.get_mut(&cubemap.image_handle) else {
            return;
        };
        // Already-stacked cube images (e.g. KTX2) are used as they are.
        if image.texture_descriptor.array_layer_count() == 1 {
            if let Err(err) = tile_as_cube(&mut image) {
                warn!("Failed to build skybox cubemap: {:#}", err);
                cubemap.activated = false;
                return;
            }
        }

        cubemap.is_loaded = true;
    }

    if cubemap.activated && cubemap.is_loaded {
        if let Ok((camera_entity, skybox)) = camera_query.single_mut() {
            if skybox.is_none() {
                commands.entity(camera_entity).insert(Skybox {
                    image: cubemap.image_handle.clone(),
                    brightness: SKYBOX_BRIGHTNESS,
                    ..default()
                });
            }
        }
    }
}
