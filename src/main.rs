use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{RenderCreation, WgpuSettings};
use bevy::window::{PresentMode, Window, WindowPlugin};

use bevy_feathers::FeathersPlugins;
use bevy_feathers::dark_theme::create_dark_theme;
use bevy_feathers::palette;
use bevy_feathers::theme::UiTheme;
use bevy_input_focus::directional_navigation::DirectionalNavigationPlugin;
use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod animation;
mod bodies;
mod interaction;
mod textures;
mod ui;
mod visualization;

use animation::OrbitAnimationPlugin;
use bodies::BodiesPlugin;
use interaction::InteractionPlugin;
use interaction::flight::orbit_parameters;
use textures::TexturesPlugin;
use ui::{MainCamera, SkyboxPlugin, UiPlugin};
use visualization::{
    SUN_LIGHT_INTENSITY, SUN_LIGHT_RANGE, VisualizationPlugin, initial_ambient_light,
};

const CAMERA_START: Vec3 = Vec3::new(-60.0, 100.0, 100.0);
const CAMERA_FOV_DEG: f32 = 45.0;

// Camera and lights; the bodies themselves come from `BodiesPlugin`.
pub fn setup(mut commands: Commands) {
    commands.insert_resource(initial_ambient_light());

    let (radius, yaw, pitch) = orbit_parameters(CAMERA_START);
    let pan_orbit = PanOrbitCamera {
        focus: Vec3::ZERO,
        radius: Some(radius),
        yaw: Some(yaw),
        pitch: Some(pitch),
        force_update: true,
        ..default()
    };

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEG.to_radians(),
            near: 0.1,
            far: 10_000.0,
            ..default()
        }),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        pan_orbit,
        MainCamera,
        Tonemapping::TonyMcMapface,
        Transform::from_translation(CAMERA_START).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // The sun's light sits at its centre; the sun mesh itself is unlit.
    commands.spawn((
        PointLight {
            color: Color::WHITE,
            intensity: SUN_LIGHT_INTENSITY,
            range: SUN_LIGHT_RANGE,
            shadows_enabled: false,
            ..default()
        },
        Transform::default(),
        Name::new("Sun Light"),
    ));
}

fn main() {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Solar System".to_string(),
                    present_mode: PresentMode::AutoVsync,
                    // Only used on wasm32: render into the page's canvas.
                    canvas: Some("#solar".to_string()),
                    fit_canvas_to_parent: true,
                    ..default()
                }),
                ..default()
            })
            .set(RenderPlugin {
                render_creation: RenderCreation::Automatic(WgpuSettings { ..default() }),
                ..default()
            }),
    );

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    // Feathers initializes `UiTheme` but does not populate it by default.
    let mut theme = UiTheme(create_dark_theme());
    theme.set_color("feathers.text.main", palette::LIGHT_GRAY_1);
    theme.set_color("feathers.text.dim", palette::LIGHT_GRAY_2);
    theme.set_color("feathers.focus", palette::ACCENT);
    theme.set_color("feathers.window.bg", Color::srgba(0.04, 0.06, 0.1, 0.85));
    theme.set_color("feathers.slider.bg", Color::srgba(0.04, 0.08, 0.12, 0.9));
    theme.set_color("feathers.slider.bar", Color::srgba(0.95, 0.7, 0.25, 0.8));
    theme.set_color("feathers.slider.text", Color::srgba(1.0, 0.92, 0.75, 0.95));
    theme.set_color("feathers.checkbox.bg.checked", Color::srgba(0.95, 0.7, 0.25, 0.9));
    theme.set_color("feathers.checkbox.border", Color::srgba(0.6, 0.6, 0.65, 0.9));
    theme.set_color("feathers.checkbox.mark", Color::srgba(0.05, 0.05, 0.08, 1.0));
    app.insert_resource(theme);

    app.add_plugins(FeathersPlugins);
    app.add_plugins(DirectionalNavigationPlugin);
    app.add_plugins(PanOrbitCameraPlugin);

    app.add_plugins(TexturesPlugin);
    app.add_plugins(BodiesPlugin);
    app.add_plugins(OrbitAnimationPlugin);
    app.add_plugins(InteractionPlugin);
    app.add_plugins(UiPlugin);
    app.add_plugins(SkyboxPlugin);
    app.add_plugins(VisualizationPlugin);
    app.add_systems(Startup, setup);

    app.run();
}
