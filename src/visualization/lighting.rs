//! Scene lighting

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

use crate::ui::DebugSettings;

pub const AMBIENT_ON_BRIGHTNESS: f32 = 400.0;
pub const AMBIENT_INITIAL_BRIGHTNESS: f32 = 150.0;
/// Point light at the sun's centre
pub const SUN_LIGHT_INTENSITY: f32 = 1.0e9;
pub const SUN_LIGHT_RANGE: f32 = 1000.0;

/// Dim grey fill light used until the panel toggle is first touched
pub fn initial_ambient_light() -> GlobalAmbientLight {
    GlobalAmbientLight {
        color: Color::srgb(0.2, 0.2, 0.2),
        brightness: AMBIENT_INITIAL_BRIGHTNESS,
        ..default()
    }
}

/// Apply the panel's light toggle. The color is pinned to white on every toggle.
pub fn apply_ambient_light(
    settings: Res<DebugSettings>,
    mut ambient: ResMut<GlobalAmbientLight>,
    mut applied: Local<Option<bool>>,
) {
    if !settings.is_changed() {
        return;
    }
    let enabled = settings.light_enabled();
    if settings.is_added() {
        *applied = Some(enabled);
        return;
    }
    // Speed changes also mark the settings as changed.
    if *applied == Some(enabled) {
        return;
    }
    *applied = Some(enabled);

    ambient.brightness = if enabled { AMBIENT_ON_BRIGHTNESS } else { 0.0 };
    ambient.color = Color::WHITE;
    debug!("Ambient light brightness set to {}", ambient.brightness);
}
