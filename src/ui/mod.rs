//! User interface module
//!
//! Debug panel, per-body info overlays and the star skybox.

use bevy::prelude::*;

pub mod overlay;
pub mod panel;
pub mod skybox;
pub mod state;

pub use skybox::SkyboxPlugin;
pub use state::DebugSettings;

/// Marker for the camera that renders the scene and receives picks
#[derive(Component)]
pub struct MainCamera;

/// UI root whose area keeps the pointer away from the camera and the picker
#[derive(Component)]
pub struct CapturesPointer;

/// Plugin for user interface management
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugSettings>()
            .init_resource::<overlay::InfoOverlays>()
            .add_systems(
                Startup,
                (panel::spawn_debug_panel, overlay::spawn_info_panels),
            );
    }
}
