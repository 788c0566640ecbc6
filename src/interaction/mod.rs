//! Pointer and window interaction
//!
//! Clicking a body flies the camera to it and shows its info overlay;
//! clicking empty space hides the overlay. Presses on UI panels are left to
//! the panels. Resizes keep the camera projection in step with the window.

use bevy::prelude::*;

pub mod flight;
pub mod picking;
pub mod pointer_capture;
pub mod resize;

pub use flight::{CameraFlights, advance_camera_flight};
pub use picking::handle_click;
pub use pointer_capture::{PointerCapture, gate_orbit_controls, track_pointer_capture};
pub use resize::{ViewportSize, handle_resize, init_viewport_size};

use crate::ui::overlay::sync_overlay_display;

/// Plugin for click picking, camera flights and resize handling
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraFlights>()
            .init_resource::<ViewportSize>()
            .init_resource::<PointerCapture>()
            .add_systems(Startup, init_viewport_size)
            .add_systems(
                Update,
                (
                    handle_resize,
                    track_pointer_capture,
                    gate_orbit_controls,
                    handle_click,
                    advance_camera_flight,
                    sync_overlay_display,
                )
                    .chain(),
            );
    }
}
