//! Visualization module
//!
//! Lighting that reacts to the debug panel.

use bevy::prelude::*;

pub mod lighting;

pub use lighting::{
    SUN_LIGHT_INTENSITY, SUN_LIGHT_RANGE, apply_ambient_light, initial_ambient_light,
};

/// Plugin for visualization systems
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, apply_ambient_light);
    }
}
