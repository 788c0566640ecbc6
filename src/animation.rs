//! Per-frame spin and orbital revolution.
//!
//! Increments are per-tick constants, not scaled by frame time, so the
//! apparent speed follows the display refresh rate.

use bevy::prelude::*;
use std::f32::consts::TAU;

use crate::bodies::{OrbitPivot, Revolution, Spin};
use crate::ui::DebugSettings;

/// Plugin advancing body rotations every frame
pub struct OrbitAnimationPlugin;

impl Plugin for OrbitAnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, advance_bodies);
    }
}

/// Read-only view of the user-controlled parameters for one tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickConfig {
    pub speed_offset: f32,
}

/// Advance an angle and wrap it into `[0, TAU)`.
pub fn advance_angle(angle: f32, increment: f32) -> f32 {
    (angle + increment).rem_euclid(TAU)
}

pub fn advance_bodies(
    settings: Res<DebugSettings>,
    mut spins: Query<(&mut Spin, &mut Transform), Without<Revolution>>,
    mut revolutions: Query<(&mut Revolution, &mut Transform), (With<OrbitPivot>, Without<Spin>)>,
) {
    let tick = settings.tick_config();

    for (mut spin, mut transform) in spins.iter_mut() {
        spin.angle = advance_angle(spin.angle, spin.rate + tick.speed_offset);
        transform.rotation = Quat::from_rotation_y(spin.angle);
    }

    for (mut revolution, mut transform) in revolutions.iter_mut() {
        revolution.angle = advance_angle(revolution.angle, revolution.rate + tick.speed_offset);
        transform.rotation = Quat::from_rotation_y(revolution.angle);
    }
}
