//! Debug panel state

use bevy::prelude::*;

use crate::animation::TickConfig;

pub const SPEED_OFFSET_MAX: f32 = 0.1;

/// Values driven by the debug panel.
///
/// Fields are private: the panel's change observers are the only writers,
/// through the setters below, and everything else reads a snapshot.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct DebugSettings {
    light_enabled: bool,
    speed_offset: f32,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            light_enabled: false,
            speed_offset: 0.0,
        }
    }
}

impl DebugSettings {
    pub fn light_enabled(&self) -> bool {
        self.light_enabled
    }

    pub fn speed_offset(&self) -> f32 {
        self.speed_offset
    }

    pub fn set_light_enabled(&mut self, enabled: bool) {
        self.light_enabled = enabled;
    }

    /// Clamped to `[0, SPEED_OFFSET_MAX]`; NaN resets to 0.
    pub fn set_speed_offset(&mut self, offset: f32) {
        self.speed_offset = if offset.is_nan() {
            0.0
        } else {
            offset.clamp(0.0, SPEED_OFFSET_MAX)
        };
    }

    pub fn tick_config(&self) -> TickConfig {
        TickConfig {
            speed_offset: self.speed_offset,
        }
    }
}
