//! Debug panel: ambient light toggle and speed slider

use bevy::prelude::*;
use bevy::ui::Checked;
use bevy_feathers::controls::{SliderProps, checkbox, slider};
use bevy_feathers::theme::{ThemeBackgroundColor, ThemedText};
use bevy_feathers::tokens;
use bevy_ui_widgets::{SliderPrecision, SliderStep, SliderValue, ValueChange, observe};

use crate::ui::CapturesPointer;
use crate::ui::state::{DebugSettings, SPEED_OFFSET_MAX};

const SPEED_STEP: f32 = 0.001;

pub fn spawn_debug_panel(mut commands: Commands, settings: Res<DebugSettings>) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            right: Val::Px(12.0),
            width: Val::Px(220.0),
            padding: UiRect::all(Val::Px(10.0)),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(8.0),
            ..default()
        },
        ThemeBackgroundColor(tokens::WINDOW_BG),
        CapturesPointer,
        Name::new("Debug Panel"),
        children![
            (
                checkbox((), Spawn((Text::new("Light"), ThemedText))),
                observe(on_light_toggled),
            ),
            (Text::new("Speed"), ThemedText),
            (
                slider(
                    SliderProps {
                        value: settings.speed_offset(),
                        min: 0.0,
                        max: SPEED_OFFSET_MAX,
                    },
                    (SliderStep(SPEED_STEP), SliderPrecision(3)),
                ),
                observe(on_speed_changed),
            ),
        ],
    ));
}

fn on_light_toggled(
    change: On<ValueChange<bool>>,
    mut commands: Commands,
    mut settings: ResMut<DebugSettings>,
) {
    settings.set_light_enabled(change.value);
    let mut checkbox = commands.entity(change.source);
    if change.value {
        checkbox.insert(Checked);
    } else {
        checkbox.remove::<Checked>();
    }
    info!("Ambient light {}", if change.value { "on" } else { "off" });
}

fn on_speed_changed(
    change: On<ValueChange<f32>>,
    mut commands: Commands,
    mut settings: ResMut<DebugSettings>,
) {
    settings.set_speed_offset(change.value);
    commands
        .entity(change.source)
        .insert(SliderValue(settings.speed_offset()));
}
