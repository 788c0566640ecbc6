//! Pointer capture by UI panels.
//!
//! While the mouse is over a panel, or dragging something that was pressed on
//! a panel, the orbit controls and the click picker ignore it.

use bevy::picking::hover::HoverMap;
use bevy::picking::pointer::PointerId;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use crate::ui::{CapturesPointer, MainCamera};

#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerCapture {
    over_ui: bool,
    dragging_ui: bool,
}

impl PointerCapture {
    pub fn is_captured(&self) -> bool {
        self.over_ui || self.dragging_ui
    }

    /// Next state given this frame's hover and mouse button state
    pub fn next(self, over_ui: bool, just_pressed: bool, any_pressed: bool) -> Self {
        let dragging_ui = if just_pressed {
            over_ui || self.dragging_ui
        } else {
            self.dragging_ui && any_pressed
        };
        Self {
            over_ui,
            dragging_ui,
        }
    }
}

/// Whether `entity` is a pointer-capturing panel or sits inside one
fn inside_panel(
    entity: Entity,
    panels: &Query<(), With<CapturesPointer>>,
    parents: &Query<&ChildOf>,
) -> bool {
    std::iter::once(entity)
        .chain(parents.iter_ancestors(entity))
        .any(|e| panels.contains(e))
}

pub fn track_pointer_capture(
    hover_map: Option<Res<HoverMap>>,
    mouse: Res<ButtonInput<MouseButton>>,
    panels: Query<(), With<CapturesPointer>>,
    parents: Query<&ChildOf>,
    mut capture: ResMut<PointerCapture>,
) {
    let over_ui = hover_map
        .as_deref()
        .and_then(|map| map.get(&PointerId::Mouse))
        .is_some_and(|hovered| {
            hovered
                .keys()
                .any(|&entity| inside_panel(entity, &panels, &parents))
        });

    let next = capture.next(
        over_ui,
        mouse.get_just_pressed().next().is_some(),
        mouse.get_pressed().next().is_some(),
    );
    let was_captured = capture.is_captured();
    if capture.set_if_neq(next) && was_captured != next.is_captured() {
        debug!("Pointer captured by UI: {}", next.is_captured());
    }
}

/// Switch the orbit controls off while the UI owns the pointer
pub fn gate_orbit_controls(
    capture: Res<PointerCapture>,
    mut cameras: Query<&mut PanOrbitCamera, With<MainCamera>>,
) {
    if !capture.is_changed() {
        return;
    }
    let enabled = !capture.is_captured();
    for mut pan_orbit in cameras.iter_mut() {
        if pan_orbit.enabled != enabled {
            pan_orbit.enabled = enabled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::picking::backend::HitData;
    use bevy::platform::collections::HashMap;

    fn hover(app: &mut App, entities: &[Entity]) {
        let mut hovered = HashMap::default();
        for &entity in entities {
            hovered.insert(entity, HitData::new(Entity::PLACEHOLDER, 0.0, None, None));
        }
        let mut map = HoverMap::default();
        map.insert(PointerId::Mouse, hovered);
        app.insert_resource(map);
    }

    fn test_app() -> (App, Entity, Entity) {
        let mut app = App::new();
        app.init_resource::<PointerCapture>()
            .init_resource::<ButtonInput<MouseButton>>()
            .add_systems(Update, (track_pointer_capture, gate_orbit_controls).chain());
        let panel = app.world_mut().spawn((Node::default(), CapturesPointer)).id();
        let camera = app
            .world_mut()
            .spawn((MainCamera, PanOrbitCamera::default()))
            .id();
        (app, panel, camera)
    }

    fn orbit_enabled(app: &App, camera: Entity) -> bool {
        app.world().get::<PanOrbitCamera>(camera).unwrap().enabled
    }

    #[test]
    fn test_drag_started_on_panel_stays_captured() {
        let idle = PointerCapture::default();

        let pressed = idle.next(true, true, true);
        assert!(pressed.is_captured());
        // Slider drag leaves the panel with the button still held.
        let dragged_out = pressed.next(false, false, true);
        assert!(dragged_out.is_captured());
        let released = dragged_out.next(false, false, false);
        assert!(!released.is_captured());

        let scene_drag = idle.next(false, true, true);
        assert!(!scene_drag.is_captured());
        assert!(!scene_drag.next(false, false, true).is_captured());
    }

    #[test]
    fn test_hovering_panel_child_disables_orbit_controls() {
        let (mut app, panel, camera) = test_app();
        let slider = app.world_mut().spawn((Node::default(), ChildOf(panel))).id();

        app.update();
        assert!(orbit_enabled(&app, camera));

        hover(&mut app, &[slider]);
        app.update();
        assert!(app.world().resource::<PointerCapture>().is_captured());
        assert!(!orbit_enabled(&app, camera));

        hover(&mut app, &[]);
        app.update();
        assert!(orbit_enabled(&app, camera));
    }

    #[test]
    fn test_hovering_other_ui_does_not_capture() {
        let (mut app, _panel, camera) = test_app();
        let label = app.world_mut().spawn(Node::default()).id();

        hover(&mut app, &[label]);
        app.update();
        assert!(!app.world().resource::<PointerCapture>().is_captured());
        assert!(orbit_enabled(&app, camera));
    }
}
