//! Window resize handling

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::ui::MainCamera;

/// Current size of the render surface, in logical pixels
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

pub fn aspect_ratio(width: f32, height: f32) -> Option<f32> {
    (width > 0.0 && height > 0.0).then(|| width / height)
}

pub fn init_viewport_size(
    window: Single<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<ViewportSize>,
) {
    *viewport = ViewportSize {
        width: window.width(),
        height: window.height(),
    };
}

/// Keep the camera aspect ratio and recorded viewport in step with the primary window
pub fn handle_resize(
    mut resized: MessageReader<WindowResized>,
    primary: Query<(), With<PrimaryWindow>>,
    mut viewport: ResMut<ViewportSize>,
    mut projections: Query<&mut Projection, With<MainCamera>>,
) {
    for event in resized.read() {
        if !primary.contains(event.window) {
            continue;
        }
        *viewport = ViewportSize {
            width: event.width,
            height: event.height,
        };

        // A minimised window reports 0x0; keep the last usable projection.
        let Some(aspect) = aspect_ratio(event.width, event.height) else {
            continue;
        };
        for mut projection in projections.iter_mut() {
            if let Projection::Perspective(perspective) = projection.as_mut() {
                perspective.aspect_ratio = aspect;
            }
        }
        debug!("Viewport resized to {}x{}", event.width, event.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> (App, Entity, Entity) {
        let mut app = App::new();
        app.add_message::<WindowResized>()
            .init_resource::<ViewportSize>()
            .add_systems(Update, handle_resize);
        let window = app.world_mut().spawn(PrimaryWindow).id();
        let camera = app
            .world_mut()
            .spawn((
                MainCamera,
                Projection::Perspective(PerspectiveProjection::default()),
            ))
            .id();
        (app, window, camera)
    }

    fn aspect_of(app: &App, camera: Entity) -> f32 {
        match app.world().get::<Projection>(camera).unwrap() {
            Projection::Perspective(p) => p.aspect_ratio,
            _ => panic!("expected a perspective projection"),
        }
    }

    #[test]
    fn test_resize_updates_aspect_and_viewport() {
        let (mut app, window, camera) = test_app();
        app.world_mut().write_message(WindowResized {
            window,
            width: 1280.0,
            height: 720.0,
        });
        app.update();

        assert_eq!(aspect_of(&app, camera), 1280.0 / 720.0);
        assert_eq!(
            *app.world().resource::<ViewportSize>(),
            ViewportSize {
                width: 1280.0,
                height: 720.0
            }
        );

        app.world_mut().write_message(WindowResized {
            window,
            width: 600.0,
            height: 800.0,
        });
        app.update();
        assert_eq!(aspect_of(&app, camera), 600.0 / 800.0);
    }

    #[test]
    fn test_zero_height_keeps_projection() {
        let (mut app, window, camera) = test_app();
        let before = aspect_of(&app, camera);
        app.world_mut().write_message(WindowResized {
            window,
            width: 800.0,
            height: 0.0,
        });
        app.update();
        assert_eq!(aspect_of(&app, camera), before);
        assert!(!app.world().resource::<ViewportSize>().is_valid());
    }

    #[test]
    fn test_other_windows_are_ignored() {
        let (mut app, _, camera) = test_app();
        let before = aspect_of(&app, camera);
        let other = app.world_mut().spawn_empty().id();
        app.world_mut().write_message(WindowResized {
            window: other,
            width: 100.0,
            height: 50.0,
        });
        app.update();
        assert_eq!(aspect_of(&app, camera), before);
    }
}
