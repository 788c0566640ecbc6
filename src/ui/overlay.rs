//! Info overlays: one text panel per body, at most one visible.

use anyhow::{Result, bail};
use bevy::prelude::*;
use std::collections::HashSet;

use crate::bodies::catalog;
use crate::ui::CapturesPointer;

/// Hidden text panel describing one body
#[derive(Component, Clone, Debug)]
pub struct InfoPanel {
    pub name: String,
}

/// Which info panel is showing. `reveal`/`hide` are the only ways to change it.
#[derive(Resource, Default, Debug)]
pub struct InfoOverlays {
    registered: HashSet<String>,
    shown: Option<String>,
}

impl InfoOverlays {
    pub fn register(&mut self, name: impl Into<String>) {
        self.registered.insert(name.into());
    }

    pub fn shown(&self) -> Option<&str> {
        self.shown.as_deref()
    }

    /// Show the panel for `name`, replacing whatever was shown.
    ///
    /// Unknown names hide the current panel and return an error.
    pub fn reveal(&mut self, name: &str) -> Result<()> {
        if !self.registered.contains(name) {
            self.shown = None;
            bail!("no info overlay registered for '{}'", name);
        }
        if self.shown.as_deref() != Some(name) {
            self.shown = Some(name.to_owned());
        }
        Ok(())
    }

    /// Hide the shown panel, if any. Returns the name that was hidden.
    pub fn hide(&mut self) -> Option<String> {
        self.shown.take()
    }
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Spawn one hidden panel per catalog body
pub fn spawn_info_panels(mut commands: Commands, mut overlays: ResMut<InfoOverlays>) {
    let bodies = match catalog::solar_system() {
        Ok(bodies) => bodies,
        Err(err) => {
            error!("Invalid body catalog, no info panels: {:#}", err);
            return;
        }
    };

    for body in bodies {
        commands.spawn((
            Node {
                display: Display::None,
                position_type: PositionType::Absolute,
                left: Val::Px(24.0),
                bottom: Val::Px(24.0),
                width: Val::Px(320.0),
                padding: UiRect::all(Val::Px(14.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.02, 0.04, 0.08, 0.8)),
            InfoPanel {
                name: body.name.clone(),
            },
            CapturesPointer,
            Name::new(format!("{} info", body.name)),
            children![
                (
                    Text::new(title_case(&body.name)),
                    TextFont {
                        font_size: 26.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ),
                (
                    Text::new(body.description.clone()),
                    TextFont {
                        font_size: 15.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.8, 0.85, 0.9)),
                ),
            ],
        ));
        overlays.register(body.name);
    }
}

/// Show the selected panel and hide the others
pub fn sync_overlay_display(
    overlays: Res<InfoOverlays>,
    mut panels: Query<(&InfoPanel, &mut Node)>,
) {
    if !overlays.is_changed() {
        return;
    }
    for (panel, mut node) in panels.iter_mut() {
        let display = if overlays.shown() == Some(panel.name.as_str()) {
            Display::Flex
        } else {
            Display::None
        };
        if node.display != display {
            node.display = display;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<InfoOverlays>()
            .add_systems(Startup, spawn_info_panels)
            .add_systems(Update, sync_overlay_display);
        app.update();
        app
    }

    fn visible_panels(app: &mut App) -> Vec<String> {
        let world = app.world_mut();
        let mut query = world.query::<(&InfoPanel, &Node)>();
        query
            .iter(world)
            .filter(|(_, node)| node.display != Display::None)
            .map(|(panel, _)| panel.name.clone())
            .collect()
    }

    #[test]
    fn test_one_panel_per_body_hidden_initially() {
        let mut app = test_app();
        let world = app.world_mut();
        let count = world.query::<&InfoPanel>().iter(world).count();
        assert_eq!(count, 9);
        assert!(visible_panels(&mut app).is_empty());
    }

    #[test]
    fn test_reveal_sun_shows_exactly_one() {
        let mut app = test_app();
        app.world_mut()
            .resource_mut::<InfoOverlays>()
            .reveal("sun")
            .unwrap();
        app.update();
        assert_eq!(visible_panels(&mut app), vec!["sun".to_owned()]);

        app.world_mut()
            .resource_mut::<InfoOverlays>()
            .reveal("earth")
            .unwrap();
        app.update();
        assert_eq!(visible_panels(&mut app), vec!["earth".to_owned()]);
    }

    #[test]
    fn test_unknown_name_hides_everything() {
        let mut app = test_app();
        {
            let mut overlays = app.world_mut().resource_mut::<InfoOverlays>();
            overlays.reveal("mars").unwrap();
            assert!(overlays.reveal("pluto").is_err());
            assert_eq!(overlays.shown(), None);
        }
        app.update();
        assert!(visible_panels(&mut app).is_empty());
    }

    #[test]
    fn test_hide_without_shown_panel_is_noop() {
        let mut overlays = InfoOverlays::default();
        assert_eq!(overlays.hide(), None);
        overlays.register("venus");
        overlays.reveal("venus").unwrap();
        assert_eq!(overlays.hide(), Some("venus".to_owned()));
        assert_eq!(overlays.hide(), None);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("jupiter"), "Jupiter");
        assert_eq!(title_case(""), "");
    }
}
