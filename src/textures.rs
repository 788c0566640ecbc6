//! Texture requests and their load state.
//!
//! Every texture a body asks for goes through [`TextureRegistry`], which keeps
//! the handle together with a coarse load state so callers can tell whether an
//! asset is still pending, ready, or failed. Loads never block: materials render
//! with their default color until the image arrives.

use bevy::asset::LoadState;
use bevy::prelude::*;
use std::collections::HashMap;

/// Plugin tracking the load state of requested textures
pub struct TexturesPlugin;

impl Plugin for TexturesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TextureRegistry>()
            .add_systems(Update, poll_texture_states);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureLoadState {
    Pending,
    Ready,
    Failed,
}

impl TextureLoadState {
    /// Collapse Bevy's asset load state into the three states bodies care about.
    pub fn from_load_state(state: Option<&LoadState>) -> Self {
        match state {
            Some(LoadState::Loaded) => TextureLoadState::Ready,
            Some(LoadState::Failed(_)) => TextureLoadState::Failed,
            _ => TextureLoadState::Pending,
        }
    }
}

struct TextureEntry {
    handle: Handle<Image>,
    state: TextureLoadState,
}

/// All textures requested so far, keyed by asset path
#[derive(Resource, Default)]
pub struct TextureRegistry {
    entries: HashMap<String, TextureEntry>,
    settled_reported: bool,
}

impl TextureRegistry {
    pub fn handle(&self, path: &str) -> Option<Handle<Image>> {
        self.entries.get(path).map(|e| e.handle.clone())
    }

    pub fn state(&self, path: &str) -> Option<TextureLoadState> {
        self.entries.get(path).map(|e| e.state)
    }

    /// Register a freshly issued load. Re-registering a path keeps the first handle.
    pub fn insert(&mut self, path: &str, handle: Handle<Image>) -> Handle<Image> {
        self.entries
            .entry(path.to_owned())
            .or_insert(TextureEntry {
                handle,
                state: TextureLoadState::Pending,
            })
            .handle
            .clone()
    }

    /// Record a new state for `path`. Returns true when the state actually changed.
    pub fn set_state(&mut self, path: &str, state: TextureLoadState) -> bool {
        match self.entries.get_mut(path) {
            Some(entry) if entry.state != state => {
                entry.state = state;
                true
            }
            _ => false,
        }
    }

    pub fn pending_count(&self) -> usize {
        self.entries
            .values()
            .filter(|e| e.state == TextureLoadState::Pending)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.entries
            .values()
            .filter(|e| e.state == TextureLoadState::Failed)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_settled(&self) -> bool {
        !self.entries.is_empty() && self.pending_count() == 0
    }
}

/// Seam between the body factory and wherever textures come from.
pub trait TextureSource {
    fn request(&mut self, path: &str) -> Handle<Image>;
}

/// [`TextureSource`] backed by the asset server; every request is recorded in the registry.
pub struct AssetServerTextures<'a> {
    pub server: &'a AssetServer,
    pub registry: &'a mut TextureRegistry,
}

impl TextureSource for AssetServerTextures<'_> {
    fn request(&mut self, path: &str) -> Handle<Image> {
        if let Some(handle) = self.registry.handle(path) {
            return handle;
        }
        let handle: Handle<Image> = self.server.load(path.to_owned());
        self.registry.insert(path, handle)
    }
}

/// Move pending textures to ready/failed as the asset server reports progress
pub fn poll_texture_states(asset_server: Res<AssetServer>, mut registry: ResMut<TextureRegistry>) {
    if registry.settled_reported || registry.pending_count() == 0 {
        return;
    }

    let updates: Vec<(String, TextureLoadState)> = registry
        .entries
        .iter()
        .filter(|(_, e)| e.state == TextureLoadState::Pending)
        .map(|(path, e)| {
            let load_state = asset_server.get_load_state(e.handle.id());
            (
                path.clone(),
                TextureLoadState::from_load_state(load_state.as_ref()),
            )
        })
        .collect();

    for (path, state) in updates {
        if registry.set_state(&path, state) && state == TextureLoadState::Failed {
            warn!("Texture '{}' failed to load; keeping default material", path);
        }
    }

    if registry.is_settled() {
        registry.settled_reported = true;
        info!(
            "Textures settled: {} ready, {} failed",
            registry.len() - registry.failed_count(),
            registry.failed_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_state_mapping() {
        assert_eq!(
            TextureLoadState::from_load_state(None),
            TextureLoadState::Pending
        );
        assert_eq!(
            TextureLoadState::from_load_state(Some(&LoadState::NotLoaded)),
            TextureLoadState::Pending
        );
        assert_eq!(
            TextureLoadState::from_load_state(Some(&LoadState::Loading)),
            TextureLoadState::Pending
        );
        assert_eq!(
            TextureLoadState::from_load_state(Some(&LoadState::Loaded)),
            TextureLoadState::Ready
        );
    }

    #[test]
    fn test_registry_tracks_states() {
        let mut registry = TextureRegistry::default();
        assert!(!registry.is_settled(), "empty registry is not settled");

        registry.insert("earth.png", Handle::default());
        registry.insert("clouds.jpg", Handle::default());
        assert_eq!(registry.state("earth.png"), Some(TextureLoadState::Pending));
        assert_eq!(registry.pending_count(), 2);

        assert!(registry.set_state("earth.png", TextureLoadState::Ready));
        assert!(!registry.set_state("earth.png", TextureLoadState::Ready));
        assert!(!registry.set_state("missing.png", TextureLoadState::Ready));
        assert!(!registry.is_settled());

        assert!(registry.set_state("clouds.jpg", TextureLoadState::Failed));
        assert!(registry.is_settled());
        assert_eq!(registry.failed_count(), 1);
    }

    #[test]
    fn test_insert_keeps_first_entry() {
        let mut registry = TextureRegistry::default();
        registry.insert("sun.jpg", Handle::default());
        registry.set_state("sun.jpg", TextureLoadState::Ready);
        registry.insert("sun.jpg", Handle::default());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.state("sun.jpg"), Some(TextureLoadState::Ready));
    }
}
