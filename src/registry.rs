//! World load/unload lifecycle: which worlds are under plot control.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::settings::{ConfigError, WorldSettings};

/// Name-keyed settings for every world currently under plot control.
///
/// Owned by the host and shared with the engine. A world with no entry here
/// is not plot-managed and all actions there bypass protection.
#[derive(Default)]
pub struct WorldRegistry {
    worlds: RwLock<HashMap<String, WorldSettings>>,
}

impl WorldRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a world under plot control. Settings are validated; invalid
    /// settings are rejected rather than defaulted.
    pub fn load(&self, world: impl Into<String>, settings: WorldSettings) -> Result<(), ConfigError> {
        settings.validate()?;
        let world = world.into();
        if let Ok(mut map) = self.worlds.write() {
            log::debug!("plotguard: world {world} loaded");
            map.insert(world, settings);
        }
        Ok(())
    }

    /// Take a world out of plot control. Returns whether it was loaded.
    pub fn unload(&self, world: &str) -> bool {
        let Ok(mut map) = self.worlds.write() else {
            return false;
        };
        let removed = map.remove(world).is_some();
        if removed {
            log::debug!("plotguard: world {world} unloaded");
        }
        removed
    }

    #[must_use]
    pub fn get(&self, world: &str) -> Option<WorldSettings> {
        self.worlds.read().ok()?.get(world).copied()
    }

    #[must_use]
    pub fn is_loaded(&self, world: &str) -> bool {
        self.get(world).is_some()
    }
}
