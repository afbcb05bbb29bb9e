//! Plot directory: the lookup interface the host supplies, plus an in-memory
//! store for tests and standalone embedding.

use std::collections::HashMap;

use thiserror::Error;

use crate::grid::PlotCoord;
use crate::plot::Plot;
use crate::registry::WorldRegistry;
use crate::settings::WorldSettings;

/// Plot directory collaborator failure (storage down, backend timeout).
///
/// The engine never propagates this: a failed lookup degrades to "no plot",
/// which puts build actions under road rules and denies by default.
#[derive(Debug, Error)]
#[error("plot directory unavailable: {0}")]
pub struct DirectoryError(pub String);

/// Read access to plot records and world settings.
///
/// Implementations must be safe for concurrent reads; the engine never
/// writes through this interface and treats every returned record as a
/// snapshot valid for one decision.
pub trait PlotDirectory {
    /// Settings for a world under plot control, or `None` when the world is
    /// not plot-managed (the engine is bypassed there).
    fn settings(&self, world: &str) -> Option<WorldSettings>;

    /// The plot record at a grid cell, or `None` for unclaimed ground.
    fn plot_at(&self, world: &str, coord: PlotCoord) -> Result<Option<Plot>, DirectoryError>;
}

/// In-memory directory: world settings behind a [`WorldRegistry`] and plots
/// keyed by world name and grid cell.
#[derive(Default)]
pub struct MemoryDirectory {
    worlds: WorldRegistry,
    plots: HashMap<(String, i32, i32), Plot>,
}

impl MemoryDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The world lifecycle registry backing [`PlotDirectory::settings`].
    #[must_use]
    pub fn worlds(&self) -> &WorldRegistry {
        &self.worlds
    }

    /// Insert a plot record under its own id. Returns false when the cell
    /// was already occupied (the existing record is replaced).
    pub fn insert(&mut self, plot: Plot) -> bool {
        let key = (plot.id.world.clone(), plot.id.x, plot.id.z);
        self.plots.insert(key, plot).is_none()
    }

    pub fn remove(&mut self, world: &str, coord: PlotCoord) -> Option<Plot> {
        self.plots.remove(&(world.to_string(), coord.x, coord.z))
    }

    #[must_use]
    pub fn get(&self, world: &str, coord: PlotCoord) -> Option<&Plot> {
        self.plots.get(&(world.to_string(), coord.x, coord.z))
    }
}

impl PlotDirectory for MemoryDirectory {
    fn settings(&self, world: &str) -> Option<WorldSettings> {
        self.worlds.get(world)
    }

    fn plot_at(&self, world: &str, coord: PlotCoord) -> Result<Option<Plot>, DirectoryError> {
        Ok(self.get(world, coord).cloned())
    }
}
