//! Grid geometry: world position ↔ plot coordinate ↔ plot-local offset.
//!
//! Decoupled from plot records and policy so the math can be reused or tested
//! independently. Every call site that touches plot bounds (build gating,
//! explosion filtering, growth containment, enter/leave detection) goes
//! through these functions so the grid never disagrees with itself.

use serde::{Deserialize, Serialize};

use crate::settings::WorldSettings;

/// A block position in world space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// An entity position in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The block containing this position (floor on each axis).
    #[must_use]
    pub fn block_pos(&self) -> BlockPos {
        BlockPos::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }
}

/// Grid cell indices on the XZ plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlotCoord {
    pub x: i32,
    pub z: i32,
}

impl PlotCoord {
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl std::fmt::Display for PlotCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({};{})", self.x, self.z)
    }
}

/// Which grid cell contains the column at (x, z), or `None` when the column
/// sits on the road margin between cells.
///
/// Cells have edge `plot_size + road_width`; the buildable area occupies the
/// first `plot_size` blocks of each cell on both axes and the road band the
/// rest. Floor division keeps the grid exact for negative coordinates.
#[must_use]
pub fn plot_coord_at(x: i32, z: i32, settings: &WorldSettings) -> Option<PlotCoord> {
    let total = settings.total_size();
    if x.rem_euclid(total) >= settings.plot_size || z.rem_euclid(total) >= settings.plot_size {
        return None;
    }
    Some(PlotCoord::new(x.div_euclid(total), z.div_euclid(total)))
}

/// Minimum corner of a plot's buildable area. The road margin is excluded;
/// y is always 0 because plots span the full world height.
#[must_use]
pub fn plot_origin(coord: PlotCoord, settings: &WorldSettings) -> BlockPos {
    let total = settings.total_size();
    BlockPos::new(coord.x * total, 0, coord.z * total)
}

/// Whether a block lies inside a plot's buildable area, half-open on x and z:
/// `[origin, origin + plot_size)`.
#[must_use]
pub fn contains(coord: PlotCoord, pos: BlockPos, settings: &WorldSettings) -> bool {
    let origin = plot_origin(coord, settings);
    pos.x >= origin.x
        && pos.x < origin.x + settings.plot_size
        && pos.z >= origin.z
        && pos.z < origin.z + settings.plot_size
}

/// Whether a block lies inside the plot shrunk by `margin` on every side:
/// `[origin + margin, origin + plot_size - margin)` on x and z.
///
/// Natural growth (tree leaves) started outside this box would spill past the
/// plot edge, so sapling interaction there is blocked.
#[must_use]
pub fn in_growth_box(coord: PlotCoord, pos: BlockPos, settings: &WorldSettings, margin: i32) -> bool {
    let origin = plot_origin(coord, settings);
    pos.x >= origin.x + margin
        && pos.x < origin.x + settings.plot_size - margin
        && pos.z >= origin.z + margin
        && pos.z < origin.z + settings.plot_size - margin
}
