//! Plot enter/leave detection for player movement.

use crate::directory::PlotDirectory;
use crate::grid::{self, Vec3};
use crate::plot::Plot;

/// A plot boundary crossing between two sequential positions.
#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    Enter(Plot),
    Leave(Plot),
}

/// Detect a boundary crossing between `from` and `to`.
///
/// Entering unclaimed ground raises nothing (road suppression); leaving a
/// claimed plot onto the road raises [`Transition::Leave`]. Movement inside
/// one cell, or across cells none of which hold a plot record, is `None`, so
/// each crossing fires exactly once.
pub fn transition<D: PlotDirectory>(
    directory: &D,
    world: &str,
    from: Vec3,
    to: Vec3,
) -> Option<Transition> {
    let settings = directory.settings(world)?;
    let from_block = from.block_pos();
    let to_block = to.block_pos();
    let from_coord = grid::plot_coord_at(from_block.x, from_block.z, &settings);
    let to_coord = grid::plot_coord_at(to_block.x, to_block.z, &settings);
    if from_coord == to_coord {
        return None;
    }

    if let Some(coord) = to_coord {
        let plot = directory.plot_at(world, coord).ok().flatten();
        if let Some(plot) = plot {
            if plot.is_unclaimed() {
                return None;
            }
            return Some(Transition::Enter(plot));
        }
    }
    let coord = from_coord?;
    let plot = directory.plot_at(world, coord).ok().flatten()?;
    Some(Transition::Leave(plot))
}

/// Two-line enter popup: the plot id over the owner line (or "Available"),
/// with the shorter line space-padded so both appear centered.
#[must_use]
pub fn enter_popup(plot: &Plot) -> String {
    let header = format!("Plot {}", plot.id);
    let footer = if plot.owner.is_empty() {
        "Available".to_string()
    } else {
        format!("Owner: {}", plot.owner)
    };
    let padding = (header.chars().count() as i32 - footer.chars().count() as i32).div_euclid(2);
    let header_pad = " ".repeat((-padding).max(0) as usize);
    let footer_pad = " ".repeat(padding.max(0) as usize);
    format!("{header_pad}{header}\n{footer_pad}{footer}")
}
