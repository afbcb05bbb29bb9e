//! PlotGuard — grid plot protection for shared voxel worlds.
//!
//! Worlds under plot control are cut into a regular grid of square plots
//! separated by roads. Every mutating world action (block placement,
//! explosions, PvP, entity motion, liquid spread, plot entry) is funneled
//! through a pipeline that resolves the acting position to a plot, notifies
//! external subscribers through a cancellable event, and applies the
//! ownership policy.
//!
//! This crate is structured in a decentralized way:
//! - **[grid](grid)** — World position to plot coordinate math
//! - **[plot](plot)** — Plot records and identity
//! - **[settings](settings)** — Per-world protection settings
//! - **[registry](registry)** — World load/unload lifecycle
//! - **[directory](directory)** — Plot lookup interface and in-memory store
//! - **[events](events)** — Cancellable plot events and the subscriber bus
//! - **[policy](policy)** — Permission decisions
//! - **[pipeline](pipeline)** — Action interception pipeline
//! - **[transition](transition)** — Plot enter/leave detection
//!
//! The host runtime (worlds, entities, players, persistence) stays outside:
//! it supplies a [`directory::PlotDirectory`] and receives cancellation flags
//! back through [`pipeline::ActionRequest`].

pub mod directory;
pub mod events;
pub mod grid;
pub mod pipeline;
pub mod plot;
pub mod policy;
pub mod registry;
pub mod settings;
pub mod transition;

pub use directory::{DirectoryError, MemoryDirectory, PlotDirectory};
pub use events::{EventBus, PlotEvent, Subscriber};
pub use grid::{BlockPos, PlotCoord, Vec3};
pub use pipeline::{ActionRequest, Outcome, Pipeline, Stage};
pub use plot::{Plot, PlotId};
pub use policy::{
    decide, Action, ActionKind, Actor, Decision, Reason, SaplingKind, PERM_ADMIN_BUILD_PLOT,
    PERM_ADMIN_BUILD_ROAD, PERM_ADMIN_PVP_BYPASS,
};
pub use registry::WorldRegistry;
pub use settings::{ConfigError, WorldSettings};
pub use transition::{enter_popup, transition, Transition};
