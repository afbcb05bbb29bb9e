//! Action interception pipeline: resolve the plot, notify subscribers, apply
//! policy, write the final cancellation back to the originating action.

use std::sync::Arc;

use crate::directory::PlotDirectory;
use crate::events::{EventBus, PlotEvent, Subscriber};
use crate::grid;
use crate::plot::Plot;
use crate::policy::{self, Action, ActionKind, Decision, Reason};

/// One inbound world action plus its current cancellation flag.
///
/// `cancelled` mirrors the host event's flag: seed it from the event before
/// the run and copy it back after. For explosions the block list is filtered
/// in place as well.
#[derive(Clone, Debug)]
pub struct ActionRequest {
    pub world: String,
    pub action: Action,
    pub cancelled: bool,
}

impl ActionRequest {
    #[must_use]
    pub fn new(world: impl Into<String>, action: Action) -> Self {
        Self {
            world: world.into(),
            action,
            cancelled: false,
        }
    }
}

/// Terminal pipeline state for one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Decision applied; the flag reflects subscribers plus the policy floor.
    Applied,
    /// Request arrived already cancelled. It was still resolved and notified,
    /// but its flag can never be cleared by this run.
    ShortCircuited,
    /// World is not under plot control; request untouched.
    Bypassed,
}

/// Outcome of one pipeline run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub stage: Stage,
    /// Policy decision. Absent when the run was bypassed or the notification
    /// was suppressed (entering unclaimed ground).
    pub decision: Option<Decision>,
    /// Final cancellation flag, as written back to the request.
    pub cancelled: bool,
}

/// Intercepts world actions and applies plot policy.
///
/// Invoked synchronously, once per action, on whatever thread delivers it.
/// Holds no mutable state of its own: settings and plots are read-only
/// snapshots supplied by the directory per decision.
pub struct Pipeline<D: PlotDirectory> {
    directory: D,
    bus: EventBus,
}

impl<D: PlotDirectory> Pipeline<D> {
    #[must_use]
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            bus: EventBus::new(),
        }
    }

    /// Register an external subscriber; it will see every intercepted action.
    pub fn register(&mut self, subscriber: Arc<dyn Subscriber>) {
        self.bus.register(subscriber);
    }

    #[must_use]
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Run one action through the pipeline.
    ///
    /// Walks Received → Resolved → Notified → Decided → Applied. The final
    /// cancellation flag (and, for explosions, the filtered block list) is
    /// written back into the request before returning.
    pub fn run(&self, request: &mut ActionRequest) -> Outcome {
        let Some(settings) = self.directory.settings(&request.world) else {
            return Outcome {
                stage: Stage::Bypassed,
                decision: None,
                cancelled: request.cancelled,
            };
        };

        let short_circuited = request.cancelled;
        let pos = request.action.position();
        let coord = grid::plot_coord_at(pos.x, pos.z, &settings);
        let plot = coord.and_then(|c| self.lookup(&request.world, c));

        // Entering unclaimed ground raises no notification at all.
        if request.action.kind() == ActionKind::EnterPlot
            && plot.as_ref().map_or(true, Plot::is_unclaimed)
        {
            return Outcome {
                stage: if short_circuited {
                    Stage::ShortCircuited
                } else {
                    Stage::Applied
                },
                decision: None,
                cancelled: request.cancelled,
            };
        }

        let mut event = PlotEvent {
            kind: request.action.kind(),
            world: request.world.clone(),
            coord,
            plot: plot.clone(),
            actor: request.action.actor().map(|a| a.name.clone()),
            position: pos,
            cancelled: request.cancelled,
        };
        self.bus.dispatch(&mut event);

        let mut decision = policy::decide(&request.action, plot.as_ref(), &settings);

        // Explosions keep only the blocks inside the plot they started in.
        // An already-cancelled explosion is observed but left untouched.
        if decision.allowed && !short_circuited {
            if let (Action::Explode { blocks, .. }, Some(p)) =
                (&mut request.action, plot.as_ref())
            {
                let c = p.id.coord();
                debug_assert!(
                    grid::contains(c, pos, &settings),
                    "plot {c} does not contain its own explosion origin"
                );
                if grid::contains(c, pos, &settings) {
                    blocks.retain(|b| grid::contains(c, *b, &settings));
                } else {
                    decision = Decision::deny(Reason::NoPlotAtOrigin);
                }
            }
        }

        // Policy floor: a denial stands no matter what subscribers set; an
        // allow leaves the subscribers' flag in place.
        let cancelled = !decision.allowed || event.cancelled || short_circuited;

        if !decision.allowed {
            match coord {
                Some(c) => log::debug!(
                    "plotguard: cancelled {} in {} at plot {c} ({:?})",
                    event.kind,
                    request.world,
                    decision.reason
                ),
                None => log::debug!(
                    "plotguard: cancelled {} in {} off-plot ({:?})",
                    event.kind,
                    request.world,
                    decision.reason
                ),
            }
        }

        request.cancelled = cancelled;
        Outcome {
            stage: if short_circuited {
                Stage::ShortCircuited
            } else {
                Stage::Applied
            },
            decision: Some(decision),
            cancelled,
        }
    }

    fn lookup(&self, world: &str, coord: grid::PlotCoord) -> Option<Plot> {
        match self.directory.plot_at(world, coord) {
            Ok(plot) => plot,
            Err(e) => {
                log::warn!("plotguard: plot lookup failed in {world}: {e}");
                None
            }
        }
    }
}
