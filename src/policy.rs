//! Permission decisions for intercepted world actions.
//!
//! Pure logic: every decision depends only on the actor snapshot, the action,
//! the plot resolved at its position, and the world settings passed in.
//! Denials are normal values, never errors.

use std::collections::HashSet;

use crate::grid::{self, BlockPos};
use crate::plot::Plot;
use crate::settings::WorldSettings;

/// Admin permission: build and break inside any claimed plot.
pub const PERM_ADMIN_BUILD_PLOT: &str = "myplot.admin.build.plot";
/// Admin permission: build and break on roads.
pub const PERM_ADMIN_BUILD_ROAD: &str = "myplot.admin.build.road";
/// Admin permission: attack players in PvP-protected areas.
pub const PERM_ADMIN_PVP_BYPASS: &str = "myplot.admin.pvp.bypass";

/// Acting player snapshot: just enough for one decision. The engine never
/// stores actor identity beyond the decision it was taken for.
#[derive(Clone, Debug, Default)]
pub struct Actor {
    pub name: String,
    pub permissions: HashSet<String>,
}

impl Actor {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permissions: HashSet::new(),
        }
    }

    /// Grant a permission key on the snapshot.
    #[must_use]
    pub fn with_permission(mut self, key: &str) -> Self {
        self.permissions.insert(key.to_string());
        self
    }

    #[must_use]
    pub fn has_permission(&self, key: &str) -> bool {
        self.permissions.contains(key)
    }
}

/// Sapling species. Spruce grows wider leaves, so it needs more clearance
/// from the plot edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaplingKind {
    Oak,
    Spruce,
    Birch,
    Jungle,
}

impl SaplingKind {
    /// Blocks of clearance needed so grown leaves stay inside the plot.
    #[must_use]
    pub const fn leaf_margin(self) -> i32 {
        match self {
            Self::Spruce => 3,
            _ => 2,
        }
    }
}

/// One intercepted world action, normalized to the data policy needs.
#[derive(Clone, Debug)]
pub enum Action {
    BuildBlock {
        actor: Actor,
        pos: BlockPos,
    },
    BreakBlock {
        actor: Actor,
        pos: BlockPos,
    },
    /// Block interaction; carries the sapling species when the target is a
    /// sapling, which triggers edge-growth containment.
    Interact {
        actor: Actor,
        pos: BlockPos,
        sapling: Option<SaplingKind>,
    },
    SignEdit {
        actor: Actor,
        pos: BlockPos,
    },
    /// Explosion at `origin`; `blocks` is the affected block list, filtered
    /// in place by the pipeline.
    Explode {
        origin: BlockPos,
        blocks: Vec<BlockPos>,
    },
    EntityMotion {
        pos: BlockPos,
        is_player: bool,
    },
    LiquidSpread {
        pos: BlockPos,
    },
    EnterPlot {
        actor: Actor,
        pos: BlockPos,
    },
    LeavePlot {
        actor: Actor,
        pos: BlockPos,
    },
    /// PvP attack; resolved at the victim's position.
    Pvp {
        attacker: Actor,
        victim_pos: BlockPos,
    },
}

impl Action {
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::BuildBlock { .. } => ActionKind::BuildBlock,
            Self::BreakBlock { .. } => ActionKind::BreakBlock,
            Self::Interact { .. } => ActionKind::Interact,
            Self::SignEdit { .. } => ActionKind::SignEdit,
            Self::Explode { .. } => ActionKind::Explode,
            Self::EntityMotion { .. } => ActionKind::EntityMotion,
            Self::LiquidSpread { .. } => ActionKind::LiquidSpread,
            Self::EnterPlot { .. } => ActionKind::EnterPlot,
            Self::LeavePlot { .. } => ActionKind::LeavePlot,
            Self::Pvp { .. } => ActionKind::Pvp,
        }
    }

    /// The position the action resolves against (the victim's for PvP).
    #[must_use]
    pub const fn position(&self) -> BlockPos {
        match self {
            Self::BuildBlock { pos, .. }
            | Self::BreakBlock { pos, .. }
            | Self::Interact { pos, .. }
            | Self::SignEdit { pos, .. }
            | Self::EntityMotion { pos, .. }
            | Self::LiquidSpread { pos }
            | Self::EnterPlot { pos, .. }
            | Self::LeavePlot { pos, .. } => *pos,
            Self::Explode { origin, .. } => *origin,
            Self::Pvp { victim_pos, .. } => *victim_pos,
        }
    }

    /// The acting player, when the action has one.
    #[must_use]
    pub const fn actor(&self) -> Option<&Actor> {
        match self {
            Self::BuildBlock { actor, .. }
            | Self::BreakBlock { actor, .. }
            | Self::Interact { actor, .. }
            | Self::SignEdit { actor, .. }
            | Self::EnterPlot { actor, .. }
            | Self::LeavePlot { actor, .. } => Some(actor),
            Self::Pvp { attacker, .. } => Some(attacker),
            Self::Explode { .. } | Self::EntityMotion { .. } | Self::LiquidSpread { .. } => None,
        }
    }
}

/// Action kinds without payload, for traces and event dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    BuildBlock,
    BreakBlock,
    Interact,
    SignEdit,
    Explode,
    EntityMotion,
    LiquidSpread,
    EnterPlot,
    LeavePlot,
    Pvp,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::BuildBlock => "block place",
            Self::BreakBlock => "block break",
            Self::Interact => "interact",
            Self::SignEdit => "sign edit",
            Self::Explode => "explosion",
            Self::EntityMotion => "entity motion",
            Self::LiquidSpread => "liquid spread",
            Self::EnterPlot => "plot enter",
            Self::LeavePlot => "plot leave",
            Self::Pvp => "pvp",
        };
        f.write_str(name)
    }
}

/// Why a decision came out the way it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reason {
    /// Allowed through ownership, helper status, or an admin build key.
    Authorized,
    /// Allowed on the road through the road-build admin key.
    RoadBuildPermission,
    /// Allowed because no restriction applies.
    Unrestricted,
    /// Denied: roads are protected from non-admin building.
    RoadProtected,
    /// Denied: actor has no build rights on this plot.
    NotAuthorized,
    /// Denied: sapling too close to the plot edge, growth would spill over.
    EdgeGrowthRestricted,
    /// Denied: explosion origin resolves to no plot.
    NoPlotAtOrigin,
    /// Denied: world restricts non-player entity motion.
    NonPlayerMotionRestricted,
    /// Denied: world has liquid updates disabled.
    LiquidUpdatesDisabled,
    /// Denied: PvP is off in this plot.
    PvpDisabledInPlot,
    /// Denied: PvP is restricted world-wide.
    PvpDisabledInWorld,
    /// Denied: actor is on the plot's denied list.
    Denied,
}

/// Outcome of one policy evaluation. Produced and consumed within a single
/// pipeline invocation, never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    pub reason: Reason,
}

impl Decision {
    #[must_use]
    pub const fn allow(reason: Reason) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    #[must_use]
    pub const fn deny(reason: Reason) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }
}

/// Decide whether an action is allowed, given the plot resolved at its
/// position (`None` = road or unrecorded cell) and the world's settings.
///
/// Precedence is fixed: the first matching rule wins. Geometry and policy
/// never fail on valid input.
#[must_use]
pub fn decide(action: &Action, plot: Option<&Plot>, settings: &WorldSettings) -> Decision {
    match action {
        Action::BuildBlock { actor, pos }
        | Action::BreakBlock { actor, pos }
        | Action::SignEdit { actor, pos } => build_decision(actor, *pos, None, plot, settings),
        Action::Interact { actor, pos, sapling } => {
            build_decision(actor, *pos, *sapling, plot, settings)
        }
        Action::Explode { .. } => match plot {
            Some(_) => Decision::allow(Reason::Unrestricted),
            None => Decision::deny(Reason::NoPlotAtOrigin),
        },
        Action::EntityMotion { is_player, .. } => {
            if settings.restrict_entity_movement && !is_player {
                Decision::deny(Reason::NonPlayerMotionRestricted)
            } else {
                Decision::allow(Reason::Unrestricted)
            }
        }
        Action::LiquidSpread { .. } => {
            if settings.update_plot_liquids {
                Decision::allow(Reason::Unrestricted)
            } else {
                Decision::deny(Reason::LiquidUpdatesDisabled)
            }
        }
        Action::Pvp { attacker, .. } => pvp_decision(attacker, plot, settings),
        Action::EnterPlot { actor, .. } => match plot {
            Some(p) if p.is_denied(&actor.name) => Decision::deny(Reason::Denied),
            _ => Decision::allow(Reason::Unrestricted),
        },
        // Leaving is a notification; only an external override cancels it.
        Action::LeavePlot { .. } => Decision::allow(Reason::Unrestricted),
    }
}

fn build_decision(
    actor: &Actor,
    pos: BlockPos,
    sapling: Option<SaplingKind>,
    plot: Option<&Plot>,
    settings: &WorldSettings,
) -> Decision {
    let Some(plot) = plot else {
        // Road or unrecorded cell.
        return if actor.has_permission(PERM_ADMIN_BUILD_ROAD) {
            Decision::allow(Reason::RoadBuildPermission)
        } else {
            Decision::deny(Reason::RoadProtected)
        };
    };

    if !plot.can_build(&actor.name) && !actor.has_permission(PERM_ADMIN_BUILD_PLOT) {
        return Decision::deny(Reason::NotAuthorized);
    }

    // Even authorized players may not grow a tree whose leaves would end up
    // in the neighboring plot.
    if let Some(species) = sapling {
        if !grid::in_growth_box(plot.id.coord(), pos, settings, species.leaf_margin()) {
            return Decision::deny(Reason::EdgeGrowthRestricted);
        }
    }

    Decision::allow(Reason::Authorized)
}

fn pvp_decision(attacker: &Actor, plot: Option<&Plot>, settings: &WorldSettings) -> Decision {
    let bypass = attacker.has_permission(PERM_ADMIN_PVP_BYPASS);
    match plot {
        Some(plot) => {
            if (settings.restrict_pvp || !plot.pvp_enabled) && !bypass {
                Decision::deny(Reason::PvpDisabledInPlot)
            } else {
                Decision::allow(Reason::Unrestricted)
            }
        }
        None => {
            if settings.restrict_pvp && !bypass {
                Decision::deny(Reason::PvpDisabledInWorld)
            } else {
                Decision::allow(Reason::Unrestricted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::PlotId;

    fn settings() -> WorldSettings {
        WorldSettings {
            plot_size: 32,
            road_width: 7,
            ..WorldSettings::default()
        }
    }

    fn plot() -> Plot {
        let mut p = Plot::claimed(PlotId::new("plots", 0, 0), "Alice");
        p.helpers.push("Bob".to_string());
        p
    }

    fn build(actor: Actor) -> Action {
        Action::BuildBlock {
            actor,
            pos: BlockPos::new(5, 64, 5),
        }
    }

    #[test]
    fn each_authorization_path_is_sufficient() {
        let s = settings();
        let p = plot();
        for actor in [
            Actor::new("Alice"),
            Actor::new("Bob"),
            Actor::new("Carol").with_permission(PERM_ADMIN_BUILD_PLOT),
        ] {
            assert!(decide(&build(actor), Some(&p), &s).allowed);
        }

        let mut wildcard = plot();
        wildcard.helpers.push("*".to_string());
        assert!(decide(&build(Actor::new("Dave")), Some(&wildcard), &s).allowed);
    }

    #[test]
    fn strangers_are_denied_on_claimed_plots() {
        let d = decide(&build(Actor::new("Carol")), Some(&plot()), &settings());
        assert_eq!(d, Decision::deny(Reason::NotAuthorized));
    }

    #[test]
    fn road_building_requires_the_road_key() {
        let s = settings();
        let denied = decide(&build(Actor::new("Alice")), None, &s);
        assert_eq!(denied, Decision::deny(Reason::RoadProtected));

        let admin = Actor::new("Alice").with_permission(PERM_ADMIN_BUILD_ROAD);
        assert_eq!(
            decide(&build(admin), None, &s),
            Decision::allow(Reason::RoadBuildPermission)
        );
    }

    #[test]
    fn edge_sapling_denied_even_for_the_owner() {
        let s = settings();
        let p = plot();
        let sapling_at = |pos, species| Action::Interact {
            actor: Actor::new("Alice"),
            pos,
            sapling: Some(species),
        };

        // Oak margin is 2: [2, 30) on both axes.
        let near_edge = decide(&sapling_at(BlockPos::new(1, 64, 5), SaplingKind::Oak), Some(&p), &s);
        assert_eq!(near_edge, Decision::deny(Reason::EdgeGrowthRestricted));
        let inside = decide(&sapling_at(BlockPos::new(5, 64, 5), SaplingKind::Oak), Some(&p), &s);
        assert!(inside.allowed);

        // Spruce needs one more block of clearance.
        let spruce = decide(
            &sapling_at(BlockPos::new(2, 64, 5), SaplingKind::Spruce),
            Some(&p),
            &s,
        );
        assert_eq!(spruce, Decision::deny(Reason::EdgeGrowthRestricted));
        let oak_same_spot = decide(
            &sapling_at(BlockPos::new(2, 64, 5), SaplingKind::Oak),
            Some(&p),
            &s,
        );
        assert!(oak_same_spot.allowed);
    }

    #[test]
    fn plain_interact_ignores_growth_containment() {
        let action = Action::Interact {
            actor: Actor::new("Alice"),
            pos: BlockPos::new(0, 64, 0),
            sapling: None,
        };
        assert!(decide(&action, Some(&plot()), &settings()).allowed);
    }

    #[test]
    fn explosion_requires_a_plot_at_origin() {
        let s = settings();
        let action = Action::Explode {
            origin: BlockPos::new(5, 64, 5),
            blocks: Vec::new(),
        };
        assert!(decide(&action, Some(&plot()), &s).allowed);
        assert_eq!(
            decide(&action, None, &s),
            Decision::deny(Reason::NoPlotAtOrigin)
        );
    }

    #[test]
    fn entity_motion_gate() {
        let mut s = settings();
        s.restrict_entity_movement = true;
        let mob = Action::EntityMotion {
            pos: BlockPos::new(0, 64, 0),
            is_player: false,
        };
        let player = Action::EntityMotion {
            pos: BlockPos::new(0, 64, 0),
            is_player: true,
        };
        assert_eq!(
            decide(&mob, None, &s),
            Decision::deny(Reason::NonPlayerMotionRestricted)
        );
        assert!(decide(&player, None, &s).allowed);
        s.restrict_entity_movement = false;
        assert!(decide(&mob, None, &s).allowed);
    }

    #[test]
    fn liquid_spread_gate() {
        let mut s = settings();
        let action = Action::LiquidSpread {
            pos: BlockPos::new(0, 64, 0),
        };
        s.update_plot_liquids = false;
        assert_eq!(
            decide(&action, None, &s),
            Decision::deny(Reason::LiquidUpdatesDisabled)
        );
        s.update_plot_liquids = true;
        assert!(decide(&action, None, &s).allowed);
    }

    #[test]
    fn pvp_truth_table() {
        let attack = |attacker| Action::Pvp {
            attacker,
            victim_pos: BlockPos::new(5, 64, 5),
        };
        let mut s = settings();
        let mut p = plot();

        // World restriction wins even when the plot enables PvP.
        s.restrict_pvp = true;
        p.pvp_enabled = true;
        assert_eq!(
            decide(&attack(Actor::new("Eve")), Some(&p), &s),
            Decision::deny(Reason::PvpDisabledInPlot)
        );

        // Plot flag wins when the world does not restrict.
        s.restrict_pvp = false;
        p.pvp_enabled = false;
        assert_eq!(
            decide(&attack(Actor::new("Eve")), Some(&p), &s),
            Decision::deny(Reason::PvpDisabledInPlot)
        );

        p.pvp_enabled = true;
        assert!(decide(&attack(Actor::new("Eve")), Some(&p), &s).allowed);

        // Bypass key wins over both.
        s.restrict_pvp = true;
        p.pvp_enabled = false;
        let admin = Actor::new("Eve").with_permission(PERM_ADMIN_PVP_BYPASS);
        assert!(decide(&attack(admin), Some(&p), &s).allowed);
    }

    #[test]
    fn pvp_outside_plots_follows_the_world_flag() {
        let attack = |attacker| Action::Pvp {
            attacker,
            victim_pos: BlockPos::new(35, 64, 0),
        };
        let mut s = settings();
        s.restrict_pvp = true;
        assert_eq!(
            decide(&attack(Actor::new("Eve")), None, &s),
            Decision::deny(Reason::PvpDisabledInWorld)
        );
        let admin = Actor::new("Eve").with_permission(PERM_ADMIN_PVP_BYPASS);
        assert!(decide(&attack(admin), None, &s).allowed);
        s.restrict_pvp = false;
        assert!(decide(&attack(Actor::new("Eve")), None, &s).allowed);
    }

    #[test]
    fn denied_players_cannot_enter() {
        let mut p = plot();
        p.denied.push("Mallory".to_string());
        let enter = |name| Action::EnterPlot {
            actor: Actor::new(name),
            pos: BlockPos::new(5, 64, 5),
        };
        assert_eq!(
            decide(&enter("Mallory"), Some(&p), &settings()),
            Decision::deny(Reason::Denied)
        );
        assert!(decide(&enter("Bob"), Some(&p), &settings()).allowed);
    }

    #[test]
    fn leaving_is_always_allowed() {
        let action = Action::LeavePlot {
            actor: Actor::new("Mallory"),
            pos: BlockPos::new(5, 64, 5),
        };
        assert!(decide(&action, Some(&plot()), &settings()).allowed);
        assert!(decide(&action, None, &settings()).allowed);
    }
}
