//! Plot records and identity.
//!
//! Decoupled from storage and policy so ownership rules can be reused or
//! tested independently. The engine only ever reads these records; mutation
//! belongs to the directory/persistence layer.

use serde::{Deserialize, Serialize};

use crate::grid::PlotCoord;

/// Identifies one grid cell in one world. Unique per world.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlotId {
    pub world: String,
    pub x: i32,
    pub z: i32,
}

impl PlotId {
    #[must_use]
    pub fn new(world: impl Into<String>, x: i32, z: i32) -> Self {
        Self {
            world: world.into(),
            x,
            z,
        }
    }

    /// The grid cell this plot occupies.
    #[must_use]
    pub const fn coord(&self) -> PlotCoord {
        PlotCoord {
            x: self.x,
            z: self.z,
        }
    }
}

impl std::fmt::Display for PlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({};{})", self.x, self.z)
    }
}

/// A plot record: owner, cooperators, denied players, and flags.
///
/// An empty `owner` marks the plot unclaimed; unclaimed plots raise no enter
/// notification and grant no build rights through ownership.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    pub id: PlotId,
    pub owner: String,
    pub helpers: Vec<String>,
    pub denied: Vec<String>,
    pub pvp_enabled: bool,
}

impl Plot {
    /// A claimed plot with no helpers, no denied players, and PvP off.
    #[must_use]
    pub fn claimed(id: PlotId, owner: impl Into<String>) -> Self {
        Self {
            id,
            owner: owner.into(),
            helpers: Vec::new(),
            denied: Vec::new(),
            pvp_enabled: false,
        }
    }

    #[must_use]
    pub fn is_unclaimed(&self) -> bool {
        self.owner.is_empty()
    }

    /// Named helper or the `"*"` wildcard. Name comparison ignores case.
    #[must_use]
    pub fn is_helper(&self, name: &str) -> bool {
        self.helpers
            .iter()
            .any(|h| h == "*" || h.eq_ignore_ascii_case(name))
    }

    /// Whether the named player is barred from entering this plot.
    #[must_use]
    pub fn is_denied(&self, name: &str) -> bool {
        self.denied
            .iter()
            .any(|d| d == "*" || d.eq_ignore_ascii_case(name))
    }

    /// Whether the named player may build here through ownership: owner or
    /// helper (wildcard included). Administrative permissions are checked
    /// separately by the policy engine.
    #[must_use]
    pub fn can_build(&self, name: &str) -> bool {
        (!self.owner.is_empty() && self.owner.eq_ignore_ascii_case(name)) || self.is_helper(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot() -> Plot {
        Plot {
            id: PlotId::new("plots", 1, -2),
            owner: "Alice".to_string(),
            helpers: vec!["Bob".to_string()],
            denied: vec!["Mallory".to_string()],
            pvp_enabled: false,
        }
    }

    #[test]
    fn ownership_and_helpers_grant_build() {
        let p = plot();
        assert!(p.can_build("Alice"));
        assert!(p.can_build("alice")); // case-insensitive
        assert!(p.can_build("Bob"));
        assert!(!p.can_build("Carol"));
    }

    #[test]
    fn wildcard_helper_grants_everyone() {
        let mut p = plot();
        p.helpers.push("*".to_string());
        assert!(p.can_build("Carol"));
        assert!(p.is_helper("anyone"));
    }

    #[test]
    fn unclaimed_owner_never_matches() {
        let mut p = plot();
        p.owner.clear();
        assert!(p.is_unclaimed());
        assert!(!p.can_build(""));
    }

    #[test]
    fn denied_list_checks_names_and_wildcard() {
        let mut p = plot();
        assert!(p.is_denied("mallory"));
        assert!(!p.is_denied("Bob"));
        p.denied.push("*".to_string());
        assert!(p.is_denied("Bob"));
    }

    #[test]
    fn id_renders_as_coordinate_pair() {
        assert_eq!(plot().id.to_string(), "(1;-2)");
    }
}
