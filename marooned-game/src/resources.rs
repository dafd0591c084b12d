//! Resource ledger and the single keyed mutation rule.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    ENERGY_MAX, ENERGY_MIN, START_ENERGY, START_FANG, START_FOOD, START_OBSIDIAN, START_STONE,
    START_VINE, START_WOOD,
};

/// The fixed enumeration of tracked resources. Catalog data referring to
/// anything outside this set is rejected when the catalog is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Wood,
    Vine,
    Food,
    Stone,
    Obsidian,
    Fang,
    Energy,
}

impl ResourceKind {
    pub const ALL: [Self; 7] = [
        Self::Wood,
        Self::Vine,
        Self::Food,
        Self::Stone,
        Self::Obsidian,
        Self::Fang,
        Self::Energy,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Vine => "vine",
            Self::Food => "food",
            Self::Stone => "stone",
            Self::Obsidian => "obsidian",
            Self::Fang => "fang",
            Self::Energy => "energy",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wood" => Ok(Self::Wood),
            "vine" => Ok(Self::Vine),
            "food" => Ok(Self::Food),
            "stone" => Ok(Self::Stone),
            "obsidian" => Ok(Self::Obsidian),
            "fang" => Ok(Self::Fang),
            "energy" => Ok(Self::Energy),
            _ => Err(()),
        }
    }
}

/// Outcome of a single ledger mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceChange {
    Applied,
    /// The delta would have driven the count negative; nothing changed.
    Insufficient,
    /// Energy hit the floor. The ledger pins it to zero; the caller owes
    /// the defeat reaction.
    EnergyDepleted,
}

impl ResourceChange {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Mutable counters for every [`ResourceKind`].
///
/// Invariants: no field is ever negative; `energy` stays within
/// [`ENERGY_MIN`, `ENERGY_MAX`]. All mutation goes through [`Resources::change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub wood: i32,
    pub vine: i32,
    pub food: i32,
    pub stone: i32,
    pub obsidian: i32,
    pub fang: i32,
    pub energy: i32,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            wood: START_WOOD,
            vine: START_VINE,
            food: START_FOOD,
            stone: START_STONE,
            obsidian: START_OBSIDIAN,
            fang: START_FANG,
            energy: START_ENERGY,
        }
    }
}

impl Resources {
    #[must_use]
    pub const fn get(&self, kind: ResourceKind) -> i32 {
        match kind {
            ResourceKind::Wood => self.wood,
            ResourceKind::Vine => self.vine,
            ResourceKind::Food => self.food,
            ResourceKind::Stone => self.stone,
            ResourceKind::Obsidian => self.obsidian,
            ResourceKind::Fang => self.fang,
            ResourceKind::Energy => self.energy,
        }
    }

    const fn slot(&mut self, kind: ResourceKind) -> &mut i32 {
        match kind {
            ResourceKind::Wood => &mut self.wood,
            ResourceKind::Vine => &mut self.vine,
            ResourceKind::Food => &mut self.food,
            ResourceKind::Stone => &mut self.stone,
            ResourceKind::Obsidian => &mut self.obsidian,
            ResourceKind::Fang => &mut self.fang,
            ResourceKind::Energy => &mut self.energy,
        }
    }

    /// Apply a signed delta to one counter.
    ///
    /// Energy clamps to its band and reports [`ResourceChange::EnergyDepleted`]
    /// when the floor is hit; every other kind rejects a delta that would go
    /// negative and leaves the ledger untouched.
    pub fn change(&mut self, kind: ResourceKind, delta: i32) -> ResourceChange {
        if kind == ResourceKind::Energy {
            return self.change_energy(delta);
        }
        let slot = self.slot(kind);
        let next = *slot + delta;
        if next < 0 {
            return ResourceChange::Insufficient;
        }
        *slot = next;
        ResourceChange::Applied
    }

    fn change_energy(&mut self, delta: i32) -> ResourceChange {
        let next = self.energy + delta;
        if next <= ENERGY_MIN {
            self.energy = ENERGY_MIN;
            return ResourceChange::EnergyDepleted;
        }
        self.energy = next.min(ENERGY_MAX);
        ResourceChange::Applied
    }
}
