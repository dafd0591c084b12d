//! Persistent yield multipliers unlocked by crafted effects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{EFFECT_DOUBLE, EFFECT_QUADRUPLE};
use crate::numbers::floor_f32_to_i32;
use crate::resources::ResourceKind;

/// Resources whose yields can be modified. Everything else always uses a
/// factor of 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifiedKind {
    Wood,
    Food,
}

/// The fixed effect table. Catalog items carry these as string tags;
/// anything unrecognized is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    DoubleWood,
    QuadrupleWood,
    DoubleFood,
    QuadrupleFood,
}

impl Effect {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DoubleWood => "double_wood",
            Self::QuadrupleWood => "quadruple_wood",
            Self::DoubleFood => "double_food",
            Self::QuadrupleFood => "quadruple_food",
        }
    }

    #[must_use]
    pub const fn target(self) -> ModifiedKind {
        match self {
            Self::DoubleWood | Self::QuadrupleWood => ModifiedKind::Wood,
            Self::DoubleFood | Self::QuadrupleFood => ModifiedKind::Food,
        }
    }

    #[must_use]
    pub const fn multiplier(self) -> f32 {
        match self {
            Self::DoubleWood | Self::DoubleFood => EFFECT_DOUBLE,
            Self::QuadrupleWood | Self::QuadrupleFood => EFFECT_QUADRUPLE,
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Effect {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "double_wood" => Ok(Self::DoubleWood),
            "quadruple_wood" => Ok(Self::QuadrupleWood),
            "double_food" => Ok(Self::DoubleFood),
            "quadruple_food" => Ok(Self::QuadrupleFood),
            _ => Err(()),
        }
    }
}

/// Record of an effect application, for logging and display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedEffect {
    pub effect: Effect,
    /// The multiplier now in force for the effect's target.
    pub multiplier: f32,
}

/// Yield multipliers. Invariant: monotonically non-decreasing within one
/// session; [`Modifiers::apply_effect`] only ever raises a value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    pub wood_yield: f32,
    pub food_yield: f32,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            wood_yield: 1.0,
            food_yield: 1.0,
        }
    }
}

impl Modifiers {
    #[must_use]
    pub const fn get(&self, kind: ModifiedKind) -> f32 {
        match kind {
            ModifiedKind::Wood => self.wood_yield,
            ModifiedKind::Food => self.food_yield,
        }
    }

    /// Apply a catalog effect tag. Unknown tags are a no-op; known tags
    /// raise the target multiplier to `max(current, proposed)`, so applying
    /// the same or a weaker effect twice changes nothing.
    pub fn apply_effect(&mut self, tag: &str) -> Option<AppliedEffect> {
        let effect = tag.parse::<Effect>().ok()?;
        let slot = match effect.target() {
            ModifiedKind::Wood => &mut self.wood_yield,
            ModifiedKind::Food => &mut self.food_yield,
        };
        *slot = slot.max(effect.multiplier());
        Some(AppliedEffect {
            effect,
            multiplier: *slot,
        })
    }

    /// Integer factor applied to a yield draw: the floored multiplier for
    /// modifiable kinds, 1 for everything else.
    #[must_use]
    pub fn yield_factor(&self, kind: ResourceKind) -> i32 {
        let multiplier = match kind {
            ResourceKind::Wood => self.wood_yield,
            ResourceKind::Food => self.food_yield,
            _ => return 1,
        };
        floor_f32_to_i32(multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tag_is_noop() {
        let mut mods = Modifiers::default();
        assert!(mods.apply_effect("double_pants").is_none());
        assert_eq!(mods, Modifiers::default());
    }

    #[test]
    fn effects_never_lower_a_multiplier() {
        let mut mods = Modifiers::default();
        mods.apply_effect("double_wood").unwrap();
        assert!((mods.wood_yield - 2.0).abs() < f32::EPSILON);

        mods.apply_effect("quadruple_wood").unwrap();
        assert!((mods.wood_yield - 4.0).abs() < f32::EPSILON);

        let applied = mods.apply_effect("double_wood").unwrap();
        assert!((mods.wood_yield - 4.0).abs() < f32::EPSILON);
        assert!((applied.multiplier - 4.0).abs() < f32::EPSILON);
        assert!((mods.food_yield - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn yield_factor_floors_and_defaults() {
        let mut mods = Modifiers::default();
        assert_eq!(mods.yield_factor(ResourceKind::Wood), 1);
        assert_eq!(mods.yield_factor(ResourceKind::Stone), 1);

        mods.apply_effect("quadruple_food").unwrap();
        assert_eq!(mods.yield_factor(ResourceKind::Food), 4);
        assert_eq!(mods.yield_factor(ResourceKind::Fang), 1);
    }
}
