//! Centralized balance and tuning constants for Marooned game logic.
//!
//! These values define the deterministic math for the action economy.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_BOOTING: &str = "log.booting";
pub(crate) const LOG_RESET: &str = "log.reset";
pub(crate) const LOG_CRAFTED_PREFIX: &str = "log.crafted.";

// Ledger bounds ------------------------------------------------------------
pub(crate) const ENERGY_MIN: i32 = 0;
pub(crate) const ENERGY_MAX: i32 = 100;

// Starting resources -------------------------------------------------------
pub(crate) const START_WOOD: i32 = 20;
pub(crate) const START_VINE: i32 = 10;
pub(crate) const START_FOOD: i32 = 30;
pub(crate) const START_STONE: i32 = 20;
pub(crate) const START_OBSIDIAN: i32 = 0;
pub(crate) const START_FANG: i32 = 0;
pub(crate) const START_ENERGY: i32 = 100;

// Action costs -------------------------------------------------------------
pub(crate) const HUNT_ENERGY_COST: i32 = 10;
pub(crate) const GATHER_ENERGY_COST: i32 = 20;
pub(crate) const REST_FOOD_COST: i32 = 10;
pub(crate) const SAIL_ENERGY_COST: i32 = 40;

// Yield ranges (uniform integer draws, both bounds inclusive) --------------
pub(crate) const HUNT_FOOD_RANGE: (i32, i32) = (1, 20);
pub(crate) const GATHER_WOOD_RANGE: (i32, i32) = (1, 10);
pub(crate) const GATHER_VINE_RANGE: (i32, i32) = (1, 10);
pub(crate) const GATHER_FOOD_RANGE: (i32, i32) = (1, 10);
pub(crate) const GATHER_STONE_RANGE: (i32, i32) = (1, 5);
pub(crate) const REST_ENERGY_RANGE: (i32, i32) = (1, 20);

// Rare drops: floor(uniform[1,10] / 10) yields 1 on exactly one of ten
// equally likely outcomes.
pub(crate) const RARE_DROP_RANGE: (i32, i32) = (1, 10);
pub(crate) const RARE_DROP_DIVISOR: i32 = 10;

// Crafting -----------------------------------------------------------------
pub(crate) const DEFAULT_SAIL_KEY_ITEM: u32 = 5;

// Effect multipliers -------------------------------------------------------
pub(crate) const EFFECT_DOUBLE: f32 = 2.0;
pub(crate) const EFFECT_QUADRUPLE: f32 = 4.0;
