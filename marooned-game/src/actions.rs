//! Action affordability and yield resolution.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    GATHER_ENERGY_COST, GATHER_FOOD_RANGE, GATHER_STONE_RANGE, GATHER_VINE_RANGE,
    GATHER_WOOD_RANGE, HUNT_ENERGY_COST, HUNT_FOOD_RANGE, RARE_DROP_DIVISOR, RARE_DROP_RANGE,
    REST_ENERGY_RANGE, REST_FOOD_COST, SAIL_ENERGY_COST,
};
use crate::resources::{ResourceChange, ResourceKind};
use crate::state::GameState;

/// The four primary actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Hunt,
    Gather,
    Rest,
    Sail,
}

impl ActionKind {
    pub const ALL: [Self; 4] = [Self::Hunt, Self::Gather, Self::Rest, Self::Sail];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hunt => "hunt",
            Self::Gather => "gather",
            Self::Rest => "rest",
            Self::Sail => "sail",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hunt" => Ok(Self::Hunt),
            "gather" => Ok(Self::Gather),
            "rest" => Ok(Self::Rest),
            "sail" => Ok(Self::Sail),
            _ => Err(()),
        }
    }
}

/// Per-action cost vector. Amounts double as affordability thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCosts {
    pub wood: i32,
    pub vine: i32,
    pub food: i32,
    pub stone: i32,
    pub energy: i32,
}

impl ActionCosts {
    /// Deduction order is fixed; energy always settles last so an
    /// energy-triggered loss lands after the other costs are already paid.
    pub const DEDUCTION_ORDER: [ResourceKind; 5] = [
        ResourceKind::Wood,
        ResourceKind::Vine,
        ResourceKind::Food,
        ResourceKind::Stone,
        ResourceKind::Energy,
    ];

    #[must_use]
    pub const fn for_action(action: ActionKind) -> Self {
        let mut costs = Self::none();
        match action {
            ActionKind::Hunt => costs.energy = HUNT_ENERGY_COST,
            ActionKind::Gather => costs.energy = GATHER_ENERGY_COST,
            ActionKind::Rest => costs.food = REST_FOOD_COST,
            ActionKind::Sail => costs.energy = SAIL_ENERGY_COST,
        }
        costs
    }

    const fn none() -> Self {
        Self {
            wood: 0,
            vine: 0,
            food: 0,
            stone: 0,
            energy: 0,
        }
    }

    #[must_use]
    pub const fn amount(self, kind: ResourceKind) -> i32 {
        match kind {
            ResourceKind::Wood => self.wood,
            ResourceKind::Vine => self.vine,
            ResourceKind::Food => self.food,
            ResourceKind::Stone => self.stone,
            ResourceKind::Energy => self.energy,
            ResourceKind::Obsidian | ResourceKind::Fang => 0,
        }
    }

    #[must_use]
    pub fn met_by(self, state: &GameState) -> bool {
        Self::DEDUCTION_ORDER
            .iter()
            .all(|&kind| state.resources.get(kind) >= self.amount(kind))
    }
}

/// Why an action attempt was refused. State is untouched in either case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionBlock {
    MissingResources,
    /// Sail only: the configured key item has not been crafted.
    MissingSailKey,
}

/// Per-resource amounts produced by one action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionGains {
    pub wood: i32,
    pub vine: i32,
    pub food: i32,
    pub stone: i32,
    pub obsidian: i32,
    pub fang: i32,
    pub energy: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOutcome {
    Performed { gains: ActionGains },
    /// Costs were paid and the energy floor was hit; the defeat is already
    /// flagged on the state and yields are skipped.
    Exhausted,
    /// Sail succeeded; the victory is already flagged on the state.
    SetSail,
    Blocked(ActionBlock),
}

/// Per-action affordability, recomputed after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionAvailability {
    pub hunt: bool,
    pub gather: bool,
    pub rest: bool,
    pub sail: bool,
}

impl ActionAvailability {
    #[must_use]
    pub fn for_state(state: &GameState) -> Self {
        Self {
            hunt: is_affordable(state, ActionKind::Hunt),
            gather: is_affordable(state, ActionKind::Gather),
            rest: is_affordable(state, ActionKind::Rest),
            sail: is_affordable(state, ActionKind::Sail),
        }
    }

    #[must_use]
    pub const fn get(self, action: ActionKind) -> bool {
        match action {
            ActionKind::Hunt => self.hunt,
            ActionKind::Gather => self.gather,
            ActionKind::Rest => self.rest,
            ActionKind::Sail => self.sail,
        }
    }

    /// False means the starvation lock has closed: nothing is playable.
    #[must_use]
    pub const fn any(self) -> bool {
        self.hunt || self.gather || self.rest || self.sail
    }
}

#[must_use]
pub fn is_affordable(state: &GameState, action: ActionKind) -> bool {
    if !ActionCosts::for_action(action).met_by(state) {
        return false;
    }
    if action == ActionKind::Sail {
        return state.inventory.contains(state.config.sail_key_item);
    }
    true
}

/// Resolve one action attempt against the state, drawing yields from `rng`.
///
/// A blocked attempt reports the reason and changes nothing. Otherwise the
/// costs are deducted in [`ActionCosts::DEDUCTION_ORDER`] and yields are
/// drawn and applied; an energy floor hit during deduction flags the defeat
/// and skips the yields, since the mandatory reset would erase them anyway.
pub fn resolve_action_with_rng(
    state: &mut GameState,
    action: ActionKind,
    rng: &mut impl Rng,
) -> ActionOutcome {
    let costs = ActionCosts::for_action(action);
    if !costs.met_by(state) {
        return ActionOutcome::Blocked(ActionBlock::MissingResources);
    }
    if action == ActionKind::Sail && !state.inventory.contains(state.config.sail_key_item) {
        return ActionOutcome::Blocked(ActionBlock::MissingSailKey);
    }

    for kind in ActionCosts::DEDUCTION_ORDER {
        let amount = costs.amount(kind);
        if amount == 0 {
            continue;
        }
        if state.change_resource(kind, -amount) == ResourceChange::EnergyDepleted {
            return ActionOutcome::Exhausted;
        }
    }

    if action == ActionKind::Sail {
        state.flag_victory();
        return ActionOutcome::SetSail;
    }

    let gains = draw_gains(state, action, rng);
    apply_gains(state, gains);
    ActionOutcome::Performed { gains }
}

fn draw_gains(state: &GameState, action: ActionKind, rng: &mut impl Rng) -> ActionGains {
    let mut gains = ActionGains::default();
    match action {
        ActionKind::Hunt => {
            gains.food = uniform(rng, HUNT_FOOD_RANGE)
                * state.modifiers.yield_factor(ResourceKind::Food);
            gains.fang = rare_drop(rng);
        }
        ActionKind::Gather => {
            gains.wood = uniform(rng, GATHER_WOOD_RANGE)
                * state.modifiers.yield_factor(ResourceKind::Wood);
            gains.vine = uniform(rng, GATHER_VINE_RANGE);
            gains.food = uniform(rng, GATHER_FOOD_RANGE)
                * state.modifiers.yield_factor(ResourceKind::Food);
            gains.stone = uniform(rng, GATHER_STONE_RANGE);
            gains.obsidian = rare_drop(rng);
        }
        ActionKind::Rest => {
            gains.energy = uniform(rng, REST_ENERGY_RANGE);
        }
        ActionKind::Sail => {}
    }
    gains
}

fn apply_gains(state: &mut GameState, gains: ActionGains) {
    let pairs = [
        (ResourceKind::Wood, gains.wood),
        (ResourceKind::Vine, gains.vine),
        (ResourceKind::Food, gains.food),
        (ResourceKind::Stone, gains.stone),
        (ResourceKind::Obsidian, gains.obsidian),
        (ResourceKind::Fang, gains.fang),
        (ResourceKind::Energy, gains.energy),
    ];
    for (kind, amount) in pairs {
        if amount != 0 {
            state.change_resource(kind, amount);
        }
    }
}

fn uniform(rng: &mut impl Rng, range: (i32, i32)) -> i32 {
    rng.gen_range(range.0..=range.1)
}

fn rare_drop(rng: &mut impl Rng) -> i32 {
    uniform(rng, RARE_DROP_RANGE) / RARE_DROP_DIVISOR
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn rng(seed: u64) -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(seed)
    }

    #[test]
    fn gather_pays_energy_and_yields_in_range() {
        let mut state = GameState::default();
        let mut rng = rng(42);

        let outcome = resolve_action_with_rng(&mut state, ActionKind::Gather, &mut rng);
        let ActionOutcome::Performed { gains } = outcome else {
            panic!("expected gather to succeed, got {outcome:?}");
        };

        assert_eq!(state.resources.energy, 80);
        assert!((1..=10).contains(&gains.wood));
        assert!((1..=10).contains(&gains.vine));
        assert!((1..=10).contains(&gains.food));
        assert!((1..=5).contains(&gains.stone));
        assert!((0..=1).contains(&gains.obsidian));
        assert_eq!(state.resources.wood, 20 + gains.wood);
        assert_eq!(state.resources.vine, 10 + gains.vine);
        assert_eq!(state.resources.food, 30 + gains.food);
        assert_eq!(state.resources.stone, 20 + gains.stone);
    }

    #[test]
    fn unaffordable_action_is_rejected_untouched() {
        let mut state = GameState::default();
        state.resources.energy = 15;
        let before = state.resources;

        let outcome = resolve_action_with_rng(&mut state, ActionKind::Gather, &mut rng(1));
        assert_eq!(
            outcome,
            ActionOutcome::Blocked(ActionBlock::MissingResources)
        );
        assert_eq!(state.resources, before);
        assert!(state.active);
    }

    #[test]
    fn hunt_scales_food_with_modifier() {
        let mut base = GameState::default();
        let mut boosted = GameState::default();
        boosted.modifiers.apply_effect("quadruple_food").unwrap();

        // Same seed, same draws; only the factor differs.
        let base_outcome = resolve_action_with_rng(&mut base, ActionKind::Hunt, &mut rng(7));
        let boosted_outcome =
            resolve_action_with_rng(&mut boosted, ActionKind::Hunt, &mut rng(7));
        let (ActionOutcome::Performed { gains: a }, ActionOutcome::Performed { gains: b }) =
            (base_outcome, boosted_outcome)
        else {
            panic!("expected both hunts to succeed");
        };

        assert!((1..=20).contains(&a.food));
        assert_eq!(b.food, a.food * 4);
        assert_eq!(a.fang, b.fang);
        assert!((0..=1).contains(&a.fang));
    }

    #[test]
    fn fang_drop_rate_is_ten_percent() {
        let mut state = GameState::default();
        let mut rng = rng(1234);
        let mut fangs = 0;
        let trials = 2000;
        for _ in 0..trials {
            state.resources.energy = 100;
            let outcome = resolve_action_with_rng(&mut state, ActionKind::Hunt, &mut rng);
            let ActionOutcome::Performed { gains } = outcome else {
                panic!("hunt should always be affordable at full energy");
            };
            fangs += gains.fang;
            state.resources.food = 30;
        }
        let rate = f64::from(fangs) / f64::from(trials);
        assert!(
            (0.07..=0.13).contains(&rate),
            "fang rate {rate} strayed from 10%"
        );
    }

    #[test]
    fn rest_trades_food_for_energy() {
        let mut state = GameState::default();
        state.resources.energy = 40;

        let outcome = resolve_action_with_rng(&mut state, ActionKind::Rest, &mut rng(5));
        let ActionOutcome::Performed { gains } = outcome else {
            panic!("expected rest to succeed");
        };
        assert_eq!(state.resources.food, 20);
        assert!((1..=20).contains(&gains.energy));
        assert_eq!(state.resources.energy, 40 + gains.energy);
    }

    #[test]
    fn rest_without_food_leaves_energy_alone() {
        let mut state = GameState::default();
        state.resources.food = 9;
        state.resources.energy = 55;

        let outcome = resolve_action_with_rng(&mut state, ActionKind::Rest, &mut rng(5));
        assert_eq!(
            outcome,
            ActionOutcome::Blocked(ActionBlock::MissingResources)
        );
        assert_eq!(state.resources.energy, 55);
        assert_eq!(state.resources.food, 9);
    }

    #[test]
    fn rest_energy_gain_clamps_at_cap() {
        let mut state = GameState::default();
        state.resources.energy = 95;

        let outcome = resolve_action_with_rng(&mut state, ActionKind::Rest, &mut rng(11));
        assert!(matches!(outcome, ActionOutcome::Performed { .. }));
        assert!(state.resources.energy <= 100);
    }

    #[test]
    fn sail_requires_the_key_item() {
        let mut state = GameState::default();
        assert!(!is_affordable(&state, ActionKind::Sail));

        let outcome = resolve_action_with_rng(&mut state, ActionKind::Sail, &mut rng(3));
        assert_eq!(outcome, ActionOutcome::Blocked(ActionBlock::MissingSailKey));
        assert_eq!(state.resources.energy, 100);
        assert!(state.active);

        state.inventory.insert(state.config.sail_key_item);
        let outcome = resolve_action_with_rng(&mut state, ActionKind::Sail, &mut rng(3));
        assert_eq!(outcome, ActionOutcome::SetSail);
        assert_eq!(state.resources.energy, 60);
        assert!(!state.active);
    }

    #[test]
    fn exact_energy_cost_collapses_the_run() {
        let mut state = GameState::default();
        state.resources.energy = 10;

        let outcome = resolve_action_with_rng(&mut state, ActionKind::Hunt, &mut rng(8));
        assert_eq!(outcome, ActionOutcome::Exhausted);
        assert_eq!(state.resources.energy, 0);
        assert!(!state.active);
    }

    #[test]
    fn availability_tracks_the_lock() {
        let mut state = GameState::default();
        let open = ActionAvailability::for_state(&state);
        assert!(open.hunt && open.gather && open.rest);
        assert!(!open.sail);
        assert!(open.any());

        state.resources.energy = 5;
        state.resources.food = 9;
        let locked = ActionAvailability::for_state(&state);
        assert!(!locked.any());
    }
}
