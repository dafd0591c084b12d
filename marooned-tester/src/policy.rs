//! Scripted player policies for automated runs.

use clap::ValueEnum;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use marooned_game::{ActionKind, SessionView};

/// One move a policy wants to make against the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyMove {
    Act(ActionKind),
    Craft(u32),
}

/// Policy interface for automated play strategies.
pub trait PlayerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Select the next move for an active session.
    fn next_move(&mut self, view: &SessionView) -> PolicyMove;
}

/// Built-in gameplay strategies for automated runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Strategy {
    Balanced,
    Greedy,
    Survivalist,
    Random,
}

impl Strategy {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Strategy::Balanced => "Balanced",
            Strategy::Greedy => "Greedy",
            Strategy::Survivalist => "Survivalist",
            Strategy::Random => "Random",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn PlayerPolicy + Send> {
        match self {
            Strategy::Balanced => Box::new(BalancedPolicy),
            Strategy::Greedy => Box::new(GreedyPolicy),
            Strategy::Survivalist => Box::new(SurvivalistPolicy),
            Strategy::Random => Box::new(RandomPolicy::new(seed)),
        }
    }
}

struct BalancedPolicy;
struct GreedyPolicy;
struct SurvivalistPolicy;

struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

const BALANCED_REST_FLOOR: i32 = 40;
const BALANCED_FOOD_FLOOR: i32 = 30;
const SURVIVALIST_REST_FLOOR: i32 = 60;
const SURVIVALIST_FOOD_FLOOR: i32 = 40;

fn first_craftable(view: &SessionView) -> Option<u32> {
    view.craftable
        .iter()
        .find(|entry| entry.craftable && !entry.owned)
        .map(|entry| entry.item_id)
}

/// Shared steady-state rotation once the special cases are out of the way.
fn fallback_action(view: &SessionView) -> PolicyMove {
    if view.affordable.gather {
        PolicyMove::Act(ActionKind::Gather)
    } else if view.affordable.hunt {
        PolicyMove::Act(ActionKind::Hunt)
    } else if view.affordable.rest {
        PolicyMove::Act(ActionKind::Rest)
    } else {
        // Locked; the engine turns this attempt into the stranded loss.
        PolicyMove::Act(ActionKind::Gather)
    }
}

impl PlayerPolicy for BalancedPolicy {
    fn name(&self) -> &'static str {
        "Balanced"
    }

    fn next_move(&mut self, view: &SessionView) -> PolicyMove {
        if view.affordable.sail {
            return PolicyMove::Act(ActionKind::Sail);
        }
        if let Some(item_id) = first_craftable(view) {
            return PolicyMove::Craft(item_id);
        }
        if view.resources.energy <= BALANCED_REST_FLOOR && view.affordable.rest {
            return PolicyMove::Act(ActionKind::Rest);
        }
        if view.resources.food < BALANCED_FOOD_FLOOR && view.affordable.hunt {
            return PolicyMove::Act(ActionKind::Hunt);
        }
        fallback_action(view)
    }
}

impl PlayerPolicy for GreedyPolicy {
    fn name(&self) -> &'static str {
        "Greedy"
    }

    fn next_move(&mut self, view: &SessionView) -> PolicyMove {
        // Crafts and sails the moment either is possible, keeps gathering
        // otherwise; skips upkeep entirely. Loses a lot, which is the point.
        if view.affordable.sail {
            return PolicyMove::Act(ActionKind::Sail);
        }
        if let Some(item_id) = first_craftable(view) {
            return PolicyMove::Craft(item_id);
        }
        fallback_action(view)
    }
}

impl PlayerPolicy for SurvivalistPolicy {
    fn name(&self) -> &'static str {
        "Survivalist"
    }

    fn next_move(&mut self, view: &SessionView) -> PolicyMove {
        if view.resources.energy <= SURVIVALIST_REST_FLOOR && view.affordable.rest {
            return PolicyMove::Act(ActionKind::Rest);
        }
        if view.resources.food < SURVIVALIST_FOOD_FLOOR && view.affordable.hunt {
            return PolicyMove::Act(ActionKind::Hunt);
        }
        if view.affordable.sail {
            return PolicyMove::Act(ActionKind::Sail);
        }
        if let Some(item_id) = first_craftable(view) {
            return PolicyMove::Craft(item_id);
        }
        fallback_action(view)
    }
}

impl PlayerPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "Random"
    }

    fn next_move(&mut self, view: &SessionView) -> PolicyMove {
        let mut moves: Vec<PolicyMove> = ActionKind::ALL
            .iter()
            .filter(|&&action| view.affordable.get(action))
            .map(|&action| PolicyMove::Act(action))
            .collect();
        moves.extend(
            view.craftable
                .iter()
                .filter(|entry| entry.craftable && !entry.owned)
                .map(|entry| PolicyMove::Craft(entry.item_id)),
        );
        if moves.is_empty() {
            return PolicyMove::Act(ActionKind::Gather);
        }
        let idx = self.rng.gen_range(0..moves.len());
        moves.swap_remove(idx)
    }
}
