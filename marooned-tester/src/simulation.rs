//! Headless session runs and outcome aggregation.

use serde::Serialize;

use marooned_game::{
    ActionOutcome, Catalog, CraftOutcome, DefeatCause, Ending, GameConfig, GameSession,
};

use crate::policy::{PlayerPolicy, PolicyMove};

/// Outcome of one simulated game.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub seed: u64,
    pub policy: &'static str,
    pub turns: u32,
    /// `None` means the turn budget ran out before a terminal condition.
    pub ending: Option<Ending>,
    pub items_crafted: u32,
    pub blocked_moves: u32,
}

/// Play one session to its first terminal condition or the turn budget.
pub fn run_session(
    seed: u64,
    policy: &mut dyn PlayerPolicy,
    catalog: Catalog,
    max_turns: u32,
) -> RunRecord {
    let mut session = GameSession::new(seed, GameConfig::default_config());
    session.attach_catalog(catalog);

    let mut items_crafted = 0;
    let mut blocked_moves = 0;

    for turn in 1..=max_turns {
        let view = session.snapshot();
        let (ending, accepted) = match policy.next_move(&view) {
            PolicyMove::Act(action) => {
                let report = session.perform(action);
                let accepted = !matches!(report.outcome, ActionOutcome::Blocked(_));
                (report.ending, accepted)
            }
            PolicyMove::Craft(item_id) => {
                let report = session.craft(item_id);
                let accepted = matches!(report.outcome, CraftOutcome::Crafted { .. });
                if accepted {
                    items_crafted += 1;
                }
                (report.ending, accepted)
            }
        };
        if !accepted {
            blocked_moves += 1;
        }
        if let Some(ending) = ending {
            return RunRecord {
                seed,
                policy: policy.name(),
                turns: turn,
                ending: Some(ending),
                items_crafted,
                blocked_moves,
            };
        }
    }

    RunRecord {
        seed,
        policy: policy.name(),
        turns: max_turns,
        ending: None,
        items_crafted,
        blocked_moves,
    }
}

/// Aggregate statistics over a batch of runs.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub policy: &'static str,
    pub games: usize,
    pub victories: usize,
    pub exhausted: usize,
    pub stranded: usize,
    pub timeouts: usize,
    pub total_crafts: u32,
    pub avg_turns: f64,
}

#[must_use]
pub fn aggregate(policy: &'static str, records: &[RunRecord]) -> Summary {
    let mut summary = Summary {
        policy,
        games: records.len(),
        victories: 0,
        exhausted: 0,
        stranded: 0,
        timeouts: 0,
        total_crafts: 0,
        avg_turns: 0.0,
    };
    let mut total_turns: u64 = 0;
    for record in records {
        total_turns += u64::from(record.turns);
        summary.total_crafts += record.items_crafted;
        match record.ending {
            Some(Ending::Victory) => summary.victories += 1,
            Some(Ending::Defeat {
                cause: DefeatCause::Exhausted,
            }) => summary.exhausted += 1,
            Some(Ending::Defeat {
                cause: DefeatCause::Stranded,
            }) => summary.stranded += 1,
            None => summary.timeouts += 1,
        }
    }
    if !records.is_empty() {
        #[allow(clippy::cast_precision_loss)]
        {
            summary.avg_turns = total_turns as f64 / records.len() as f64;
        }
    }
    summary
}
