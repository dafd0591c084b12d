//! Session loop: dispatch, terminal detection, and the mandatory reset.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::actions::{self, ActionAvailability, ActionKind, ActionOutcome};
use crate::catalog::{Catalog, CatalogItem};
use crate::crafting::{self, CraftOutcome};
use crate::modifiers::Modifiers;
use crate::resources::{ResourceChange, ResourceKind, Resources};
use crate::state::{DefeatCause, Ending, GameConfig, GameState};

/// Result of one action attempt, including any terminal notice. When
/// `ending` is set the session has already performed the full reset; the
/// report is the caller's only view of the finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReport {
    pub outcome: ActionOutcome,
    pub ending: Option<Ending>,
}

/// Result of one craft attempt; same ending semantics as [`ActionReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraftReport {
    pub outcome: CraftOutcome,
    pub ending: Option<Ending>,
}

/// Result of a direct ledger adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReport {
    pub change: ResourceChange,
    pub ending: Option<Ending>,
}

/// One catalog row as the presentation layer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftEntry {
    pub item_id: u32,
    pub title: String,
    pub img_url: String,
    pub craftable: bool,
    pub owned: bool,
}

/// Everything a presentation layer needs after a mutation. It renders this
/// and calls back into the session; it never mutates engine state itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub resources: Resources,
    pub modifiers: Modifiers,
    pub active: bool,
    /// False while the catalog fetch is pending or failed.
    pub catalog_ready: bool,
    pub affordable: ActionAvailability,
    /// Empty while the catalog is not ready.
    pub craftable: Vec<CraftEntry>,
    pub inventory: Vec<u32>,
}

/// One game session: state, config, rng stream, and catalog attachment.
///
/// Every entry point processes one logical action to completion before
/// returning; there is no re-entrancy to guard against.
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
}

impl GameSession {
    /// Fresh session in the loading state (no catalog attached yet).
    #[must_use]
    pub fn new(seed: u64, config: GameConfig) -> Self {
        let state = GameState::default().with_config(config).with_seed(seed);
        Self { state }
    }

    /// Build a session around an existing state.
    #[must_use]
    pub fn from_state(state: GameState) -> Self {
        Self { state }
    }

    /// Complete the loading state. A failed fetch simply never calls this
    /// and the session keeps refusing craft operations.
    pub fn attach_catalog(&mut self, catalog: Catalog) {
        self.state.catalog = Some(catalog);
    }

    #[must_use]
    pub const fn has_catalog(&self) -> bool {
        self.state.catalog.is_some()
    }

    /// Look up a catalog item for selection/display. `None` while the
    /// catalog is not ready or the id is unknown.
    #[must_use]
    pub fn catalog_item(&self, item_id: u32) -> Option<&CatalogItem> {
        self.state.catalog.as_ref()?.find_item(item_id)
    }

    /// Attempt one primary action, then run the post-turn sweep.
    pub fn perform(&mut self, action: ActionKind) -> ActionReport {
        let mut rng = self.take_rng();
        let outcome = actions::resolve_action_with_rng(&mut self.state, action, &mut rng);
        self.state.rng = Some(rng);
        let ending = self.finish_turn();
        ActionReport { outcome, ending }
    }

    /// Attempt one craft, then run the post-turn sweep. Crafting spends
    /// resources, so it can close the starvation lock like any action.
    pub fn craft(&mut self, item_id: u32) -> CraftReport {
        let outcome = crafting::craft_item(&mut self.state, item_id);
        let ending = self.finish_turn();
        CraftReport { outcome, ending }
    }

    /// Apply a direct ledger delta (external adjustments, debugging). Not a
    /// player action: endings still resolve, the lock sweep does not run.
    pub fn change_resource(&mut self, kind: ResourceKind, delta: i32) -> ChangeReport {
        let change = self.state.change_resource(kind, delta);
        let ending = self.resolve_ending();
        ChangeReport { change, ending }
    }

    /// Presentation snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionView {
        let craftable = self.state.catalog.as_ref().map_or_else(Vec::new, |catalog| {
            catalog
                .items
                .iter()
                .map(|item| CraftEntry {
                    item_id: item.id,
                    title: item.title.clone(),
                    img_url: item.img_url.clone(),
                    craftable: crafting::is_craftable(&self.state, item.id),
                    owned: self.state.inventory.contains(item.id),
                })
                .collect()
        });
        SessionView {
            resources: self.state.resources,
            modifiers: self.state.modifiers,
            active: self.state.active,
            catalog_ready: self.has_catalog(),
            affordable: ActionAvailability::for_state(&self.state),
            craftable,
            inventory: self.state.inventory.sorted_ids(),
        }
    }

    /// Restart the island without waiting for a terminal condition.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    pub const fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Apply a closure to the mutable game state.
    pub fn with_state_mut<R>(&mut self, f: impl FnOnce(&mut GameState) -> R) -> R {
        f(&mut self.state)
    }

    /// Consume the session, returning the underlying game state.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    fn take_rng(&mut self) -> ChaCha20Rng {
        self.state
            .rng
            .take()
            .unwrap_or_else(|| ChaCha20Rng::seed_from_u64(self.state.seed))
    }

    /// Post-turn sweep: the starvation lock closes when every primary
    /// action is unaffordable at once, then any pending ending resolves
    /// with the mandatory reset.
    fn finish_turn(&mut self) -> Option<Ending> {
        if self.state.active && !ActionAvailability::for_state(&self.state).any() {
            self.state.flag_defeat(DefeatCause::Stranded);
        }
        self.resolve_ending()
    }

    fn resolve_ending(&mut self) -> Option<Ending> {
        let ending = self.state.ending?;
        self.state.reset();
        Some(ending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionBlock;
    use crate::crafting::CraftBlock;

    fn ready_session(seed: u64) -> GameSession {
        let mut session = GameSession::new(seed, GameConfig::default_config());
        session.attach_catalog(Catalog::load_from_static());
        session
    }

    #[test]
    fn loading_state_refuses_craft_but_not_actions() {
        let mut session = GameSession::new(1, GameConfig::default_config());
        assert!(!session.has_catalog());
        assert!(session.catalog_item(1).is_none());

        let report = session.craft(1);
        assert_eq!(
            report.outcome,
            CraftOutcome::Blocked(CraftBlock::CatalogUnavailable)
        );

        let report = session.perform(ActionKind::Gather);
        assert!(matches!(report.outcome, ActionOutcome::Performed { .. }));

        session.attach_catalog(Catalog::load_from_static());
        assert!(session.has_catalog());
        let report = session.craft(2);
        assert!(matches!(report.outcome, CraftOutcome::Crafted { .. }));
    }

    #[test]
    fn snapshot_reflects_ledger_and_affordability() {
        let session = ready_session(42);
        let view = session.snapshot();
        assert!(view.active);
        assert!(view.catalog_ready);
        assert_eq!(view.resources, Resources::default());
        assert!(view.affordable.hunt && view.affordable.gather && view.affordable.rest);
        assert!(!view.affordable.sail);
        assert!(view.inventory.is_empty());

        let axe = view
            .craftable
            .iter()
            .find(|entry| entry.item_id == 1)
            .unwrap();
        assert!(axe.craftable && !axe.owned);
        let raft = view
            .craftable
            .iter()
            .find(|entry| entry.item_id == 5)
            .unwrap();
        assert!(!raft.craftable);
    }

    #[test]
    fn direct_energy_depletion_notifies_once_and_resets() {
        let mut session = ready_session(7);
        session.with_state_mut(|state| state.resources.energy = 15);

        let report = session.change_resource(ResourceKind::Energy, -20);
        assert_eq!(report.change, ResourceChange::EnergyDepleted);
        assert_eq!(
            report.ending,
            Some(Ending::Defeat {
                cause: DefeatCause::Exhausted
            })
        );

        // The reset already ran: full starting ledger, session active again.
        let view = session.snapshot();
        assert!(view.active);
        assert_eq!(view.resources, Resources::default());
    }

    #[test]
    fn starvation_lock_ends_the_run() {
        let mut session = ready_session(9);
        // Low energy and not enough food to rest: the next blocked attempt
        // closes the lock.
        session.with_state_mut(|state| {
            state.resources.energy = 5;
            state.resources.food = 9;
        });

        let report = session.perform(ActionKind::Gather);
        assert_eq!(
            report.outcome,
            ActionOutcome::Blocked(ActionBlock::MissingResources)
        );
        assert_eq!(
            report.ending,
            Some(Ending::Defeat {
                cause: DefeatCause::Stranded
            })
        );
        assert!(session.snapshot().active);
    }

    #[test]
    fn sail_win_requires_key_then_resets() {
        let mut session = ready_session(11);
        session.with_state_mut(|state| {
            state.resources.wood = 60;
            state.resources.vine = 40;
            state.resources.stone = 20;
        });

        // Sail without the raft is rejected even at full energy.
        let report = session.perform(ActionKind::Sail);
        assert_eq!(
            report.outcome,
            ActionOutcome::Blocked(ActionBlock::MissingSailKey)
        );
        assert!(report.ending.is_none());

        let report = session.craft(5);
        assert!(matches!(report.outcome, CraftOutcome::Crafted { .. }));
        assert!(report.ending.is_none());

        let report = session.perform(ActionKind::Sail);
        assert_eq!(report.outcome, ActionOutcome::SetSail);
        assert_eq!(report.ending, Some(Ending::Victory));

        let view = session.snapshot();
        assert!(view.active);
        assert!(view.inventory.is_empty());
        assert_eq!(view.resources, Resources::default());
    }

    #[test]
    fn sessions_with_equal_seeds_replay_identically() {
        let mut a = ready_session(1234);
        let mut b = ready_session(1234);
        for _ in 0..10 {
            let ra = a.perform(ActionKind::Gather);
            let rb = b.perform(ActionKind::Gather);
            assert_eq!(ra, rb);
        }
        assert_eq!(a.state().resources, b.state().resources);
    }
}
