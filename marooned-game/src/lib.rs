//! Marooned Game Engine
//!
//! Platform-agnostic core game logic for the Marooned island survival game.
//! This crate provides all game mechanics without UI or platform-specific
//! dependencies: the resource ledger, the action economy, catalog crafting
//! with persistent yield modifiers, and the win/loss state machine.

pub mod actions;
pub mod catalog;
pub mod constants;
pub mod crafting;
pub mod modifiers;
pub mod numbers;
pub mod resources;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use actions::{
    ActionAvailability, ActionBlock, ActionCosts, ActionGains, ActionKind, ActionOutcome,
    is_affordable, resolve_action_with_rng,
};
pub use catalog::{
    Catalog, CatalogError, CatalogItem, ItemDefect, RawCatalogItem, Requirement, RequirementList,
};
pub use crafting::{CraftBlock, CraftOutcome, craft_item, is_craftable};
pub use modifiers::{AppliedEffect, Effect, ModifiedKind, Modifiers};
pub use resources::{ResourceChange, ResourceKind, Resources};
pub use session::{
    ActionReport, ChangeReport, CraftEntry, CraftReport, GameSession, SessionView,
};
pub use state::{DefeatCause, Ending, GameConfig, GameState, Inventory};

/// Trait for abstracting catalog retrieval.
/// Platform-specific shells (fetch, file, embedded asset) provide this.
pub trait CatalogSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the raw catalog payload from the platform-specific endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error for any transport failure, including non-2xx
    /// responses; the payload itself is validated by the engine.
    fn fetch_catalog(&self) -> Result<String, Self::Error>;
}

/// Main engine facade for constructing game sessions.
pub struct GameEngine<S>
where
    S: CatalogSource,
{
    source: S,
    config: GameConfig,
}

impl<S> GameEngine<S>
where
    S: CatalogSource,
{
    /// Create a new engine with the provided catalog source.
    pub const fn new(source: S, config: GameConfig) -> Self {
        Self { source, config }
    }

    /// Fetch, validate, and attach the catalog, returning a ready session.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails or the payload does not
    /// validate. Either way no session state exists to corrupt; the caller
    /// keeps whatever session it already had.
    pub fn new_session(&self, seed: u64) -> Result<GameSession, anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        let payload = self.source.fetch_catalog().map_err(Into::into)?;
        let catalog = Catalog::from_json(&payload)?;
        let mut session = GameSession::new(seed, self.config);
        session.attach_catalog(catalog);
        Ok(session)
    }

    /// Start a session in the loading state; the caller attaches the
    /// catalog once its own fetch completes.
    #[must_use]
    pub fn new_session_deferred(&self, seed: u64) -> GameSession {
        GameSession::new(seed, self.config)
    }
}
