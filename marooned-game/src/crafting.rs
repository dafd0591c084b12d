//! Catalog item crafting: affordability, consumption, effect application.

use serde::{Deserialize, Serialize};

use crate::constants::LOG_CRAFTED_PREFIX;
use crate::modifiers::AppliedEffect;
use crate::state::GameState;

/// Why a craft attempt was refused. State is untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CraftBlock {
    /// No catalog snapshot is attached yet (fetch pending or failed).
    CatalogUnavailable,
    /// The id is not in the catalog.
    UnknownItem,
    AlreadyOwned,
    /// The item's wire requirements were defective at catalog load.
    MalformedItem,
    MissingResources,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CraftOutcome {
    Crafted {
        item_id: u32,
        /// Image reference for the presentation layer to display.
        img_url: String,
        /// Set when the item carried a recognized effect tag.
        applied: Option<AppliedEffect>,
    },
    Blocked(CraftBlock),
}

/// First reason the item cannot be crafted right now, if any.
#[must_use]
pub fn craft_block(state: &GameState, item_id: u32) -> Option<CraftBlock> {
    let Some(catalog) = state.catalog.as_ref() else {
        return Some(CraftBlock::CatalogUnavailable);
    };
    let Some(item) = catalog.find_item(item_id) else {
        return Some(CraftBlock::UnknownItem);
    };
    if state.inventory.contains(item_id) {
        return Some(CraftBlock::AlreadyOwned);
    }
    if item.defect.is_some() {
        return Some(CraftBlock::MalformedItem);
    }
    for requirement in &item.requirements {
        if state.resources.get(requirement.kind) < requirement.amount {
            return Some(CraftBlock::MissingResources);
        }
    }
    None
}

#[must_use]
pub fn is_craftable(state: &GameState, item_id: u32) -> bool {
    craft_block(state, item_id).is_none()
}

/// Craft one catalog item.
///
/// Affordability and deduction share one consistent snapshot: every
/// requirement is validated against the ledger before the first deduction,
/// and nothing else runs in between, so a blocked craft is atomic. On
/// success the requirements are deducted in listed order, the effect tag
/// (if any) is applied to the modifiers, and the id enters the inventory.
pub fn craft_item(state: &mut GameState, item_id: u32) -> CraftOutcome {
    if let Some(block) = craft_block(state, item_id) {
        return CraftOutcome::Blocked(block);
    }
    // The block check proved catalog and item exist; clone the item so the
    // catalog borrow does not pin the state.
    let item = state
        .catalog
        .as_ref()
        .and_then(|catalog| catalog.find_item(item_id))
        .cloned();
    let Some(item) = item else {
        return CraftOutcome::Blocked(CraftBlock::UnknownItem);
    };

    for requirement in &item.requirements {
        state.change_resource(requirement.kind, -requirement.amount);
    }
    let applied = item
        .effect
        .as_deref()
        .and_then(|tag| state.modifiers.apply_effect(tag));
    state.inventory.insert(item_id);
    state.logs.push(format!("{LOG_CRAFTED_PREFIX}{item_id}"));

    CraftOutcome::Crafted {
        item_id,
        img_url: item.img_url,
        applied,
    }
}
