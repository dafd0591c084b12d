//! Craftable item catalog: wire shape, validation, and lookup.
//!
//! The remote endpoint serves an ordered array of item records whose
//! requirements are `"<amount> <kind>"` strings. Those strings are parsed
//! exactly once here; affordability checks downstream work on structured
//! [`Requirement`] records.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::resources::ResourceKind;

const DEFAULT_CATALOG_DATA: &str = include_str!("../assets/catalog.json");

/// One parsed requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub kind: ResourceKind,
    pub amount: i32,
}

pub type RequirementList = SmallVec<[Requirement; 4]>;

/// Wire form of a catalog item, exactly as the endpoint serves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCatalogItem {
    pub id: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub effect: Option<String>,
    #[serde(rename = "img-url")]
    pub img_url: String,
}

/// Why an item's wire requirements could not be validated. Such an item is
/// kept for display but is permanently non-craftable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemDefect {
    MalformedRequirement,
    UnknownResource,
    NegativeAmount,
}

/// A validated catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u32,
    pub title: String,
    pub description: String,
    /// Empty when `defect` is set.
    pub requirements: RequirementList,
    pub effect: Option<String>,
    pub img_url: String,
    #[serde(default)]
    pub defect: Option<ItemDefect>,
}

/// Structural defects that reject the whole payload. These surface as a
/// hard fetch failure; the previously attached catalog (if any) stays
/// authoritative.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog payload is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog contains duplicate item id {item_id}")]
    DuplicateId { item_id: u32 },
}

/// Immutable snapshot of the craftable item catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub items: Vec<CatalogItem>,
}

impl Catalog {
    /// Create an empty catalog (useful for tests).
    #[must_use]
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// Parse and validate a catalog payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a JSON array of item records
    /// or contains duplicate ids. Items with defective requirement strings
    /// are retained but flagged non-craftable.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawCatalogItem> = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Validate pre-parsed wire records.
    ///
    /// # Errors
    ///
    /// Returns an error if two records share an id.
    pub fn from_raw(raw: Vec<RawCatalogItem>) -> Result<Self, CatalogError> {
        let mut items = Vec::with_capacity(raw.len());
        for record in raw {
            if items.iter().any(|item: &CatalogItem| item.id == record.id) {
                return Err(CatalogError::DuplicateId { item_id: record.id });
            }
            items.push(validate_item(record));
        }
        Ok(Self { items })
    }

    /// Load the bundled default catalog.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_CATALOG_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn find_item(&self, id: u32) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn validate_item(record: RawCatalogItem) -> CatalogItem {
    let mut requirements = RequirementList::new();
    let mut defect = None;
    for raw in &record.requirements {
        match parse_requirement(raw) {
            Ok(requirement) => requirements.push(requirement),
            Err(found) => {
                defect = Some(found);
                requirements.clear();
                break;
            }
        }
    }
    CatalogItem {
        id: record.id,
        title: record.title,
        description: record.description,
        requirements,
        effect: record.effect,
        img_url: record.img_url,
        defect,
    }
}

fn parse_requirement(raw: &str) -> Result<Requirement, ItemDefect> {
    let (amount_part, kind_part) = raw
        .trim()
        .split_once(' ')
        .ok_or(ItemDefect::MalformedRequirement)?;
    let amount: i32 = amount_part
        .parse()
        .map_err(|_| ItemDefect::MalformedRequirement)?;
    if amount < 0 {
        return Err(ItemDefect::NegativeAmount);
    }
    let kind = kind_part
        .trim()
        .parse::<ResourceKind>()
        .map_err(|()| ItemDefect::UnknownResource)?;
    Ok(Requirement { kind, amount })
}
