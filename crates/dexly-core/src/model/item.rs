// ── List-level item types ──

use serde::{Deserialize, Serialize};

/// Numeric catalog identifier. `0` doubles as "could not be derived".
pub type ItemId = u32;

/// Minimal list-view record produced by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub name: String,
    /// Resource URL of the item (e.g. `https://pokeapi.co/api/v2/pokemon/25/`).
    pub source_url: String,
}

/// One page of summaries plus the total count reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPage {
    pub total: u32,
    pub items: Vec<ItemSummary>,
}

/// A summary with its numeric id derived from `source_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedItem {
    pub id: ItemId,
    pub name: String,
    pub source_url: String,
}
