// ── Catalog domain model ──
//
// Canonical, validated representations of catalog records. Wire shapes
// from `dexly-api` are translated into these types in `crate::convert`;
// consumers (CLI, browser) depend on nothing else.

pub mod detail;
pub mod item;
pub mod metadata;

// ── Re-exports ──────────────────────────────────────────────────────

pub use detail::{Ability, ItemDetail, ItemProfile, Sprites, StatValue, TypeSlot};
pub use item::{EnhancedItem, ItemId, ItemSummary, ListPage};
pub use metadata::{ItemMetadata, LocalizedText, NO_DESCRIPTION};
