// ── Item detail domain types ──

use serde::{Deserialize, Serialize};

use super::item::ItemId;
use super::metadata::ItemMetadata;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    pub type_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    /// Small default sprite.
    pub default: Option<String>,
    /// High-resolution official artwork, when the API has one.
    pub artwork: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatValue {
    pub stat_name: String,
    pub base_value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub is_hidden: bool,
}

/// Full per-item record behind a grid card and the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub id: ItemId,
    pub name: String,
    /// Decimetres, as reported by the API.
    pub height: u32,
    /// Hectograms, as reported by the API.
    pub weight: u32,
    /// Ordered by slot.
    pub types: Vec<TypeSlot>,
    pub sprites: Sprites,
    pub stats: Vec<StatValue>,
    pub abilities: Vec<Ability>,
}

impl ItemDetail {
    /// Type in slot order position 0, used for theming.
    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(|t| t.type_name.as_str())
    }

    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }

    /// Best available image: artwork first, then the default sprite.
    pub fn artwork(&self) -> Option<&str> {
        self.sprites
            .artwork
            .as_deref()
            .or(self.sprites.default.as_deref())
    }

    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.type_name.as_str()).collect()
    }
}

/// Everything the detail view shows: the record, its metadata and the
/// resolved English description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemProfile {
    pub detail: ItemDetail,
    pub metadata: ItemMetadata,
    pub description: String,
}
