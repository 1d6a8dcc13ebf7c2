// ── Item metadata (species) domain types ──

use serde::{Deserialize, Serialize};

use super::item::ItemId;

/// Shown when no English description exists.
pub const NO_DESCRIPTION: &str = "No description available";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub text: String,
    /// ISO-ish language code from the API (e.g. `en`, `es`, `ja-Hrkt`).
    pub language_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMetadata {
    pub id: ItemId,
    pub name: String,
    pub localized_descriptions: Vec<LocalizedText>,
}

impl ItemMetadata {
    /// First description in `language`, with form feeds flattened to spaces.
    pub fn description_in(&self, language: &str) -> Option<String> {
        self.localized_descriptions
            .iter()
            .find(|d| d.language_code == language)
            .map(|d| d.text.replace('\u{c}', " "))
    }

    /// English description or [`NO_DESCRIPTION`].
    pub fn english_description(&self) -> String {
        self.description_in("en")
            .unwrap_or_else(|| NO_DESCRIPTION.to_owned())
    }
}
