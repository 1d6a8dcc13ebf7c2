// ── Wire → domain conversions ──
//
// `dexly-api` hands back raw serde records. Everything here validates
// them into the canonical model: ids must be positive, names non-empty,
// lists ordered by slot. A record that fails validation becomes
// `CoreError::MalformedResponse`.

use dexly_api::models::{self as wire, FlavorText, Pokemon, PokemonSpecies, ResourceList};

use crate::error::CoreError;
use crate::model::{
    Ability, ItemDetail, ItemId, ItemMetadata, ItemSummary, ListPage, LocalizedText, Sprites,
    StatValue, TypeSlot,
};

/// Derive the numeric id from a resource URL ending in `/<digits>/`.
///
/// Returns `0` when the URL does not end in a slash-delimited, purely
/// numeric segment.
pub fn item_id_from_url(url: &str) -> ItemId {
    let Some(trimmed) = url.strip_suffix('/') else {
        return 0;
    };
    let Some((_, segment)) = trimmed.rsplit_once('/') else {
        return 0;
    };
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    segment.parse().unwrap_or(0)
}

fn malformed(message: impl Into<String>) -> CoreError {
    CoreError::MalformedResponse {
        message: message.into(),
    }
}

fn require_name(kind: &str, name: String) -> Result<String, CoreError> {
    if name.trim().is_empty() {
        Err(malformed(format!("{kind} has an empty name")))
    } else {
        Ok(name)
    }
}

fn require_id(kind: &str, id: u32) -> Result<ItemId, CoreError> {
    if id == 0 {
        Err(malformed(format!("{kind} has a non-positive id")))
    } else {
        Ok(id)
    }
}

// ── List ────────────────────────────────────────────────────────────

impl TryFrom<wire::NamedResource> for ItemSummary {
    type Error = CoreError;

    fn try_from(r: wire::NamedResource) -> Result<Self, Self::Error> {
        Ok(Self {
            name: require_name("list entry", r.name)?,
            source_url: r.url,
        })
    }
}

impl TryFrom<ResourceList> for ListPage {
    type Error = CoreError;

    fn try_from(list: ResourceList) -> Result<Self, Self::Error> {
        let items = list
            .results
            .into_iter()
            .map(ItemSummary::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            total: list.count,
            items,
        })
    }
}

// ── Detail ──────────────────────────────────────────────────────────

impl From<wire::Sprites> for Sprites {
    fn from(s: wire::Sprites) -> Self {
        Self {
            default: s.front_default,
            artwork: s
                .other
                .and_then(|o| o.official_artwork)
                .and_then(|a| a.front_default),
        }
    }
}

impl TryFrom<Pokemon> for ItemDetail {
    type Error = CoreError;

    fn try_from(p: Pokemon) -> Result<Self, Self::Error> {
        let id = require_id("item", p.id)?;
        let name = require_name("item", p.name)?;

        let mut types: Vec<TypeSlot> = p
            .types
            .into_iter()
            .map(|t| TypeSlot {
                slot: t.slot,
                type_name: t.kind.name,
            })
            .collect();
        types.sort_by_key(|t| t.slot);

        let mut abilities = p.abilities;
        abilities.sort_by_key(|a| a.slot);

        Ok(Self {
            id,
            name,
            height: p.height,
            weight: p.weight,
            types,
            sprites: p.sprites.into(),
            stats: p
                .stats
                .into_iter()
                .map(|s| StatValue {
                    stat_name: s.stat.name,
                    base_value: s.base_stat,
                })
                .collect(),
            abilities: abilities
                .into_iter()
                .map(|a| Ability {
                    name: a.ability.name,
                    is_hidden: a.is_hidden,
                })
                .collect(),
        })
    }
}

// ── Metadata ────────────────────────────────────────────────────────

impl From<FlavorText> for LocalizedText {
    fn from(f: FlavorText) -> Self {
        Self {
            text: f.flavor_text,
            language_code: f.language.name,
        }
    }
}

impl TryFrom<PokemonSpecies> for ItemMetadata {
    type Error = CoreError;

    fn try_from(s: PokemonSpecies) -> Result<Self, Self::Error> {
        Ok(Self {
            id: require_id("metadata", s.id)?,
            name: require_name("metadata", s.name)?,
            localized_descriptions: s
                .flavor_text_entries
                .into_iter()
                .map(LocalizedText::from)
                .collect(),
        })
    }
}
