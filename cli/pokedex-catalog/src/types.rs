//! Catalog entry types.
//!
//! The `wire` structs mirror the upstream JSON payloads exactly; the public
//! types are the domain model the rest of the workspace consumes. Conversion
//! applies the image selection policy and the legendary heuristic.

use serde::{Deserialize, Serialize};

/// Index of the speed stat within the canonical six-stat sequence.
const SPEED_STAT_INDEX: usize = 5;

/// Entries whose speed stat exceeds this value are flagged legendary.
///
/// A presentation heuristic with no upstream authority.
const LEGENDARY_SPEED_THRESHOLD: i64 = 100;

/// Minimal identifying record returned by the bounded list call, before
/// detail enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySummary {
    pub name: String,
    pub url: String,
}

/// `GET /pokemon?limit=N` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct EntryList {
    pub results: Vec<EntrySummary>,
}

/// `GET /type/{name}` response body.
///
/// The upstream nests each member as `{ "pokemon": { name, url }, "slot": n }`.
#[derive(Debug, Deserialize)]
pub(crate) struct TypeListing {
    pub pokemon: Vec<TypeMember>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TypeMember {
    pub pokemon: EntrySummary,
}

/// `GET /pokemon/{nameOrId}` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct EntryDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub height: i64,
    #[serde(default)]
    pub weight: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TypeSlot {
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NamedResource {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Sprites {
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: OtherSprites,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Artwork,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Artwork {
    pub front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatSlot {
    pub base_stat: i64,
    pub stat: NamedResource,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AbilitySlot {
    pub ability: NamedResource,
    pub is_hidden: bool,
}

/// The enriched, display-ready catalog record.
///
/// Invariant: an entry is only ever constructed from a successful detail
/// response, so there are no partial entries in a loaded collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stable unique identifier from the upstream detail response.
    pub id: u32,
    /// Lowercase canonical name.
    pub name: String,
    /// Type tags, in upstream slot order.
    pub types: Vec<String>,
    /// Artwork URL; empty when the upstream has none.
    pub image_url: String,
    /// The six base stats in canonical order (hp, attack, defense,
    /// special-attack, special-defense, speed).
    pub stats: Vec<StatValue>,
    pub abilities: Vec<Ability>,
    /// Tenths of a meter, as reported upstream.
    pub height: i64,
    /// Tenths of a kilogram, as reported upstream.
    pub weight: i64,
    pub is_legendary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatValue {
    pub name: String,
    pub base_value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub is_hidden: bool,
}

impl From<EntryDetail> for CatalogEntry {
    fn from(detail: EntryDetail) -> Self {
        let is_legendary = detail
            .stats
            .get(SPEED_STAT_INDEX)
            .is_some_and(|slot| slot.base_stat > LEGENDARY_SPEED_THRESHOLD);

        // Prefer the high resolution official artwork, fall back to the
        // default sprite, else no image.
        let image_url = detail
            .sprites
            .other
            .official_artwork
            .front_default
            .or(detail.sprites.front_default)
            .unwrap_or_default();

        Self {
            id: detail.id,
            name: detail.name,
            types: detail
                .types
                .into_iter()
                .map(|slot| slot.type_.name)
                .collect(),
            image_url,
            stats: detail
                .stats
                .into_iter()
                .map(|slot| StatValue {
                    name: slot.stat.name,
                    base_value: slot.base_stat,
                })
                .collect(),
            abilities: detail
                .abilities
                .into_iter()
                .map(|slot| Ability {
                    name: slot.ability.name,
                    is_hidden: slot.is_hidden,
                })
                .collect(),
            height: detail.height,
            weight: detail.weight,
            is_legendary,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn detail_from(value: serde_json::Value) -> EntryDetail {
        serde_json::from_value(value).unwrap()
    }

    fn stats_with_speed(speed: i64) -> serde_json::Value {
        json!([
            {"base_stat": 45, "stat": {"name": "hp"}},
            {"base_stat": 49, "stat": {"name": "attack"}},
            {"base_stat": 49, "stat": {"name": "defense"}},
            {"base_stat": 65, "stat": {"name": "special-attack"}},
            {"base_stat": 65, "stat": {"name": "special-defense"}},
            {"base_stat": speed, "stat": {"name": "speed"}},
        ])
    }

    #[test]
    fn conversion_maps_all_fields() {
        let detail = detail_from(json!({
            "id": 6,
            "name": "charizard",
            "types": [
                {"slot": 1, "type": {"name": "fire", "url": "ignored"}},
                {"slot": 2, "type": {"name": "flying", "url": "ignored"}},
            ],
            "sprites": {
                "front_default": "https://img/front.png",
                "other": {"official-artwork": {"front_default": "https://img/art.png"}},
            },
            "stats": stats_with_speed(100),
            "abilities": [
                {"ability": {"name": "blaze"}, "is_hidden": false},
                {"ability": {"name": "solar-power"}, "is_hidden": true},
            ],
            "height": 17,
            "weight": 905,
        }));
        let entry = CatalogEntry::from(detail);

        assert_eq!(entry.id, 6);
        assert_eq!(entry.name, "charizard");
        assert_eq!(entry.types, vec!["fire", "flying"]);
        assert_eq!(entry.image_url, "https://img/art.png");
        assert_eq!(entry.stats.len(), 6);
        assert_eq!(entry.stats[5], StatValue {
            name: "speed".to_string(),
            base_value: 100,
        });
        assert_eq!(entry.abilities, vec![
            Ability {
                name: "blaze".to_string(),
                is_hidden: false,
            },
            Ability {
                name: "solar-power".to_string(),
                is_hidden: true,
            },
        ]);
        assert_eq!(entry.height, 17);
        assert_eq!(entry.weight, 905);
    }

    #[test]
    fn image_falls_back_to_default_sprite() {
        let detail = detail_from(json!({
            "id": 1,
            "name": "bulbasaur",
            "sprites": {"front_default": "https://img/front.png", "other": {}},
        }));
        assert_eq!(
            CatalogEntry::from(detail).image_url,
            "https://img/front.png"
        );
    }

    #[test]
    fn image_is_empty_when_no_sprites_available() {
        let detail = detail_from(json!({
            "id": 1,
            "name": "bulbasaur",
            "sprites": {"front_default": null},
        }));
        assert_eq!(CatalogEntry::from(detail).image_url, "");
    }

    #[test]
    fn legendary_requires_speed_above_threshold() {
        let fast = detail_from(json!({
            "id": 1, "name": "a", "stats": stats_with_speed(101),
        }));
        assert!(CatalogEntry::from(fast).is_legendary);

        let at_threshold = detail_from(json!({
            "id": 2, "name": "b", "stats": stats_with_speed(100),
        }));
        assert!(!CatalogEntry::from(at_threshold).is_legendary);
    }

    #[test]
    fn legendary_is_false_when_speed_stat_missing() {
        let detail = detail_from(json!({
            "id": 3,
            "name": "c",
            "stats": [{"base_stat": 200, "stat": {"name": "hp"}}],
        }));
        assert!(!CatalogEntry::from(detail).is_legendary);
    }
}
