//! Wire types for the remote configuration/scoring service.
//!
//! The service is a black-box JSON HTTP API; these types only pin down the
//! shapes the engine consumes. The board endpoint is lenient by necessity:
//! tile records arrive with several historical field spellings and four
//! different encodings of the rent schedule.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{PlayerId, RentTable, TileKind, CLASSIC_RAIL_RENTS};

/// Raw board configuration: one array of tile records per board edge.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawBoard {
    #[serde(default)]
    pub bottom: Vec<RawTile>,
    #[serde(default)]
    pub left: Vec<RawTile>,
    #[serde(default)]
    pub top: Vec<RawTile>,
    #[serde(default)]
    pub right: Vec<RawTile>,
}

impl RawBoard {
    /// Collapses the four bands into a single list sorted by ascending id.
    pub fn flatten(self) -> Vec<RawTile> {
        let mut all: Vec<RawTile> = self
            .bottom
            .into_iter()
            .chain(self.left)
            .chain(self.top)
            .chain(self.right)
            .collect();
        all.sort_by_key(|raw| raw.id);
        all
    }
}

/// One tile record as the service sends it.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawTile {
    #[serde(default)]
    pub id: usize,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, alias = "cost", alias = "purchasable_price")]
    pub price: Option<i64>,
    #[serde(default)]
    pub rent: Option<RawRent>,
    #[serde(default, rename = "baseRent", alias = "base_rent")]
    pub base_rent: Option<i64>,
    #[serde(default)]
    pub mortgage: Option<i64>,
    #[serde(default, alias = "ownerId")]
    pub owner: Option<PlayerId>,
    #[serde(default)]
    pub mortgaged: bool,
    #[serde(default)]
    pub houses: u8,
    #[serde(default)]
    pub hotel: bool,
    #[serde(default, alias = "group")]
    pub color: Option<String>,
    #[serde(default)]
    pub action: Option<RawAction>,
}

/// The money effect attached to go and tax tiles.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawAction {
    #[serde(default)]
    pub money: Option<i64>,
}

/// The rent field in any of the encodings observed in the wild:
/// a bare number, a tier array, a structured object, or a map keyed by
/// railroad count ("1" through "4").
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawRent {
    Flat(i64),
    Tiers(Vec<i64>),
    Structured(StructuredRent),
    Keyed(BTreeMap<String, i64>),
}

/// The structured rent encoding. `deny_unknown_fields` keeps keyed maps
/// like `{"1": 25}` from being swallowed by this variant's defaults.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct StructuredRent {
    pub base: i64,
    pub with_house: Vec<i64>,
    pub with_hotel: i64,
    pub rail: Option<Vec<i64>>,
}

fn first_four(values: &[i64]) -> [i64; 4] {
    let mut out = [0; 4];
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = *value;
    }
    out
}

impl RawTile {
    pub fn price(&self) -> i64 {
        self.price.unwrap_or(0)
    }

    /// Mortgage value; the classic default is half the purchase price,
    /// rounded down.
    pub fn mortgage_value(&self, price: i64) -> i64 {
        self.mortgage.unwrap_or(price / 2)
    }

    pub fn action_money(&self) -> Option<i64> {
        self.action.as_ref().and_then(|action| action.money)
    }

    /// Unimproved rent, across all encodings. Railroads without any rent
    /// information fall back to the classic 25.
    pub fn base_rent(&self, kind: TileKind) -> i64 {
        if let Some(base) = self.base_rent {
            return base;
        }
        let from_rent = match &self.rent {
            Some(RawRent::Flat(n)) => Some(*n),
            Some(RawRent::Tiers(tiers)) => tiers.first().copied(),
            Some(RawRent::Structured(s)) => Some(s.base),
            Some(RawRent::Keyed(map)) => map.get("1").or_else(|| map.get("base")).copied(),
            None => None,
        };
        match from_rent {
            Some(base) if base != 0 => base,
            _ if kind == TileKind::Railroad => CLASSIC_RAIL_RENTS[0],
            _ => from_rent.unwrap_or(0),
        }
    }

    /// Four-tier railroad table, falling back to the classic 25/50/100/200.
    pub fn rail_table(&self) -> [i64; 4] {
        match &self.rent {
            Some(RawRent::Tiers(tiers)) => first_four(tiers),
            Some(RawRent::Keyed(map)) => {
                let mut out = [0; 4];
                for (tier, slot) in out.iter_mut().enumerate() {
                    *slot = map.get(&(tier + 1).to_string()).copied().unwrap_or(0);
                }
                out
            }
            Some(RawRent::Structured(s)) => match &s.rail {
                Some(rail) => first_four(rail),
                None => CLASSIC_RAIL_RENTS,
            },
            _ => CLASSIC_RAIL_RENTS,
        }
    }

    /// Full rent schedule for the given classification.
    pub fn rent_table(&self, kind: TileKind) -> RentTable {
        let base = self.base_rent(kind);
        if kind == TileKind::Railroad {
            return RentTable {
                base,
                with_house: [0; 4],
                with_hotel: 0,
                rail: self.rail_table(),
            };
        }
        match &self.rent {
            Some(RawRent::Structured(s)) => RentTable {
                base,
                with_house: first_four(&s.with_house),
                with_hotel: s.with_hotel,
                rail: CLASSIC_RAIL_RENTS,
            },
            _ => RentTable::flat(base),
        }
    }
}

/// One selectable country, sent on the wire as a one-entry code-to-name map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Country {
    pub code: String,
    pub name: String,
}

impl<'de> Deserialize<'de> for Country {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let map = BTreeMap::<String, String>::deserialize(deserializer)?;
        let (code, name) = map
            .into_iter()
            .next()
            .ok_or_else(|| serde::de::Error::custom("empty country record"))?;
        Ok(Country { code, name })
    }
}

/// A finished player's result, as the score-recorder endpoint expects it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub nick_name: String,
    pub score: i64,
    pub country_code: String,
}
