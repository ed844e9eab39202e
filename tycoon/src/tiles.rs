use serde::{Deserialize, Serialize};

pub type PlayerId = u32;

/// Classic railroad rent tiers, indexed by the owner's railroad count minus one.
pub const CLASSIC_RAIL_RENTS: [i64; 4] = [25, 50, 100, 200];

/// What kind of board cell a tile is. Dispatch on this is always exhaustive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Go,
    Jail,
    Free,
    GoToJail,
    Tax,
    Chance,
    Community,
    Property,
    Railroad,
    Utility,
    Special,
}

/// Rent schedule for an ownable tile.
///
/// `with_house` is indexed by house count minus one. `rail` only matters for
/// railroads, where the tier is picked by the owner's railroad count at the
/// moment of the landing (see [`railroad_rent`](crate::railroad_rent)).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentTable {
    pub base: i64,
    pub with_house: [i64; 4],
    pub with_hotel: i64,
    pub rail: [i64; 4],
}

impl RentTable {
    /// A schedule with only an unimproved rent.
    pub fn flat(base: i64) -> Self {
        Self {
            base,
            with_house: [0; 4],
            with_hotel: 0,
            rail: CLASSIC_RAIL_RENTS,
        }
    }
}

/// The ownership/economic state of an ownable tile.
///
/// Invariants: `hotel` excludes `houses > 0`, and a mortgaged tile cannot be
/// improved. Both are enforced by the build operations in [`crate::rules`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Economics {
    pub price: i64,
    pub rent: RentTable,
    pub mortgage_value: i64,
    pub owner: Option<PlayerId>,
    pub mortgaged: bool,
    pub houses: u8,
    pub hotel: bool,
}

/// One board cell. `economics` is present for property and railroad tiles
/// and absent otherwise; `value` carries the effect magnitude for tax and go
/// tiles. Everything except `economics` is fixed after board load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: usize,
    pub name: String,
    pub kind: TileKind,
    pub value: i64,
    pub color: Option<String>,
    pub economics: Option<Economics>,
}

impl Tile {
    pub fn bare(id: usize, name: impl Into<String>, kind: TileKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            value: 0,
            color: None,
            economics: None,
        }
    }

    pub fn is_ownable(&self) -> bool {
        self.economics.is_some()
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.economics.as_ref().and_then(|eco| eco.owner)
    }

    /// Rent due when a stranger lands here, before railroad tiering.
    ///
    /// Precedence for plain properties: mortgaged pays nothing, then hotel,
    /// then houses, then the unimproved base. Railroads report their lowest
    /// tier; the owner-count tier is applied in [`crate::railroad_rent`].
    pub fn rent(&self) -> i64 {
        let Some(eco) = &self.economics else { return 0 };
        if eco.mortgaged {
            return 0;
        }
        if self.kind == TileKind::Railroad {
            return eco.rent.rail[0];
        }
        if eco.hotel {
            return eco.rent.with_hotel;
        }
        if eco.houses >= 1 {
            return eco.rent.with_house[eco.houses as usize - 1];
        }
        eco.rent.base
    }
}
