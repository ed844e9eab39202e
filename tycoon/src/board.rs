use crate::{ConfigError, Economics, RawBoard, RawTile, Tile, TileKind};

/// Tile count of a complete classic board.
pub const CLASSIC_TILES: usize = 40;

/// The board: a circular, id-ordered sequence of tiles. Built once from the
/// remote configuration and mutated in place (ownership, improvements,
/// mortgage flags) for the rest of the game.
#[derive(Clone, Debug)]
pub struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    /// Flattens the four configuration bands, sorts by id and classifies
    /// every record. Fails if the flattened result is empty.
    pub fn from_config(raw: RawBoard) -> Result<Self, ConfigError> {
        let flat = raw.flatten();
        if flat.is_empty() {
            return Err(ConfigError::NoTiles);
        }
        let tiles = flat.into_iter().map(classify).collect();
        Ok(Self { tiles })
    }

    #[cfg(test)]
    pub(crate) fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile at position `i`, wrapping around the board.
    pub fn tile(&self, i: usize) -> &Tile {
        &self.tiles[i % self.tiles.len()]
    }

    pub fn tile_mut(&mut self, i: usize) -> &mut Tile {
        let len = self.tiles.len();
        &mut self.tiles[i % len]
    }

    /// The sole movement arithmetic. Callers apply it one step at a time so
    /// that every intermediate tile is visited.
    pub fn advance(&self, from: usize, steps: usize) -> usize {
        (from + steps) % self.tiles.len()
    }
}

/// Default go-tile bonus when the configuration does not specify one.
const DEFAULT_GO_BONUS: i64 = 200;
/// Default tax magnitude when the configuration does not specify one.
const DEFAULT_TAX: i64 = 100;
/// Classic railroad purchase price fallback.
const DEFAULT_RAIL_PRICE: i64 = 200;

/// Turns one raw record into a classified tile.
///
/// "special" records are mapped by their classic position: 0 is go (carrying
/// the start bonus), 10 the jail, 20 free parking, 30 go-to-jail; anything
/// else stays a generic special tile. Property and railroad records get the
/// ownable economics sub-structure; railroads with classic defaults.
fn classify(raw: RawTile) -> Tile {
    match raw.kind.as_str() {
        "special" => {
            let kind = match raw.id {
                0 => TileKind::Go,
                10 => TileKind::Jail,
                20 => TileKind::Free,
                30 => TileKind::GoToJail,
                _ => TileKind::Special,
            };
            let money = raw.action_money();
            let mut tile = Tile::bare(raw.id, raw.name, kind);
            if kind == TileKind::Go {
                tile.value = money.unwrap_or(DEFAULT_GO_BONUS);
            }
            tile
        }
        "property" => ownable(raw, TileKind::Property),
        "railroad" => ownable(raw, TileKind::Railroad),
        "tax" => {
            // The magnitude's sign is applied at resolution, not here.
            let money = raw.action_money();
            let mut tile = Tile::bare(raw.id, raw.name, TileKind::Tax);
            tile.value = money.unwrap_or(DEFAULT_TAX);
            tile
        }
        "chance" => Tile::bare(raw.id, raw.name, TileKind::Chance),
        "community" | "community_chest" => Tile::bare(raw.id, raw.name, TileKind::Community),
        "utility" => Tile::bare(raw.id, raw.name, TileKind::Utility),
        "go" => Tile::bare(raw.id, raw.name, TileKind::Go),
        "jail" => Tile::bare(raw.id, raw.name, TileKind::Jail),
        "free" => Tile::bare(raw.id, raw.name, TileKind::Free),
        "go_to_jail" => Tile::bare(raw.id, raw.name, TileKind::GoToJail),
        _ => Tile::bare(raw.id, raw.name, TileKind::Special),
    }
}

fn ownable(raw: RawTile, kind: TileKind) -> Tile {
    let mut price = raw.price();
    if kind == TileKind::Railroad && price == 0 {
        price = DEFAULT_RAIL_PRICE;
    }
    let economics = Economics {
        price,
        rent: raw.rent_table(kind),
        mortgage_value: raw.mortgage_value(price),
        owner: raw.owner,
        mortgaged: raw.mortgaged,
        // A hotel excludes houses; configured house counts are dropped.
        houses: if raw.hotel { 0 } else { raw.houses.min(4) },
        hotel: raw.hotel,
    };
    Tile {
        id: raw.id,
        name: raw.name,
        kind,
        value: 0,
        color: raw.color,
        economics: Some(economics),
    }
}
