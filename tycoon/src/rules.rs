//! The tile resolution engine: construction eligibility, rent computation,
//! landing effects and final standings.
//!
//! Immediate effects (rent, tax, windfalls, jail) mutate the game state right
//! away and are reported in the returned [`TileOutcome`]. Effects that need a
//! human decision (buying an unowned property, managing an owned one) are
//! returned as plain request values instead; the driver resolves them through
//! [`buy_property`], [`build_house`], [`build_hotel`] and the bank.

use rand::Rng;
use tracing::debug;

use crate::{redemption_cost, Board, BuildError, Player, PlayerId, TileKind};

pub const HOUSE_COST: i64 = 100;
pub const HOTEL_COST: i64 = 250;
/// Improvement value counted towards net worth.
pub const HOUSE_VALUE: i64 = 100;
pub const HOTEL_VALUE: i64 = 200;
/// Magnitude of the chance/community coin flip.
pub const WINDFALL: i64 = 100;
/// Turns a player stays confined after landing on the jail tile.
pub const JAIL_TERM: u32 = 2;

/// What happened when a player landed on a tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TileOutcome {
    /// No effect (go, free parking, go-to-jail, utility, special tiles).
    Landed,
    /// The tile is unowned; the player may buy it.
    PurchaseOffer(PurchaseOffer),
    /// The player landed on their own property and may manage it.
    Manage(ManagementMenu),
    RentPaid {
        tile: usize,
        owner: PlayerId,
        amount: i64,
    },
    /// Foreign but mortgaged: informational only, no rent.
    MortgagedSkip { tile: usize },
    TaxPaid { amount: i64 },
    /// Chance/community coin flip; `amount` is signed.
    Windfall { amount: i64 },
    Jailed { turns: u32 },
}

/// Request value for the purchase decision prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseOffer {
    pub tile: usize,
    pub name: String,
    pub price: i64,
    pub rent: i64,
    pub nick: String,
    pub funds: i64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PurchaseDecision {
    Buy,
    Decline,
}

/// Request value for the own-property management prompt. The eligibility
/// flags already account for the player's funds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManagementMenu {
    pub tile: usize,
    pub name: String,
    pub can_build_house: bool,
    pub can_build_hotel: bool,
    pub mortgaged: bool,
    pub redeem_cost: i64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ManagementAction {
    BuildHouse,
    BuildHotel,
    Mortgage,
    Redeem,
    Pass,
}

/// True iff the color group is nonempty and every street in it belongs to
/// the player.
pub fn owns_color_set(board: &Board, player: &Player, color: &str) -> bool {
    let mut any = false;
    for tile in board.tiles() {
        if tile.kind == TileKind::Property && tile.color.as_deref() == Some(color) {
            any = true;
            if tile.owner() != Some(player.id) {
                return false;
            }
        }
    }
    any
}

fn check_house(board: &Board, player: &Player, tile_id: usize) -> Result<(), BuildError> {
    let tile = board.tile(tile_id);
    let Some(eco) = tile.economics.as_ref() else {
        return Err(BuildError::NotOwner);
    };
    if eco.owner != Some(player.id) {
        return Err(BuildError::NotOwner);
    }
    if eco.hotel {
        return Err(BuildError::HotelAlreadyBuilt);
    }
    if eco.houses >= 4 {
        return Err(BuildError::MaxHousesReached);
    }
    if eco.mortgaged {
        return Err(BuildError::Mortgaged);
    }
    let Some(color) = tile.color.as_deref() else {
        return Err(BuildError::IncompleteColorSet);
    };
    if !owns_color_set(board, player, color) {
        return Err(BuildError::IncompleteColorSet);
    }
    Ok(())
}

fn check_hotel(board: &Board, player: &Player, tile_id: usize) -> Result<(), BuildError> {
    let Some(eco) = board.tile(tile_id).economics.as_ref() else {
        return Err(BuildError::NotOwner);
    };
    if eco.owner != Some(player.id) {
        return Err(BuildError::NotOwner);
    }
    if eco.hotel {
        return Err(BuildError::HotelAlreadyBuilt);
    }
    if eco.mortgaged {
        return Err(BuildError::Mortgaged);
    }
    if eco.houses != 4 {
        return Err(BuildError::NeedFourHouses);
    }
    Ok(())
}

/// Funds are not part of the eligibility check; [`build_house`] verifies them.
pub fn can_build_house(board: &Board, player: &Player, tile_id: usize) -> bool {
    check_house(board, player, tile_id).is_ok()
}

pub fn can_build_hotel(board: &Board, player: &Player, tile_id: usize) -> bool {
    check_hotel(board, player, tile_id).is_ok()
}

/// Adds one house for a fixed 100. Requires the full color group, an
/// unmortgaged street below four houses without a hotel.
pub fn build_house(board: &mut Board, player: &mut Player, tile_id: usize) -> Result<(), BuildError> {
    check_house(board, player, tile_id)?;
    if player.money < HOUSE_COST {
        return Err(BuildError::InsufficientFunds);
    }
    player.pay(HOUSE_COST);
    if let Some(eco) = board.tile_mut(tile_id).economics.as_mut() {
        eco.houses += 1;
    }
    Ok(())
}

/// Upgrades exactly four houses into a hotel for a fixed 250. The houses are
/// returned, keeping hotel and houses mutually exclusive.
pub fn build_hotel(board: &mut Board, player: &mut Player, tile_id: usize) -> Result<(), BuildError> {
    check_hotel(board, player, tile_id)?;
    if player.money < HOTEL_COST {
        return Err(BuildError::InsufficientFunds);
    }
    player.pay(HOTEL_COST);
    if let Some(eco) = board.tile_mut(tile_id).economics.as_mut() {
        eco.hotel = true;
        eco.houses = 0;
    }
    Ok(())
}

/// Applies an accepted purchase: debits the full price (affordability is the
/// buyer's problem) and records ownership on both sides.
pub fn buy_property(board: &mut Board, player: &mut Player, tile_id: usize) {
    let tile = board.tile_mut(tile_id);
    if let Some(eco) = tile.economics.as_mut() {
        if eco.owner.is_none() {
            player.pay(eco.price);
            eco.owner = Some(player.id);
            player.properties.insert(tile.id);
        }
    }
}

/// Railroad rent, tiered by how many railroads the owner holds right now.
/// Recomputed on every landing, never cached.
pub fn railroad_rent(board: &Board, tile_id: usize, owner: PlayerId) -> i64 {
    let count = board
        .tiles()
        .iter()
        .filter(|tile| tile.kind == TileKind::Railroad && tile.owner() == Some(owner))
        .count();
    let Some(eco) = board.tile(tile_id).economics.as_ref() else {
        return 0;
    };
    eco.rent.rail[count.clamp(1, 4) - 1]
}

/// One row of the final ranking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Standing {
    pub nick: String,
    pub country: String,
    pub score: i64,
}

/// Net worth per player: cash plus, for every owned street, its price and
/// improvement value, minus the price again if it is mortgaged. Sorted
/// descending; the sort is stable, so equal scores keep player order.
pub fn compute_standings(board: &Board, players: &[Player]) -> Vec<Standing> {
    let mut standings: Vec<Standing> = players
        .iter()
        .map(|player| {
            let mut score = player.money;
            for tile in board.tiles() {
                if tile.kind != TileKind::Property {
                    continue;
                }
                let Some(eco) = tile.economics.as_ref() else {
                    continue;
                };
                if eco.owner != Some(player.id) {
                    continue;
                }
                let improvements = if eco.hotel {
                    HOTEL_VALUE
                } else {
                    eco.houses as i64 * HOUSE_VALUE
                };
                let mortgage_penalty = if eco.mortgaged { eco.price } else { 0 };
                score += eco.price + improvements - mortgage_penalty;
            }
            Standing {
                nick: player.nick.clone(),
                country: player.country.clone(),
                score,
            }
        })
        .collect();
    standings.sort_by(|a, b| b.score.cmp(&a.score));
    standings
}

/// Resolves the effect of the tile the current player stands on.
///
/// Landing on the jail tile itself confines the player for [`JAIL_TERM`]
/// turns; the go-to-jail tile is a no-op, as is passing or landing on go
/// (no pass-go bonus). Chance and community are an independent 50/50 coin
/// flip of ±[`WINDFALL`] on every landing.
pub fn resolve_tile(
    board: &Board,
    players: &mut [Player],
    current: usize,
    rng: &mut impl Rng,
) -> TileOutcome {
    let position = players[current].position;
    let tile = board.tile(position);
    match tile.kind {
        TileKind::Property | TileKind::Railroad => {
            let Some(eco) = tile.economics.as_ref() else {
                return TileOutcome::Landed;
            };
            match eco.owner {
                None => TileOutcome::PurchaseOffer(PurchaseOffer {
                    tile: tile.id,
                    name: tile.name.clone(),
                    price: eco.price,
                    rent: tile.rent(),
                    nick: players[current].nick.clone(),
                    funds: players[current].money,
                }),
                Some(owner) if owner != players[current].id => {
                    if eco.mortgaged {
                        return TileOutcome::MortgagedSkip { tile: tile.id };
                    }
                    let amount = if tile.kind == TileKind::Railroad {
                        railroad_rent(board, position, owner)
                    } else {
                        tile.rent()
                    };
                    let tile_id = tile.id;
                    players[current].pay(amount);
                    let owner_idx = players
                        .iter()
                        .position(|p| p.id == owner)
                        .expect("property owner is not in the player list");
                    players[owner_idx].receive(amount);
                    debug!(tile = tile_id, amount, "rent paid");
                    TileOutcome::RentPaid {
                        tile: tile_id,
                        owner,
                        amount,
                    }
                }
                Some(_) => {
                    let player = &players[current];
                    TileOutcome::Manage(ManagementMenu {
                        tile: tile.id,
                        name: tile.name.clone(),
                        can_build_house: can_build_house(board, player, position)
                            && player.money >= HOUSE_COST,
                        can_build_hotel: can_build_hotel(board, player, position)
                            && player.money >= HOTEL_COST,
                        mortgaged: eco.mortgaged,
                        redeem_cost: redemption_cost(eco.mortgage_value),
                    })
                }
            }
        }
        TileKind::Tax => {
            let amount = tile.value.abs();
            players[current].pay(amount);
            TileOutcome::TaxPaid { amount }
        }
        TileKind::Chance | TileKind::Community => {
            let amount = if rng.gen::<bool>() { WINDFALL } else { -WINDFALL };
            let player = &mut players[current];
            if amount >= 0 {
                player.receive(amount);
            } else {
                player.pay(-amount);
            }
            TileOutcome::Windfall { amount }
        }
        TileKind::Jail => {
            let player = &mut players[current];
            player.in_jail = true;
            player.jail_turns = JAIL_TERM;
            TileOutcome::Jailed { turns: JAIL_TERM }
        }
        TileKind::Go
        | TileKind::Free
        | TileKind::GoToJail
        | TileKind::Utility
        | TileKind::Special => TileOutcome::Landed,
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::{Economics, RentTable, Tile, CLASSIC_RAIL_RENTS, STARTING_MONEY};

    fn street(id: usize, color: &str, owner: Option<u32>) -> Tile {
        let mut tile = Tile::bare(id, format!("Street {id}"), TileKind::Property);
        tile.color = Some(color.to_string());
        tile.economics = Some(Economics {
            price: 200,
            rent: RentTable {
                base: 50,
                with_house: [100, 150, 200, 250],
                with_hotel: 600,
                rail: CLASSIC_RAIL_RENTS,
            },
            mortgage_value: 100,
            owner,
            mortgaged: false,
            houses: 0,
            hotel: false,
        });
        tile
    }

    fn railroad(id: usize, owner: Option<u32>) -> Tile {
        let mut tile = Tile::bare(id, format!("Railroad {id}"), TileKind::Railroad);
        tile.economics = Some(Economics {
            price: 200,
            rent: RentTable {
                base: 25,
                with_house: [0; 4],
                with_hotel: 0,
                rail: CLASSIC_RAIL_RENTS,
            },
            mortgage_value: 100,
            owner,
            mortgaged: false,
            houses: 0,
            hotel: false,
        });
        tile
    }

    fn two_players() -> Vec<Player> {
        vec![
            Player::new(0, "ana", "ES", "#f00"),
            Player::new(1, "bo", "US", "#00f"),
        ]
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn color_set_needs_every_street() {
        let board = Board::from_tiles(vec![
            street(0, "red", Some(0)),
            street(1, "red", Some(1)),
            street(2, "blue", Some(0)),
        ]);
        let players = two_players();
        assert!(!owns_color_set(&board, &players[0], "red"));
        assert!(owns_color_set(&board, &players[0], "blue"));
        // Unknown color groups are never complete.
        assert!(!owns_color_set(&board, &players[0], "green"));
    }

    #[test]
    fn house_needs_the_full_color_set() {
        let board = Board::from_tiles(vec![street(0, "red", Some(0)), street(1, "red", Some(1))]);
        let mut players = two_players();
        assert!(!can_build_house(&board, &players[0], 0));
        let mut board = board;
        assert_eq!(
            build_house(&mut board, &mut players[0], 0),
            Err(BuildError::IncompleteColorSet)
        );
        assert_eq!(players[0].money, STARTING_MONEY);
    }

    #[test]
    fn house_construction_debits_and_increments() {
        let mut board =
            Board::from_tiles(vec![street(0, "red", Some(0)), street(1, "red", Some(0))]);
        let mut players = two_players();
        build_house(&mut board, &mut players[0], 0).unwrap();
        assert_eq!(players[0].money, STARTING_MONEY - HOUSE_COST);
        assert_eq!(board.tile(0).economics.as_ref().unwrap().houses, 1);
    }

    #[test]
    fn mortgaged_street_cannot_be_improved() {
        let mut tile = street(0, "red", Some(0));
        tile.economics.as_mut().unwrap().mortgaged = true;
        let board = Board::from_tiles(vec![tile]);
        let players = two_players();
        assert!(!can_build_house(&board, &players[0], 0));
    }

    #[test]
    fn hotel_requires_exactly_four_houses() {
        let at_houses = |houses: u8| {
            let mut tile = street(0, "red", Some(0));
            tile.economics.as_mut().unwrap().houses = houses;
            Board::from_tiles(vec![tile])
        };
        let mut players = two_players();

        let mut board = at_houses(3);
        assert_eq!(
            build_hotel(&mut board, &mut players[0], 0),
            Err(BuildError::NeedFourHouses)
        );
        assert_eq!(board.tile(0).economics.as_ref().unwrap().houses, 3);
        assert_eq!(players[0].money, STARTING_MONEY);

        let mut board = at_houses(5);
        assert_eq!(
            build_hotel(&mut board, &mut players[0], 0),
            Err(BuildError::NeedFourHouses)
        );

        let mut board = at_houses(4);
        build_hotel(&mut board, &mut players[0], 0).unwrap();
        let eco = board.tile(0).economics.as_ref().unwrap();
        assert!(eco.hotel);
        assert_eq!(eco.houses, 0);
        assert_eq!(players[0].money, STARTING_MONEY - HOTEL_COST);
    }

    #[test]
    fn standings_count_cash_streets_and_improvements() {
        let mut tile = street(0, "red", Some(0));
        tile.economics.as_mut().unwrap().houses = 2;
        let board = Board::from_tiles(vec![tile]);
        let mut players = two_players();
        players[0].money = 1000;
        players[1].money = 900;

        let standings = compute_standings(&board, &players);
        // 1000 cash + 200 price + 2 houses at 100 = 1400.
        assert_eq!(standings[0].nick, "ana");
        assert_eq!(standings[0].score, 1400);
        assert_eq!(standings[1].score, 900);
        assert!(standings[0].score > standings[1].score);
    }

    #[test]
    fn mortgaged_street_is_worthless_in_standings() {
        let mut tile = street(0, "red", Some(0));
        tile.economics.as_mut().unwrap().mortgaged = true;
        let board = Board::from_tiles(vec![tile]);
        let players = two_players();
        let standings = compute_standings(&board, &players);
        let ana = standings.iter().find(|s| s.nick == "ana").unwrap();
        assert_eq!(ana.score, STARTING_MONEY);
    }

    #[test]
    fn standings_keep_player_order_on_ties() {
        let board = Board::from_tiles(vec![street(0, "red", None)]);
        let players = two_players();
        let standings = compute_standings(&board, &players);
        assert_eq!(standings[0].nick, "ana");
        assert_eq!(standings[1].nick, "bo");
    }

    #[test]
    fn unowned_property_triggers_an_offer() {
        let board = Board::from_tiles(vec![street(0, "red", None)]);
        let mut players = two_players();
        let outcome = resolve_tile(&board, &mut players, 0, &mut rng());
        match outcome {
            TileOutcome::PurchaseOffer(offer) => {
                assert_eq!(offer.tile, 0);
                assert_eq!(offer.price, 200);
                assert_eq!(offer.rent, 50);
                assert_eq!(offer.funds, STARTING_MONEY);
            }
            other => panic!("expected a purchase offer, got {other:?}"),
        }
        // The offer alone changes nothing.
        assert_eq!(players[0].money, STARTING_MONEY);
    }

    #[test]
    fn foreign_street_with_two_houses_charges_150() {
        let mut tile = street(0, "red", Some(1));
        tile.economics.as_mut().unwrap().houses = 2;
        let board = Board::from_tiles(vec![tile]);
        let mut players = two_players();

        let outcome = resolve_tile(&board, &mut players, 0, &mut rng());
        assert_eq!(
            outcome,
            TileOutcome::RentPaid {
                tile: 0,
                owner: 1,
                amount: 150
            }
        );
        assert_eq!(players[0].money, STARTING_MONEY - 150);
        assert_eq!(players[1].money, STARTING_MONEY + 150);
    }

    #[test]
    fn railroad_rent_scales_with_owner_count() {
        let board = Board::from_tiles(vec![
            railroad(0, Some(1)),
            railroad(1, Some(1)),
            railroad(2, Some(1)),
            railroad(3, None),
        ]);
        let mut players = two_players();

        let outcome = resolve_tile(&board, &mut players, 0, &mut rng());
        assert_eq!(
            outcome,
            TileOutcome::RentPaid {
                tile: 0,
                owner: 1,
                amount: 100
            }
        );
        assert_eq!(players[0].money, STARTING_MONEY - 100);
        assert_eq!(players[1].money, STARTING_MONEY + 100);
    }

    #[test]
    fn mortgaged_foreign_property_charges_nothing() {
        let mut tile = street(0, "red", Some(1));
        tile.economics.as_mut().unwrap().mortgaged = true;
        let board = Board::from_tiles(vec![tile]);
        let mut players = two_players();

        let outcome = resolve_tile(&board, &mut players, 0, &mut rng());
        assert_eq!(outcome, TileOutcome::MortgagedSkip { tile: 0 });
        assert_eq!(players[0].money, STARTING_MONEY);
        assert_eq!(players[1].money, STARTING_MONEY);
    }

    #[test]
    fn own_property_presents_the_management_menu() {
        let board = Board::from_tiles(vec![street(0, "red", Some(0))]);
        let mut players = two_players();
        let outcome = resolve_tile(&board, &mut players, 0, &mut rng());
        match outcome {
            TileOutcome::Manage(menu) => {
                assert_eq!(menu.tile, 0);
                assert!(menu.can_build_house); // owns the whole one-street group
                assert!(!menu.can_build_hotel);
                assert!(!menu.mortgaged);
            }
            other => panic!("expected a management menu, got {other:?}"),
        }
    }

    #[test]
    fn tax_debits_the_magnitude() {
        let mut tile = Tile::bare(0, "Income Tax", TileKind::Tax);
        tile.value = -100; // sign comes from the configuration, magnitude applies
        let board = Board::from_tiles(vec![tile]);
        let mut players = two_players();

        let outcome = resolve_tile(&board, &mut players, 0, &mut rng());
        assert_eq!(outcome, TileOutcome::TaxPaid { amount: 100 });
        assert_eq!(players[0].money, STARTING_MONEY - 100);
    }

    #[test]
    fn chance_is_a_plus_or_minus_100_flip() {
        let board = Board::from_tiles(vec![Tile::bare(0, "Chance", TileKind::Chance)]);
        let mut rng = rng();
        for _ in 0..20 {
            let mut players = two_players();
            let outcome = resolve_tile(&board, &mut players, 0, &mut rng);
            match outcome {
                TileOutcome::Windfall { amount } => {
                    assert_eq!(amount.abs(), WINDFALL);
                    assert_eq!(players[0].money, STARTING_MONEY + amount);
                }
                other => panic!("expected a windfall, got {other:?}"),
            }
        }
    }

    #[test]
    fn landing_on_jail_confines_for_two_turns() {
        let board = Board::from_tiles(vec![Tile::bare(0, "Jail", TileKind::Jail)]);
        let mut players = two_players();

        let outcome = resolve_tile(&board, &mut players, 0, &mut rng());
        assert_eq!(outcome, TileOutcome::Jailed { turns: 2 });
        assert!(players[0].in_jail);
        assert_eq!(players[0].jail_turns, 2);
    }

    #[test]
    fn go_to_jail_tile_is_a_no_op() {
        let board = Board::from_tiles(vec![Tile::bare(0, "Go To Jail", TileKind::GoToJail)]);
        let mut players = two_players();
        let outcome = resolve_tile(&board, &mut players, 0, &mut rng());
        assert_eq!(outcome, TileOutcome::Landed);
        assert!(!players[0].in_jail);
    }
}
