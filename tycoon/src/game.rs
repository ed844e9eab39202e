//! The game aggregate: owns the board, the players, the bank and the turn
//! sequencer, and drives one round as roll, move, resolve, refresh, advance.
//!
//! The two collaborators are injected as traits: [`Ui`] for rendering and the
//! two decision prompts, [`Remote`] for the black-box configuration/scoring
//! service. All state mutation happens synchronously inside one resolution
//! step; the decision prompts are plain blocking calls.

use anyhow::Context;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::{
    build_hotel, build_house, buy_property, compute_standings, resolve_tile, roll_pair, Bank,
    Board, ConfigError, Country, DiceRoll, ManagementAction, ManagementMenu, Player,
    PurchaseDecision, PurchaseOffer, RawBoard, ScoreRecord, Standing, TileKind, TileOutcome,
    TurnManager,
};

/// The presentation collaborator. The engine has no rendering side effects
/// of its own; everything visual goes through this trait.
pub trait Ui {
    fn render_board(&mut self, board: &Board);
    fn render_players(&mut self, players: &[Player]);
    fn render_tokens(&mut self, players: &[Player]);
    fn refresh(&mut self, board: &Board, players: &[Player]);
    /// Lightweight notification channel.
    fn toast(&mut self, message: &str);
    fn decide_purchase(&mut self, offer: &PurchaseOffer) -> PurchaseDecision;
    fn decide_management(&mut self, menu: &ManagementMenu) -> ManagementAction;
    fn show_standings(&mut self, standings: &[Standing]);
    /// Called between unit steps of a move. Purely cosmetic pacing, never a
    /// correctness dependency.
    fn step_pause(&mut self) {}
}

/// The remote configuration/scoring service, shape only. Board fetch
/// failures are fatal to bootstrap; score submission failures are logged
/// and swallowed by the caller.
pub trait Remote {
    fn fetch_board(&mut self) -> anyhow::Result<RawBoard>;
    fn fetch_countries(&mut self) -> anyhow::Result<Vec<Country>>;
    fn submit_score(&mut self, record: &ScoreRecord) -> anyhow::Result<()>;
}

#[derive(Debug)]
pub struct Game<U: Ui, R: Remote> {
    pub board: Board,
    pub players: Vec<Player>,
    pub bank: Bank,
    pub turns: TurnManager,
    pub ui: U,
    pub remote: R,
    rng: StdRng,
    ended: bool,
}

impl<U: Ui, R: Remote> Game<U, R> {
    /// Bootstraps a session: fetches and builds the board, checks that every
    /// configured owner is at the table, starts the turn order with the given
    /// players and performs the initial render.
    pub fn new(players: Vec<Player>, mut ui: U, mut remote: R, rng: StdRng) -> anyhow::Result<Self> {
        let raw = remote
            .fetch_board()
            .context("fetching the board configuration")?;
        let board = Board::from_config(raw)?;
        for tile in board.tiles() {
            if let Some(owner) = tile.owner() {
                if !players.iter().any(|p| p.id == owner) {
                    return Err(ConfigError::UnknownOwner {
                        tile: tile.id,
                        owner,
                    }
                    .into());
                }
            }
        }
        info!(tiles = board.size(), players = players.len(), "game ready");
        ui.render_board(&board);
        ui.render_players(&players);
        ui.render_tokens(&players);
        Ok(Self {
            board,
            players,
            bank: Bank,
            turns: TurnManager::start(),
            ui,
            remote,
            rng,
            ended: false,
        })
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    /// Rolls for the current player and moves them. An explicit roll takes
    /// precedence over the dice, which is what makes turns reproducible in
    /// tests and lets a table agree on a manual throw.
    pub fn roll_and_move(&mut self, manual: Option<DiceRoll>) -> TileOutcome {
        if self.ended {
            return TileOutcome::Landed;
        }
        let roll = manual.unwrap_or_else(|| roll_pair(&mut self.rng));
        let nick = self.turns.current_player(&self.players).nick.clone();
        debug!(%roll, nick, "dice thrown");
        self.ui.toast(&format!("{nick} rolls {roll}"));
        self.move_player(roll.total as usize)
    }

    /// Moves the current player one tile at a time (each step re-renders the
    /// tokens and yields to the pacing hook), resolves the landed tile,
    /// applies any decision the UI returns, refreshes, and hands the turn on
    /// unless the game ended meanwhile.
    fn move_player(&mut self, steps: usize) -> TileOutcome {
        let idx = self.turns.current();
        for _ in 0..steps {
            let next = self.board.advance(self.players[idx].position, 1);
            self.players[idx].position = next;
            self.ui.render_tokens(&self.players);
            self.ui.step_pause();
        }

        let landed = self.board.tile(self.players[idx].position);
        if !matches!(landed.kind, TileKind::Property | TileKind::Railroad) {
            // Ownable tiles get their own prompt instead of a toast.
            let turn = self.turns.turn_number();
            let message = format!(
                "Turn {turn}: {} landed on \"{}\"",
                self.players[idx].nick, landed.name
            );
            self.ui.toast(&message);
        }

        let outcome = resolve_tile(&self.board, &mut self.players, idx, &mut self.rng);
        match &outcome {
            TileOutcome::PurchaseOffer(offer) => {
                if self.ui.decide_purchase(offer) == PurchaseDecision::Buy {
                    buy_property(&mut self.board, &mut self.players[idx], offer.tile);
                    self.ui
                        .toast(&format!("{} buys {} for ${}", offer.nick, offer.name, offer.price));
                }
            }
            TileOutcome::Manage(menu) => self.manage_property(idx, menu.clone()),
            TileOutcome::RentPaid { owner, amount, .. } => {
                let owner_nick = self
                    .players
                    .iter()
                    .find(|p| p.id == *owner)
                    .map(|p| p.nick.clone())
                    .unwrap_or_default();
                self.ui.toast(&format!(
                    "{} pays ${amount} rent to {owner_nick}",
                    self.players[idx].nick
                ));
            }
            TileOutcome::MortgagedSkip { .. } => {
                self.ui.toast("Mortgaged property, no rent due");
            }
            TileOutcome::TaxPaid { amount } => {
                self.ui
                    .toast(&format!("{} pays ${amount} in taxes", self.players[idx].nick));
            }
            TileOutcome::Windfall { amount } => {
                self.ui.toast(&format!("Card draw: {amount:+}"));
            }
            TileOutcome::Jailed { turns } => {
                self.ui.toast(&format!(
                    "{} goes to jail for {turns} turns",
                    self.players[idx].nick
                ));
            }
            TileOutcome::Landed => {}
        }

        self.ui.refresh(&self.board, &self.players);
        if !self.ended {
            self.turns.next(&mut self.players);
        }
        outcome
    }

    /// Runs the chosen management action through the rules/bank, surfacing
    /// rule violations as toasts rather than errors.
    fn manage_property(&mut self, idx: usize, menu: ManagementMenu) {
        let action = self.ui.decide_management(&menu);
        let result = match action {
            ManagementAction::BuildHouse => {
                build_house(&mut self.board, &mut self.players[idx], menu.tile).err()
                    .map(|e| e.to_string())
            }
            ManagementAction::BuildHotel => {
                build_hotel(&mut self.board, &mut self.players[idx], menu.tile).err()
                    .map(|e| e.to_string())
            }
            ManagementAction::Mortgage => self
                .bank
                .pay_mortgage(self.board.tile_mut(menu.tile), &mut self.players[idx])
                .err()
                .map(|e| e.to_string()),
            ManagementAction::Redeem => self
                .bank
                .redeem_mortgage(self.board.tile_mut(menu.tile), &mut self.players[idx])
                .err()
                .map(|e| e.to_string()),
            ManagementAction::Pass => None,
        };
        if let Some(reason) = result {
            self.ui.toast(&reason);
        }
    }

    /// Ends the game: computes and shows the standings, then reports every
    /// entry to the scoring service. Submission failures are logged and do
    /// not block the standings.
    pub fn end_game(&mut self) -> Vec<Standing> {
        let standings = compute_standings(&self.board, &self.players);
        self.ended = true;
        self.ui.show_standings(&standings);
        for standing in &standings {
            let record = ScoreRecord {
                nick_name: standing.nick.clone(),
                score: standing.score,
                country_code: standing.country.clone(),
            };
            if let Err(err) = self.remote.submit_score(&record) {
                warn!(nick = %standing.nick, "could not submit score: {err:#}");
            }
        }
        standings
    }
}
