use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::PlayerId;

pub const STARTING_MONEY: i64 = 1500;

/// One participant. Created at setup and alive for the whole game; money and
/// position mutate continuously. Money is signed and may go negative, there
/// is no bankruptcy rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub nick: String,
    pub country: String,
    pub token_color: String,
    pub money: i64,
    pub position: usize,
    /// Ids of owned tiles. Informational; the board's owner fields are
    /// authoritative.
    pub properties: BTreeSet<usize>,
    pub in_jail: bool,
    pub jail_turns: u32,
}

impl Player {
    pub fn new(
        id: PlayerId,
        nick: impl Into<String>,
        country: impl Into<String>,
        token_color: impl Into<String>,
    ) -> Self {
        Self {
            id,
            nick: nick.into(),
            country: country.into(),
            token_color: token_color.into(),
            money: STARTING_MONEY,
            position: 0,
            properties: BTreeSet::new(),
            in_jail: false,
            jail_turns: 0,
        }
    }

    /// Unchecked debit; callers verify affordability where the rules demand it.
    pub fn pay(&mut self, amount: i64) {
        self.money -= amount;
    }

    pub fn receive(&mut self, amount: i64) {
        self.money += amount;
    }
}
