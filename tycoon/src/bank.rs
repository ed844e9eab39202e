use crate::{MortgageError, Player, RedeemError, Tile};

/// The mortgage ledger. Both operations are atomic: preconditions are
/// checked before any state changes, so a failure leaves tile and player
/// untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bank;

impl Bank {
    /// Mortgages `tile`, crediting the player with its mortgage value.
    /// Returns the amount paid out.
    pub fn pay_mortgage(&self, tile: &mut Tile, player: &mut Player) -> Result<i64, MortgageError> {
        let Some(eco) = tile.economics.as_mut() else {
            return Err(MortgageError::NotOwner);
        };
        if eco.owner != Some(player.id) {
            return Err(MortgageError::NotOwner);
        }
        if eco.mortgaged {
            return Err(MortgageError::AlreadyMortgaged);
        }
        eco.mortgaged = true;
        player.receive(eco.mortgage_value);
        Ok(eco.mortgage_value)
    }

    /// Lifts a mortgage for its value plus 10% interest, rounded up.
    /// Returns the amount charged.
    pub fn redeem_mortgage(
        &self,
        tile: &mut Tile,
        player: &mut Player,
    ) -> Result<i64, RedeemError> {
        let Some(eco) = tile.economics.as_mut() else {
            return Err(RedeemError::NotOwner);
        };
        if eco.owner != Some(player.id) {
            return Err(RedeemError::NotOwner);
        }
        if !eco.mortgaged {
            return Err(RedeemError::NotMortgaged);
        }
        let cost = redemption_cost(eco.mortgage_value);
        if player.money < cost {
            return Err(RedeemError::InsufficientFunds);
        }
        eco.mortgaged = false;
        player.pay(cost);
        Ok(cost)
    }
}

/// ceil(value * 1.10) in integer arithmetic.
pub fn redemption_cost(mortgage_value: i64) -> i64 {
    (mortgage_value * 11 + 9) / 10
}
