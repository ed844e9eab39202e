use crate::PlayerId;

/// The error type for board configuration problems found at bootstrap.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    NoTiles,
    /// A tile record names an owner id that matches no player at the table.
    UnknownOwner { tile: usize, owner: PlayerId },
}

impl std::error::Error for ConfigError {}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoTiles => {
                write!(f, "The board configuration contained no tiles")
            }
            ConfigError::UnknownOwner { tile, owner } => {
                write!(
                    f,
                    "Tile {tile} is configured as owned by unknown player {owner}"
                )
            }
        }
    }
}

/// The error type for [`Bank::pay_mortgage`](crate::Bank::pay_mortgage).
#[derive(Debug, PartialEq, Eq)]
pub enum MortgageError {
    NotOwner,
    AlreadyMortgaged,
}

impl std::error::Error for MortgageError {}

impl std::fmt::Display for MortgageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MortgageError::NotOwner => {
                write!(f, "Only the owner of a property can mortgage it")
            }
            MortgageError::AlreadyMortgaged => {
                write!(f, "The property is already mortgaged")
            }
        }
    }
}

/// The error type for [`Bank::redeem_mortgage`](crate::Bank::redeem_mortgage).
#[derive(Debug, PartialEq, Eq)]
pub enum RedeemError {
    NotOwner,
    NotMortgaged,
    InsufficientFunds,
}

impl std::error::Error for RedeemError {}

impl std::fmt::Display for RedeemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RedeemError::NotOwner => {
                write!(f, "Only the owner of a property can redeem its mortgage")
            }
            RedeemError::NotMortgaged => {
                write!(f, "The property is not mortgaged")
            }
            RedeemError::InsufficientFunds => {
                write!(f, "Not enough money to pay off the mortgage plus interest")
            }
        }
    }
}

/// The error type for the construction operations in [`crate::rules`].
#[derive(Debug, PartialEq, Eq)]
pub enum BuildError {
    NotOwner,
    Mortgaged,
    HotelAlreadyBuilt,
    MaxHousesReached,
    IncompleteColorSet,
    NeedFourHouses,
    InsufficientFunds,
}

impl std::error::Error for BuildError {}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::NotOwner => {
                write!(f, "Only the owner of a property can build on it")
            }
            BuildError::Mortgaged => {
                write!(f, "A mortgaged property cannot be improved")
            }
            BuildError::HotelAlreadyBuilt => {
                write!(f, "The property already has a hotel")
            }
            BuildError::MaxHousesReached => {
                write!(f, "The property already has four houses")
            }
            BuildError::IncompleteColorSet => {
                write!(f, "Building requires owning every property of the color group")
            }
            BuildError::NeedFourHouses => {
                write!(f, "A hotel requires exactly four houses on the property")
            }
            BuildError::InsufficientFunds => {
                write!(f, "Not enough money to pay for the construction")
            }
        }
    }
}
