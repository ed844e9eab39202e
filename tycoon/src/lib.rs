pub use bank::*;
pub use board::*;
pub use dice::*;
pub use errors::*;
pub use game::*;
pub use player::*;
pub use protocol::*;
pub use rules::*;
pub use tiles::*;
pub use turn::*;

mod bank;
mod board;
mod dice;
mod errors;
mod game;
mod player;
mod protocol;
mod rules;
mod tiles;
mod turn;
