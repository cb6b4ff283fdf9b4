pub mod cancel_bet;
pub mod place_bet;

pub use cancel_bet::*;
pub use place_bet::*;
