pub mod bet;
pub mod config;
pub mod liquidity;
pub mod reserve;
pub mod round;

pub use bet::*;
pub use config::*;
pub use liquidity::*;
pub use reserve::*;
pub use round::*;
