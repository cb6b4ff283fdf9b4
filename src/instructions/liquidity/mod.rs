pub mod add_liquidity;
pub mod remove_liquidity;

pub use add_liquidity::*;
pub use remove_liquidity::*;
