pub mod admin;
pub mod betting;
pub mod claims;
pub mod liquidity;
pub mod queries;
pub mod remaining;
pub mod round;

pub use admin::*;
pub use betting::*;
pub use claims::*;
pub use liquidity::*;
pub use queries::*;
pub use round::*;
