pub mod betting;
pub mod claims;
pub mod settlement;
pub mod sweep;

pub use betting::*;
pub use claims::*;
pub use settlement::*;
pub use sweep::*;
