pub mod create_round;
pub mod settle_round;
pub mod sweep_round;

pub use create_round::*;
pub use settle_round::*;
pub use sweep_round::*;
