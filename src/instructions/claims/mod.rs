pub mod batch_claim;
pub mod claim_winnings;

pub use batch_claim::*;
pub use claim_winnings::*;
