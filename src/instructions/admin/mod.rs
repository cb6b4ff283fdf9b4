pub mod initialize_protocol;
pub mod update_config;

pub use initialize_protocol::*;
pub use update_config::*;
