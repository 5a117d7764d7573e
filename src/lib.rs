pub mod lcu;
pub mod loot;
pub mod reroll;
pub mod config;
pub mod error;
pub mod utils;

pub use error::{Result, RerollError};
pub use config::Config;
