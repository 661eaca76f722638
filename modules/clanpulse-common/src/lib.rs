pub mod config;
pub mod error;
pub mod leagues;
pub mod types;

pub use config::Config;
pub use error::ClanPulseError;
pub use leagues::{compare_ranked_leagues, is_top_league, league_rank};
pub use types::*;
