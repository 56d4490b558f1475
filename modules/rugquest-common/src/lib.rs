pub mod config;
pub mod error;
pub mod geo;
pub mod types;

pub use config::Config;
pub use error::RugQuestError;
pub use geo::{haversine_km, score_from_distance, MAX_POINTS};
pub use types::*;
