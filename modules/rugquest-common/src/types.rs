use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Geo Types ---

/// A point on the globe in signed degrees.
/// Latitude ∈ [-90, 90], longitude ∈ [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

// --- Round Types ---

/// One museum object serving as the hidden target for a round.
///
/// Produced by a `RoundSupplier`, owned by the engine for the round's
/// duration, and discarded when the round advances. The coordinates are
/// the ground truth the player's guess is scored against; the supplier
/// guarantees they are specific enough for fair scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundTarget {
    /// Museum accession/object identifier.
    pub id: String,
    pub title: String,
    /// Display name of the holding museum.
    pub museum: String,
    pub image_url: String,
    /// URL of the museum's own record for this object.
    pub source_url: String,
    /// Location string exactly as it appears in the museum record.
    pub raw_location: String,
    /// The specific place the raw location resolves to.
    pub location_name: String,
    pub coordinates: GeoPoint,
    pub culture: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub retrieved_at: DateTime<Utc>,
}

/// Scored result of a confirmed guess. Exists only while the round's
/// result is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub distance_km: f64,
    pub points: u32,
}

// --- Game State ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Loading,
    Playing,
    Result,
    Finished,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Loading => write!(f, "loading"),
            Phase::Playing => write!(f, "playing"),
            Phase::Result => write!(f, "result"),
            Phase::Finished => write!(f, "finished"),
        }
    }
}

/// Full game snapshot, published after every mutation.
///
/// `round_index` is 1-based and never exceeds `round_limit`.
/// `cumulative_score` only grows, by exactly the points of each confirmed
/// round. `last_outcome` exists only in the `result` phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub round_index: u32,
    pub round_limit: u32,
    pub cumulative_score: u32,
    /// True from round start until the guess is confirmed.
    pub round_active: bool,
    pub pending_guess: Option<GeoPoint>,
    pub current_target: Option<RoundTarget>,
    pub last_outcome: Option<RoundOutcome>,
    pub phase: Phase,
}

impl GameState {
    /// Fresh game at round one, waiting for its first target.
    pub fn new(round_limit: u32) -> Self {
        Self {
            round_index: 1,
            round_limit,
            cumulative_score: 0,
            round_active: true,
            pending_guess: None,
            current_target: None,
            last_outcome: None,
            phase: Phase::Loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_starts_loading_round_one() {
        let state = GameState::new(5);
        assert_eq!(state.round_index, 1);
        assert_eq!(state.round_limit, 5);
        assert_eq!(state.cumulative_score, 0);
        assert!(state.round_active);
        assert!(state.pending_guess.is_none());
        assert!(state.current_target.is_none());
        assert!(state.last_outcome.is_none());
        assert_eq!(state.phase, Phase::Loading);
    }

    #[test]
    fn phase_serializes_snake_case() {
        let playing = serde_json::to_string(&Phase::Playing).unwrap();
        let finished = serde_json::to_string(&Phase::Finished).unwrap();
        assert_eq!(playing, "\"playing\"");
        assert_eq!(finished, "\"finished\"");
        let back: Phase = serde_json::from_str("\"result\"").unwrap();
        assert_eq!(back, Phase::Result);
    }

    #[test]
    fn phase_display_is_lowercase() {
        assert_eq!(Phase::Loading.to_string(), "loading");
        assert_eq!(Phase::Result.to_string(), "result");
    }
}
