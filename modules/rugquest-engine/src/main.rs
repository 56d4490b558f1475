use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rugquest_common::{Config, GeoPoint, Phase};
use rugquest_engine::engine::GameEngine;
use rugquest_engine::fixtures::FixtureSupplier;
use rugquest_engine::retry::RetryPolicy;

/// Demo guess used for every round: Istanbul.
const DEMO_GUESS: GeoPoint = GeoPoint {
    lat: 41.0082,
    lng: 28.9784,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("rugquest_engine=info".parse()?))
        .init();

    info!("RugQuest engine demo starting...");

    let config = Config::from_env();
    let policy = RetryPolicy {
        delay: Duration::from_millis(config.supply_retry_delay_ms),
        max_attempts: config.supply_max_attempts,
    };

    let supplier = Arc::new(FixtureSupplier::with_sample_targets());
    let engine = GameEngine::with_policy(supplier, config.round_limit, policy);
    let mut rx = engine.subscribe();

    engine.start_round();

    // Autoplay from snapshots: guess Istanbul every round.
    loop {
        rx.changed().await?;
        let state = rx.borrow_and_update().clone();
        match state.phase {
            Phase::Loading => {}
            Phase::Playing => {
                if let Some(target) = &state.current_target {
                    info!(
                        round = state.round_index,
                        title = %target.title,
                        museum = %target.museum,
                        "Guessing"
                    );
                }
                engine.submit_guess(DEMO_GUESS);
                engine.confirm_guess();
            }
            Phase::Result => {
                if let Some(outcome) = state.last_outcome {
                    info!(
                        round = state.round_index,
                        distance_km = outcome.distance_km,
                        points = outcome.points,
                        total = state.cumulative_score,
                        "Round scored"
                    );
                }
                engine.advance();
            }
            Phase::Finished => {
                info!(score = state.cumulative_score, "Quest complete");
                break;
            }
        }
    }

    Ok(())
}
