//! The round state machine.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use rugquest_common::{geo, GameState, GeoPoint, Phase, RoundOutcome};

use crate::retry::RetryPolicy;
use crate::traits::RoundSupplier;

/// Inner mutable state. One lock guards both the snapshot and the supply
/// generation counter, so a superseded fetch can never observe a
/// half-updated round.
struct EngineInner {
    state: GameState,
    /// Bumped on every `start_round`. A supply task only applies its
    /// result while its captured generation is still current.
    generation: u64,
}

/// Round-based game state machine.
///
/// Owns the single [`GameState`] and publishes a full snapshot on a watch
/// channel after every mutation; a presentation layer renders from the
/// latest snapshot and feeds user gestures back in. All gesture
/// operations (`submit_guess`, `confirm_guess`, `advance`, `restart`)
/// are total: calls that are invalid for the current phase are ignored,
/// never errors. Enabling and disabling controls is the presentation's
/// job, keyed off `phase` and `round_active`.
pub struct GameEngine {
    inner: Arc<Mutex<EngineInner>>,
    supplier: Arc<dyn RoundSupplier>,
    policy: RetryPolicy,
    tx: watch::Sender<GameState>,
}

impl GameEngine {
    pub fn new(supplier: Arc<dyn RoundSupplier>, round_limit: u32) -> Self {
        Self::with_policy(supplier, round_limit, RetryPolicy::default())
    }

    pub fn with_policy(
        supplier: Arc<dyn RoundSupplier>,
        round_limit: u32,
        policy: RetryPolicy,
    ) -> Self {
        let state = GameState::new(round_limit);
        let (tx, _rx) = watch::channel(state.clone());
        Self {
            inner: Arc::new(Mutex::new(EngineInner {
                state,
                generation: 0,
            })),
            supplier,
            policy,
            tx,
        }
    }

    /// Subscribe to state snapshots. The receiver always holds the latest.
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.tx.subscribe()
    }

    /// Current snapshot.
    pub fn state(&self) -> GameState {
        self.lock().state.clone()
    }

    /// Begin fetching a target for the current round index.
    ///
    /// Enters `loading`, clears the previous round's guess, outcome, and
    /// target, and spawns the supply task. Each call supersedes any fetch
    /// still in flight: the older task drops its result once its
    /// generation no longer matches. Must be called from within a tokio
    /// runtime.
    pub fn start_round(&self) {
        let generation = {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.state.phase = Phase::Loading;
            inner.state.round_active = true;
            inner.state.pending_guess = None;
            inner.state.last_outcome = None;
            inner.state.current_target = None;
            info!(round = inner.state.round_index, "Round starting");
            self.tx.send_replace(inner.state.clone());
            inner.generation
        };

        let inner = Arc::clone(&self.inner);
        let supplier = Arc::clone(&self.supplier);
        let tx = self.tx.clone();
        let policy = self.policy;
        tokio::spawn(async move {
            supply_round(inner, supplier, tx, policy, generation).await;
        });
    }

    /// Record a map click as the pending guess. Ignored outside an
    /// active playing round.
    pub fn submit_guess(&self, pos: GeoPoint) {
        let mut inner = self.lock();
        if inner.state.phase != Phase::Playing || !inner.state.round_active {
            debug!(phase = %inner.state.phase, "Guess ignored outside active round");
            return;
        }
        inner.state.pending_guess = Some(pos);
        self.tx.send_replace(inner.state.clone());
    }

    /// Score the pending guess against the current target.
    ///
    /// No-op unless the round is in play with both a guess and a target
    /// present. The only mutator of the cumulative score; gating on the
    /// playing phase means a repeated confirmation cannot double-count.
    pub fn confirm_guess(&self) {
        let mut inner = self.lock();
        if inner.state.phase != Phase::Playing {
            debug!(phase = %inner.state.phase, "Confirm ignored outside playing phase");
            return;
        }
        let (guess, target_pos) = match (
            inner.state.pending_guess,
            inner.state.current_target.as_ref(),
        ) {
            (Some(guess), Some(target)) => (guess, target.coordinates),
            _ => {
                debug!("Confirm ignored without a guess and a target");
                return;
            }
        };

        let distance_km = geo::haversine_km(guess, target_pos);
        let points = geo::score_from_distance(distance_km);
        inner.state.round_active = false;
        inner.state.cumulative_score += points;
        inner.state.last_outcome = Some(RoundOutcome {
            distance_km,
            points,
        });
        inner.state.phase = Phase::Result;
        info!(
            round = inner.state.round_index,
            distance_km, points, "Guess confirmed"
        );
        self.tx.send_replace(inner.state.clone());
    }

    /// Leave the result screen: either the next round or the end card.
    ///
    /// On the last round the game enters `finished` and no further fetch
    /// is started; otherwise the round index increments by one and a new
    /// fetch begins. Ignored outside `result`.
    pub fn advance(&self) {
        {
            let mut inner = self.lock();
            if inner.state.phase != Phase::Result {
                debug!(phase = %inner.state.phase, "Advance ignored outside result phase");
                return;
            }
            if inner.state.round_index == inner.state.round_limit {
                inner.state.phase = Phase::Finished;
                inner.state.last_outcome = None;
                info!(
                    score = inner.state.cumulative_score,
                    rounds = inner.state.round_limit,
                    "Game finished"
                );
                self.tx.send_replace(inner.state.clone());
                return;
            }
            inner.state.round_index += 1;
        }
        self.start_round();
    }

    /// Reset to round one with a zero score and fetch a fresh target.
    /// Allowed from any phase, including `finished`.
    pub fn restart(&self) {
        {
            let mut inner = self.lock();
            inner.state.round_index = 1;
            inner.state.cumulative_score = 0;
            inner.state.pending_guess = None;
            inner.state.last_outcome = None;
            inner.state.round_active = true;
            info!("Game restarted");
        }
        self.start_round();
    }

    fn lock(&self) -> MutexGuard<'_, EngineInner> {
        self.inner.lock().expect("engine state lock poisoned")
    }
}

/// Fetch one target, retrying per policy, and apply it if still current.
async fn supply_round(
    inner: Arc<Mutex<EngineInner>>,
    supplier: Arc<dyn RoundSupplier>,
    tx: watch::Sender<GameState>,
    policy: RetryPolicy,
    generation: u64,
) {
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        match supplier.next_target().await {
            Ok(target) => {
                let mut guard = inner.lock().expect("engine state lock poisoned");
                if guard.generation != generation {
                    debug!(generation, "Superseded supply result dropped");
                    return;
                }
                info!(
                    round = guard.state.round_index,
                    title = %target.title,
                    location = %target.location_name,
                    "Round target ready"
                );
                guard.state.current_target = Some(target);
                guard.state.phase = Phase::Playing;
                tx.send_replace(guard.state.clone());
                return;
            }
            Err(e) => {
                if let Some(max) = policy.max_attempts {
                    if attempt >= max {
                        error!(attempt, error = %e, "Round supply failed, attempts exhausted");
                        return;
                    }
                }
                warn!(attempt, error = %e, "Round supply failed, retrying");
                tokio::time::sleep(policy.delay).await;
                let stale = inner.lock().expect("engine state lock poisoned").generation
                    != generation;
                if stale {
                    debug!(generation, "Superseded supply retry cancelled");
                    return;
                }
            }
        }
    }
}
