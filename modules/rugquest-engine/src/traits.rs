// Trait boundary for round data supply.
//
// The engine never talks to a museum API directly: everything it needs
// for a round arrives through RoundSupplier. This enables deterministic
// testing with ScriptedSupplier — no network, `cargo test` in seconds.

use anyhow::Result;
use async_trait::async_trait;

use rugquest_common::RoundTarget;

/// Produces one geocoded museum object per call.
///
/// Implementations are responsible for filtering out objects whose
/// provenance is too vague to score fairly; the engine trusts every
/// target it receives. Failures are retried by the engine per its
/// retry policy, so a supplier may simply error on a bad draw.
#[async_trait]
pub trait RoundSupplier: Send + Sync {
    async fn next_target(&self) -> Result<RoundTarget>;
}
