// Test support for the engine.
//
// ScriptedSupplier drives the state machine without a museum API:
// responses are scripted per call, with an atomic call counter for
// assertions. Enable the `test-support` feature to use it from
// dependent crates.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;

use rugquest_common::{GeoPoint, RoundTarget};

use crate::traits::RoundSupplier;

// ---------------------------------------------------------------------------
// Test constants
// ---------------------------------------------------------------------------

/// Ardabil, Iran.
pub const ARDABIL: (f64, f64) = (38.2498, 48.2933);
/// Konya, Türkiye.
pub const KONYA: (f64, f64) = (37.8713, 32.4846);
/// Pazyryk Valley, Altai Mountains.
pub const PAZYRYK: (f64, f64) = (50.748, 86.606);
/// Kashan, Iran.
pub const KASHAN: (f64, f64) = (33.985, 51.41);

/// Create a minimal target at the given coordinates.
pub fn target_at(title: &str, lat: f64, lng: f64) -> RoundTarget {
    RoundTarget {
        id: format!("test-{}", title.to_lowercase().replace(' ', "-")),
        title: title.to_string(),
        museum: "Test Museum".to_string(),
        image_url: "https://example.com/image.jpg".to_string(),
        source_url: "https://example.com/object".to_string(),
        raw_location: String::new(),
        location_name: String::new(),
        coordinates: GeoPoint { lat, lng },
        culture: None,
        date: None,
        description: None,
        retrieved_at: Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// ScriptedSupplier
// ---------------------------------------------------------------------------

enum Scripted {
    Target(RoundTarget),
    Failure(String),
}

/// Scripted round supplier. Pops one response per `next_target` call;
/// once the script is exhausted it serves the fallback target, or errors
/// if none is set. Builder pattern: `.then_target()`, `.then_failure()`.
pub struct ScriptedSupplier {
    script: Mutex<VecDeque<Scripted>>,
    /// Served after the script runs out. `None` makes further calls fail.
    fallback: Option<RoundTarget>,
    calls: AtomicU32,
}

impl ScriptedSupplier {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: None,
            calls: AtomicU32::new(0),
        }
    }

    /// Supplier that answers every call with the same target.
    pub fn always(target: RoundTarget) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Some(target),
            calls: AtomicU32::new(0),
        }
    }

    pub fn then_target(self, target: RoundTarget) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Target(target));
        self
    }

    pub fn then_failure(self, message: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Failure(message.to_string()));
        self
    }

    /// Number of `next_target` calls so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedSupplier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoundSupplier for ScriptedSupplier {
    async fn next_target(&self) -> Result<RoundTarget> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Target(target)) => Ok(target),
            Some(Scripted::Failure(message)) => bail!("ScriptedSupplier: {message}"),
            None => match &self.fallback {
                Some(target) => Ok(target.clone()),
                None => bail!("ScriptedSupplier: script exhausted"),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// ScriptedSupplier self-tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pops_script_then_falls_back_to_error() {
        let supplier = ScriptedSupplier::new()
            .then_failure("boom")
            .then_target(target_at("Kashan silk rug", KASHAN.0, KASHAN.1));

        assert!(supplier.next_target().await.is_err());
        let target = supplier.next_target().await.unwrap();
        assert_eq!(target.title, "Kashan silk rug");
        assert!(supplier.next_target().await.is_err());
        assert_eq!(supplier.calls(), 3);
    }

    #[tokio::test]
    async fn always_serves_the_same_target() {
        let supplier = ScriptedSupplier::always(target_at("Konya rug", KONYA.0, KONYA.1));
        for _ in 0..3 {
            let target = supplier.next_target().await.unwrap();
            assert_eq!(target.title, "Konya rug");
        }
        assert_eq!(supplier.calls(), 3);
    }
}
