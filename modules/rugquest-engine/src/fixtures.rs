//! Fixture implementations for demos and integration testing.
//!
//! `FixtureSupplier` serves a static gallery of museum textiles with real
//! provenance coordinates — maximum control, zero network.

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

use rugquest_common::{GeoPoint, RoundTarget, RugQuestError};

use crate::traits::RoundSupplier;

/// Static canned supplier. Cycles through its targets in order, stamping
/// each with a fresh retrieval time.
pub struct FixtureSupplier {
    targets: Vec<RoundTarget>,
    cursor: AtomicUsize,
}

impl FixtureSupplier {
    pub fn new(targets: Vec<RoundTarget>) -> Self {
        Self {
            targets,
            cursor: AtomicUsize::new(0),
        }
    }

    /// A small gallery of well-known museum textiles.
    pub fn with_sample_targets() -> Self {
        Self::new(sample_targets())
    }
}

#[async_trait]
impl RoundSupplier for FixtureSupplier {
    async fn next_target(&self) -> Result<RoundTarget> {
        if self.targets.is_empty() {
            return Err(RugQuestError::Supply("no fixture targets loaded".to_string()).into());
        }
        let index = self.cursor.fetch_add(1, Ordering::SeqCst) % self.targets.len();
        let mut target = self.targets[index].clone();
        target.retrieved_at = Utc::now();
        Ok(target)
    }
}

/// Well-known textiles with specific, scoreable provenance.
pub fn sample_targets() -> Vec<RoundTarget> {
    vec![
        RoundTarget {
            id: "272-1893".to_string(),
            title: "The Ardabil Carpet".to_string(),
            museum: "Victoria and Albert Museum".to_string(),
            image_url: "https://collections.vam.ac.uk/item/O54307/image".to_string(),
            source_url: "https://collections.vam.ac.uk/item/O54307/the-ardabil-carpet-carpet-maqsud-of-kashan/".to_string(),
            raw_location: "Iran (probably Tabriz, made for the shrine at Ardabil)".to_string(),
            location_name: "Ardabil, Iran".to_string(),
            coordinates: GeoPoint {
                lat: 38.2498,
                lng: 48.2933,
            },
            culture: Some("Safavid".to_string()),
            date: Some("1539–40".to_string()),
            description: Some(
                "One of a pair of medallion carpets commissioned for the shrine of Shaykh Safi al-Din at Ardabil.".to_string(),
            ),
            retrieved_at: Utc::now(),
        },
        RoundTarget {
            id: "1687-93".to_string(),
            title: "The Pazyryk Carpet".to_string(),
            museum: "State Hermitage Museum".to_string(),
            image_url: "https://www.hermitagemuseum.org/digital-collection/pazyryk-carpet/image".to_string(),
            source_url: "https://www.hermitagemuseum.org/digital-collection/pazyryk-carpet".to_string(),
            raw_location: "Pazyryk barrow no. 5, Altai".to_string(),
            location_name: "Pazyryk Valley, Altai Mountains".to_string(),
            coordinates: GeoPoint {
                lat: 50.748,
                lng: 86.606,
            },
            culture: Some("Scythian".to_string()),
            date: Some("5th–4th century BC".to_string()),
            description: Some(
                "The oldest surviving knotted-pile carpet, preserved in permafrost in a Scythian burial mound.".to_string(),
            ),
            retrieved_at: Utc::now(),
        },
        RoundTarget {
            id: "43.121.1".to_string(),
            title: "The Emperor's Carpet".to_string(),
            museum: "The Met".to_string(),
            image_url: "https://images.metmuseum.org/CRDImages/is/original/DP360537.jpg".to_string(),
            source_url: "https://www.metmuseum.org/art/collection/search/446571".to_string(),
            raw_location: "Attributed to Iran, probably Herat".to_string(),
            location_name: "Herat, Afghanistan".to_string(),
            coordinates: GeoPoint {
                lat: 34.3529,
                lng: 62.204,
            },
            culture: Some("Safavid".to_string()),
            date: Some("second half 16th century".to_string()),
            description: Some(
                "A Safavid court carpet of scrolling vines and animal combat, later owned by the Habsburg emperors.".to_string(),
            ),
            retrieved_at: Utc::now(),
        },
        RoundTarget {
            id: "TIEM 681".to_string(),
            title: "Konya animal carpet".to_string(),
            museum: "Museum of Turkish and Islamic Arts".to_string(),
            image_url: "https://muze.gen.tr/tiem/konya-animal-carpet/image".to_string(),
            source_url: "https://muze.gen.tr/tiem/konya-animal-carpet".to_string(),
            raw_location: "Found in the Alâeddin Mosque, Konya".to_string(),
            location_name: "Konya, Türkiye".to_string(),
            coordinates: GeoPoint {
                lat: 37.8713,
                lng: 32.4846,
            },
            culture: Some("Seljuk".to_string()),
            date: Some("13th century".to_string()),
            description: Some(
                "One of the earliest surviving Anatolian carpets, woven under the Seljuk sultanate of Rum.".to_string(),
            ),
            retrieved_at: Utc::now(),
        },
        RoundTarget {
            id: "1904.1104".to_string(),
            title: "Chief's blanket, third phase".to_string(),
            museum: "Art Institute of Chicago".to_string(),
            image_url: "https://www.artic.edu/artworks/chiefs-blanket/image".to_string(),
            source_url: "https://www.artic.edu/artworks/chiefs-blanket".to_string(),
            raw_location: "Navajo, Arizona or New Mexico".to_string(),
            location_name: "Navajo Nation, Arizona".to_string(),
            coordinates: GeoPoint {
                lat: 36.0672,
                lng: -109.1881,
            },
            culture: Some("Diné (Navajo)".to_string()),
            date: Some("c. 1870".to_string()),
            description: Some(
                "A wearing blanket of handspun wool with stepped diamonds over a banded ground.".to_string(),
            ),
            retrieved_at: Utc::now(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cycles_through_targets_in_order() {
        let supplier = FixtureSupplier::with_sample_targets();
        let first = supplier.next_target().await.unwrap();
        let second = supplier.next_target().await.unwrap();
        assert_eq!(first.title, "The Ardabil Carpet");
        assert_eq!(second.title, "The Pazyryk Carpet");
    }

    #[tokio::test]
    async fn wraps_around_after_the_last_target() {
        let supplier = FixtureSupplier::with_sample_targets();
        let count = sample_targets().len();
        let mut last = None;
        for _ in 0..=count {
            last = Some(supplier.next_target().await.unwrap());
        }
        assert_eq!(last.unwrap().title, "The Ardabil Carpet");
    }

    #[tokio::test]
    async fn empty_supplier_errors() {
        let supplier = FixtureSupplier::new(Vec::new());
        let err = supplier.next_target().await.unwrap_err();
        assert!(err.to_string().contains("no fixture targets"));
    }
}
