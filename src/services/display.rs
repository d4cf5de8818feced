use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::RecommendationResult;

struct Published {
    seq: u64,
    result: Arc<RecommendationResult>,
}

/// Latest result handed to the display host
///
/// Results are swapped in whole under a write lock, so readers see either the old or the new
/// result. A result from an older run than the one on display is discarded.
#[derive(Clone, Default)]
pub struct DisplaySlot {
    inner: Arc<RwLock<Option<Published>>>,
}

impl DisplaySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes the result of run `seq`, returning false when it was stale
    pub async fn publish(&self, seq: u64, result: RecommendationResult) -> bool {
        let mut current = self.inner.write().await;
        if let Some(shown) = current.as_ref() {
            if seq < shown.seq {
                tracing::warn!(
                    run = seq,
                    displayed = shown.seq,
                    "Discarding result older than the one on display"
                );
                return false;
            }
        }
        *current = Some(Published {
            seq,
            result: Arc::new(result),
        });
        true
    }

    pub async fn latest(&self) -> Option<Arc<RecommendationResult>> {
        self.inner.read().await.as_ref().map(|p| p.result.clone())
    }

    /// Sequence number of the run currently on display
    pub async fn displayed_seq(&self) -> Option<u64> {
        self.inner.read().await.as_ref().map(|p| p.seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MissingFields;

    fn result(text: &str) -> RecommendationResult {
        RecommendationResult::new(text, MissingFields::new())
    }

    #[tokio::test]
    async fn test_empty_slot() {
        let slot = DisplaySlot::new();
        assert!(slot.latest().await.is_none());
        assert!(slot.displayed_seq().await.is_none());
    }

    #[tokio::test]
    async fn test_newer_run_replaces() {
        let slot = DisplaySlot::new();
        assert!(slot.publish(1, result("first")).await);
        assert!(slot.publish(2, result("second")).await);

        assert_eq!(slot.latest().await.unwrap().text, "second");
        assert_eq!(slot.displayed_seq().await, Some(2));
    }

    #[tokio::test]
    async fn test_slower_older_run_is_dropped() {
        let slot = DisplaySlot::new();
        assert!(slot.publish(5, result("run five")).await);
        assert!(!slot.publish(4, result("run four")).await);

        assert_eq!(slot.latest().await.unwrap().text, "run five");
    }
}
