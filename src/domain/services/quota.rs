#[cfg(test)]
#[path = "quota_test.rs"]
mod tests;

use anyhow::Result;

use crate::domain::models::StorageArc;
use crate::domain::models::ASKED_COUNT_KEY;

/// Counts questions spent against the free ceiling. The count is stored as
/// a decimal string and survives restarts alongside the conversation.
pub struct QuotaTracker {
    storage: StorageArc,
    asked_count: usize,
}

impl QuotaTracker {
    pub async fn restore(storage: StorageArc) -> QuotaTracker {
        let asked_count = match storage.load(ASKED_COUNT_KEY).await {
            Ok(Some(payload)) => match payload.trim().parse::<usize>() {
                Ok(count) => count,
                Err(err) => {
                    tracing::warn!(error = ?err, payload = payload, "stored question count is unreadable, resetting to zero");
                    0
                }
            },
            Ok(None) => 0,
            Err(err) => {
                tracing::warn!(error = ?err, "failed to read stored question count, resetting to zero");
                0
            }
        };

        return QuotaTracker {
            storage,
            asked_count,
        };
    }

    pub fn count(&self) -> usize {
        return self.asked_count;
    }

    pub fn remaining(&self, ceiling: usize) -> usize {
        return ceiling.saturating_sub(self.asked_count);
    }

    pub fn is_exhausted(&self, ceiling: usize) -> bool {
        return self.asked_count >= ceiling;
    }

    pub async fn increment(&mut self) -> Result<()> {
        self.asked_count += 1;
        return self
            .storage
            .save(ASKED_COUNT_KEY, &self.asked_count.to_string())
            .await;
    }

    pub async fn reset(&mut self) -> Result<()> {
        self.asked_count = 0;
        return self.storage.remove(ASKED_COUNT_KEY).await;
    }
}
