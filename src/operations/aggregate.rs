//! # Average Cost Maintenance
//!
//! Keeps `Bootcamp.average_cost` in line with the tuition of its courses.
//! Course operations call [`AverageCostMaintainer::refresh`] after every write
//! that can change the mean.
//!
//! Failures stay here: they are logged and the triggering operation succeeds
//! regardless. Two concurrent refreshes for one bootcamp may interleave, and
//! the last write wins.

use std::sync::Arc;

use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::store::RecordStore;

/// Round a mean tuition up to the next multiple of 10
pub fn round_up_to_ten(mean: f64) -> f64 {
    (mean / 10.0).ceil() * 10.0
}

/// Recomputes the derived average cost of a bootcamp
#[derive(Clone)]
pub struct AverageCostMaintainer {
    store: Arc<dyn RecordStore>,
}

impl AverageCostMaintainer {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Recompute and store the average cost of `bootcamp_id`.
    ///
    /// Returns the stored value, or `None` when nothing was written. With no
    /// remaining courses the previous value is kept.
    pub async fn refresh(&self, bootcamp_id: Uuid) -> Option<f64> {
        debug!(bootcamp = %bootcamp_id, "Calculating average cost");

        let mean = match self.store.average_tuition(bootcamp_id).await {
            Ok(Some(mean)) => mean,
            Ok(None) => {
                warn!(bootcamp = %bootcamp_id, "No courses left; average cost unchanged");
                return None;
            }
            Err(e) => {
                error!(bootcamp = %bootcamp_id, error = %e, "Average tuition aggregation failed");
                return None;
            }
        };

        let average_cost = round_up_to_ten(mean);
        match self.store.set_average_cost(bootcamp_id, average_cost).await {
            Ok(Some(_)) => {
                debug!(bootcamp = %bootcamp_id, average_cost, "Average cost updated");
                Some(average_cost)
            }
            Ok(None) => {
                warn!(bootcamp = %bootcamp_id, "Bootcamp vanished before average cost update");
                None
            }
            Err(e) => {
                error!(bootcamp = %bootcamp_id, error = %e, "Average cost update failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_up_to_ten() {
        assert_eq!(round_up_to_ten(1500.0), 1500.0);
        assert_eq!(round_up_to_ten(1025.0), 1030.0);
        assert_eq!(round_up_to_ten(1020.01), 1030.0);
        assert_eq!(round_up_to_ten(0.0), 0.0);
    }

    #[tokio::test]
    async fn test_refresh_unknown_bootcamp_is_silent() {
        let store: Arc<dyn RecordStore> = Arc::new(crate::store::InMemoryStore::new());
        let maintainer = AverageCostMaintainer::new(store);
        assert_eq!(maintainer.refresh(Uuid::new_v4()).await, None);
    }
}
