//! # Batch Update Engine
//!
//! Applies one loaded cover to a resolved set of song ids, one record at a
//! time. The engine is deliberately dumb: it does not retry, roll back, or
//! parallelize. Each id is visited exactly once in input order, each update
//! is awaited before the next is issued, and a rejected update is counted
//! and skipped rather than stopping the run.
//!
//! The resulting [`BatchReport`] carries the counters and the ordered list
//! of failed ids; [`BatchReport::outcome`] classifies the run for reporting.

use host_traits::records::{CoverArt, SongId};
use host_traits::store::MediaStore;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Counters and failures of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Number of ids visited. Always equals the input length.
    pub total: usize,
    /// Number of successful cover updates.
    pub succeeded: usize,
    /// Number of rejected cover updates.
    pub failed: usize,
    /// Ids whose update was rejected, in processing order.
    pub failed_ids: Vec<SongId>,
}

impl BatchReport {
    /// Classifies the run.
    ///
    /// The decision order matters and is part of the contract: mixed counts
    /// are partial success, zero successes are total failure (which is where
    /// an empty batch lands), everything else is full success.
    pub fn outcome(&self) -> BatchOutcome {
        if self.failed > 0 && self.succeeded > 0 {
            BatchOutcome::PartialSuccess
        } else if self.succeeded == 0 {
            BatchOutcome::TotalFailure
        } else {
            BatchOutcome::FullSuccess
        }
    }
}

/// Three-way classification of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchOutcome {
    /// Every update succeeded.
    FullSuccess,
    /// Some updates succeeded and some failed.
    PartialSuccess,
    /// No update succeeded. An empty batch also lands here.
    TotalFailure,
}

/// Applies `cover` to every id in `song_ids`, strictly in input order.
///
/// Never fails as a whole: per-record rejections are absorbed into the
/// report and logged, and the store is left with whatever updates succeeded.
/// Re-running the same batch converges to the same covers.
pub async fn assign_cover(
    store: &dyn MediaStore,
    song_ids: &[SongId],
    cover: &CoverArt,
) -> BatchReport {
    let mut report = BatchReport::default();

    for song_id in song_ids {
        match store.update_song_cover(song_id, cover.clone()).await {
            Ok(()) => report.succeeded += 1,
            Err(error) => {
                report.failed += 1;
                report.failed_ids.push(song_id.clone());
                warn!(song_id = %song_id, error = %error, "Could not update song cover");
            }
        }
        report.total += 1;
    }

    report
}
