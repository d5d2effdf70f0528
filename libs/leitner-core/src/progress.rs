//! Learning progress statistics over the bucket map and review history.

use crate::types::{AnswerDifficulty, BucketMap, CardId, ReviewEntry};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Summary of a learner's review history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub total_reviews: usize,
    /// Reviews graded Easy.
    pub correct_count: usize,
    /// Reviews graded Wrong. Hard counts toward neither.
    pub incorrect_count: usize,
    /// Correct share of all reviews, 0-100 rounded to two decimals.
    pub accuracy_percent: f64,
    /// Reviews per bucket, attributed to each card's current bucket.
    pub per_bucket_review_count: BTreeMap<usize, usize>,
}

/// Compute progress statistics.
///
/// Every bucket present in `buckets` gets an entry in
/// `per_bucket_review_count`, even with zero reviews. History entries for
/// cards that are no longer in any bucket count toward the totals only.
pub fn compute_progress(buckets: &BucketMap, history: &[ReviewEntry]) -> ProgressStats {
    let location: HashMap<CardId, usize> = buckets
        .iter()
        .flat_map(|(&bucket, cards)| cards.iter().map(move |card| (card.id, bucket)))
        .collect();

    let mut per_bucket_review_count: BTreeMap<usize, usize> =
        buckets.keys().map(|&bucket| (bucket, 0)).collect();
    let mut correct_count = 0;
    let mut incorrect_count = 0;

    for entry in history {
        match entry.difficulty {
            AnswerDifficulty::Easy => correct_count += 1,
            AnswerDifficulty::Wrong => incorrect_count += 1,
            AnswerDifficulty::Hard => {}
        }

        if let Some(bucket) = location.get(&entry.card) {
            *per_bucket_review_count.entry(*bucket).or_insert(0) += 1;
        }
    }

    let total_reviews = history.len();
    ProgressStats {
        total_reviews,
        correct_count,
        incorrect_count,
        accuracy_percent: accuracy(correct_count, total_reviews),
        per_bucket_review_count,
    }
}

fn accuracy(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = correct as f64 / total as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}
