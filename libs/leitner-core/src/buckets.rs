//! Conversion between the sparse bucket map and the dense bucket sequence.
//!
//! The dense form is a derived view: index `i` holds the cards of bucket `i`,
//! gaps are empty sets, and the sequence ends at the highest occupied key.

use crate::error::{Error, Result};
use crate::types::{BucketMap, CardId, CardSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Inclusive span of occupied bucket indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRange {
    pub min_bucket: usize,
    pub max_bucket: usize,
}

/// Convert a sparse bucket map into a dense sequence of card sets.
///
/// The result holds one set per index up to the highest key, so keys are
/// expected to be small bucket numbers.
///
/// # Panics
///
/// Panics if the highest key is `usize::MAX`, whose dense length does not
/// fit in `usize`.
pub fn to_bucket_sets(buckets: &BucketMap) -> Vec<CardSet> {
    let Some(&max_bucket) = buckets.keys().next_back() else {
        return Vec::new();
    };
    let Some(len) = max_bucket.checked_add(1) else {
        panic!("bucket {} has no dense index", max_bucket);
    };

    let mut sets = vec![CardSet::new(); len];
    for (&bucket, cards) in buckets {
        sets[bucket] = cards.clone();
    }
    sets
}

/// Find the range of buckets that contain cards, as a rough measure of progress.
///
/// Returns `None` when the sequence is empty or every bucket is empty.
pub fn get_bucket_range(buckets: &[CardSet]) -> Option<BucketRange> {
    let min_bucket = buckets.iter().position(|set| !set.is_empty())?;
    let max_bucket = buckets.iter().rposition(|set| !set.is_empty())?;
    Some(BucketRange {
        min_bucket,
        max_bucket,
    })
}

/// Indices of the non-empty positions in a dense sequence.
pub fn occupied_buckets(buckets: &[CardSet]) -> Vec<usize> {
    buckets
        .iter()
        .enumerate()
        .filter(|(_, set)| !set.is_empty())
        .map(|(idx, _)| idx)
        .collect()
}

/// Check that no card sits in more than one bucket.
pub fn validate(buckets: &BucketMap) -> Result<()> {
    let mut seen: HashMap<CardId, usize> = HashMap::new();

    for (&bucket, cards) in buckets {
        for card in cards {
            if let Some(&first) = seen.get(&card.id) {
                return Err(Error::DuplicateCard {
                    id: card.id,
                    first,
                    second: bucket,
                });
            }
            seen.insert(card.id, bucket);
        }
    }

    Ok(())
}
