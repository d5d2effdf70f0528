//! Bucket scheduling: which cards are due, and where a graded card moves.
//!
//! The free functions use [`ModifiedLeitner::default`], the six-tier
//! schedule with bucket 5 as the retired tier.

pub mod leitner;

pub use leitner::{ModifiedLeitner, MAX_RETIRED_BUCKET};

use crate::types::{AnswerDifficulty, BucketMap, CardSet, Flashcard};

/// Trait for bucket-based schedulers.
pub trait BucketScheduler: Send + Sync {
    /// Scheduler identifier.
    fn name(&self) -> &'static str;

    /// Cards due on `day` (zero-based), given the dense bucket sequence.
    fn due_cards(&self, buckets: &[CardSet], day: u64) -> CardSet;

    /// Bucket a card moves to from `current` after being graded.
    fn next_bucket(&self, current: usize, difficulty: AnswerDifficulty) -> usize;

    /// Apply a graded review to a copy of `buckets`.
    ///
    /// The input map is left untouched. A card found in no bucket yields an
    /// unchanged copy. The destination bucket is created if missing; the
    /// source bucket keeps its entry even when the move empties it.
    fn apply_review(
        &self,
        buckets: &BucketMap,
        card: &Flashcard,
        difficulty: AnswerDifficulty,
    ) -> BucketMap {
        let mut updated = buckets.clone();

        let Some(current) = find_bucket(buckets, card) else {
            tracing::debug!(card = %card.id, "card not in any bucket, review ignored");
            return updated;
        };

        let next = self.next_bucket(current, difficulty);
        if let Some(cards) = updated.get_mut(&current) {
            cards.remove(card);
        }
        updated.entry(next).or_default().insert(card.clone());

        tracing::debug!(
            card = %card.id,
            %difficulty,
            from = current,
            to = next,
            "card moved"
        );
        updated
    }
}

/// Bucket number currently holding `card`, if any.
pub fn find_bucket(buckets: &BucketMap, card: &Flashcard) -> Option<usize> {
    buckets
        .iter()
        .find(|(_, cards)| cards.contains(card))
        .map(|(&bucket, _)| bucket)
}

/// Select the cards to practice on `day` under the default schedule.
pub fn practice(buckets: &[CardSet], day: u64) -> CardSet {
    ModifiedLeitner::default().due_cards(buckets, day)
}

/// Move `card` after a graded review under the default schedule.
pub fn update(buckets: &BucketMap, card: &Flashcard, difficulty: AnswerDifficulty) -> BucketMap {
    ModifiedLeitner::default().apply_review(buckets, card, difficulty)
}

/// Whether `bucket` is due on `day` under the default schedule.
pub fn is_due(bucket: usize, day: u64) -> bool {
    ModifiedLeitner::default().is_due(bucket, day)
}

/// Destination bucket under the default schedule.
pub fn next_bucket(current: usize, difficulty: AnswerDifficulty) -> usize {
    ModifiedLeitner::default().next_bucket(current, difficulty)
}
