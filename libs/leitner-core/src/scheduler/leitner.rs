//! Modified-Leitner schedule.
//!
//! Bucket `i` is reviewed every `2^i` days: on day `d` (zero-based) it is due
//! when `(d + 1)` is a multiple of `2^i`. Only buckets `0..=retired_bucket`
//! are ever selected, and promotion stops at `retired_bucket`, so a card can
//! never be parked where the schedule would not find it.

use super::BucketScheduler;
use crate::error::{Error, Result};
use crate::types::{AnswerDifficulty, CardSet, RETIRED_BUCKET};

/// Largest retired bucket for which `2^bucket` still fits in a `u64` day count.
pub const MAX_RETIRED_BUCKET: usize = 63;

/// Modified-Leitner scheduler with a configurable retired tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifiedLeitner {
    retired_bucket: usize,
}

impl Default for ModifiedLeitner {
    fn default() -> Self {
        Self {
            retired_bucket: RETIRED_BUCKET,
        }
    }
}

impl ModifiedLeitner {
    pub fn new(retired_bucket: usize) -> Result<Self> {
        if retired_bucket > MAX_RETIRED_BUCKET {
            return Err(Error::InvalidSettings(format!(
                "retired_bucket must be at most {}, got {}",
                MAX_RETIRED_BUCKET, retired_bucket
            )));
        }
        Ok(Self { retired_bucket })
    }

    pub fn retired_bucket(&self) -> usize {
        self.retired_bucket
    }

    /// Review period of a bucket in days, or `None` outside the schedule.
    pub fn period(&self, bucket: usize) -> Option<u64> {
        if bucket > self.retired_bucket {
            return None;
        }
        1u64.checked_shl(bucket as u32)
    }

    /// Whether `bucket` is due on `day`.
    pub fn is_due(&self, bucket: usize, day: u64) -> bool {
        // (day + 1) % period == 0, without overflowing at u64::MAX
        match self.period(bucket) {
            Some(period) => day % period == period - 1,
            None => false,
        }
    }
}

impl BucketScheduler for ModifiedLeitner {
    fn name(&self) -> &'static str {
        "modified_leitner"
    }

    fn due_cards(&self, buckets: &[CardSet], day: u64) -> CardSet {
        let due: CardSet = buckets
            .iter()
            .enumerate()
            .take(self.retired_bucket + 1)
            .filter(|(bucket, _)| self.is_due(*bucket, day))
            .flat_map(|(_, cards)| cards.iter().cloned())
            .collect();

        tracing::trace!(day, due = due.len(), "selected due cards");
        due
    }

    fn next_bucket(&self, current: usize, difficulty: AnswerDifficulty) -> usize {
        match difficulty {
            AnswerDifficulty::Wrong => 0,
            AnswerDifficulty::Hard => current.saturating_sub(1),
            AnswerDifficulty::Easy => current.saturating_add(1).min(self.retired_bucket),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::find_bucket;
    use crate::types::{BucketMap, Flashcard};

    fn cards(n: usize) -> Vec<Flashcard> {
        (0..n)
            .map(|i| Flashcard::new(format!("card{}", i), "back", "", vec![]))
            .collect()
    }

    fn one_per_bucket(cards: &[Flashcard]) -> Vec<CardSet> {
        cards
            .iter()
            .map(|c| std::iter::once(c.clone()).collect())
            .collect()
    }

    #[test]
    fn bucket_zero_due_every_day() {
        let leitner = ModifiedLeitner::default();
        assert!((0..40).all(|day| leitner.is_due(0, day)));
    }

    #[test]
    fn periods_double_per_bucket() {
        let leitner = ModifiedLeitner::default();
        let periods: Vec<_> = (0..=6).map(|b| leitner.period(b)).collect();
        assert_eq!(
            periods,
            vec![Some(1), Some(2), Some(4), Some(8), Some(16), Some(32), None]
        );
    }

    #[test]
    fn bucket_one_due_on_odd_days() {
        let leitner = ModifiedLeitner::default();
        assert!(!leitner.is_due(1, 0));
        assert!(leitner.is_due(1, 1));
        assert!(!leitner.is_due(1, 2));
        assert!(leitner.is_due(1, 3));
    }

    #[test]
    fn is_due_does_not_overflow_on_last_day() {
        let leitner = ModifiedLeitner::new(MAX_RETIRED_BUCKET).unwrap();
        assert!(leitner.is_due(MAX_RETIRED_BUCKET, u64::MAX));
        assert!(!leitner.is_due(MAX_RETIRED_BUCKET, u64::MAX - 1));
    }

    #[test]
    fn day_zero_selects_only_bucket_zero() {
        let deck = cards(6);
        let due = ModifiedLeitner::default().due_cards(&one_per_bucket(&deck), 0);
        assert_eq!(due.len(), 1);
        assert!(due.contains(&deck[0]));
    }

    #[test]
    fn shorter_sequence_contributes_nothing_for_missing_tiers() {
        let deck = cards(2);
        let due = ModifiedLeitner::default().due_cards(&one_per_bucket(&deck), 31);
        assert_eq!(due.len(), 2);
    }

    #[test]
    fn empty_sequence_has_nothing_due() {
        assert!(ModifiedLeitner::default().due_cards(&[], 7).is_empty());
    }

    #[test]
    fn buckets_past_retired_are_never_selected() {
        let deck = cards(7);
        let sets = one_per_bucket(&deck);
        let leitner = ModifiedLeitner::default();
        for day in 0..256 {
            assert!(!leitner.due_cards(&sets, day).contains(&deck[6]));
        }
    }

    #[test]
    fn transitions_follow_grades() {
        let leitner = ModifiedLeitner::default();
        assert_eq!(leitner.next_bucket(2, AnswerDifficulty::Easy), 3);
        assert_eq!(leitner.next_bucket(3, AnswerDifficulty::Hard), 2);
        assert_eq!(leitner.next_bucket(2, AnswerDifficulty::Wrong), 0);
        assert_eq!(leitner.next_bucket(0, AnswerDifficulty::Hard), 0);
        assert_eq!(leitner.next_bucket(5, AnswerDifficulty::Easy), 5);
    }

    #[test]
    fn custom_retired_bucket_caps_promotion() {
        let leitner = ModifiedLeitner::new(3).unwrap();
        assert_eq!(leitner.next_bucket(3, AnswerDifficulty::Easy), 3);
        assert!(!leitner.is_due(4, 15));
    }

    #[test]
    fn rejects_retired_bucket_past_u64_range() {
        assert!(matches!(
            ModifiedLeitner::new(64),
            Err(Error::InvalidSettings(_))
        ));
    }

    #[test]
    fn apply_review_creates_destination_bucket() {
        let deck = cards(1);
        let mut map = BucketMap::new();
        map.insert(2, std::iter::once(deck[0].clone()).collect());

        let updated =
            ModifiedLeitner::default().apply_review(&map, &deck[0], AnswerDifficulty::Easy);
        assert_eq!(find_bucket(&updated, &deck[0]), Some(3));
        assert!(updated[&2].is_empty());
        assert_eq!(find_bucket(&map, &deck[0]), Some(2));
    }
}
