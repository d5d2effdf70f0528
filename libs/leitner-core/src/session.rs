//! Practice session: walks one day's due cards and applies each grade.
//!
//! The session works on its own copy of the bucket map. Callers replace
//! their stored map with [`SessionOutcome::buckets`] once the session ends.

use crate::buckets::to_bucket_sets;
use crate::error::{Error, Result};
use crate::hint::get_hint_or;
use crate::scheduler::{find_bucket, BucketScheduler, ModifiedLeitner};
use crate::settings::StudySettings;
use crate::types::{AnswerDifficulty, BucketMap, Flashcard, ReviewEntry};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Final state of a practice session.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub buckets: BucketMap,
    pub history: Vec<ReviewEntry>,
}

#[derive(Debug, Clone)]
pub struct PracticeSession {
    scheduler: ModifiedLeitner,
    day: u64,
    buckets: BucketMap,
    /// Due cards with the bucket each was selected from.
    queue: VecDeque<(usize, Flashcard)>,
    history: Vec<ReviewEntry>,
    missing_hint_text: String,
}

impl PracticeSession {
    /// Start a session for `day`.
    ///
    /// Due cards are ordered by bucket, then front text, then ID, and cut to
    /// `cards_per_session` when set.
    pub fn start(buckets: &BucketMap, day: u64, settings: &StudySettings) -> Result<Self> {
        settings.validate()?;
        let scheduler = settings.scheduler()?;

        let mut due: Vec<(usize, Flashcard)> = scheduler
            .due_cards(&to_bucket_sets(buckets), day)
            .into_iter()
            .filter_map(|card| find_bucket(buckets, &card).map(|bucket| (bucket, card)))
            .collect();
        due.sort_by(|(a_bucket, a), (b_bucket, b)| {
            a_bucket
                .cmp(b_bucket)
                .then_with(|| a.front.cmp(&b.front))
                .then_with(|| a.id.cmp(&b.id))
        });
        if let Some(limit) = settings.cards_per_session {
            due.truncate(limit);
        }

        tracing::debug!(
            scheduler = scheduler.name(),
            day,
            cards = due.len(),
            "practice session started"
        );

        Ok(Self {
            scheduler,
            day,
            buckets: buckets.clone(),
            queue: due.into(),
            history: Vec::new(),
            missing_hint_text: settings.missing_hint_text.clone(),
        })
    }

    pub fn day(&self) -> u64 {
        self.day
    }

    /// Card awaiting a grade.
    pub fn current(&self) -> Option<&Flashcard> {
        self.queue.front().map(|(_, card)| card)
    }

    /// Hint for the current card, falling back to the configured text.
    pub fn current_hint(&self) -> Option<&str> {
        self.current()
            .map(|card| get_hint_or(card, &self.missing_hint_text))
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// Bucket map with every grade so far applied.
    pub fn buckets(&self) -> &BucketMap {
        &self.buckets
    }

    pub fn history(&self) -> &[ReviewEntry] {
        &self.history
    }

    /// Grade the current card and move on. Returns the card's new bucket.
    ///
    /// Queued cards are always in the session's map: only the session moves
    /// them, and each card is queued once.
    pub fn grade(&mut self, difficulty: AnswerDifficulty, at: DateTime<Utc>) -> Result<usize> {
        let (from, card) = self.queue.pop_front().ok_or(Error::SessionFinished)?;
        let to = self.scheduler.next_bucket(from, difficulty);

        self.buckets = self.scheduler.apply_review(&self.buckets, &card, difficulty);
        self.history.push(ReviewEntry::new(&card, difficulty, at));

        tracing::debug!(card = %card.id, %difficulty, from, to, "card graded");
        Ok(to)
    }

    pub fn finish(self) -> SessionOutcome {
        tracing::debug!(
            day = self.day,
            reviews = self.history.len(),
            skipped = self.queue.len(),
            "practice session finished"
        );
        SessionOutcome {
            buckets: self.buckets,
            history: self.history,
        }
    }
}
