//! Modified-Leitner flashcard scheduler.
//!
//! Provides:
//! - Conversion between sparse bucket maps and dense bucket sequences
//! - Due-card selection on an exponential cadence (bucket `i` every `2^i` days)
//! - Bucket transitions after a graded review
//! - Progress statistics and occupied bucket range
//! - Markdown deck files, hints, study-day counting and practice sessions
//!
//! Every operation is a pure function over in-memory values: inputs are never
//! mutated, and updated bucket maps are returned as new values.

pub mod buckets;
pub mod calendar;
pub mod deck;
pub mod error;
pub mod hint;
pub mod progress;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod types;

pub use buckets::{get_bucket_range, occupied_buckets, to_bucket_sets, validate, BucketRange};
pub use calendar::{study_date, study_day, study_day_today};
pub use error::{Error, Result};
pub use hint::{get_hint, get_hint_or, NO_HINT_AVAILABLE};
pub use progress::{compute_progress, ProgressStats};
pub use scheduler::{
    find_bucket, is_due, next_bucket, practice, update, BucketScheduler, ModifiedLeitner,
};
pub use session::{PracticeSession, SessionOutcome};
pub use settings::StudySettings;
pub use types::{
    AnswerDifficulty, BucketMap, CardId, CardSet, Flashcard, RawReviewEntry, ReviewEntry,
    RETIRED_BUCKET,
};
