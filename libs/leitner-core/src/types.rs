//! Core types for the Leitner scheduler.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use uuid::Uuid;

/// Highest bucket a card can reach. Cards here are retired and never promoted.
pub const RETIRED_BUCKET: usize = 5;

/// Set of flashcards, keyed by card identity.
pub type CardSet = HashSet<Flashcard>;

/// Sparse bucket layout: bucket number to the cards in it.
///
/// This is the durable representation. A card appears in at most one bucket.
pub type BucketMap = BTreeMap<usize, CardSet>;

/// Stable identity of a flashcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(Uuid);

impl CardId {
    /// Generate a fresh random ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for CardId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| Error::InvalidCardId(s.to_string()))
    }
}

/// An immutable flashcard.
///
/// Equality and hashing use only the card's [`CardId`]: two cards with the
/// same text are still different cards unless they share an ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: CardId,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Flashcard {
    /// Create a card with a freshly generated identity.
    pub fn new(
        front: impl Into<String>,
        back: impl Into<String>,
        hint: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self::with_id(CardId::new(), front, back, hint, tags)
    }

    /// Create a card with a known identity (e.g. one restored from storage).
    pub fn with_id(
        id: CardId,
        front: impl Into<String>,
        back: impl Into<String>,
        hint: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id,
            front: front.into(),
            back: back.into(),
            hint: hint.into(),
            tags,
        }
    }
}

impl PartialEq for Flashcard {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Flashcard {}

impl Hash for Flashcard {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// How well the learner answered a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerDifficulty {
    Wrong,
    Hard,
    Easy,
}

impl AnswerDifficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wrong => "wrong",
            Self::Hard => "hard",
            Self::Easy => "easy",
        }
    }

    /// Convert to numeric value (0-2).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Wrong => 0,
            Self::Hard => 1,
            Self::Easy => 2,
        }
    }

    /// Create from numeric value (0-2).
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Wrong),
            1 => Some(Self::Hard),
            2 => Some(Self::Easy),
            _ => None,
        }
    }
}

impl fmt::Display for AnswerDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnswerDifficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wrong" => Ok(Self::Wrong),
            "hard" => Ok(Self::Hard),
            "easy" => Ok(Self::Easy),
            _ => Err(Error::InvalidDifficulty(s.to_string())),
        }
    }
}

/// One past grading event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub card: CardId,
    pub difficulty: AnswerDifficulty,
    pub date: DateTime<Utc>,
}

impl ReviewEntry {
    pub fn new(card: &Flashcard, difficulty: AnswerDifficulty, date: DateTime<Utc>) -> Self {
        Self {
            card: card.id,
            difficulty,
            date,
        }
    }
}

/// History entry as received from an external log, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawReviewEntry {
    pub card: String,
    pub difficulty: String,
    pub date: DateTime<Utc>,
}

impl TryFrom<RawReviewEntry> for ReviewEntry {
    type Error = Error;

    fn try_from(raw: RawReviewEntry) -> Result<Self> {
        Ok(Self {
            card: raw.card.parse()?,
            difficulty: raw.difficulty.parse()?,
            date: raw.date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn cards_with_same_content_are_distinct() {
        let a = Flashcard::new("front", "back", "", vec![]);
        let b = Flashcard::new("front", "back", "", vec![]);
        assert_ne!(a, b);

        let mut set = CardSet::new();
        set.insert(a.clone());
        set.insert(b);
        set.insert(a);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn clone_keeps_identity() {
        let card = Flashcard::new("front", "back", "hint", vec!["tag".into()]);
        assert_eq!(card.clone(), card);
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Easy".parse::<AnswerDifficulty>().unwrap(), AnswerDifficulty::Easy);
        assert_eq!(" hard ".parse::<AnswerDifficulty>().unwrap(), AnswerDifficulty::Hard);
        assert_eq!("WRONG".parse::<AnswerDifficulty>().unwrap(), AnswerDifficulty::Wrong);
    }

    #[test]
    fn difficulty_rejects_unknown_value() {
        let result = "medium".parse::<AnswerDifficulty>();
        assert!(matches!(result, Err(Error::InvalidDifficulty(v)) if v == "medium"));
        assert_eq!(AnswerDifficulty::from_value(3), None);
    }

    #[test]
    fn difficulty_value_round_trip() {
        for d in [AnswerDifficulty::Wrong, AnswerDifficulty::Hard, AnswerDifficulty::Easy] {
            assert_eq!(AnswerDifficulty::from_value(d.to_value()), Some(d));
        }
    }

    #[test]
    fn difficulty_deserialize_rejects_unknown_variant() {
        assert!(serde_json::from_str::<AnswerDifficulty>("\"okay\"").is_err());
        let easy: AnswerDifficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(easy, AnswerDifficulty::Easy);
    }

    #[test]
    fn card_id_wraps_uuid_and_displays_hyphenated() {
        let uuid = Uuid::parse_str("6f1c2a4e-8d0b-4b7e-9a35-2f1d7c9e0b11").unwrap();
        let id = CardId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
        assert_eq!(id.to_string(), "6f1c2a4e-8d0b-4b7e-9a35-2f1d7c9e0b11");
        assert_eq!(id.to_string().parse::<CardId>().unwrap(), id);
    }

    #[test]
    fn card_id_rejects_garbage() {
        let result = "not-a-uuid".parse::<CardId>();
        assert!(matches!(result, Err(Error::InvalidCardId(_))));
    }

    #[test]
    fn raw_entry_converts_when_valid() {
        let id = CardId::new();
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let raw = RawReviewEntry {
            card: id.to_string(),
            difficulty: "hard".to_string(),
            date,
        };
        let entry = ReviewEntry::try_from(raw).unwrap();
        assert_eq!(entry.card, id);
        assert_eq!(entry.difficulty, AnswerDifficulty::Hard);
        assert_eq!(entry.date, date);
    }

    #[test]
    fn raw_entry_rejects_bad_difficulty() {
        let raw = RawReviewEntry {
            card: CardId::new().to_string(),
            difficulty: "perfect".to_string(),
            date: Utc::now(),
        };
        assert!(matches!(
            ReviewEntry::try_from(raw),
            Err(Error::InvalidDifficulty(_))
        ));
    }

    #[test]
    fn flashcard_deserializes_without_optional_fields() {
        let id = CardId::new();
        let json = format!(r#"{{"id":"{}","front":"Q","back":"A"}}"#, id);
        let card: Flashcard = serde_json::from_str(&json).unwrap();
        assert_eq!(card.id, id);
        assert!(card.hint.is_empty());
        assert!(card.tags.is_empty());
    }
}
