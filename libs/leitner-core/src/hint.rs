//! Hint pass-through.

use crate::types::Flashcard;

/// Returned when a card carries no hint.
pub const NO_HINT_AVAILABLE: &str = "No hint available.";

/// The card's hint, or [`NO_HINT_AVAILABLE`] if it has none.
pub fn get_hint(card: &Flashcard) -> &str {
    get_hint_or(card, NO_HINT_AVAILABLE)
}

/// The card's hint, or `fallback` if the hint is empty.
///
/// Any non-empty hint is passed through as stored, whitespace included.
pub fn get_hint_or<'a>(card: &'a Flashcard, fallback: &'a str) -> &'a str {
    if card.hint.is_empty() {
        fallback
    } else {
        &card.hint
    }
}
