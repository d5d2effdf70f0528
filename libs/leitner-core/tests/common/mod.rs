//! Shared fixtures for leitner-core integration tests.

#![allow(dead_code)]

use leitner_core::{BucketMap, CardSet, Flashcard};

/// Create a card with a throwaway back and hint.
pub fn card(front: &str) -> Flashcard {
    Flashcard::new(front, "back", "hint", vec![])
}

/// Six cards, one per bucket 0..=5, as `(cards, dense sequence)`.
pub fn one_card_per_bucket() -> (Vec<Flashcard>, Vec<CardSet>) {
    let cards: Vec<_> = (0..6).map(|i| card(&format!("cardB{}", i))).collect();
    let sets = cards
        .iter()
        .map(|c| std::iter::once(c.clone()).collect())
        .collect();
    (cards, sets)
}

/// Bucket map holding each card in the given bucket.
pub fn map_of(entries: &[(usize, &Flashcard)]) -> BucketMap {
    let mut map = BucketMap::new();
    for (bucket, card) in entries {
        map.entry(*bucket).or_default().insert((*card).clone());
    }
    map
}

/// Set built from the given cards.
pub fn set_of(cards: &[&Flashcard]) -> CardSet {
    cards.iter().map(|c| (*c).clone()).collect()
}

