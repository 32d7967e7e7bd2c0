// src/deck/builder.rs

use sha2::{Digest, Sha256};

use super::{derive_tags, CardRenderer, Deck, NoteEntry};
use crate::catalog::RawCard;
use crate::error::RenderError;

const DECK_ID_RANGE: u64 = 10_000_000_000;

/// Deck id for a set code. A SHA-256 of the lower-cased code folded into
/// `[0, 10^10)`, so the same set always maps to the same Anki deck.
pub fn deck_id_for(set_code: &str) -> i64 {
    let digest = Sha256::digest(set_code.to_lowercase().as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(prefix) % DECK_ID_RANGE) as i64
}

/// Renders and tags every card, in input order. The first render failure
/// aborts the whole deck.
pub fn build_deck(set_code: &str, cards: &[RawCard], renderer: &CardRenderer) -> Result<Deck, RenderError> {
    let mut entries = Vec::with_capacity(cards.len());
    for card in cards {
        let (front, back) = renderer.render(card)?;
        entries.push(NoteEntry {
            front,
            back,
            tags: derive_tags(card),
        });
    }

    Ok(Deck {
        id: deck_id_for(set_code),
        name: set_code.to_uppercase(),
        entries,
    })
}
