// src/deck/mod.rs
// This module turns raw catalog cards into a deck of flash-card notes.

pub mod builder;
pub mod render;
pub mod tags;

pub use self::builder::{build_deck, deck_id_for};
pub use self::render::CardRenderer;
pub use self::tags::derive_tags;

/// One flash card: the rendered question and answer plus its tags.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteEntry {
    pub front: String,
    pub back: String,
    // Insertion ordered, never repeats a tag.
    pub tags: Vec<String>,
}

impl NoteEntry {
    pub fn fields(&self) -> [&str; 2] {
        [&self.front, &self.back]
    }
}

/// A named deck, ready to be packaged.
#[derive(Debug, Clone)]
pub struct Deck {
    /// Stable across runs so that re-imports update the same deck.
    pub id: i64,
    pub name: String,
    pub entries: Vec<NoteEntry>,
}

impl Deck {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The package file name for this deck, e.g. `ABC.apkg`.
    pub fn file_name(&self) -> String {
        format!("{}.apkg", self.name)
    }
}
