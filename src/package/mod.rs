// src/package/mod.rs
// This module writes decks to (and reads them back from) Anki .apkg files.

pub mod reader;
pub mod schema;
pub mod writer;

pub use self::reader::{read_package, PackageSummary, PackagedNote};
pub use self::writer::write_package;
