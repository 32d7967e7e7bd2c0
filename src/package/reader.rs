// src/package/reader.rs
// Reads an .apkg back into a summary of its decks, notes and media.

use std::collections::HashMap;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use serde_json::Value;

use super::schema::{FIELD_SEPARATOR, MEDIA_FILE};
use crate::error::WriteError;

/// A note as stored in a package.
#[derive(Debug, Clone, PartialEq)]
pub struct PackagedNote {
    pub fields: Vec<String>,
    pub tags: Vec<String>,
}

/// What a package contains.
#[derive(Debug, Clone)]
pub struct PackageSummary {
    /// Deck names other than Anki's built-in "Default".
    pub deck_names: Vec<String>,
    pub notes: Vec<PackagedNote>,
    pub card_count: usize,
    /// The collection's `nextPos`, the due position for the next new card.
    pub next_position: i64,
    pub media: Vec<String>,
}

pub fn read_package(path: &Path) -> Result<PackageSummary, WriteError> {
    log::debug!("Reading package {:?}", path);

    let file = fs::File::open(path).map_err(|e| WriteError::io(path, e))?;
    let mut archive = zip::ZipArchive::new(file)?;

    let db_filename = if archive.file_names().any(|name| name == "collection.anki21") {
        "collection.anki21"
    } else {
        "collection.anki2"
    };

    let mut db_data = Vec::new();
    archive
        .by_name(db_filename)?
        .read_to_end(&mut db_data)
        .map_err(|e| WriteError::io(path, e))?;

    let media = match archive.by_name(MEDIA_FILE) {
        Ok(mut entry) => {
            let mut raw = String::new();
            entry.read_to_string(&mut raw).map_err(|e| WriteError::io(path, e))?;
            let index: HashMap<String, String> = serde_json::from_str(&raw)?;
            let mut names: Vec<String> = index.into_values().collect();
            names.sort();
            names
        }
        Err(zip::result::ZipError::FileNotFound) => Vec::new(),
        Err(e) => return Err(e.into()),
    };

    // SQLite wants a real file, so the collection is unpacked to a temp file.
    let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| WriteError::io(path, e))?;
    temp_file.write_all(&db_data).map_err(|e| WriteError::io(path, e))?;
    let temp_path = temp_file.into_temp_path();

    let conn = rusqlite::Connection::open(&temp_path)?;

    // --- Deck names ---
    let (conf_json, decks_json): (String, String) =
        conn.query_row("SELECT conf, decks FROM col", [], |row| Ok((row.get(0)?, row.get(1)?)))?;
    let conf: Value = serde_json::from_str(&conf_json)?;
    let next_position = conf.get("nextPos").and_then(Value::as_i64).unwrap_or(1);
    let decks: HashMap<String, Value> = serde_json::from_str(&decks_json)?;
    let mut deck_names: Vec<String> = decks
        .values()
        .filter_map(|d| d.get("name").and_then(Value::as_str))
        .filter(|name| *name != "Default")
        .map(String::from)
        .collect();
    deck_names.sort();

    // --- Notes ---
    let mut stmt = conn.prepare("SELECT flds, tags FROM notes ORDER BY id")?;
    let notes = stmt
        .query_map([], |row| {
            let fields_str: String = row.get(0)?;
            let tags_str: String = row.get(1)?;
            Ok(PackagedNote {
                fields: fields_str.split(FIELD_SEPARATOR).map(String::from).collect(),
                tags: tags_str.split_whitespace().map(String::from).collect(),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let card_count: i64 = conn.query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;

    Ok(PackageSummary {
        deck_names,
        notes,
        card_count: card_count as usize,
        next_position,
        media,
    })
}
