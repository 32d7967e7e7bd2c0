// src/package/writer.rs
// Serializes a deck into an Anki .apkg package: a zip holding the SQLite
// collection, a media index and the media files themselves.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::schema::{self, COLLECTION_FILE, FIELD_SEPARATOR, MEDIA_FILE, MODEL_ID};
use crate::deck::Deck;
use crate::error::WriteError;
use crate::html::html_to_text;

/// Writes `<deck name>.apkg` into `output_dir` (created if needed) and returns
/// its path. An existing `stylesheet` is embedded as a media file.
pub fn write_package(deck: &Deck, output_dir: &Path, stylesheet: Option<&Path>) -> Result<PathBuf, WriteError> {
    fs::create_dir_all(output_dir).map_err(|e| WriteError::io(output_dir, e))?;

    // --- Build the collection database in a scratch file ---
    let scratch = tempfile::NamedTempFile::new().map_err(|e| WriteError::io(std::env::temp_dir(), e))?;
    let scratch_path = scratch.into_temp_path();
    {
        let mut conn = Connection::open(&scratch_path)?;
        write_collection(&mut conn, deck, chrono::Utc::now().timestamp_millis())?;
        conn.close().map_err(|(_, e)| e)?;
    }
    let collection = fs::read(&scratch_path).map_err(|e| WriteError::io(scratch_path.to_path_buf(), e))?;

    // --- Gather media ---
    let mut media = Vec::new();
    if let Some(path) = stylesheet.filter(|p| p.is_file()) {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| WriteError::Invalid(format!("media path {:?} has no file name", path)))?;
        let bytes = fs::read(path).map_err(|e| WriteError::io(path, e))?;
        log::debug!("Embedding media file {}", name);
        media.push((name.to_string(), bytes));
    }

    // --- Zip it up next to the target, then move into place ---
    let target = output_dir.join(deck.file_name());
    let mut staged = tempfile::NamedTempFile::new_in(output_dir).map_err(|e| WriteError::io(output_dir, e))?;
    write_archive(staged.as_file_mut(), &collection, &media)?;
    staged
        .persist(&target)
        .map_err(|e| WriteError::io(target.clone(), e.error))?;

    log::info!("Wrote {} notes to {:?}", deck.len(), target);
    Ok(target)
}

fn write_collection(conn: &mut Connection, deck: &Deck, now_ms: i64) -> Result<(), WriteError> {
    let now_s = now_ms / 1000;
    let tx = conn.transaction()?;
    tx.execute_batch(schema::SCHEMA)?;

    tx.execute(
        "INSERT INTO col VALUES (1, ?1, ?2, ?3, 11, 0, 0, 0, ?4, ?5, ?6, ?7, '{}')",
        params![
            now_s,
            now_ms,
            now_ms,
            serde_json::to_string(&schema::collection_conf(deck.id, deck.len() as i64 + 1))?,
            serde_json::to_string(&schema::models_json(deck.id, now_s))?,
            serde_json::to_string(&schema::decks_json(deck, now_s))?,
            serde_json::to_string(&schema::deck_conf_json())?,
        ],
    )?;

    {
        let mut note_stmt = tx.prepare(
            "INSERT INTO notes (id, guid, mid, mod, usn, tags, flds, sfld, csum, flags, data)
             VALUES (?1, ?2, ?3, ?4, -1, ?5, ?6, ?7, ?8, 0, '')",
        )?;
        let mut card_stmt = tx.prepare(
            "INSERT INTO cards (id, nid, did, ord, mod, usn, type, queue, due, ivl, factor, reps, lapses, left, odue, odid, flags, data)
             VALUES (?1, ?2, ?3, 0, ?4, -1, 0, 0, ?5, 0, 0, 0, 0, 0, 0, 0, 0, '')",
        )?;

        // Ids are millisecond timestamps, bumped per row to stay unique.
        let count = deck.len() as i64;
        for (i, entry) in deck.entries.iter().enumerate() {
            let i = i as i64;
            let note_id = now_ms + i;
            let card_id = now_ms + count + i;
            let fields = entry.fields();
            let sort_field = html_to_text(&entry.front);

            note_stmt.execute(params![
                note_id,
                schema::note_guid(&fields),
                MODEL_ID,
                now_s,
                schema::tag_column(&entry.tags),
                fields.join(FIELD_SEPARATOR),
                sort_field,
                schema::field_checksum(&sort_field),
            ])?;
            card_stmt.execute(params![card_id, note_id, deck.id, now_s, i + 1])?;
        }
    }

    tx.commit()?;
    Ok(())
}

fn write_archive(file: &mut fs::File, collection: &[u8], media: &[(String, Vec<u8>)]) -> Result<(), WriteError> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(file);

    zip.start_file(COLLECTION_FILE, options)?;
    zip.write_all(collection).map_err(|e| WriteError::io(COLLECTION_FILE, e))?;

    // Media entries are numbered; the `media` index maps numbers to names.
    let mut index = BTreeMap::new();
    for (i, (name, bytes)) in media.iter().enumerate() {
        let entry = i.to_string();
        zip.start_file(entry.as_str(), options)?;
        zip.write_all(bytes).map_err(|e| WriteError::io(name, e))?;
        index.insert(entry, name.clone());
    }

    zip.start_file(MEDIA_FILE, options)?;
    zip.write_all(serde_json::to_string(&index)?.as_bytes())
        .map_err(|e| WriteError::io(MEDIA_FILE, e))?;

    zip.finish()?;
    Ok(())
}
