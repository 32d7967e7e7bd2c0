// src/package/schema.rs
// The Anki (schema 11) collection layout and the JSON blobs stored in `col`.

use serde_json::{json, Value};
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::deck::Deck;

pub const COLLECTION_FILE: &str = "collection.anki2";
pub const MEDIA_FILE: &str = "media";
pub const FIELD_SEPARATOR: &str = "\x1f";

pub const MODEL_ID: i64 = 1607392319;
pub const MODEL_NAME: &str = "Card Model";
pub const FIELD_NAMES: [&str; 2] = ["Front", "Back"];
pub const CARD_TEMPLATE_NAME: &str = "Card 1";
pub const QUESTION_FORMAT: &str = "{{Front}}";
pub const ANSWER_FORMAT: &str = "{{FrontSide}}<hr id=answer>{{Back}}";

const DEFAULT_DECK_ID: i64 = 1;
const DEFAULT_CSS: &str = ".card {\n font-family: arial;\n font-size: 20px;\n text-align: center;\n color: black;\n background-color: white;\n}\n";

pub const SCHEMA: &str = "
CREATE TABLE col (
    id              integer primary key,
    crt             integer not null,
    mod             integer not null,
    scm             integer not null,
    ver             integer not null,
    dty             integer not null,
    usn             integer not null,
    ls              integer not null,
    conf            text not null,
    models          text not null,
    decks           text not null,
    dconf           text not null,
    tags            text not null
);
CREATE TABLE notes (
    id              integer primary key,
    guid            text not null,
    mid             integer not null,
    mod             integer not null,
    usn             integer not null,
    tags            text not null,
    flds            text not null,
    sfld            integer not null,
    csum            integer not null,
    flags           integer not null,
    data            text not null
);
CREATE TABLE cards (
    id              integer primary key,
    nid             integer not null,
    did             integer not null,
    ord             integer not null,
    mod             integer not null,
    usn             integer not null,
    type            integer not null,
    queue           integer not null,
    due             integer not null,
    ivl             integer not null,
    factor          integer not null,
    reps            integer not null,
    lapses          integer not null,
    left            integer not null,
    odue            integer not null,
    odid            integer not null,
    flags           integer not null,
    data            text not null
);
CREATE TABLE revlog (
    id              integer primary key,
    cid             integer not null,
    usn             integer not null,
    ease            integer not null,
    ivl             integer not null,
    lastIvl         integer not null,
    factor          integer not null,
    time            integer not null,
    type            integer not null
);
CREATE TABLE graves (
    usn             integer not null,
    oid             integer not null,
    type            integer not null
);
CREATE INDEX ix_notes_usn on notes (usn);
CREATE INDEX ix_cards_usn on cards (usn);
CREATE INDEX ix_revlog_usn on revlog (usn);
CREATE INDEX ix_cards_nid on cards (nid);
CREATE INDEX ix_cards_sched on cards (did, queue, due);
CREATE INDEX ix_revlog_cid on revlog (cid);
CREATE INDEX ix_notes_csum on notes (csum);
";

// Alphabet Anki uses for note GUIDs.
const BASE91: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!#$%&()*+,-./:;<=>?@[]^_`{|}~";

/// Deterministic note GUID derived from the field values, so a regenerated
/// package updates existing notes instead of duplicating them.
pub fn note_guid(fields: &[&str]) -> String {
    let digest = Sha256::digest(fields.join("__").as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let mut value = u64::from_be_bytes(prefix);

    let mut encoded = Vec::new();
    loop {
        encoded.push(BASE91[(value % 91) as usize]);
        value /= 91;
        if value == 0 {
            break;
        }
    }
    encoded.iter().rev().map(|&b| b as char).collect()
}

/// Anki's `csum`: the first 8 hex digits of the sort field's SHA-1, as an
/// integer (the same value as its first four bytes read big-endian).
pub fn field_checksum(sort_field: &str) -> i64 {
    let digest = Sha1::digest(sort_field.as_bytes());
    let mut prefix = [0u8; 4];
    prefix.copy_from_slice(&digest[..4]);
    u32::from_be_bytes(prefix) as i64
}

/// Anki's space-delimited tag column, e.g. `" Creature Elf "`.
pub fn tag_column(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    format!(" {} ", tags.join(" "))
}

/// `next_pos` is the due position the next new card would get.
pub fn collection_conf(deck_id: i64, next_pos: i64) -> Value {
    json!({
        "activeDecks": [deck_id],
        "curDeck": deck_id,
        "newSpread": 0,
        "collapseTime": 1200,
        "timeLim": 0,
        "estTimes": true,
        "dueCounts": true,
        "curModel": MODEL_ID.to_string(),
        "nextPos": next_pos,
        "sortType": "noteFld",
        "sortBackwards": false,
        "addToCur": true
    })
}

pub fn models_json(deck_id: i64, modified: i64) -> Value {
    let fields: Vec<Value> = FIELD_NAMES
        .iter()
        .enumerate()
        .map(|(ord, name)| {
            json!({
                "name": name,
                "ord": ord,
                "sticky": false,
                "rtl": false,
                "font": "Arial",
                "size": 20,
                "media": []
            })
        })
        .collect();

    json!({
        (MODEL_ID.to_string()): {
            "id": MODEL_ID,
            "name": MODEL_NAME,
            "type": 0,
            "mod": modified,
            "usn": -1,
            "sortf": 0,
            "did": deck_id,
            "tmpls": [{
                "name": CARD_TEMPLATE_NAME,
                "ord": 0,
                "qfmt": QUESTION_FORMAT,
                "afmt": ANSWER_FORMAT,
                "did": null,
                "bqfmt": "",
                "bafmt": ""
            }],
            "flds": fields,
            "css": DEFAULT_CSS,
            "latexPre": "\\documentclass[12pt]{article}\n\\special{papersize=3in,5in}\n\\usepackage{amssymb,amsmath}\n\\pagestyle{empty}\n\\setlength{\\parindent}{0in}\n\\begin{document}\n",
            "latexPost": "\\end{document}",
            "tags": [],
            "vers": [],
            "req": [[0, "any", [0]]]
        }
    })
}

fn deck_json(id: i64, name: &str, modified: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "desc": "",
        "mod": modified,
        "usn": -1,
        "collapsed": false,
        "browserCollapsed": false,
        "newToday": [0, 0],
        "revToday": [0, 0],
        "lrnToday": [0, 0],
        "timeToday": [0, 0],
        "dyn": 0,
        "conf": 1,
        "extendNew": 10,
        "extendRev": 50
    })
}

/// Anki always expects the "Default" deck next to ours.
pub fn decks_json(deck: &Deck, modified: i64) -> Value {
    json!({
        (DEFAULT_DECK_ID.to_string()): deck_json(DEFAULT_DECK_ID, "Default", modified),
        (deck.id.to_string()): deck_json(deck.id, &deck.name, modified)
    })
}

pub fn deck_conf_json() -> Value {
    json!({
        "1": {
            "id": 1,
            "name": "Default",
            "replayq": true,
            "timer": 0,
            "maxTaken": 60,
            "usn": 0,
            "mod": 0,
            "autoplay": true,
            "lapse": {
                "delays": [10],
                "mult": 0,
                "minInt": 1,
                "leechFails": 8,
                "leechAction": 0
            },
            "rev": {
                "perDay": 100,
                "ease4": 1.3,
                "fuzz": 0.05,
                "minSpace": 1,
                "ivlFct": 1,
                "maxIvl": 36500,
                "bury": true
            },
            "new": {
                "delays": [1, 10],
                "ints": [1, 4, 7],
                "initialFactor": 2500,
                "separate": true,
                "order": 1,
                "perDay": 20,
                "bury": true
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guid_depends_only_on_fields() {
        let a = note_guid(&["<h1>Opt</h1>", "Instant"]);
        assert_eq!(a, note_guid(&["<h1>Opt</h1>", "Instant"]));
        assert_ne!(a, note_guid(&["<h1>Opt</h1>", "Sorcery"]));
        assert!(!a.is_empty());
        assert!(a.bytes().all(|b| BASE91.contains(&b)));
    }

    #[test]
    fn test_tag_column_is_space_padded() {
        assert_eq!(tag_column(&["Creature".into(), "Elf".into()]), " Creature Elf ");
        assert_eq!(tag_column(&[]), "");
    }

    #[test]
    fn test_checksum_matches_anki() {
        // int(sha1("Opt").hexdigest()[:8], 16)
        assert_eq!(field_checksum("Opt"), 1897208009);
    }

    #[test]
    fn test_next_position_follows_new_cards() {
        assert_eq!(collection_conf(42, 3)["nextPos"], 3);
        assert_eq!(collection_conf(42, 3)["curDeck"], 42);
    }

    #[test]
    fn test_checksum_fits_in_u32() {
        let sum = field_checksum("Opt");
        assert!((0..=u32::MAX as i64).contains(&sum));
        assert_eq!(sum, field_checksum("Opt"));
    }

    #[test]
    fn test_models_describe_front_back_card() {
        let models = models_json(42, 0);
        let model = &models[MODEL_ID.to_string()];
        assert_eq!(model["name"], MODEL_NAME);
        assert_eq!(model["flds"][0]["name"], "Front");
        assert_eq!(model["flds"][1]["name"], "Back");
        assert_eq!(model["tmpls"][0]["qfmt"], QUESTION_FORMAT);
        assert_eq!(model["did"], 42);
    }
}
