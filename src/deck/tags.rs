// src/deck/tags.rs
// Derives Anki tags from a card's type line, keywords, colors and rarity.

use serde_json::Value;

use crate::catalog::RawCard;

const TYPE_SEPARATOR: char = '\u{2014}'; // em dash

/// Tags for one card, in the order they are derived. Missing or oddly typed
/// fields simply contribute nothing.
pub fn derive_tags(card: &RawCard) -> Vec<String> {
    let mut tags = Vec::new();

    // --- Supertypes/types and subtypes ---
    let type_line = str_field(card, "type_line");
    for segment in type_line.split(TYPE_SEPARATOR).take(2) {
        for word in segment.split_whitespace() {
            // Double-faced cards join their faces with "//".
            if word.chars().any(char::is_alphanumeric) {
                push_unique(&mut tags, title_case(word));
            }
        }
    }

    for keyword in str_list(card, "keywords") {
        push_unique(&mut tags, title_case(&keyword.replace(' ', "_")));
    }

    for color in str_list(card, "color_identity") {
        push_unique(&mut tags, title_case(color));
    }

    let rarity = str_field(card, "rarity");
    if !rarity.is_empty() {
        push_unique(&mut tags, title_case(rarity));
    }

    tags
}

/// Upper-cases a letter that follows a non-letter, lower-cases every other
/// letter. `"first_strike"` becomes `"First_Strike"`.
pub fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut after_letter = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if after_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(c);
            after_letter = false;
        }
    }
    out
}

fn push_unique(tags: &mut Vec<String>, tag: String) {
    if !tag.is_empty() && !tags.contains(&tag) {
        tags.push(tag);
    }
}

fn str_field<'a>(card: &'a RawCard, key: &str) -> &'a str {
    card.get(key).and_then(Value::as_str).unwrap_or("")
}

fn str_list<'a>(card: &'a RawCard, key: &str) -> impl Iterator<Item = &'a str> {
    card.get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_line_words_become_tags() {
        let card = json!({ "type_line": "Legendary Creature — Human Wizard" });
        assert_eq!(derive_tags(&card), vec!["Legendary", "Creature", "Human", "Wizard"]);
    }

    #[test]
    fn test_keyword_spaces_become_underscores() {
        let card = json!({ "keywords": ["First Strike", "flying"] });
        assert_eq!(derive_tags(&card), vec!["First_Strike", "Flying"]);
    }

    #[test]
    fn test_color_codes_stay_single_letters() {
        let card = json!({ "color_identity": ["U", "B"] });
        assert_eq!(derive_tags(&card), vec!["U", "B"]);
    }

    #[test]
    fn test_full_card_order_and_rarity() {
        let card = json!({
            "type_line": "Artifact Creature — Golem",
            "keywords": ["Trample"],
            "color_identity": ["G"],
            "rarity": "mythic"
        });
        assert_eq!(
            derive_tags(&card),
            vec!["Artifact", "Creature", "Golem", "Trample", "G", "Mythic"]
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        let card = json!({
            "type_line": "Creature — Elf Elf",
            "keywords": ["Elf"]
        });
        assert_eq!(derive_tags(&card), vec!["Creature", "Elf"]);
    }

    #[test]
    fn test_missing_and_mistyped_fields_are_empty() {
        assert!(derive_tags(&json!({})).is_empty());
        assert!(derive_tags(&json!({ "keywords": "Flying", "rarity": 3 })).is_empty());
        assert!(derive_tags(&json!({ "rarity": "" })).is_empty());
    }

    #[test]
    fn test_double_faced_type_line() {
        let card = json!({ "type_line": "Creature — Human Werewolf // Creature — Werewolf" });
        assert_eq!(derive_tags(&card), vec!["Creature", "Human", "Werewolf"]);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let card = json!({ "type_line": "Instant", "keywords": ["Kicker"], "rarity": "common" });
        assert_eq!(derive_tags(&card), derive_tags(&card));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("first_strike"), "First_Strike");
        assert_eq!(title_case("uNCOMMON"), "Uncommon");
        assert_eq!(title_case("u"), "U");
        assert_eq!(title_case("2nd"), "2Nd");
    }
}
