// src/catalog/mod.rs
// This module talks to the Scryfall catalog API and models what it returns.

pub mod client;
pub mod sets;

use chrono::NaiveDate;
use serde::Deserialize;

pub use self::client::CatalogClient;
pub use self::sets::eligible_set_codes;

/// One card exactly as the catalog returned it. Templates can reach any field,
/// so we keep the whole JSON object instead of a typed struct.
pub type RawCard = serde_json::Value;

/// One page of `/cards/search` results.
#[derive(Debug, Deserialize)]
pub struct SearchPage {
    pub data: Vec<RawCard>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_page: Option<String>,
}

/// The `/sets` listing.
#[derive(Debug, Deserialize)]
pub struct SetList {
    pub data: Vec<SetSummary>,
}

/// Only the parts of a set we filter on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SetSummary {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub released_at: Option<NaiveDate>,
    #[serde(default)]
    pub set_type: String,
}

/// Scryfall's error object, sent with non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    #[serde(default)]
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page_has_no_cursor() {
        let page: SearchPage = serde_json::from_str(
            r#"{"object":"list","total_cards":1,"has_more":false,"data":[{"name":"Opt"}]}"#,
        )
        .unwrap();
        assert_eq!(page.data.len(), 1);
        assert!(!page.has_more);
        assert!(page.next_page.is_none());
    }

    #[test]
    fn test_set_summary_tolerates_missing_release_date() {
        let list: SetList = serde_json::from_str(
            r#"{"data":[
                {"code":"abc","name":"Alpha","released_at":"2025-02-07","set_type":"expansion"},
                {"code":"zzz","set_type":"token"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(list.data[0].released_at, NaiveDate::from_ymd_opt(2025, 2, 7));
        assert_eq!(list.data[1].released_at, None);
        assert_eq!(list.data[1].name, "");
    }
}
