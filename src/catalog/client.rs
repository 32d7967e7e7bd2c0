// src/catalog/client.rs
// Blocking HTTP client for the catalog search and set listing endpoints.

use std::cell::Cell;
use std::thread;
use std::time::{Duration, Instant};

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;

use super::{ApiError, RawCard, SearchPage, SetList, SetSummary};
use crate::config::Config;
use crate::error::FetchError;

pub struct CatalogClient {
    http: Client,
    api_base: String,
    request_delay: Duration,
    last_request: Cell<Option<Instant>>,
}

impl CatalogClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|source| FetchError::Http {
                url: config.api_base.clone(),
                source,
            })?;

        Ok(CatalogClient {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            request_delay: config.request_delay,
            last_request: Cell::new(None),
        })
    }

    /// Fetches every non-basic card in `set_code`, following `next_page`
    /// cursors until the last page. Pages are concatenated in API order.
    pub fn fetch_cards(&self, set_code: &str) -> Result<Vec<RawCard>, FetchError> {
        let mut cards = Vec::new();

        let url = format!("{}/cards/search", self.api_base);
        let query = format!("s:{} -type:basic", set_code);
        let request = self.http.get(&url).query(&[("q", query.as_str())]);
        let mut page: SearchPage = self.get_json(request, &url)?;
        let mut page_url = url;
        let mut pages = 1;

        loop {
            log::debug!("Page {} of set {}: {} cards", pages, set_code, page.data.len());
            cards.extend(page.data);

            // The cursor already carries the query, so it is followed verbatim.
            let next = match (page.next_page, page.has_more) {
                (Some(next), _) => next,
                (None, false) => break,
                (None, true) => return Err(FetchError::MissingCursor { url: page_url }),
            };
            page = self.get_json(self.http.get(&next), &next)?;
            page_url = next;
            pages += 1;
        }

        log::info!("Fetched {} cards for set {} in {} page(s)", cards.len(), set_code, pages);
        Ok(cards)
    }

    /// The full list of sets known to the catalog.
    pub fn fetch_sets(&self) -> Result<Vec<SetSummary>, FetchError> {
        let url = format!("{}/sets", self.api_base);
        let list: SetList = self.get_json(self.http.get(&url), &url)?;
        log::info!("Catalog lists {} sets", list.data.len());
        Ok(list.data)
    }

    fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder, url: &str) -> Result<T, FetchError> {
        self.throttle();

        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|source| FetchError::Http { url: url.to_string(), source })?;

        let status = response.status();
        if !status.is_success() {
            let details = response
                .json::<ApiError>()
                .ok()
                .map(|e| e.details)
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                details,
            });
        }

        response
            .json::<T>()
            .map_err(|source| FetchError::Decode { url: url.to_string(), source })
    }

    /// Keeps consecutive requests at least `request_delay` apart.
    fn throttle(&self) {
        if let Some(last) = self.last_request.get() {
            let elapsed = last.elapsed();
            if elapsed < self.request_delay {
                thread::sleep(self.request_delay - elapsed);
            }
        }
        self.last_request.set(Some(Instant::now()));
    }
}
