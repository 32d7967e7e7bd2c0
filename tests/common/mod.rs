// tests/common/mod.rs
// A tiny_http stand-in for the catalog API.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use cardforge::Config;
use serde_json::{json, Value};
use tiny_http::{Header, Response, Server};

/// Maps `(base_url, request_url)` to `(status, body)`.
pub type Handler = dyn Fn(&str, &str) -> (u16, String) + Send + Sync;

pub struct StubCatalog {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    server: Arc<Server>,
}

impl StubCatalog {
    pub fn start(handler: impl Fn(&str, &str) -> (u16, String) + Send + Sync + 'static) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind stub server"));
        let addr = server.server_addr().to_ip().expect("stub listens on TCP");
        let base_url = format!("http://{}", addr);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let handler: Box<Handler> = Box::new(handler);
        let (srv, log, base) = (server.clone(), requests.clone(), base_url.clone());
        thread::spawn(move || {
            for request in srv.incoming_requests() {
                let url = request.url().to_string();
                log.lock().unwrap().push(url.clone());
                let (status, body) = handler(&base, &url);
                let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
                let response = Response::from_string(body).with_status_code(status).with_header(header);
                let _ = request.respond(response);
            }
        });

        StubCatalog { base_url, requests, server }
    }

    /// Request paths (with query) in the order they arrived.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn config(&self, templates: &Path) -> Config {
        let mut config = Config::new();
        config.api_base = self.base_url.clone();
        config.request_delay = Duration::ZERO;
        config.timeout = Duration::from_secs(5);
        config.templates_dir = templates.to_path_buf();
        config
    }
}

impl Drop for StubCatalog {
    fn drop(&mut self) {
        self.server.unblock();
    }
}

/// The set code a `/cards/search?q=s:CODE -type:basic` request asks for.
pub fn searched_set(url: &str) -> Option<String> {
    let query = url.strip_prefix("/cards/search?q=")?;
    let rest = query.strip_prefix("s%3A")?;
    Some(rest.split('+').next().unwrap_or_default().to_string())
}

pub fn page(cards: &[Value], next_page: Option<String>) -> String {
    let mut body = json!({
        "object": "list",
        "total_cards": cards.len(),
        "has_more": next_page.is_some(),
        "data": cards,
    });
    if let Some(next) = next_page {
        body["next_page"] = Value::String(next);
    }
    body.to_string()
}

pub fn not_found(details: &str) -> (u16, String) {
    (404, json!({ "object": "error", "code": "not_found", "status": 404, "details": details }).to_string())
}

pub fn card(name: &str, type_line: &str, rarity: &str) -> Value {
    json!({
        "object": "card",
        "name": name,
        "type_line": type_line,
        "keywords": [],
        "color_identity": ["R"],
        "rarity": rarity,
    })
}

/// Writes a minimal template directory, including a stylesheet.
pub fn write_templates(dir: &Path) {
    fs::write(dir.join("front.html"), "<h1>{{card.name}}</h1>").unwrap();
    fs::write(dir.join("back.html"), "<p>{{card.type_line}}</p>").unwrap();
    fs::write(dir.join("styles.css"), ".card { color: red; }").unwrap();
}
