// src/deck/render.rs
// Renders the question and answer side of a card through Handlebars templates.

use std::path::Path;

use handlebars::Handlebars;
use serde_json::json;

use crate::catalog::RawCard;
use crate::error::RenderError;

pub const FRONT: &str = "front";
pub const BACK: &str = "back";

/// Holds the loaded front/back template pair. Load it once and pass it to
/// whatever needs to render cards.
pub struct CardRenderer {
    registry: Handlebars<'static>,
}

impl CardRenderer {
    /// Loads `front.html` and `back.html` from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();
        for name in [FRONT, BACK] {
            let path = dir.join(format!("{}.html", name));
            log::debug!("Loading template {:?}", path);
            registry
                .register_template_file(name, &path)
                .map_err(|e| RenderError::Template { name: name.to_string(), source: Box::new(e) })?;
        }
        Ok(CardRenderer { registry })
    }

    /// Builds a renderer from in-memory template sources.
    pub fn from_strings(front: &str, back: &str) -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();
        for (name, source) in [(FRONT, front), (BACK, back)] {
            registry
                .register_template_string(name, source)
                .map_err(|e| RenderError::Template { name: name.to_string(), source: Box::new(e) })?;
        }
        Ok(CardRenderer { registry })
    }

    /// Returns `(front_html, back_html)` with the record bound as `card`.
    pub fn render(&self, card: &RawCard) -> Result<(String, String), RenderError> {
        let data = json!({ "card": card });
        let front = self.render_one(FRONT, &data)?;
        let back = self.render_one(BACK, &data)?;
        Ok((front, back))
    }

    fn render_one(&self, name: &str, data: &serde_json::Value) -> Result<String, RenderError> {
        self.registry
            .render(name, data)
            .map_err(|e| RenderError::Render { name: name.to_string(), source: Box::new(e) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_renders_both_sides_from_record() {
        let renderer = CardRenderer::from_strings(
            "<h1>{{card.name}}</h1>",
            "<p>{{card.type_line}}</p>{{#if card.flavor_text}}<i>{{card.flavor_text}}</i>{{/if}}",
        )
        .unwrap();
        let card = json!({ "name": "Opt", "type_line": "Instant" });
        let (front, back) = renderer.render(&card).unwrap();
        assert_eq!(front, "<h1>Opt</h1>");
        assert_eq!(back, "<p>Instant</p>");
    }

    #[test]
    fn test_record_text_is_escaped() {
        let renderer = CardRenderer::from_strings("{{card.name}}", "").unwrap();
        let (front, _) = renderer.render(&json!({ "name": "<b>Bold</b>" })).unwrap();
        assert_eq!(front, "&lt;b&gt;Bold&lt;/b&gt;");
    }

    #[test]
    fn test_loads_templates_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("front.html"), "F:{{card.name}}").unwrap();
        fs::write(dir.path().join("back.html"), "B:{{card.rarity}}").unwrap();

        let renderer = CardRenderer::from_dir(dir.path()).unwrap();
        let (front, back) = renderer.render(&json!({ "name": "Opt", "rarity": "common" })).unwrap();
        assert_eq!(front, "F:Opt");
        assert_eq!(back, "B:common");
    }

    #[test]
    fn test_missing_template_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("front.html"), "{{card.name}}").unwrap();
        match CardRenderer::from_dir(dir.path()) {
            Err(RenderError::Template { name, .. }) => assert_eq!(name, BACK),
            other => panic!("expected a template error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_malformed_template_is_an_error() {
        assert!(CardRenderer::from_strings("{{#if card.name}}", "").is_err());
    }
}
