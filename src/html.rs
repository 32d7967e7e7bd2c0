// src/html.rs
// Plain-text view of rendered card HTML, used for Anki's sort field.

const ENTITIES: &[(&str, &str)] = &[
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#x27;", "'"),
    ("&#39;", "'"),
    ("&#x60;", "`"),
    ("&#x3D;", "="),
    ("&nbsp;", " "),
    // Last, so "&amp;lt;" stays "&lt;".
    ("&amp;", "&"),
];

/// Strips tags, drops `<style>`/`<script>` bodies, decodes the common
/// entities and collapses whitespace.
pub fn html_to_text(html: &str) -> String {
    // Use the lightweight `tl` crate to parse HTML.
    // If parsing fails, fall back to the original string.
    let dom = match tl::parse(html, tl::ParserOptions::default()) {
        Ok(dom) => dom,
        Err(_) => return collapse_whitespace(html),
    };

    let parser = dom.parser();
    let mut out = String::new();
    for handle in dom.children() {
        extract_text(*handle, parser, &mut out);
    }

    collapse_whitespace(&decode_entities(&out))
}

fn extract_text(handle: tl::NodeHandle, parser: &tl::Parser, out: &mut String) {
    let Some(node) = handle.get(parser) else { return };
    match node {
        tl::Node::Tag(tag) => {
            let name = tag.name().as_utf8_str().to_ascii_lowercase();
            if name == "style" || name == "script" {
                return;
            }
            for child in tag.children().top().iter() {
                extract_text(*child, parser, out);
            }
            // Keep words from adjacent blocks apart.
            if matches!(name.as_str(), "br" | "p" | "div" | "li" | "hr" | "h1" | "h2" | "h3") {
                out.push(' ');
            }
        }
        tl::Node::Raw(text) => out.push_str(&text.as_utf8_str()),
        tl::Node::Comment(_) => {}
    }
}

fn decode_entities(text: &str) -> String {
    let mut decoded = text.to_string();
    for (entity, replacement) in ENTITIES {
        if decoded.contains(entity) {
            decoded = decoded.replace(entity, replacement);
        }
    }
    decoded
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags() {
        assert_eq!(html_to_text("<div class=\"name\"><h1>Opt</h1><p>Instant</p></div>"), "Opt Instant");
    }

    #[test]
    fn test_skips_style_blocks() {
        assert_eq!(html_to_text("<style>.card { color: red; }</style><b>Shock</b>"), "Shock");
    }

    #[test]
    fn test_decodes_escaped_text() {
        assert_eq!(html_to_text("<p>Fire &amp; Ice &lt;split&gt;</p>"), "Fire & Ice <split>");
        assert_eq!(html_to_text("&amp;lt;"), "&lt;");
        assert_eq!(html_to_text("Jace&#x27;s &quot;Erasure&quot;"), "Jace's \"Erasure\"");
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(html_to_text("  Lightning\n  Bolt "), "Lightning Bolt");
        assert_eq!(html_to_text(""), "");
    }
}
