//! Markup to plain text extraction for content documents.
//!
//! Content documents are XHTML, so they are read with an XML pull parser
//! configured to tolerate the usual HTML sloppiness (unclosed `<br>`,
//! mismatched end tags, a bare `<` in running text). Text is kept raw:
//! character references are left for the normalizer to decode, which also
//! covers HTML named entities an XML parser would reject.
//!
//! Parsing never fails. If the reader gives up part-way, the error is logged
//! and the text read so far is returned.

use std::borrow::Cow;
use std::sync::LazyLock;

use log::warn;
use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;

use crate::analysis::char_filter::html_entity::decode_entities;
use crate::error::ChapterFreqError;

/// Elements whose content is never visible text.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style"];

/// Elements that start a new line of text. Inline elements (`span`, `em`,
/// `a`, ...) do not, so markup inside a word does not split it.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "dd", "div", "dl", "dt",
    "figcaption", "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li",
    "main", "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Headings considered when a document has no usable `<title>`.
const TITLE_HEADINGS: &[&str] = &["h1", "h2"];

static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*?(?:/>|>.*?</script\s*>)")
        .expect("script pattern should be valid")
});

static STYLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<style\b[^>]*?(?:/>|>.*?</style\s*>)").expect("style pattern should be valid")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern should be valid"));

/// Plain text and title candidates of one content document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlDocument {
    /// Text of the `<title>` element, if any.
    pub title: Option<String>,
    /// Text of the first `<h1>` or `<h2>`, if any.
    pub first_heading: Option<String>,
    /// Visible text with markup removed. Character references are not yet
    /// decoded.
    pub text: String,
}

impl HtmlDocument {
    /// Pick the chapter title: the document title, then the first heading,
    /// then `fallback`. Empty candidates are skipped.
    pub fn chapter_title(&self, fallback: &str) -> String {
        [self.title.as_deref(), self.first_heading.as_deref()]
            .into_iter()
            .flatten()
            .map(clean_title)
            .find(|t| !t.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Decode references and collapse whitespace in a title candidate.
fn clean_title(raw: &str) -> String {
    let decoded = decode_entities(raw);
    WHITESPACE_RUN.replace_all(decoded.trim(), " ").into_owned()
}

fn is_one_of(name: &[u8], names: &[&str]) -> bool {
    names.iter().any(|n| name.eq_ignore_ascii_case(n.as_bytes()))
}

/// Remove `<script>` and `<style>` elements, content included.
pub fn strip_hidden_elements(content: &str) -> String {
    let without_scripts = SCRIPT_BLOCK.replace_all(content, " ");
    STYLE_BLOCK.replace_all(&without_scripts, " ").into_owned()
}

/// Escape every `<` that cannot start a tag, so it is read as text.
///
/// A tag starts with a letter, `/`, `!` or `?` right after the `<`.
pub fn escape_stray_angle_brackets(content: &str) -> Cow<'_, str> {
    let is_stray = |i: usize| {
        !content[i + 1..]
            .starts_with(|c: char| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'))
    };

    let mut stray = content
        .match_indices('<')
        .map(|(i, _)| i)
        .filter(|&i| is_stray(i))
        .peekable();
    if stray.peek().is_none() {
        return Cow::Borrowed(content);
    }

    let mut output = String::with_capacity(content.len() + 16);
    let mut last = 0;
    for i in stray {
        output.push_str(&content[last..i]);
        output.push_str("&lt;");
        last = i + 1;
    }
    output.push_str(&content[last..]);
    Cow::Owned(output)
}

/// Parse a content document.
///
/// `part` names the document in log messages.
pub fn parse_html(part: &str, content: &str) -> HtmlDocument {
    let content = strip_hidden_elements(content.trim_start_matches('\u{feff}'));
    let content = escape_stray_angle_brackets(&content);

    let mut reader = Reader::from_str(&content);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut document = HtmlDocument::default();
    let mut hidden_depth = 0usize;
    let mut head_depth = 0usize;
    let mut title: Option<String> = None;
    let mut heading: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name();
                let name = name.as_ref();
                if is_one_of(name, HIDDEN_ELEMENTS) {
                    hidden_depth += 1;
                } else if name.eq_ignore_ascii_case(b"head") {
                    head_depth += 1;
                } else if name.eq_ignore_ascii_case(b"title") && document.title.is_none() {
                    title = Some(String::new());
                } else if is_one_of(name, TITLE_HEADINGS) && document.first_heading.is_none() {
                    heading = Some(String::new());
                }
                if is_one_of(name, BLOCK_ELEMENTS) {
                    document.text.push('\n');
                }
            }
            Ok(Event::End(e)) => {
                let name = e.local_name();
                let name = name.as_ref();
                if is_one_of(name, HIDDEN_ELEMENTS) {
                    hidden_depth = hidden_depth.saturating_sub(1);
                } else if name.eq_ignore_ascii_case(b"head") {
                    head_depth = head_depth.saturating_sub(1);
                } else if name.eq_ignore_ascii_case(b"title") {
                    if let Some(t) = title.take() {
                        document.title = Some(t);
                    }
                } else if is_one_of(name, TITLE_HEADINGS) {
                    if let Some(h) = heading.take() {
                        document.first_heading = Some(h);
                    }
                }
                if is_one_of(name, BLOCK_ELEMENTS) {
                    document.text.push('\n');
                }
            }
            Ok(Event::Empty(e)) => {
                if is_one_of(e.local_name().as_ref(), BLOCK_ELEMENTS) {
                    document.text.push('\n');
                }
            }
            Ok(Event::Text(e)) => {
                let text = String::from_utf8_lossy(&e);
                append_text(&mut document, &mut title, &mut heading, &text, hidden_depth, head_depth);
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e);
                append_text(&mut document, &mut title, &mut heading, &text, hidden_depth, head_depth);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                let err = ChapterFreqError::markup(
                    part,
                    format!("at position {}: {e}", reader.buffer_position()),
                );
                warn!("{err}; keeping the text read so far");
                break;
            }
            _ => {}
        }
    }

    // An unterminated title or heading still counts.
    if document.title.is_none() {
        document.title = title;
    }
    if document.first_heading.is_none() {
        document.first_heading = heading;
    }

    document
}

fn append_text(
    document: &mut HtmlDocument,
    title: &mut Option<String>,
    heading: &mut Option<String>,
    text: &str,
    hidden_depth: usize,
    head_depth: usize,
) {
    if hidden_depth > 0 {
        return;
    }
    if let Some(t) = title.as_mut() {
        t.push_str(text);
        return;
    }
    if let Some(h) = heading.as_mut() {
        h.push_str(text);
    }
    if head_depth == 0 {
        document.text.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_text() {
        let doc = parse_html(
            "ch1.xhtml",
            "<title>Ch1</title><body><p>o que é isso? O QUE é isso!</p></body>",
        );

        assert_eq!(doc.title.as_deref(), Some("Ch1"));
        assert_eq!(doc.text.trim(), "o que é isso? O QUE é isso!");
        assert!(!doc.text.contains("Ch1"));
    }

    #[test]
    fn test_full_xhtml_document() {
        let content = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
  <title>Capítulo 1</title>
  <link rel="stylesheet" href="style.css" type="text/css"/>
</head>
<body>
  <h1>Um Começo</h1>
  <p>Primeiro<br/>parágrafo</p><p>segundo</p>
</body>
</html>"#;
        let doc = parse_html("ch1.xhtml", content);

        assert_eq!(doc.title.as_deref(), Some("Capítulo 1"));
        assert_eq!(doc.first_heading.as_deref(), Some("Um Começo"));
        let words: Vec<&str> = doc.text.split_whitespace().collect();
        assert_eq!(words, vec!["Um", "Começo", "Primeiro", "parágrafo", "segundo"]);
    }

    #[test]
    fn test_script_and_style_removed() {
        let content = "<html><head><style>p { color: red; }</style></head><body>\
            <script type=\"text/javascript\">if (a < b) { alert('oculto'); }</script>\
            <p>visível</p><script src=\"x.js\"/></body></html>";
        let doc = parse_html("ch.xhtml", content);

        assert_eq!(doc.text.trim(), "visível");
    }

    #[test]
    fn test_inline_markup_does_not_split_words() {
        let doc = parse_html("ch.xhtml", "<p>pala<em>vra</em> <b>outra</b></p>");
        assert_eq!(doc.text.trim(), "palavra outra");
    }

    #[test]
    fn test_block_boundaries_separate_words() {
        let doc = parse_html("ch.xhtml", "<div>fim</div><div>início</div>");
        let words: Vec<&str> = doc.text.split_whitespace().collect();
        assert_eq!(words, vec!["fim", "início"]);
    }

    #[test]
    fn test_entities_are_kept_raw() {
        let doc = parse_html("ch.xhtml", "<p>caf&eacute; &amp; p&atilde;o</p>");
        assert_eq!(doc.text.trim(), "caf&eacute; &amp; p&atilde;o");
    }

    #[test]
    fn test_unclosed_html_elements_tolerated() {
        let doc = parse_html("ch.html", "<p>um<br>dois</p>");
        let words: Vec<&str> = doc.text.split_whitespace().collect();
        assert_eq!(words, vec!["um", "dois"]);
    }

    #[test]
    fn test_chapter_title_fallbacks() {
        let doc = HtmlDocument {
            title: Some("  ".to_string()),
            first_heading: Some("O &amp;\n Fim".to_string()),
            text: String::new(),
        };
        assert_eq!(doc.chapter_title("ch9.xhtml"), "O & Fim");

        let doc = HtmlDocument::default();
        assert_eq!(doc.chapter_title("text/ch9.xhtml"), "text/ch9.xhtml");
    }

    #[test]
    fn test_second_level_heading_used() {
        let doc = parse_html("ch.xhtml", "<body><h2>Parte</h2><h1>Depois</h1></body>");
        assert_eq!(doc.title, None);
        assert_eq!(doc.chapter_title("ch.xhtml"), "Parte");
    }

    #[test]
    fn test_bom_is_ignored() {
        let doc = parse_html("ch.xhtml", "\u{feff}<p>olá</p>");
        assert_eq!(doc.text.trim(), "olá");
    }

    #[test]
    fn test_truncated_tag_keeps_text_so_far() {
        let doc = parse_html("bad.xhtml", "<html><body><p>texto</p><p");
        assert_eq!(doc.text.trim(), "texto");
    }

    #[test]
    fn test_stray_angle_bracket_is_text() {
        let doc = parse_html("p.xhtml", "<p>se a < b então</p>");
        assert_eq!(doc.text.trim(), "se a &lt; b então");

        let doc = parse_html("p.xhtml", "<p>fim <3 amor</p>");
        let words: Vec<&str> = doc.text.split_whitespace().collect();
        assert_eq!(words, vec!["fim", "&lt;3", "amor"]);
    }

    #[test]
    fn test_escape_stray_angle_brackets() {
        assert!(matches!(
            escape_stray_angle_brackets("<p>a</p><!-- c --><?pi?>"),
            Cow::Borrowed(_)
        ));
        assert_eq!(escape_stray_angle_brackets("a < b <= c<"), "a &lt; b &lt;= c&lt;");
        assert_eq!(escape_stray_angle_brackets("<em>1 <2</em>"), "<em>1 &lt;2</em>");
    }
}
