//! HTML character reference decoding.
//!
//! Decodes named HTML5 entities (`&amp;`, `&eacute;`, `&nbsp;`, ...) and
//! numeric references (`&#233;`, `&#xE9;`). As in HTML parsers, numeric
//! references and the legacy named entities (`&amp`, `&eacute`, `&nbsp`, ...)
//! are also recognized without the closing `;`. Anything that does not form a
//! known reference is copied through unchanged, so the filter is total over
//! all strings.

use std::borrow::Cow;

use quick_xml::escape::resolve_html5_entity;

use super::CharFilter;

/// Longest entity name we try to resolve. The longest HTML5 entity name
/// (`CounterClockwiseContourIntegral`) is 31 characters.
const MAX_ENTITY_LEN: usize = 32;

/// Named entities that HTML also accepts without a terminating `;`.
const LEGACY_ENTITIES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren", "deg",
    "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34", "gt",
    "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
    "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm", "oslash",
    "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy", "sup1",
    "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml",
    "yacute", "yen", "yuml",
];

/// Length of the longest name in [`LEGACY_ENTITIES`].
const LEGACY_MAX_LEN: usize = 6;

/// A char filter that decodes HTML/XML character references.
#[derive(Clone, Debug, Default)]
pub struct HtmlEntityCharFilter;

impl HtmlEntityCharFilter {
    /// Create a new entity decoding filter.
    pub fn new() -> Self {
        HtmlEntityCharFilter
    }
}

impl CharFilter for HtmlEntityCharFilter {
    fn filter(&self, input: &str) -> String {
        decode_entities(input).into_owned()
    }

    fn name(&self) -> &'static str {
        "html_entity"
    }
}

/// Decode all character references in `input`.
///
/// Borrows the input when it contains no `&`.
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        output.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        match resolve_reference(after) {
            Some((decoded, consumed)) => {
                output.push_str(&decoded);
                rest = &after[consumed..];
            }
            None => {
                output.push('&');
                rest = after;
            }
        }
    }

    output.push_str(rest);
    Cow::Owned(output)
}

/// Try to resolve the reference that starts right after an `&`.
///
/// Returns the replacement text and the number of bytes consumed, including
/// the terminating `;` when there is one.
fn resolve_reference(after: &str) -> Option<(Cow<'static, str>, usize)> {
    if let Some(number) = after.strip_prefix('#') {
        let (c, consumed) = resolve_numeric(number)?;
        return Some((Cow::Owned(c.to_string()), consumed + 1));
    }

    let name_len = after
        .bytes()
        .take(MAX_ENTITY_LEN + 1)
        .take_while(u8::is_ascii_alphanumeric)
        .count();
    if name_len == 0 {
        return None;
    }
    let name = &after[..name_len];

    if after[name_len..].starts_with(';') {
        if let Some(decoded) = resolve_html5_entity(name) {
            return Some((Cow::Borrowed(decoded), name_len + 1));
        }
    }

    // Without a `;`, or when the full name is unknown, the longest legacy
    // entity prefixing the name is decoded.
    (2..=name_len.min(LEGACY_MAX_LEN)).rev().find_map(|len| {
        let prefix = &name[..len];
        if LEGACY_ENTITIES.contains(&prefix) {
            resolve_html5_entity(prefix).map(|decoded| (Cow::Borrowed(decoded), len))
        } else {
            None
        }
    })
}

/// Resolve the digits of a numeric reference (after `&#`).
///
/// Returns the character and the number of bytes consumed.
fn resolve_numeric(number: &str) -> Option<(char, usize)> {
    let (digits, radix, prefix_len) = match number.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16, 1),
        None => (number, 10, 0),
    };
    let len = digits
        .chars()
        .take_while(|c| c.is_digit(radix))
        .count();
    if len == 0 {
        return None;
    }

    // NUL, surrogates and values past U+10FFFF decode to the replacement
    // character rather than being dropped.
    let c = u32::from_str_radix(&digits[..len], radix)
        .ok()
        .filter(|&code| code != 0)
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    let semicolon = usize::from(digits[len..].starts_with(';'));

    Some((c, prefix_len + len + semicolon))
}
