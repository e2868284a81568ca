//! Inline span parsing.
//!
//! Turns the text of a single block (heading, paragraph, list item,
//! blockquote) into a sequence of typed spans. Placeholder syntax is
//! recognized here as a first-class span so media references never travel
//! through the markdown transformations as raw text.

use crate::placeholder::{MediaHandle, PlaceholderKind};

/// A parsed inline span.
///
/// The supported markdown subset does not nest styled spans inside each
/// other, but placeholders resolve anywhere in the document, so styled
/// span contents are a list of text and placeholder segments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Inline {
    /// Literal text, escaped at emission.
    Text(String),
    /// `**bold**`
    Strong(Vec<Inline>),
    /// `*italic*`
    Emphasis(Vec<Inline>),
    /// `` `code` ``
    Code(Vec<Inline>),
    /// `[text](url)`
    Link { text: Vec<Inline>, url: String },
    /// A placeholder occurrence awaiting resolution. `raw` is the exact
    /// matched source text, kept so unresolved occurrences can be restored
    /// verbatim.
    Placeholder { kind: PlaceholderKind, raw: String },
    /// A resolved placeholder: an index into the placeholder table.
    Media(MediaHandle),
}

/// Parse block text into inline spans, applying the full markdown subset.
pub(crate) fn parse(text: &str) -> Vec<Inline> {
    scan(text, true)
}

/// Scan verbatim text (fenced code content) for placeholders only.
///
/// No markdown rules apply inside code, but placeholder resolution does:
/// the resolver runs on the whole document, code blocks included.
pub(crate) fn scan_verbatim(text: &str) -> Vec<Inline> {
    scan(text, false)
}

fn scan(text: &str, markdown: bool) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut buf = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        if rest.starts_with("{{") {
            if let Some((placeholder, consumed)) = match_placeholder(rest) {
                flush(&mut buf, &mut spans);
                spans.push(placeholder);
                rest = &rest[consumed..];
                continue;
            }
        }

        if markdown {
            // Bold before italic, so the second `*` of a `**` pair is never
            // read as an italic delimiter. Empty spans don't match, which
            // keeps delimiter runs like a stray ``` literal.
            if let Some(s) = rest.strip_prefix("**") {
                if let Some(end) = s.find("**").filter(|&end| end > 0) {
                    flush(&mut buf, &mut spans);
                    spans.push(Inline::Strong(scan(&s[..end], false)));
                    rest = &s[end + 2..];
                    continue;
                }
            } else if let Some(s) = rest.strip_prefix('*') {
                if let Some(end) = s.find('*').filter(|&end| end > 0) {
                    flush(&mut buf, &mut spans);
                    spans.push(Inline::Emphasis(scan(&s[..end], false)));
                    rest = &s[end + 1..];
                    continue;
                }
            } else if let Some(s) = rest.strip_prefix('`') {
                if let Some(end) = s.find('`').filter(|&end| end > 0) {
                    flush(&mut buf, &mut spans);
                    spans.push(Inline::Code(scan(&s[..end], false)));
                    rest = &s[end + 1..];
                    continue;
                }
            } else if rest.starts_with('[') {
                if let Some((link, consumed)) = match_link(rest) {
                    flush(&mut buf, &mut spans);
                    spans.push(link);
                    rest = &rest[consumed..];
                    continue;
                }
            }
        }

        // No rule matched here; an unmatched delimiter stays literal.
        let c = rest.chars().next().expect("rest is non-empty");
        buf.push(c);
        rest = &rest[c.len_utf8()..];
    }

    flush(&mut buf, &mut spans);
    spans
}

fn flush(buf: &mut String, spans: &mut Vec<Inline>) {
    if !buf.is_empty() {
        spans.push(Inline::Text(std::mem::take(buf)));
    }
}

/// Match one of the three placeholder grammars at the start of `rest`.
///
/// The literal introducers are mutually exclusive, so the checks can run in
/// a fixed order without ambiguity. Returns the span and the number of
/// bytes consumed.
fn match_placeholder(rest: &str) -> Option<(Inline, usize)> {
    if let Some(inner) = rest.strip_prefix("{{image:") {
        let end = inner.find("}}")?;
        let consumed = "{{image:".len() + end + 2;
        let kind = PlaceholderKind::Reference(inner[..end].trim().to_owned());
        return Some((placeholder(kind, &rest[..consumed]), consumed));
    }
    if let Some(inner) = rest.strip_prefix("{{img:") {
        let end = inner.find("}}")?;
        let consumed = "{{img:".len() + end + 2;
        let kind = PlaceholderKind::Filename(inner[..end].trim().to_owned());
        return Some((placeholder(kind, &rest[..consumed]), consumed));
    }
    if rest.starts_with("{{image}}") {
        let consumed = "{{image}}".len();
        return Some((placeholder(PlaceholderKind::Bare, &rest[..consumed]), consumed));
    }
    None
}

fn placeholder(kind: PlaceholderKind, raw: &str) -> Inline {
    Inline::Placeholder {
        kind,
        raw: raw.to_owned(),
    }
}

/// Match `[text](url)` at the start of `rest`.
fn match_link(rest: &str) -> Option<(Inline, usize)> {
    let inner = rest.strip_prefix('[')?;
    let text_end = inner.find("](")?;
    let after_text = &inner[text_end + 2..];
    let url_end = after_text.find(')')?;

    let link = Inline::Link {
        text: scan(&inner[..text_end], false),
        url: after_text[..url_end].to_owned(),
    };
    // "[" + text + "](" + url + ")"
    Some((link, 1 + text_end + 2 + url_end + 1))
}
