//! HTML emission.
//!
//! Walks the resolved block tree and writes one markup fragment string.
//! Text content and attribute values are escaped; resolved media embeds are
//! inserted by handle, so markdown rules can never corrupt them.

use std::fmt::Write;

use press_media::{MediaCatalog, UrlResolver};

use crate::block::Block;
use crate::escape::escape_html;
use crate::inline::Inline;
use crate::placeholder::{PlaceholderTable, Resolution};

pub(crate) fn emit(
    blocks: &[Block],
    table: &PlaceholderTable,
    catalog: &MediaCatalog,
    urls: &dyn UrlResolver,
) -> String {
    let mut out = String::with_capacity(256);
    for block in blocks {
        emit_block(block, table, catalog, urls, &mut out);
    }
    out
}

fn emit_block(
    block: &Block,
    table: &PlaceholderTable,
    catalog: &MediaCatalog,
    urls: &dyn UrlResolver,
    out: &mut String,
) {
    match block {
        Block::Heading { level, content } => {
            write!(out, "<h{level}>").unwrap();
            emit_inlines(content, table, catalog, urls, false, out);
            write!(out, "</h{level}>").unwrap();
        }
        Block::CodeBlock { language, content } => {
            match language {
                Some(lang) => write!(out, r#"<pre><code class="language-{}">"#, escape_html(lang))
                    .unwrap(),
                None => out.push_str("<pre><code>"),
            }
            for span in content {
                match span {
                    Inline::Media(handle) => {
                        emit_media(table.get(*handle), catalog, urls, false, out);
                    }
                    Inline::Text(text) => out.push_str(&escape_html(text)),
                    // Verbatim scanning only yields text and media spans.
                    _ => {}
                }
            }
            out.push_str("</code></pre>");
        }
        Block::UnorderedList { items } => {
            out.push_str("<ul>");
            for item in items {
                out.push_str("<li>");
                emit_inlines(item, table, catalog, urls, false, out);
                out.push_str("</li>");
            }
            out.push_str("</ul>");
        }
        Block::OrderedList { items } => {
            out.push_str("<ol>");
            for item in items {
                out.push_str("<li>");
                emit_inlines(item, table, catalog, urls, false, out);
                out.push_str("</li>");
            }
            out.push_str("</ol>");
        }
        Block::Blockquote { content } => {
            out.push_str("<blockquote>");
            emit_inlines(content, table, catalog, urls, false, out);
            out.push_str("</blockquote>");
        }
        Block::Paragraph { content } => {
            // A candidate that starts with a media fragment passes through
            // unwrapped; embeds and warnings are block-level on their own.
            if starts_with_media(content) {
                emit_inlines(content, table, catalog, urls, true, out);
            } else {
                out.push_str("<p>");
                emit_inlines(content, table, catalog, urls, false, out);
                out.push_str("</p>");
            }
        }
    }
}

fn starts_with_media(content: &[Inline]) -> bool {
    matches!(content.first(), Some(Inline::Media(_)))
}

fn emit_inlines(
    content: &[Inline],
    table: &PlaceholderTable,
    catalog: &MediaCatalog,
    urls: &dyn UrlResolver,
    standalone: bool,
    out: &mut String,
) {
    for span in content {
        match span {
            Inline::Text(text) => out.push_str(&escape_html(text)),
            Inline::Strong(content) => {
                out.push_str("<strong>");
                emit_inlines(content, table, catalog, urls, false, out);
                out.push_str("</strong>");
            }
            Inline::Emphasis(content) => {
                out.push_str("<em>");
                emit_inlines(content, table, catalog, urls, false, out);
                out.push_str("</em>");
            }
            Inline::Code(content) => {
                out.push_str("<code>");
                emit_inlines(content, table, catalog, urls, false, out);
                out.push_str("</code>");
            }
            Inline::Link { text, url } => {
                write!(
                    out,
                    r#"<a href="{}" target="_blank" rel="nofollow noopener noreferrer">"#,
                    escape_html(url)
                )
                .unwrap();
                emit_inlines(text, table, catalog, urls, false, out);
                out.push_str("</a>");
            }
            Inline::Media(handle) => {
                emit_media(table.get(*handle), catalog, urls, standalone, out);
            }
            // Resolution replaced every placeholder span before emission.
            Inline::Placeholder { raw, .. } => out.push_str(&escape_html(raw)),
        }
    }
}

fn emit_media(
    resolution: &Resolution,
    catalog: &MediaCatalog,
    urls: &dyn UrlResolver,
    standalone: bool,
    out: &mut String,
) {
    match resolution {
        Resolution::Embed { item } => {
            let url = urls.resolve(&item.path);
            write!(
                out,
                r#"<img src="{}" alt="{}" loading="lazy">"#,
                escape_html(&url),
                escape_html(&item.original_name)
            )
            .unwrap();
        }
        Resolution::Missing { reference } => {
            // Inside flow content a <p> would break the enclosing element,
            // so the warning becomes a span there.
            let tag = if standalone { "p" } else { "span" };
            write!(
                out,
                r#"<{tag} class="media-warning">Unresolved image reference "{}". "#,
                escape_html(reference)
            )
            .unwrap();
            if catalog.is_empty() {
                out.push_str("No media is attached to this article.");
            } else {
                out.push_str("Available media: ");
                for (i, item) in catalog.items().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write!(
                        out,
                        "id {} \"{}\" (use {{{{image:{}}}}})",
                        item.id,
                        escape_html(&item.original_name),
                        item.id
                    )
                    .unwrap();
                }
                out.push('.');
            }
            write!(out, "</{tag}>").unwrap();
        }
    }
}
