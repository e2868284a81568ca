//! Line-level block classification.
//!
//! Splits article source into typed blocks. Classification is line-based:
//! each line either opens or extends a block, and blank lines end the
//! current paragraph. Inline parsing happens as blocks are assembled, so
//! the emission stage only ever walks a finished tree.

use crate::inline::{self, Inline};

/// A classified run of one or more source lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Block {
    /// `#`, `##`, or `###` heading.
    Heading { level: u8, content: Vec<Inline> },
    /// Fenced code block. Content spans carry no markdown, only verbatim
    /// text and placeholder occurrences.
    CodeBlock {
        language: Option<String>,
        content: Vec<Inline>,
    },
    /// Consecutive `- ` lines.
    UnorderedList { items: Vec<Vec<Inline>> },
    /// Consecutive `N. ` lines.
    OrderedList { items: Vec<Vec<Inline>> },
    /// Consecutive `> ` lines, joined with spaces.
    Blockquote { content: Vec<Inline> },
    /// Anything else. Single newlines inside a paragraph are soft breaks
    /// and collapse to spaces.
    Paragraph { content: Vec<Inline> },
}

/// Classify source text into blocks.
pub(crate) fn lex(text: &str) -> Vec<Block> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some(language) = fence_open(line) {
            // Look ahead for the closing delimiter. An unterminated fence
            // is demoted to literal paragraph text.
            if let Some(close) = (i + 1..lines.len()).find(|&j| fence_close(lines[j])) {
                flush_paragraph(&mut paragraph, &mut blocks);
                let content = lines[i + 1..close].join("\n");
                blocks.push(Block::CodeBlock {
                    language,
                    content: inline::scan_verbatim(&content),
                });
                i = close + 1;
                continue;
            }
            paragraph.push(line);
            i += 1;
            continue;
        }

        if line.trim().is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            i += 1;
        } else if let Some((level, rest)) = heading(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(Block::Heading {
                level,
                content: inline::parse(rest.trim()),
            });
            i += 1;
        } else if unordered_item(line).is_some() {
            flush_paragraph(&mut paragraph, &mut blocks);
            let mut items = Vec::new();
            while i < lines.len() {
                let Some(item) = unordered_item(lines[i]) else {
                    break;
                };
                items.push(inline::parse(item));
                i += 1;
            }
            blocks.push(Block::UnorderedList { items });
        } else if ordered_item(line).is_some() {
            flush_paragraph(&mut paragraph, &mut blocks);
            let mut items = Vec::new();
            while i < lines.len() {
                let Some(item) = ordered_item(lines[i]) else {
                    break;
                };
                items.push(inline::parse(item));
                i += 1;
            }
            blocks.push(Block::OrderedList { items });
        } else if quote_line(line).is_some() {
            flush_paragraph(&mut paragraph, &mut blocks);
            let mut quoted = Vec::new();
            while i < lines.len() {
                let Some(rest) = quote_line(lines[i]) else {
                    break;
                };
                quoted.push(rest);
                i += 1;
            }
            blocks.push(Block::Blockquote {
                content: inline::parse(quoted.join(" ").trim()),
            });
        } else {
            paragraph.push(line);
            i += 1;
        }
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    blocks
}

/// Join pending paragraph lines with spaces and emit a paragraph block.
fn flush_paragraph(paragraph: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if paragraph.is_empty() {
        return;
    }
    let joined = paragraph
        .drain(..)
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    if !joined.is_empty() {
        blocks.push(Block::Paragraph {
            content: inline::parse(&joined),
        });
    }
}

/// Detect an opening fence line, returning the info-string language if any.
fn fence_open(line: &str) -> Option<Option<String>> {
    let trimmed = line.trim_start();
    let rest = trimmed.strip_prefix("```")?;
    let language = rest.trim();
    if language.is_empty() {
        Some(None)
    } else {
        Some(Some(language.to_owned()))
    }
}

/// A closing fence is backticks and nothing else.
fn fence_close(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with("```") && trimmed.chars().all(|c| c == '`')
}

/// Match a heading prefix, longest first so `###` is never read as `#`.
fn heading(line: &str) -> Option<(u8, &str)> {
    for (prefix, level) in [("### ", 3), ("## ", 2), ("# ", 1)] {
        if let Some(rest) = line.strip_prefix(prefix) {
            return Some((level, rest));
        }
    }
    None
}

fn unordered_item(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
}

/// Match `N. ` with one or more leading digits.
fn ordered_item(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix(". ")
}

fn quote_line(line: &str) -> Option<&str> {
    if line == ">" {
        return Some("");
    }
    line.strip_prefix("> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text_block(s: &str) -> Vec<Inline> {
        vec![Inline::Text(s.to_owned())]
    }

    #[test]
    fn test_single_paragraph() {
        assert_eq!(
            lex("hello world"),
            vec![Block::Paragraph {
                content: text_block("hello world"),
            }]
        );
    }

    #[test]
    fn test_soft_break_collapses_to_space() {
        assert_eq!(
            lex("line one\nline two"),
            vec![Block::Paragraph {
                content: text_block("line one line two"),
            }]
        );
    }

    #[test]
    fn test_blank_line_splits_paragraphs() {
        assert_eq!(
            lex("first\n\nsecond"),
            vec![
                Block::Paragraph {
                    content: text_block("first"),
                },
                Block::Paragraph {
                    content: text_block("second"),
                },
            ]
        );
    }

    #[test]
    fn test_many_blank_lines_yield_no_empty_paragraphs() {
        assert_eq!(
            lex("first\n\n\n\n\nsecond"),
            vec![
                Block::Paragraph {
                    content: text_block("first"),
                },
                Block::Paragraph {
                    content: text_block("second"),
                },
            ]
        );
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(
            lex("# One\n## Two\n### Three"),
            vec![
                Block::Heading {
                    level: 1,
                    content: text_block("One"),
                },
                Block::Heading {
                    level: 2,
                    content: text_block("Two"),
                },
                Block::Heading {
                    level: 3,
                    content: text_block("Three"),
                },
            ]
        );
    }

    #[test]
    fn test_four_hashes_is_not_a_heading() {
        assert_eq!(
            lex("#### deep"),
            vec![Block::Paragraph {
                content: text_block("#### deep"),
            }]
        );
    }

    #[test]
    fn test_hash_without_space_is_not_a_heading() {
        assert_eq!(
            lex("#hashtag"),
            vec![Block::Paragraph {
                content: text_block("#hashtag"),
            }]
        );
    }

    #[test]
    fn test_code_block_with_language() {
        assert_eq!(
            lex("```rust\nfn main() {}\n```"),
            vec![Block::CodeBlock {
                language: Some("rust".to_owned()),
                content: text_block("fn main() {}"),
            }]
        );
    }

    #[test]
    fn test_code_block_content_keeps_markdown_literal() {
        let blocks = lex("```\n# not a heading\n**not bold**\n```");
        assert_eq!(
            blocks,
            vec![Block::CodeBlock {
                language: None,
                content: text_block("# not a heading\n**not bold**"),
            }]
        );
    }

    #[test]
    fn test_unterminated_fence_stays_literal() {
        assert_eq!(
            lex("```rust\nfn main() {}"),
            vec![Block::Paragraph {
                content: text_block("```rust fn main() {}"),
            }]
        );
    }

    #[test]
    fn test_unordered_list_groups_consecutive_items() {
        assert_eq!(
            lex("- one\n- two"),
            vec![Block::UnorderedList {
                items: vec![text_block("one"), text_block("two")],
            }]
        );
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(
            lex("1. first\n2. second\n10. tenth"),
            vec![Block::OrderedList {
                items: vec![
                    text_block("first"),
                    text_block("second"),
                    text_block("tenth"),
                ],
            }]
        );
    }

    #[test]
    fn test_blank_line_splits_lists() {
        let blocks = lex("- one\n\n- two");
        assert_eq!(
            blocks,
            vec![
                Block::UnorderedList {
                    items: vec![text_block("one")],
                },
                Block::UnorderedList {
                    items: vec![text_block("two")],
                },
            ]
        );
    }

    #[test]
    fn test_blockquote_lines_join() {
        assert_eq!(
            lex("> quoted\n> more"),
            vec![Block::Blockquote {
                content: text_block("quoted more"),
            }]
        );
    }

    #[test]
    fn test_list_interrupts_paragraph() {
        assert_eq!(
            lex("intro\n- item"),
            vec![
                Block::Paragraph {
                    content: text_block("intro"),
                },
                Block::UnorderedList {
                    items: vec![text_block("item")],
                },
            ]
        );
    }

    #[test]
    fn test_bold_inside_list_item() {
        assert_eq!(
            lex("- has **bold** text"),
            vec![Block::UnorderedList {
                items: vec![vec![
                    Inline::Text("has ".to_owned()),
                    Inline::Strong(vec![Inline::Text("bold".to_owned())]),
                    Inline::Text(" text".to_owned()),
                ]],
            }]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(lex(""), Vec::new());
        assert_eq!(lex("\n\n\n"), Vec::new());
    }
}
