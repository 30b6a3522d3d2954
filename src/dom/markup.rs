//! Minimal markup reader and writer.
//!
//! Understands elements, quoted/unquoted/bare attributes, text with the common
//! character references, comments and doctype declarations. Whitespace-only
//! text at the top level of a fragment is dropped so that indented templates
//! still yield a single root.

use thiserror::Error;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Deepest element nesting a fragment may have.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkupError {
    #[error("Unclosed element <{tag}>")]
    UnclosedElement { tag: String },

    #[error("Expected </{expected}> but found </{found}> at byte {offset}")]
    MismatchedClose {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("Unexpected closing tag </{tag}> at byte {offset}")]
    UnexpectedClose { tag: String, offset: usize },

    #[error("Element nesting exceeds {limit} levels at byte {offset}")]
    TooDeep { limit: usize, offset: usize },

    #[error("Unterminated {construct} starting at byte {offset}")]
    Unterminated {
        construct: &'static str,
        offset: usize,
    },
}

/// Parsed node, independent of any document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<MarkupNode>,
    },
    Text(String),
}

pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Parses a fragment into its top-level nodes.
pub fn parse(source: &str) -> Result<Vec<MarkupNode>, MarkupError> {
    let mut parser = Parser {
        src: source,
        pos: 0,
        depth: 0,
    };
    let nodes = parser.nodes(None)?;
    Ok(nodes
        .into_iter()
        .filter(|node| !matches!(node, MarkupNode::Text(text) if text.trim().is_empty()))
        .collect())
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    /// Elements currently open.
    depth: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let end = rest.find(|c: char| !keep(c)).unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }

    fn nodes(&mut self, open: Option<&str>) -> Result<Vec<MarkupNode>, MarkupError> {
        let mut nodes = Vec::new();
        loop {
            if self.eof() {
                return match open {
                    Some(tag) => Err(MarkupError::UnclosedElement {
                        tag: tag.to_string(),
                    }),
                    None => Ok(nodes),
                };
            }

            let rest = self.rest();
            if rest.starts_with("<!--") {
                let start = self.pos;
                let Some(end) = rest.find("-->") else {
                    return Err(MarkupError::Unterminated {
                        construct: "comment",
                        offset: start,
                    });
                };
                self.pos += end + 3;
            } else if rest.starts_with("</") {
                let offset = self.pos;
                self.pos += 2;
                let name = self.take_while(is_name_char).to_ascii_lowercase();
                self.skip_whitespace();
                if !self.rest().starts_with('>') {
                    return Err(MarkupError::Unterminated {
                        construct: "closing tag",
                        offset,
                    });
                }
                self.pos += 1;
                return match open {
                    Some(tag) if tag == name => Ok(nodes),
                    Some(tag) => Err(MarkupError::MismatchedClose {
                        expected: tag.to_string(),
                        found: name,
                        offset,
                    }),
                    None => Err(MarkupError::UnexpectedClose { tag: name, offset }),
                };
            } else if rest.starts_with("<!") {
                let offset = self.pos;
                let Some(end) = rest.find('>') else {
                    return Err(MarkupError::Unterminated {
                        construct: "declaration",
                        offset,
                    });
                };
                self.pos += end + 1;
            } else if starts_element(rest) {
                nodes.push(self.element()?);
            } else {
                nodes.push(MarkupNode::Text(self.text()));
            }
        }
    }

    fn text(&mut self) -> String {
        let start = self.pos;
        // A lone '<' that does not open a tag is plain text.
        self.pos += self.rest().chars().next().map_or(1, char::len_utf8);
        while !self.eof() {
            let rest = self.rest();
            if rest.starts_with('<') && (starts_element(rest) || rest.starts_with("</") || rest.starts_with("<!")) {
                break;
            }
            self.pos += rest.chars().next().map_or(1, char::len_utf8);
        }
        decode_entities(&self.src[start..self.pos])
    }

    fn element(&mut self) -> Result<MarkupNode, MarkupError> {
        let offset = self.pos;
        self.pos += 1;
        let tag = self.take_while(is_name_char).to_ascii_lowercase();
        let mut attributes: Vec<(String, String)> = Vec::new();

        let self_closing = loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.is_empty() {
                return Err(MarkupError::Unterminated {
                    construct: "start tag",
                    offset,
                });
            }
            if rest.starts_with("/>") {
                self.pos += 2;
                break true;
            }
            if rest.starts_with('>') {
                self.pos += 1;
                break false;
            }

            let name = self
                .take_while(|c| !c.is_whitespace() && c != '=' && c != '>' && c != '/')
                .to_ascii_lowercase();
            if name.is_empty() {
                // Stray '/' inside a tag.
                self.pos += 1;
                continue;
            }
            self.skip_whitespace();
            let value = if self.rest().starts_with('=') {
                self.pos += 1;
                self.skip_whitespace();
                self.attribute_value(offset)?
            } else {
                String::new()
            };
            if !attributes.iter().any(|(existing, _)| *existing == name) {
                attributes.push((name, value));
            }
        };

        let children = if self_closing || is_void(&tag) {
            Vec::new()
        } else {
            if self.depth >= MAX_DEPTH {
                return Err(MarkupError::TooDeep {
                    limit: MAX_DEPTH,
                    offset,
                });
            }
            self.depth += 1;
            let children = self.nodes(Some(tag.as_str()));
            self.depth -= 1;
            children?
        };

        Ok(MarkupNode::Element {
            tag,
            attributes,
            children,
        })
    }

    fn attribute_value(&mut self, offset: usize) -> Result<String, MarkupError> {
        let rest = self.rest();
        match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let Some(end) = rest[1..].find(quote) else {
                    return Err(MarkupError::Unterminated {
                        construct: "attribute value",
                        offset,
                    });
                };
                self.pos += end + 2;
                Ok(decode_entities(&rest[1..end + 1]))
            }
            _ => {
                let raw = self.take_while(|c| !c.is_whitespace() && c != '>');
                Ok(decode_entities(raw))
            }
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':'
}

fn starts_element(rest: &str) -> bool {
    let mut chars = rest.chars();
    chars.next() == Some('<') && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
}

fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let decoded = match &rest[1..semi] {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                entity => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            decoded.map(|c| (c, semi))
        });
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}
