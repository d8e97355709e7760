//! Single-pass field scanner.
//!
//! Walks the decoded characters of a string once, with one character of
//! lookahead, and records the span of every `{name}` field it closes.

use super::FieldSpan;
use std::collections::HashMap;
use std::iter::Peekable;
use std::str::CharIndices;

const OPEN_BRACE: char = '{';
const CLOSE_BRACE: char = '}';

/// Character cursor with a single character of lookahead.
struct Cursor<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
        }
    }

    /// Consume the next character, returning its byte offset.
    fn advance(&mut self) -> Option<(usize, char)> {
        self.chars.next()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, ch)| ch)
    }

    /// Consume the next character only if it equals `expected`.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }
}

/// Scan `input` and return the last span found for each field name.
///
/// Never fails: unterminated fields and stray close braces simply produce no
/// span.
pub(super) fn scan(input: &str) -> HashMap<String, FieldSpan> {
    let mut fields = HashMap::new();
    let mut cursor = Cursor::new(input);

    let mut is_open = false;
    let mut start = 0;
    let mut name = String::new();

    while let Some((offset, ch)) = cursor.advance() {
        match ch {
            OPEN_BRACE if !is_open => {
                // `{{` is a literal brace and opens nothing.
                if !cursor.eat(OPEN_BRACE) {
                    is_open = true;
                    start = offset;
                    name.clear();
                }
            }
            CLOSE_BRACE if is_open => {
                if cursor.eat(CLOSE_BRACE) {
                    name.push(CLOSE_BRACE);
                } else {
                    let span = FieldSpan {
                        name: std::mem::take(&mut name),
                        start,
                        end: offset + CLOSE_BRACE.len_utf8(),
                    };
                    fields.insert(span.name.clone(), span);
                    is_open = false;
                }
            }
            _ if is_open => name.push(ch),
            _ => {}
        }
    }

    if is_open {
        tracing::debug!(start, "discarding unterminated field");
    }

    fields
}
