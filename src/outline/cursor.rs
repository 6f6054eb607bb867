//! Forward-only cursor over a classified token stream.

use rustc_hash::FxHashMap;

use crate::base::{TextSize, TextSnapshot};
use crate::classify::Token;

/// Walks the document position by position.
///
/// At each position the cursor either sits on the token starting there or
/// on a raw, unclassified character (whitespace, unknown input). Stepping
/// from a token jumps to its end; stepping from a raw character moves one
/// character forward.
pub struct TokenCursor<'a> {
    snapshot: &'a TextSnapshot,
    tokens: &'a [Token],
    /// Token start offset → index into `tokens`
    by_start: FxHashMap<TextSize, usize>,
    position: TextSize,
    current: Option<usize>,
}

impl<'a> TokenCursor<'a> {
    pub fn new(snapshot: &'a TextSnapshot, tokens: &'a [Token]) -> Self {
        let mut by_start = FxHashMap::default();
        by_start.reserve(tokens.len());
        for (index, token) in tokens.iter().enumerate() {
            by_start.entry(token.start()).or_insert(index);
        }

        let mut cursor = Self {
            snapshot,
            tokens,
            by_start,
            position: TextSize::from(0),
            current: None,
        };
        cursor.seek(TextSize::from(0));
        cursor
    }

    pub fn snapshot(&self) -> &'a TextSnapshot {
        self.snapshot
    }

    /// Current text offset.
    pub fn position(&self) -> TextSize {
        self.position
    }

    /// Token starting at the current position, if any.
    pub fn current(&self) -> Option<&'a Token> {
        self.current.map(|index| &self.tokens[index])
    }

    /// Stream index of the current token.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Token following the current one in the stream.
    pub fn next_token(&self) -> Option<&'a Token> {
        self.token_at(self.current? + 1)
    }

    /// Token preceding the current one in the stream.
    pub fn previous_token(&self) -> Option<&'a Token> {
        self.token_at(self.current?.checked_sub(1)?)
    }

    pub fn token_at(&self, index: usize) -> Option<&'a Token> {
        self.tokens.get(index)
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.snapshot.len()
    }

    /// Step past the current token, or one character when there is none.
    pub fn advance(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        let next = match self.current() {
            Some(token) if token.end() > self.position => token.end(),
            _ => {
                let width = self
                    .snapshot
                    .text()
                    .get(usize::from(self.position)..)
                    .and_then(|rest| rest.chars().next())
                    .map_or(1, char::len_utf8);
                self.position + TextSize::from(width as u32)
            }
        };
        self.seek(next);
        true
    }

    /// Jump to the start of the next source line, or to the end of the text
    /// when the cursor is on the last line.
    pub fn advance_to_next_line(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        let line = self.snapshot.line_number(self.position);
        let target = match self.snapshot.line(line + 1) {
            Ok(next) => next.start(),
            Err(_) => self.snapshot.len(),
        };
        self.seek(target);
        true
    }

    fn seek(&mut self, position: TextSize) {
        self.position = position.min(self.snapshot.len());
        self.current = self.by_start.get(&self.position).copied();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::SnapshotVersion;
    use crate::classify::classify_text;

    fn setup(text: &str) -> (TextSnapshot, Vec<Token>) {
        (
            TextSnapshot::new(SnapshotVersion(0), text),
            classify_text(text),
        )
    }

    #[test]
    fn test_steps_over_tokens_and_raw_chars() {
        let (snapshot, tokens) = setup("ab  {");
        let mut cursor = TokenCursor::new(&snapshot, &tokens);

        assert_eq!(cursor.current().unwrap().text.as_str(), "ab");
        cursor.advance();
        assert_eq!(u32::from(cursor.position()), 2);
        assert!(cursor.current().is_none());
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.current().unwrap().text.as_str(), "{");
        assert_eq!(cursor.previous_token().unwrap().text.as_str(), "ab");
        assert!(cursor.next_token().is_none());
        cursor.advance();
        assert!(cursor.at_end());
        assert!(!cursor.advance());
    }

    #[test]
    fn test_multibyte_raw_characters() {
        let (snapshot, tokens) = setup("é{");
        let mut cursor = TokenCursor::new(&snapshot, &tokens);

        assert!(cursor.current().is_none());
        cursor.advance();
        assert_eq!(u32::from(cursor.position()), 2);
        assert_eq!(cursor.current().unwrap().text.as_str(), "{");
    }

    #[test]
    fn test_advance_to_next_line() {
        let (snapshot, tokens) = setup("#if X\r\nfoo\n#endif");
        let mut cursor = TokenCursor::new(&snapshot, &tokens);

        assert!(cursor.advance_to_next_line());
        assert_eq!(cursor.current().unwrap().text.as_str(), "foo");
        cursor.advance_to_next_line();
        assert_eq!(cursor.current().unwrap().text.as_str(), "#endif");
        cursor.advance_to_next_line();
        assert!(cursor.at_end());
    }
}
