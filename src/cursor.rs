use trellis::MatchToken;

use crate::error::Fail;
use crate::result::Match;

/// An indexed position into the finished token array. The whole input
/// is available upfront, so speculative moves are plain index writes.
pub struct Cursor<'a> {
    tokens: &'a [MatchToken],
    pos: usize
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [MatchToken]) -> Cursor<'a> {
        Cursor { tokens, pos: 0 }
    }

    pub fn peek(&self, k: usize) -> Option<&'a MatchToken> {
        self.tokens.get(self.pos + k)
    }

    pub fn bump(&mut self) -> Match<&'a MatchToken> {
        match self.tokens.get(self.pos) {
            Some(token) => {
                self.pos += 1;
                Ok(token)
            }
            None => Err(Fail::UnexpectedEnd { at: self.pos as u32 })
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn rewind(&mut self, pos: usize) {
        debug_assert!(pos <= self.pos);
        self.pos = pos;
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// End position of the last token, for end-of-input diagnostics.
    pub fn last_posn(&self) -> Option<trellis::Posn> {
        self.tokens.last().map(|t| t.span.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis::{Kind, Posn, Span};

    fn tokens() -> Vec<MatchToken> {
        ["a", "b", "c"]
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let span = Span {
                    start: Posn { line: 0, column: i as u32 },
                    end: Posn { line: 0, column: i as u32 + 1 },
                    index: i as u32
                };
                MatchToken::new(Kind::Identifier, *v, span)
            })
            .collect()
    }

    #[test]
    fn peek_does_not_consume() {
        let tokens = tokens();
        let cursor = Cursor::new(&tokens);
        assert_eq!(cursor.peek(0).unwrap().value, "a");
        assert_eq!(cursor.peek(2).unwrap().value, "c");
        assert!(cursor.peek(3).is_none());
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn bump_advances_and_fails_past_end() {
        let tokens = tokens();
        let mut cursor = Cursor::new(&tokens);
        assert_eq!(cursor.bump().unwrap().value, "a");
        assert_eq!(cursor.bump().unwrap().value, "b");
        assert_eq!(cursor.bump().unwrap().value, "c");
        assert_eq!(cursor.bump(), Err(Fail::UnexpectedEnd { at: 3 }));
    }

    #[test]
    fn rewind_restores_position() {
        let tokens = tokens();
        let mut cursor = Cursor::new(&tokens);
        cursor.bump().unwrap();
        cursor.bump().unwrap();
        cursor.rewind(1);
        assert_eq!(cursor.peek(0).unwrap().value, "b");
    }
}
