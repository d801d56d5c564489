use trellis::{Kind, MatchToken, Posn, Span};

use crate::error::LexError;
use crate::word;

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    emitted: u32
}

impl Lexer {
    pub fn new(src: &str) -> Lexer {
        Lexer {
            chars: src.chars().collect(),
            pos: 0,
            line: 0,
            column: 0,
            emitted: 0
        }
    }

    pub fn tokens(mut self) -> Result<Vec<MatchToken>, LexError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.at_end() {
                return Ok(tokens);
            }
            tokens.push(self.read_token()?);
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self, k: usize) -> Option<char> {
        self.chars.get(self.pos + k).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek(0) == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn posn(&self) -> Posn {
        Posn { line: self.line, column: self.column }
    }

    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek(0) {
                Some(ch) if ch.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.peek(1) == Some('/') => {
                    while let Some(ch) = self.peek(0) {
                        if ch == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                Some('/') if self.peek(1) == Some('*') => {
                    let at = self.posn();
                    self.bump();
                    self.bump();
                    loop {
                        match self.peek(0) {
                            None => return Err(LexError::UnterminatedComment { at }),
                            Some('*') if self.peek(1) == Some('/') => {
                                self.bump();
                                self.bump();
                                break;
                            }
                            _ => {
                                self.bump();
                            }
                        }
                    }
                }
                _ => return Ok(())
            }
        }
    }

    fn emit(&mut self, kind: Kind, value: String, start: Posn) -> MatchToken {
        let span = Span { start, end: self.posn(), index: self.emitted };
        self.emitted += 1;
        MatchToken::new(kind, value, span)
    }

    fn read_token(&mut self) -> Result<MatchToken, LexError> {
        let ch = self.peek(0).unwrap();
        if ch.is_ascii_alphabetic() || ch == '_' || ch == '$' {
            return Ok(self.read_word());
        }
        if ch.is_ascii_digit() || (ch == '.' && self.peek(1).is_some_and(|c| c.is_ascii_digit())) {
            return self.read_number();
        }
        if ch == '"' || ch == '\'' {
            return self.read_string(ch);
        }
        self.read_punctuator()
    }

    fn read_word(&mut self) -> MatchToken {
        let start = self.posn();
        let mut text = String::new();
        while let Some(ch) = self.peek(0) {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '$' {
                text.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        let kind = word::reserved(&text).unwrap_or(Kind::Identifier);
        self.emit(kind, text, start)
    }

    fn read_number(&mut self) -> Result<MatchToken, LexError> {
        let start = self.posn();
        let mut text = String::new();
        if self.peek(0) == Some('0') && matches!(self.peek(1), Some('x') | Some('X')) {
            text.push(self.bump().unwrap());
            text.push(self.bump().unwrap());
            if !self.peek(0).is_some_and(|c| c.is_ascii_hexdigit()) {
                return Err(LexError::MissingDigits { prefix: "0x", at: self.posn() });
            }
            while self.peek(0).is_some_and(|c| c.is_ascii_hexdigit()) {
                text.push(self.bump().unwrap());
            }
            return Ok(self.emit(Kind::NumericLiteral, text, start));
        }
        while self.peek(0).is_some_and(|c| c.is_ascii_digit()) {
            text.push(self.bump().unwrap());
        }
        if self.peek(0) == Some('.') {
            text.push(self.bump().unwrap());
            while self.peek(0).is_some_and(|c| c.is_ascii_digit()) {
                text.push(self.bump().unwrap());
            }
        }
        if matches!(self.peek(0), Some('e') | Some('E')) {
            text.push(self.bump().unwrap());
            if matches!(self.peek(0), Some('+') | Some('-')) {
                text.push(self.bump().unwrap());
            }
            if !self.peek(0).is_some_and(|c| c.is_ascii_digit()) {
                return Err(LexError::MissingExponent { at: self.posn() });
            }
            while self.peek(0).is_some_and(|c| c.is_ascii_digit()) {
                text.push(self.bump().unwrap());
            }
        }
        Ok(self.emit(Kind::NumericLiteral, text, start))
    }

    // Value carries the cooked contents, without the quotes.
    fn read_string(&mut self, quote: char) -> Result<MatchToken, LexError> {
        let start = self.posn();
        self.bump();
        let mut value = String::new();
        loop {
            match self.peek(0) {
                None | Some('\n') => return Err(LexError::UnterminatedString { at: start }),
                Some('\\') => {
                    self.bump();
                    let escaped = match self.peek(0) {
                        None => return Err(LexError::UnterminatedString { at: start }),
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('0') => '\0',
                        Some(other) => other
                    };
                    value.push(escaped);
                    self.bump();
                }
                Some(ch) if ch == quote => {
                    self.bump();
                    return Ok(self.emit(Kind::StringLiteral, value, start));
                }
                Some(ch) => {
                    value.push(ch);
                    self.bump();
                }
            }
        }
    }

    fn read_punctuator(&mut self) -> Result<MatchToken, LexError> {
        let start = self.posn();
        let from = self.pos;
        let ch = self.bump().unwrap();
        let kind = match ch {
            '{' => Kind::LBrace,
            '}' => Kind::RBrace,
            '(' => Kind::LParen,
            ')' => Kind::RParen,
            '[' => Kind::LBrack,
            ']' => Kind::RBrack,
            '.' => Kind::Dot,
            ';' => Kind::Semicolon,
            ',' => Kind::Comma,
            '?' => Kind::Question,
            ':' => Kind::Colon,
            '~' => Kind::Tilde,
            '=' => {
                if self.eat('=') {
                    if self.eat('=') { Kind::StrictEq } else { Kind::EqEq }
                } else if self.eat('>') {
                    Kind::Arrow
                } else {
                    Kind::Eq
                }
            }
            '!' => {
                if self.eat('=') {
                    if self.eat('=') { Kind::StrictNotEq } else { Kind::NotEq }
                } else {
                    Kind::Bang
                }
            }
            '<' => {
                if self.eat('<') {
                    if self.eat('=') { Kind::LShiftEq } else { Kind::LShift }
                } else if self.eat('=') {
                    Kind::LEq
                } else {
                    Kind::LAngle
                }
            }
            '>' => {
                if self.eat('>') {
                    if self.eat('>') {
                        if self.eat('=') { Kind::URShiftEq } else { Kind::URShift }
                    } else if self.eat('=') {
                        Kind::RShiftEq
                    } else {
                        Kind::RShift
                    }
                } else if self.eat('=') {
                    Kind::GEq
                } else {
                    Kind::RAngle
                }
            }
            '+' => {
                if self.eat('+') {
                    Kind::Inc
                } else if self.eat('=') {
                    Kind::PlusEq
                } else {
                    Kind::Plus
                }
            }
            '-' => {
                if self.eat('-') {
                    Kind::Dec
                } else if self.eat('=') {
                    Kind::MinusEq
                } else {
                    Kind::Minus
                }
            }
            '*' => if self.eat('=') { Kind::StarEq } else { Kind::Star },
            '/' => if self.eat('=') { Kind::SlashEq } else { Kind::Slash },
            '%' => if self.eat('=') { Kind::ModEq } else { Kind::Mod },
            '&' => {
                if self.eat('&') {
                    Kind::LogicalAnd
                } else if self.eat('=') {
                    Kind::BitAndEq
                } else {
                    Kind::BitAnd
                }
            }
            '|' => {
                if self.eat('|') {
                    Kind::LogicalOr
                } else if self.eat('=') {
                    Kind::BitOrEq
                } else {
                    Kind::BitOr
                }
            }
            '^' => if self.eat('=') { Kind::BitXorEq } else { Kind::BitXor },
            other => return Err(LexError::IllegalChar { found: other, at: start })
        };
        let value: String = self.chars[from..self.pos].iter().collect();
        Ok(self.emit(kind, value, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<Kind> {
        crate::lex(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn empty_source_yields_no_tokens() {
        assert_eq!(crate::lex("").unwrap(), vec![]);
        assert_eq!(crate::lex("  // nothing\n/* here */").unwrap(), vec![]);
    }

    #[test]
    fn lexes_a_declaration() {
        assert_eq!(
            kinds("let x = 1;"),
            vec![Kind::Let, Kind::Identifier, Kind::Eq, Kind::NumericLiteral, Kind::Semicolon]
        );
    }

    #[test]
    fn maximal_munch_on_punctuators() {
        assert_eq!(kinds("a >>>= b"), vec![Kind::Identifier, Kind::URShiftEq, Kind::Identifier]);
        assert_eq!(kinds("a === b"), vec![Kind::Identifier, Kind::StrictEq, Kind::Identifier]);
        assert_eq!(kinds("x=>y"), vec![Kind::Identifier, Kind::Arrow, Kind::Identifier]);
        assert_eq!(kinds("i++ + 1"), vec![
            Kind::Identifier, Kind::Inc, Kind::Plus, Kind::NumericLiteral
        ]);
    }

    #[test]
    fn tracks_lines_columns_and_indices() {
        let tokens = crate::lex("a\n  b").unwrap();
        assert_eq!(tokens[0].span.start, Posn { line: 0, column: 0 });
        assert_eq!(tokens[1].span.start, Posn { line: 1, column: 2 });
        assert_eq!(tokens[1].span.index, 1);
    }

    #[test]
    fn string_value_is_cooked() {
        let tokens = crate::lex(r#"'a\nb'"#).unwrap();
        assert_eq!(tokens[0].kind, Kind::StringLiteral);
        assert_eq!(tokens[0].value, "a\nb");
    }

    #[test]
    fn number_forms() {
        assert_eq!(kinds("0x1F 1.5e-3 .5 42"), vec![Kind::NumericLiteral; 4]);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert!(matches!(
            crate::lex("'oops"),
            Err(LexError::UnterminatedString { .. })
        ));
    }

    #[test]
    fn leading_dot_number_vs_member_access() {
        assert_eq!(kinds("a.b"), vec![Kind::Identifier, Kind::Dot, Kind::Identifier]);
        assert_eq!(kinds(".5"), vec![Kind::NumericLiteral]);
    }
}
