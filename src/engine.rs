use tracing::{debug, trace};
use trellis::{CstNode, Kind, MatchToken, Posn};

use crate::builder::Builder;
use crate::cursor::Cursor;
use crate::error::{Fail, FoundToken, ParseError, ParseErrorKind};
use crate::result::Match;

/// The body of a named grammar rule. Rule bodies call back into the
/// parser for terminals, combinators, and sub-rules; sub-rule calls go
/// by name through the active grammar so dialect overrides apply even
/// from inherited rule bodies.
pub type RuleFn<G> = for<'a> fn(&G, &mut Parser<'a>) -> Match<()>;

/// A grammar dialect: a name (for diagnostics) and a rule table. A rule
/// is whatever `resolve` answers for; anything else a grammar calls is a
/// helper running in the caller's open node.
pub trait Grammar: Sized {
    fn name(&self) -> &'static str;
    fn resolve(&self, rule: &str) -> Option<RuleFn<Self>>;
}

/// An alternative body for [`Parser::or`].
pub type AltFn<'o> = dyn for<'s> Fn(&mut Parser<'s>) -> Match<()> + 'o;

/// A saved parse position: cursor, node-stack depth, and the open
/// node's child count. Checkpoints nest strictly; the sequence number
/// catches misuse.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    pos: usize,
    depth: usize,
    children: usize,
    seq: usize
}

#[derive(Default)]
struct Furthest {
    hit: bool,
    at: u32,
    expected: Vec<&'static str>,
    got: Option<MatchToken>
}

pub struct Parser<'a> {
    cursor: Cursor<'a>,
    builder: Builder,
    live: usize,
    furthest: Furthest
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [MatchToken]) -> Parser<'a> {
        Parser {
            cursor: Cursor::new(tokens),
            builder: Builder::new(),
            live: 0,
            furthest: Furthest::default()
        }
    }

    /// Run `entry` over `tokens` and return its CST node, or a
    /// diagnostic positioned at the deepest point any attempt reached.
    pub fn parse<G: Grammar>(
        grammar: &G,
        tokens: &'a [MatchToken],
        entry: &'static str
    ) -> Result<CstNode, ParseError> {
        let mut parser = Parser::new(tokens);
        debug!(grammar = grammar.name(), entry, tokens = tokens.len(), "parse start");
        match parser.rule(grammar, entry) {
            Ok(()) => parser.complete(),
            Err(fail) => Err(parser.diagnose(fail))
        }
    }

    fn complete(mut self) -> Result<CstNode, ParseError> {
        if self.live != 0 {
            return Err(self.diagnose(Fail::CheckpointImbalance { expected: 0, live: self.live }));
        }
        if let Some(token) = self.cursor.peek(0) {
            let token = token.clone();
            self.note(token.index(), &["end of input"], Some(&token));
            return Err(self.diagnose(Fail::TokenMismatch {
                expected: "end of input",
                got: Box::new(token)
            }));
        }
        match self.builder.finish() {
            Some(root) => {
                debug!("parse done");
                Ok(root)
            }
            None => Err(ParseError::new(
                ParseErrorKind::CheckpointImbalance,
                Posn::origin(),
                0,
                Vec::new(),
                None
            ))
        }
    }

    /// Invoke a named rule: open a node, run the body, close and attach
    /// on success. On failure the node is dropped and the failure
    /// propagates to the enclosing combinator.
    pub fn rule<G: Grammar>(&mut self, grammar: &G, name: &'static str) -> Match<()> {
        let Some(body) = grammar.resolve(name) else {
            return Err(Fail::UnknownRule { grammar: grammar.name(), rule: name });
        };
        trace!(rule = name, at = self.cursor.pos(), "enter");
        self.builder.enter(name);
        match body(grammar, self) {
            Ok(()) => {
                self.builder.exit();
                trace!(rule = name, at = self.cursor.pos(), "exit");
                Ok(())
            }
            Err(fail) => {
                self.builder.abandon();
                trace!(rule = name, at = self.cursor.pos(), "abandon");
                Err(fail)
            }
        }
    }

    /// Match one terminal. Fails without any state change, so callers
    /// need no checkpoint around a single terminal.
    pub fn terminal(&mut self, kind: Kind) -> Match<()> {
        match self.cursor.peek(0) {
            Some(token) if token.kind == kind => {
                let leaf = CstNode::leaf(kind.name(), token);
                self.cursor.bump()?;
                self.builder.attach(leaf);
                Ok(())
            }
            Some(token) => {
                self.note(token.index(), &[kind.name()], Some(token));
                Err(Fail::TokenMismatch { expected: kind.name(), got: Box::new(token.clone()) })
            }
            None => {
                let at = self.cursor.pos() as u32;
                self.note(at, &[kind.name()], None);
                Err(Fail::UnexpectedEnd { at })
            }
        }
    }

    /// Read-only view of the open node.
    pub fn cst(&self) -> &CstNode {
        self.builder.current()
    }

    /// Ordered choice with full backtracking: first success wins, each
    /// failed alternative is rolled back completely.
    pub fn or<'o>(&mut self, alts: &[(&'static str, &'o AltFn<'o>)]) -> Match<()> {
        let at = self.cursor.pos();
        for (_, alt) in alts {
            let cp = self.save();
            match alt(self) {
                Ok(()) => {
                    self.commit(cp)?;
                    return Ok(());
                }
                Err(fail) if fail.is_recoverable() => {
                    self.restore(cp)?;
                }
                Err(fail) => {
                    self.commit(cp)?;
                    return Err(fail);
                }
            }
        }
        let tried: Vec<&'static str> = alts.iter().map(|(label, _)| *label).collect();
        if let Some(token) = self.cursor.peek(0) {
            let token = token.clone();
            self.note(at as u32, &tried, Some(&token));
        } else {
            self.note(at as u32, &tried, None);
        }
        Err(Fail::NoAlternative { at: at as u32, tried })
    }

    /// Zero or more matches of `body`. Never fails recoverably; a body
    /// that succeeds without consuming input is a grammar bug and fatal.
    pub fn many<F>(&mut self, mut body: F) -> Match<()>
      where F: FnMut(&mut Parser<'a>) -> Match<()>
    {
        loop {
            let cp = self.save();
            let before = self.cursor.pos();
            match body(self) {
                Ok(()) => {
                    self.commit(cp)?;
                    if self.cursor.pos() == before {
                        return Err(Fail::NonProgressingRepetition { at: before as u32 });
                    }
                }
                Err(fail) if fail.is_recoverable() => {
                    self.restore(cp)?;
                    return Ok(());
                }
                Err(fail) => {
                    self.commit(cp)?;
                    return Err(fail);
                }
            }
        }
    }

    /// Zero or one match of `body`.
    pub fn option<F>(&mut self, body: F) -> Match<()>
      where F: FnOnce(&mut Parser<'a>) -> Match<()>
    {
        let cp = self.save();
        match body(self) {
            Ok(()) => self.commit(cp),
            Err(fail) if fail.is_recoverable() => self.restore(cp),
            Err(fail) => {
                self.commit(cp)?;
                Err(fail)
            }
        }
    }

    /// Like [`Parser::many`], but a recoverable failure does not end the
    /// loop: the offending token is recorded as an `ErrorNode` child and
    /// skipped, and matching resumes at the next token. The loop ends at
    /// end of input. Intended for the top-level item list so one bad
    /// item cannot take down the whole parse.
    pub fn fault_tolerant_many<F>(&mut self, mut body: F) -> Match<()>
      where F: FnMut(&mut Parser<'a>) -> Match<()>
    {
        loop {
            if self.cursor.at_end() {
                return Ok(());
            }
            let cp = self.save();
            let before = self.cursor.pos();
            match body(self) {
                Ok(()) => {
                    self.commit(cp)?;
                    if self.cursor.pos() == before {
                        return Err(Fail::NonProgressingRepetition { at: before as u32 });
                    }
                }
                Err(fail) if fail.is_recoverable() => {
                    self.restore(cp)?;
                    let token = match self.cursor.peek(0) {
                        Some(token) => token.clone(),
                        None => return Ok(())
                    };
                    trace!(at = token.index(), value = %token.value, "skipping token after syntax error");
                    self.builder.attach(CstNode::leaf("ErrorNode", &token));
                    self.cursor.bump()?;
                }
                Err(fail) => {
                    self.commit(cp)?;
                    return Err(fail);
                }
            }
        }
    }

    fn save(&mut self) -> Checkpoint {
        let cp = Checkpoint {
            pos: self.cursor.pos(),
            depth: self.builder.depth(),
            children: self.builder.open_children(),
            seq: self.live
        };
        self.live += 1;
        cp
    }

    fn commit(&mut self, cp: Checkpoint) -> Match<()> {
        self.check_nesting(cp)?;
        self.live -= 1;
        Ok(())
    }

    fn restore(&mut self, cp: Checkpoint) -> Match<()> {
        self.check_nesting(cp)?;
        self.live -= 1;
        self.cursor.rewind(cp.pos);
        self.builder.truncate(cp.depth, cp.children);
        Ok(())
    }

    fn check_nesting(&self, cp: Checkpoint) -> Match<()> {
        if cp.seq + 1 != self.live {
            return Err(Fail::CheckpointImbalance { expected: cp.seq, live: self.live });
        }
        Ok(())
    }

    /// Keep the deepest recoverable failure seen, merging expected sets
    /// at equal depth.
    fn note(&mut self, at: u32, expected: &[&'static str], got: Option<&MatchToken>) {
        if !self.furthest.hit || at > self.furthest.at {
            self.furthest.hit = true;
            self.furthest.at = at;
            self.furthest.expected = expected.to_vec();
            self.furthest.got = got.cloned();
        } else if at == self.furthest.at {
            for &name in expected {
                if !self.furthest.expected.contains(&name) {
                    self.furthest.expected.push(name);
                }
            }
        }
    }

    fn diagnose(&self, fail: Fail) -> ParseError {
        if fail.is_recoverable() && self.furthest.hit {
            let (at, index, got) = match self.furthest.got {
                Some(ref token) => (
                    token.span.start,
                    token.index(),
                    Some(FoundToken { name: token.kind.name(), value: token.value.clone() })
                ),
                None => (
                    self.cursor.last_posn().unwrap_or_else(Posn::origin),
                    self.cursor.len() as u32,
                    None
                )
            };
            return ParseError::new(fail.kind(), at, index, self.furthest.expected.clone(), got);
        }
        let index = match fail {
            Fail::TokenMismatch { ref got, .. } => got.index(),
            Fail::UnexpectedEnd { at }
            | Fail::NoAlternative { at, .. }
            | Fail::NonProgressingRepetition { at } => at,
            Fail::CheckpointImbalance { .. } | Fail::UnknownRule { .. } => self.cursor.pos() as u32
        };
        let (at, got) = match fail {
            Fail::TokenMismatch { ref got, .. } => (
                got.span.start,
                Some(FoundToken { name: got.kind.name(), value: got.value.clone() })
            ),
            _ => (self.cursor.last_posn().unwrap_or_else(Posn::origin), None)
        };
        ParseError::new(fail.kind(), at, index, Vec::new(), got)
    }
}
