//! Convert raw tokens into a statement tree.

use std::ops::Range;

use crate::{
    ast::Statement,
    error::Error,
    grammar,
    lexer::Lexer,
    token::{Kind, Spanned},
};

/// Parse feature file text into a list of statements.
///
/// Syntax errors and unsupported rule types abort the parse.
pub fn parse(text: &str) -> Result<Vec<Statement>, Error> {
    let mut parser = Parser::new(text);
    grammar::root(&mut parser)
}

pub(crate) struct Parser<'a> {
    text: &'a str,
    // non-trivia tokens, always terminated by an Eof token
    tokens: Vec<Spanned>,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let mut lexer = Lexer::new(text);
        let mut tokens = Vec::new();
        let mut start = 0;
        let mut after_trivia = false;
        loop {
            let token = lexer.next_token();
            let range = start..start + token.len;
            start += token.len;
            if token.kind.is_trivia() {
                after_trivia = true;
                continue;
            }
            tokens.push(Spanned {
                kind: token.kind,
                range,
                after_trivia,
            });
            after_trivia = false;
            if token.kind == Kind::Eof {
                break;
            }
        }
        Parser {
            text,
            tokens,
            pos: 0,
        }
    }

    fn current(&self, n: usize) -> &Spanned {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    pub(crate) fn nth(&self, n: usize) -> Kind {
        self.current(n).kind
    }

    pub(crate) fn nth_range(&self, n: usize) -> Range<usize> {
        self.current(n).range.clone()
    }

    pub(crate) fn matches(&self, n: usize, kind: Kind) -> bool {
        self.nth(n) == kind
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.matches(0, Kind::Eof)
    }

    pub(crate) fn current_token_text(&self) -> &'a str {
        &self.text[self.nth_range(0)]
    }

    /// Consume the current token, returning its text.
    pub(crate) fn bump(&mut self) -> &'a str {
        let text = self.current_token_text();
        if !self.at_eof() {
            self.pos += 1;
        }
        text
    }

    pub(crate) fn eat(&mut self, kind: Kind) -> bool {
        if self.matches(0, kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: Kind) -> Result<Range<usize>, Error> {
        if self.matches(0, kind) {
            let range = self.nth_range(0);
            self.bump();
            Ok(range)
        } else {
            Err(self.err(format!(
                "Expected {kind}, found '{}'",
                self.current_token_text()
            )))
        }
    }

    /// A block name, tag or glyph name; keywords are allowed here.
    pub(crate) fn expect_name(&mut self) -> Result<&'a str, Error> {
        let kind = self.nth(0);
        if kind == Kind::Ident || kind == Kind::Number || kind.is_keyword() {
            Ok(self.bump())
        } else {
            Err(self.err(format!(
                "Expected name, found '{}'",
                self.current_token_text()
            )))
        }
    }

    /// Consume tokens through the next top-level `;`, returning them as
    /// text with each run of trivia collapsed to one space.
    ///
    /// Braces are tracked so that bodies like `featureNames { ... };` are
    /// kept whole.
    pub(crate) fn raw_until_semi(&mut self) -> Result<String, Error> {
        let mut out = String::new();
        let mut depth = 0usize;
        loop {
            match self.nth(0) {
                Kind::Eof => return Err(self.err("Expected ';'")),
                Kind::Semi if depth == 0 => {
                    self.bump();
                    break;
                }
                Kind::LBrace => depth += 1,
                Kind::RBrace if depth == 0 => return Err(self.err("Expected ';'")),
                Kind::RBrace => depth -= 1,
                _ => (),
            }
            if !out.is_empty() && self.current(0).after_trivia {
                out.push(' ');
            }
            out.push_str(self.bump());
        }
        Ok(out)
    }

    pub(crate) fn err(&self, message: impl Into<String>) -> Error {
        Error::Syntax {
            message: message.into(),
            range: self.nth_range(0),
        }
    }
}
