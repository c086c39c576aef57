//! Scan a FEA file, producing a sequence of tokens.
//!
//! Glyph names are allowed to contain hyphens (`a-z` is one name, `a - z`
//! is a range), and the `'` contextual mark is always a token of its own.

use crate::token::{Kind, Token};

const EOF: u8 = 0x0;

pub(crate) struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Lexer { input, pos: 0 }
    }

    fn nth(&self, index: usize) -> u8 {
        self.input
            .as_bytes()
            .get(self.pos + index)
            .copied()
            .unwrap_or(EOF)
    }

    fn bump(&mut self) -> Option<u8> {
        let pos = self.pos;
        let next = self.input.as_bytes().get(pos).copied();
        self.pos += usize::from(next.is_some());
        next
    }

    pub(crate) fn next_token(&mut self) -> Token {
        let start_pos = self.pos;
        let first = self.bump().unwrap_or(EOF);
        let kind = match first {
            EOF => Kind::Eof,
            byte if is_ascii_whitespace(byte) => self.whitespace(),
            b'#' => self.comment(),
            b'"' => self.string(),
            b'0'..=b'9' => self.number(),
            b';' => Kind::Semi,
            b',' => Kind::Comma,
            b'@' => self.glyph_class_name(),
            b'\\' => Kind::Backslash,
            b'-' if self.nth(0).is_ascii_digit() => self.number(),
            b'-' => Kind::Hyphen,
            b'=' => Kind::Eq,
            b'{' => Kind::LBrace,
            b'}' => Kind::RBrace,
            b'[' => Kind::LSquare,
            b']' => Kind::RSquare,
            b'(' => Kind::LParen,
            b')' => Kind::RParen,
            b'<' => Kind::LAngle,
            b'>' => Kind::RAngle,
            b'\'' => Kind::SingleQuote,
            _ => self.ident(start_pos),
        };

        let len = self.pos - start_pos;
        Token { len, kind }
    }

    fn whitespace(&mut self) -> Kind {
        while is_ascii_whitespace(self.nth(0)) {
            self.bump();
        }
        Kind::Whitespace
    }

    fn comment(&mut self) -> Kind {
        while ![b'\n', EOF].contains(&self.nth(0)) {
            self.bump();
        }
        Kind::Comment
    }

    fn string(&mut self) -> Kind {
        loop {
            match self.nth(0) {
                b'"' => {
                    self.bump();
                    break Kind::String;
                }
                EOF => break Kind::StringUnterminated,
                _ => {
                    self.bump();
                }
            }
        }
    }

    fn number(&mut self) -> Kind {
        self.eat_decimal_digits();
        if self.nth(0) == b'.' && self.nth(1).is_ascii_digit() {
            self.bump();
            self.eat_decimal_digits();
            Kind::Float
        } else {
            Kind::Number
        }
    }

    fn eat_decimal_digits(&mut self) {
        while self.nth(0).is_ascii_digit() {
            self.bump();
        }
    }

    fn glyph_class_name(&mut self) -> Kind {
        self.eat_name_chars();
        Kind::NamedGlyphClass
    }

    // we eat anything that isn't whitespace or a special char.
    fn ident(&mut self, start_pos: usize) -> Kind {
        self.eat_name_chars();
        let word = &self.input.as_bytes()[start_pos..self.pos];
        Kind::from_keyword(word).unwrap_or(Kind::Ident)
    }

    fn eat_name_chars(&mut self) {
        loop {
            match self.nth(0) {
                EOF => break,
                b if is_ascii_whitespace(b) => break,
                b'-' => (),
                b if is_special(b) => break,
                _ => (),
            }
            self.bump();
        }
    }
}

#[cfg(test)]
pub(crate) fn iter_tokens(text: &str) -> impl Iterator<Item = Token> + '_ {
    let mut cursor = Lexer::new(text);
    std::iter::from_fn(move || {
        let next = cursor.next_token();
        match next.kind {
            Kind::Eof => None,
            _ => Some(next),
        }
    })
}

// [" # ' ( ) , - ; < = > @ [ \ ] { }]
fn is_special(byte: u8) -> bool {
    matches!(
        byte,
        b'"' | b'#'
            | b'\''
            | b'('
            | b')'
            | b','
            | b'-'
            | b';'
            | b'<'
            | b'='
            | b'>'
            | b'@'
            | b'['
            | b'\\'
            | b']'
            | b'{'
            | b'}'
    )
}

fn is_ascii_whitespace(byte: u8) -> bool {
    byte == b' ' || (0x9..=0xD).contains(&byte)
}

#[cfg(test)]
pub(crate) fn debug_tokens(text: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut pos = 0;
    for token in iter_tokens(text) {
        result.push(format!("{}..{} {}", pos, pos + token.len, token.kind));
        pos += token.len;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyphens_in_names() {
        let token_strs = debug_tokens("[a-z a - z]");
        assert_eq!(token_strs[0], "0..1 [");
        assert_eq!(token_strs[1], "1..4 ID");
        assert_eq!(token_strs[2], "4..5 WS");
        assert_eq!(token_strs[3], "5..6 ID");
        assert_eq!(token_strs[5], "7..8 -");
        assert_eq!(token_strs[7], "9..10 ID");
        assert_eq!(token_strs[8], "10..11 ]");
    }

    #[test]
    fn marked_glyphs() {
        let token_strs = debug_tokens("sub f' [i l]' by f_i;");
        assert_eq!(token_strs[0], "0..3 SubKw");
        assert_eq!(token_strs[2], "4..5 ID");
        assert_eq!(token_strs[3], "5..6 '");
        assert_eq!(token_strs[10], "12..13 '");
    }

    #[test]
    fn class_names_and_numbers() {
        let token_strs = debug_tokens("@MC_mkmk_top -120 0.5 markClass");
        assert_eq!(token_strs[0], "0..12 @GlyphClass");
        assert_eq!(token_strs[2], "13..17 NUM");
        assert_eq!(token_strs[4], "18..21 FLOAT");
        assert_eq!(token_strs[6], "22..31 MarkClassKw");
    }

    #[test]
    fn comments_run_to_end_of_line() {
        let token_strs = debug_tokens("# hi; there\nsub");
        assert_eq!(token_strs[0], "0..11 #");
        assert_eq!(token_strs[1], "11..12 WS");
        assert_eq!(token_strs[2], "12..15 SubKw");
    }
}
