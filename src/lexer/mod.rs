//! Lexer: byte stream to token stream with `(line, column)` positions
//! (spec §4.1).
//!
//! Pull-based with one character of lookahead, in the same shape as the
//! teacher's `Peekable<Chars>`-driven lexer (`src/lexer/mod.rs` in
//! `H1ghBre4k3r/y-lang`): `eat_whitespace` runs before every token, and
//! each `lex_*` helper consumes a maximal run of the character class it
//! owns before returning.

mod token;

pub use token::{Token, TokenKind};

use std::iter::Peekable;
use std::str::Chars;

use log::trace;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::value::TypeTag;

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("end", TokenKind::End);
    m.insert("do", TokenKind::Do);
    m.insert("else", TokenKind::Else);
    m.insert("true", TokenKind::Bool(true));
    m.insert("false", TokenKind::Bool(false));
    for name in ["string", "int", "bool", "type", "list"] {
        let tag = TypeTag::from_name(name).expect("name is one of TypeTag's own names");
        m.insert(name, TokenKind::TypeName(tag));
    }
    m
});

pub struct Lexer<'a> {
    iterator: Peekable<Chars<'a>>,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            iterator: input.chars().peekable(),
            line: 1,
            col: 1,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.iterator.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let next = self.iterator.next();
        if let Some(c) = next {
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        next
    }

    fn here(&self) -> (usize, usize) {
        (self.line, self.col)
    }

    fn eat_whitespace_and_comments(&mut self) {
        loop {
            while let Some(c) = self.peek() {
                if c.is_whitespace() {
                    self.bump();
                } else {
                    break;
                }
            }
            if self.peek() == Some('#') {
                while let Some(c) = self.peek() {
                    self.bump();
                    if c == '\n' {
                        break;
                    }
                }
                continue;
            }
            break;
        }
    }

    /// Produce the next token. Pull-based: the parser calls this once per
    /// token of lookahead it needs (spec §2).
    pub fn next_token(&mut self) -> Token {
        self.eat_whitespace_and_comments();

        let position = self.here();

        let Some(c) = self.peek() else {
            return Token {
                kind: TokenKind::Eof,
                position,
            };
        };

        let kind = match c {
            'a'..='z' | 'A'..='Z' => self.lex_identifier(),
            '0'..='9' => self.lex_int(),
            '"' => self.lex_string(),
            '[' => {
                self.bump();
                TokenKind::LBracket
            }
            ']' => {
                self.bump();
                TokenKind::RBracket
            }
            ',' => {
                self.bump();
                TokenKind::Comma
            }
            '.' => {
                self.bump();
                TokenKind::Dot
            }
            '+' => {
                self.bump();
                TokenKind::Plus
            }
            '*' => {
                self.bump();
                TokenKind::Star
            }
            '/' => {
                self.bump();
                TokenKind::Slash
            }
            '%' => {
                self.bump();
                TokenKind::Percent
            }
            '-' => {
                self.bump();
                if self.peek() == Some('>') {
                    self.bump();
                    TokenKind::Arrow
                } else {
                    TokenKind::Minus
                }
            }
            '=' => {
                self.bump();
                if self.peek() == Some('=') {
                    self.bump();
                    TokenKind::Eq
                } else {
                    // Bare '=' is illegal alone (spec §4.1) and, per the
                    // historical behaviour this implementation preserves,
                    // is silently skipped rather than surfaced as a token.
                    trace!("skipping illegal bare '=' at {position:?}");
                    return self.next_token();
                }
            }
            '!' => {
                self.bump();
                if self.peek() == Some('=') {
                    self.bump();
                    TokenKind::Ne
                } else {
                    trace!("skipping illegal bare '!' at {position:?}");
                    return self.next_token();
                }
            }
            '<' => {
                self.bump();
                if self.peek() == Some('=') {
                    self.bump();
                    TokenKind::Le
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                self.bump();
                if self.peek() == Some('=') {
                    self.bump();
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            _ => {
                // Unknown characters are silently skipped (spec §4.1,
                // resolved in SPEC_FULL.md §15).
                trace!("skipping unknown character {c:?} at {position:?}");
                self.bump();
                return self.next_token();
            }
        };

        trace!("lexed {kind:?} at {position:?}");
        Token { kind, position }
    }

    fn lex_identifier(&mut self) -> TokenKind {
        let mut lexeme = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphabetic() {
                lexeme.push(c);
                self.bump();
            } else {
                break;
            }
        }
        KEYWORDS
            .get(lexeme.as_str())
            .cloned()
            .unwrap_or(TokenKind::Id(lexeme))
    }

    fn lex_int(&mut self) -> TokenKind {
        let mut lexeme = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                lexeme.push(c);
                self.bump();
            } else {
                break;
            }
        }
        TokenKind::Int(lexeme.parse().expect("maximal digit run always parses"))
    }

    fn lex_string(&mut self) -> TokenKind {
        self.bump(); // opening quote
        let mut lexeme = String::new();
        loop {
            match self.peek() {
                Some('"') => {
                    self.bump();
                    break;
                }
                Some(c) => {
                    lexeme.push(c);
                    self.bump();
                }
                None => break,
            }
        }
        TokenKind::Str(lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(src);
        let mut out = vec![];
        loop {
            let token = lexer.next_token();
            if token.kind == TokenKind::Eof {
                break;
            }
            out.push(token.kind);
        }
        out
    }

    #[test]
    fn lexes_identifiers_and_keywords() {
        assert_eq!(
            kinds("foo end do else"),
            vec![
                TokenKind::Id("foo".into()),
                TokenKind::End,
                TokenKind::Do,
                TokenKind::Else,
            ]
        );
    }

    #[test]
    fn lexes_integers() {
        assert_eq!(kinds("0 1337"), vec![TokenKind::Int(0), TokenKind::Int(1337)]);
    }

    #[test]
    fn lexes_strings_without_escapes() {
        assert_eq!(kinds(r#""foobar""#), vec![TokenKind::Str("foobar".into())]);
    }

    #[test]
    fn disambiguates_two_char_operators() {
        assert_eq!(
            kinds("== != <= >= -> < > - +"),
            vec![
                TokenKind::Eq,
                TokenKind::Ne,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::Arrow,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Minus,
                TokenKind::Plus,
            ]
        );
    }

    #[test]
    fn comments_run_to_end_of_line() {
        assert_eq!(
            kinds("1 # a comment == -> nonsense\n2"),
            vec![TokenKind::Int(1), TokenKind::Int(2)]
        );
    }

    #[test]
    fn bare_equals_and_bang_are_skipped() {
        assert_eq!(kinds("1 = 2 ! 3"), vec![
            TokenKind::Int(1),
            TokenKind::Int(2),
            TokenKind::Int(3),
        ]);
    }

    #[test]
    fn tracks_line_and_column() {
        let mut lexer = Lexer::new("a\nbb");
        let first = lexer.next_token();
        assert_eq!(first.position, (1, 1));
        let second = lexer.next_token();
        assert_eq!(second.position, (2, 1));
    }

    #[test]
    fn type_name_keywords_carry_their_tag() {
        assert_eq!(
            kinds("string int bool type list"),
            vec![
                TokenKind::TypeName(TypeTag::String),
                TokenKind::TypeName(TypeTag::Int),
                TokenKind::TypeName(TypeTag::Bool),
                TokenKind::TypeName(TypeTag::Type),
                TokenKind::TypeName(TypeTag::List),
            ]
        );
    }
}
