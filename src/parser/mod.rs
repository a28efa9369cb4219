//! Parser: token stream to an ordered sequence of [`Expr`] nodes.
//!
//! Single token of lookahead, with an `eat(kind)`-reports-and-terminates
//! idiom: here `eat_*` returns a `Result` instead of printing and calling
//! `std::process::exit` directly, so the fatal behaviour lives in one
//! place (`main.rs`).

mod expr;

pub use expr::{BinopKind, CompareKind, Expr};

use log::trace;

use crate::error::{EmptyBodyError, ParseError, SyntaxError};
use crate::lexer::{Lexer, Token, TokenKind};

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self { lexer, current }
    }

    /// Parse an entire program: the top-level routine and the nested-body
    /// routine are the same, this *is* that shared routine, used both at
    /// the top level and recursively for `if`/`for`/`block` bodies.
    pub fn parse_program(mut self) -> Result<Vec<Expr>, ParseError> {
        self.parse_sequence()
    }

    fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        std::mem::replace(&mut self.current, next)
    }

    fn eat(&mut self, matches: impl Fn(&TokenKind) -> bool) -> Result<Token, ParseError> {
        if matches(&self.current.kind) {
            Ok(self.advance())
        } else {
            Err(SyntaxError {
                position: self.current.position,
                lexeme: self.current.kind.lexeme(),
            }
            .into())
        }
    }

    fn eat_exact(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        self.eat(|k| *k == kind).map(|_| ())
    }

    fn eat_identifier(&mut self) -> Result<String, ParseError> {
        match &self.current.kind {
            TokenKind::Id(_) => match self.advance().kind {
                TokenKind::Id(name) => Ok(name),
                _ => unreachable!(),
            },
            _ => Err(SyntaxError {
                position: self.current.position,
                lexeme: self.current.kind.lexeme(),
            }
            .into()),
        }
    }

    fn eat_string(&mut self) -> Result<String, ParseError> {
        match &self.current.kind {
            TokenKind::Str(_) => match self.advance().kind {
                TokenKind::Str(s) => Ok(s),
                _ => unreachable!(),
            },
            _ => Err(SyntaxError {
                position: self.current.position,
                lexeme: self.current.kind.lexeme(),
            }
            .into()),
        }
    }

    /// Stops at `end`, `else`, `do` or end-of-input without consuming the
    /// terminator.
    fn is_terminator(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::End | TokenKind::Else | TokenKind::Do | TokenKind::Eof
        )
    }

    fn parse_sequence(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = vec![];
        while !self.is_terminator() {
            exprs.push(self.parse_one()?);
        }
        Ok(exprs)
    }

    fn parse_non_empty_sequence(&mut self, what: &'static str) -> Result<Vec<Expr>, ParseError> {
        if self.is_terminator() {
            return Err(EmptyBodyError {
                position: self.current.position,
                what,
            }
            .into());
        }
        self.parse_sequence()
    }

    /// An atom: literal, list literal, or identifier-with-subscripts. Used
    /// both for list-literal elements and for subscript expressions (spec
    /// §4.2's `id-ref`/`atom` productions never recognise the special
    /// statement-level keywords — only [`Self::parse_one`] does).
    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        match self.current.kind.clone() {
            TokenKind::Int(n) => {
                self.advance();
                Ok(Expr::PushInt(n))
            }
            TokenKind::Str(s) => {
                self.advance();
                Ok(Expr::PushStr(s))
            }
            TokenKind::Bool(b) => {
                self.advance();
                Ok(Expr::PushBool(b))
            }
            TokenKind::TypeName(t) => {
                self.advance();
                Ok(Expr::PushType(t))
            }
            TokenKind::LBracket => self.parse_list_literal(),
            TokenKind::Id(name) => {
                self.advance();
                let indices = self.parse_indices()?;
                Ok(Expr::VarRead { name, indices })
            }
            _ => Err(SyntaxError {
                position: self.current.position,
                lexeme: self.current.kind.lexeme(),
            }
            .into()),
        }
    }

    fn parse_list_literal(&mut self) -> Result<Expr, ParseError> {
        self.eat_exact(TokenKind::LBracket)?;
        let mut items = vec![];
        if self.current.kind != TokenKind::RBracket {
            loop {
                items.push(self.parse_atom()?);
                if self.current.kind == TokenKind::Comma {
                    self.advance();
                    continue;
                }
                break;
            }
        }
        self.eat_exact(TokenKind::RBracket)?;
        Ok(Expr::PushList(items))
    }

    /// Zero or more `[index]` subscripts, each a single atom.
    fn parse_indices(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut indices = vec![];
        while self.current.kind == TokenKind::LBracket {
            self.advance();
            indices.push(self.parse_atom()?);
            self.eat_exact(TokenKind::RBracket)?;
        }
        Ok(indices)
    }

    fn parse_one(&mut self) -> Result<Expr, ParseError> {
        let position = self.current.position;
        match self.current.kind.clone() {
            TokenKind::Id(name) => self.parse_identifier_form(name, position),

            TokenKind::Plus => {
                self.advance();
                Ok(Expr::Binop(BinopKind::Add))
            }
            TokenKind::Minus => {
                self.advance();
                Ok(Expr::Binop(BinopKind::Sub))
            }
            TokenKind::Star => {
                self.advance();
                Ok(Expr::Binop(BinopKind::Mul))
            }
            TokenKind::Slash => {
                self.advance();
                Ok(Expr::Binop(BinopKind::Div))
            }
            TokenKind::Percent => {
                self.advance();
                Ok(Expr::Binop(BinopKind::Rem))
            }

            TokenKind::Eq => {
                self.advance();
                Ok(Expr::Compare(CompareKind::Eq))
            }
            TokenKind::Ne => {
                self.advance();
                Ok(Expr::Compare(CompareKind::Ne))
            }
            TokenKind::Lt => {
                self.advance();
                Ok(Expr::Compare(CompareKind::Lt))
            }
            TokenKind::Gt => {
                self.advance();
                Ok(Expr::Compare(CompareKind::Gt))
            }
            TokenKind::Le => {
                self.advance();
                Ok(Expr::Compare(CompareKind::Le))
            }
            TokenKind::Ge => {
                self.advance();
                Ok(Expr::Compare(CompareKind::Ge))
            }

            TokenKind::Arrow => {
                self.advance();
                let name = self.eat_identifier()?;
                Ok(Expr::VarDef { name })
            }

            TokenKind::Int(_)
            | TokenKind::Str(_)
            | TokenKind::Bool(_)
            | TokenKind::TypeName(_)
            | TokenKind::LBracket => self.parse_atom(),

            _ => Err(SyntaxError {
                position,
                lexeme: self.current.kind.lexeme(),
            }
            .into()),
        }
    }

    /// Dispatch for the special statement-level identifier keywords (spec
    /// §4.2); anything else is a plain variable read.
    fn parse_identifier_form(
        &mut self,
        name: String,
        position: (usize, usize),
    ) -> Result<Expr, ParseError> {
        macro_rules! simple {
            ($variant:expr) => {{
                self.advance();
                Ok($variant)
            }};
        }

        match name.as_str() {
            "print" => simple!(Expr::Print),
            "printS" => simple!(Expr::PrintS),
            "printC" => simple!(Expr::PrintC),
            "puts" => simple!(Expr::Puts),
            "input" => simple!(Expr::Input),
            "len" => simple!(Expr::Len),
            "typeof" => simple!(Expr::TypeOf),
            "swap" => simple!(Expr::Swap),
            "over" => simple!(Expr::Over),
            "rot" => simple!(Expr::Rot),
            "inc" => simple!(Expr::Inc),
            "dec" => simple!(Expr::Dec),
            "dup" => simple!(Expr::Dup),
            "drop" => simple!(Expr::Drop),
            "exit" => simple!(Expr::Exit),
            "break" => simple!(Expr::Break),

            "import" => {
                self.advance();
                let path = self.eat_string()?;
                Ok(Expr::Import { path })
            }

            "block" => {
                self.advance();
                let block_name = self.eat_identifier()?;
                self.eat_exact(TokenKind::Do)?;
                let body = self.parse_non_empty_sequence("block")?;
                self.eat_exact(TokenKind::End)?;
                trace!("parsed block '{block_name}' with {} expr(s)", body.len());
                Ok(Expr::BlockDef {
                    name: block_name,
                    body,
                })
            }

            "call" => {
                self.advance();
                let block_name = self.eat_identifier()?;
                Ok(Expr::BlockCall { name: block_name })
            }

            "for" => {
                self.advance();
                let cond = self.parse_sequence()?;
                self.eat_exact(TokenKind::Do)?;
                let body = self.parse_non_empty_sequence("for loop")?;
                self.eat_exact(TokenKind::End)?;
                Ok(Expr::For { cond, body })
            }

            "if" => {
                self.advance();
                let cond = self.parse_sequence()?;
                self.eat_exact(TokenKind::Do)?;
                let then = self.parse_non_empty_sequence("if statement")?;
                if self.current.kind == TokenKind::Else {
                    self.advance();
                    let else_body = self.parse_non_empty_sequence("if statement")?;
                    self.eat_exact(TokenKind::End)?;
                    Ok(Expr::If {
                        cond,
                        then,
                        else_: Some(else_body),
                    })
                } else {
                    self.eat_exact(TokenKind::End)?;
                    Ok(Expr::If {
                        cond,
                        then,
                        else_: None,
                    })
                }
            }

            "append" => {
                self.advance();
                let indices = self.parse_indices()?;
                Ok(Expr::Append { indices })
            }

            _ => {
                self.advance();
                let indices = self.parse_indices()?;
                let _ = position;
                Ok(Expr::VarRead { name, indices })
            }
        }
    }
}
