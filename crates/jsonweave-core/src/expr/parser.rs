//! Recursive descent parser, one function per precedence level
//!
//! ```text
//! conditional    := coalesce ( "?" conditional ":" conditional )?
//! coalesce       := or ( "??" or )*
//! or             := and ( "||" and )*
//! and            := equality ( "&&" equality )*
//! equality       := relational ( ("==" | "!=" | "===" | "!==") relational )*
//! relational     := additive ( ("<" | "<=" | ">" | ">=") additive )*
//! additive       := multiplicative ( ("+" | "-") multiplicative )*
//! multiplicative := unary ( ("*" | "/" | "%") unary )*
//! unary          := ("!" | "-" | "+" | "typeof") unary | postfix
//! postfix        := primary ( "." name | "[" conditional "]" | "(" args ")" )*
//! ```

use serde_json::Value;

use super::ast::{BinaryOp, Expr, UnaryOp};
use super::lexer::{tokenize, Punct, Token, TokenKind};
use super::ExpressionError;

pub(crate) fn parse(source: &str) -> Result<Expr, ExpressionError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
    };

    if parser.peek_kind() == &TokenKind::Eof {
        return Err(parser.error_here("empty expression"));
    }

    let expr = parser.conditional()?;
    if parser.peek_kind() != &TokenKind::Eof {
        return Err(parser.unexpected());
    }
    Ok(expr)
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &Token {
        // tokenize always ends with Eof, and advance never moves past it
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn at_punct(&self, punct: Punct) -> bool {
        self.peek_kind() == &TokenKind::Punct(punct)
    }

    fn eat_punct(&mut self, punct: Punct) -> bool {
        if self.at_punct(punct) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, punct: Punct) -> Result<(), ExpressionError> {
        if self.eat_punct(punct) {
            Ok(())
        } else {
            Err(self.error_here(format!(
                "expected '{}' but found {}",
                punct.as_str(),
                describe(self.peek_kind())
            )))
        }
    }

    fn error_here(&self, message: impl Into<String>) -> ExpressionError {
        ExpressionError::malformed(self.source, self.peek().offset, message)
    }

    fn unexpected(&self) -> ExpressionError {
        self.error_here(format!("unexpected {}", describe(self.peek_kind())))
    }

    fn conditional(&mut self) -> Result<Expr, ExpressionError> {
        let test = self.coalesce()?;
        if !self.eat_punct(Punct::Question) {
            return Ok(test);
        }
        let consequent = self.conditional()?;
        self.expect_punct(Punct::Colon)?;
        let alternate = self.conditional()?;
        Ok(Expr::Conditional {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        })
    }

    /// Left-associative binary level
    fn binary_level(
        &mut self,
        ops: &[(Punct, BinaryOp)],
        next: fn(&mut Self) -> Result<Expr, ExpressionError>,
    ) -> Result<Expr, ExpressionError> {
        let mut left = next(self)?;
        'outer: loop {
            for (punct, op) in ops {
                if self.eat_punct(*punct) {
                    let right = next(self)?;
                    left = Expr::Binary {
                        op: *op,
                        left: Box::new(left),
                        right: Box::new(right),
                    };
                    continue 'outer;
                }
            }
            return Ok(left);
        }
    }

    fn coalesce(&mut self) -> Result<Expr, ExpressionError> {
        self.binary_level(&[(Punct::QuestionQuestion, BinaryOp::Coalesce)], Self::or)
    }

    fn or(&mut self) -> Result<Expr, ExpressionError> {
        self.binary_level(&[(Punct::OrOr, BinaryOp::Or)], Self::and)
    }

    fn and(&mut self) -> Result<Expr, ExpressionError> {
        self.binary_level(&[(Punct::AndAnd, BinaryOp::And)], Self::equality)
    }

    fn equality(&mut self) -> Result<Expr, ExpressionError> {
        self.binary_level(
            &[
                (Punct::EqEqEq, BinaryOp::StrictEq),
                (Punct::NotEqEq, BinaryOp::StrictNe),
                (Punct::EqEq, BinaryOp::Eq),
                (Punct::NotEq, BinaryOp::Ne),
            ],
            Self::relational,
        )
    }

    fn relational(&mut self) -> Result<Expr, ExpressionError> {
        self.binary_level(
            &[
                (Punct::Le, BinaryOp::Le),
                (Punct::Ge, BinaryOp::Ge),
                (Punct::Lt, BinaryOp::Lt),
                (Punct::Gt, BinaryOp::Gt),
            ],
            Self::additive,
        )
    }

    fn additive(&mut self) -> Result<Expr, ExpressionError> {
        self.binary_level(
            &[(Punct::Plus, BinaryOp::Add), (Punct::Minus, BinaryOp::Sub)],
            Self::multiplicative,
        )
    }

    fn multiplicative(&mut self) -> Result<Expr, ExpressionError> {
        self.binary_level(
            &[
                (Punct::Star, BinaryOp::Mul),
                (Punct::Slash, BinaryOp::Div),
                (Punct::Percent, BinaryOp::Rem),
            ],
            Self::unary,
        )
    }

    fn unary(&mut self) -> Result<Expr, ExpressionError> {
        let op = match self.peek_kind() {
            TokenKind::Punct(Punct::Bang) => Some(UnaryOp::Not),
            TokenKind::Punct(Punct::Minus) => Some(UnaryOp::Neg),
            TokenKind::Punct(Punct::Plus) => Some(UnaryOp::Pos),
            TokenKind::Ident(name) if name == "typeof" => Some(UnaryOp::TypeOf),
            _ => None,
        };

        match op {
            Some(op) => {
                self.advance();
                let operand = self.unary()?;
                Ok(Expr::Unary {
                    op,
                    operand: Box::new(operand),
                })
            }
            None => self.postfix(),
        }
    }

    fn postfix(&mut self) -> Result<Expr, ExpressionError> {
        let mut expr = self.primary()?;
        loop {
            if self.eat_punct(Punct::Dot) {
                let token = self.advance();
                let property = match token.kind {
                    TokenKind::Ident(name) => name,
                    other => {
                        return Err(ExpressionError::malformed(
                            self.source,
                            token.offset,
                            format!("expected property name but found {}", describe(&other)),
                        ))
                    }
                };
                expr = Expr::Member {
                    object: Box::new(expr),
                    property,
                };
            } else if self.eat_punct(Punct::LBracket) {
                let index = self.conditional()?;
                self.expect_punct(Punct::RBracket)?;
                expr = Expr::Index {
                    object: Box::new(expr),
                    index: Box::new(index),
                };
            } else if self.eat_punct(Punct::LParen) {
                let args = self.list(Punct::RParen, Self::conditional)?;
                expr = Expr::Call {
                    callee: Box::new(expr),
                    args,
                };
            } else {
                return Ok(expr);
            }
        }
    }

    /// Comma separated items up to `close`; a trailing comma is allowed
    fn list<T>(
        &mut self,
        close: Punct,
        item: fn(&mut Self) -> Result<T, ExpressionError>,
    ) -> Result<Vec<T>, ExpressionError> {
        let mut items = Vec::new();
        while !self.eat_punct(close) {
            items.push(item(self)?);
            if !self.eat_punct(Punct::Comma) {
                self.expect_punct(close)?;
                break;
            }
        }
        Ok(items)
    }

    fn property(&mut self) -> Result<(String, Expr), ExpressionError> {
        let token = self.advance();
        let key = match token.kind {
            TokenKind::Ident(name) => name,
            TokenKind::Str(text) => text,
            TokenKind::Number(n) => crate::value::float_to_text(n),
            other => {
                return Err(ExpressionError::malformed(
                    self.source,
                    token.offset,
                    format!("expected property key but found {}", describe(&other)),
                ))
            }
        };
        self.expect_punct(Punct::Colon)?;
        let value = self.conditional()?;
        Ok((key, value))
    }

    fn primary(&mut self) -> Result<Expr, ExpressionError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Number(n) => Ok(Expr::Literal(crate::value::from_number(n))),
            TokenKind::Str(text) => Ok(Expr::Literal(Value::String(text))),
            TokenKind::Ident(name) => Ok(match name.as_str() {
                "true" => Expr::Literal(Value::Bool(true)),
                "false" => Expr::Literal(Value::Bool(false)),
                "null" | "undefined" => Expr::Literal(Value::Null),
                _ => Expr::Ident(name),
            }),
            TokenKind::Punct(Punct::LParen) => {
                let expr = self.conditional()?;
                self.expect_punct(Punct::RParen)?;
                Ok(expr)
            }
            TokenKind::Punct(Punct::LBracket) => {
                Ok(Expr::Array(self.list(Punct::RBracket, Self::conditional)?))
            }
            TokenKind::Punct(Punct::LBrace) => {
                Ok(Expr::Object(self.list(Punct::RBrace, Self::property)?))
            }
            other => Err(ExpressionError::malformed(
                self.source,
                token.offset,
                format!("unexpected {}", describe(&other)),
            )),
        }
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Number(n) => format!("number {}", crate::value::float_to_text(*n)),
        TokenKind::Str(text) => format!("string {:?}", text),
        TokenKind::Ident(name) => format!("identifier '{}'", name),
        TokenKind::Punct(p) => format!("'{}'", p.as_str()),
        TokenKind::Eof => "end of expression".to_string(),
    }
}
