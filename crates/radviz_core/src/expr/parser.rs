//! Recursive descent parser producing an [`Expr`] tree.
//!
//! Grammar:
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := number | symbol | func '(' expr (',' expr)* ')' | '(' expr ')'
//! ```
//! Parameter symbols are replaced by their numeric values while parsing.

use super::lexer::{Token, TokenKind};
use super::{BinaryOp, Expr, ExprError, Func, Symbol};
use crate::model::Parameters;

pub(crate) struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    parameters: &'a Parameters,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: &'a [Token], parameters: &'a Parameters) -> Self {
        Self {
            tokens,
            pos: 0,
            parameters,
        }
    }

    pub(crate) fn parse(mut self) -> Result<Expr, ExprError> {
        let expr = self.expr()?;
        match self.peek() {
            None => Ok(expr),
            Some(token) => Err(unexpected(token, "end of expression")),
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().is_some_and(|t| &t.kind == kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &'static str) -> Result<(), ExprError> {
        match self.next() {
            Some(token) if &token.kind == kind => Ok(()),
            Some(token) => Err(unexpected(token, expected)),
            None => Err(ExprError::UnexpectedEnd { expected }),
        }
    }

    fn expr(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek().map(|t| &t.kind) {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn term(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek().map(|t| &t.kind) {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        if self.eat(&TokenKind::Minus) {
            return Ok(Expr::Neg(Box::new(self.unary()?)));
        }
        if self.eat(&TokenKind::Plus) {
            return self.unary();
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, ExprError> {
        let Some(token) = self.next() else {
            return Err(ExprError::UnexpectedEnd {
                expected: "operand",
            });
        };
        match &token.kind {
            TokenKind::Number(value) => Ok(Expr::Const(*value)),
            TokenKind::LParen => {
                let inner = self.expr()?;
                self.expect(&TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::Ident(name) if self.peek().map(|t| &t.kind) == Some(&TokenKind::LParen) => {
                self.pos += 1;
                self.call(name)
            }
            TokenKind::Ident(name) => match Symbol::resolve(name) {
                Some(Symbol::Argument(arg)) => Ok(Expr::Arg(arg)),
                Some(Symbol::Parameter(param)) => Ok(Expr::Const(self.parameters.get(param))),
                None => Err(ExprError::UnknownSymbol(name.clone())),
            },
            _ => Err(unexpected(token, "operand")),
        }
    }

    fn call(&mut self, name: &str) -> Result<Expr, ExprError> {
        let func = Func::from_name(name).ok_or_else(|| ExprError::UnknownFunction(name.to_string()))?;
        let mut args = vec![self.expr()?];
        while self.eat(&TokenKind::Comma) {
            args.push(self.expr()?);
        }
        self.expect(&TokenKind::RParen, "')'")?;
        if args.len() != func.arity() {
            return Err(ExprError::ArgumentCount {
                function: func.name(),
                expected: func.arity(),
                found: args.len(),
            });
        }
        Ok(Expr::Call(func, args))
    }
}

fn unexpected(token: &Token, expected: &'static str) -> ExprError {
    ExprError::UnexpectedToken {
        position: token.span.start,
        expected,
    }
}

