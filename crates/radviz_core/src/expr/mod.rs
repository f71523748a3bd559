//! Restricted arithmetic expressions over the model's state and controls.
//!
//! The solver records each function of its specification as the C expression
//! it was compiled from, e.g. `(1.0 - (1.0 - v->m->delta*v->r)*exp(-v->s))`.
//! This module turns such text into an evaluable [`Expr`] tree. Parameter
//! references (`v->m->alpha`, ...) are replaced by the model's values while
//! parsing; state and control references (`v->q`, `v->r`, `v->s`, `v->x`)
//! become arguments supplied at evaluation time.

mod lexer;
mod parser;

use std::fmt;

use crate::format::format_shortest;
use crate::model::{ParameterName, Parameters};

use lexer::{TokenKind, tokenize};
use parser::Parser;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExprError {
    #[error("unexpected character '{found}' at {position}")]
    UnexpectedChar { position: usize, found: char },

    #[error("invalid number '{text}' at {position}")]
    InvalidNumber { position: usize, text: String },

    #[error("expected {expected} at {position}")]
    UnexpectedToken {
        position: usize,
        expected: &'static str,
    },

    #[error("expected {expected} but the expression ended")]
    UnexpectedEnd { expected: &'static str },

    #[error("unknown symbol '{0}'")]
    UnknownSymbol(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("{function} takes {expected} argument(s), found {found}")]
    ArgumentCount {
        function: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("'{argument}' is not an argument of {function}({signature})")]
    UnboundArgument {
        argument: Argument,
        function: &'static str,
        signature: String,
    },
}

/// State variables and controls an expression may depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Argument {
    /// Average product quantity
    Q,
    /// Radius of attention
    R,
    /// Effort
    S,
    /// Wealth
    X,
}

impl Argument {
    pub fn name(self) -> &'static str {
        match self {
            Argument::Q => "q",
            Argument::R => "r",
            Argument::S => "s",
            Argument::X => "x",
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Symbol {
    Argument(Argument),
    Parameter(ParameterName),
}

impl Symbol {
    /// Resolve solver member paths (`v->m->alpha`, `v->q`) and bare names.
    pub(crate) fn resolve(name: &str) -> Option<Symbol> {
        if let Some(param) = name.strip_prefix("v->m->") {
            return ParameterName::from_name(param).map(Symbol::Parameter);
        }
        let arg = match name.strip_prefix("v->").unwrap_or(name) {
            "q" => Argument::Q,
            "r" => Argument::R,
            "s" => Argument::S,
            "x" => Argument::X,
            _ if name.starts_with("v->") => return None,
            other => return ParameterName::from_name(other).map(Symbol::Parameter),
        };
        Some(Symbol::Argument(arg))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Exp,
    Log,
    Sqrt,
    Pow,
    Abs,
}

impl Func {
    fn from_name(name: &str) -> Option<Func> {
        match name {
            "exp" => Some(Func::Exp),
            "log" => Some(Func::Log),
            "sqrt" => Some(Func::Sqrt),
            "pow" => Some(Func::Pow),
            "abs" | "fabs" => Some(Func::Abs),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Func::Exp => "exp",
            Func::Log => "log",
            Func::Sqrt => "sqrt",
            Func::Pow => "pow",
            Func::Abs => "abs",
        }
    }

    fn arity(self) -> usize {
        match self {
            Func::Pow => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Expression tree with parameters already folded into constants
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Const(f64),
    Arg(Argument),
    Neg(Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Call(Func, Vec<Expr>),
}

/// Argument values for one evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Arguments {
    pub q: f64,
    pub r: f64,
    pub s: f64,
    pub x: f64,
}

impl Arguments {
    fn get(&self, arg: Argument) -> f64 {
        match arg {
            Argument::Q => self.q,
            Argument::R => self.r,
            Argument::S => self.s,
            Argument::X => self.x,
        }
    }
}

impl Expr {
    pub fn eval(&self, args: &Arguments) -> f64 {
        match self {
            Expr::Const(value) => *value,
            Expr::Arg(arg) => args.get(*arg),
            Expr::Neg(inner) => -inner.eval(args),
            Expr::Binary(op, lhs, rhs) => {
                let (a, b) = (lhs.eval(args), rhs.eval(args));
                match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div => a / b,
                }
            }
            Expr::Call(func, operands) => {
                let a = operands[0].eval(args);
                match func {
                    Func::Exp => a.exp(),
                    Func::Log => a.ln(),
                    Func::Sqrt => a.sqrt(),
                    Func::Pow => a.powf(operands[1].eval(args)),
                    Func::Abs => a.abs(),
                }
            }
        }
    }

    /// Arguments referenced anywhere in the tree, in `q r s x` order
    pub fn arguments(&self) -> Vec<Argument> {
        let mut found = Vec::new();
        self.collect_arguments(&mut found);
        found.sort();
        found.dedup();
        found
    }

    fn collect_arguments(&self, found: &mut Vec<Argument>) {
        match self {
            Expr::Const(_) => {}
            Expr::Arg(arg) => found.push(*arg),
            Expr::Neg(inner) => inner.collect_arguments(found),
            Expr::Binary(_, lhs, rhs) => {
                lhs.collect_arguments(found);
                rhs.collect_arguments(found);
            }
            Expr::Call(_, operands) => operands.iter().for_each(|o| o.collect_arguments(found)),
        }
    }
}

/// A parsed expression together with its human readable form
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpr {
    pub display: String,
    pub expr: Expr,
}

/// Parse `source`, substituting parameter references with `parameters`.
///
/// The display form keeps the source text verbatim except that parameter
/// references become their values and member paths become bare argument
/// names, so `(1.0 - v->m->delta*v->r)` displays as `(1.0 - 0.9*r)`.
pub fn compile(source: &str, parameters: &Parameters) -> Result<CompiledExpr, ExprError> {
    let tokens = tokenize(source)?;
    let expr = Parser::new(&tokens, parameters).parse()?;

    let mut display = String::with_capacity(source.len());
    let mut copied = 0;
    for (i, token) in tokens.iter().enumerate() {
        let TokenKind::Ident(name) = &token.kind else {
            continue;
        };
        let is_call = tokens
            .get(i + 1)
            .is_some_and(|next| next.kind == TokenKind::LParen);
        let replacement = match Symbol::resolve(name) {
            Some(Symbol::Parameter(param)) if !is_call => format_shortest(parameters.get(param)),
            Some(Symbol::Argument(arg)) if !is_call => arg.name().to_string(),
            _ => continue,
        };
        display.push_str(&source[copied..token.span.start]);
        display.push_str(&replacement);
        copied = token.span.end;
    }
    display.push_str(&source[copied..]);

    Ok(CompiledExpr {
        display: display.trim().to_string(),
        expr,
    })
}
