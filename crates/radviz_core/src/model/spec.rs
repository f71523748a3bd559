//! The model's functional specification: utility, cost, radius transition and
//! wealth transition, read from the solver's `fncs` text file.
//!
//! Each line has the form `name = expression`. Lines for other names are
//! ignored; every one of the four functions must be present.

use std::fmt;
use std::path::Path;

use crate::error::{LoadError, Result, SpecError};
use crate::expr::{Argument, Arguments, Expr, ExprError, compile};

use super::Parameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    /// Temporal utility `u(q, r, s)`
    Util,
    /// Attentional costs `c(r, s)`
    Cost,
    /// Radius transition `r'(r, s)`
    Radt,
    /// Wealth transition `x'(q, r, s, x)`
    Wltt,
}

impl FunctionKind {
    pub const ALL: [FunctionKind; 4] = [
        FunctionKind::Util,
        FunctionKind::Cost,
        FunctionKind::Radt,
        FunctionKind::Wltt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FunctionKind::Util => "util",
            FunctionKind::Cost => "cost",
            FunctionKind::Radt => "radt",
            FunctionKind::Wltt => "wltt",
        }
    }

    /// Positional arguments accepted by the function
    pub fn signature(self) -> &'static [Argument] {
        match self {
            FunctionKind::Util => &[Argument::Q, Argument::R, Argument::S],
            FunctionKind::Cost | FunctionKind::Radt => &[Argument::R, Argument::S],
            FunctionKind::Wltt => &[Argument::Q, Argument::R, Argument::S, Argument::X],
        }
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One function of the specification, callable with its positional arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    kind: FunctionKind,
    source: String,
    display: String,
    expr: Expr,
}

impl Function {
    /// Compile `source`, rejecting references to arguments outside the
    /// function's signature.
    pub fn compile(
        kind: FunctionKind,
        source: &str,
        parameters: &Parameters,
    ) -> std::result::Result<Self, ExprError> {
        let compiled = compile(source, parameters)?;
        let signature = kind.signature();
        if let Some(&argument) = compiled
            .expr
            .arguments()
            .iter()
            .find(|a| !signature.contains(a))
        {
            return Err(ExprError::UnboundArgument {
                argument,
                function: kind.name(),
                signature: signature
                    .iter()
                    .map(|a| a.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
        Ok(Self {
            kind,
            source: source.trim().to_string(),
            display: compiled.display,
            expr: compiled.expr,
        })
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    /// The expression as written by the solver
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The expression with parameter values substituted
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Evaluate with positional arguments in signature order.
    pub fn call(&self, values: &[f64]) -> std::result::Result<f64, ExprError> {
        let signature = self.kind.signature();
        if values.len() != signature.len() {
            return Err(ExprError::ArgumentCount {
                function: self.kind.name(),
                expected: signature.len(),
                found: values.len(),
            });
        }
        let mut args = Arguments::default();
        for (arg, &value) in signature.iter().zip(values) {
            match arg {
                Argument::Q => args.q = value,
                Argument::R => args.r = value,
                Argument::S => args.s = value,
                Argument::X => args.x = value,
            }
        }
        Ok(self.expr.eval(&args))
    }

    pub fn eval(&self, args: &Arguments) -> f64 {
        self.expr.eval(args)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Specification {
    util: Function,
    cost: Function,
    radt: Function,
    wltt: Function,
}

impl Specification {
    /// Parse the text of a specification file.
    pub fn parse(text: &str, parameters: &Parameters) -> std::result::Result<Self, SpecError> {
        let mut found: [Option<Function>; 4] = Default::default();

        for line in text.lines() {
            let Some((slot, kind)) = FunctionKind::ALL
                .iter()
                .enumerate()
                .find(|(_, kind)| line.starts_with(kind.name()))
            else {
                continue;
            };
            let Some((_, body)) = line.split_once('=') else {
                tracing::warn!(line, "Skipping specification line without '='");
                continue;
            };
            let function = Function::compile(*kind, body, parameters)
                .map_err(|source| SpecError::Expression { kind: *kind, source })?;
            found[slot] = Some(function);
        }

        let [util, cost, radt, wltt] = found;
        let take = |f: Option<Function>, kind| f.ok_or(SpecError::MissingFunction(kind));
        Ok(Self {
            util: take(util, FunctionKind::Util)?,
            cost: take(cost, FunctionKind::Cost)?,
            radt: take(radt, FunctionKind::Radt)?,
            wltt: take(wltt, FunctionKind::Wltt)?,
        })
    }

    /// Read and parse a specification file.
    pub fn load(path: impl AsRef<Path>, parameters: &Parameters) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        Self::parse(&text, parameters).map_err(|source| LoadError::Specification {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Render the specification in the solver's `name = expression` format.
    pub fn to_file_string(&self) -> String {
        FunctionKind::ALL
            .iter()
            .map(|&kind| format!("{} = {}\n", kind.name(), self.function(kind).source()))
            .collect()
    }

    pub fn function(&self, kind: FunctionKind) -> &Function {
        match kind {
            FunctionKind::Util => &self.util,
            FunctionKind::Cost => &self.cost,
            FunctionKind::Radt => &self.radt,
            FunctionKind::Wltt => &self.wltt,
        }
    }

    pub fn util(&self, q: f64, r: f64, s: f64) -> f64 {
        self.util.eval(&Arguments { q, r, s, x: 0.0 })
    }

    pub fn cost(&self, r: f64, s: f64) -> f64 {
        self.cost.eval(&Arguments {
            r,
            s,
            ..Default::default()
        })
    }

    pub fn radt(&self, r: f64, s: f64) -> f64 {
        self.radt.eval(&Arguments {
            r,
            s,
            ..Default::default()
        })
    }

    pub fn wltt(&self, q: f64, r: f64, s: f64, x: f64) -> f64 {
        self.wltt.eval(&Arguments { q, r, s, x })
    }
}
