//! Equation compilation and evaluation.
//!
//! An [`Expression`] is a compiled function of the two variables `x` and `y`.
//! Compilation is strict: malformed input and references to unknown symbols
//! fail with [`Error::Parse`] before any sampling happens. Evaluation is
//! infallible by contract; arithmetic anomalies (division by zero, domain
//! errors) surface as `NaN` or `±inf` and any residual evaluator error folds
//! into `NaN` so the sampler can classify the sample downstream.
use std::fmt;

use fasteval::{Compiler, Evaler};

use crate::error::{Error, Result};

/// A compiled equation `z = f(x, y)`.
///
/// Besides `x` and `y`, the constants `e` and `pi` and the evaluator's
/// standard operators and functions (`+ - * / % ^`, `sin`, `cos`, `log`,
/// `abs`, `min`, `max`, ...) are recognized.
pub struct Expression {
    source: String,
    slab: fasteval::Slab,
    instruction: fasteval::Instruction,
}

impl Expression {
    /// Compiles an equation string, failing on malformed input or unknown symbols.
    pub fn compile(source: &str) -> Result<Self> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(Error::Parse("empty equation".into()));
        }

        let parser = fasteval::Parser::new();
        let mut slab = fasteval::Slab::new();
        let instruction = parser
            .parse(trimmed, &mut slab.ps)
            .map_err(|e| Error::Parse(format!("{:?}", e)))?
            .from(&slab.ps)
            .compile(&slab.ps, &mut slab.cs);

        let expression = Self {
            source: trimmed.to_owned(),
            slab,
            instruction,
        };
        expression.probe()?;
        Ok(expression)
    }

    /// The equation text this expression was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluates the expression at `(x, y)`.
    ///
    /// Never fails: evaluator-level errors are folded into `NaN`.
    pub fn eval(&self, x: f32, y: f32) -> f32 {
        match self.try_eval(f64::from(x), f64::from(y)) {
            Ok(z) => z as f32,
            Err(_) => f32::NAN,
        }
    }

    fn try_eval(&self, x: f64, y: f64) -> std::result::Result<f64, fasteval::Error> {
        let mut ns = |name: &str, args: Vec<f64>| -> Option<f64> {
            if !args.is_empty() {
                return None;
            }
            match name {
                "x" => Some(x),
                "y" => Some(y),
                "pi" => Some(std::f64::consts::PI),
                "e" => Some(std::f64::consts::E),
                _ => None,
            }
        };
        self.instruction.eval(&self.slab, &mut ns)
    }

    // One-shot evaluation so undefined symbols fail here, not mid-sampling.
    fn probe(&self) -> Result<()> {
        match self.try_eval(0.0, 0.0) {
            Ok(_) => Ok(()),
            Err(fasteval::Error::Undefined(name)) => {
                Err(Error::Parse(format!("undefined symbol '{}'", name)))
            }
            Err(e) => Err(Error::Parse(format!("{:?}", e))),
        }
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expression")
            .field("source", &self.source)
            .finish()
    }
}
