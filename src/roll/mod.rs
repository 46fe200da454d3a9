mod error;
mod exec;
mod result;
mod roller;
mod stringify;

use crate::parse::ast::RollSpec;

pub use error::RollError;
pub use result::{
    ConstantTerm, Contribution, DiceGroup, Die, DieRoll, DieState, RollResult, TermRecord,
    TermValue,
};
pub use roller::Roller;
#[cfg(test)]
pub(crate) use roller::SeqRoller;
pub use stringify::{format, FormatOptions, MarkdownStringifier, SimpleStringifier, Stringify};

/// Evaluate a parsed spec against `roller`, drawing one die at a time in term
/// order. A seeded roller reproduces the identical result.
pub fn evaluate<R: Roller>(spec: &RollSpec, roller: &mut R) -> Result<RollResult, RollError> {
    let result = exec::eval_spec(spec, roller)?;
    tracing::debug!(
        total = result.total,
        terms = result.terms.len(),
        "evaluated roll"
    );
    Ok(result)
}
