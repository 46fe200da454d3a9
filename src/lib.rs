//! Dice-notation engine: parse a formula like `10d10r<=2kh6`, roll it against
//! any [`rand::Rng`], and render an annotated transcript of every die.
//!
//! ```
//! use hedrals::{FormatOptions, Limits};
//!
//! let spec = hedrals::parse("4d6dl", Limits::default())?;
//! let result = hedrals::evaluate(&spec, &mut rand::thread_rng())?;
//! println!("{}", hedrals::format(&result, &FormatOptions::default()));
//! # Ok::<(), hedrals::Error>(())
//! ```
//!
//! Parsing enforces the caller's [`Limits`] before any entropy is drawn, and
//! evaluation against a seeded roller is fully reproducible.

mod common;
mod error;
pub mod parse;
pub mod presets;
pub mod roll;

#[cfg(test)]
mod test_strategies;

pub use common::{
    BinaryOp, Comparison, DSize, Int, Limits, Modifier, NonEmpty, Predicate, CHAIN_LIMIT,
};
pub use error::Error;
pub use parse::{
    ast::{DiceTerm, Node, RollSpec},
    parse, ParseError, ParseErrorKind,
};
pub use roll::{
    evaluate, format, ConstantTerm, Contribution, DiceGroup, Die, DieRoll, DieState,
    FormatOptions, MarkdownStringifier, RollError, RollResult, Roller, SimpleStringifier,
    Stringify, TermRecord, TermValue,
};

/// Parse and evaluate `formula` in one step with a thread-local RNG.
pub fn roll(formula: &str, limits: Limits) -> Result<RollResult, Error> {
    let spec = parse::parse(formula, limits)?;
    let result = roll::evaluate(&spec, &mut rand::thread_rng())?;
    Ok(result)
}
