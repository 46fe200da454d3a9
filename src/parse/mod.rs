pub mod ast;
mod lexer;
mod parser;

pub use parser::{ParseError, ParseErrorKind};

use crate::common::Limits;
use self::ast::RollSpec;

/// Parse a dice formula into a [`RollSpec`], enforcing `limits` before any
/// randomness is drawn.
pub fn parse(formula: &str, limits: Limits) -> Result<RollSpec, ParseError> {
    tracing::trace!(formula, "parsing dice formula");
    parser::Parser::new(formula, limits).parse()
}
