use crate::parse::ParseError;
use crate::roll::RollError;

/// Any error the engine can produce, for callers that chain
/// parse and evaluate in one step.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Roll(#[from] RollError),
}
