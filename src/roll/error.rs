use crate::common::CHAIN_LIMIT;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RollError {
    #[error("explosion chain in '{term}' exceeded {} rolls", CHAIN_LIMIT)]
    ExplosionRunaway { term: String },
}
