use crate::common::*;
use std::fmt;

/// A parsed, bounds-checked dice formula, ready to roll.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollSpec {
    pub root: Node,
}

impl fmt::Display for RollSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    Constant(Int),
    Dice(DiceTerm),
    Binary(Box<Node>, BinaryOp, Box<Node>),
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(x) => write!(f, "{}", x),
            Self::Dice(term) => write!(f, "{}", term),
            Self::Binary(l, op, r) => write!(f, "{} {} {}", l, op, r),
        }
    }
}

/// One dice group: `<count>d<sides>` plus its modifiers in written order.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceTerm {
    pub count: usize,
    pub sides: DSize,
    pub modifiers: Vec<Modifier>,
}

impl DiceTerm {
    pub fn new(count: usize, sides: DSize, modifiers: Vec<Modifier>) -> Self {
        Self {
            count,
            sides,
            modifiers,
        }
    }
}

impl fmt::Display for DiceTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        for m in &self.modifiers {
            write!(f, "{}", m)?;
        }
        Ok(())
    }
}
