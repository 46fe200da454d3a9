use crate::common::*;
use std::fmt;
use vec1::vec1;

/// What happened to one physical die draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DieState {
    Kept,
    Dropped,
    ExplodedSource,
    ExplodedResult,
    RerolledSource,
    RerolledResult,
    Success,
    Failure,
}

impl DieState {
    /// Whether a roll in this state contributes to its term.
    ///
    /// `RerolledSource` rolls were replaced and `Dropped` rolls were removed;
    /// everything else still counts.
    pub fn counts(&self) -> bool {
        !matches!(self, Self::RerolledSource | Self::Dropped)
    }
}

/// One physical die draw. Records are appended, never edited: a reroll or
/// explosion adds a new record and retags its predecessor.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DieRoll {
    pub sides: DSize,
    pub value: DSize,
    pub state: DieState,
}

/// One nominal die from the formula: the initial draw plus its reroll chain.
/// The last roll in the chain is the die's current face.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Die {
    pub rolls: NonEmpty<DieRoll>,
}

impl Die {
    fn single(sides: DSize, value: DSize, state: DieState) -> Self {
        Self {
            rolls: vec1![DieRoll {
                sides,
                value,
                state,
            }],
        }
    }

    pub(crate) fn first(sides: DSize, value: DSize) -> Self {
        Self::single(sides, value, DieState::Kept)
    }

    pub(crate) fn exploded_result(sides: DSize, value: DSize) -> Self {
        Self::single(sides, value, DieState::ExplodedResult)
    }

    pub fn current(&self) -> &DieRoll {
        self.rolls.last()
    }

    pub fn value(&self) -> DSize {
        self.current().value
    }

    pub fn state(&self) -> DieState {
        self.current().state
    }

    /// Whether the die currently counts toward its term.
    pub fn is_active(&self) -> bool {
        self.state().counts()
    }

    pub(crate) fn set_state(&mut self, state: DieState) {
        self.rolls.last_mut().state = state;
    }

    /// Retag the current roll as replaced and chain a fresh draw onto it.
    pub(crate) fn reroll(&mut self, value: DSize, state: DieState) {
        let sides = self.current().sides;
        self.set_state(DieState::RerolledSource);
        self.rolls.push(DieRoll {
            sides,
            value,
            state,
        });
    }
}

/// The term's numeric contribution before its `+`/`-` sign is applied.
#[enum_dispatch::enum_dispatch]
pub trait Contribution {
    fn subtotal(&self) -> Int;
}

#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[enum_dispatch::enum_dispatch(Contribution)]
pub enum TermValue {
    Dice(DiceGroup),
    Constant(ConstantTerm),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantTerm {
    pub value: Int,
}

impl Contribution for ConstantTerm {
    fn subtotal(&self) -> Int {
        self.value
    }
}

/// Every die rolled for one dice term, explosions included, in roll order.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceGroup {
    pub count: usize,
    pub sides: DSize,
    pub modifiers: Vec<Modifier>,
    pub dice: Vec<Die>,
    /// Set when a success-counting modifier replaced the term's sum.
    pub successes: Option<usize>,
}

impl DiceGroup {
    pub fn active_dice(&self) -> impl Iterator<Item = &Die> {
        self.dice.iter().filter(|d| d.is_active())
    }
}

impl Contribution for DiceGroup {
    fn subtotal(&self) -> Int {
        if let Some(successes) = self.successes {
            return successes as Int;
        }
        self.active_dice().map(|d| d.value() as Int).sum()
    }
}

impl fmt::Display for DiceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        for m in &self.modifiers {
            write!(f, "{}", m)?;
        }
        Ok(())
    }
}

/// One top-level term of the expression, with its effective operator.
/// The first term of a formula always carries `Add`.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TermRecord {
    pub op: BinaryOp,
    pub value: TermValue,
}

/// The outcome of evaluating a [`RollSpec`](crate::RollSpec): the grand total
/// plus the full per-die trace, in term order.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollResult {
    pub total: Int,
    pub terms: Vec<TermRecord>,
    /// Plain one-line summary per term, in the same order as `terms`.
    pub summaries: Vec<String>,
}
