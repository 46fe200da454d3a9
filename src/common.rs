use std::fmt::{self, Write};

/// The type used for die faces and rolled values.
pub type DSize = usize;

/// The type used for totals, subtotals, and constant terms.
pub type Int = i64;

pub type NonEmpty<T> = vec1::Vec1<T>;

/// Longest reroll or explosion chain a single die may produce.
///
/// Explosion chains that would grow past this raise
/// [`RollError::ExplosionRunaway`](crate::RollError::ExplosionRunaway);
/// reroll chains stop and keep their final value.
pub const CHAIN_LIMIT: usize = 100;

/// Upper bounds a formula must satisfy before any die is rolled.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limits {
    /// Most dice a single term may roll.
    pub max_dice: usize,
    /// Most faces a single die may have.
    pub max_sides: DSize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_dice: 10_000,
            max_sides: 10_000,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    Add,
    Sub,
}

impl BinaryOp {
    /// Effective operator of a term nested under `self`.
    pub(crate) fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Self::Add, x) => x,
            (Self::Sub, Self::Add) => Self::Sub,
            (Self::Sub, Self::Sub) => Self::Add,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Add => '+',
            Self::Sub => '-',
        };
        f.write_char(c)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comparison {
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
}

impl Comparison {
    pub fn matches(self, value: DSize, threshold: DSize) -> bool {
        match self {
            Self::Less => value < threshold,
            Self::LessEqual => value <= threshold,
            Self::Greater => value > threshold,
            Self::GreaterEqual => value >= threshold,
            Self::Equal => value == threshold,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Equal => "=",
        };
        f.write_str(s)
    }
}

/// A comparison against a threshold, e.g. the `<=2` in `10d10r<=2`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Predicate {
    pub cmp: Comparison,
    pub threshold: DSize,
}

impl Predicate {
    pub fn new(cmp: Comparison, threshold: DSize) -> Self {
        Self { cmp, threshold }
    }

    pub fn equal(threshold: DSize) -> Self {
        Self::new(Comparison::Equal, threshold)
    }

    pub fn matches(&self, value: DSize) -> bool {
        self.cmp.matches(value, self.threshold)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Equality is written as a bare number in dice notation: `r1`, not `r=1`.
        match self.cmp {
            Comparison::Equal => write!(f, "{}", self.threshold),
            cmp => write!(f, "{}{}", cmp, self.threshold),
        }
    }
}

/// A dice operator as written, in written order.
///
/// `Reroll`/`Explode` predicates are optional: a bare `r` rerolls 1s and a
/// bare `!` explodes on the maximum face, resolved against the term's sides
/// at roll time.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Modifier {
    KeepHighest(usize),
    KeepLowest(usize),
    DropHighest(usize),
    DropLowest(usize),
    Reroll {
        predicate: Option<Predicate>,
        /// `rr`: apply once and keep the new value even if it still matches.
        once: bool,
    },
    Explode(Option<Predicate>),
    CountSuccesses(Predicate),
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeepHighest(n) => write!(f, "kh{}", n),
            Self::KeepLowest(n) => write!(f, "kl{}", n),
            Self::DropHighest(n) => write!(f, "dh{}", n),
            Self::DropLowest(n) => write!(f, "dl{}", n),
            Self::Reroll { predicate, once } => {
                f.write_str(if *once { "rr" } else { "r" })?;
                if let Some(p) = predicate {
                    write!(f, "{}", p)?;
                }
                Ok(())
            }
            Self::Explode(predicate) => {
                f.write_char('!')?;
                if let Some(p) = predicate {
                    write!(f, "{}", p)?;
                }
                Ok(())
            }
            Self::CountSuccesses(p) => write!(f, "c{}", p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_matches() {
        assert!(Predicate::new(Comparison::LessEqual, 2).matches(2));
        assert!(!Predicate::new(Comparison::Less, 2).matches(2));
        assert!(Predicate::equal(6).matches(6));
        assert!(Predicate::new(Comparison::Greater, 4).matches(5));
        assert!(!Predicate::new(Comparison::GreaterEqual, 4).matches(3));
    }

    #[test]
    fn test_modifier_notation() {
        assert_eq!(Modifier::KeepHighest(1).to_string(), "kh1");
        assert_eq!(Modifier::DropLowest(2).to_string(), "dl2");
        assert_eq!(
            Modifier::Reroll {
                predicate: Some(Predicate::new(Comparison::LessEqual, 2)),
                once: false
            }
            .to_string(),
            "r<=2"
        );
        assert_eq!(
            Modifier::Reroll {
                predicate: Some(Predicate::equal(1)),
                once: true
            }
            .to_string(),
            "rr1"
        );
        assert_eq!(Modifier::Explode(None).to_string(), "!");
        assert_eq!(
            Modifier::CountSuccesses(Predicate::new(Comparison::Greater, 4)).to_string(),
            "c>4"
        );
    }

    #[test]
    fn test_combine_signs() {
        assert_eq!(BinaryOp::Add.combine(BinaryOp::Sub), BinaryOp::Sub);
        assert_eq!(BinaryOp::Sub.combine(BinaryOp::Sub), BinaryOp::Add);
        assert_eq!(BinaryOp::Sub.combine(BinaryOp::Add), BinaryOp::Sub);
    }
}
