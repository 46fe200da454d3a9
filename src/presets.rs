//! Prepared rolls built directly as specs, no parsing involved.

use crate::common::{BinaryOp, DSize, Int, Modifier};
use crate::parse::ast::{DiceTerm, Node, RollSpec};
use crate::roll::{evaluate, RollError, RollResult, Roller};
use std::fmt;
use std::ops::RangeInclusive;

fn dice_spec(count: usize, sides: DSize, modifiers: Vec<Modifier>) -> RollSpec {
    RollSpec {
        root: Node::Dice(DiceTerm::new(count, sides, modifiers)),
    }
}

/// 2d20, drop the lowest.
pub fn advantage<R: Roller>(roller: &mut R) -> Result<RollResult, RollError> {
    evaluate(&dice_spec(2, 20, vec![Modifier::DropLowest(1)]), roller)
}

/// 2d20, drop the highest.
pub fn disadvantage<R: Roller>(roller: &mut R) -> Result<RollResult, RollError> {
    evaluate(&dice_spec(2, 20, vec![Modifier::DropHighest(1)]), roller)
}

/// 1d20 plus a flat modifier.
pub fn quick_roll<R: Roller>(roller: &mut R, modifier: Int) -> Result<RollResult, RollError> {
    let d20 = Node::Dice(DiceTerm::new(1, 20, vec![]));
    let root = match modifier {
        0 => d20,
        m if m > 0 => Node::Binary(Box::new(d20), BinaryOp::Add, Box::new(Node::Constant(m))),
        m => Node::Binary(Box::new(d20), BinaryOp::Sub, Box::new(Node::Constant(-m))),
    };
    evaluate(&RollSpec { root }, roller)
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Coin {
    Heads,
    Tails,
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Heads => "heads",
            Self::Tails => "tails",
        })
    }
}

/// A 1d2 flip: 1 is heads, 2 is tails.
pub fn coin_flip<R: Roller>(roller: &mut R) -> Coin {
    if roller.roll(2) == 1 {
        Coin::Heads
    } else {
        Coin::Tails
    }
}

/// Totals a six-stat 4d6dl array can reach.
const ARRAY_TOTALS: RangeInclusive<Int> = 18..=108;

/// Accepted range for an ability score array: the total must fall strictly
/// between `min_total` and `max_total`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AbilityScoreOptions {
    min_total: Int,
    max_total: Int,
}

impl AbilityScoreOptions {
    /// `None` when no reachable array total satisfies the open interval,
    /// which would make [`ability_scores`] redraw forever.
    pub fn new(min_total: Int, max_total: Int) -> Option<Self> {
        let lo = (min_total + 1).max(*ARRAY_TOTALS.start());
        let hi = (max_total - 1).min(*ARRAY_TOTALS.end());
        (lo <= hi).then(|| Self {
            min_total,
            max_total,
        })
    }

    pub fn min_total(&self) -> Int {
        self.min_total
    }

    pub fn max_total(&self) -> Int {
        self.max_total
    }
}

impl Default for AbilityScoreOptions {
    fn default() -> Self {
        Self {
            min_total: 66,
            max_total: 78,
        }
    }
}

/// Roll an ability score array: six 4d6-drop-lowest sums, redrawn as a whole
/// until the array total falls inside the accepted range.
pub fn ability_scores<R: Roller>(
    roller: &mut R,
    options: AbilityScoreOptions,
) -> Result<Vec<RollResult>, RollError> {
    let stat = dice_spec(4, 6, vec![Modifier::DropLowest(1)]);

    loop {
        let rolls = (0..6)
            .map(|_| evaluate(&stat, roller))
            .collect::<Result<Vec<_>, _>>()?;
        let total: Int = rolls.iter().map(|r| r.total).sum();
        if total > options.min_total && total < options.max_total {
            return Ok(rolls);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::SeqRoller;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_advantage_keeps_higher() {
        let result = advantage(&mut SeqRoller::new([15, 8])).unwrap();
        assert_eq!(result.total, 15);

        let result = advantage(&mut SeqRoller::new([3, 17])).unwrap();
        assert_eq!(result.total, 17);
    }

    #[test]
    fn test_disadvantage_keeps_lower() {
        let result = disadvantage(&mut SeqRoller::new([15, 8])).unwrap();
        assert_eq!(result.total, 8);
    }

    #[test]
    fn test_quick_roll_modifier() {
        let result = quick_roll(&mut SeqRoller::new([13]), 4).unwrap();
        assert_eq!(result.total, 17);

        let result = quick_roll(&mut SeqRoller::new([13]), -4).unwrap();
        assert_eq!(result.total, 9);

        let result = quick_roll(&mut SeqRoller::new([13]), 0).unwrap();
        assert_eq!(result.total, 13);
        assert_eq!(result.terms.len(), 1);
    }

    #[test]
    fn test_coin_flip() {
        assert_eq!(coin_flip(&mut SeqRoller::new([1])), Coin::Heads);
        assert_eq!(coin_flip(&mut SeqRoller::new([2])), Coin::Tails);
    }

    #[test]
    fn test_ability_score_options() {
        assert!(AbilityScoreOptions::new(66, 78).is_some());
        // Empty open interval.
        assert!(AbilityScoreOptions::new(70, 71).is_none());
        // Unreachable totals.
        assert!(AbilityScoreOptions::new(200, 300).is_none());
        assert!(AbilityScoreOptions::new(0, 10).is_none());
    }

    #[test]
    fn test_ability_scores_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let options = AbilityScoreOptions::default();
        let rolls = ability_scores(&mut rng, options).unwrap();

        assert_eq!(rolls.len(), 6);
        let total: Int = rolls.iter().map(|r| r.total).sum();
        assert!(total > options.min_total() && total < options.max_total());

        for roll in &rolls {
            assert!((3..=18).contains(&roll.total));
            match &roll.terms[0].value {
                crate::roll::TermValue::Dice(g) => {
                    assert_eq!(g.dice.len(), 4);
                    assert_eq!(g.dice.iter().filter(|d| !d.is_active()).count(), 1);
                }
                other => panic!("expected a dice group, got {:?}", other),
            }
        }
    }
}
