use crate::common::{BinaryOp, Comparison, DSize, Int, Modifier, Predicate};
use crate::parse::ast::{DiceTerm, Node, RollSpec};
use proptest::prelude::*;

pub(crate) fn predicate_strategy(sides: DSize) -> impl Strategy<Value = Predicate> {
    let cmp = prop_oneof![
        Just(Comparison::Less),
        Just(Comparison::LessEqual),
        Just(Comparison::Greater),
        Just(Comparison::GreaterEqual),
        Just(Comparison::Equal),
    ];
    (cmp, 1..=sides).prop_map(|(cmp, threshold)| Predicate::new(cmp, threshold))
}

pub(crate) fn modifier_strategy(sides: DSize) -> impl Strategy<Value = Modifier> {
    prop_oneof![
        (1..=4usize).prop_map(Modifier::KeepHighest),
        (1..=4usize).prop_map(Modifier::KeepLowest),
        (1..=4usize).prop_map(Modifier::DropHighest),
        (1..=4usize).prop_map(Modifier::DropLowest),
        (predicate_strategy(sides), any::<bool>())
            .prop_map(|(p, once)| Modifier::Reroll {
                predicate: Some(p),
                once,
            }),
        predicate_strategy(sides).prop_map(|p| Modifier::Explode(Some(p))),
        predicate_strategy(sides).prop_map(Modifier::CountSuccesses),
    ]
}

pub(crate) fn dice_term_strategy() -> impl Strategy<Value = DiceTerm> {
    (0..=12usize, 1..=20usize).prop_flat_map(|(count, sides)| {
        proptest::collection::vec(modifier_strategy(sides), 0..3)
            .prop_map(move |modifiers| DiceTerm::new(count, sides, modifiers))
    })
}

fn node_strategy() -> impl Strategy<Value = Node> {
    prop_oneof![
        4 => dice_term_strategy().prop_map(Node::Dice),
        1 => (0..=20 as Int).prop_map(Node::Constant),
    ]
}

fn binary_op_strategy() -> impl Strategy<Value = BinaryOp> {
    prop_oneof![Just(BinaryOp::Add), Just(BinaryOp::Sub)]
}

pub(crate) fn spec_strategy() -> impl Strategy<Value = RollSpec> {
    (
        node_strategy(),
        proptest::collection::vec((binary_op_strategy(), node_strategy()), 0..3),
    )
        .prop_map(|(first, rest)| {
            let root = rest.into_iter().fold(first, |lhs, (op, rhs)| {
                Node::Binary(Box::new(lhs), op, Box::new(rhs))
            });
            RollSpec { root }
        })
}
