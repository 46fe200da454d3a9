use super::{error::RollError, result::*, roller::Roller, stringify::SimpleStringifier};
use crate::common::*;
use crate::parse::ast::{DiceTerm, Node, RollSpec};
use std::collections::HashSet;

pub(crate) fn eval_spec<R: Roller>(
    spec: &RollSpec,
    roller: &mut R,
) -> Result<RollResult, RollError> {
    let mut terms = Vec::new();
    eval_node(&spec.root, BinaryOp::Add, &mut terms, roller)?;

    let total = terms
        .iter()
        .map(|t| match t.op {
            BinaryOp::Add => t.value.subtotal(),
            BinaryOp::Sub => -t.value.subtotal(),
        })
        .sum();

    let mut simple = SimpleStringifier::new();
    let summaries = terms.iter().map(|t| simple.summary(t)).collect();

    Ok(RollResult {
        total,
        terms,
        summaries,
    })
}

fn eval_node<R: Roller>(
    node: &Node,
    op: BinaryOp,
    out: &mut Vec<TermRecord>,
    roller: &mut R,
) -> Result<(), RollError> {
    match node {
        Node::Constant(value) => out.push(TermRecord {
            op,
            value: ConstantTerm { value: *value }.into(),
        }),
        Node::Dice(term) => {
            let group = roll_group(term, roller)?;
            out.push(TermRecord {
                op,
                value: group.into(),
            });
        }
        Node::Binary(left, inner, right) => {
            eval_node(left, op, out, roller)?;
            eval_node(right, op.combine(*inner), out, roller)?;
        }
    }
    Ok(())
}

fn roll_group<R: Roller>(term: &DiceTerm, roller: &mut R) -> Result<DiceGroup, RollError> {
    let mut group = DiceGroup {
        count: term.count,
        sides: term.sides,
        modifiers: term.modifiers.clone(),
        dice: (0..term.count)
            .map(|_| Die::first(term.sides, roller.roll(term.sides)))
            .collect(),
        successes: None,
    };

    // Success counting is deferred so it sees the post-keep/drop set;
    // everything else applies in written order.
    let mut count_predicate = None;
    for modifier in &term.modifiers {
        match *modifier {
            Modifier::KeepHighest(n) => {
                let selected = select_highest(&group, n);
                retain(&mut group, &selected);
            }
            Modifier::KeepLowest(n) => {
                let selected = select_lowest(&group, n);
                retain(&mut group, &selected);
            }
            Modifier::DropHighest(n) => {
                let selected = select_highest(&group, n);
                discard(&mut group, &selected);
            }
            Modifier::DropLowest(n) => {
                let selected = select_lowest(&group, n);
                discard(&mut group, &selected);
            }
            Modifier::Reroll { predicate, once } => {
                let predicate = predicate.unwrap_or_else(|| Predicate::equal(1));
                if once {
                    reroll_once(&mut group, predicate, roller);
                } else {
                    reroll(&mut group, predicate, roller);
                }
            }
            Modifier::Explode(predicate) => {
                let predicate = predicate.unwrap_or_else(|| Predicate::equal(group.sides));
                explode(&mut group, predicate, roller)?;
            }
            Modifier::CountSuccesses(predicate) => count_predicate = Some(predicate),
        }
    }
    if let Some(predicate) = count_predicate {
        count_successes(&mut group, predicate);
    }

    Ok(group)
}

fn active_indices(group: &DiceGroup) -> Vec<usize> {
    (0..group.dice.len())
        .filter(|&i| group.dice[i].is_active())
        .collect()
}

// Selection is stable on ties: the earliest-rolled die wins in both directions.
fn select_highest(group: &DiceGroup, n: usize) -> HashSet<usize> {
    let mut indices = active_indices(group);
    indices.sort_by(|&a, &b| group.dice[b].value().cmp(&group.dice[a].value()));
    indices.truncate(n);
    indices.into_iter().collect()
}

fn select_lowest(group: &DiceGroup, n: usize) -> HashSet<usize> {
    let mut indices = active_indices(group);
    indices.sort_by(|&a, &b| group.dice[a].value().cmp(&group.dice[b].value()));
    indices.truncate(n);
    indices.into_iter().collect()
}

fn retain(group: &mut DiceGroup, selected: &HashSet<usize>) {
    for i in active_indices(group) {
        if !selected.contains(&i) {
            group.dice[i].set_state(DieState::Dropped);
        }
    }
}

fn discard(group: &mut DiceGroup, selected: &HashSet<usize>) {
    for &i in selected {
        group.dice[i].set_state(DieState::Dropped);
    }
}

fn reroll_once<R: Roller>(group: &mut DiceGroup, predicate: Predicate, roller: &mut R) {
    for i in active_indices(group) {
        if predicate.matches(group.dice[i].value()) {
            let value = roller.roll(group.sides);
            group.dice[i].reroll(value, DieState::Kept);
        }
    }
}

fn reroll<R: Roller>(group: &mut DiceGroup, predicate: Predicate, roller: &mut R) {
    // Bounded so an always-matching predicate cannot spin forever; a die that
    // still matches at the chain cap keeps its final value.
    for _ in 0..CHAIN_LIMIT {
        let matching: Vec<usize> = active_indices(group)
            .into_iter()
            .filter(|&i| predicate.matches(group.dice[i].value()))
            .collect();
        if matching.is_empty() {
            return;
        }
        for i in matching {
            let value = roller.roll(group.sides);
            group.dice[i].reroll(value, DieState::RerolledResult);
        }
    }
}

fn explode<R: Roller>(
    group: &mut DiceGroup,
    predicate: Predicate,
    roller: &mut R,
) -> Result<(), RollError> {
    let mut already_exploded = HashSet::new();
    let mut rounds = 0;

    loop {
        let triggers: Vec<usize> = active_indices(group)
            .into_iter()
            .filter(|&i| {
                predicate.matches(group.dice[i].value()) && !already_exploded.contains(&i)
            })
            .collect();
        if triggers.is_empty() {
            return Ok(());
        }
        if rounds == CHAIN_LIMIT {
            return Err(RollError::ExplosionRunaway {
                term: group.to_string(),
            });
        }
        rounds += 1;

        for i in triggers {
            already_exploded.insert(i);
            group.dice[i].set_state(DieState::ExplodedSource);
            let value = roller.roll(group.sides);
            group.dice.push(Die::exploded_result(group.sides, value));
        }
    }
}

fn count_successes(group: &mut DiceGroup, predicate: Predicate) {
    let mut successes = 0;
    for i in active_indices(group) {
        if predicate.matches(group.dice[i].value()) {
            successes += 1;
            group.dice[i].set_state(DieState::Success);
        } else {
            group.dice[i].set_state(DieState::Failure);
        }
    }
    group.successes = Some(successes);
}
