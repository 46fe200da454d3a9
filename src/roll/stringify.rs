use super::result::{Contribution, DiceGroup, Die, DieRoll, DieState, RollResult, TermRecord, TermValue};
use crate::common::{BinaryOp, Int};

/// Renders a [`RollResult`] as a transcript. The trace is already fully
/// tagged, so rendering is a straight walk with no re-parsing.
pub trait Stringify {
    fn stringify(&mut self, result: &RollResult) -> String {
        self.str_result(result)
    }

    fn str_result(&mut self, result: &RollResult) -> String {
        let mut out = String::new();
        for (i, term) in result.terms.iter().enumerate() {
            if i == 0 {
                if term.op == BinaryOp::Sub {
                    out.push('-');
                }
            } else {
                out.push_str(match term.op {
                    BinaryOp::Add => " + ",
                    BinaryOp::Sub => " - ",
                });
            }
            out.push_str(&self.str_term(term));
        }
        out.push_str(" = ");
        out.push_str(&self.str_total(result.total));
        out
    }

    fn str_total(&mut self, total: Int) -> String {
        total.to_string()
    }

    fn str_term(&mut self, term: &TermRecord) -> String {
        match &term.value {
            TermValue::Dice(group) => self.str_group(group),
            TermValue::Constant(c) => c.value.to_string(),
        }
    }

    fn str_group(&mut self, group: &DiceGroup) -> String {
        let dice = group
            .dice
            .iter()
            .map(|d| self.str_die(d))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} ({})", group, dice)
    }

    fn str_die(&mut self, die: &Die) -> String {
        die.rolls
            .iter()
            .map(|r| self.str_die_roll(r))
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    fn str_die_roll(&mut self, roll: &DieRoll) -> String;
}

/// Plain-text transcript: dropped dice as `-n-`, exploded dice as `*n*`.
#[derive(Default)]
pub struct SimpleStringifier;

impl SimpleStringifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn summary(&mut self, term: &TermRecord) -> String {
        match &term.value {
            TermValue::Dice(_) => {
                format!("{} = {}", self.str_term(term), term.value.subtotal())
            }
            TermValue::Constant(c) => c.value.to_string(),
        }
    }
}

impl Stringify for SimpleStringifier {
    fn str_die_roll(&mut self, roll: &DieRoll) -> String {
        match roll.state {
            DieState::Dropped => format!("-{}-", roll.value),
            DieState::ExplodedSource => format!("*{}*", roll.value),
            _ => roll.value.to_string(),
        }
    }
}

/// Markdown transcript: dropped dice struck through, exploded dice bolded
/// with a bang, the total in backticks.
#[derive(Default)]
pub struct MarkdownStringifier {
    in_dropped: bool,
}

impl MarkdownStringifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stringify(&mut self, result: &RollResult) -> String {
        self.in_dropped = false;
        self.str_result(result)
    }
}

impl Stringify for MarkdownStringifier {
    fn str_total(&mut self, total: Int) -> String {
        format!("`{}`", total)
    }

    fn str_die(&mut self, die: &Die) -> String {
        if !die.is_active() && !self.in_dropped {
            // Strike the whole chain once; inner rolls render unstruck.
            self.in_dropped = true;
            let body = die
                .rolls
                .iter()
                .map(|r| self.str_die_roll(r))
                .collect::<Vec<_>>()
                .join(" -> ");
            self.in_dropped = false;
            format!("~~{}~~", body)
        } else {
            die.rolls
                .iter()
                .map(|r| self.str_die_roll(r))
                .collect::<Vec<_>>()
                .join(" -> ")
        }
    }

    fn str_die_roll(&mut self, roll: &DieRoll) -> String {
        match roll.state {
            DieState::ExplodedSource => format!("**{}!**", roll.value),
            DieState::RerolledSource if !self.in_dropped => format!("~~{}~~", roll.value),
            _ => roll.value.to_string(),
        }
    }
}

/// Display configuration for [`format`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FormatOptions {
    /// Longest transcript to emit before falling back to a placeholder.
    pub max_length: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self { max_length: 2000 }
    }
}

const TRUNCATED_LOG: &str = "*(roll log too long to display)*";

/// Render the markdown transcript, degrading to a placeholder (and finally
/// to the bare total) when the result would exceed `options.max_length`.
/// Never fails.
pub fn format(result: &RollResult, options: &FormatOptions) -> String {
    let full = MarkdownStringifier::new().stringify(result);
    if full.len() <= options.max_length {
        return full;
    }

    let short = format!("{} = `{}`", TRUNCATED_LOG, result.total);
    if short.len() <= options.max_length {
        short
    } else {
        format!("`{}`", result.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Limits;
    use crate::roll::roller::{SeqRoller, StepRoller};

    macro_rules! check {
        ($cls:ident, $input:expr, $expected:expr) => {
            let spec = crate::parse::parse($input, Limits::default()).unwrap();
            let mut roller = StepRoller::new(10, 1);
            let result = crate::roll::evaluate(&spec, &mut roller).unwrap();
            let mut stringifier = $cls::new();
            assert_eq!(&stringifier.stringify(&result), $expected);
        };
    }

    #[test]
    fn test_simple_stringify() {
        check!(SimpleStringifier, "2 + 3", "2 + 3 = 5");
        check!(SimpleStringifier, "2d20", "2d20 (10, 11) = 21");
        check!(SimpleStringifier, "2d20kh1", "2d20kh1 (-10-, 11) = 11");
        check!(
            SimpleStringifier,
            "4d4rr1 + 2d6!3 + 3",
            "4d4rr1 (2, 3, 4, 1 -> 2) + 2d6!3 (*3*, 4, 5) + 3 = 26"
        );
    }

    #[test]
    fn test_markdown_stringify() {
        check!(MarkdownStringifier, "2 + 3", "2 + 3 = `5`");
        check!(MarkdownStringifier, "2d20", "2d20 (10, 11) = `21`");
        check!(MarkdownStringifier, "2d20kh1", "2d20kh1 (~~10~~, 11) = `11`");
        check!(MarkdownStringifier, "4d6dl", "4d6dl1 (4, 5, 6, ~~1~~) = `15`");
        check!(
            MarkdownStringifier,
            "4d4rr1 + 2d6!3 + 3",
            "4d4rr1 (2, 3, 4, ~~1~~ -> 2) + 2d6!3 (**3!**, 4, 5) + 3 = `26`"
        );
        check!(MarkdownStringifier, "1d20 - 2", "1d20 (10) - 2 = `8`");
    }

    #[test]
    fn test_drop_lowest_round_trip() {
        let spec = crate::parse::parse("4d6dl", Limits::default()).unwrap();
        let result =
            crate::roll::evaluate(&spec, &mut SeqRoller::new([4, 1, 3, 5])).unwrap();
        let rendered = format(&result, &FormatOptions::default());

        // Exactly one die struck through, and the total is the kept sum.
        assert_eq!(rendered.matches("~~").count(), 2);
        assert!(rendered.contains("~~1~~"));
        assert!(rendered.ends_with("= `12`"));
    }

    #[test]
    fn test_format_truncation() {
        let spec = crate::parse::parse("10d10", Limits::default()).unwrap();
        let result = crate::roll::evaluate(&spec, &mut StepRoller::new(10, 1)).unwrap();

        let full = format(&result, &FormatOptions::default());
        assert!(full.starts_with("10d10 ("));

        let short = format(&result, &FormatOptions { max_length: 40 });
        assert_eq!(short, "*(roll log too long to display)* = `55`");

        let bare = format(&result, &FormatOptions { max_length: 10 });
        assert_eq!(bare, "`55`");
    }
}
