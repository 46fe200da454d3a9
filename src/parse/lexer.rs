use crate::common::DSize;
use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};
use std::fmt;

pub type Lexer<'a> = PeekableLexer<'a, LogosLexer<'a, TokenKind>, TokenKind>;

pub fn lexer(s: &str) -> Lexer {
    TokenKind::lexer(s).peekable_lexer()
}

#[derive(Logos, Debug, Copy, Clone, PartialEq)]
pub enum TokenKind {
    #[regex(r"[0-9]+", |lex| lex.slice().parse().unwrap_or(DSize::MAX))]
    Integer(DSize),

    #[regex(r"[0-9]*[dD][0-9]+", |lex| parse_dice_lit(lex.slice()))]
    Dice(DiceLit),

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,

    #[token("kh", ignore(ascii_case))]
    KeepHighest,
    #[token("kl", ignore(ascii_case))]
    KeepLowest,
    #[token("dh", ignore(ascii_case))]
    DropHighest,
    #[token("dl", ignore(ascii_case))]
    DropLowest,
    #[token("rr", ignore(ascii_case))]
    RerollKeep,
    #[token("r", ignore(ascii_case))]
    Reroll,
    #[token("!")]
    Explode,
    #[token("c", ignore(ascii_case))]
    Count,

    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("<")]
    LessThan,
    #[token(">")]
    GreaterThan,
    #[token("=")]
    Equal,

    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;

        match self {
            Integer(_) => "<integer>",
            Dice(_) => "<dice>",
            Plus => "'+'",
            Minus => "'-'",
            KeepHighest => "'kh'",
            KeepLowest => "'kl'",
            DropHighest => "'dh'",
            DropLowest => "'dl'",
            RerollKeep => "'rr'",
            Reroll => "'r'",
            Explode => "'!'",
            Count => "'c'",
            LessEqual => "'<='",
            GreaterEqual => "'>='",
            LessThan => "'<'",
            GreaterThan => "'>'",
            Equal => "'='",
            Error => "<error>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw `<count>d<sides>` literal, bounds-checked by the parser.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DiceLit {
    pub count: usize,
    pub sides: DSize,
}

// `unwrap` can be used because logos has verified the slice is digits-d-digits.
// Oversized literals saturate so the parser can report them as bounds errors.
fn parse_dice_lit(s: &str) -> DiceLit {
    let (count, sides) = s.split_once(|c| c == 'd' || c == 'D').unwrap();
    let count = if count.is_empty() {
        1
    } else {
        count.parse().unwrap_or(usize::MAX)
    };
    let sides = sides.parse().unwrap_or(DSize::MAX);
    DiceLit { count, sides }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(s: &str) -> Vec<TokenKind> {
        TokenKind::lexer(s).collect()
    }

    fn dice(count: usize, sides: DSize) -> TokenKind {
        TokenKind::Dice(DiceLit { count, sides })
    }

    #[test]
    fn test_lex_dice() {
        assert_eq!(lex("2d20"), vec![dice(2, 20)]);
        assert_eq!(lex("d6"), vec![dice(1, 6)]);
        assert_eq!(lex("0d6"), vec![dice(0, 6)]);
        assert_eq!(lex("1D8"), vec![dice(1, 8)]);
    }

    #[test]
    fn test_lex_modifiers() {
        use TokenKind::*;

        assert_eq!(
            lex("10d10r<=2kh6"),
            vec![
                dice(10, 10),
                Reroll,
                LessEqual,
                Integer(2),
                KeepHighest,
                Integer(6),
            ]
        );
        assert_eq!(lex("4d6rdl"), vec![dice(4, 6), Reroll, DropLowest]);
        assert_eq!(
            lex("4d4!+2"),
            vec![dice(4, 4), Explode, Plus, Integer(2)]
        );
        assert_eq!(
            lex("6d6c>4"),
            vec![dice(6, 6), Count, GreaterThan, Integer(4)]
        );
        assert_eq!(
            lex("2d6rr1"),
            vec![dice(2, 6), RerollKeep, Integer(1)]
        );
    }

    #[test]
    fn test_lex_case_insensitive() {
        use TokenKind::*;

        assert_eq!(
            lex("2D20KH1"),
            vec![dice(2, 20), KeepHighest, Integer(1)]
        );
    }

    #[test]
    fn test_lex_unknown() {
        use TokenKind::*;

        assert_eq!(lex("4d6z"), vec![dice(4, 6), Error]);
    }
}
