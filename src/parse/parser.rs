use super::{ast::*, lexer::*};
use crate::common::*;
use logos_iter::LogosIter;
use std::fmt;
use std::ops::Range;

type PResult<T> = Result<T, ParseError>;

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("error at position {} ({slice:?}): {kind}", .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Range<usize>,
    pub slice: String,
}

#[derive(Debug, PartialEq)]
pub enum ParseErrorKind {
    UnexpectedToken {
        found: Option<TokenKind>,
        expected: Vec<&'static str>,
    },
    UnexpectedString {
        expected: Vec<&'static str>,
    },
    UnknownOperator,
    TooManyDice {
        count: usize,
        max: usize,
    },
    TooManySides {
        sides: DSize,
        max: DSize,
    },
    ZeroSides,
}

impl ParseErrorKind {
    /// Malformed grammar: an unexpected or unparseable token.
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedToken { .. } | Self::UnexpectedString { .. }
        )
    }

    /// Count or sides outside the configured [`Limits`].
    pub fn is_bounds(&self) -> bool {
        matches!(
            self,
            Self::TooManyDice { .. } | Self::TooManySides { .. } | Self::ZeroSides
        )
    }

    /// Unrecognized modifier token after a dice term.
    pub fn is_unknown_operator(&self) -> bool {
        matches!(self, Self::UnknownOperator)
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { found, expected } => {
                match found {
                    Some(token) => write!(f, "unexpected {}, expected ", token)?,
                    None => write!(f, "unexpected end of formula, expected ")?,
                }
                fmt_expected(expected, f)
            }
            Self::UnexpectedString { expected } => {
                write!(f, "unrecognized input, expected ")?;
                fmt_expected(expected, f)
            }
            Self::UnknownOperator => write!(f, "unknown dice operator"),
            Self::TooManyDice { count, max } => {
                write!(f, "cannot roll more than {} dice at once (found {})", max, count)
            }
            Self::TooManySides { sides, max } => {
                write!(f, "dice cannot have more than {} sides (found {})", max, sides)
            }
            Self::ZeroSides => write!(f, "dice must have at least one side"),
        }
    }
}

fn fmt_expected(expected: &[&'static str], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let len = expected.len();

    if expected.is_empty() {
        Ok(())
    } else if len == 1 {
        f.write_str(expected[0])
    } else if len == 2 {
        write!(f, "{} or {}", expected[0], expected[1])
    } else {
        for exp in &expected[..len - 1] {
            write!(f, "{}, ", exp)?;
        }
        write!(f, "or {}", expected[len - 1])
    }
}

pub(crate) struct Parser<'a> {
    lexer: Lexer<'a>,
    limits: Limits,
}

impl<'a> Parser<'a> {
    const TERM_START: &'static [&'static str] = &["<integer>", "<dice>"];

    const PREDICATE_START: &'static [&'static str] =
        &["'<'", "'<='", "'>'", "'>='", "'='", "<integer>"];

    pub(crate) fn new(s: &'a str, limits: Limits) -> Self {
        Self {
            lexer: lexer(s),
            limits,
        }
    }

    pub(crate) fn parse(mut self) -> PResult<RollSpec> {
        let root = self.parse_expression()?;
        match self.peek() {
            None => Ok(RollSpec { root }),
            Some(_) => self.unexpected_token(vec!["'+'", "'-'", "end of formula"]),
        }
    }

    fn peek(&mut self) -> Option<TokenKind> {
        self.lexer.peek().copied()
    }

    fn advance(&mut self) -> Option<TokenKind> {
        self.lexer.next()
    }

    fn error<T>(&mut self, kind: ParseErrorKind) -> PResult<T> {
        Err(ParseError {
            kind,
            span: self.lexer.span(),
            slice: self.lexer.slice().to_string(),
        })
    }

    fn unexpected_token<T>(&mut self, expected: Vec<&'static str>) -> PResult<T> {
        let found = self.advance();
        if matches!(found, Some(TokenKind::Error)) {
            self.error(ParseErrorKind::UnexpectedString { expected })
        } else {
            self.error(ParseErrorKind::UnexpectedToken { found, expected })
        }
    }

    fn parse_expression(&mut self) -> PResult<Node> {
        let mut lhs = self.parse_term()?;

        loop {
            let op = match self.peek() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_term()?;
            lhs = Node::Binary(Box::new(lhs), op, Box::new(rhs));
        }

        Ok(lhs)
    }

    fn parse_term(&mut self) -> PResult<Node> {
        match self.peek() {
            Some(TokenKind::Integer(x)) => {
                self.advance();
                Ok(Node::Constant(Int::try_from(x).unwrap_or(Int::MAX)))
            }
            Some(TokenKind::Dice(lit)) => {
                self.advance();
                self.parse_dice(lit)
            }
            _ => self.unexpected_token(Self::TERM_START.to_vec()),
        }
    }

    // Bounds are enforced here, before any entropy is consumed.
    fn parse_dice(&mut self, lit: DiceLit) -> PResult<Node> {
        if lit.sides == 0 {
            return self.error(ParseErrorKind::ZeroSides);
        }
        if lit.count > self.limits.max_dice {
            return self.error(ParseErrorKind::TooManyDice {
                count: lit.count,
                max: self.limits.max_dice,
            });
        }
        if lit.sides > self.limits.max_sides {
            return self.error(ParseErrorKind::TooManySides {
                sides: lit.sides,
                max: self.limits.max_sides,
            });
        }

        let modifiers = self.parse_modifiers()?;
        Ok(Node::Dice(DiceTerm::new(lit.count, lit.sides, modifiers)))
    }

    fn parse_modifiers(&mut self) -> PResult<Vec<Modifier>> {
        let mut modifiers = Vec::new();

        loop {
            let modifier = match self.peek() {
                Some(TokenKind::KeepHighest) => {
                    self.advance();
                    Modifier::KeepHighest(self.parse_count()?)
                }
                Some(TokenKind::KeepLowest) => {
                    self.advance();
                    Modifier::KeepLowest(self.parse_count()?)
                }
                Some(TokenKind::DropHighest) => {
                    self.advance();
                    Modifier::DropHighest(self.parse_count()?)
                }
                Some(TokenKind::DropLowest) => {
                    self.advance();
                    Modifier::DropLowest(self.parse_count()?)
                }
                Some(TokenKind::Reroll) => {
                    self.advance();
                    Modifier::Reroll {
                        predicate: self.parse_opt_predicate()?,
                        once: false,
                    }
                }
                Some(TokenKind::RerollKeep) => {
                    self.advance();
                    Modifier::Reroll {
                        predicate: self.parse_opt_predicate()?,
                        once: true,
                    }
                }
                Some(TokenKind::Explode) => {
                    self.advance();
                    Modifier::Explode(self.parse_opt_predicate()?)
                }
                Some(TokenKind::Count) => {
                    self.advance();
                    Modifier::CountSuccesses(self.parse_predicate()?)
                }
                Some(TokenKind::Error) => {
                    self.advance();
                    return self.error(ParseErrorKind::UnknownOperator);
                }
                _ => break,
            };
            modifiers.push(modifier);
        }

        Ok(modifiers)
    }

    /// A selector count, defaulting to 1 when the digits are omitted (`kh` ≡ `kh1`).
    fn parse_count(&mut self) -> PResult<usize> {
        if let Some(TokenKind::Integer(x)) = self.peek() {
            self.advance();
            Ok(x)
        } else {
            Ok(1)
        }
    }

    fn parse_opt_predicate(&mut self) -> PResult<Option<Predicate>> {
        match self.peek() {
            Some(
                TokenKind::Integer(_)
                | TokenKind::LessThan
                | TokenKind::LessEqual
                | TokenKind::GreaterThan
                | TokenKind::GreaterEqual
                | TokenKind::Equal,
            ) => self.parse_predicate().map(Some),
            _ => Ok(None),
        }
    }

    fn parse_predicate(&mut self) -> PResult<Predicate> {
        let cmp = match self.peek() {
            Some(TokenKind::Integer(x)) => {
                self.advance();
                return Ok(Predicate::equal(x));
            }
            Some(TokenKind::LessThan) => Comparison::Less,
            Some(TokenKind::LessEqual) => Comparison::LessEqual,
            Some(TokenKind::GreaterThan) => Comparison::Greater,
            Some(TokenKind::GreaterEqual) => Comparison::GreaterEqual,
            Some(TokenKind::Equal) => Comparison::Equal,
            _ => return self.unexpected_token(Self::PREDICATE_START.to_vec()),
        };
        self.advance();

        match self.peek() {
            Some(TokenKind::Integer(x)) => {
                self.advance();
                Ok(Predicate::new(cmp, x))
            }
            _ => self.unexpected_token(vec!["<integer>"]),
        }
    }
}
