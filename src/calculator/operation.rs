//! Operation taxonomy.
//!
//! Every key a front end can press maps to exactly one [`Operation`]. The
//! enum is split by how the engine treats the key, so dispatch in the
//! engine is an exhaustive match instead of string comparison.

use std::fmt;
use std::str::FromStr;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::error::CalcError;

/// A decimal digit. Only values in `0..=9` can be built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Digit(u8);

impl Digit {
    pub const ZERO: Digit = Digit(0);

    pub const fn new(d: u8) -> Option<Self> {
        if d <= 9 { Some(Self(d)) } else { None }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

/// Digit and decimal point entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKey {
    Digit(Digit),
    Point,
}

impl InputKey {
    /// Build a digit key, rejecting anything outside `0..=9`.
    pub const fn digit(d: u8) -> Option<Self> {
        match Digit::new(d) {
            Some(d) => Some(Self::Digit(d)),
            None => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Digit(d) => d.as_char(),
            Self::Point => '.',
        }
    }
}

/// Deferred operators that chain through the accumulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 6] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Pow,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Self::Add => "SUM",
            Self::Sub => "DIFF",
            Self::Mul => "MULTI",
            Self::Div => "DIV",
            Self::Mod => "MOD",
            Self::Pow => "EXP",
        }
    }

    /// Whether the operator is only offered by the scientific keypad.
    pub fn is_extended(self) -> bool {
        matches!(self, Self::Mod | Self::Pow)
    }
}

/// Functions applied immediately to the displayed value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Sqrt,
    Square,
    Cube,
    Reciprocal,
    AbsoluteValue,
    Factorial,
    Cos,
    Sin,
    Tan,
    Acos,
    Asin,
    Atan,
    Sec,
    Csc,
    Exp10,
    Ln,
    Log2,
    Log10,
    ConstPi,
    ConstE,
}

impl UnaryOp {
    pub const ALL: [UnaryOp; 20] = [
        Self::Sqrt,
        Self::Square,
        Self::Cube,
        Self::Reciprocal,
        Self::AbsoluteValue,
        Self::Factorial,
        Self::Cos,
        Self::Sin,
        Self::Tan,
        Self::Acos,
        Self::Asin,
        Self::Atan,
        Self::Sec,
        Self::Csc,
        Self::Exp10,
        Self::Ln,
        Self::Log2,
        Self::Log10,
        Self::ConstPi,
        Self::ConstE,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Self::Sqrt => "SQRT",
            Self::Square => "POWER2",
            Self::Cube => "POWER3",
            Self::Reciprocal => "REVERSE",
            Self::AbsoluteValue => "MODUL",
            Self::Factorial => "FACTORIAL",
            Self::Cos => "COS",
            Self::Sin => "SIN",
            Self::Tan => "TAN",
            Self::Acos => "ACOS",
            Self::Asin => "ASIN",
            Self::Atan => "ATAN",
            Self::Sec => "SEC",
            Self::Csc => "CSC",
            Self::Exp10 => "EXP10",
            Self::Ln => "LN",
            Self::Log2 => "LOG2",
            Self::Log10 => "LOG10",
            Self::ConstPi => "PI",
            Self::ConstE => "E",
        }
    }

    /// All immediate functions live on the scientific keypad.
    pub fn is_extended(self) -> bool {
        true
    }
}

/// Editing and chain control keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlOp {
    Equals,
    Sign,
    ClearEntry,
    ClearAll,
    Backspace,
}

impl ControlOp {
    pub const ALL: [ControlOp; 5] = [
        Self::Equals,
        Self::Sign,
        Self::ClearEntry,
        Self::ClearAll,
        Self::Backspace,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Self::Equals => "TOTAL",
            Self::Sign => "SIGN",
            Self::ClearEntry => "CL",
            Self::ClearAll => "CL_ALL",
            Self::Backspace => "DEL",
        }
    }
}

/// A single key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Input(InputKey),
    Binary(BinaryOp),
    Unary(UnaryOp),
    Control(ControlOp),
}

impl Operation {
    /// Canonical token for this operation.
    pub fn token(self) -> &'static str {
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        match self {
            Self::Input(InputKey::Digit(d)) => DIGITS[usize::from(d.value())],
            Self::Input(InputKey::Point) => ".",
            Self::Binary(op) => op.token(),
            Self::Unary(op) => op.token(),
            Self::Control(op) => op.token(),
        }
    }

    /// Whether pressing this key requires the extended (scientific) set.
    pub fn is_extended(self) -> bool {
        match self {
            Self::Input(_) | Self::Control(_) => false,
            Self::Binary(op) => op.is_extended(),
            Self::Unary(op) => op.is_extended(),
        }
    }

    /// Every operation except digits, in canonical order.
    fn named() -> impl Iterator<Item = Operation> {
        BinaryOp::ALL
            .into_iter()
            .map(Operation::Binary)
            .chain(UnaryOp::ALL.into_iter().map(Operation::Unary))
            .chain(ControlOp::ALL.into_iter().map(Operation::Control))
    }

    /// Closest known token to `input`, if any scores at all.
    pub fn suggest(input: &str) -> Option<&'static str> {
        let matcher = SkimMatcherV2::default().ignore_case();
        Self::named()
            .map(Self::token)
            .chain(ALIASES.iter().map(|(alias, _)| *alias))
            .filter_map(|candidate| {
                matcher
                    .fuzzy_match(candidate, input)
                    .map(|score| (score, candidate))
            })
            .max_by_key(|(score, _)| *score)
            .map(|(_, candidate)| candidate)
    }
}

/// The keys routed through the engine's operator entry point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Binary(BinaryOp),
    Unary(UnaryOp),
}

impl Operator {
    pub fn token(self) -> &'static str {
        match self {
            Self::Binary(op) => op.token(),
            Self::Unary(op) => op.token(),
        }
    }
}

impl From<BinaryOp> for Operator {
    fn from(op: BinaryOp) -> Self {
        Self::Binary(op)
    }
}

impl From<UnaryOp> for Operator {
    fn from(op: UnaryOp) -> Self {
        Self::Unary(op)
    }
}

impl From<Operator> for Operation {
    fn from(op: Operator) -> Self {
        match op {
            Operator::Binary(op) => Self::Binary(op),
            Operator::Unary(op) => Self::Unary(op),
        }
    }
}

/// Symbol and lowercase spellings accepted besides the canonical tokens.
const ALIASES: &[(&str, Operation)] = &[
    ("+", Operation::Binary(BinaryOp::Add)),
    ("-", Operation::Binary(BinaryOp::Sub)),
    ("*", Operation::Binary(BinaryOp::Mul)),
    ("x", Operation::Binary(BinaryOp::Mul)),
    ("×", Operation::Binary(BinaryOp::Mul)),
    ("/", Operation::Binary(BinaryOp::Div)),
    ("÷", Operation::Binary(BinaryOp::Div)),
    ("%", Operation::Binary(BinaryOp::Mod)),
    ("^", Operation::Binary(BinaryOp::Pow)),
    ("pow", Operation::Binary(BinaryOp::Pow)),
    ("sqrt", Operation::Unary(UnaryOp::Sqrt)),
    ("square", Operation::Unary(UnaryOp::Square)),
    ("cube", Operation::Unary(UnaryOp::Cube)),
    ("inv", Operation::Unary(UnaryOp::Reciprocal)),
    ("abs", Operation::Unary(UnaryOp::AbsoluteValue)),
    ("!", Operation::Unary(UnaryOp::Factorial)),
    ("fact", Operation::Unary(UnaryOp::Factorial)),
    ("π", Operation::Unary(UnaryOp::ConstPi)),
    ("=", Operation::Control(ControlOp::Equals)),
    ("±", Operation::Control(ControlOp::Sign)),
    ("neg", Operation::Control(ControlOp::Sign)),
    ("ce", Operation::Control(ControlOp::ClearEntry)),
    ("c", Operation::Control(ControlOp::ClearAll)),
    ("ac", Operation::Control(ControlOp::ClearAll)),
    ("⌫", Operation::Control(ControlOp::Backspace)),
    ("bs", Operation::Control(ControlOp::Backspace)),
];

impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let &[byte] = s.as_bytes() {
            if byte == b'.' {
                return Ok(Self::Input(InputKey::Point));
            }
            if let Some(key) = byte.checked_sub(b'0').and_then(InputKey::digit) {
                return Ok(Self::Input(key));
            }
        }

        if let Some(op) = Self::named().find(|op| op.token().eq_ignore_ascii_case(s)) {
            return Ok(op);
        }

        if let Some((_, op)) = ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(s))
        {
            return Ok(*op);
        }

        Err(CalcError::UnknownToken {
            token: s.to_string(),
            suggestion: Self::suggest(s),
        })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl From<BinaryOp> for Operation {
    fn from(op: BinaryOp) -> Self {
        Self::Binary(op)
    }
}

impl From<UnaryOp> for Operation {
    fn from(op: UnaryOp) -> Self {
        Self::Unary(op)
    }
}

impl From<ControlOp> for Operation {
    fn from(op: ControlOp) -> Self {
        Self::Control(op)
    }
}

impl From<InputKey> for Operation {
    fn from(key: InputKey) -> Self {
        Self::Input(key)
    }
}
