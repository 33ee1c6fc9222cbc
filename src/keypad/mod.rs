//! Button layout for calculator front ends.
//!
//! Two pads: the common numpad and the scientific function pad. A front end
//! shows the pads its [`Mode`] asks for and forwards each key's operation to
//! the engine.

mod input;

pub use input::{resolve_key, split_keys};

use serde::{Deserialize, Serialize};

use crate::calculator::{BinaryOp, ControlOp, InputKey, Operation, UnaryOp};

/// A single button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Key {
    /// Text printed on the button.
    pub label: &'static str,
    pub operation: Operation,
}

const fn key(label: &'static str, operation: Operation) -> Key {
    Key { label, operation }
}

const fn digit(label: &'static str, d: u8) -> Key {
    match InputKey::digit(d) {
        Some(input) => key(label, Operation::Input(input)),
        None => panic!("keypad digit out of range"),
    }
}

const fn binary(label: &'static str, op: BinaryOp) -> Key {
    key(label, Operation::Binary(op))
}

const fn unary(label: &'static str, op: UnaryOp) -> Key {
    key(label, Operation::Unary(op))
}

const fn control(label: &'static str, op: ControlOp) -> Key {
    key(label, Operation::Control(op))
}

static COMMON_KEYS: [Key; 20] = [
    control("CE", ControlOp::ClearEntry),
    control("C", ControlOp::ClearAll),
    control("⌫", ControlOp::Backspace),
    binary("/", BinaryOp::Div),
    digit("7", 7),
    digit("8", 8),
    digit("9", 9),
    binary("x", BinaryOp::Mul),
    digit("4", 4),
    digit("5", 5),
    digit("6", 6),
    binary("-", BinaryOp::Sub),
    digit("1", 1),
    digit("2", 2),
    digit("3", 3),
    binary("+", BinaryOp::Add),
    control("±", ControlOp::Sign),
    digit("0", 0),
    key(".", Operation::Input(InputKey::Point)),
    control("=", ControlOp::Equals),
];

static SCIENTIFIC_KEYS: [Key; 21] = [
    unary("√x", UnaryOp::Sqrt),
    unary("x²", UnaryOp::Square),
    unary("x³", UnaryOp::Cube),
    unary("1/x", UnaryOp::Reciprocal),
    unary("|x|", UnaryOp::AbsoluteValue),
    unary("n!", UnaryOp::Factorial),
    unary("cos", UnaryOp::Cos),
    unary("sin", UnaryOp::Sin),
    unary("tan", UnaryOp::Tan),
    unary("acos", UnaryOp::Acos),
    unary("asin", UnaryOp::Asin),
    unary("atan", UnaryOp::Atan),
    unary("π", UnaryOp::ConstPi),
    unary("sec", UnaryOp::Sec),
    binary("xⁿ", BinaryOp::Pow),
    unary("e", UnaryOp::ConstE),
    unary("csc", UnaryOp::Csc),
    unary("10ⁿ", UnaryOp::Exp10),
    unary("ln", UnaryOp::Ln),
    unary("log2", UnaryOp::Log2),
    unary("log10", UnaryOp::Log10),
];

/// A grid of buttons.
#[derive(Clone, Copy, Debug)]
pub struct Keypad {
    pub name: &'static str,
    pub columns: usize,
    pub keys: &'static [Key],
}

impl Keypad {
    /// The four-function numpad, always visible.
    pub fn common() -> Self {
        Self {
            name: "common",
            columns: 4,
            keys: &COMMON_KEYS,
        }
    }

    /// The function pad shown in scientific mode.
    pub fn scientific() -> Self {
        Self {
            name: "scientific",
            columns: 3,
            keys: &SCIENTIFIC_KEYS,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &'static [Key]> {
        self.keys.chunks(self.columns)
    }

    pub fn find(&self, label: &str) -> Option<Key> {
        self.keys.iter().find(|k| k.label == label).copied()
    }

    /// Plain-text grid of the labels, one row per line.
    pub fn render(&self) -> String {
        let width = self
            .keys
            .iter()
            .map(|k| k.label.chars().count())
            .max()
            .unwrap_or(1);

        self.rows()
            .map(|row| {
                row.iter()
                    .map(|k| format!("[{:^width$}]", k.label))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Which operation set the front end offers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Four-function numpad only.
    Common,
    /// Numpad plus the function pad.
    #[default]
    Scientific,
}

impl Mode {
    pub fn extended_functions(self) -> bool {
        matches!(self, Self::Scientific)
    }

    /// Pads visible in this mode, in display order.
    pub fn keypads(self) -> Vec<Keypad> {
        match self {
            Self::Common => vec![Keypad::common()],
            Self::Scientific => vec![Keypad::common(), Keypad::scientific()],
        }
    }

    /// Look a label up on every pad of this mode.
    pub fn find(self, label: &str) -> Option<Key> {
        self.keypads().iter().find_map(|pad| pad.find(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_shapes() {
        let common = Keypad::common();
        assert_eq!(common.rows().count(), 5);
        assert!(common.rows().all(|row| row.len() == 4));

        let scientific = Keypad::scientific();
        assert_eq!(scientific.rows().count(), 7);
        assert!(scientific.rows().all(|row| row.len() == 3));
    }

    #[test]
    fn test_common_pad_is_not_extended() {
        assert!(
            Keypad::common()
                .keys
                .iter()
                .all(|k| !k.operation.is_extended())
        );
        assert!(
            Keypad::scientific()
                .keys
                .iter()
                .all(|k| k.operation.is_extended())
        );
    }

    #[test]
    fn test_find_label() {
        assert_eq!(
            Keypad::common().find("x").map(|k| k.operation),
            Some(Operation::Binary(BinaryOp::Mul))
        );
        assert_eq!(
            Keypad::scientific().find("x²").map(|k| k.operation),
            Some(Operation::Unary(UnaryOp::Square))
        );
        assert!(Keypad::common().find("sin").is_none());
    }

    #[test]
    fn test_mode_pads() {
        assert_eq!(Mode::Common.keypads().len(), 1);
        assert_eq!(Mode::Scientific.keypads().len(), 2);
        assert!(Mode::Common.find("sin").is_none());
        assert!(Mode::Scientific.find("sin").is_some());
        assert!(!Mode::Common.extended_functions());
        assert_eq!(Mode::default(), Mode::Scientific);
    }

    #[test]
    fn test_render() {
        let rendered = Keypad::common().render();
        let first = rendered.lines().next().unwrap();
        assert_eq!(first, "[CE] [C ] [⌫ ] [/ ]");
        assert_eq!(rendered.lines().count(), 5);
    }
}
