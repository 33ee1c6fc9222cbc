//! Calculator engine.
//!
//! This module provides:
//! - The operation taxonomy every key maps to
//! - A sequential accumulator state machine driven one key at a time
//! - Fixed-width display formatting
//! - Copying the display to the clipboard

mod clipboard;
mod engine;
mod error;
mod format;
mod operation;

pub use clipboard::copy_to_clipboard;
pub use engine::{Engine, EngineConfig};
pub use error::{CalcError, ERROR_SENTINEL};
pub use format::{MAX_DIGITS, format_number, parse_display};
pub use operation::{BinaryOp, ControlOp, Digit, InputKey, Operation, Operator, UnaryOp};
