//! zcalc: a key-by-key calculator engine.
//!
//! The [`calculator::Engine`] behaves like a pocket calculator: digits build
//! up the display, binary operators chain through an accumulator left to
//! right, and scientific functions rewrite the display in place.
//!
//! ```
//! use zcalc::calculator::Engine;
//!
//! let mut engine = Engine::default();
//! for key in ["3", "+", "4", "="] {
//!     engine.press_token(key).unwrap();
//! }
//! assert_eq!(engine.display(), "7");
//! ```

pub mod calculator;
pub mod config;
pub mod keypad;
pub mod logging;
pub mod session;
