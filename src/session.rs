//! A calculator window without the window.
//!
//! Owns one engine and the current [`Mode`], and feeds typed key sequences
//! through it. Each session is independent; front ends hold one per
//! calculator they show.

use serde::Serialize;
use tracing::debug;

use crate::calculator::{CalcError, Engine, EngineConfig};
use crate::keypad::{Mode, resolve_key, split_keys};

/// One key press and what the display showed afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Step {
    pub key: String,
    pub display: String,
}

#[derive(Clone, Debug)]
pub struct Session {
    engine: Engine,
    mode: Mode,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

impl Session {
    pub fn new(mode: Mode) -> Self {
        Self {
            engine: Engine::new(EngineConfig {
                extended_functions: mode.extended_functions(),
            }),
            mode,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Show or hide the scientific pad. The engine state is kept.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.engine.set_extended_functions(mode.extended_functions());
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn display(&self) -> &str {
        self.engine.display()
    }

    /// Press every key in `line`, in order.
    ///
    /// Keys that cannot be pressed are reported in place and skipped; the
    /// rest of the line still runs.
    pub fn feed(&mut self, line: &str) -> Vec<Result<Step, CalcError>> {
        split_keys(line)
            .into_iter()
            .map(|key| self.press(key))
            .collect()
    }

    fn press(&mut self, key: String) -> Result<Step, CalcError> {
        let op = resolve_key(&key)?;
        if !self.engine.is_enabled(op) {
            debug!(key = %key, mode = ?self.mode, "key not available");
            return Err(CalcError::OperationDisabled {
                operation: op.token(),
            });
        }

        let display = self.engine.press(op);
        Ok(Step { key, display })
    }
}
