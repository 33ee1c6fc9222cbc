//! The calculator state machine.
//!
//! A sequential accumulator: binary operators are deferred and applied
//! left to right through `total`, immediate functions rewrite the display
//! in place. Every call returns the text the display should show.

use std::f64::consts;

use tracing::{debug, trace};

use super::error::{CalcError, ERROR_SENTINEL};
use super::format::{MAX_DIGITS, format_number, parse_display};
use super::operation::{BinaryOp, ControlOp, Digit, InputKey, Operation, Operator, UnaryOp};

/// Engine options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Enables the scientific operation set.
    pub extended_functions: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            extended_functions: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Engine {
    config: EngineConfig,
    /// Result of the binary chain so far.
    total: f64,
    /// Display text, always a numeric literal prefix.
    current: String,
    pending: Option<BinaryOp>,
    awaiting_fresh_input: bool,
    awaiting_first_operand: bool,
    /// Reserved for memory recall; only ever cleared.
    memory: Vec<f64>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            total: 0.0,
            current: "0".to_string(),
            pending: None,
            awaiting_fresh_input: true,
            awaiting_first_operand: true,
            memory: Vec::new(),
        }
    }

    pub fn display(&self) -> &str {
        &self.current
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn pending(&self) -> Option<BinaryOp> {
        self.pending
    }

    pub fn is_awaiting_fresh_input(&self) -> bool {
        self.awaiting_fresh_input
    }

    pub fn is_awaiting_first_operand(&self) -> bool {
        self.awaiting_first_operand
    }

    pub fn memory(&self) -> &[f64] {
        &self.memory
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Switch between the common and scientific operation sets.
    ///
    /// Only gates which keys are accepted; the display and chain are kept.
    pub fn set_extended_functions(&mut self, enabled: bool) {
        debug!(enabled, "extended functions toggled");
        self.config.extended_functions = enabled;
    }

    /// Whether `op` may be pressed under the current configuration.
    pub fn is_enabled(&self, op: Operation) -> bool {
        self.config.extended_functions || !op.is_extended()
    }

    /// Press a single key and return the new display text.
    ///
    /// Keys outside the enabled operation set are ignored.
    pub fn press(&mut self, op: Operation) -> String {
        trace!(key = %op, display = %self.current, "press");
        match op {
            Operation::Input(key) => self.enter_digit(key),
            Operation::Binary(op) => self.enter_operator(op),
            Operation::Unary(op) => self.enter_operator(op),
            Operation::Control(ControlOp::Equals) => self.commit_total(),
            Operation::Control(ControlOp::Sign) => self.toggle_sign(),
            Operation::Control(ControlOp::ClearEntry) => self.clear_entry(),
            Operation::Control(ControlOp::ClearAll) => self.clear_all(),
            Operation::Control(ControlOp::Backspace) => self.backspace(),
        }
    }

    /// Parse `token` and press it.
    pub fn press_token(&mut self, token: &str) -> Result<String, CalcError> {
        let op: Operation = token.parse()?;
        if !self.is_enabled(op) {
            return Err(CalcError::OperationDisabled {
                operation: op.token(),
            });
        }
        Ok(self.press(op))
    }

    pub fn enter_digit(&mut self, key: InputKey) -> String {
        if self.current == "0" && key == InputKey::Digit(Digit::ZERO) {
            return self.current.clone();
        }

        if self.awaiting_fresh_input {
            self.current = match key {
                InputKey::Point => "0.".to_string(),
                InputKey::Digit(_) => key.as_char().to_string(),
            };
            self.awaiting_fresh_input = false;
        } else {
            if key == InputKey::Point && self.current.contains('.') {
                return self.current.clone();
            }
            if self.current.len() < MAX_DIGITS {
                self.current.push(key.as_char());
            }
        }

        self.current.clone()
    }

    /// Apply a binary operator to the chain, or an immediate function to the display.
    pub fn enter_operator(&mut self, op: impl Into<Operator>) -> String {
        let op = op.into();
        if !self.is_enabled(op.into()) {
            debug!(operation = op.token(), "operation disabled in common mode");
            return self.current.clone();
        }

        self.awaiting_fresh_input = true;
        let result = match op {
            Operator::Unary(func) => self.apply_unary(func),
            Operator::Binary(op) => self.chain(op),
        };

        match result {
            Ok(()) => self.current.clone(),
            Err(err) => self.fail(err),
        }
    }

    /// The `=` key: settle the chain and start over.
    ///
    /// With nothing pending the accumulator is shown as-is.
    pub fn commit_total(&mut self) -> String {
        if let Err(err) = self.apply_pending() {
            return self.fail(err);
        }

        self.current = format_number(self.total);
        self.total = 0.0;
        self.pending = None;
        self.awaiting_fresh_input = true;
        self.awaiting_first_operand = true;
        debug!(result = %self.current, "total committed");

        self.current.clone()
    }

    /// Flip the sign. Adding one to a full-width display is a no-op.
    pub fn toggle_sign(&mut self) -> String {
        if self.current == "0" {
            return self.current.clone();
        }

        if let Some(rest) = self.current.strip_prefix('-') {
            self.current = rest.to_string();
        } else if self.current.len() < MAX_DIGITS {
            self.current.insert(0, '-');
        }

        self.current.clone()
    }

    pub fn backspace(&mut self) -> String {
        self.current.pop();
        if matches!(self.current.as_str(), "" | "0" | "-") {
            self.current = "0".to_string();
            self.awaiting_fresh_input = true;
        }

        self.current.clone()
    }

    /// Reset the display only; the chain survives.
    pub fn clear_entry(&mut self) -> String {
        self.clear_input();
        self.current.clone()
    }

    pub fn clear_all(&mut self) -> String {
        self.clear_input();
        self.total = 0.0;
        self.pending = None;
        self.awaiting_first_operand = true;
        self.memory.clear();
        debug!("engine cleared");

        self.current.clone()
    }

    fn clear_input(&mut self) {
        self.current = "0".to_string();
        self.awaiting_fresh_input = true;
    }

    fn fail(&mut self, err: CalcError) -> String {
        debug!(kind = err.kind(), error = %err, "operation failed");
        self.clear_input();
        ERROR_SENTINEL.to_string()
    }

    fn chain(&mut self, op: BinaryOp) -> Result<(), CalcError> {
        if self.awaiting_first_operand {
            self.total = parse_display(&self.current)?;
            self.awaiting_first_operand = false;
        } else {
            self.apply_pending()?;
            self.current = format_number(self.total);
        }

        self.pending = Some(op);
        Ok(())
    }

    fn apply_pending(&mut self) -> Result<(), CalcError> {
        let operand = parse_display(&self.current)?;
        if let Some(op) = self.pending {
            self.total = apply_binary(op, self.total, operand)?;
        }
        Ok(())
    }

    fn apply_unary(&mut self, func: UnaryOp) -> Result<(), CalcError> {
        let operand = parse_display(&self.current)?;
        let value = apply_unary(func, operand)?;
        self.current = format_number(value);
        Ok(())
    }
}

fn apply_binary(op: BinaryOp, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
    let value = match op {
        BinaryOp::Add => lhs + rhs,
        BinaryOp::Sub => lhs - rhs,
        BinaryOp::Mul => lhs * rhs,
        BinaryOp::Div | BinaryOp::Mod if rhs == 0.0 => return Err(CalcError::DivisionByZero),
        BinaryOp::Div => lhs / rhs,
        BinaryOp::Mod => lhs % rhs,
        BinaryOp::Pow => lhs.powf(rhs),
    };

    finite(op.token(), rhs, value)
}

fn apply_unary(func: UnaryOp, x: f64) -> Result<f64, CalcError> {
    let value = match func {
        UnaryOp::Sqrt => x.sqrt(),
        UnaryOp::Square => x.powi(2),
        UnaryOp::Cube => x.powi(3),
        UnaryOp::Reciprocal => reciprocal(x)?,
        UnaryOp::AbsoluteValue => x.abs(),
        UnaryOp::Factorial => factorial(x)?,
        UnaryOp::Cos => x.cos(),
        UnaryOp::Sin => x.sin(),
        UnaryOp::Tan => x.tan(),
        UnaryOp::Acos => x.acos(),
        UnaryOp::Asin => x.asin(),
        UnaryOp::Atan => x.atan(),
        UnaryOp::Sec => reciprocal(x.cos())?,
        UnaryOp::Csc => reciprocal(x.sin())?,
        UnaryOp::Exp10 => 10f64.powf(x),
        UnaryOp::Ln => x.ln(),
        UnaryOp::Log2 => x.log2(),
        UnaryOp::Log10 => x.log10(),
        UnaryOp::ConstPi => consts::PI,
        UnaryOp::ConstE => consts::E,
    };

    finite(func.token(), x, value)
}

fn reciprocal(x: f64) -> Result<f64, CalcError> {
    if x == 0.0 {
        return Err(CalcError::DivisionByZero);
    }
    Ok(1.0 / x)
}

/// n! by repeated multiplication, stopping once the product overflows.
fn factorial(x: f64) -> Result<f64, CalcError> {
    if x < 0.0 || x.fract() != 0.0 {
        return Err(CalcError::InvalidFactorialOperand { value: x });
    }

    let mut product = 1.0_f64;
    let mut k = 2.0_f64;
    while k <= x && product.is_finite() {
        product *= k;
        k += 1.0;
    }
    Ok(product)
}

fn finite(operation: &'static str, operand: f64, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::DomainError {
            operation,
            value: operand,
        })
    }
}
