// File: src/errors.rs
//
// Error handling and reporting for the Flax virtual machine.
// Provides a structured runtime error type with a stable error kind,
// optional source line information, and pretty-printed diagnostics.

use colored::Colorize;
use std::fmt;

/// Classes of runtime errors the VM can report.
///
/// These kinds are part of the public interface: tests and embedders match
/// on them, so new failure modes get a new variant rather than a reworded
/// message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Pop or peek on an empty (or too shallow) operand stack.
    StackUnderflow,
    /// Call depth exceeded the frame limit.
    StackOverflow,
    /// An operand's case does not match what the instruction expects.
    Type,
    /// `GET_GLOBAL` on a name that was never defined.
    UnboundGlobal,
    /// A slot, constant, or upvalue index out of range.
    InvalidSlot,
    /// `CALL` on a value that is not callable.
    CallTarget,
    /// A call with the wrong number of arguments.
    ArityMismatch,
    /// A byte that does not decode to any instruction.
    UnknownOpcode,
    /// Propagated unchanged from the allocator.
    Allocation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::StackUnderflow => write!(f, "Stack Underflow"),
            ErrorKind::StackOverflow => write!(f, "Stack Overflow"),
            ErrorKind::Type => write!(f, "Type Error"),
            ErrorKind::UnboundGlobal => write!(f, "Unbound Global"),
            ErrorKind::InvalidSlot => write!(f, "Invalid Slot"),
            ErrorKind::CallTarget => write!(f, "Call Target Error"),
            ErrorKind::ArityMismatch => write!(f, "Arity Mismatch"),
            ErrorKind::UnknownOpcode => write!(f, "Unknown Opcode"),
            ErrorKind::Allocation => write!(f, "Allocation Failure"),
        }
    }
}

/// A structured runtime error with kind, message, and optional line.
#[derive(Debug, Clone)]
pub struct VmError {
    pub kind: ErrorKind,
    pub message: String,
    pub line: Option<usize>,
}

impl VmError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), line: None }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Create a stack underflow error naming the operation that hit it
    pub fn stack_underflow(context: &str) -> Self {
        Self::new(ErrorKind::StackUnderflow, format!("Stack underflow in {}", context))
    }

    /// Create a type error
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Type, message)
    }

    /// Create an unbound global error
    pub fn unbound_global(name: &str) -> Self {
        Self::new(ErrorKind::UnboundGlobal, format!("Global '{}' is not defined", name))
    }

    /// Create an invalid slot error
    pub fn invalid_slot(context: &str, index: usize) -> Self {
        Self::new(ErrorKind::InvalidSlot, format!("Invalid {} index: {}", context, index))
    }

    /// Create a call target error
    pub fn call_target(found: &str) -> Self {
        Self::new(ErrorKind::CallTarget, format!("Can only call functions, got {}", found))
    }

    /// Create an arity mismatch error
    pub fn arity_mismatch(name: &str, expected: u8, got: usize) -> Self {
        Self::new(
            ErrorKind::ArityMismatch,
            format!("'{}' expects {} argument(s), got {}", name, expected, got),
        )
    }

    /// Create an unknown opcode error
    pub fn unknown_opcode(byte: u8) -> Self {
        Self::new(ErrorKind::UnknownOpcode, format!("Byte 0x{:02x} is not an instruction", byte))
    }
}

impl fmt::Display for VmError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind_str = format!("{}", self.kind);
        writeln!(f, "{}: {}", kind_str.red().bold(), self.message.bold())?;
        if let Some(line) = self.line {
            let location_str = format!("  --> line {}", line);
            writeln!(f, "{}", location_str.bright_blue())?;
        }
        Ok(())
    }
}

impl std::error::Error for VmError {}
