// File: src/value.rs
//
// Runtime value types for the Flax VM.
// A tagged variant over nil, numbers, booleans, interned strings, and the
// heap object handles, plus the arithmetic/logic/comparison operations the
// instruction set is defined in terms of.

use crate::errors::VmError;
use crate::object::{Closure, Function, Interner, NativeFunction};
use std::fmt;
use std::sync::Arc;

/// A runtime value. Numbers, booleans, and nil are value types; strings,
/// functions, natives, and closures are shared handles.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Number(f64),
    Bool(bool),
    /// An interned string; equality is handle identity.
    Str(Arc<str>),
    Function(Arc<Function>),
    Native(Arc<NativeFunction>),
    Closure(Arc<Closure>),
}

impl Value {
    /// Human-readable name of the value's case, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::Function(_) => "function",
            Value::Native(_) => "native function",
            Value::Closure(_) => "closure",
        }
    }

    /// Add two numbers, or concatenate two strings into a new interned
    /// string. Anything else is a type error.
    pub fn add(self, other: Value, interner: &mut Interner) -> Result<Value, VmError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Str(a), Value::Str(b)) => {
                let joined = format!("{}{}", a, b);
                Ok(Value::Str(interner.intern(&joined)))
            }
            (a, b) => Err(VmError::type_error(format!(
                "Operands to ADD must be two numbers or two strings, got {} and {}",
                a.type_name(),
                b.type_name()
            ))),
        }
    }

    pub fn sub(self, other: Value) -> Result<Value, VmError> {
        self.numeric_binary(other, "SUB", |a, b| a - b)
    }

    pub fn mul(self, other: Value) -> Result<Value, VmError> {
        self.numeric_binary(other, "MUL", |a, b| a * b)
    }

    pub fn div(self, other: Value) -> Result<Value, VmError> {
        self.numeric_binary(other, "DIV", |a, b| a / b)
    }

    fn numeric_binary(
        self,
        other: Value,
        op: &str,
        apply: fn(f64, f64) -> f64,
    ) -> Result<Value, VmError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(apply(a, b))),
            (a, b) => Err(VmError::type_error(format!(
                "Operands to {} must be numbers, got {} and {}",
                op,
                a.type_name(),
                b.type_name()
            ))),
        }
    }

    pub fn less(self, other: Value) -> Result<Value, VmError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a < b)),
            (a, b) => Err(VmError::type_error(format!(
                "Operands to LESS must be numbers, got {} and {}",
                a.type_name(),
                b.type_name()
            ))),
        }
    }

    pub fn greater(self, other: Value) -> Result<Value, VmError> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a > b)),
            (a, b) => Err(VmError::type_error(format!(
                "Operands to GREATER must be numbers, got {} and {}",
                a.type_name(),
                b.type_name()
            ))),
        }
    }

    /// Value equality. Different cases are unequal; numbers compare by IEEE
    /// equality; strings by interned identity; objects by identity.
    pub fn equal(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => Arc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Arc::ptr_eq(a, b),
            (Value::Closure(a), Value::Closure(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn negate(self) -> Result<Value, VmError> {
        match self {
            Value::Number(n) => Ok(Value::Number(-n)),
            other => Err(VmError::type_error(format!(
                "Operand to NEGATE must be a number, got {}",
                other.type_name()
            ))),
        }
    }

    pub fn not(self) -> Result<Value, VmError> {
        match self {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            other => Err(VmError::type_error(format!(
                "Operand to NOT must be a boolean, got {}",
                other.type_name()
            ))),
        }
    }

    /// Strict boolean AND: both operands must already be booleans.
    pub fn and(self, other: Value) -> Result<Value, VmError> {
        self.boolean_binary(other, "AND", |a, b| a && b)
    }

    /// Strict boolean OR: both operands must already be booleans.
    pub fn or(self, other: Value) -> Result<Value, VmError> {
        self.boolean_binary(other, "OR", |a, b| a || b)
    }

    fn boolean_binary(
        self,
        other: Value,
        op: &str,
        apply: fn(bool, bool) -> bool,
    ) -> Result<Value, VmError> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(apply(a, b))),
            (a, b) => Err(VmError::type_error(format!(
                "Operands to {} must be booleans, got {} and {}",
                op,
                a.type_name(),
                b.type_name()
            ))),
        }
    }

    /// The conditional-jump predicate. Only booleans have a truthiness
    /// here: anything else is a type error.
    pub fn is_falsey(&self) -> Result<bool, VmError> {
        match self {
            Value::Bool(b) => Ok(!b),
            other => Err(VmError::type_error(format!(
                "Condition must be a boolean, got {}",
                other.type_name()
            ))),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        self.equal(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => write!(f, "{}", s),
            Value::Function(function) => write!(f, "<fn {}>", function.name),
            Value::Native(native) => write!(f, "<native fn {}>", native.name),
            Value::Closure(closure) => write!(f, "<closure {}>", closure.function.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn arithmetic_on_numbers_agrees_with_the_host() {
        let mut interner = Interner::new();
        for (x, y) in [(2.0, 3.4), (0.0, -1.5), (1e9, 1e-9)] {
            let sum = Value::Number(x).add(Value::Number(y), &mut interner).unwrap();
            assert_eq!(sum, Value::Number(x + y));
            let diff = Value::Number(x).sub(Value::Number(y)).unwrap();
            assert_eq!(diff, Value::Number(x - y));
            let product = Value::Number(x).mul(Value::Number(y)).unwrap();
            assert_eq!(product, Value::Number(x * y));
            let quotient = Value::Number(x).div(Value::Number(y)).unwrap();
            assert_eq!(quotient, Value::Number(x / y));
        }
    }

    #[test]
    fn comparisons_agree_with_the_host() {
        let lt = Value::Number(1.0).less(Value::Number(2.0)).unwrap();
        assert_eq!(lt, Value::Bool(true));
        let gt = Value::Number(1.0).greater(Value::Number(2.0)).unwrap();
        assert_eq!(gt, Value::Bool(false));
    }

    #[test]
    fn mixed_arithmetic_is_a_type_error() {
        let mut interner = Interner::new();
        let err = Value::Number(1.0)
            .add(Value::Bool(true), &mut interner)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
        let err = Value::Str(interner.intern("a")).sub(Value::Number(1.0)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn string_concatenation_interns_the_result() {
        let mut interner = Interner::new();
        let hello = Value::Str(interner.intern("foo"));
        let world = Value::Str(interner.intern("bar"));
        let joined = hello.add(world, &mut interner).unwrap();
        let direct = interner.intern("foobar");
        match joined {
            Value::Str(s) => {
                assert_eq!(s.as_ref(), "foobar");
                assert!(Arc::ptr_eq(&s, &direct));
            }
            other => panic!("Expected string, got: {:?}", other),
        }
    }

    #[test]
    fn equality_crosses_no_case_boundaries() {
        let mut interner = Interner::new();
        assert_ne!(Value::Nil, Value::Bool(false));
        assert_ne!(Value::Number(0.0), Value::Bool(false));
        assert_ne!(Value::Str(interner.intern("1")), Value::Number(1.0));
        assert_eq!(Value::Nil, Value::Nil);
    }

    #[test]
    fn interned_strings_compare_by_identity() {
        let mut interner = Interner::new();
        let a = Value::Str(interner.intern("same"));
        let b = Value::Str(interner.intern("same"));
        let c = Value::Str(interner.intern("other"));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn logic_requires_booleans() {
        assert_eq!(
            Value::Bool(true).and(Value::Bool(false)).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(Value::Bool(false).or(Value::Bool(true)).unwrap(), Value::Bool(true));
        let err = Value::Bool(true).and(Value::Nil).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
        let err = Value::Number(1.0).not().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn is_falsey_is_defined_only_on_booleans() {
        assert!(Value::Bool(false).is_falsey().unwrap());
        assert!(!Value::Bool(true).is_falsey().unwrap());
        assert_eq!(Value::Nil.is_falsey().unwrap_err().kind, ErrorKind::Type);
        assert_eq!(Value::Number(0.0).is_falsey().unwrap_err().kind, ErrorKind::Type);
    }

    #[test]
    fn negate_requires_a_number() {
        assert_eq!(Value::Number(3.0).negate().unwrap(), Value::Number(-3.0));
        assert_eq!(Value::Bool(true).negate().unwrap_err().kind, ErrorKind::Type);
    }
}
