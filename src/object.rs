// File: src/object.rs
//
// Heap-allocated runtime objects for the Flax VM: interned strings,
// functions, native functions, closures, and captured upvalue cells.

use crate::bytecode::Chunk;
use crate::errors::VmError;
use crate::value::Value;
use ahash::AHashSet;
use std::sync::{Arc, Mutex};

/// The string intern pool.
///
/// Every string the VM touches goes through here: interning the same bytes
/// twice returns the same handle, so string equality is pointer equality.
/// The pool is owned by whoever builds values (the chunk producers, then
/// the VM) and is threaded through explicitly; there is no process-global.
#[derive(Debug, Default)]
pub struct Interner {
    pool: AHashSet<Arc<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self { pool: AHashSet::new() }
    }

    /// Return the canonical handle for `text`, creating it on first use.
    pub fn intern(&mut self, text: &str) -> Arc<str> {
        if let Some(existing) = self.pool.get(text) {
            return existing.clone();
        }
        let handle: Arc<str> = Arc::from(text);
        self.pool.insert(handle.clone());
        handle
    }

    /// Number of distinct strings interned so far.
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}

/// Signature for host-callable native functions.
pub type NativeFn = fn(&[Value]) -> Result<Value, VmError>;

/// A compiled function: a name, an arity, and the bytecode it executes.
/// The function owns its chunk; destroying the function destroys the chunk.
#[derive(Debug)]
pub struct Function {
    pub name: Arc<str>,
    pub arity: u8,
    /// Number of (is_local, index) operand pairs a CLOSURE instruction
    /// wrapping this function must supply.
    pub upvalue_count: usize,
    pub chunk: Chunk,
}

impl Function {
    pub fn new(name: Arc<str>, arity: u8, chunk: Chunk) -> Self {
        Self { name, arity, upvalue_count: 0, chunk }
    }

    /// Declare how many upvalues closures over this function capture.
    pub fn with_upvalues(mut self, count: usize) -> Self {
        self.upvalue_count = count;
        self
    }
}

/// A host-provided callable. Arity is enforced at the call site.
#[derive(Debug)]
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: u8,
    pub func: NativeFn,
}

impl NativeFunction {
    pub fn new(name: &'static str, arity: u8, func: NativeFn) -> Self {
        Self { name, arity, func }
    }
}

/// A heap cell holding one captured value. Cells are closed at capture
/// time: CLOSURE copies the enclosing frame's slot into the cell, and
/// closures that capture the same variable share the cell.
pub type UpvalueCell = Arc<Mutex<Value>>;

/// Allocate a fresh upvalue cell holding `value`.
pub fn new_cell(value: Value) -> UpvalueCell {
    Arc::new(Mutex::new(value))
}

/// A closure pairs a function with its captured upvalue cells.
/// The function is shared, not owned; many closures may wrap one function.
#[derive(Debug)]
pub struct Closure {
    pub function: Arc<Function>,
    pub upvalues: Vec<UpvalueCell>,
}

impl Closure {
    pub fn new(function: Arc<Function>, upvalues: Vec<UpvalueCell>) -> Self {
        Self { function, upvalues }
    }
}
