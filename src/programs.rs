// File: src/programs.rs
//
// Hand-assembled example programs for the Flax VM.
// Each builder constructs a chunk through the public chunk-building API;
// jump operands are computed against the byte offsets noted alongside the
// emitted instructions.

use crate::bytecode::{Chunk, OpCode};
use crate::object::{Function, Interner};
use crate::value::Value;
use std::sync::Arc;

/// Number of available example programs.
pub const COUNT: u8 = 8;

/// Build example `n` (1-based), or None for an invalid selection.
pub fn build(example: u8, interner: &mut Interner) -> Option<Chunk> {
    match example {
        1 => Some(arithmetic()),
        2 => Some(booleans()),
        3 => Some(globals(interner)),
        4 => Some(conditional(interner)),
        5 => Some(while_loop()),
        6 => Some(factorial(interner)),
        7 => Some(counter(interner)),
        8 => Some(natives(interner)),
        _ => None,
    }
}

/// One-line description of example `n`.
pub fn describe(example: u8) -> Option<&'static str> {
    match example {
        1 => Some("arithmetic: (3.4 + 2.6) * 2"),
        2 => Some("booleans: AND, OR, NOT"),
        3 => Some("globals: define, assign, read back"),
        4 => Some("conditional: JUMP_IF_FALSE picks the else branch"),
        5 => Some("while loop: counts 2, 1, 0"),
        6 => Some("factorial: recursive fac(5)"),
        7 => Some("closures: a counter capturing an upvalue"),
        8 => Some("natives: clock, sleep, rand"),
        _ => None,
    }
}

/// `print (3.4 + 2.6) * 2`
fn arithmetic() -> Chunk {
    let mut chunk = Chunk::new();
    let two = chunk.add_constant(Value::Number(2.0));
    let a = chunk.add_constant(Value::Number(3.4));
    let b = chunk.add_constant(Value::Number(2.6));

    chunk.write_opcode(OpCode::Constant, 1);
    chunk.write_byte(a as u8, 1);
    chunk.write_opcode(OpCode::Constant, 1);
    chunk.write_byte(b as u8, 1);
    chunk.write_opcode(OpCode::Add, 1);
    chunk.write_opcode(OpCode::Constant, 1);
    chunk.write_byte(two as u8, 1);
    chunk.write_opcode(OpCode::Mul, 1);
    chunk.write_opcode(OpCode::Print, 1);
    chunk.write_opcode(OpCode::Nil, 2);
    chunk.write_opcode(OpCode::Return, 2);
    chunk
}

/// `print true and false; print false or true; print !true`
fn booleans() -> Chunk {
    let mut chunk = Chunk::new();

    chunk.write_opcode(OpCode::True, 1);
    chunk.write_opcode(OpCode::False, 1);
    chunk.write_opcode(OpCode::And, 1);
    chunk.write_opcode(OpCode::Print, 1);

    chunk.write_opcode(OpCode::False, 2);
    chunk.write_opcode(OpCode::True, 2);
    chunk.write_opcode(OpCode::Or, 2);
    chunk.write_opcode(OpCode::Print, 2);

    chunk.write_opcode(OpCode::True, 3);
    chunk.write_opcode(OpCode::Not, 3);
    chunk.write_opcode(OpCode::Print, 3);

    chunk.write_opcode(OpCode::Nil, 4);
    chunk.write_opcode(OpCode::Return, 4);
    chunk
}

/// `var myvar; myvar = 2.71828; print myvar`
fn globals(interner: &mut Interner) -> Chunk {
    let mut chunk = Chunk::new();
    let name = chunk.add_constant(Value::Str(interner.intern("myvar")));
    let e = chunk.add_constant(Value::Number(2.71828));

    chunk.write_opcode(OpCode::Nil, 1);
    chunk.write_opcode(OpCode::Constant, 1);
    chunk.write_byte(name as u8, 1);
    chunk.write_opcode(OpCode::DefineGlobal, 1);

    chunk.write_opcode(OpCode::Constant, 2);
    chunk.write_byte(e as u8, 2);
    chunk.write_opcode(OpCode::Constant, 2);
    chunk.write_byte(name as u8, 2);
    chunk.write_opcode(OpCode::SetGlobal, 2);

    chunk.write_opcode(OpCode::Constant, 3);
    chunk.write_byte(name as u8, 3);
    chunk.write_opcode(OpCode::GetGlobal, 3);
    chunk.write_opcode(OpCode::Print, 3);

    chunk.write_opcode(OpCode::Nil, 4);
    chunk.write_opcode(OpCode::Return, 4);
    chunk
}

/// `if (false) print "then-branch" else print "else-branch"`
///
/// JUMP_IF_FALSE leaves the condition on the stack, so both branches start
/// with an explicit POP.
fn conditional(interner: &mut Interner) -> Chunk {
    let mut chunk = Chunk::new();
    let then_text = chunk.add_constant(Value::Str(interner.intern("then-branch")));
    let else_text = chunk.add_constant(Value::Str(interner.intern("else-branch")));

    chunk.write_opcode(OpCode::False, 1); //  0
    chunk.write_opcode(OpCode::JumpIfFalse, 1); //  1, operands 2-3; else is at 11
    chunk.write_u16(7, 1);
    chunk.write_opcode(OpCode::Pop, 2); //  4
    chunk.write_opcode(OpCode::Constant, 2); //  5-6
    chunk.write_byte(then_text as u8, 2);
    chunk.write_opcode(OpCode::Print, 2); //  7
    chunk.write_opcode(OpCode::Jump, 2); //  8, operands 9-10; exit is at 15
    chunk.write_u16(4, 2);
    chunk.write_opcode(OpCode::Pop, 3); // 11
    chunk.write_opcode(OpCode::Constant, 3); // 12-13
    chunk.write_byte(else_text as u8, 3);
    chunk.write_opcode(OpCode::Print, 3); // 14
    chunk.write_opcode(OpCode::Nil, 4); // 15
    chunk.write_opcode(OpCode::Return, 4); // 16
    chunk
}

/// `var a = 3; while (a > 0) { a = a - 1; print a }`
fn while_loop() -> Chunk {
    let mut chunk = Chunk::new();
    let three = chunk.add_constant(Value::Number(3.0));
    let zero = chunk.add_constant(Value::Number(0.0));
    let one = chunk.add_constant(Value::Number(1.0));

    chunk.write_opcode(OpCode::Nil, 1); //  0, reserves slot 0
    chunk.write_opcode(OpCode::Constant, 1); //  1-2, slot 1 = a = 3
    chunk.write_byte(three as u8, 1);

    // Condition, loop start at offset 3
    chunk.write_opcode(OpCode::GetLocal, 2); //  3-4
    chunk.write_byte(1, 2);
    chunk.write_opcode(OpCode::Constant, 2); //  5-6
    chunk.write_byte(zero as u8, 2);
    chunk.write_opcode(OpCode::Greater, 2); //  7
    chunk.write_opcode(OpCode::JumpIfFalse, 2); //  8, operands 9-10; exit is at 26
    chunk.write_u16(15, 2);
    chunk.write_opcode(OpCode::Pop, 2); // 11, the condition

    // Body
    chunk.write_opcode(OpCode::GetLocal, 3); // 12-13
    chunk.write_byte(1, 3);
    chunk.write_opcode(OpCode::Constant, 3); // 14-15
    chunk.write_byte(one as u8, 3);
    chunk.write_opcode(OpCode::Sub, 3); // 16
    chunk.write_opcode(OpCode::SetLocal, 3); // 17-18
    chunk.write_byte(1, 3);
    chunk.write_opcode(OpCode::Pop, 3); // 19, assignment is a statement
    chunk.write_opcode(OpCode::GetLocal, 4); // 20-21
    chunk.write_byte(1, 4);
    chunk.write_opcode(OpCode::Print, 4); // 22
    chunk.write_opcode(OpCode::Loop, 5); // 23, operands 24-25; back to 3
    chunk.write_u16(23, 5);

    chunk.write_opcode(OpCode::Pop, 5); // 26, the condition
    chunk.write_opcode(OpCode::Nil, 6); // 27
    chunk.write_opcode(OpCode::Return, 6); // 28
    chunk
}

/// `fun fac(n) { if (n == 0) return 1; return n * fac(n - 1); } print fac(5)`
fn factorial(interner: &mut Interner) -> Chunk {
    let fac_name = interner.intern("fac");

    let mut body = Chunk::new();
    let zero = body.add_constant(Value::Number(0.0));
    let one = body.add_constant(Value::Number(1.0));
    let name = body.add_constant(Value::Str(fac_name.clone()));

    body.write_opcode(OpCode::GetLocal, 2); //  0-1, n
    body.write_byte(1, 2);
    body.write_opcode(OpCode::Constant, 2); //  2-3
    body.write_byte(zero as u8, 2);
    body.write_opcode(OpCode::Equal, 2); //  4
    body.write_opcode(OpCode::JumpIfFalse, 2); //  5, operands 6-7; else is at 12
    body.write_u16(4, 2);
    body.write_opcode(OpCode::Pop, 2); //  8, the condition
    body.write_opcode(OpCode::Constant, 2); //  9-10
    body.write_byte(one as u8, 2);
    body.write_opcode(OpCode::Return, 2); // 11, base case: 1

    body.write_opcode(OpCode::Pop, 3); // 12, the condition
    body.write_opcode(OpCode::GetLocal, 3); // 13-14, n
    body.write_byte(1, 3);
    body.write_opcode(OpCode::Constant, 3); // 15-16
    body.write_byte(name as u8, 3);
    body.write_opcode(OpCode::GetGlobal, 3); // 17, fac
    body.write_opcode(OpCode::GetLocal, 3); // 18-19, n
    body.write_byte(1, 3);
    body.write_opcode(OpCode::Constant, 3); // 20-21
    body.write_byte(one as u8, 3);
    body.write_opcode(OpCode::Sub, 3); // 22
    body.write_opcode(OpCode::Call, 3); // 23-24, fac(n - 1)
    body.write_byte(1, 3);
    body.write_opcode(OpCode::Mul, 3); // 25
    body.write_opcode(OpCode::Return, 3); // 26

    let fac = Arc::new(Function::new(fac_name.clone(), 1, body));

    let mut chunk = Chunk::new();
    let function = chunk.add_constant(Value::Function(fac));
    let name = chunk.add_constant(Value::Str(fac_name));
    let five = chunk.add_constant(Value::Number(5.0));

    chunk.write_opcode(OpCode::Nil, 5); // reserves slot 0
    chunk.write_opcode(OpCode::Constant, 5);
    chunk.write_byte(function as u8, 5);
    chunk.write_opcode(OpCode::Constant, 5);
    chunk.write_byte(name as u8, 5);
    chunk.write_opcode(OpCode::DefineGlobal, 5);

    chunk.write_opcode(OpCode::Constant, 6);
    chunk.write_byte(name as u8, 6);
    chunk.write_opcode(OpCode::GetGlobal, 6);
    chunk.write_opcode(OpCode::Constant, 6);
    chunk.write_byte(five as u8, 6);
    chunk.write_opcode(OpCode::Call, 6);
    chunk.write_byte(1, 6);
    chunk.write_opcode(OpCode::Print, 6);

    chunk.write_opcode(OpCode::Nil, 7);
    chunk.write_opcode(OpCode::Return, 7);
    chunk
}

/// A counter built from a closure: `make_counter` returns a closure that
/// increments and prints its captured count. Calling it twice prints 1, 2.
fn counter(interner: &mut Interner) -> Chunk {
    let mut increment = Chunk::new();
    let one = increment.add_constant(Value::Number(1.0));

    increment.write_opcode(OpCode::GetUpvalue, 2);
    increment.write_byte(0, 2);
    increment.write_opcode(OpCode::Constant, 2);
    increment.write_byte(one as u8, 2);
    increment.write_opcode(OpCode::Add, 2);
    increment.write_opcode(OpCode::SetUpvalue, 2);
    increment.write_byte(0, 2);
    increment.write_opcode(OpCode::Print, 3);
    increment.write_opcode(OpCode::Nil, 4);
    increment.write_opcode(OpCode::Return, 4);

    let increment_fn =
        Arc::new(Function::new(interner.intern("increment"), 0, increment).with_upvalues(1));

    let mut maker = Chunk::new();
    let zero = maker.add_constant(Value::Number(0.0));
    let inner = maker.add_constant(Value::Function(increment_fn));

    maker.write_opcode(OpCode::Constant, 1); // slot 1 = count = 0
    maker.write_byte(zero as u8, 1);
    maker.write_opcode(OpCode::Closure, 2);
    maker.write_byte(inner as u8, 2);
    maker.write_byte(1, 2); // is_local
    maker.write_byte(1, 2); // captures slot 1
    maker.write_opcode(OpCode::Return, 2);

    let maker_fn = Arc::new(Function::new(interner.intern("make_counter"), 0, maker));

    let mut chunk = Chunk::new();
    let make = chunk.add_constant(Value::Function(maker_fn));

    chunk.write_opcode(OpCode::Nil, 6); // reserves slot 0
    chunk.write_opcode(OpCode::Constant, 6); // slot 1 = the counter closure
    chunk.write_byte(make as u8, 6);
    chunk.write_opcode(OpCode::Call, 6);
    chunk.write_byte(0, 6);

    chunk.write_opcode(OpCode::GetLocal, 7);
    chunk.write_byte(1, 7);
    chunk.write_opcode(OpCode::Call, 7);
    chunk.write_byte(0, 7);
    chunk.write_opcode(OpCode::Pop, 7);

    chunk.write_opcode(OpCode::GetLocal, 8);
    chunk.write_byte(1, 8);
    chunk.write_opcode(OpCode::Call, 8);
    chunk.write_byte(0, 8);
    chunk.write_opcode(OpCode::Pop, 8);

    chunk.write_opcode(OpCode::Nil, 9);
    chunk.write_opcode(OpCode::Return, 9);
    chunk
}

/// `print clock(); sleep(0.5); print rand()`
fn natives(interner: &mut Interner) -> Chunk {
    let mut chunk = Chunk::new();
    let clock = chunk.add_constant(Value::Str(interner.intern("clock")));
    let sleep = chunk.add_constant(Value::Str(interner.intern("sleep")));
    let rand = chunk.add_constant(Value::Str(interner.intern("rand")));
    let half = chunk.add_constant(Value::Number(0.5));

    chunk.write_opcode(OpCode::Constant, 1);
    chunk.write_byte(clock as u8, 1);
    chunk.write_opcode(OpCode::GetGlobal, 1);
    chunk.write_opcode(OpCode::Call, 1);
    chunk.write_byte(0, 1);
    chunk.write_opcode(OpCode::Print, 1);

    chunk.write_opcode(OpCode::Constant, 2);
    chunk.write_byte(sleep as u8, 2);
    chunk.write_opcode(OpCode::GetGlobal, 2);
    chunk.write_opcode(OpCode::Constant, 2);
    chunk.write_byte(half as u8, 2);
    chunk.write_opcode(OpCode::Call, 2);
    chunk.write_byte(1, 2);
    chunk.write_opcode(OpCode::Pop, 2);

    chunk.write_opcode(OpCode::Constant, 3);
    chunk.write_byte(rand as u8, 3);
    chunk.write_opcode(OpCode::GetGlobal, 3);
    chunk.write_opcode(OpCode::Call, 3);
    chunk.write_byte(0, 3);
    chunk.write_opcode(OpCode::Print, 3);

    chunk.write_opcode(OpCode::Nil, 4);
    chunk.write_opcode(OpCode::Return, 4);
    chunk
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_example_builds_and_disassembles_cleanly() {
        let mut interner = Interner::new();
        for example in 1..=COUNT {
            let chunk = build(example, &mut interner).unwrap();
            assert!(describe(example).is_some());
            assert_eq!(chunk.lines().total_count(), chunk.len());

            // The disassembler must land exactly on the end of the chunk.
            let mut out = String::new();
            let mut offset = 0;
            while offset < chunk.len() {
                let next = chunk.disassemble_instruction(offset, &mut out);
                assert!(next > offset);
                offset = next;
            }
            assert_eq!(offset, chunk.len());
            assert!(!out.contains("UNKNOWN"));
            assert!(!out.contains("<truncated>"));
        }
    }

    #[test]
    fn invalid_selection_is_rejected() {
        let mut interner = Interner::new();
        assert!(build(0, &mut interner).is_none());
        assert!(build(COUNT + 1, &mut interner).is_none());
        assert!(describe(0).is_none());
    }
}
