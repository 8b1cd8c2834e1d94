// File: src/natives.rs
//
// Built-in native functions for the Flax VM.
// Implemented in Rust and bound as globals; the VM enforces arity at the
// call site.

use crate::errors::VmError;
use crate::value::Value;
use crate::vm::Vm;
use chrono::Utc;
use rand::Rng;
use std::thread;
use std::time::Duration;

/// Bind the standard natives into the VM's globals.
pub fn install(vm: &mut Vm) {
    vm.define_native("clock", 0, clock);
    vm.define_native("sleep", 1, sleep);
    vm.define_native("rand", 0, rand_float);
}

/// Seconds since the Unix epoch, with millisecond precision.
fn clock(_args: &[Value]) -> Result<Value, VmError> {
    Ok(Value::Number(Utc::now().timestamp_millis() as f64 / 1000.0))
}

/// Block the calling thread for the given number of seconds.
fn sleep(args: &[Value]) -> Result<Value, VmError> {
    match args {
        [Value::Number(seconds)] if *seconds >= 0.0 && seconds.is_finite() => {
            thread::sleep(Duration::from_secs_f64(*seconds));
            Ok(Value::Nil)
        }
        [other] => Err(VmError::type_error(format!(
            "sleep() expects a non-negative number of seconds, got {}",
            other.type_name()
        ))),
        _ => Err(VmError::type_error("sleep() expects exactly one argument")),
    }
}

/// Uniform random float in [0, 1).
fn rand_float(_args: &[Value]) -> Result<Value, VmError> {
    Ok(Value::Number(rand::thread_rng().gen::<f64>()))
}
