// File: src/main.rs
//
// Main entry point for the Flax bytecode VM.
// Parses command-line arguments, assembles the selected example program,
// and hands it to the execution engine.

use clap::Parser as ClapParser;
use colored::Colorize;
use flax::natives;
use flax::object::Interner;
use flax::programs;
use flax::vm::{InterpretResult, Vm, VmOptions};
use std::process::ExitCode;

#[derive(ClapParser)]
#[command(
    name = "flax",
    about = "Flax: a stack-based bytecode virtual machine",
    version = env!("CARGO_PKG_VERSION"),
    long_about = None
)]
struct Cli {
    /// Example program to run (1 through 8)
    #[arg(short = 'x', long, value_name = "N")]
    example: Option<u8>,

    /// List the available example programs
    #[arg(short, long)]
    list: bool,

    /// Sleep one second between instructions (visual demos)
    #[arg(short, long)]
    slow: bool,

    /// Print the operand stack and each instruction as it executes
    #[arg(short, long)]
    trace: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.list {
        println!("Available examples:");
        for example in 1..=programs::COUNT {
            if let Some(description) = programs::describe(example) {
                println!("  {}  {}", example, description);
            }
        }
        return ExitCode::SUCCESS;
    }

    // No selection is an invalid selection: exit 1, not a clap usage error.
    let selection = match cli.example {
        Some(n) => n,
        None => {
            eprintln!(
                "{}: no example selected; use -x <N> to run one or -l to list them",
                "error".red().bold()
            );
            return ExitCode::FAILURE;
        }
    };

    let mut interner = Interner::new();
    let chunk = match programs::build(selection, &mut interner) {
        Some(chunk) => chunk,
        None => {
            eprintln!(
                "{}: no example {} (valid range is 1 through {})",
                "error".red().bold(),
                selection,
                programs::COUNT
            );
            return ExitCode::FAILURE;
        }
    };

    if cli.trace {
        let title = format!("example {}", selection);
        print!("{}", chunk.disassemble(&title));
    }

    let options = VmOptions::default().with_trace(cli.trace).with_slow(cli.slow);
    let mut vm = Vm::with_options(chunk, interner, options);
    natives::install(&mut vm);

    match vm.interpret() {
        InterpretResult::Ok => ExitCode::SUCCESS,
        InterpretResult::CompileError | InterpretResult::RuntimeError => ExitCode::FAILURE,
    }
}
