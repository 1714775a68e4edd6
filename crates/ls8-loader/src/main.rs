//! CLI entry point for the `ls8` machine runner.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use ls8_core::{Machine, MachineConfig, RunOutcome, Verbosity};
use ls8_loader::{load_program_file, StdoutSink};
use simple_logger::SimpleLogger;
use thiserror as _;
#[cfg(test)]
use tempfile as _;

const USAGE_TEXT: &str = "\
Usage: ls8 <program> [options]

Runs an LS-8 program file: one binary byte per line, `#` starts a comment.

Options:
  -v, --verbose        Log each instruction as it executes
      --trace          Also log registers after every instruction
      --max-steps <n>  Stop after <n> instructions (exit status 2)
  -h, --help           Show this help message

Examples:
  ls8 programs/print8.ls8
  ls8 programs/call.ls8 --trace
";

const EXIT_FAILURE: i32 = 1;
const EXIT_STEP_LIMIT: i32 = 2;

#[derive(Debug, PartialEq, Eq)]
struct RunArgs {
    program: PathBuf,
    verbosity: Verbosity,
    max_steps: Option<u64>,
}

#[derive(Debug, PartialEq, Eq)]
enum ParseResult {
    Run(RunArgs),
    Help,
}

#[allow(clippy::while_let_on_iterator)]
fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut program: Option<PathBuf> = None;
    let mut verbosity = Verbosity::Off;
    let mut max_steps: Option<u64> = None;

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Ok(ParseResult::Help);
        }

        if arg == "--verbose" || arg == "-v" {
            verbosity = verbosity.max(Verbosity::Debug);
            continue;
        }

        if arg == "--trace" {
            verbosity = Verbosity::Trace;
            continue;
        }

        if arg == "--max-steps" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for --max-steps".to_string())?;
            let text = value.to_string_lossy();
            let steps = text
                .parse::<u64>()
                .map_err(|_| format!("invalid value for --max-steps: {text}"))?;
            max_steps = Some(steps);
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if program.is_some() {
            return Err("multiple program paths provided".to_string());
        }
        program = Some(PathBuf::from(arg));
    }

    let program = program.ok_or_else(|| "missing program path".to_string())?;
    Ok(ParseResult::Run(RunArgs {
        program,
        verbosity,
        max_steps,
    }))
}

fn run_program(args: &RunArgs) -> Result<(), i32> {
    let image = load_program_file(&args.program).map_err(|e| {
        eprintln!("error: {e}");
        EXIT_FAILURE
    })?;

    let config = MachineConfig {
        verbosity: args.verbosity,
        step_limit: args.max_steps,
        ..MachineConfig::default()
    };
    let mut machine = Machine::new(config);
    machine.load(&image).map_err(|code| {
        eprintln!("error: {code}");
        EXIT_FAILURE
    })?;

    let mut sink = StdoutSink::stdout();
    let outcome = machine.run(&mut sink);
    sink.finish().map_err(|e| {
        eprintln!("error: failed to write output: {e}");
        EXIT_FAILURE
    })?;

    match outcome {
        Ok(RunOutcome::Halted { steps }) => {
            log::debug!("halted after {steps} instructions");
            Ok(())
        }
        Ok(RunOutcome::StepLimitReached { steps }) => {
            eprintln!("error: step limit reached after {steps} instructions");
            Err(EXIT_STEP_LIMIT)
        }
        Err(fault) => {
            eprintln!("error: {fault}");
            eprintln!("{}", fault.snapshot);
            Err(EXIT_FAILURE)
        }
    }
}

fn init_logging(verbosity: Verbosity) {
    if let Err(e) = SimpleLogger::new()
        .with_level(verbosity.level_filter())
        .init()
    {
        eprintln!("warning: logging unavailable: {e}");
    }
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Run(args)) => {
            init_logging(args.verbosity);
            match run_program(&args) {
                Ok(()) => 0,
                Err(code) => code,
            }
        }
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE_TEXT}");
            EXIT_FAILURE
        }
    };

    std::process::exit(exit_code);
}
