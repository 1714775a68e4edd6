//! Program loading and console output for the LS-8 machine.

/// Text program format and file loading.
pub mod program;
pub use program::{load_program_file, parse_program, LoadError};

/// Standard-output sink for print instructions.
pub mod console;
pub use console::{ConsoleSink, StdoutSink};

use simple_logger as _;
