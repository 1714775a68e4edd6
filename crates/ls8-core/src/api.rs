//! Public host-facing API contracts for embedding the execution core.

use std::fmt;

use crate::{ArchitecturalState, FaultCode, Memory, Opcode, RunState};

/// Default initial stack pointer. The stack is empty while `SP` holds it.
pub const DEFAULT_STACK_TOP: u8 = 0xFF;

/// Diagnostic verbosity, checked before the core emits any `log` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Verbosity {
    /// No per-instruction diagnostics.
    #[default]
    Off,
    /// One record per dispatched instruction, plus faults.
    Debug,
    /// Debug output plus register state after every retirement and every
    /// print event.
    Trace,
}

impl Verbosity {
    /// Matching `log` filter for hosts that install a logger.
    #[must_use]
    pub const fn level_filter(self) -> log::LevelFilter {
        match self {
            Self::Off => log::LevelFilter::Warn,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Top-level immutable configuration for a machine instance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MachineConfig {
    /// Diagnostic verbosity.
    pub verbosity: Verbosity,
    /// Initial stack pointer.
    pub stack_top: u8,
    /// Optional instruction budget for [`crate::Machine::run`].
    pub step_limit: Option<u64>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Off,
            stack_top: DEFAULT_STACK_TOP,
            step_limit: None,
        }
    }
}

/// Complete host-visible machine state used by stepping APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CoreState {
    /// Register file, `PC` and flags.
    pub arch: ArchitecturalState,
    /// 256-byte memory image with its heap boundary.
    pub memory: Memory,
    /// Current execution state.
    pub run_state: RunState,
    /// Instructions retired since the last reset.
    pub retired: u64,
}

impl Default for CoreState {
    fn default() -> Self {
        Self::with_config(&MachineConfig::default())
    }
}

impl CoreState {
    /// Creates a state with empty memory and power-on registers.
    #[must_use]
    pub fn with_config(config: &MachineConfig) -> Self {
        Self {
            arch: ArchitecturalState::with_stack_top(config.stack_top),
            memory: Memory::new(),
            run_state: RunState::Running,
            retired: 0,
        }
    }

    /// Restores power-on registers and clears any halt or fault.
    ///
    /// Memory, including the heap boundary, is preserved.
    pub fn reset_canonical(&mut self, config: &MachineConfig) {
        self.arch = ArchitecturalState::with_stack_top(config.stack_top);
        self.run_state = RunState::Running;
        self.retired = 0;
    }
}

/// Output produced by `PRN` and `PRA`, in program order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum PrintEvent {
    /// `PRN`: decimal value of a register.
    Decimal(u8),
    /// `PRA`: register value as a character.
    Char(char),
}

impl fmt::Display for PrintEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal(value) => write!(f, "{value}"),
            Self::Char(c) => write!(f, "{c}"),
        }
    }
}

/// Sink for print events. Called synchronously, in execution order.
pub trait OutputSink {
    /// Records one print event.
    fn emit(&mut self, event: PrintEvent);
}

impl OutputSink for Vec<PrintEvent> {
    fn emit(&mut self, event: PrintEvent) {
        self.push(event);
    }
}

/// Output status from one step of the fetch/execute loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepOutcome {
    /// Instruction retired; the machine is still running.
    Retired {
        /// Instruction that retired.
        opcode: Opcode,
    },
    /// `HLT` retired, or the machine was already halted.
    Halted,
    /// A fault was raised, or one was already latched.
    Fault {
        /// Canonical fault code.
        cause: FaultCode,
    },
}

/// Aggregated outcome of a successful [`crate::Machine::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunOutcome {
    /// The program halted.
    Halted {
        /// Instructions retired during this call, `HLT` included.
        steps: u64,
    },
    /// The configured step limit ran out before the program halted.
    StepLimitReached {
        /// Instructions retired during this call.
        steps: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::{
        CoreState, MachineConfig, OutputSink, PrintEvent, Verbosity, DEFAULT_STACK_TOP,
    };
    use crate::{FaultCode, GeneralRegister, RunState, MEMORY_BYTES};

    #[test]
    fn default_machine_config() {
        let config = MachineConfig::default();

        assert_eq!(config.verbosity, Verbosity::Off);
        assert_eq!(config.stack_top, DEFAULT_STACK_TOP);
        assert!(config.step_limit.is_none());
    }

    #[test]
    fn verbosity_orders_by_detail() {
        assert!(Verbosity::Off < Verbosity::Debug);
        assert!(Verbosity::Debug < Verbosity::Trace);
        assert_eq!(Verbosity::Trace.level_filter(), log::LevelFilter::Trace);
    }

    #[test]
    fn core_state_default_allocates_full_memory_and_valid_stack() {
        let state = CoreState::default();
        assert_eq!(state.memory.as_slice().len(), MEMORY_BYTES);
        assert_eq!(state.arch.sp(), DEFAULT_STACK_TOP);
        assert_eq!(state.arch.pc(), 0);
        assert_eq!(state.run_state, RunState::Running);
    }

    #[test]
    fn canonical_reset_restores_registers_and_preserves_memory() {
        let config = MachineConfig {
            stack_top: 0xF4,
            ..MachineConfig::default()
        };
        let mut state = CoreState::with_config(&config);
        state.memory.load(&[0xDE, 0xAD]).expect("fits");
        state.arch.set_gpr(GeneralRegister::R0, 0x12);
        state.arch.set_pc(0x40);
        state.arch.set_sp(0x80);
        state.run_state = RunState::Faulted(FaultCode::StackOverflow);
        state.retired = 9;

        state.reset_canonical(&config);

        assert_eq!(state.arch.gpr(GeneralRegister::R0), 0);
        assert_eq!(state.arch.pc(), 0);
        assert_eq!(state.arch.sp(), 0xF4);
        assert_eq!(state.run_state, RunState::Running);
        assert_eq!(state.retired, 0);
        assert_eq!(&state.memory.as_slice()[..2], &[0xDE, 0xAD]);
        assert_eq!(state.memory.heap_boundary(), 2);
    }

    #[test]
    fn vec_sink_preserves_order() {
        let mut sink = Vec::new();
        sink.emit(PrintEvent::Decimal(17));
        sink.emit(PrintEvent::Char('A'));

        assert_eq!(sink, vec![PrintEvent::Decimal(17), PrintEvent::Char('A')]);
        assert_eq!(sink[0].to_string(), "17");
        assert_eq!(sink[1].to_string(), "A");
    }
}
