//! The `Machine` façade: one owned core state plus its configuration.

use crate::execute::step_one;
use crate::{
    CoreState, FaultCode, MachineConfig, MachineFault, OutputSink, RunOutcome, StepOutcome,
    TraceSnapshot, Verbosity,
};

/// An LS-8 machine instance.
///
/// A machine is exclusively owned by its caller; stepping requires `&mut`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    state: CoreState,
    config: MachineConfig,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(MachineConfig::default())
    }
}

impl Machine {
    /// Creates a machine with zeroed memory and power-on registers.
    #[must_use]
    pub fn new(config: MachineConfig) -> Self {
        Self {
            state: CoreState::with_config(&config),
            config,
        }
    }

    /// Clears memory, copies `program` to address 0, records the heap
    /// boundary and resets registers.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::OutOfRangeAddress`] when `program` exceeds 256
    /// bytes. The machine is unchanged in that case.
    pub fn load(&mut self, program: &[u8]) -> Result<(), FaultCode> {
        self.state.memory.load(program)?;
        self.reset();
        if self.config.verbosity >= Verbosity::Debug {
            log::debug!(
                "loaded {} bytes, heap boundary {:#04X}",
                program.len(),
                self.state.memory.heap_boundary()
            );
        }
        Ok(())
    }

    /// Restores power-on registers and clears any halt or fault. Memory is kept.
    pub fn reset(&mut self) {
        self.state.reset_canonical(&self.config);
    }

    /// Current machine state.
    #[must_use]
    pub const fn state(&self) -> &CoreState {
        &self.state
    }

    /// Mutable machine state, for hosts that poke registers or memory.
    pub fn state_mut(&mut self) -> &mut CoreState {
        &mut self.state
    }

    /// Configuration supplied at construction.
    #[must_use]
    pub const fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Executes a single instruction.
    pub fn step(&mut self, out: &mut dyn OutputSink) -> StepOutcome {
        step_one(&mut self.state, out, &self.config)
    }

    /// Captures a trace snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> TraceSnapshot {
        TraceSnapshot::capture(&self.state)
    }

    /// Runs until `HLT`, a fault, or the configured step limit.
    ///
    /// # Errors
    ///
    /// Returns a [`MachineFault`] carrying the fault code and a snapshot
    /// taken at the faulting instruction.
    pub fn run(&mut self, out: &mut dyn OutputSink) -> Result<RunOutcome, MachineFault> {
        let start = self.state.retired;
        loop {
            let steps = self.state.retired - start;
            if self.config.step_limit.is_some_and(|limit| steps >= limit) {
                if self.config.verbosity >= Verbosity::Debug {
                    log::debug!("step limit reached after {steps} instructions");
                }
                return Ok(RunOutcome::StepLimitReached { steps });
            }

            match self.step(out) {
                StepOutcome::Retired { .. } => {}
                StepOutcome::Halted => {
                    return Ok(RunOutcome::Halted {
                        steps: self.state.retired - start,
                    });
                }
                StepOutcome::Fault { cause } => {
                    return Err(MachineFault {
                        code: cause,
                        snapshot: self.snapshot(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::Machine;
    use crate::{
        FaultCode, GeneralRegister, MachineConfig, PrintEvent, RunOutcome, RunState, StepOutcome,
        Verbosity,
    };

    struct CapturingLogger {
        lines: Mutex<Vec<String>>,
    }

    impl log::Log for CapturingLogger {
        fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            let line = record.args().to_string();
            self.lines.lock().expect("logger lock").push(line);
        }

        fn flush(&self) {}
    }

    static LOGGER: CapturingLogger = CapturingLogger {
        lines: Mutex::new(Vec::new()),
    };

    fn machine_log_lines() -> Vec<String> {
        LOGGER
            .lines
            .lock()
            .expect("logger lock")
            .iter()
            .filter(|line| line.starts_with("loaded ") || line.starts_with("step limit"))
            .cloned()
            .collect()
    }

    fn spin(verbosity: Verbosity) {
        let config = MachineConfig {
            step_limit: Some(4),
            verbosity,
            ..MachineConfig::default()
        };
        let mut machine = Machine::new(config);
        // LDI R0, 0; JMP R0
        machine.load(&[0x82, 0x00, 0x00, 0x54, 0x00]).expect("fits");
        let mut out = Vec::new();
        assert_eq!(
            machine.run(&mut out),
            Ok(RunOutcome::StepLimitReached { steps: 4 })
        );
    }

    #[test]
    fn load_rejects_oversized_image_and_keeps_memory() {
        let mut machine = Machine::default();
        machine.load(&[0x01, 0x02]).expect("fits");

        assert_eq!(machine.load(&[0; 257]), Err(FaultCode::OutOfRangeAddress));
        assert_eq!(&machine.state().memory.as_slice()[..2], &[0x01, 0x02]);
    }

    #[test]
    fn load_resets_registers_and_run_state() {
        let mut machine = Machine::default();
        machine.load(&[0x01]).expect("fits");
        let mut out = Vec::new();
        assert_eq!(machine.step(&mut out), StepOutcome::Halted);

        machine.load(&[0x00, 0x01]).expect("fits");

        assert_eq!(machine.state().arch.pc(), 0);
        assert_eq!(machine.state().run_state, RunState::Running);
        assert_eq!(machine.state().memory.heap_boundary(), 2);
    }

    #[test]
    fn run_reports_steps_including_halt() {
        let mut machine = Machine::default();
        // LDI R0, 7; PRN R0; HLT
        machine.load(&[0x82, 0x00, 0x07, 0x47, 0x00, 0x01]).expect("fits");
        let mut out = Vec::new();

        assert_eq!(machine.run(&mut out), Ok(RunOutcome::Halted { steps: 3 }));
        assert_eq!(out, vec![PrintEvent::Decimal(7)]);
    }

    #[test]
    fn run_stops_at_step_limit() {
        let config = MachineConfig {
            step_limit: Some(10),
            ..MachineConfig::default()
        };
        let mut machine = Machine::new(config);
        // LDI R0, 0; JMP R0
        machine.load(&[0x82, 0x00, 0x00, 0x54, 0x00]).expect("fits");
        let mut out = Vec::new();

        assert_eq!(
            machine.run(&mut out),
            Ok(RunOutcome::StepLimitReached { steps: 10 })
        );
        assert_eq!(machine.state().run_state, RunState::Running);
    }

    #[test]
    fn run_fault_carries_snapshot_at_faulting_pc() {
        let mut machine = Machine::default();
        // LDI R1, 5; <unassigned 0xFF>
        machine.load(&[0x82, 0x01, 0x05, 0xFF]).expect("fits");
        let mut out = Vec::new();

        let fault = machine.run(&mut out).expect_err("unknown opcode");

        assert_eq!(fault.code, FaultCode::UnrecognizedOpcode);
        assert_eq!(fault.snapshot.pc, 3);
        assert_eq!(fault.snapshot.opcode_byte(), Some(0xFF));
        assert_eq!(fault.snapshot.registers[1], 5);
        assert_eq!(fault.to_string(), "unrecognized opcode at pc 0x03");
    }

    #[test]
    fn reset_clears_latched_fault() {
        let mut machine = Machine::default();
        machine.load(&[0xFF]).expect("fits");
        let mut out = Vec::new();
        assert!(machine.run(&mut out).is_err());

        machine.reset();
        machine
            .state_mut()
            .arch
            .set_gpr(GeneralRegister::R0, 1);

        assert_eq!(machine.state().run_state, RunState::Running);
        assert_eq!(machine.state().arch.gpr(GeneralRegister::R0), 1);
    }

    #[test]
    fn load_and_step_limit_logging_follows_configured_verbosity() {
        log::set_logger(&LOGGER).expect("only this test installs a logger");
        log::set_max_level(log::LevelFilter::Trace);

        spin(Verbosity::Off);
        assert!(machine_log_lines().is_empty());

        spin(Verbosity::Debug);
        assert_eq!(
            machine_log_lines(),
            vec![
                "loaded 5 bytes, heap boundary 0x05".to_owned(),
                "step limit reached after 4 instructions".to_owned(),
            ]
        );
    }
}
