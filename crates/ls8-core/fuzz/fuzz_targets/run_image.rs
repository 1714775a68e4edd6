#![no_main]

use libfuzzer_sys::fuzz_target;
use ls8_core::{Decoder, Machine, MachineConfig, RunOutcome, MEMORY_BYTES};

fuzz_target!(|data: &[u8]| {
    let Some((&stack_top, image)) = data.split_first() else {
        return;
    };
    let image = &image[..image.len().min(MEMORY_BYTES)];

    let config = MachineConfig {
        stack_top,
        step_limit: Some(4_096),
        ..MachineConfig::default()
    };
    let mut machine = Machine::new(config);
    if machine.load(image).is_err() {
        return;
    }

    for pc in 0..=MEMORY_BYTES as u16 {
        let _ = Decoder::decode(&machine.state().memory, pc);
    }

    let mut out = Vec::new();
    match machine.run(&mut out) {
        Ok(RunOutcome::Halted { steps } | RunOutcome::StepLimitReached { steps }) => {
            assert!(steps <= 4_096);
        }
        Err(fault) => {
            assert_eq!(machine.state().arch.pc(), fault.snapshot.pc);
            let _ = fault.snapshot.to_string();
        }
    }
});
