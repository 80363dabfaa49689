use dotmatrix_gb::game_boy::cpu::{Cycles, ExecutionFault};
use dotmatrix_gb::game_boy::{CYCLES_PER_FRAME, GameBoy};

use crate::common;

#[test]
fn stepping_advances_the_counter_by_the_instruction_cost() {
    // NOP; LD A,0x00; JP 0x0100
    let mut gb = common::power_on(&[0x00, 0x3e, 0x00, 0xc3, 0x00, 0x01]);

    assert_eq!(gb.step().unwrap(), Cycles(1));
    assert_eq!(gb.cycles(), 1);
    assert_eq!(gb.cpu().program_counter, 0x0101);

    assert_eq!(gb.step().unwrap(), Cycles(2));
    assert_eq!(gb.cycles(), 3);

    assert_eq!(gb.step().unwrap(), Cycles(4));
    assert_eq!(gb.cycles(), 7);
    assert_eq!(gb.cpu().program_counter, 0x0100);
}

#[test]
fn conditional_branches_cost_extra_only_when_taken() {
    // LD A,0x01; OR A (Z=0); JR NZ,+0; JR Z,+0
    let mut gb = common::power_on(&[0x3e, 0x01, 0xb7, 0x20, 0x00, 0x28, 0x00]);
    common::run(&mut gb, 2);

    assert_eq!(gb.step().unwrap(), Cycles(3)); // taken
    assert_eq!(gb.step().unwrap(), Cycles(2)); // not taken

    // XOR A (Z=1); CALL Z,0x0200 ... RET Z at 0x0200; CALL NZ never taken.
    let mut rom = common::rom_image(&[
        0x31, 0xfe, 0xdf, // LD SP,0xDFFE
        0xaf, // XOR A
        0xcc, 0x00, 0x02, // CALL Z,0x0200
        0xc4, 0x00, 0x02, // CALL NZ,0x0200
    ]);
    rom[0x200] = 0xc8; // RET Z
    let mut gb = common::power_on_image(rom);
    common::run(&mut gb, 2);

    assert_eq!(gb.step().unwrap(), Cycles(6)); // CALL Z taken
    assert_eq!(gb.step().unwrap(), Cycles(5)); // RET Z taken
    assert_eq!(gb.step().unwrap(), Cycles(3)); // CALL NZ not taken

    // JP NZ not taken after XOR A.
    let mut gb = common::power_on(&[0xaf, 0xc2, 0x00, 0x02]);
    common::run(&mut gb, 1);
    assert_eq!(gb.step().unwrap(), Cycles(3));
}

#[test]
fn an_unimplemented_opcode_is_a_fault_not_a_nop() {
    // The CB prefix page is not wired up.
    let mut gb = common::power_on(&[0xcb, 0x37]);
    let fault = gb.step().unwrap_err();
    assert_eq!(
        fault,
        ExecutionFault {
            opcode: 0xcb,
            address: 0x0100
        }
    );
    assert!(!gb.running());
    assert_eq!(gb.cycles(), 0);

    // Once faulted, stepping is a no-op.
    assert_eq!(gb.step().unwrap(), Cycles(0));
    assert_eq!(gb.cycles(), 0);
}

#[test]
fn interrupt_and_halt_opcodes_fault_distinctly() {
    for opcode in [0x10, 0x76, 0xd9, 0xf3, 0xfb] {
        let mut gb = common::power_on(&[opcode]);
        let fault = gb.step().unwrap_err();
        assert_eq!(fault.opcode, opcode);
        assert_eq!(fault.address, 0x0100);
    }
}

#[test]
fn opcodes_with_no_hardware_meaning_fault() {
    for opcode in [0xd3, 0xdb, 0xdd, 0xe3, 0xe4, 0xeb, 0xec, 0xed, 0xf4, 0xfc, 0xfd] {
        let mut gb = common::power_on(&[opcode]);
        assert!(gb.step().is_err());
        assert!(!gb.running());
    }
}

#[test]
fn fault_reports_are_printable() {
    let mut gb = common::power_on(&[0xcb]);
    let fault = gb.step().unwrap_err();
    assert_eq!(fault.to_string(), "unimplemented opcode 0xcb at 0x0100");
}

#[test]
fn a_frame_of_nops_runs_the_full_cycle_budget() {
    // The image is all zeroes outside the header, so execution is a
    // long river of NOPs at one cycle each.
    let mut gb = common::power_on(&[]);

    let frame = gb.run_frame().unwrap();
    assert!(frame.0 >= CYCLES_PER_FRAME);
    assert_eq!(gb.cycles(), frame.0 as u64);

    let before = gb.cycles();
    let second = gb.run_frame().unwrap();
    assert!(second.0 >= CYCLES_PER_FRAME);
    assert_eq!(gb.cycles(), before + second.0 as u64);
}

#[test]
fn the_cycle_counter_never_decreases() {
    let mut gb = common::power_on(&[]);
    let mut last = gb.cycles();
    for _ in 0..10_000 {
        gb.step().unwrap();
        let now = gb.cycles();
        assert!(now > last);
        last = now;
    }
}

#[test]
fn a_console_without_a_cartridge_does_not_run() {
    let mut gb = GameBoy::new();
    assert!(!gb.running());
    assert_eq!(gb.step().unwrap(), Cycles(0));
    assert_eq!(gb.run_frame().unwrap(), Cycles(0));
    assert_eq!(gb.cycles(), 0);
}

#[test]
fn a_failed_cartridge_load_stops_the_console() {
    let mut gb = common::power_on(&[]);
    assert!(gb.running());

    let missing = std::env::temp_dir().join("dotmatrix-no-such-rom.gb");
    assert!(gb.load_cartridge(&missing).is_err());
    assert!(!gb.running());
    assert_eq!(gb.step().unwrap(), Cycles(0));
}

#[test]
fn loading_a_cartridge_resets_the_register_file_and_runs() {
    let path = std::env::temp_dir().join("dotmatrix-test-rom.gb");
    std::fs::write(&path, common::rom_image(&[0x00])).unwrap();

    let mut gb = GameBoy::new();
    gb.load_cartridge(&path).unwrap();
    assert!(gb.running());
    assert_eq!(gb.cpu().program_counter, 0x0100);
    assert_eq!(gb.cpu().af(), 0x01b0);
    assert_eq!(gb.cpu().stack_pointer, 0xfffe);
    assert_eq!(gb.cartridge().title(), "TEST");

    assert_eq!(gb.step().unwrap(), Cycles(1));

    std::fs::remove_file(&path).ok();
}
