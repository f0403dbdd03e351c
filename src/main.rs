//! Nestest comparison runner.
//!
//! Loads a cartridge, forces the nestest automation entry point, and steps
//! the CPU while diffing register state against a reference log when one is
//! present. Usage: famicore [path/to/rom.nes] [path/to/reference.log]

use std::env;
use std::fs;
use std::process::ExitCode;

use ansi_term::Colour::{Green, Red, Yellow};
use famicore::cartridge::cartridge::Cartridge;
use famicore::console::Console;
use famicore::cpu::cpu::Cpu;
use famicore::trace::disassemble;

fn main() -> ExitCode {
    let rom_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "test/nestest.nes".to_string());
    let log_path = env::args()
        .nth(2)
        .unwrap_or_else(|| "test/nestest.log".to_string());

    let cart = match Cartridge::load(&rom_path) {
        Ok(cart) => cart,
        Err(err) => {
            eprintln!("{}: {err}", Red.paint(rom_path));
            return ExitCode::FAILURE;
        }
    };

    let mut console = Console::new();
    if let Err(err) = console.attach_cartridge(cart) {
        eprintln!("{}", Red.paint(err.to_string()));
        return ExitCode::FAILURE;
    }
    console.attach_cpu(Cpu::new());

    // Nestest automation entry: no reset vector, fixed start state.
    if let Some(cpu) = console.cpu_mut() {
        cpu.pc = 0xC000;
        cpu.cycles = 7;
    }

    let reference: Vec<String> = match fs::read_to_string(&log_path) {
        Ok(log) => log.lines().filter_map(canonical_log_line).collect(),
        Err(_) => Vec::new(),
    };

    // Without a reference log, print a bounded trace instead of diffing.
    let limit = if reference.is_empty() {
        10_000
    } else {
        usize::MAX
    };

    let mut line = 0usize;
    while line < limit {
        let actual = state_line(&console);

        if let Some(expected) = reference.get(line) {
            if *expected != actual {
                println!("{}", Yellow.paint(format!("line {}", line + 1)));
                println!("expected {}", Green.paint(expected.clone()));
                println!("actual   {}", Red.paint(actual));
                return ExitCode::FAILURE;
            }
        } else if !reference.is_empty() {
            println!("{}", Green.paint(format!("matched {line} lines")));
            return ExitCode::SUCCESS;
        }

        match console.step() {
            Ok(trace) => {
                if reference.is_empty() {
                    println!("{actual}  {}", disassemble(&trace));
                }
            }
            Err(err) => {
                println!("{}", Red.paint(err.to_string()));
                return ExitCode::FAILURE;
            }
        }
        line += 1;
    }
    ExitCode::SUCCESS
}

/// The fields we compare, in a fixed layout.
fn state_line(console: &Console) -> String {
    match console.cpu() {
        Some(cpu) => format!(
            "{:04X} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            cpu.pc,
            cpu.a,
            cpu.x,
            cpu.y,
            cpu.flags.to_byte(),
            cpu.sp,
            cpu.cycles
        ),
        None => String::new(),
    }
}

/// Reduce one nestest.log line to the compared fields. Lines that do not
/// carry all of them (blank lines, headers) are skipped.
fn canonical_log_line(line: &str) -> Option<String> {
    let pc = line.get(0..4)?;
    let a = tagged_field(line, "A:")?;
    let x = tagged_field(line, "X:")?;
    let y = tagged_field(line, "Y:")?;
    let p = tagged_field(line, "P:")?;
    let sp = tagged_field(line, "SP:")?;
    let cyc = line.rfind("CYC:").map(|i| line[i + 4..].trim())?;
    Some(format!("{pc} A:{a} X:{x} Y:{y} P:{p} SP:{sp} CYC:{cyc}"))
}

fn tagged_field<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let start = line.find(tag)? + tag.len();
    line.get(start..start + 2)
}
