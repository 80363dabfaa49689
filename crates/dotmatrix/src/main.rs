use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dotmatrix_gb::game_boy::GameBoy;

/// Game Boy emulation core runner. Serial output written by the
/// program under emulation appears on stdout.
#[derive(Parser, Debug)]
#[command(name = "dotmatrix")]
struct Args {
    /// Path to the cartridge ROM image
    rom: PathBuf,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 60)]
    frames: u32,

    /// Print the CPU register file after execution
    #[arg(long)]
    dump_cpu: bool,

    /// Hex-dump a bus address range after execution, e.g. c000:c0ff
    #[arg(long, value_name = "START:END")]
    dump_memory: Option<String>,
}

fn parse_range(range: &str) -> Option<(u16, u16)> {
    let (start, end) = range.split_once(':')?;
    let start = u16::from_str_radix(start.trim_start_matches("0x"), 16).ok()?;
    let end = u16::from_str_radix(end.trim_start_matches("0x"), 16).ok()?;
    (start <= end).then_some((start, end))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut gb = GameBoy::new();
    if let Err(e) = gb.load_cartridge(&args.rom) {
        eprintln!("Failed to load {}: {e}", args.rom.display());
        return ExitCode::FAILURE;
    }

    for _ in 0..args.frames {
        if let Err(fault) = gb.run_frame() {
            eprintln!("Execution fault: {fault}");
            return ExitCode::FAILURE;
        }
    }

    if args.dump_cpu {
        println!("{:?}", gb.cpu());
    }

    if let Some(range) = &args.dump_memory {
        match parse_range(range) {
            Some((start, end)) => print!("{}", gb.dump_region(start, end)),
            None => {
                eprintln!("Bad range {range:?}, expected start:end in hex");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
