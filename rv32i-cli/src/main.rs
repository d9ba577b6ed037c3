mod loader;

use clap::Parser;
use log::info;
use rv32i_core::simulator::{Config, Simulator};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Executable image to run (ELF, or a flat raw binary as fallback).
    binary: String,

    /// Maximum number of instructions to execute before giving up.
    #[arg(long, default_value_t = 10_000_000)]
    max_steps: u64,
}

fn main() -> std::process::ExitCode {
    env_logger::init();
    let args = Args::parse();

    let config = Config::default();

    let (image, entry_point) = match loader::load(&args.binary, config.rom_size) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("failed to read {}: {err}", args.binary);
            return std::process::ExitCode::FAILURE;
        }
    };

    let mut simulator = match Simulator::new(config, &image, entry_point) {
        Ok(simulator) => simulator,
        Err(err) => {
            eprintln!("failed to construct simulator: {err}");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(max_steps = args.max_steps; "starting simulation at entry_point={entry_point:#010x}");
    simulator.step(args.max_steps);

    if !simulator.halted() {
        eprintln!("step budget of {} exhausted without halting", args.max_steps);
        return std::process::ExitCode::FAILURE;
    }

    let a0 = simulator.arch_state().gpr[10];
    if a0 == 0 {
        std::process::ExitCode::SUCCESS
    } else {
        std::process::ExitCode::FAILURE
    }
}
