use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use chip8_core::{Config, FaultPolicy, CYCLES_PER_FRAME};

mod keymap;
mod run;

/// Runs a Chip-8 ROM in an SDL2 window.
///
/// Keys 1234/QWER/ASDF/ZXCV form the keypad. Space pauses, backspace resets,
/// escape quits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the ROM to run
    rom: PathBuf,

    /// Wrap out-of-range memory and stack accesses instead of halting
    #[arg(long)]
    legacy: bool,

    /// Instructions executed per 60 Hz frame
    #[arg(long, default_value_t = CYCLES_PER_FRAME)]
    cycles_per_frame: u32,

    /// Window pixels per Chip-8 pixel
    #[arg(long, default_value_t = 10)]
    scale: u32,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            cycles_per_frame: self.cycles_per_frame,
            fault_policy: if self.legacy {
                FaultPolicy::Legacy
            } else {
                FaultPolicy::Strict
            },
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    run::run(&args.rom, args.config(), args.scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["chip8", "pong.ch8"]);
        assert_eq!(args.rom, PathBuf::from("pong.ch8"));
        assert_eq!(args.scale, 10);
        assert_eq!(args.config(), Config::default());
    }

    #[test]
    fn test_legacy_args() {
        let args = Args::parse_from(["chip8", "--legacy", "--cycles-per-frame", "12", "pong.ch8"]);
        assert_eq!(
            args.config(),
            Config {
                cycles_per_frame: 12,
                fault_policy: FaultPolicy::Legacy,
            }
        );
    }
}
