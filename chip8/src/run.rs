use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, error, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::{Chip8, Config, FRAMES_PER_SECOND};
use chip8_display::Display;

use crate::keymap::read_keypad;

/// Whether the machine is advancing frames.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Running,
    Paused,
    /// Stopped by a fault; only a reset resumes.
    Halted,
}

pub fn run(rom: &Path, config: Config, scale: u32) -> Result<(), Box<dyn Error>> {
    let mut chip8 = Chip8::new(config);

    // Load ROM
    let file = File::open(rom)?;
    let mut reader = BufReader::new(file);
    chip8.load_rom(&mut reader)?;
    info!(
        "loaded {} at {} cycles per frame",
        rom.display(),
        chip8.config().cycles_per_frame
    );

    // Get SDL2 context
    let sdl = sdl2::init()?;
    let mut display = Display::new(&sdl, scale)?;
    let mut events = sdl.event_pump()?;

    let frame_time = Duration::from_secs(1) / FRAMES_PER_SECOND;
    let mut last_frame = Instant::now();
    let mut mode = Mode::Running;
    let mut sounding = false;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(Keycode::Space),
                    repeat: false,
                    ..
                } => {
                    mode = match mode {
                        Mode::Running => Mode::Paused,
                        Mode::Paused => Mode::Running,
                        Mode::Halted => Mode::Halted,
                    };
                    debug!("{:?}", mode);
                }
                Event::KeyDown {
                    keycode: Some(Keycode::Backspace),
                    repeat: false,
                    ..
                } => {
                    chip8.reset();
                    mode = Mode::Running;
                    info!("reset");
                }
                _ => continue,
            };
        }

        // Update state
        if mode == Mode::Running {
            chip8.set_keypad(read_keypad(&events.keyboard_state()));
            match chip8.step() {
                Ok(sound) => {
                    if sound != sounding {
                        debug!("sound {}", if sound { "on" } else { "off" });
                        sounding = sound;
                    }
                }
                Err(fault) => {
                    error!("{}; press backspace to reset", fault);
                    mode = Mode::Halted;
                }
            }
        }

        display.set_title(title(mode, sounding))?;
        display.render(chip8.frame_buffer())?;

        // Handle timing
        let elapsed = last_frame.elapsed();
        if frame_time > elapsed {
            thread::sleep(frame_time - elapsed);
        }
        last_frame = Instant::now();
    }

    Ok(())
}

fn title(mode: Mode, sounding: bool) -> &'static str {
    match (mode, sounding) {
        (Mode::Halted, _) => "Chip-8 (halted)",
        (Mode::Paused, _) => "Chip-8 (paused)",
        (Mode::Running, true) => "Chip-8 *beep*",
        (Mode::Running, false) => "Chip-8",
    }
}
