//! Cycle through every ambience for ten seconds each.
//!
//! Run with: cargo run --example ambience_tour

use std::thread::sleep;
use std::time::Duration;

use stillscape::io::AudioRuntime;
use stillscape::{EngineConfig, Mode};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let (_runtime, mut handle, _vis) = AudioRuntime::start(EngineConfig::default())?;

    for mode in Mode::ALL.into_iter().filter(|m| *m != Mode::Off) {
        println!("now playing: {mode}");
        handle.set_mode(mode);
        sleep(Duration::from_secs(10));
    }

    println!("fading out");
    handle.set_mode(Mode::Off);
    sleep(Duration::from_secs(2));

    Ok(())
}
