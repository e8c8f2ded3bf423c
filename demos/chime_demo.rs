//! Play the feedback tones: chime, then click, over a quiet rain bed.
//!
//! Run with: cargo run --example chime_demo

use std::thread::sleep;
use std::time::Duration;

use stillscape::io::AudioRuntime;
use stillscape::{EngineConfig, Mode};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let (_runtime, mut handle, _vis) = AudioRuntime::start(EngineConfig::default())?;

    handle.set_mode(Mode::Rain);
    sleep(Duration::from_secs(5));

    println!("chime");
    handle.play_chime();
    sleep(Duration::from_secs(2));

    println!("click");
    handle.play_click();
    sleep(Duration::from_secs(1));

    handle.set_mode(Mode::Off);
    sleep(Duration::from_secs(2));

    Ok(())
}
