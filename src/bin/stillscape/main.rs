//! stillscape - terminal ambience player
//!
//! Run with: cargo run

mod app;
mod ui;

use app::App;
use stillscape::io::AudioRuntime;
use stillscape::EngineConfig;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let (runtime, handle, vis) = AudioRuntime::start(EngineConfig::default())?;

    let mut terminal = ratatui::init();
    let result = App::new(handle, vis, runtime.sample_rate()).run(&mut terminal);
    ratatui::restore();

    result
}
