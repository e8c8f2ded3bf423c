//! Render a forest session offline and print per-second levels.
//!
//! No audio device needed - the engine runs entirely on its frame clock.
//! Useful for eyeballing fade shapes and event density.
//!
//! Run with: cargo run --example offline_bounce

use stillscape::{AmbientEngine, EngineConfig, Mode};

const SAMPLE_RATE: f32 = 48_000.0;

fn main() {
    env_logger::init();

    let mut engine = AmbientEngine::new(EngineConfig::default(), SAMPLE_RATE);
    engine.set_mode(Mode::Forest);

    let mut buffer = vec![0.0f32; 512];
    let blocks_per_second = (SAMPLE_RATE / 512.0) as usize;

    println!("sec   rms      peak     events");
    for second in 0..30 {
        let mut peak = 0.0f32;
        let mut sum_squares = 0.0f64;
        let mut samples = 0usize;
        let mut events = 0usize;

        for _ in 0..blocks_per_second {
            engine.render_block(&mut buffer);
            events = events.max(engine.one_shot_count());
            for &sample in &buffer {
                peak = peak.max(sample.abs());
                sum_squares += (sample as f64) * (sample as f64);
            }
            samples += buffer.len();
        }

        let rms = (sum_squares / samples as f64).sqrt();
        let bar = "#".repeat((rms * 400.0) as usize);
        println!("{second:>3}   {rms:.4}   {peak:.4}   {events:<3} {bar}");
    }
}
