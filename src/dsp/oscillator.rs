use std::f32::consts::TAU;
use std::sync::Arc;

use rand::Rng;

use crate::graph::node::RenderCtx;

/*
Sound Sources for Ambience
==========================

Two kinds of source cover every scene in this crate:

SINE
    A single frequency, no harmonics. Used three ways here:
    - audible drone voices (yoga chord, music bed)
    - bird chirps and cricket pulses (short, high, very quiet)
    - control-rate LFOs driving gain or filter cutoff (see graph/lfo.rs)

NOISE
    All frequencies at equal energy. Every "nature" bed starts from white
    noise and carves it down with filters: rain is band-limited noise, wind
    is noise behind a slowly sweeping low-pass, water is noise with a fast
    ripple on its gain.

The noise source plays a fixed-length table of uniform random samples in a
loop rather than calling the RNG per sample. The table sits behind an Arc so
several layers of one scene can read equivalent noise without regenerating it
(forest uses the same table for its wind bed and its water layer).
*/

/// Phase-accumulator sine oscillator with an optional exponential frequency
/// sweep (used by chirp one-shots).
pub struct SineBlock {
    frequency: f32,
    phase: f32,
    sweep: Option<Sweep>,
}

struct Sweep {
    target_hz: f32,
    duration: f32,
    // Derived on first render, once the sample rate is known.
    state: Option<(f32, u32)>, // (per-sample ratio, samples remaining)
}

impl SineBlock {
    pub fn new(frequency: f32) -> Self {
        Self {
            frequency,
            phase: 0.0,
            sweep: None,
        }
    }

    /// Sweep exponentially from the current frequency to `target_hz` over
    /// `seconds`, starting at the first rendered sample.
    pub fn set_sweep(&mut self, target_hz: f32, seconds: f32) {
        self.sweep = Some(Sweep {
            target_hz,
            duration: seconds,
            state: None,
        });
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let sample_rate = ctx.sample_rate;

        if let Some(sweep) = &mut self.sweep {
            if sweep.state.is_none() {
                let total = (sweep.duration * sample_rate).max(1.0);
                let ratio = (sweep.target_hz / self.frequency.max(1e-3)).powf(1.0 / total);
                sweep.state = Some((ratio, total as u32));
            }
        }

        for sample in out.iter_mut() {
            *sample = (TAU * self.phase).sin();

            self.phase += self.frequency / sample_rate;
            if self.phase >= 1.0 {
                self.phase -= 1.0;
            }

            if let Some(sweep) = &mut self.sweep {
                if let Some((ratio, remaining)) = &mut sweep.state {
                    if *remaining > 0 {
                        self.frequency *= *ratio;
                        *remaining -= 1;
                    }
                }
            }
        }
    }
}

/// Shared table of uniform white noise in [-1, 1].
///
/// Cloning is cheap (Arc bump); clones read the same samples.
#[derive(Clone)]
pub struct NoiseTable {
    samples: Arc<[f32]>,
}

impl NoiseTable {
    pub fn generate<R: Rng>(rng: &mut R, len: usize) -> Self {
        let samples: Vec<f32> = (0..len.max(1)).map(|_| rng.gen_range(-1.0..=1.0)).collect();
        Self {
            samples: samples.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Looped playback over a noise table.
pub struct NoiseBlock {
    table: NoiseTable,
    position: usize,
}

impl NoiseBlock {
    pub fn new(table: NoiseTable) -> Self {
        Self { table, position: 0 }
    }

    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.table.samples[self.position];
            self.position += 1;
            if self.position == self.table.samples.len() {
                self.position = 0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::TAU;

    #[test]
    fn sine_matches_closed_form() {
        let sample_rate = 48_000.0;
        let frequency = 440.0;
        let ctx = RenderCtx::new(sample_rate);
        let mut osc = SineBlock::new(frequency);

        let mut buffer = vec![0.0f32; 128];
        osc.render(&mut buffer, &ctx);

        // sample n should be sin(2pi f n / sr)
        let sample_index = 12;
        let expected = (TAU * frequency * sample_index as f32 / sample_rate).sin();
        let actual = buffer[sample_index];
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn sweep_reaches_target_frequency() {
        let ctx = RenderCtx::new(48_000.0);
        let mut osc = SineBlock::new(1800.0);
        osc.set_sweep(2200.0, 0.15);

        // Render past the sweep duration.
        let mut buffer = vec![0.0f32; 48_000 / 4];
        osc.render(&mut buffer, &ctx);

        assert!(
            (osc.frequency() - 2200.0).abs() < 5.0,
            "sweep ended at {} Hz",
            osc.frequency()
        );
    }

    #[test]
    fn noise_stays_in_range_and_loops() {
        let mut rng = Pcg32::seed_from_u64(7);
        let table = NoiseTable::generate(&mut rng, 512);
        let mut noise = NoiseBlock::new(table.clone());

        let mut buffer = vec![0.0f32; 1024];
        noise.render(&mut buffer);

        for &sample in &buffer {
            assert!((-1.0..=1.0).contains(&sample));
        }
        // Loop point: second pass repeats the first.
        assert_eq!(buffer[0], buffer[512]);
        assert_eq!(buffer[100], buffer[612]);
    }

    #[test]
    fn table_clones_share_samples() {
        let mut rng = Pcg32::seed_from_u64(7);
        let table = NoiseTable::generate(&mut rng, 64);

        let mut a = NoiseBlock::new(table.clone());
        let mut b = NoiseBlock::new(table);
        let mut buf_a = vec![0.0f32; 64];
        let mut buf_b = vec![0.0f32; 64];
        a.render(&mut buf_a);
        b.render(&mut buf_b);

        assert_eq!(buf_a, buf_b);
    }
}
