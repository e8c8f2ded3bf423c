//! Per-mode graph recipes.
//!
//! Each ambience is a pure builder: given the shared noise table it returns
//! a [`Scene`] holding the mode's layers and the event specs its schedulers
//! should run. The engine owns the result and tears it down wholesale on
//! every transition, so a recipe never has to think about stopping.

/// Yoga drone: four-voice sine chord with per-voice breathing.
pub mod drone;
/// Forest: wind bed, babbling-brook layer, occasional chirps.
pub mod forest;
/// Meadow: open-space wind with butterflies, crickets, sparse chirps.
pub mod meadow;
/// Rain: band-limited noise.
pub mod rain;
/// Waves: low-passed noise with a slow swell.
pub mod waves;

use std::fmt;

use crate::dsp::oscillator::NoiseTable;
use crate::events::EventSpec;
use crate::graph::GraphNode;

/// The selectable ambiences. `Off` is a mode, not an absence of one: it is
/// what the engine transitions to when silence is requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    Off,
    Rain,
    Waves,
    Forest,
    Yoga,
    Meadow,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Off,
        Mode::Rain,
        Mode::Waves,
        Mode::Forest,
        Mode::Yoga,
        Mode::Meadow,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Off => "off",
            Mode::Rain => "rain",
            Mode::Waves => "waves",
            Mode::Forest => "forest",
            Mode::Yoga => "yoga",
            Mode::Meadow => "meadow",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fully-built ambience: continuous layers plus event declarations.
pub struct Scene {
    pub mode: Mode,
    pub layers: Vec<Box<dyn GraphNode>>,
    pub events: Vec<EventSpec>,
}

impl Scene {
    /// Build the graph for `mode`. `Off` has no scene.
    pub fn build(mode: Mode, noise: &NoiseTable) -> Option<Scene> {
        match mode {
            Mode::Off => None,
            Mode::Rain => Some(rain::build(noise)),
            Mode::Waves => Some(waves::build(noise)),
            Mode::Forest => Some(forest::build(noise)),
            Mode::Yoga => Some(drone::build()),
            Mode::Meadow => Some(meadow::build(noise)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RenderCtx;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn noise() -> NoiseTable {
        let mut rng = Pcg32::seed_from_u64(17);
        NoiseTable::generate(&mut rng, 8_192)
    }

    #[test]
    fn off_builds_nothing() {
        assert!(Scene::build(Mode::Off, &noise()).is_none());
    }

    #[test]
    fn every_audible_mode_builds_and_renders() {
        let table = noise();
        let ctx = RenderCtx::new(48_000.0);

        for mode in Mode::ALL.into_iter().filter(|m| *m != Mode::Off) {
            let mut scene = Scene::build(mode, &table).expect("audible mode must build");
            assert_eq!(scene.mode, mode);
            assert!(!scene.layers.is_empty(), "{mode} has no layers");

            let mut mix = vec![0.0f32; 2_048];
            let mut layer_buf = vec![0.0f32; 2_048];
            // A second of audio gets past the drone's 4 s entrance start.
            for _ in 0..24 {
                mix.fill(0.0);
                for layer in scene.layers.iter_mut() {
                    layer.render_block(&mut layer_buf, &ctx);
                    for (m, l) in mix.iter_mut().zip(layer_buf.iter()) {
                        *m += *l;
                    }
                }
            }

            assert!(mix.iter().any(|s| s.abs() > 1e-5), "{mode} is silent");
            for &sample in &mix {
                assert!(sample.abs() <= 1.0, "{mode} sample out of range: {sample}");
            }
        }
    }

    #[test]
    fn event_guards_point_back_at_their_own_mode() {
        let table = noise();
        for mode in [Mode::Forest, Mode::Meadow] {
            let scene = Scene::build(mode, &table).expect("must build");
            assert!(!scene.events.is_empty());
            for spec in &scene.events {
                assert_eq!(spec.mode, mode);
            }
        }
    }

    #[test]
    fn continuous_beds_carry_no_events() {
        let table = noise();
        for mode in [Mode::Rain, Mode::Waves, Mode::Yoga] {
            let scene = Scene::build(mode, &table).expect("must build");
            assert!(scene.events.is_empty(), "{mode} should have no events");
        }
    }
}
