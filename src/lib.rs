pub mod dsp;
pub mod engine; // Session controller, tone generator, music bed
pub mod events; // Randomized one-shot event layer
pub mod graph; // Composable audio graph nodes
#[cfg(feature = "rtrb")]
pub mod io;
pub mod scenes; // Per-mode graph recipes

pub use engine::{AmbientEngine, EngineConfig, MusicPlayer, ToneGenerator};
pub use scenes::Mode;

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
