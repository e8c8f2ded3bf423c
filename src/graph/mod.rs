//! Composable building blocks for constructing audio-processing graphs.
//!
//! Graph nodes wrap the low-level DSP primitives with the ergonomics scene
//! recipes need: block-based rendering, parameter modulation, and lifetime
//! tracking for one-shot voices. The `extensions` module adds fluent helpers
//! so recipes can be authored with a clear, chainable API.

/// Multiply two signals together (envelopes, tremolo).
pub mod amplify;
/// Segment envelope as a control signal.
pub mod envelope;
/// Fluent combinators (`.through()`, `.amplify()`, `.modulate()`).
pub mod extensions;
/// Low/high-pass filter node with a modulatable cutoff.
pub mod filter;
/// Gain stage with timed ramps and a modulatable level.
pub mod gain;
/// Low frequency oscillators for parameter modulation.
pub mod lfo;
/// Connect modulation sources to node parameters.
pub mod modulate;
/// Core traits shared by all graph nodes.
pub mod node;
/// Silent lead-in before an inner node starts.
pub mod onset;
/// Looped white-noise source.
pub mod noise;
/// Fixed-frequency sine oscillator node.
pub mod oscillator;
/// Serial chaining of two nodes (source → effect).
pub mod through;

pub use envelope::EnvNode;
pub use extensions::NodeExt;
pub use filter::{FilterNode, FilterParam};
pub use gain::{GainNode, GainParam};
pub use lfo::LfoNode;
pub use node::{GraphNode, RenderCtx};
pub use noise::NoiseNode;
pub use onset::Onset;
pub use oscillator::{OscNode, OscParam};
