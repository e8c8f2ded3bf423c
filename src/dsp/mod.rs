//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free after construction and realtime-safe,
//! making them safe to embed directly inside scene layers and one-shot voices.
//! They intentionally stay focused on the signal-processing math so graph
//! combinators can layer on orchestration and modulation.

/// Breakpoint envelope generator for one-shot gain shapes.
pub mod envelope;
/// State-variable filter with low-pass and high-pass responses.
pub mod filter;
/// Low frequency oscillator concepts and helpers.
pub mod lfo;
/// Block-rate modulation helpers.
pub mod modulate;
/// Sine oscillator and looped noise sources.
pub mod oscillator;
/// Scalar parameter with timed ramps and one-pole glides.
pub mod ramp;

pub use envelope::{Curve, Segment, SegmentEnv};
pub use oscillator::{NoiseBlock, NoiseTable, SineBlock};
pub use ramp::ValueRamp;
