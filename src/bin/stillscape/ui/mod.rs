//! TUI widgets for stillscape.
//!
//! Real-time visualization of the ambience output plus the mode selector.

mod modes;
mod spectrum;
mod status;
mod waveform;

pub use modes::render_modes;
pub use spectrum::{render_spectrum, SpectrumAnalyzer};
pub use status::{render_status, AudioStats};
pub use waveform::render_waveform;
