//! Low Frequency Oscillator (LFO) concepts.

/*
Low Frequency Oscillators
=========================

An LFO is simply an oscillator running at sub-audio frequencies. The same
waveform math applies, but it controls a parameter instead of making sound.

Everything that moves in an ambience is an LFO at work:

    0.03 - 0.06 Hz   drone voice "breathing" (per-voice gain, small depth)
    0.04 - 0.05 Hz   wind gusts (low-pass cutoff, 80-300 Hz swing)
    0.08 - 0.12 Hz   ocean swell (bed gain)
    1.5 Hz           water ripple (brook layer gain)
    8 - 20 Hz        butterfly flutter (one-shot amplitude buzz)

The bed modulators all sit below 1 Hz on purpose: at those rates the ear
reads the motion as weather, not as tremolo. The flutter LFO is the one
deliberate exception - at 8-20 Hz amplitude modulation becomes an audible
buzz, which is exactly the wing texture it is there to produce.

  bipolar         Output swings -1.0 to +1.0. Natural for modulation that
                  should move a parameter above AND below its base value
                  (cutoff sweeps, gain swell).

  unipolar        Output 0.0 to 1.0. Convert: unipolar = (bipolar + 1) / 2.

In this crate `LfoNode` (graph/lfo.rs) wraps `SineBlock` with a fixed
control-rate frequency; the waveform math is identical to the audible
oscillator.
*/

/// Convert bipolar signal (-1.0 to +1.0) to unipolar (0.0 to 1.0).
#[inline]
pub fn bipolar_to_unipolar(bipolar: f32) -> f32 {
    (bipolar + 1.0) * 0.5
}

/// Convert unipolar signal (0.0 to 1.0) to bipolar (-1.0 to +1.0).
#[inline]
pub fn unipolar_to_bipolar(unipolar: f32) -> f32 {
    (unipolar * 2.0) - 1.0
}

/// Calculate LFO period in seconds from frequency.
///
/// # Example
/// ```
/// use stillscape::dsp::lfo::period_from_frequency;
/// let period = period_from_frequency(0.08);
/// assert!((period - 12.5).abs() < 1e-4); // one ocean swell every 12.5s
/// ```
#[inline]
pub fn period_from_frequency(frequency_hz: f32) -> f32 {
    1.0 / frequency_hz
}

/// Calculate samples per LFO period.
#[inline]
pub fn samples_per_period(frequency_hz: f32, sample_rate: f32) -> f32 {
    sample_rate / frequency_hz
}
