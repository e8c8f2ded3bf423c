use std::f32::consts::TAU;

use crate::graph::node::RenderCtx;

/*
| type      | passes          | used by                                   |
| --------- | --------------- | ----------------------------------------- |
| low-pass  | below cutoff    | every noise bed (rain, waves, wind, water)|
| high-pass | above cutoff    | rain band-limiting, flutter noise         |

The cutoff is the one parameter that moves at runtime: wind scenes sweep a
low-pass cutoff with a sub-Hz LFO (see graph/modulate.rs). The filter is a
TPT state-variable design, stable under per-block cutoff changes.
*/

#[derive(Debug, Clone, Copy)]
pub enum FilterType {
    LowPass,
    HighPass,
}

pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    pub cutoff_hz: f32,
    pub resonance: f32,
    filter_type: FilterType,
}

impl SVFilter {
    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            resonance: 0.0,
            filter_type: FilterType::LowPass,
        }
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            resonance: 0.0,
            filter_type: FilterType::HighPass,
        }
    }

    #[inline]
    fn compute_g(&self, ctx: &RenderCtx) -> f32 {
        // Prewarp blows up at Nyquist; pin the cutoff just under it.
        let cutoff = self.cutoff_hz.min(0.49 * ctx.sample_rate);
        let wd = TAU * cutoff;
        let wa = (2.0 * ctx.sample_rate) * (wd / (2.0 * ctx.sample_rate)).tan();
        wa / (2.0 * ctx.sample_rate)
    }

    #[inline]
    fn next_sample(&mut self, sample: f32, k: f32, g: f32) -> f32 {
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        match self.filter_type {
            FilterType::LowPass => v2,
            FilterType::HighPass => sample - k * v1 - v2,
        }
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        let g = self.compute_g(ctx);
        let k = 2.0 - (2.0 * self.resonance);

        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, k, g);
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff_hz = cutoff;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peak_after_transient(buffer: &[f32]) -> f32 {
        let skip = buffer.len().min(32);
        buffer
            .get(skip..)
            .unwrap_or(buffer)
            .iter()
            .fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    fn render_sine(frequency: f32, sample_rate: f32, len: usize) -> Vec<f32> {
        use crate::dsp::oscillator::SineBlock;
        let ctx = RenderCtx::new(sample_rate);
        let mut osc = SineBlock::new(frequency);
        let mut buffer = vec![0.0f32; len];
        osc.render(&mut buffer, &ctx);
        buffer
    }

    #[test]
    fn lowpass_passes_dc() {
        let mut filter = SVFilter::lowpass(500.0);
        let mut buffer = vec![1.0; 128];
        let ctx = RenderCtx::new(48_000.0);

        filter.render(&mut buffer, &ctx);

        assert!(buffer[127] > 0.99);
    }

    #[test]
    fn highpass_rejects_dc() {
        let mut filter = SVFilter::highpass(500.0);
        let mut buffer = vec![1.0; 128];
        let ctx = RenderCtx::new(48_000.0);

        filter.render(&mut buffer, &ctx);

        assert!(buffer[127] < 0.001);
    }

    #[test]
    fn lowpass_attenuates_high_frequency() {
        let sample_rate = 48_000.0;
        let mut buffer = render_sine(5_000.0, sample_rate, 128);

        let mut filter = SVFilter::lowpass(500.0); // 10x below signal
        filter.render(&mut buffer, &RenderCtx::new(sample_rate));

        let peak = peak_after_transient(&buffer);
        assert!(peak < 0.3, "expected high freq attenuation, got peak {peak}");
    }

    #[test]
    fn highpass_attenuates_low_frequency() {
        let sample_rate = 48_000.0;
        let mut buffer = render_sine(100.0, sample_rate, 2048);

        let mut filter = SVFilter::highpass(4_000.0);
        filter.render(&mut buffer, &RenderCtx::new(sample_rate));

        let peak = peak_after_transient(&buffer);
        assert!(peak < 0.1, "expected low freq attenuation, got peak {peak}");
    }

    #[test]
    fn set_cutoff_affects_filtering() {
        let sample_rate = 48_000.0;

        // Low cutoff attenuates a 1 kHz tone...
        let mut filter = SVFilter::lowpass(200.0);
        let mut buffer = render_sine(1_000.0, sample_rate, 256);
        filter.render(&mut buffer, &RenderCtx::new(sample_rate));
        let peak_low = peak_after_transient(&buffer);

        // ...raising it lets the tone through.
        filter.reset();
        filter.set_cutoff(5_000.0);
        let mut buffer = render_sine(1_000.0, sample_rate, 256);
        filter.render(&mut buffer, &RenderCtx::new(sample_rate));
        let peak_high = peak_after_transient(&buffer);

        assert!(
            peak_high > peak_low * 2.0,
            "high cutoff should pass more signal: high={peak_high}, low={peak_low}"
        );
    }
}
