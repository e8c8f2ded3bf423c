use crate::graph::{GainNode, GainParam, LfoNode, NodeExt, OscNode};
use crate::scenes::{Mode, Scene};

/*
Yoga Drone
==========

A four-voice chord, F3 A3 C4 F4:

  174.61 Hz   F3
  220.00 Hz   A3
  261.63 Hz   C4
  349.23 Hz   F4

Each voice carries its own gain LFO at 0.03 + 0.01·i Hz, so the four never
breathe in step - the chord shimmers instead of pulsing. Per-voice level is
0.025 (a quarter of 0.1, split across the chord), entered through a 4 s ramp
so the drone blooms rather than starts.
*/

const CHORD_HZ: [f32; 4] = [174.61, 220.00, 261.63, 349.23];
const VOICE_LEVEL: f32 = 0.1 / CHORD_HZ.len() as f32;

pub(crate) fn build() -> Scene {
    let layers = CHORD_HZ
        .iter()
        .enumerate()
        .map(|(i, &hz)| {
            let breath = LfoNode::sine(0.03 + 0.01 * i as f32);
            let voice = OscNode::sine(hz)
                .through(GainNode::fixed(VOICE_LEVEL).modulate(breath, GainParam::Level, 0.03))
                .through(GainNode::fixed(0.0).with_ramp(1.0, 4.0));
            Box::new(voice) as _
        })
        .collect();

    Scene {
        mode: Mode::Yoga,
        layers,
        events: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RenderCtx;

    #[test]
    fn drone_blooms_in_over_four_seconds() {
        let ctx = RenderCtx::new(8_000.0);
        let mut scene = build();

        let peak_over = |scene: &mut Scene, blocks: usize, ctx: &RenderCtx| {
            let mut peak = 0.0f32;
            let mut mix = vec![0.0f32; 800];
            let mut layer_buf = vec![0.0f32; 800];
            for _ in 0..blocks {
                mix.fill(0.0);
                for layer in scene.layers.iter_mut() {
                    layer.render_block(&mut layer_buf, ctx);
                    for (m, l) in mix.iter_mut().zip(layer_buf.iter()) {
                        *m += *l;
                    }
                }
                for &sample in &mix {
                    peak = peak.max(sample.abs());
                }
            }
            peak
        };

        // First 100 ms: barely entered the ramp.
        let early = peak_over(&mut scene, 1, &ctx);
        // Next 5 s: fully bloomed.
        let late = peak_over(&mut scene, 50, &ctx);

        assert!(early < 0.01, "entrance too loud: {early}");
        assert!(late > 0.05, "chord never bloomed: {late}");
        assert!(late < 0.25, "chord too loud: {late}");
    }
}
