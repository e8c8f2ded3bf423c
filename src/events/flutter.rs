use rand::Rng;

use crate::dsp::envelope::Segment;
use crate::dsp::oscillator::NoiseTable;
use crate::graph::{EnvNode, FilterNode, GraphNode, LfoNode, NodeExt, NoiseNode};

/*
Butterfly Flutter
=================

Wings are noise, not tone: high-passed white noise (4 kHz and up, the silky
end of the spectrum) swelling to gain 0.015 over 400 ms and back to zero
over a 1-2 s lifetime, with an 8-12 Hz tremolo multiplied on top. The
tremolo rate is the one amplitude modulation in the crate fast enough to be
heard as texture rather than motion - that buzz is the wingbeat.
*/

pub fn spawn<R: Rng>(noise: &NoiseTable, rng: &mut R) -> Vec<Box<dyn GraphNode>> {
    let duration = rng.gen_range(1.0..=2.0);
    let wingbeat_hz = rng.gen_range(8.0..=12.0);

    vec![Box::new(
        NoiseNode::looped(noise.clone())
            .through(FilterNode::high_pass(4_000.0))
            .amplify(EnvNode::new(0.0, vec![
                Segment::linear(0.015, 0.4),
                Segment::linear(0.0, duration - 0.4),
            ]))
            .amplify(LfoNode::tremolo(wingbeat_hz)),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RenderCtx;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn flutter_swells_buzzes_and_retires() {
        let ctx = RenderCtx::new(8_000.0);
        let mut rng = Pcg32::seed_from_u64(5);
        let noise = NoiseTable::generate(&mut rng, 4_096);
        let mut voices = spawn(&noise, &mut rng);
        let voice = &mut voices[0];

        let mut peak = 0.0f32;
        let mut buffer = vec![0.0f32; 256];
        // 2 s is the longest lifetime; render 3 s.
        for _ in 0..94 {
            voice.render_block(&mut buffer, &ctx);
            for &sample in &buffer {
                peak = peak.max(sample.abs());
            }
        }

        assert!(peak > 0.003, "flutter inaudible: {peak}");
        assert!(peak <= 0.016, "flutter too loud: {peak}");
        assert!(!voice.is_active());
    }
}
