use rand::Rng;

use crate::dsp::envelope::Segment;
use crate::graph::{EnvNode, GraphNode, NodeExt, Onset, OscNode};

/*
Bird Chirp
==========

A chirp is a very quiet sine burst with a rising pitch:

  pitch   1800-2400 Hz base, sweeping up 400 Hz over 150 ms
  gain    0 -> 0.008 in 30 ms, exponential tail over 220 ms
  count   one burst, or a pair with the second 300 ms behind

At gain 0.008 the chirp sits far below the bed; it reads as distance, not as
a foreground bird.
*/

const CHIRP_GAIN: f32 = 0.008;

fn burst<R: Rng>(rng: &mut R) -> impl GraphNode {
    let base = rng.gen_range(1_800.0..=2_400.0);
    OscNode::sine(base)
        .with_sweep(base + 400.0, 0.15)
        .amplify(EnvNode::new(0.0, vec![
            Segment::linear(CHIRP_GAIN, 0.03),
            Segment::exponential(1e-4, 0.22),
            Segment::linear(0.0, 0.01),
        ]))
}

pub fn spawn<R: Rng + 'static>(rng: &mut R) -> Vec<Box<dyn GraphNode>> {
    let count = rng.gen_range(1..=2);
    (0..count)
        .map(|i| Box::new(Onset::new(i as f32 * 0.3, burst(rng))) as Box<dyn GraphNode>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RenderCtx;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn chirp_peaks_near_its_gain_and_dies() {
        let ctx = RenderCtx::new(8_000.0);
        let mut rng = Pcg32::seed_from_u64(9);
        let mut voices = spawn(&mut rng);

        let mut peak = 0.0f32;
        let mut buffer = vec![0.0f32; 256];
        // Two bursts plus the 300 ms offset fit well inside a second.
        for _ in 0..32 {
            for voice in voices.iter_mut() {
                voice.render_block(&mut buffer, &ctx);
                for &sample in &buffer {
                    peak = peak.max(sample.abs());
                }
            }
        }

        assert!(peak > CHIRP_GAIN * 0.5, "chirp too quiet: {peak}");
        assert!(peak <= CHIRP_GAIN * 1.1, "chirp too loud: {peak}");
        assert!(voices.iter().all(|v| !v.is_active()));
    }

    #[test]
    fn spawns_one_or_two_bursts() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            let count = spawn(&mut rng).len();
            assert!((1..=2).contains(&count));
            seen.insert(count);
        }
        assert_eq!(seen.len(), 2, "both pair sizes should occur");
    }
}
