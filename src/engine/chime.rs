use crate::dsp::envelope::Segment;
use crate::graph::{EnvNode, GraphNode, NodeExt, Onset, OscNode, RenderCtx};
use crate::MAX_BLOCK_SIZE;

/*
Tone Generator
==============

Short UI feedback tones, fire-and-forget. Unlike the ambience these bypass
the master gain entirely - a completion chime should be heard at the same
level whether the rain is loud, quiet, or off.

  chime   two soft sine notes, C6 then E6 100 ms later, 50 ms attack to
          0.2 with an exponential tail (0.5 s and 0.6 s)
  click   a 60 ms tick at 800 Hz, quieter still

Each call pushes a self-expiring voice; mix_into renders the live ones and
drops whatever finished. Calling during playback just stacks another voice.
*/

const CHIME_NOTES: [(f32, f32, f32); 2] = [
    // (frequency, onset, duration): C6 now, E6 a tenth of a second later.
    (1_046.50, 0.0, 0.5),
    (1_318.51, 0.1, 0.6),
];

pub struct ToneGenerator {
    voices: Vec<Box<dyn GraphNode>>,
    scratch: Box<[f32; MAX_BLOCK_SIZE]>,
}

impl Default for ToneGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneGenerator {
    pub fn new() -> Self {
        Self {
            voices: Vec::new(),
            scratch: Box::new([0.0; MAX_BLOCK_SIZE]),
        }
    }

    fn note(frequency: f32, onset: f32, duration: f32, peak: f32) -> Box<dyn GraphNode> {
        Box::new(Onset::new(
            onset,
            OscNode::sine(frequency).amplify(EnvNode::new(0.0, vec![
                Segment::linear(peak, 0.05),
                Segment::exponential(1e-4, duration - 0.05),
                Segment::linear(0.0, 0.01),
            ])),
        ))
    }

    /// Gentle two-note completion chime.
    pub fn play_chime(&mut self) {
        log::debug!("chime");
        for (frequency, onset, duration) in CHIME_NOTES {
            self.voices.push(Self::note(frequency, onset, duration, 0.2));
        }
    }

    /// Single soft tick for small interactions.
    pub fn play_click(&mut self) {
        self.voices.push(Box::new(OscNode::sine(800.0).amplify(
            EnvNode::new(0.0, vec![
                Segment::linear(0.1, 0.005),
                Segment::exponential(1e-4, 0.055),
                Segment::linear(0.0, 0.005),
            ]),
        )));
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    /// Add the live tones into `out` and retire the finished ones.
    pub fn mix_into(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        if self.voices.is_empty() {
            return;
        }
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            let scratch = &mut self.scratch[..chunk.len()];
            for voice in self.voices.iter_mut() {
                voice.render_block(scratch, ctx);
                for (mix, sample) in chunk.iter_mut().zip(scratch.iter()) {
                    *mix += *sample;
                }
            }
        }
        self.voices.retain(|voice| voice.is_active());
    }
}
