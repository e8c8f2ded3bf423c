use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::dsp::ramp::ValueRamp;
use crate::graph::{GraphNode, LfoNode, NodeExt, OscNode, OscParam, RenderCtx};
use crate::MAX_BLOCK_SIZE;

/*
Background Music Bed
====================

A toggleable drone independent of the ambience: A2 E3 A3 E4 sines, each
drifting ±2 Hz under its own slow LFO (0.1-0.2 Hz) so the chord beats gently
against itself. The drift is the whole arrangement - there is no melody.

Start/stop mirror the ambience crossfade discipline on a smaller scale:
2 s fade-in, 1 s fade-out with the voices torn down 100 ms after the fade
lands. Toggling during the stop window re-runs the stop; the bed is not
restartable until the teardown has happened.
*/

const DRONE_HZ: [f32; 4] = [110.0, 164.81, 220.0, 329.63];
const FADE_IN: f32 = 2.0;
const FADE_OUT: f32 = 1.0;
const TEARDOWN_DELAY: f32 = 1.1;
const VOLUME_GLIDE_TAU: f32 = 0.1;

pub struct MusicPlayer {
    sample_rate: f32,
    clock: u64,
    rng: Pcg32,

    voices: Vec<Box<dyn GraphNode>>,
    playing: bool,
    pending_stop: Option<u64>,

    master: ValueRamp,
    volume: f32,

    scratch: Box<[f32; MAX_BLOCK_SIZE]>,
    voice_sum: Box<[f32; MAX_BLOCK_SIZE]>,
}

impl MusicPlayer {
    pub fn new(sample_rate: f32, seed: u64) -> Self {
        Self {
            sample_rate,
            clock: 0,
            rng: Pcg32::seed_from_u64(seed),
            voices: Vec::new(),
            playing: false,
            pending_stop: None,
            master: ValueRamp::new(0.0),
            volume: 0.15,
            scratch: Box::new([0.0; MAX_BLOCK_SIZE]),
            voice_sum: Box::new([0.0; MAX_BLOCK_SIZE]),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.stop();
        } else {
            self.start();
        }
    }

    fn start(&mut self) {
        log::info!("music on");
        self.voices = DRONE_HZ
            .iter()
            .map(|&hz| {
                let drift = LfoNode::sine(self.rng.gen_range(0.1..=0.2));
                Box::new(OscNode::sine(hz).modulate(drift, OscParam::Frequency, 2.0))
                    as Box<dyn GraphNode>
            })
            .collect();
        self.master.ramp_to(self.volume, FADE_IN, self.sample_rate);
        self.playing = true;
    }

    fn stop(&mut self) {
        log::info!("music off");
        self.master.ramp_to(0.0, FADE_OUT, self.sample_rate);
        self.pending_stop = Some(self.clock + (TEARDOWN_DELAY * self.sample_rate) as u64);
    }

    pub fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        self.volume = volume;
        if self.playing && self.pending_stop.is_none() {
            self.master
                .glide_to(volume, VOLUME_GLIDE_TAU, self.sample_rate);
        }
    }

    /// Add the drone into `out` (no-op while stopped).
    pub fn mix_into(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.mix_chunk(chunk, ctx);
        }
    }

    fn mix_chunk(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        if matches!(self.pending_stop, Some(at) if self.clock >= at) {
            self.pending_stop = None;
            self.voices.clear();
            self.playing = false;
        }
        self.clock += out.len() as u64;

        if self.voices.is_empty() {
            return;
        }

        // Sum voices first so the master multiplies once.
        let scratch = &mut self.scratch[..out.len()];
        let sum = &mut self.voice_sum[..out.len()];
        sum.fill(0.0);
        for voice in self.voices.iter_mut() {
            voice.render_block(scratch, ctx);
            for (mix, sample) in sum.iter_mut().zip(scratch.iter()) {
                *mix += *sample;
            }
        }
        for (mix, sample) in out.iter_mut().zip(sum.iter()) {
            *mix += *sample * self.master.next_sample();
        }
    }
}
