//! The ambient session controller and its sibling sound services.

/*
Session Controller
==================

AmbientEngine owns everything that sounds: the current scene's layers, the
event schedulers, the live one-shots, and the master gain. One public verb
per user intent:

  set_mode(mode)    crossfade to another ambience
  set_volume(v)     change the listening level (survives mode changes)
  render_block(out) produce the next block of mono audio

Transitions follow a fixed choreography:

  t+0.0 s   master ramps to 0 over 1 s; schedulers cleared immediately
  t+1.1 s   old layers and one-shots dropped, new scene built,
            master ramps 0 -> volume over 2.5 s

The 100 ms of margin between fade end and teardown means nothing audible is
ever cut off mid-sample. Scheduler clearing happens synchronously in
set_mode, so an event can never fire into the fade of a dying scene.

Everything is clocked by a frame counter advanced in render_block. There are
no timers and no second thread: a pending switch is just a frame deadline
checked at the top of each block. That is also why the whole controller can
be tested offline - render enough blocks and 1.1 s has "passed".

Re-entrancy resolves against the *target*: set_mode(m) is a no-op when m is
the mode already sounding or the mode a transition in flight will land on.
Requesting rain twice mid-fade does not restart the fade.
*/

/// Fire-and-forget chime/click tones.
pub mod chime;
/// Toggleable background music drone.
pub mod music;

pub use chime::ToneGenerator;
pub use music::MusicPlayer;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::dsp::oscillator::NoiseTable;
use crate::dsp::ramp::ValueRamp;
use crate::events::{self, EventScheduler};
use crate::graph::{GraphNode, RenderCtx};
use crate::scenes::{Mode, Scene};
use crate::MAX_BLOCK_SIZE;

/// Hard ceiling on the master gain. Requests above this are clamped, not
/// rejected.
pub const MAX_VOLUME: f32 = 0.8;

/// Timing and level constants for the session controller. Defaults match
/// the tuned values the ambiences were designed around.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Listening level on startup.
    pub default_volume: f32,
    /// Fade to silence at the start of a transition, seconds.
    pub fade_out: f32,
    /// Delay from transition request to teardown/rebuild, seconds. Must
    /// exceed `fade_out` so the fade completes first.
    pub teardown_delay: f32,
    /// Fade from silence after a new scene comes up, seconds.
    pub fade_in: f32,
    /// One-pole time constant for audible volume changes, seconds.
    pub volume_glide_tau: f32,
    /// Length of the shared white-noise table, seconds.
    pub noise_seconds: f32,
    /// PRNG seed for noise, event timing, and one-shot variation.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_volume: 0.15,
            fade_out: 1.0,
            teardown_delay: 1.1,
            fade_in: 2.5,
            volume_glide_tau: 0.2,
            noise_seconds: 4.0,
            seed: 7,
        }
    }
}

struct PendingSwitch {
    target: Mode,
    at_frame: u64,
}

pub struct AmbientEngine {
    config: EngineConfig,
    sample_rate: f32,
    clock: u64,
    rng: Pcg32,
    noise: NoiseTable,

    mode: Mode,
    pending: Option<PendingSwitch>,
    layers: Vec<Box<dyn GraphNode>>,
    schedulers: Vec<EventScheduler>,
    one_shots: Vec<Box<dyn GraphNode>>,

    master: ValueRamp,
    volume: f32,

    scratch: Box<[f32; MAX_BLOCK_SIZE]>,
}

impl AmbientEngine {
    pub fn new(config: EngineConfig, sample_rate: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(config.seed);
        let table_len = (config.noise_seconds * sample_rate).max(1.0) as usize;
        let noise = NoiseTable::generate(&mut rng, table_len);
        let volume = config.default_volume.clamp(0.0, MAX_VOLUME);

        Self {
            config,
            sample_rate,
            clock: 0,
            rng,
            noise,
            mode: Mode::Off,
            pending: None,
            layers: Vec::new(),
            schedulers: Vec::new(),
            one_shots: Vec::new(),
            master: ValueRamp::new(0.0),
            volume,
            scratch: Box::new([0.0; MAX_BLOCK_SIZE]),
        }
    }

    /// The mode currently sounding.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Where the engine is headed: the pending transition's target, or the
    /// current mode when none is in flight.
    pub fn target_mode(&self) -> Mode {
        self.pending.as_ref().map_or(self.mode, |p| p.target)
    }

    /// Configured listening level (the fade-in destination).
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Instantaneous master gain, mid-ramp values included.
    pub fn master_level(&self) -> f32 {
        self.master.value()
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn one_shot_count(&self) -> usize {
        self.one_shots.len()
    }

    pub fn scheduler_count(&self) -> usize {
        self.schedulers.len()
    }

    /// Begin a crossfade to `mode`. No-op when already there or headed there.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.target_mode() {
            return;
        }
        log::info!("ambience {} -> {}", self.target_mode(), mode);

        self.master.ramp_to(0.0, self.config.fade_out, self.sample_rate);
        // Cleared now, not at teardown: no event may fire into the fade.
        self.schedulers.clear();

        let delay = (self.config.teardown_delay * self.sample_rate) as u64;
        self.pending = Some(PendingSwitch {
            target: mode,
            at_frame: self.clock + delay,
        });
    }

    /// Change the listening level; clamped to [0, 0.8]. The graph is never
    /// touched, and the level survives mode changes - a fade-in already
    /// scheduled will land on the new value.
    pub fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, MAX_VOLUME);
        self.volume = volume;

        // Mid-transition the fade owns the master; the stored level is
        // picked up as the fade-in target instead.
        if self.pending.is_none() && self.mode != Mode::Off {
            self.master
                .glide_to(volume, self.config.volume_glide_tau, self.sample_rate);
        }
    }

    /// Render the next block of mono ambience into `out`.
    pub fn render_block(&mut self, out: &mut [f32]) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_chunk(chunk);
        }
    }

    fn render_chunk(&mut self, out: &mut [f32]) {
        let ctx = RenderCtx::new(self.sample_rate);

        self.process_pending();
        self.poll_schedulers();

        out.fill(0.0);
        let scratch = &mut self.scratch[..out.len()];
        for layer in self.layers.iter_mut() {
            layer.render_block(scratch, &ctx);
            for (mix, sample) in out.iter_mut().zip(scratch.iter()) {
                *mix += *sample;
            }
        }
        for voice in self.one_shots.iter_mut() {
            voice.render_block(scratch, &ctx);
            for (mix, sample) in out.iter_mut().zip(scratch.iter()) {
                *mix += *sample;
            }
        }
        self.one_shots.retain(|voice| voice.is_active());

        for sample in out.iter_mut() {
            *sample *= self.master.next_sample();
        }

        self.clock += out.len() as u64;
    }

    fn process_pending(&mut self) {
        let due = matches!(&self.pending, Some(p) if self.clock >= p.at_frame);
        if !due {
            return;
        }
        let target = match self.pending.take() {
            Some(p) => p.target,
            None => return,
        };

        // Old scene dies here: layers, leftover one-shots, everything.
        self.layers.clear();
        self.one_shots.clear();
        self.schedulers.clear();
        self.mode = target;

        if let Some(scene) = Scene::build(target, &self.noise) {
            for spec in scene.events {
                self.schedulers.push(EventScheduler::arm(
                    spec,
                    self.clock,
                    self.sample_rate,
                    &mut self.rng,
                ));
            }
            self.layers = scene.layers;
            self.master.set(0.0);
            self.master
                .ramp_to(self.volume, self.config.fade_in, self.sample_rate);
            log::debug!("scene up: {target}");
        }
    }

    fn poll_schedulers(&mut self) {
        for i in 0..self.schedulers.len() {
            let fired = self.schedulers[i].poll(self.clock, self.sample_rate, &mut self.rng);
            // Guard at fire time: the scheduler list may be mid-replacement
            // within this block, the mode is authoritative.
            if fired && self.schedulers[i].spec().mode == self.mode {
                let kind = self.schedulers[i].spec().kind;
                log::debug!("event {kind:?} at frame {}", self.clock);
                let voices = events::spawn(kind, &self.noise, &mut self.rng);
                self.one_shots.extend(voices);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 8_000.0;

    fn engine() -> AmbientEngine {
        AmbientEngine::new(EngineConfig::default(), SAMPLE_RATE)
    }

    fn render_seconds(engine: &mut AmbientEngine, seconds: f32) {
        let mut buffer = vec![0.0f32; 256];
        let blocks = (seconds * SAMPLE_RATE / 256.0).ceil() as usize;
        for _ in 0..blocks {
            engine.render_block(&mut buffer);
        }
    }

    #[test]
    fn starts_silent_and_off() {
        let mut engine = engine();
        assert_eq!(engine.mode(), Mode::Off);
        assert_eq!(engine.layer_count(), 0);

        let mut buffer = vec![1.0f32; 128];
        engine.render_block(&mut buffer);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn transition_lands_after_the_teardown_delay() {
        let mut engine = engine();
        engine.set_mode(Mode::Rain);
        assert_eq!(engine.mode(), Mode::Off, "switch is deferred");
        assert_eq!(engine.target_mode(), Mode::Rain);

        render_seconds(&mut engine, 1.0);
        assert_eq!(engine.mode(), Mode::Off, "still inside the delay");

        render_seconds(&mut engine, 0.2);
        assert_eq!(engine.mode(), Mode::Rain);
        assert!(engine.layer_count() > 0);
    }

    #[test]
    fn fade_in_reaches_the_configured_volume() {
        let mut engine = engine();
        engine.set_mode(Mode::Waves);
        render_seconds(&mut engine, 1.2 + 2.5 + 0.1);

        assert!((engine.master_level() - 0.15).abs() < 1e-3);
    }

    #[test]
    fn repeated_request_does_not_restart_the_fade() {
        let mut engine = engine();
        engine.set_mode(Mode::Rain);
        render_seconds(&mut engine, 1.2 + 2.5 + 0.1);
        let settled = engine.master_level();

        engine.set_mode(Mode::Rain);
        let mut buffer = vec![0.0f32; 64];
        engine.render_block(&mut buffer);
        assert_eq!(engine.master_level(), settled, "fade restarted");
        assert!(engine.pending.is_none());
    }

    #[test]
    fn request_matching_pending_target_is_ignored() {
        let mut engine = engine();
        engine.set_mode(Mode::Forest);
        render_seconds(&mut engine, 0.3);
        let deadline = engine.pending.as_ref().map(|p| p.at_frame);

        engine.set_mode(Mode::Forest);
        assert_eq!(engine.pending.as_ref().map(|p| p.at_frame), deadline);
    }

    #[test]
    fn volume_is_clamped_to_the_ceiling() {
        let mut engine = engine();
        engine.set_volume(2.0);
        assert_eq!(engine.volume(), MAX_VOLUME);

        engine.set_volume(-1.0);
        assert_eq!(engine.volume(), 0.0);
    }

    #[test]
    fn off_tears_everything_down() {
        let mut engine = engine();
        engine.set_mode(Mode::Meadow);
        render_seconds(&mut engine, 2.0);
        assert!(engine.layer_count() > 0);
        assert!(engine.scheduler_count() > 0);

        engine.set_mode(Mode::Off);
        assert_eq!(engine.scheduler_count(), 0, "schedulers cleared synchronously");
        render_seconds(&mut engine, 1.2);

        assert_eq!(engine.mode(), Mode::Off);
        assert_eq!(engine.layer_count(), 0);
        assert_eq!(engine.one_shot_count(), 0);

        let mut buffer = vec![1.0f32; 128];
        engine.render_block(&mut buffer);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }
}
