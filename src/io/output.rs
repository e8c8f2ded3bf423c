use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, Producer, RingBuffer};

use crate::engine::{AmbientEngine, EngineConfig, MusicPlayer, ToneGenerator, MAX_VOLUME};
use crate::graph::RenderCtx;
use crate::io::{AmbientHandle, ControlMessage};
use crate::MAX_BLOCK_SIZE;

const CONTROL_QUEUE: usize = 64;
// A couple hundred ms of mono at 48 kHz; the UI drains it every frame.
const VIS_QUEUE: usize = 8_192;

/*
The audio thread owns all three sound sections and mixes them mono:

  engine   the ambience (behind its master gain)
  music    the background drone (its own gain)
  tones    chime/click feedback (no gain at all)

Each callback drains the control queue, renders in MAX_BLOCK_SIZE chunks,
fans the mono block out to every output channel, and offers the samples to
the visualization tap. The tap is best-effort: when the UI falls behind,
samples are dropped, never the deadline.

When the host has no output device the runtime degrades to a silent pump
thread that still drains messages and advances the engine clock. State keeps
evolving; it just is not audible yet. Dropping the runtime stops the pump.
*/

struct AudioState {
    engine: AmbientEngine,
    tones: ToneGenerator,
    music: MusicPlayer,
    commands: Consumer<ControlMessage>,
    vis: Producer<f32>,
    block: Box<[f32; MAX_BLOCK_SIZE]>,
}

impl AudioState {
    fn new(
        config: EngineConfig,
        sample_rate: f32,
        commands: Consumer<ControlMessage>,
        vis: Producer<f32>,
    ) -> Self {
        let music_seed = config.seed.wrapping_add(1);
        Self {
            engine: AmbientEngine::new(config, sample_rate),
            tones: ToneGenerator::new(),
            music: MusicPlayer::new(sample_rate, music_seed),
            commands,
            vis,
            block: Box::new([0.0; MAX_BLOCK_SIZE]),
        }
    }

    fn apply(&mut self, message: ControlMessage) {
        match message {
            ControlMessage::SetMode(mode) => self.engine.set_mode(mode),
            ControlMessage::SetVolume(volume) => self.engine.set_volume(volume),
            ControlMessage::PlayChime => self.tones.play_chime(),
            ControlMessage::PlayClick => self.tones.play_click(),
            ControlMessage::ToggleMusic => self.music.toggle(),
            ControlMessage::SetMusicVolume(volume) => self.music.set_volume(volume),
        }
    }

    fn drain(&mut self) {
        while let Ok(message) = self.commands.pop() {
            self.apply(message);
        }
    }

    /// Render up to MAX_BLOCK_SIZE mono frames and return them.
    fn render(&mut self, frames: usize) -> &[f32] {
        let ctx = RenderCtx::new(self.engine.sample_rate());
        let block = &mut self.block[..frames.min(MAX_BLOCK_SIZE)];

        self.engine.render_block(block);
        self.music.mix_into(block, &ctx);
        self.tones.mix_into(block, &ctx);

        for &sample in block.iter() {
            let _ = self.vis.push(sample);
        }
        block
    }
}

enum Backend {
    // Held for its lifetime; the stream stops when dropped.
    Stream(#[allow(dead_code)] cpal::Stream),
    Silent {
        stop: Arc<AtomicBool>,
        pump: Option<JoinHandle<()>>,
    },
}

/// Running audio output. Keep it alive for as long as sound should play;
/// dropping it tears the stream (or the silent pump) down.
pub struct AudioRuntime {
    backend: Backend,
    sample_rate: f32,
}

impl AudioRuntime {
    /// Open the default output device and start rendering. Returns the
    /// runtime, the UI-side control handle, and the visualization tap.
    ///
    /// A missing output device is not an error: the runtime falls back to a
    /// silent pump so the application stays fully operable.
    pub fn start(config: EngineConfig) -> EyreResult<(AudioRuntime, AmbientHandle, Consumer<f32>)> {
        let (producer, commands) = RingBuffer::new(CONTROL_QUEUE);
        let (vis_tx, vis_rx) = RingBuffer::new(VIS_QUEUE);
        let volume = config.default_volume.clamp(0.0, MAX_VOLUME);

        let host = cpal::default_host();
        let runtime = match host.default_output_device() {
            Some(device) => {
                let stream_config = device
                    .default_output_config()
                    .wrap_err("failed to fetch default output config")?;
                let sample_rate = stream_config.sample_rate().0 as f32;
                let channels = (stream_config.channels() as usize).max(1);
                let mut state = AudioState::new(config, sample_rate, commands, vis_tx);

                let stream = device
                    .build_output_stream(
                        &stream_config.into(),
                        move |data: &mut [f32], _| {
                            state.drain();

                            let total_frames = data.len() / channels;
                            let mut written = 0;
                            while written < total_frames {
                                let frames = (total_frames - written).min(MAX_BLOCK_SIZE);
                                let block = state.render(frames);

                                // Mono to all channels.
                                let offset = written * channels;
                                for (i, &sample) in block.iter().enumerate() {
                                    for ch in 0..channels {
                                        data[offset + i * channels + ch] = sample;
                                    }
                                }
                                written += frames;
                            }
                        },
                        |err| log::error!("audio stream error: {err}"),
                        None,
                    )
                    .wrap_err("failed to build output stream")?;
                stream.play().wrap_err("failed to start output stream")?;
                log::info!("audio up: {sample_rate} Hz, {channels} ch");

                AudioRuntime {
                    backend: Backend::Stream(stream),
                    sample_rate,
                }
            }
            None => {
                log::warn!("no output device available, running silently");
                let sample_rate = 48_000.0;
                let mut state = AudioState::new(config, sample_rate, commands, vis_tx);

                let stop = Arc::new(AtomicBool::new(false));
                let stop_flag = stop.clone();
                let frames = (sample_rate * 0.01) as usize;
                let pump = std::thread::spawn(move || {
                    while !stop_flag.load(Ordering::Relaxed) {
                        state.drain();
                        state.render(frames);
                        std::thread::sleep(Duration::from_millis(10));
                    }
                });

                AudioRuntime {
                    backend: Backend::Silent {
                        stop,
                        pump: Some(pump),
                    },
                    sample_rate,
                }
            }
        };

        Ok((runtime, AmbientHandle::new(producer, volume), vis_rx))
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}

impl Drop for AudioRuntime {
    fn drop(&mut self) {
        if let Backend::Silent { stop, pump } = &mut self.backend {
            stop.store(true, Ordering::Relaxed);
            if let Some(pump) = pump.take() {
                let _ = pump.join();
            }
        }
    }
}
