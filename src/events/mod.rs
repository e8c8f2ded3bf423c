//! Randomized one-shot nature events: bird chirps, butterfly flutters,
//! cricket pulses, and the probabilistic scheduler that fires them.

/*
Event Scheduling
================

Sparse nature sounds are what keep a bed from sounding like a loop. Each
scene declares a list of EventSpecs:

  scene     event     interval    probability
  ------    -------   --------    -----------
  forest    chirp      4-6 s         0.5
  meadow    flutter    3-5 s         0.4
  meadow    cricket    5-7 s         0.6
  meadow    chirp      7-9 s         0.3

A scheduler wakes at its check frame, rolls a uniform draw against the
probability, re-arms at a fresh random interval inside its range, and - if
the draw passed AND the engine is still in the spec's mode - spawns the
one-shot. The interval itself is randomized per check so events never settle
into a detectable grid.

Everything runs on the engine's sample-frame clock inside render_block.
There is no timer thread to race with a teardown: the engine clears its
scheduler list synchronously at the start of a transition, and a spawned
voice simply plays out over whatever the master gain is doing.
*/

/// Bird chirp recipe.
pub mod chirp;
/// Cricket pulse-train recipe.
pub mod cricket;
/// Butterfly wing-flutter recipe.
pub mod flutter;

use std::ops::RangeInclusive;

use rand::Rng;

use crate::dsp::oscillator::NoiseTable;
use crate::graph::GraphNode;
use crate::scenes::Mode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Chirp,
    Flutter,
    Cricket,
}

/// Declaration of a recurring randomized event, owned by a scene recipe.
#[derive(Clone, Debug)]
pub struct EventSpec {
    pub kind: EventKind,
    /// Mode guard: the event only spawns while this mode is sounding.
    pub mode: Mode,
    /// Seconds between scheduler checks, drawn uniformly per re-arm.
    pub interval: RangeInclusive<f32>,
    /// Chance that a check actually fires.
    pub probability: f32,
}

impl EventSpec {
    pub fn new(kind: EventKind, mode: Mode, interval: RangeInclusive<f32>, probability: f32) -> Self {
        Self {
            kind,
            mode,
            interval,
            probability,
        }
    }
}

/// Frame-clocked scheduler for one EventSpec.
pub struct EventScheduler {
    spec: EventSpec,
    next_check: u64,
    checks: u64,
    fires: u64,
}

impl EventScheduler {
    /// Arm the first check a random interval after `now`.
    pub fn arm<R: Rng>(spec: EventSpec, now: u64, sample_rate: f32, rng: &mut R) -> Self {
        let mut scheduler = Self {
            spec,
            next_check: 0,
            checks: 0,
            fires: 0,
        };
        scheduler.rearm(now, sample_rate, rng);
        scheduler
    }

    fn rearm<R: Rng>(&mut self, now: u64, sample_rate: f32, rng: &mut R) {
        let interval = rng.gen_range(self.spec.interval.clone());
        self.next_check = now + (interval * sample_rate) as u64;
    }

    /// Advance to frame `now`; true means the event should fire.
    ///
    /// The caller still owns the mode guard - a scheduler does not know what
    /// the engine is currently playing.
    pub fn poll<R: Rng>(&mut self, now: u64, sample_rate: f32, rng: &mut R) -> bool {
        if now < self.next_check {
            return false;
        }
        self.checks += 1;
        self.rearm(now, sample_rate, rng);

        if rng.gen::<f32>() < self.spec.probability {
            self.fires += 1;
            true
        } else {
            false
        }
    }

    pub fn spec(&self) -> &EventSpec {
        &self.spec
    }

    /// Checks performed so far (fired or not).
    pub fn checks(&self) -> u64 {
        self.checks
    }

    /// Checks that passed the probability draw.
    pub fn fires(&self) -> u64 {
        self.fires
    }
}

/// Build the voices for one event. Chirps occasionally come as a pair, so
/// this returns a list; every voice retires itself via `is_active()`.
pub fn spawn<R: Rng + 'static>(kind: EventKind, noise: &NoiseTable, rng: &mut R) -> Vec<Box<dyn GraphNode>> {
    match kind {
        EventKind::Chirp => chirp::spawn(rng),
        EventKind::Flutter => flutter::spawn(noise, rng),
        EventKind::Cricket => cricket::spawn(rng),
    }
}
