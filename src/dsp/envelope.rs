use crate::{graph::node::RenderCtx, MIN_TIME};

/*
Breakpoint Envelope
===================

Every one-shot sound in this crate (chirp, flutter, cricket pulse, chime,
click) is shaped by the same envelope model: a starting level followed by a
list of timed segments, each ramping to a target value along a curve.

  Level
  0.008┐   ╱╲
       │  ╱  ╲__
       │ ╱      ╲___
  0.0  └╱           ╲______→ Time
        30ms   220ms

  chirp gain: linear(0.008, 0.03s) → exponential(1e-4, 0.22s) → linear(0, 10ms)

Curves
------

  Linear        straight line from the current level to the target.

  Exponential   v(t) = v0 · (v1/v0)^(t/T). Matches how acoustic sounds decay;
                used for chirp and chime tails. Cannot pass through zero, so
                decays target a small floor (1e-4) and a final short linear
                segment closes to exactly 0.

  Hold          keeps the current level for the duration. A leading hold is
                how the second chirp of a pair and the second chime note are
                delayed without any scheduler support.

Unlike a gated ADSR, this envelope starts running at the first rendered
sample and never retriggers: one-shots are spawned, play out, and are dropped
once `is_finished()` reports true.

The per-segment sample count is derived when the segment is entered (first
render call that touches it), which is also when the start level is
snapshotted - so each segment begins exactly where the previous one ended and
lands exactly on its target, regardless of block boundaries.
*/

#[derive(Debug, Clone, Copy)]
pub enum Curve {
    Linear,
    Exponential,
    Hold,
}

#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub target: f32,
    pub duration: f32,
    pub curve: Curve,
}

impl Segment {
    pub fn linear(target: f32, duration: f32) -> Self {
        Self {
            target,
            duration,
            curve: Curve::Linear,
        }
    }

    pub fn exponential(target: f32, duration: f32) -> Self {
        Self {
            target,
            duration,
            curve: Curve::Exponential,
        }
    }

    /// Keep the current level for `duration` seconds.
    pub fn hold(duration: f32) -> Self {
        Self {
            target: 0.0, // unused for holds
            duration,
            curve: Curve::Hold,
        }
    }
}

// Exponential curves cannot start or end at zero.
const EXP_FLOOR: f32 = 1e-4;

pub struct SegmentEnv {
    segments: Vec<Segment>,
    index: usize,
    level: f32,
    seg_start: f32,
    elapsed: u32,
    total: u32, // 0 = current segment not yet entered
    finished: bool,
}

impl SegmentEnv {
    pub fn new(start_level: f32, segments: Vec<Segment>) -> Self {
        let finished = segments.is_empty();
        Self {
            segments,
            index: 0,
            level: start_level,
            seg_start: start_level,
            elapsed: 0,
            total: 0,
            finished,
        }
    }

    /// Advance by one sample and return the new level.
    pub fn next_sample(&mut self, ctx: &RenderCtx) -> f32 {
        if self.finished {
            return self.level;
        }

        if self.total == 0 {
            // Entering a new segment: snapshot where we start and how long it runs.
            let seg = self.segments[self.index];
            self.total = (seg.duration.max(MIN_TIME) * ctx.sample_rate)
                .round()
                .max(1.0) as u32;
            self.elapsed = 0;
            self.seg_start = self.level;
        }

        let seg = self.segments[self.index];
        self.elapsed += 1;
        let progress = self.elapsed as f32 / self.total as f32;

        self.level = match seg.curve {
            Curve::Hold => self.seg_start,
            Curve::Linear => self.seg_start + (seg.target - self.seg_start) * progress,
            Curve::Exponential => {
                let start = self.seg_start.max(EXP_FLOOR);
                let target = seg.target.max(EXP_FLOOR);
                start * (target / start).powf(progress)
            }
        };

        if self.elapsed >= self.total {
            if !matches!(seg.curve, Curve::Hold) {
                self.level = seg.target;
            }
            self.index += 1;
            self.total = 0;
            if self.index >= self.segments.len() {
                self.finished = true;
            }
        }

        self.level
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(ctx);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn level(&self) -> f32 {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    fn render_samples(env: &mut SegmentEnv, samples: usize) -> f32 {
        let ctx = RenderCtx::new(SAMPLE_RATE);
        let mut last = env.level();
        for _ in 0..samples {
            last = env.next_sample(&ctx);
        }
        last
    }

    #[test]
    fn linear_segment_reaches_target() {
        let mut env = SegmentEnv::new(0.0, vec![Segment::linear(0.8, 0.1)]);
        let level = render_samples(&mut env, 100);

        assert!((level - 0.8).abs() < 1e-6, "got {level}");
        assert!(env.is_finished());
    }

    #[test]
    fn hold_delays_the_next_segment() {
        let mut env = SegmentEnv::new(0.0, vec![Segment::hold(0.05), Segment::linear(1.0, 0.05)]);

        let level = render_samples(&mut env, 50);
        assert!(level.abs() < 1e-6, "still held, got {level}");

        let level = render_samples(&mut env, 50);
        assert!((level - 1.0).abs() < 1e-6, "got {level}");
    }

    #[test]
    fn exponential_decay_is_monotonic() {
        let mut env = SegmentEnv::new(0.0, vec![
            Segment::linear(0.5, 0.01),
            Segment::exponential(1e-4, 0.2),
        ]);
        let ctx = RenderCtx::new(SAMPLE_RATE);

        render_samples(&mut env, 10); // attack
        let mut previous = env.level();
        for _ in 0..200 {
            let level = env.next_sample(&ctx);
            assert!(level <= previous + 1e-9, "decay went up: {previous} -> {level}");
            previous = level;
        }
        assert!(env.level() < 0.001);
    }

    #[test]
    fn segments_chain_without_jumps() {
        let mut env = SegmentEnv::new(0.0, vec![
            Segment::linear(0.4, 0.02),
            Segment::linear(0.1, 0.02),
            Segment::linear(0.0, 0.02),
        ]);
        let ctx = RenderCtx::new(SAMPLE_RATE);

        let mut previous = 0.0f32;
        let max_step = 0.4 / (0.02 * SAMPLE_RATE) + 1e-6;
        for _ in 0..70 {
            let level = env.next_sample(&ctx);
            assert!(
                (level - previous).abs() <= max_step,
                "discontinuity: {previous} -> {level}"
            );
            previous = level;
        }
        assert!(env.is_finished());
        assert!(env.level().abs() < 1e-6);
    }

    #[test]
    fn finished_envelope_holds_final_level() {
        let mut env = SegmentEnv::new(0.3, vec![Segment::linear(0.0, 0.01)]);
        render_samples(&mut env, 20);
        assert!(env.is_finished());

        let level = render_samples(&mut env, 100);
        assert_eq!(level, 0.0);
    }
}
