use crate::MIN_TIME;

/*
Parameter Slewing
=================

A ValueRamp is a scalar that knows how to move: the master gain, the music
bed gain, and every ramped gain stage are ValueRamps. Two motion types cover
everything the session controller does:

  ramp_to(target, seconds)   Linear, sample-accurate, lands exactly on the
                             target after `seconds`. Used for crossfades
                             (fade-out to 0 over 1 s, fade-in over 2.5 s)
                             and scene entrance ramps.

  glide_to(target, tau)      One-pole exponential approach:
                               value += coef · (target − value)
                               coef  = 1 − e^(−1 / (tau · sample_rate))
                             Never overshoots, converges smoothly. Used for
                             volume changes while audible, so the knob never
                             zipper-clicks.

A new request simply replaces the motion in flight, starting from whatever
the current value is - there is nothing to cancel. This is what makes
re-entrant mode changes safe: a second fade re-ramps from mid-fade level.
*/

#[derive(Debug, Clone, Copy)]
enum Slew {
    Idle,
    Linear { target: f32, remaining: u32 },
    Glide { target: f32, coef: f32 },
}

#[derive(Debug, Clone)]
pub struct ValueRamp {
    value: f32,
    slew: Slew,
}

impl ValueRamp {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            slew: Slew::Idle,
        }
    }

    /// Jump immediately, cancelling any motion in flight.
    pub fn set(&mut self, value: f32) {
        self.value = value;
        self.slew = Slew::Idle;
    }

    pub fn ramp_to(&mut self, target: f32, seconds: f32, sample_rate: f32) {
        let remaining = (seconds.max(MIN_TIME) * sample_rate).round().max(1.0) as u32;
        self.slew = Slew::Linear { target, remaining };
    }

    pub fn glide_to(&mut self, target: f32, tau: f32, sample_rate: f32) {
        let coef = 1.0 - (-1.0 / (tau.max(MIN_TIME) * sample_rate)).exp();
        self.slew = Slew::Glide { target, coef };
    }

    /// Advance one sample and return the new value.
    pub fn next_sample(&mut self) -> f32 {
        match self.slew {
            Slew::Idle => {}
            Slew::Linear { target, remaining } => {
                // Recomputing the step each sample keeps re-ramps exact: a new
                // ramp_to mid-flight starts from the current value.
                let step = (target - self.value) / remaining as f32;
                self.value += step;
                let remaining = remaining - 1;
                if remaining == 0 {
                    self.value = target;
                    self.slew = Slew::Idle;
                } else {
                    self.slew = Slew::Linear { target, remaining };
                }
            }
            Slew::Glide { target, coef } => {
                self.value += coef * (target - self.value);
                if (self.value - target).abs() < 1e-6 {
                    self.value = target;
                    self.slew = Slew::Idle;
                }
            }
        }
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Where the value is heading (the value itself when settled).
    pub fn target(&self) -> f32 {
        match self.slew {
            Slew::Idle => self.value,
            Slew::Linear { target, .. } | Slew::Glide { target, .. } => target,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.slew, Slew::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    fn advance(ramp: &mut ValueRamp, samples: usize) -> f32 {
        let mut last = ramp.value();
        for _ in 0..samples {
            last = ramp.next_sample();
        }
        last
    }

    #[test]
    fn linear_ramp_lands_exactly() {
        let mut ramp = ValueRamp::new(0.0);
        ramp.ramp_to(0.4, 1.0, SAMPLE_RATE);

        advance(&mut ramp, 1_000);
        assert_eq!(ramp.value(), 0.4);
        assert!(ramp.is_settled());
    }

    #[test]
    fn reramp_starts_from_current_value() {
        let mut ramp = ValueRamp::new(0.4);
        ramp.ramp_to(0.0, 1.0, SAMPLE_RATE);
        advance(&mut ramp, 500); // mid-fade, value ≈ 0.2
        let mid = ramp.value();
        assert!((mid - 0.2).abs() < 0.01);

        // Re-ramp up: no jump back to 0.4, no discontinuity.
        ramp.ramp_to(0.4, 1.0, SAMPLE_RATE);
        let next = ramp.next_sample();
        assert!((next - mid).abs() < 0.001);

        advance(&mut ramp, 1_000);
        assert_eq!(ramp.value(), 0.4);
    }

    #[test]
    fn glide_converges_without_overshoot() {
        let mut ramp = ValueRamp::new(0.0);
        ramp.glide_to(0.5, 0.05, SAMPLE_RATE);

        let mut previous = 0.0;
        for _ in 0..2_000 {
            let value = ramp.next_sample();
            assert!(value >= previous - 1e-9, "glide reversed");
            assert!(value <= 0.5 + 1e-6, "glide overshot: {value}");
            previous = value;
        }
        assert!((ramp.value() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn glide_after_one_tau_is_about_63_percent() {
        let mut ramp = ValueRamp::new(0.0);
        ramp.glide_to(1.0, 0.1, SAMPLE_RATE);

        let value = advance(&mut ramp, 100); // exactly one tau
        assert!((value - 0.632).abs() < 0.01, "got {value}");
    }

    #[test]
    fn set_cancels_motion() {
        let mut ramp = ValueRamp::new(0.0);
        ramp.ramp_to(1.0, 1.0, SAMPLE_RATE);
        advance(&mut ramp, 10);

        ramp.set(0.7);
        assert_eq!(ramp.value(), 0.7);
        assert!(ramp.is_settled());
        assert_eq!(ramp.next_sample(), 0.7);
    }
}
