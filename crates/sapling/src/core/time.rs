/// Fixed timestep accumulator.
/// Turns variable frame times into a whole number of fixed update steps.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per step.
    dt: f32,
    /// Upper bound on steps per frame, so a long stall cannot snowball.
    max_steps: u32,
    /// Time carried over to the next frame.
    accumulator: f32,
}

impl FixedTimestep {
    pub const DEFAULT_MAX_STEPS: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self::with_max_steps(dt, Self::DEFAULT_MAX_STEPS)
    }

    pub fn with_max_steps(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            max_steps: max_steps.max(1),
            accumulator: 0.0,
        }
    }

    /// Add frame time. Returns how many fixed steps to run this frame.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator = (self.accumulator + frame_dt.max(0.0)).min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Fraction of a step left in the accumulator (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Drop any carried-over time.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_frame_is_one_step() {
        let mut ts = FixedTimestep::new(0.25);
        assert_eq!(ts.accumulate(0.25), 1);
        assert_eq!(ts.alpha(), 0.0);
    }

    #[test]
    fn partial_frames_carry_over() {
        let mut ts = FixedTimestep::new(0.25);
        assert_eq!(ts.accumulate(0.125), 0);
        assert_eq!(ts.alpha(), 0.5);
        assert_eq!(ts.accumulate(0.25), 1);
        assert_eq!(ts.alpha(), 0.5);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut ts = FixedTimestep::with_max_steps(0.25, 3);
        assert_eq!(ts.accumulate(10.0), 3);
        assert_eq!(ts.accumulate(0.0), 0);
    }

    #[test]
    fn negative_frame_time_is_ignored() {
        let mut ts = FixedTimestep::new(0.25);
        ts.accumulate(0.125);
        assert_eq!(ts.accumulate(-1.0), 0);
        assert_eq!(ts.alpha(), 0.5);
    }

    #[test]
    fn reset_drops_carry() {
        let mut ts = FixedTimestep::new(0.25);
        ts.accumulate(0.2);
        ts.reset();
        assert_eq!(ts.alpha(), 0.0);
    }

    #[test]
    fn zero_max_steps_is_clamped_to_one() {
        let ts = FixedTimestep::with_max_steps(0.25, 0);
        assert_eq!(ts.max_steps(), 1);
    }
}
