//! # Frame Timing
//!
//! Fixed-timestep accumulator that decouples logic ticks from display refresh.

/// Converts variable frame durations into a whole number of fixed logic steps.
///
/// Leftover time carries into the next frame. When a frame takes so long that
/// more than `max_steps_per_frame` steps are owed, the backlog is dropped so a
/// stall never turns into a burst of catch-up ticks.
///
/// # Examples
///
/// ```
/// use wanderer::FixedTimestep;
///
/// let mut clock = FixedTimestep::new(60);
/// assert_eq!(clock.advance(1.0 / 60.0), 1);
/// assert_eq!(clock.advance(0.001), 0);
/// ```
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step_seconds: f64,
    accumulator: f64,
    max_steps_per_frame: u32,
}

impl FixedTimestep {
    /// Default catch-up limit per rendered frame.
    pub const DEFAULT_MAX_STEPS: u32 = 5;

    /// Creates a timestep running at `ticks_per_second`.
    pub fn new(ticks_per_second: u32) -> Self {
        Self::with_max_steps(ticks_per_second, Self::DEFAULT_MAX_STEPS)
    }

    pub fn with_max_steps(ticks_per_second: u32, max_steps_per_frame: u32) -> Self {
        Self {
            step_seconds: 1.0 / f64::from(ticks_per_second.max(1)),
            accumulator: 0.0,
            max_steps_per_frame: max_steps_per_frame.max(1),
        }
    }

    /// Adds elapsed frame time and returns how many logic steps to run.
    pub fn advance(&mut self, frame_seconds: f64) -> u32 {
        // Small tolerance so a frame of exactly one step never rounds down to zero.
        const EPSILON: f64 = 1e-9;

        self.accumulator += frame_seconds.max(0.0);
        let mut steps = 0;
        while self.accumulator + EPSILON >= self.step_seconds {
            if steps == self.max_steps_per_frame {
                self.accumulator = 0.0;
                break;
            }
            self.accumulator -= self.step_seconds;
            steps += 1;
        }
        self.accumulator = self.accumulator.max(0.0);
        steps
    }
}
