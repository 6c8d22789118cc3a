use std::time::{Duration, Instant};

use crate::component::Timestep;

/// Turns wall-clock frame intervals into the step factor passed to
/// `tick_scaled`.
pub struct FrameClock {
    timestep: Timestep,
    last_tick: Instant,
}

impl FrameClock {
    /// Upper bound on a single step after a stall.
    const MAX_ELAPSED: Duration = Duration::from_millis(250);

    pub fn new(timestep: Timestep) -> Self {
        Self {
            timestep,
            last_tick: Instant::now(),
        }
    }

    pub fn step(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.step_for(elapsed)
    }

    pub fn step_for(&self, elapsed: Duration) -> f32 {
        match self.timestep {
            Timestep::PerFrame => 1.,
            Timestep::Elapsed { reference_fps } => {
                elapsed.min(Self::MAX_ELAPSED).as_secs_f32() * reference_fps
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_frame_step_ignores_elapsed_time() {
        let clock = FrameClock::new(Timestep::PerFrame);
        assert_eq!(clock.step_for(Duration::from_millis(5)), 1.);
        assert_eq!(clock.step_for(Duration::from_secs(3)), 1.);
    }

    #[test]
    fn elapsed_step_counts_reference_frames() {
        let clock = FrameClock::new(Timestep::Elapsed { reference_fps: 60. });
        let step = clock.step_for(Duration::from_secs_f32(2. / 60.));
        assert!((step - 2.).abs() < 1e-4);
    }

    #[test]
    fn elapsed_step_is_capped() {
        let clock = FrameClock::new(Timestep::Elapsed { reference_fps: 60. });
        let step = clock.step_for(Duration::from_secs(10));
        assert!((step - 15.).abs() < 1e-4);
    }
}
