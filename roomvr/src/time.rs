use std::time::Duration;

/// Frame clock sample handed to every update call.
#[derive(Clone, Copy, Debug)]
pub struct Time {
    /// Time elapsed since the previous frame.
    pub elapsed: Duration,
    /// Time elapsed since the frame loop started.
    pub total: Duration,
}

impl Time {
    pub fn zero() -> Time {
        Time {
            elapsed: Duration::ZERO,
            total: Duration::ZERO,
        }
    }

    /// Next frame's sample after `elapsed` has passed.
    pub fn advanced_by(&self, elapsed: Duration) -> Time {
        Time {
            elapsed,
            total: self.total + elapsed,
        }
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    pub fn total_secs(&self) -> f32 {
        self.total.as_secs_f32()
    }
}
