use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Rolling timing of `advance()` calls, used by drivers that pace the engine
/// against wall-clock time.
#[derive(Debug)]
pub struct TickTimer {
    samples: VecDeque<Duration>,
    max_samples: usize,
    current_tick_start: Option<Instant>,
}

impl TickTimer {
    pub fn new(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            samples: VecDeque::with_capacity(max_samples),
            max_samples,
            current_tick_start: None,
        }
    }

    pub fn start_tick(&mut self) {
        self.current_tick_start = Some(Instant::now());
    }

    /// Close the tick opened by [`TickTimer::start_tick`] and return its duration.
    pub fn end_tick(&mut self) -> Option<Duration> {
        let elapsed = self.current_tick_start.take()?.elapsed();
        self.record(elapsed);
        Some(elapsed)
    }

    pub fn record(&mut self, sample: Duration) {
        if self.samples.len() >= self.max_samples {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn average_tick_time(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }

        let total: Duration = self.samples.iter().sum();
        total / self.samples.len() as u32
    }

    /// How long to sleep after a tick that took `spent` to hold `ticks_per_second`.
    pub fn remaining_budget(spent: Duration, ticks_per_second: u32) -> Duration {
        let frame = Duration::from_secs(1) / ticks_per_second.max(1);
        frame.saturating_sub(spent)
    }
}
