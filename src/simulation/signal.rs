use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalState {
    Green,
    Yellow,
    Red,
}

impl SignalState {
    /// Next phase in the green -> yellow -> red -> green cycle.
    pub fn next(self) -> Self {
        match self {
            SignalState::Green => SignalState::Yellow,
            SignalState::Yellow => SignalState::Red,
            SignalState::Red => SignalState::Green,
        }
    }
}

impl fmt::Display for SignalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignalState::Green => "green",
            SignalState::Yellow => "yellow",
            SignalState::Red => "red",
        };
        f.pad(name)
    }
}

/// Three-phase traffic light timer.
///
/// Every call to [`Signal::update`] counts one tick against the current
/// phase; once the phase has run for its full duration the light moves on
/// and the counter restarts at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    state: SignalState,
    green_ticks: u32,
    yellow_ticks: u32,
    red_ticks: u32,
    elapsed: u32,
}

impl Signal {
    /// Durations below one tick are raised to one.
    pub fn new(green_ticks: u32, yellow_ticks: u32, red_ticks: u32, initial: SignalState) -> Self {
        Self {
            state: initial,
            green_ticks: green_ticks.max(1),
            yellow_ticks: yellow_ticks.max(1),
            red_ticks: red_ticks.max(1),
            elapsed: 0,
        }
    }

    pub fn state(&self) -> SignalState {
        self.state
    }

    pub fn is_green(&self) -> bool {
        self.state == SignalState::Green
    }

    /// Ticks spent in the current phase.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn duration_of(&self, state: SignalState) -> u32 {
        match state {
            SignalState::Green => self.green_ticks,
            SignalState::Yellow => self.yellow_ticks,
            SignalState::Red => self.red_ticks,
        }
    }

    pub fn cycle_ticks(&self) -> u32 {
        self.green_ticks
            .saturating_add(self.yellow_ticks)
            .saturating_add(self.red_ticks)
    }

    /// Advance the timer by one tick. Returns the new state when a phase change happened.
    pub fn update(&mut self) -> Option<SignalState> {
        self.elapsed += 1;
        if self.elapsed >= self.duration_of(self.state) {
            self.state = self.state.next();
            self.elapsed = 0;
            Some(self.state)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(signal: &mut Signal, ticks: u32) -> Vec<SignalState> {
        (0..ticks)
            .map(|_| {
                signal.update();
                signal.state()
            })
            .collect()
    }

    #[test]
    fn test_phase_sequence_over_one_cycle() {
        use SignalState::*;
        let mut signal = Signal::new(3, 2, 4, Green);
        let states = run(&mut signal, 9);
        assert_eq!(states, vec![Green, Green, Yellow, Yellow, Red, Red, Red, Red, Green]);
    }

    #[test]
    fn test_phase_boundaries_for_various_durations() {
        for (g, y, r) in [(1, 1, 1), (5, 1, 7), (20, 20, 60), (2, 9, 3)] {
            let mut signal = Signal::new(g, y, r, SignalState::Green);
            run(&mut signal, g);
            assert_eq!(signal.state(), SignalState::Yellow, "after {} ticks of ({}, {}, {})", g, g, y, r);
            run(&mut signal, y);
            assert_eq!(signal.state(), SignalState::Red, "after {} ticks of ({}, {}, {})", g + y, g, y, r);
            run(&mut signal, r);
            assert_eq!(signal.state(), SignalState::Green, "after {} ticks of ({}, {}, {})", g + y + r, g, y, r);
            assert_eq!(signal.elapsed(), 0);
        }
    }

    #[test]
    fn test_zero_durations_are_clamped() {
        let mut signal = Signal::new(0, 0, 0, SignalState::Red);
        assert_eq!(signal.cycle_ticks(), 3);
        assert_eq!(signal.update(), Some(SignalState::Green));
        assert_eq!(signal.update(), Some(SignalState::Yellow));
        assert_eq!(signal.update(), Some(SignalState::Red));
    }

    #[test]
    fn test_cycle_length_saturates() {
        let signal = Signal::new(u32::MAX, 20, u32::MAX, SignalState::Green);
        assert_eq!(signal.cycle_ticks(), u32::MAX);
    }

    #[test]
    fn test_elapsed_counts_single_ticks() {
        let mut signal = Signal::new(10, 2, 10, SignalState::Green);
        for expected in 1..10 {
            assert_eq!(signal.update(), None);
            assert_eq!(signal.elapsed(), expected);
        }
    }
}
