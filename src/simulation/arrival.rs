use std::collections::VecDeque;

use super::{Direction, VehicleId};

/// What happened to one arrival at the head of an approach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalOutcome {
    Admitted(VehicleId),
    /// The entry cell was taken; the arrival is dropped, not retried.
    Lost,
}

/// Per-approach arrival bookkeeping.
///
/// Vehicles are only created when the entry cell is free, so `pending` holds
/// at most the vehicle still standing on the entry cell. The queue never
/// gates movement.
#[derive(Debug, Clone)]
pub struct ArrivalQueue {
    direction: Direction,
    pending: VecDeque<VehicleId>,
    arrivals: u64,
    admitted: u64,
    lost: u64,
}

impl ArrivalQueue {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            pending: VecDeque::new(),
            arrivals: 0,
            admitted: 0,
            lost: 0,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn record(&mut self, outcome: ArrivalOutcome) {
        self.arrivals += 1;
        match outcome {
            ArrivalOutcome::Admitted(id) => {
                self.admitted += 1;
                self.pending.push_back(id);
            }
            ArrivalOutcome::Lost => self.lost += 1,
        }
    }

    /// Forget vehicles that have moved off the entry cell.
    pub fn release_departed(&mut self, entry_occupant: Option<VehicleId>) {
        self.pending.retain(|id| Some(*id) == entry_occupant);
    }

    pub fn pending(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.pending.iter().copied()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn arrivals(&self) -> u64 {
        self.arrivals
    }

    pub fn admitted(&self) -> u64 {
        self.admitted
    }

    pub fn lost(&self) -> u64 {
        self.lost
    }
}
