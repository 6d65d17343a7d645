use serde::{Deserialize, Serialize};

use super::{Direction, Lane, VehicleId, VehicleSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleColor {
    Red,
    Blue,
    Green,
    Orange,
    Purple,
}

impl VehicleColor {
    /// Palette new vehicles are painted from, uniformly.
    pub const PALETTE: [VehicleColor; 5] = [
        VehicleColor::Red,
        VehicleColor::Blue,
        VehicleColor::Green,
        VehicleColor::Orange,
        VehicleColor::Purple,
    ];
}

/// A car travelling down one approach lane.
///
/// `position` and `previous` are indices into the lane of the vehicle's own
/// direction. While the vehicle is on the road, the lane cell at `position`
/// names this vehicle as its occupant.
#[derive(Debug, Clone)]
pub struct Vehicle {
    id: VehicleId,
    color: VehicleColor,
    direction: Direction,
    position: Option<usize>,
    previous: Option<usize>,
    exited: bool,
}

impl Vehicle {
    /// Put a new vehicle on the lane's entry cell.
    pub(crate) fn spawn(id: VehicleId, color: VehicleColor, lane: &mut Lane) -> Self {
        let entry = lane.entry_index();
        lane.occupy(entry, id);
        Self {
            id,
            color,
            direction: lane.direction(),
            position: Some(entry),
            previous: None,
            exited: false,
        }
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn color(&self) -> VehicleColor {
        self.color
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Cell vacated by the most recent move.
    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    pub fn can_move(&self, lane: &Lane) -> bool {
        self.position
            .and_then(|index| lane.next_index(index))
            .is_some_and(|next| lane.free_to_move(next))
    }

    pub fn at_terminal(&self, lane: &Lane) -> bool {
        self.position == Some(lane.terminal_index())
    }

    /// Once set this never clears.
    pub fn at_end(&self) -> bool {
        self.exited
    }

    /// Step to the next cell, or leave the road from the terminal cell.
    ///
    /// Callers check [`Vehicle::can_move`] (and the signal at the gate)
    /// first; this only performs the occupancy hand-over.
    pub(crate) fn move_forward(&mut self, lane: &mut Lane) {
        let Some(current) = self.position else {
            return;
        };

        lane.vacate(current, self.id);
        match lane.next_index(current) {
            None => {
                self.position = None;
                self.exited = true;
            }
            Some(next) => {
                self.previous = Some(current);
                self.position = Some(next);
                lane.occupy(next, self.id);
            }
        }
    }

    pub fn snapshot(&self, lane: &Lane) -> VehicleSnapshot {
        VehicleSnapshot {
            id: self.id,
            position: self.position.and_then(|i| lane.cell(i)).map(|cell| cell.pos()),
            color: self.color,
            direction: self.direction,
            exited: self.exited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lane(length: usize) -> Lane {
        Lane::new(Direction::North, length).unwrap()
    }

    #[test]
    fn test_spawn_occupies_entry() {
        let mut lane = lane(5);
        let vehicle = Vehicle::spawn(VehicleId(1), VehicleColor::Blue, &mut lane);
        assert_eq!(vehicle.position(), Some(0));
        assert_eq!(lane.entry().occupant(), Some(VehicleId(1)));
        assert!(!vehicle.at_end());
    }

    #[test]
    fn test_move_hands_over_single_cell() {
        let mut lane = lane(5);
        let mut vehicle = Vehicle::spawn(VehicleId(1), VehicleColor::Red, &mut lane);
        assert!(vehicle.can_move(&lane));
        vehicle.move_forward(&mut lane);

        assert_eq!(vehicle.position(), Some(1));
        assert_eq!(vehicle.previous(), Some(0));
        assert_eq!(lane.cell(0).unwrap().occupant(), None);
        assert_eq!(lane.cell(1).unwrap().occupant(), Some(VehicleId(1)));
        let occupied = lane.cells().iter().filter(|c| c.occupant().is_some()).count();
        assert_eq!(occupied, 1);
    }

    #[test]
    fn test_cannot_move_into_occupied_or_blocked_cell() {
        let mut lane = lane(5);
        let mut lead = Vehicle::spawn(VehicleId(1), VehicleColor::Red, &mut lane);
        lead.move_forward(&mut lane);
        let follower = Vehicle::spawn(VehicleId(2), VehicleColor::Green, &mut lane);
        assert!(!follower.can_move(&lane));

        lane.block(2).unwrap();
        assert!(!lead.can_move(&lane));
    }

    #[test]
    fn test_exit_from_terminal_cell() {
        let mut lane = lane(3);
        let mut vehicle = Vehicle::spawn(VehicleId(9), VehicleColor::Purple, &mut lane);
        vehicle.move_forward(&mut lane);
        vehicle.move_forward(&mut lane);
        assert!(vehicle.at_terminal(&lane));
        assert!(!vehicle.can_move(&lane));

        vehicle.move_forward(&mut lane);
        assert!(vehicle.at_end());
        assert_eq!(vehicle.position(), None);
        assert!(lane.cells().iter().all(|c| c.occupant().is_none()));

        // Further moves are ignored.
        vehicle.move_forward(&mut lane);
        assert!(vehicle.at_end());
    }

    #[test]
    fn test_snapshot_reports_grid_position() {
        let mut lane = lane(4);
        let vehicle = Vehicle::spawn(VehicleId(3), VehicleColor::Orange, &mut lane);
        let snapshot = vehicle.snapshot(&lane);
        assert_eq!(snapshot.position, Some(lane.entry().pos()));
        assert_eq!(snapshot.direction, Direction::North);
        assert_eq!(snapshot.color, VehicleColor::Orange);
        assert!(!snapshot.exited);
    }
}
