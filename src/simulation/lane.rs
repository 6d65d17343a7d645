use super::{Direction, GridPos, VehicleId};
use crate::error::EngineError;

/// Row and column of the middle of the intersection box.
pub const GRID_CENTER: i32 = 12;

/// Longest lane whose cells still have representable grid coordinates.
pub const MAX_LANE_LENGTH: usize = (i32::MAX - GRID_CENTER) as usize;

/// One position on a lane. Holds at most one vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pos: GridPos,
    blocked: bool,
    occupant: Option<VehicleId>,
}

impl Cell {
    fn new(pos: GridPos) -> Self {
        Self {
            pos,
            blocked: false,
            occupant: None,
        }
    }

    pub fn pos(&self) -> GridPos {
        self.pos
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn occupant(&self) -> Option<VehicleId> {
        self.occupant
    }

    pub fn free_to_move(&self) -> bool {
        self.occupant.is_none() && !self.blocked
    }
}

/// An approach road: cells ordered from the entry (index 0) to the terminal cell.
///
/// The successor of cell `i` is cell `i + 1`; the terminal cell has none.
/// Entering the gate cell requires the approach's signal to be green.
#[derive(Debug, Clone)]
pub struct Lane {
    direction: Direction,
    cells: Vec<Cell>,
    gate_index: usize,
}

impl Lane {
    pub fn new(direction: Direction, length: usize) -> Result<Self, EngineError> {
        if length == 0 {
            return Err(EngineError::EmptyLane);
        }
        let cell_count = i32::try_from(length)
            .ok()
            .filter(|&n| n as usize <= MAX_LANE_LENGTH)
            .ok_or(EngineError::LaneTooLong(length))?;

        let (d_row, d_col) = direction.heading();
        let back = cell_count - 1;
        let entry = Self::terminal_pos(direction).offset(-d_row * back, -d_col * back);

        let cells = (0..cell_count)
            .map(|i| Cell::new(entry.offset(d_row * i, d_col * i)))
            .collect();

        Ok(Self {
            direction,
            cells,
            gate_index: length.saturating_sub(3),
        })
    }

    // Last cell before the intersection box for each approach. Opposite
    // approaches drive on opposite sides so no two lanes share a cell.
    fn terminal_pos(direction: Direction) -> GridPos {
        let c = GRID_CENTER;
        match direction {
            Direction::North => GridPos::new(c - 1, c - 1),
            Direction::South => GridPos::new(c + 1, c + 1),
            Direction::East => GridPos::new(c - 1, c + 1),
            Direction::West => GridPos::new(c + 1, c - 1),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn entry_index(&self) -> usize {
        0
    }

    pub fn terminal_index(&self) -> usize {
        self.cells.len() - 1
    }

    pub fn gate_index(&self) -> usize {
        self.gate_index
    }

    pub fn is_gate(&self, index: usize) -> bool {
        index == self.gate_index
    }

    pub fn next_index(&self, index: usize) -> Option<usize> {
        let next = index + 1;
        (next < self.cells.len()).then_some(next)
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn entry(&self) -> &Cell {
        &self.cells[0]
    }

    pub fn free_to_move(&self, index: usize) -> bool {
        self.cells.get(index).is_some_and(Cell::free_to_move)
    }

    pub fn block(&mut self, index: usize) -> Result<(), EngineError> {
        self.cell_mut(index)?.blocked = true;
        Ok(())
    }

    pub fn unblock(&mut self, index: usize) -> Result<(), EngineError> {
        self.cell_mut(index)?.blocked = false;
        Ok(())
    }

    fn cell_mut(&mut self, index: usize) -> Result<&mut Cell, EngineError> {
        let length = self.cells.len();
        let direction = self.direction;
        self.cells.get_mut(index).ok_or(EngineError::CellOutOfRange {
            direction,
            index,
            length,
        })
    }

    /// Place `vehicle` on cell `index`. A second occupant is a movement bug.
    pub(crate) fn occupy(&mut self, index: usize, vehicle: VehicleId) {
        let cell = &mut self.cells[index];
        if let Some(other) = cell.occupant {
            panic!(
                "{} lane cell {} already holds vehicle {}, cannot place vehicle {}",
                self.direction, index, other.0, vehicle.0
            );
        }
        cell.occupant = Some(vehicle);
    }

    /// Remove `vehicle` from cell `index`. It must be the cell's occupant.
    pub(crate) fn vacate(&mut self, index: usize, vehicle: VehicleId) {
        let cell = &mut self.cells[index];
        if cell.occupant != Some(vehicle) {
            panic!(
                "vehicle {} claims {} lane cell {} but the cell holds {:?}",
                vehicle.0, self.direction, index, cell.occupant
            );
        }
        cell.occupant = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_index_is_three_before_the_end() {
        assert_eq!(Lane::new(Direction::North, 12).unwrap().gate_index(), 9);
        assert_eq!(Lane::new(Direction::North, 3).unwrap().gate_index(), 0);
        assert_eq!(Lane::new(Direction::North, 2).unwrap().gate_index(), 0);
        assert_eq!(Lane::new(Direction::North, 1).unwrap().gate_index(), 0);
    }

    #[test]
    fn test_zero_length_lane_is_rejected() {
        assert_eq!(Lane::new(Direction::East, 0).unwrap_err(), EngineError::EmptyLane);
    }

    #[test]
    fn test_oversized_lane_is_rejected() {
        assert_eq!(
            Lane::new(Direction::South, usize::MAX).unwrap_err(),
            EngineError::LaneTooLong(usize::MAX)
        );
        assert_eq!(
            Lane::new(Direction::South, MAX_LANE_LENGTH + 1).unwrap_err(),
            EngineError::LaneTooLong(MAX_LANE_LENGTH + 1)
        );
    }

    #[test]
    fn test_chain_ends_at_terminal_cell() {
        let lane = Lane::new(Direction::South, 5).unwrap();
        assert_eq!(lane.next_index(0), Some(1));
        assert_eq!(lane.next_index(3), Some(4));
        assert_eq!(lane.next_index(4), None);
        assert_eq!(lane.terminal_index(), 4);
    }

    #[test]
    fn test_cells_follow_heading() {
        for direction in Direction::ALL {
            let lane = Lane::new(direction, 12).unwrap();
            let (d_row, d_col) = direction.heading();
            for pair in lane.cells().windows(2) {
                assert_eq!(pair[1].pos(), pair[0].pos().offset(d_row, d_col));
            }
        }
    }

    #[test]
    fn test_lanes_never_share_a_position() {
        let mut seen = std::collections::HashSet::new();
        for direction in Direction::ALL {
            let lane = Lane::new(direction, 12).unwrap();
            for cell in lane.cells() {
                assert!(seen.insert(cell.pos()), "{:?} used twice", cell.pos());
            }
        }
    }

    #[test]
    fn test_blocked_cell_is_not_free() {
        let mut lane = Lane::new(Direction::West, 6).unwrap();
        assert!(lane.free_to_move(2));
        lane.block(2).unwrap();
        assert!(!lane.free_to_move(2));
        lane.unblock(2).unwrap();
        assert!(lane.free_to_move(2));
        assert!(lane.block(6).is_err());
        assert!(!lane.free_to_move(6));
    }

    #[test]
    fn test_occupied_cell_is_not_free() {
        let mut lane = Lane::new(Direction::North, 4).unwrap();
        lane.occupy(1, VehicleId(7));
        assert!(!lane.free_to_move(1));
        assert_eq!(lane.cell(1).and_then(Cell::occupant), Some(VehicleId(7)));
        lane.vacate(1, VehicleId(7));
        assert!(lane.free_to_move(1));
    }

    #[test]
    #[should_panic(expected = "already holds vehicle")]
    fn test_double_occupancy_panics() {
        let mut lane = Lane::new(Direction::North, 4).unwrap();
        lane.occupy(1, VehicleId(1));
        lane.occupy(1, VehicleId(2));
    }

    #[test]
    #[should_panic(expected = "claims")]
    fn test_vacating_foreign_cell_panics() {
        let mut lane = Lane::new(Direction::North, 4).unwrap();
        lane.occupy(1, VehicleId(1));
        lane.vacate(1, VehicleId(2));
    }
}
