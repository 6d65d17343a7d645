use serde::{Deserialize, Serialize};
use std::fmt;

pub mod arrival;
pub mod engine;
pub mod lane;
pub mod signal;
pub mod timing;
pub mod vehicle;

pub use arrival::*;
pub use engine::*;
pub use lane::*;
pub use signal::*;
pub use timing::*;
pub use vehicle::*;

/// The approach a vehicle arrives from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Fixed evaluation order for spawning and movement.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    /// The pair of opposite approaches this one belongs to.
    pub fn axis(self) -> Axis {
        match self {
            Direction::North | Direction::South => Axis::NorthSouth,
            Direction::East | Direction::West => Axis::EastWest,
        }
    }

    /// Grid step (rows, cols) taken by a vehicle on this approach.
    pub fn heading(self) -> (i32, i32) {
        match self {
            Direction::North => (1, 0),
            Direction::South => (-1, 0),
            Direction::East => (0, -1),
            Direction::West => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        f.pad(name)
    }
}

/// A pair of opposite approaches sharing one [`Signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    NorthSouth,
    EastWest,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::NorthSouth, Axis::EastWest];

    pub fn index(self) -> usize {
        match self {
            Axis::NorthSouth => 0,
            Axis::EastWest => 1,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::NorthSouth => f.pad("north/south"),
            Axis::EastWest => f.pad("east/west"),
        }
    }
}

/// Logical grid coordinate of a cell. The renderer maps these to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub row: i32,
    pub col: i32,
}

impl GridPos {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn offset(self, rows: i32, cols: i32) -> Self {
        Self {
            row: self.row + rows,
            col: self.col + cols,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VehicleId(pub u64);

/// Read-only view of a vehicle handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleSnapshot {
    pub id: VehicleId,
    pub position: Option<GridPos>,
    pub color: VehicleColor,
    pub direction: Direction,
    pub exited: bool,
}

/// End-of-run (or any-time) figures produced on demand by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatisticsSummary {
    pub ticks_elapsed: u64,
    pub total_created: u64,
    pub total_exited: u64,
    pub active_count: u64,
    pub lost_arrivals: u64,
}

impl fmt::Display for StatisticsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Time: {}", self.ticks_elapsed)?;
        writeln!(f, "Total created: {}", self.total_created)?;
        writeln!(f, "Total exited: {}", self.total_exited)?;
        writeln!(f, "Active: {}", self.active_count)?;
        write!(f, "Lost arrivals: {}", self.lost_arrivals)
    }
}
