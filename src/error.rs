use thiserror::Error;

use crate::simulation::{Axis, Direction};

/// Errors raised when building or reconfiguring an [`Engine`](crate::simulation::Engine).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("green duration for the {axis} axis must be at least one tick")]
    ZeroGreenDuration { axis: Axis },
    #[error("yellow duration must be at least one tick")]
    ZeroYellowDuration,
    #[error("arrival probability must be in (0, 1], got {0}")]
    InvalidArrivalProbability(f64),
    #[error("run duration must be at least one tick")]
    ZeroRunDuration,
    #[error("lane length must be at least one cell")]
    EmptyLane,
    #[error("lane length {0} does not fit on the grid")]
    LaneTooLong(usize),
    #[error("cell {index} is outside the {direction} lane ({length} cells)")]
    CellOutOfRange {
        direction: Direction,
        index: usize,
        length: usize,
    },
}
