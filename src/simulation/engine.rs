use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Bernoulli, Distribution};
use std::collections::BTreeMap;

use super::{
    ArrivalOutcome, ArrivalQueue, Axis, Direction, Lane, Signal, SignalState, StatisticsSummary,
    Vehicle, VehicleColor, VehicleId, VehicleSnapshot, MAX_LANE_LENGTH,
};
use crate::error::EngineError;

/// Ticks the presentation layer runs per second of wall time.
pub const DEFAULT_TICKS_PER_SECOND: u32 = 20;

/// Cells per approach lane.
pub const DEFAULT_LANE_LENGTH: usize = 12;

/// Everything needed to build an [`Engine`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineParams {
    pub green_ns_ticks: u32,
    pub green_ew_ticks: u32,
    pub yellow_ticks: u32,
    pub arrival_probability: f64,
    pub duration_ticks: u64,
    pub lane_length: usize,
    pub seed: Option<u64>,
}

impl EngineParams {
    /// Yellow lasts one second of ticks and lanes are [`DEFAULT_LANE_LENGTH`] cells.
    pub fn new(green_ns_ticks: u32, green_ew_ticks: u32, arrival_probability: f64, duration_ticks: u64) -> Self {
        Self {
            green_ns_ticks,
            green_ew_ticks,
            yellow_ticks: DEFAULT_TICKS_PER_SECOND,
            arrival_probability,
            duration_ticks,
            lane_length: DEFAULT_LANE_LENGTH,
            seed: None,
        }
    }

    pub fn with_yellow_ticks(mut self, yellow_ticks: u32) -> Self {
        self.yellow_ticks = yellow_ticks;
        self
    }

    pub fn with_lane_length(mut self, lane_length: usize) -> Self {
        self.lane_length = lane_length;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.green_ns_ticks == 0 {
            return Err(EngineError::ZeroGreenDuration { axis: Axis::NorthSouth });
        }
        if self.green_ew_ticks == 0 {
            return Err(EngineError::ZeroGreenDuration { axis: Axis::EastWest });
        }
        if self.yellow_ticks == 0 {
            return Err(EngineError::ZeroYellowDuration);
        }
        // Written this way round so NaN is rejected too.
        if !(self.arrival_probability > 0.0 && self.arrival_probability <= 1.0) {
            return Err(EngineError::InvalidArrivalProbability(self.arrival_probability));
        }
        if self.duration_ticks == 0 {
            return Err(EngineError::ZeroRunDuration);
        }
        if self.lane_length == 0 {
            return Err(EngineError::EmptyLane);
        }
        if self.lane_length > MAX_LANE_LENGTH {
            return Err(EngineError::LaneTooLong(self.lane_length));
        }
        Ok(())
    }
}

/// The whole intersection: four approach lanes, two shared signals, and the
/// vehicles currently on the road.
///
/// One call to [`Engine::advance`] simulates one tick:
/// 1. bump the tick counter and stop once the configured duration is over;
/// 2. update each signal once (north/south share one, east/west the other);
/// 3. draw an arrival per approach and spawn onto free entry cells;
/// 4. move every lane from its terminal cell back to its entry cell, holding
///    vehicles in front of the gate cell unless their signal is green;
/// 5. retire vehicles that left the terminal cell.
pub struct Engine {
    running: bool,
    tick: u64,
    duration: u64,
    arrival_probability: f64,
    arrivals: Bernoulli,
    lanes: Vec<Lane>,
    signals: Vec<Signal>,
    queues: Vec<ArrivalQueue>,
    active: BTreeMap<VehicleId, Vehicle>,
    finished: Vec<Vehicle>,
    next_vehicle_id: u64,
    total_created: u64,
    total_exited: u64,
    rng: StdRng,
}

impl Engine {
    pub fn new(params: EngineParams) -> Result<Self, EngineError> {
        params.validate()?;

        let arrivals = Bernoulli::new(params.arrival_probability)
            .map_err(|_| EngineError::InvalidArrivalProbability(params.arrival_probability))?;

        let lanes = Direction::ALL
            .iter()
            .map(|&direction| Lane::new(direction, params.lane_length))
            .collect::<Result<Vec<_>, _>>()?;

        // Each axis is red while the other runs green and yellow, so both
        // lights share one cycle length and are never green together.
        let yellow = params.yellow_ticks;
        let signals = vec![
            Signal::new(
                params.green_ns_ticks,
                yellow,
                params.green_ew_ticks.saturating_add(yellow),
                SignalState::Green,
            ),
            Signal::new(
                params.green_ew_ticks,
                yellow,
                params.green_ns_ticks.saturating_add(yellow),
                SignalState::Red,
            ),
        ];

        let queues = Direction::ALL.iter().map(|&d| ArrivalQueue::new(d)).collect();

        let rng = if let Some(seed) = params.seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        log::info!(
            "Engine ready: green {}/{} ticks (N-S/E-W), yellow {} ticks, arrival p={:.3}, {} ticks, lanes of {} cells",
            params.green_ns_ticks,
            params.green_ew_ticks,
            yellow,
            params.arrival_probability,
            params.duration_ticks,
            params.lane_length
        );

        Ok(Self {
            running: true,
            tick: 0,
            duration: params.duration_ticks,
            arrival_probability: params.arrival_probability,
            arrivals,
            lanes,
            signals,
            queues,
            active: BTreeMap::new(),
            finished: Vec::new(),
            next_vehicle_id: 0,
            total_created: 0,
            total_exited: 0,
            rng,
        })
    }

    /// Simulate one tick. Does nothing once the run has ended.
    pub fn advance(&mut self) {
        if !self.running {
            return;
        }

        self.tick += 1;
        if self.tick > self.duration {
            self.running = false;
            log::info!(
                "Run finished after {} ticks: {} created, {} exited, {} still active",
                self.duration,
                self.total_created,
                self.total_exited,
                self.active.len()
            );
            return;
        }

        self.update_signals();
        self.spawn_arrivals();
        for direction in Direction::ALL {
            self.move_lane(direction);
        }
    }

    fn update_signals(&mut self) {
        // Iterate the stored signals, not the four directions: N/S and E/W
        // each resolve to one signal that must tick exactly once.
        for (axis, signal) in Axis::ALL.iter().zip(self.signals.iter_mut()) {
            if let Some(state) = signal.update() {
                log::trace!("tick {}: {} signal turned {}", self.tick, axis, state);
            }
        }
    }

    fn spawn_arrivals(&mut self) {
        for direction in Direction::ALL {
            if !self.arrivals.sample(&mut self.rng) {
                continue;
            }

            let lane = &mut self.lanes[direction.index()];
            let outcome = if lane.entry().free_to_move() {
                let id = VehicleId(self.next_vehicle_id);
                self.next_vehicle_id += 1;
                let color = VehicleColor::PALETTE[self.rng.gen_range(0..VehicleColor::PALETTE.len())];

                self.active.insert(id, Vehicle::spawn(id, color, lane));
                self.total_created += 1;
                log::debug!("tick {}: vehicle {} ({:?}) arrived from the {}", self.tick, id.0, color, direction);
                ArrivalOutcome::Admitted(id)
            } else {
                log::debug!("tick {}: arrival from the {} lost, entry cell taken", self.tick, direction);
                ArrivalOutcome::Lost
            };

            self.queues[direction.index()].record(outcome);
        }
    }

    fn move_lane(&mut self, direction: Direction) {
        let green = self.signals[direction.axis().index()].is_green();
        let lane = &mut self.lanes[direction.index()];

        // Tail to head: a vehicle must never slide into a cell vacated earlier
        // in the same tick, or it could move twice.
        for index in (0..lane.len()).rev() {
            let Some(id) = lane.cells()[index].occupant() else {
                continue;
            };

            let vehicle = match self.active.get_mut(&id) {
                Some(vehicle) if vehicle.position() == Some(index) => vehicle,
                Some(vehicle) => panic!(
                    "{} lane cell {} holds vehicle {} but the vehicle is at {:?}",
                    direction,
                    index,
                    id.0,
                    vehicle.position()
                ),
                None => panic!(
                    "{} lane cell {} holds vehicle {} which is not on the road",
                    direction, index, id.0
                ),
            };

            if vehicle.at_terminal(lane) {
                vehicle.move_forward(lane);
            } else if vehicle.can_move(lane) {
                if lane.is_gate(index + 1) && !green {
                    continue;
                }
                vehicle.move_forward(lane);
            } else {
                continue;
            }

            if vehicle.at_end() {
                if let Some(done) = self.active.remove(&id) {
                    self.finished.push(done);
                }
                self.total_exited += 1;
                log::debug!("tick {}: vehicle {} cleared the intersection from the {}", self.tick, id.0, direction);
            }
        }

        self.queues[direction.index()].release_departed(lane.entry().occupant());
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn arrival_probability(&self) -> f64 {
        self.arrival_probability
    }

    /// Vehicles currently on the road, oldest first.
    pub fn vehicles(&self) -> Vec<VehicleSnapshot> {
        self.active
            .values()
            .map(|vehicle| vehicle.snapshot(self.lane(vehicle.direction())))
            .collect()
    }

    /// Vehicles that have cleared the intersection, in exit order.
    pub fn finished(&self) -> Vec<VehicleSnapshot> {
        self.finished
            .iter()
            .map(|vehicle| vehicle.snapshot(self.lane(vehicle.direction())))
            .collect()
    }

    pub fn signal(&self, direction: Direction) -> &Signal {
        &self.signals[direction.axis().index()]
    }

    pub fn signal_state_of(&self, direction: Direction) -> SignalState {
        self.signal(direction).state()
    }

    pub fn lane(&self, direction: Direction) -> &Lane {
        &self.lanes[direction.index()]
    }

    pub fn arrival_queue(&self, direction: Direction) -> &ArrivalQueue {
        &self.queues[direction.index()]
    }

    /// Stop vehicles from entering a cell. Vehicles already on it may leave.
    pub fn block_cell(&mut self, direction: Direction, index: usize) -> Result<(), EngineError> {
        self.lanes[direction.index()].block(index)
    }

    pub fn unblock_cell(&mut self, direction: Direction, index: usize) -> Result<(), EngineError> {
        self.lanes[direction.index()].unblock(index)
    }

    pub fn statistics(&self) -> StatisticsSummary {
        StatisticsSummary {
            ticks_elapsed: self.tick.min(self.duration),
            total_created: self.total_created,
            total_exited: self.total_exited,
            active_count: self.active.len() as u64,
            lost_arrivals: self.queues.iter().map(ArrivalQueue::lost).sum(),
        }
    }
}
