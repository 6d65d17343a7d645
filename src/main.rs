use anyhow::Result;
use clap::Parser;
use log::info;
use std::time::Instant;

use intersection_sim::{
    config::SimulationConfig,
    simulation::{Direction, Engine, TickTimer},
};

#[derive(Parser)]
#[command(name = "intersection-sim")]
#[command(about = "Headless driver for the four-way intersection simulation")]
struct Args {
    /// Simulation configuration file
    #[arg(short, long, default_value = "intersection.toml")]
    config: String,

    /// Random seed for reproducible runs (overrides the configuration file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run duration in ticks (overrides the configuration file)
    #[arg(short, long)]
    duration: Option<u64>,

    /// Pace ticks at the configured ticks per second instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Log a status line every N ticks (defaults to one simulated second)
    #[arg(long)]
    report_every: Option<u64>,

    /// Enable verbose logging for detailed simulation progress
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .parse_default_env()
        .init();
    info!("Starting intersection simulator (console mode)");

    let mut config = SimulationConfig::load_from_file(&args.config)?;
    if let Some(seed) = args.seed {
        config.run.seed = Some(seed);
    }
    if let Some(duration) = args.duration {
        config.run.duration_ticks = duration;
    }

    let ticks_per_second = config.run.ticks_per_second;
    let report_every = args.report_every.unwrap_or(ticks_per_second as u64).max(1);

    info!("=== Simulation Configuration ===");
    info!(
        "Green: {}s north/south, {}s east/west, yellow {}s",
        config.signals.green_ns_seconds, config.signals.green_ew_seconds, config.signals.yellow_seconds
    );
    info!("Arrivals: 1 in {} per approach per tick", config.arrivals.denominator);
    info!("Duration: {} ticks at {} ticks/s", config.run.duration_ticks, ticks_per_second);
    if let Some(seed) = config.run.seed {
        info!("Random Seed: {}", seed);
    }

    let mut engine = Engine::new(config.engine_params())?;
    let mut timer = TickTimer::new(ticks_per_second as usize);
    let start_time = Instant::now();

    while engine.is_running() {
        timer.start_tick();
        engine.advance();
        let spent = timer.end_tick().unwrap_or_default();

        if engine.is_running() && engine.tick() % report_every == 0 {
            let stats = engine.statistics();
            info!(
                "Tick {}: {} active, {} exited, lights N-S {} / E-W {}, avg tick {:.1}us",
                engine.tick(),
                stats.active_count,
                stats.total_exited,
                engine.signal_state_of(Direction::North),
                engine.signal_state_of(Direction::East),
                timer.average_tick_time().as_secs_f64() * 1e6
            );
        }

        if args.realtime {
            std::thread::sleep(TickTimer::remaining_budget(spent, ticks_per_second));
        }
    }

    info!("Simulation ended in {:.2}s wall time", start_time.elapsed().as_secs_f64());
    for direction in Direction::ALL {
        let queue = engine.arrival_queue(direction);
        info!(
            "  {:>5}: {} arrivals, {} admitted, {} lost",
            direction,
            queue.arrivals(),
            queue.admitted(),
            queue.lost()
        );
    }

    println!("Simulation ended. Stats:");
    println!("{}", engine.statistics());

    Ok(())
}
