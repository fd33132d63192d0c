//! quebec — the Quebec City rail network in real time.
//!
//! Loads 40 trains parked at 10 stations, hands every train it can an
//! unclaimed route, and lets the periodic driver move them one block per
//! tick until all have arrived (or the time limit runs out).
//!
//! ```text
//! quebec [--config scheduler.json] [--routes routes.csv] [--seconds N]
//! ```
//!
//! `RUST_LOG=debug` shows every block transition.

mod network;

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use log::info;

use rt_core::{PointId, SchedulerConfig, StationId};
use rt_sim::{LogObserver, SimBuilder};
use rt_station::describe_station;
use rt_track::describe_point;

use network::{ROUTES_CSV, seed_store};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_SECONDS: u64 = 120;

/// Gare Québec-Gatineau, where most routes begin.
const HUB_STATION: StationId = StationId(9);

/// The junction west of Gare du Palais.
const JUNCTION: PointId = PointId(12);

// ── Command line ──────────────────────────────────────────────────────────────

struct Args {
    config:  Option<PathBuf>,
    routes:  Option<PathBuf>,
    seconds: u64,
}

impl Args {
    fn parse() -> Result<Self> {
        let mut args = Args { config: None, routes: None, seconds: DEFAULT_SECONDS };
        let mut it = std::env::args().skip(1);
        while let Some(flag) = it.next() {
            let value = it.next().with_context(|| format!("{flag} needs a value"))?;
            match flag.as_str() {
                "--config" => args.config = Some(value.into()),
                "--routes" => args.routes = Some(value.into()),
                "--seconds" => args.seconds = value.parse().with_context(|| format!("bad --seconds {value:?}"))?,
                other => bail!("unknown argument {other:?}"),
            }
        }
        Ok(args)
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse()?;

    // 1. Configuration.
    let config: SchedulerConfig = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SchedulerConfig::default(),
    };
    let routes_csv = match &args.routes {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
        None => ROUTES_CSV.to_owned(),
    };

    println!("=== quebec — rail movement scheduler ===");
    println!("Tick: {} ms  |  Limit: {} s", config.tick_interval_ms, args.seconds);
    println!();

    // 2. Load the network and start the tick worker.
    let store = seed_store(&routes_csv)?;
    let mut sim = SimBuilder::new(store).observer(LogObserver::new()).spawn(&config)?;

    sim.with_scheduler(|s| -> Result<()> {
        println!(
            "Network: {} points, {} blocks, {} stations, {} routes, {} trains",
            s.graph().point_count(),
            s.graph().block_count(),
            s.stations().len(),
            s.routes().len(),
            s.trains().len(),
        );
        println!();
        println!("{}", describe_station(s.stations().get(HUB_STATION)?));
        println!();
        println!("{}", describe_point(s.graph(), JUNCTION)?);
        println!();
        Ok(())
    })?;

    // 3. Dispatch.
    let started = sim.start_all_with_routes();
    println!("Dispatched {} train(s)", started.len());

    // 4. Run until every train has arrived.
    let t0 = Instant::now();
    let limit = Duration::from_secs(args.seconds);
    while !sim.is_idle() {
        if t0.elapsed() >= limit {
            info!("time limit reached, stopping remaining trains");
            sim.stop_all();
            break;
        }
        thread::sleep(config.tick_interval().min(Duration::from_millis(250)));
    }
    sim.shutdown();
    println!("Finished in {:.1} s", t0.elapsed().as_secs_f64());
    println!();

    // 5. Summary.
    sim.with_scheduler(|s| {
        println!("{:<28} {:>8} {:>10}", "Station", "Present", "Waiting");
        println!("{}", "-".repeat(48));
        for station in s.stations().iter() {
            println!(
                "{:<28} {:>8} {:>10}",
                station.name,
                station.in_station().len(),
                station.assigned().len(),
            );
        }
        println!();
        println!("Ticks run: {}", s.current_tick().0);
        println!("Trains still on track: {}", s.graph().occupied_blocks().count());
    });

    Ok(())
}
