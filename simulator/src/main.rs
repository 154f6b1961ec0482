use anyhow::Context;
use clap::Parser;
use map_bridge::bridge::MapBridge;
use scenario::reference::reference_seeds;
use session::config::SessionConfig;
use session::runner::{drive, SimulationSession};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use tokio::sync::watch;
use trackcore::prelude::NoiseSource;
use trackcore::tracking::UniformNoise;

mod map_bridge;
mod scenario;
mod session;

#[derive(Parser)]
#[command(author, version, about = "Rust-facing animal-tracking session driver")]
struct Args {
    /// Run a single offline session and emit a track summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a session config from YAML
    #[arg(long)]
    session: Option<PathBuf>,
    #[arg(long, default_value_t = 5000)]
    interval_ms: u64,
    /// Ticks to simulate when running offline
    #[arg(long, default_value_t = 12)]
    ticks: usize,
    /// Seed the drift source for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Keep the map bridge alive and advance tracks on the live timer
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let session_config = if let Some(path) = args.session {
        SessionConfig::load(path)?
    } else {
        SessionConfig::from_args(args.interval_ms, reference_seeds())
    };
    log::info!(
        "session configured with {} entities at {} ms per tick",
        session_config.seeds.len(),
        session_config.interval_ms
    );

    let noise: Box<dyn NoiseSource + Send> = match args.seed {
        Some(seed) => Box::new(UniformNoise::seeded(seed)),
        None => Box::new(UniformNoise::from_entropy()),
    };
    let session = Arc::new(Mutex::new(SimulationSession::new(
        session_config.to_track_config(),
        noise,
        "reference paddock",
    )?));
    let bridge = Arc::new(MapBridge::new(session.clone()));

    if args.offline {
        let model = session.lock().unwrap().run_ticks(args.ticks)?;

        println!(
            "Offline run -> entities {}, ticks {}, center ({:.5}, {:.5}), radius {:.1} m",
            model.snapshot.entity_count(),
            model.snapshot.tick,
            model.summary.center.lat,
            model.summary.center.lng,
            model.summary.radius_m
        );

        bridge.publish(&model)?;
        bridge.publish_status("Offline session results ready.");

        let report = format!(
            "scenario={} entities={} ticks={} center=({:.6},{:.6}) radius_m={:.2}\n",
            model.scenario,
            model.snapshot.entity_count(),
            model.snapshot.tick,
            model.summary.center.lat,
            model.summary.center.lng,
            model.summary.radius_m
        );
        let report_path = PathBuf::from("tools/data/offline_session.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        file.write_all(report.as_bytes())?;
    }
    if args.serve {
        bridge.publish(&session.lock().unwrap().view()?)?;
        bridge.publish_status("Map bridge running (Ctrl+C to stop)...");

        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for the live session")?;
        runtime.block_on(async {
            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            let driver = tokio::spawn(drive(session.clone(), bridge.clone(), shutdown_rx));
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            shutdown_tx
                .send(true)
                .context("signalling session shutdown")?;
            driver.await.context("joining the session driver")?
        })?;

        let (ticks, resets, errors) = session.lock().unwrap().metrics();
        bridge.publish_status(&format!(
            "Session closed -> ticks {ticks}, resets {resets}, errors {errors}"
        ));
    }

    Ok(())
}
