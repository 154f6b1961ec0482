use crate::map_bridge::bridge::MapBridge;
use crate::map_bridge::model::MapViewModel;
use anyhow::Context;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use trackcore::map_interface::Position;
use trackcore::prelude::{NoiseSource, TrackConfig};
use trackcore::telemetry::MetricsRecorder;
use trackcore::tracking::{GeometrySummarizer, TrajectoryStore};

/// Owns the live track state for one run of the simulator.
pub struct SimulationSession {
    store: TrajectoryStore,
    interval_ms: u64,
    scenario: String,
    metrics: MetricsRecorder,
}

impl SimulationSession {
    pub fn new(
        config: TrackConfig,
        noise: Box<dyn NoiseSource + Send>,
        scenario: &str,
    ) -> anyhow::Result<Self> {
        let store =
            TrajectoryStore::new(&config.seeds, noise).context("seeding trajectory store")?;
        Ok(Self {
            store,
            interval_ms: config.interval_ms,
            scenario: scenario.to_string(),
            metrics: MetricsRecorder::new(),
        })
    }

    /// Advances every trajectory once and rebuilds the map view.
    pub fn advance(&mut self) -> anyhow::Result<MapViewModel> {
        self.store.advance_tick();
        self.metrics.record_tick();
        self.view()
    }

    /// Rebuilds the map view without advancing.
    pub fn view(&self) -> anyhow::Result<MapViewModel> {
        let summary = GeometrySummarizer::summarize(self.store.tracks())
            .context("summarizing track geometry")?;
        Ok(MapViewModel {
            snapshot: self.store.snapshot(),
            summary,
            scenario: self.scenario.clone(),
        })
    }

    /// Replaces the track set with a freshly seeded one. Tick numbering
    /// restarts; the session interval stays.
    pub fn reset(
        &mut self,
        seeds: &[Position],
        noise: Box<dyn NoiseSource + Send>,
        scenario: &str,
    ) -> anyhow::Result<MapViewModel> {
        self.store = TrajectoryStore::new(seeds, noise).context("reseeding trajectory store")?;
        self.scenario = scenario.to_string();
        self.metrics.record_reset();
        self.view()
    }

    /// Offline driver: advances `count` ticks back to back.
    pub fn run_ticks(&mut self, count: usize) -> anyhow::Result<MapViewModel> {
        for _ in 0..count {
            self.store.advance_tick();
            self.metrics.record_tick();
        }
        self.view()
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn record_error(&self) {
        self.metrics.record_error();
    }

    pub fn metrics(&self) -> (usize, usize, usize) {
        self.metrics.snapshot()
    }
}

/// Pumps the session once per configured interval until `shutdown` flips or
/// the future is dropped.
///
/// The interval timer lives inside this future, so cancelling it releases
/// the timer. Each advance and its publish run under one session guard; a
/// concurrent reset cannot interleave between them and map clients only ever
/// see a fully advanced set.
pub async fn drive(
    session: Arc<Mutex<SimulationSession>>,
    bridge: Arc<MapBridge>,
    mut shutdown: watch::Receiver<bool>,
) -> anyhow::Result<()> {
    let period = session.lock().unwrap().interval();
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // An interval completes immediately once; consume that so the first
    // advance lands a full period after session start.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let mut guard = session.lock().unwrap();
                let model = guard.advance()?;
                bridge.publish(&model)?;
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::reference::reference_seeds;
    use trackcore::tracking::UniformNoise;

    fn test_session(interval_ms: u64) -> SimulationSession {
        SimulationSession::new(
            TrackConfig {
                seeds: reference_seeds(),
                interval_ms,
            },
            Box::new(UniformNoise::seeded(8)),
            "runner test",
        )
        .unwrap()
    }

    #[test]
    fn session_advances_all_entities_together() {
        let mut session = test_session(5000);
        let model = session.run_ticks(4).unwrap();
        assert_eq!(model.snapshot.tick, 4);
        for track in &model.snapshot.tracks {
            assert_eq!(track.positions.len(), 5);
        }
        assert!(model.summary.radius_m > 0.0);
    }

    #[test]
    fn reset_restarts_tick_numbering_but_keeps_interval() {
        let mut session = test_session(1234);
        session.run_ticks(3).unwrap();

        let model = session
            .reset(
                &reference_seeds(),
                Box::new(UniformNoise::seeded(9)),
                "fresh",
            )
            .unwrap();
        assert_eq!(model.snapshot.tick, 0);
        assert_eq!(model.scenario, "fresh");
        assert_eq!(session.interval(), Duration::from_millis(1234));
        assert_eq!(session.metrics(), (3, 1, 0));
    }

    #[test]
    fn reset_rejects_an_empty_seed_list() {
        let mut session = test_session(5000);
        let result = session.reset(&[], Box::new(UniformNoise::seeded(9)), "empty");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn drive_stops_cleanly_on_shutdown() {
        let session = Arc::new(Mutex::new(test_session(10)));
        let bridge = Arc::new(MapBridge::new(session.clone()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let driver = tokio::spawn(drive(session.clone(), bridge.clone(), shutdown_rx));
        time::sleep(Duration::from_millis(60)).await;
        shutdown_tx.send(true).unwrap();
        driver.await.unwrap().unwrap();

        let stopped = bridge.snapshot();
        assert!(stopped.snapshot.tick >= 1);
        for track in &stopped.snapshot.tracks {
            assert_eq!(track.positions.len(), 1 + stopped.snapshot.tick as usize);
        }

        // No further advances once the driver has stopped.
        time::sleep(Duration::from_millis(40)).await;
        let after = bridge.snapshot();
        assert_eq!(after.snapshot.tick, stopped.snapshot.tick);
    }
}
