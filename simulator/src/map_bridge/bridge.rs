use crate::map_bridge::model::{MapViewModel, SeedList};
use crate::scenario::builder::{build_seed_positions, ScenarioConfig};
use crate::session::runner::SimulationSession;
use anyhow::Result;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex, RwLock},
    thread,
};
use tokio::runtime::Builder;
use trackcore::tracking::UniformNoise;
use warp::{http::StatusCode, Filter};

fn map_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct BridgeError;

impl warp::reject::Reject for BridgeError {}

/// Bridge hosting the track-state HTTP endpoint for map clients.
pub struct MapBridge {
    state: Arc<RwLock<MapViewModel>>,
}

impl MapBridge {
    pub fn new(session: Arc<Mutex<SimulationSession>>) -> Self {
        let state = Arc::new(RwLock::new(MapViewModel::default()));
        let state_for_filter = state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let session_filter = warp::any().map(move || session.clone());

        let tracks_route = warp::path("tracks")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: Arc<RwLock<MapViewModel>>| {
                warp::reply::json(&*state.read().unwrap())
            });

        let seeds_route = warp::path("seeds")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(session_filter.clone())
            .and_then(
                |list: SeedList,
                 state: Arc<RwLock<MapViewModel>>,
                 session: Arc<Mutex<SimulationSession>>| async move {
                    let label = list
                        .name
                        .clone()
                        .unwrap_or_else(|| "posted seeds".to_string());
                    let outcome = {
                        let mut guard = session.lock().unwrap();
                        guard.reset(
                            &list.seeds,
                            Box::new(UniformNoise::from_entropy()),
                            &label,
                        )
                    };
                    match outcome {
                        Ok(model) => {
                            *state.write().unwrap() = model.clone();
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "entities": model.snapshot.entity_count()
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("seeds error: {}", err);
                            session.lock().unwrap().record_error();
                            Err(warp::reject::custom(BridgeError))
                        }
                    }
                },
            );

        let scenario_route = warp::path("scenario")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(session_filter)
            .and_then(
                |config: ScenarioConfig,
                 state: Arc<RwLock<MapViewModel>>,
                 session: Arc<Mutex<SimulationSession>>| async move {
                    let label = config
                        .name
                        .clone()
                        .unwrap_or_else(|| "generated scenario".to_string());
                    let outcome = build_seed_positions(&config).and_then(|seeds| {
                        let mut guard = session.lock().unwrap();
                        guard.reset(&seeds, Box::new(UniformNoise::seeded(config.seed)), &label)
                    });
                    match outcome {
                        Ok(model) => {
                            *state.write().unwrap() = model.clone();
                            println!(
                                "[MAP] Scenario {} -> {} entities",
                                label,
                                model.snapshot.entity_count()
                            );
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "entities": model.snapshot.entity_count(),
                                    "description": config.description.clone().unwrap_or_default()
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("scenario error: {}", err);
                            session.lock().unwrap().record_error();
                            Err(warp::reject::custom(BridgeError))
                        }
                    }
                },
            );

        thread::spawn(move || {
            let routes = tracks_route.or(seeds_route).or(scenario_route);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(map_bind_address()).await;
            });
        });

        Self { state }
    }

    pub fn publish(&self, model: &MapViewModel) -> Result<()> {
        let mut guard = self.state.write().unwrap();
        *guard = model.clone();
        println!(
            "[MAP] tick {}: {} entities inside {:.1} m of ({:.5}, {:.5})",
            guard.snapshot.tick,
            guard.snapshot.entity_count(),
            guard.summary.radius_m,
            guard.summary.center.lat,
            guard.summary.center.lng
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[MAP] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> MapViewModel {
        self.state.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::reference::reference_seeds;
    use trackcore::prelude::TrackConfig;

    #[test]
    fn bridge_publishes_session_state() {
        let session = Arc::new(Mutex::new(
            SimulationSession::new(
                TrackConfig {
                    seeds: reference_seeds(),
                    interval_ms: 5000,
                },
                Box::new(UniformNoise::seeded(1)),
                "bridge test",
            )
            .unwrap(),
        ));
        let bridge = MapBridge::new(session.clone());

        let model = session.lock().unwrap().advance().unwrap();
        bridge.publish(&model).unwrap();

        let snapshot = bridge.snapshot();
        assert_eq!(snapshot.snapshot.tick, 1);
        assert_eq!(snapshot.snapshot.entity_count(), 3);
        assert_eq!(snapshot.scenario, "bridge test");
    }
}
