use serde::{Deserialize, Serialize};
use trackcore::map_interface::{GeometrySummary, Position, TrackSnapshot};

/// View published to map clients after every mutation of the track set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapViewModel {
    pub snapshot: TrackSnapshot,
    pub summary: GeometrySummary,
    pub scenario: String,
}

/// Explicit seed layout posted by a client to restart the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedList {
    pub seeds: Vec<Position>,
    #[serde(default)]
    pub name: Option<String>,
}
