use crate::map_interface::Position;
use serde::{Deserialize, Serialize};

/// Session-level inputs the core takes from its host: where each tracked
/// entity starts and how often the set advances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackConfig {
    pub seeds: Vec<Position>,
    pub interval_ms: u64,
}

/// Common error type for track-state operations.
#[derive(thiserror::Error, Debug)]
pub enum TrackError {
    #[error("invalid seed: {0}")]
    InvalidSeed(String),
    #[error("empty track set: {0}")]
    EmptySet(String),
}

pub type TrackResult<T> = Result<T, TrackError>;

/// Source of per-tick drift samples.
///
/// Implementations yield one sample per coordinate update, nominally inside
/// the open band (-0.5, 0.5); the store scales samples down to degrees. The
/// source is injected so a session can run against a seeded or scripted
/// sequence instead of process-global randomness.
pub trait NoiseSource {
    fn next_unit(&mut self) -> f64;
}
