use crate::map_interface::Position;
use serde::{Deserialize, Serialize};

/// Derived geometry for the boundary circle drawn around all recorded fixes.
///
/// Valid only for the track-set snapshot it was computed from; recomputed
/// from scratch after every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometrySummary {
    pub center: Position,
    pub radius_m: f64,
}

impl GeometrySummary {
    pub fn new(center: Position, radius_m: f64) -> Self {
        Self { center, radius_m }
    }
}
