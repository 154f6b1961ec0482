use crate::map_interface::Position;
use serde::{Deserialize, Serialize};

/// One entity's recorded positions as handed to map clients.
///
/// `entity` is the stable zero-based identity; clients attach display names,
/// icons, and path colors by this index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityTrack {
    pub entity: usize,
    pub positions: Vec<Position>,
}

impl EntityTrack {
    pub fn new(entity: usize, positions: Vec<Position>) -> Self {
        Self { entity, positions }
    }

    /// Most recent fix, if any position has been recorded.
    pub fn latest(&self) -> Option<Position> {
        self.positions.last().copied()
    }
}

/// Immutable copy of the full track set at one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackSnapshot {
    pub tick: u64,
    pub tracks: Vec<EntityTrack>,
}

impl TrackSnapshot {
    pub fn new(tick: u64, tracks: Vec<EntityTrack>) -> Self {
        Self { tick, tracks }
    }

    pub fn entity_count(&self) -> usize {
        self.tracks.len()
    }
}
