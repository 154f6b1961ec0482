use crate::geo::{DistanceHelper, GeoBounds};
use crate::map_interface::{GeometrySummary, Position};
use crate::prelude::{TrackError, TrackResult};
use crate::tracking::store::Trajectory;

/// Derives the map-facing summary for a set of trajectories.
///
/// The center is the midpoint of the axis-aligned bounding box over every
/// recorded position, not the arithmetic mean and not a minimum-enclosing-
/// circle center. The radius is the greatest ground distance from that
/// midpoint to any recorded position, so the circle contains the full
/// history of every entity while remaining an upper bound rather than the
/// minimal enclosing radius.
pub struct GeometrySummarizer;

impl GeometrySummarizer {
    /// Bounding-box midpoint of all recorded positions.
    pub fn centroid(tracks: &[Trajectory]) -> TrackResult<Position> {
        let bounds = GeoBounds::enclosing(Self::flatten(tracks))
            .ok_or_else(|| TrackError::EmptySet("no recorded positions".to_string()))?;
        Ok(bounds.midpoint())
    }

    /// Maximum great-circle distance in meters from `center` to any
    /// recorded position.
    pub fn enclosing_radius_m(tracks: &[Trajectory], center: Position) -> TrackResult<f64> {
        let mut farthest: Option<f64> = None;
        for position in Self::flatten(tracks) {
            let distance = DistanceHelper::haversine_m(center, position);
            farthest = Some(match farthest {
                Some(previous) => previous.max(distance),
                None => distance,
            });
        }
        farthest.ok_or_else(|| TrackError::EmptySet("no recorded positions".to_string()))
    }

    /// Centroid plus enclosing radius, recomputed from scratch.
    pub fn summarize(tracks: &[Trajectory]) -> TrackResult<GeometrySummary> {
        let center = Self::centroid(tracks)?;
        let radius_m = Self::enclosing_radius_m(tracks, center)?;
        Ok(GeometrySummary::new(center, radius_m))
    }

    fn flatten(tracks: &[Trajectory]) -> impl Iterator<Item = Position> + '_ {
        tracks
            .iter()
            .flat_map(|track| track.positions().iter().copied())
    }
}
