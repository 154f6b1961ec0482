use crate::map_interface::{EntityTrack, Position, TrackSnapshot};
use crate::prelude::{NoiseSource, TrackError, TrackResult};
use crate::telemetry::log::LogManager;

/// Scale from a unit noise sample in (-0.5, 0.5) down to degrees of drift
/// per tick, so each coordinate moves inside (-0.0005, 0.0005).
const DRIFT_SPAN_DEG: f64 = 0.001;

/// Ordered, append-only position history for one tracked entity.
///
/// Seeded with exactly one position and never empty afterwards; entries are
/// only ever appended.
#[derive(Debug, Clone)]
pub struct Trajectory {
    positions: Vec<Position>,
}

impl Trajectory {
    fn seeded(origin: Position) -> Self {
        Self {
            positions: vec![origin],
        }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Most recent fix. The seeding invariant keeps the history non-empty.
    pub fn latest(&self) -> Position {
        self.positions[self.positions.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Owns the fixed set of trajectories and advances them together.
///
/// The store reacts to external timer pulses via [`advance_tick`]; it holds
/// no timer of its own. Entity identity is the index into the set, fixed at
/// construction.
///
/// [`advance_tick`]: TrajectoryStore::advance_tick
pub struct TrajectoryStore {
    tracks: Vec<Trajectory>,
    noise: Box<dyn NoiseSource + Send>,
    tick: u64,
    logger: LogManager,
}

impl TrajectoryStore {
    /// Creates one single-position trajectory per seed.
    pub fn new(seeds: &[Position], noise: Box<dyn NoiseSource + Send>) -> TrackResult<Self> {
        if seeds.is_empty() {
            return Err(TrackError::InvalidSeed(
                "no seed positions provided".to_string(),
            ));
        }
        for (index, seed) in seeds.iter().enumerate() {
            if !seed.is_finite() {
                return Err(TrackError::InvalidSeed(format!(
                    "seed {} has a non-finite coordinate",
                    index
                )));
            }
        }

        let logger = LogManager::new();
        logger.record(&format!("seeded {} trajectories", seeds.len()));
        Ok(Self {
            tracks: seeds.iter().copied().map(Trajectory::seeded).collect(),
            noise,
            tick: 0,
            logger,
        })
    }

    /// Appends one drifted position to every trajectory.
    ///
    /// Latitude draws its offset before longitude, so a scripted source sees
    /// two samples per entity per tick in that order. All entities advance
    /// within the same call; no caller can observe a partially advanced set.
    pub fn advance_tick(&mut self) {
        let noise = &mut self.noise;
        for track in &mut self.tracks {
            let last = track.latest();
            let next = Position::new(
                last.lat + noise.next_unit() * DRIFT_SPAN_DEG,
                last.lng + noise.next_unit() * DRIFT_SPAN_DEG,
            );
            track.positions.push(next);
        }
        self.tick += 1;
        self.logger.record_tick(self.tick, self.tracks.len());
    }

    /// Read-only view of the full track set.
    pub fn tracks(&self) -> &[Trajectory] {
        &self.tracks
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn entity_count(&self) -> usize {
        self.tracks.len()
    }

    /// Owned copy of the current state for publication to map clients.
    pub fn snapshot(&self) -> TrackSnapshot {
        let tracks = self
            .tracks
            .iter()
            .enumerate()
            .map(|(entity, track)| EntityTrack::new(entity, track.positions.clone()))
            .collect();
        TrackSnapshot::new(self.tick, tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::noise::{ScriptedNoise, UniformNoise};

    fn reference_seeds() -> Vec<Position> {
        vec![
            Position::new(16.1622, 74.8298),
            Position::new(16.1605, 74.8323),
            Position::new(16.1585, 74.8278),
        ]
    }

    #[test]
    fn seeding_requires_at_least_one_position() {
        let result = TrajectoryStore::new(&[], Box::new(ScriptedNoise::steady(0.0)));
        assert!(matches!(result, Err(TrackError::InvalidSeed(_))));
    }

    #[test]
    fn seeding_rejects_non_finite_coordinates() {
        let seeds = vec![Position::new(f64::NAN, 0.0)];
        let result = TrajectoryStore::new(&seeds, Box::new(ScriptedNoise::steady(0.0)));
        assert!(matches!(result, Err(TrackError::InvalidSeed(_))));
    }

    #[test]
    fn histories_grow_by_one_per_tick() {
        let mut store =
            TrajectoryStore::new(&reference_seeds(), Box::new(UniformNoise::seeded(3))).unwrap();
        for ticks in 1..=5 {
            store.advance_tick();
            for track in store.tracks() {
                assert_eq!(track.len(), 1 + ticks);
            }
        }
        assert_eq!(store.tick(), 5);
    }

    #[test]
    fn earlier_history_is_never_rewritten() {
        let mut store =
            TrajectoryStore::new(&reference_seeds(), Box::new(UniformNoise::seeded(11))).unwrap();
        store.advance_tick();
        store.advance_tick();

        let recorded: Vec<Vec<(u64, u64)>> = store
            .tracks()
            .iter()
            .map(|track| {
                track
                    .positions()
                    .iter()
                    .map(|p| (p.lat.to_bits(), p.lng.to_bits()))
                    .collect()
            })
            .collect();

        store.advance_tick();
        store.advance_tick();
        store.advance_tick();

        for (track, earlier) in store.tracks().iter().zip(&recorded) {
            let prefix: Vec<(u64, u64)> = track
                .positions()
                .iter()
                .take(earlier.len())
                .map(|p| (p.lat.to_bits(), p.lng.to_bits()))
                .collect();
            assert_eq!(&prefix, earlier);
        }
    }

    #[test]
    fn zero_drift_duplicates_each_seed() {
        let seeds = reference_seeds();
        let mut store =
            TrajectoryStore::new(&seeds, Box::new(ScriptedNoise::steady(0.0))).unwrap();
        store.advance_tick();

        for (track, seed) in store.tracks().iter().zip(&seeds) {
            assert_eq!(track.positions(), [*seed, *seed]);
        }
    }

    #[test]
    fn identical_noise_sequences_yield_identical_trajectories() {
        let seeds = reference_seeds();
        let script = vec![0.4, -0.3, 0.1, 0.25, -0.45, 0.05];

        let mut a =
            TrajectoryStore::new(&seeds, Box::new(ScriptedNoise::cycle(script.clone()))).unwrap();
        let mut b =
            TrajectoryStore::new(&seeds, Box::new(ScriptedNoise::cycle(script))).unwrap();
        for _ in 0..8 {
            a.advance_tick();
            b.advance_tick();
        }

        for (left, right) in a.tracks().iter().zip(b.tracks()) {
            assert_eq!(left.positions(), right.positions());
        }
    }

    #[test]
    fn seeded_uniform_noise_reproduces_a_session() {
        let seeds = reference_seeds();
        let mut a = TrajectoryStore::new(&seeds, Box::new(UniformNoise::seeded(99))).unwrap();
        let mut b = TrajectoryStore::new(&seeds, Box::new(UniformNoise::seeded(99))).unwrap();
        for _ in 0..10 {
            a.advance_tick();
            b.advance_tick();
        }
        for (left, right) in a.tracks().iter().zip(b.tracks()) {
            assert_eq!(left.positions(), right.positions());
        }
    }

    #[test]
    fn drift_per_tick_stays_inside_the_span() {
        let mut store =
            TrajectoryStore::new(&reference_seeds(), Box::new(UniformNoise::seeded(5))).unwrap();
        for _ in 0..50 {
            store.advance_tick();
        }
        for track in store.tracks() {
            for pair in track.positions().windows(2) {
                assert!((pair[1].lat - pair[0].lat).abs() <= DRIFT_SPAN_DEG / 2.0);
                assert!((pair[1].lng - pair[0].lng).abs() <= DRIFT_SPAN_DEG / 2.0);
            }
        }
    }

    #[test]
    fn snapshot_preserves_entity_order_and_tick() {
        let seeds = reference_seeds();
        let mut store =
            TrajectoryStore::new(&seeds, Box::new(ScriptedNoise::steady(0.2))).unwrap();
        store.advance_tick();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.tick, 1);
        assert_eq!(snapshot.entity_count(), seeds.len());
        for (index, track) in snapshot.tracks.iter().enumerate() {
            assert_eq!(track.entity, index);
            assert_eq!(track.positions[0], seeds[index]);
            assert_eq!(track.positions.len(), 2);
        }
    }
}
