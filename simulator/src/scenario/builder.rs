use anyhow::bail;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use trackcore::map_interface::Position;

/// Configuration for generating a synthetic herd layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub entity_count: usize,
    pub center_lat: f64,
    pub center_lng: f64,
    pub spread_deg: f64,
    pub seed: u64,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            entity_count: 3,
            center_lat: 16.1604,
            center_lng: 74.83,
            spread_deg: 0.0025,
            seed: 0,
            name: None,
            description: None,
        }
    }
}

/// Builds a reproducible seed layout scattered around the scenario center.
pub fn build_seed_positions(config: &ScenarioConfig) -> anyhow::Result<Vec<Position>> {
    if config.entity_count == 0 {
        bail!("scenario needs at least one entity");
    }
    if !config.center_lat.is_finite() || !config.center_lng.is_finite() {
        bail!("scenario center must be finite");
    }
    if !config.spread_deg.is_finite() || config.spread_deg < 0.0 {
        bail!("scenario spread must be a non-negative number of degrees");
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut seeds = Vec::with_capacity(config.entity_count);
    for _ in 0..config.entity_count {
        seeds.push(Position::new(
            config.center_lat + rng.gen_range(-config.spread_deg..=config.spread_deg),
            config.center_lng + rng.gen_range(-config.spread_deg..=config.spread_deg),
        ));
    }
    Ok(seeds)
}
