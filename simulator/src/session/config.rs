use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use trackcore::map_interface::Position;
use trackcore::prelude::TrackConfig;

/// On-disk session description: where each entity starts and how often the
/// set advances.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    pub interval_ms: u64,
    pub seeds: Vec<Position>,
}

impl SessionConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading session config {}", path_ref.display()))?;
        let config: SessionConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing session config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(interval_ms: u64, seeds: Vec<Position>) -> Self {
        Self { interval_ms, seeds }
    }

    pub fn to_track_config(&self) -> TrackConfig {
        TrackConfig {
            seeds: self.seeds.clone(),
            interval_ms: self.interval_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_produces_track_config() {
        let cfg = SessionConfig::from_args(2500, vec![Position::new(1.0, 2.0)]);
        let track = cfg.to_track_config();
        assert_eq!(track.interval_ms, 2500);
        assert_eq!(track.seeds, vec![Position::new(1.0, 2.0)]);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"interval_ms: 2500\nseeds:\n  - lat: 16.1622\n    lng: 74.8298\n  - lat: 16.1605\n    lng: 74.8323\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = SessionConfig::load(&path).unwrap();
        assert_eq!(cfg.interval_ms, 2500);
        assert_eq!(cfg.seeds.len(), 2);
        assert_eq!(cfg.seeds[1].lng, 74.8323);
    }
}
