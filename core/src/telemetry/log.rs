use log::{debug, info};

/// Thin wrapper over the `log` facade for simulation events.
pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
    }

    /// Per-tick detail; frequent, so emitted at debug level.
    pub fn record_tick(&self, tick: u64, entities: usize) {
        debug!("advanced tick {} across {} entities", tick, entities);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
