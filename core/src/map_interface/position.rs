use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in plain degrees.
///
/// No real-world bounds are enforced; the demo tolerates drift outside
/// [-90, 90] / [-180, 180].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}
