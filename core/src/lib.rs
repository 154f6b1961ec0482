//! Trajectory-simulation and geometry core for the animal-tracking platform.
//!
//! The modules cover the position-history store, the derived map geometry
//! (centroid and boundary circle), and the wire types shared with
//! map-rendering clients.

pub mod geo;
pub mod map_interface;
pub mod prelude;
pub mod telemetry;
pub mod tracking;

pub use prelude::{NoiseSource, TrackConfig, TrackError, TrackResult};
