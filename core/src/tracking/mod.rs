pub mod geometry;
pub mod noise;
pub mod store;

pub use geometry::GeometrySummarizer;
pub use noise::{ScriptedNoise, UniformNoise};
pub use store::{Trajectory, TrajectoryStore};
