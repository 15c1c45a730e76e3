pub use cgmath;
pub use control::Band;
pub use obstacle::Obstacle;
pub use sensor::{Proximity, SensorRay, SensorReading, SENSOR_RANGE};
pub use simulation::{Bounds, ConfigError, Simulation, TrackConfig};
pub use util::Interval;
pub use vehicle::{Vehicle, VehicleAttributes};

mod control;
mod debug;
pub mod math;
mod obstacle;
mod sensor;
mod simulation;
mod util;
mod vehicle;
