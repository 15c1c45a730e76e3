#[cfg(feature = "debug")]
use crate::debug::take_debug_frame;
use crate::control::{navigate, Band};
use crate::math::Point2d;
use crate::obstacle::Obstacle;
use crate::sensor::{self, SensorRay, SensorReading, SENSOR_RANGE};
use crate::vehicle::{Vehicle, VehicleAttributes};
use log::{debug, trace};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The rectangular playfield a simulation runs within.
/// Its edges count as obstructions for the sensors.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    width: f64,
    height: f64,
}

impl Bounds {
    /// Creates a playfield of the given size, anchored at the origin.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The width of the playfield.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// The height of the playfield.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Whether the 1x1 cell at the given integer coordinates lies inside the playfield.
    pub(crate) fn contains_cell(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as f64) < self.width && y >= 0 && (y as f64) < self.height
    }

    /// Whether a point lies inside the playfield.
    fn contains_point(&self, point: Point2d) -> bool {
        point.x >= 0.0 && point.x < self.width && point.y >= 0.0 && point.y < self.height
    }
}

/// The startup configuration of a simulation: the playfield, the fixed
/// obstacle set, the vehicle's starting state and its physical attributes.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackConfig {
    /// The playfield dimensions.
    pub bounds: Bounds,
    /// The track walls and barriers. Fixed for the run.
    pub obstacles: Vec<Obstacle>,
    /// The vehicle's starting position.
    pub start: Point2d,
    /// The vehicle's starting heading in degrees.
    pub heading: f64,
    /// The vehicle's physical attributes.
    pub vehicle: VehicleAttributes,
    /// The maximum range of the distance sensors.
    pub sensor_range: f64,
}

impl Default for TrackConfig {
    /// The built-in track: an 800x600 playfield enclosed by 15-unit walls
    /// with two inner barriers, and the vehicle starting at rest on the left.
    fn default() -> Self {
        const WALL: f64 = 15.0;
        let (width, height) = (800.0, 600.0);
        Self {
            bounds: Bounds::new(width, height),
            obstacles: vec![
                // Outer walls
                Obstacle::new(0.0, 0.0, width, WALL),
                Obstacle::new(0.0, height - WALL, width, WALL),
                Obstacle::new(0.0, 0.0, WALL, height),
                Obstacle::new(width - WALL, 0.0, WALL, height),
                // Inner barriers
                Obstacle::new(250.0, 150.0, 30.0, 150.0),
                Obstacle::new(500.0, 250.0, 30.0, 150.0),
            ],
            start: Point2d::new(100.0, 300.0),
            heading: 0.0,
            vehicle: VehicleAttributes::default(),
            sensor_range: SENSOR_RANGE,
        }
    }
}

/// An invalid startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The sensor range must be strictly positive.
    #[error("sensor range must be positive, got {0}")]
    NonPositiveSensorRange(f64),
    /// The playfield must have positive area.
    #[error("playfield bounds must be positive, got {width}x{height}")]
    DegenerateBounds { width: f64, height: f64 },
    /// The vehicle must start inside the playfield.
    #[error("start position ({x}, {y}) lies outside the playfield")]
    StartOutOfBounds { x: f64, y: f64 },
}

/// A single-vehicle track simulation.
///
/// The display driver owns this value and calls [sense](Self::sense),
/// [decide](Self::decide) and [integrate](Self::integrate) once per frame,
/// or [step](Self::step) to run all three, then draws the scene from the
/// read-only accessors. The core never touches pixels.
pub struct Simulation {
    /// The playfield.
    bounds: Bounds,
    /// The obstacles on the track.
    obstacles: Vec<Obstacle>,
    /// The vehicle being simulated.
    vehicle: Vehicle,
    /// The maximum range of the distance sensors.
    sensor_range: f64,
    /// The current frame of simulation.
    frame: usize,
    /// Debugging information from the previously simulated frame.
    #[cfg(feature = "debug")]
    debug: serde_json::Value,
}

impl Simulation {
    /// Creates a new simulation, validating the configuration.
    pub fn new(config: TrackConfig) -> Result<Self, ConfigError> {
        if config.sensor_range <= 0.0 {
            return Err(ConfigError::NonPositiveSensorRange(config.sensor_range));
        }
        if config.bounds.width <= 0.0 || config.bounds.height <= 0.0 {
            return Err(ConfigError::DegenerateBounds {
                width: config.bounds.width,
                height: config.bounds.height,
            });
        }
        if !config.bounds.contains_point(config.start) {
            return Err(ConfigError::StartOutOfBounds {
                x: config.start.x,
                y: config.start.y,
            });
        }

        debug!(
            "track {}x{} with {} obstacles, vehicle at ({}, {})",
            config.bounds.width,
            config.bounds.height,
            config.obstacles.len(),
            config.start.x,
            config.start.y,
        );

        Ok(Self {
            bounds: config.bounds,
            obstacles: config.obstacles,
            vehicle: Vehicle::new(config.start, config.heading, config.vehicle),
            sensor_range: config.sensor_range,
            frame: 0,
            #[cfg(feature = "debug")]
            debug: serde_json::Value::Null,
        })
    }

    /// Sweeps the three sensor rays from the vehicle's current position.
    pub fn sense(&self) -> SensorReading {
        sensor::sweep(
            self.vehicle.position(),
            self.vehicle.heading(),
            self.bounds,
            &self.obstacles,
            self.sensor_range,
        )
    }

    /// Applies the reactive controller to the given reading,
    /// updating the vehicle's speed and heading.
    pub fn decide(&mut self, reading: &SensorReading) {
        let (speed, heading) = navigate(
            self.vehicle.speed(),
            self.vehicle.heading(),
            reading,
            self.vehicle.attributes(),
        );
        trace!(
            "frame {}: {:?} fwd={} speed={:.2} heading={:.1}",
            self.frame,
            Band::classify(reading.forward),
            reading.forward,
            speed,
            heading,
        );
        self.vehicle.set_motion(speed, heading);
    }

    /// Integrates the vehicle's motion by one frame.
    pub fn integrate(&mut self) {
        self.vehicle.integrate();
    }

    /// Advances the simulation by one frame: sense, decide, integrate.
    /// Returns the frame's sensor reading so the driver can draw the rays.
    pub fn step(&mut self) -> SensorReading {
        let reading = self.sense();
        for ray in self.sensor_rays(&reading) {
            crate::debug::debug_line("sensor", ray.start, ray.end);
        }
        self.decide(&reading);
        self.integrate();
        self.frame += 1;

        #[cfg(feature = "debug")]
        {
            self.debug = take_debug_frame();
        }

        reading
    }

    /// Gets the current simulation frame index.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Gets a reference to the vehicle.
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// The playfield dimensions.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns an iterator over the obstacles on the track.
    pub fn iter_obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Computes the world-space sensor rays of a reading for visualization.
    pub fn sensor_rays(&self, reading: &SensorReading) -> [SensorRay; 3] {
        reading.rays(self.vehicle.position(), self.vehicle.heading())
    }

    /// Gets the debugging information for the previously simulated frame as JSON array.
    #[cfg(feature = "debug")]
    pub fn debug(&mut self) -> serde_json::Value {
        self.debug.clone()
    }
}
