use crate::math::{unit_from_degrees, Point2d};
use crate::obstacle::Obstacle;
use crate::simulation::Bounds;

/// The maximum range of each distance sensor, in units.
pub const SENSOR_RANGE: f64 = 200.0;

/// The angular offsets of the three rays from the vehicle's heading, in degrees.
pub const RAY_OFFSETS: [f64; 3] = [0.0, -45.0, 45.0];

/// Distance below which a ray is classified as [Proximity::Close].
const CLOSE_DIST: f64 = 80.0;

/// Distance below which a ray is classified as [Proximity::Medium].
const MEDIUM_DIST: f64 = 120.0;

/// One frame's sensor sweep: the distance to the nearest obstruction along
/// the forward ray and the two 45-degree diagonal rays. Recomputed every
/// frame and never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorReading {
    /// Clearance straight ahead.
    pub forward: f64,
    /// Clearance along the left diagonal (-45 degrees).
    pub left: f64,
    /// Clearance along the right diagonal (+45 degrees).
    pub right: f64,
}

/// A sensor ray prepared for visualization by the display driver.
#[derive(Clone, Copy, Debug)]
pub struct SensorRay {
    /// The ray origin (the vehicle's position).
    pub start: Point2d,
    /// The point at which the ray hit an obstruction or reached max range.
    pub end: Point2d,
    /// The measured clearance along the ray.
    pub length: f64,
}

impl SensorRay {
    /// Coarse distance classification, typically mapped to a ray colour.
    pub fn proximity(&self) -> Proximity {
        Proximity::classify(self.length)
    }
}

/// Coarse classification of a sensor distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Proximity {
    /// An obstruction is very close (distance < 80).
    Close,
    /// An obstruction is at medium range (distance < 120).
    Medium,
    /// The ray is clear out to long range.
    Far,
}

impl Proximity {
    /// Classifies a measured sensor distance.
    pub fn classify(distance: f64) -> Self {
        if distance < CLOSE_DIST {
            Proximity::Close
        } else if distance < MEDIUM_DIST {
            Proximity::Medium
        } else {
            Proximity::Far
        }
    }
}

impl SensorReading {
    /// The three distances in ray order: forward, left, right.
    pub fn as_array(&self) -> [f64; 3] {
        [self.forward, self.left, self.right]
    }

    /// Computes the world-space rays of this reading for visualization.
    pub fn rays(&self, origin: Point2d, heading: f64) -> [SensorRay; 3] {
        let lengths = self.as_array();
        std::array::from_fn(|i| {
            let dir = unit_from_degrees(heading + RAY_OFFSETS[i]);
            SensorRay {
                start: origin,
                end: origin + lengths[i] * dir,
                length: lengths[i],
            }
        })
    }
}

/// Casts a single ray and returns the distance to the first obstruction.
///
/// The ray marches outward from `origin` in 1-unit increments, truncating each
/// sample to integer coordinates. A sample outside `bounds` ends the march
/// (the playfield boundary counts as a hit and is tested before obstacles);
/// otherwise the sample is tested against every obstacle. If nothing is hit
/// within `max_length` steps, `max_length` is returned as "clear".
///
/// This is a naive point-sampling march, O(max_length * obstacles) per ray.
/// It can miss features thinner than the 1-unit step, which does not arise
/// with the track geometry this crate simulates.
pub fn cast_ray(
    origin: Point2d,
    heading: f64,
    offset: f64,
    bounds: Bounds,
    obstacles: &[Obstacle],
    max_length: f64,
) -> f64 {
    let dir = unit_from_degrees(heading + offset);
    for length in 1..max_length as i32 {
        let test_x = (origin.x + dir.x * length as f64) as i32;
        let test_y = (origin.y + dir.y * length as f64) as i32;

        if !bounds.contains_cell(test_x, test_y) {
            return length as f64;
        }
        if obstacles.iter().any(|obs| obs.contains_cell(test_x, test_y)) {
            return length as f64;
        }
    }
    max_length
}

/// Sweeps the three sensor rays from the given position and heading.
pub fn sweep(
    origin: Point2d,
    heading: f64,
    bounds: Bounds,
    obstacles: &[Obstacle],
    max_length: f64,
) -> SensorReading {
    let [forward, left, right] =
        RAY_OFFSETS.map(|offset| cast_ray(origin, heading, offset, bounds, obstacles, max_length));
    SensorReading {
        forward,
        left,
        right,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn bounds() -> Bounds {
        Bounds::new(800.0, 600.0)
    }

    #[test]
    fn clear_ray_returns_max_length() {
        let origin = Point2d::new(400.0, 300.0);
        for heading in [0.0, 33.0, 90.0, 181.5, 270.0, -45.0] {
            let dist = cast_ray(origin, heading, 0.0, bounds(), &[], 200.0);
            assert_approx_eq!(dist, 200.0);
        }
    }

    #[test]
    fn ray_stops_at_first_obstacle() {
        let origin = Point2d::new(100.0, 300.0);
        // First obstacle begins 50 units ahead; a second one further out
        // must not affect the reading.
        let near = Obstacle::new(150.0, 250.0, 30.0, 100.0);
        let far = Obstacle::new(300.0, 250.0, 30.0, 100.0);

        let dist = cast_ray(origin, 0.0, 0.0, bounds(), &[near, far], 200.0);
        assert_approx_eq!(dist, 50.0);

        let dist = cast_ray(origin, 0.0, 0.0, bounds(), &[far], 200.0);
        assert_approx_eq!(dist, 200.0);
    }

    #[test]
    fn boundary_counts_as_hit() {
        // Heading left from x = 100, the playfield edge is 100 units away,
        // but the march samples at x = 100 - length, so the first sample
        // with x < 0 is at length 101.
        let origin = Point2d::new(100.0, 300.0);
        let dist = cast_ray(origin, 180.0, 0.0, bounds(), &[], 200.0);
        assert_approx_eq!(dist, 101.0);
    }

    #[test]
    fn sweep_reads_all_three_rays() {
        // A wall spanning the full playfield height, 50 units ahead.
        let wall = Obstacle::new(150.0, 0.0, 30.0, 600.0);
        let reading = sweep(Point2d::new(100.0, 300.0), 0.0, bounds(), &[wall], 200.0);
        assert_approx_eq!(reading.forward, 50.0);
        // The diagonals reach the wall at 50 * sqrt(2), truncated sampling
        // finds it one step later.
        assert_approx_eq!(reading.left, 71.0);
        assert_approx_eq!(reading.right, 71.0);
    }

    #[test]
    fn proximity_thresholds() {
        assert_eq!(Proximity::classify(79.9), Proximity::Close);
        assert_eq!(Proximity::classify(80.0), Proximity::Medium);
        assert_eq!(Proximity::classify(119.9), Proximity::Medium);
        assert_eq!(Proximity::classify(120.0), Proximity::Far);
        assert_eq!(Proximity::classify(200.0), Proximity::Far);
    }

    #[test]
    fn ray_endpoints_follow_heading() {
        let reading = SensorReading {
            forward: 100.0,
            left: 200.0,
            right: 50.0,
        };
        let rays = reading.rays(Point2d::new(0.0, 0.0), 0.0);
        assert_approx_eq!(rays[0].end.x, 100.0);
        assert_approx_eq!(rays[0].end.y, 0.0);
        assert_approx_eq!(rays[1].end.x, 200.0 * std::f64::consts::FRAC_1_SQRT_2);
        assert_approx_eq!(rays[1].end.y, -200.0 * std::f64::consts::FRAC_1_SQRT_2);
        assert_eq!(rays[2].proximity(), Proximity::Close);
    }
}
