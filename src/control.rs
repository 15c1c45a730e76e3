use crate::sensor::SensorReading;
use crate::vehicle::VehicleAttributes;

/// Forward clearance below which the vehicle brakes and turns sharply.
const DANGER_DIST: f64 = 100.0;

/// Forward clearance below which the vehicle slows and steers gently.
const CAUTION_DIST: f64 = 150.0;

/// Left/right asymmetry required before steering in the caution band.
const CAUTION_DEADBAND: f64 = 30.0;

/// Left/right asymmetry required before the centering correction kicks in.
const CENTERING_DEADBAND: f64 = 40.0;

/// Fraction of the maximum speed targeted while in the caution band.
const CAUTION_SPEED_FACTOR: f64 = 0.7;

/// The controller's classification of the forward sensor clearance.
///
/// Bands are re-evaluated on the raw reading every frame with no hysteresis,
/// so oscillation near a band boundary is expected behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    /// An obstruction is very close ahead: brake and turn sharply.
    Danger,
    /// An obstruction is moderately close: slow down and steer gently.
    Caution,
    /// The path ahead is clear: accelerate and bias toward the centerline.
    Clear,
}

impl Band {
    /// Classifies a forward sensor distance.
    pub fn classify(forward: f64) -> Self {
        if forward < DANGER_DIST {
            Band::Danger
        } else if forward < CAUTION_DIST {
            Band::Caution
        } else {
            Band::Clear
        }
    }
}

/// Maps the current motion state and a sensor reading to the next speed and
/// heading. Pure function; the caller writes the result back to the vehicle.
///
/// In the danger band the diagonal comparison is strict, so equal clearance
/// on both sides turns right.
pub fn navigate(
    speed: f64,
    heading: f64,
    reading: &SensorReading,
    attr: &VehicleAttributes,
) -> (f64, f64) {
    let SensorReading {
        forward,
        left,
        right,
    } = *reading;

    match Band::classify(forward) {
        Band::Danger => {
            let speed = f64::max(speed - 2.0 * attr.acceleration, 0.0);
            let heading = if left > right {
                heading - 2.0 * attr.turn_rate
            } else {
                heading + 2.0 * attr.turn_rate
            };
            (speed, heading)
        }
        Band::Caution => {
            let speed = f64::min(
                speed + 0.5 * attr.acceleration,
                CAUTION_SPEED_FACTOR * attr.max_speed,
            );
            let heading = if left > right + CAUTION_DEADBAND {
                heading - attr.turn_rate
            } else if right > left + CAUTION_DEADBAND {
                heading + attr.turn_rate
            } else {
                heading
            };
            (speed, heading)
        }
        Band::Clear => {
            let speed = f64::min(speed + attr.acceleration, attr.max_speed);
            let heading = if left < right - CENTERING_DEADBAND {
                heading + 0.5 * attr.turn_rate
            } else if right < left - CENTERING_DEADBAND {
                heading - 0.5 * attr.turn_rate
            } else {
                heading
            };
            (speed, heading)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn attr() -> VehicleAttributes {
        VehicleAttributes::default()
    }

    fn reading(forward: f64, left: f64, right: f64) -> SensorReading {
        SensorReading {
            forward,
            left,
            right,
        }
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(Band::classify(99.9), Band::Danger);
        assert_eq!(Band::classify(100.0), Band::Caution);
        assert_eq!(Band::classify(149.9), Band::Caution);
        assert_eq!(Band::classify(150.0), Band::Clear);
    }

    #[test]
    fn danger_brakes_and_turns_toward_clearance() {
        let attr = attr();
        let (speed, heading) = navigate(2.0, 10.0, &reading(50.0, 180.0, 60.0), &attr);
        assert_approx_eq!(speed, 2.0 - 2.0 * attr.acceleration);
        assert_approx_eq!(heading, 10.0 - 2.0 * attr.turn_rate);

        // Speed is floored at zero.
        let (speed, _) = navigate(0.0, 0.0, &reading(50.0, 180.0, 60.0), &attr);
        assert_approx_eq!(speed, 0.0);
    }

    #[test]
    fn danger_tie_turns_right() {
        let attr = attr();
        let (_, heading) = navigate(1.0, 0.0, &reading(50.0, 120.0, 120.0), &attr);
        assert_approx_eq!(heading, 2.0 * attr.turn_rate);
    }

    #[test]
    fn caution_holds_heading_inside_deadband() {
        let attr = attr();
        let (speed, heading) = navigate(1.0, 5.0, &reading(120.0, 130.0, 110.0), &attr);
        assert_approx_eq!(speed, 1.0 + 0.5 * attr.acceleration);
        assert_approx_eq!(heading, 5.0);

        let (_, heading) = navigate(1.0, 5.0, &reading(120.0, 160.0, 110.0), &attr);
        assert_approx_eq!(heading, 5.0 - attr.turn_rate);
    }

    #[test]
    fn caution_caps_speed() {
        let attr = attr();
        let (speed, _) = navigate(attr.max_speed, 0.0, &reading(120.0, 100.0, 100.0), &attr);
        assert_approx_eq!(speed, CAUTION_SPEED_FACTOR * attr.max_speed);
    }

    #[test]
    fn clear_accelerates_to_max_then_holds() {
        let attr = attr();
        let mut speed = 0.0;
        let mut last = speed;
        let r = reading(200.0, 200.0, 200.0);
        for _ in 0..100 {
            let (next, heading) = navigate(speed, 0.0, &r, &attr);
            assert_approx_eq!(heading, 0.0);
            assert!(next >= last);
            assert!(next <= attr.max_speed);
            last = next;
            speed = next;
        }
        assert_approx_eq!(speed, attr.max_speed);
    }

    #[test]
    fn clear_centers_outside_deadband() {
        let attr = attr();
        let (_, heading) = navigate(1.0, 0.0, &reading(200.0, 100.0, 180.0), &attr);
        assert_approx_eq!(heading, 0.5 * attr.turn_rate);

        let (_, heading) = navigate(1.0, 0.0, &reading(200.0, 180.0, 100.0), &attr);
        assert_approx_eq!(heading, -0.5 * attr.turn_rate);

        // Asymmetry inside the deadband leaves the heading alone.
        let (_, heading) = navigate(1.0, 0.0, &reading(200.0, 170.0, 140.0), &attr);
        assert_approx_eq!(heading, 0.0);
    }
}
