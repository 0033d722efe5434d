//! Orientation interpolation between two rotations

use nalgebra::{Unit, UnitQuaternion, Vector3};
use std::fmt::Debug;

/// Trait for orientation interpolation schemes used by paths
pub trait RotationalInterpolation: Debug + Send + Sync {
    /// Set the start and end orientation
    fn set_start_end(&mut self, start: UnitQuaternion<f64>, end: UnitQuaternion<f64>);

    /// Total angle travelled between start and end (radians)
    fn angle(&self) -> f64;

    /// Orientation after travelling `theta` radians
    fn pos(&self, theta: f64) -> UnitQuaternion<f64>;

    /// Angular velocity at `theta` for an angular rate `thetad`
    fn vel(&self, theta: f64, thetad: f64) -> Vector3<f64>;

    /// Fresh copy of this scheme, used when a path spawns sub-paths
    fn box_clone(&self) -> Box<dyn RotationalInterpolation>;
}

/// Rotates about the single fixed axis of `start⁻¹ · end`
#[derive(Debug, Clone)]
pub struct SingleAxis {
    start: UnitQuaternion<f64>,
    axis: Unit<Vector3<f64>>,
    angle: f64,
}

impl SingleAxis {
    /// Create an interpolator with identity start and end
    pub fn new() -> Self {
        SingleAxis {
            start: UnitQuaternion::identity(),
            axis: Vector3::x_axis(),
            angle: 0.0,
        }
    }

    /// The rotation axis expressed in the start frame
    pub fn axis(&self) -> Vector3<f64> {
        self.axis.into_inner()
    }
}

impl Default for SingleAxis {
    fn default() -> Self {
        SingleAxis::new()
    }
}

impl RotationalInterpolation for SingleAxis {
    fn set_start_end(&mut self, start: UnitQuaternion<f64>, end: UnitQuaternion<f64>) {
        self.start = start;
        let start_to_end = start.inverse() * end;
        // identity rotation has no axis; any axis with zero angle works
        match start_to_end.axis_angle() {
            Some((axis, angle)) => {
                self.axis = axis;
                self.angle = angle;
            }
            None => {
                self.axis = Vector3::x_axis();
                self.angle = 0.0;
            }
        }
    }

    fn angle(&self) -> f64 {
        self.angle
    }

    fn pos(&self, theta: f64) -> UnitQuaternion<f64> {
        self.start * UnitQuaternion::from_axis_angle(&self.axis, theta)
    }

    fn vel(&self, _theta: f64, thetad: f64) -> Vector3<f64> {
        self.start * (self.axis.into_inner() * thetad)
    }

    fn box_clone(&self) -> Box<dyn RotationalInterpolation> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_identity_has_zero_angle() {
        let mut interp = SingleAxis::new();
        interp.set_start_end(UnitQuaternion::identity(), UnitQuaternion::identity());
        assert_eq!(interp.angle(), 0.0);
        assert_relative_eq!(interp.pos(0.0).angle(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_interpolates_about_single_axis() {
        let start = UnitQuaternion::from_euler_angles(0.0, 0.0, 0.3);
        let end = UnitQuaternion::from_euler_angles(0.0, 0.0, 0.3 + FRAC_PI_2);
        let mut interp = SingleAxis::new();
        interp.set_start_end(start, end);

        assert_relative_eq!(interp.angle(), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(interp.pos(0.0).angle_to(&start), 0.0, epsilon = 1e-12);
        assert_relative_eq!(interp.pos(interp.angle()).angle_to(&end), 0.0, epsilon = 1e-9);

        let half = UnitQuaternion::from_euler_angles(0.0, 0.0, 0.3 + FRAC_PI_2 / 2.0);
        assert_relative_eq!(interp.pos(FRAC_PI_2 / 2.0).angle_to(&half), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_angular_velocity_along_axis() {
        let end = UnitQuaternion::from_euler_angles(0.0, 0.0, 1.0);
        let mut interp = SingleAxis::new();
        interp.set_start_end(UnitQuaternion::identity(), end);

        let w = interp.vel(0.2, 2.0);
        assert_relative_eq!(w, Vector3::new(0.0, 0.0, 2.0), epsilon = 1e-12);
    }
}
