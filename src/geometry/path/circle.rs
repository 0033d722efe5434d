//! Circular arc path

use super::{Path, PathScaling};
use crate::common::types::{Frame, Twist};
use crate::error::GeometryError;
use crate::geometry::rotational::RotationalInterpolation;
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

const EPSILON: f64 = 1e-7;

/// A circular arc starting at a frame and turning about a center point
#[derive(Debug)]
pub struct PathCircle {
    center: Vector3<f64>,
    // in-plane basis: x points from the center to the start, y completes the
    // turning direction
    x_axis: Vector3<f64>,
    y_axis: Vector3<f64>,
    radius: f64,
    orient: Box<dyn RotationalInterpolation>,
    scaling: PathScaling,
}

impl PathCircle {
    /// Create an arc of `alpha` radians
    ///
    /// The arc starts at `start`, turns about `center` in the plane that also
    /// contains `through`, and interpolates orientation towards `end_rotation`.
    pub fn new(
        start: &Frame,
        center: Vector3<f64>,
        through: Vector3<f64>,
        end_rotation: UnitQuaternion<f64>,
        alpha: f64,
        mut orient: Box<dyn RotationalInterpolation>,
        eq_radius: f64,
    ) -> Result<Self, GeometryError> {
        orient.set_start_end(start.rotation, end_rotation);

        let to_start = start.translation.vector - center;
        let radius = to_start.norm();
        if radius < EPSILON {
            return Err(GeometryError::CircleTooSmall);
        }
        let x_axis = to_start / radius;

        let to_through = through - center;
        let through_norm = to_through.norm();
        if through_norm < EPSILON {
            return Err(GeometryError::CircleNoPlane);
        }
        let normal = x_axis.cross(&(to_through / through_norm));
        let normal_norm = normal.norm();
        if normal_norm < EPSILON {
            return Err(GeometryError::CircleNoPlane);
        }
        let z_axis = normal / normal_norm;
        let y_axis = z_axis.cross(&x_axis);

        let scaling = PathScaling::new(alpha * radius, orient.angle(), eq_radius);

        Ok(PathCircle {
            center,
            x_axis,
            y_axis,
            radius,
            orient,
            scaling,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn center(&self) -> Vector3<f64> {
        self.center
    }
}

impl Path for PathCircle {
    fn path_length(&self) -> f64 {
        self.scaling.path_length
    }

    fn length_to_s(&self, length: f64) -> f64 {
        self.scaling.length_to_s(length)
    }

    fn pos(&self, s: f64) -> Frame {
        let p = s * self.scaling.scale_lin / self.radius;
        let point = self.center
            + self.x_axis * (self.radius * p.cos())
            + self.y_axis * (self.radius * p.sin());
        Isometry3::from_parts(
            Translation3::from(point),
            self.orient.pos(s * self.scaling.scale_rot),
        )
    }

    fn vel(&self, s: f64, sd: f64) -> Twist {
        let p = s * self.scaling.scale_lin / self.radius;
        let v = sd * self.scaling.scale_lin / self.radius;
        let linear = self.x_axis * (-self.radius * p.sin() * v)
            + self.y_axis * (self.radius * p.cos() * v);
        Twist::new(
            linear,
            self.orient
                .vel(s * self.scaling.scale_rot, sd * self.scaling.scale_rot),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::frame_from_xyz;
    use crate::geometry::rotational::SingleAxis;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn quarter_circle() -> PathCircle {
        PathCircle::new(
            &frame_from_xyz(1.0, 0.0, 0.0),
            Vector3::zeros(),
            Vector3::new(0.0, 1.0, 0.0),
            UnitQuaternion::identity(),
            FRAC_PI_2,
            Box::new(SingleAxis::new()),
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn test_quarter_circle_length_and_end() {
        let arc = quarter_circle();
        assert_relative_eq!(arc.path_length(), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(arc.radius(), 1.0);

        let end = arc.pos(arc.path_length());
        assert_relative_eq!(end.translation.vector, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_velocity_is_tangent() {
        let arc = quarter_circle();
        let twist = arc.vel(0.0, 1.0);
        assert_relative_eq!(twist.linear, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_degenerate_circles_rejected() {
        let err = PathCircle::new(
            &frame_from_xyz(0.0, 0.0, 0.0),
            Vector3::zeros(),
            Vector3::new(0.0, 1.0, 0.0),
            UnitQuaternion::identity(),
            1.0,
            Box::new(SingleAxis::new()),
            1.0,
        )
        .unwrap_err();
        assert_eq!(err, GeometryError::CircleTooSmall);

        let err = PathCircle::new(
            &frame_from_xyz(1.0, 0.0, 0.0),
            Vector3::zeros(),
            Vector3::new(2.0, 0.0, 0.0),
            UnitQuaternion::identity(),
            1.0,
            Box::new(SingleAxis::new()),
            1.0,
        )
        .unwrap_err();
        assert_eq!(err, GeometryError::CircleNoPlane);
    }
}
