//! Straight-line path between two frames

use super::{Path, PathScaling};
use crate::common::types::{Frame, Twist};
use crate::geometry::rotational::RotationalInterpolation;
use nalgebra::{Isometry3, Translation3, Vector3};

/// A straight line with interpolated orientation
#[derive(Debug)]
pub struct PathLine {
    start: Vector3<f64>,
    direction: Vector3<f64>,
    orient: Box<dyn RotationalInterpolation>,
    eq_radius: f64,
    scaling: PathScaling,
}

impl PathLine {
    /// Create a line from `start` to `end`
    ///
    /// `eq_radius` converts rotation angle into an equivalent distance so
    /// that a pure reorientation still has a positive path length.
    pub fn new(
        start: &Frame,
        end: &Frame,
        mut orient: Box<dyn RotationalInterpolation>,
        eq_radius: f64,
    ) -> Self {
        let start_p = start.translation.vector;
        let delta = end.translation.vector - start_p;
        let dist = delta.norm();
        let direction = if dist > 0.0 { delta / dist } else { Vector3::zeros() };

        orient.set_start_end(start.rotation, end.rotation);
        let scaling = PathScaling::new(dist, orient.angle(), eq_radius);

        PathLine {
            start: start_p,
            direction,
            orient,
            eq_radius,
            scaling,
        }
    }

    /// Equivalent radius used to weigh rotation against translation
    pub fn eq_radius(&self) -> f64 {
        self.eq_radius
    }
}

impl Path for PathLine {
    fn path_length(&self) -> f64 {
        self.scaling.path_length
    }

    fn length_to_s(&self, length: f64) -> f64 {
        self.scaling.length_to_s(length)
    }

    fn pos(&self, s: f64) -> Frame {
        let p = self.start + self.direction * (s * self.scaling.scale_lin);
        Isometry3::from_parts(
            Translation3::from(p),
            self.orient.pos(s * self.scaling.scale_rot),
        )
    }

    fn vel(&self, s: f64, sd: f64) -> Twist {
        Twist::new(
            self.direction * (sd * self.scaling.scale_lin),
            self.orient
                .vel(s * self.scaling.scale_rot, sd * self.scaling.scale_rot),
        )
    }
}
