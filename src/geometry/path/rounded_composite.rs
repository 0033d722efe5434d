//! Polyline path with rounded corners
//!
//! Frames are added one by one. Every interior corner is replaced by a
//! circular arc of fixed radius tangent to both adjacent edges, so the path
//! can be followed without stopping at the corner points.

use super::{Path, PathCircle, PathComposite, PathLine};
use crate::common::types::{Frame, Twist};
use crate::error::GeometryError;
use crate::geometry::rotational::RotationalInterpolation;
use std::f64::consts::PI;

const EPSILON: f64 = 1e-7;

/// Line and arc segments blended through a sequence of frames
#[derive(Debug)]
pub struct PathRoundedComposite {
    composite: PathComposite,
    radius: f64,
    eq_radius: f64,
    orient: Box<dyn RotationalInterpolation>,
    // start of the edge that has not been emitted yet
    start: Frame,
    via: Frame,
    point_count: usize,
    finished: bool,
}

impl PathRoundedComposite {
    /// Create an empty rounded path
    ///
    /// `radius` is the corner radius; `eq_radius` is passed to every line and
    /// arc to weigh rotation against translation.
    pub fn new(radius: f64, eq_radius: f64, orient: Box<dyn RotationalInterpolation>) -> Self {
        PathRoundedComposite {
            composite: PathComposite::new(),
            radius,
            eq_radius,
            orient,
            start: Frame::identity(),
            via: Frame::identity(),
            point_count: 0,
            finished: false,
        }
    }

    /// Number of frames added so far
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Number of line and arc elements emitted so far
    pub fn element_count(&self) -> usize {
        self.composite.len()
    }

    /// Add the next frame
    pub fn add(&mut self, frame: Frame) -> Result<(), GeometryError> {
        match self.point_count {
            0 => self.start = frame,
            1 => self.via = frame,
            n => self.add_corner(frame, n)?,
        }
        self.point_count += 1;
        Ok(())
    }

    fn add_corner(&mut self, frame: Frame, index: usize) -> Result<(), GeometryError> {
        let ab = self.via.translation.vector - self.start.translation.vector;
        let bc = frame.translation.vector - self.via.translation.vector;
        let ab_dist = ab.norm();
        let bc_dist = bc.norm();
        if ab_dist < EPSILON {
            return Err(GeometryError::CoincidentPoints { edge: index - 2 });
        }
        if bc_dist < EPSILON {
            return Err(GeometryError::CoincidentPoints { edge: index - 1 });
        }

        let cos_alpha = (ab.dot(&bc) / ab_dist / bc_dist).clamp(-1.0, 1.0);
        let alpha = cos_alpha.acos();
        if PI - alpha < EPSILON {
            return Err(GeometryError::ReversingCorner { corner: index - 1 });
        }

        if alpha < EPSILON {
            // straight through, nothing to round
            self.composite.add(Box::new(PathLine::new(
                &self.start,
                &self.via,
                self.orient.box_clone(),
                self.eq_radius,
            )));
            self.start = self.via;
            self.via = frame;
            return Ok(());
        }

        let d = self.radius / ((PI - alpha) / 2.0).tan();
        if d >= ab_dist {
            return Err(GeometryError::RadiusTooLarge {
                radius: self.radius,
                needed: d,
                available: ab_dist,
            });
        }
        if d >= bc_dist {
            return Err(GeometryError::RadiusTooLarge {
                radius: self.radius,
                needed: d,
                available: bc_dist,
            });
        }

        let incoming = PathLine::new(&self.start, &self.via, self.orient.box_clone(), self.eq_radius);
        let outgoing = PathLine::new(&self.via, &frame, self.orient.box_clone(), self.eq_radius);
        let circle_start = incoming.pos(incoming.length_to_s(ab_dist - d));
        let circle_end = outgoing.pos(outgoing.length_to_s(d));

        // points from the arc center towards the outside of the corner
        let outward = ab.cross(&ab.cross(&bc)).normalize();
        let center = circle_start.translation.vector - outward * self.radius;

        self.composite.add(Box::new(PathLine::new(
            &self.start,
            &circle_start,
            self.orient.box_clone(),
            self.eq_radius,
        )));
        self.composite.add(Box::new(PathCircle::new(
            &circle_start,
            center,
            circle_end.translation.vector,
            circle_end.rotation,
            alpha,
            self.orient.box_clone(),
            self.eq_radius,
        )?));

        self.start = circle_end;
        self.via = frame;
        Ok(())
    }

    /// Emit the last edge; no frames may be added afterwards
    pub fn finish(&mut self) -> Result<(), GeometryError> {
        if self.point_count < 2 {
            return Err(GeometryError::NotEnoughPoints(self.point_count));
        }
        if !self.finished {
            self.composite.add(Box::new(PathLine::new(
                &self.start,
                &self.via,
                self.orient.box_clone(),
                self.eq_radius,
            )));
            self.finished = true;
        }
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Path for PathRoundedComposite {
    fn path_length(&self) -> f64 {
        self.composite.path_length()
    }

    fn length_to_s(&self, length: f64) -> f64 {
        length
    }

    fn pos(&self, s: f64) -> Frame {
        self.composite.pos(s)
    }

    fn vel(&self, s: f64, sd: f64) -> Twist {
        self.composite.vel(s, sd)
    }
}
