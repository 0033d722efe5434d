//! Concatenated trajectory segments with global time queries

use super::segment::TrajectorySegment;
use crate::common::types::{Frame, Twist};

/// All segments of a trajectory played back to back
#[derive(Debug)]
pub struct CompositeTrajectory {
    segments: Vec<TrajectorySegment>,
    // cumulative duration at the end of each segment
    ends: Vec<f64>,
    duration: f64,
    length: f64,
    // reported while there is no segment to ask
    rest: Frame,
}

impl CompositeTrajectory {
    /// Create an empty composite resting at `rest`
    pub fn new(rest: Frame) -> Self {
        CompositeTrajectory {
            segments: Vec::new(),
            ends: Vec::new(),
            duration: 0.0,
            length: 0.0,
            rest,
        }
    }

    /// Append a segment
    pub fn add(&mut self, segment: TrajectorySegment) {
        self.duration += segment.duration();
        self.length += segment.length();
        self.ends.push(self.duration);
        self.segments.push(segment);
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TrajectorySegment> {
        self.segments.get(index)
    }

    pub fn segments(&self) -> &[TrajectorySegment] {
        &self.segments
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Segment active at time `t` and the time local to it
    fn locate(&self, t: f64) -> Option<(&TrajectorySegment, f64)> {
        let first = self.segments.first()?;
        if t < 0.0 {
            return Some((first, 0.0));
        }
        let mut previous = 0.0;
        for (segment, end) in self.segments.iter().zip(&self.ends) {
            if t < *end {
                return Some((segment, t - previous));
            }
            previous = *end;
        }
        let last = self.segments.last()?;
        Some((last, last.duration()))
    }

    /// Frame at global time `t`, clamped to the trajectory
    pub fn pos(&self, t: f64) -> Frame {
        match self.locate(t) {
            Some((segment, local)) => segment.pos(local),
            None => self.rest,
        }
    }

    /// Twist at global time `t`, clamped to the trajectory
    pub fn vel(&self, t: f64) -> Twist {
        match self.locate(t) {
            Some((segment, local)) => segment.vel(local),
            None => Twist::zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::path::Path;
    use crate::common::types::frame_from_xyz;
    use crate::geometry::{PathLine, SingleAxis};
    use crate::motion::{TrapezoidalProfile, VelocityProfile};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn segment(a: f64, b: f64) -> TrajectorySegment {
        let path = PathLine::new(
            &frame_from_xyz(a, 0.0, 0.0),
            &frame_from_xyz(b, 0.0, 0.0),
            Box::new(SingleAxis::new()),
            1.0,
        );
        let mut profile = TrapezoidalProfile::new(2.0, 1.0).unwrap();
        profile.set_profile(0.0, path.path_length());
        TrajectorySegment::new(Box::new(path), Box::new(profile))
    }

    #[test]
    fn test_totals_and_lookup() {
        let mut composite = CompositeTrajectory::new(Frame::identity());
        composite.add(segment(0.0, 10.0));
        composite.add(segment(10.0, 20.0));

        assert_eq!(composite.len(), 2);
        assert_relative_eq!(composite.duration(), 14.0, epsilon = 1e-12);
        assert_relative_eq!(composite.length(), 20.0, epsilon = 1e-12);

        // 5s into the second segment
        assert_relative_eq!(
            composite.pos(12.0).translation.vector,
            Vector3::new(18.0, 0.0, 0.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_clamped_queries() {
        let mut composite = CompositeTrajectory::new(Frame::identity());
        composite.add(segment(0.0, 10.0));

        assert_relative_eq!(composite.pos(-3.0).translation.vector, Vector3::zeros());
        assert_relative_eq!(
            composite.pos(100.0).translation.vector,
            Vector3::new(10.0, 0.0, 0.0),
            epsilon = 1e-12
        );
        assert_eq!(composite.vel(100.0).speed(), 0.0);
    }

    #[test]
    fn test_empty_composite_rests() {
        let rest = frame_from_xyz(1.0, 2.0, 3.0);
        let composite = CompositeTrajectory::new(rest);
        assert!(composite.is_empty());
        assert_eq!(composite.pos(1.0), rest);
        assert_eq!(composite.vel(1.0), Twist::zero());
    }
}
