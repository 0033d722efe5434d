//! A path paired with the profile that moves along it

use crate::common::types::{Frame, Twist};
use crate::geometry::Path;
use crate::motion::VelocityProfile;

/// Time-parameterized motion along one path
#[derive(Debug)]
pub struct TrajectorySegment {
    path: Box<dyn Path>,
    profile: Box<dyn VelocityProfile>,
}

impl TrajectorySegment {
    /// Pair a path with a profile already planned over its length
    pub fn new(path: Box<dyn Path>, profile: Box<dyn VelocityProfile>) -> Self {
        TrajectorySegment { path, profile }
    }

    pub fn path(&self) -> &dyn Path {
        self.path.as_ref()
    }

    pub fn profile(&self) -> &dyn VelocityProfile {
        self.profile.as_ref()
    }

    pub fn duration(&self) -> f64 {
        self.profile.duration()
    }

    pub fn length(&self) -> f64 {
        self.path.path_length()
    }

    pub fn pos(&self, t: f64) -> Frame {
        self.path.pos(self.profile.pos(t))
    }

    pub fn vel(&self, t: f64) -> Twist {
        self.path.vel(self.profile.pos(t), self.profile.vel(t))
    }
}
