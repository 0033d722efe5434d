//! Zero-length path that keeps a frame

use super::Path;
use crate::common::types::{Frame, Twist};

/// Stays at one frame; used for dwell segments
#[derive(Debug, Clone)]
pub struct PathHold {
    frame: Frame,
}

impl PathHold {
    pub fn new(frame: Frame) -> Self {
        PathHold { frame }
    }
}

impl Path for PathHold {
    fn path_length(&self) -> f64 {
        0.0
    }

    fn length_to_s(&self, length: f64) -> f64 {
        length
    }

    fn pos(&self, _s: f64) -> Frame {
        self.frame
    }

    fn vel(&self, _s: f64, _sd: f64) -> Twist {
        Twist::zero()
    }
}
