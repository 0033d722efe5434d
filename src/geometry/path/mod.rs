//! Path geometry parameterized by arc length

use crate::common::types::{Frame, Twist};
use std::fmt::Debug;

pub mod circle;
pub mod composite;
pub mod hold;
pub mod line;
pub mod rounded_composite;

pub use circle::PathCircle;
pub use composite::PathComposite;
pub use hold::PathHold;
pub use line::PathLine;
pub use rounded_composite::PathRoundedComposite;

/// Trait for geometric paths in task space
///
/// The path parameter `s` runs from `0` to [`Path::path_length`]. When a path
/// both translates and rotates, `s` follows whichever motion is slower once
/// rotation is converted to a length through the path's equivalent radius.
pub trait Path: Debug + Send + Sync {
    /// Total length of the path parameter
    fn path_length(&self) -> f64;

    /// Convert a Cartesian distance travelled into a path parameter
    fn length_to_s(&self, length: f64) -> f64;

    /// Frame at path parameter `s`
    fn pos(&self, s: f64) -> Frame;

    /// Twist at path parameter `s` moving with rate `sd`
    fn vel(&self, s: f64, sd: f64) -> Twist;
}

/// Scale factors mapping the path parameter onto translation and rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PathScaling {
    pub path_length: f64,
    pub scale_lin: f64,
    pub scale_rot: f64,
}

impl PathScaling {
    /// Pick the slower of translation (`dist`) and rotation (`angle`)
    pub(crate) fn new(dist: f64, angle: f64, eq_radius: f64) -> Self {
        if angle != 0.0 && angle * eq_radius > dist {
            let path_length = angle * eq_radius;
            PathScaling {
                path_length,
                scale_lin: dist / path_length,
                scale_rot: 1.0 / eq_radius,
            }
        } else if dist != 0.0 {
            PathScaling {
                path_length: dist,
                scale_lin: 1.0,
                scale_rot: angle / dist,
            }
        } else {
            PathScaling {
                path_length: 0.0,
                scale_lin: 1.0,
                scale_rot: 1.0,
            }
        }
    }

    /// Path parameter after travelling `length` in Cartesian space
    ///
    /// A pure reorientation has no translation to measure, so every length
    /// maps to the start of the path.
    pub(crate) fn length_to_s(&self, length: f64) -> f64 {
        if self.scale_lin == 0.0 {
            0.0
        } else {
            length / self.scale_lin
        }
    }
}
