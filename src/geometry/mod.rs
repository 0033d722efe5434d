//! Geometry primitives for Cartesian trajectories
//!
//! Paths map a scalar parameter onto frames in task space. The trajectory
//! builder combines them with velocity profiles from [`crate::motion`].
pub mod path;
pub mod rotational;

pub use path::{Path, PathCircle, PathComposite, PathHold, PathLine, PathRoundedComposite};
pub use rotational::{RotationalInterpolation, SingleAxis};
