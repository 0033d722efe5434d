//! Error types for trajectory generation
//!
//! Geometry and profile errors are raised by the low-level primitives and are
//! translated into [`TrajectoryError`] before reaching callers of
//! [`crate::trajectory::Trajectory`].

use thiserror::Error;

/// Failures while constructing path geometry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Two consecutive points of a rounded path coincide
    #[error("Consecutive points coincide (edge {edge})")]
    CoincidentPoints {
        /// Index of the zero-length edge inside the rounded path.
        edge: usize,
    },

    /// The path reverses direction at a corner and cannot be rounded
    #[error("Path reverses direction at corner {corner}")]
    ReversingCorner {
        /// Index of the corner point.
        corner: usize,
    },

    /// The corner radius does not fit on the adjacent edge
    #[error("Corner radius {radius} does not fit: needs {needed:.6} but edge is {available:.6} long")]
    RadiusTooLarge {
        /// The configured corner radius.
        radius: f64,
        /// Distance along the edge consumed by the arc.
        needed: f64,
        /// Length of the edge.
        available: f64,
    },

    /// Circle start point lies on the center
    #[error("Circle radius is too small")]
    CircleTooSmall,

    /// The three circle points are collinear
    #[error("Circle points do not define a plane")]
    CircleNoPlane,

    /// A rounded path was finished with fewer than two points
    #[error("Rounded path needs at least two points, got {0}")]
    NotEnoughPoints(usize),
}

/// Invalid velocity profile parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// Cruise velocity is zero, negative or not finite
    #[error("Velocity must be positive and finite, got {0}")]
    InvalidVelocity(f64),

    /// Acceleration is zero, negative or not finite
    #[error("Acceleration must be positive and finite, got {0}")]
    InvalidAcceleration(f64),

    /// Dwell time is negative or not finite
    #[error("Dwell time must be non-negative and finite, got {0}")]
    InvalidDwell(f64),
}

/// Errors surfaced by [`crate::trajectory::Trajectory`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrajectoryError {
    /// Geometry construction failed while regenerating
    #[error("Failed to build trajectory at waypoint '{waypoint}': {source}")]
    Build {
        waypoint: String,
        #[source]
        source: GeometryError,
    },

    /// A segment query exceeded the segment count
    #[error("Segment index {index} out of range ({count} segments)")]
    IndexOutOfRange { index: usize, count: usize },

    /// More waypoints were removed than exist
    #[error("Cannot remove {requested} waypoints, only {available} present")]
    Underflow { requested: usize, available: usize },

    /// A waypoint carries unusable velocity or acceleration bounds
    #[error("Waypoint '{name}' has an invalid profile: {source}")]
    InvalidProfile {
        name: String,
        #[source]
        source: ProfileError,
    },

    /// Sampling step is not positive, not finite, or yields too many samples
    #[error("Sampling step must be positive, finite and not too small, got {0}")]
    InvalidStep(f64),

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Errors from reading or writing persisted trajectories
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Reading or writing the file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON or misses fields
    #[error("Malformed trajectory document: {0}")]
    Json(#[from] serde_json::Error),

    /// Declared count does not match the records present
    #[error("Trajectory declares {declared} waypoints but contains {actual}")]
    CountMismatch { declared: usize, actual: usize },

    /// A record carries a type tag other than `LIN`, `PTP` or `WAIT`
    #[error("Unknown waypoint type '{0}'")]
    UnknownType(String),

    /// A record's quaternion cannot be normalized
    #[error("Waypoint '{name}' has a degenerate rotation quaternion")]
    InvalidRotation { name: String },

    /// The restored waypoints were rejected
    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),
}

pub type TrajectoryResult<T> = Result<T, TrajectoryError>;
