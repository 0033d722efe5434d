//! Waypoint trajectory generation for Cartesian robot programs
//!
//! Waypoints are collected in a [`Trajectory`], which turns them into
//! straight-line and rounded-corner paths with trapezoidal velocity profiles
//! and answers position and velocity queries over time.
pub mod common;
pub mod config;
pub mod error;
pub mod geometry;
pub mod motion;
pub mod persistence;
pub mod trajectory;

pub use common::types::{Frame, Twist};
pub use config::{TrajectoryConfig, WaitPolicy};
pub use error::{GeometryError, PersistenceError, ProfileError, TrajectoryError};
pub use persistence::{TrajectoryDocument, WaypointRecord};
pub use trajectory::{Trajectory, TrajectorySample, Waypoint, WaypointType};
