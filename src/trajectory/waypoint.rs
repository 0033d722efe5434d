//! Waypoints of a robot program

use crate::common::types::Frame;
use crate::error::ProfileError;
use std::fmt;
use std::str::FromStr;

/// Default linear velocity of a new waypoint
pub const DEFAULT_VELOCITY: f64 = 2000.0;
/// Default acceleration of a new waypoint
pub const DEFAULT_ACCELERATION: f64 = 100.0;

/// How a waypoint is reached from its predecessor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WaypointType {
    /// Straight-line Cartesian motion
    #[default]
    Line,
    /// Point-to-point motion; planned like `Line` in task space
    PointToPoint,
    /// Pause without moving
    Wait,
}

impl WaypointType {
    /// Short tag used in persisted programs
    pub fn as_str(&self) -> &'static str {
        match self {
            WaypointType::Line => "LIN",
            WaypointType::PointToPoint => "PTP",
            WaypointType::Wait => "WAIT",
        }
    }
}

impl fmt::Display for WaypointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for WaypointType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LIN" => Ok(WaypointType::Line),
            "PTP" => Ok(WaypointType::PointToPoint),
            "WAIT" => Ok(WaypointType::Wait),
            other => Err(other.to_string()),
        }
    }
}

/// A named target pose plus the motion parameters of the edge ending at it
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub name: String,
    pub kind: WaypointType,
    pub end_position: Frame,
    pub velocity: f64,
    pub acceleration: f64,
    /// Blend this edge into its neighbours instead of stopping
    pub continuous: bool,
    pub tool: u32,
    pub base: u32,
}

impl Waypoint {
    /// Create a line waypoint with default motion parameters
    pub fn new(name: impl Into<String>, end_position: Frame) -> Self {
        Waypoint {
            name: name.into(),
            kind: WaypointType::Line,
            end_position,
            velocity: DEFAULT_VELOCITY,
            acceleration: DEFAULT_ACCELERATION,
            continuous: false,
            tool: 0,
            base: 0,
        }
    }

    pub fn with_kind(mut self, kind: WaypointType) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_acceleration(mut self, acceleration: f64) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    pub fn with_tool(mut self, tool: u32) -> Self {
        self.tool = tool;
        self
    }

    pub fn with_base(mut self, base: u32) -> Self {
        self.base = base;
        self
    }

    /// Velocity and acceleration must be positive and finite
    pub fn validate(&self) -> Result<(), ProfileError> {
        if !(self.velocity.is_finite() && self.velocity > 0.0) {
            return Err(ProfileError::InvalidVelocity(self.velocity));
        }
        if !(self.acceleration.is_finite() && self.acceleration > 0.0) {
            return Err(ProfileError::InvalidAcceleration(self.acceleration));
        }
        Ok(())
    }
}
