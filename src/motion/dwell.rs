//! Stationary profile that only consumes time

use super::VelocityProfile;
use crate::error::ProfileError;

/// Holds the start position for a fixed time
#[derive(Debug, Clone, PartialEq)]
pub struct DwellProfile {
    seconds: f64,
    position: f64,
}

impl DwellProfile {
    pub fn new(seconds: f64) -> Result<Self, ProfileError> {
        if !(seconds.is_finite() && seconds >= 0.0) {
            return Err(ProfileError::InvalidDwell(seconds));
        }
        Ok(DwellProfile {
            seconds,
            position: 0.0,
        })
    }
}

impl VelocityProfile for DwellProfile {
    fn set_profile(&mut self, start: f64, _end: f64) {
        self.position = start;
    }

    fn duration(&self) -> f64 {
        self.seconds
    }

    fn pos(&self, _t: f64) -> f64 {
        self.position
    }

    fn vel(&self, _t: f64) -> f64 {
        0.0
    }

    fn acc(&self, _t: f64) -> f64 {
        0.0
    }
}
