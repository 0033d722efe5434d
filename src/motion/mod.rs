//! Velocity profiles mapping time onto a path parameter

use std::fmt::Debug;

/// Trait for one-dimensional motion laws
pub trait VelocityProfile: Debug + Send + Sync {
    /// Plan motion from `start` to `end`
    fn set_profile(&mut self, start: f64, end: f64);

    /// Time needed for the planned motion
    fn duration(&self) -> f64;

    /// Position at time `t`
    fn pos(&self, t: f64) -> f64;

    /// Velocity at time `t`
    fn vel(&self, t: f64) -> f64;

    /// Acceleration at time `t`
    fn acc(&self, t: f64) -> f64;
}

pub mod dwell;
pub mod trapezoidal;

pub use dwell::DwellProfile;
pub use trapezoidal::TrapezoidalProfile;
