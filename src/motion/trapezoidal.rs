//! Trapezoidal velocity profile
//!
//! Accelerates at the maximum rate, cruises at the maximum velocity and
//! decelerates symmetrically. Moves too short to reach the cruise velocity
//! get a triangular profile instead.

use super::VelocityProfile;
use crate::error::ProfileError;

/// Bounded-acceleration profile with ramp-up, cruise and ramp-down
#[derive(Debug, Clone, PartialEq)]
pub struct TrapezoidalProfile {
    max_velocity: f64,
    max_acceleration: f64,
    start: f64,
    end: f64,
    duration: f64,
    // end of the acceleration and start of the deceleration phase
    t1: f64,
    t2: f64,
    // quadratic coefficients of each phase: c1 + c2*t + c3*t^2
    a: [f64; 3],
    b: [f64; 3],
    c: [f64; 3],
}

impl TrapezoidalProfile {
    /// Create a profile with the given bounds
    pub fn new(max_velocity: f64, max_acceleration: f64) -> Result<Self, ProfileError> {
        if !(max_velocity.is_finite() && max_velocity > 0.0) {
            return Err(ProfileError::InvalidVelocity(max_velocity));
        }
        if !(max_acceleration.is_finite() && max_acceleration > 0.0) {
            return Err(ProfileError::InvalidAcceleration(max_acceleration));
        }
        Ok(TrapezoidalProfile {
            max_velocity,
            max_acceleration,
            start: 0.0,
            end: 0.0,
            duration: 0.0,
            t1: 0.0,
            t2: 0.0,
            a: [0.0; 3],
            b: [0.0; 3],
            c: [0.0; 3],
        })
    }

    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    pub fn max_acceleration(&self) -> f64 {
        self.max_acceleration
    }

    /// True when the cruise velocity is reached
    pub fn has_cruise_phase(&self) -> bool {
        self.t2 > self.t1
    }

    fn eval(coeff: &[f64; 3], t: f64) -> f64 {
        coeff[0] + t * (coeff[1] + coeff[2] * t)
    }

    fn eval_vel(coeff: &[f64; 3], t: f64) -> f64 {
        coeff[1] + 2.0 * coeff[2] * t
    }
}

impl VelocityProfile for TrapezoidalProfile {
    fn set_profile(&mut self, start: f64, end: f64) {
        self.start = start;
        self.end = end;

        let vmax = self.max_velocity;
        let amax = self.max_acceleration;
        let sign = if end - start < 0.0 { -1.0 } else { 1.0 };

        let mut t1 = vmax / amax;
        let ramp_distance = sign * amax * t1 * t1 / 2.0;
        let cruise_time = (end - start - 2.0 * ramp_distance) / (sign * vmax);
        let t2;
        if cruise_time > 0.0 {
            self.duration = 2.0 * t1 + cruise_time;
            t2 = self.duration - t1;
        } else {
            t1 = ((end - start) / sign / amax).sqrt();
            self.duration = 2.0 * t1;
            t2 = t1;
        }
        self.t1 = t1;
        self.t2 = t2;

        let a = [start, 0.0, sign * amax / 2.0];
        let b3 = 0.0;
        let b2 = a[1] + 2.0 * a[2] * t1 - 2.0 * b3 * t1;
        let b1 = a[0] + t1 * (a[1] + a[2] * t1) - t1 * (b2 + t1 * b3);
        let c3 = -sign * amax / 2.0;
        let c2 = b2 + 2.0 * b3 * t2 - 2.0 * c3 * t2;
        let c1 = b1 + t2 * (b2 + b3 * t2) - t2 * (c2 + t2 * c3);

        self.a = a;
        self.b = [b1, b2, b3];
        self.c = [c1, c2, c3];
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn pos(&self, t: f64) -> f64 {
        if t < 0.0 {
            self.start
        } else if t < self.t1 {
            Self::eval(&self.a, t)
        } else if t < self.t2 {
            Self::eval(&self.b, t)
        } else if t <= self.duration {
            Self::eval(&self.c, t)
        } else {
            self.end
        }
    }

    fn vel(&self, t: f64) -> f64 {
        if t < 0.0 {
            0.0
        } else if t < self.t1 {
            Self::eval_vel(&self.a, t)
        } else if t < self.t2 {
            Self::eval_vel(&self.b, t)
        } else if t <= self.duration {
            Self::eval_vel(&self.c, t)
        } else {
            0.0
        }
    }

    fn acc(&self, t: f64) -> f64 {
        if t < 0.0 {
            0.0
        } else if t < self.t1 {
            2.0 * self.a[2]
        } else if t < self.t2 {
            2.0 * self.b[2]
        } else if t <= self.duration {
            2.0 * self.c[2]
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_full_trapezoid() {
        let mut profile = TrapezoidalProfile::new(2.0, 1.0).unwrap();
        profile.set_profile(0.0, 10.0);

        // 2s ramp up (2 units), 3s cruise (6 units), 2s ramp down (2 units)
        assert!(profile.has_cruise_phase());
        assert_relative_eq!(profile.duration(), 7.0, epsilon = 1e-12);
        assert_relative_eq!(profile.pos(2.0), 2.0, epsilon = 1e-12);
        assert_relative_eq!(profile.pos(5.0), 8.0, epsilon = 1e-12);
        assert_relative_eq!(profile.pos(7.0), 10.0, epsilon = 1e-12);
        assert_relative_eq!(profile.vel(3.5), 2.0, epsilon = 1e-12);
        assert_relative_eq!(profile.acc(1.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(profile.acc(6.0), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_triangular_profile() {
        let mut profile = TrapezoidalProfile::new(2.0, 1.0).unwrap();
        profile.set_profile(0.0, 2.0);

        assert!(!profile.has_cruise_phase());
        let t1 = 2.0_f64.sqrt();
        assert_relative_eq!(profile.duration(), 2.0 * t1, epsilon = 1e-12);
        assert_relative_eq!(profile.pos(t1), 1.0, epsilon = 1e-12);
        assert_relative_eq!(profile.vel(t1), t1, epsilon = 1e-12);
        assert_relative_eq!(profile.pos(profile.duration()), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_clamped_outside_duration() {
        let mut profile = TrapezoidalProfile::new(1.0, 1.0).unwrap();
        profile.set_profile(0.0, 5.0);

        assert_eq!(profile.pos(-1.0), 0.0);
        assert_eq!(profile.pos(100.0), 5.0);
        assert_eq!(profile.vel(-1.0), 0.0);
        assert_eq!(profile.vel(100.0), 0.0);
    }

    #[test]
    fn test_zero_length_move() {
        let mut profile = TrapezoidalProfile::new(1.0, 1.0).unwrap();
        profile.set_profile(0.0, 0.0);
        assert_eq!(profile.duration(), 0.0);
        assert_eq!(profile.pos(0.0), 0.0);
    }

    #[test]
    fn test_rejects_invalid_bounds() {
        assert_eq!(
            TrapezoidalProfile::new(0.0, 1.0),
            Err(ProfileError::InvalidVelocity(0.0))
        );
        assert_eq!(
            TrapezoidalProfile::new(1.0, -2.0),
            Err(ProfileError::InvalidAcceleration(-2.0))
        );
        assert!(TrapezoidalProfile::new(f64::NAN, 1.0).is_err());
    }
}
