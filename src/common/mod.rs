//! Common utilities and types shared by the geometry and trajectory modules

/// Common types used across the codebase
pub mod types {
    use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

    /// A 6-DOF placement (position + orientation) in task space
    pub type Frame = Isometry3<f64>;

    /// Linear and angular velocity of a frame
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Twist {
        pub linear: Vector3<f64>,
        pub angular: Vector3<f64>,
    }

    impl Twist {
        /// Create a new twist
        pub fn new(linear: Vector3<f64>, angular: Vector3<f64>) -> Self {
            Twist { linear, angular }
        }

        /// A twist with no motion
        pub fn zero() -> Self {
            Twist {
                linear: Vector3::zeros(),
                angular: Vector3::zeros(),
            }
        }

        /// Magnitude of the linear part
        pub fn speed(&self) -> f64 {
            self.linear.norm()
        }
    }

    impl Default for Twist {
        fn default() -> Self {
            Twist::zero()
        }
    }

    /// Build a frame from a position and roll/pitch/yaw angles in radians
    pub fn frame_from_xyz_rpy(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Frame {
        Isometry3::from_parts(
            Translation3::new(x, y, z),
            UnitQuaternion::from_euler_angles(roll, pitch, yaw),
        )
    }

    /// Build a frame with identity orientation
    pub fn frame_from_xyz(x: f64, y: f64, z: f64) -> Frame {
        Isometry3::translation(x, y, z)
    }
}

pub use types::{frame_from_xyz, frame_from_xyz_rpy, Frame, Twist};
