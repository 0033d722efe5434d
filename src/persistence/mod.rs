//! Saving and restoring trajectories
//!
//! A trajectory is stored as its waypoint list only: a declared count
//! followed by that many records in order. The composite motion is rebuilt
//! after loading.

use crate::common::types::Frame;
use crate::config::TrajectoryConfig;
use crate::error::PersistenceError;
use crate::trajectory::{Trajectory, Waypoint, WaypointType};
use nalgebra::{Isometry3, Quaternion, Translation3, UnitQuaternion};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path as FilePath;
use tracing::info;

/// Stored form of one waypoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Position `[x, y, z]`
    pub position: [f64; 3],
    /// Orientation quaternion `[x, y, z, w]`
    pub rotation: [f64; 4],
    pub velocity: f64,
    pub acceleration: f64,
    #[serde(rename = "cont")]
    pub continuous: bool,
    #[serde(default)]
    pub tool: u32,
    #[serde(default)]
    pub base: u32,
}

impl From<&Waypoint> for WaypointRecord {
    fn from(waypoint: &Waypoint) -> Self {
        let p = waypoint.end_position.translation.vector;
        let q = waypoint.end_position.rotation.quaternion();
        WaypointRecord {
            name: waypoint.name.clone(),
            kind: waypoint.kind.as_str().to_string(),
            position: [p.x, p.y, p.z],
            rotation: [q.i, q.j, q.k, q.w],
            velocity: waypoint.velocity,
            acceleration: waypoint.acceleration,
            continuous: waypoint.continuous,
            tool: waypoint.tool,
            base: waypoint.base,
        }
    }
}

impl TryFrom<WaypointRecord> for Waypoint {
    type Error = PersistenceError;

    fn try_from(record: WaypointRecord) -> Result<Self, Self::Error> {
        let kind: WaypointType = record
            .kind
            .parse()
            .map_err(PersistenceError::UnknownType)?;

        let [x, y, z, w] = record.rotation;
        let quaternion = Quaternion::new(w, x, y, z);
        let norm = quaternion.norm();
        if !(norm.is_finite() && norm > 1e-9) {
            return Err(PersistenceError::InvalidRotation { name: record.name });
        }
        // keep stored unit quaternions bit-exact
        let rotation = if (norm - 1.0).abs() < 1e-12 {
            UnitQuaternion::new_unchecked(quaternion)
        } else {
            UnitQuaternion::new_normalize(quaternion)
        };

        let [px, py, pz] = record.position;
        let end_position: Frame = Isometry3::from_parts(Translation3::new(px, py, pz), rotation);

        Ok(Waypoint {
            name: record.name,
            kind,
            end_position,
            velocity: record.velocity,
            acceleration: record.acceleration,
            continuous: record.continuous,
            tool: record.tool,
            base: record.base,
        })
    }
}

/// Stored form of a whole trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryDocument {
    pub count: usize,
    pub waypoints: Vec<WaypointRecord>,
}

impl TrajectoryDocument {
    /// Parse a document and check its declared count
    pub fn from_json_str(text: &str) -> Result<Self, PersistenceError> {
        let document: TrajectoryDocument = serde_json::from_str(text)?;
        document.check_count()?;
        Ok(document)
    }

    pub fn to_json_string(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn check_count(&self) -> Result<(), PersistenceError> {
        if self.count != self.waypoints.len() {
            return Err(PersistenceError::CountMismatch {
                declared: self.count,
                actual: self.waypoints.len(),
            });
        }
        Ok(())
    }
}

impl Trajectory {
    /// Snapshot the waypoint list
    pub fn to_document(&self) -> TrajectoryDocument {
        TrajectoryDocument {
            count: self.len(),
            waypoints: self.waypoints().iter().map(WaypointRecord::from).collect(),
        }
    }

    /// Rebuild a trajectory from a stored document
    pub fn from_document(
        document: TrajectoryDocument,
        config: TrajectoryConfig,
    ) -> Result<Self, PersistenceError> {
        document.check_count()?;
        let waypoints = document
            .waypoints
            .into_iter()
            .map(Waypoint::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut trajectory = Trajectory::with_config(config);
        trajectory.set_waypoints(waypoints)?;
        Ok(trajectory)
    }

    pub fn to_json_string(&self) -> Result<String, PersistenceError> {
        self.to_document().to_json_string()
    }

    pub fn from_json_str(text: &str, config: TrajectoryConfig) -> Result<Self, PersistenceError> {
        Trajectory::from_document(TrajectoryDocument::from_json_str(text)?, config)
    }

    /// Write the waypoint list as JSON
    pub fn save_to_file(&self, path: impl AsRef<FilePath>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        fs::write(path, self.to_json_string()?)?;
        info!("Saved {} waypoints to {}", self.len(), path.display());
        Ok(())
    }

    /// Read a waypoint list written by [`Trajectory::save_to_file`]
    pub fn load_from_file(
        path: impl AsRef<FilePath>,
        config: TrajectoryConfig,
    ) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let trajectory = Trajectory::from_json_str(&text, config)?;
        info!("Loaded {} waypoints from {}", trajectory.len(), path.display());
        Ok(trajectory)
    }
}
