//! Trajectory generation from named waypoints
//!
//! A [`Trajectory`] owns an ordered list of [`Waypoint`]s and the composite
//! motion derived from them. Every change to the list rebuilds the composite
//! from scratch; a failed rebuild leaves both the list and the previous
//! composite untouched.

pub mod builder;
pub mod composite;
pub mod naming;
pub mod segment;
pub mod waypoint;

pub use builder::build_composite;
pub use composite::CompositeTrajectory;
pub use segment::TrajectorySegment;
pub use waypoint::{Waypoint, WaypointType};

use crate::common::types::{Frame, Twist};
use crate::config::TrajectoryConfig;
use crate::error::{TrajectoryError, TrajectoryResult};
use tracing::{debug, warn};

/// Upper bound on the number of samples [`Trajectory::sample`] produces
pub const MAX_SAMPLES: usize = 1_000_000;

/// One sample of a played-back trajectory
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectorySample {
    pub time: f64,
    pub frame: Frame,
    pub speed: f64,
}

/// An ordered, uniquely named waypoint list and its derived motion
#[derive(Debug, Default)]
pub struct Trajectory {
    waypoints: Vec<Waypoint>,
    config: TrajectoryConfig,
    composite: Option<CompositeTrajectory>,
}

impl Trajectory {
    /// Create an empty trajectory with default settings
    pub fn new() -> Self {
        Trajectory::default()
    }

    /// Create an empty trajectory with the given settings
    pub fn with_config(config: TrajectoryConfig) -> Self {
        Trajectory {
            waypoints: Vec::new(),
            config,
            composite: None,
        }
    }

    pub fn config(&self) -> &TrajectoryConfig {
        &self.config
    }

    /// Replace the settings and rebuild
    pub fn set_config(&mut self, config: TrajectoryConfig) -> TrajectoryResult<()> {
        config.validate().map_err(TrajectoryError::Config)?;
        let composite = build_composite(&self.waypoints, &config)?;
        self.config = config;
        self.composite = composite;
        Ok(())
    }

    /// Name `requested` would receive if added now
    pub fn unique_waypoint_name(&self, requested: &str) -> String {
        naming::unique_name(requested, self.waypoints.iter().map(|w| w.name.as_str()))
    }

    /// Append a waypoint under a unique, sanitized name
    pub fn add_waypoint(&mut self, mut candidate: Waypoint) -> TrajectoryResult<&Waypoint> {
        candidate
            .validate()
            .map_err(|source| TrajectoryError::InvalidProfile {
                name: candidate.name.clone(),
                source,
            })?;
        candidate.name = self.unique_waypoint_name(&candidate.name);

        self.waypoints.push(candidate);
        if let Err(e) = self.regenerate() {
            self.waypoints.pop();
            return Err(e);
        }

        let index = self.waypoints.len() - 1;
        Ok(&self.waypoints[index])
    }

    /// Remove the last `n + 1` waypoints
    ///
    /// The count is inclusive, as in older robot program editors. Prefer
    /// [`Trajectory::remove_last`], which removes exactly `count`.
    pub fn delete_last(&mut self, n: usize) -> TrajectoryResult<()> {
        let requested = n.checked_add(1).ok_or(TrajectoryError::Underflow {
            requested: usize::MAX,
            available: self.waypoints.len(),
        })?;
        self.remove_last(requested)
    }

    /// Remove exactly `count` waypoints from the tail
    pub fn remove_last(&mut self, count: usize) -> TrajectoryResult<()> {
        let available = self.waypoints.len();
        if count > available {
            return Err(TrajectoryError::Underflow {
                requested: count,
                available,
            });
        }
        if count == 0 {
            return Ok(());
        }

        let removed = self.waypoints.split_off(available - count);
        if let Err(e) = self.regenerate() {
            self.waypoints.extend(removed);
            return Err(e);
        }
        Ok(())
    }

    /// Replace every waypoint
    ///
    /// Names are made unique in order; the list is rejected as a whole if any
    /// waypoint is invalid or the geometry cannot be built.
    pub fn set_waypoints(&mut self, waypoints: Vec<Waypoint>) -> TrajectoryResult<()> {
        let mut accepted: Vec<Waypoint> = Vec::with_capacity(waypoints.len());
        for mut waypoint in waypoints {
            waypoint
                .validate()
                .map_err(|source| TrajectoryError::InvalidProfile {
                    name: waypoint.name.clone(),
                    source,
                })?;
            waypoint.name =
                naming::unique_name(&waypoint.name, accepted.iter().map(|w| w.name.as_str()));
            accepted.push(waypoint);
        }

        let composite = build_composite(&accepted, &self.config)?;
        self.waypoints = accepted;
        self.composite = composite;
        Ok(())
    }

    /// Remove every waypoint
    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.composite = None;
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn waypoint(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    pub fn waypoint_by_name(&self, name: &str) -> Option<&Waypoint> {
        self.waypoints.iter().find(|w| w.name == name)
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Derived motion; `None` while there are no waypoints
    pub fn composite(&self) -> Option<&CompositeTrajectory> {
        self.composite.as_ref()
    }

    /// Number of path segments
    pub fn segment_count(&self) -> usize {
        self.composite.as_ref().map_or(0, |c| c.len())
    }

    fn segment(&self, index: usize) -> TrajectoryResult<&TrajectorySegment> {
        self.composite
            .as_ref()
            .and_then(|c| c.get(index))
            .ok_or(TrajectoryError::IndexOutOfRange {
                index,
                count: self.segment_count(),
            })
    }

    /// Path length of one segment, or of the whole trajectory for `None`
    pub fn length(&self, segment: Option<usize>) -> TrajectoryResult<f64> {
        match segment {
            None => Ok(self.total_length()),
            Some(index) => Ok(self.segment(index)?.length()),
        }
    }

    /// Duration of one segment, or of the whole trajectory for `None`
    pub fn duration(&self, segment: Option<usize>) -> TrajectoryResult<f64> {
        match segment {
            None => Ok(self.total_duration()),
            Some(index) => Ok(self.segment(index)?.duration()),
        }
    }

    pub fn total_length(&self) -> f64 {
        self.composite.as_ref().map_or(0.0, |c| c.length())
    }

    pub fn total_duration(&self) -> f64 {
        self.composite.as_ref().map_or(0.0, |c| c.duration())
    }

    /// Frame at time `t`; identity for an empty trajectory
    pub fn position_at(&self, t: f64) -> Frame {
        self.composite
            .as_ref()
            .map_or_else(Frame::identity, |c| c.pos(t))
    }

    /// Twist at time `t`
    pub fn velocity_at(&self, t: f64) -> Twist {
        self.composite
            .as_ref()
            .map_or_else(Twist::zero, |c| c.vel(t))
    }

    /// Linear speed at time `t`
    pub fn speed_at(&self, t: f64) -> f64 {
        self.velocity_at(t).speed()
    }

    /// Sample the trajectory every `step` seconds, always including the end
    ///
    /// Steps that would yield [`MAX_SAMPLES`] or more samples are rejected.
    pub fn sample(&self, step: f64) -> TrajectoryResult<Vec<TrajectorySample>> {
        if !(step.is_finite() && step > 0.0) {
            return Err(TrajectoryError::InvalidStep(step));
        }
        let composite = match self.composite.as_ref() {
            Some(composite) => composite,
            None => return Ok(Vec::new()),
        };

        let duration = composite.duration();
        let sample_at = |time: f64| TrajectorySample {
            time,
            frame: composite.pos(time),
            speed: composite.vel(time).speed(),
        };

        let steps = (duration / step).floor();
        if !(steps < MAX_SAMPLES as f64) {
            return Err(TrajectoryError::InvalidStep(step));
        }
        let steps = steps as usize;
        let mut samples: Vec<TrajectorySample> =
            (0..=steps).map(|i| sample_at(i as f64 * step)).collect();
        if duration - steps as f64 * step > 1e-12 {
            samples.push(sample_at(duration));
        }
        Ok(samples)
    }

    /// Rebuild the composite into a temporary and swap it in on success
    fn regenerate(&mut self) -> TrajectoryResult<()> {
        match build_composite(&self.waypoints, &self.config) {
            Ok(composite) => {
                debug!(
                    waypoints = self.waypoints.len(),
                    segments = composite.as_ref().map_or(0, |c| c.len()),
                    "Regenerated trajectory"
                );
                self.composite = composite;
                Ok(())
            }
            Err(e) => {
                warn!("Trajectory regeneration failed: {}", e);
                Err(e)
            }
        }
    }
}

impl Clone for Trajectory {
    /// Copies waypoints and settings, then rebuilds the composite
    fn clone(&self) -> Self {
        let composite = match build_composite(&self.waypoints, &self.config) {
            Ok(composite) => composite,
            Err(e) => {
                warn!("Rebuilding cloned trajectory failed: {}", e);
                None
            }
        };
        Trajectory {
            waypoints: self.waypoints.clone(),
            config: self.config.clone(),
            composite,
        }
    }
}
