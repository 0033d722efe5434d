//! Builds the composite trajectory from a waypoint list
//!
//! Consecutive waypoints flagged `continuous` are gathered into one
//! rounded-corner path that is driven by a single velocity profile. All other
//! edges become straight lines with their own profile.

use super::composite::CompositeTrajectory;
use super::segment::TrajectorySegment;
use super::waypoint::{Waypoint, WaypointType};
use crate::common::types::Frame;
use crate::config::{TrajectoryConfig, WaitPolicy};
use crate::error::{GeometryError, ProfileError, TrajectoryError};
use crate::geometry::{Path, PathHold, PathLine, PathRoundedComposite, SingleAxis};
use crate::motion::{DwellProfile, TrapezoidalProfile, VelocityProfile};

/// Accumulation state for blended runs
#[derive(Debug)]
enum RunState {
    Idle,
    Open {
        path: PathRoundedComposite,
        profile: TrapezoidalProfile,
    },
}

/// Walks the waypoints once and collects segments
struct PathBuilder<'a> {
    config: &'a TrajectoryConfig,
    composite: CompositeTrajectory,
    previous: Frame,
    state: RunState,
}

impl<'a> PathBuilder<'a> {
    fn new(config: &'a TrajectoryConfig, first: &Waypoint) -> Self {
        PathBuilder {
            config,
            composite: CompositeTrajectory::new(first.end_position),
            previous: first.end_position,
            state: RunState::Idle,
        }
    }

    fn step(&mut self, waypoint: &Waypoint, is_last: bool) -> Result<(), TrajectoryError> {
        match waypoint.kind {
            WaypointType::Line | WaypointType::PointToPoint => {
                let continuous = waypoint.continuous && !is_last;
                self.motion(waypoint, continuous)
            }
            WaypointType::Wait => self.wait(waypoint),
        }
    }

    fn motion(&mut self, waypoint: &Waypoint, continuous: bool) -> Result<(), TrajectoryError> {
        let next = waypoint.end_position;
        let build_err = |source: GeometryError| TrajectoryError::Build {
            waypoint: waypoint.name.clone(),
            source,
        };

        self.state = match (std::mem::replace(&mut self.state, RunState::Idle), continuous) {
            // start of a blended run, driven by this waypoint's limits
            (RunState::Idle, true) => {
                let mut path = PathRoundedComposite::new(
                    self.config.corner_radius,
                    self.config.corner_equivalent_radius,
                    Box::new(SingleAxis::new()),
                );
                path.add(self.previous).map_err(build_err)?;
                path.add(next).map_err(build_err)?;
                RunState::Open {
                    path,
                    profile: trapezoid(waypoint)?,
                }
            }
            (RunState::Open { mut path, profile }, true) => {
                path.add(next).map_err(build_err)?;
                RunState::Open { path, profile }
            }
            (RunState::Open { mut path, profile }, false) => {
                path.add(next).map_err(build_err)?;
                self.close_run(path, profile).map_err(build_err)?;
                RunState::Idle
            }
            (RunState::Idle, false) => {
                let path = PathLine::new(
                    &self.previous,
                    &next,
                    Box::new(SingleAxis::new()),
                    self.config.line_equivalent_radius,
                );
                let profile = trapezoid(waypoint)?;
                self.push(Box::new(path), Box::new(profile));
                RunState::Idle
            }
        };

        self.previous = next;
        Ok(())
    }

    fn wait(&mut self, waypoint: &Waypoint) -> Result<(), TrajectoryError> {
        let seconds = match self.config.wait_policy {
            WaitPolicy::Skip => return Ok(()),
            WaitPolicy::Dwell { seconds } => seconds,
        };

        // a pause ends any blend at the frame reached so far
        if let RunState::Open { path, profile } = std::mem::replace(&mut self.state, RunState::Idle) {
            self.close_run(path, profile)
                .map_err(|source| TrajectoryError::Build {
                    waypoint: waypoint.name.clone(),
                    source,
                })?;
        }

        let profile = DwellProfile::new(seconds).map_err(|source| TrajectoryError::InvalidProfile {
            name: waypoint.name.clone(),
            source,
        })?;
        self.push(Box::new(PathHold::new(self.previous)), Box::new(profile));
        Ok(())
    }

    fn close_run(
        &mut self,
        mut path: PathRoundedComposite,
        profile: TrapezoidalProfile,
    ) -> Result<(), GeometryError> {
        path.finish()?;
        self.push(Box::new(path), Box::new(profile));
        Ok(())
    }

    fn push(&mut self, path: Box<dyn Path>, mut profile: Box<dyn VelocityProfile>) {
        profile.set_profile(0.0, path.path_length());
        self.composite.add(TrajectorySegment::new(path, profile));
    }

    fn finish(mut self, last: &Waypoint) -> Result<CompositeTrajectory, TrajectoryError> {
        // only reachable when trailing waypoints are skipped waits
        if let RunState::Open { path, profile } = std::mem::replace(&mut self.state, RunState::Idle) {
            self.close_run(path, profile)
                .map_err(|source| TrajectoryError::Build {
                    waypoint: last.name.clone(),
                    source,
                })?;
        }
        Ok(self.composite)
    }
}

fn trapezoid(waypoint: &Waypoint) -> Result<TrapezoidalProfile, TrajectoryError> {
    TrapezoidalProfile::new(waypoint.velocity, waypoint.acceleration).map_err(
        |source: ProfileError| TrajectoryError::InvalidProfile {
            name: waypoint.name.clone(),
            source,
        },
    )
}

/// Build the composite for `waypoints`; `None` when the list is empty
pub fn build_composite(
    waypoints: &[Waypoint],
    config: &TrajectoryConfig,
) -> Result<Option<CompositeTrajectory>, TrajectoryError> {
    let (first, rest) = match waypoints.split_first() {
        Some(split) => split,
        None => return Ok(None),
    };

    let mut builder = PathBuilder::new(config, first);
    for (i, waypoint) in rest.iter().enumerate() {
        builder.step(waypoint, i + 1 == rest.len())?;
    }

    let last = rest.last().unwrap_or(first);
    builder.finish(last).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::frame_from_xyz;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn wp(name: &str, x: f64, y: f64) -> Waypoint {
        Waypoint::new(name, frame_from_xyz(x, y, 0.0))
            .with_velocity(10.0)
            .with_acceleration(5.0)
    }

    #[test]
    fn test_empty_list() {
        let composite = build_composite(&[], &TrajectoryConfig::default()).unwrap();
        assert!(composite.is_none());
    }

    #[test]
    fn test_single_waypoint_has_no_segments() {
        let composite = build_composite(&[wp("A", 1.0, 2.0)], &TrajectoryConfig::default())
            .unwrap()
            .unwrap();
        assert!(composite.is_empty());
        assert_relative_eq!(composite.pos(0.0).translation.vector, Vector3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_isolated_lines() {
        let waypoints = [wp("A", 0.0, 0.0), wp("B", 10.0, 0.0), wp("C", 10.0, 10.0)];
        let composite = build_composite(&waypoints, &TrajectoryConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(composite.len(), 2);
        assert_relative_eq!(composite.length(), 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_continuous_run_is_one_segment() {
        let waypoints = [
            wp("A", 0.0, 0.0),
            wp("B", 10.0, 0.0).with_continuous(true),
            wp("C", 10.0, 10.0),
        ];
        let composite = build_composite(&waypoints, &TrajectoryConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(composite.len(), 1);
        // the 3mm corner arc is shorter than the two legs it replaces
        assert!(composite.length() < 20.0);
    }

    #[test]
    fn test_continuous_flag_on_last_waypoint_ignored() {
        let waypoints = [wp("A", 0.0, 0.0), wp("B", 10.0, 0.0).with_continuous(true)];
        let composite = build_composite(&waypoints, &TrajectoryConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(composite.len(), 1);
        assert_relative_eq!(composite.length(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_run_profile_uses_first_continuous_waypoint() {
        let waypoints = [
            wp("A", 0.0, 0.0),
            wp("B", 10.0, 0.0).with_continuous(true).with_velocity(3.0),
            wp("C", 10.0, 10.0).with_velocity(50.0),
        ];
        let composite = build_composite(&waypoints, &TrajectoryConfig::default())
            .unwrap()
            .unwrap();
        let segment = composite.get(0).unwrap();
        let peak = (0..100)
            .map(|i| segment.profile().vel(segment.duration() * i as f64 / 100.0))
            .fold(0.0, f64::max);
        assert_relative_eq!(peak, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_wait_skipped_by_default() {
        let waypoints = [
            wp("A", 0.0, 0.0),
            wp("W", 50.0, 50.0).with_kind(WaypointType::Wait),
            wp("B", 10.0, 0.0),
        ];
        let composite = build_composite(&waypoints, &TrajectoryConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(composite.len(), 1);
        assert_relative_eq!(composite.length(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_wait_dwells_when_configured() {
        let config = TrajectoryConfig {
            wait_policy: WaitPolicy::Dwell { seconds: 2.0 },
            ..Default::default()
        };
        let waypoints = [
            wp("A", 0.0, 0.0),
            wp("B", 10.0, 0.0),
            wp("W", 0.0, 0.0).with_kind(WaypointType::Wait),
            wp("C", 20.0, 0.0),
        ];
        let composite = build_composite(&waypoints, &config).unwrap().unwrap();
        assert_eq!(composite.len(), 3);

        let dwell = composite.get(1).unwrap();
        assert_eq!(dwell.duration(), 2.0);
        assert_eq!(dwell.length(), 0.0);
        assert_relative_eq!(dwell.pos(1.0).translation.vector, Vector3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_dwell_closes_open_run() {
        let config = TrajectoryConfig {
            wait_policy: WaitPolicy::Dwell { seconds: 1.0 },
            ..Default::default()
        };
        let waypoints = [
            wp("A", 0.0, 0.0),
            wp("B", 10.0, 0.0).with_continuous(true),
            wp("W", 0.0, 0.0).with_kind(WaypointType::Wait),
            wp("C", 10.0, 10.0),
        ];
        let composite = build_composite(&waypoints, &config).unwrap().unwrap();
        // run A-B, dwell, line B-C
        assert_eq!(composite.len(), 3);
        assert_relative_eq!(composite.get(0).unwrap().length(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_trailing_skipped_wait_closes_run() {
        let waypoints = [
            wp("A", 0.0, 0.0),
            wp("B", 10.0, 0.0).with_continuous(true),
            wp("W", 0.0, 0.0).with_kind(WaypointType::Wait),
        ];
        let composite = build_composite(&waypoints, &TrajectoryConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(composite.len(), 1);
        assert_relative_eq!(composite.length(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_geometry_error_names_waypoint() {
        let waypoints = [
            wp("A", 0.0, 0.0),
            wp("B", 2.0, 0.0).with_continuous(true),
            wp("C", 2.0, 10.0),
        ];
        let err = build_composite(&waypoints, &TrajectoryConfig::default()).unwrap_err();
        match err {
            TrajectoryError::Build { waypoint, source } => {
                assert_eq!(waypoint, "C");
                assert!(matches!(source, GeometryError::RadiusTooLarge { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
