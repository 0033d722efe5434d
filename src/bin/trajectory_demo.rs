use anyhow::{Context, Result};
use std::env;
use std::fs;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use trajectory_core::common::types::frame_from_xyz_rpy;
use trajectory_core::{Trajectory, TrajectoryConfig, Waypoint, WaypointType};

/// Usage: trajectory_demo [program.json] [config.toml]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = env::args().skip(1);
    let program = args.next();
    let config = match args.next() {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path))?;
            TrajectoryConfig::from_toml_str(&text)?
        }
        None => TrajectoryConfig::default(),
    };

    let trajectory = match program {
        Some(path) => Trajectory::load_from_file(&path, config)
            .with_context(|| format!("loading program {}", path))?,
        None => {
            info!("No program given, building the demo program");
            demo_program(config)?
        }
    };

    println!("Waypoints:");
    for waypoint in trajectory.waypoints() {
        let p = waypoint.end_position.translation.vector;
        println!(
            "  {:<10} {:<4} ({:8.2}, {:8.2}, {:8.2}) v={} a={} cont={}",
            waypoint.name, waypoint.kind, p.x, p.y, p.z, waypoint.velocity, waypoint.acceleration,
            waypoint.continuous
        );
    }

    println!(
        "Segments: {}, length: {:.3}, duration: {:.3}s",
        trajectory.segment_count(),
        trajectory.total_length(),
        trajectory.total_duration()
    );
    for i in 0..trajectory.segment_count() {
        println!(
            "  segment {}: length {:.3}, duration {:.3}s",
            i,
            trajectory.length(Some(i))?,
            trajectory.duration(Some(i))?
        );
    }

    let step = (trajectory.total_duration() / 20.0).max(0.01);
    for sample in trajectory.sample(step)? {
        let p = sample.frame.translation.vector;
        println!(
            "  t={:7.3}  pos=({:8.3}, {:8.3}, {:8.3})  speed={:8.3}",
            sample.time, p.x, p.y, p.z, sample.speed
        );
    }

    Ok(())
}

fn demo_program(config: TrajectoryConfig) -> Result<Trajectory> {
    let mut trajectory = Trajectory::with_config(config);

    let waypoints = [
        Waypoint::new("Home", frame_from_xyz_rpy(0.0, 0.0, 200.0, 0.0, 0.0, 0.0)),
        Waypoint::new("Approach", frame_from_xyz_rpy(200.0, 0.0, 200.0, 0.0, 0.0, 0.0))
            .with_continuous(true)
            .with_velocity(500.0)
            .with_acceleration(250.0),
        Waypoint::new("Corner", frame_from_xyz_rpy(200.0, 150.0, 200.0, 0.0, 0.0, 0.5))
            .with_continuous(true),
        Waypoint::new("Place", frame_from_xyz_rpy(200.0, 150.0, 50.0, 0.0, 0.0, 0.5))
            .with_kind(WaypointType::PointToPoint),
        Waypoint::new("Release", frame_from_xyz_rpy(200.0, 150.0, 50.0, 0.0, 0.0, 0.5))
            .with_kind(WaypointType::Wait),
        Waypoint::new("Home", frame_from_xyz_rpy(0.0, 0.0, 200.0, 0.0, 0.0, 0.0)),
    ];

    for waypoint in waypoints {
        if let Err(e) = trajectory.add_waypoint(waypoint) {
            error!("Failed to add waypoint: {}", e);
            return Err(e.into());
        }
    }
    Ok(trajectory)
}
