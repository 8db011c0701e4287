//! Builds stents on a synthetic aortic bifurcation and prints a summary.
//!
//! ```text
//! cargo run --example stent_report
//! RUST_LOG=stentmesh=debug cargo run --example stent_report --features parallel
//! ```

use stentmesh::geometry::{BranchSet, StentSpec};
use stentmesh::math::Point3;
use stentmesh::operations::{BuildStent, BuildStents, DistributeStents};
use stentmesh::StentError;

/// Aorta running down the z axis, splitting into two iliac arteries.
fn bifurcation_segments() -> Vec<(Point3, Point3)> {
    let mut points = Vec::new();
    for i in 0..=12 {
        points.push(Point3::new(0.0, 0.0, 120.0 - f64::from(i) * 10.0));
    }
    let trunk: Vec<_> = points.windows(2).map(|w| (w[0], w[1])).collect();

    let leg = |side: f64| -> Vec<(Point3, Point3)> {
        let path: Vec<Point3> = (0..=8)
            .map(|i| {
                let t = f64::from(i);
                Point3::new(side * (2.0 * t + 0.15 * t * t), 0.5 * t, -8.0 * t)
            })
            .collect();
        path.windows(2).map(|w| (w[0], w[1])).collect()
    };

    trunk.into_iter().chain(leg(1.0)).chain(leg(-1.0)).collect()
}

fn main() -> Result<(), StentError> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("stentmesh=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let branches = BranchSet::from_segments(&bifurcation_segments(), 1e-6)?;
    println!("{} branches", branches.branch_count());
    for info in branches.summaries() {
        println!(
            "  branch {}: length {:.1}, {} points, direction ({:.2}, {:.2}, {:.2})",
            info.index,
            info.length,
            info.point_count,
            info.direction.x,
            info.direction.y,
            info.direction.z,
        );
    }

    let main_body = StentSpec::default()
        .with_position(0.2)
        .with_length(60.0)
        .with_radius(10.0)
        .with_resolution(24);
    let stages = BuildStent::new(main_body).execute_stages(&branches)?;
    println!(
        "main body: stent length {:.1}, {} vertices, {} faces, closed: {}",
        stages.sub_path.length(),
        stages.mesh.vertex_count(),
        stages.mesh.face_count(),
        stages.mesh.is_closed_manifold(),
    );

    let limb = StentSpec::default()
        .with_length(25.0)
        .with_radius(5.0)
        .with_smoothing(0.5);
    let mut specs = Vec::new();
    for branch in 1..branches.branch_count() {
        let base = limb.with_branch(branch).with_position(0.3);
        specs.extend(DistributeStents::new(2).execute(&base, &branches)?);
    }
    let (mesh, failures) = BuildStents::new(specs).execute_merged(&branches);
    println!(
        "limbs: {} vertices, {} faces, {} failed",
        mesh.vertex_count(),
        mesh.face_count(),
        failures.len(),
    );
    for (index, err) in failures {
        println!("  stent {index}: {err}");
    }
    Ok(())
}
