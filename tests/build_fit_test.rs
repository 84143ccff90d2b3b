//! Integration tests for build envelope checks

mod common;

use common::box_mesh;
use stlquote::{Axis, BuildEnvelope, Dimensions, EngineConfig, check_fit};

#[test]
fn test_envelope_boundary() {
    let envelope = BuildEnvelope::cube(256.0);
    assert!(check_fit(&Dimensions::new(256.0, 256.0, 256.0), &envelope).fits);

    let report = check_fit(&Dimensions::new(256.0001, 256.0, 256.0), &envelope);
    assert!(!report.fits);
    assert_eq!(report.overflows.len(), 1);
    let x = report.overflow(Axis::X).unwrap();
    assert_eq!(x.actual, 256.0001);
    assert_eq!(x.limit, 256.0);
    assert!((x.excess - 1e-4).abs() < 1e-9);
}

#[test]
fn test_analyzed_mesh_against_config() {
    let config = EngineConfig::new().with_build_envelope(BuildEnvelope::new(200.0, 200.0, 180.0));

    let small = box_mesh(50.0, 50.0, 50.0).analyze();
    assert!(check_fit(&small.dimensions, config.build_envelope()).fits);

    let tall = box_mesh(50.0, 50.0, 190.0).analyze();
    let report = check_fit(&tall.dimensions, config.build_envelope());
    assert!(!report.fits);
    assert_eq!(report.overflows[0].axis, Axis::Z);
    assert!((report.overflows[0].excess - 10.0).abs() < 1e-9);
    assert_eq!(
        report.to_string(),
        "Exceeds the build plate (Z: 190.0mm > 180mm (+10.0mm))"
    );
}

#[test]
fn test_every_axis_over() {
    let report = check_fit(&Dimensions::new(300.0, 300.0, 300.0), &BuildEnvelope::default());
    let axes: Vec<Axis> = report.overflows.iter().map(|o| o.axis).collect();
    assert_eq!(axes, Axis::ALL.to_vec());
}
