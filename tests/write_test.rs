//! Tests for STL writing

mod common;

use common::{box_mesh, cube_mesh};
use nalgebra::Vector3;
use stlquote::writer::{self, BINARY_HEADER, to_ascii_string, to_binary_bytes};
use stlquote::{Mesh, StlEncoding, parse};

/// Test writing and re-reading the reference cube in both encodings
#[test]
fn test_cube_round_trip() {
    let mesh = cube_mesh();
    let expected = mesh.analyze();

    for encoding in [StlEncoding::Binary, StlEncoding::Ascii] {
        let bytes = match encoding {
            StlEncoding::Binary => to_binary_bytes(&mesh).unwrap(),
            StlEncoding::Ascii => to_ascii_string(&mesh).unwrap().into_bytes(),
        };
        let parsed = parse(&bytes).unwrap();
        assert_eq!(parsed.encoding(), encoding);

        let analysis = parsed.analyze();
        assert_eq!(analysis.triangle_count, 12);
        assert!((analysis.volume_cm3 - expected.volume_cm3).abs() < 1e-9);
        assert!((analysis.surface_area_mm2 - expected.surface_area_mm2).abs() < 1e-9);
    }
}

/// The binary header must never be mistaken for ASCII
#[test]
fn test_binary_header() {
    let bytes = to_binary_bytes(&cube_mesh()).unwrap();
    assert_eq!(&bytes[..BINARY_HEADER.len()], BINARY_HEADER);
    assert!(!bytes.starts_with(b"solid"));
    assert_eq!(bytes.len(), 84 + 12 * 50);
}

/// Zero normals are replaced with the face normal on export
#[test]
fn test_normals_written() {
    let bytes = to_binary_bytes(&cube_mesh()).unwrap();
    let parsed = parse(&bytes).unwrap();
    for triangle in parsed.triangles() {
        assert!((triangle.normal.norm() - 1.0).abs() < 1e-6);
    }
    // The first two triangles are the bottom face
    assert_eq!(parsed.triangles()[0].normal, Vector3::new(0.0, 0.0, -1.0));
}

/// Test writing through the file helpers
#[test]
fn test_write_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = box_mesh(25.0, 5.0, 12.0);

    let binary_path = dir.path().join("part_binary.stl");
    writer::write_to_file(&mesh, &binary_path, StlEncoding::Binary).unwrap();
    let ascii_path = dir.path().join("part_ascii.stl");
    mesh.write_to_file(&ascii_path, StlEncoding::Ascii).unwrap();

    let from_binary = Mesh::from_file(&binary_path).unwrap();
    let from_ascii = Mesh::from_file(&ascii_path).unwrap();
    assert_eq!(from_binary.encoding(), StlEncoding::Binary);
    assert_eq!(from_ascii.encoding(), StlEncoding::Ascii);
    assert_eq!(from_binary.analyze().dimensions, from_ascii.analyze().dimensions);
}

/// Writing into a missing directory surfaces an I/O error
#[test]
fn test_write_to_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("part.stl");
    let err = writer::write_to_file(&cube_mesh(), &path, StlEncoding::Binary).unwrap_err();
    assert!(matches!(err, stlquote::Error::Io(_)));
    assert!(err.to_string().contains("[E3001]"));
}
