//! Shared mesh builders for integration tests

#![allow(dead_code)]

use nalgebra::Point3;
use stlquote::{Mesh, StlEncoding, Triangle};

/// Corner indices of an axis-aligned box, two outward-wound triangles per face
const BOX_FACES: [[usize; 3]; 12] = [
    [0, 2, 1],
    [0, 3, 2],
    [4, 5, 6],
    [4, 6, 7],
    [0, 1, 5],
    [0, 5, 4],
    [3, 7, 6],
    [3, 6, 2],
    [0, 4, 7],
    [0, 7, 3],
    [1, 2, 6],
    [1, 6, 5],
];

/// Closed box with one corner at the origin and outward normals
pub fn box_triangles(sx: f64, sy: f64, sz: f64) -> Vec<Triangle> {
    let p = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(sx, 0.0, 0.0),
        Point3::new(sx, sy, 0.0),
        Point3::new(0.0, sy, 0.0),
        Point3::new(0.0, 0.0, sz),
        Point3::new(sx, 0.0, sz),
        Point3::new(sx, sy, sz),
        Point3::new(0.0, sy, sz),
    ];
    BOX_FACES
        .iter()
        .map(|&[a, b, c]| Triangle::new(p[a], p[b], p[c]))
        .collect()
}

/// Closed box as a mesh
pub fn box_mesh(sx: f64, sy: f64, sz: f64) -> Mesh {
    Mesh::from_triangles(box_triangles(sx, sy, sz), StlEncoding::Binary).unwrap()
}

/// 10 mm cube, 12 triangles
pub fn cube_mesh() -> Mesh {
    box_mesh(10.0, 10.0, 10.0)
}

/// Encode triangles as binary STL with the given header text
pub fn binary_stl(header: &str, triangles: &[Triangle]) -> Vec<u8> {
    let mut out = vec![0u8; 80];
    out[..header.len()].copy_from_slice(header.as_bytes());
    out.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
    for t in triangles {
        for c in t.normal.iter() {
            out.extend_from_slice(&(*c as f32).to_le_bytes());
        }
        for v in &t.vertices {
            for c in v.coords.iter() {
                out.extend_from_slice(&(*c as f32).to_le_bytes());
            }
        }
        out.extend_from_slice(&t.attribute.to_le_bytes());
    }
    out
}

/// Encode triangles as ASCII STL
pub fn ascii_stl(name: &str, triangles: &[Triangle]) -> String {
    let mut out = format!("solid {}\n", name);
    for t in triangles {
        out.push_str(&format!(
            "facet normal {} {} {}\n outer loop\n",
            t.normal.x, t.normal.y, t.normal.z
        ));
        for v in &t.vertices {
            out.push_str(&format!("  vertex {} {} {}\n", v.x, v.y, v.z));
        }
        out.push_str(" endloop\nendfacet\n");
    }
    out.push_str(&format!("endsolid {}\n", name));
    out
}
