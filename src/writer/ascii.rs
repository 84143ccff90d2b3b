//! ASCII STL writer

use std::io::Write;

use nalgebra::Vector3;

use super::facet_normal;
use crate::error::Result;
use crate::model::Mesh;

const DEFAULT_SOLID_NAME: &str = "mesh";

/// Write a mesh as ASCII STL
///
/// The solid is named after the mesh, or `mesh` when it has no name.
/// Attribute words have no ASCII representation and are dropped.
pub fn write_ascii<W: Write>(mesh: &Mesh, mut writer: W) -> Result<()> {
    let name = solid_name(mesh);
    writeln!(writer, "solid {}", name)?;
    for triangle in mesh.triangles() {
        writeln!(writer, "  facet normal {}", format_vec3(&facet_normal(triangle)))?;
        writeln!(writer, "    outer loop")?;
        for vertex in &triangle.vertices {
            writeln!(writer, "      vertex {}", format_vec3(&vertex.coords))?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid {}", name)?;
    writer.flush()?;
    Ok(())
}

/// Serialize a mesh as ASCII STL into a string
pub fn to_ascii_string(mesh: &Mesh) -> Result<String> {
    let mut buffer = Vec::new();
    write_ascii(mesh, &mut buffer)?;
    // Only UTF-8 text is ever written
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Single-line solid name
fn solid_name(mesh: &Mesh) -> String {
    match mesh.name() {
        Some(name) => name.split_whitespace().collect::<Vec<_>>().join(" "),
        None => DEFAULT_SOLID_NAME.to_string(),
    }
}

/// Components at f32 precision, shortest representation that parses back exactly
fn format_vec3(v: &Vector3<f64>) -> String {
    format!("{} {} {}", v.x as f32, v.y as f32, v.z as f32)
}
