//! Binary STL writer

use std::io::{self, Write};

use nalgebra::Vector3;

use super::facet_normal;
use crate::error::Result;
use crate::model::Mesh;
use crate::parser::binary::HEADER_SIZE;

/// Header text written into every binary file
///
/// Never starts with "solid", so readers that sniff the prefix do not mistake
/// the output for ASCII.
pub const BINARY_HEADER: &[u8] = b"Binary STL written by stlquote";

/// Write a mesh as binary STL
pub fn write_binary<W: Write>(mesh: &Mesh, mut writer: W) -> Result<()> {
    let count = u32::try_from(mesh.triangle_count()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "{} triangles exceed the binary STL limit of {}",
                mesh.triangle_count(),
                u32::MAX
            ),
        )
    })?;

    let mut header = [0u8; HEADER_SIZE];
    header[..BINARY_HEADER.len()].copy_from_slice(BINARY_HEADER);
    writer.write_all(&header)?;
    writer.write_all(&count.to_le_bytes())?;

    for triangle in mesh.triangles() {
        write_vec3(&mut writer, &facet_normal(triangle))?;
        for vertex in &triangle.vertices {
            write_vec3(&mut writer, &vertex.coords)?;
        }
        writer.write_all(&triangle.attribute.to_le_bytes())?;
    }

    writer.flush()?;
    Ok(())
}

/// Serialize a mesh as binary STL into a new buffer
pub fn to_binary_bytes(mesh: &Mesh) -> Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(
        crate::parser::binary::PREAMBLE_SIZE
            + mesh.triangle_count() * crate::parser::binary::RECORD_SIZE,
    );
    write_binary(mesh, &mut buffer)?;
    Ok(buffer)
}

fn write_vec3<W: Write>(writer: &mut W, v: &Vector3<f64>) -> io::Result<()> {
    for c in v.iter() {
        writer.write_all(&(*c as f32).to_le_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{StlEncoding, Triangle};
    use crate::parser::{self, binary};
    use nalgebra::Point3;

    fn mesh() -> Mesh {
        let t = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.5, 0.0, 0.0),
            Point3::new(0.0, 4.0, 1.0),
        )
        .with_attribute(3);
        Mesh::from_triangles(vec![t, t.flipped()], StlEncoding::Ascii).unwrap()
    }

    #[test]
    fn test_layout() {
        let bytes = to_binary_bytes(&mesh()).unwrap();
        assert_eq!(bytes.len(), 84 + 2 * 50);
        assert!(binary::layout_matches(&bytes));
        assert!(!bytes.starts_with(b"solid"));
        assert_eq!(binary::declared_count(&bytes), Some(2));
    }

    #[test]
    fn test_parses_back() {
        let original = mesh();
        let bytes = to_binary_bytes(&original).unwrap();
        let parsed = parser::parse(&bytes).unwrap();
        assert_eq!(parsed.encoding(), StlEncoding::Binary);
        assert_eq!(parsed.triangle_count(), 2);
        assert_eq!(parsed.triangles()[0].vertices, original.triangles()[0].vertices);
        assert_eq!(parsed.triangles()[1].attribute, 3);
        assert_eq!(parsed.name(), Some("Binary STL written by stlquote"));
    }
}
