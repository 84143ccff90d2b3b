//! STL writing
//!
//! This module serializes a [`Mesh`] back into binary or ASCII STL. Both
//! writers store coordinates as `f32`, the precision of the binary format, and
//! write the stored facet normal, or one recomputed from the winding when the
//! stored normal is zero.

mod ascii;
mod binary;

pub use ascii::{to_ascii_string, write_ascii};
pub use binary::{BINARY_HEADER, to_binary_bytes, write_binary};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use nalgebra::Vector3;

use crate::error::Result;
use crate::mesh_ops;
use crate::model::{Mesh, StlEncoding, Triangle};

/// Write a mesh to a file in the given encoding
///
/// The file is created or truncated.
pub fn write_to_file<P: AsRef<Path>>(mesh: &Mesh, path: P, encoding: StlEncoding) -> Result<()> {
    let path = path.as_ref();
    let writer = BufWriter::new(File::create(path)?);
    match encoding {
        StlEncoding::Binary => write_binary(mesh, writer)?,
        StlEncoding::Ascii => write_ascii(mesh, writer)?,
    }
    log::debug!(
        "Wrote {} triangle(s) as {} STL to {}",
        mesh.triangle_count(),
        encoding,
        path.display()
    );
    Ok(())
}

/// Normal to write for a facet
fn facet_normal(triangle: &Triangle) -> Vector3<f64> {
    if triangle.normal == Vector3::zeros() {
        let [v0, v1, v2] = &triangle.vertices;
        mesh_ops::calculate_face_normal(v0, v1, v2)
    } else {
        triangle.normal
    }
}
