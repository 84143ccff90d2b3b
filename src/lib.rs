//! # stlquote
//!
//! A pure Rust engine for pricing 3D-print jobs from STL mesh files.
//!
//! This library decodes binary and ASCII STL files, measures the mesh (volume,
//! surface area, bounding dimensions), checks it against a printer's build
//! envelope and turns the result into an itemized quote for a chosen material,
//! infill percentage and quantity.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Automatic binary/ASCII detection that does not trust the `solid` prefix
//! - Constant-memory streaming analysis for large files
//! - Optional parallel analysis (`parallel` feature, enabled by default)
//! - Optional JSON catalogs and configuration (`serde` feature)
//! - Binary and ASCII STL export
//!
//! ## Example
//!
//! ```no_run
//! use stlquote::{EngineConfig, MaterialCatalog, Mesh, check_fit, quote};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mesh = Mesh::from_file("bracket.stl")?;
//! let analysis = mesh.analyze();
//! let config = EngineConfig::default();
//!
//! let fit = check_fit(&analysis.dimensions, config.build_envelope());
//! println!("{} ({})", analysis.dimensions, fit);
//!
//! let catalog = MaterialCatalog::example();
//! let params = catalog.parameters("petg", 20.0, 2)?;
//! let quote = quote(&analysis, &params, &config)?;
//! println!("Total: {:.2}", quote.total);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod mesh_ops;
pub mod model;
pub mod parser;
pub mod quote;
pub mod streaming;
pub mod validator;
pub mod writer;

pub use config::EngineConfig;
pub use error::{Error, ParseError, Result, ValidationError};
pub use mesh_ops::analyze;
pub use model::{
    AnalysisResult, Axis, AxisOverflow, BoundingBox, BuildEnvelope, BuildFitReport,
    DegenerateMeshWarning, Dimensions, InfillProfile, Material, MaterialCatalog, Mesh,
    Orientation, PrintParameters, Quote, StlEncoding, Triangle,
};
pub use parser::parse;
pub use quote::{quote, quote_by_id};
pub use validator::check_fit;

use std::path::Path;

/// Analyze an STL buffer without keeping its triangles in memory
///
/// Equivalent to parsing and then calling [`analyze`], but the triangles are
/// streamed straight into the analysis.
///
/// # Example
///
/// ```
/// let stl = b"solid t
/// facet normal 0 0 1
///   outer loop
///     vertex 0 0 0
///     vertex 10 0 0
///     vertex 0 10 0
///   endloop
/// endfacet
/// endsolid t";
///
/// let analysis = stlquote::analyze_bytes(stl)?;
/// assert_eq!(analysis.triangle_count, 1);
/// assert_eq!(analysis.surface_area_mm2, 50.0);
/// # Ok::<(), stlquote::ParseError>(())
/// ```
pub fn analyze_bytes(bytes: &[u8]) -> std::result::Result<AnalysisResult, ParseError> {
    streaming::StreamingParser::new(bytes)?.analyze()
}

impl Mesh {
    /// Parse an STL file from a byte buffer
    ///
    /// Alias for [`parse`].
    pub fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, ParseError> {
        parser::parse(bytes)
    }

    /// Read and parse an STL file from disk
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stlquote::Mesh;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mesh = Mesh::from_file("part.stl")?;
    /// println!("{} triangles", mesh.triangle_count());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(parser::parse(&bytes)?)
    }

    /// Compute volume, surface area, dimensions and triangle count
    pub fn analyze(&self) -> AnalysisResult {
        mesh_ops::analyze(self)
    }

    /// Write the mesh to a file in the given encoding
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P, encoding: StlEncoding) -> Result<()> {
        writer::write_to_file(self, path, encoding)
    }
}
