//! Streaming analysis for large STL files
//!
//! This module provides an iterator-based API that analyzes an STL buffer
//! without building a [`Mesh`]. Triangles are decoded one at a time and folded
//! into running totals, so memory use does not grow with the triangle count.
//! This is useful for files with millions of triangles where only the
//! quote-relevant metrics are needed.
//!
//! # Example
//!
//! ```
//! use stlquote::streaming::StreamingParser;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let stl = b"solid s
//! facet normal 0 0 1
//!   outer loop
//!     vertex 0 0 0
//!     vertex 10 0 0
//!     vertex 0 10 0
//!   endloop
//! endfacet
//! endsolid s";
//!
//! let parser = StreamingParser::new(stl)?;
//! let analysis = parser.analyze()?;
//! assert_eq!(analysis.triangle_count, 1);
//! # Ok(())
//! # }
//! ```

use crate::error::ParseError;
use crate::mesh_ops::MeshAccumulator;
use crate::model::{AnalysisResult, Mesh, StlEncoding};
use crate::parser::{self, Facets};

/// Streaming parser for STL buffers
///
/// # Memory Usage
///
/// Unlike [`parse`](crate::parse), which collects every triangle into a
/// [`Mesh`], the streaming parser:
/// - Decodes one triangle at a time
/// - Keeps only the running analysis totals
/// - Stops at the first malformed triangle
pub struct StreamingParser<'a> {
    bytes: &'a [u8],
    encoding: StlEncoding,
}

impl<'a> StreamingParser<'a> {
    /// Create a new streaming parser
    ///
    /// Detects the encoding up front, so empty, truncated and unrecognized
    /// buffers fail here rather than during iteration.
    pub fn new(bytes: &'a [u8]) -> Result<Self, ParseError> {
        let encoding = parser::detect_encoding(bytes)?;
        Ok(Self { bytes, encoding })
    }

    /// Encoding detected for the buffer
    pub fn encoding(&self) -> StlEncoding {
        self.encoding
    }

    /// Iterate over the triangles of the buffer
    pub fn facets(&self) -> Result<Facets<'a>, ParseError> {
        Facets::open(self.bytes)
    }

    /// Compute the analysis result in a single streaming pass
    ///
    /// Produces the same result as [`mesh_ops::analyze`](crate::mesh_ops::analyze)
    /// on the parsed mesh.
    pub fn analyze(&self) -> Result<AnalysisResult, ParseError> {
        let mut acc = MeshAccumulator::new();
        for facet in self.facets()? {
            acc.push(&facet?);
        }

        log::debug!(
            "Streamed {} triangle(s) from {} STL",
            acc.triangle_count(),
            self.encoding
        );

        acc.finish().ok_or(ParseError::EmptyMesh)
    }

    /// Parse the entire buffer into a [`Mesh`]
    ///
    /// This is a convenience method equivalent to [`parse`](crate::parse).
    pub fn parse_full(self) -> Result<Mesh, ParseError> {
        parser::parse_with_encoding(self.bytes, self.encoding)
    }
}
