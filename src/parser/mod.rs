//! STL parsing
//!
//! Decodes one STL file held in memory into a [`Mesh`]. Both encodings are
//! supported and detected automatically:
//!
//! 1. If the declared binary triangle count matches the buffer length
//!    exactly (`84 + count * 50 == len`), the buffer is binary.
//! 2. Otherwise, if the buffer is text, it is parsed as ASCII.
//! 3. Otherwise the buffer is a binary file whose length disagrees with its
//!    header, reported as [`ParseError::Truncated`]. A non-STL binary file
//!    (an image renamed to `.stl`) cannot be told apart from a cut-off upload
//!    and lands here too, so the hint covers both.
//!
//! Detection does not trust the `solid` prefix on its own, since many binary
//! exporters write "solid" into the free-text header.

pub mod ascii;
pub mod binary;

use crate::error::ParseError;
use crate::model::{Mesh, StlEncoding, Triangle};

pub use ascii::AsciiFacets;
pub use binary::BinaryFacets;

/// Parse an STL file from a byte buffer
///
/// # Example
///
/// ```
/// let stl = b"solid demo
/// facet normal 0 0 1
///   outer loop
///     vertex 0 0 0
///     vertex 10 0 0
///     vertex 0 10 0
///   endloop
/// endfacet
/// endsolid demo";
///
/// let mesh = stlquote::parse(stl)?;
/// assert_eq!(mesh.triangle_count(), 1);
/// assert_eq!(mesh.name(), Some("demo"));
/// # Ok::<(), stlquote::ParseError>(())
/// ```
pub fn parse(bytes: &[u8]) -> Result<Mesh, ParseError> {
    let encoding = detect_encoding(bytes)?;
    parse_with_encoding(bytes, encoding)
}

/// Determine which STL encoding a buffer uses
///
/// Fails with [`ParseError::Empty`] for an empty buffer and with
/// [`ParseError::Truncated`] for non-text buffers whose length disagrees with
/// the declared binary layout.
pub fn detect_encoding(bytes: &[u8]) -> Result<StlEncoding, ParseError> {
    if bytes.is_empty() {
        return Err(ParseError::Empty);
    }
    if binary::layout_matches(bytes) {
        return Ok(StlEncoding::Binary);
    }
    if is_text(bytes) {
        return Ok(StlEncoding::Ascii);
    }
    Err(binary::truncated(bytes))
}

/// Parse a buffer as a specific encoding, skipping detection
pub fn parse_with_encoding(bytes: &[u8], encoding: StlEncoding) -> Result<Mesh, ParseError> {
    if bytes.is_empty() {
        return Err(ParseError::Empty);
    }

    let (triangles, name) = match encoding {
        StlEncoding::Binary => {
            let facets = BinaryFacets::new(bytes)?;
            let triangles = collect_facets(facets)?;
            (triangles, binary::header_name(bytes))
        }
        StlEncoding::Ascii => {
            let facets = AsciiFacets::new(ascii::as_text(bytes)?)?;
            let name = facets.name().map(str::to_string);
            (collect_facets(facets)?, name)
        }
    };

    log::debug!(
        "Parsed {} STL: {} triangle(s) from {} bytes",
        encoding,
        triangles.len(),
        bytes.len()
    );

    Ok(Mesh::from_triangles(triangles, encoding)?.with_name(name))
}

/// Facet iterator over either encoding
pub enum Facets<'a> {
    /// Binary records
    Binary(BinaryFacets<'a>),
    /// ASCII facets
    Ascii(AsciiFacets<'a>),
}

impl<'a> Facets<'a> {
    /// Detect the encoding and open a facet iterator over `bytes`
    pub fn open(bytes: &'a [u8]) -> Result<Self, ParseError> {
        match detect_encoding(bytes)? {
            StlEncoding::Binary => Ok(Facets::Binary(BinaryFacets::new(bytes)?)),
            StlEncoding::Ascii => Ok(Facets::Ascii(AsciiFacets::new(ascii::as_text(bytes)?)?)),
        }
    }

    /// Encoding being decoded
    pub fn encoding(&self) -> StlEncoding {
        match self {
            Facets::Binary(_) => StlEncoding::Binary,
            Facets::Ascii(_) => StlEncoding::Ascii,
        }
    }
}

impl Iterator for Facets<'_> {
    type Item = Result<Triangle, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Facets::Binary(f) => f.next(),
            Facets::Ascii(f) => f.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Facets::Binary(f) => f.size_hint(),
            Facets::Ascii(f) => f.size_hint(),
        }
    }
}

fn collect_facets<I>(facets: I) -> Result<Vec<Triangle>, ParseError>
where
    I: Iterator<Item = Result<Triangle, ParseError>>,
{
    let mut triangles = Vec::with_capacity(facets.size_hint().0);
    for facet in facets {
        triangles.push(facet?);
    }
    Ok(triangles)
}

/// Valid UTF-8 without NUL bytes
fn is_text(bytes: &[u8]) -> bool {
    !bytes.contains(&0) && std::str::from_utf8(bytes).is_ok()
}
