//! Binary STL decoding
//!
//! ```text
//! UINT8[80]    – Header (free text, often the exporter name)
//! UINT32       – Number of triangles (little-endian)
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count
//! end
//! ```

use nalgebra::{Point3, Vector3};

use crate::error::ParseError;
use crate::model::Triangle;

/// Size of the free-text header in bytes
pub const HEADER_SIZE: usize = 80;

/// Header plus the 4-byte triangle count
pub const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// Size of one triangle record (normal + 3 vertices + attribute)
pub const RECORD_SIZE: usize = 50;

/// Triangle count declared after the header, if the buffer is long enough
pub fn declared_count(bytes: &[u8]) -> Option<u32> {
    let count = bytes.get(HEADER_SIZE..PREAMBLE_SIZE)?;
    Some(u32::from_le_bytes([count[0], count[1], count[2], count[3]]))
}

/// Byte length of a binary STL with `count` triangles
///
/// Computed in u64 so that any declared u32 count is representable.
pub fn expected_len(count: u32) -> u64 {
    PREAMBLE_SIZE as u64 + u64::from(count) * RECORD_SIZE as u64
}

/// Whether the buffer length is exactly what its declared count implies
pub fn layout_matches(bytes: &[u8]) -> bool {
    declared_count(bytes).is_some_and(|count| expected_len(count) == bytes.len() as u64)
}

/// The Truncated error describing why `bytes` is not a valid binary layout
pub(crate) fn truncated(bytes: &[u8]) -> ParseError {
    match declared_count(bytes) {
        Some(declared) => ParseError::Truncated {
            declared,
            expected_len: expected_len(declared),
            actual_len: bytes.len() as u64,
        },
        None => ParseError::Truncated {
            declared: 0,
            expected_len: PREAMBLE_SIZE as u64,
            actual_len: bytes.len() as u64,
        },
    }
}

/// Printable header text up to the first NUL byte
pub fn header_name(bytes: &[u8]) -> Option<String> {
    let header = bytes.get(..HEADER_SIZE)?;
    let end = header.iter().position(|&b| b == 0).unwrap_or(HEADER_SIZE);
    let text = String::from_utf8_lossy(&header[..end]);
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.chars().any(|c| c.is_control()) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Iterator over the triangle records of a binary STL buffer
///
/// Yields one triangle per record without collecting them, so analysis can
/// consume a large file with constant memory. Stops after the first error.
pub struct BinaryFacets<'a> {
    records: std::slice::ChunksExact<'a, u8>,
    declared: u32,
    index: usize,
    failed: bool,
}

impl<'a> BinaryFacets<'a> {
    /// Validate the layout and position the iterator at the first record
    pub fn new(bytes: &'a [u8]) -> Result<Self, ParseError> {
        if bytes.is_empty() {
            return Err(ParseError::Empty);
        }
        if !layout_matches(bytes) {
            return Err(truncated(bytes));
        }
        let declared = declared_count(bytes).unwrap_or(0);

        Ok(Self {
            records: bytes[PREAMBLE_SIZE..].chunks_exact(RECORD_SIZE),
            declared,
            index: 0,
            failed: false,
        })
    }

    /// Triangle count declared in the header
    pub fn declared_count(&self) -> u32 {
        self.declared
    }
}

impl Iterator for BinaryFacets<'_> {
    type Item = Result<Triangle, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let record = self.records.next()?;
        let index = self.index;
        self.index += 1;

        let triangle = read_record(record);
        if let Some(vertex) = triangle.first_non_finite_vertex() {
            self.failed = true;
            return Some(Err(ParseError::NonFiniteValue {
                triangle: index,
                vertex,
            }));
        }
        Some(Ok(triangle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            self.records.size_hint()
        }
    }
}

/// Decode one 50-byte record
fn read_record(record: &[u8]) -> Triangle {
    let normal = read_vec3(&record[0..12]);
    let normal = if normal.iter().all(|c| c.is_finite()) {
        normal
    } else {
        Vector3::zeros()
    };

    Triangle {
        vertices: [
            Point3::from(read_vec3(&record[12..24])),
            Point3::from(read_vec3(&record[24..36])),
            Point3::from(read_vec3(&record[36..48])),
        ],
        normal,
        attribute: u16::from_le_bytes([record[48], record[49]]),
    }
}

/// Read 3 little-endian f32s and widen them to f64
fn read_vec3(buf: &[u8]) -> Vector3<f64> {
    let read = |o: usize| f64::from(f32::from_le_bytes([buf[o], buf[o + 1], buf[o + 2], buf[o + 3]]));
    Vector3::new(read(0), read(4), read(8))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(normal: [f32; 3], vertices: [[f32; 3]; 3], attribute: u16) -> Vec<u8> {
        let mut out = Vec::with_capacity(RECORD_SIZE);
        for c in normal {
            out.extend_from_slice(&c.to_le_bytes());
        }
        for v in vertices {
            for c in v {
                out.extend_from_slice(&c.to_le_bytes());
            }
        }
        out.extend_from_slice(&attribute.to_le_bytes());
        out
    }

    fn buffer(header: &[u8], records: &[Vec<u8>]) -> Vec<u8> {
        let mut out = vec![0u8; HEADER_SIZE];
        out[..header.len()].copy_from_slice(header);
        out.extend_from_slice(&(records.len() as u32).to_le_bytes());
        for r in records {
            out.extend_from_slice(r);
        }
        out
    }

    #[test]
    fn test_layout_helpers() {
        assert_eq!(expected_len(0), 84);
        assert_eq!(expected_len(12), 684);
        assert_eq!(expected_len(u32::MAX), 84 + u64::from(u32::MAX) * 50);

        let bytes = buffer(b"", &[record([0.0; 3], [[0.0; 3]; 3], 0)]);
        assert_eq!(bytes.len(), 134);
        assert_eq!(declared_count(&bytes), Some(1));
        assert!(layout_matches(&bytes));
        assert!(!layout_matches(&bytes[..133]));
        assert_eq!(declared_count(&bytes[..83]), None);
    }

    #[test]
    fn test_reads_records() {
        let bytes = buffer(
            b"exported by test",
            &[record(
                [0.0, 0.0, 1.0],
                [[0.0, 0.0, 0.0], [1.5, 0.0, 0.0], [0.0, 2.5, 0.0]],
                7,
            )],
        );
        let facets = BinaryFacets::new(&bytes).unwrap();
        assert_eq!(facets.declared_count(), 1);
        let triangles: Vec<_> = facets.collect::<Result<_, _>>().unwrap();
        assert_eq!(triangles.len(), 1);
        assert_eq!(triangles[0].vertices[1], Point3::new(1.5, 0.0, 0.0));
        assert_eq!(triangles[0].vertices[2], Point3::new(0.0, 2.5, 0.0));
        assert_eq!(triangles[0].normal, Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(triangles[0].attribute, 7);
        assert_eq!(header_name(&bytes).as_deref(), Some("exported by test"));
    }

    #[test]
    fn test_truncated_layout() {
        let mut bytes = vec![0u8; 500];
        bytes[80..84].copy_from_slice(&100u32.to_le_bytes());
        assert_eq!(
            BinaryFacets::new(&bytes).err(),
            Some(ParseError::Truncated {
                declared: 100,
                expected_len: 5084,
                actual_len: 500,
            })
        );

        let short = vec![0u8; 40];
        assert!(matches!(
            BinaryFacets::new(&short),
            Err(ParseError::Truncated {
                declared: 0,
                expected_len: 84,
                actual_len: 40
            })
        ));
    }

    #[test]
    fn test_non_finite_vertex_stops_iteration() {
        let good = record([0.0; 3], [[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]], 0);
        let bad = record(
            [0.0; 3],
            [[0.0; 3], [f32::INFINITY, 0.0, 0.0], [0.0, 1.0, 0.0]],
            0,
        );
        let bytes = buffer(b"", &[good.clone(), bad, good]);
        let mut facets = BinaryFacets::new(&bytes).unwrap();
        assert!(facets.next().unwrap().is_ok());
        assert_eq!(
            facets.next().unwrap(),
            Err(ParseError::NonFiniteValue {
                triangle: 1,
                vertex: 1
            })
        );
        assert!(facets.next().is_none());
    }

    #[test]
    fn test_non_finite_normal_is_zeroed() {
        let bytes = buffer(
            b"",
            &[record(
                [f32::NAN, 0.0, 0.0],
                [[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
                0,
            )],
        );
        let triangle = BinaryFacets::new(&bytes).unwrap().next().unwrap().unwrap();
        assert_eq!(triangle.normal, Vector3::zeros());
    }

    #[test]
    fn test_header_name() {
        assert_eq!(header_name(&[0u8; 84]), None);
        let mut bytes = vec![b' '; 84];
        bytes[..5].copy_from_slice(b"part1");
        assert_eq!(header_name(&bytes).as_deref(), Some("part1"));
        bytes[10] = 0x07;
        assert_eq!(header_name(&bytes), None);
    }
}
