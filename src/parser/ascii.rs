//! ASCII STL decoding
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```
//!
//! Keywords are case-insensitive and tokens may be separated by any
//! whitespace. Several `solid ... endsolid` blocks may follow each other.

use nalgebra::{Point3, Vector3};

use crate::error::ParseError;
use crate::model::Triangle;

/// Interpret a buffer as ASCII STL text
///
/// Rejects invalid UTF-8 and embedded NUL bytes, and strips a leading BOM.
pub fn as_text(bytes: &[u8]) -> Result<&str, ParseError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ParseError::invalid_encoding(0, format!("not valid UTF-8 text: {}", e)))?;
    if text.contains('\0') {
        return Err(ParseError::invalid_encoding(0, "text contains NUL bytes"));
    }
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}

/// Whitespace tokenizer that tracks 1-based line numbers
struct Tokens<'a> {
    lines: std::str::Lines<'a>,
    current: std::str::SplitWhitespace<'a>,
    /// Token read past the end of a name, returned by the next call to `next`
    pending: Option<&'a str>,
    line: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            current: "".split_whitespace(),
            pending: None,
            line: 0,
        }
    }

    fn next(&mut self) -> Option<&'a str> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }
        loop {
            if let Some(token) = self.current.next() {
                return Some(token);
            }
            let line = self.lines.next()?;
            self.line += 1;
            self.current = line.split_whitespace();
        }
    }

    /// Remaining tokens of the current line joined by single spaces
    ///
    /// The name ends early at any of the `stop` keywords, which is left for
    /// the next call to `next`. This lets a whole solid sit on one line.
    fn name(&mut self, stop: &[&str]) -> String {
        let mut words = Vec::new();
        for token in self.current.by_ref() {
            if stop.iter().any(|k| token.eq_ignore_ascii_case(k)) {
                self.pending = Some(token);
                break;
            }
            words.push(token);
        }
        words.join(" ")
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<(), ParseError> {
        match self.next() {
            Some(token) if token.eq_ignore_ascii_case(keyword) => Ok(()),
            Some(token) => Err(ParseError::invalid_encoding(
                self.line,
                format!("expected '{}', found '{}'", keyword, token),
            )),
            None => Err(self.unexpected_eof(keyword)),
        }
    }

    fn number(&mut self, what: &str) -> Result<f64, ParseError> {
        let token = self.next().ok_or_else(|| self.unexpected_eof(what))?;
        token.parse::<f64>().map_err(|_| {
            ParseError::invalid_encoding(
                self.line,
                format!("expected {} as a number, found '{}'", what, token),
            )
        })
    }

    fn vec3(&mut self, what: &str) -> Result<Vector3<f64>, ParseError> {
        Ok(Vector3::new(
            self.number(what)?,
            self.number(what)?,
            self.number(what)?,
        ))
    }

    fn unexpected_eof(&self, expected: &str) -> ParseError {
        ParseError::invalid_encoding(
            self.line,
            format!("unexpected end of file, expected '{}'", expected),
        )
    }
}

/// Keywords that end a solid name written on the same line as its body
const BODY_KEYWORDS: &[&str] = &["facet", "endsolid"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    InSolid,
    AfterSolid,
    Done,
}

/// Iterator over the facets of an ASCII STL document
///
/// Stops after the first error.
pub struct AsciiFacets<'a> {
    tokens: Tokens<'a>,
    state: State,
    index: usize,
    name: Option<String>,
}

impl<'a> AsciiFacets<'a> {
    /// Read the opening `solid` line and position at the first facet
    pub fn new(text: &'a str) -> Result<Self, ParseError> {
        let mut tokens = Tokens::new(text);
        match tokens.next() {
            Some(token) if token.eq_ignore_ascii_case("solid") => {}
            Some(token) => {
                return Err(ParseError::invalid_encoding(
                    tokens.line,
                    format!("expected 'solid', found '{}'", truncate(token)),
                ));
            }
            None => return Err(ParseError::invalid_encoding(0, "no 'solid' header found")),
        }
        let name = tokens.name(BODY_KEYWORDS);

        Ok(Self {
            tokens,
            state: State::InSolid,
            index: 0,
            name: (!name.is_empty()).then_some(name),
        })
    }

    /// Name following the first `solid` keyword
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn advance(&mut self) -> Result<Option<Triangle>, ParseError> {
        loop {
            match self.state {
                State::Done => return Ok(None),
                State::InSolid => match self.tokens.next() {
                    Some(t) if t.eq_ignore_ascii_case("facet") => {
                        return self.facet().map(Some);
                    }
                    Some(t) if t.eq_ignore_ascii_case("endsolid") => {
                        self.tokens.name(&["solid"]);
                        self.state = State::AfterSolid;
                    }
                    Some(t) => {
                        return Err(ParseError::invalid_encoding(
                            self.tokens.line,
                            format!("expected 'facet' or 'endsolid', found '{}'", truncate(t)),
                        ));
                    }
                    None => return Err(self.tokens.unexpected_eof("endsolid")),
                },
                State::AfterSolid => match self.tokens.next() {
                    Some(t) if t.eq_ignore_ascii_case("solid") => {
                        self.tokens.name(BODY_KEYWORDS);
                        self.state = State::InSolid;
                    }
                    Some(t) => {
                        return Err(ParseError::invalid_encoding(
                            self.tokens.line,
                            format!("unexpected '{}' after 'endsolid'", truncate(t)),
                        ));
                    }
                    None => {
                        self.state = State::Done;
                        return Ok(None);
                    }
                },
            }
        }
    }

    /// Parse the remainder of a facet after the `facet` keyword
    fn facet(&mut self) -> Result<Triangle, ParseError> {
        let index = self.index;
        self.index += 1;

        self.tokens.expect_keyword("normal")?;
        let normal = self.tokens.vec3("normal component")?;
        let normal = if normal.iter().all(|&c| fits_f32(c)) {
            normal
        } else {
            Vector3::zeros()
        };

        self.tokens.expect_keyword("outer")?;
        self.tokens.expect_keyword("loop")?;

        let mut vertices = [Point3::origin(); 3];
        for (i, vertex) in vertices.iter_mut().enumerate() {
            self.tokens.expect_keyword("vertex")?;
            let v = self.tokens.vec3("vertex coordinate")?;
            if !v.iter().all(|&c| fits_f32(c)) {
                return Err(ParseError::NonFiniteValue {
                    triangle: index,
                    vertex: i,
                });
            }
            *vertex = Point3::from(v);
        }

        self.tokens.expect_keyword("endloop")?;
        self.tokens.expect_keyword("endfacet")?;

        Ok(Triangle {
            vertices,
            normal,
            attribute: 0,
        })
    }
}

impl Iterator for AsciiFacets<'_> {
    type Item = Result<Triangle, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(Some(triangle)) => Some(Ok(triangle)),
            Ok(None) => None,
            Err(e) => {
                self.state = State::Done;
                Some(Err(e))
            }
        }
    }
}

/// Finite both as parsed and once stored as a 32-bit STL float
fn fits_f32(value: f64) -> bool {
    (value as f32).is_finite()
}

/// Shorten a token for error messages
fn truncate(token: &str) -> &str {
    match token.char_indices().nth(32) {
        Some((idx, _)) => &token[..idx],
        None => token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "solid test
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid test
";

    fn collect(text: &str) -> Result<Vec<Triangle>, ParseError> {
        AsciiFacets::new(text)?.collect()
    }

    #[test]
    fn test_single_facet() {
        let facets = AsciiFacets::new(TRIANGLE).unwrap();
        assert_eq!(facets.name(), Some("test"));
        let triangles: Vec<_> = facets.collect::<Result<_, _>>().unwrap();
        assert_eq!(triangles.len(), 1);
        assert_eq!(triangles[0].vertices[1], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(triangles[0].normal, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_whitespace_and_case_tolerance() {
        let text = "SOLID\r\nFacet Normal 0 0 1 Outer Loop\r\n\tvertex 0 0 0 vertex 1.5e1 0 0\n\n vertex 0 1 0\nENDLOOP ENDFACET\r\nEndSolid";
        let triangles = collect(text).unwrap();
        assert_eq!(triangles.len(), 1);
        assert_eq!(triangles[0].vertices[1], Point3::new(15.0, 0.0, 0.0));
    }

    #[test]
    fn test_multiple_solids() {
        let text = format!("{}{}", TRIANGLE, TRIANGLE.replace("solid test", "solid other"));
        assert_eq!(collect(&text).unwrap().len(), 2);
    }

    #[test]
    fn test_solid_name_with_spaces() {
        let text = TRIANGLE.replace("solid test", "solid my part v2");
        let facets = AsciiFacets::new(&text).unwrap();
        assert_eq!(facets.name(), Some("my part v2"));
    }

    #[test]
    fn test_missing_solid_header() {
        let err = collect("facet normal 0 0 1").unwrap_err();
        assert!(matches!(err, ParseError::InvalidEncoding { line: 1, .. }));
        let err = collect("   \n  ").unwrap_err();
        assert!(matches!(err, ParseError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_malformed_number_reports_line() {
        let text = TRIANGLE.replace("vertex 1 0 0", "vertex 1 zero 0");
        let err = collect(&text).unwrap_err();
        match err {
            ParseError::InvalidEncoding { line, message } => {
                assert_eq!(line, 5);
                assert!(message.contains("'zero'"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_keyword() {
        let text = TRIANGLE.replace("    endloop\n", "");
        let err = collect(&text).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidEncoding { ref message, .. } if message.contains("'endloop'")
        ));
    }

    #[test]
    fn test_unexpected_eof() {
        let text = "solid t\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\n";
        let err = collect(text).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidEncoding { ref message, .. } if message.contains("end of file")
        ));

        let err = collect("solid t\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidEncoding { .. }));
    }

    #[test]
    fn test_non_finite_vertex() {
        let text = TRIANGLE.replace("vertex 0 1 0", "vertex 0 nan 0");
        assert_eq!(
            collect(&text).unwrap_err(),
            ParseError::NonFiniteValue {
                triangle: 0,
                vertex: 2
            }
        );
        let text = TRIANGLE.replace("vertex 1 0 0", "vertex inf 0 0");
        assert!(matches!(
            collect(&text).unwrap_err(),
            ParseError::NonFiniteValue { vertex: 1, .. }
        ));
    }

    #[test]
    fn test_single_line_solid() {
        let text = "solid t facet normal 0 0 1 outer loop vertex 0 0 0 vertex 1 0 0 vertex 0 1 0 endloop endfacet endsolid t";
        let facets = AsciiFacets::new(text).unwrap();
        assert_eq!(facets.name(), Some("t"));
        let triangles: Vec<_> = facets.collect::<Result<_, _>>().unwrap();
        assert_eq!(triangles.len(), 1);
        assert_eq!(triangles[0].vertices[2], Point3::new(0.0, 1.0, 0.0));

        // Unnamed, and a second solid on the same line
        let one = "facet normal 0 0 1 outer loop vertex 0 0 0 vertex 1 0 0 vertex 0 1 0 endloop endfacet";
        let text = format!("solid {one} endsolid solid b {one} {one} endsolid b");
        let facets = AsciiFacets::new(&text).unwrap();
        assert_eq!(facets.name(), None);
        assert_eq!(facets.count(), 3);

        let empty = AsciiFacets::new("solid e endsolid e").unwrap();
        assert_eq!(empty.name(), Some("e"));
        assert_eq!(empty.count(), 0);
    }

    #[test]
    fn test_coordinate_outside_f32_range() {
        let text = TRIANGLE.replace("vertex 0 1 0", "vertex 0 1e200 0");
        assert_eq!(
            collect(&text).unwrap_err(),
            ParseError::NonFiniteValue {
                triangle: 0,
                vertex: 2
            }
        );
        let text = TRIANGLE.replace("vertex 1 0 0", "vertex -4e38 0 0");
        assert!(matches!(
            collect(&text).unwrap_err(),
            ParseError::NonFiniteValue { vertex: 1, .. }
        ));

        // Largest f32 magnitudes are still accepted
        let text = TRIANGLE.replace("vertex 1 0 0", "vertex 3e38 0 0");
        assert_eq!(collect(&text).unwrap()[0].vertices[1].x, 3e38);

        let text = TRIANGLE.replace("normal 0 0 1", "normal 0 0 1e300");
        assert_eq!(collect(&text).unwrap()[0].normal, Vector3::zeros());
    }

    #[test]
    fn test_non_finite_normal_is_zeroed() {
        let text = TRIANGLE.replace("normal 0 0 1", "normal nan nan nan");
        let triangles = collect(&text).unwrap();
        assert_eq!(triangles[0].normal, Vector3::zeros());
    }

    #[test]
    fn test_empty_solid_yields_nothing() {
        assert!(collect("solid empty\nendsolid empty\n").unwrap().is_empty());
    }

    #[test]
    fn test_garbage_after_endsolid() {
        let text = format!("{}trailing", TRIANGLE);
        assert!(collect(&text).is_err());
    }

    #[test]
    fn test_as_text() {
        assert_eq!(as_text(b"\xEF\xBB\xBFsolid a").unwrap(), "solid a");
        assert!(as_text(b"solid \xFF").is_err());
        assert!(as_text(b"solid\0").is_err());
    }
}
