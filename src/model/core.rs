//! Core mesh types

use nalgebra::{Point3, Vector3};

use crate::error::ParseError;

/// STL encoding variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StlEncoding {
    /// 80-byte header, u32 count, 50-byte little-endian records
    Binary,
    /// `solid ... endsolid` text
    Ascii,
}

impl StlEncoding {
    /// Get a human-readable name for this encoding
    pub fn name(&self) -> &'static str {
        match self {
            StlEncoding::Binary => "binary",
            StlEncoding::Ascii => "ASCII",
        }
    }
}

impl std::fmt::Display for StlEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A triangle with its three vertex positions in millimeters
///
/// STL stores every facet with its own copy of the vertices, so there is no
/// shared vertex table as in indexed formats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertex positions in file order (the winding)
    pub vertices: [Point3<f64>; 3],
    /// Facet normal as stored in the file, zero when absent or non-finite
    pub normal: Vector3<f64>,
    /// Binary attribute byte count word (0 for ASCII files)
    pub attribute: u16,
}

impl Triangle {
    /// Create a triangle from three vertices with a zero normal
    pub fn new(v1: Point3<f64>, v2: Point3<f64>, v3: Point3<f64>) -> Self {
        Self {
            vertices: [v1, v2, v3],
            normal: Vector3::zeros(),
            attribute: 0,
        }
    }

    /// Set the stored facet normal
    pub fn with_normal(mut self, normal: Vector3<f64>) -> Self {
        self.normal = normal;
        self
    }

    /// Set the binary attribute word
    pub fn with_attribute(mut self, attribute: u16) -> Self {
        self.attribute = attribute;
        self
    }

    /// Returns the triangle with its winding reversed
    pub fn flipped(&self) -> Self {
        let [a, b, c] = self.vertices;
        Self {
            vertices: [a, c, b],
            normal: -self.normal,
            attribute: self.attribute,
        }
    }

    /// Index of the first vertex with a NaN or infinite coordinate
    pub(crate) fn first_non_finite_vertex(&self) -> Option<usize> {
        self.vertices
            .iter()
            .position(|v| !(v.x.is_finite() && v.y.is_finite() && v.z.is_finite()))
    }
}

/// A triangle mesh decoded from one STL file
///
/// Invariant: a `Mesh` always holds at least one triangle, and every vertex
/// coordinate is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    encoding: StlEncoding,
    name: Option<String>,
}

impl Mesh {
    /// Create a mesh from a list of triangles
    ///
    /// Fails with [`ParseError::EmptyMesh`] if `triangles` is empty and with
    /// [`ParseError::NonFiniteValue`] if any vertex coordinate is NaN or infinite.
    pub fn from_triangles(
        triangles: Vec<Triangle>,
        encoding: StlEncoding,
    ) -> Result<Self, ParseError> {
        if triangles.is_empty() {
            return Err(ParseError::EmptyMesh);
        }

        for (index, triangle) in triangles.iter().enumerate() {
            if let Some(vertex) = triangle.first_non_finite_vertex() {
                return Err(ParseError::NonFiniteValue {
                    triangle: index,
                    vertex,
                });
            }
        }

        Ok(Self {
            triangles,
            encoding,
            name: None,
        })
    }

    /// Attach a name (ASCII solid name or binary header text)
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name.filter(|n| !n.is_empty());
        self
    }

    /// Triangles in file order
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of triangles, always positive
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Encoding the mesh was decoded from
    pub fn encoding(&self) -> StlEncoding {
        self.encoding
    }

    /// Solid name or header text, if the file carried one
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Consume the mesh and return its triangles
    pub fn into_triangles(self) -> Vec<Triangle> {
        self.triangles
    }

    /// Returns a copy with every vertex multiplied by `factor`
    ///
    /// Useful for unit conversion, e.g. `25.4` for files exported in inches.
    /// Normals are kept; a negative factor flips orientation.
    pub fn scaled(&self, factor: f64) -> Self {
        self.map_vertices(|p| Point3::from(p.coords * factor))
    }

    /// Returns a copy translated by `(dx, dy, dz)`
    pub fn translated(&self, dx: f64, dy: f64, dz: f64) -> Self {
        let offset = Vector3::new(dx, dy, dz);
        self.map_vertices(|p| p + offset)
    }

    fn map_vertices<F: Fn(&Point3<f64>) -> Point3<f64>>(&self, f: F) -> Self {
        let triangles = self
            .triangles
            .iter()
            .map(|t| Triangle {
                vertices: [f(&t.vertices[0]), f(&t.vertices[1]), f(&t.vertices[2])],
                normal: t.normal,
                attribute: t.attribute,
            })
            .collect();

        Self {
            triangles,
            encoding: self.encoding,
            name: self.name.clone(),
        }
    }
}

/// An axis-aligned bounding box
///
/// Invariant: `min <= max` componentwise.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// Minimum corner
    pub min: Point3<f64>,
    /// Maximum corner
    pub max: Point3<f64>,
}

impl BoundingBox {
    /// A degenerate box containing a single point
    pub fn from_point(point: Point3<f64>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Smallest box containing every point, or `None` for an empty iterator
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3<f64>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Self::from_point(*first);
        for p in iter {
            bbox.include(p);
        }
        Some(bbox)
    }

    /// Grow the box to contain `point`
    pub fn include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Size along each axis (`max - min`)
    pub fn extents(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Center point
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Whether `point` lies inside or on the boundary
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }
}
