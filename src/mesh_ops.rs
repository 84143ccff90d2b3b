//! Triangle mesh geometry analysis
//!
//! This module computes the properties used for quoting and build checks:
//! - Enclosed volume via the divergence theorem
//! - Surface area
//! - Axis-aligned bounding box and rounded dimensions
//! - Face normals
//!
//! All metrics are accumulated in a single pass in `f64`. The volume is only
//! exact for closed, consistently wound (manifold) meshes; open or
//! inconsistently wound meshes yield an under- or over-stated volume, and a
//! near-zero result raises a [`DegenerateMeshWarning`] rather than an error.

use nalgebra::{Point3, Vector3};

use crate::model::{
    AnalysisResult, BoundingBox, DegenerateMeshWarning, Dimensions, Mesh, Orientation, Triangle,
};

/// Volume below `ratio * bounding_box_volume` counts as zero
const DEGENERATE_VOLUME_RATIO: f64 = 1e-9;

/// Cubic millimeters per cubic centimeter
const MM3_PER_CM3: f64 = 1000.0;

/// Running totals for a single-pass analysis
///
/// Accumulators over disjoint triangle sets can be combined with
/// [`merge`](Self::merge), which is what the parallel analyzer does.
#[derive(Debug, Clone, Default)]
pub struct MeshAccumulator {
    /// Six times the signed volume
    signed_volume6: f64,
    /// Twice the surface area
    area2: f64,
    bounds: Option<BoundingBox>,
    triangle_count: usize,
}

impl MeshAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one triangle
    pub fn push(&mut self, triangle: &Triangle) {
        let [v1, v2, v3] = &triangle.vertices;

        self.signed_volume6 += v1.coords.dot(&v2.coords.cross(&v3.coords));
        self.area2 += (v2 - v1).cross(&(v3 - v1)).norm();

        let bounds = self
            .bounds
            .get_or_insert_with(|| BoundingBox::from_point(*v1));
        bounds.include(v1);
        bounds.include(v2);
        bounds.include(v3);

        self.triangle_count += 1;
    }

    /// Combine with an accumulator over a disjoint set of triangles
    pub fn merge(mut self, other: MeshAccumulator) -> MeshAccumulator {
        self.signed_volume6 += other.signed_volume6;
        self.area2 += other.area2;
        self.triangle_count += other.triangle_count;
        self.bounds = match (self.bounds, other.bounds) {
            (Some(a), Some(b)) => Some(a.union(&b)),
            (a, b) => a.or(b),
        };
        self
    }

    /// Number of triangles pushed so far
    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    /// Signed volume of the triangles pushed so far, in mm³
    pub fn signed_volume(&self) -> f64 {
        self.signed_volume6 / 6.0
    }

    /// Surface area of the triangles pushed so far, in mm²
    pub fn surface_area(&self) -> f64 {
        self.area2 * 0.5
    }

    /// Produce the analysis result, or `None` if no triangle was pushed
    pub fn finish(self) -> Option<AnalysisResult> {
        let bounding_box = self.bounds?;
        let signed_volume_mm3 = self.signed_volume();
        let extents = bounding_box.extents();

        // A mesh with a zero extent encloses nothing, wherever it sits
        let flat = extents.min() <= 0.0;
        let box_volume = extents.x * extents.y * extents.z;
        let degenerate =
            flat || signed_volume_mm3.abs() <= DEGENERATE_VOLUME_RATIO * box_volume;

        let orientation = if degenerate {
            Orientation::Indeterminate
        } else if signed_volume_mm3 > 0.0 {
            Orientation::Outward
        } else {
            Orientation::Inward
        };

        let warning = degenerate.then(|| {
            let warning = DegenerateMeshWarning {
                signed_volume_mm3,
                triangle_count: self.triangle_count,
            };
            log::warn!("Degenerate mesh: {}", warning);
            warning
        });

        Some(AnalysisResult {
            volume_cm3: if flat {
                0.0
            } else {
                signed_volume_mm3.abs() / MM3_PER_CM3
            },
            dimensions: Dimensions::new(
                round_to_tenth(extents.x),
                round_to_tenth(extents.y),
                round_to_tenth(extents.z),
            ),
            triangle_count: self.triangle_count,
            surface_area_mm2: self.surface_area(),
            bounding_box,
            signed_volume_mm3,
            orientation,
            warning,
        })
    }
}

impl<'a> Extend<&'a Triangle> for MeshAccumulator {
    fn extend<I: IntoIterator<Item = &'a Triangle>>(&mut self, iter: I) {
        for triangle in iter {
            self.push(triangle);
        }
    }
}

/// Analyze a mesh: volume, surface area, dimensions and triangle count
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use stlquote::{Mesh, StlEncoding, Triangle, mesh_ops};
///
/// // A single triangle encloses no volume
/// let mesh = Mesh::from_triangles(
///     vec![Triangle::new(
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(10.0, 0.0, 0.0),
///         Point3::new(0.0, 10.0, 0.0),
///     )],
///     StlEncoding::Binary,
/// )?;
///
/// let analysis = mesh_ops::analyze(&mesh);
/// assert_eq!(analysis.surface_area_mm2, 50.0);
/// assert!(analysis.is_degenerate());
/// # Ok::<(), stlquote::ParseError>(())
/// ```
pub fn analyze(mesh: &Mesh) -> AnalysisResult {
    let mut acc = MeshAccumulator::new();
    acc.extend(mesh.triangles());
    finish_non_empty(acc)
}

/// Analyze a mesh with a parallel reduction over its triangles
///
/// Produces the same result as [`analyze`] up to floating-point summation
/// order.
#[cfg(feature = "parallel")]
pub fn analyze_parallel(mesh: &Mesh) -> AnalysisResult {
    use rayon::prelude::*;

    let acc = mesh
        .triangles()
        .par_iter()
        .fold(MeshAccumulator::new, |mut acc, triangle| {
            acc.push(triangle);
            acc
        })
        .reduce(MeshAccumulator::new, MeshAccumulator::merge);
    finish_non_empty(acc)
}

fn finish_non_empty(acc: MeshAccumulator) -> AnalysisResult {
    match acc.finish() {
        Some(result) => result,
        // Mesh construction guarantees at least one triangle
        None => unreachable!("Mesh always holds at least one triangle"),
    }
}

/// Compute the signed volume of a mesh using the divergence theorem
///
/// Positive for a closed mesh whose normals point outward, negative when the
/// winding is inverted. In mm³.
pub fn signed_volume(mesh: &Mesh) -> f64 {
    mesh.triangles()
        .iter()
        .map(|t| {
            let [v1, v2, v3] = &t.vertices;
            v1.coords.dot(&v2.coords.cross(&v3.coords))
        })
        .sum::<f64>()
        / 6.0
}

/// Total surface area of a mesh in mm²
pub fn surface_area(mesh: &Mesh) -> f64 {
    mesh.triangles().iter().map(triangle_area).sum()
}

/// Axis-aligned bounding box of a mesh
pub fn bounding_box(mesh: &Mesh) -> BoundingBox {
    let mut points = mesh.triangles().iter().flat_map(|t| t.vertices.iter());
    match points.next() {
        Some(first) => {
            let mut bbox = BoundingBox::from_point(*first);
            for p in points {
                bbox.include(p);
            }
            bbox
        }
        None => unreachable!("Mesh always holds at least one triangle"),
    }
}

/// Area of a single triangle
pub fn triangle_area(triangle: &Triangle) -> f64 {
    let [v1, v2, v3] = &triangle.vertices;
    (v2 - v1).cross(&(v3 - v1)).norm() * 0.5
}

/// Calculate the unit normal of a triangle from its winding
///
/// Returns the zero vector for degenerate (zero-area) triangles.
///
/// # Example
/// ```
/// use nalgebra::{Point3, Vector3};
/// use stlquote::mesh_ops::calculate_face_normal;
///
/// let normal = calculate_face_normal(
///     &Point3::new(0.0, 0.0, 0.0),
///     &Point3::new(1.0, 0.0, 0.0),
///     &Point3::new(0.0, 1.0, 0.0),
/// );
/// assert_eq!(normal, Vector3::new(0.0, 0.0, 1.0));
/// ```
pub fn calculate_face_normal(v0: &Point3<f64>, v1: &Point3<f64>, v2: &Point3<f64>) -> Vector3<f64> {
    let cross = (v1 - v0).cross(&(v2 - v0));
    let magnitude = cross.norm();
    if magnitude > 0.0 {
        cross / magnitude
    } else {
        Vector3::zeros()
    }
}

/// Round to one decimal place, half away from zero
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
