//! Geometry analysis results

use super::core::BoundingBox;

/// Bounding dimensions of a mesh in millimeters, rounded to one decimal
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
    /// Size along X
    pub x: f64,
    /// Size along Y
    pub y: f64,
    /// Size along Z
    pub z: f64,
}

impl Dimensions {
    /// Create dimensions from per-axis sizes
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Longest axis
    pub fn max_extent(&self) -> f64 {
        self.x.max(self.y).max(self.z)
    }

    /// Sizes as an `[x, y, z]` array
    pub fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}×{:.1}×{:.1}mm", self.x, self.y, self.z)
    }
}

/// Winding orientation inferred from the sign of the signed volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Normals point out of the solid (positive signed volume)
    Outward,
    /// Normals point into the solid (negative signed volume); the absolute
    /// volume is still reported
    Inward,
    /// Signed volume is ~0, orientation cannot be inferred
    Indeterminate,
}

/// Raised alongside a successful analysis when the enclosed volume is ~0
/// even though triangles are present
///
/// This usually means the mesh is open, non-manifold, flat, or has
/// inconsistently wound triangles. The volume integral is only exact for
/// closed, consistently oriented surfaces.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DegenerateMeshWarning {
    /// Signed volume that triggered the warning (mm³)
    pub signed_volume_mm3: f64,
    /// Triangle count of the analyzed mesh
    pub triangle_count: usize,
}

impl std::fmt::Display for DegenerateMeshWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "mesh with {} triangle(s) encloses no measurable volume ({:e} mm³); \
             it is likely open, flat, or inconsistently wound",
            self.triangle_count, self.signed_volume_mm3
        )
    }
}

/// Geometric properties of a mesh
///
/// A derived value: recompute it whenever the mesh changes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisResult {
    /// Enclosed volume in cm³ (non-negative)
    pub volume_cm3: f64,
    /// Bounding dimensions in mm, rounded to 0.1 mm
    pub dimensions: Dimensions,
    /// Number of triangles (positive)
    pub triangle_count: usize,
    /// Total surface area in mm²
    pub surface_area_mm2: f64,
    /// Unrounded axis-aligned bounding box
    pub bounding_box: BoundingBox,
    /// Signed volume in mm³ before taking the absolute value
    pub signed_volume_mm3: f64,
    /// Orientation inferred from the signed volume
    pub orientation: Orientation,
    /// Set when the volume is ~0 despite triangles being present
    pub warning: Option<DegenerateMeshWarning>,
}

impl AnalysisResult {
    /// Enclosed volume in mm³
    pub fn volume_mm3(&self) -> f64 {
        self.volume_cm3 * 1000.0
    }

    /// Surface area in cm²
    pub fn surface_area_cm2(&self) -> f64 {
        self.surface_area_mm2 / 100.0
    }

    /// Whether a [`DegenerateMeshWarning`] was raised
    pub fn is_degenerate(&self) -> bool {
        self.warning.is_some()
    }
}
