//! Build envelope and fit report types

/// A coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
}

impl Axis {
    /// All axes in X, Y, Z order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Upper-case axis letter
    pub fn name(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// The largest box a printer can produce in one print, in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildEnvelope {
    /// Usable size along X
    pub x: f64,
    /// Usable size along Y
    pub y: f64,
    /// Usable size along Z
    pub z: f64,
}

impl BuildEnvelope {
    /// Default build plate edge length in mm
    pub const DEFAULT_SIZE: f64 = 256.0;

    /// Create an envelope from per-axis sizes
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A cubic envelope
    pub fn cube(size: f64) -> Self {
        Self::new(size, size, size)
    }

    /// Limit along `axis`
    pub fn limit(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

impl Default for BuildEnvelope {
    fn default() -> Self {
        Self::cube(Self::DEFAULT_SIZE)
    }
}

impl std::fmt::Display for BuildEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}×{}×{} mm", self.x, self.y, self.z)
    }
}

/// One axis on which an object exceeds the build envelope
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisOverflow {
    /// The exceeding axis
    pub axis: Axis,
    /// Object size along the axis
    pub actual: f64,
    /// Envelope limit along the axis
    pub limit: f64,
    /// `actual - limit`, always positive
    pub excess: f64,
}

/// Result of checking an object against a build envelope
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildFitReport {
    /// Whether the object fits on every axis
    pub fits: bool,
    /// Exceeding axes in X, Y, Z order; empty when `fits` is true
    pub overflows: Vec<AxisOverflow>,
}

impl BuildFitReport {
    /// Overflow entry for `axis`, if that axis exceeds the envelope
    pub fn overflow(&self, axis: Axis) -> Option<&AxisOverflow> {
        self.overflows.iter().find(|o| o.axis == axis)
    }

    /// A one-line message suitable for showing next to the upload
    pub fn summary(&self) -> String {
        if self.fits {
            return "Part fits on the build plate".to_string();
        }
        let axes: Vec<String> = self
            .overflows
            .iter()
            .map(|o| {
                format!(
                    "{}: {:.1}mm > {}mm (+{:.1}mm)",
                    o.axis.name(),
                    o.actual,
                    o.limit,
                    o.excess
                )
            })
            .collect();
        format!("Exceeds the build plate ({})", axes.join(", "))
    }
}

impl std::fmt::Display for BuildFitReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}
