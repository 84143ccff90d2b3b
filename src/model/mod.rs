//! Data structures for meshes, analysis results, materials and quotes

mod analysis;
mod build;
mod core;
mod material;
mod quote;

pub use analysis::{AnalysisResult, DegenerateMeshWarning, Dimensions, Orientation};
pub use build::{Axis, AxisOverflow, BuildEnvelope, BuildFitReport};
pub use core::{BoundingBox, Mesh, StlEncoding, Triangle};
pub use material::{InfillProfile, Material, MaterialCatalog, PrintParameters};
pub use quote::Quote;
