//! Validation of parsed meshes and print parameters
//!
//! This module contains the checks that run between analysis and pricing:
//! - Whether an object's bounding dimensions fit a printer's build envelope
//! - Whether user-selected print parameters are inside the ranges the quote
//!   calculator accepts
//!
//! Neither check clamps its input. Out-of-range values are reported back to the
//! caller, which decides how to present them.

mod build_volume;
mod params;

pub use build_volume::check_fit;
pub use params::{validate_infill, validate_print_parameters, validate_quantity};
