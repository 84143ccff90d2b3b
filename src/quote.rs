//! Print quote calculation
//!
//! Turns an [`AnalysisResult`] plus user-selected [`PrintParameters`] into an
//! itemized [`Quote`]. The model is intentionally simple:
//!
//! ```text
//! weight      = volume_cm3 * infill * density
//! material    = weight * price_per_gram
//! hours       = volume_cm3 * base_rate * (0.3 + 0.7 * infill) * complexity
//! complexity  = min(1.5, triangles / 10 000)
//! total       = (material + hours * hourly_rate + setup) * quantity
//! ```
//!
//! All rates come from [`EngineConfig`] and the material catalog.

use crate::config::EngineConfig;
use crate::error::ValidationError;
use crate::model::{AnalysisResult, MaterialCatalog, PrintParameters, Quote};
use crate::validator;

/// Share of the print time spent on walls and top/bottom layers, independent of infill
const FIXED_TIME_SHARE: f64 = 0.3;

/// Share of the print time that scales with the infill fraction
const INFILL_TIME_SHARE: f64 = 0.7;

/// Triangle count at which the complexity factor reaches 1.0
const COMPLEXITY_TRIANGLES: f64 = 10_000.0;

/// Upper bound of the complexity factor
const MAX_COMPLEXITY: f64 = 1.5;

/// Compute a quote for an analyzed mesh
///
/// Fails with a [`ValidationError`] if the configuration, the infill, the
/// quantity or the material is out of range, or if the analysis carries a
/// non-finite or negative volume or surface area. Nothing is clamped.
///
/// # Example
///
/// ```
/// use stlquote::{EngineConfig, MaterialCatalog, quote};
/// # use stlquote::{AnalysisResult, BoundingBox, Dimensions, Orientation};
/// # use nalgebra::Point3;
/// # let analysis = AnalysisResult {
/// #     volume_cm3: 10.0,
/// #     dimensions: Dimensions::new(20.0, 25.0, 20.0),
/// #     triangle_count: 20_000,
/// #     surface_area_mm2: 2800.0,
/// #     bounding_box: BoundingBox::from_point(Point3::origin()),
/// #     signed_volume_mm3: 10_000.0,
/// #     orientation: Orientation::Outward,
/// #     warning: None,
/// # };
///
/// let catalog = MaterialCatalog::example();
/// let params = catalog.parameters("pla", 20.0, 1)?;
/// let quote = quote(&analysis, &params, &EngineConfig::default())?;
///
/// assert!((quote.print_time_hours - 3.96).abs() < 1e-9);
/// assert!((quote.total - 64.724).abs() < 1e-9);
/// # Ok::<(), stlquote::ValidationError>(())
/// ```
pub fn quote(
    analysis: &AnalysisResult,
    params: &PrintParameters<'_>,
    config: &EngineConfig,
) -> Result<Quote, ValidationError> {
    config.validate()?;
    validator::validate_print_parameters(params, config)?;
    check_analysis(analysis)?;

    let material = params.material;
    let infill = params.infill_fraction();
    let quantity = f64::from(params.quantity);

    let unit_weight = analysis.volume_cm3 * infill * material.density;
    let unit_material_cost = unit_weight * material.price_per_gram;

    let infill_time_factor = FIXED_TIME_SHARE + infill * INFILL_TIME_SHARE;
    let unit_hours = analysis.volume_cm3
        * config.base_hours_per_cm3()
        * infill_time_factor
        * complexity_factor(analysis.triangle_count);
    let unit_print_time_cost = unit_hours * config.hourly_rate();

    let setup_cost = config.setup_cost();
    let total = (unit_material_cost + unit_print_time_cost + setup_cost) * quantity;

    log::debug!(
        "Quote: {} x{} at {}% infill = {:.2}",
        material.id,
        params.quantity,
        params.infill_percent,
        total
    );

    Ok(Quote {
        material_cost: unit_material_cost * quantity,
        print_time_cost: unit_print_time_cost * quantity,
        setup_cost,
        total,
        material_weight_grams: unit_weight * quantity,
        print_time_hours: unit_hours * quantity,
        unit_material_cost,
        unit_print_time_cost,
        quantity: params.quantity,
        material_id: material.id.clone(),
        infill_profile: params.infill_profile(),
    })
}

/// Resolve a material by id in `catalog` and compute a quote
pub fn quote_by_id(
    analysis: &AnalysisResult,
    catalog: &MaterialCatalog,
    material_id: &str,
    infill_percent: f64,
    quantity: u32,
    config: &EngineConfig,
) -> Result<Quote, ValidationError> {
    let params = catalog.parameters(material_id, infill_percent, quantity)?;
    quote(analysis, &params, config)
}

fn check_analysis(analysis: &AnalysisResult) -> Result<(), ValidationError> {
    let metrics = [
        ("volume", analysis.volume_cm3),
        ("surface area", analysis.surface_area_mm2),
    ];
    for (name, value) in metrics {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::InvalidAnalysis(format!(
                "{} is {}",
                name, value
            )));
        }
    }
    Ok(())
}

/// Print-time multiplier for mesh detail, capped at [`MAX_COMPLEXITY`]
fn complexity_factor(triangle_count: usize) -> f64 {
    (triangle_count as f64 / COMPLEXITY_TRIANGLES).min(MAX_COMPLEXITY)
}
