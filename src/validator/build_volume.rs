//! Build envelope fit check

use crate::model::{Axis, AxisOverflow, BuildEnvelope, BuildFitReport, Dimensions};

/// Check whether an object with the given dimensions fits the build envelope
///
/// An axis fits when its dimension is less than or equal to the envelope
/// limit, so an object exactly as large as the envelope fits. Every axis that
/// does not fit is reported with its excess, in X, Y, Z order.
///
/// # Example
///
/// ```
/// use stlquote::{BuildEnvelope, Dimensions, check_fit};
///
/// let report = check_fit(&Dimensions::new(300.0, 100.0, 100.0), &BuildEnvelope::default());
/// assert!(!report.fits);
/// assert_eq!(report.overflows.len(), 1);
/// assert_eq!(report.overflows[0].excess, 44.0);
/// ```
pub fn check_fit(dimensions: &Dimensions, envelope: &BuildEnvelope) -> BuildFitReport {
    let sizes = dimensions.as_array();

    let overflows: Vec<AxisOverflow> = Axis::ALL
        .iter()
        .zip(sizes)
        .filter_map(|(&axis, actual)| {
            let limit = envelope.limit(axis);
            (actual > limit).then(|| AxisOverflow {
                axis,
                actual,
                limit,
                excess: actual - limit,
            })
        })
        .collect();

    if !overflows.is_empty() {
        log::debug!(
            "Object {} does not fit build envelope {}",
            dimensions,
            envelope
        );
    }

    BuildFitReport {
        fits: overflows.is_empty(),
        overflows,
    }
}
