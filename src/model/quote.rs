//! Quote record

use super::material::InfillProfile;

/// Itemized cost estimate for printing a mesh
///
/// Costs are in the currency of the material catalog and the engine
/// configuration. A derived value, never persisted by the engine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quote {
    /// Material cost for all copies
    pub material_cost: f64,
    /// Machine time cost for all copies
    pub print_time_cost: f64,
    /// Fixed setup fee as configured (charged per copy in `total`)
    pub setup_cost: f64,
    /// `(unit_material_cost + unit_print_time_cost + setup_cost) * quantity`
    pub total: f64,
    /// Filament weight for all copies, in grams
    pub material_weight_grams: f64,
    /// Estimated print time for all copies, in hours
    pub print_time_hours: f64,
    /// Material cost of one copy
    pub unit_material_cost: f64,
    /// Machine time cost of one copy
    pub unit_print_time_cost: f64,
    /// Number of copies
    pub quantity: u32,
    /// Id of the quoted material
    pub material_id: String,
    /// Infill tier of the quoted infill
    pub infill_profile: InfillProfile,
}

impl Quote {
    /// Cost of one copy including the setup fee
    pub fn unit_total(&self) -> f64 {
        self.unit_material_cost + self.unit_print_time_cost + self.setup_cost
    }
}
