//! Materials, material catalogs and print parameters

use crate::error::ValidationError;

/// A printable material
///
/// Catalog entries are supplied by the caller; the engine never hardcodes
/// prices or densities into its pricing logic.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    /// Stable identifier (e.g. "pla")
    pub id: String,
    /// Display name
    pub name: String,
    /// Price per gram in currency units
    pub price_per_gram: f64,
    /// Density in g/cm³
    pub density: f64,
    /// Short description for display
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl Material {
    /// Create a new material
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price_per_gram: f64,
        density: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price_per_gram,
            density,
            description: String::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check that price and density are positive finite numbers
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.price_per_gram.is_finite() && self.price_per_gram > 0.0) {
            return Err(ValidationError::InvalidMaterial {
                id: self.id.clone(),
                message: format!(
                    "price per gram must be a positive number, got {}",
                    self.price_per_gram
                ),
            });
        }
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(ValidationError::InvalidMaterial {
                id: self.id.clone(),
                message: format!("density must be a positive number, got {}", self.density),
            });
        }
        Ok(())
    }
}

/// An ordered, caller-supplied list of materials
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MaterialCatalog {
    materials: Vec<Material>,
}

impl MaterialCatalog {
    /// Create a catalog from materials in display order
    pub fn new(materials: Vec<Material>) -> Self {
        Self { materials }
    }

    /// Example catalog with common FDM filaments
    ///
    /// Meant for tests and demos; production callers load their own catalog.
    pub fn example() -> Self {
        Self::new(vec![
            Material::new("pla", "PLA", 0.05, 1.24)
                .with_description("Biodegradable, easy to print"),
            Material::new("petg", "PETG", 0.07, 1.27)
                .with_description("Transparent, impact resistant"),
            Material::new("abs", "ABS", 0.06, 1.04).with_description("Durable, heat resistant"),
            Material::new("tpu", "TPU", 0.12, 1.2).with_description("Flexible, elastic"),
        ])
    }

    /// Load a catalog from a JSON array of materials
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        for material in &catalog.materials {
            material.validate()?;
        }
        Ok(catalog)
    }

    /// Look up a material by id
    pub fn get(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    /// Look up a material by id, failing with [`ValidationError::UnknownMaterial`]
    pub fn require(&self, id: &str) -> Result<&Material, ValidationError> {
        self.get(id)
            .ok_or_else(|| ValidationError::UnknownMaterial(id.to_string()))
    }

    /// Build print parameters for the material with `id`
    pub fn parameters(
        &self,
        id: &str,
        infill_percent: f64,
        quantity: u32,
    ) -> Result<PrintParameters<'_>, ValidationError> {
        Ok(PrintParameters::new(
            self.require(id)?,
            infill_percent,
            quantity,
        ))
    }

    /// Materials in catalog order
    pub fn iter(&self) -> std::slice::Iter<'_, Material> {
        self.materials.iter()
    }

    /// Number of materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the catalog has no materials
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl<'a> IntoIterator for &'a MaterialCatalog {
    type Item = &'a Material;
    type IntoIter = std::slice::Iter<'a, Material>;

    fn into_iter(self) -> Self::IntoIter {
        self.materials.iter()
    }
}

/// User-chosen print settings for one quote
///
/// Ranges are checked by the quote calculator, not here, so that an
/// out-of-range value surfaces as a [`ValidationError`] instead of being
/// silently clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintParameters<'a> {
    /// Selected material
    pub material: &'a Material,
    /// Infill percentage, 1 to 100 inclusive
    pub infill_percent: f64,
    /// Number of copies, 1 to the configured maximum
    pub quantity: u32,
}

impl<'a> PrintParameters<'a> {
    /// Create print parameters
    pub fn new(material: &'a Material, infill_percent: f64, quantity: u32) -> Self {
        Self {
            material,
            infill_percent,
            quantity,
        }
    }

    /// Infill as a fraction in `(0, 1]`
    pub fn infill_fraction(&self) -> f64 {
        self.infill_percent / 100.0
    }

    /// Strength profile for the selected infill
    pub fn infill_profile(&self) -> InfillProfile {
        InfillProfile::from_percent(self.infill_percent)
    }
}

/// Infill tier shown next to the infill selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfillProfile {
    /// Up to 20 %
    Rapid,
    /// Up to 50 %
    Standard,
    /// Up to 80 %
    Strong,
    /// Above 80 %
    Solid,
}

impl InfillProfile {
    /// Classify an infill percentage
    pub fn from_percent(percent: f64) -> Self {
        if percent <= 20.0 {
            InfillProfile::Rapid
        } else if percent <= 50.0 {
            InfillProfile::Standard
        } else if percent <= 80.0 {
            InfillProfile::Strong
        } else {
            InfillProfile::Solid
        }
    }

    /// Short label
    pub fn label(&self) -> &'static str {
        match self {
            InfillProfile::Rapid => "Rapid & economical",
            InfillProfile::Standard => "Standard",
            InfillProfile::Strong => "Strong",
            InfillProfile::Solid => "Ultra-solid",
        }
    }

    /// Typical use for this tier
    pub fn description(&self) -> &'static str {
        match self {
            InfillProfile::Rapid => "Ideal for prototypes and decorative parts",
            InfillProfile::Standard => "Balance between strength and print time",
            InfillProfile::Strong => "Parts that carry significant loads",
            InfillProfile::Solid => "Maximum strength and durability",
        }
    }
}
