//! Material property presets for assembling structural systems.

use serde::{Deserialize, Serialize};

/// Linear-elastic material parameters in SI units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Preset or user-supplied label.
    pub name: String,
    /// Young's modulus in pascals.
    pub young_modulus: f64,
    /// Poisson's ratio, dimensionless.
    pub poisson_ratio: f64,
    /// Mass density in kg/m³.
    pub density: f64,
}

impl MaterialProperties {
    pub fn new(
        name: impl Into<String>,
        young_modulus: f64,
        poisson_ratio: f64,
        density: f64,
    ) -> Self {
        Self {
            name: name.into(),
            young_modulus,
            poisson_ratio,
            density,
        }
    }

    pub fn steel() -> Self {
        Self::new("steel", 200.0e9, 0.3, 7850.0)
    }

    pub fn aluminum() -> Self {
        Self::new("aluminum", 70.0e9, 0.33, 2700.0)
    }

    pub fn concrete() -> Self {
        Self::new("concrete", 30.0e9, 0.2, 2400.0)
    }

    pub fn titanium() -> Self {
        Self::new("titanium", 110.0e9, 0.34, 4500.0)
    }

    pub fn copper() -> Self {
        Self::new("copper", 110.0e9, 0.35, 8960.0)
    }

    /// Look up a preset by name, case-insensitively.
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "steel" => Some(Self::steel()),
            "aluminum" => Some(Self::aluminum()),
            "concrete" => Some(Self::concrete()),
            "titanium" => Some(Self::titanium()),
            "copper" => Some(Self::copper()),
            _ => None,
        }
    }

    /// First Lamé parameter, `E·ν / ((1+ν)(1−2ν))`.
    pub fn lame_lambda(&self) -> f64 {
        self.young_modulus * self.poisson_ratio
            / ((1.0 + self.poisson_ratio) * (1.0 - 2.0 * self.poisson_ratio))
    }

    /// Shear modulus, `E / (2(1+ν))`.
    pub fn shear_modulus(&self) -> f64 {
        self.young_modulus / (2.0 * (1.0 + self.poisson_ratio))
    }
}
