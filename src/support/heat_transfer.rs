//! Heat-transfer models for the gas side of a tube bank.
//!
//! A [`HeatTransferModel`] turns a row's Reynolds and Prandtl numbers, plus
//! the geometry and local gas state in a [`NusseltContext`], into a tube
//! Nusselt number. The variants form a closed set so each one's inputs are
//! visible in the context type rather than looked up by name at runtime.
//!
//! Some variants define the Reynolds number themselves, from the maximum
//! velocity through the diagonal or transverse gap. The marching solver asks
//! [`HeatTransferModel::reynolds`] first and falls back to the minimum flow
//! area definition when the model has none.

pub mod enhanced;
pub mod grimison;
pub mod rarefied;
pub mod zukauskas;

use serde::{Deserialize, Serialize};
use uom::si::f64::{
    Area, DynamicViscosity, Length, MassDensity, MassRate, MolarMass, ThermodynamicTemperature,
};

use crate::support::correlations::CorrelationError;

pub use grimison::CoefficientMethod;

/// The gas-side tube Nusselt correlation used by a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum HeatTransferModel {
    /// Grimison (1937) table correlation.
    Grimison {
        #[serde(default)]
        method: CoefficientMethod,
    },

    /// Grimison with a property-variation factor for high-enthalpy flow.
    EnhancedGrimison {
        #[serde(default)]
        method: CoefficientMethod,
    },

    /// Zukauskas (1972) Reynolds-banded correlation.
    Zukauskas,

    /// Tariq correlation with a Knudsen-number rarefaction penalty.
    Rarefied,
}

impl Default for HeatTransferModel {
    fn default() -> Self {
        Self::Grimison {
            method: CoefficientMethod::default(),
        }
    }
}

/// Everything a [`HeatTransferModel`] may need to evaluate a row.
///
/// Geometry is that of the resolved zone. Gas properties are evaluated at the
/// bulk state entering the row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NusseltContext {
    pub reynolds: f64,
    pub prandtl: f64,
    /// Prandtl number at the wall. `None` uses the bulk value.
    pub wall_prandtl: Option<f64>,
    pub tube_diameter: Length,
    pub transverse_pitch: Length,
    pub longitudinal_pitch: Length,
    pub porosity: f64,
    /// Number of tube rows in the flow direction.
    pub rows: usize,
    pub temperature: ThermodynamicTemperature,
    pub density: MassDensity,
    pub viscosity: DynamicViscosity,
    pub molar_mass: MolarMass,
}

impl NusseltContext {
    pub(crate) fn wall_prandtl(&self) -> f64 {
        self.wall_prandtl.unwrap_or(self.prandtl)
    }
}

/// Inputs to a model-specific Reynolds number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReynoldsContext {
    pub density: MassDensity,
    pub viscosity: DynamicViscosity,
    pub mass_rate: MassRate,
    /// Frontal area open to the gas, after any fin blockage.
    pub frontal_area: Area,
    pub tube_diameter: Length,
    pub transverse_pitch: Length,
    pub longitudinal_pitch: Length,
}

impl HeatTransferModel {
    /// Computes the tube Nusselt number for one row.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationError`] when the inputs fall outside the
    /// correlation's validity window or describe an impossible geometry.
    pub fn nusselt(&self, context: &NusseltContext) -> Result<f64, CorrelationError> {
        match *self {
            Self::Grimison { method } => grimison::nusselt(method, context),
            Self::EnhancedGrimison { method } => enhanced::nusselt(method, context),
            Self::Zukauskas => zukauskas::nusselt(context),
            Self::Rarefied => rarefied::nusselt(context),
        }
    }

    /// The model's own Reynolds number definition, if it has one.
    #[must_use]
    pub fn reynolds(&self, context: &ReynoldsContext) -> Option<f64> {
        match self {
            Self::Grimison { .. } | Self::EnhancedGrimison { .. } => {
                Some(grimison::max_velocity_reynolds(context))
            }
            Self::Zukauskas | Self::Rarefied => None,
        }
    }

    /// Short name used in logs and reports.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Grimison { .. } => "grimison",
            Self::EnhancedGrimison { .. } => "enhanced_grimison",
            Self::Zukauskas => "zukauskas",
            Self::Rarefied => "rarefied",
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use test_context::context;

    #[test]
    fn default_is_polynomial_grimison() {
        assert_eq!(
            HeatTransferModel::default(),
            HeatTransferModel::Grimison {
                method: CoefficientMethod::Polynomial
            }
        );
    }

    #[test]
    fn only_grimison_variants_define_reynolds() {
        use uom::si::{
            area::square_meter, dynamic_viscosity::pascal_second, length::meter,
            mass_density::kilogram_per_cubic_meter, mass_rate::kilogram_per_second,
        };

        let ctx = ReynoldsContext {
            density: MassDensity::new::<kilogram_per_cubic_meter>(0.0112),
            viscosity: DynamicViscosity::new::<pascal_second>(7.4e-5),
            mass_rate: MassRate::new::<kilogram_per_second>(1.3),
            frontal_area: Area::new::<square_meter>(0.2),
            tube_diameter: Length::new::<meter>(0.061),
            transverse_pitch: Length::new::<meter>(0.121),
            longitudinal_pitch: Length::new::<meter>(0.064),
        };

        assert!(HeatTransferModel::default().reynolds(&ctx).is_some());
        assert!(
            HeatTransferModel::EnhancedGrimison {
                method: CoefficientMethod::Nearest
            }
            .reynolds(&ctx)
            .is_some()
        );
        assert!(HeatTransferModel::Zukauskas.reynolds(&ctx).is_none());
        assert!(HeatTransferModel::Rarefied.reynolds(&ctx).is_none());
    }

    #[test]
    fn dispatch_matches_module_functions() -> Result<(), CorrelationError> {
        let ctx = context(12_000.0);
        let method = CoefficientMethod::Polynomial;

        assert_relative_eq!(
            HeatTransferModel::Grimison { method }.nusselt(&ctx)?,
            grimison::nusselt(method, &ctx)?
        );
        assert_relative_eq!(
            HeatTransferModel::EnhancedGrimison { method }.nusselt(&ctx)?,
            enhanced::nusselt(method, &ctx)?
        );
        assert_relative_eq!(
            HeatTransferModel::Zukauskas.nusselt(&ctx)?,
            zukauskas::nusselt(&ctx)?
        );
        assert_relative_eq!(
            HeatTransferModel::Rarefied.nusselt(&ctx)?,
            rarefied::nusselt(&ctx)?
        );
        Ok(())
    }

    #[test]
    fn deserializes_tagged_variants() {
        let model: HeatTransferModel =
            serde_json::from_str(r#"{"model": "grimison", "method": "nearest"}"#).unwrap();
        assert_eq!(
            model,
            HeatTransferModel::Grimison {
                method: CoefficientMethod::Nearest
            }
        );

        let model: HeatTransferModel =
            serde_json::from_str(r#"{"model": "enhanced_grimison"}"#).unwrap();
        assert_eq!(
            model,
            HeatTransferModel::EnhancedGrimison {
                method: CoefficientMethod::Polynomial
            }
        );

        let model: HeatTransferModel = serde_json::from_str(r#"{"model": "rarefied"}"#).unwrap();
        assert_eq!(model, HeatTransferModel::Rarefied);
    }
}
