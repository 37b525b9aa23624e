use serde::{Deserialize, Serialize};
use uom::si::{
    dynamic_viscosity::pascal_second, mass_density::kilogram_per_cubic_meter,
    molar_mass::kilogram_per_mole, specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::thermo::{PropertyError, State};

use super::{
    HasConductivity, HasCp, HasDensity, HasEnthalpy, HasEntropy, HasMolarMass, HasPrandtl,
    HasViscosity,
};

/// The property codes accepted by [`PropertyProvider::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Density,
    SpecificHeat,
    Viscosity,
    Conductivity,
    Prandtl,
    Enthalpy,
    Entropy,
    MolarMass,
}

/// Everything the marching solver asks of a property model.
///
/// This trait is implemented automatically for any model with the full set of
/// property capabilities.
pub trait PropertyProvider:
    HasDensity
    + HasViscosity
    + HasCp
    + HasConductivity
    + HasPrandtl
    + HasEnthalpy
    + HasEntropy
    + HasMolarMass
{
    /// Looks up a property by code, returning its value in SI base units.
    ///
    /// This is the untyped counterpart of the individual capability methods,
    /// for callers that select the property at runtime.
    ///
    /// # Errors
    ///
    /// Returns the [`PropertyError`] raised by the underlying capability.
    fn lookup(&self, property: Property, state: &State<Self::Fluid>) -> Result<f64, PropertyError> {
        let value = match property {
            Property::Density => self.density(state)?.get::<kilogram_per_cubic_meter>(),
            Property::SpecificHeat => self.cp(state)?.get::<joule_per_kilogram_kelvin>(),
            Property::Viscosity => self.viscosity(state)?.get::<pascal_second>(),
            Property::Conductivity => self.conductivity(state)?.get::<watt_per_meter_kelvin>(),
            Property::Prandtl => self.prandtl(state)?,
            Property::Enthalpy => self.enthalpy(state)?.value,
            Property::Entropy => self.entropy(state)?.value,
            Property::MolarMass => self.molar_mass(&state.fluid)?.get::<kilogram_per_mole>(),
        };
        Ok(value)
    }
}

impl<T> PropertyProvider for T where
    T: HasDensity
        + HasViscosity
        + HasCp
        + HasConductivity
        + HasPrandtl
        + HasEnthalpy
        + HasEntropy
        + HasMolarMass
{
}
