use uom::si::f64::{
    DynamicViscosity, MassDensity, MolarMass, SpecificHeatCapacity, ThermalConductivity,
};

use crate::support::thermo::{PropertyError, State};
use crate::support::units::{SpecificEnthalpy, SpecificEntropy};

use super::ThermoModel;

pub trait HasDensity: ThermoModel {
    /// Returns the density at the given state.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the density cannot be calculated.
    fn density(&self, state: &State<Self::Fluid>) -> Result<MassDensity, PropertyError>;
}

pub trait HasViscosity: ThermoModel {
    /// Returns the dynamic viscosity at the given state.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the viscosity cannot be calculated.
    fn viscosity(&self, state: &State<Self::Fluid>) -> Result<DynamicViscosity, PropertyError>;
}

pub trait HasCp: ThermoModel {
    /// Returns the specific heat capacity at constant pressure.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if `cp` cannot be calculated.
    fn cp(&self, state: &State<Self::Fluid>) -> Result<SpecificHeatCapacity, PropertyError>;
}

pub trait HasConductivity: ThermoModel {
    /// Returns the thermal conductivity at the given state.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the conductivity cannot be calculated.
    fn conductivity(
        &self,
        state: &State<Self::Fluid>,
    ) -> Result<ThermalConductivity, PropertyError>;
}

pub trait HasPrandtl: HasViscosity + HasCp + HasConductivity {
    /// Returns the Prandtl number `μ·cp/k`.
    ///
    /// Models with a tabulated Prandtl number should override this.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if any constituent property fails.
    fn prandtl(&self, state: &State<Self::Fluid>) -> Result<f64, PropertyError> {
        let pr = self.viscosity(state)? * self.cp(state)? / self.conductivity(state)?;
        Ok(pr.value)
    }
}

pub trait HasEnthalpy: ThermoModel {
    /// Returns the specific enthalpy at the given state.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the enthalpy cannot be calculated.
    fn enthalpy(&self, state: &State<Self::Fluid>) -> Result<SpecificEnthalpy, PropertyError>;
}

pub trait HasEntropy: ThermoModel {
    /// Returns the specific entropy at the given state.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the entropy cannot be calculated.
    fn entropy(&self, state: &State<Self::Fluid>) -> Result<SpecificEntropy, PropertyError>;
}

pub trait HasMolarMass: ThermoModel {
    /// Returns the molar mass of the fluid.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the molar mass is not defined for the fluid.
    fn molar_mass(&self, fluid: &Self::Fluid) -> Result<MolarMass, PropertyError>;
}
