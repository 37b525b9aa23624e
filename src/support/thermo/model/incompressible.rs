//! Constant-property liquid model.
//!
//! `Incompressible` treats a liquid coolant as having constant density,
//! specific heat, viscosity, and conductivity over a valid temperature window.
//!
//! # Assumptions
//!
//! - Density, `cp`, `μ`, and `k` are constant
//! - Enthalpy includes flow work: `h = h₀ + cp·(T − T₀) + (P − P₀)/ρ`
//! - Entropy: `s = cp·ln(T/T₀)`
//!
//! The pressure term in the enthalpy is what makes the coolant pressure drop
//! visible in an assembly's energy balance.

use thiserror::Error;
use uom::si::{
    available_energy::joule_per_kilogram,
    dynamic_viscosity::pascal_second,
    f64::{
        DynamicViscosity, MassDensity, MolarMass, Pressure, SpecificHeatCapacity,
        ThermalConductivity, ThermodynamicTemperature,
    },
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::{
    constraint::{Constraint, StrictlyPositive},
    thermo::{
        PropertyError, State,
        capability::{
            HasConductivity, HasCp, HasDensity, HasEnthalpy, HasEntropy, HasMolarMass,
            HasPrandtl, HasViscosity, ThermoModel,
        },
        fluid::{FluidId, Species},
    },
    units::{SpecificEnthalpy, SpecificEntropy, TemperatureDifference},
};

use super::{TemperatureWindow, check_domain};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IncompressibleParametersError {
    #[error("invalid density: {density:?}")]
    Density { density: MassDensity },
    #[error("invalid cp: {cp:?}")]
    Cp { cp: SpecificHeatCapacity },
    #[error("invalid viscosity: {viscosity:?}")]
    Viscosity { viscosity: DynamicViscosity },
    #[error("invalid conductivity: {conductivity:?}")]
    Conductivity { conductivity: ThermalConductivity },
    #[error("invalid temperature window: [{min:?}, {max:?}]")]
    Window {
        min: ThermodynamicTemperature,
        max: ThermodynamicTemperature,
    },
}

/// Constant parameters for the [`Incompressible`] model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncompressibleParameters {
    pub species: Species,
    pub density: MassDensity,
    pub cp: SpecificHeatCapacity,
    pub viscosity: DynamicViscosity,
    pub conductivity: ThermalConductivity,
    pub min_temperature: ThermodynamicTemperature,
    pub max_temperature: ThermodynamicTemperature,
    pub reference_temperature: ThermodynamicTemperature,
    pub reference_pressure: Pressure,
}

impl IncompressibleParameters {
    /// Liquid water near 25 °C.
    #[must_use]
    pub fn water() -> Self {
        Self {
            species: Species::H2O,
            density: MassDensity::new::<kilogram_per_cubic_meter>(997.0),
            cp: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(4181.0),
            viscosity: DynamicViscosity::new::<pascal_second>(8.9e-4),
            conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(0.607),
            min_temperature: ThermodynamicTemperature::new::<kelvin>(273.16),
            max_temperature: ThermodynamicTemperature::new::<kelvin>(620.0),
            reference_temperature: ThermodynamicTemperature::new::<kelvin>(298.15),
            reference_pressure: Pressure::new::<pascal>(101_325.0),
        }
    }
}

/// Constant-property liquid model for a single species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Incompressible {
    parameters: IncompressibleParameters,
    window: TemperatureWindow,
}

impl Incompressible {
    /// Creates a model from explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns [`IncompressibleParametersError`] if any constant is not
    /// strictly positive or the temperature window is empty.
    pub fn new(
        parameters: IncompressibleParameters,
    ) -> Result<Self, IncompressibleParametersError> {
        let p = parameters;
        if StrictlyPositive::check(&p.density).is_err() {
            return Err(IncompressibleParametersError::Density { density: p.density });
        }
        if StrictlyPositive::check(&p.cp).is_err() {
            return Err(IncompressibleParametersError::Cp { cp: p.cp });
        }
        if StrictlyPositive::check(&p.viscosity).is_err() {
            return Err(IncompressibleParametersError::Viscosity {
                viscosity: p.viscosity,
            });
        }
        if StrictlyPositive::check(&p.conductivity).is_err() {
            return Err(IncompressibleParametersError::Conductivity {
                conductivity: p.conductivity,
            });
        }

        let min = p.min_temperature.get::<kelvin>();
        let max = p.max_temperature.get::<kelvin>();
        if !(min > 0.0 && max > min) {
            return Err(IncompressibleParametersError::Window {
                min: p.min_temperature,
                max: p.max_temperature,
            });
        }

        Ok(Self {
            parameters,
            window: TemperatureWindow { min, max },
        })
    }

    /// Liquid water with constant properties.
    #[must_use]
    pub fn water() -> Self {
        let parameters = IncompressibleParameters::water();
        Self {
            parameters,
            window: TemperatureWindow {
                min: parameters.min_temperature.get::<kelvin>(),
                max: parameters.max_temperature.get::<kelvin>(),
            },
        }
    }

    fn checked(&self, state: &State<FluidId>) -> Result<(), PropertyError> {
        if state.fluid.as_pure() != Some(self.parameters.species) {
            return Err(PropertyError::undefined(format!(
                "incompressible {:?} model queried for {:?}",
                self.parameters.species, state.fluid
            )));
        }
        check_domain("incompressible liquid", state, self.window)
    }
}

impl ThermoModel for Incompressible {
    type Fluid = FluidId;
}

impl HasDensity for Incompressible {
    fn density(&self, state: &State<FluidId>) -> Result<MassDensity, PropertyError> {
        self.checked(state)?;
        Ok(self.parameters.density)
    }
}

impl HasViscosity for Incompressible {
    fn viscosity(&self, state: &State<FluidId>) -> Result<DynamicViscosity, PropertyError> {
        self.checked(state)?;
        Ok(self.parameters.viscosity)
    }
}

impl HasCp for Incompressible {
    fn cp(&self, state: &State<FluidId>) -> Result<SpecificHeatCapacity, PropertyError> {
        self.checked(state)?;
        Ok(self.parameters.cp)
    }
}

impl HasConductivity for Incompressible {
    fn conductivity(&self, state: &State<FluidId>) -> Result<ThermalConductivity, PropertyError> {
        self.checked(state)?;
        Ok(self.parameters.conductivity)
    }
}

impl HasPrandtl for Incompressible {}

impl HasEnthalpy for Incompressible {
    fn enthalpy(&self, state: &State<FluidId>) -> Result<SpecificEnthalpy, PropertyError> {
        self.checked(state)?;
        let p = &self.parameters;
        let sensible: SpecificEnthalpy = p.cp * state.temperature.minus(p.reference_temperature);
        let flow_work = SpecificEnthalpy::new::<joule_per_kilogram>(
            (state.pressure - p.reference_pressure).get::<pascal>()
                / p.density.get::<kilogram_per_cubic_meter>(),
        );
        Ok(sensible + flow_work)
    }
}

impl HasEntropy for Incompressible {
    fn entropy(&self, state: &State<FluidId>) -> Result<SpecificEntropy, PropertyError> {
        self.checked(state)?;
        let p = &self.parameters;
        let ratio = state.temperature.get::<kelvin>() / p.reference_temperature.get::<kelvin>();
        Ok(p.cp * ratio.ln())
    }
}

impl HasMolarMass for Incompressible {
    fn molar_mass(&self, fluid: &FluidId) -> Result<MolarMass, PropertyError> {
        match fluid.as_pure() {
            Some(species) if species == self.parameters.species => Ok(species.molar_mass()),
            _ => Err(PropertyError::undefined(format!(
                "incompressible {:?} model queried for {fluid:?}",
                self.parameters.species
            ))),
        }
    }
}
