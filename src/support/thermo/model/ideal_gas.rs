//! Ideal-gas model for pure species and mixtures.
//!
//! # Assumptions
//!
//! - Ideal gas equation of state: `p = ρ·R·T`, with `R = R_u / M`
//! - Calorically perfect species: `cp` is constant per species
//! - Viscosity follows Sutherland's law, `μ = μ₀ (T/T₀)^1.5 (T₀ + S)/(T + S)`
//! - Conductivity follows from a constant species Prandtl number, `k = μ·cp/Pr`
//!
//! Mixtures use mass-weighted `cp` and Herning-Zipperer weighting
//! (`Σ xᵢ √Mᵢ φᵢ / Σ xᵢ √Mᵢ`) for viscosity and conductivity.
//!
//! # Reference State
//!
//! Enthalpy is zero at 298.15 K. Entropy is zero at 298.15 K and 1 atm.

use uom::si::{
    dynamic_viscosity::pascal_second,
    f64::{
        DynamicViscosity, MassDensity, MolarMass, SpecificHeatCapacity, ThermalConductivity,
        ThermodynamicTemperature,
    },
    mass_density::kilogram_per_cubic_meter,
    molar_mass::kilogram_per_mole,
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::thermo::{
    PropertyError, State,
    capability::{
        HasConductivity, HasCp, HasDensity, HasEnthalpy, HasEntropy, HasMolarMass, HasPrandtl,
        HasViscosity, ThermoModel,
    },
    fluid::{FluidId, Species},
};
use crate::support::units::{SpecificEnthalpy, SpecificEntropy};

use super::{TemperatureWindow, check_domain};

const UNIVERSAL_GAS_CONSTANT: f64 = 8.314_462_618;
const T_REF: f64 = 298.15;
const P_REF: f64 = 101_325.0;

/// Per-species constants.
#[derive(Debug, Clone, Copy)]
struct GasData {
    cp: f64,
    mu_ref: f64,
    t_ref: f64,
    sutherland: f64,
    prandtl: f64,
}

impl GasData {
    fn of(species: Species) -> Self {
        let (cp, mu_ref, t_ref, sutherland, prandtl) = match species {
            Species::N2 => (1040.0, 1.663e-5, 273.15, 107.0, 0.71),
            Species::O2 => (918.0, 1.919e-5, 273.15, 139.0, 0.72),
            Species::Air => (1005.0, 1.716e-5, 273.15, 110.4, 0.71),
            Species::CO2 => (844.0, 1.370e-5, 273.15, 222.0, 0.77),
            Species::CO => (1040.0, 1.657e-5, 273.15, 136.0, 0.75),
            Species::He => (5193.0, 1.870e-5, 273.15, 79.4, 0.67),
            Species::H2 => (14_300.0, 8.411e-6, 273.15, 97.0, 0.70),
            Species::Ar => (520.3, 2.125e-5, 273.15, 144.0, 0.67),
            Species::H2O => (1996.0, 1.12e-5, 350.0, 1064.0, 0.96),
        };
        Self {
            cp,
            mu_ref,
            t_ref,
            sutherland,
            prandtl,
        }
    }

    fn viscosity(&self, t: f64) -> f64 {
        self.mu_ref * (t / self.t_ref).powf(1.5) * (self.t_ref + self.sutherland)
            / (t + self.sutherland)
    }

    fn conductivity(&self, t: f64) -> f64 {
        self.viscosity(t) * self.cp / self.prandtl
    }
}

/// Ideal-gas property model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealGas {
    window: TemperatureWindow,
}

impl Default for IdealGas {
    fn default() -> Self {
        Self::new()
    }
}

impl IdealGas {
    /// Creates a model valid from 200 K to 6000 K.
    #[must_use]
    pub fn new() -> Self {
        Self {
            window: TemperatureWindow {
                min: 200.0,
                max: 6000.0,
            },
        }
    }

    /// Returns a model with a different valid temperature window.
    #[must_use]
    pub fn with_temperature_window(
        self,
        min: ThermodynamicTemperature,
        max: ThermodynamicTemperature,
    ) -> Self {
        Self {
            window: TemperatureWindow {
                min: min.get::<kelvin>(),
                max: max.get::<kelvin>(),
            },
        }
    }

    fn checked(&self, state: &State<FluidId>) -> Result<f64, PropertyError> {
        check_domain("ideal gas", state, self.window)?;
        Ok(state.temperature.get::<kelvin>())
    }

    fn gas_constant(fluid: &FluidId) -> f64 {
        UNIVERSAL_GAS_CONSTANT / fluid.molar_mass().get::<kilogram_per_mole>()
    }

    fn mixture_cp(fluid: &FluidId) -> f64 {
        match fluid {
            FluidId::Pure(species) => GasData::of(*species).cp,
            FluidId::Mixture(composition) => composition
                .mass_fractions()
                .into_iter()
                .map(|(species, y)| y * GasData::of(species).cp)
                .sum(),
        }
    }

    /// Herning-Zipperer weighting of a per-species transport property.
    fn mixture_transport(fluid: &FluidId, property: impl Fn(&GasData) -> f64) -> f64 {
        match fluid {
            FluidId::Pure(species) => property(&GasData::of(*species)),
            FluidId::Mixture(composition) => {
                let (num, den) = composition.iter().fold((0.0, 0.0), |(num, den), (s, x)| {
                    let weight = x * s.molar_mass().get::<kilogram_per_mole>().sqrt();
                    (num + weight * property(&GasData::of(s)), den + weight)
                });
                num / den
            }
        }
    }
}

impl ThermoModel for IdealGas {
    type Fluid = FluidId;
}

impl HasDensity for IdealGas {
    fn density(&self, state: &State<FluidId>) -> Result<MassDensity, PropertyError> {
        let t = self.checked(state)?;
        let r = Self::gas_constant(&state.fluid);
        Ok(MassDensity::new::<kilogram_per_cubic_meter>(
            state.pressure.get::<pascal>() / (r * t),
        ))
    }
}

impl HasViscosity for IdealGas {
    fn viscosity(&self, state: &State<FluidId>) -> Result<DynamicViscosity, PropertyError> {
        let t = self.checked(state)?;
        let mu = Self::mixture_transport(&state.fluid, |gas| gas.viscosity(t));
        Ok(DynamicViscosity::new::<pascal_second>(mu))
    }
}

impl HasCp for IdealGas {
    fn cp(&self, state: &State<FluidId>) -> Result<SpecificHeatCapacity, PropertyError> {
        self.checked(state)?;
        Ok(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(
            Self::mixture_cp(&state.fluid),
        ))
    }
}

impl HasConductivity for IdealGas {
    fn conductivity(&self, state: &State<FluidId>) -> Result<ThermalConductivity, PropertyError> {
        let t = self.checked(state)?;
        let k = Self::mixture_transport(&state.fluid, |gas| gas.conductivity(t));
        Ok(ThermalConductivity::new::<watt_per_meter_kelvin>(k))
    }
}

impl HasPrandtl for IdealGas {}

impl HasEnthalpy for IdealGas {
    fn enthalpy(&self, state: &State<FluidId>) -> Result<SpecificEnthalpy, PropertyError> {
        let t = self.checked(state)?;
        let cp = Self::mixture_cp(&state.fluid);
        Ok(SpecificEnthalpy::new::<uom::si::available_energy::joule_per_kilogram>(
            cp * (t - T_REF),
        ))
    }
}

impl HasEntropy for IdealGas {
    fn entropy(&self, state: &State<FluidId>) -> Result<SpecificEntropy, PropertyError> {
        let t = self.checked(state)?;
        let cp = Self::mixture_cp(&state.fluid);
        let r = Self::gas_constant(&state.fluid);
        let p = state.pressure.get::<pascal>();
        Ok(SpecificEntropy::new::<joule_per_kilogram_kelvin>(
            cp * (t / T_REF).ln() - r * (p / P_REF).ln(),
        ))
    }
}

impl HasMolarMass for IdealGas {
    fn molar_mass(&self, fluid: &FluidId) -> Result<MolarMass, PropertyError> {
        Ok(fluid.molar_mass())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::f64::Pressure;

    use crate::support::thermo::{Property, PropertyProvider, fluid::Composition};

    fn nitrogen(t: f64, p: f64) -> State<FluidId> {
        State::new(
            ThermodynamicTemperature::new::<kelvin>(t),
            Pressure::new::<pascal>(p),
            FluidId::Pure(Species::N2),
        )
    }

    #[test]
    fn density_follows_ideal_gas_law() -> Result<(), PropertyError> {
        let gas = IdealGas::new();
        let rho = gas.density(&nitrogen(3000.0, 10_000.0))?;
        let expected = 10_000.0 / (UNIVERSAL_GAS_CONSTANT / 0.028_013_4 * 3000.0);
        assert_relative_eq!(rho.get::<kilogram_per_cubic_meter>(), expected);
        Ok(())
    }

    #[test]
    fn sutherland_viscosity_at_reference() -> Result<(), PropertyError> {
        let gas = IdealGas::new();
        let mu = gas.viscosity(&nitrogen(273.15, 101_325.0))?;
        assert_relative_eq!(mu.get::<pascal_second>(), 1.663e-5, max_relative = 1e-12);

        let hot = gas.viscosity(&nitrogen(3000.0, 101_325.0))?;
        assert!(hot > mu);
        Ok(())
    }

    #[test]
    fn prandtl_matches_species_constant() -> Result<(), PropertyError> {
        let gas = IdealGas::new();
        let pr = gas.lookup(Property::Prandtl, &nitrogen(1200.0, 50_000.0))?;
        assert_relative_eq!(pr, 0.71, max_relative = 1e-12);
        Ok(())
    }

    #[test]
    fn enthalpy_difference_is_cp_delta_t() -> Result<(), PropertyError> {
        let gas = IdealGas::new();
        let h1 = gas.enthalpy(&nitrogen(1000.0, 10_000.0))?;
        let h2 = gas.enthalpy(&nitrogen(1500.0, 10_000.0))?;
        assert_relative_eq!((h2 - h1).value, 1040.0 * 500.0);
        Ok(())
    }

    #[test]
    fn non_positive_pressure_is_out_of_domain() {
        let gas = IdealGas::new();
        match gas.density(&nitrogen(2000.0, -5.0)) {
            Err(PropertyError::OutOfDomain { .. }) => {}
            other => panic!("Expected out-of-domain error, got: {other:?}"),
        }
        match gas.density(&nitrogen(2000.0, 0.0)) {
            Err(PropertyError::OutOfDomain { .. }) => {}
            other => panic!("Expected out-of-domain error, got: {other:?}"),
        }
    }

    #[test]
    fn temperature_window_is_enforced() {
        let gas = IdealGas::new().with_temperature_window(
            ThermodynamicTemperature::new::<kelvin>(250.0),
            ThermodynamicTemperature::new::<kelvin>(2500.0),
        );
        assert!(gas.cp(&nitrogen(3000.0, 10_000.0)).is_err());
        assert!(gas.cp(&nitrogen(2000.0, 10_000.0)).is_ok());
    }

    #[test]
    fn mixture_of_one_species_matches_pure() -> Result<(), PropertyError> {
        let gas = IdealGas::new();
        let pure = nitrogen(900.0, 20_000.0);
        let mixture = State::new(
            pure.temperature,
            pure.pressure,
            FluidId::Mixture(Composition::from_mole_fractions(vec![(Species::N2, 1.0)]).unwrap()),
        );

        for property in [
            Property::Density,
            Property::SpecificHeat,
            Property::Viscosity,
            Property::Conductivity,
            Property::MolarMass,
        ] {
            assert_relative_eq!(
                gas.lookup(property, &pure)?,
                gas.lookup(property, &mixture)?,
                max_relative = 1e-12
            );
        }
        Ok(())
    }
}
