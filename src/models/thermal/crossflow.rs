//! Cross-flow gas-to-liquid tube-bank heat exchanger.
//!
//! [`CrossflowHx`] is the [`twine_core::Model`] adapter: it pairs a built
//! [`HeatExchanger`] with gas and coolant property providers and solves it
//! for a pair of [`Inlets`]. The zone, marching, and assembly API it
//! delegates to is re-exported here from the internal `core` module.
//!
//! # Example
//!
//! ```no_run
//! use twine_core::Model;
//! use twine_crossflow::{
//!     models::thermal::crossflow::{CrossflowHx, ExchangerSpec, FluidState, Inlets},
//!     support::thermo::{
//!         fluid::{FluidId, Species},
//!         model::{IdealGas, Incompressible},
//!     },
//! };
//! use uom::si::{
//!     f64::{MassRate, Pressure, ThermodynamicTemperature},
//!     mass_rate::kilogram_per_second,
//!     pressure::pascal,
//!     thermodynamic_temperature::kelvin,
//! };
//!
//! let exchanger = ExchangerSpec::load_yaml("exchanger.yaml")?.build()?;
//! let model = CrossflowHx::new(exchanger, IdealGas::new(), Incompressible::water());
//!
//! let solution = model.call(&Inlets {
//!     gas: FluidState::gas(
//!         ThermodynamicTemperature::new::<kelvin>(3000.0),
//!         Pressure::new::<pascal>(10_000.0),
//!         MassRate::new::<kilogram_per_second>(1.3),
//!         FluidId::Pure(Species::N2),
//!     ),
//!     coolant: FluidState::coolant(
//!         ThermodynamicTemperature::new::<kelvin>(300.0),
//!         Pressure::new::<pascal>(600_000.0),
//!         MassRate::new::<kilogram_per_second>(600.0),
//!         FluidId::Pure(Species::H2O),
//!     ),
//! })?;
//! println!("duty: {:?}", solution.total_duty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod core;

use thiserror::Error;
use twine_core::Model;

use crate::support::thermo::{PropertyProvider, fluid::FluidId};

pub use self::core::{
    AssemblyError, BuildError, DEFAULT_FIN_THICKNESS, DEFAULT_FINNED_PITCH_RATIO,
    DEFAULT_PITCH_RATIO, DEFAULT_ROUGHNESS, DEFAULT_WALL_CONDUCTIVITY, DEFAULT_WALL_THICKNESS,
    DEFAULT_WIDTH, DuctGeometry, EnergyBalance, ExchangerSpec, FailurePolicy, FinGeometry,
    FinSpec, FluidState, GasPressureDropSource, GeometryError, HeatExchanger, Layout,
    RowEnergyUpdate, RowFailure, RowFailureCause, RowRecord, Solution, SolveStatus, Stream,
    StreamRole, TargetCheck, TubeBankGeometry, TubeBankSpec, TubeCenter, Zone, ZoneKind,
    ZoneModels, ZoneOutcome, ZoneReport, ZoneResults, ZoneSolution, ZoneSpec, accuracy,
};

/// Gas and coolant inlet states.
#[derive(Debug, Clone, PartialEq)]
pub struct Inlets {
    pub gas: FluidState,
    pub coolant: FluidState,
}

#[derive(Debug, Error)]
pub enum CrossflowError {
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

/// A heat exchanger bound to its property providers.
#[derive(Debug, Clone)]
pub struct CrossflowHx<G, C> {
    exchanger: HeatExchanger,
    gas_props: G,
    coolant_props: C,
}

impl<G, C> CrossflowHx<G, C> {
    #[must_use]
    pub fn new(exchanger: HeatExchanger, gas_props: G, coolant_props: C) -> Self {
        Self {
            exchanger,
            gas_props,
            coolant_props,
        }
    }

    #[must_use]
    pub fn exchanger(&self) -> &HeatExchanger {
        &self.exchanger
    }
}

impl<G, C> Model for CrossflowHx<G, C>
where
    G: PropertyProvider<Fluid = FluidId>,
    C: PropertyProvider<Fluid = FluidId>,
{
    type Input = Inlets;
    type Output = Solution;
    type Error = CrossflowError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.exchanger.solve(
            &input.gas,
            &input.coolant,
            &self.gas_props,
            &self.coolant_props,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        f64::{MassRate, Pressure, ThermodynamicTemperature},
        mass_rate::kilogram_per_second,
        pressure::pascal,
        thermodynamic_temperature::kelvin,
    };

    use crate::support::thermo::{
        fluid::Species,
        model::{IdealGas, Incompressible},
    };

    const CONFIG: &str = "
name: adapter
zones:
  - type: bare
    name: bank
    height: 0.5
    tube_outer_diameter: 0.061
    transverse_pitch: 0.121
    longitudinal_pitch: 0.064
    row_count: 4
";

    fn inlets(gas_pressure_pa: f64) -> Inlets {
        Inlets {
            gas: FluidState::gas(
                ThermodynamicTemperature::new::<kelvin>(3000.0),
                Pressure::new::<pascal>(gas_pressure_pa),
                MassRate::new::<kilogram_per_second>(1.3),
                FluidId::Pure(Species::N2),
            ),
            coolant: FluidState::coolant(
                ThermodynamicTemperature::new::<kelvin>(300.0),
                Pressure::new::<pascal>(600_000.0),
                MassRate::new::<kilogram_per_second>(600.0),
                FluidId::Pure(Species::H2O),
            ),
        }
    }

    fn model() -> CrossflowHx<IdealGas, Incompressible> {
        let exchanger = ExchangerSpec::from_yaml_str(CONFIG)
            .and_then(|spec| spec.build())
            .expect("config should build");
        CrossflowHx::new(exchanger, IdealGas::new(), Incompressible::water())
    }

    #[test]
    fn solves_through_model_trait() -> Result<(), CrossflowError> {
        let solution = model().call(&inlets(10_000.0))?;
        assert!(solution.is_complete());
        assert_eq!(solution.gas.rows().len(), 4);
        assert!(solution.gas_outlet().temperature < inlets(10_000.0).gas.temperature);
        assert!(solution.total_duty().value > 0.0);
        Ok(())
    }

    #[test]
    fn zone_failure_is_an_error() {
        let deep = CONFIG.replace("row_count: 4", "row_count: 12");
        let exchanger = ExchangerSpec::from_yaml_str(&deep)
            .and_then(|spec| spec.build())
            .expect("config should build");
        let model = CrossflowHx::new(exchanger, IdealGas::new(), Incompressible::water());

        match model.call(&inlets(5_000.0)) {
            Err(CrossflowError::Assembly(AssemblyError::ZoneFailed(failure))) => {
                assert_eq!(failure.zone, "bank");
                assert!(failure.row < 12);
            }
            other => panic!("Expected zone failure, got: {other:?}"),
        }
    }
}
