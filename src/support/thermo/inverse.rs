//! Temperature from enthalpy by bisection.
//!
//! Property models are queried forward in (T, P). Recovering the temperature
//! that produces a given enthalpy is a one-dimensional root find, solved here
//! with [`twine_solvers`] bisection over a caller-supplied bracket.

use std::convert::Infallible;

use thiserror::Error;
use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;
use uom::si::{
    available_energy::joule_per_kilogram,
    f64::{Pressure, TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::support::units::SpecificEnthalpy;

use super::{PropertyError, State, capability::HasEnthalpy};

/// Errors from [`temperature_from_enthalpy`].
#[derive(Debug, Error)]
pub enum InverseError {
    #[error("property evaluation failed")]
    Property(#[from] PropertyError),

    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    #[error("solver hit iteration limit: residual={residual:?}")]
    MaxIters {
        residual: SpecificEnthalpy,
        iters: usize,
    },
}

/// Bisection settings for [`temperature_from_enthalpy`].
#[derive(Debug, Clone, Copy)]
pub struct InverseConfig {
    pub max_iters: usize,
    pub temp_tol: TemperatureInterval,
    pub enthalpy_tol: SpecificEnthalpy,
}

impl Default for InverseConfig {
    fn default() -> Self {
        Self {
            max_iters: 200,
            temp_tol: TemperatureInterval::new::<delta_kelvin>(1e-9),
            enthalpy_tol: SpecificEnthalpy::new::<joule_per_kilogram>(1e-6),
        }
    }
}

impl InverseConfig {
    fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.temp_tol.get::<delta_kelvin>(),
            x_rel_tol: 0.0,
            residual_tol: self.enthalpy_tol.get::<joule_per_kilogram>(),
        }
    }
}

/// Enthalpy evaluated at a trial temperature.
#[derive(Debug, Clone, Copy)]
struct EnthalpyAt {
    temperature: ThermodynamicTemperature,
    enthalpy: SpecificEnthalpy,
}

struct EnthalpyModel<'a, Thermo: HasEnthalpy> {
    thermo: &'a Thermo,
    pressure: Pressure,
    fluid: &'a Thermo::Fluid,
}

impl<Thermo> Model for EnthalpyModel<'_, Thermo>
where
    Thermo: HasEnthalpy,
    Thermo::Fluid: Clone,
{
    type Input = ThermodynamicTemperature;
    type Output = EnthalpyAt;
    type Error = PropertyError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let state = State::new(*input, self.pressure, self.fluid.clone());
        Ok(EnthalpyAt {
            temperature: *input,
            enthalpy: self.thermo.enthalpy(&state)?,
        })
    }
}

struct EnthalpyProblem {
    target: SpecificEnthalpy,
}

impl EquationProblem<1> for EnthalpyProblem {
    type Input = ThermodynamicTemperature;
    type Output = EnthalpyAt;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(ThermodynamicTemperature::new::<kelvin>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([(output.enthalpy - self.target).get::<joule_per_kilogram>()])
    }
}

/// Finds the temperature at which `thermo` yields the `target` enthalpy.
///
/// The bracket should lie inside the model's valid domain. A trial
/// temperature the model rejects is treated as lying above the root.
///
/// # Errors
///
/// Returns [`InverseError`] if the bracket does not contain a root, the model
/// fails, or the iteration limit is reached.
pub fn temperature_from_enthalpy<Thermo>(
    thermo: &Thermo,
    fluid: &Thermo::Fluid,
    pressure: Pressure,
    target: SpecificEnthalpy,
    bracket: [ThermodynamicTemperature; 2],
    config: InverseConfig,
) -> Result<ThermodynamicTemperature, InverseError>
where
    Thermo: HasEnthalpy,
    Thermo::Fluid: Clone,
{
    let model = EnthalpyModel {
        thermo,
        pressure,
        fluid,
    };
    let problem = EnthalpyProblem { target };

    let solution = bisection::solve(
        &model,
        &problem,
        [bracket[0].get::<kelvin>(), bracket[1].get::<kelvin>()],
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(InverseError::MaxIters {
            residual: SpecificEnthalpy::new::<joule_per_kilogram>(solution.residual),
            iters: solution.iters,
        });
    }

    Ok(solution.snapshot.output.temperature)
}
