//! Reference property models.
//!
//! - [`IdealGas`]: ideal-gas species and mixtures with Sutherland transport.
//! - [`Incompressible`]: constant-property liquid coolant.
//! - [`TabulatedAir`]: high-temperature equilibrium air from a property table.
//!
//! All models reject non-positive pressure and temperatures outside their
//! valid window with [`PropertyError::OutOfDomain`].

pub mod ideal_gas;
pub mod incompressible;
pub mod tabulated_air;

pub use ideal_gas::IdealGas;
pub use incompressible::Incompressible;
pub use tabulated_air::TabulatedAir;

use uom::si::{pressure::pascal, thermodynamic_temperature::kelvin};

use super::{PropertyError, State};

/// An inclusive temperature window in kelvin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureWindow {
    pub min: f64,
    pub max: f64,
}

/// Checks that a state lies inside a model's valid domain.
pub(crate) fn check_domain<Fluid>(
    model: &str,
    state: &State<Fluid>,
    window: TemperatureWindow,
) -> Result<(), PropertyError> {
    let t = state.temperature.get::<kelvin>();
    let p = state.pressure.get::<pascal>();

    if !t.is_finite() || !p.is_finite() {
        return Err(PropertyError::InvalidState {
            context: format!("{model}: non-finite state T={t} K, P={p} Pa"),
        });
    }
    if p <= 0.0 {
        return Err(PropertyError::out_of_domain(format!(
            "{model}: pressure {p} Pa is not positive"
        )));
    }
    if t < window.min || t > window.max {
        return Err(PropertyError::out_of_domain(format!(
            "{model}: temperature {t} K outside [{}, {}] K",
            window.min, window.max
        )));
    }
    Ok(())
}
