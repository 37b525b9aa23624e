//! Extensions to [`uom`].
//!
//! All dimensional values in this crate are [`uom`] SI quantities. This module
//! names the quantities the marching solver needs that [`uom`] does not, and
//! adds the [`TemperatureDifference::minus`] helper for the gas-to-coolant
//! driving temperature difference.
//!
//! ```
//! use uom::si::{
//!     f64::ThermodynamicTemperature, temperature_interval, thermodynamic_temperature::kelvin,
//! };
//! use twine_crossflow::support::units::TemperatureDifference;
//!
//! let gas = ThermodynamicTemperature::new::<kelvin>(3000.0);
//! let coolant = ThermodynamicTemperature::new::<kelvin>(300.0);
//! let driving = gas.minus(coolant);
//! assert_eq!(driving.get::<temperature_interval::kelvin>(), 2700.0);
//! ```

use uom::{
    si::{
        ISQ, Quantity, SI,
        f64::{TemperatureInterval, ThermodynamicTemperature},
        temperature_interval::kelvin as delta_kelvin,
        thermodynamic_temperature::kelvin as abs_kelvin,
    },
    typenum::{N1, N2, P1, P2, P3, Z0},
};

/// Specific gas constant, J/kg·K in SI.
pub type SpecificGasConstant = Quantity<ISQ<P2, Z0, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Specific enthalpy, J/kg in SI.
pub type SpecificEnthalpy = Quantity<ISQ<P2, Z0, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Specific entropy, J/kg·K in SI.
pub type SpecificEntropy = Quantity<ISQ<P2, Z0, N2, Z0, N1, Z0, Z0>, SI<f64>, f64>;

/// Thermal resistance, K/W in SI.
///
/// The reciprocal of a [`ThermalConductance`](uom::si::f64::ThermalConductance).
/// Film and wall resistances in series are summed as this type before being
/// inverted back to a `UA`.
pub type ThermalResistance = Quantity<ISQ<N2, N1, P3, Z0, P1, Z0, Z0>, SI<f64>, f64>;

/// Subtraction of absolute temperatures yielding a [`TemperatureInterval`].
///
/// [`uom`] does not allow `ThermodynamicTemperature - ThermodynamicTemperature`
/// (see [uom#380](https://github.com/iliekturtles/uom/issues/380)).
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}
