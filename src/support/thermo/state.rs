use uom::si::f64::{Pressure, ThermodynamicTemperature};

/// The point at which fluid properties are evaluated.
///
/// Every property query in this crate is made at a known temperature and
/// pressure, so both are part of the state. The `Fluid` carries the identity
/// of the substance, which may include mixture composition.
///
/// # Example
///
/// ```
/// use twine_crossflow::support::thermo::{State, fluid::{FluidId, Species}};
/// use uom::si::{
///     f64::{Pressure, ThermodynamicTemperature},
///     pressure::pascal,
///     thermodynamic_temperature::kelvin,
/// };
///
/// let state = State::new(
///     ThermodynamicTemperature::new::<kelvin>(3000.0),
///     Pressure::new::<pascal>(10_000.0),
///     FluidId::Pure(Species::N2),
/// );
/// assert_eq!(state.pressure.get::<pascal>(), 10_000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct State<Fluid> {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub fluid: Fluid,
}

impl<Fluid> State<Fluid> {
    /// Creates a new state with the given temperature, pressure, and fluid.
    #[must_use]
    pub fn new(temperature: ThermodynamicTemperature, pressure: Pressure, fluid: Fluid) -> Self {
        Self {
            temperature,
            pressure,
            fluid,
        }
    }

    /// Returns a new state with the given temperature, keeping other fields unchanged.
    #[must_use]
    pub fn with_temperature(self, temperature: ThermodynamicTemperature) -> Self {
        Self {
            temperature,
            ..self
        }
    }

    /// Returns a new state with the given pressure, keeping other fields unchanged.
    #[must_use]
    pub fn with_pressure(self, pressure: Pressure) -> Self {
        Self { pressure, ..self }
    }
}
