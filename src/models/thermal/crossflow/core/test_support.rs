use uom::si::{
    f64::{Length, MassRate, Pressure, ThermodynamicTemperature},
    length::meter,
    mass_rate::kilogram_per_second,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
};

use crate::support::thermo::{
    fluid::{FluidId, Species},
    model::{IdealGas, Incompressible},
};

use super::{
    geometry::{TubeBankGeometry, TubeBankSpec},
    state::FluidState,
};

pub(super) fn gas_props() -> IdealGas {
    IdealGas::new()
}

pub(super) fn coolant_props() -> Incompressible {
    Incompressible::water()
}

/// Nitrogen at 3000 K and 10 kPa.
pub(super) fn nitrogen(pressure_pa: f64) -> FluidState {
    FluidState::gas(
        ThermodynamicTemperature::new::<kelvin>(3000.0),
        Pressure::new::<pascal>(pressure_pa),
        MassRate::new::<kilogram_per_second>(1.3),
        FluidId::Pure(Species::N2),
    )
}

pub(super) fn hot_gas() -> FluidState {
    nitrogen(10_000.0)
}

/// Water at 300 K and 600 kPa.
pub(super) fn cooling_water() -> FluidState {
    FluidState::coolant(
        ThermodynamicTemperature::new::<kelvin>(300.0),
        Pressure::new::<pascal>(600_000.0),
        MassRate::new::<kilogram_per_second>(600.0),
        FluidId::Pure(Species::H2O),
    )
}

/// A 16 in wide staggered bank of 61 mm tubes, `depth` columns deep.
pub(super) fn bank(depth: usize) -> TubeBankGeometry {
    TubeBankSpec::new(
        Length::new::<meter>(0.4064),
        Length::new::<meter>(0.5),
        Length::new::<meter>(0.061),
        depth,
    )
    .with_pitches(Length::new::<meter>(0.121), Length::new::<meter>(0.064))
    .resolve()
    .expect("reference bank should resolve")
}
