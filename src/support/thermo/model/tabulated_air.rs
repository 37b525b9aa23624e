//! High-temperature equilibrium air from a property table.
//!
//! The table holds equilibrium-air properties at about 0.1 atm from 300 K to
//! 6000 K, including the specific heat peak from oxygen dissociation between
//! 3000 K and 4000 K. Values are linearly interpolated in temperature and
//! clamped at the table ends.
//!
//! Density is scaled from the table pressure with the ideal-gas ratio
//! `P / P_table`. Enthalpy and entropy are exact integrals of the
//! piecewise-linear `cp`, referenced to zero at 300 K (and 1 atm for entropy).
//! The other properties are taken as independent of pressure.

use uom::si::{
    available_energy::joule_per_kilogram,
    dynamic_viscosity::pascal_second,
    f64::{
        DynamicViscosity, MassDensity, MolarMass, SpecificHeatCapacity, ThermalConductivity,
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

const TABLE_PRESSURE: f64 = 10_132.5;
const REFERENCE_PRESSURE: f64 = 101_325.0;
const MOLAR_MASS: f64 = 0.028_96;
const UNIVERSAL_GAS_CONSTANT: f64 = 8.314_462_618;

/// Column order of [`TABLE`].
#[derive(Debug, Clone, Copy)]
enum Column {
    Density = 1,
    Cp = 2,
    Viscosity = 3,
    Conductivity = 4,
    Prandtl = 5,
}

// T [K], rho [kg/m3], cp [J/kg·K], mu [Pa·s], k [W/m·K], Pr [-]
const TABLE: [[f64; 6]; 11] = [
    [300.0, 0.1161, 1005.0, 1.846e-5, 0.0263, 0.707],
    [500.0, 0.0697, 1030.0, 2.671e-5, 0.0407, 0.680],
    [1000.0, 0.0348, 1142.0, 4.244e-5, 0.0672, 0.700],
    [1500.0, 0.0232, 1210.0, 5.580e-5, 0.0890, 0.730],
    [2000.0, 0.0174, 1280.0, 6.700e-5, 0.1100, 0.740],
    [2500.0, 0.0135, 1500.0, 7.800e-5, 0.1400, 0.720],
    [3000.0, 0.0108, 2200.0, 8.800e-5, 0.2500, 0.690],
    [3500.0, 0.0085, 3500.0, 9.800e-5, 0.4000, 0.650],
    [4000.0, 0.0070, 4500.0, 1.100e-4, 0.6000, 0.600],
    [5000.0, 0.0050, 3000.0, 1.300e-4, 0.8000, 0.550],
    [6000.0, 0.0040, 2000.0, 1.500e-4, 1.0000, 0.500],
];

/// Tabulated equilibrium-air property model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabulatedAir {
    window: TemperatureWindow,
}

impl Default for TabulatedAir {
    fn default() -> Self {
        Self {
            window: TemperatureWindow {
                min: 200.0,
                max: 6000.0,
            },
        }
    }
}

impl TabulatedAir {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn checked(&self, state: &State<FluidId>) -> Result<f64, PropertyError> {
        if state.fluid.as_pure() != Some(Species::Air) {
            return Err(PropertyError::undefined(format!(
                "tabulated air queried for {:?}",
                state.fluid
            )));
        }
        check_domain("tabulated air", state, self.window)?;
        Ok(state.temperature.get::<kelvin>())
    }
}

fn interpolate(t: f64, column: Column) -> f64 {
    let c = column as usize;
    let first = &TABLE[0];
    let last = &TABLE[TABLE.len() - 1];
    if t <= first[0] {
        return first[c];
    }
    if t >= last[0] {
        return last[c];
    }
    TABLE
        .windows(2)
        .find(|pair| t <= pair[1][0])
        .map_or(last[c], |pair| {
            let frac = (t - pair[0][0]) / (pair[1][0] - pair[0][0]);
            pair[0][c] + frac * (pair[1][c] - pair[0][c])
        })
}

/// Integrates `cp(T)·weight(T)` from the first table temperature to `t`.
///
/// `segment` receives the endpoints and end values of each linear piece and
/// returns its exact integral. Below and above the table `cp` is constant.
fn integrate_cp(t: f64, segment: impl Fn(f64, f64, f64, f64) -> f64) -> f64 {
    let t0 = TABLE[0][0];
    let cp = Column::Cp as usize;
    if t <= t0 {
        return segment(t0, t, TABLE[0][cp], TABLE[0][cp]);
    }

    let mut total = 0.0;
    for pair in TABLE.windows(2) {
        let (lo, hi) = (pair[0][0], pair[1][0]);
        if t <= lo {
            break;
        }
        let upper = t.min(hi);
        total += segment(lo, upper, pair[0][cp], interpolate(upper, Column::Cp));
    }

    let last = &TABLE[TABLE.len() - 1];
    if t > last[0] {
        total += segment(last[0], t, last[cp], last[cp]);
    }
    total
}

impl ThermoModel for TabulatedAir {
    type Fluid = FluidId;
}

impl HasDensity for TabulatedAir {
    fn density(&self, state: &State<FluidId>) -> Result<MassDensity, PropertyError> {
        let t = self.checked(state)?;
        let scale = state.pressure.get::<pascal>() / TABLE_PRESSURE;
        Ok(MassDensity::new::<kilogram_per_cubic_meter>(
            interpolate(t, Column::Density) * scale,
        ))
    }
}

impl HasViscosity for TabulatedAir {
    fn viscosity(&self, state: &State<FluidId>) -> Result<DynamicViscosity, PropertyError> {
        let t = self.checked(state)?;
        Ok(DynamicViscosity::new::<pascal_second>(interpolate(
            t,
            Column::Viscosity,
        )))
    }
}

impl HasCp for TabulatedAir {
    fn cp(&self, state: &State<FluidId>) -> Result<SpecificHeatCapacity, PropertyError> {
        let t = self.checked(state)?;
        Ok(SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(
            interpolate(t, Column::Cp),
        ))
    }
}

impl HasConductivity for TabulatedAir {
    fn conductivity(&self, state: &State<FluidId>) -> Result<ThermalConductivity, PropertyError> {
        let t = self.checked(state)?;
        Ok(ThermalConductivity::new::<watt_per_meter_kelvin>(
            interpolate(t, Column::Conductivity),
        ))
    }
}

impl HasPrandtl for TabulatedAir {
    fn prandtl(&self, state: &State<FluidId>) -> Result<f64, PropertyError> {
        let t = self.checked(state)?;
        Ok(interpolate(t, Column::Prandtl))
    }
}

impl HasEnthalpy for TabulatedAir {
    fn enthalpy(&self, state: &State<FluidId>) -> Result<SpecificEnthalpy, PropertyError> {
        let t = self.checked(state)?;
        let h = integrate_cp(t, |lo, hi, cp_lo, cp_hi| 0.5 * (cp_lo + cp_hi) * (hi - lo));
        Ok(SpecificEnthalpy::new::<joule_per_kilogram>(h))
    }
}

impl HasEntropy for TabulatedAir {
    fn entropy(&self, state: &State<FluidId>) -> Result<SpecificEntropy, PropertyError> {
        let t = self.checked(state)?;

        // cp = a + b·T on each piece, so ∫cp/T dT = a·ln(hi/lo) + b·(hi − lo).
        let s_t = integrate_cp(t, |lo, hi, cp_lo, cp_hi| {
            if (hi - lo).abs() < f64::EPSILON {
                return 0.0;
            }
            let b = (cp_hi - cp_lo) / (hi - lo);
            let a = cp_lo - b * lo;
            a * (hi / lo).ln() + b * (hi - lo)
        });
        let r = UNIVERSAL_GAS_CONSTANT / MOLAR_MASS;
        let s_p = r * (state.pressure.get::<pascal>() / REFERENCE_PRESSURE).ln();

        Ok(SpecificEntropy::new::<joule_per_kilogram_kelvin>(s_t - s_p))
    }
}

impl HasMolarMass for TabulatedAir {
    fn molar_mass(&self, fluid: &FluidId) -> Result<MolarMass, PropertyError> {
        match fluid.as_pure() {
            Some(Species::Air) => Ok(MolarMass::new::<kilogram_per_mole>(MOLAR_MASS)),
            _ => Err(PropertyError::undefined(format!(
                "tabulated air queried for {fluid:?}"
            ))),
        }
    }
}
