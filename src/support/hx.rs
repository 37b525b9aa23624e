//! Effectiveness-NTU relations for a single exchanger row.
//!
//! The marching solver can update each tube row either explicitly
//! (`Q = UA·ΔT`) or with the exponential effectiveness-NTU form. This module
//! supplies the pieces of the latter: [`CapacitanceRate`], [`Ntu`],
//! [`Effectiveness`], and the cross-flow relation for a row where the gas
//! is mixed across the tubes and the coolant inside each tube is not.
//!
//! ```
//! use twine_crossflow::support::hx::{
//!     CapacitanceRate, CrossFlow, EffectivenessRelation, Mixed, Ntu, Unmixed,
//! };
//! use uom::si::{ratio::ratio, thermal_conductance::watt_per_kelvin};
//!
//! let gas = CapacitanceRate::new::<watt_per_kelvin>(1350.0).unwrap();
//! let coolant = CapacitanceRate::new::<watt_per_kelvin>(2.5e6).unwrap();
//!
//! let eff = CrossFlow::<Mixed, Unmixed>::new()
//!     .effectiveness(Ntu::new(0.1).unwrap(), [gas, coolant])
//!     .unwrap();
//!
//! // With a nearly infinite coolant capacitance, ε → 1 − e^(−NTU).
//! assert!((eff.get::<ratio>() - (1.0 - (-0.1_f64).exp())).abs() < 1e-4);
//! ```

mod capacitance_rate;
mod cross_flow;
mod effectiveness_ntu;

pub use capacitance_rate::CapacitanceRate;
pub use cross_flow::{CrossFlow, MixState, Mixed, Unmixed};
pub use effectiveness_ntu::{Effectiveness, EffectivenessRelation, Ntu};
