//! Zone results and per-row history.

use uom::{
    ConstZero,
    si::f64::{
        HeatTransfer, Length, Power, Pressure, ThermalConductance, ThermodynamicTemperature,
    },
};

use super::{failure::RowFailure, state::FluidState};

/// Everything computed for one solved row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowRecord {
    pub row: usize,
    /// Axial position of the row outlet.
    pub x: Length,
    pub gas_reynolds: f64,
    pub coolant_reynolds: f64,
    /// Tube Nusselt number from the zone's heat-transfer model.
    pub nusselt: f64,
    /// Gas film coefficient, area-weighted over tubes and fins.
    pub gas_film: HeatTransfer,
    pub coolant_film: HeatTransfer,
    pub ua: ThermalConductance,
    pub duty: Power,
    /// Gas-side tube surface temperature, `T_gas − Q·R_gas`.
    pub wall_temperature: ThermodynamicTemperature,
    /// Coolant temperature entering the row.
    pub coolant_temperature: ThermodynamicTemperature,
    /// The gas pressure drop applied to the marched state.
    pub gas_pressure_drop: Pressure,
    /// Euler-number row correlation. `None` for ducts.
    pub euler_pressure_drop: Option<Pressure>,
    /// The zone's injected pressure-drop model. `None` for ducts.
    pub model_pressure_drop: Option<Pressure>,
    pub coolant_pressure_drop: Pressure,
    /// Explicit-update stiffness `λ = UA·(1/C_gas + 1/C_coolant)`.
    pub stiffness: f64,
}

/// Aggregates over the solved rows of a zone.
///
/// Film coefficients and Reynolds numbers are arithmetic means; duty and
/// pressure drops are sums.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneResults {
    pub rows_solved: usize,
    pub duty: Power,
    pub gas_film: HeatTransfer,
    pub coolant_film: HeatTransfer,
    pub gas_reynolds: f64,
    pub coolant_reynolds: f64,
    pub gas_pressure_drop: Pressure,
    pub coolant_pressure_drop: Pressure,
    pub max_stiffness: f64,
}

impl ZoneResults {
    /// Aggregates a row history. No rows gives all zeros.
    #[must_use]
    pub fn from_rows(rows: &[RowRecord]) -> Self {
        let mut results = Self {
            rows_solved: rows.len(),
            duty: Power::ZERO,
            gas_film: HeatTransfer::ZERO,
            coolant_film: HeatTransfer::ZERO,
            gas_reynolds: 0.0,
            coolant_reynolds: 0.0,
            gas_pressure_drop: Pressure::ZERO,
            coolant_pressure_drop: Pressure::ZERO,
            max_stiffness: 0.0,
        };
        if rows.is_empty() {
            return results;
        }

        for row in rows {
            results.duty += row.duty;
            results.gas_film += row.gas_film;
            results.coolant_film += row.coolant_film;
            results.gas_reynolds += row.gas_reynolds;
            results.coolant_reynolds += row.coolant_reynolds;
            results.gas_pressure_drop += row.gas_pressure_drop;
            results.coolant_pressure_drop += row.coolant_pressure_drop;
            results.max_stiffness = results.max_stiffness.max(row.stiffness);
        }

        #[allow(clippy::cast_precision_loss)]
        let n = rows.len() as f64;
        results.gas_film /= n;
        results.coolant_film /= n;
        results.gas_reynolds /= n;
        results.coolant_reynolds /= n;
        results
    }
}

/// The rows a zone solved and the states it hands downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneSolution {
    /// Marched gas states, one per solved row.
    pub gas: Vec<FluidState>,
    /// Marched coolant states, one per solved row.
    pub coolant: Vec<FluidState>,
    pub history: Vec<RowRecord>,
    pub results: ZoneResults,
    /// Last marched gas state, or the zone inlet if no row was solved.
    pub gas_outlet: FluidState,
    /// Last marched coolant state, or the zone inlet if no row was solved.
    pub coolant_outlet: FluidState,
}

impl ZoneSolution {
    pub(super) fn new(
        gas_inlet: &FluidState,
        coolant_inlet: &FluidState,
        gas: Vec<FluidState>,
        coolant: Vec<FluidState>,
        history: Vec<RowRecord>,
    ) -> Self {
        let gas_outlet = gas.last().unwrap_or(gas_inlet).clone();
        let coolant_outlet = coolant.last().unwrap_or(coolant_inlet).clone();
        Self {
            results: ZoneResults::from_rows(&history),
            gas,
            coolant,
            history,
            gas_outlet,
            coolant_outlet,
        }
    }
}

/// The outcome of solving one zone.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneOutcome {
    /// Every row was solved.
    Complete(ZoneSolution),
    /// A row failed. `partial` holds the rows solved before it.
    Failed {
        partial: ZoneSolution,
        failure: RowFailure,
    },
}

impl ZoneOutcome {
    /// The solved rows, complete or partial.
    #[must_use]
    pub fn solution(&self) -> &ZoneSolution {
        match self {
            Self::Complete(solution) | Self::Failed { partial: solution, .. } => solution,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&RowFailure> {
        match self {
            Self::Complete(_) => None,
            Self::Failed { failure, .. } => Some(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        heat_transfer::watt_per_square_meter_kelvin, length::meter, power::watt,
        pressure::pascal, thermal_conductance::watt_per_kelvin,
        thermodynamic_temperature::kelvin,
    };

    fn record(row: usize, duty: f64, film: f64, stiffness: f64) -> RowRecord {
        RowRecord {
            row,
            x: Length::new::<meter>(0.1),
            gas_reynolds: 1000.0 * (row as f64 + 1.0),
            coolant_reynolds: 5e5,
            nusselt: 50.0,
            gas_film: HeatTransfer::new::<watt_per_square_meter_kelvin>(film),
            coolant_film: HeatTransfer::new::<watt_per_square_meter_kelvin>(2e4),
            ua: ThermalConductance::new::<watt_per_kelvin>(30.0),
            duty: Power::new::<watt>(duty),
            wall_temperature: ThermodynamicTemperature::new::<kelvin>(1500.0),
            coolant_temperature: ThermodynamicTemperature::new::<kelvin>(300.0),
            gas_pressure_drop: Pressure::new::<pascal>(100.0),
            euler_pressure_drop: Some(Pressure::new::<pascal>(100.0)),
            model_pressure_drop: Some(Pressure::new::<pascal>(80.0)),
            coolant_pressure_drop: Pressure::new::<pascal>(2000.0),
            stiffness,
        }
    }

    #[test]
    fn sums_and_means() {
        let results = ZoneResults::from_rows(&[
            record(0, 1000.0, 100.0, 0.05),
            record(1, 3000.0, 200.0, 0.02),
        ]);

        assert_eq!(results.rows_solved, 2);
        assert_relative_eq!(results.duty.get::<watt>(), 4000.0);
        assert_relative_eq!(
            results.gas_film.get::<watt_per_square_meter_kelvin>(),
            150.0
        );
        assert_relative_eq!(results.gas_reynolds, 1500.0);
        assert_relative_eq!(results.gas_pressure_drop.get::<pascal>(), 200.0);
        assert_relative_eq!(results.coolant_pressure_drop.get::<pascal>(), 4000.0);
        assert_relative_eq!(results.max_stiffness, 0.05);
    }

    #[test]
    fn no_rows_is_all_zero() {
        let results = ZoneResults::from_rows(&[]);
        assert_eq!(results.rows_solved, 0);
        assert_eq!(results.duty, Power::ZERO);
        assert_eq!(results.gas_reynolds, 0.0);
    }
}
