//! Ducting: a single Darcy-Weisbach step with no heat transfer.

use uom::{
    ConstZero,
    si::{
        f64::{HeatTransfer, Power, Pressure, ThermalConductance},
        ratio::ratio,
    },
};

use crate::support::{
    correlations::{darcy_pressure_drop, friction_factor, reynolds},
    thermo::{PropertyProvider, fluid::FluidId},
};

use super::{
    super::{
        failure::{RowFailure, RowFailureCause},
        geometry::DuctGeometry,
        results::{RowRecord, ZoneOutcome, ZoneSolution},
        state::{FluidState, StreamRole},
    },
    Zone,
};

pub(super) fn solve<G>(
    zone: &Zone,
    duct: &DuctGeometry,
    gas: &FluidState,
    coolant: &FluidState,
    gas_props: &G,
) -> ZoneOutcome
where
    G: PropertyProvider<Fluid = FluidId>,
{
    let fail = |failed_gas: FluidState, failed_coolant: FluidState, cause| ZoneOutcome::Failed {
        partial: ZoneSolution::new(gas, coolant, Vec::new(), Vec::new(), Vec::new()),
        failure: RowFailure {
            zone: zone.name().to_owned(),
            row: 0,
            gas: failed_gas,
            coolant: failed_coolant,
            cause,
        },
    };

    let state = gas.state();
    let properties = gas_props
        .density(&state)
        .and_then(|rho| Ok((rho, gas_props.viscosity(&state)?)));
    let (rho, mu) = match properties {
        Ok(values) => values,
        Err(source) => {
            return fail(
                gas.clone(),
                coolant.clone(),
                RowFailureCause::property(StreamRole::Gas)(source),
            );
        }
    };

    let velocity = gas.mass_rate / (rho * duct.flow_area());
    let re = reynolds(rho, velocity, duct.diameter(), mu);
    let friction = friction_factor(re, (duct.roughness() / duct.diameter()).get::<ratio>());
    let dp = darcy_pressure_drop(friction, duct.length(), duct.diameter(), rho, velocity);

    let x = zone.outlet_position();
    let gas_out = gas.advanced(gas.temperature, gas.pressure - dp, x);
    let coolant_out = coolant.advanced(coolant.temperature, coolant.pressure, x);
    if !gas_out.is_physical() {
        let cause = RowFailureCause::NonPhysicalState {
            stream: StreamRole::Gas,
            temperature: gas_out.temperature,
            pressure: gas_out.pressure,
        };
        return fail(gas_out, coolant_out, cause);
    }

    tracing::debug!(zone = zone.name(), re, dp_pa = dp.value, "duct step");

    let record = RowRecord {
        row: 0,
        x,
        gas_reynolds: re,
        coolant_reynolds: 0.0,
        nusselt: 0.0,
        gas_film: HeatTransfer::ZERO,
        coolant_film: HeatTransfer::ZERO,
        ua: ThermalConductance::ZERO,
        duty: Power::ZERO,
        wall_temperature: gas.temperature,
        coolant_temperature: coolant.temperature,
        gas_pressure_drop: dp,
        euler_pressure_drop: None,
        model_pressure_drop: None,
        coolant_pressure_drop: Pressure::ZERO,
        stiffness: 0.0,
    };

    ZoneOutcome::Complete(ZoneSolution::new(
        gas,
        coolant,
        vec![gas_out],
        vec![coolant_out],
        vec![record],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Length, length::meter, pressure::pascal};

    use super::super::super::{
        options::ZoneModels,
        test_support::{coolant_props, cooling_water, gas_props, hot_gas},
    };

    fn duct_zone(diameter: f64, length: f64) -> Zone {
        let geometry = DuctGeometry::new(
            Length::new::<meter>(diameter),
            Length::new::<meter>(length),
            None,
        )
        .expect("duct geometry should be valid");
        Zone::duct("duct", geometry, ZoneModels::default()).at_origin(Length::new::<meter>(0.25))
    }

    #[test]
    fn drops_pressure_without_heat_transfer() {
        let gas = hot_gas();
        let coolant = cooling_water();
        let outcome = duct_zone(0.4, 2.0).solve(&gas, &coolant, &gas_props(), &coolant_props());

        let solution = match outcome {
            ZoneOutcome::Complete(solution) => solution,
            other => panic!("Expected complete duct, got: {other:?}"),
        };

        let record = &solution.history[0];
        assert!(record.gas_reynolds > 2300.0);
        assert!(record.gas_pressure_drop.get::<pascal>() > 0.0);
        assert_eq!(solution.results.duty, Power::ZERO);

        let outlet = &solution.gas_outlet;
        assert_eq!(outlet.temperature, gas.temperature);
        assert_relative_eq!(
            outlet.pressure.get::<pascal>(),
            (gas.pressure - record.gas_pressure_drop).get::<pascal>()
        );
        assert_relative_eq!(outlet.x.get::<meter>(), 2.25);
        assert_eq!(solution.coolant_outlet.temperature, coolant.temperature);
        assert_eq!(solution.coolant_outlet.pressure, coolant.pressure);
    }

    #[test]
    fn narrow_duct_fails_with_negative_pressure() {
        let outcome = duct_zone(0.05, 10.0).solve(
            &hot_gas(),
            &cooling_water(),
            &gas_props(),
            &coolant_props(),
        );

        match outcome {
            ZoneOutcome::Failed {
                partial,
                failure:
                    RowFailure {
                        row: 0,
                        cause: RowFailureCause::NonPhysicalState { stream: StreamRole::Gas, .. },
                        ..
                    },
            } => assert!(partial.history.is_empty()),
            other => panic!("Expected non-physical gas state, got: {other:?}"),
        }
    }
}
