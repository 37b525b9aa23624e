//! Row-by-row marching through a tube bank.
//!
//! Each row evaluates properties at the states entering it, builds the
//! gas-film, wall, and coolant-film resistances in series, and advances both
//! streams by the row duty and pressure drops. Bare and finned banks share
//! this loop; they differ only in how the gas side sees the surface.

use uom::si::{
    f64::{
        Area, DynamicViscosity, HeatTransfer, MassDensity, MassRate, MolarMass, Power,
        SpecificHeatCapacity, TemperatureInterval, ThermalConductance, ThermalConductivity,
        Velocity,
    },
    ratio::ratio,
};

use crate::support::{
    correlations::{
        DUCT_LAMINAR_NUSSELT, euler_number, flat_plate_nusselt, friction_factor, gnielinski,
        darcy_pressure_drop, reynolds, row_pressure_drop, thermal_entry_length,
    },
    heat_transfer::{NusseltContext, ReynoldsContext},
    hx::{CapacitanceRate, CrossFlow, EffectivenessRelation, Mixed, Ntu, Unmixed},
    pressure_drop::PressureDropContext,
    thermo::{PropertyError, PropertyProvider, State, fluid::FluidId},
    units::TemperatureDifference,
};

use super::{
    super::{
        accuracy,
        failure::{RowFailure, RowFailureCause},
        geometry::{FinGeometry, TubeBankGeometry},
        options::{GasPressureDropSource, RowEnergyUpdate},
        results::{RowRecord, ZoneOutcome, ZoneSolution},
        state::{FluidState, StreamRole},
    },
    Zone,
};

/// The gas-side surface of a bank.
#[derive(Debug, Clone, Copy)]
pub(super) enum Surface<'a> {
    Bare(&'a TubeBankGeometry),
    Finned {
        bank: &'a TubeBankGeometry,
        fins: &'a FinGeometry,
    },
}

impl Surface<'_> {
    fn bank(&self) -> &TubeBankGeometry {
        match self {
            Self::Bare(bank) | Self::Finned { bank, .. } => *bank,
        }
    }

    fn open_fraction(&self) -> f64 {
        match self {
            Self::Bare(_) => 1.0,
            Self::Finned { fins, .. } => fins.blockage(),
        }
    }

    fn open_frontal_area(&self) -> Area {
        self.bank().frontal_area() * self.open_fraction()
    }

    fn minimum_flow_area(&self) -> Area {
        self.bank().minimum_flow_area() * self.open_fraction()
    }
}

/// Gas properties at the state entering a row.
#[derive(Debug, Clone, Copy)]
struct GasProperties {
    density: MassDensity,
    viscosity: DynamicViscosity,
    cp: SpecificHeatCapacity,
    conductivity: ThermalConductivity,
    prandtl: f64,
    molar_mass: MolarMass,
}

impl GasProperties {
    fn at<G>(props: &G, state: &State<FluidId>) -> Result<Self, PropertyError>
    where
        G: PropertyProvider<Fluid = FluidId>,
    {
        Ok(Self {
            density: props.density(state)?,
            viscosity: props.viscosity(state)?,
            cp: props.cp(state)?,
            conductivity: props.conductivity(state)?,
            prandtl: props.prandtl(state)?,
            molar_mass: props.molar_mass(&state.fluid)?,
        })
    }
}

/// Coolant properties at the state entering a row.
#[derive(Debug, Clone, Copy)]
struct CoolantProperties {
    density: MassDensity,
    viscosity: DynamicViscosity,
    cp: SpecificHeatCapacity,
    conductivity: ThermalConductivity,
    prandtl: f64,
}

impl CoolantProperties {
    fn at<C>(props: &C, state: &State<FluidId>) -> Result<Self, PropertyError>
    where
        C: PropertyProvider<Fluid = FluidId>,
    {
        Ok(Self {
            density: props.density(state)?,
            viscosity: props.viscosity(state)?,
            cp: props.cp(state)?,
            conductivity: props.conductivity(state)?,
            prandtl: props.prandtl(state)?,
        })
    }
}

/// One solved row.
struct Step {
    gas: FluidState,
    coolant: FluidState,
    record: RowRecord,
}

pub(super) fn solve<G, C>(
    zone: &Zone,
    surface: Surface<'_>,
    gas_inlet: &FluidState,
    coolant_inlet: &FluidState,
    gas_props: &G,
    coolant_props: &C,
) -> ZoneOutcome
where
    G: PropertyProvider<Fluid = FluidId>,
    C: PropertyProvider<Fluid = FluidId>,
{
    let depth = surface.bank().depth();
    let mut gas_rows = Vec::with_capacity(depth);
    let mut coolant_rows = Vec::with_capacity(depth);
    let mut history = Vec::with_capacity(depth);

    let mut gas = gas_inlet.clone();
    let mut coolant = coolant_inlet.clone();

    for row in 0..depth {
        let failure = match step(zone, surface, row, &gas, &coolant, gas_props, coolant_props) {
            Ok(next) => match non_physical(&next) {
                None => {
                    gas_rows.push(next.gas.clone());
                    coolant_rows.push(next.coolant.clone());
                    history.push(next.record);
                    gas = next.gas;
                    coolant = next.coolant;
                    continue;
                }
                Some(cause) => (next.gas, next.coolant, cause),
            },
            Err(cause) => (gas, coolant, cause),
        };

        let (gas, coolant, cause) = failure;
        return ZoneOutcome::Failed {
            partial: ZoneSolution::new(gas_inlet, coolant_inlet, gas_rows, coolant_rows, history),
            failure: RowFailure {
                zone: zone.name().to_owned(),
                row,
                gas,
                coolant,
                cause,
            },
        };
    }

    ZoneOutcome::Complete(ZoneSolution::new(
        gas_inlet,
        coolant_inlet,
        gas_rows,
        coolant_rows,
        history,
    ))
}

fn non_physical(step: &Step) -> Option<RowFailureCause> {
    [&step.gas, &step.coolant]
        .into_iter()
        .find(|state| !state.is_physical())
        .map(|state| RowFailureCause::NonPhysicalState {
            stream: state.role,
            temperature: state.temperature,
            pressure: state.pressure,
        })
}

#[allow(clippy::too_many_lines)]
fn step<G, C>(
    zone: &Zone,
    surface: Surface<'_>,
    row: usize,
    gas: &FluidState,
    coolant: &FluidState,
    gas_props: &G,
    coolant_props: &C,
) -> Result<Step, RowFailureCause>
where
    G: PropertyProvider<Fluid = FluidId>,
    C: PropertyProvider<Fluid = FluidId>,
{
    let bank = surface.bank();
    let models = zone.models();
    let g = GasProperties::at(gas_props, &gas.state())
        .map_err(RowFailureCause::property(StreamRole::Gas))?;
    let c = CoolantProperties::at(coolant_props, &coolant.state())
        .map_err(RowFailureCause::property(StreamRole::Coolant))?;

    let d = bank.tube_diameter();
    let s_t = bank.transverse_pitch();
    let s_l = bank.longitudinal_pitch();

    // Gas Reynolds number: the model's own definition when it has one.
    let min_area_velocity: Velocity = gas.mass_rate / (g.density * surface.minimum_flow_area());
    let own_reynolds = models.heat_transfer.reynolds(&ReynoldsContext {
        density: g.density,
        viscosity: g.viscosity,
        mass_rate: gas.mass_rate,
        frontal_area: surface.open_frontal_area(),
        tube_diameter: d,
        transverse_pitch: s_t,
        longitudinal_pitch: s_l,
    });
    let (gas_reynolds, max_velocity) = match own_reynolds {
        Some(re) => (re, g.viscosity / (g.density * d) * re),
        None => (
            reynolds(g.density, min_area_velocity, d, g.viscosity),
            min_area_velocity,
        ),
    };

    let nusselt = models
        .heat_transfer
        .nusselt(&NusseltContext {
            reynolds: gas_reynolds,
            prandtl: g.prandtl,
            wall_prandtl: None,
            tube_diameter: d,
            transverse_pitch: s_t,
            longitudinal_pitch: s_l,
            porosity: bank.porosity(),
            rows: bank.depth(),
            temperature: gas.temperature,
            density: g.density,
            viscosity: g.viscosity,
            molar_mass: g.molar_mass,
        })
        .map_err(RowFailureCause::Correlation)?;
    let tube_film: HeatTransfer = g.conductivity * nusselt / d;

    let (gas_conductance, gas_film): (ThermalConductance, HeatTransfer) = match surface {
        Surface::Bare(bank) => (tube_film * bank.gas_area(), tube_film),
        Surface::Finned { bank, fins } => {
            let fin_film = fin_film(row, bank, fins, gas.mass_rate, &g);
            let ua = tube_film * fins.tube_area() + fin_film * fins.fin_area();
            (ua, ua / (fins.tube_area() + fins.fin_area()))
        }
    };

    // Coolant splits evenly across every tube in the bank.
    let d_in = bank.inner_diameter();
    let width = bank.width();
    #[allow(clippy::cast_precision_loss)]
    let tubes = bank.tube_count() as f64;
    let bore: Area = d_in * d_in * std::f64::consts::FRAC_PI_4;
    let coolant_velocity: Velocity = coolant.mass_rate / (c.density * bore * tubes);
    let coolant_reynolds = reynolds(c.density, coolant_velocity, d_in, c.viscosity);
    let friction = friction_factor(coolant_reynolds, (bank.roughness() / d_in).get::<ratio>());
    let coolant_nusselt = gnielinski(coolant_reynolds, c.prandtl, friction, d_in, width);
    let coolant_film: HeatTransfer = c.conductivity * coolant_nusselt / d_in;

    let wall_shape = 2.0 * std::f64::consts::PI * bank.average_rows()
        / (d / d_in).get::<ratio>().ln();
    let wall: ThermalConductance = bank.wall_conductivity() * width * wall_shape;
    let ua: ThermalConductance = (gas_conductance.recip()
        + wall.recip()
        + (coolant_film * bank.coolant_area()).recip())
    .recip();

    let c_gas = CapacitanceRate::from_mass_rate_and_specific_heat(gas.mass_rate, g.cp)
        .map_err(RowFailureCause::constraint("gas capacitance rate"))?;
    let c_coolant = CapacitanceRate::from_mass_rate_and_specific_heat(coolant.mass_rate, c.cp)
        .map_err(RowFailureCause::constraint("coolant capacitance rate"))?;
    let stiffness = accuracy::stiffness(ua, c_gas, c_coolant);
    if stiffness >= 1.0 {
        tracing::warn!(
            zone = zone.name(),
            row,
            stiffness,
            "explicit row update is unstable; refine the row discretization"
        );
    }

    let driving = gas.temperature.minus(coolant.temperature);
    let duty: Power = match models.energy_update {
        RowEnergyUpdate::Explicit => ua * driving,
        RowEnergyUpdate::EffectivenessNtu => {
            let rates = [c_gas, c_coolant];
            let ntu = Ntu::from_conductance_and_capacitance_rates(ua, rates)
                .map_err(RowFailureCause::constraint("row NTU"))?;
            let effectiveness = CrossFlow::<Mixed, Unmixed>::new()
                .effectiveness(ntu, rates)
                .map_err(RowFailureCause::constraint("row effectiveness"))?;
            let (c_min, _) = CapacitanceRate::ordered(rates);
            *c_min * driving * effectiveness.get::<ratio>()
        }
    };

    // Gas pressure drop from both sources; one is applied.
    let euler = euler_number(gas_reynolds, bank.pitch_ratio(), models.euler_correction);
    let euler_velocity = match surface {
        Surface::Bare(_) => max_velocity,
        Surface::Finned { .. } => min_area_velocity,
    };
    let euler_drop = row_pressure_drop(euler, g.density, euler_velocity, bank.average_rows());
    let model_drop = models
        .pressure_drop
        .pressure_drop(&PressureDropContext {
            density: g.density,
            viscosity: g.viscosity,
            wall_viscosity: None,
            mass_rate: gas.mass_rate,
            frontal_area: surface.open_frontal_area(),
            tube_diameter: d,
            transverse_pitch: s_t,
            longitudinal_pitch: s_l,
            path_length: s_l,
        })
        .map_err(RowFailureCause::Correlation)?;
    let gas_drop = match models.pressure_drop_source {
        GasPressureDropSource::EulerCorrelation => euler_drop,
        GasPressureDropSource::InjectedModel => model_drop,
    };

    #[allow(clippy::cast_precision_loss)]
    let depth = bank.depth() as f64;
    let coolant_drop = darcy_pressure_drop(
        friction,
        width / depth,
        d_in,
        c.density,
        coolant_velocity,
    );

    #[allow(clippy::cast_precision_loss)]
    let x = zone.origin() + s_l * (row as f64 + 1.0);
    let gas_cooling: TemperatureInterval = duty / *c_gas;
    let coolant_heating: TemperatureInterval = duty / *c_coolant;
    let wall_drop: TemperatureInterval = duty / gas_conductance;

    tracing::debug!(
        zone = zone.name(),
        row,
        re = gas_reynolds,
        nu = nusselt,
        h = gas_film.value,
        ua = ua.value,
        q_w = duty.value,
        t_gas_k = gas.temperature.value,
        p_gas_pa = gas.pressure.value,
        "row solved"
    );

    Ok(Step {
        gas: gas.advanced(gas.temperature - gas_cooling, gas.pressure - gas_drop, x),
        coolant: coolant.advanced(
            coolant.temperature + coolant_heating,
            coolant.pressure - coolant_drop,
            x,
        ),
        record: RowRecord {
            row,
            x,
            gas_reynolds,
            coolant_reynolds,
            nusselt,
            gas_film,
            coolant_film,
            ua,
            duty,
            wall_temperature: gas.temperature - wall_drop,
            coolant_temperature: coolant.temperature,
            gas_pressure_drop: gas_drop,
            euler_pressure_drop: Some(euler_drop),
            model_pressure_drop: Some(model_drop),
            coolant_pressure_drop: coolant_drop,
            stiffness,
        },
    })
}

/// Fin film coefficient at the middle of row `row`.
///
/// Laminar flat-plate flow while the local position is inside the thermal
/// entry length of the fin channel, fully developed duct flow after it.
fn fin_film(
    row: usize,
    bank: &TubeBankGeometry,
    fins: &FinGeometry,
    mass_rate: MassRate,
    gas: &GasProperties,
) -> HeatTransfer {
    #[allow(clippy::cast_precision_loss)]
    let x_local = bank.longitudinal_pitch() * (row as f64 + 0.5);
    let velocity: Velocity = mass_rate / (gas.density * bank.frontal_area() * fins.blockage());
    let d_h = fins.hydraulic_diameter();
    let entry = thermal_entry_length(gas.density, velocity, gas.viscosity, gas.prandtl, d_h);

    if x_local < entry {
        let re_x = reynolds(gas.density, velocity, x_local, gas.viscosity);
        gas.conductivity * flat_plate_nusselt(re_x, gas.prandtl) / x_local
    } else {
        gas.conductivity * DUCT_LAMINAR_NUSSELT / d_h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::Pressure,
        length::meter,
        pressure::pascal,
        thermodynamic_temperature::kelvin,
    };

    use crate::support::{heat_transfer::HeatTransferModel, thermo::capability::HasCp};

    use super::super::super::{
        geometry::FinSpec,
        options::ZoneModels,
        test_support::{bank, coolant_props, cooling_water, gas_props, hot_gas, nitrogen},
    };

    fn bare(depth: usize, models: ZoneModels) -> Zone {
        Zone::bare_bank("bank", bank(depth), models)
    }

    fn complete(outcome: ZoneOutcome) -> ZoneSolution {
        match outcome {
            ZoneOutcome::Complete(solution) => solution,
            ZoneOutcome::Failed { failure, .. } => panic!("Expected complete zone, got: {failure}"),
        }
    }

    #[test]
    fn four_rows_cool_the_gas_monotonically() {
        let zone = bare(4, ZoneModels::default());
        let solution = complete(zone.solve(
            &hot_gas(),
            &cooling_water(),
            &gas_props(),
            &coolant_props(),
        ));

        assert_eq!(solution.gas.len(), 4);
        assert_eq!(solution.coolant.len(), 4);
        assert_eq!(solution.history.len(), 4);

        let mut previous_gas = hot_gas();
        let mut previous_coolant = cooling_water();
        for (i, (gas, coolant)) in solution.gas.iter().zip(&solution.coolant).enumerate() {
            assert!(gas.temperature < previous_gas.temperature, "row {i} did not cool");
            assert!(gas.pressure < previous_gas.pressure, "row {i} gained pressure");
            assert!(coolant.temperature > previous_coolant.temperature);
            assert!(solution.history[i].duty.value > 0.0);
            #[allow(clippy::cast_precision_loss)]
            let x = 0.064 * (i as f64 + 1.0);
            assert_relative_eq!(gas.x.get::<meter>(), x, max_relative = 1e-12);
            assert_eq!(gas.x, coolant.x);
            previous_gas = gas.clone();
            previous_coolant = coolant.clone();
        }

        assert_eq!(&solution.gas_outlet, solution.gas.last().unwrap());
        assert!(solution.results.duty.value > 0.0);
    }

    /// Checks that each row's duty leaves the gas and enters the coolant.
    fn assert_rows_conserve_duty(zone: &Zone) -> Result<(), PropertyError> {
        let solution = complete(zone.solve(
            &hot_gas(),
            &cooling_water(),
            &gas_props(),
            &coolant_props(),
        ));
        assert_eq!(solution.history.len(), zone.depth());

        let mut gas_in = hot_gas();
        let mut coolant_in = cooling_water();
        let rows = solution.gas.iter().zip(&solution.coolant);
        for ((gas, coolant), record) in rows.zip(&solution.history) {
            let cp_gas = gas_props().cp(&gas_in.state())?;
            let cp_coolant = coolant_props().cp(&coolant_in.state())?;
            let q_gas = gas.mass_rate * cp_gas * gas_in.temperature.minus(gas.temperature);
            let q_coolant =
                coolant.mass_rate * cp_coolant * coolant.temperature.minus(coolant_in.temperature);

            assert!(record.duty.value > 0.0);
            assert_relative_eq!(q_gas.value, record.duty.value, max_relative = 1e-9);
            assert_relative_eq!(q_coolant.value, record.duty.value, max_relative = 1e-9);
            gas_in = gas.clone();
            coolant_in = coolant.clone();
        }
        Ok(())
    }

    #[test]
    fn row_duty_is_conserved_between_streams() -> Result<(), PropertyError> {
        assert_rows_conserve_duty(&bare(4, ZoneModels::default()))
    }

    #[test]
    fn effectiveness_rows_conserve_duty() -> Result<(), PropertyError> {
        assert_rows_conserve_duty(&bare(
            4,
            ZoneModels {
                energy_update: RowEnergyUpdate::EffectivenessNtu,
                ..ZoneModels::default()
            },
        ))
    }

    #[test]
    fn finned_rows_conserve_duty() -> Result<(), PropertyError> {
        let geometry = bank(4);
        let fins = FinSpec::from_fins_per_inch(3.7)
            .resolve(&geometry)
            .expect("fins should fit");
        assert_rows_conserve_duty(&Zone::finned_bank(
            "finned",
            geometry,
            fins,
            ZoneModels::default(),
        ))?;

        let geometry = bank(4);
        let fins = FinSpec::from_fins_per_inch(3.7)
            .resolve(&geometry)
            .expect("fins should fit");
        let models = ZoneModels {
            energy_update: RowEnergyUpdate::EffectivenessNtu,
            ..ZoneModels::default()
        };
        assert_rows_conserve_duty(&Zone::finned_bank("finned", geometry, fins, models))
    }

    #[test]
    fn pressure_drop_source_selects_applied_drop() {
        let euler = complete(bare(2, ZoneModels::default()).solve(
            &hot_gas(),
            &cooling_water(),
            &gas_props(),
            &coolant_props(),
        ));
        let injected = complete(
            bare(
                2,
                ZoneModels {
                    pressure_drop_source: GasPressureDropSource::InjectedModel,
                    ..ZoneModels::default()
                },
            )
            .solve(&hot_gas(), &cooling_water(), &gas_props(), &coolant_props()),
        );

        let first = &euler.history[0];
        assert_eq!(Some(first.gas_pressure_drop), first.euler_pressure_drop);
        assert!(first.model_pressure_drop.is_some());

        let first = &injected.history[0];
        assert_eq!(Some(first.gas_pressure_drop), first.model_pressure_drop);
        assert_relative_eq!(
            (hot_gas().pressure - injected.gas[0].pressure).value,
            first.gas_pressure_drop.value,
            max_relative = 1e-12
        );
    }

    #[test]
    fn effectiveness_update_never_exceeds_explicit() {
        let explicit = complete(bare(1, ZoneModels::default()).solve(
            &hot_gas(),
            &cooling_water(),
            &gas_props(),
            &coolant_props(),
        ));
        let ntu = complete(
            bare(
                1,
                ZoneModels {
                    energy_update: RowEnergyUpdate::EffectivenessNtu,
                    ..ZoneModels::default()
                },
            )
            .solve(&hot_gas(), &cooling_water(), &gas_props(), &coolant_props()),
        );

        let q_explicit = explicit.history[0].duty.value;
        let q_ntu = ntu.history[0].duty.value;
        let stiffness = explicit.history[0].stiffness;
        assert!(q_ntu < q_explicit);
        assert!((q_explicit - q_ntu) / q_explicit < stiffness);
    }

    #[test]
    fn negative_pressure_fails_at_the_offending_row() {
        let zone = bare(10, ZoneModels::default());
        let outcome = zone.solve(
            &nitrogen(5_000.0),
            &cooling_water(),
            &gas_props(),
            &coolant_props(),
        );

        match outcome {
            ZoneOutcome::Failed { partial, failure } => {
                assert_eq!(failure.zone, "bank");
                assert!(failure.row > 0 && failure.row < 10);
                assert_eq!(partial.history.len(), failure.row);
                assert_eq!(partial.gas.len(), failure.row);
                assert_eq!(partial.results.rows_solved, failure.row);
                match failure.cause {
                    RowFailureCause::NonPhysicalState {
                        stream: StreamRole::Gas,
                        pressure,
                        ..
                    } => assert!(pressure < Pressure::new::<pascal>(0.0)),
                    other => panic!("Expected non-physical gas state, got: {other:?}"),
                }
            }
            ZoneOutcome::Complete(_) => panic!("Expected the march to fail"),
        }
    }

    #[test]
    fn finned_bank_adds_fin_area() {
        let geometry = bank(4);
        let fins = FinSpec::from_fins_per_inch(3.7)
            .resolve(&geometry)
            .expect("fins should fit");
        let finned = Zone::finned_bank("finned", geometry.clone(), fins, ZoneModels::default());
        let solution = complete(finned.solve(
            &hot_gas(),
            &cooling_water(),
            &gas_props(),
            &coolant_props(),
        ));

        assert_eq!(solution.history.len(), 4);
        for record in &solution.history {
            assert!(record.gas_film.value > 0.0);
            assert!(record.duty.value > 0.0);
            assert!(record.ua.value > 0.0);
        }
        assert!(solution.gas_outlet.temperature.get::<kelvin>() < 3000.0);
    }

    #[test]
    fn unsupported_gas_is_a_property_failure() {
        let gas = hot_gas();
        // The water model does not know nitrogen.
        let outcome = bare(2, ZoneModels::default()).solve(
            &gas,
            &cooling_water(),
            &coolant_props(),
            &coolant_props(),
        );

        match outcome.failure() {
            Some(RowFailure {
                row: 0,
                cause: RowFailureCause::Property {
                    stream: StreamRole::Gas,
                    ..
                },
                ..
            }) => {}
            other => panic!("Expected gas property failure at row 0, got: {other:?}"),
        }
        assert!(outcome.solution().history.is_empty());
        assert_eq!(outcome.solution().gas_outlet, gas);
    }

    #[test]
    fn zukauskas_bank_solves() {
        let zone = bare(
            3,
            ZoneModels {
                heat_transfer: HeatTransferModel::Zukauskas,
                ..ZoneModels::default()
            },
        );
        let solution = complete(zone.solve(
            &hot_gas(),
            &cooling_water(),
            &gas_props(),
            &coolant_props(),
        ));
        assert_eq!(solution.history.len(), 3);
        assert!(solution.history.iter().all(|r| r.nusselt > 0.0));
    }
}
