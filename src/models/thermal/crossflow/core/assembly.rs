//! Zones in series and the whole-exchanger solve.

mod balance;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::{
    ConstZero,
    si::f64::{Length, Power, ThermodynamicTemperature},
};

use crate::support::thermo::{PropertyError, PropertyProvider, fluid::FluidId};

use super::{
    failure::RowFailure,
    results::{RowRecord, ZoneOutcome, ZoneResults, ZoneSolution},
    state::{FluidState, Stream},
    zone::Zone,
};

pub use balance::{EnergyBalance, TargetCheck};

/// What the assembly does when a zone fails part way through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Return [`AssemblyError::ZoneFailed`].
    #[default]
    Abort,
    /// Keep the rows solved so far and stop. Downstream zones are not solved.
    Truncate,
}

/// Whether every zone was marched to its outlet.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveStatus {
    Complete,
    /// Stopped at this failure under [`FailurePolicy::Truncate`].
    Truncated(RowFailure),
}

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error(transparent)]
    ZoneFailed(Box<RowFailure>),

    #[error("property evaluation failed: {context}")]
    Property {
        context: &'static str,
        #[source]
        source: PropertyError,
    },
}

/// Per-zone slice of a [`Solution`].
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneReport {
    pub name: String,
    pub results: ZoneResults,
    pub history: Vec<RowRecord>,
    /// The exact states handed to the zone.
    pub gas_inlet: FluidState,
    pub coolant_inlet: FluidState,
    pub gas_outlet: FluidState,
    pub coolant_outlet: FluidState,
}

/// The result of [`HeatExchanger::solve`].
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub gas: Stream,
    pub coolant: Stream,
    pub zones: Vec<ZoneReport>,
    pub status: SolveStatus,
    /// Always present for a complete solve. A truncated solve may stop at a
    /// state the property models reject, which leaves this `None`.
    pub energy_balance: Option<EnergyBalance>,
    /// Present when the exchanger has a target gas outlet temperature and
    /// the energy balance was evaluated.
    pub target: Option<TargetCheck>,
}

impl Solution {
    #[must_use]
    pub fn gas_outlet(&self) -> &FluidState {
        self.gas.outlet()
    }

    #[must_use]
    pub fn coolant_outlet(&self) -> &FluidState {
        self.coolant.outlet()
    }

    /// Sum of the row duties over every solved row.
    #[must_use]
    pub fn total_duty(&self) -> Power {
        self.zones
            .iter()
            .fold(Power::ZERO, |total, zone| total + zone.results.duty)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.status, SolveStatus::Complete)
    }
}

/// A named series of zones sharing one gas and one coolant stream.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatExchanger {
    name: String,
    zones: Vec<Zone>,
    failure_policy: FailurePolicy,
    target: Option<ThermodynamicTemperature>,
}

impl HeatExchanger {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            zones: Vec::new(),
            failure_policy: FailurePolicy::default(),
            target: None,
        }
    }

    #[must_use]
    pub fn with_failure_policy(self, failure_policy: FailurePolicy) -> Self {
        Self {
            failure_policy,
            ..self
        }
    }

    /// Sets a target gas outlet temperature to check the solution against.
    #[must_use]
    pub fn with_target(self, target: ThermodynamicTemperature) -> Self {
        Self {
            target: Some(target),
            ..self
        }
    }

    /// Appends a zone directly downstream of the last one.
    pub fn add_zone(&mut self, zone: Zone) -> &mut Self {
        let origin = self
            .zones
            .last()
            .map_or(Length::ZERO, Zone::outlet_position);
        self.zones.push(zone.at_origin(origin));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    #[must_use]
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    #[must_use]
    pub fn target(&self) -> Option<ThermodynamicTemperature> {
        self.target
    }

    /// Marches both streams through every zone in order.
    ///
    /// Each zone receives the previous zone's outlet states unchanged. The
    /// stream profiles are rebuilt from the inlets on every call.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::ZoneFailed`] if a zone fails under
    /// [`FailurePolicy::Abort`]. A complete solve whose outlet enthalpies
    /// cannot be evaluated returns [`AssemblyError::Property`]. Under
    /// [`FailurePolicy::Truncate`] that case is logged and the solution keeps
    /// its [`SolveStatus::Truncated`] status.
    pub fn solve<G, C>(
        &self,
        gas_inlet: &FluidState,
        coolant_inlet: &FluidState,
        gas_props: &G,
        coolant_props: &C,
    ) -> Result<Solution, AssemblyError>
    where
        G: PropertyProvider<Fluid = FluidId>,
        C: PropertyProvider<Fluid = FluidId>,
    {
        let mut gas = Stream::new(gas_inlet.clone());
        let mut coolant = Stream::new(coolant_inlet.clone());
        let mut zones = Vec::with_capacity(self.zones.len());
        let mut status = SolveStatus::Complete;

        for zone in &self.zones {
            let gas_in = gas.outlet().clone();
            let coolant_in = coolant.outlet().clone();

            let (solution, failure) =
                match zone.solve(&gas_in, &coolant_in, gas_props, coolant_props) {
                    ZoneOutcome::Complete(solution) => (solution, None),
                    ZoneOutcome::Failed { partial, failure } => match self.failure_policy {
                        FailurePolicy::Abort => {
                            return Err(AssemblyError::ZoneFailed(Box::new(failure)));
                        }
                        FailurePolicy::Truncate => (partial, Some(failure)),
                    },
                };

            let ZoneSolution {
                gas: gas_rows,
                coolant: coolant_rows,
                history,
                results,
                gas_outlet,
                coolant_outlet,
            } = solution;
            gas.extend(gas_rows);
            coolant.extend(coolant_rows);
            zones.push(ZoneReport {
                name: zone.name().to_owned(),
                results,
                history,
                gas_inlet: gas_in,
                coolant_inlet: coolant_in,
                gas_outlet,
                coolant_outlet,
            });

            if let Some(failure) = failure {
                tracing::warn!(
                    exchanger = %self.name,
                    zone = %failure.zone,
                    row = failure.row,
                    "truncating solution at failed zone"
                );
                status = SolveStatus::Truncated(failure);
                break;
            }
        }

        let (energy_balance, target) =
            match self.check_outlets(&gas, &coolant, gas_props, coolant_props) {
                Ok((checked, target)) => (Some(checked), target),
                Err(error) if matches!(status, SolveStatus::Truncated(_)) => {
                    tracing::warn!(
                        exchanger = %self.name,
                        %error,
                        "energy balance unavailable for truncated solution"
                    );
                    (None, None)
                }
                Err(error) => return Err(error),
            };

        tracing::info!(
            exchanger = %self.name,
            zones = zones.len(),
            q_gas_w = energy_balance.map(|b| b.q_gas.value),
            q_coolant_w = energy_balance.map(|b| b.q_coolant.value),
            mismatch = energy_balance.map(|b| b.relative_mismatch),
            "exchanger solved"
        );

        Ok(Solution {
            gas,
            coolant,
            zones,
            status,
            energy_balance,
            target,
        })
    }

    fn check_outlets<G, C>(
        &self,
        gas: &Stream,
        coolant: &Stream,
        gas_props: &G,
        coolant_props: &C,
    ) -> Result<(EnergyBalance, Option<TargetCheck>), AssemblyError>
    where
        G: PropertyProvider<Fluid = FluidId>,
        C: PropertyProvider<Fluid = FluidId>,
    {
        let energy_balance = balance::energy_balance(gas, coolant, gas_props, coolant_props)?;
        let target = self
            .target
            .map(|t| balance::target_check(t, gas, energy_balance.q_gas, gas_props))
            .transpose()?;
        Ok((energy_balance, target))
    }
}
