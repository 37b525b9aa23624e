//! Zones and the row-marching solver.

mod duct;
mod march;

use uom::{ConstZero, si::f64::Length};

use crate::support::thermo::{PropertyProvider, fluid::FluidId};

use super::{
    geometry::{DuctGeometry, FinGeometry, TubeBankGeometry, TubeCenter},
    options::ZoneModels,
    results::ZoneOutcome,
    state::FluidState,
};

/// The geometric kind of a zone.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneKind {
    /// Round ducting: pressure drop only, no heat transfer area.
    Duct(DuctGeometry),
    BareBank(TubeBankGeometry),
    FinnedBank {
        bank: TubeBankGeometry,
        fins: FinGeometry,
    },
}

/// One contiguous section of the exchanger.
///
/// A zone is immutable once built. Its origin is set when it is added to a
/// [`HeatExchanger`](super::HeatExchanger).
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    name: String,
    kind: ZoneKind,
    models: ZoneModels,
    origin: Length,
}

impl Zone {
    #[must_use]
    pub fn duct(name: impl Into<String>, geometry: DuctGeometry, models: ZoneModels) -> Self {
        Self::new(name, ZoneKind::Duct(geometry), models)
    }

    #[must_use]
    pub fn bare_bank(
        name: impl Into<String>,
        geometry: TubeBankGeometry,
        models: ZoneModels,
    ) -> Self {
        Self::new(name, ZoneKind::BareBank(geometry), models)
    }

    #[must_use]
    pub fn finned_bank(
        name: impl Into<String>,
        bank: TubeBankGeometry,
        fins: FinGeometry,
        models: ZoneModels,
    ) -> Self {
        Self::new(name, ZoneKind::FinnedBank { bank, fins }, models)
    }

    fn new(name: impl Into<String>, kind: ZoneKind, models: ZoneModels) -> Self {
        Self {
            name: name.into(),
            kind,
            models,
            origin: Length::ZERO,
        }
    }

    /// Returns the zone placed at `origin`.
    #[must_use]
    pub fn at_origin(self, origin: Length) -> Self {
        Self { origin, ..self }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> &ZoneKind {
        &self.kind
    }

    #[must_use]
    pub fn models(&self) -> &ZoneModels {
        &self.models
    }

    #[must_use]
    pub fn origin(&self) -> Length {
        self.origin
    }

    /// Length of the zone along the gas path.
    #[must_use]
    pub fn length(&self) -> Length {
        match &self.kind {
            ZoneKind::Duct(duct) => duct.length(),
            ZoneKind::BareBank(bank) | ZoneKind::FinnedBank { bank, .. } => bank.length(),
        }
    }

    /// Axial position of the zone outlet.
    #[must_use]
    pub fn outlet_position(&self) -> Length {
        self.origin + self.length()
    }

    /// Number of marching steps the zone takes.
    #[must_use]
    pub fn depth(&self) -> usize {
        match &self.kind {
            ZoneKind::Duct(_) => 1,
            ZoneKind::BareBank(bank) | ZoneKind::FinnedBank { bank, .. } => bank.depth(),
        }
    }

    /// Tube centers in exchanger coordinates. Ducts have none.
    #[must_use]
    pub fn tube_centers(&self) -> Vec<TubeCenter> {
        match &self.kind {
            ZoneKind::Duct(_) => Vec::new(),
            ZoneKind::BareBank(bank) | ZoneKind::FinnedBank { bank, .. } => {
                bank.tube_centers(self.origin)
            }
        }
    }

    /// Marches both streams through the zone.
    ///
    /// A row failure does not panic or truncate silently: it is returned as
    /// [`ZoneOutcome::Failed`] together with the rows solved before it.
    pub fn solve<G, C>(
        &self,
        gas: &FluidState,
        coolant: &FluidState,
        gas_props: &G,
        coolant_props: &C,
    ) -> ZoneOutcome
    where
        G: PropertyProvider<Fluid = FluidId>,
        C: PropertyProvider<Fluid = FluidId>,
    {
        let outcome = match &self.kind {
            ZoneKind::Duct(duct) => duct::solve(self, duct, gas, coolant, gas_props),
            ZoneKind::BareBank(bank) => march::solve(
                self,
                march::Surface::Bare(bank),
                gas,
                coolant,
                gas_props,
                coolant_props,
            ),
            ZoneKind::FinnedBank { bank, fins } => march::solve(
                self,
                march::Surface::Finned { bank, fins },
                gas,
                coolant,
                gas_props,
                coolant_props,
            ),
        };

        let results = &outcome.solution().results;
        tracing::info!(
            zone = %self.name,
            rows = results.rows_solved,
            duty_w = results.duty.value,
            gas_dp_pa = results.gas_pressure_drop.value,
            "zone solved"
        );
        if let Some(failure) = outcome.failure() {
            tracing::warn!(
                zone = %self.name,
                row = failure.row,
                cause = %failure.cause,
                "zone failed"
            );
        }
        outcome
    }
}
