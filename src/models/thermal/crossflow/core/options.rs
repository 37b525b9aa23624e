//! Per-zone model selection.

use serde::{Deserialize, Serialize};

use crate::support::{heat_transfer::HeatTransferModel, pressure_drop::PressureDropModel};

/// Which gas pressure drop is applied to the marched state.
///
/// Both are computed every row and recorded in the history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GasPressureDropSource {
    /// The built-in tube-bank Euler-number row correlation.
    #[default]
    EulerCorrelation,
    /// The zone's [`PressureDropModel`].
    InjectedModel,
}

/// How a row's duty is computed from its conductance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowEnergyUpdate {
    /// `Q = UA·ΔT` at the row inlet temperatures.
    #[default]
    Explicit,
    /// `Q = ε·C_min·ΔT` with the gas-mixed, coolant-unmixed cross-flow
    /// effectiveness.
    EffectivenessNtu,
}

/// The models injected into a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneModels {
    pub heat_transfer: HeatTransferModel,
    pub pressure_drop: PressureDropModel,
    pub pressure_drop_source: GasPressureDropSource,
    pub energy_update: RowEnergyUpdate,
    /// Apply the `3.2326·Re^-0.2084` factor to the Euler number.
    pub euler_correction: bool,
}

impl Default for ZoneModels {
    fn default() -> Self {
        Self {
            heat_transfer: HeatTransferModel::default(),
            pressure_drop: PressureDropModel::default(),
            pressure_drop_source: GasPressureDropSource::default(),
            energy_update: RowEnergyUpdate::default(),
            euler_correction: true,
        }
    }
}
