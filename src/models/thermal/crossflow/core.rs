//! Row-marching model of a cross-flow gas-to-liquid tube-bank exchanger.
//!
//! Hot gas flows across banks of tubes carrying a liquid coolant. The
//! exchanger is a series of [`Zone`]s (bare banks, finned banks, and ducts)
//! that the gas passes through in order. Each bank is marched one tube row
//! at a time: properties are evaluated at the states entering the row, the
//! row exchanges heat through the gas film, the tube wall, and the coolant
//! film in series, and both streams leave the row with updated temperature
//! and pressure.
//!
//! A [`HeatExchanger`] owns the zones and hands each one the previous zone's
//! outlet states. A row that cannot be solved is reported as a [`RowFailure`]
//! naming the zone, the row, and the states involved; the exchanger's
//! [`FailurePolicy`] decides whether that aborts the solve or truncates it.
//!
//! Geometry is resolved and validated once, when a zone is built, and never
//! changes afterwards. [`ExchangerSpec`] builds an exchanger from YAML or
//! JSON configuration.
//!
//! The default row update is explicit. Its error against the exact
//! two-stream solution is set by the row stiffness; see [`accuracy`].

pub mod accuracy;

mod assembly;
mod builder;
mod failure;
mod geometry;
mod options;
mod results;
mod state;
mod zone;

#[cfg(test)]
mod test_support;

pub use assembly::{
    AssemblyError, EnergyBalance, FailurePolicy, HeatExchanger, Solution, SolveStatus,
    TargetCheck, ZoneReport,
};
pub use builder::{BuildError, DEFAULT_WIDTH, ExchangerSpec, ZoneSpec};
pub use failure::{RowFailure, RowFailureCause};
pub use geometry::{
    DEFAULT_FIN_THICKNESS, DEFAULT_FINNED_PITCH_RATIO, DEFAULT_PITCH_RATIO, DEFAULT_ROUGHNESS,
    DEFAULT_WALL_CONDUCTIVITY, DEFAULT_WALL_THICKNESS, DuctGeometry, FinGeometry, FinSpec,
    GeometryError, Layout, TubeBankGeometry, TubeBankSpec, TubeCenter,
};
pub use options::{GasPressureDropSource, RowEnergyUpdate, ZoneModels};
pub use results::{RowRecord, ZoneOutcome, ZoneResults, ZoneSolution};
pub use state::{FluidState, Stream, StreamRole};
pub use zone::{Zone, ZoneKind};
