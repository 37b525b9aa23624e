use thiserror::Error;
use uom::si::f64::{Pressure, ThermodynamicTemperature};

use crate::support::{
    constraint::ConstraintError, correlations::CorrelationError, thermo::PropertyError,
};

use super::state::{FluidState, StreamRole};

/// A row the marching solver could not solve.
///
/// `gas` and `coolant` are the states entering the row, except for
/// [`RowFailureCause::NonPhysicalState`], where they are the marched states
/// the row produced.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("zone '{zone}' failed at row {row}: {cause}")]
pub struct RowFailure {
    pub zone: String,
    pub row: usize,
    pub gas: FluidState,
    pub coolant: FluidState,
    #[source]
    pub cause: RowFailureCause,
}

/// Why a row failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowFailureCause {
    /// A property lookup was rejected, usually a state outside the fluid's
    /// valid range.
    #[error("{stream} property lookup failed")]
    Property {
        stream: StreamRole,
        #[source]
        source: PropertyError,
    },

    /// A correlation was evaluated outside its validity window.
    #[error("correlation failed")]
    Correlation(#[source] CorrelationError),

    /// A derived row quantity (a capacitance rate `ṁ·cp`, the row NTU or
    /// its effectiveness) broke its numeric constraint.
    #[error("invalid {quantity}")]
    Constraint {
        quantity: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// The update produced a non-positive temperature or pressure.
    #[error("{stream} marched to T={temperature:?}, P={pressure:?}")]
    NonPhysicalState {
        stream: StreamRole,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    },
}

impl RowFailureCause {
    pub(super) fn property(stream: StreamRole) -> impl FnOnce(PropertyError) -> Self {
        move |source| Self::Property { stream, source }
    }

    pub(super) fn constraint(quantity: &'static str) -> impl FnOnce(ConstraintError) -> Self {
        move |source| Self::Constraint { quantity, source }
    }
}
