//! Cross-flow effectiveness for one tube row.

use std::marker::PhantomData;

use crate::support::constraint::ConstraintResult;

use super::{
    CapacitanceRate, Effectiveness, Ntu,
    effectiveness_ntu::{EffectivenessRelation, effectiveness_via},
};

/// Cross-flow arrangement with the mixing state of each stream.
///
/// Across one tube row the gas mixes freely between tubes while the coolant
/// in each tube does not mix with its neighbours, so the row is
/// `CrossFlow<Mixed, Unmixed>` with the gas first.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossFlow<T: MixState, U: MixState> {
    _marker: PhantomData<(T, U)>,
}

impl<T: MixState, U: MixState> CrossFlow<T, U> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

/// Marker for a stream that is mixed across the flow channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mixed;

/// Marker for a stream that stays unmixed across the flow channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unmixed;

/// Mixing state of a cross-flow stream.
pub trait MixState {}
impl MixState for Mixed {}
impl MixState for Unmixed {}

impl EffectivenessRelation for CrossFlow<Mixed, Unmixed> {
    fn effectiveness(
        &self,
        ntu: Ntu,
        capacitance_rates: [CapacitanceRate; 2],
    ) -> ConstraintResult<Effectiveness> {
        let [mixed, unmixed] = capacitance_rates;
        if mixed >= unmixed {
            // C_max mixed, C_min unmixed.
            effectiveness_via(ntu, capacitance_rates, |ntu, cr| {
                (1. - (cr * ((-ntu).exp() - 1.)).exp()) / cr
            })
        } else {
            // C_min mixed, C_max unmixed.
            effectiveness_via(ntu, capacitance_rates, |ntu, cr| {
                1. - (-((1. - (-cr * ntu).exp()) / cr)).exp()
            })
        }
    }
}
