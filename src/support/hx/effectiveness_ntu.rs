use std::ops::Deref;

use uom::si::{
    f64::{Ratio, ThermalConductance},
    ratio::ratio,
};

use crate::support::constraint::{Constrained, ConstraintResult, NonNegative, UnitInterval};

use super::CapacitanceRate;

/// Computes exchanger effectiveness from NTU for a flow arrangement.
pub trait EffectivenessRelation {
    /// Calculate the effectiveness given the [NTU](Ntu) and the two streams'
    /// [capacitance rates](CapacitanceRate), in arrangement order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the relation evaluates outside `[0, 1]` or to `NaN`.
    fn effectiveness(
        &self,
        ntu: Ntu,
        capacitance_rates: [CapacitanceRate; 2],
    ) -> ConstraintResult<Effectiveness>;
}

/// Fraction of the maximum possible heat transfer achieved, in `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct Effectiveness(Constrained<Ratio, UnitInterval>);

impl Effectiveness {
    /// Create an [`Effectiveness`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value lies outside the interval [0, 1].
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Ok(Self(UnitInterval::new(Ratio::new::<ratio>(value))?))
    }
}

impl Deref for Effectiveness {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Number of transfer units, `UA / C_min`, non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Ntu(Constrained<Ratio, NonNegative>);

impl Ntu {
    /// Create an [`Ntu`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is negative.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Ok(Self(NonNegative::new(Ratio::new::<ratio>(value))?))
    }

    /// Create an [`Ntu`] from a row conductance and the two capacitance rates.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `ua` is negative.
    pub fn from_conductance_and_capacitance_rates(
        ua: ThermalConductance,
        capacitance_rates: [CapacitanceRate; 2],
    ) -> ConstraintResult<Self> {
        let (min, _) = CapacitanceRate::ordered(capacitance_rates);
        Ok(Self(NonNegative::new(ua / *min)?))
    }
}

impl Deref for Ntu {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Evaluates a raw `ε(NTU, Cr)` closure, handling the `Cr → 0` limit.
pub(super) fn effectiveness_via(
    ntu: Ntu,
    capacitance_rates: [CapacitanceRate; 2],
    raw: impl Fn(f64, f64) -> f64,
) -> ConstraintResult<Effectiveness> {
    let cr = CapacitanceRate::capacity_ratio(capacitance_rates).get::<ratio>();
    let ntu = ntu.get::<ratio>();
    if cr == 0.0 {
        return Effectiveness::new(1.0 - (-ntu).exp());
    }
    Effectiveness::new(raw(ntu, cr))
}
