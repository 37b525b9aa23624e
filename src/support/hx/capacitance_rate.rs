use std::ops::Deref;

use uom::si::f64::{MassRate, Ratio, SpecificHeatCapacity, ThermalConductance};

use crate::support::constraint::{Constrained, ConstraintResult, StrictlyPositive};

/// Capacitance rate (`ṁ·cp`) of a stream, strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct CapacitanceRate(Constrained<ThermalConductance, StrictlyPositive>);

impl CapacitanceRate {
    /// Create a [`CapacitanceRate`] from a scalar value in the given unit.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is not strictly positive.
    pub fn new<U>(value: f64) -> ConstraintResult<Self>
    where
        U: uom::si::thermal_conductance::Unit + uom::Conversion<f64, T = f64>,
    {
        Self::from_quantity(ThermalConductance::new::<U>(value))
    }

    /// Create a [`CapacitanceRate`] from a thermal-conductance quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity is not strictly positive.
    pub fn from_quantity(quantity: ThermalConductance) -> ConstraintResult<Self> {
        Ok(Self(StrictlyPositive::new(quantity)?))
    }

    /// Create a [`CapacitanceRate`] for a stream from its mass rate and `cp`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the product is not strictly positive.
    pub fn from_mass_rate_and_specific_heat(
        mass_rate: MassRate,
        specific_heat: SpecificHeatCapacity,
    ) -> ConstraintResult<Self> {
        Self::from_quantity(mass_rate * specific_heat)
    }

    /// Returns the smaller and larger of two rates, in that order.
    #[must_use]
    pub fn ordered(rates: [Self; 2]) -> (Self, Self) {
        if rates[0] <= rates[1] {
            (rates[0], rates[1])
        } else {
            (rates[1], rates[0])
        }
    }

    /// The capacity ratio `C_min / C_max` of two rates, in `(0, 1]`.
    #[must_use]
    pub fn capacity_ratio(rates: [Self; 2]) -> Ratio {
        let (min, max) = Self::ordered(rates);
        *min / *max
    }
}

impl Deref for CapacitanceRate {
    type Target = ThermalConductance;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::{
        mass_rate::kilogram_per_second, ratio::ratio,
        specific_heat_capacity::joule_per_kilogram_kelvin, thermal_conductance::watt_per_kelvin,
    };

    use super::*;

    #[test]
    fn gas_and_coolant_rates() -> ConstraintResult<()> {
        let gas = CapacitanceRate::from_mass_rate_and_specific_heat(
            MassRate::new::<kilogram_per_second>(1.3),
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1040.0),
        )?;
        let coolant = CapacitanceRate::from_mass_rate_and_specific_heat(
            MassRate::new::<kilogram_per_second>(600.0),
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(4181.0),
        )?;

        assert_relative_eq!(gas.get::<watt_per_kelvin>(), 1352.0);
        let (min, max) = CapacitanceRate::ordered([coolant, gas]);
        assert_eq!(min, gas);
        assert_eq!(max, coolant);
        assert_relative_eq!(
            CapacitanceRate::capacity_ratio([coolant, gas]).get::<ratio>(),
            1352.0 / 2_508_600.0
        );
        Ok(())
    }

    #[test]
    fn zero_flow_is_rejected() {
        assert!(
            CapacitanceRate::from_mass_rate_and_specific_heat(
                MassRate::new::<kilogram_per_second>(0.0),
                SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(4181.0),
            )
            .is_err()
        );
    }
}
