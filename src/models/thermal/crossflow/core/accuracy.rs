//! Accuracy of the explicit row update.
//!
//! A row exchanges `Q = UA·ΔT` evaluated at its inlet temperatures. With the
//! row stiffness `λ = UA·(1/C_gas + 1/C_coolant)`, the stream temperature
//! difference leaving the row is `(1 − λ)·ΔT`, so the streams cannot cross
//! while `λ < 1`.
//!
//! For two well-mixed streams exchanging heat over the row, the exact duty is
//! `UA·ΔT·(1 − e^(−λ))/λ`. The explicit duty overshoots it by the factor
//! `λ/(1 − e^(−λ)) − 1 = λ/2 + λ²/12 − λ⁴/720 + …`, which is bounded by
//! [`overshoot_bound`] for `0 < λ ≤ 1`.

use uom::si::{f64::ThermalConductance, ratio::ratio};

use crate::support::hx::CapacitanceRate;

/// Row stiffness `λ = UA·(1/C_gas + 1/C_coolant)`.
#[must_use]
pub fn stiffness(ua: ThermalConductance, gas: CapacitanceRate, coolant: CapacitanceRate) -> f64 {
    (ua / *gas + ua / *coolant).get::<ratio>()
}

/// Ratio of the exact two-stream duty to the explicit duty, `(1 − e^(−λ))/λ`.
#[must_use]
pub fn exact_duty_ratio(stiffness: f64) -> f64 {
    if stiffness.abs() < 1e-12 {
        return 1.0;
    }
    -(-stiffness).exp_m1() / stiffness
}

/// Relative overshoot of the explicit duty over the exact duty.
#[must_use]
pub fn explicit_overshoot(stiffness: f64) -> f64 {
    1.0 / exact_duty_ratio(stiffness) - 1.0
}

/// Upper bound `λ/2 + λ²/12` on [`explicit_overshoot`] for `0 < λ ≤ 1`.
#[must_use]
pub fn overshoot_bound(stiffness: f64) -> f64 {
    stiffness / 2.0 + stiffness * stiffness / 12.0
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermal_conductance::watt_per_kelvin;

    #[test]
    fn stiffness_sums_both_streams() {
        let ua = ThermalConductance::new::<watt_per_kelvin>(100.0);
        let gas = CapacitanceRate::new::<watt_per_kelvin>(1000.0).unwrap();
        let coolant = CapacitanceRate::new::<watt_per_kelvin>(4000.0).unwrap();
        assert_relative_eq!(stiffness(ua, gas, coolant), 0.125);
    }

    #[test]
    fn vanishing_stiffness_is_exact() {
        assert_relative_eq!(exact_duty_ratio(0.0), 1.0);
        assert_relative_eq!(explicit_overshoot(1e-9), 5e-10, max_relative = 1e-6);
    }

    #[test]
    fn unit_stiffness_overshoot() {
        let expected = 1.0 / (1.0 - (-1.0_f64).exp()) - 1.0;
        assert_relative_eq!(explicit_overshoot(1.0), expected, max_relative = 1e-12);
        assert!(explicit_overshoot(1.0) <= overshoot_bound(1.0));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn overshoot_is_bounded(lambda in 1e-6..=1.0_f64) {
            let overshoot = explicit_overshoot(lambda);
            prop_assert!(overshoot > 0.0);
            prop_assert!(overshoot <= overshoot_bound(lambda) + 1e-12);
        }
    }
}
