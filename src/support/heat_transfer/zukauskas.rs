//! Zukauskas (1972) correlation for staggered tube banks.
//!
//! `Nu = C1·C2·Re^m·Pr^0.36·(Pr/Pr_wall)^0.25`, with `C1` and `m` chosen by
//! Reynolds band and `C2` correcting banks of fewer than 20 rows.

use uom::si::ratio::ratio;

use crate::support::correlations::CorrelationError;

use super::NusseltContext;

/// Rows at and beyond which no row correction is applied.
pub const SATURATED_ROWS: usize = 20;

const TURBULENT_ROWS: [(usize, f64); 9] = [
    (1, 0.64),
    (2, 0.76),
    (3, 0.84),
    (4, 0.89),
    (5, 0.92),
    (7, 0.95),
    (10, 0.97),
    (13, 0.98),
    (16, 0.99),
];

const LAMINAR_ROWS: [(usize, f64); 9] = [
    (1, 0.83),
    (2, 0.88),
    (3, 0.91),
    (4, 0.94),
    (5, 0.95),
    (7, 0.97),
    (10, 0.98),
    (13, 0.99),
    (16, 1.0),
];

/// Zukauskas Nusselt number.
///
/// The Reynolds number is floored at 1.
///
/// # Errors
///
/// Returns [`CorrelationError::InvalidRowCount`] for zero rows.
pub fn nusselt(context: &NusseltContext) -> Result<f64, CorrelationError> {
    let re = context.reynolds.max(1.0);
    let pitch = (context.transverse_pitch / context.longitudinal_pitch).get::<ratio>();

    let (c1, m) = band_coefficients(re, pitch);
    let c2 = row_correction(context.rows, re)?;
    let pr = context.prandtl;

    Ok(c1 * c2 * re.powf(m) * pr.powf(0.36) * (pr / context.wall_prandtl()).powf(0.25))
}

/// `C1` and `m` for the Reynolds band, given `S_T/S_L`.
#[must_use]
pub fn band_coefficients(reynolds: f64, transverse_over_longitudinal: f64) -> (f64, f64) {
    if reynolds < 100.0 {
        (0.9, 0.4)
    } else if reynolds < 1000.0 {
        (0.51, 0.5)
    } else if reynolds < 2e5 {
        let r = transverse_over_longitudinal;
        let c1 = if r < 2.0 { 0.35 * r.powf(0.2) } else { 0.40 };
        (c1, 0.6)
    } else {
        (0.022, 0.84)
    }
}

/// Row-count correction `C2`.
///
/// Between tabulated row counts the value of the largest key not above the
/// count is used, so the factor never decreases with more rows.
///
/// # Errors
///
/// Returns [`CorrelationError::InvalidRowCount`] for zero rows.
pub fn row_correction(rows: usize, reynolds: f64) -> Result<f64, CorrelationError> {
    if rows == 0 {
        return Err(CorrelationError::InvalidRowCount { rows });
    }
    if rows >= SATURATED_ROWS {
        return Ok(1.0);
    }

    let table = if reynolds > 1000.0 {
        &TURBULENT_ROWS
    } else {
        &LAMINAR_ROWS
    };
    Ok(table
        .iter()
        .take_while(|(key, _)| *key <= rows)
        .last()
        .map_or(1.0, |(_, c2)| *c2))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::heat_transfer::test_context::context;

    #[test]
    fn reynolds_bands() {
        assert_eq!(band_coefficients(50.0, 1.0), (0.9, 0.4));
        assert_eq!(band_coefficients(500.0, 1.0), (0.51, 0.5));
        assert_eq!(band_coefficients(5e5, 1.0), (0.022, 0.84));

        let (c1, m) = band_coefficients(1e4, 1.5);
        assert_relative_eq!(c1, 0.35 * 1.5_f64.powf(0.2));
        assert_eq!(m, 0.6);
        assert_eq!(band_coefficients(1e4, 2.5), (0.40, 0.6));
    }

    #[test]
    fn sparse_rows_use_largest_key_below() -> Result<(), CorrelationError> {
        assert_eq!(row_correction(6, 5000.0)?, 0.92);
        assert_eq!(row_correction(12, 5000.0)?, 0.97);
        assert_eq!(row_correction(19, 500.0)?, 1.0);
        assert_eq!(row_correction(20, 5000.0)?, 1.0);
        assert_eq!(row_correction(1, 500.0)?, 0.83);
        Ok(())
    }

    #[test]
    fn nusselt_formula() -> Result<(), CorrelationError> {
        let mut ctx = context(5000.0);
        ctx.wall_prandtl = Some(0.69);
        let pitch_ratio: f64 = 0.121 / 0.064;
        let expected = 0.35 * pitch_ratio.powf(0.2)
            * 0.89
            * 5000.0_f64.powf(0.6)
            * 0.71_f64.powf(0.36)
            * (0.71_f64 / 0.69).powf(0.25);
        assert_relative_eq!(nusselt(&ctx)?, expected, max_relative = 1e-12);
        Ok(())
    }

    #[test]
    fn zero_flow_is_floored() -> Result<(), CorrelationError> {
        let nu = nusselt(&context(0.0))?;
        assert!(nu.is_finite() && nu > 0.0);
        Ok(())
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn row_correction_is_monotone(rows in 1_usize..40, re in 10.0_f64..1e6) {
            let c2 = row_correction(rows, re).unwrap();
            let next = row_correction(rows + 1, re).unwrap();
            prop_assert!(next >= c2);
            if rows >= SATURATED_ROWS {
                prop_assert_eq!(c2, 1.0);
            }
        }
    }
}
