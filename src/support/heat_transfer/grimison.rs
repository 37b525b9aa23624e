//! Grimison (1937) correlation for staggered tube banks.
//!
//! `Nu = C2·C1·Re^m·Pr^(1/3)`, valid for `500 ≤ Re ≤ 40000` with
//! `1.25 ≤ S_T/D ≤ 3.6` and `0.6 ≤ S_L/D ≤ 3.0`. The coefficients `C1` and
//! `m` come either from the nearest point of the published table or from
//! smooth polynomial fits in the two pitch ratios. `C2` corrects banks of
//! fewer than ten rows.

use serde::{Deserialize, Serialize};
use uom::si::{length::meter, ratio::ratio};

use crate::support::correlations::{CorrelationError, reynolds};

use super::{NusseltContext, ReynoldsContext};

pub const REYNOLDS_MIN: f64 = 500.0;
pub const REYNOLDS_MAX: f64 = 40_000.0;

const TRANSVERSE_RANGE: (f64, f64) = (1.25, 3.6);
const LONGITUDINAL_RANGE: (f64, f64) = (0.6, 3.0);

/// How `C1` and `m` are obtained from the pitch ratios.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoefficientMethod {
    /// The closest `(S_T/D, S_L/D)` point in the published table.
    Nearest,

    /// Cubic-in-`S_L/D` fits whose coefficients are quadratic in `S_T/D`.
    ///
    /// Continuous in both ratios, so a sweep over pitch does not jump.
    #[default]
    Polynomial,
}

// (S_T/D, S_L/D) -> (C1, m)
const TABLE: [((f64, f64), (f64, f64)); 22] = [
    ((3.00, 0.60), (0.213, 0.636)),
    ((2.00, 0.90), (0.446, 0.571)),
    ((3.00, 0.90), (0.401, 0.581)),
    ((1.50, 1.00), (0.497, 0.558)),
    ((2.00, 1.125), (0.478, 0.565)),
    ((3.00, 1.125), (0.518, 0.560)),
    ((1.25, 1.25), (0.518, 0.556)),
    ((1.50, 1.25), (0.505, 0.554)),
    ((2.00, 1.25), (0.519, 0.556)),
    ((3.00, 1.25), (0.552, 0.562)),
    ((1.25, 1.50), (0.451, 0.568)),
    ((1.50, 1.50), (0.460, 0.562)),
    ((2.00, 1.50), (0.452, 0.568)),
    ((3.00, 1.50), (0.488, 0.568)),
    ((1.25, 2.00), (0.404, 0.568)),
    ((1.50, 2.00), (0.416, 0.568)),
    ((2.00, 2.00), (0.482, 0.556)),
    ((3.00, 2.00), (0.449, 0.570)),
    ((1.25, 3.00), (0.310, 0.592)),
    ((1.50, 3.00), (0.356, 0.580)),
    ((2.00, 3.00), (0.440, 0.562)),
    ((3.00, 3.00), (0.428, 0.574)),
];

const ROW_CORRECTION: [f64; 9] = [0.68, 0.75, 0.83, 0.89, 0.92, 0.95, 0.97, 0.98, 0.99];

// Quadratic-in-a coefficients of the cubic-in-b fits, highest power first.
const C1_FIT: [[f64; 3]; 4] = [
    [-0.066_572, 0.438_619, -0.534_414],
    [0.447_806, -2.867_419, 3.482_562],
    [-1.046_594, 6.359_781, -7.686_638],
    [0.803_673, -4.605_252, 5.975_412],
];
const M_FIT: [[f64; 3]; 4] = [
    [0.009_058, -0.076_068, 0.104_510],
    [-0.071_578, 0.534_418, -0.706_706],
    [0.193_359, -1.270_342, 1.608_849],
    [-0.154_482, 0.934_097, -0.585_832],
];

/// Grimison Nusselt number.
///
/// # Errors
///
/// Returns [`CorrelationError`] if the tubes overlap, a pitch ratio or the
/// Reynolds number lies outside the validity window, or `rows` is zero.
pub fn nusselt(
    method: CoefficientMethod,
    context: &NusseltContext,
) -> Result<f64, CorrelationError> {
    let (a, b) = pitch_ratios(context);
    check_geometry(a, b)?;
    check_reynolds(context.reynolds)?;
    let c2 = row_correction(context.rows)?;

    let (c1, m) = coefficients(method, a, b);
    Ok(c2 * c1 * context.reynolds.powf(m) * context.prandtl.cbrt())
}

/// Row-count correction `C2`: tabulated for 1 to 9 rows, 1.0 beyond.
///
/// # Errors
///
/// Returns [`CorrelationError::InvalidRowCount`] for zero rows.
pub fn row_correction(rows: usize) -> Result<f64, CorrelationError> {
    match rows {
        0 => Err(CorrelationError::InvalidRowCount { rows }),
        1..=9 => Ok(ROW_CORRECTION[rows - 1]),
        _ => Ok(1.0),
    }
}

/// `C1` and `m` for the pitch ratios `a = S_T/D` and `b = S_L/D`.
#[must_use]
pub fn coefficients(method: CoefficientMethod, a: f64, b: f64) -> (f64, f64) {
    match method {
        CoefficientMethod::Nearest => TABLE
            .iter()
            .min_by(|(p, _), (q, _)| {
                let dp = (p.0 - a).hypot(p.1 - b);
                let dq = (q.0 - a).hypot(q.1 - b);
                dp.total_cmp(&dq)
            })
            .map_or(TABLE[0].1, |(_, coeffs)| *coeffs),
        CoefficientMethod::Polynomial => (cubic_fit(&C1_FIT, a, b), cubic_fit(&M_FIT, a, b)),
    }
}

fn cubic_fit(fit: &[[f64; 3]; 4], a: f64, b: f64) -> f64 {
    fit.iter()
        .map(|q| q[0] * a * a + q[1] * a + q[2])
        .fold(0.0, |acc, coeff| acc * b + coeff)
}

/// Reynolds number on the maximum velocity through the narrowest gap.
///
/// With diagonal pitch `S_D = √(S_L² + (S_T/2)²)`, the gas accelerates
/// through the diagonal gap when `S_D < (S_T + D)/2` and through the
/// transverse gap otherwise.
#[must_use]
pub fn max_velocity_reynolds(context: &ReynoldsContext) -> f64 {
    let d = context.tube_diameter.get::<meter>();
    let s_t = context.transverse_pitch.get::<meter>();
    let s_l = context.longitudinal_pitch.get::<meter>();

    let s_d = s_l.hypot(s_t / 2.0);
    let acceleration = if s_d < (s_t + d) / 2.0 {
        s_t / (2.0 * (s_d - d))
    } else {
        s_t / (s_t - d)
    };

    let front_velocity = context.mass_rate / (context.density * context.frontal_area);
    reynolds(
        context.density,
        front_velocity * acceleration,
        context.tube_diameter,
        context.viscosity,
    )
}

pub(super) fn pitch_ratios(context: &NusseltContext) -> (f64, f64) {
    let d = context.tube_diameter;
    (
        (context.transverse_pitch / d).get::<ratio>(),
        (context.longitudinal_pitch / d).get::<ratio>(),
    )
}

fn check_geometry(a: f64, b: f64) -> Result<(), CorrelationError> {
    if (0.5 * a).powi(2) + b * b < 1.0 {
        return Err(CorrelationError::OverlappingTubes {
            transverse_ratio: a,
            longitudinal_ratio: b,
        });
    }
    for (name, value, (min, max)) in [
        ("S_T/D", a, TRANSVERSE_RANGE),
        ("S_L/D", b, LONGITUDINAL_RANGE),
    ] {
        if !(min..=max).contains(&value) {
            return Err(CorrelationError::PitchRatioOutOfRange {
                name,
                value,
                min,
                max,
            });
        }
    }
    Ok(())
}

fn check_reynolds(reynolds: f64) -> Result<(), CorrelationError> {
    if (REYNOLDS_MIN..=REYNOLDS_MAX).contains(&reynolds) {
        Ok(())
    } else {
        Err(CorrelationError::ReynoldsOutOfRange {
            reynolds,
            min: REYNOLDS_MIN,
            max: REYNOLDS_MAX,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        area::square_meter,
        f64::{Area, DynamicViscosity, Length, MassDensity, MassRate},
        dynamic_viscosity::pascal_second,
        mass_density::kilogram_per_cubic_meter,
        mass_rate::kilogram_per_second,
    };

    use crate::support::heat_transfer::test_context::context;

    #[test]
    fn nearest_hits_table_points() {
        assert_eq!(
            coefficients(CoefficientMethod::Nearest, 2.0, 1.25),
            (0.519, 0.556)
        );
        assert_eq!(
            coefficients(CoefficientMethod::Nearest, 1.3, 2.9),
            (0.310, 0.592)
        );
    }

    #[test]
    fn polynomial_tracks_table() {
        for &((a, b), (c1, m)) in &TABLE {
            let (fit_c1, fit_m) = coefficients(CoefficientMethod::Polynomial, a, b);
            assert_relative_eq!(fit_c1, c1, max_relative = 0.12);
            assert_relative_eq!(fit_m, m, max_relative = 0.02);
        }
    }

    #[test]
    fn nusselt_formula() -> Result<(), CorrelationError> {
        let ctx = context(10_000.0);
        let (a, b) = pitch_ratios(&ctx);
        let (c1, m) = coefficients(CoefficientMethod::Polynomial, a, b);

        let nu = nusselt(CoefficientMethod::Polynomial, &ctx)?;
        assert_relative_eq!(nu, 0.89 * c1 * 10_000.0_f64.powf(m) * 0.71_f64.cbrt());
        Ok(())
    }

    #[test]
    fn row_correction_saturates() -> Result<(), CorrelationError> {
        let mut previous = 0.0;
        for rows in 1..=12 {
            let c2 = row_correction(rows)?;
            assert!(c2 >= previous);
            previous = c2;
        }
        assert_eq!(row_correction(10)?, 1.0);
        assert_eq!(row_correction(200)?, 1.0);
        match row_correction(0) {
            Err(CorrelationError::InvalidRowCount { rows: 0 }) => {}
            other => panic!("Expected invalid row count, got: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn rejects_reynolds_outside_window() {
        for re in [100.0, 50_000.0] {
            match nusselt(CoefficientMethod::Polynomial, &context(re)) {
                Err(CorrelationError::ReynoldsOutOfRange { .. }) => {}
                other => panic!("Expected reynolds out of range, got: {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_bad_geometry() {
        let mut ctx = context(10_000.0);
        ctx.transverse_pitch = Length::new::<meter>(0.061 * 1.3);
        ctx.longitudinal_pitch = Length::new::<meter>(0.061 * 0.7);
        match nusselt(CoefficientMethod::Polynomial, &ctx) {
            Err(CorrelationError::OverlappingTubes { .. }) => {}
            other => panic!("Expected overlapping tubes, got: {other:?}"),
        }

        ctx.transverse_pitch = Length::new::<meter>(0.061 * 4.0);
        ctx.longitudinal_pitch = Length::new::<meter>(0.061 * 1.5);
        match nusselt(CoefficientMethod::Polynomial, &ctx) {
            Err(CorrelationError::PitchRatioOutOfRange { name: "S_T/D", .. }) => {}
            other => panic!("Expected pitch ratio out of range, got: {other:?}"),
        }
    }

    #[test]
    fn diagonal_gap_controls_tight_banks() {
        let base = ReynoldsContext {
            density: MassDensity::new::<kilogram_per_cubic_meter>(1.0),
            viscosity: DynamicViscosity::new::<pascal_second>(1e-5),
            mass_rate: MassRate::new::<kilogram_per_second>(1.0),
            frontal_area: Area::new::<square_meter>(1.0),
            tube_diameter: Length::new::<meter>(0.061),
            transverse_pitch: Length::new::<meter>(0.121),
            longitudinal_pitch: Length::new::<meter>(0.064),
        };

        // S_D = √(0.064² + 0.0605²) ≈ 0.0881 < (S_T + D)/2 = 0.091.
        let s_d = (0.064_f64.powi(2) + 0.0605_f64.powi(2)).sqrt();
        let u_max = 0.121 / (2.0 * (s_d - 0.061));
        assert_relative_eq!(
            max_velocity_reynolds(&base),
            u_max * 0.061 / 1e-5,
            max_relative = 1e-12
        );

        // A deep bank routes the flow through the transverse gap.
        let deep = ReynoldsContext {
            longitudinal_pitch: Length::new::<meter>(0.2),
            ..base
        };
        let u_max = 0.121 / (0.121 - 0.061);
        assert_relative_eq!(
            max_velocity_reynolds(&deep),
            u_max * 0.061 / 1e-5,
            max_relative = 1e-12
        );
    }
}
