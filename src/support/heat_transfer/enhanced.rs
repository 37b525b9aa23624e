//! Grimison with a property-variation correction for high-enthalpy gas.
//!
//! The marching solver applies the correlation one physical row at a time,
//! so the base Grimison value is taken with a row count of 1. It is then
//! scaled by
//!
//! ```text
//! ξ = cbrt(clamp(tanh(Re/40000 + Pr/Pr_wall), 0, 1))
//! ```

use crate::support::correlations::CorrelationError;

use super::{
    NusseltContext,
    grimison::{self, CoefficientMethod, REYNOLDS_MAX},
};

/// Enhanced Grimison Nusselt number.
///
/// # Errors
///
/// Returns the same validity errors as [`grimison::nusselt`].
pub fn nusselt(
    method: CoefficientMethod,
    context: &NusseltContext,
) -> Result<f64, CorrelationError> {
    let single_row = NusseltContext {
        rows: 1,
        ..*context
    };
    let base = grimison::nusselt(method, &single_row)?;
    Ok(base * correction(context.reynolds, context.prandtl, context.wall_prandtl()))
}

/// The property-variation factor `ξ`, in `[0, 1]`.
#[must_use]
pub fn correction(reynolds: f64, prandtl: f64, wall_prandtl: f64) -> f64 {
    let x = reynolds / REYNOLDS_MAX + prandtl / wall_prandtl;
    x.tanh().clamp(0.0, 1.0).cbrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::heat_transfer::test_context::context;

    #[test]
    fn uses_single_row_base() -> Result<(), CorrelationError> {
        let mut ctx = context(20_000.0);
        ctx.rows = 4;
        let one_row = NusseltContext { rows: 1, ..ctx };

        let base = grimison::nusselt(CoefficientMethod::Polynomial, &one_row)?;
        let nu = nusselt(CoefficientMethod::Polynomial, &ctx)?;

        let xi = (0.5_f64 + 1.0).tanh().cbrt();
        assert_relative_eq!(nu, base * xi, max_relative = 1e-12);
        Ok(())
    }

    #[test]
    fn correction_is_bounded() {
        for (re, pr, pr_wall) in [(500.0, 0.7, 0.7), (40_000.0, 0.7, 0.5), (1.0, 0.01, 10.0)] {
            let xi = correction(re, pr, pr_wall);
            assert!((0.0..=1.0).contains(&xi), "xi = {xi}");
        }
    }

    #[test]
    fn wall_prandtl_defaults_to_bulk() {
        let ctx = context(10_000.0);
        assert_eq!(ctx.wall_prandtl(), ctx.prandtl);
    }
}
