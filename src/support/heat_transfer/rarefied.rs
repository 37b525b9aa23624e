//! Tariq correlation for porous, rarefied-gas tube banks.
//!
//! The Knudsen number is estimated from the kinetic-theory mean free path,
//! `Kn = μ/(ρD)·√(π m / (2 k_B T))` with `m = M/N_A`, and penalizes the
//! porosity-dependent logarithmic Reynolds correlation:
//!
//! ```text
//! Nu = (0.48 − 0.2ε)·ln(Re)^c1·Pr·(1 − ε)/ε / (1 + 0.1·ln(Re)^c2·Kn)
//! c1 = 3.12 − 0.16·e^(3ε)
//! c2 = 3.45 − 3·e^(−3.45ε)
//! ```

use uom::si::{
    dynamic_viscosity::pascal_second, length::meter, mass_density::kilogram_per_cubic_meter,
    molar_mass::kilogram_per_mole, thermodynamic_temperature::kelvin,
};

use crate::support::correlations::CorrelationError;

use super::NusseltContext;

const BOLTZMANN: f64 = 1.380_649e-23;
const AVOGADRO: f64 = 6.022_140_76e23;

/// Rarefied-flow Nusselt number.
///
/// The Reynolds number is floored at 1.01 so its logarithm stays positive.
///
/// # Errors
///
/// Returns [`CorrelationError::InvalidPorosity`] if the porosity is not
/// strictly between 0 and 1.
pub fn nusselt(context: &NusseltContext) -> Result<f64, CorrelationError> {
    let eps = context.porosity;
    if !(eps > 0.0 && eps < 1.0) {
        return Err(CorrelationError::InvalidPorosity { porosity: eps });
    }

    let kn = knudsen(context);
    let c1 = 3.12 - 0.16 * (3.0 * eps).exp();
    let c2 = 3.45 - 3.0 * (-3.45 * eps).exp();
    let ln_re = context.reynolds.max(1.01).ln();

    let numerator = (0.48 - 0.2 * eps) * ln_re.powf(c1) * context.prandtl / (eps / (1.0 - eps));
    let denominator = 1.0 + 0.1 * ln_re.powf(c2) * kn;
    Ok(numerator / denominator)
}

/// Knudsen number based on the tube diameter.
#[must_use]
pub fn knudsen(context: &NusseltContext) -> f64 {
    let molecule = context.molar_mass.get::<kilogram_per_mole>() / AVOGADRO;
    let t = context.temperature.get::<kelvin>();
    let mu = context.viscosity.get::<pascal_second>();
    let rho = context.density.get::<kilogram_per_cubic_meter>();
    let d = context.tube_diameter.get::<meter>();

    let thermal = (std::f64::consts::PI * molecule / (2.0 * BOLTZMANN * t)).sqrt();
    mu / (rho * d) * thermal
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::f64::MassDensity;

    use crate::support::heat_transfer::test_context::context;

    #[test]
    fn continuum_limit_matches_uncorrected_form() -> Result<(), CorrelationError> {
        let mut ctx = context(5000.0);
        ctx.porosity = 0.6;
        // Dense gas drives Kn toward zero.
        ctx.density = MassDensity::new::<kilogram_per_cubic_meter>(1e6);

        let eps: f64 = 0.6;
        let c1 = 3.12 - 0.16 * (3.0 * eps).exp();
        let expected = (0.48 - 0.2 * eps) * 5000.0_f64.ln().powf(c1) * 0.71 / (eps / (1.0 - eps));
        assert_relative_eq!(nusselt(&ctx)?, expected, max_relative = 1e-6);
        Ok(())
    }

    #[test]
    fn rarefaction_lowers_nusselt() -> Result<(), CorrelationError> {
        let dense = context(5000.0);
        let mut thin = dense;
        thin.density = dense.density / 1000.0;

        assert!(knudsen(&thin) > knudsen(&dense));
        assert!(nusselt(&thin)? < nusselt(&dense)?);
        Ok(())
    }

    #[test]
    fn knudsen_of_low_pressure_nitrogen() {
        // Near 3000 K and 10 kPa the mean free path is about ten micrometres.
        let kn = knudsen(&context(5000.0));
        assert!(kn > 1e-5 && kn < 1e-2, "kn = {kn}");
    }

    #[test]
    fn rejects_porosity_outside_unit_interval() {
        for porosity in [0.0, 1.0, -0.2, f64::NAN] {
            let mut ctx = context(5000.0);
            ctx.porosity = porosity;
            match nusselt(&ctx) {
                Err(CorrelationError::InvalidPorosity { .. }) => {}
                other => panic!("Expected invalid porosity, got: {other:?}"),
            }
        }
    }
}
