//! Gas-side pressure-drop models for tube banks.
//!
//! The marching solver always evaluates the zone's [`PressureDropModel`] and
//! records the result next to its built-in Euler-number estimate. Which of
//! the two is applied to the gas state is a separate zone setting.

use serde::{Deserialize, Serialize};
use uom::si::{
    area::square_meter,
    dynamic_viscosity::pascal_second,
    f64::{Area, DynamicViscosity, Length, MassDensity, MassRate, Pressure},
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    pressure::pascal,
};

use crate::support::correlations::CorrelationError;

/// Boucher-Lapple multiplier for wide pitches and high-enthalpy flow.
pub const BOUCHER_LAPPLE_CORRECTION: f64 = 1.75;

/// A tube-bank pressure-drop correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum PressureDropModel {
    /// Gunter-Shaw (1945), optionally with the Boucher-Lapple correction.
    GunterShaw {
        #[serde(default = "corrected_by_default")]
        corrected: bool,
    },
}

fn corrected_by_default() -> bool {
    true
}

impl Default for PressureDropModel {
    fn default() -> Self {
        Self::GunterShaw { corrected: true }
    }
}

/// Flow and geometry seen by a [`PressureDropModel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureDropContext {
    pub density: MassDensity,
    pub viscosity: DynamicViscosity,
    /// Gas viscosity at the wall. `None` uses the bulk value.
    pub wall_viscosity: Option<DynamicViscosity>,
    pub mass_rate: MassRate,
    /// Frontal area open to the gas, after any fin blockage.
    pub frontal_area: Area,
    pub tube_diameter: Length,
    pub transverse_pitch: Length,
    pub longitudinal_pitch: Length,
    /// Flow path length the drop is taken over.
    pub path_length: Length,
}

impl PressureDropModel {
    /// Pressure drop over the context's path length.
    ///
    /// # Errors
    ///
    /// Returns [`CorrelationError::InvalidGeometry`] if the pitches leave no
    /// open flow area.
    pub fn pressure_drop(
        &self,
        context: &PressureDropContext,
    ) -> Result<Pressure, CorrelationError> {
        match *self {
            Self::GunterShaw { corrected } => gunter_shaw(context, corrected),
        }
    }
}

/// Gunter-Shaw pressure drop.
///
/// Uses the volumetric hydraulic diameter `D_v = (4/π)(S_T·S_L/D) − D` and
/// the mass flux through the minimum area. The friction term `f/2` is
/// `90/Re_v` up to `Re_v = 200` and `0.96·Re_v^-0.145` above.
///
/// # Errors
///
/// Returns [`CorrelationError::InvalidGeometry`] if `D_v` or the open area
/// fraction is not positive.
pub fn gunter_shaw(
    context: &PressureDropContext,
    corrected: bool,
) -> Result<Pressure, CorrelationError> {
    let d = context.tube_diameter.get::<meter>();
    let s_t = context.transverse_pitch.get::<meter>();
    let s_l = context.longitudinal_pitch.get::<meter>();
    let rho = context.density.get::<kilogram_per_cubic_meter>();
    let mu = context.viscosity.get::<pascal_second>();
    let mu_w = context
        .wall_viscosity
        .map_or(mu, |wall| wall.get::<pascal_second>());

    let d_v = 4.0 / std::f64::consts::PI * (s_t * s_l / d) - d;
    let sigma = (s_t - d) / s_t;
    if !(d_v > 0.0 && sigma > 0.0) {
        return Err(CorrelationError::InvalidGeometry {
            context: format!("gunter-shaw: D_v={d_v:.4e} m, open fraction={sigma:.3}"),
        });
    }

    let g = context.mass_rate.get::<kilogram_per_second>()
        / (context.frontal_area.get::<square_meter>() * sigma);
    let re_v = if mu > 0.0 { g * d_v / mu } else { 0.0 };
    if re_v <= 0.0 {
        return Ok(Pressure::new::<pascal>(0.0));
    }

    let half_friction = if re_v <= 200.0 {
        90.0 / re_v
    } else {
        0.96 * re_v.powf(-0.145)
    };

    let dynamic = g * g * context.path_length.get::<meter>() / (d_v * rho);
    let viscous = (mu_w / mu).powf(0.14);
    let geometric = (d_v / s_t).powf(0.4) * (s_l / s_t).powf(0.6);
    let correction = if corrected {
        BOUCHER_LAPPLE_CORRECTION
    } else {
        1.0
    };

    Ok(Pressure::new::<pascal>(
        half_friction * dynamic * viscous * geometric * correction,
    ))
}
