//! Empirical correlations for tube-bank and internal-flow heat exchangers.
//!
//! These are stateless functions. The heat-transfer and pressure-drop model
//! plugins and the marching solver build on them, but each one can be used
//! and tested on its own.
//!
//! Dimensionless groups (Reynolds, Prandtl, Nusselt, Euler, friction factors)
//! are plain `f64`. Dimensional inputs and outputs are [`uom`] quantities.
//!
//! # Sources
//!
//! - Swamee and Jain (1976), explicit Darcy friction factor
//! - Gnielinski (1976), turbulent and transitional pipe flow
//! - HEDH tube-bank Euler number, staggered layout
//! - Laminar flat plate and fully developed parallel-plate duct values

use thiserror::Error;
use uom::{
    ConstZero,
    si::{
        f64::{DynamicViscosity, Length, MassDensity, Pressure, Velocity},
        ratio::ratio,
    },
};

/// Reynolds number below which internal pipe flow is treated as laminar.
pub const TRANSITION_REYNOLDS: f64 = 2300.0;

/// Fully developed laminar pipe Nusselt number (uniform heat flux).
pub const PIPE_LAMINAR_NUSSELT: f64 = 4.36;

/// Fully developed laminar Nusselt number between wide parallel plates.
pub const DUCT_LAMINAR_NUSSELT: f64 = 8.235;

/// Contract violations raised by correlations and the models built on them.
///
/// These signal that a correlation was asked for a value outside the region
/// it was fitted to, or for a geometry that cannot exist. They are not
/// recoverable by retrying with the same inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CorrelationError {
    #[error("reynolds number {reynolds:.1} outside [{min}, {max}]")]
    ReynoldsOutOfRange { reynolds: f64, min: f64, max: f64 },

    #[error("pitch ratio {name}={value:.3} outside [{min}, {max}]")]
    PitchRatioOutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("tubes overlap: S_T/D={transverse_ratio:.3}, S_L/D={longitudinal_ratio:.3}")]
    OverlappingTubes {
        transverse_ratio: f64,
        longitudinal_ratio: f64,
    },

    #[error("row count must be at least 1, got {rows}")]
    InvalidRowCount { rows: usize },

    #[error("porosity must lie in (0, 1), got {porosity}")]
    InvalidPorosity { porosity: f64 },

    #[error("invalid geometry: {context}")]
    InvalidGeometry { context: String },
}

/// Reynolds number `ρ·u·L/μ`.
///
/// Returns zero when the viscosity is not positive.
#[must_use]
pub fn reynolds(
    density: MassDensity,
    velocity: Velocity,
    length: Length,
    viscosity: DynamicViscosity,
) -> f64 {
    if viscosity <= DynamicViscosity::ZERO {
        return 0.0;
    }
    (density * velocity * length / viscosity).get::<ratio>()
}

/// Darcy friction factor for internal pipe flow.
///
/// Laminar flow (`Re < 2300`) uses `64/Re` with `Re` floored at 1. Above that
/// the Swamee-Jain approximation of Colebrook-White is used, parameterized by
/// the relative roughness `ε/D`.
#[must_use]
pub fn friction_factor(reynolds: f64, relative_roughness: f64) -> f64 {
    if reynolds < TRANSITION_REYNOLDS {
        return 64.0 / reynolds.max(1.0);
    }
    let term = relative_roughness / 3.7 + 5.74 / reynolds.powf(0.9);
    0.25 / term.log10().powi(2)
}

/// Gnielinski Nusselt number for flow inside a tube of length `length`.
///
/// Below the transition Reynolds number this returns the laminar floor of
/// 4.36. Above it, the Gnielinski form is multiplied by the entry-length
/// factor `1 + (L/D)^-0.7`.
#[must_use]
pub fn gnielinski(
    reynolds: f64,
    prandtl: f64,
    friction: f64,
    diameter: Length,
    length: Length,
) -> f64 {
    if reynolds < TRANSITION_REYNOLDS {
        return PIPE_LAMINAR_NUSSELT;
    }
    let f_8 = friction / 8.0;
    let numerator = f_8 * (reynolds - 1000.0) * prandtl;
    let denominator = 1.0 + 12.7 * (prandtl.powf(2.0 / 3.0) - 1.0) * f_8.sqrt();
    let entry = 1.0 + (length / diameter).get::<ratio>().powf(-0.7);
    numerator / denominator * entry
}

/// Tube-bank Euler number per row for a staggered layout.
///
/// The Reynolds number is based on the maximum velocity and floored at 7.
/// `pitch_ratio` is the transverse pitch over the tube diameter. When
/// `corrected` is set, the empirical factor `3.2326·Re^-0.2084` is applied.
#[must_use]
pub fn euler_number(reynolds: f64, pitch_ratio: f64, corrected: bool) -> f64 {
    let re = reynolds.max(7.0);
    let (a, b) = if re < 100.0 {
        (3.72, 0.77)
    } else if re < 1000.0 {
        (1.18, 0.42)
    } else {
        (0.32, 0.16)
    };

    let friction = a / re.powf(b) * (1.0 + 0.5 / (pitch_ratio - 1.0));
    let euler = friction / 2.0;

    if corrected {
        euler * 3.2326 * re.powf(-0.2084)
    } else {
        euler
    }
}

/// Gas pressure drop across one tube row: `Eu·N·½ρu²`.
///
/// `tubes_per_row` is the effective tube count the flow crosses in the row.
#[must_use]
pub fn row_pressure_drop(
    euler: f64,
    density: MassDensity,
    max_velocity: Velocity,
    tubes_per_row: f64,
) -> Pressure {
    density * max_velocity * max_velocity * (0.5 * euler * tubes_per_row)
}

/// Darcy-Weisbach pressure drop `f·(L/D)·½ρu²`.
#[must_use]
pub fn darcy_pressure_drop(
    friction: f64,
    length: Length,
    diameter: Length,
    density: MassDensity,
    velocity: Velocity,
) -> Pressure {
    let l_over_d = (length / diameter).get::<ratio>();
    density * velocity * velocity * (0.5 * friction * l_over_d)
}

/// Laminar flat-plate Nusselt number for the developing region on a fin.
///
/// Returns 0.1 when `Re ≤ 1`.
#[must_use]
pub fn flat_plate_nusselt(reynolds: f64, prandtl: f64) -> f64 {
    if reynolds <= 1.0 {
        return 0.1;
    }
    let numerator = 0.6774 * reynolds.sqrt() * prandtl.cbrt();
    let denominator = (1.0 + (0.0468 / prandtl).powf(2.0 / 3.0)).powf(0.25);
    numerator / denominator
}

/// Thermal entry length `0.05·Re_Dh·D_h·Pr` of a laminar channel.
///
/// Returns zero when the viscosity is not positive.
#[must_use]
pub fn thermal_entry_length(
    density: MassDensity,
    velocity: Velocity,
    viscosity: DynamicViscosity,
    prandtl: f64,
    hydraulic_diameter: Length,
) -> Length {
    if viscosity <= DynamicViscosity::ZERO {
        return Length::ZERO;
    }
    let re = reynolds(density, velocity, hydraulic_diameter, viscosity);
    hydraulic_diameter * (0.05 * re * prandtl)
}
