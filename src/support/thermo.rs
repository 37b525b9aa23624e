//! Thermophysical property access.
//!
//! The marching solver needs density, viscosity, specific heat, thermal
//! conductivity, Prandtl number, enthalpy, and molar mass of both streams at
//! every row. This module defines that contract as capability traits over a
//! [`State`] of temperature, pressure, and fluid identity, and provides a few
//! reference property models.
//!
//! Production property backends live outside this crate; any type that
//! implements the capabilities in [`capability`] is a [`PropertyProvider`] and
//! can drive the solver.

mod error;
mod inverse;
mod state;

pub mod capability;
pub mod fluid;
pub mod model;

pub use capability::{Property, PropertyProvider};
pub use error::PropertyError;
pub use inverse::{InverseConfig, InverseError, temperature_from_enthalpy};
pub use state::State;
