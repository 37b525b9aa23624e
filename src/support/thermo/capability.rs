//! Capability traits used to query fluid properties.
//!
//! Each property is its own trait so a model states exactly what it can
//! compute. [`PropertyProvider`] collects the full set the marching solver
//! needs and adds the code-keyed [`PropertyProvider::lookup`] entry point.

mod properties;
mod provider;

pub use properties::*;
pub use provider::{Property, PropertyProvider};

/// Base trait for property models.
///
/// `Fluid` is the identity type the model accepts in its [`State`](super::State).
pub trait ThermoModel {
    type Fluid;
}
