//! # Twine Crossflow
//!
//! Row-marching models of cross-flow gas-to-liquid tube-bank heat exchangers
//! for [Twine](https://github.com/isentropic-dev/twine).
//!
//! ## Crate layout
//!
//! - [`models`]: The [`twine_core::Model`] adapter and the exchanger it
//!   wraps, in [`models::thermal::crossflow`].
//! - [`support`]: Correlations, heat-transfer and pressure-drop models,
//!   property access, and other utilities used by the model.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code starts in a model's internal `core` module and moves to
//! [`support`] once it is useful outside that model. The correlation library
//! and the gas-side model plugins already live there; zone geometry and the
//! marching solver remain model-specific.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events but never installs a subscriber. Each
//! solved row logs at `debug`, and stiff rows or failed zones log at `warn`.

pub mod models;
pub mod support;
