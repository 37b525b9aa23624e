//! Supporting utilities used by models.
//!
//! The correlation library and the heat-transfer and pressure-drop model
//! plugins live here because they are useful on their own, outside the
//! marching solver that consumes them.

pub mod constraint;
pub mod correlations;
pub mod heat_transfer;
pub mod hx;
pub mod pressure_drop;
pub mod thermo;
pub mod units;
