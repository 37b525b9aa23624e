//! Thermal systems models.
//!
//! This module contains models for thermal systems such as heat exchangers.

pub mod crossflow;
