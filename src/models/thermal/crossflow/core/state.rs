//! Stream states and profiles.

use std::fmt;

use uom::{
    ConstZero,
    si::f64::{Length, MassRate, Pressure, ThermodynamicTemperature},
};

use crate::support::thermo::{State, fluid::FluidId};

/// Which side of the exchanger a state belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamRole {
    Gas,
    Coolant,
}

impl fmt::Display for StreamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gas => f.write_str("gas"),
            Self::Coolant => f.write_str("coolant"),
        }
    }
}

/// One stream's state at one axial position.
///
/// States are snapshots. Marching through a row creates a new state with
/// [`FluidState::advanced`]; existing states are never rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct FluidState {
    pub role: StreamRole,
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub mass_rate: MassRate,
    pub fluid: FluidId,
    /// Axial position along the gas flow path.
    pub x: Length,
}

impl FluidState {
    /// Creates a gas state at `x = 0`.
    #[must_use]
    pub fn gas(
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
        mass_rate: MassRate,
        fluid: FluidId,
    ) -> Self {
        Self {
            role: StreamRole::Gas,
            temperature,
            pressure,
            mass_rate,
            fluid,
            x: Length::ZERO,
        }
    }

    /// Creates a coolant state at `x = 0`.
    #[must_use]
    pub fn coolant(
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
        mass_rate: MassRate,
        fluid: FluidId,
    ) -> Self {
        Self {
            role: StreamRole::Coolant,
            ..Self::gas(temperature, pressure, mass_rate, fluid)
        }
    }

    /// Returns a new state downstream of this one.
    #[must_use]
    pub fn advanced(
        &self,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
        x: Length,
    ) -> Self {
        Self {
            temperature,
            pressure,
            x,
            fluid: self.fluid.clone(),
            ..*self
        }
    }

    /// The property-lookup state `(T, P, fluid)`.
    #[must_use]
    pub fn state(&self) -> State<FluidId> {
        State::new(self.temperature, self.pressure, self.fluid.clone())
    }

    /// Whether the temperature and pressure are both finite and positive.
    #[must_use]
    pub fn is_physical(&self) -> bool {
        let t = self.temperature.value;
        let p = self.pressure.value;
        t.is_finite() && p.is_finite() && t > 0.0 && p > 0.0
    }
}

/// A stream's inlet and the states it passes through, in flow order.
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    states: Vec<FluidState>,
}

impl Stream {
    /// Starts a profile holding only the inlet.
    #[must_use]
    pub fn new(inlet: FluidState) -> Self {
        Self {
            states: vec![inlet],
        }
    }

    #[must_use]
    pub fn inlet(&self) -> &FluidState {
        &self.states[0]
    }

    /// The last state in the profile, or the inlet if no rows were solved.
    #[must_use]
    pub fn outlet(&self) -> &FluidState {
        self.states.last().unwrap_or_else(|| self.inlet())
    }

    /// Every state, inlet first.
    #[must_use]
    pub fn states(&self) -> &[FluidState] {
        &self.states
    }

    /// The solved row states, without the inlet.
    #[must_use]
    pub fn rows(&self) -> &[FluidState] {
        &self.states[1..]
    }

    /// `(x, T, P)` for every state, inlet first.
    pub fn positions(
        &self,
    ) -> impl Iterator<Item = (Length, ThermodynamicTemperature, Pressure)> + '_ {
        self.states
            .iter()
            .map(|state| (state.x, state.temperature, state.pressure))
    }

    pub(super) fn extend(&mut self, rows: impl IntoIterator<Item = FluidState>) {
        self.states.extend(rows);
    }
}
