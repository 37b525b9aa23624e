//! Fluid identity: pure species and mixtures.
//!
//! A [`FluidId`] names what flows in a stream. Property models decide which
//! identities they support and report the rest as
//! [`PropertyError::Undefined`](super::PropertyError::Undefined).

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::{f64::MolarMass, molar_mass::kilogram_per_mole};

use crate::support::constraint::UnitInterval;

/// Species known to the reference property models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    N2,
    O2,
    Air,
    CO2,
    CO,
    He,
    H2,
    Ar,
    H2O,
}

impl Species {
    /// Molar mass of the species.
    #[must_use]
    pub fn molar_mass(self) -> MolarMass {
        let kg_per_mol = match self {
            Species::N2 => 0.028_013_4,
            Species::O2 => 0.031_998_8,
            Species::Air => 0.028_965,
            Species::CO2 => 0.044_009_5,
            Species::CO => 0.028_010_1,
            Species::He => 0.004_002_6,
            Species::H2 => 0.002_015_88,
            Species::Ar => 0.039_948,
            Species::H2O => 0.018_015_28,
        };
        MolarMass::new::<kilogram_per_mole>(kg_per_mol)
    }
}

/// Errors raised while building a [`Composition`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompositionError {
    #[error("composition has no species")]
    Empty,
    #[error("fraction for {species:?} is negative or not finite: {fraction}")]
    InvalidFraction { species: Species, fraction: f64 },
    #[error("fractions sum to zero")]
    ZeroSum,
}

/// A mixture composition stored as normalized mole fractions.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    mole_fractions: Vec<(Species, f64)>,
}

impl Composition {
    /// Creates a composition from mole fractions, normalizing them to sum to one.
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError`] if the list is empty, a fraction is
    /// negative or not finite, or the fractions sum to zero.
    pub fn from_mole_fractions(fractions: Vec<(Species, f64)>) -> Result<Self, CompositionError> {
        Ok(Self {
            mole_fractions: normalize(fractions)?,
        })
    }

    /// Creates a composition from mass fractions.
    ///
    /// Mass fractions are converted to mole fractions with the species molar
    /// masses, then normalized.
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError`] under the same conditions as
    /// [`Composition::from_mole_fractions`].
    pub fn from_mass_fractions(fractions: Vec<(Species, f64)>) -> Result<Self, CompositionError> {
        let mass = normalize(fractions)?;
        let moles = mass
            .into_iter()
            .map(|(species, y)| (species, y / species.molar_mass().get::<kilogram_per_mole>()))
            .collect();
        Self::from_mole_fractions(moles)
    }

    /// Iterates over `(species, mole fraction)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Species, f64)> + '_ {
        self.mole_fractions.iter().copied()
    }

    /// Mole-fraction-weighted molar mass of the mixture.
    #[must_use]
    pub fn molar_mass(&self) -> MolarMass {
        let kg_per_mol = self
            .iter()
            .map(|(species, x)| x * species.molar_mass().get::<kilogram_per_mole>())
            .sum();
        MolarMass::new::<kilogram_per_mole>(kg_per_mol)
    }

    /// Mass fractions of the mixture, in the same order as [`Composition::iter`].
    #[must_use]
    pub fn mass_fractions(&self) -> Vec<(Species, f64)> {
        let mixture = self.molar_mass();
        self.iter()
            .map(|(species, x)| (species, x * (species.molar_mass() / mixture).value))
            .collect()
    }
}

fn normalize(fractions: Vec<(Species, f64)>) -> Result<Vec<(Species, f64)>, CompositionError> {
    if fractions.is_empty() {
        return Err(CompositionError::Empty);
    }
    for &(species, fraction) in &fractions {
        if !fraction.is_finite() || fraction < 0.0 {
            return Err(CompositionError::InvalidFraction { species, fraction });
        }
    }

    let sum: f64 = fractions.iter().map(|(_, f)| f).sum();
    if sum <= 0.0 {
        return Err(CompositionError::ZeroSum);
    }

    fractions
        .into_iter()
        .map(|(species, f)| {
            let fraction = f / sum;
            UnitInterval::new(fraction)
                .map(|_| (species, fraction))
                .map_err(|_| CompositionError::InvalidFraction { species, fraction })
        })
        .collect()
}

/// The identity of the fluid in a stream.
#[derive(Debug, Clone, PartialEq)]
pub enum FluidId {
    /// A single species.
    Pure(Species),
    /// A mixture with known composition.
    Mixture(Composition),
}

impl FluidId {
    /// Returns the single species if this is a pure fluid.
    #[must_use]
    pub fn as_pure(&self) -> Option<Species> {
        match self {
            FluidId::Pure(species) => Some(*species),
            FluidId::Mixture(_) => None,
        }
    }

    /// Molar mass of the fluid.
    #[must_use]
    pub fn molar_mass(&self) -> MolarMass {
        match self {
            FluidId::Pure(species) => species.molar_mass(),
            FluidId::Mixture(composition) => composition.molar_mass(),
        }
    }
}

impl From<Species> for FluidId {
    fn from(species: Species) -> Self {
        FluidId::Pure(species)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalized_fractions_sum_to_one(fracs in prop::collection::vec(0.0_f64..1.0, 1..5)) {
            let species = [Species::N2, Species::O2, Species::CO2, Species::He, Species::Ar];
            let input: Vec<_> = fracs
                .iter()
                .enumerate()
                .map(|(i, &f)| (species[i], f))
                .collect();

            if let Ok(composition) = Composition::from_mole_fractions(input) {
                let sum: f64 = composition.iter().map(|(_, x)| x).sum();
                prop_assert!((sum - 1.0).abs() < 1e-12);
            }
        }
    }
}
