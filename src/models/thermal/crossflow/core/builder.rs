//! Declarative exchanger configuration.
//!
//! An [`ExchangerSpec`] is plain data, loadable from YAML or JSON, with every
//! length in meters. [`ExchangerSpec::build`] resolves it into an immutable
//! [`HeatExchanger`], validating each zone's geometry on the way.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::{
    f64::{Length, ThermalConductivity, ThermodynamicTemperature},
    length::meter,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
};

use super::{
    assembly::{FailurePolicy, HeatExchanger},
    geometry::{
        DEFAULT_FINNED_PITCH_RATIO, DEFAULT_PITCH_RATIO, DuctGeometry, FinSpec, GeometryError,
        Layout, TubeBankSpec,
    },
    options::ZoneModels,
    zone::Zone,
};

/// Default bank width, 16 in.
pub const DEFAULT_WIDTH: f64 = 0.4064;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("zone '{zone}': unknown zone type '{kind}'")]
    UnknownZoneType { zone: String, kind: String },

    #[error("zone '{zone}': missing required key '{key}'")]
    MissingKey { zone: String, key: &'static str },

    #[error("zone '{zone}': row count must be a positive integer, got {value}")]
    InvalidRowCount { zone: String, value: f64 },

    #[error("zone '{zone}': invalid geometry")]
    Geometry {
        zone: String,
        #[source]
        source: GeometryError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One zone as written in a configuration file.
///
/// `type` is `duct` (alias `pipe`), `bare`, or `finned`. Lengths are in
/// meters. A duct uses `tube_outer_diameter` as its bore. A bank without a
/// `height` is square.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default = "default_width")]
    pub width: f64,
    pub height: Option<f64>,
    pub tube_outer_diameter: Option<f64>,
    pub pitch_ratio: Option<f64>,
    pub transverse_pitch: Option<f64>,
    pub longitudinal_pitch: Option<f64>,
    /// Read as a number so a fractional count is reported, not truncated.
    pub row_count: Option<f64>,
    pub fin_pitch: Option<f64>,
    pub fins_per_inch: Option<f64>,
    pub fin_thickness: Option<f64>,
    pub roughness: Option<f64>,
    /// Staggered when true or absent, inline when false.
    pub stagger: Option<bool>,
    pub wall_thickness: Option<f64>,
    /// W/(m·K).
    pub wall_conductivity: Option<f64>,
    pub length: Option<f64>,
    /// Overrides the exchanger-wide models for this zone.
    pub models: Option<ZoneModels>,
}

fn default_width() -> f64 {
    DEFAULT_WIDTH
}

/// A whole exchanger as written in a configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangerSpec {
    pub name: String,
    pub zones: Vec<ZoneSpec>,
    /// Models injected into every zone without its own.
    #[serde(default)]
    pub models: ZoneModels,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    /// Target gas outlet temperature in kelvin.
    pub target_temperature: Option<f64>,
}

impl ExchangerSpec {
    /// Reads a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Io`] or [`BuildError::Yaml`].
    pub fn load_yaml(path: impl AsRef<Path>) -> Result<Self, BuildError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Reads a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Io`] or [`BuildError::Json`].
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, BuildError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Parses a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Yaml`] if the document does not match the schema.
    pub fn from_yaml_str(content: &str) -> Result<Self, BuildError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Resolves every zone and assembles them in order.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] for the first zone with an unknown type, a
    /// missing key, a bad row count, or invalid geometry.
    pub fn build(&self) -> Result<HeatExchanger, BuildError> {
        let mut exchanger =
            HeatExchanger::new(&self.name).with_failure_policy(self.failure_policy);
        if let Some(t) = self.target_temperature {
            exchanger = exchanger.with_target(ThermodynamicTemperature::new::<kelvin>(t));
        }
        for zone in &self.zones {
            exchanger.add_zone(zone.build(self.models)?);
        }
        Ok(exchanger)
    }
}

impl ZoneSpec {
    /// Resolves this zone, using `models` unless the zone has its own.
    ///
    /// # Errors
    ///
    /// See [`ExchangerSpec::build`].
    pub fn build(&self, models: ZoneModels) -> Result<Zone, BuildError> {
        let models = self.models.unwrap_or(models);
        match self.kind.as_str() {
            "duct" | "pipe" => {
                let duct = DuctGeometry::new(
                    meters(self.require(self.tube_outer_diameter, "tube_outer_diameter")?),
                    meters(self.require(self.length, "length")?),
                    self.roughness.map(meters),
                )
                .map_err(|source| self.geometry_error(source))?;
                Ok(Zone::duct(&self.name, duct, models))
            }
            "bare" => {
                let bank = self
                    .bank_spec(DEFAULT_PITCH_RATIO)?
                    .resolve()
                    .map_err(|source| self.geometry_error(source))?;
                Ok(Zone::bare_bank(&self.name, bank, models))
            }
            "finned" => {
                let bank = self
                    .bank_spec(DEFAULT_FINNED_PITCH_RATIO)?
                    .resolve()
                    .map_err(|source| self.geometry_error(source))?;
                let fins = self
                    .fin_spec()?
                    .resolve(&bank)
                    .map_err(|source| self.geometry_error(source))?;
                Ok(Zone::finned_bank(&self.name, bank, fins, models))
            }
            other => Err(BuildError::UnknownZoneType {
                zone: self.name.clone(),
                kind: other.to_owned(),
            }),
        }
    }

    fn require(&self, value: Option<f64>, key: &'static str) -> Result<f64, BuildError> {
        value.ok_or_else(|| BuildError::MissingKey {
            zone: self.name.clone(),
            key,
        })
    }

    fn geometry_error(&self, source: GeometryError) -> BuildError {
        BuildError::Geometry {
            zone: self.name.clone(),
            source,
        }
    }

    fn depth(&self) -> Result<usize, BuildError> {
        let value = self.require(self.row_count, "row_count")?;
        if !(value.is_finite() && value >= 1.0 && value.fract() == 0.0) {
            return Err(BuildError::InvalidRowCount {
                zone: self.name.clone(),
                value,
            });
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(value as usize)
    }

    fn bank_spec(&self, default_pitch_ratio: f64) -> Result<TubeBankSpec, BuildError> {
        Ok(TubeBankSpec {
            width: meters(self.width),
            height: meters(self.height.unwrap_or(self.width)),
            tube_outer_diameter: meters(
                self.require(self.tube_outer_diameter, "tube_outer_diameter")?,
            ),
            wall_thickness: self.wall_thickness.map(meters),
            pitch_ratio: self.pitch_ratio.unwrap_or(default_pitch_ratio),
            transverse_pitch: self.transverse_pitch.map(meters),
            longitudinal_pitch: self.longitudinal_pitch.map(meters),
            depth: self.depth()?,
            layout: if self.stagger.unwrap_or(true) {
                Layout::Staggered
            } else {
                Layout::Inline
            },
            wall_conductivity: self
                .wall_conductivity
                .map(ThermalConductivity::new::<watt_per_meter_kelvin>),
            roughness: self.roughness.map(meters),
        })
    }

    fn fin_spec(&self) -> Result<FinSpec, BuildError> {
        let mut fins = match (self.fin_pitch, self.fins_per_inch) {
            (Some(pitch), _) => FinSpec {
                pitch: meters(pitch),
                ..FinSpec::from_fins_per_inch(1.0)
            },
            (None, Some(fpi)) => FinSpec::from_fins_per_inch(fpi),
            (None, None) => {
                return Err(BuildError::MissingKey {
                    zone: self.name.clone(),
                    key: "fin_pitch",
                });
            }
        };
        if let Some(thickness) = self.fin_thickness {
            fins.thickness = meters(thickness);
        }
        Ok(fins)
    }
}

fn meters(value: f64) -> Length {
    Length::new::<meter>(value)
}
