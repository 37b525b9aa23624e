//! Resolved zone geometry.
//!
//! Zone dimensions are collected in a spec, checked, and resolved once into
//! an immutable geometry value. Derived quantities (inner diameter, porosity,
//! flow areas, rows per column) are computed at that point, after every
//! default and override has been applied, and never change afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uom::si::{
    area::square_meter,
    f64::{Area, Length, ThermalConductivity},
    length::{inch, meter},
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::constraint::{Constraint, ConstraintError, NonNegative, StrictlyPositive};

/// Default tube wall thickness, 0.035 in.
pub const DEFAULT_WALL_THICKNESS: f64 = 0.000_889;

/// Default wall conductivity, stainless steel.
pub const DEFAULT_WALL_CONDUCTIVITY: f64 = 16.2;

/// Default absolute roughness of drawn tubing.
pub const DEFAULT_ROUGHNESS: f64 = 15e-6;

/// Default pitch-to-diameter ratio for bare banks.
pub const DEFAULT_PITCH_RATIO: f64 = 1.5;

/// Errors raised while resolving a geometry spec.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid {name}: {value}")]
    InvalidDimension {
        name: &'static str,
        value: f64,
        #[source]
        source: ConstraintError,
    },

    #[error("wall thickness {wall_thickness:?} leaves no bore in a {outer_diameter:?} tube")]
    NoBore {
        outer_diameter: Length,
        wall_thickness: Length,
    },

    #[error("{name} {pitch:?} must exceed the tube diameter {diameter:?}")]
    PitchTooSmall {
        name: &'static str,
        pitch: Length,
        diameter: Length,
    },

    #[error("fin thickness {thickness:?} must be smaller than the fin pitch {pitch:?}")]
    FinTooThick { thickness: Length, pitch: Length },

    #[error("column {column} holds no tubes")]
    EmptyColumn { column: usize },

    #[error("a tube bank needs at least one row")]
    ZeroDepth,
}

/// Checks a dimension against `C` and rejects infinities.
fn checked<C: Constraint<f64>>(name: &'static str, value: f64) -> Result<f64, GeometryError> {
    C::check(&value)
        .and_then(|()| {
            if value.is_finite() {
                Ok(value)
            } else {
                Err(ConstraintError::AboveMaximum)
            }
        })
        .map_err(|source| GeometryError::InvalidDimension {
            name,
            value,
            source,
        })
}

fn positive(name: &'static str, value: f64) -> Result<f64, GeometryError> {
    checked::<StrictlyPositive>(name, value)
}

fn non_negative(name: &'static str, value: f64) -> Result<f64, GeometryError> {
    checked::<NonNegative>(name, value)
}

/// Arrangement of tubes in successive columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Odd columns are shifted by half a transverse pitch.
    #[default]
    Staggered,
    Inline,
}

/// Tube-bank dimensions before defaults are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeBankSpec {
    pub width: Length,
    pub height: Length,
    pub tube_outer_diameter: Length,
    pub wall_thickness: Option<Length>,
    /// Pitch-to-diameter ratio used for any pitch not given explicitly.
    pub pitch_ratio: f64,
    pub transverse_pitch: Option<Length>,
    pub longitudinal_pitch: Option<Length>,
    /// Number of tube columns in the flow direction.
    pub depth: usize,
    pub layout: Layout,
    pub wall_conductivity: Option<ThermalConductivity>,
    pub roughness: Option<Length>,
}

impl TubeBankSpec {
    /// A staggered bank with default pitches and wall properties.
    #[must_use]
    pub fn new(width: Length, height: Length, tube_outer_diameter: Length, depth: usize) -> Self {
        Self {
            width,
            height,
            tube_outer_diameter,
            wall_thickness: None,
            pitch_ratio: DEFAULT_PITCH_RATIO,
            transverse_pitch: None,
            longitudinal_pitch: None,
            depth,
            layout: Layout::default(),
            wall_conductivity: None,
            roughness: None,
        }
    }

    /// Sets both pitches explicitly.
    #[must_use]
    pub fn with_pitches(self, transverse: Length, longitudinal: Length) -> Self {
        Self {
            transverse_pitch: Some(transverse),
            longitudinal_pitch: Some(longitudinal),
            ..self
        }
    }

    /// Applies defaults, validates, and computes the derived geometry.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if a dimension is not positive, the wall
    /// leaves no bore, a pitch does not clear the tube, the bank has no
    /// depth, or a column holds no tubes.
    pub fn resolve(&self) -> Result<TubeBankGeometry, GeometryError> {
        let width = positive("width", self.width.get::<meter>())?;
        let height = positive("height", self.height.get::<meter>())?;
        let d = positive("tube outer diameter", self.tube_outer_diameter.get::<meter>())?;
        let t_w = positive(
            "wall thickness",
            self.wall_thickness
                .map_or(DEFAULT_WALL_THICKNESS, |t| t.get::<meter>()),
        )?;
        let ratio = positive("pitch ratio", self.pitch_ratio)?;
        let s_t = self.transverse_pitch.map_or(ratio * d, |s| s.get::<meter>());
        let s_l = self.longitudinal_pitch.map_or(ratio * d, |s| s.get::<meter>());
        let k_wall = positive(
            "wall conductivity",
            self.wall_conductivity
                .map_or(DEFAULT_WALL_CONDUCTIVITY, |k| k.get::<watt_per_meter_kelvin>()),
        )?;
        let roughness = non_negative(
            "roughness",
            self.roughness.map_or(DEFAULT_ROUGHNESS, |e| e.get::<meter>()),
        )?;

        let d_in = d - 2.0 * t_w;
        if d_in <= 0.0 {
            return Err(GeometryError::NoBore {
                outer_diameter: self.tube_outer_diameter,
                wall_thickness: Length::new::<meter>(t_w),
            });
        }
        for (name, pitch) in [("transverse pitch", s_t), ("longitudinal pitch", s_l)] {
            if !(pitch > d) {
                return Err(GeometryError::PitchTooSmall {
                    name,
                    pitch: Length::new::<meter>(pitch),
                    diameter: self.tube_outer_diameter,
                });
            }
        }
        if self.depth == 0 {
            return Err(GeometryError::ZeroDepth);
        }

        let offsets = match self.layout {
            Layout::Staggered => [0.0, s_t / 2.0],
            Layout::Inline => [0.0, 0.0],
        };
        let rows_per_column = (0..self.depth)
            .map(|column| {
                let first = d / 2.0 + offsets[column % 2];
                let span = height - d / 2.0 - first;
                if span < 0.0 {
                    return Err(GeometryError::EmptyColumn { column });
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let rows = (span / s_t).floor() as usize + 1;
                Ok(rows)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TubeBankGeometry {
            width,
            height,
            diameter: d,
            inner_diameter: d_in,
            transverse_pitch: s_t,
            longitudinal_pitch: s_l,
            wall_conductivity: k_wall,
            roughness,
            layout: self.layout,
            offsets,
            rows_per_column,
        })
    }
}

/// A tube center in the zone's `(x, y)` plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeCenter {
    pub x: Length,
    pub y: Length,
}

/// Immutable, fully resolved tube-bank geometry.
///
/// Lengths are stored in meters.
#[derive(Debug, Clone, PartialEq)]
pub struct TubeBankGeometry {
    width: f64,
    height: f64,
    diameter: f64,
    inner_diameter: f64,
    transverse_pitch: f64,
    longitudinal_pitch: f64,
    wall_conductivity: f64,
    roughness: f64,
    layout: Layout,
    offsets: [f64; 2],
    rows_per_column: Vec<usize>,
}

impl TubeBankGeometry {
    #[must_use]
    pub fn width(&self) -> Length {
        Length::new::<meter>(self.width)
    }

    #[must_use]
    pub fn height(&self) -> Length {
        Length::new::<meter>(self.height)
    }

    #[must_use]
    pub fn tube_diameter(&self) -> Length {
        Length::new::<meter>(self.diameter)
    }

    #[must_use]
    pub fn inner_diameter(&self) -> Length {
        Length::new::<meter>(self.inner_diameter)
    }

    #[must_use]
    pub fn transverse_pitch(&self) -> Length {
        Length::new::<meter>(self.transverse_pitch)
    }

    #[must_use]
    pub fn longitudinal_pitch(&self) -> Length {
        Length::new::<meter>(self.longitudinal_pitch)
    }

    #[must_use]
    pub fn wall_conductivity(&self) -> ThermalConductivity {
        ThermalConductivity::new::<watt_per_meter_kelvin>(self.wall_conductivity)
    }

    #[must_use]
    pub fn roughness(&self) -> Length {
        Length::new::<meter>(self.roughness)
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Number of tube columns in the flow direction.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.rows_per_column.len()
    }

    #[must_use]
    pub fn rows_per_column(&self) -> &[usize] {
        &self.rows_per_column
    }

    /// Every tube in the bank; the coolant divides evenly among them.
    #[must_use]
    pub fn tube_count(&self) -> usize {
        self.rows_per_column.iter().sum()
    }

    /// Mean tubes per column, the effective tube count of one row.
    #[must_use]
    pub fn average_rows(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let mean = self.tube_count() as f64 / self.depth() as f64;
        mean
    }

    /// Length of the bank in the flow direction.
    #[must_use]
    pub fn length(&self) -> Length {
        #[allow(clippy::cast_precision_loss)]
        let depth = self.depth() as f64;
        Length::new::<meter>(depth * self.longitudinal_pitch)
    }

    /// Void fraction `1 − (π/4)D²/(S_T·S_L)`.
    #[must_use]
    pub fn porosity(&self) -> f64 {
        1.0 - std::f64::consts::FRAC_PI_4 * self.diameter * self.diameter
            / (self.transverse_pitch * self.longitudinal_pitch)
    }

    /// `S_T / D`.
    #[must_use]
    pub fn pitch_ratio(&self) -> f64 {
        self.transverse_pitch / self.diameter
    }

    #[must_use]
    pub fn frontal_area(&self) -> Area {
        Area::new::<square_meter>(self.width * self.height)
    }

    /// Frontal area times the transverse gap fraction `(S_T − D)/S_T`.
    #[must_use]
    pub fn minimum_flow_area(&self) -> Area {
        self.frontal_area() * ((self.transverse_pitch - self.diameter) / self.transverse_pitch)
    }

    /// Outer tube surface of one row, `N·π·D·W`.
    #[must_use]
    pub fn gas_area(&self) -> Area {
        Area::new::<square_meter>(
            self.average_rows() * std::f64::consts::PI * self.diameter * self.width,
        )
    }

    /// Inner tube surface of one row, `N·π·D_in·W`.
    #[must_use]
    pub fn coolant_area(&self) -> Area {
        Area::new::<square_meter>(
            self.average_rows() * std::f64::consts::PI * self.inner_diameter * self.width,
        )
    }

    /// Tube centers with the first column at `origin_x`.
    ///
    /// This is a pure function of the geometry, so repeated calls agree.
    #[must_use]
    pub fn tube_centers(&self, origin_x: Length) -> Vec<TubeCenter> {
        let origin = origin_x.get::<meter>();
        self.rows_per_column
            .iter()
            .enumerate()
            .flat_map(|(column, &rows)| {
                #[allow(clippy::cast_precision_loss)]
                let x = origin + column as f64 * self.longitudinal_pitch;
                let first = self.diameter / 2.0 + self.offsets[column % 2];
                (0..rows).map(move |row| {
                    #[allow(clippy::cast_precision_loss)]
                    let y = first + row as f64 * self.transverse_pitch;
                    TubeCenter {
                        x: Length::new::<meter>(x),
                        y: Length::new::<meter>(y),
                    }
                })
            })
            .collect()
    }
}

/// Plate fins threaded over a tube bank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinSpec {
    pub pitch: Length,
    pub thickness: Length,
}

/// Default fin thickness, 0.012 in.
pub const DEFAULT_FIN_THICKNESS: f64 = 0.000_304_8;

/// Default pitch-to-diameter ratio for finned banks.
pub const DEFAULT_FINNED_PITCH_RATIO: f64 = 2.0;

impl FinSpec {
    /// Fins at `fins_per_inch` with the default thickness.
    #[must_use]
    pub fn from_fins_per_inch(fins_per_inch: f64) -> Self {
        Self {
            pitch: Length::new::<inch>(1.0 / fins_per_inch),
            thickness: Length::new::<meter>(DEFAULT_FIN_THICKNESS),
        }
    }

    /// Checks the fins against the bank they sit on.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if a dimension is not positive or the fins
    /// are at least as thick as their pitch.
    pub fn resolve(&self, bank: &TubeBankGeometry) -> Result<FinGeometry, GeometryError> {
        let pitch = positive("fin pitch", self.pitch.get::<meter>())?;
        let thickness = positive("fin thickness", self.thickness.get::<meter>())?;
        if thickness >= pitch {
            return Err(GeometryError::FinTooThick {
                thickness: self.thickness,
                pitch: self.pitch,
            });
        }

        let fins = (bank.width / pitch).floor();
        let face = bank.height * bank.longitudinal_pitch
            - bank.average_rows() * std::f64::consts::FRAC_PI_4 * bank.diameter * bank.diameter;
        let exposed = bank.width - fins * thickness;

        Ok(FinGeometry {
            pitch,
            thickness,
            fin_area: 2.0 * fins * face,
            tube_area: bank.average_rows() * std::f64::consts::PI * bank.diameter * exposed,
        })
    }
}

/// Fin geometry resolved against its bank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinGeometry {
    pitch: f64,
    thickness: f64,
    fin_area: f64,
    tube_area: f64,
}

impl FinGeometry {
    #[must_use]
    pub fn pitch(&self) -> Length {
        Length::new::<meter>(self.pitch)
    }

    #[must_use]
    pub fn thickness(&self) -> Length {
        Length::new::<meter>(self.thickness)
    }

    /// Open fraction of the frontal area, `1 − t/p`.
    #[must_use]
    pub fn blockage(&self) -> f64 {
        1.0 - self.thickness / self.pitch
    }

    /// Hydraulic diameter of the channel between fins, twice the gap.
    #[must_use]
    pub fn hydraulic_diameter(&self) -> Length {
        Length::new::<meter>(2.0 * (self.pitch - self.thickness))
    }

    /// Both faces of every fin over one row.
    #[must_use]
    pub fn fin_area(&self) -> Area {
        Area::new::<square_meter>(self.fin_area)
    }

    /// Tube surface left exposed between fins over one row.
    #[must_use]
    pub fn tube_area(&self) -> Area {
        Area::new::<square_meter>(self.tube_area)
    }
}

/// Round inlet ducting with no heat transfer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuctGeometry {
    diameter: Length,
    length: Length,
    roughness: Length,
}

impl DuctGeometry {
    /// Creates a duct, defaulting the roughness.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDimension`] for a non-positive
    /// diameter or length, or a negative roughness.
    pub fn new(
        diameter: Length,
        length: Length,
        roughness: Option<Length>,
    ) -> Result<Self, GeometryError> {
        positive("duct diameter", diameter.get::<meter>())?;
        positive("duct length", length.get::<meter>())?;
        let roughness = roughness.unwrap_or(Length::new::<meter>(DEFAULT_ROUGHNESS));
        non_negative("roughness", roughness.get::<meter>())?;
        Ok(Self {
            diameter,
            length,
            roughness,
        })
    }

    #[must_use]
    pub fn diameter(&self) -> Length {
        self.diameter
    }

    #[must_use]
    pub fn length(&self) -> Length {
        self.length
    }

    #[must_use]
    pub fn roughness(&self) -> Length {
        self.roughness
    }

    #[must_use]
    pub fn flow_area(&self) -> Area {
        let d = self.diameter.get::<meter>();
        Area::new::<square_meter>(std::f64::consts::FRAC_PI_4 * d * d)
    }
}
