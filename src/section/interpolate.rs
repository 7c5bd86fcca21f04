use crate::error::{Result, SectionError};
use crate::table::Row;

/// How a stiffness property varies along a tapered segment.
///
/// The law fixes the power `p` of the variation
/// `value(xi) = S * (1 + xi * ((E/S)^(1/p) - 1))^p`, which meets the start
/// value `S` at `xi = 0` and the end value `E` at `xi = 1` exactly, and is
/// linear in `xi` for `p = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariationLaw {
    #[default]
    Linear,
    Parabolic,
    Cubic,
}

impl VariationLaw {
    /// Parses the export's variation-law string.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::UnsupportedVariation`] for a law outside
    /// the covered set.
    pub fn parse(law: &str) -> Result<Self> {
        match law {
            "Linear" => Ok(Self::Linear),
            "Parabolic" => Ok(Self::Parabolic),
            "Cubic" => Ok(Self::Cubic),
            other => Err(SectionError::UnsupportedVariation {
                law: other.to_owned(),
            }
            .into()),
        }
    }

    fn power(self) -> i32 {
        match self {
            Self::Linear => 1,
            Self::Parabolic => 2,
            Self::Cubic => 3,
        }
    }

    /// Interpolates between the start and end value of a property at
    /// natural coordinate `xi` in `[0, 1]`.
    #[must_use]
    pub fn interpolate(self, start: f64, end: f64, xi: f64) -> f64 {
        let p = self.power();
        start * (end / start).powf(1.0 / f64::from(p)).mul_add(xi, 1.0 - xi).powi(p)
    }
}

/// The geometric stiffness values of one end section, read from the
/// general properties table. The `AS2` shear area serves both shear
/// directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricProperties {
    pub area: f64,
    pub shear_area: f64,
    pub i33: f64,
    pub i22: f64,
    pub torsion: f64,
}

impl GeometricProperties {
    /// Reads the tracked properties from a general-properties row.
    ///
    /// # Errors
    ///
    /// Returns an error if any property column is absent or non-numeric.
    pub fn of_row(row: &Row) -> Result<Self> {
        Ok(Self {
            area: row.number("Area")?,
            shear_area: row.number("AS2")?,
            i33: row.number("I33")?,
            i22: row.number("I22")?,
            torsion: row.number("TorsConst")?,
        })
    }
}

/// Per-property variation laws of one taper segment. Only the two bending
/// stiffnesses carry a law column in the export; every other property
/// varies linearly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VariationLaws {
    pub i33: VariationLaw,
    pub i22: VariationLaw,
}

impl VariationLaws {
    /// Reads the law columns of a nonprismatic segment row, defaulting to
    /// linear where a column is absent.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::UnsupportedVariation`] for an unknown law
    /// string.
    pub fn of_row(segment: &Row) -> Result<Self> {
        let law = |column: &str| match segment.text_opt(column) {
            Some(text) => VariationLaw::parse(text),
            None => Ok(VariationLaw::default()),
        };
        Ok(Self {
            i33: law("EI33Var")?,
            i22: law("EI22Var")?,
        })
    }
}

/// Interpolates every tracked geometric property at `xi`.
#[must_use]
pub fn interpolate_properties(
    start: &GeometricProperties,
    end: &GeometricProperties,
    laws: VariationLaws,
    xi: f64,
) -> GeometricProperties {
    let linear = VariationLaw::Linear;
    GeometricProperties {
        area: linear.interpolate(start.area, end.area, xi),
        shear_area: linear.interpolate(start.shear_area, end.shear_area, xi),
        i33: laws.i33.interpolate(start.i33, end.i33, xi),
        i22: laws.i22.interpolate(start.i22, end.i22, xi),
        torsion: linear.interpolate(start.torsion, end.torsion, xi),
    }
}
