use crate::error::{Result, SectionError, TableError};
use crate::geometry::SectionGeometry;
use crate::math::{Point3, Vector3};
use crate::table::{names, Row, TableStore, Value};

/// Number of vertices used to sample a circular boundary.
const CIRCLE_SAMPLES: usize = 40;

/// Marker of the primary (outer) polygon of a section-designer shape.
const PRIMARY_POLYGON: &str = "Polygon1";

/// The closed set of shape encodings this crate can rebuild.
///
/// Unknown shape strings are rejected when the row is classified, so a
/// new export shape can never silently fall through the dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    SdSection,
    BridgeSection,
    Nonprismatic,
}

impl ShapeKind {
    /// Parses the export's shape string.
    #[must_use]
    pub fn parse(shape: &str) -> Option<Self> {
        match shape {
            "Circle" => Some(Self::Circle),
            "SD Section" => Some(Self::SdSection),
            "Bridge Section" => Some(Self::BridgeSection),
            "Nonprismatic" => Some(Self::Nonprismatic),
            _ => None,
        }
    }

    /// Classifies a general-properties row.
    ///
    /// Returns `Ok(None)` when the row carries no shape column at all
    /// (a legitimately geometry-less section).
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::UnsupportedShape`] for a shape string
    /// outside the covered set.
    pub fn of_row(row: &Row) -> Result<Option<Self>> {
        let Some(shape) = row.text_opt("Shape") else {
            return Ok(None);
        };
        match Self::parse(shape) {
            Some(kind) => Ok(Some(kind)),
            None => Err(SectionError::UnsupportedShape {
                section: row.text_opt("SectionName").unwrap_or_default().to_owned(),
                shape: shape.to_owned(),
            }
            .into()),
        }
    }
}

/// Samples a circle of the given radius at equal angular steps over
/// `[0, 2*pi)`, centered on the origin.
#[must_use]
pub(crate) fn circle_ring(radius: f64) -> Vec<Point3> {
    (0..CIRCLE_SAMPLES)
        .map(|k| {
            #[allow(clippy::cast_precision_loss)]
            let t = std::f64::consts::TAU * k as f64 / CIRCLE_SAMPLES as f64;
            Point3::new(t.sin() * radius, t.cos() * radius, 0.0)
        })
        .collect()
}

/// Rebuilds the cross-section polygon of the named frame section.
///
/// `Ok(None)` means the section legitimately has no geometry (for example
/// an empty polygon definition); every failure mode is a distinct error.
///
/// # Errors
///
/// Returns [`TableError::RowNotFound`] if the section (or a section it
/// delegates to) is absent, and [`SectionError`] for unsupported shapes,
/// unsupported taper pairings, or a cyclic taper chain.
pub fn geometry_for(store: &TableStore, name: &str) -> Result<Option<SectionGeometry>> {
    let row = store.row_by(names::FRAME_SECTION_GENERAL, "SectionName", name)?;
    geometry_for_row(store, row, &mut Vec::new())
}

/// Dispatches on the shape kind of an already-located general-properties row.
pub(crate) fn geometry_for_row(
    store: &TableStore,
    row: &Row,
    visited: &mut Vec<String>,
) -> Result<Option<SectionGeometry>> {
    let name = row.text("SectionName")?;
    let Some(kind) = ShapeKind::of_row(row)? else {
        return Ok(None);
    };
    match kind {
        ShapeKind::Circle => {
            let radius = row.number("t3")? / 2.0;
            Ok(Some(SectionGeometry::new(circle_ring(radius), Vec::new())))
        }
        ShapeKind::SdSection => Ok(sd_section_geometry(store, name)),
        ShapeKind::BridgeSection => bridge_section_geometry(store, name).map(Some),
        ShapeKind::Nonprismatic => constant_taper_geometry(store, name, visited),
    }
}

/// Section-designer shapes: the `Polygon1` group is the exterior, every
/// distinct `Opening` group is one hole.
fn sd_section_geometry(store: &TableStore, name: &str) -> Option<SectionGeometry> {
    let polygon_rows = store.rows(names::SD_SHAPE_POLYGON);

    let exterior: Vec<Point3> = polygon_rows
        .iter()
        .filter(|r| r.is("SectionName", name) && r.is("ShapeName", PRIMARY_POLYGON))
        .filter_map(point_of_row)
        .collect();
    if exterior.is_empty() {
        return None;
    }

    let mut interior = Vec::new();
    let mut seen: Vec<&str> = Vec::new();
    for opening in polygon_rows
        .iter()
        .filter(|r| r.is("SectionName", name) && r.is("ShapeMat", "Opening"))
    {
        let Some(group) = opening.text_opt("ShapeName") else {
            continue;
        };
        if seen.contains(&group) {
            continue;
        }
        seen.push(group);
        interior.push(
            polygon_rows
                .iter()
                .filter(|r| r.is("ShapeName", group))
                .filter_map(point_of_row)
                .collect(),
        );
    }

    Some(SectionGeometry::new(exterior, interior))
}

/// Bridge-deck shapes: points are grouped by polygon id, the group of the
/// non-opening row is the exterior, and everything is normalized to the
/// reference point recorded on that row.
fn bridge_section_geometry(store: &TableStore, name: &str) -> Result<SectionGeometry> {
    let polygon_rows = store.rows(names::FRAME_SECTION_POLYGON);

    let exterior_row = polygon_rows
        .iter()
        .find(|r| r.is("SectionName", name) && !r.flag("Opening"))
        .ok_or(TableError::RowNotFound {
            table: names::FRAME_SECTION_POLYGON,
            column: "SectionName",
            key: name.to_owned(),
        })?;
    let exterior_id = exterior_row.get("Polygon");

    let exterior: Vec<Point3> = polygon_rows
        .iter()
        .filter(|r| r.is("SectionName", name) && r.get("Polygon") == exterior_id)
        .filter_map(point_of_row)
        .collect();

    let reference = Vector3::new(
        exterior_row.number("RefPtX")?,
        exterior_row.number("RefPtY")?,
        0.0,
    );

    let mut interior = Vec::new();
    let mut seen: Vec<&Value> = Vec::new();
    for opening in polygon_rows
        .iter()
        .filter(|r| r.is("SectionName", name) && r.flag("Opening"))
    {
        let Some(group) = opening.get("Polygon") else {
            continue;
        };
        if seen.contains(&group) {
            continue;
        }
        seen.push(group);
        interior.push(
            polygon_rows
                .iter()
                .filter(|r| r.get("Polygon") == Some(group))
                .filter_map(point_of_row)
                .collect(),
        );
    }

    let mut geometry = SectionGeometry::new(exterior, interior);
    geometry.translate_to_origin(reference);
    Ok(geometry)
}

/// Degenerate taper whose two end sections are the same named section:
/// delegate to that section, guarding against cyclic references.
fn constant_taper_geometry(
    store: &TableStore,
    name: &str,
    visited: &mut Vec<String>,
) -> Result<Option<SectionGeometry>> {
    if visited.iter().any(|seen| seen == name) {
        return Err(SectionError::CyclicTaper(name.to_owned()).into());
    }
    visited.push(name.to_owned());

    let segment = store.row_by(names::FRAME_SECTION_NONPRISMATIC, "SectionName", name)?;
    let start = segment.text("StartSect")?;
    let end = segment.text("EndSect")?;
    if start != end {
        return Err(SectionError::UnsupportedTaper {
            section: name.to_owned(),
            start: start.to_owned(),
            end: end.to_owned(),
        }
        .into());
    }

    let row = store.row_by(names::FRAME_SECTION_GENERAL, "SectionName", start)?;
    geometry_for_row(store, row, visited)
}

fn point_of_row(row: &Row) -> Option<Point3> {
    match (row.get("X"), row.get("Y")) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => Some(Point3::new(*x, *y, 0.0)),
        _ => None,
    }
}
