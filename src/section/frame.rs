use crate::convert::Diagnostics;
use crate::error::{Result, SectionError, TableError};
use crate::geometry::profile::{circle_ring, geometry_for, geometry_for_row, ShapeKind};
use crate::geometry::SectionGeometry;
use crate::math::gauss::unit_interval_rule;
use crate::section::interpolate::{interpolate_properties, GeometricProperties, VariationLaws};
use crate::section::library::SectionLibrary;
use crate::section::{ModelBuilder, QuadraturePoint, SectionModel};
use crate::table::{names, Row, TableStore};

/// Kind string of an elastic frame section definition.
pub const ELASTIC_FRAME: &str = "Elastic";

/// The ordered cross-section samples of one member, start to end.
///
/// A uniform member reuses the same geometry at both ends; a supported
/// taper carries one sample per end.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameQuadrature {
    sections: Vec<SectionGeometry>,
}

impl FrameQuadrature {
    /// Builds the sample sequence for the section described by a
    /// general-properties row.
    ///
    /// `Ok(None)` means the section has no geometry at all; errors are
    /// reserved for missing references and unsupported configurations.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::RowNotFound`] for dangling section names and
    /// [`SectionError::UnsupportedTaper`] for taper pairings outside the
    /// circle-to-circle case.
    pub fn from_table(
        store: &TableStore,
        row: &Row,
        diagnostics: &mut Diagnostics,
    ) -> Result<Option<Self>> {
        let name = row.text("SectionName")?;
        if ShapeKind::of_row(row)? != Some(ShapeKind::Nonprismatic) {
            return Ok(geometry_for_row(store, row, &mut Vec::new())?.map(Self::pair));
        }

        let segments: Vec<&Row> = store
            .find_rows(names::FRAME_SECTION_NONPRISMATIC, |r| {
                r.is("SectionName", name)
            })
            .collect();
        let segment = *segments.first().ok_or(TableError::RowNotFound {
            table: names::FRAME_SECTION_NONPRISMATIC,
            column: "SectionName",
            key: name.to_owned(),
        })?;
        let start_name = segment.text("StartSect")?;

        if segments.len() > 1 {
            // Advanced multi-segment tapers are collapsed to the first
            // segment's start section.
            diagnostics.log(
                "NonprismaticSection.Segments",
                format!("{name}: {} segments, treated as constant", segments.len()),
            );
            return Ok(geometry_for(store, start_name)?.map(Self::pair));
        }

        let end_name = segment.text("EndSect")?;
        if start_name == end_name {
            return Ok(geometry_for(store, start_name)?.map(Self::pair));
        }

        let start = store.row_by(names::FRAME_SECTION_GENERAL, "SectionName", start_name)?;
        let end = store.row_by(names::FRAME_SECTION_GENERAL, "SectionName", end_name)?;
        match (ShapeKind::of_row(start)?, ShapeKind::of_row(end)?) {
            (Some(ShapeKind::Circle), Some(ShapeKind::Circle)) => {
                let sections = vec![
                    SectionGeometry::new(circle_ring(start.number("t3")? / 2.0), Vec::new()),
                    SectionGeometry::new(circle_ring(end.number("t3")? / 2.0), Vec::new()),
                ];
                Ok(Some(Self { sections }))
            }
            _ => Err(SectionError::UnsupportedTaper {
                section: name.to_owned(),
                start: start.text_opt("Shape").unwrap_or_default().to_owned(),
                end: end.text_opt("Shape").unwrap_or_default().to_owned(),
            }
            .into()),
        }
    }

    fn pair(geometry: SectionGeometry) -> Self {
        Self {
            sections: vec![geometry.clone(), geometry],
        }
    }

    /// Returns the samples in start-to-end order.
    #[must_use]
    pub fn sections(&self) -> &[SectionGeometry] {
        &self.sections
    }

    /// Consumes the quadrature, yielding its samples.
    #[must_use]
    pub fn into_sections(self) -> Vec<SectionGeometry> {
        self.sections
    }
}

/// Builds (or fetches from the registry) the stiffness model of the named
/// frame section, emitting its section definitions to the model builder.
///
/// # Errors
///
/// Returns an error for dangling section or material references,
/// unsupported shapes or variation laws, and cyclic taper chains. A
/// failed build registers nothing.
pub fn frame_model(
    store: &TableStore,
    name: &str,
    library: &mut SectionLibrary,
    builder: &mut dyn ModelBuilder,
    diagnostics: &mut Diagnostics,
) -> Result<SectionModel> {
    frame_model_inner(store, name, library, builder, diagnostics, &mut Vec::new())
}

fn frame_model_inner(
    store: &TableStore,
    name: &str,
    library: &mut SectionLibrary,
    builder: &mut dyn ModelBuilder,
    diagnostics: &mut Diagnostics,
    visited: &mut Vec<String>,
) -> Result<SectionModel> {
    if let Some(model) = library.get(name) {
        return Ok(model.clone());
    }
    if visited.iter().any(|seen| seen == name) {
        return Err(SectionError::CyclicTaper(name.to_owned()).into());
    }
    visited.push(name.to_owned());

    let row = store.row_by(names::FRAME_SECTION_GENERAL, "SectionName", name)?;
    if ShapeKind::of_row(row)? == Some(ShapeKind::Nonprismatic) {
        nonprismatic_model(store, name, library, builder, diagnostics, visited)
    } else {
        let model = prismatic_model(store, row, library, builder)?;
        Ok(library.insert(name, model, 1).clone())
    }
}

fn prismatic_model(
    store: &TableStore,
    row: &Row,
    library: &SectionLibrary,
    builder: &mut dyn ModelBuilder,
) -> Result<SectionModel> {
    let properties = GeometricProperties::of_row(row)?;
    let (e1, g12) = material_moduli(store, row.text("Material")?)?;
    let tag = library.next_tag();
    builder.define_section(ELASTIC_FRAME, tag, &property_pairs(&properties, e1, g12));
    Ok(SectionModel::uniform(tag))
}

fn nonprismatic_model(
    store: &TableStore,
    name: &str,
    library: &mut SectionLibrary,
    builder: &mut dyn ModelBuilder,
    diagnostics: &mut Diagnostics,
    visited: &mut Vec<String>,
) -> Result<SectionModel> {
    let segments: Vec<Row> = store
        .find_rows(names::FRAME_SECTION_NONPRISMATIC, |r| {
            r.is("SectionName", name)
        })
        .cloned()
        .collect();
    let segment = segments.first().ok_or(TableError::RowNotFound {
        table: names::FRAME_SECTION_NONPRISMATIC,
        column: "SectionName",
        key: name.to_owned(),
    })?;
    let start_name = segment.text("StartSect")?;

    if segments.len() > 1 {
        diagnostics.log(
            "NonprismaticSection.Segments",
            format!("{name}: {} segments, treated as constant", segments.len()),
        );
        let model = frame_model_inner(store, start_name, library, builder, diagnostics, visited)?;
        return Ok(library.insert(name, model, 0).clone());
    }

    if start_name == segment.text("EndSect")? {
        let model = frame_model_inner(store, start_name, library, builder, diagnostics, visited)?;
        return Ok(library.insert(name, model, 0).clone());
    }

    tapered_model(store, name, segment, library, builder)
}

/// Single-segment taper: one freshly tagged elastic definition per
/// quadrature point, with geometric properties interpolated per the
/// segment's variation laws and material taken from the start section
/// only.
fn tapered_model(
    store: &TableStore,
    name: &str,
    segment: &Row,
    library: &mut SectionLibrary,
    builder: &mut dyn ModelBuilder,
) -> Result<SectionModel> {
    let start_row = store.row_by(
        names::FRAME_SECTION_GENERAL,
        "SectionName",
        segment.text("StartSect")?,
    )?;
    let end_row = store.row_by(
        names::FRAME_SECTION_GENERAL,
        "SectionName",
        segment.text("EndSect")?,
    )?;
    let start = GeometricProperties::of_row(start_row)?;
    let end = GeometricProperties::of_row(end_row)?;
    let laws = VariationLaws::of_row(segment)?;
    let (e1, g12) = material_moduli(store, start_row.text("Material")?)?;

    let mut tag = library.next_tag();
    let mut integration = Vec::with_capacity(5);
    for (xi, weight) in unit_interval_rule() {
        let properties = interpolate_properties(&start, &end, laws, xi);
        builder.define_section(ELASTIC_FRAME, tag, &property_pairs(&properties, e1, g12));
        integration.push(QuadraturePoint { tag, xi, weight });
        tag += 1;
    }

    let model = SectionModel { integration };
    let fresh = model.tag_count();
    Ok(library.insert(name, model, fresh).clone())
}

fn material_moduli(store: &TableStore, material: &str) -> Result<(f64, f64)> {
    store.row_by(names::MATERIAL_GENERAL, "Material", material)?;
    let mechanical = store.row_by(names::MATERIAL_MECHANICAL, "Material", material)?;
    Ok((mechanical.number("E1")?, mechanical.number("G12")?))
}

fn property_pairs(
    properties: &GeometricProperties,
    e1: f64,
    g12: f64,
) -> [(&'static str, f64); 8] {
    [
        ("Area", properties.area),
        ("AS2", properties.shear_area),
        ("AS3", properties.shear_area),
        ("I33", properties.i33),
        ("I22", properties.i22),
        ("TorsConst", properties.torsion),
        ("E1", e1),
        ("G12", g12),
    ]
}
