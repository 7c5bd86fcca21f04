use crate::error::Result;
use crate::section::library::SectionLibrary;
use crate::section::{ModelBuilder, SectionModel};
use crate::table::{names, TableStore};

/// Kind string of an elastic shell section definition.
pub const MEMBRANE_PLATE: &str = "ElasticMembranePlateSection";

/// Poisson's ratio implied by a material's elastic and shear moduli,
/// `nu = E / (2G) - 1`.
#[must_use]
pub fn material_poisson_ratio(e1: f64, g12: f64) -> f64 {
    e1 / (2.0 * g12) - 1.0
}

/// Builds (or fetches from the registry) the membrane-plate model of the
/// named area section, emitting its definition to the model builder.
///
/// # Errors
///
/// Returns an error if the area section, its material, or any required
/// property column is missing.
pub fn shell_model(
    store: &TableStore,
    name: &str,
    library: &mut SectionLibrary,
    builder: &mut dyn ModelBuilder,
) -> Result<SectionModel> {
    library
        .get_or_build(name, |tag| {
            let section = store.row_by(names::AREA_SECTION_PROPERTIES, "Section", name)?;
            let material = section.text("Material")?;
            store.row_by(names::MATERIAL_GENERAL, "Material", material)?;
            let mechanical = store.row_by(names::MATERIAL_MECHANICAL, "Material", material)?;

            let e1 = mechanical.number("E1")?;
            let g12 = mechanical.number("G12")?;
            builder.define_section(
                MEMBRANE_PLATE,
                tag,
                &[
                    ("E1", e1),
                    ("Nu", material_poisson_ratio(e1, g12)),
                    ("Thickness", section.number("Thickness")?),
                    ("UnitMass", mechanical.number("UnitMass")?),
                ],
            );
            Ok((SectionModel::uniform(tag), 1))
        })
        .cloned()
}
