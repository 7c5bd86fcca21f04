pub mod frame;
pub mod interpolate;
pub mod library;
pub mod shell;

/// Integer identifier of one section definition in the downstream model.
pub type Tag = u64;

/// One sample of a member's integration scheme: the tag of the section
/// definition emitted at natural coordinate `xi` with the given weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraturePoint {
    pub tag: Tag,
    pub xi: f64,
    pub weight: f64,
}

/// A built section: the ordered integration scheme that was emitted to the
/// model builder for it.
///
/// A uniform section carries a single point at `xi = 0` with weight 1; a
/// tapered section carries one point per quadrature abscissa.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionModel {
    pub integration: Vec<QuadraturePoint>,
}

impl SectionModel {
    /// A single-definition model for a section that is constant along the
    /// member.
    #[must_use]
    pub fn uniform(tag: Tag) -> Self {
        Self {
            integration: vec![QuadraturePoint {
                tag,
                xi: 0.0,
                weight: 1.0,
            }],
        }
    }

    /// Number of section definitions this model owns.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn tag_count(&self) -> u64 {
        self.integration.len() as u64
    }
}

/// Sink for section definitions, implemented by the downstream structural
/// model builder.
pub trait ModelBuilder {
    /// Registers one section definition of the given kind under `tag`.
    fn define_section(&mut self, kind: &str, tag: Tag, properties: &[(&'static str, f64)]);
}

/// A [`ModelBuilder`] that records every definition it receives. Used in
/// tests and wherever the emitted definitions need to be inspected rather
/// than forwarded.
#[derive(Debug, Default)]
pub struct RecordingBuilder {
    pub definitions: Vec<SectionDefinition>,
}

/// One recorded `define_section` call.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionDefinition {
    pub kind: String,
    pub tag: Tag,
    pub properties: Vec<(&'static str, f64)>,
}

impl ModelBuilder for RecordingBuilder {
    fn define_section(&mut self, kind: &str, tag: Tag, properties: &[(&'static str, f64)]) {
        self.definitions.push(SectionDefinition {
            kind: kind.to_owned(),
            tag,
            properties: properties.to_vec(),
        });
    }
}
