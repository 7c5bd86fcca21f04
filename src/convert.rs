use std::collections::HashMap;

use crate::geometry::skew::apply_skew;
use crate::geometry::SectionGeometry;
use crate::section::frame::{frame_model, FrameQuadrature};
use crate::section::library::SectionLibrary;
use crate::section::shell::shell_model;
use crate::section::ModelBuilder;
use crate::table::{names, TableStore};

/// One configuration the conversion could not handle and skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unimplemented {
    pub feature: &'static str,
    pub detail: String,
}

/// Collects one record per skipped or unsupported configuration, so a run
/// always completes with a best-effort result plus a reviewable list of
/// what was left out. Every record is mirrored as a `tracing` warning.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Unimplemented>,
}

impl Diagnostics {
    /// Records one skipped configuration.
    pub fn log(&mut self, feature: &'static str, detail: impl Into<String>) {
        let detail = detail.into();
        tracing::warn!(feature, detail = %detail, "unsupported configuration skipped");
        self.entries.push(Unimplemented { feature, detail });
    }

    /// Returns the accumulated records in the order they were logged.
    #[must_use]
    pub fn entries(&self) -> &[Unimplemented] {
        &self.entries
    }
}

/// State of one conversion run: the section registry (with its tag
/// counter) and the diagnostic channel. Create one per table export and
/// discard it when the run completes.
#[derive(Debug, Default)]
pub struct Conversion {
    library: SectionLibrary,
    diagnostics: Diagnostics,
}

impl Conversion {
    /// Creates a fresh conversion run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The section registry of this run.
    #[must_use]
    pub fn library(&self) -> &SectionLibrary {
        &self.library
    }

    /// The diagnostics accumulated so far.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Rebuilds the cross-section sample sequence of every assigned frame,
    /// applies end skew angles, and returns the frame-name → samples map.
    ///
    /// Failures are per section or per frame: a section that cannot be
    /// built is logged and skipped without aborting the rest. Keys are
    /// passed through `elem_maps` when one is supplied.
    #[must_use]
    pub fn collect_geometry(
        &mut self,
        store: &TableStore,
        elem_maps: Option<&HashMap<String, String>>,
    ) -> HashMap<String, Vec<SectionGeometry>> {
        let mut frame_types: HashMap<String, FrameQuadrature> = HashMap::new();
        for row in store.rows(names::FRAME_SECTION_GENERAL) {
            let Some(name) = row.text_opt("SectionName") else {
                continue;
            };
            match FrameQuadrature::from_table(store, row, &mut self.diagnostics) {
                Ok(Some(quadrature)) => {
                    frame_types.insert(name.to_owned(), quadrature);
                }
                Ok(None) => {}
                Err(err) => self
                    .diagnostics
                    .log("FrameSection.Geometry", format!("{name}: {err}")),
            }
        }

        let mut assigns: HashMap<String, Vec<SectionGeometry>> = HashMap::new();
        for row in store.rows(names::FRAME_SECTION_ASSIGNMENTS) {
            if let Some(mat) = row.text_opt("MatProp") {
                if mat != "Default" {
                    self.diagnostics.log("FrameSection.MatProp", mat);
                }
            }
            let (Some(frame), Some(section)) = (row.text_opt("Frame"), row.text_opt("AnalSect"))
            else {
                continue;
            };
            if let Some(quadrature) = frame_types.get(section) {
                assigns.insert(frame.to_owned(), quadrature.sections().to_vec());
            }
        }

        for (frame, samples) in &mut assigns {
            let Some(skew) =
                store.find_row(names::FRAME_END_SKEW_ASSIGNMENTS, |r| r.is("Frame", frame))
            else {
                continue;
            };
            match (skew.number("SkewI"), skew.number("SkewJ")) {
                (Ok(skew_i), Ok(skew_j)) => apply_skew(samples, skew_i, skew_j),
                _ => self.diagnostics.log("FrameSkew.Angles", frame.clone()),
            }
        }

        match elem_maps {
            Some(maps) => assigns
                .into_iter()
                .map(|(name, samples)| (maps.get(&name).cloned().unwrap_or(name), samples))
                .collect(),
            None => assigns,
        }
    }

    /// Builds the stiffness model of every assigned frame section once,
    /// emitting its definitions to `builder`. Failures are logged per
    /// section name and do not abort the pass.
    pub fn create_frame_sections(&mut self, store: &TableStore, builder: &mut dyn ModelBuilder) {
        for row in store.rows(names::FRAME_SECTION_ASSIGNMENTS) {
            let Some(name) = row.text_opt("AnalSect") else {
                continue;
            };
            if self.library.get(name).is_some() {
                continue;
            }
            if let Err(err) = frame_model(
                store,
                name,
                &mut self.library,
                builder,
                &mut self.diagnostics,
            ) {
                self.diagnostics
                    .log("FrameSection.Model", format!("{name}: {err}"));
            }
        }
    }

    /// Builds the membrane-plate model of every assigned area section
    /// once. Failures are logged per section name and do not abort the
    /// pass.
    pub fn create_shell_sections(&mut self, store: &TableStore, builder: &mut dyn ModelBuilder) {
        for row in store.rows(names::AREA_SECTION_ASSIGNMENTS) {
            let Some(name) = row.text_opt("Section") else {
                continue;
            };
            if self.library.get(name).is_some() {
                continue;
            }
            if let Err(err) = shell_model(store, name, &mut self.library, builder) {
                self.diagnostics
                    .log("ShellSection.Model", format!("{name}: {err}"));
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::section::RecordingBuilder;
    use crate::table::{Row, Value};

    fn circle_row(name: &str, t3: f64) -> Row {
        Row::from_iter([
            ("SectionName", Value::from(name)),
            ("Shape", Value::from("Circle")),
            ("Material", Value::from("C30")),
            ("t3", Value::from(t3)),
            ("Area", Value::from(t3 * t3)),
            ("AS2", Value::from(0.9 * t3 * t3)),
            ("I33", Value::from(1.0)),
            ("I22", Value::from(1.0)),
            ("TorsConst", Value::from(1.0)),
        ])
    }

    fn assignment(frame: &str, section: &str, mat: &str) -> Row {
        Row::from_iter([
            ("Frame", Value::from(frame)),
            ("AnalSect", Value::from(section)),
            ("MatProp", Value::from(mat)),
        ])
    }

    fn store() -> TableStore {
        let mut store = TableStore::new();
        store.insert(
            names::FRAME_SECTION_GENERAL,
            vec![circle_row("S1", 10.0), circle_row("S2", 4.0)],
        );
        store.insert(
            names::FRAME_SECTION_ASSIGNMENTS,
            vec![
                assignment("F1", "S1", "Default"),
                assignment("F2", "S2", "Default"),
            ],
        );
        store.insert(
            names::MATERIAL_GENERAL,
            vec![Row::from_iter([("Material", Value::from("C30"))])],
        );
        store.insert(
            names::MATERIAL_MECHANICAL,
            vec![Row::from_iter([
                ("Material", Value::from("C30")),
                ("E1", Value::from(30.0e9)),
                ("G12", Value::from(12.5e9)),
                ("UnitMass", Value::from(2500.0)),
            ])],
        );
        store
    }

    #[test]
    fn collects_one_pair_per_assigned_frame() {
        let store = store();
        let mut conversion = Conversion::new();
        let frames = conversion.collect_geometry(&store, None);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames["F1"].len(), 2);
        assert!(conversion.diagnostics().entries().is_empty());
    }

    #[test]
    fn skew_rotates_only_the_start_ring() {
        let mut store = store();
        store.insert(
            names::FRAME_END_SKEW_ASSIGNMENTS,
            vec![Row::from_iter([
                ("Frame", Value::from("F1")),
                ("SkewI", Value::from(90.0)),
                ("SkewJ", Value::from(0.0)),
            ])],
        );
        let mut conversion = Conversion::new();
        let frames = conversion.collect_geometry(&store, None);

        let unskewed = &frames["F2"];
        let skewed = &frames["F1"];
        // End ring keeps the unrotated circle; start ring has x -> -y.
        for (p, q) in skewed[0].exterior().iter().zip(skewed[1].exterior()) {
            assert!((p.x - (-q.y)).abs() < 1e-9);
            assert!((p.y - q.y).abs() < 1e-12);
        }
        assert_eq!(unskewed[0], unskewed[1]);
    }

    #[test]
    fn non_default_material_overwrite_is_reported() {
        let mut store = store();
        store.insert(
            names::FRAME_SECTION_ASSIGNMENTS,
            vec![assignment("F1", "S1", "Grout")],
        );
        let mut conversion = Conversion::new();
        let frames = conversion.collect_geometry(&store, None);
        assert_eq!(frames.len(), 1);
        let entries = conversion.diagnostics().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].feature, "FrameSection.MatProp");
        assert_eq!(entries[0].detail, "Grout");
    }

    #[test]
    fn element_name_remap_applies_to_keys() {
        let store = store();
        let mut conversion = Conversion::new();
        let maps = HashMap::from([("F1".to_owned(), "beam-1".to_owned())]);
        let frames = conversion.collect_geometry(&store, Some(&maps));
        assert!(frames.contains_key("beam-1"));
        assert!(frames.contains_key("F2"));
        assert!(!frames.contains_key("F1"));
    }

    #[test]
    fn broken_section_does_not_abort_the_run() {
        let mut store = store();
        store.insert(
            names::FRAME_SECTION_GENERAL,
            vec![
                circle_row("S1", 10.0),
                Row::from_iter([
                    ("SectionName", Value::from("S2")),
                    ("Shape", Value::from("Pipe")),
                ]),
            ],
        );
        let mut conversion = Conversion::new();
        let frames = conversion.collect_geometry(&store, None);
        // S2 is unsupported and skipped; F1 still converts.
        assert_eq!(frames.len(), 1);
        assert!(frames.contains_key("F1"));
        assert_eq!(conversion.diagnostics().entries().len(), 1);
    }

    #[test]
    fn frame_and_shell_sections_share_the_tag_counter() {
        let mut store = store();
        store.insert(
            names::AREA_SECTION_PROPERTIES,
            vec![Row::from_iter([
                ("Section", Value::from("Deck")),
                ("Material", Value::from("C30")),
                ("Thickness", Value::from(0.25)),
            ])],
        );
        store.insert(
            names::AREA_SECTION_ASSIGNMENTS,
            vec![Row::from_iter([
                ("Area", Value::from("A1")),
                ("Section", Value::from("Deck")),
            ])],
        );
        let mut conversion = Conversion::new();
        let mut builder = RecordingBuilder::default();
        conversion.create_frame_sections(&store, &mut builder);
        conversion.create_shell_sections(&store, &mut builder);

        // Two frame sections then one shell section, tags 0..3 untangled.
        assert_eq!(builder.definitions.len(), 3);
        let tags: Vec<_> = builder.definitions.iter().map(|d| d.tag).collect();
        assert_eq!(tags, [0, 1, 2]);
        assert_eq!(conversion.library().next_tag(), 3);
        assert!(conversion.diagnostics().entries().is_empty());
    }

    #[test]
    fn missing_shell_section_is_logged_not_fatal() {
        let mut store = store();
        store.insert(
            names::AREA_SECTION_ASSIGNMENTS,
            vec![Row::from_iter([
                ("Area", Value::from("A1")),
                ("Section", Value::from("Ghost")),
            ])],
        );
        let mut conversion = Conversion::new();
        let mut builder = RecordingBuilder::default();
        conversion.create_shell_sections(&store, &mut builder);
        assert!(builder.definitions.is_empty());
        assert_eq!(conversion.diagnostics().entries().len(), 1);
    }
}
