use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::error::Result;
use crate::section::{SectionModel, Tag};

/// Registry of built sections for one conversion run.
///
/// Maps section name to its built model and owns the tag counter shared by
/// every section kind in the run. The registry is append-only: an entry is
/// never removed or rebuilt, and the counter only advances, by the number
/// of fresh tags a build consumed. Tags are therefore unique across the
/// whole run.
#[derive(Debug, Default)]
pub struct SectionLibrary {
    models: HashMap<String, SectionModel>,
    next_tag: Tag,
}

impl SectionLibrary {
    /// Creates a new, empty registry with the tag counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The tag the next fresh section definition will receive.
    #[must_use]
    pub fn next_tag(&self) -> Tag {
        self.next_tag
    }

    /// Returns the cached model for a name, if one was registered.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SectionModel> {
        self.models.get(name)
    }

    /// Registers a built model under `name`, advancing the tag counter by
    /// `fresh_tags`. If the name is already registered the existing model
    /// is kept unchanged and the counter does not move.
    pub fn insert(&mut self, name: &str, model: SectionModel, fresh_tags: u64) -> &SectionModel {
        match self.models.entry(name.to_owned()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.next_tag += fresh_tags;
                entry.insert(model)
            }
        }
    }

    /// Returns the cached model for `name`, building and registering it if
    /// absent.
    ///
    /// `build` receives the first fresh tag it may use and returns the
    /// model together with the number of tags it actually consumed.
    ///
    /// # Errors
    ///
    /// Propagates any error from `build`; a failed build registers nothing
    /// and leaves the counter unchanged.
    pub fn get_or_build<F>(&mut self, name: &str, build: F) -> Result<&SectionModel>
    where
        F: FnOnce(Tag) -> Result<(SectionModel, u64)>,
    {
        match self.models.entry(name.to_owned()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let (model, fresh_tags) = build(self.next_tag)?;
                self.next_tag += fresh_tags;
                Ok(entry.insert(model))
            }
        }
    }
}
