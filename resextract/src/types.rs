//! Core data model: parsed entries, per-locale bundles and the run aggregate.

use std::collections::{BTreeMap, btree_map};

use indexmap::IndexMap;
use serde::Serialize;

/// One `<string>` element as read from a source file, before filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawEntry {
    /// Value of the `name` attribute, empty when absent.
    pub name: String,
    /// Concatenated character data of the element.
    pub value: String,
}

impl RawEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The extracted, renamed entries of a single locale directory.
///
/// Entries keep the order in which they were first seen in the source file.
/// Inserting an output name a second time replaces the value in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleBundle {
    locale: String,
    entries: IndexMap<String, String>,
}

impl LocaleBundle {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            entries: IndexMap::new(),
        }
    }

    /// Name of the locale directory, e.g. `values-es`.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Inserts an entry, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(output name, value)` pairs in bundle order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Everything extracted during one run, keyed by locale directory name.
///
/// Empty bundles are never stored, so every locale present here produces
/// exactly one output file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    bundles: BTreeMap<String, LocaleBundle>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a bundle, replacing any previous bundle of the same locale.
    ///
    /// Returns `false` (and stores nothing) if the bundle is empty.
    pub fn insert(&mut self, bundle: LocaleBundle) -> bool {
        if bundle.is_empty() {
            return false;
        }
        self.bundles.insert(bundle.locale.clone(), bundle);
        true
    }

    pub fn get(&self, locale: &str) -> Option<&LocaleBundle> {
        self.bundles.get(locale)
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// Locale names in ascending order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.bundles.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocaleBundle> {
        self.bundles.values()
    }
}

impl IntoIterator for ExtractionResult {
    type Item = LocaleBundle;
    type IntoIter = btree_map::IntoValues<String, LocaleBundle>;

    fn into_iter(self) -> Self::IntoIter {
        self.bundles.into_values()
    }
}
