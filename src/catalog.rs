//! In-memory upload catalog.
//!
//! Records are keyed by filename and kept in insertion order. `add` never
//! overwrites: a second record under a known name is dropped. Callers that
//! want to supersede a record must ask for it explicitly with `replace`.

use crate::classifier::Category;
use crate::models::UploadRecord;
use std::collections::HashMap;
use tracing::debug;

/// Result of offering a record to the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Duplicate,
}

/// Append-only store of processed files for one session
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    records: Vec<UploadRecord>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.index.contains_key(filename)
    }

    /// Insert a record unless its filename is already catalogued
    pub fn add(&mut self, record: UploadRecord) -> AddOutcome {
        if self.contains(&record.filename) {
            debug!("Ignoring duplicate upload: {}", record.filename);
            return AddOutcome::Duplicate;
        }

        self.index.insert(record.filename.clone(), self.records.len());
        self.records.push(record);
        AddOutcome::Added
    }

    /// Insert or overwrite a record, keeping its original position.
    ///
    /// Returns the record that was superseded, if any.
    pub fn replace(&mut self, record: UploadRecord) -> Option<UploadRecord> {
        match self.index.get(&record.filename) {
            Some(&position) => {
                debug!("Replacing catalogued file: {}", record.filename);
                Some(std::mem::replace(&mut self.records[position], record))
            }
            None => {
                self.add(record);
                None
            }
        }
    }

    pub fn get(&self, filename: &str) -> Option<&UploadRecord> {
        self.index.get(filename).map(|&position| &self.records[position])
    }

    /// All records in insertion order
    pub fn all(&self) -> &[UploadRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &UploadRecord> {
        self.records.iter()
    }

    /// Records filed under one category, in insertion order
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &UploadRecord> {
        self.records.iter().filter(move |r| r.category == category)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a UploadRecord;
    type IntoIter = std::slice::Iter<'a, UploadRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawFile, Submitter};
    use chrono::NaiveDate;
    use polars::prelude::*;

    fn record(name: &str, author: &str) -> UploadRecord {
        let raw = RawFile::new(name, Vec::new());
        let table = DataFrame::new(vec![Column::new("a".into(), [1i64, 2])]).unwrap();
        UploadRecord::new(
            &raw,
            table,
            crate::classifier::classify(name),
            Submitter::new(Some(author.to_string()), None),
            NaiveDate::from_ymd_opt(2025, 5, 15).unwrap(),
        )
    }

    #[test]
    fn test_add_keeps_first_record() {
        let mut catalog = Catalog::new();
        assert_eq!(catalog.add(record("x.csv", "A")), AddOutcome::Added);
        assert_eq!(catalog.add(record("x.csv", "B")), AddOutcome::Duplicate);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("x.csv").unwrap().author.as_deref(), Some("A"));
    }

    #[test]
    fn test_insertion_order() {
        let mut catalog = Catalog::new();
        for name in ["c.csv", "a.csv", "b.csv"] {
            catalog.add(record(name, "A"));
        }

        let names: Vec<&str> = catalog.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, vec!["c.csv", "a.csv", "b.csv"]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut catalog = Catalog::new();
        catalog.add(record("a.csv", "A"));
        catalog.add(record("b.csv", "A"));

        let previous = catalog.replace(record("a.csv", "B")).unwrap();
        assert_eq!(previous.author.as_deref(), Some("A"));
        assert_eq!(catalog.all()[0].author.as_deref(), Some("B"));
        assert_eq!(catalog.len(), 2);

        assert!(catalog.replace(record("c.csv", "C")).is_none());
        assert_eq!(catalog.all()[2].filename, "c.csv");
    }

    #[test]
    fn test_by_category() {
        let mut catalog = Catalog::new();
        catalog.add(record("impacto_2024.csv", "A"));
        catalog.add(record("ambiental_q1.csv", "A"));
        catalog.add(record("impacto_2025.csv", "A"));

        let social: Vec<&str> = catalog
            .by_category(Category::SocialImpact)
            .map(|r| r.filename.as_str())
            .collect();
        assert_eq!(social, vec!["impacto_2024.csv", "impacto_2025.csv"]);
        assert_eq!(catalog.by_category(Category::Other).count(), 0);
    }

    #[test]
    fn test_empty_tables_are_accepted() {
        let mut catalog = Catalog::new();
        let raw = RawFile::new("vacio.json", b"[]".to_vec());
        let empty = UploadRecord::new(
            &raw,
            DataFrame::empty(),
            Category::Other,
            Submitter::anonymous(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        );
        assert_eq!(catalog.add(empty), AddOutcome::Added);
        assert_eq!(catalog.get("vacio.json").unwrap().variable_count(), 0);
    }
}
