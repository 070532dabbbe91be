// src/dataset.rs

//! Assembly of extracted rows into one CSV-shaped table.
//!
//! Pages of the same flavor do not always agree on their columns, so rows
//! are stored by column name and the header list is the union of every
//! name seen, in first-seen order. Cells a row never had are written empty.

use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::DatasetError;
use crate::extract::{Extraction, Flavor};

pub type Record = IndexMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn add_column(&mut self, name: &str) {
        if !self.headers.iter().any(|h| h == name) {
            self.headers.push(name.to_string());
        }
    }

    pub fn push_record(&mut self, record: Record) {
        for name in record.keys() {
            self.add_column(name);
        }
        self.records.push(record);
    }

    /// Add positional rows. Each row is matched against `headers` followed
    /// by `derived`; surplus cells on either side are dropped.
    pub fn push_rows(&mut self, headers: &[String], derived: &[&str], rows: &[Vec<String>]) {
        let names: Vec<&str> = headers
            .iter()
            .map(String::as_str)
            .chain(derived.iter().copied())
            .collect();
        for name in &names {
            self.add_column(name);
        }
        for row in rows {
            let record = names
                .iter()
                .zip(row)
                .map(|(name, cell)| (name.to_string(), cell.clone()))
                .collect();
            self.records.push(record);
        }
    }

    pub fn push_extraction(&mut self, extraction: &Extraction, flavor: Flavor) {
        self.push_rows(
            &extraction.headers,
            flavor.derived_columns(),
            &extraction.rows,
        );
    }

    /// Distinct values of `column`, or `None` when there is no such column.
    pub fn column_values(&self, column: &str) -> Option<BTreeSet<String>> {
        if !self.headers.iter().any(|h| h == column) {
            return None;
        }
        Some(
            self.records
                .iter()
                .filter_map(|r| r.get(column).cloned())
                .collect(),
        )
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), DatasetError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.headers)?;
        for record in &self.records {
            wtr.write_record(
                self.headers
                    .iter()
                    .map(|h| record.get(h).map(String::as_str).unwrap_or("")),
            )?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn read_csv<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut records = Vec::new();
        for row in rdr.records() {
            let row = row?;
            records.push(
                headers
                    .iter()
                    .cloned()
                    .zip(row.iter().map(str::to_string))
                    .collect(),
            );
        }
        Ok(Self { headers, records })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        self.write_csv(File::create(path)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        Self::read_csv(File::open(path)?)
    }
}
