// rubberband-compare/src/compare/testrun.rs

use super::errors::TestRunLoadError;
use humantime::format_duration;
use log::{debug, info};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

/// A named test run: one row of raw metric values per instance, under
/// labeled columns.
///
/// Values stay raw strings here. Parsing and classification happen per
/// cell when a comparison is rendered, so `timeout`, `MemLimit` and other
/// solver statuses travel through untouched.
#[derive(Clone, Debug)]
pub struct TestRun {
    name: String,
    columns: Vec<String>,
    instances: Vec<String>,
    rows: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

impl TestRun {
    /// Load a run from a results CSV export. The first header cell names
    /// the instance column, the remaining cells are metric column labels.
    /// The run takes its name from the file stem.
    pub fn from_csv_path(path: &PathBuf) -> Result<Self, TestRunLoadError> {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "testrun".to_string());
        let file = File::open(path)?;
        Self::from_csv(name, file)
    }

    pub fn from_csv<R: Read>(name: String, reader: R) -> Result<Self, TestRunLoadError> {
        info!("Loading test run '{}'", name);
        let now = Instant::now();

        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = rdr.headers()?.clone();
        if headers.len() < 2 {
            return Err(TestRunLoadError::MissingColumns);
        }
        let columns: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

        let mut instances = Vec::new();
        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut index = HashMap::new();
        for record in rdr.records() {
            let record = record?;
            let instance = record.get(0).unwrap_or("").trim().to_string();
            if instance.is_empty() {
                debug!(
                    "Skipping record without an instance name at line {}",
                    record.position().map(|p| p.line()).unwrap_or(0)
                );
                continue;
            }
            if index.contains_key(&instance) {
                return Err(TestRunLoadError::DuplicateInstance(instance));
            }
            let mut values: Vec<String> = record.iter().skip(1).map(str::to_string).collect();
            // Ragged exports: pad short rows, drop extra fields
            values.resize(columns.len(), String::new());
            index.insert(instance.clone(), rows.len());
            instances.push(instance);
            rows.push(values);
        }
        if instances.is_empty() {
            return Err(TestRunLoadError::EmptyTable(name));
        }

        debug!(
            "Loaded test run '{}': {} instances, {} columns in {}",
            name,
            instances.len(),
            columns.len(),
            format_duration(now.elapsed())
        );

        Ok(Self {
            name,
            columns,
            instances,
            rows,
            index,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Metric column labels, instance column excluded.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Instance names in file order.
    pub fn instances(&self) -> &[String] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn contains(&self, instance: &str) -> bool {
        self.index.contains_key(instance)
    }

    pub fn column_position(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == label)
    }

    /// Raw value for an instance and metric column index.
    pub fn value(&self, instance: &str, column: usize) -> Option<&str> {
        let row = *self.index.get(instance)?;
        self.rows.get(row)?.get(column).map(String::as_str)
    }
}
