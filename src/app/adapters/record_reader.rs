//! CSV input of decoded observation records
//!
//! Each row is one decoded value:
//!
//! ```text
//! subset,descriptor,value,missing,time_significance,layer
//! 03772,013011,2.3,false,-10800,0
//! ```
//!
//! `missing`, `time_significance` and `layer` may be omitted or left empty. An
//! empty `value` is read as a missing value. Consecutive rows with the same
//! `subset` form one record sequence.

use crate::app::models::{DescriptorCode, ObservationRecord, Subset};
use crate::{Error, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// One CSV row as written by the upstream decoder dump
#[derive(Debug, Deserialize)]
struct RecordRow {
    subset: String,
    descriptor: String,
    #[serde(default)]
    value: Option<f64>,
    #[serde(default)]
    missing: Option<String>,
    #[serde(default)]
    time_significance: Option<i32>,
    #[serde(default)]
    layer: Option<u32>,
}

impl RecordRow {
    fn into_record(self, source: &str, row: usize) -> Result<(String, ObservationRecord)> {
        let code: DescriptorCode = self
            .descriptor
            .parse()
            .map_err(|e| Error::csv_parsing(source, format!("row {}: {}", row, e), None))?;

        let flagged = match self.missing.as_deref() {
            None | Some("") => false,
            Some(text) => parse_flag(text).ok_or_else(|| {
                Error::csv_parsing(
                    source,
                    format!("row {}: invalid missing flag '{}'", row, text),
                    None,
                )
            })?,
        };

        let record = match self.value {
            Some(value) if !flagged => ObservationRecord::new(code, value),
            _ => ObservationRecord::missing(code),
        }
        .with_time_significance(self.time_significance.unwrap_or(0))
        .with_layer(self.layer.unwrap_or(0));

        Ok((self.subset, record))
    }
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Read record sequences from a CSV file
pub fn read_subsets_from_path(path: &Path) -> Result<Vec<Subset>> {
    let file = File::open(path)
        .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;
    read_subsets(file, &path.display().to_string())
}

/// Read record sequences from any CSV source
///
/// `source` names the input in error messages.
pub fn read_subsets<R: Read>(reader: R, source: &str) -> Result<Vec<Subset>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut subsets: Vec<Subset> = Vec::new();
    let mut rows = 0usize;

    for (index, result) in csv_reader.deserialize::<RecordRow>().enumerate() {
        // Header is line 1
        let row = index + 2;
        let parsed = result
            .map_err(|e| Error::csv_parsing(source, format!("row {}: {}", row, e), Some(e)))?;
        let (id, record) = parsed.into_record(source, row)?;
        rows += 1;

        match subsets.last_mut() {
            Some(current) if current.id == id => current.push(record),
            _ => {
                if subsets.iter().any(|s| s.id == id) {
                    debug!("Subset {} appears again at row {}, starting a new report", id, row);
                }
                let mut subset = Subset::new(id);
                subset.push(record);
                subsets.push(subset);
            }
        }
    }

    info!(
        "Read {} records in {} subsets from {}",
        rows,
        subsets.len(),
        source
    );
    Ok(subsets)
}
