//! Reading labelled digit rows and turning them into network samples.
//!
//! Each row of a sample file is `label,p0,p1,...` with pixel intensities in
//! `[0, 255]`.

use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{info, warn};

use crate::matrix::Matrix1;
use crate::prelude::*;

/// Pixels in a 28x28 digit image
pub const PIXELS: usize = 28 * 28;
/// Digits 0 through 9
pub const CLASSES: usize = 10;

const TARGET_ON: f64 = 0.99;
const TARGET_OFF: f64 = 0.01;

/// A label and its raw pixel intensities, as read from one row.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRow {
    pub label: usize,
    pub pixels: Vec<f64>,
}

/// A normalized input with its one-hot target.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub label: usize,
    pub input: Matrix1<f64>,
    pub target: Matrix1<f64>,
}

impl Sample {
    /// Fails if the row doesn't hold exactly `pixels` intensities or its
    /// label has no slot among `classes` outputs.
    pub fn from_row(row: &LabeledRow, pixels: usize, classes: usize) -> Result<Self> {
        if row.pixels.len() != pixels {
            return Err(Error::DimensionErr);
        }
        Ok(Self {
            label: row.label,
            input: normalize_pixels(&row.pixels),
            target: one_hot_target(row.label, classes)?,
        })
    }
}

/// Reads every row of a sample file.
///
/// A file that can't be opened is reported and treated as holding no rows.
pub fn read_rows<P: AsRef<Path>>(path: P) -> Vec<LabeledRow> {
    let path = path.as_ref();
    match File::open(path) {
        Ok(file) => {
            let rows = rows_from_reader(file);
            info!(path = %path.display(), rows = rows.len(), "read sample file");
            rows
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot open sample file, using no samples");
            Vec::new()
        }
    }
}

/// Parses header-less rows from any reader. Rows that don't parse are skipped.
pub fn rows_from_reader<R: Read>(reader: R) -> Vec<LabeledRow> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (record_no, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(record = record_no, error = %e, "skipping unreadable row");
                continue;
            }
        };
        match parse_record(&record) {
            Some(row) => rows.push(row),
            None => warn!(record = record_no, "skipping malformed row"),
        }
    }
    rows
}

fn parse_record(record: &StringRecord) -> Option<LabeledRow> {
    let mut fields = record.iter();
    let label = fields.next()?.parse().ok()?;
    let pixels = fields
        .map(|field| field.parse().ok())
        .collect::<Option<Vec<f64>>>()?;
    Some(LabeledRow { label, pixels })
}

/// Reads a sample file and builds samples of `pixels` inputs and `classes` outputs.
pub fn load_samples<P: AsRef<Path>>(path: P, pixels: usize, classes: usize) -> Vec<Sample> {
    samples_from_rows(&read_rows(path), pixels, classes)
}

/// Rows of the wrong width, or whose label has no output slot, are skipped.
pub fn samples_from_rows(rows: &[LabeledRow], pixels: usize, classes: usize) -> Vec<Sample> {
    rows.iter()
        .filter_map(|row| match Sample::from_row(row, pixels, classes) {
            Ok(sample) => Some(sample),
            Err(e) => {
                warn!(label = row.label, width = row.pixels.len(), error = %e, "skipping row");
                None
            }
        })
        .collect()
}

/// Maps intensities in `[0, 255]` onto `[0.01, 1.0]`
pub fn normalize_pixels(raw: &[f64]) -> Matrix1<f64> {
    Matrix1::from_vec(raw.iter().map(|&x| (x / 255.0) * 0.99 + 0.01).collect())
}

pub fn one_hot_target(label: usize, classes: usize) -> Result<Matrix1<f64>> {
    if label >= classes {
        return Err(Error::LabelErr { label, classes });
    }
    let mut target = Matrix1::filled(classes, TARGET_OFF);
    target[label] = TARGET_ON;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rows() {
        let rows = rows_from_reader("5,0,255,128\n3,1,2,3\n".as_bytes());

        assert_eq!(
            rows,
            vec![
                LabeledRow {
                    label: 5,
                    pixels: vec![0.0, 255.0, 128.0]
                },
                LabeledRow {
                    label: 3,
                    pixels: vec![1.0, 2.0, 3.0]
                },
            ]
        );
    }

    #[test]
    fn skip_malformed_rows() {
        let rows = rows_from_reader("7,0,0\nx,1,1\n2,1,oops\n1,4,4\n".as_bytes());

        let labels: Vec<_> = rows.iter().map(|row| row.label).collect();
        assert_eq!(labels, [7, 1]);
    }

    #[test]
    fn missing_file_is_empty() {
        let rows = read_rows("this/file/does/not/exist.csv");
        assert!(rows.is_empty());
        assert!(load_samples("this/file/does/not/exist.csv", PIXELS, CLASSES).is_empty());
    }

    #[test]
    fn normalize_range() {
        let input = normalize_pixels(&[0.0, 255.0]);
        assert_eq!(input[0], 0.01);
        assert!((input[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn one_hot() {
        let target = one_hot_target(2, 4).unwrap();
        assert_eq!(target, Matrix1::from_array([0.01, 0.01, 0.99, 0.01]));

        assert_eq!(
            one_hot_target(10, CLASSES),
            Err(Error::LabelErr {
                label: 10,
                classes: 10
            })
        );
    }

    #[test]
    fn sample_from_row() {
        let row = LabeledRow {
            label: 1,
            pixels: vec![0.0, 255.0, 0.0],
        };
        let sample = Sample::from_row(&row, 3, 3).unwrap();

        assert_eq!(sample.label, 1);
        assert_eq!(sample.input.size(), 3);
        assert_eq!(sample.target, Matrix1::from_array([0.01, 0.99, 0.01]));

        let bad = LabeledRow {
            label: 3,
            pixels: vec![0.0],
        };
        assert!(Sample::from_row(&bad, 1, 3).is_err());
        assert_eq!(Sample::from_row(&row, 2, 3), Err(Error::DimensionErr));
    }

    #[test]
    fn skip_ragged_rows() {
        let rows = rows_from_reader("0,10,20\n1,30\n1,40,50\n0,1,2,3\n".as_bytes());
        assert_eq!(rows.len(), 4);

        let samples = samples_from_rows(&rows, 2, 2);

        let inputs: Vec<_> = samples.iter().map(|s| s.input.size()).collect();
        assert_eq!(inputs, [2, 2]);
        let labels: Vec<_> = samples.iter().map(|s| s.label).collect();
        assert_eq!(labels, [0, 1]);
    }
}
