//! CSV file reading and writing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::*;
use survey_model::Dataset;

use crate::convert::{dataset_from_frame, frame_from_dataset};
use crate::error::{IngestError, Result};

/// Rows used for schema inference.
const INFER_SCHEMA_ROWS: usize = 100;

/// Column count above which a dataset is reported as unusually wide.
const WIDE_DATASET_COLUMNS: usize = 500;

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Rejects empty files and UTF-16 byte order marks.
///
/// A UTF-8 BOM is accepted; the CSV reader strips it.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    if bytes_read >= 2 {
        let encoding = match buffer[0..2] {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }

    Ok(())
}

/// Reads a CSV export with a single header row into a DataFrame.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    validate_encoding(path)?;

    let parse_error = |e: PolarsError| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)?;

    if df.width() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    if df.width() > WIDE_DATASET_COLUMNS {
        tracing::warn!(
            path = %path.display(),
            columns = df.width(),
            "Dataset has more than {WIDE_DATASET_COLUMNS} columns"
        );
    }

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "Loaded CSV"
    );
    Ok(df)
}

/// Reads a CSV export straight into a [`Dataset`].
pub fn read_csv_dataset(path: &Path) -> Result<Dataset> {
    let df = read_csv_frame(path)?;
    dataset_from_frame(&df)
}

/// Writes a dataset as CSV with a header row.
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let mut df = frame_from_dataset(dataset)?;
    let mut file = File::create(path).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(&mut df)?;

    tracing::debug!(
        path = %path.display(),
        rows = dataset.row_count(),
        columns = dataset.width(),
        "Wrote CSV"
    );
    Ok(())
}
