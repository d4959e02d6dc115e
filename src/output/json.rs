//! JSON report writer.
//!
//! Writes report structs to JSON files with proper formatting.

use crate::utils::error::OutputError;
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a report to a JSON file
///
/// # Arguments
/// * `report` - Any serializable report struct
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report<T: Serialize>(
    report: &T,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    Ok(())
}

/// Validate that output path is writable
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::MetricsReport;
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    fn sample_report() -> MetricsReport {
        let mut metrics = HashMap::new();
        metrics.insert("llm_requests_total".to_string(), 42.0);
        MetricsReport {
            version: "1.0.0".to_string(),
            metrics,
            generated_at: "2026-01-19T13:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_write_and_read_back() {
        let report = sample_report();
        let temp_file = NamedTempFile::new().unwrap();

        write_report(&report, temp_file.path()).unwrap();

        let loaded: MetricsReport =
            serde_json::from_reader(File::open(temp_file.path()).unwrap()).unwrap();
        assert_eq!(loaded.version, report.version);
        assert_eq!(loaded.metrics["llm_requests_total"], 42.0);
    }

    #[test]
    fn test_empty_path_rejected() {
        let result = validate_output_path(Path::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_directory_path_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = validate_output_path(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");

        write_report(&sample_report(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
