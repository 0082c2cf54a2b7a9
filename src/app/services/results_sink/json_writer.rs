//! JSON persistence of collected field visits
//!
//! Each converted input file produces one `<stem>.fieldvisit.json` document in
//! the output directory.

use super::collector::FieldVisitRecord;
use crate::constants::OUTPUT_FILE_SUFFIX;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Persisted form of the field visits converted from one input file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldVisitDocument {
    pub source_file: String,
    pub field_visits: Vec<FieldVisitRecord>,
}

/// Writes field visit documents to an output directory
#[derive(Debug, Clone)]
pub struct JsonResultsWriter {
    output_dir: PathBuf,
    overwrite: bool,
    dry_run: bool,
}

impl JsonResultsWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            overwrite: false,
            dry_run: false,
        }
    }

    /// Replace existing documents instead of failing
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Serialize but skip writing to disk
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Output path for the document converted from `input`
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.output_dir
            .join(format!("{}.{}", stem, OUTPUT_FILE_SUFFIX))
    }

    /// Write the records converted from `input`
    ///
    /// Returns the written path, or `None` in dry-run mode. Without
    /// overwrite the document is created exclusively, so two writers
    /// targeting the same path cannot both succeed.
    pub fn write(&self, input: &Path, records: Vec<FieldVisitRecord>) -> Result<Option<PathBuf>> {
        let output_path = self.output_path_for(input);

        let document = FieldVisitDocument {
            source_file: input.display().to_string(),
            field_visits: records,
        };
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| Error::json("Failed to serialize field visit document", e))?;

        if self.dry_run {
            if output_path.exists() && !self.overwrite {
                return Err(already_exists(&output_path));
            }
            debug!(
                "Dry run: skipping {} ({} bytes)",
                output_path.display(),
                json.len()
            );
            return Ok(None);
        }

        fs::create_dir_all(&self.output_dir).map_err(|e| {
            Error::io(
                format!(
                    "Failed to create output directory {}",
                    self.output_dir.display()
                ),
                e,
            )
        })?;

        let mut options = OpenOptions::new();
        options.write(true);
        if self.overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let mut file = options.open(&output_path).map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                already_exists(&output_path)
            } else {
                Error::io(format!("Failed to create {}", output_path.display()), e)
            }
        })?;
        file.write_all(json.as_bytes()).map_err(|e| {
            Error::io(format!("Failed to write {}", output_path.display()), e)
        })?;

        info!("Wrote {}", output_path.display());
        Ok(Some(output_path))
    }
}

fn already_exists(output_path: &Path) -> Error {
    Error::sink(format!(
        "output file {} already exists (use --overwrite to replace it)",
        output_path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_path_uses_input_stem() {
        let writer = JsonResultsWriter::new("/tmp/out");
        assert_eq!(
            writer.output_path_for(Path::new("/data/20240501_clinton.json")),
            PathBuf::from("/tmp/out/20240501_clinton.fieldvisit.json")
        );
    }

    #[test]
    fn test_write_creates_directory_and_document() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("nested").join("out");
        let writer = JsonResultsWriter::new(&output_dir);

        let written = writer
            .write(Path::new("survey.json"), Vec::new())
            .unwrap()
            .unwrap();

        assert!(written.exists());
        let document: FieldVisitDocument =
            serde_json::from_str(&fs::read_to_string(&written).unwrap()).unwrap();
        assert_eq!(document.source_file, "survey.json");
        assert!(document.field_visits.is_empty());
    }

    #[test]
    fn test_existing_output_requires_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let writer = JsonResultsWriter::new(temp_dir.path());
        writer.write(Path::new("survey.json"), Vec::new()).unwrap();

        let second = writer.write(Path::new("survey.json"), Vec::new());
        assert!(matches!(second, Err(Error::Sink { .. })));

        let replacing = writer.clone().with_overwrite(true);
        assert!(replacing.write(Path::new("survey.json"), Vec::new()).is_ok());
    }

    #[test]
    fn test_concurrent_writers_never_share_a_document() {
        let temp_dir = TempDir::new().unwrap();
        let writer = JsonResultsWriter::new(temp_dir.path());

        let handles: Vec<_> = ["a/survey.json", "b/survey.json"]
            .into_iter()
            .map(|input| {
                let writer = writer.clone();
                std::thread::spawn(move || writer.write(Path::new(input), Vec::new()).is_ok())
            })
            .collect();
        let written: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(written.iter().filter(|ok| **ok).count(), 1);
    }

    #[test]
    fn test_overwrite_replaces_longer_document() {
        let temp_dir = TempDir::new().unwrap();
        let writer = JsonResultsWriter::new(temp_dir.path()).with_overwrite(true);
        let output_path = writer.output_path_for(Path::new("survey.json"));
        fs::write(&output_path, " ".repeat(4096)).unwrap();

        writer.write(Path::new("survey.json"), Vec::new()).unwrap();

        let document: FieldVisitDocument =
            serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
        assert!(document.field_visits.is_empty());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let writer = JsonResultsWriter::new(temp_dir.path().join("out")).with_dry_run(true);

        let written = writer.write(Path::new("survey.json"), Vec::new()).unwrap();

        assert!(written.is_none());
        assert!(!temp_dir.path().join("out").exists());
    }
}
