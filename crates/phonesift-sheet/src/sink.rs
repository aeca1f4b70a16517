use crate::error::{Result, SheetError};
use csv::WriterBuilder;
use phonesift_core::CanonicalPhone;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the final phone list to an output artifact.
pub trait ResultSink {
    fn write_phones(&self, phones: &[CanonicalPhone]) -> Result<()>;
}

/// Writes one phone per row, without a header.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: csv::Error) -> SheetError {
        SheetError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl ResultSink for CsvSink {
    fn write_phones(&self, phones: &[CanonicalPhone]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| SheetError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .map_err(|err| self.write_error(err))?;
        for phone in phones {
            writer
                .write_record([phone.as_str()])
                .map_err(|err| self.write_error(err))?;
        }
        writer
            .flush()
            .map_err(|err| self.write_error(err.into()))?;
        Ok(())
    }
}
