use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("failed to open workbook {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("sheet {sheet:?} not found in {path}")]
    MissingSheet { path: PathBuf, sheet: String },
    #[error("failed to read sheet {sheet:?} in {path}: {source}")]
    Read {
        path: PathBuf,
        sheet: String,
        #[source]
        source: calamine::Error,
    },
    #[error("sheet {sheet:?} in {path} has {found} columns, expected phone, city and date")]
    MissingColumns {
        path: PathBuf,
        sheet: String,
        found: usize,
    },
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, SheetError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetErrorKind {
    Open,
    MissingSheet,
    Read,
    MissingColumns,
    Write,
}

impl SheetError {
    pub fn kind(&self) -> SheetErrorKind {
        match self {
            SheetError::Open { .. } => SheetErrorKind::Open,
            SheetError::MissingSheet { .. } => SheetErrorKind::MissingSheet,
            SheetError::Read { .. } => SheetErrorKind::Read,
            SheetError::MissingColumns { .. } => SheetErrorKind::MissingColumns,
            SheetError::CreateDir { .. } | SheetError::Write { .. } => SheetErrorKind::Write,
        }
    }
}
