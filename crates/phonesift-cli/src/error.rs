use anyhow::Error;
use phonesift_config::ConfigError;
use phonesift_scan::ScanError;
use phonesift_sheet::{SheetError, SheetErrorKind};
use std::io::ErrorKind;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(CliError::InvalidInput(_)) = cause.downcast_ref::<CliError>() {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
        if let Some(scan_err) = cause.downcast_ref::<ScanError>() {
            return ExitCode::from(scan_exit_code(scan_err));
        }
        if let Some(sheet_err) = cause.downcast_ref::<SheetError>() {
            return ExitCode::from(sheet_exit_code(sheet_err));
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return ExitCode::from(config_exit_code(config_err));
        }
    }
    ExitCode::from(EXIT_FAILURE)
}

fn scan_exit_code(err: &ScanError) -> u8 {
    match err {
        ScanError::ReadDir { source, .. } if source.kind() == ErrorKind::NotFound => {
            EXIT_NOT_FOUND
        }
        ScanError::ReadDir { .. } | ScanError::Join(_) => EXIT_FAILURE,
        ScanError::Sheet(sheet_err) => sheet_exit_code(sheet_err),
    }
}

fn sheet_exit_code(err: &SheetError) -> u8 {
    match err.kind() {
        SheetErrorKind::Open
        | SheetErrorKind::MissingSheet
        | SheetErrorKind::Read
        | SheetErrorKind::MissingColumns => EXIT_INVALID_INPUT,
        SheetErrorKind::Write => EXIT_FAILURE,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::MissingConfigFile(_) => EXIT_NOT_FOUND,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::InvalidSourcePath(_)
        | ConfigError::InvalidOutputPath(_)
        | ConfigError::EmptyCity
        | ConfigError::EmptySheet
        | ConfigError::InvalidYearRange { .. }
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}
