use crate::error::{Result, SheetError};
use crate::source::SheetReader;
use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use phonesift_core::RawRow;
use std::path::Path;

const PHONE_COLUMN: u32 = 0;
const CITY_COLUMN: u32 = 1;
const DATE_COLUMN: u32 = 2;
const REQUIRED_COLUMNS: usize = 3;

/// Reads a named sheet from xlsx, xlsm, xlsb, xls and ods workbooks.
#[derive(Debug, Clone)]
pub struct WorkbookReader {
    sheet: String,
}

impl WorkbookReader {
    pub fn new(sheet: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
        }
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }
}

impl SheetReader for WorkbookReader {
    fn read_rows(&self, path: &Path) -> Result<Vec<RawRow>> {
        let mut workbook = open_workbook_auto(path).map_err(|source| SheetError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        if !workbook.sheet_names().iter().any(|name| name == &self.sheet) {
            return Err(SheetError::MissingSheet {
                path: path.to_path_buf(),
                sheet: self.sheet.clone(),
            });
        }

        let range = workbook
            .worksheet_range(&self.sheet)
            .map_err(|source| SheetError::Read {
                path: path.to_path_buf(),
                sheet: self.sheet.clone(),
                source,
            })?;

        rows_from_range(&range).ok_or_else(|| SheetError::MissingColumns {
            path: path.to_path_buf(),
            sheet: self.sheet.clone(),
            found: range.end().map_or(0, |(_, col)| col as usize + 1),
        })
    }
}

/// Collects rows by absolute cell position so the columns stay anchored at
/// `A`, `B` and `C` even when the used range starts further right or down.
/// Returns `None` when a non-empty sheet does not reach column `C`.
fn rows_from_range(range: &Range<Data>) -> Option<Vec<RawRow>> {
    let (Some((first_row, _)), Some((last_row, last_col))) = (range.start(), range.end()) else {
        return Some(Vec::new());
    };

    if (last_col as usize) + 1 < REQUIRED_COLUMNS {
        return None;
    }

    let cell = |row: u32, col: u32| range.get_value((row, col)).map(cell_text).unwrap_or_default();

    let rows = (first_row..=last_row)
        .map(|row| RawRow {
            phone: cell(row, PHONE_COLUMN),
            city: cell(row, CITY_COLUMN),
            date: cell(row, DATE_COLUMN),
        })
        .collect();
    Some(rows)
}

/// Renders a cell the way it reads in a spreadsheet: whole numbers without a
/// fraction and dates as `D/M/YYYY`.
pub(crate) fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => value.clone(),
        Data::Float(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
            format!("{}", *value as i64)
        }
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_date() {
            Some(date) => date.format("%-d/%-m/%Y").to_string(),
            None => cell.to_string(),
        },
        other => other.to_string(),
    }
}
