pub mod error;
pub mod sink;
pub mod source;
pub mod workbook;

pub use error::{Result, SheetError, SheetErrorKind};
pub use sink::{CsvSink, ResultSink};
pub use source::SheetReader;
pub use workbook::WorkbookReader;
