pub mod aggregate;
pub mod error;
pub mod scanner;

pub use aggregate::{Aggregation, CorpusAggregator};
pub use error::{Result, ScanError};
pub use scanner::{scan_sheet, SheetScan};
