use crate::Result;
use phonesift_core::RawRow;
use std::path::Path;

/// Reads the phone, city and date columns of one tabular source.
///
/// Every returned row carries all three fields, so the columns always have
/// the same length.
pub trait SheetReader: Send + Sync {
    fn read_rows(&self, path: &Path) -> Result<Vec<RawRow>>;
}
