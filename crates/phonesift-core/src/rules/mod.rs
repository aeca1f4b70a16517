pub mod dates;
pub mod dedup;
pub mod filter;

pub use dates::extract_order_year;
pub use dedup::dedup_preserving_order;
pub use filter::RowFilter;
