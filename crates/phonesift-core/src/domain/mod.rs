pub mod phone;
pub mod row;

pub use phone::{normalize_phone, CanonicalPhone};
pub use row::RawRow;
