pub mod domain;
pub mod error;
pub mod rules;

pub use domain::*;
pub use error::CoreError;
pub use rules::*;
