use crate::error::CoreError;

/// Returns the year of a `D/M/YYYY` order date.
///
/// Only the segment count and the year are checked; day and month are
/// taken as-is and the year is not range checked here.
pub fn extract_order_year(value: &str) -> Result<i32, CoreError> {
    if value.is_empty() {
        return Err(CoreError::EmptyDate);
    }

    let parts: Vec<&str> = value.split('/').collect();
    let [_, _, year] = parts.as_slice() else {
        return Err(CoreError::MalformedDate(value.to_string()));
    };

    year.parse::<i32>()
        .map_err(|_| CoreError::InvalidYear((*year).to_string()))
}
