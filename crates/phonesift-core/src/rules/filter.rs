use crate::domain::phone::{normalize_phone, CanonicalPhone};
use crate::domain::row::RawRow;
use crate::rules::dates::extract_order_year;
use std::ops::RangeInclusive;

/// Accepts rows ordered in one city within an inclusive range of years.
///
/// Rejected rows produce `None` and nothing else: most rows of a sheet
/// belong to other cities or years, so a miss is the normal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    city: String,
    years: RangeInclusive<i32>,
}

impl RowFilter {
    pub fn new(city: impl Into<String>, year_from: i32, year_to: i32) -> Self {
        Self {
            city: city.into(),
            years: year_from..=year_to,
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn years(&self) -> &RangeInclusive<i32> {
        &self.years
    }

    pub fn evaluate(&self, row: &RawRow) -> Option<CanonicalPhone> {
        self.evaluate_parts(&row.city, &row.date, &row.phone)
    }

    pub fn evaluate_parts(&self, city: &str, date: &str, phone: &str) -> Option<CanonicalPhone> {
        if city != self.city {
            return None;
        }

        let year = extract_order_year(date).ok()?;
        if !self.years.contains(&year) {
            return None;
        }

        normalize_phone(phone).ok()
    }
}
