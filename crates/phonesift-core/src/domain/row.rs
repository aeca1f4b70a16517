/// One row read positionally from a source sheet: phone, city, order date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub phone: String,
    pub city: String,
    pub date: String,
}

impl RawRow {
    pub fn new(phone: impl Into<String>, city: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            city: city.into(),
            date: date.into(),
        }
    }
}
