use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PHONE_DIGITS: usize = 11;
const SUBSCRIBER_DIGITS: usize = 10;
const MOBILE_PREFIX: &str = "79";

/// A phone number in the `+7(XXX)XXX-XX-XX` form.
///
/// Only [`normalize_phone`] builds one, so every value carries exactly
/// eleven digits starting with `79`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalPhone(String);

impl CanonicalPhone {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The eleven digits of the number, without formatting.
    pub fn digits(&self) -> String {
        self.0.chars().filter(|ch| ch.is_ascii_digit()).collect()
    }
}

impl fmt::Display for CanonicalPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalPhone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CanonicalPhone {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_phone(s)
    }
}

impl TryFrom<String> for CanonicalPhone {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        normalize_phone(&value)
    }
}

impl From<CanonicalPhone> for String {
    fn from(phone: CanonicalPhone) -> Self {
        phone.0
    }
}

/// Normalizes a raw phone value into a Russian mobile number.
///
/// Separators, spaces and letters are dropped. A bare ten digit subscriber
/// number gets an `8` trunk prefix, and a leading `8` is rewritten to the
/// `7` country code before the prefix check.
pub fn normalize_phone(value: &str) -> Result<CanonicalPhone, CoreError> {
    let mut digits: String = value.chars().filter(|ch| ch.is_ascii_digit()).collect();

    if !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(CoreError::InvalidCharacter);
    }

    if digits.len() == SUBSCRIBER_DIGITS {
        digits.insert(0, '8');
    }

    if digits.len() == PHONE_DIGITS && digits.starts_with('8') {
        digits.replace_range(..1, "7");
    }

    if digits.len() != PHONE_DIGITS {
        return Err(CoreError::InvalidLength(digits.len()));
    }

    if !digits.starts_with(MOBILE_PREFIX) {
        return Err(CoreError::InvalidPrefix(digits[..2].to_string()));
    }

    Ok(CanonicalPhone(format!(
        "+{}({}){}-{}-{}",
        &digits[..1],
        &digits[1..4],
        &digits[4..7],
        &digits[7..9],
        &digits[9..11]
    )))
}
