use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// Rejects values that are empty once surrounding whitespace is removed.
pub fn require_non_blank(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::BadRequest(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Serde helper that strips surrounding whitespace while deserializing, so
/// field validators see the value that will be stored.
pub fn trimmed<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|value| value.trim().to_string())
}

pub fn trimmed_opt<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
        .map(|value| value.map(|v| v.trim().to_string()))
}
