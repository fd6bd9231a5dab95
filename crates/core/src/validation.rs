//! Field-level validation helpers shared by the campaign, donation and
//! site profile models.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Validation messages keyed by the camelCase name of the offending field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(|v| v.as_slice())
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn as_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.0
    }

    /// `Ok(())` when nothing was recorded, otherwise a validation error
    /// carrying every message.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into())
        }
    }

    pub fn require_text(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, format!("{} is required", field));
        }
    }

    pub fn require_max_len(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(
                field,
                format!("{} may not be longer than {} characters", field, max),
            );
        }
    }

    pub fn require_non_negative(&mut self, field: &str, value: Decimal) {
        if value < Decimal::ZERO {
            self.add(field, format!("{} must be zero or greater", field));
        }
    }

    pub fn require_at_most(&mut self, field: &str, value: Decimal, max: Decimal) {
        if value > max {
            self.add(field, format!("{} may not be greater than {}", field, max));
        }
    }

    pub fn require_positive(&mut self, field: &str, value: Option<Decimal>) {
        match value {
            None => self.add(field, format!("{} is required", field)),
            Some(v) if v <= Decimal::ZERO => {
                self.add(field, format!("{} must be greater than zero", field))
            }
            Some(_) => {}
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .values()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}
