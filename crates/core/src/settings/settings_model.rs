//! Site profile settings models.

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::validation::FieldErrors;

/// School information shown on the public pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteProfile {
    pub school_name: String,
    pub tagline: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            school_name: "Alumni Tracer".to_string(),
            tagline: String::new(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            website: String::new(),
        }
    }
}

/// Partial update; only provided fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteProfileUpdate {
    pub school_name: Option<String>,
    pub tagline: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

pub const SCHOOL_NAME_KEY: &str = "school_name";
pub const TAGLINE_KEY: &str = "tagline";
pub const ADDRESS_KEY: &str = "address";
pub const PHONE_KEY: &str = "phone";
pub const EMAIL_KEY: &str = "email";
pub const WEBSITE_KEY: &str = "website";

impl SiteProfile {
    /// Applies a stored key/value pair. Unknown keys are ignored.
    pub fn apply_setting(&mut self, key: &str, value: String) {
        match key {
            SCHOOL_NAME_KEY => self.school_name = value,
            TAGLINE_KEY => self.tagline = value,
            ADDRESS_KEY => self.address = value,
            PHONE_KEY => self.phone = value,
            EMAIL_KEY => self.email = value,
            WEBSITE_KEY => self.website = value,
            _ => {}
        }
    }
}

impl SiteProfileUpdate {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.school_name {
            errors.require_text("schoolName", name);
        }
        if let Some(email) = self.email.as_deref().map(str::trim) {
            if !email.is_empty() && !email.contains('@') {
                errors.add("email", "email must be a valid email address");
            }
        }
        errors.into_result()
    }

    /// Provided fields as `(key, trimmed value)` pairs.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        [
            (SCHOOL_NAME_KEY, &self.school_name),
            (TAGLINE_KEY, &self.tagline),
            (ADDRESS_KEY, &self.address),
            (PHONE_KEY, &self.phone),
            (EMAIL_KEY, &self.email),
            (WEBSITE_KEY, &self.website),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key, v.trim().to_string())))
        .collect()
    }
}
