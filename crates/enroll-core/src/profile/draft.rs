//! Raw form field state and the validator.
//!
//! A [`ProfileDraft`] mirrors the registration form: every field is held
//! in its raw textual shape until [`ProfileDraft::validate`] turns the
//! whole draft into a typed [`ProfileRecord`] or a field-keyed error map.
//! Validation is all-or-nothing: a record is only produced when every
//! rule passes, and every violated field is reported in one pass.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::model::{City, Gender, Language, ProfileRecord, StoredProfile};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    // Same permissiveness as the usual "something@domain.tld" form check.
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Field-keyed validation error map.
///
/// All violated fields are reported together; iteration order is stable
/// (sorted by field name).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for a field, replacing any earlier one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    /// Returns the message recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Iterates `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Raw registration form state, one field per form control.
///
/// Deserialization ignores unknown keys, so a draft can be built from a
/// superset document without rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub address: String,
    /// Selected city name; empty means no selection yet.
    #[serde(default)]
    pub city: String,
    /// Selected gender name; empty means no selection yet.
    #[serde(default)]
    pub gender: String,
    /// Raw date input (ISO text or epoch milliseconds).
    #[serde(default)]
    pub date: String,
    #[serde(rename = "language", default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub terms: bool,
}

impl ProfileDraft {
    /// Validate every field and convert the draft into a typed record.
    ///
    /// Rules are evaluated independently; the error map carries one
    /// message per violated field and nothing else.
    pub fn validate(&self) -> Result<ProfileRecord, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.name.chars().count() < 2 {
            errors.insert("name", "Name must be at least 2 characters");
        }
        if !EMAIL_RE.is_match(&self.email) {
            errors.insert("email", "Valid email is required");
        }
        if self.mobile.chars().count() != 10 {
            errors.insert("mobile", "Mobile number must be exactly 10 digits");
        }
        if self.address.chars().count() < 2 {
            errors.insert("address", "Address must be at least 2 characters");
        }

        let city = self.city.parse::<City>().ok();
        if city.is_none() {
            errors.insert("city", "Please select a valid city");
        }

        let languages = parse_languages(&self.languages);
        if languages.is_none() {
            errors.insert("language", "Please select at least one language");
        }

        let gender = self.gender.parse::<Gender>().ok();
        if gender.is_none() {
            errors.insert("gender", "Gender is required");
        }

        let date = coerce_date(&self.date);
        if date.is_none() {
            errors.insert("date", "Invalid date format");
        }

        if !self.terms {
            errors.insert("terms", "You must accept the terms");
        }

        match (city, languages, gender, date) {
            (Some(city), Some(languages), Some(gender), Some(date)) if errors.is_empty() => {
                Ok(ProfileRecord {
                    name: self.name.clone(),
                    email: self.email.clone(),
                    mobile: self.mobile.clone(),
                    address: self.address.clone(),
                    city,
                    languages,
                    gender,
                    date,
                    terms_accepted: true,
                })
            }
            _ => Err(errors),
        }
    }

    /// Create a draft from a stored profile (for editing).
    ///
    /// Terms are not carried over: they must be re-accepted on every
    /// submission, as on the original form.
    pub fn from_stored(profile: &StoredProfile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            mobile: profile.mobile.clone(),
            address: profile.address.clone(),
            city: profile.city.as_str().to_string(),
            gender: profile.gender.as_str().to_string(),
            date: profile.date.clone(),
            languages: profile
                .languages
                .iter()
                .map(|language| language.as_str().to_string())
                .collect(),
            terms: false,
        }
    }
}

/// Parses the language selection; `None` when empty or when any entry is
/// not a selectable language. Duplicates are kept as selected.
fn parse_languages(raw: &[String]) -> Option<Vec<Language>> {
    if raw.is_empty() {
        return None;
    }
    raw.iter()
        .map(|entry| entry.parse::<Language>().ok())
        .collect()
}

/// Total date coercion: accepts RFC-3339 datetimes, `YYYY-MM-DDTHH:MM:SS`
/// (with optional fraction), plain `YYYY-MM-DD`, or integer epoch
/// milliseconds. Returns `None` for anything else instead of failing.
pub fn coerce_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(datetime.date_naive());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(datetime.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(millis) = trimmed.parse::<i64>() {
        return DateTime::from_timestamp_millis(millis).map(|datetime| datetime.date_naive());
    }
    None
}
