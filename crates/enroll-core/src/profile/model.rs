//! Profile domain model.
//!
//! `ProfileRecord` is the validated, in-memory representation of a
//! submitted profile. `StoredProfile` is the server's persisted view of
//! the same data, including the server-assigned id and resolved image URL.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cities the registration form accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum City {
    Jalna,
    Sambhajinagar,
    Pune,
    Mumbai,
    Delhi,
    Ambad,
}

impl City {
    /// All selectable cities, in form order.
    pub const ALL: [City; 6] = [
        City::Jalna,
        City::Sambhajinagar,
        City::Pune,
        City::Mumbai,
        City::Delhi,
        City::Ambad,
    ];

    /// The wire/display name of this city.
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Jalna => "Jalna",
            City::Sambhajinagar => "Sambhajinagar",
            City::Pune => "Pune",
            City::Mumbai => "Mumbai",
            City::Delhi => "Delhi",
            City::Ambad => "Ambad",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for City {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|city| city.as_str() == s)
            .ok_or_else(|| format!("unknown city: '{s}'"))
    }
}

/// Gender options offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(format!("unknown gender: '{other}'")),
        }
    }
}

/// Languages selectable on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    JavaScript,
    #[serde(rename = "HTML")]
    Html,
    React,
    Redux,
    #[serde(rename = "Node.js")]
    NodeJs,
}

impl Language {
    /// All selectable languages, in form order.
    pub const ALL: [Language; 5] = [
        Language::JavaScript,
        Language::Html,
        Language::React,
        Language::Redux,
        Language::NodeJs,
    ];

    /// The wire/display name of this language.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::Html => "HTML",
            Language::React => "React",
            Language::Redux => "Redux",
            Language::NodeJs => "Node.js",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|language| language.as_str() == s)
            .ok_or_else(|| format!("unknown language: '{s}'"))
    }
}

/// A fully validated profile, constructed transiently per submission
/// attempt by [`super::ProfileDraft::validate`].
///
/// Holding a value of this type means every field rule passed; the
/// submission payload builder trusts it without re-checking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub address: String,
    pub city: City,
    /// At least one entry; duplicates are not filtered.
    pub languages: Vec<Language>,
    pub gender: Gender,
    pub date: NaiveDate,
    /// Always true on a validated record.
    pub terms_accepted: bool,
}

/// A profile as persisted by the server, read-only on this side.
///
/// Unknown response fields are ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProfile {
    /// Server-assigned identifier, required for update and delete.
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub address: String,
    pub city: City,
    pub gender: Gender,
    /// ISO datetime text as returned by the server; kept verbatim.
    pub date: String,
    #[serde(default)]
    pub terms: bool,
    #[serde(rename = "language", default)]
    pub languages: Vec<Language>,
    /// Resolved image URL, if an image was uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_round_trip() {
        for city in City::ALL {
            assert_eq!(city.as_str().parse::<City>(), Ok(city));
        }
        assert!("Nagpur".parse::<City>().is_err());
    }

    #[test]
    fn test_language_wire_names() {
        assert_eq!("Node.js".parse::<Language>(), Ok(Language::NodeJs));
        assert_eq!("HTML".parse::<Language>(), Ok(Language::Html));
        assert!("node.js".parse::<Language>().is_err());
    }

    #[test]
    fn test_stored_profile_ignores_unknown_fields() {
        let json = r#"{
            "_id": "abc123",
            "name": "Asha",
            "email": "asha@example.com",
            "mobile": "9876543210",
            "address": "14 Lake Road",
            "city": "Pune",
            "gender": "Female",
            "date": "2024-01-01T00:00:00.000Z",
            "terms": true,
            "language": ["React", "Node.js"],
            "profile": "https://cdn.example.com/asha.png",
            "__v": 0,
            "createdAt": "2024-01-02T10:00:00.000Z"
        }"#;

        let profile: StoredProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, "abc123");
        assert_eq!(profile.city, City::Pune);
        assert_eq!(profile.languages, vec![Language::React, Language::NodeJs]);
        assert_eq!(
            profile.profile.as_deref(),
            Some("https://cdn.example.com/asha.png")
        );
    }

    #[test]
    fn test_stored_profile_image_is_optional() {
        let json = r#"{
            "_id": "abc124",
            "name": "Ravi",
            "email": "ravi@example.com",
            "mobile": "9876543211",
            "address": "2 Hill Street",
            "city": "Jalna",
            "gender": "Male",
            "date": "2024-03-05T00:00:00.000Z"
        }"#;

        let profile: StoredProfile = serde_json::from_str(json).unwrap();
        assert!(profile.profile.is_none());
        assert!(profile.languages.is_empty());
        assert!(!profile.terms);
    }
}
