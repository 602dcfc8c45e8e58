//! Multipart submission payload construction.
//!
//! A validated [`ProfileRecord`] plus an optional image attachment is
//! turned into an ordered list of named parts, ready to be handed to a
//! transport implementation as a multipart body. The builder trusts its
//! input: no field rule is re-checked here.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};

use crate::profile::ProfileRecord;

/// Part key for the optional image attachment.
pub const PROFILE_IMAGE_KEY: &str = "profile";

/// Part key used for every selected language. One part is appended per
/// selection (repeated-part convention, applied uniformly to create and
/// update).
pub const LANGUAGE_KEY: &str = "language[]";

/// An image file chosen for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileAttachment {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// The body of a single multipart part.
#[derive(Debug, Clone, PartialEq)]
pub enum PartBody {
    Text(String),
    File(FileAttachment),
}

/// A named part of the submission body.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadPart {
    pub name: String,
    pub body: PartBody,
}

/// Transport-ready submission body: ordered named parts, at most one of
/// which is a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionPayload {
    parts: Vec<PayloadPart>,
}

impl SubmissionPayload {
    /// Builds the payload for a validated record.
    ///
    /// Scalar fields become single text parts; the date is rendered as an
    /// ISO-8601 UTC datetime at midnight; terms as the literal `"true"` /
    /// `"false"`; each language as its own `language[]` part. The file
    /// part is appended only when an attachment is supplied, so omitting
    /// it on update leaves the stored image unchanged.
    pub fn from_record(record: &ProfileRecord, attachment: Option<&FileAttachment>) -> Self {
        let mut payload = Self::default();

        payload.push_text("name", record.name.clone());
        payload.push_text("email", record.email.clone());
        payload.push_text("mobile", record.mobile.clone());
        payload.push_text("address", record.address.clone());
        payload.push_text("city", record.city.as_str());
        payload.push_text("gender", record.gender.as_str());
        payload.push_text("date", iso_datetime(record.date));
        payload.push_text("terms", if record.terms_accepted { "true" } else { "false" });

        for language in &record.languages {
            payload.push_text(LANGUAGE_KEY, language.as_str());
        }

        if let Some(file) = attachment {
            payload.parts.push(PayloadPart {
                name: PROFILE_IMAGE_KEY.to_string(),
                body: PartBody::File(file.clone()),
            });
        }

        payload
    }

    fn push_text(&mut self, name: &str, value: impl Into<String>) {
        self.parts.push(PayloadPart {
            name: name.to_string(),
            body: PartBody::Text(value.into()),
        });
    }

    /// The parts in append order.
    pub fn parts(&self) -> &[PayloadPart] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<PayloadPart> {
        self.parts
    }

    pub fn text_part_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|part| matches!(part.body, PartBody::Text(_)))
            .count()
    }

    pub fn file_part_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|part| matches!(part.body, PartBody::File(_)))
            .count()
    }
}

/// Renders a date the way `Date.toISOString()` does: midnight UTC with
/// millisecond precision, e.g. `2024-01-01T00:00:00.000Z`.
fn iso_datetime(date: NaiveDate) -> String {
    let midnight = date.and_time(NaiveTime::MIN);
    DateTime::<Utc>::from_naive_utc_and_offset(midnight, Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{City, Gender, Language};

    fn sample_record() -> ProfileRecord {
        ProfileRecord {
            name: "Al".to_string(),
            email: "a@b.com".to_string(),
            mobile: "1234567890".to_string(),
            address: "12 St".to_string(),
            city: City::Pune,
            languages: vec![Language::React],
            gender: Gender::Male,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            terms_accepted: true,
        }
    }

    fn text_value<'a>(payload: &'a SubmissionPayload, name: &str) -> Option<&'a str> {
        payload.parts().iter().find_map(|part| match &part.body {
            PartBody::Text(value) if part.name == name => Some(value.as_str()),
            _ => None,
        })
    }

    #[test]
    fn test_single_language_record_has_nine_parts_and_no_file() {
        let payload = SubmissionPayload::from_record(&sample_record(), None);

        assert_eq!(payload.parts().len(), 9);
        assert_eq!(payload.text_part_count(), 9);
        assert_eq!(payload.file_part_count(), 0);
    }

    #[test]
    fn test_attachment_adds_exactly_one_file_part() {
        let image = FileAttachment::new("me.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47]);
        let payload = SubmissionPayload::from_record(&sample_record(), Some(&image));

        assert_eq!(payload.file_part_count(), 1);
        let file_part = payload
            .parts()
            .iter()
            .find(|part| matches!(part.body, PartBody::File(_)))
            .unwrap();
        assert_eq!(file_part.name, PROFILE_IMAGE_KEY);
    }

    #[test]
    fn test_scalar_encodings() {
        let payload = SubmissionPayload::from_record(&sample_record(), None);

        assert_eq!(text_value(&payload, "city"), Some("Pune"));
        assert_eq!(text_value(&payload, "gender"), Some("Male"));
        assert_eq!(text_value(&payload, "terms"), Some("true"));
        assert_eq!(text_value(&payload, "date"), Some("2024-01-01T00:00:00.000Z"));
    }

    #[test]
    fn test_languages_use_repeated_parts() {
        let mut record = sample_record();
        record.languages = vec![Language::React, Language::NodeJs];

        let payload = SubmissionPayload::from_record(&record, None);
        let languages: Vec<&str> = payload
            .parts()
            .iter()
            .filter(|part| part.name == LANGUAGE_KEY)
            .filter_map(|part| match &part.body {
                PartBody::Text(value) => Some(value.as_str()),
                PartBody::File(_) => None,
            })
            .collect();

        assert_eq!(languages, vec!["React", "Node.js"]);
    }

    #[test]
    fn test_part_order_is_stable() {
        let payload = SubmissionPayload::from_record(&sample_record(), None);
        let names: Vec<&str> = payload.parts().iter().map(|part| part.name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "name",
                "email",
                "mobile",
                "address",
                "city",
                "gender",
                "date",
                "terms",
                "language[]",
            ]
        );
    }
}
