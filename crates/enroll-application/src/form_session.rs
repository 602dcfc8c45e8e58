//! Form session: field state, edit sessions, and submission.
//!
//! A [`FormSession`] is the application-side binder between raw field
//! input and the transport. It owns the draft, the current field error
//! map, the optional image attachment, and the edit target, and it
//! enforces the single-submission gate inside [`FormSession::submit`]
//! itself rather than leaving it to the caller's UI state.

use enroll_core::error::{EnrollError, Result};
use enroll_core::payload::{FileAttachment, SubmissionPayload};
use enroll_core::profile::{ProfileDraft, StoredProfile, ValidationErrors};
use enroll_core::transport::ProfileTransport;

/// What a successful submission did.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(StoredProfile),
    Updated(StoredProfile),
}

/// One registration/edit form instance.
///
/// At most one submission is in flight per session; a second `submit`
/// while one is outstanding is rejected before validation. Validation
/// failure stores the field-keyed error map and performs no transport
/// call; transport failure preserves all field state for retry.
#[derive(Default)]
pub struct FormSession {
    draft: ProfileDraft,
    attachment: Option<FileAttachment>,
    errors: ValidationErrors,
    edit_target: Option<String>,
    submitting: bool,
}

impl FormSession {
    /// Creates an empty registration session.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current raw field state.
    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    /// Mutable access to the raw field state, for field binding.
    pub fn draft_mut(&mut self) -> &mut ProfileDraft {
        &mut self.draft
    }

    /// Replaces the whole draft at once.
    pub fn set_draft(&mut self, draft: ProfileDraft) {
        self.draft = draft;
    }

    /// Field-keyed errors from the last failed validation; empty after a
    /// successful one.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Chooses an image to upload with the next submission.
    pub fn attach_image(&mut self, attachment: FileAttachment) {
        self.attachment = Some(attachment);
    }

    /// Drops the chosen image. On update this means "leave the stored
    /// image unchanged", not "remove it".
    pub fn clear_image(&mut self) {
        self.attachment = None;
    }

    /// Whether a submission is currently in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// The id this session will update, if it is an edit session.
    pub fn edit_target(&self) -> Option<&str> {
        self.edit_target.as_deref()
    }

    /// Opens an edit session pre-populated from a stored profile.
    ///
    /// Terms are left unaccepted and any previously chosen image is
    /// dropped; the stored image stays untouched unless a new one is
    /// attached.
    pub fn begin_edit(&mut self, profile: &StoredProfile) {
        self.draft = ProfileDraft::from_stored(profile);
        self.attachment = None;
        self.errors.clear();
        self.edit_target = Some(profile.id.clone());
    }

    /// Closes the session (cancel or success), clearing all field,
    /// attachment, error, and edit state.
    pub fn close(&mut self) {
        self.draft = ProfileDraft::default();
        self.attachment = None;
        self.errors.clear();
        self.edit_target = None;
    }

    /// Validates the draft and, on success, sends it through the
    /// transport: update when an edit target is set, register otherwise.
    ///
    /// A successful update closes the edit session. Any failure leaves
    /// the field state as it was so the user can correct and resubmit.
    pub async fn submit<T: ProfileTransport>(&mut self, transport: &T) -> Result<SubmitOutcome> {
        if self.submitting {
            return Err(EnrollError::SubmissionInProgress);
        }

        let record = match self.draft.validate() {
            Ok(record) => {
                self.errors.clear();
                record
            }
            Err(errors) => {
                tracing::warn!(fields = errors.len(), "submission blocked by validation");
                self.errors = errors.clone();
                return Err(EnrollError::Validation(errors));
            }
        };

        let payload = SubmissionPayload::from_record(&record, self.attachment.as_ref());

        self.submitting = true;
        let result = match self.edit_target.clone() {
            Some(id) => transport
                .update_profile(&id, payload)
                .await
                .map(SubmitOutcome::Updated),
            None => transport
                .register_profile(payload)
                .await
                .map(SubmitOutcome::Created),
        };
        self.submitting = false;

        match result {
            Ok(outcome) => {
                if matches!(outcome, SubmitOutcome::Updated(_)) {
                    self.close();
                }
                Ok(outcome)
            }
            Err(err) => {
                tracing::warn!(error = %err, "submission failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use enroll_core::profile::{City, Gender, Language};
    use std::sync::Mutex;

    /// Transport stub that records calls and answers from a script.
    #[derive(Default)]
    struct StubTransport {
        calls: Mutex<Vec<String>>,
        fail_mutations: bool,
    }

    impl StubTransport {
        fn failing() -> Self {
            Self {
                fail_mutations: true,
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        fn stored(id: &str) -> StoredProfile {
            StoredProfile {
                id: id.to_string(),
                name: "Al".to_string(),
                email: "a@b.com".to_string(),
                mobile: "1234567890".to_string(),
                address: "12 St".to_string(),
                city: City::Pune,
                gender: Gender::Male,
                date: "2024-01-01T00:00:00.000Z".to_string(),
                terms: true,
                languages: vec![Language::React],
                profile: None,
            }
        }
    }

    #[async_trait]
    impl ProfileTransport for StubTransport {
        async fn fetch_profiles(&self) -> Result<Vec<StoredProfile>> {
            self.record("fetch");
            Ok(vec![Self::stored("id-1")])
        }

        async fn register_profile(&self, payload: SubmissionPayload) -> Result<StoredProfile> {
            self.record(format!("register:{}", payload.file_part_count()));
            if self.fail_mutations {
                return Err(EnrollError::transport(Some(500), "boom"));
            }
            Ok(Self::stored("id-new"))
        }

        async fn update_profile(
            &self,
            id: &str,
            _payload: SubmissionPayload,
        ) -> Result<StoredProfile> {
            self.record(format!("update:{id}"));
            if self.fail_mutations {
                return Err(EnrollError::transport(Some(500), "boom"));
            }
            Ok(Self::stored(id))
        }

        async fn delete_profile(&self, id: &str) -> Result<String> {
            self.record(format!("delete:{id}"));
            Ok("deleted".to_string())
        }
    }

    fn valid_draft() -> ProfileDraft {
        ProfileDraft {
            name: "Al".to_string(),
            email: "a@b.com".to_string(),
            mobile: "1234567890".to_string(),
            address: "12 St".to_string(),
            city: "Pune".to_string(),
            gender: "Male".to_string(),
            date: "2024-01-01".to_string(),
            languages: vec!["React".to_string()],
            terms: true,
        }
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_transport() {
        let transport = StubTransport::default();
        let mut session = FormSession::new();
        session.set_draft(ProfileDraft {
            terms: false,
            ..valid_draft()
        });

        let err = session.submit(&transport).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            session.errors().get("terms"),
            Some("You must accept the terms")
        );
        assert!(transport.calls().is_empty());

        // Field state is preserved for correction.
        assert_eq!(session.draft().name, "Al");
    }

    #[tokio::test]
    async fn test_submit_without_edit_target_registers() {
        let transport = StubTransport::default();
        let mut session = FormSession::new();
        session.set_draft(valid_draft());

        let outcome = session.submit(&transport).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Created(_)));
        assert_eq!(transport.calls(), vec!["register:0"]);

        // The registration form does not reset itself on success.
        assert_eq!(session.draft().name, "Al");
        assert!(session.errors().is_empty());
    }

    #[tokio::test]
    async fn test_attachment_travels_with_the_payload() {
        let transport = StubTransport::default();
        let mut session = FormSession::new();
        session.set_draft(valid_draft());
        session.attach_image(FileAttachment::new("me.png", "image/png", vec![1, 2, 3]));

        session.submit(&transport).await.unwrap();
        assert_eq!(transport.calls(), vec!["register:1"]);
    }

    #[tokio::test]
    async fn test_edit_session_updates_and_closes_on_success() {
        let transport = StubTransport::default();
        let mut session = FormSession::new();
        session.begin_edit(&StubTransport::stored("id-7"));

        assert_eq!(session.edit_target(), Some("id-7"));
        assert_eq!(session.draft().name, "Al");
        // Terms must be re-accepted when editing.
        assert!(!session.draft().terms);

        session.draft_mut().terms = true;
        let outcome = session.submit(&transport).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Updated(_)));
        assert_eq!(transport.calls(), vec!["update:id-7"]);

        // A successful update closes the edit session.
        assert_eq!(session.edit_target(), None);
        assert_eq!(session.draft().name, "");
    }

    #[tokio::test]
    async fn test_failed_update_preserves_session() {
        let transport = StubTransport::failing();
        let mut session = FormSession::new();
        session.begin_edit(&StubTransport::stored("id-7"));
        session.draft_mut().terms = true;

        let err = session.submit(&transport).await.unwrap_err();
        assert!(err.is_transport());

        // Everything stays in place for a retry.
        assert_eq!(session.edit_target(), Some("id-7"));
        assert_eq!(session.draft().name, "Al");
        assert!(!session.is_submitting());
    }

    #[tokio::test]
    async fn test_close_clears_everything() {
        let mut session = FormSession::new();
        session.begin_edit(&StubTransport::stored("id-7"));
        session.attach_image(FileAttachment::new("me.png", "image/png", vec![1]));

        session.close();
        assert_eq!(session.edit_target(), None);
        assert_eq!(session.draft(), &ProfileDraft::default());
        assert!(session.errors().is_empty());
    }

    #[tokio::test]
    async fn test_submit_gate_rejects_reentrant_submission() {
        let transport = StubTransport::default();
        let mut session = FormSession::new();
        session.set_draft(valid_draft());
        session.submitting = true;

        let err = session.submit(&transport).await.unwrap_err();
        assert!(matches!(err, EnrollError::SubmissionInProgress));
        assert!(transport.calls().is_empty());

        session.submitting = false;
        assert!(session.submit(&transport).await.is_ok());
    }
}
