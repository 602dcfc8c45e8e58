//! Transport seam between the form layer and the remote service.

use async_trait::async_trait;

use crate::error::Result;
use crate::payload::SubmissionPayload;
use crate::profile::StoredProfile;

/// Remote operations a form session drives.
///
/// The contract consumed by callers: after any mutating operation
/// resolves successfully, the next [`fetch_profiles`] read reflects the
/// mutation; a failed mutation leaves previously read data untouched.
///
/// [`fetch_profiles`]: ProfileTransport::fetch_profiles
#[async_trait]
pub trait ProfileTransport: Send + Sync {
    /// Reads all stored profiles.
    async fn fetch_profiles(&self) -> Result<Vec<StoredProfile>>;

    /// Creates a new profile from a submission payload.
    async fn register_profile(&self, payload: SubmissionPayload) -> Result<StoredProfile>;

    /// Replaces the profile with the given server-assigned id.
    async fn update_profile(&self, id: &str, payload: SubmissionPayload) -> Result<StoredProfile>;

    /// Deletes the profile with the given server-assigned id and returns
    /// the server's confirmation message.
    async fn delete_profile(&self, id: &str) -> Result<String>;
}
