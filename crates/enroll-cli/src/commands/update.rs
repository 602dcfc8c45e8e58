use anyhow::{Result, bail};
use enroll_application::{FormSession, SubmitOutcome};
use enroll_client::ProfileApiClient;
use enroll_core::EnrollError;
use enroll_core::transport::ProfileTransport;

use super::fields::ProfileFieldArgs;
use super::utils;

pub async fn run(client: &ProfileApiClient, id: &str, fields: ProfileFieldArgs) -> Result<()> {
    // Open the edit session from the stored profile, like the edit modal
    // does, then overlay the provided flags.
    let profiles = client.fetch_profiles().await?;
    let Some(stored) = profiles.iter().find(|profile| profile.id == id) else {
        bail!("no stored profile with id '{id}'");
    };

    let mut session = FormSession::new();
    session.begin_edit(stored);
    fields.apply_to(session.draft_mut());
    if let Some(path) = &fields.image {
        session.attach_image(utils::load_attachment(path)?);
    }

    match session.submit(client).await {
        Ok(SubmitOutcome::Updated(profile) | SubmitOutcome::Created(profile)) => {
            println!("✅ Profile updated (id: {})", profile.id);
            Ok(())
        }
        Err(EnrollError::Validation(errors)) => {
            utils::print_field_errors(&errors);
            bail!("profile not updated");
        }
        Err(err) => Err(err.into()),
    }
}
