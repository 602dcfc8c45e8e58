use anyhow::{Result, bail};
use enroll_application::{FormSession, SubmitOutcome};
use enroll_client::ProfileApiClient;
use enroll_core::EnrollError;

use super::fields::ProfileFieldArgs;
use super::utils;

pub async fn run(client: &ProfileApiClient, fields: ProfileFieldArgs) -> Result<()> {
    let mut session = FormSession::new();
    session.set_draft(fields.to_draft());
    if let Some(path) = &fields.image {
        session.attach_image(utils::load_attachment(path)?);
    }

    match session.submit(client).await {
        Ok(SubmitOutcome::Created(profile) | SubmitOutcome::Updated(profile)) => {
            println!("✅ Profile registered (id: {})", profile.id);
            if let Some(url) = &profile.profile {
                println!("   Image: {url}");
            }
            Ok(())
        }
        Err(EnrollError::Validation(errors)) => {
            utils::print_field_errors(&errors);
            bail!("profile not submitted");
        }
        Err(err) => Err(err.into()),
    }
}
