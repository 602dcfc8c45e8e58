use clap::Args;
use enroll_core::profile::ProfileDraft;
use std::path::PathBuf;

/// Profile form fields, shared by `register` and `update`.
///
/// Everything is optional at the flag level; the validator reports
/// missing or malformed fields the same way the form does, one message
/// per field.
#[derive(Debug, Args)]
pub struct ProfileFieldArgs {
    /// Full name (at least 2 characters)
    #[arg(long)]
    pub name: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Mobile number (exactly 10 characters)
    #[arg(long)]
    pub mobile: Option<String>,

    /// Street address
    #[arg(long)]
    pub address: Option<String>,

    /// One of: Jalna, Sambhajinagar, Pune, Mumbai, Delhi, Ambad
    #[arg(long)]
    pub city: Option<String>,

    /// Male or Female
    #[arg(long)]
    pub gender: Option<String>,

    /// Date of birth: YYYY-MM-DD, ISO datetime, or epoch milliseconds
    #[arg(long)]
    pub date: Option<String>,

    /// Selected language; repeat the flag for more than one
    #[arg(long = "language")]
    pub languages: Vec<String>,

    /// Accept the terms and conditions (required on every submission)
    #[arg(long)]
    pub accept_terms: bool,

    /// Path to a profile image to upload
    #[arg(long)]
    pub image: Option<PathBuf>,
}

impl ProfileFieldArgs {
    /// Builds a fresh draft from the flags alone (register path).
    pub fn to_draft(&self) -> ProfileDraft {
        let mut draft = ProfileDraft::default();
        self.apply_to(&mut draft);
        draft
    }

    /// Overlays the provided flags onto an existing draft (update path);
    /// omitted flags keep the draft's current value. Terms are never
    /// carried over.
    pub fn apply_to(&self, draft: &mut ProfileDraft) {
        if let Some(name) = &self.name {
            draft.name = name.clone();
        }
        if let Some(email) = &self.email {
            draft.email = email.clone();
        }
        if let Some(mobile) = &self.mobile {
            draft.mobile = mobile.clone();
        }
        if let Some(address) = &self.address {
            draft.address = address.clone();
        }
        if let Some(city) = &self.city {
            draft.city = city.clone();
        }
        if let Some(gender) = &self.gender {
            draft.gender = gender.clone();
        }
        if let Some(date) = &self.date {
            draft.date = date.clone();
        }
        if !self.languages.is_empty() {
            draft.languages = self.languages.clone();
        }
        draft.terms = self.accept_terms;
    }
}
