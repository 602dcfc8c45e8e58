use anyhow::Result;
use enroll_client::ProfileApiClient;
use enroll_core::transport::ProfileTransport;

pub async fn run(client: &ProfileApiClient) -> Result<()> {
    let profiles = client.fetch_profiles().await?;

    if profiles.is_empty() {
        println!("No profiles registered yet.");
        return Ok(());
    }

    println!(
        "{:<26} {:<18} {:<26} {:<12} {:<8} {}",
        "ID", "NAME", "EMAIL", "MOBILE", "GENDER", "LANGUAGES"
    );
    for profile in &profiles {
        let languages = profile
            .languages
            .iter()
            .map(|language| language.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{:<26} {:<18} {:<26} {:<12} {:<8} {}",
            profile.id,
            profile.name,
            profile.email,
            profile.mobile,
            profile.gender.as_str(),
            languages
        );
        println!(
            "{:<26} {}, {} | {}{}",
            "",
            profile.address,
            profile.city.as_str(),
            profile.date,
            profile
                .profile
                .as_deref()
                .map(|url| format!(" | {url}"))
                .unwrap_or_default()
        );
    }
    println!("\n{} profile(s)", profiles.len());

    Ok(())
}
