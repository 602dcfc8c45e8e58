use anyhow::Result;
use enroll_client::ProfileApiClient;
use enroll_core::transport::ProfileTransport;

pub async fn run(client: &ProfileApiClient, id: &str) -> Result<()> {
    let message = client.delete_profile(id).await?;
    println!("✅ {message}");
    Ok(())
}
