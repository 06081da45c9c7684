use crate::konto::api::{AuthApi, HttpApi};
use anyhow::Result;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub api_url: String,
    pub email: String,
}

/// Execute the inbox action, listing messages captured by the development
/// email endpoint.
/// # Errors
/// Returns an error if the request cannot complete.
pub async fn execute(args: Args) -> Result<()> {
    debug!(api_url = %args.api_url, email = %args.email, "fetching inbox");

    let api = HttpApi::new(&args.api_url)?;
    let messages = api.dev_emails(&args.email).await?;

    if messages.is_empty() {
        println!("No messages for {}", args.email);
        return Ok(());
    }

    for message in &messages {
        println!("{} {}", message.timestamp, message.subject);
        if let Some(code) = &message.verification_code {
            println!("  verification code: {code}");
        }
        if let Some(secret) = &message.totp_secret {
            println!("  totp secret: {secret}");
        }
    }

    Ok(())
}
