use crate::konto::api::HttpApi;
use crate::konto::flow::LoginFlow;
use crate::konto::storage;
use crate::konto::term::TerminalUi;
use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub api_url: String,
    pub state_dir: PathBuf,
}

/// Execute the login action, prompting again until the server accepts the
/// credentials.
/// # Errors
/// Returns an error if a request cannot complete, a terminal prompt fails, or
/// the access token cannot be persisted.
pub async fn execute(args: Args) -> Result<()> {
    debug!(api_url = %args.api_url, state_dir = %args.state_dir.display(), "starting login");

    let api = HttpApi::new(&args.api_url)?;
    let session = storage::session_store(&args.state_dir);
    let tokens = storage::token_store(&args.state_dir);
    let mut flow = LoginFlow::new(api, TerminalUi::new(), session, tokens);

    println!("== Login ==");
    flow.init()?;

    loop {
        let email = flow.ui_mut().prompt_email()?;
        let password = flow.ui_mut().prompt_password(false)?;
        let totp_token = flow.ui_mut().prompt_totp_token()?;

        if flow.submit_login(&email, &password, &totp_token).await? {
            println!("Login successful! Welcome to Konto.");
            return Ok(());
        }
    }
}
