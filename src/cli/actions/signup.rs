use crate::konto::api::HttpApi;
use crate::konto::flow::{OnboardingFlow, Section, Ui};
use crate::konto::storage;
use crate::konto::term::{TerminalUi, VerifyChoice};
use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub api_url: String,
    pub state_dir: PathBuf,
}

/// Execute the signup action, driving the wizard until the user proceeds to
/// login.
/// # Errors
/// Returns an error if a request cannot complete or a terminal prompt fails.
pub async fn execute(args: Args) -> Result<()> {
    debug!(api_url = %args.api_url, state_dir = %args.state_dir.display(), "starting signup");

    let api = HttpApi::new(&args.api_url)?;
    let session = storage::session_store(&args.state_dir);
    let mut flow = OnboardingFlow::new(api, TerminalUi::new(), session);

    flow.ui_mut().show_section(Section::Signup);

    loop {
        match flow.section() {
            Section::Signup => {
                let email = flow.ui_mut().prompt_email()?;
                let password = flow.ui_mut().prompt_password(true)?;
                flow.submit_signup(&email, &password).await?;
            }
            Section::Verify => match flow.ui_mut().prompt_verify_choice()? {
                VerifyChoice::SubmitCode => {
                    let code = flow.ui_mut().prompt_verification_code()?;
                    flow.submit_verification(&code).await?;
                }
                VerifyChoice::BackToSignup => flow.back_to_signup(),
            },
            Section::TotpDisplay => {
                if flow.ui_mut().prompt_proceed_to_login()? {
                    flow.proceed_to_login()?;
                    return Ok(());
                }
            }
        }
    }
}
