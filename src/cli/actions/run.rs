use crate::cli::actions::{Action, inbox, login, signup};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Signup(args) => signup::execute(args).await,
        Action::Login(args) => login::execute(args).await,
        Action::Inbox(args) => inbox::execute(args).await,
    }
}
