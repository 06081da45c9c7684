//! Command-line argument dispatch.
//!
//! This module parses validated CLI arguments and maps them to the appropriate
//! client action, resolving the API base URL and on-disk state directory.

use crate::cli::actions::{Action, inbox, login, signup};
use crate::cli::commands::{
    ARG_API_URL, ARG_INBOX_EMAIL, ARG_STATE_DIR, CMD_INBOX, CMD_LOGIN, CMD_SIGNUP,
};
use crate::konto::storage;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Map validated CLI matches to a client action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let api_url = matches
        .get_one::<String>(ARG_API_URL)
        .cloned()
        .context("missing required argument: --api-url")?;

    let state_dir = matches
        .get_one::<PathBuf>(ARG_STATE_DIR)
        .cloned()
        .unwrap_or_else(storage::default_state_dir);

    match matches.subcommand() {
        Some((CMD_SIGNUP, _)) => Ok(Action::Signup(signup::Args { api_url, state_dir })),
        Some((CMD_LOGIN, _)) => Ok(Action::Login(login::Args { api_url, state_dir })),
        Some((CMD_INBOX, sub_matches)) => {
            let email = sub_matches
                .get_one::<String>(ARG_INBOX_EMAIL)
                .cloned()
                .context("missing required argument: email")?;

            Ok(Action::Inbox(inbox::Args { api_url, email }))
        }
        _ => Err(anyhow::anyhow!("missing subcommand")),
    }
}
