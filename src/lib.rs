//! # Konto (Account Onboarding Client)
//!
//! `konto` is a terminal client for a three-step account-onboarding flow
//! (signup, email-code verification, TOTP display) and the login that follows,
//! against a remote authentication API.
//!
//! ## Flow
//!
//! - **Signup:** register with email and password. The server responds with the
//!   address of a development email viewer where the verification code lands.
//! - **Verify:** submit the emailed code. The server responds with a fresh TOTP
//!   secret, shown once for authenticator enrollment.
//! - **Login:** email, password and a one-time TOTP token. The returned access
//!   token is persisted locally.
//!
//! ## Handoff
//!
//! The freshly generated TOTP secret crosses the signup/login boundary through
//! a session-scoped handoff store that is read once and then cleared, so the
//! secret is disclosed at most once and never re-queried from the server.

pub mod cli;
pub mod konto;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
