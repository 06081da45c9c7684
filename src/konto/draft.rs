//! Session draft accumulated while onboarding advances.

use secrecy::SecretString;

/// Email and TOTP seed collected during onboarding. Created on a successful
/// signup response, the seed added on successful verification, and the whole
/// draft consumed by the handoff to the login flow.
#[derive(Debug)]
pub struct SessionDraft {
    email: String,
    totp_secret: Option<SecretString>,
}

impl SessionDraft {
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            totp_secret: None,
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_totp_secret(&mut self, secret: SecretString) {
        self.totp_secret = Some(secret);
    }

    #[must_use]
    pub const fn totp_secret(&self) -> Option<&SecretString> {
        self.totp_secret.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_draft_accumulates_secret() {
        let mut draft = SessionDraft::new("a@b.com");
        assert_eq!(draft.email(), "a@b.com");
        assert!(draft.totp_secret().is_none());

        draft.set_totp_secret(SecretString::from("JBSWY3DPEHPK3PXP".to_string()));
        assert_eq!(
            draft.totp_secret().map(ExposeSecret::expose_secret),
            Some("JBSWY3DPEHPK3PXP")
        );
    }

    #[test]
    fn test_draft_debug_redacts_secret() {
        let mut draft = SessionDraft::new("a@b.com");
        draft.set_totp_secret(SecretString::from("JBSWY3DPEHPK3PXP".to_string()));

        let rendered = format!("{draft:?}");
        assert!(!rendered.contains("JBSWY3DPEHPK3PXP"));
    }
}
