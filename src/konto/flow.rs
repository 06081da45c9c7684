//! The form controller: a small state machine over the three onboarding
//! sections, plus the login flow consuming the handoff. Rendering goes through
//! the [`Ui`] port and persistence through [`KeyValueStore`], so both flows
//! are tested without a terminal or a server.

use crate::konto::api::{ApiError, AuthApi};
use crate::konto::draft::SessionDraft;
use crate::konto::storage::{KeyValueStore, SIGNUP_EMAIL_KEY, TOKEN_KEY, TOTP_SECRET_KEY};
use crate::konto::types::{LoginRequest, RegisterRequest, VerifyCodeRequest};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// Onboarding sections; exactly one is visible at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Signup,
    Verify,
    TotpDisplay,
}

/// Targets of a full navigation away from the current flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Login,
    Root,
}

/// Fallback shown when a rejected signup carries no server message.
pub const SIGNUP_FAILED: &str = "Sign up failed";
/// Fallback shown when a rejected verification carries no server message.
pub const VERIFICATION_FAILED: &str = "Verification failed";
/// Fallback shown when a rejected login carries no server message.
pub const LOGIN_FAILED: &str = "Login failed";
/// Guidance attached wherever the TOTP secret is disclosed.
pub const AUTHENTICATOR_GUIDANCE: &str = "Set this up in your authenticator app!";

/// Rendering and navigation port. Frontends without one of the optional
/// elements keep the default no-op for it.
pub trait Ui {
    /// Make `section` the visible one; all others are hidden.
    fn show_section(&mut self, section: Section);

    /// Pre-fill the email entry used by the next step.
    fn prefill_email(&mut self, email: &str);

    /// Render the email viewer link; `text` is the visible form of `url`.
    fn render_email_viewer(&mut self, url: &str, text: &str);

    /// Render the TOTP secret exactly as the server returned it.
    fn render_totp_secret(&mut self, secret: &str);

    /// Blocking notification.
    fn alert(&mut self, message: &str);

    /// Full navigation away from the current flow.
    fn navigate(&mut self, location: Location);

    /// Toggle the login link shown next to the signup form.
    fn set_login_link_visible(&mut self, _visible: bool) {}
}

fn email_viewer_text(url: &str) -> String {
    format!("View Email at {url}")
}

/// Drives `Signup → Verify → TotpDisplay` with the reverse edge back to
/// `Signup` and the terminal exit into the login flow.
pub struct OnboardingFlow<A, U, S> {
    api: A,
    ui: U,
    session: S,
    section: Section,
    draft: Option<SessionDraft>,
}

impl<A, U, S> OnboardingFlow<A, U, S>
where
    A: AuthApi,
    U: Ui,
    S: KeyValueStore,
{
    pub fn new(api: A, ui: U, session: S) -> Self {
        Self {
            api,
            ui,
            session,
            section: Section::Signup,
            draft: None,
        }
    }

    #[must_use]
    pub const fn section(&self) -> Section {
        self.section
    }

    /// Draft email, once signup has succeeded.
    #[must_use]
    pub fn draft_email(&self) -> Option<&str> {
        self.draft.as_ref().map(SessionDraft::email)
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    #[must_use]
    pub fn into_parts(self) -> (A, U, S) {
        (self.api, self.ui, self.session)
    }

    /// Register the account. On success the flow advances to
    /// [`Section::Verify`]; on a server rejection the alert shows the server
    /// message (or the fallback) and the section stays unchanged.
    ///
    /// # Errors
    /// Returns an error when the request cannot complete or the response body
    /// cannot be decoded.
    pub async fn submit_signup(&mut self, email: &str, password: &SecretString) -> Result<()> {
        let request = RegisterRequest {
            email: email.to_string(),
            password: password.expose_secret().to_string(),
        };

        match self.api.register(&request).await {
            Ok(response) => {
                debug!(
                    email_viewer = %response.email_viewer,
                    dev_endpoint = response.dev_endpoint.as_deref(),
                    "registration accepted"
                );
                self.draft = Some(SessionDraft::new(email));
                self.ui.prefill_email(email);
                let text = email_viewer_text(&response.email_viewer);
                self.ui.render_email_viewer(&response.email_viewer, &text);
                self.show(Section::Verify);
                self.ui.set_login_link_visible(false);
                Ok(())
            }
            Err(err) => self.reject(err, SIGNUP_FAILED),
        }
    }

    /// Send the draft email and the entered code. On success the secret is
    /// stored on the draft, rendered verbatim, and the flow advances to
    /// [`Section::TotpDisplay`].
    ///
    /// # Errors
    /// Returns an error when the request cannot complete or the response body
    /// cannot be decoded.
    pub async fn submit_verification(&mut self, code: &str) -> Result<()> {
        let request = VerifyCodeRequest {
            email: self.draft_email().unwrap_or_default().to_string(),
            code: code.to_string(),
        };

        match self.api.verify_code(&request).await {
            Ok(response) => {
                debug!("verification accepted");
                self.ui.render_totp_secret(&response.totp_secret);
                let draft = self
                    .draft
                    .get_or_insert_with(|| SessionDraft::new(String::new()));
                draft.set_totp_secret(SecretString::from(response.totp_secret));
                self.show(Section::TotpDisplay);
                Ok(())
            }
            Err(err) => self.reject(err, VERIFICATION_FAILED),
        }
    }

    /// Return from the verification step to the signup form and restore the
    /// login link. A no-op outside [`Section::Verify`].
    pub fn back_to_signup(&mut self) {
        if self.section != Section::Verify {
            return;
        }

        self.show(Section::Signup);
        self.ui.set_login_link_visible(true);
    }

    /// Hand the draft off through the session store and navigate to login.
    /// This write is the only way the freshly generated secret leaves the
    /// flow; it is never re-queried from the server. A no-op outside
    /// [`Section::TotpDisplay`].
    ///
    /// # Errors
    /// Returns an error when the handoff cannot be persisted.
    pub fn proceed_to_login(&mut self) -> Result<()> {
        if self.section != Section::TotpDisplay {
            return Ok(());
        }

        if let Some(draft) = self.draft.take() {
            self.session.set(SIGNUP_EMAIL_KEY, draft.email())?;
            if let Some(secret) = draft.totp_secret() {
                self.session.set(TOTP_SECRET_KEY, secret.expose_secret())?;
            }
        }

        self.ui.navigate(Location::Login);
        Ok(())
    }

    fn show(&mut self, section: Section) {
        self.section = section;
        self.ui.show_section(section);
    }

    // Server rejections alert and leave the section unchanged; transport and
    // decode failures propagate to the caller.
    fn reject(&mut self, err: ApiError, fallback: &str) -> Result<()> {
        match err {
            ApiError::Status { message, .. } => {
                self.ui.alert(message.as_deref().unwrap_or(fallback));
                Ok(())
            }
            other => Err(other.into()),
        }
    }
}

/// Consumes the onboarding handoff and performs the login call.
pub struct LoginFlow<A, U, S, T> {
    api: A,
    ui: U,
    session: S,
    tokens: T,
}

impl<A, U, S, T> LoginFlow<A, U, S, T>
where
    A: AuthApi,
    U: Ui,
    S: KeyValueStore,
    T: KeyValueStore,
{
    pub fn new(api: A, ui: U, session: S, tokens: T) -> Self {
        Self {
            api,
            ui,
            session,
            tokens,
        }
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    #[must_use]
    pub fn into_parts(self) -> (A, U, S, T) {
        (self.api, self.ui, self.session, self.tokens)
    }

    /// Consume the handoff left by onboarding: pre-fill the email, surface
    /// the TOTP secret for authenticator setup, then delete both keys
    /// regardless of what was present, so disclosure happens at most once.
    ///
    /// # Errors
    /// Returns an error when the handoff keys cannot be removed.
    pub fn init(&mut self) -> Result<()> {
        let email = self.session.get(SIGNUP_EMAIL_KEY);
        let secret = self.session.get(TOTP_SECRET_KEY);

        if let Some(email) = &email {
            self.ui.prefill_email(email);
            if let Some(secret) = &secret {
                self.ui
                    .alert(&format!("Your TOTP secret: {secret}\n{AUTHENTICATOR_GUIDANCE}"));
            }
        }

        self.session.remove(SIGNUP_EMAIL_KEY)?;
        self.session.remove(TOTP_SECRET_KEY)?;

        Ok(())
    }

    /// Send credentials plus the one-time TOTP token. On success the access
    /// token is persisted under the durable key and the user is sent to the
    /// site root; the call returns `true`. A server rejection alerts and
    /// returns `false` so the caller can offer another attempt.
    ///
    /// # Errors
    /// Returns an error when the request cannot complete, the response body
    /// cannot be decoded, or the token cannot be persisted.
    pub async fn submit_login(
        &mut self,
        email: &str,
        password: &SecretString,
        totp_token: &str,
    ) -> Result<bool> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.expose_secret().to_string(),
            totp_token: totp_token.to_string(),
        };

        match self.api.login(&request).await {
            Ok(response) => {
                debug!("login accepted");
                self.tokens.set(TOKEN_KEY, &response.access_token)?;
                self.ui.navigate(Location::Root);
                Ok(true)
            }
            Err(ApiError::Status { message, .. }) => {
                self.ui.alert(message.as_deref().unwrap_or(LOGIN_FAILED));
                Ok(false)
            }
            Err(other) => Err(other.into()),
        }
    }
}
