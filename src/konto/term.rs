//! Terminal rendering of the onboarding and login flows. Content renders are
//! staged and revealed when their section becomes visible, the way a form
//! section flips from hidden to shown.

use crate::konto::flow::{AUTHENTICATOR_GUIDANCE, Location, Section, Ui};
use anyhow::Result;
use dialoguer::{Confirm, Input, Password, Select};
use regex::Regex;
use secrecy::SecretString;

/// What the user chose to do on the verification step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifyChoice {
    SubmitCode,
    BackToSignup,
}

/// Terminal implementation of the [`Ui`] port.
#[derive(Debug, Default)]
pub struct TerminalUi {
    email_prefill: Option<String>,
    viewer_link: Option<String>,
    totp_secret: Option<String>,
}

impl TerminalUi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending email prefill, consumed by the next email prompt.
    pub fn take_email_prefill(&mut self) -> Option<String> {
        self.email_prefill.take()
    }

    /// Prompt for an email address, rejecting malformed input before it
    /// reaches the server.
    ///
    /// # Errors
    /// Returns an error when the terminal interaction fails.
    pub fn prompt_email(&mut self) -> Result<String> {
        let mut input = Input::new().with_prompt("Email");

        if let Some(prefill) = self.take_email_prefill() {
            input = input.with_initial_text(prefill);
        }

        let email = input
            .validate_with(|value: &String| -> Result<(), &str> {
                if valid_email(value) {
                    Ok(())
                } else {
                    Err("Enter a valid email address")
                }
            })
            .interact()?;

        Ok(email)
    }

    /// Prompt for a password, optionally asking for confirmation.
    ///
    /// # Errors
    /// Returns an error when the terminal interaction fails.
    pub fn prompt_password(&self, confirm: bool) -> Result<SecretString> {
        let mut prompt = Password::new().with_prompt("Password");

        if confirm {
            prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
        }

        Ok(SecretString::from(prompt.interact()?))
    }

    /// # Errors
    /// Returns an error when the terminal interaction fails.
    pub fn prompt_verification_code(&self) -> Result<String> {
        Ok(Input::new()
            .with_prompt("Verification code")
            .validate_with(non_empty)
            .interact()?)
    }

    /// # Errors
    /// Returns an error when the terminal interaction fails.
    pub fn prompt_totp_token(&self) -> Result<String> {
        Ok(Input::new()
            .with_prompt("TOTP token")
            .validate_with(non_empty)
            .interact()?)
    }

    /// # Errors
    /// Returns an error when the terminal interaction fails.
    pub fn prompt_verify_choice(&self) -> Result<VerifyChoice> {
        let selection = Select::new()
            .with_prompt("Next")
            .items(&["Enter verification code", "Back to signup"])
            .default(0)
            .interact()?;

        Ok(if selection == 0 {
            VerifyChoice::SubmitCode
        } else {
            VerifyChoice::BackToSignup
        })
    }

    /// # Errors
    /// Returns an error when the terminal interaction fails.
    pub fn prompt_proceed_to_login(&self) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt("Proceed to login?")
            .default(true)
            .interact()?)
    }
}

impl Ui for TerminalUi {
    fn show_section(&mut self, section: Section) {
        match section {
            Section::Signup => println!("\n== Sign Up =="),
            Section::Verify => {
                println!("\n== Verify Your Email ==");
                if let Some(email) = &self.email_prefill {
                    println!("Email: {email}");
                }
                if let Some(text) = self.viewer_link.take() {
                    println!("{text}");
                }
            }
            Section::TotpDisplay => {
                println!("\n== Your TOTP Secret ==");
                if let Some(secret) = self.totp_secret.take() {
                    println!("{secret}");
                    println!("{AUTHENTICATOR_GUIDANCE}");
                }
            }
        }
    }

    fn prefill_email(&mut self, email: &str) {
        self.email_prefill = Some(email.to_string());
    }

    fn render_email_viewer(&mut self, _url: &str, text: &str) {
        self.viewer_link = Some(text.to_string());
    }

    fn render_totp_secret(&mut self, secret: &str) {
        self.totp_secret = Some(secret.to_string());
    }

    fn alert(&mut self, message: &str) {
        println!("\n{message}\n");
    }

    fn navigate(&mut self, location: Location) {
        match location {
            Location::Login => println!("Run `konto login` to sign in."),
            Location::Root => {}
        }
    }
}

pub(crate) fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

fn non_empty(value: &String) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err("Enter a value")
    } else {
        Ok(())
    }
}
