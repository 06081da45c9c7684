pub mod inbox;
pub mod login;
pub mod signup;

// Internal "interpreter" for `Action`.
// The match lives in its own module so `mod.rs` stays declaration-only.
mod run;

#[derive(Debug)]
pub enum Action {
    Signup(signup::Args),
    Login(login::Args),
    Inbox(inbox::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
