pub mod logging;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_STATE_DIR: &str = "state-dir";
pub const ARG_INBOX_EMAIL: &str = "email";

pub const CMD_SIGNUP: &str = "signup";
pub const CMD_LOGIN: &str = "login";
pub const CMD_INBOX: &str = "inbox";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("konto")
        .about("Account onboarding and login client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Base URL of the authentication API")
                .default_value("http://localhost:5000")
                .env("KONTO_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_STATE_DIR)
                .long("state-dir")
                .help("Directory holding the handoff and credential files")
                .env("KONTO_STATE_DIR")
                .value_parser(clap::value_parser!(std::path::PathBuf))
                .global(true),
        )
        .subcommand(
            Command::new(CMD_SIGNUP).about("Create an account and enroll an authenticator"),
        )
        .subcommand(Command::new(CMD_LOGIN).about("Sign in with email, password and TOTP token"))
        .subcommand(
            Command::new(CMD_INBOX)
                .about("List development inbox messages for an address")
                .arg(
                    Arg::new(ARG_INBOX_EMAIL)
                        .help("Email address whose messages to list")
                        .required(true),
                ),
        );

    logging::with_args(command)
}
