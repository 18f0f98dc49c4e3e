// Entrypoint for the CLI application.
// - Parses flags, falls back to WE_EMAIL/WE_PASSWORD, then prompts.
// - Keeps `main` small: log in once, then fetch and render the
//   requested resource(s).
// - Returns `anyhow::Result` so any API error prints and exits nonzero.

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use dialoguer::{Input, Password};
use we_cli::api::{ApiClient, ApiError};
use we_cli::ui;

const ENV_EMAIL: &str = "WE_EMAIL";
const ENV_PASSWORD: &str = "WE_PASSWORD";

#[derive(Copy, Clone, ValueEnum)]
enum Info {
    Profile,
    Usage,
    Days,
    Points,
}

#[derive(Parser)]
#[command(name = "we", about = "WE (TE Data) account info from the command line")]
struct Args {
    /// Info to be displayed; shows everything when omitted
    #[arg(long, value_enum)]
    only: Option<Info>,

    /// TE Data account email (falls back to WE_EMAIL)
    #[arg(long)]
    email: Option<String>,

    /// TE Data account password (falls back to WE_PASSWORD)
    #[arg(long)]
    password: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Resolve credentials: flags first, then environment variables, then an
/// interactive prompt. The client accepts anything, so empty input is
/// rejected here.
fn credentials(args: &Args) -> Result<(String, String)> {
    let email = match non_empty(args.email.clone())
        .or_else(|| non_empty(std::env::var(ENV_EMAIL).ok()))
    {
        Some(v) => v,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = match non_empty(args.password.clone())
        .or_else(|| non_empty(std::env::var(ENV_PASSWORD).ok()))
    {
        Some(v) => v,
        None => Password::new().with_prompt("Password").interact()?,
    };
    if email.is_empty() || password.is_empty() {
        bail!("please provide email and password");
    }
    Ok((email, password))
}

/// Run one blocking API call behind a spinner.
fn fetch<T>(msg: &str, call: impl FnOnce() -> Result<T, ApiError>) -> Result<T, ApiError> {
    let sp = ui::spinner(msg);
    let out = call();
    sp.finish_and_clear();
    out
}

fn main() -> Result<()> {
    let args = Args::parse();
    let (email, password) = credentials(&args)?;

    let mut api = ApiClient::new(&email, &password)?;
    // Login always runs first: it establishes the session key that the
    // other endpoints are addressed by.
    let profile = fetch("Logging in...", || api.login())?;

    match args.only {
        Some(Info::Profile) => ui::render_table(&ui::profile_rows(&profile)),
        Some(Info::Usage) => {
            let usage = fetch("Fetching usage...", || api.usage())?;
            ui::render_table(&ui::usage_rows(&usage));
        }
        Some(Info::Days) => {
            let days = fetch("Fetching remaining days...", || api.remaining_days())?;
            ui::render_table(&ui::days_rows(&days));
        }
        Some(Info::Points) => {
            let points = fetch("Fetching 4U points...", || api.loyalty_points())?;
            ui::render_table(&ui::points_rows(&points));
        }
        None => {
            let usage = fetch("Fetching usage...", || api.usage())?;
            let days = fetch("Fetching remaining days...", || api.remaining_days())?;
            let points = fetch("Fetching 4U points...", || api.loyalty_points())?;

            let mut rows = ui::profile_rows(&profile);
            rows.extend(ui::usage_rows(&usage));
            rows.extend(ui::days_rows(&days));
            rows.extend(ui::points_rows(&points));
            ui::render_table(&rows);
        }
    }
    Ok(())
}
