//! Auth commands
//!
//! Sign-in, sign-up, sign-out, and the greeting. The cheap checks (password
//! confirmation, minimum length) run client-side before anything is sent to
//! the collaborator; its errors are surfaced verbatim and never lose state.

use crate::client::AuthClient;
use crate::Console;
use anyhow::{Context, Result};
use dialoguer::{Input, Password};
use std::path::PathBuf;
use temadesk_common::config::ClientConfig;
use temadesk_common::session::{self, Session};

fn session_path() -> Result<PathBuf> {
    session::default_session_path().context("Cannot determine the user config directory")
}

pub fn cmd_login(console: &Console, config: &ClientConfig) -> Result<()> {
    let client = AuthClient::from_config(config)?;

    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;

    let spinner = console.spinner("Signing in...");
    let result = client.sign_in_with_password(&email, &password);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    match result {
        Ok(session) => {
            session.save(&session_path()?)?;
            console.success(format!("Welcome back, {}!", session.display_name()));
            Ok(())
        }
        Err(e) => {
            console.error(&e);
            Err(e.into())
        }
    }
}

pub fn cmd_signup(console: &Console, config: &ClientConfig) -> Result<()> {
    let client = AuthClient::from_config(config)?;

    let full_name: String = Input::new().with_prompt("Full name").interact_text()?;
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;
    let confirmation = Password::new().with_prompt("Confirm password").interact()?;

    if let Err(err) = session::validate_signup_password(&password, &confirmation) {
        console.error(&err);
        return Err(err.into());
    }

    let spinner = console.spinner("Creating account...");
    let result = client.sign_up(&email, &password, &full_name);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    match result {
        Ok(session) => {
            session.save(&session_path()?)?;
            console.success(format!(
                "Account created! Welcome, {}.",
                session.display_name()
            ));
            Ok(())
        }
        Err(e) => {
            console.error(&e);
            Err(e.into())
        }
    }
}

pub fn cmd_logout(console: &Console) -> Result<()> {
    Session::clear(&session_path()?)?;
    console.success("Signed out.");
    Ok(())
}

pub fn cmd_whoami(console: &Console) -> Result<()> {
    match Session::load(&session_path()?) {
        Some(session) => {
            console.log(format!(
                "Signed in as {} ({})",
                session.display_name(),
                session.email
            ));
            console.verbose(format!(
                "signed in at {}",
                session.signed_in_at.format("%Y-%m-%d %H:%M UTC")
            ));
        }
        None => {
            console.log("Not signed in. Run 'temadesk login' to sign in.");
        }
    }
    Ok(())
}
