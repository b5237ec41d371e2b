use super::prompts::{prompt_password, prompt_validated, validate_email, validate_username};
use super::source_error;
use super::spinner::with_spinner;
use crate::context::AppContext;
use crate::output::Output;
use color_eyre::Result;
use movieflix_models::{LoginCredentials, RegisterData};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_login(ctx: &AppContext, email: Option<String>, output: &Output) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => prompt_validated("Email", validate_email)?,
    };
    let password = prompt_password("Password", false)?;

    let credentials = LoginCredentials {
        email: email.trim().to_string(),
        password,
    };
    let response = with_spinner("Signing in...", output, ctx.backend.login(&credentials))
        .await
        .map_err(|e| source_error(e, "Login failed"))?;

    if output.is_human() {
        output.success(format!("Signed in as {}", response.user.username.bold()));
    } else {
        output.json(&json!({ "type": "success", "user": response.user }));
    }
    Ok(())
}

pub async fn run_register(
    ctx: &AppContext,
    username: Option<String>,
    email: Option<String>,
    output: &Output,
) -> Result<()> {
    let username = match username {
        Some(username) => username,
        None => prompt_validated("Username", validate_username)?,
    };
    let email = match email {
        Some(email) => email,
        None => prompt_validated("Email", validate_email)?,
    };
    let password = prompt_password("Password", true)?;

    let data = RegisterData {
        username: username.trim().to_string(),
        email: email.trim().to_string(),
        password,
    };
    let response = with_spinner("Creating account...", output, ctx.backend.register(&data))
        .await
        .map_err(|e| source_error(e, "Registration failed"))?;

    if output.is_human() {
        output.success(format!("Account created. Signed in as {}", response.user.username.bold()));
    } else {
        output.json(&json!({ "type": "success", "user": response.user }));
    }
    Ok(())
}

pub async fn run_logout(ctx: &AppContext, output: &Output) -> Result<()> {
    if !ctx.is_logged_in() {
        output.info("Not signed in");
        return Ok(());
    }
    ctx.backend
        .logout()
        .await
        .map_err(|e| source_error(e, "Logout failed"))?;
    output.success("Signed out");
    Ok(())
}

pub async fn run_whoami(ctx: &AppContext, output: &Output) -> Result<()> {
    if !ctx.is_logged_in() {
        output.warn("Not signed in. Run `movieflix login` first.");
        return Ok(());
    }

    let user = with_spinner("Checking session...", output, ctx.backend.current_user())
        .await
        .map_err(|e| source_error(e, "Could not fetch the current user"))?;

    if output.is_human() {
        output.println(format!("{} ({})", user.username.bold(), user.email));
        if let Some(selected) = ctx.selected_user_id()? {
            output.println(format!("Selected profile: {}", selected));
        }
    } else {
        output.json(&user);
    }
    Ok(())
}
