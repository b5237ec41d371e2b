use super::prompts::prompt_yes_no;
use super::spinner::is_interactive;
use crate::context::AppContext;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::fs;

pub fn run_clear(ctx: &AppContext, all: bool, credentials: bool, profile: bool, output: &Output) -> Result<()> {
    if all {
        if output.is_human() && is_interactive() && !prompt_yes_no("Sign out and clear all stored settings?", Some(false))? {
            output.info("Nothing cleared");
            return Ok(());
        }
        clear_credentials(ctx, output)?;
        output.success("All stored credentials and selections cleared");
        return Ok(());
    }

    if !credentials && !profile {
        output.warn("No clear option specified. Use --credentials, --profile, or --all");
        output.println("\nExample: movieflix clear --profile");
        return Ok(());
    }

    if profile {
        clear_profile(ctx, output)?;
    }
    if credentials {
        clear_credentials(ctx, output)?;
    }
    Ok(())
}

fn clear_profile(ctx: &AppContext, output: &Output) -> Result<()> {
    if ctx.selected_user_id()?.is_none() {
        output.info("No profile selected, nothing to clear");
        return Ok(());
    }
    ctx.update_credentials(|store| store.clear_selected_user_id())?;
    output.success("Cleared selected profile");
    Ok(())
}

/// Remove the credentials file: session token, selected profile and TMDB key
fn clear_credentials(ctx: &AppContext, output: &Output) -> Result<()> {
    let credentials_file = ctx.paths.credentials_file();

    if credentials_file.exists() {
        fs::remove_file(&credentials_file).map_err(|e| {
            eyre!("Failed to remove credentials file at {}: {}", credentials_file.display(), e)
        })?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }

    // Keep the in-memory store in step with the file
    let mut store = ctx.credentials()?;
    for key in store.get_all_keys() {
        store.remove(&key);
    }
    Ok(())
}
