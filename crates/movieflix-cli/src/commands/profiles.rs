use super::prompts::prompt_select;
use super::spinner::{is_interactive, with_spinner};
use crate::context::AppContext;
use crate::output::{new_table, Output};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use movieflix_core::mock_data::{demo_profiles, find_profile};
use movieflix_models::UserProfile;
use owo_colors::OwoColorize;
use tracing::debug;

/// Profiles from the backend, or the built-in set when it has none to offer
pub async fn load_profiles(ctx: &AppContext, output: &Output) -> Vec<UserProfile> {
    match with_spinner("Loading profiles...", output, ctx.backend.list_users()).await {
        Ok(profiles) if !profiles.is_empty() => profiles,
        Ok(_) => demo_profiles(),
        Err(e) => {
            debug!(error = %e, "Profile list unavailable, using built-in profiles");
            demo_profiles()
        }
    }
}

pub async fn run_users(ctx: &AppContext, select: Option<u64>, clear: bool, output: &Output) -> Result<()> {
    if clear {
        ctx.update_credentials(|store| store.clear_selected_user_id())?;
        output.success("Profile selection cleared");
        return Ok(());
    }

    let profiles = load_profiles(ctx, output).await;

    let chosen = match select {
        Some(user_id) => Some(
            find_profile(&profiles, user_id)
                .cloned()
                .ok_or_else(|| eyre!("User not found: no profile with id {}", user_id))?,
        ),
        None if output.is_human() && !output.is_quiet() && is_interactive() => {
            let labels: Vec<String> = profiles.iter().map(profile_label).collect();
            let index = prompt_select("Who's watching?", &labels)?;
            profiles.get(index).cloned()
        }
        None => None,
    };

    match chosen {
        Some(profile) => {
            ctx.update_credentials(|store| store.set_selected_user_id(profile.id))?;
            if output.is_human() {
                output.success(format!("Selected profile {}", profile.name.bold()));
                output.println(format!("Run {} to see recommendations", "movieflix home".cyan()));
            } else {
                output.json(&profile);
            }
        }
        None => print_profiles(&profiles, ctx.selected_user_id()?, output),
    }
    Ok(())
}

fn profile_label(profile: &UserProfile) -> String {
    format!("{} ({} movies watched)", profile.name, profile.watched_count)
}

fn print_profiles(profiles: &[UserProfile], selected: Option<u64>, output: &Output) {
    if !output.is_human() {
        output.json(profiles);
        return;
    }

    output.heading("Who's watching?");
    let mut table = new_table();
    table.set_header(vec!["", "ID", "Name", "Watched", "Last active", "Favorite genres"]);
    for p in profiles {
        let marker = if Some(p.id) == selected { "●" } else { "" };
        let last_active = p
            .last_active
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(marker),
            Cell::new(p.id),
            Cell::new(&p.name),
            Cell::new(p.watched_count),
            Cell::new(last_active),
            Cell::new(p.favorite_genres.iter().take(3).cloned().collect::<Vec<_>>().join(", ")),
        ]);
    }
    output.table(&table);
    output.println("Select one with `movieflix users --select <ID>`");
}
