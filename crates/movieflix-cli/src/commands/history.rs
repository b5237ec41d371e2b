use super::spinner::with_spinner;
use super::{format_rating, format_year, source_error};
use crate::context::AppContext;
use crate::output::{new_table, truncate, Output};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use movieflix_core::watch_history::HISTORY_EMPTY_MESSAGE;
use movieflix_core::{load_watch_history, LoadStatus};

/// Signed-in user's history, or a profile's history with `user_id`
pub async fn run_history(ctx: &AppContext, user_id: Option<u64>, output: &Output) -> Result<()> {
    match user_id {
        Some(user_id) => profile_history(ctx, user_id, output).await,
        None => own_history(ctx, output).await,
    }
}

async fn own_history(ctx: &AppContext, output: &Output) -> Result<()> {
    let view = with_spinner("Loading watch history...", output, load_watch_history(&ctx.backend)).await;

    if let LoadStatus::Failed(message) = &view.status {
        return Err(eyre!("{}", message));
    }

    if !output.is_human() {
        output.json(&view);
        return Ok(());
    }

    output.heading("Watch History");
    if view.entries.is_empty() {
        output.info(HISTORY_EMPTY_MESSAGE);
        return Ok(());
    }

    let mut table = new_table();
    table.set_header(vec!["ID", "Title", "Year", "Genres", "Watched"]);
    for entry in &view.entries {
        table.add_row(vec![
            Cell::new(entry.movie.id),
            Cell::new(truncate(&entry.movie.title, 40)),
            Cell::new(format_year(entry.movie.release_year)),
            Cell::new(truncate(&entry.movie.genres.join(", "), 30)),
            Cell::new(entry.watched_at.format("%Y-%m-%d %H:%M")),
        ]);
    }
    output.table(&table);
    Ok(())
}

async fn profile_history(ctx: &AppContext, user_id: u64, output: &Output) -> Result<()> {
    let entries = with_spinner("Loading watch history...", output, ctx.backend.user_watch_history(user_id))
        .await
        .map_err(|e| source_error(e, "Failed to load watch history"))?;

    if !output.is_human() {
        output.json(&entries);
        return Ok(());
    }

    output.heading(&format!("Watch History for profile {}", user_id));
    if entries.is_empty() {
        output.info(HISTORY_EMPTY_MESSAGE);
        return Ok(());
    }

    let mut table = new_table();
    table.set_header(vec!["ID", "Title", "Rating", "Watched"]);
    for entry in &entries {
        table.add_row(vec![
            Cell::new(entry.movie_id),
            Cell::new(truncate(&entry.title, 40)),
            Cell::new(format_rating(entry.rating)),
            Cell::new(entry.watched_at.format("%Y-%m-%d %H:%M")),
        ]);
    }
    output.table(&table);
    Ok(())
}

pub async fn run_history_add(ctx: &AppContext, movie_id: u64, output: &Output) -> Result<()> {
    ctx.backend
        .add_to_watch_history(movie_id)
        .await
        .map_err(|e| source_error(e, "Failed to add to watch history"))?;
    output.success(format!("Added movie {} to your watch history", movie_id));
    Ok(())
}
