use super::landing::print_movie_carousel;
use super::profiles::load_profiles;
use super::spinner::with_spinner;
use crate::context::AppContext;
use crate::output::{new_table, truncate, Output};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use movieflix_core::mock_data::{demo_movies, find_profile};
use movieflix_core::{dashboard, recommendation_carousels, Carousel, LoadStatus, RecommendationAdapter};
use movieflix_models::{RecommendationItem, UserProfile};
use owo_colors::OwoColorize;
use serde_json::json;
use std::sync::Arc;

pub async fn run_home(ctx: &AppContext, user_id: Option<u64>, top_k: Option<u32>, output: &Output) -> Result<()> {
    let user_id = match user_id {
        Some(id) => id,
        None => ctx
            .selected_user_id()?
            .ok_or_else(|| eyre!("No profile selected. Run `movieflix users` to pick one."))?,
    };

    let profiles = load_profiles(ctx, output).await;
    let Some(profile) = find_profile(&profiles, user_id).cloned() else {
        output.error(format!("User not found: no profile with id {}", user_id));
        output.println("Pick an existing profile with `movieflix users`.");
        return Ok(());
    };

    let top_k = top_k.unwrap_or(ctx.config.recommendations.top_k);
    let adapter = RecommendationAdapter::new(Arc::new(ctx.backend.clone())).with_top_k(top_k);
    let view = with_spinner("Fetching recommendations...", output, adapter.load(user_id)).await;
    let board = dashboard(&demo_movies());

    if !output.is_human() {
        output.json(&json!({
            "profile": profile,
            "recommendation": view,
            "dashboard": board,
        }));
        return Ok(());
    }

    print_profile_header(&profile, output);

    match &view.status {
        LoadStatus::Failed(message) => output.error(message),
        _ if view.is_empty() => output.info("No recommendations for this profile yet"),
        _ => {
            for carousel in recommendation_carousels(&view.watched_items, &view.top_recommendations) {
                print_recommendation_carousel(&carousel, output);
            }
        }
    }

    if !board.continue_watching.is_empty() {
        output.heading("Continue Watching");
        for movie in &board.continue_watching {
            output.println(format!("  ▶ {}", movie.title));
        }
    }
    for carousel in &board.carousels {
        print_movie_carousel(carousel, output);
    }
    Ok(())
}

fn print_profile_header(profile: &UserProfile, output: &Output) {
    output.println("");
    output.println(format!("Welcome back, {}", profile.name.bold().bright_white()));
    let mut details = vec![format!("{} movies watched", profile.watched_count)];
    if let Some(last_active) = profile.last_active {
        details.push(format!("last active {}", last_active.format("%Y-%m-%d")));
    }
    output.println(format!("{}", details.join(" · ").dimmed()));
    if !profile.favorite_genres.is_empty() {
        output.println(format!("Favorite genres: {}", profile.favorite_genres.join(", ").magenta()));
    }
}

fn print_recommendation_carousel(carousel: &Carousel<RecommendationItem>, output: &Output) {
    output.heading(&carousel.title);
    let mut table = new_table();
    table.set_header(vec!["#", "Title", "ASIN", "Score"]);
    for (position, item) in carousel.items.iter().enumerate() {
        let score = item.score.map(|s| format!("{:.3}", s)).unwrap_or_default();
        table.add_row(vec![
            Cell::new(position + 1),
            Cell::new(truncate(&item.title, 48)),
            Cell::new(&item.asin),
            Cell::new(score),
        ]);
    }
    output.table(&table);
}
