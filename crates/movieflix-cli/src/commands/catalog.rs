use super::spinner::with_spinner;
use super::{format_rating, format_year, source_error};
use crate::context::AppContext;
use crate::output::{new_table, truncate, Output};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Color};
use movieflix_core::catalog::{validate_rating, CATALOG_EMPTY_MESSAGE};
use movieflix_core::{CatalogBrowser, CatalogPage, LoadStatus};
use movieflix_models::{CatalogMovie, MovieFilters};
use owo_colors::OwoColorize;
use std::sync::Arc;

pub async fn run_movies(ctx: &AppContext, filters: MovieFilters, output: &Output) -> Result<()> {
    let mut browser = CatalogBrowser::with_filters(Arc::new(ctx.backend.clone()), filters);
    let page = with_spinner("Loading movies...", output, browser.load()).await;
    render_page(page, output)
}

pub async fn run_movie(ctx: &AppContext, movie_id: u64, output: &Output) -> Result<()> {
    let movie = with_spinner("Loading movie...", output, ctx.backend.get_movie(movie_id))
        .await
        .map_err(|e| source_error(e, "Failed to load movie"))?;

    if !output.is_human() {
        output.json(&movie);
        return Ok(());
    }

    print_movie_details(&movie, output);
    Ok(())
}

/// Rate a movie, then show the refreshed first catalog page
pub async fn run_rate(ctx: &AppContext, movie_id: u64, rating: u8, output: &Output) -> Result<()> {
    validate_rating(rating).map_err(|e| eyre!("{}", e))?;

    let mut browser = CatalogBrowser::new(Arc::new(ctx.backend.clone()));
    with_spinner("Submitting rating...", output, browser.rate(movie_id, rating))
        .await
        .map_err(|e| eyre!("{:#}", e))?;

    output.success(format!("Rated movie {} with {}", movie_id, "★".repeat(usize::from(rating))));
    render_page(browser.page(), output)
}

fn render_page(page: &CatalogPage, output: &Output) -> Result<()> {
    if let LoadStatus::Failed(message) = &page.status {
        return Err(eyre!("{}", message));
    }

    if !output.is_human() {
        output.json(page);
        return Ok(());
    }

    if page.movies.is_empty() {
        output.warn(CATALOG_EMPTY_MESSAGE);
        return Ok(());
    }

    let mut table = new_table();
    table.set_header(vec!["ID", "Title", "Year", "Genres", "Rating", "Votes"]);
    for movie in &page.movies {
        table.add_row(vec![
            Cell::new(movie.id),
            Cell::new(truncate(&movie.title, 40)),
            Cell::new(format_year(movie.release_year)),
            Cell::new(truncate(&movie.genres.join(", "), 30)),
            Cell::new(format_rating(movie.average_rating)).fg(Color::Yellow),
            Cell::new(movie.total_ratings),
        ]);
    }
    output.table(&table);

    let mut footer = format!("Page {} of {} ({} movies)", page.page, page.total_pages.max(1), page.total);
    if page.has_previous() {
        footer.push_str(&format!(" · previous: --page {}", page.page - 1));
    }
    if page.has_next() {
        footer.push_str(&format!(" · next: --page {}", page.page + 1));
    }
    output.println(format!("{}", footer.dimmed()));
    Ok(())
}

fn print_movie_details(movie: &CatalogMovie, output: &Output) {
    output.println("");
    output.println(format!("{}", movie.title.bold().bright_white()));
    output.println(format!(
        "{}  {}  {}",
        format_year(movie.release_year).dimmed(),
        format_rating(movie.average_rating).yellow(),
        format!("({} ratings)", movie.total_ratings).dimmed()
    ));
    if !movie.genres.is_empty() {
        output.println(format!("{}", movie.genres.join(" · ").magenta()));
    }
    if !movie.description.is_empty() {
        output.println("");
        output.println(&movie.description);
    }
    if let Some(poster) = &movie.poster_url {
        output.println("");
        output.println(format!("Poster: {}", poster));
    }
    output.println("");
    output.println(format!("Rate it with {}", format!("movieflix rate {} <1-5>", movie.id).cyan()));
}
