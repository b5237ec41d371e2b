use super::browse::{print_grid, print_list};
use super::spinner::with_spinner;
use super::{format_year, source_error};
use crate::context::AppContext;
use crate::output::{new_table, Output};
use color_eyre::Result;
use comfy_table::Cell;
use movieflix_core::{sort_movies, SortKey, ViewMode};
use movieflix_models::{ImageSize, Movie};
use movieflix_sources::{create_tmdb_client, MovieDetails, SourceResult, TimeWindow, TmdbClient, TmdbPage};
use owo_colors::OwoColorize;

/// A TMDB movie listing
#[derive(Debug, Clone, Copy)]
pub enum Listing {
    Popular,
    Trending(TimeWindow),
    TopRated,
    NowPlaying,
    Upcoming,
    Genre(u32),
    Similar(u64),
}

impl Listing {
    fn title(&self) -> String {
        match self {
            Listing::Popular => "Popular Movies".to_string(),
            Listing::Trending(TimeWindow::Day) => "Trending Today".to_string(),
            Listing::Trending(TimeWindow::Week) => "Trending This Week".to_string(),
            Listing::TopRated => "Top Rated Movies".to_string(),
            Listing::NowPlaying => "Now Playing".to_string(),
            Listing::Upcoming => "Upcoming".to_string(),
            Listing::Genre(id) => format!("Genre #{}", id),
            Listing::Similar(id) => format!("Similar to #{}", id),
        }
    }

    async fn fetch(&self, client: &TmdbClient, page: u32) -> SourceResult<TmdbPage> {
        match *self {
            Listing::Popular => client.popular(page).await,
            Listing::Trending(window) => client.trending(window, page).await,
            Listing::TopRated => client.top_rated(page).await,
            Listing::NowPlaying => client.now_playing(page).await,
            Listing::Upcoming => client.upcoming(page).await,
            Listing::Genre(genre_id) => client.by_genre(genre_id, page).await,
            Listing::Similar(movie_id) => client.similar(movie_id, page).await,
        }
    }
}

fn tmdb_client(ctx: &AppContext) -> Result<TmdbClient> {
    create_tmdb_client(&ctx.config, &ctx.credentials).map_err(|e| source_error(e, "TMDB is not available"))
}

/// Fetch a listing; `sort` reorders the page locally with the catalog sort rules
pub async fn run_listing(
    ctx: &AppContext,
    listing: Listing,
    page: u32,
    sort: Option<SortKey>,
    view: ViewMode,
    output: &Output,
) -> Result<()> {
    let client = tmdb_client(ctx)?;
    let mut result = with_spinner("Loading from TMDB...", output, listing.fetch(&client, page))
        .await
        .map_err(|e| source_error(e, "Failed to load movies from TMDB"))?;

    if let Some(key) = sort {
        sort_movies(&mut result.results, key);
    }

    if !output.is_human() {
        output.json(&result);
        return Ok(());
    }

    output.heading(&listing.title());
    if result.results.is_empty() {
        output.warn("No movies found");
        return Ok(());
    }

    match view {
        ViewMode::Grid => print_grid(&result.results, output),
        ViewMode::List => {
            // Genre names are only needed for the list view
            let genres = client.genres().await.unwrap_or_default();
            print_list(&result.results, &genres, output);
        }
    }

    if let (Some(current), Some(total)) = (result.page, result.total_pages) {
        output.println(format!("{}", format!("Page {} of {}", current, total).dimmed()));
    }
    Ok(())
}

pub async fn run_details(ctx: &AppContext, movie_id: u64, output: &Output) -> Result<()> {
    let client = tmdb_client(ctx)?;
    let details = with_spinner("Loading from TMDB...", output, client.details(movie_id))
        .await
        .map_err(|e| source_error(e, "Failed to load movie details"))?;

    if !output.is_human() {
        output.json(&details);
        return Ok(());
    }
    print_details(&details, output);
    Ok(())
}

pub async fn run_genres(ctx: &AppContext, output: &Output) -> Result<()> {
    let client = tmdb_client(ctx)?;
    let genres = with_spinner("Loading genres...", output, client.genres())
        .await
        .map_err(|e| source_error(e, "Failed to load genres"))?;

    if !output.is_human() {
        output.json(&genres);
        return Ok(());
    }

    let mut table = new_table();
    table.set_header(vec!["ID", "Genre"]);
    for genre in &genres {
        table.add_row(vec![Cell::new(genre.id), Cell::new(&genre.name)]);
    }
    output.table(&table);
    Ok(())
}

fn print_details(details: &MovieDetails, output: &Output) {
    let movie: &Movie = &details.movie;
    output.println("");
    output.println(format!("{}", movie.title.bold().bright_white()));
    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        output.println(format!("{}", tagline.italic()));
    }

    let mut facts = vec![format_year(movie.release_year()), format!("★ {}", movie.display_rating())];
    if let Some(runtime) = details.runtime.filter(|r| *r > 0) {
        facts.push(format!("{}h {}m", runtime / 60, runtime % 60));
    }
    if let Some(status) = &details.status {
        facts.push(status.clone());
    }
    output.println(format!("{}", facts.join(" · ").dimmed()));

    if !details.genres.is_empty() {
        let names: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        output.println(format!("{}", names.join(", ").magenta()));
    }
    output.println("");
    output.println(&movie.overview);
    output.println("");
    output.println(format!("Poster:   {}", movie.poster_url(ImageSize::W500)));
    output.println(format!("Backdrop: {}", movie.backdrop_url(ImageSize::Original)));
    if details.budget > 0 || details.revenue > 0 {
        output.println(format!("Budget: ${}  Revenue: ${}", details.budget, details.revenue));
    }
}
