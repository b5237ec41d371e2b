use super::{format_rating, format_year};
use crate::output::{truncate, Output};
use color_eyre::Result;
use movieflix_core::mock_data::demo_movies;
use movieflix_core::{landing_page, Carousel, HeroBanner};
use movieflix_models::Movie;
use owo_colors::OwoColorize;

pub fn run_landing(output: &Output) -> Result<()> {
    let page = landing_page(&demo_movies());

    if !output.is_human() {
        output.json(&page);
        return Ok(());
    }

    if let Some(hero) = &page.hero {
        print_hero(hero, output);
    }
    for carousel in &page.carousels {
        print_movie_carousel(carousel, output);
    }

    output.println("");
    output.println(format!(
        "Search with {} or pick a profile with {}",
        "movieflix search <QUERY>".cyan(),
        "movieflix users".cyan()
    ));
    Ok(())
}

pub fn print_hero(hero: &HeroBanner, output: &Output) {
    output.println("");
    output.println(format!("{}", hero.title.bold().bright_white()));
    output.println(format!(
        "{}  {}",
        format_year(hero.year).dimmed(),
        format!("★ {}", hero.rating).yellow()
    ));
    output.println(truncate(&hero.overview, 160));
}

/// One line per carousel entry: title, year and rating
pub fn print_movie_carousel(carousel: &Carousel<Movie>, output: &Output) {
    if carousel.is_empty() {
        return;
    }
    output.heading(&carousel.title);
    for movie in &carousel.items {
        output.println(format!(
            "  {:<36} {:>6}  {}",
            truncate(&movie.title, 36),
            format_year(movie.release_year()),
            format_rating(movie.vote_average).yellow()
        ));
    }
}
