use super::{format_rating, format_year};
use crate::output::{new_table, truncate, Output};
use color_eyre::Result;
use comfy_table::{Cell, Color};
use movieflix_core::mock_data::{demo_genres, demo_movies};
use movieflix_core::{available_years, filter_movies, FilterCriteria, ViewMode};
use movieflix_models::{Genre, Movie};
use owo_colors::OwoColorize;
use serde_json::json;

const GRID_COLUMNS: usize = 4;

pub fn run_browse(criteria: FilterCriteria, output: &Output) -> Result<()> {
    let movies = demo_movies();
    let genres = demo_genres();
    let results = filter_movies(&movies, &criteria);
    let active = criteria.active_filters(&genres);

    if !output.is_human() {
        output.json(&json!({
            "criteria": criteria,
            "active_filters": active.iter().map(|f| f.to_string()).collect::<Vec<_>>(),
            "genres": genres,
            "years": available_years(&movies),
            "count": results.len(),
            "movies": results,
        }));
        return Ok(());
    }

    output.heading("Browse Movies");
    if !active.is_empty() {
        let badges: Vec<String> = active.iter().map(|f| format!("[{}]", f)).collect();
        output.println(format!("Active filters: {}", badges.join(" ").magenta()));
    }
    output.println(format!(
        "{} found, sorted by {}",
        pluralize(results.len()),
        criteria.sort.to_string().bold()
    ));
    output.println("");

    if results.is_empty() {
        output.warn("No movies found");
        output.println("Try adjusting your search criteria or filters, or run `movieflix browse` without options to clear them.");
        return Ok(());
    }

    match criteria.view {
        ViewMode::Grid => print_grid(&results, output),
        ViewMode::List => print_list(&results, &genres, output),
    }
    Ok(())
}

fn pluralize(count: usize) -> String {
    if count == 1 {
        "1 movie".to_string()
    } else {
        format!("{} movies", count)
    }
}

pub(super) fn print_grid(movies: &[Movie], output: &Output) {
    let mut table = new_table();
    for row in movies.chunks(GRID_COLUMNS) {
        table.add_row(row.iter().map(|m| {
            Cell::new(format!(
                "{}\n{} · {}",
                truncate(&m.title, 22),
                format_year(m.release_year()),
                format_rating(m.vote_average)
            ))
        }));
    }
    output.table(&table);
}

pub(super) fn print_list(movies: &[Movie], genres: &[Genre], output: &Output) {
    let mut table = new_table();
    table.set_header(vec!["Title", "Year", "Rating", "Genres", "Overview"]);
    for m in movies {
        let genre_names: Vec<&str> = m
            .genre_ids
            .iter()
            .filter_map(|id| genres.iter().find(|g| g.id == *id).map(|g| g.name.as_str()))
            .collect();
        table.add_row(vec![
            Cell::new(&m.title),
            Cell::new(format_year(m.release_year())),
            Cell::new(format_rating(m.vote_average)).fg(Color::Yellow),
            Cell::new(genre_names.join(", ")),
            Cell::new(truncate(&m.overview, 60)),
        ]);
    }
    output.table(&table);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(0), "0 movies");
        assert_eq!(pluralize(1), "1 movie");
        assert_eq!(pluralize(12), "12 movies");
    }
}
