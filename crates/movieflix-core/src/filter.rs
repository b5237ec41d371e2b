//! Catalog filter/sort engine
//!
//! Derives a view-ordered subset of a fixed movie collection from the current
//! criteria. Pure: the input is never modified and the same criteria always
//! produce the same ordering.

use movieflix_models::{Genre, Movie};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GenreSelector {
    #[default]
    All,
    Id(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum YearSelector {
    #[default]
    All,
    Year(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Descending popularity score
    #[default]
    Popularity,
    /// A-Z
    Title,
    /// Newest release first
    Year,
    /// Highest rated first
    Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl FromStr for GenreSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(GenreSelector::All);
        }
        s.parse::<u32>()
            .map(GenreSelector::Id)
            .map_err(|_| format!("Invalid genre '{}': expected 'all' or a genre id", s))
    }
}

impl FromStr for YearSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(YearSelector::All);
        }
        s.parse::<i32>()
            .map(YearSelector::Year)
            .map_err(|_| format!("Invalid year '{}': expected 'all' or a year", s))
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "popularity" => Ok(SortKey::Popularity),
            "title" => Ok(SortKey::Title),
            "year" => Ok(SortKey::Year),
            "rating" => Ok(SortKey::Rating),
            other => Err(format!(
                "Invalid sort key '{}'. Use 'popularity', 'title', 'year', or 'rating'",
                other
            )),
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            other => Err(format!("Invalid view mode '{}'. Use 'grid' or 'list'", other)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortKey::Popularity => "Popularity",
            SortKey::Title => "Title A-Z",
            SortKey::Year => "Newest First",
            SortKey::Rating => "Highest Rated",
        };
        write!(f, "{}", label)
    }
}

/// A removable badge describing one active filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ActiveFilter {
    Search(String),
    Genre { id: u32, name: Option<String> },
    Year(i32),
}

impl fmt::Display for ActiveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveFilter::Search(q) => write!(f, "Search: {}", q),
            ActiveFilter::Genre { name: Some(name), .. } => write!(f, "Genre: {}", name),
            ActiveFilter::Genre { id, name: None } => write!(f, "Genre: #{}", id),
            ActiveFilter::Year(year) => write!(f, "Year: {}", year),
        }
    }
}

/// User's current search/filter/sort selection; fields combine by logical AND
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterCriteria {
    pub query: String,
    pub genre: GenreSelector,
    pub year: YearSelector,
    pub sort: SortKey,
    pub view: ViewMode,
}

impl FilterCriteria {
    /// Reset query, genre and year; sort key and view mode are kept
    pub fn clear(&mut self) {
        self.query.clear();
        self.genre = GenreSelector::All;
        self.year = YearSelector::All;
    }

    fn normalized_query(&self) -> Option<String> {
        let q = self.query.trim();
        if q.is_empty() {
            None
        } else {
            Some(q.to_lowercase())
        }
    }

    pub fn is_filtered(&self) -> bool {
        self.normalized_query().is_some() || self.genre != GenreSelector::All || self.year != YearSelector::All
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        if let Some(q) = self.normalized_query() {
            let in_title = movie.title.to_lowercase().contains(&q);
            if !in_title && !movie.overview.to_lowercase().contains(&q) {
                return false;
            }
        }

        if let GenreSelector::Id(genre_id) = self.genre {
            if !movie.has_genre(genre_id) {
                return false;
            }
        }

        if let YearSelector::Year(year) = self.year {
            if movie.release_year() != Some(year) {
                return false;
            }
        }

        true
    }

    /// Badges for the active filters, resolving genre names from `genres`
    pub fn active_filters(&self, genres: &[Genre]) -> Vec<ActiveFilter> {
        let mut active = Vec::new();
        if !self.query.trim().is_empty() {
            active.push(ActiveFilter::Search(self.query.trim().to_string()));
        }
        if let GenreSelector::Id(id) = self.genre {
            let name = genres.iter().find(|g| g.id == id).map(|g| g.name.clone());
            active.push(ActiveFilter::Genre { id, name });
        }
        if let YearSelector::Year(year) = self.year {
            active.push(ActiveFilter::Year(year));
        }
        active
    }
}

/// Apply `criteria` to `movies`, returning the matching movies in view order
pub fn filter_movies(movies: &[Movie], criteria: &FilterCriteria) -> Vec<Movie> {
    let mut filtered: Vec<Movie> = movies.iter().filter(|m| criteria.matches(m)).cloned().collect();
    sort_movies(&mut filtered, criteria.sort);
    filtered
}

/// Stable in-place sort; ties keep their input order
pub fn sort_movies(movies: &mut [Movie], key: SortKey) {
    movies.sort_by(|a, b| compare(a, b, key));
}

fn compare(a: &Movie, b: &Movie, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => a
            .title
            .to_lowercase()
            .cmp(&b.title.to_lowercase())
            .then_with(|| a.title.cmp(&b.title)),
        // None < Some, so undated movies end up last
        SortKey::Year => b.release_date().cmp(&a.release_date()),
        SortKey::Rating => b.vote_average.total_cmp(&a.vote_average),
        SortKey::Popularity => b.popularity.total_cmp(&a.popularity),
    }
}

/// Distinct release years present in `movies`, newest first
pub fn available_years(movies: &[Movie]) -> Vec<i32> {
    let years: BTreeSet<i32> = movies.iter().filter_map(|m| m.release_year()).collect();
    years.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, title: &str, overview: &str, date: Option<&str>, rating: f64, popularity: f64, genres: &[u32]) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: overview.to_string(),
            poster_path: None,
            backdrop_path: None,
            release_date: date.map(|d| d.to_string()),
            vote_average: rating,
            vote_count: 0,
            popularity,
            genre_ids: genres.to_vec(),
        }
    }

    fn catalog() -> Vec<Movie> {
        vec![
            movie(1, "The Matrix", "A hacker learns the truth about reality.", Some("1999-03-30"), 8.2, 80.0, &[28, 878]),
            movie(2, "Inception", "A thief steals secrets through dream-sharing.", Some("2010-07-15"), 8.4, 95.0, &[28, 878, 12]),
            movie(3, "Interstellar", "Explorers travel through a wormhole.", Some("2014-11-05"), 8.4, 90.0, &[12, 18, 878]),
            movie(4, "amélie", "A shy waitress decides to change lives.", Some("2001-04-25"), 7.9, 40.0, &[35, 10749]),
            movie(5, "Fight Club", "An insomniac forms an underground club.", Some("1999-10-15"), 8.4, 70.0, &[18]),
            movie(6, "Untitled Project", "Nothing is known yet.", None, 0.0, 70.0, &[18]),
            movie(7, "Shutter Island", "A marshal investigates a disappearance.", Some("2010-02-14"), 8.2, 60.0, &[9648, 53]),
        ]
    }

    fn all_criteria() -> Vec<FilterCriteria> {
        let queries = ["", "the", "DREAM", "zzz", "  matrix  "];
        let genres = [GenreSelector::All, GenreSelector::Id(878), GenreSelector::Id(18), GenreSelector::Id(999)];
        let years = [YearSelector::All, YearSelector::Year(1999), YearSelector::Year(2010), YearSelector::Year(1850)];
        let sorts = [SortKey::Popularity, SortKey::Title, SortKey::Year, SortKey::Rating];

        let mut out = Vec::new();
        for q in queries {
            for genre in genres {
                for year in years {
                    for sort in sorts {
                        out.push(FilterCriteria {
                            query: q.to_string(),
                            genre,
                            year,
                            sort,
                            view: ViewMode::Grid,
                        });
                    }
                }
            }
        }
        out
    }

    fn is_sorted(movies: &[Movie], key: SortKey) -> bool {
        movies.windows(2).all(|w| compare(&w[0], &w[1], key) != Ordering::Greater)
    }

    #[test]
    fn test_output_is_exactly_the_matching_subset() {
        let movies = catalog();
        for criteria in all_criteria() {
            let result = filter_movies(&movies, &criteria);

            for m in &result {
                assert!(movies.contains(m), "result contains a movie not in the input");
                assert!(criteria.matches(m), "{:?} does not satisfy {:?}", m.title, criteria);
            }
            let expected = movies.iter().filter(|m| criteria.matches(m)).count();
            assert_eq!(result.len(), expected, "wrong count for {:?}", criteria);
        }
    }

    #[test]
    fn test_every_sort_key_orders_and_is_idempotent() {
        let movies = catalog();
        for criteria in all_criteria() {
            let first = filter_movies(&movies, &criteria);
            assert!(is_sorted(&first, criteria.sort), "not sorted by {:?}", criteria.sort);

            let again = filter_movies(&movies, &criteria);
            assert_eq!(first, again);

            // Feeding the output back in changes nothing
            assert_eq!(filter_movies(&first, &criteria), first);
        }
    }

    #[test]
    fn test_matrix_query() {
        let movies = vec![
            movie(1, "The Matrix", "Neo wakes up.", Some("1999-03-30"), 8.2, 80.0, &[28]),
            movie(2, "Inception", "Dreams within dreams.", Some("2010-07-15"), 8.4, 95.0, &[28]),
        ];
        let criteria = FilterCriteria {
            query: "matrix".to_string(),
            ..FilterCriteria::default()
        };
        let result = filter_movies(&movies, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "The Matrix");
    }

    #[test]
    fn test_query_matches_overview_case_insensitively() {
        let criteria = FilterCriteria {
            query: "WORMHOLE".to_string(),
            ..FilterCriteria::default()
        };
        let result = filter_movies(&catalog(), &criteria);
        assert_eq!(result.iter().map(|m| m.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_no_match_yields_empty() {
        let criteria = FilterCriteria {
            genre: GenreSelector::Id(35),
            year: YearSelector::Year(1999),
            ..FilterCriteria::default()
        };
        assert!(filter_movies(&catalog(), &criteria).is_empty());
        assert!(filter_movies(&[], &FilterCriteria::default()).is_empty());
    }

    #[test]
    fn test_sort_ties_keep_input_order() {
        // Fight Club and Untitled Project share popularity 70.0
        let result = filter_movies(&catalog(), &FilterCriteria::default());
        let ids: Vec<u64> = result.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 3, 1, 5, 6, 7, 4]);

        let by_rating = filter_movies(
            &catalog(),
            &FilterCriteria {
                sort: SortKey::Rating,
                ..FilterCriteria::default()
            },
        );
        let ids: Vec<u64> = by_rating.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 3, 5, 1, 7, 4, 6]);
    }

    #[test]
    fn test_title_sort_is_case_insensitive_and_year_puts_undated_last() {
        let by_title = filter_movies(
            &catalog(),
            &FilterCriteria {
                sort: SortKey::Title,
                ..FilterCriteria::default()
            },
        );
        assert_eq!(by_title[0].title, "amélie");

        let by_year = filter_movies(
            &catalog(),
            &FilterCriteria {
                sort: SortKey::Year,
                ..FilterCriteria::default()
            },
        );
        assert_eq!(by_year.first().map(|m| m.id), Some(3));
        assert_eq!(by_year.last().map(|m| m.id), Some(6));
    }

    #[test]
    fn test_available_years_descending() {
        assert_eq!(available_years(&catalog()), vec![2014, 2010, 2001, 1999]);
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!("all".parse::<GenreSelector>().unwrap(), GenreSelector::All);
        assert_eq!("878".parse::<GenreSelector>().unwrap(), GenreSelector::Id(878));
        assert!("scifi".parse::<GenreSelector>().is_err());
        assert_eq!("ALL".parse::<YearSelector>().unwrap(), YearSelector::All);
        assert_eq!("1999".parse::<YearSelector>().unwrap(), YearSelector::Year(1999));
        assert_eq!("Rating".parse::<SortKey>().unwrap(), SortKey::Rating);
        assert!("newest".parse::<SortKey>().is_err());
        assert_eq!("list".parse::<ViewMode>().unwrap(), ViewMode::List);
    }

    #[test]
    fn test_active_filters_and_clear() {
        let genres = vec![Genre { id: 878, name: "Science Fiction".to_string() }];
        let mut criteria = FilterCriteria {
            query: " matrix ".to_string(),
            genre: GenreSelector::Id(878),
            year: YearSelector::Year(1999),
            sort: SortKey::Title,
            view: ViewMode::List,
        };

        let labels: Vec<String> = criteria.active_filters(&genres).iter().map(|f| f.to_string()).collect();
        assert_eq!(labels, vec!["Search: matrix", "Genre: Science Fiction", "Year: 1999"]);
        assert!(criteria.is_filtered());

        criteria.clear();
        assert!(!criteria.is_filtered());
        assert!(criteria.active_filters(&genres).is_empty());
        assert_eq!(criteria.sort, SortKey::Title);
        assert_eq!(criteria.view, ViewMode::List);
    }
}
