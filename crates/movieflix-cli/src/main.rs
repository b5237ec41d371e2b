use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::config::ConfigUpdate;
use commands::discover::Listing;
use commands::{auth, browse, catalog, clear, config, discover, history, home, landing, profiles, search};
use movieflix_config::{Config, PathManager};
use movieflix_core::{FilterCriteria, GenreSelector, SortKey, ViewMode, YearSelector};
use movieflix_models::MovieFilters;
use movieflix_sources::TimeWindow;
use std::path::PathBuf;

mod commands;
mod context;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "movieflix")]
#[command(about = "MovieFlix - browse movies and personalized recommendations from your terminal")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Featured movie and trending carousels
    Landing,

    /// List viewer profiles or pick the active one
    #[command(long_about = "Show the \"Who's watching?\" profiles. Without options an interactive picker is shown on a terminal; --select stores the chosen profile, --clear forgets it.")]
    Users {
        /// Select the profile with this id
        #[arg(long, value_name = "ID", conflicts_with = "clear")]
        select: Option<u64>,

        /// Forget the selected profile
        #[arg(long, action = ArgAction::SetTrue)]
        clear: bool,
    },

    /// Personalized home: watched items and top recommendations for a profile
    Home {
        /// Profile id (defaults to the selected profile)
        user_id: Option<u64>,

        /// Number of recommendations to ask for (defaults to recommendations.top_k)
        #[arg(long, value_name = "N")]
        top_k: Option<u32>,
    },

    /// Search, filter and sort the built-in catalog
    Browse {
        /// Match against title or overview (case-insensitive)
        #[arg(short = 's', long, default_value = "")]
        query: String,

        /// Genre id, or 'all'
        #[arg(long, default_value = "all")]
        genre: GenreSelector,

        /// Release year, or 'all'
        #[arg(long, default_value = "all")]
        year: YearSelector,

        /// popularity | title | year | rating
        #[arg(long, default_value = "popularity")]
        sort: SortKey,

        /// grid | list
        #[arg(long, default_value = "grid")]
        view: ViewMode,
    },

    /// Page through the backend catalog
    Movies {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 20)]
        limit: u32,

        #[arg(long)]
        search: Option<String>,

        /// Genre name; repeat for several
        #[arg(long = "genre", value_name = "GENRE")]
        genres: Vec<String>,

        #[arg(long)]
        min_rating: Option<f64>,

        #[arg(long)]
        year_from: Option<i32>,

        #[arg(long)]
        year_to: Option<i32>,
    },

    /// Show one catalog movie
    Movie { movie_id: u64 },

    /// Rate a catalog movie from 1 to 5 stars
    Rate { movie_id: u64, rating: u8 },

    /// Free-text movie search (backend or TMDB, see `config set --search-provider`)
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Movie listings from TMDB (needs a TMDB API key)
    Discover {
        #[command(subcommand)]
        cmd: DiscoverCommands,
    },

    /// Watch history of the signed-in user or of a profile
    History {
        /// Show this profile's history instead of your own
        #[arg(long, value_name = "ID")]
        user: Option<u64>,

        #[command(subcommand)]
        cmd: Option<HistoryCommands>,
    },

    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: Option<String>,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },

    /// Sign out and forget the session token
    Logout,

    /// Show the signed-in user
    Whoami,

    /// View or change settings
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },

    /// Remove stored credentials or the selected profile
    Clear {
        /// Clear everything
        #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["credentials", "profile"])]
        all: bool,

        /// Remove the credentials file (session token, TMDB key, selected profile)
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,

        /// Forget only the selected profile
        #[arg(long, action = ArgAction::SetTrue)]
        profile: bool,
    },
}

#[derive(clap::Args)]
struct ListingArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Reorder the page: popularity | title | year | rating
    #[arg(long)]
    sort: Option<SortKey>,

    /// grid | list
    #[arg(long, default_value = "grid")]
    view: ViewMode,
}

#[derive(Subcommand)]
enum DiscoverCommands {
    Popular(ListingArgs),
    /// Trending today, or this week with --week
    Trending {
        #[arg(long, action = ArgAction::SetTrue)]
        week: bool,

        #[command(flatten)]
        listing: ListingArgs,
    },
    TopRated(ListingArgs),
    NowPlaying(ListingArgs),
    Upcoming(ListingArgs),
    /// Movies in one genre (see `discover genres` for ids)
    Genre {
        genre_id: u32,

        #[command(flatten)]
        listing: ListingArgs,
    },
    /// Movies similar to a TMDB movie id
    Similar {
        movie_id: u64,

        #[command(flatten)]
        listing: ListingArgs,
    },
    /// Full details for a TMDB movie id
    Details { movie_id: u64 },
    /// TMDB genre list
    Genres,
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// Record a movie as watched
    Add { movie_id: u64 },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks sensitive data)
    Show {
        /// Reveal masked secrets
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Change one or more settings
    Set {
        /// Backend base URL
        #[arg(long, value_name = "URL")]
        api_base_url: Option<String>,

        /// Default number of recommendations
        #[arg(long, value_name = "N")]
        top_k: Option<u32>,

        /// backend | tmdb
        #[arg(long, value_name = "PROVIDER")]
        search_provider: Option<String>,

        #[arg(long, value_name = "URL")]
        tmdb_base_url: Option<String>,

        /// Stored in the credential store, not the config file
        #[arg(long, value_name = "KEY")]
        tmdb_api_key: Option<String>,

        /// Log to this file with daily rotation; "default" uses the log directory, "" logs to stderr again
        #[arg(long, value_name = "PATH")]
        log_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let config_file = paths.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    logging::init_logging(cli.verbose, cli.quiet, config.logging.file.as_deref())
        .map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    if let Err(e) = config.validate() {
        output.warn(format!("Configuration problem in {}: {}", config_file.display(), e));
    }

    let ctx = context::AppContext::load(paths, config)?;

    match cli.command {
        Commands::Landing => landing::run_landing(&output),
        Commands::Users { select, clear } => profiles::run_users(&ctx, select, clear, &output).await,
        Commands::Home { user_id, top_k } => home::run_home(&ctx, user_id, top_k, &output).await,
        Commands::Browse {
            query,
            genre,
            year,
            sort,
            view,
        } => browse::run_browse(
            FilterCriteria {
                query,
                genre,
                year,
                sort,
                view,
            },
            &output,
        ),
        Commands::Movies {
            page,
            limit,
            search,
            genres,
            min_rating,
            year_from,
            year_to,
        } => {
            let filters = MovieFilters {
                page: Some(page),
                limit: Some(limit),
                search,
                genres,
                min_rating,
                year_from,
                year_to,
            };
            catalog::run_movies(&ctx, filters, &output).await
        }
        Commands::Movie { movie_id } => catalog::run_movie(&ctx, movie_id, &output).await,
        Commands::Rate { movie_id, rating } => catalog::run_rate(&ctx, movie_id, rating, &output).await,
        Commands::Search { query } => search::run_search(&ctx, &query.join(" "), &output).await,
        Commands::Discover { cmd } => run_discover(&ctx, cmd, &output).await,
        Commands::History { user, cmd } => match cmd {
            Some(HistoryCommands::Add { movie_id }) => history::run_history_add(&ctx, movie_id, &output).await,
            None => history::run_history(&ctx, user, &output).await,
        },
        Commands::Login { email } => auth::run_login(&ctx, email, &output).await,
        Commands::Register { username, email } => auth::run_register(&ctx, username, email, &output).await,
        Commands::Logout => auth::run_logout(&ctx, &output).await,
        Commands::Whoami => auth::run_whoami(&ctx, &output).await,
        Commands::Config { cmd } => match cmd.unwrap_or(ConfigCommands::Show { full: false }) {
            ConfigCommands::Show { full } => config::show_config(&ctx, full, &output),
            ConfigCommands::Set {
                api_base_url,
                top_k,
                search_provider,
                tmdb_base_url,
                tmdb_api_key,
                log_file,
            } => config::set_config(
                &ctx,
                ConfigUpdate {
                    api_base_url,
                    top_k,
                    search_provider,
                    tmdb_base_url,
                    tmdb_api_key,
                    log_file,
                },
                &output,
            ),
        },
        Commands::Clear {
            all,
            credentials,
            profile,
        } => clear::run_clear(&ctx, all, credentials, profile, &output),
    }
}

async fn run_discover(ctx: &context::AppContext, cmd: DiscoverCommands, output: &output::Output) -> color_eyre::Result<()> {
    let (listing, args) = match cmd {
        DiscoverCommands::Details { movie_id } => return discover::run_details(ctx, movie_id, output).await,
        DiscoverCommands::Genres => return discover::run_genres(ctx, output).await,
        DiscoverCommands::Popular(args) => (Listing::Popular, args),
        DiscoverCommands::Trending { week, listing } => {
            let window = if week { TimeWindow::Week } else { TimeWindow::Day };
            (Listing::Trending(window), listing)
        }
        DiscoverCommands::TopRated(args) => (Listing::TopRated, args),
        DiscoverCommands::NowPlaying(args) => (Listing::NowPlaying, args),
        DiscoverCommands::Upcoming(args) => (Listing::Upcoming, args),
        DiscoverCommands::Genre { genre_id, listing } => (Listing::Genre(genre_id), listing),
        DiscoverCommands::Similar { movie_id, listing } => (Listing::Similar(movie_id), listing),
    };
    discover::run_listing(ctx, listing, args.page, args.sort, args.view, output).await
}
