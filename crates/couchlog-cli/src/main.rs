use clap::{ArgAction, Parser, Subcommand};
use commands::{item, list, manage, session, stats};
use watchlist_models::WatchStatus;

mod commands;
mod context;
mod logging;
mod output;
mod views;

#[derive(Parser)]
#[command(name = "couchlog")]
#[command(about = "couchlog - track dramas, movies, and anime on your catalog server")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv, -vvv)
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
    /// Show and change one item's tracking status
    #[command(long_about = "Show whether a content item is on your watchlist and with which status. With --menu, opens the status picker listing all four statuses plus removal, exactly like the dropdown on the site.")]
    Item {
        /// Content id as listed by the catalog
        content_id: String,

        /// Open the interactive status menu
        #[arg(long, action = ArgAction::SetTrue)]
        menu: bool,
    },

    /// Add a content item to your watchlist
    #[command(long_about = "Add a content item to your watchlist with an initial status (defaults to want_to_watch). Adding an item that is already tracked is reported as a notice with its current status, not an error.")]
    Add {
        /// Content id as listed by the catalog
        content_id: String,

        /// Initial status: want_to_watch, watching, completed, dropped
        #[arg(long, default_value = "want_to_watch")]
        status: WatchStatus,

        /// Total episode count, when the content has one
        #[arg(long, value_name = "N")]
        episodes: Option<u32>,
    },

    /// Set the status of a tracked item
    #[command(long_about = "Set the tracking status of an item already on your watchlist. Any status can be picked from any other; completed and dropped entries stay editable.")]
    Set {
        /// Content id as listed by the catalog
        content_id: String,

        /// New status: want_to_watch, watching, completed, dropped
        status: WatchStatus,
    },

    /// Record episode progress for an item you are watching
    Progress {
        /// Content id as listed by the catalog
        content_id: String,

        /// Episodes watched so far
        episodes: u32,
    },

    /// Remove an item from your watchlist
    #[command(long_about = "Remove an item from your watchlist. Removing an item that is not tracked (or was already removed) succeeds quietly.")]
    Remove {
        /// Content id as listed by the catalog
        content_id: String,
    },

    /// Browse your watchlist
    #[command(long_about = "List your watchlist with per-status filter tabs and live counts. Pages hold 20 items by default; change [list].page_size in config.toml to adjust.")]
    List {
        /// Only show entries with this status
        #[arg(long)]
        status: Option<WatchStatus>,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Show watchlist statistics
    #[command(long_about = "Show per-status counts, total tracked items, your completion rate, and the most recently updated entries.")]
    Stats,

    /// Store the session token for your catalog account
    #[command(long_about = "Store the bearer token of your catalog session. The token is read from --token or prompted for without echo, and kept in session.toml next to the config.")]
    Login {
        /// Session token (if not provided, will prompt)
        #[arg(long)]
        token: Option<String>,

        /// Display name to remember alongside the token
        #[arg(long)]
        username: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show the signed-in session
    Whoami,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let ctx = context::AppContext::load().map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let log_file = ctx.config.logging.as_ref().and_then(|l| l.file.clone());
    logging::init_logging(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    // Create output handler
    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Item { content_id, menu } => item::run_item(&ctx, &content_id, menu, &output).await,
        Commands::Add {
            content_id,
            status,
            episodes,
        } => manage::run_add(&ctx, &content_id, status, episodes, &output).await,
        Commands::Set { content_id, status } => {
            manage::run_set(&ctx, &content_id, status, &output).await
        }
        Commands::Progress {
            content_id,
            episodes,
        } => manage::run_progress(&ctx, &content_id, episodes, &output).await,
        Commands::Remove { content_id } => manage::run_remove(&ctx, &content_id, &output).await,
        Commands::List { status, page } => list::run_list(&ctx, status, page, &output).await,
        Commands::Stats => stats::run_stats(&ctx, &output).await,
        Commands::Login { token, username } => session::run_login(&ctx, token, username, &output),
        Commands::Logout => session::run_logout(&ctx, &output),
        Commands::Whoami => session::run_whoami(&ctx, &output),
    }
}
