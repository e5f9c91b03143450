//! WBB CLI - site content client.
//!
//! Provides commands for:
//! - `summary`: Load every collection and report what was fetched
//! - `menu`, `posts`, `gallery`, `footer`: Browse loaded collections
//! - `page`, `post`: Fetch a single page or post with related content
//! - `pdf`: Download a post attachment
//! - `lang`: Show or toggle the session language

mod commands;
mod context;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    FooterArgs, GalleryArgs, LangArgs, MenuArgs, PageArgs, PdfArgs, PostArgs, PostsArgs,
    SummaryArgs,
};
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WBB - bilingual site content client.
#[derive(Parser)]
#[command(name = "wbb", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Default)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover wbb.toml).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Content API base URL (overrides config and WBB_API_URL).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Enable verbose output (show load timing and fetch warnings).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load all content and print a summary.
    Summary(SummaryArgs),
    /// Print the navigation menu.
    Menu(MenuArgs),
    /// List posts, optionally from one bucket.
    Posts(PostsArgs),
    /// Show a page by route.
    Page(PageArgs),
    /// Show a post by slug.
    Post(PostArgs),
    /// Download a PDF attachment.
    Pdf(PdfArgs),
    /// List gallery items.
    Gallery(GalleryArgs),
    /// Print footer and social links.
    Footer(FooterArgs),
    /// Show or toggle the session language.
    Lang(LangArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let global = &cli.global;
    let result = match cli.command {
        Commands::Summary(args) => args.execute(global, VERSION),
        Commands::Menu(args) => args.execute(global, VERSION),
        Commands::Posts(args) => args.execute(global, VERSION),
        Commands::Page(args) => args.execute(global, VERSION),
        Commands::Post(args) => args.execute(global, VERSION),
        Commands::Pdf(args) => args.execute(global, VERSION),
        Commands::Gallery(args) => args.execute(global, VERSION),
        Commands::Footer(args) => args.execute(global, VERSION),
        Commands::Lang(args) => args.execute(global, VERSION),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
