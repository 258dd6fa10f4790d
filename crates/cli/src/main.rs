mod cmd;
mod logging;

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "pkms",
    version,
    about = "Crawl frontmatter-linked markdown notes and publish them as a static site"
)]
struct Cli {
    /// Path to pkmsite.toml (defaults to ./pkmsite.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true, action = ArgAction::SetTrue, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors to stderr
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every document reachable from the root document
    Discover(DiscoverArgs),

    /// Generate the static site for the root document
    Build(BuildArgs),

    /// Render a single document to HTML on stdout
    Render(RenderArgs),

    /// Validate configuration and print resolved settings
    Doctor,
}

#[derive(Debug, Args)]
pub struct DiscoverArgs {
    /// Root document, relative to the source directory
    pub root: Option<String>,

    /// Directory the notes live in
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Root document, relative to the source directory
    pub root: Option<String>,

    /// Directory the notes live in
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Directory the site is written to
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// HTML template file
    #[arg(long)]
    pub template: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Markdown file to render
    pub file: PathBuf,

    /// HTML template file
    #[arg(long)]
    pub template: Option<PathBuf>,
}

/// Stderr log level requested with `-v` / `-q`.
fn log_level(cli: &Cli) -> Option<String> {
    if cli.verbose {
        Some("debug".to_string())
    } else if cli.quiet {
        Some("error".to_string())
    } else {
        None
    }
}

fn main() {
    let cli = Cli::parse();
    let log_level = log_level(&cli);
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Discover(args) => cmd::discover::run(config, log_level, args),
        Commands::Build(args) => cmd::build::run(config, log_level, args),
        Commands::Render(args) => cmd::render::run(config, log_level, args),
        Commands::Doctor => cmd::doctor::run(config, log_level),
    }

    logging::flush();
}
