//! CLI binary for faculty-finder.

use std::future::Future;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use faculty_finder::{AppConfig, SqliteRecordStore, app};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Faculty Finder: crawl a department directory and search faculty by research interest.
#[derive(Parser)]
#[command(name = "faculty-finder", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Discover directory pages and store faculty cards.
    Crawl,

    /// Fetch stored profile pages and extract research text.
    Extract,

    /// Crawl, then extract.
    Index,

    /// Rank stored faculty against a query.
    Search {
        /// Free-text research query.
        query: String,

        /// 1-based result page.
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Results per page (defaults to the configured page size).
        #[arg(long)]
        page_size: Option<usize>,

        /// Print the result page as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for queries until `exit` or end of input.
    Interactive,

    /// Show record store counts.
    Stats,

    /// Write a default configuration file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so search output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("faculty_finder=info,faculty_search=info")),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config;

    match cli.command {
        Command::Crawl => {
            let (config, store) = open(config_path)?;
            if let Some(report) = until_interrupted(app::crawl(&config, &store)).await? {
                println!("{}", app::format_crawl_report(&report));
            }
        }
        Command::Extract => {
            let (config, store) = open(config_path)?;
            if let Some(report) = until_interrupted(app::extract(&config, &store)).await? {
                println!("{}", app::format_extract_report(&report));
            }
        }
        Command::Index => {
            let (config, store) = open(config_path)?;
            if let Some((crawled, extracted)) =
                until_interrupted(app::index(&config, &store)).await?
            {
                println!("{}", app::format_crawl_report(&crawled));
                println!("{}", app::format_extract_report(&extracted));
            }
        }
        Command::Search {
            query,
            page,
            page_size,
            json,
        } => {
            let (config, store) = open(config_path)?;
            let results = app::search(&config, &store, &query, page, page_size)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print!("{}", app::format_page(&query, &results));
            }
        }
        Command::Interactive => {
            let (config, store) = open(config_path)?;
            run_interactive(&config, &store)?;
        }
        Command::Stats => {
            let (_config, store) = open(config_path)?;
            let stats = store.stats()?;
            println!("Records:           {}", stats.records);
            println!("With research:     {}", stats.with_research);
            println!("Empty research:    {}", stats.empty_research);
            println!("Not yet extracted: {}", stats.pending);
            println!("Distinct terms:    {}", stats.distinct_terms);
        }
        Command::InitConfig { force } => init_config(config_path, force)?,
    }

    Ok(())
}

/// Load and validate configuration, then open the record store.
fn open(config_path: Option<PathBuf>) -> anyhow::Result<(AppConfig, SqliteRecordStore)> {
    let config = AppConfig::load(config_path.as_deref())?;
    config.validate()?;
    let store = app::open_store(&config)?;
    info!(path = %config.store.database_path.display(), "record store ready");
    Ok((config, store))
}

/// Run a pipeline stage, stopping early on Ctrl+C.
///
/// Records stored before the interrupt are kept.
async fn until_interrupted<T>(
    stage: impl Future<Output = faculty_finder::Result<T>>,
) -> anyhow::Result<Option<T>> {
    tokio::select! {
        outcome = stage => Ok(Some(outcome?)),
        _ = tokio::signal::ctrl_c() => {
            info!("received Ctrl+C, stopping");
            Ok(None)
        }
    }
}

fn init_config(path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(AppConfig::default_config_path);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    AppConfig::default().save_to_file(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

fn run_interactive(config: &AppConfig, store: &SqliteRecordStore) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = std::io::stdout();

    loop {
        println!("\nEnter a query to search for faculty research (or type 'exit' to quit):");
        print!("> ");
        stdout.flush()?;
        let Some(query) = lines.next().transpose()? else {
            break;
        };
        let query = query.trim().to_owned();
        if query.eq_ignore_ascii_case("exit") {
            break;
        }

        println!("Enter the page number to view results:");
        print!("> ");
        stdout.flush()?;
        let page = match lines.next().transpose()? {
            Some(line) => line.trim().parse::<usize>().unwrap_or_else(|_| {
                println!("Invalid page number. Defaulting to page 1.");
                1
            }),
            None => 1,
        };

        let results = app::search(config, store, &query, page, None)?;
        print!("{}", app::format_page(&query, &results));
    }

    Ok(())
}
