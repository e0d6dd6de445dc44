use anyhow::Result;
use clap::{Parser, ValueEnum};
use get_papers_list::config::{find_config_file, load_config};
use get_papers_list::models::SearchQuery;
use get_papers_list::pipeline::{run, RunOptions};
use get_papers_list::report::{ConsoleFormat, Destination};
use get_papers_list::sources::PubMedSource;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Find PubMed papers with at least one author affiliated with a company
#[derive(Parser, Debug)]
#[command(name = "get-papers-list")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find PubMed papers with non-academic (company) authors", long_about = None)]
struct Cli {
    /// PubMed search query (full PubMed query syntax is supported)
    #[arg(value_parser = parse_query)]
    query: String,

    /// Print progress information while running
    #[arg(long, short)]
    debug: bool,

    /// Write the results to this CSV file instead of printing them
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Maximum number of papers to retrieve
    #[arg(long, short)]
    max_results: Option<usize>,

    /// Console output format (ignored with --file)
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Enable verbose logging (-v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(long, short)]
    quiet: bool,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

impl OutputFormat {
    fn resolve(self, is_terminal: bool) -> ConsoleFormat {
        match self {
            OutputFormat::Auto if is_terminal => ConsoleFormat::Table,
            OutputFormat::Auto => ConsoleFormat::Json,
            OutputFormat::Table => ConsoleFormat::Table,
            OutputFormat::Json => ConsoleFormat::Json,
            OutputFormat::Plain => ConsoleFormat::Plain,
        }
    }
}

fn parse_query(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("query must not be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

impl Cli {
    fn destination(&self, is_terminal: bool) -> Destination {
        match &self.file {
            Some(path) => Destination::File(path.clone()),
            None => Destination::Console(self.output.resolve(is_terminal)),
        }
    }

    fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("get_papers_list={}", cli.log_level())),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = cli.config.clone().or_else(find_config_file);
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }
    let mut config = load_config(config_path.as_deref())?;

    if let Some(max) = cli.max_results {
        config.search.max_results = max;
    }
    if let Some(timeout) = cli.timeout {
        config.http.timeout_secs = timeout;
    }

    let source = PubMedSource::new(&config)?;
    let options = RunOptions {
        query: SearchQuery::new(&cli.query).max_results(config.search.max_results),
        destination: cli.destination(std::io::stdout().is_terminal()),
        debug: cli.debug,
    };

    let mut stdout = std::io::stdout().lock();
    let outcome = run(&source, &options, &mut stdout).await?;
    tracing::debug!(?outcome, "Run finished");

    Ok(())
}
