#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use treediff_core::http::{require_token, DEFAULT_API_URL};
use treediff_core::{
    ConsoleReporter, DiffAlgorithm, ErrorPolicy, GitHubContentsClient, JsonReporter, Mode,
    RepositoryDescriptor, Reporter, RunOptions, DEFAULT_CONFIG_FILE, DEFAULT_MAX_PARALLEL,
};

/// How per-file outcomes are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Headers and fenced diff blocks
    Text,
    /// One JSON object per event
    Json,
}

#[derive(Parser)]
#[command(
    name = "treediff",
    version,
    about = "Compare or sync a local tree against a GitHub repository"
)]
struct Cli {
    /// Compare local files against the remote instead of downloading them
    #[arg(long)]
    compare: bool,

    /// Print the full diff for every differing file
    #[arg(long)]
    verbose: bool,

    /// Walk only this remote path instead of the configured roots
    #[arg(long)]
    path: Option<String>,

    /// Repository descriptor (JSON, or YAML by extension)
    #[arg(long, env = "TREEDIFF_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Local directory mirroring the repository root
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Maximum concurrent per-file operations
    #[arg(long, env = "TREEDIFF_MAX_PARALLEL", default_value_t = DEFAULT_MAX_PARALLEL)]
    max_parallel: usize,

    /// Diff algorithm: positional or aligned
    #[arg(long, default_value = "positional")]
    diff: DiffAlgorithm,

    /// Report every failure instead of only the first
    #[arg(long)]
    all_errors: bool,

    /// Disable coloured diff output
    #[arg(long)]
    no_color: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// GitHub token for API access
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// GitHub API root
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e:#}");
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let token = require_token(cli.token)?;

    let descriptor = RepositoryDescriptor::load(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    let options = RunOptions {
        mode: if cli.compare { Mode::Compare } else { Mode::Sync },
        verbose: cli.verbose,
        root_dir: cli.root,
        max_parallel: cli.max_parallel,
        diff_algorithm: cli.diff,
        error_policy: if cli.all_errors {
            ErrorPolicy::Aggregate
        } else {
            ErrorPolicy::FirstError
        },
    };

    let reporter: Arc<dyn Reporter> = match cli.format {
        OutputFormat::Json => Arc::new(JsonReporter::stdout()),
        OutputFormat::Text => Arc::new(ConsoleReporter::from_options(&options, !cli.no_color)),
    };

    let remote = GitHubContentsClient::new(cli.api_url, descriptor.name.clone(), token);
    log::debug!("using {:?}", remote);

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to create runtime")?;

    rt.block_on(treediff_core::run(
        &descriptor,
        &options,
        cli.path.as_deref(),
        Arc::new(remote),
        reporter,
    ))?;

    Ok(())
}
