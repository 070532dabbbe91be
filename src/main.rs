use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mosscraper::{
    config::Config,
    dataset::Dataset,
    fetch::HttpFetcher,
    pipeline,
    reconcile::{self, Coverage},
};
use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Collect JWST NIRSpec/MOS programs and their visit status.
#[derive(Parser)]
#[command(name = "mosscraper", version)]
struct Cli {
    /// YAML run configuration; built-in defaults when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape the GO/GTO/DDT listings into the basic-info CSV.
    Programs {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Fetch visit status for every ID in the basic-info CSV.
    Status {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Check that every ID in BASIC also appears in STATUS.
    Check { basic: PathBuf, status: PathBuf },
    /// programs, status and check in sequence.
    Run,
}

fn main() -> Result<ExitCode> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mosscraper=info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cli = Cli::parse();

    // ─── 2) configuration ────────────────────────────────────────────
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    info!(output_dir = %config.output_dir.display(), "startup");

    match cli.command {
        Command::Check { basic, status } => check(&basic, &status),
        Command::Programs { output } => {
            let fetcher = HttpFetcher::new().context("building HTTP client")?;
            let output = output.unwrap_or_else(|| config.basic_info_path());
            programs(&fetcher, &config, &output)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Status { input, output } => {
            let fetcher = HttpFetcher::new().context("building HTTP client")?;
            let input = input.unwrap_or_else(|| config.basic_info_path());
            let output = output.unwrap_or_else(|| config.status_path());
            let programs = Dataset::load(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            status(&fetcher, &config, &programs, &output)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Run => {
            let fetcher = HttpFetcher::new().context("building HTTP client")?;
            let basic = config.basic_info_path();
            let status_path = config.status_path();
            let programs = programs(&fetcher, &config, &basic)?;
            status(&fetcher, &config, &programs, &status_path)?;
            check(&basic, &status_path)
        }
    }
}

fn programs(fetcher: &HttpFetcher, config: &Config, output: &Path) -> Result<Dataset> {
    let programs = pipeline::collect_programs(fetcher, config);
    save(&programs, output)?;
    Ok(programs)
}

fn status(
    fetcher: &HttpFetcher,
    config: &Config,
    programs: &Dataset,
    output: &Path,
) -> Result<()> {
    let ids = pipeline::proposal_ids(programs)?;
    info!(proposals = ids.len(), "fetching status");
    let run = pipeline::collect_status(fetcher, config, &ids);
    if !run.exhausted.is_empty() {
        warn!(ids = ?run.exhausted, "status unavailable after retries");
    }
    if !run.failed.is_empty() {
        warn!(ids = ?run.failed, "status lookups failed");
    }
    save(&run.dataset, output)
}

fn save(dataset: &Dataset, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    dataset
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(rows = dataset.len(), path = %path.display(), "wrote csv");
    Ok(())
}

fn check(basic: &Path, status: &Path) -> Result<ExitCode> {
    let coverage = reconcile::reconcile_files(basic, status).with_context(|| {
        format!("comparing {} with {}", basic.display(), status.display())
    })?;
    println!("{}", coverage);
    Ok(match coverage {
        Coverage::Complete => ExitCode::SUCCESS,
        Coverage::Missing(_) => ExitCode::FAILURE,
    })
}
