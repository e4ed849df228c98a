//! JobPulse - job search with analytics over the last search
//!
//! A CLI tool that searches a job-listing API, keeps the results in a local
//! snapshot, and summarizes them into location, role, company and skill
//! rankings. A local Ollama model can fill in details postings leave out.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (missing credentials, network, unreadable snapshot, etc.)

mod analysis;
mod cli;
mod config;
mod enrich;
mod listing;
mod models;
mod report;
mod search;
mod snapshot;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, Command, OutputFormat};
use config::Config;
use enrich::EnricherConfig;
use indicatif::{ProgressBar, ProgressStyle};
use listing::Paginator;
use models::{JobRecord, Report, ReportMetadata, SearchFilters};
use search::{JobSearchClient, SearchError, SearchSettings};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed)
    if matches!(args.command, Command::InitConfig) {
        return handle_init_config();
    }

    init_logging(&args);

    info!("JobPulse v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args).await {
        error!("Command failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle init-config: generate a default .jobpulse.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(config::CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            config::CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", config::CONFIG_FILE);
    println!("   Set RAPIDAPI_KEY in the environment (or api.key in the file) before searching.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to set tracing subscriber: {}", e);
    }
}

/// Dispatch the subcommand.
async fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    match &args.command {
        Command::Search {
            query,
            pages,
            employment_type,
            date_posted,
            remote_only,
        } => {
            let filters = SearchFilters {
                employment_type: employment_type.map(Into::into),
                date_posted: (*date_posted).into(),
                remote_only: *remote_only,
            };
            let num_pages = pages.unwrap_or(config.api.num_pages);
            run_search(&config, query, num_pages, &filters, args.quiet).await
        }
        Command::List { page, per_page } => {
            let per_page = per_page.unwrap_or(config.listing.per_page);
            run_list(&config, *page, per_page)
        }
        Command::Show { id } => {
            let job = find_job(&config, id).await?;
            println!("{}", listing::format_job_details(&job));
            Ok(())
        }
        Command::Analyze { format, output } => {
            let output = output
                .clone()
                .unwrap_or_else(|| default_report_path(&config.general.report, *format));
            run_analyze(&config, *format, &output)
        }
        Command::Export { output } => {
            let output = output
                .clone()
                .unwrap_or_else(|| config.listing.export_file.clone());
            run_export(&config, &output)
        }
        Command::Enrich { id } => run_enrich(&config, id, args.quiet).await,
        Command::Suggest { query } => {
            let enricher = enrich::JobEnricher::new(EnricherConfig::from(&config.model))?;
            let suggestions = enricher.suggest(query).await;
            if suggestions.is_empty() {
                println!("No suggestions for '{}'.", query);
            }
            for suggestion in suggestions {
                println!("{}", suggestion);
            }
            Ok(())
        }
        Command::InitConfig => handle_init_config(),
    }
}

/// Search, save the snapshot and print the first page.
async fn run_search(
    config: &Config,
    query: &str,
    num_pages: u32,
    filters: &SearchFilters,
    quiet: bool,
) -> Result<()> {
    let client = JobSearchClient::new(SearchSettings::from(&config.api))?;

    let progress = (!quiet).then(|| spinner(format!("Searching for '{}'...", query)));
    let result = client.search(query, num_pages, filters).await;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    let jobs = match result {
        Ok(jobs) => jobs,
        Err(e @ SearchError::NotConfigured(_)) => {
            return Err(e).context("Set RAPIDAPI_KEY (or api.key in .jobpulse.toml) to search");
        }
        Err(e) => return Err(e.into()),
    };

    snapshot::save(&config.general.snapshot, &jobs)?;
    info!("Snapshot saved to {}", config.general.snapshot.display());

    if jobs.is_empty() {
        println!("No jobs found for '{}'.", query);
        return Ok(());
    }

    println!("🔎 Found {} jobs for '{}'\n", jobs.len(), query);
    print_page(&jobs, &Paginator::new(jobs.len(), config.listing.per_page));
    Ok(())
}

fn run_list(config: &Config, page: usize, per_page: usize) -> Result<()> {
    let jobs = load_saved_jobs(&config.general.snapshot)?;
    if jobs.is_empty() {
        println!("The last search returned no jobs.");
        return Ok(());
    }

    let mut pager = Paginator::new(jobs.len(), per_page);
    if !pager.go_to(page) {
        anyhow::bail!(
            "Page {} does not exist (the last search has {} pages)",
            page,
            pager.total_pages()
        );
    }

    print_page(&jobs, &pager);
    Ok(())
}

fn print_page(jobs: &[JobRecord], pager: &Paginator) {
    let offset = pager.range().start;
    for (i, job) in pager.page_slice(jobs).iter().enumerate() {
        println!("{}", listing::format_job_card(offset + i + 1, job));
    }

    println!("Page {} of {}", pager.current_page(), pager.total_pages());
    if pager.has_prev() {
        println!("Prev: jobpulse list --page {}", pager.current_page() - 1);
    }
    if pager.has_next() {
        println!("Next: jobpulse list --page {}", pager.current_page() + 1);
    }
}

/// Summarize the snapshot and write the report.
fn run_analyze(config: &Config, format: OutputFormat, output: &Path) -> Result<()> {
    let snapshot_path = &config.general.snapshot;

    let jobs = match snapshot::load(snapshot_path) {
        Ok(Some(jobs)) => jobs,
        Ok(None) => {
            warn!("No snapshot at {}", snapshot_path.display());
            Vec::new()
        }
        Err(e) => {
            warn!("Ignoring unreadable snapshot: {:#}", e);
            Vec::new()
        }
    };

    let summary = analysis::summarize(&jobs);
    let report = Report {
        metadata: ReportMetadata {
            snapshot: snapshot_path.display().to_string(),
            generated_at: Utc::now(),
        },
        summary,
    };

    let content = match format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };
    report::write_report(&content, output)?;

    let summary = &report.summary;
    println!("\n📊 Analytics Summary:");
    println!("   Jobs analyzed: {}", summary.total_jobs);
    println!("   Top location: {}", summary.top_location().unwrap_or("N/A"));
    println!("   Most common role: {}", summary.top_role().unwrap_or("N/A"));
    println!("   Remote: {}%", summary.remote_percentage);
    if !summary.top_skills.is_empty() {
        let skills: Vec<&str> = summary.top_skills.iter().map(|s| s.skill.as_str()).collect();
        println!("   Top skills: {}", skills.join(", "));
    }
    println!("\n✅ Report saved to: {}", output.display());

    Ok(())
}

fn run_export(config: &Config, output: &Path) -> Result<()> {
    let jobs = load_saved_jobs(&config.general.snapshot)?;
    if jobs.is_empty() {
        anyhow::bail!("Nothing to export: the last search returned no jobs");
    }

    listing::export_csv_file(output, &jobs)?;
    println!("✅ Exported {} jobs to {}", jobs.len(), output.display());
    Ok(())
}

async fn run_enrich(config: &Config, id: &str, quiet: bool) -> Result<()> {
    let job = find_job(config, id).await?;
    let enricher = enrich::JobEnricher::new(EnricherConfig::from(&config.model))?;

    let progress = (!quiet).then(|| spinner(format!("Asking {}...", config.model.name)));
    let result = enricher.enrich(&job).await;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    let enrichment = result.context("Enrichment failed")?;

    println!("✨ {} at {}\n", job.title, job.company_or_na());
    println!("   Salary range:   {}", enrichment.suggested_salary_range);
    println!("   Company rating: {}", enrichment.suggested_company_rating);
    println!("   Perks:          {}", enrichment.additional_perks);
    Ok(())
}

/// Look a posting up in the snapshot, then fall back to the API.
async fn find_job(config: &Config, id: &str) -> Result<JobRecord> {
    match snapshot::load(&config.general.snapshot) {
        Ok(Some(jobs)) => {
            if let Some(job) = jobs.into_iter().find(|j| j.id == id) {
                return Ok(job);
            }
        }
        Ok(None) => {}
        Err(e) => warn!("Ignoring unreadable snapshot: {:#}", e),
    }

    debug!("Job {} not in snapshot, asking the API", id);
    let client = JobSearchClient::new(SearchSettings::from(&config.api))?;
    client
        .job_details(id)
        .await?
        .with_context(|| format!("No job with id {}", id))
}

/// Snapshot jobs, or an error telling the user to search first.
fn load_saved_jobs(path: &Path) -> Result<Vec<JobRecord>> {
    snapshot::load(path)?.with_context(|| {
        format!(
            "No saved search at {}. Run `jobpulse search <QUERY>` first.",
            path.display()
        )
    })
}

fn default_report_path(configured: &Path, format: OutputFormat) -> PathBuf {
    match format {
        OutputFormat::Json => configured.with_extension("json"),
        OutputFormat::Markdown => configured.to_path_buf(),
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", config::CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
