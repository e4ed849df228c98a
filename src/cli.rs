//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::{DatePosted, EmploymentType};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// JobPulse - job search with analytics over your last search
///
/// Search a job-listing API, page through the results, export them,
/// ask a local model to fill in missing details, and see which
/// locations, roles, companies and skills dominate.
///
/// Examples:
///   jobpulse search "rust developer" --remote-only
///   jobpulse list --page 2
///   jobpulse analyze --format json --output analytics.json
///   jobpulse enrich <JOB_ID>
///   jobpulse init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    ///
    /// If not specified, looks for .jobpulse.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// File holding the last search results
    #[arg(long, value_name = "FILE", env = "JOBPULSE_SNAPSHOT", global = true)]
    pub snapshot: Option<PathBuf>,

    /// RapidAPI key for the job search API
    #[arg(long, env = "RAPIDAPI_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// RapidAPI host for the job search API
    #[arg(long, env = "RAPIDAPI_HOST", global = true)]
    pub api_host: Option<String>,

    /// Ollama API endpoint URL
    #[arg(long, env = "OLLAMA_URL", global = true)]
    pub ollama_url: Option<String>,

    /// Ollama model used for enrichment and suggestions
    #[arg(short, long, env = "JOBPULSE_MODEL", global = true)]
    pub model: Option<String>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search for jobs and save the results as the last search
    Search {
        /// Search terms, e.g. "frontend developer in berlin"
        query: String,

        /// Result pages to request (defaults to the config value)
        #[arg(long, value_name = "COUNT")]
        pages: Option<u32>,

        /// Only this employment type
        #[arg(long, value_name = "TYPE")]
        employment_type: Option<JobTypeArg>,

        /// Maximum posting age
        #[arg(long, value_name = "WHEN", default_value = "all")]
        date_posted: PostedWithinArg,

        /// Only remote postings
        #[arg(long)]
        remote_only: bool,
    },

    /// Show one page of the last search results
    List {
        /// Page number, starting at 1
        #[arg(long, default_value = "1")]
        page: usize,

        /// Postings per page (defaults to the config value)
        #[arg(long, value_name = "COUNT")]
        per_page: Option<usize>,
    },

    /// Show the full details of one posting
    Show {
        /// Job id (from `list`)
        id: String,
    },

    /// Summarize the last search results
    Analyze {
        /// Output format (markdown, json)
        #[arg(long, default_value = "markdown", value_name = "FORMAT")]
        format: OutputFormat,

        /// Output file path for the report (defaults to the config value)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Export the last search results as CSV
    Export {
        /// Output CSV path (defaults to the config value)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Ask the model for salary, rating and perks a posting left out
    Enrich {
        /// Job id (from `list`)
        id: String,
    },

    /// Suggest complete search queries for a partial one
    Suggest {
        /// Partial query
        query: String,
    },

    /// Generate a default .jobpulse.toml configuration file
    InitConfig,
}

/// Output format for the analytics report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

/// Employment type for --employment-type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum JobTypeArg {
    Fulltime,
    Parttime,
    Contractor,
    Intern,
}

impl From<JobTypeArg> for EmploymentType {
    fn from(arg: JobTypeArg) -> Self {
        match arg {
            JobTypeArg::Fulltime => EmploymentType::Fulltime,
            JobTypeArg::Parttime => EmploymentType::Parttime,
            JobTypeArg::Contractor => EmploymentType::Contractor,
            JobTypeArg::Intern => EmploymentType::Intern,
        }
    }
}

/// Posting age for --date-posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PostedWithinArg {
    All,
    Today,
    #[value(name = "3days")]
    ThreeDays,
    Week,
    Month,
}

impl From<PostedWithinArg> for DatePosted {
    fn from(arg: PostedWithinArg) -> Self {
        match arg {
            PostedWithinArg::All => DatePosted::All,
            PostedWithinArg::Today => DatePosted::Today,
            PostedWithinArg::ThreeDays => DatePosted::ThreeDays,
            PostedWithinArg::Week => DatePosted::Week,
            PostedWithinArg::Month => DatePosted::Month,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref url) = self.ollama_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("Ollama URL must start with 'http://' or 'https://'".to_string());
            }
        }

        match &self.command {
            Command::Search { query, pages, .. } => {
                if query.trim().is_empty() {
                    return Err("Search query cannot be empty".to_string());
                }
                if *pages == Some(0) {
                    return Err("Pages must be at least 1".to_string());
                }
            }
            Command::List { page, per_page } => {
                if *page == 0 {
                    return Err("Page numbers start at 1".to_string());
                }
                if *per_page == Some(0) {
                    return Err("Per-page count must be at least 1".to_string());
                }
            }
            Command::Show { id } | Command::Enrich { id } => {
                if id.trim().is_empty() {
                    return Err("Job id cannot be empty".to_string());
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
