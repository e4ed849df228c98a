//! Data models for jobpulse.
//!
//! This module contains the job record shape shared by the search client and
//! the snapshot file, the search filters, the analytics summary, and the
//! report wrapper used for rendering.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Deserialize a field leniently: `null` or a value of the wrong JSON type
/// becomes the type's default instead of failing the whole record.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// String items of one highlight category.
///
/// Arrays contribute their string elements; a bare string counts as one
/// item. Numbers, booleans and nested objects are deliberately skipped, so
/// they reach neither skill scanning nor `show` output.
fn highlight_items(value: &Value) -> Vec<&str> {
    match value {
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        Value::String(s) => vec![s.as_str()],
        _ => Vec::new(),
    }
}

/// A single job posting.
///
/// Field names serialize in camelCase so snapshots written by the web client
/// (`companyLogo`, `datePosted`, ...) load unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    /// Provider job id.
    #[serde(default, deserialize_with = "lenient")]
    pub id: String,
    /// Posting title.
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    /// Employer name.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub company: Option<String>,
    /// Employer logo URL.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub company_logo: Option<String>,
    /// Free-text location, e.g. "Austin, TX" or "Remote".
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    /// Country code.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub country: Option<String>,
    /// Posting timestamp (RFC 3339 when it came from the API).
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_posted: Option<String>,
    /// Description, possibly containing HTML.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// Where to apply.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub apply_url: Option<String>,
    /// Provider employment type, e.g. "FULLTIME".
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub employment_type: Option<String>,
    /// Highlight categories ("Qualifications", "Benefits", ...) in provider order.
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Map::is_empty"
    )]
    pub highlights: Map<String, Value>,
}

impl JobRecord {
    /// Whether the location mentions remote work (case-insensitive).
    pub fn is_remote(&self) -> bool {
        self.location
            .as_deref()
            .is_some_and(|loc| loc.to_lowercase().contains("remote"))
    }

    /// Highlight categories with their string items, in provider order.
    pub fn highlight_sections(&self) -> impl Iterator<Item = (&str, Vec<&str>)> + '_ {
        self.highlights
            .iter()
            .map(|(category, value)| (category.as_str(), highlight_items(value)))
    }

    /// All highlight strings, category by category.
    pub fn highlight_values(&self) -> impl Iterator<Item = &str> + '_ {
        self.highlights.values().flat_map(highlight_items)
    }

    /// Company name or a placeholder for display.
    pub fn company_or_na(&self) -> &str {
        self.company.as_deref().unwrap_or("N/A")
    }

    /// Location or a placeholder for display.
    pub fn location_or_default(&self) -> &str {
        self.location.as_deref().unwrap_or("Not specified")
    }
}

/// Employment type filter accepted by the search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EmploymentType {
    Fulltime,
    Parttime,
    Contractor,
    Intern,
}

impl EmploymentType {
    /// Value sent as `employment_types`.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            EmploymentType::Fulltime => "FULLTIME",
            EmploymentType::Parttime => "PARTTIME",
            EmploymentType::Contractor => "CONTRACTOR",
            EmploymentType::Intern => "INTERN",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmploymentType::Fulltime => write!(f, "Full-time"),
            EmploymentType::Parttime => write!(f, "Part-time"),
            EmploymentType::Contractor => write!(f, "Contract"),
            EmploymentType::Intern => write!(f, "Internship"),
        }
    }
}

/// Posting age filter accepted by the search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DatePosted {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "3days")]
    ThreeDays,
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "month")]
    Month,
}

impl DatePosted {
    /// Value sent as `date_posted`.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            DatePosted::All => "all",
            DatePosted::Today => "today",
            DatePosted::ThreeDays => "3days",
            DatePosted::Week => "week",
            DatePosted::Month => "month",
        }
    }
}

/// Filters applied server-side by the search API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Restrict to one employment type; `None` means all types.
    pub employment_type: Option<EmploymentType>,
    /// Maximum posting age.
    pub date_posted: DatePosted,
    /// Only remote postings.
    pub remote_only: bool,
}

impl SearchFilters {
    /// Query parameters for these filters, skipping the "all" values.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(kind) = self.employment_type {
            params.push(("employment_types", kind.as_api_str().to_string()));
        }
        if self.date_posted != DatePosted::All {
            params.push(("date_posted", self.date_posted.as_api_str().to_string()));
        }
        if self.remote_only {
            params.push(("remote_jobs_only", "true".to_string()));
        }

        params
    }
}

/// A location and how many postings mention it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCount {
    pub location: String,
    pub count: usize,
}

/// A canonical role and how many titles classified into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCount {
    pub role: String,
    pub count: usize,
}

/// A company and how many postings it has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyCount {
    pub company: String,
    pub count: usize,
}

/// A skill and how many postings mention it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

/// Aggregate analytics over a list of postings.
///
/// `Default` is the zero summary produced for an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    /// Number of postings analyzed.
    pub total_jobs: usize,
    /// Up to 5 cities, most frequent first.
    pub top_locations: Vec<LocationCount>,
    /// Up to 5 canonical roles, most frequent first.
    pub top_roles: Vec<RoleCount>,
    /// Share of remote postings, 0-100.
    pub remote_percentage: u8,
    /// Up to 5 companies, most frequent first.
    pub top_companies: Vec<CompanyCount>,
    /// Up to 10 skills, most frequent first.
    pub top_skills: Vec<SkillCount>,
}

impl AnalyticsSummary {
    /// True for the zero summary.
    pub fn is_empty(&self) -> bool {
        self.total_jobs == 0
    }

    pub fn top_location(&self) -> Option<&str> {
        self.top_locations.first().map(|l| l.location.as_str())
    }

    pub fn top_role(&self) -> Option<&str> {
        self.top_roles.first().map(|r| r.role.as_str())
    }
}

/// AI suggestions for details a posting left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrichment {
    pub suggested_salary_range: String,
    pub suggested_company_rating: String,
    pub additional_perks: String,
}

/// Metadata about an analytics report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Snapshot file the postings were loaded from.
    pub snapshot: String,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
}

/// The analytics report: metadata plus the summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub summary: AnalyticsSummary,
}
