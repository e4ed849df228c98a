//! JSearch API client.
//!
//! Fetches postings from the RapidAPI-hosted JSearch service and maps the
//! provider's snake_case records onto [`JobRecord`].

use crate::models::{JobRecord, SearchFilters};
use crate::search::error::SearchError;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Placeholder shipped in sample env files; treated as "no key".
const PLACEHOLDER_KEY: &str = "your-rapidapi-key";

/// Settings for the search client.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub host: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl From<&crate::config::ApiConfig> for SearchSettings {
    fn from(config: &crate::config::ApiConfig) -> Self {
        Self {
            host: config.host.clone(),
            api_key: config.key.clone(),
            timeout_seconds: config.timeout_seconds,
        }
    }
}

/// One posting as returned by JSearch.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiJob {
    job_id: Option<String>,
    job_title: Option<String>,
    employer_name: Option<String>,
    employer_logo: Option<String>,
    job_location: Option<String>,
    job_city: Option<String>,
    job_state: Option<String>,
    job_country: Option<String>,
    job_posted_at_datetime_utc: Option<String>,
    job_description: Option<String>,
    job_apply_link: Option<String>,
    job_employment_type: Option<String>,
    job_highlights: Option<Map<String, Value>>,
}

/// `Some(s)` only for non-empty strings.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Strip any scheme from the configured host.
pub fn sanitize_host(host: &str) -> &str {
    let host = host.trim();
    host.strip_prefix("https://")
        .or_else(|| host.strip_prefix("http://"))
        .unwrap_or(host)
        .trim_end_matches('/')
}

/// "City, State Country", skipping missing parts.
fn compose_location(job: &ApiJob) -> String {
    let city = non_empty(&job.job_city).unwrap_or("");
    let state = non_empty(&job.job_state).unwrap_or("");
    let country = non_empty(&job.job_country).unwrap_or("");
    let separator = if !city.is_empty() && !state.is_empty() {
        ", "
    } else {
        ""
    };

    format!("{}{}{} {}", city, separator, state, country)
        .trim()
        .to_string()
}

fn to_job_record(job: ApiJob) -> JobRecord {
    let location = match non_empty(&job.job_location) {
        Some(loc) => loc.to_string(),
        None => {
            let composed = compose_location(&job);
            if composed.is_empty() {
                "Not specified".to_string()
            } else {
                composed
            }
        }
    };

    JobRecord {
        id: job.job_id.unwrap_or_default(),
        title: job.job_title.unwrap_or_default(),
        company: Some(
            non_empty(&job.employer_name)
                .unwrap_or("N/A")
                .to_string(),
        ),
        company_logo: job.employer_logo,
        location: Some(location),
        country: job.job_country,
        date_posted: Some(
            job.job_posted_at_datetime_utc
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| Utc::now().to_rfc3339()),
        ),
        description: job.job_description,
        apply_url: job.job_apply_link,
        employment_type: job.job_employment_type,
        highlights: job.job_highlights.unwrap_or_default(),
    }
}

/// Collapse postings sharing an id: first position, last content.
pub fn dedupe_by_id(jobs: Vec<JobRecord>) -> Vec<JobRecord> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<JobRecord> = Vec::with_capacity(jobs.len());

    for job in jobs {
        match index.get(&job.id) {
            Some(&i) => unique[i] = job,
            None => {
                index.insert(job.id.clone(), unique.len());
                unique.push(job);
            }
        }
    }

    unique
}

/// Turn the `data` field of a JSearch response into usable postings.
///
/// Entries that don't decode, or lack an id, title or description, are dropped.
pub fn parse_job_list(data: &Value) -> Vec<JobRecord> {
    let Some(items) = data.as_array() else {
        warn!("Search API returned unexpected data format, returning empty list");
        return Vec::new();
    };

    let jobs: Vec<JobRecord> = items
        .iter()
        .filter_map(|item| match ApiJob::deserialize(item) {
            Ok(job) => Some(to_job_record(job)),
            Err(e) => {
                debug!("Skipping undecodable job entry: {}", e);
                None
            }
        })
        .filter(|job| {
            !job.id.is_empty()
                && !job.title.is_empty()
                && job.description.as_deref().is_some_and(|d| !d.is_empty())
        })
        .collect();

    dedupe_by_id(jobs)
}

/// Client for the JSearch API.
pub struct JobSearchClient {
    settings: SearchSettings,
    http_client: reqwest::Client,
}

impl JobSearchClient {
    /// Create a new client.
    pub fn new(settings: SearchSettings) -> Result<Self, SearchError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            settings,
            http_client,
        })
    }

    /// Search postings. A blank query returns nothing without a request.
    pub async fn search(
        &self,
        query: &str,
        num_pages: u32,
        filters: &SearchFilters,
    ) -> Result<Vec<JobRecord>, SearchError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut params = vec![
            ("query", query.to_string()),
            ("num_pages", num_pages.to_string()),
        ];
        params.extend(filters.to_query_params());

        info!("Searching for '{}' ({} pages)", query, num_pages);
        let data = self.fetch("search", &params).await?;
        let jobs = parse_job_list(&data);
        info!("Search returned {} unique postings", jobs.len());

        Ok(jobs)
    }

    /// Fetch one posting by id.
    pub async fn job_details(&self, id: &str) -> Result<Option<JobRecord>, SearchError> {
        let data = self
            .fetch("job-details", &[("job_id", id.to_string())])
            .await?;

        let first = data
            .as_array()
            .and_then(|items| items.first())
            .map(ApiJob::deserialize)
            .transpose()
            .map_err(|e| SearchError::Decode(e.to_string()))?;

        Ok(first.map(to_job_record))
    }

    /// Validated (key, host) pair.
    fn credentials(&self) -> Result<(&str, &str), SearchError> {
        let key = self
            .settings
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| SearchError::NotConfigured("RAPIDAPI_KEY is not set".to_string()))?;

        if key.contains(PLACEHOLDER_KEY) {
            return Err(SearchError::NotConfigured(
                "RAPIDAPI_KEY still holds the placeholder value".to_string(),
            ));
        }

        let host = sanitize_host(&self.settings.host);
        if host.is_empty() {
            return Err(SearchError::NotConfigured(
                "RAPIDAPI_HOST is not set".to_string(),
            ));
        }

        Ok((key, host))
    }

    /// GET an endpoint and return the response's `data` field.
    async fn fetch(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value, SearchError> {
        let (key, host) = self.credentials()?;
        let url = format!("https://{}/{}", host, endpoint);
        debug!("GET {} {:?}", url, params);

        let response = self
            .http_client
            .get(&url)
            .query(params)
            .header("X-RapidAPI-Key", key)
            .header("X-RapidAPI-Host", host)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout(self.settings.timeout_seconds)
                } else if e.is_connect() {
                    SearchError::Connect(host.to_string())
                } else {
                    SearchError::Http(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api { status, body });
        }

        let mut body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))?;

        Ok(body.get_mut("data").map(Value::take).unwrap_or(Value::Null))
    }
}
