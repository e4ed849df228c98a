//! Prompts and response parsing for the model calls.

use crate::listing::plain_text;
use crate::models::{Enrichment, JobRecord};
use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

/// Description characters sent to the model.
const MAX_DESCRIPTION_CHARS: usize = 6000;

/// Suggestions returned at most.
pub const MAX_SUGGESTIONS: usize = 5;

pub const ENRICH_SYSTEM_PROMPT: &str = r#"You are a job posting enrichment assistant.
Based on a job's title, company, location and description you suggest information the posting leaves out.
Answer with a single JSON object and nothing else."#;

pub const SUGGEST_SYSTEM_PROMPT: &str = r#"You are an API that provides autocomplete suggestions for a job search engine.
Answer with a single JSON object and nothing else: no markdown, no commentary."#;

lazy_static! {
    /// A fenced ```json block, or the widest {...} span.
    static ref JSON_BLOCK: Regex =
        Regex::new(r"(?s)```json\s*\n(.*?)\n\s*```|(\{.*\})").expect("json pattern is valid");
}

/// Build the enrichment prompt for one posting.
pub fn enrichment_prompt(job: &JobRecord) -> String {
    let description: String = plain_text(job.description.as_deref().unwrap_or(""))
        .chars()
        .take(MAX_DESCRIPTION_CHARS)
        .collect();

    let mut prompt = String::new();
    prompt.push_str(&format!("Job Title: {}\n", job.title));
    prompt.push_str(&format!("Company Name: {}\n", job.company_or_na()));
    prompt.push_str(&format!("Location: {}\n", job.location_or_default()));
    prompt.push_str(&format!("Description: {}\n\n", description));
    prompt.push_str("Provide your suggestions as JSON with exactly these keys:\n");
    prompt.push_str(r#"{"suggestedSalaryRange": "e.g. $120,000 - $150,000 per year", "suggestedCompanyRating": "e.g. 4.1 out of 5", "additionalPerks": "perks or benefits the posting does not mention"}"#);
    prompt.push('\n');
    prompt
}

/// Build the autocomplete prompt for a partial query.
pub fn suggestion_prompt(query: &str) -> String {
    format!(
        r#"Given the user's partial query, return a JSON object with a "suggestions" key holding an array of up to {} relevant and common job search strings.

Examples:
- If the query is "react", return: {{"suggestions": ["react developer", "react native jobs", "senior react engineer"]}}
- If the query is "mumbai", return: {{"suggestions": ["jobs in mumbai", "software engineer mumbai", "frontend developer mumbai"]}}

User query: {}
"#,
        MAX_SUGGESTIONS, query
    )
}

/// Pull the first JSON object out of a model response.
pub fn extract_json(text: &str) -> Option<Value> {
    let captures = JSON_BLOCK.captures(text)?;
    let raw = captures.get(1).or_else(|| captures.get(2))?.as_str();
    serde_json::from_str(raw).ok()
}

/// Parse the enrichment object from a model response.
pub fn parse_enrichment(text: &str) -> Result<Enrichment> {
    let json = extract_json(text).context("Model response contained no JSON object")?;
    serde_json::from_value(json).context("Model response is missing enrichment fields")
}

#[derive(Debug, Deserialize)]
struct SuggestionList {
    suggestions: Vec<String>,
}

/// Parse autocomplete suggestions; anything malformed yields `None`.
pub fn parse_suggestions(text: &str) -> Option<Vec<String>> {
    let json = extract_json(text)?;
    let mut list: SuggestionList = serde_json::from_value(json).ok()?;
    list.suggestions.truncate(MAX_SUGGESTIONS);
    Some(list.suggestions)
}
