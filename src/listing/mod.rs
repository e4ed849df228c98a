//! Browsing search results: pages, terminal formatting and CSV export.

pub mod export;
pub mod paginator;

pub use export::export_csv_file;
pub use paginator::Paginator;

use crate::models::JobRecord;
use lazy_static::lazy_static;
use regex::Regex;

/// Characters of description shown on a card.
const SNIPPET_CHARS: usize = 160;

lazy_static! {
    static ref TAG_PATTERN: Regex = Regex::new(r"<[^>]*>").expect("tag pattern is valid");
    static ref SPACE_PATTERN: Regex = Regex::new(r"\s+").expect("space pattern is valid");
}

/// Remove markup tags and collapse whitespace.
pub fn plain_text(html: &str) -> String {
    let without_tags = TAG_PATTERN.replace_all(html, " ");
    SPACE_PATTERN
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// First `max` characters of the plain-text description, with an ellipsis if cut.
pub fn snippet(description: &str, max: usize) -> String {
    let text = plain_text(description);
    if text.chars().count() <= max {
        return text;
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}

/// Date part of an RFC 3339 timestamp, or the raw value.
fn posted_date(date_posted: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(date_posted)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| date_posted.to_string())
}

/// Short multi-line card for list output.
pub fn format_job_card(position: usize, job: &JobRecord) -> String {
    let mut card = format!("{:>3}. {}\n", position, job.title);

    let mut meta = vec![
        job.company_or_na().to_string(),
        job.location_or_default().to_string(),
    ];
    if let Some(kind) = job.employment_type.as_deref() {
        meta.push(kind.to_string());
    }
    if let Some(date) = job.date_posted.as_deref() {
        meta.push(format!("posted {}", posted_date(date)));
    }
    card.push_str(&format!("     {}\n", meta.join(" | ")));

    if let Some(description) = job.description.as_deref() {
        let text = snippet(description, SNIPPET_CHARS);
        if !text.is_empty() {
            card.push_str(&format!("     {}\n", text));
        }
    }

    card.push_str(&format!("     id: {}\n", job.id));
    card
}

/// Full posting details for `show`.
pub fn format_job_details(job: &JobRecord) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", job.title));
    out.push_str(&format!("{}\n\n", "=".repeat(job.title.chars().count().max(3))));
    out.push_str(&format!("Company:   {}\n", job.company_or_na()));
    out.push_str(&format!("Location:  {}\n", job.location_or_default()));
    if let Some(kind) = job.employment_type.as_deref() {
        out.push_str(&format!("Type:      {}\n", kind));
    }
    if let Some(date) = job.date_posted.as_deref() {
        out.push_str(&format!("Posted:    {}\n", posted_date(date)));
    }
    if let Some(url) = job.apply_url.as_deref() {
        out.push_str(&format!("Apply:     {}\n", url));
    }
    out.push_str(&format!("Id:        {}\n", job.id));

    if let Some(description) = job.description.as_deref() {
        out.push_str("\nDescription\n-----------\n");
        out.push_str(&plain_text(description));
        out.push('\n');
    }

    for (category, items) in job.highlight_sections() {
        if items.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{}\n", category));
        for item in items {
            out.push_str(&format!("  - {}\n", item));
        }
    }

    out
}
