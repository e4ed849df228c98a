//! Analytics dashboard rendering.
//!
//! The Markdown report mirrors the dashboard: stat cards first, then one
//! ranked table per dimension.

use crate::models::{AnalyticsSummary, Report, ReportMetadata};
use anyhow::{Context, Result};
use std::path::Path;

/// Generate the Markdown dashboard.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# JobPulse Analytics\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));

    if report.summary.is_empty() {
        output.push_str(&generate_empty_section());
    } else {
        output.push_str(&generate_overview_section(&report.summary));
        output.push_str(&generate_tables_section(&report.summary));
    }

    output.push_str(&generate_footer());
    output
}

fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Snapshot:** `{}`\n", metadata.snapshot));
    section.push_str(&format!(
        "- **Generated:** {}\n\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    section
}

fn generate_empty_section() -> String {
    let mut section = String::new();

    section.push_str("## No analytics data\n\n");
    section.push_str("No job postings were found to analyze. ");
    section.push_str("Run `jobpulse search <QUERY>` to fetch some first.\n\n");

    section
}

/// The stat cards.
fn generate_overview_section(summary: &AnalyticsSummary) -> String {
    let mut section = String::new();

    section.push_str("## Overview\n\n");
    section.push_str("| Jobs Analyzed | Top Location | Most Common Role | Remote |\n");
    section.push_str("|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {}% |\n\n",
        summary.total_jobs,
        summary.top_location().unwrap_or("N/A"),
        summary.top_role().unwrap_or("N/A"),
        summary.remote_percentage
    ));

    section
}

fn generate_tables_section(summary: &AnalyticsSummary) -> String {
    let mut section = String::new();

    section.push_str(&ranked_table(
        "Top Locations",
        "Location",
        summary
            .top_locations
            .iter()
            .map(|l| (l.location.as_str(), l.count)),
    ));
    section.push_str(&ranked_table(
        "Roles",
        "Role",
        summary.top_roles.iter().map(|r| (r.role.as_str(), r.count)),
    ));
    section.push_str(&ranked_table(
        "Top Companies",
        "Company",
        summary
            .top_companies
            .iter()
            .map(|c| (c.company.as_str(), c.count)),
    ));
    section.push_str(&ranked_table(
        "Top Skills",
        "Skill",
        summary.top_skills.iter().map(|s| (s.skill.as_str(), s.count)),
    ));

    section
}

/// One `| # | label | Jobs |` table; empty string when there are no rows.
fn ranked_table<'a>(
    title: &str,
    label: &str,
    rows: impl Iterator<Item = (&'a str, usize)>,
) -> String {
    let mut table = String::new();

    for (i, (name, count)) in rows.enumerate() {
        if i == 0 {
            table.push_str(&format!("### {}\n\n", title));
            table.push_str(&format!("| # | {} | Jobs |\n", label));
            table.push_str("|:---:|:---|:---:|\n");
        }
        table.push_str(&format!("| {} | {} | {} |\n", i + 1, escape_cell(name), count));
    }

    if !table.is_empty() {
        table.push('\n');
    }
    table
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn generate_footer() -> String {
    "---\n\n*Report generated by JobPulse*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Write rendered report content to `path`.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompanyCount, LocationCount, RoleCount, SkillCount};
    use chrono::{TimeZone, Utc};

    fn create_test_report(summary: AnalyticsSummary) -> Report {
        Report {
            metadata: ReportMetadata {
                snapshot: "last_search.json".to_string(),
                generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
            },
            summary,
        }
    }

    fn sample_summary() -> AnalyticsSummary {
        AnalyticsSummary {
            total_jobs: 6,
            top_locations: vec![
                LocationCount {
                    location: "Austin".to_string(),
                    count: 3,
                },
                LocationCount {
                    location: "Boston".to_string(),
                    count: 2,
                },
            ],
            top_roles: vec![RoleCount {
                role: "Backend".to_string(),
                count: 4,
            }],
            remote_percentage: 17,
            top_companies: vec![CompanyCount {
                company: "A|B Labs".to_string(),
                count: 2,
            }],
            top_skills: vec![SkillCount {
                skill: "Rust".to_string(),
                count: 5,
            }],
        }
    }

    #[test]
    fn test_generate_markdown_report() {
        let markdown = generate_markdown_report(&create_test_report(sample_summary()));

        assert!(markdown.starts_with("# JobPulse Analytics\n"));
        assert!(markdown.contains("- **Snapshot:** `last_search.json`"));
        assert!(markdown.contains("2024-05-01 09:30:00 UTC"));
        assert!(markdown.contains("| 6 | Austin | Backend | 17% |"));
        assert!(markdown.contains("### Top Locations"));
        assert!(markdown.contains("| 1 | Austin | 3 |\n| 2 | Boston | 2 |"));
        assert!(markdown.contains("| 1 | A\\|B Labs | 2 |"));
        assert!(markdown.contains("| 1 | Rust | 5 |"));
        assert!(!markdown.contains("No analytics data"));
    }

    #[test]
    fn test_empty_summary_report() {
        let markdown = generate_markdown_report(&create_test_report(AnalyticsSummary::default()));

        assert!(markdown.contains("## No analytics data"));
        assert!(markdown.contains("jobpulse search"));
        assert!(!markdown.contains("## Overview"));
        assert!(!markdown.contains("### Top Skills"));
    }

    #[test]
    fn test_missing_dimensions_show_na() {
        let summary = AnalyticsSummary {
            total_jobs: 2,
            top_roles: vec![RoleCount {
                role: "Other".to_string(),
                count: 2,
            }],
            remote_percentage: 100,
            ..Default::default()
        };
        let markdown = generate_markdown_report(&create_test_report(summary));

        assert!(markdown.contains("| 2 | N/A | Other | 100% |"));
        assert!(!markdown.contains("### Top Locations"));
        assert!(markdown.contains("### Roles"));
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report(sample_summary());
        let json = generate_json_report(&report).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["summary"]["total_jobs"], 6);
        assert_eq!(parsed["summary"]["remote_percentage"], 17);
        assert_eq!(parsed["summary"]["top_skills"][0]["skill"], "Rust");
        assert_eq!(parsed["metadata"]["snapshot"], "last_search.json");
    }

    #[test]
    fn test_write_report_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("jobs.md");

        write_report("# hi\n", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# hi\n");
    }
}
