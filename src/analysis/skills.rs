//! Skill extraction from posting text.
//!
//! A fixed keyword list is compiled into one case-insensitive, whole-word
//! alternation. Matches are folded through a small synonym table so variants
//! ("k8s", "kubernetes") count as one skill.

use crate::models::JobRecord;
use lazy_static::lazy_static;
use regex::Regex;

/// Known skill phrases, lowercase.
pub const SKILL_KEYWORDS: &[&str] = &[
    // Frontend JS
    "react", "angular", "vue.js", "svelte", "next.js", "gatsby",
    // Core web
    "javascript", "typescript", "html", "css", "sass",
    // Node backend
    "node.js", "express.js", "nest.js",
    // Python backend
    "python", "django", "flask",
    // Java backend
    "java", "spring boot",
    // Microsoft stack
    "c#", ".net",
    // Other backend
    "go", "ruby", "php",
    // Mobile
    "swift", "kotlin", "react native", "flutter",
    // Databases
    "sql", "nosql", "postgresql", "mysql", "mongodb", "redis",
    // Cloud
    "aws", "azure", "gcp", "google cloud",
    // DevOps
    "docker", "kubernetes", "k8s", "terraform", "ansible", "jenkins", "ci/cd",
    // Tools
    "git", "jira",
    // Design tools
    "figma", "sketch", "adobe xd",
    // Data science
    "machine learning", "artificial intelligence", "ai", "data analysis", "pandas", "numpy",
    "tensorflow", "pytorch",
];

/// Variant spellings folded into one canonical skill before counting.
const SKILL_SYNONYMS: &[(&str, &str)] = &[
    ("k8s", "kubernetes"),
    ("google cloud", "gcp"),
    ("ai", "artificial intelligence"),
];

lazy_static! {
    /// Whole-word alternation over every skill keyword.
    static ref SKILL_PATTERN: Regex = build_skill_pattern(SKILL_KEYWORDS);
}

fn build_skill_pattern(keywords: &[&str]) -> Regex {
    let alternation = keywords
        .iter()
        .map(|kw| regex::escape(kw))
        .collect::<Vec<_>>()
        .join("|");

    // ASCII word boundaries: a keyword right next to CJK or accented text still matches.
    Regex::new(&format!(r"(?i)(?-u:\b)({})(?-u:\b)", alternation))
        .expect("skill pattern is valid")
}

/// Map a matched keyword to its canonical skill name.
pub fn normalize_skill(skill: &str) -> &str {
    SKILL_SYNONYMS
        .iter()
        .find(|(variant, _)| *variant == skill)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(skill)
}

/// Lowercased description plus every highlight value, space-separated.
pub fn text_to_scan(job: &JobRecord) -> String {
    let highlights = job.highlight_values().collect::<Vec<_>>().join(" ");
    format!("{} {}", job.description.as_deref().unwrap_or(""), highlights).to_lowercase()
}

/// Distinct canonical skills mentioned by a posting, in first-seen order.
pub fn extract_skills(job: &JobRecord) -> Vec<String> {
    let text = text_to_scan(job);
    let mut found: Vec<String> = Vec::new();

    for m in SKILL_PATTERN.find_iter(&text) {
        let skill = normalize_skill(m.as_str());
        if !found.iter().any(|s| s == skill) {
            found.push(skill.to_string());
        }
    }

    found
}

/// Uppercase the first character for display ("node.js" -> "Node.js").
pub fn capitalize(skill: &str) -> String {
    let mut chars = skill.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn job_with(description: &str) -> JobRecord {
        JobRecord {
            title: "Engineer".to_string(),
            description: Some(description.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_keyword_count() {
        assert_eq!(SKILL_KEYWORDS.len(), 58);
    }

    #[test]
    fn test_whole_word_only() {
        // "go" must not match inside "google" or "mongodb".
        let skills = extract_skills(&job_with("We use Google Sheets and MongoDB"));
        assert_eq!(skills, vec!["mongodb"]);

        let skills = extract_skills(&job_with("Experience with Go and gRPC"));
        assert_eq!(skills, vec!["go"]);
    }

    #[test]
    fn test_boundaries_are_ascii() {
        let skills = extract_skills(&job_with("熟悉Python和Docker"));
        assert_eq!(skills, vec!["python", "docker"]);

        let skills = extract_skills(&job_with("Erfahrung mit AWS-Diensten für Kubernetesé"));
        assert_eq!(skills, vec!["aws", "kubernetes"]);
    }

    #[test]
    fn test_dedup_within_job() {
        let skills = extract_skills(&job_with("React, react and REACT. Also TypeScript."));
        assert_eq!(skills, vec!["react", "typescript"]);
    }

    #[test]
    fn test_synonyms_merge() {
        let skills = extract_skills(&job_with("K8s and Kubernetes on Google Cloud, some AI"));
        assert_eq!(skills, vec!["kubernetes", "gcp", "artificial intelligence"]);
    }

    #[test]
    fn test_escaped_punctuation() {
        // The dot in "node.js" is literal.
        let skills = extract_skills(&job_with("nodexjs is not node.js"));
        assert_eq!(skills, vec!["node.js"]);

        let skills = extract_skills(&job_with("pipelines with ci/cd"));
        assert_eq!(skills, vec!["ci/cd"]);
    }

    #[test]
    fn test_highlights_are_scanned() {
        let job: JobRecord = serde_json::from_value(json!({
            "title": "Data Engineer",
            "description": "Build pipelines in Python.",
            "highlights": {
                "Qualifications": ["Pandas", "SQL"],
                "Benefits": ["Free snacks"]
            }
        }))
        .unwrap();

        assert_eq!(extract_skills(&job), vec!["python", "pandas", "sql"]);
    }

    #[test]
    fn test_missing_text_yields_nothing() {
        let job = JobRecord {
            title: "React Developer".to_string(),
            ..Default::default()
        };
        assert!(extract_skills(&job).is_empty());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("node.js"), "Node.js");
        assert_eq!(capitalize("artificial intelligence"), "Artificial intelligence");
        assert_eq!(capitalize(".net"), ".net");
        assert_eq!(capitalize(""), "");
    }
}
