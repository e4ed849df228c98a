//! Title-based role classification.
//!
//! Titles are matched against an ordered keyword table. The first role with a
//! matching keyword wins, so row order decides overlaps such as
//! "Full Stack React Engineer" (Frontend, because row 1 precedes row 3).

/// Bucket for titles no keyword matches.
pub const OTHER_ROLE: &str = "Other";

/// Canonical roles and their lowercase title keywords, in match order.
pub const ROLE_TABLE: &[(&str, &[&str])] = &[
    (
        "Frontend",
        &["frontend", "react", "vue", "angular", "ui developer", "web developer"],
    ),
    (
        "Backend",
        &[
            "backend",
            "node.js",
            "python developer",
            "java developer",
            "php",
            "ruby",
            "server-side",
        ],
    ),
    ("Full Stack", &["full stack", "full-stack"]),
    ("DevOps", &["devops", "sre", "site reliability", "infrastructure"]),
    (
        "Data Scientist",
        &["data scientist", "machine learning", "ml engineer", "ai engineer"],
    ),
    ("Product Manager", &["product manager", "product owner"]),
    ("Designer", &["designer", "ux", "ui", "product design"]),
    ("Mobile", &["mobile", "ios", "android", "react native", "flutter"]),
    // General catch-all, keep last.
    ("Software Engineer", &["software engineer", "swe", "developer"]),
];

/// Classify a job title into a canonical role, or [`OTHER_ROLE`].
pub fn classify_title(title: &str) -> &'static str {
    let title = title.to_lowercase();

    ROLE_TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| title.contains(kw)))
        .map(|(role, _)| *role)
        .unwrap_or(OTHER_ROLE)
}
