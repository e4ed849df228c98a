//! Analytics aggregation over a list of postings.
//!
//! [`summarize`] is a pure function: it never fails, and missing or
//! placeholder fields are simply left out of the counts they would feed.

use crate::analysis::roles::classify_title;
use crate::analysis::skills::{capitalize, extract_skills};
use crate::models::{
    AnalyticsSummary, CompanyCount, JobRecord, LocationCount, RoleCount, SkillCount,
};
use std::collections::HashMap;
use tracing::debug;

/// Entries kept for locations, roles and companies.
pub const TOP_N: usize = 5;

/// Entries kept for skills.
pub const TOP_SKILLS: usize = 10;

/// Location values that carry no city.
const LOCATION_SENTINELS: &[&str] = &["N/A", "Not specified", "Remote"];

/// Counter that remembers the order keys were first seen.
///
/// Ranking uses a stable sort, so equal counts keep first-seen order.
#[derive(Debug, Default)]
pub struct Tally {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count for `key`.
    pub fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    /// Number of distinct keys seen.
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// The `n` highest counts, descending, ties in first-seen order.
    pub fn top(self, n: usize) -> Vec<(String, usize)> {
        let mut entries = self.entries;
        entries.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
        entries.truncate(n);
        entries
    }
}

/// City part of a location ("Austin, TX" -> "Austin"), or `None` for sentinels.
pub fn normalize_location(location: Option<&str>) -> Option<&str> {
    let city = location
        .unwrap_or("N/A")
        .split(',')
        .next()
        .unwrap_or("")
        .trim();

    if city.is_empty() || LOCATION_SENTINELS.contains(&city) {
        None
    } else {
        Some(city)
    }
}

/// Rounded share of remote postings, 0 for an empty list.
pub fn remote_percentage(jobs: &[JobRecord]) -> u8 {
    if jobs.is_empty() {
        return 0;
    }

    let remote = jobs.iter().filter(|job| job.is_remote()).count();
    ((remote as f64 / jobs.len() as f64) * 100.0).round() as u8
}

/// Compute the analytics summary for a list of postings.
pub fn summarize(jobs: &[JobRecord]) -> AnalyticsSummary {
    if jobs.is_empty() {
        return AnalyticsSummary::default();
    }

    let mut locations = Tally::new();
    let mut roles = Tally::new();
    let mut companies = Tally::new();
    let mut skills = Tally::new();

    for job in jobs {
        if let Some(city) = normalize_location(job.location.as_deref()) {
            locations.add(city);
        }

        roles.add(classify_title(&job.title));

        if let Some(company) = job.company.as_deref() {
            if !company.is_empty() && company != "N/A" {
                companies.add(company);
            }
        }

        for skill in extract_skills(job) {
            skills.add(&skill);
        }
    }

    debug!(
        "Aggregated {} jobs: {} locations, {} roles, {} companies, {} skills",
        jobs.len(),
        locations.distinct(),
        roles.distinct(),
        companies.distinct(),
        skills.distinct()
    );

    AnalyticsSummary {
        total_jobs: jobs.len(),
        top_locations: locations
            .top(TOP_N)
            .into_iter()
            .map(|(location, count)| LocationCount { location, count })
            .collect(),
        top_roles: roles
            .top(TOP_N)
            .into_iter()
            .map(|(role, count)| RoleCount { role, count })
            .collect(),
        remote_percentage: remote_percentage(jobs),
        top_companies: companies
            .top(TOP_N)
            .into_iter()
            .map(|(company, count)| CompanyCount { company, count })
            .collect(),
        top_skills: skills
            .top(TOP_SKILLS)
            .into_iter()
            .map(|(skill, count)| SkillCount {
                skill: capitalize(&skill),
                count,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, company: Option<&str>, location: Option<&str>) -> JobRecord {
        JobRecord {
            title: title.to_string(),
            company: company.map(String::from),
            location: location.map(String::from),
            ..Default::default()
        }
    }

    fn described(title: &str, description: &str) -> JobRecord {
        JobRecord {
            title: title.to_string(),
            description: Some(description.to_string()),
            ..Default::default()
        }
    }

    fn six_cities() -> Vec<JobRecord> {
        [
            "New York, NY",
            "San Francisco, CA",
            "Remote",
            "Austin, TX",
            "Seattle, WA",
            "Boston, MA",
        ]
        .iter()
        .map(|loc| job("Engineer", Some("Acme"), Some(loc)))
        .collect()
    }

    fn assert_non_increasing(counts: &[usize]) {
        assert!(counts.windows(2).all(|w| w[0] >= w[1]), "{:?}", counts);
    }

    #[test]
    fn test_empty_input_is_zero_summary() {
        assert_eq!(summarize(&[]), AnalyticsSummary::default());
    }

    #[test]
    fn test_six_city_example() {
        let summary = summarize(&six_cities());

        assert_eq!(summary.total_jobs, 6);
        assert_eq!(summary.remote_percentage, 17);

        let names: Vec<&str> = summary
            .top_locations
            .iter()
            .map(|l| l.location.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["New York", "San Francisco", "Austin", "Seattle", "Boston"]
        );
        assert!(summary.top_locations.iter().all(|l| l.count == 1));
    }

    #[test]
    fn test_location_sentinels_excluded() {
        let jobs = vec![
            job("a", None, Some("Remote")),
            job("b", None, Some("N/A")),
            job("c", None, Some("Not specified")),
            job("d", None, Some("  , nowhere")),
            job("e", None, None),
            job("f", None, Some("remote")),
            job("g", None, Some("Austin, TX")),
        ];
        let summary = summarize(&jobs);

        // Only exact "Remote" is a sentinel; lowercase "remote" counts as a city.
        assert_eq!(
            summary.top_locations,
            vec![
                LocationCount {
                    location: "remote".to_string(),
                    count: 1
                },
                LocationCount {
                    location: "Austin".to_string(),
                    count: 1
                },
            ]
        );
        // "Remote" and "remote" both count toward the remote share: 2 of 7.
        assert_eq!(summary.remote_percentage, 29);
    }

    #[test]
    fn test_locations_ranked_and_truncated() {
        let mut jobs = Vec::new();
        for (city, n) in [("A", 1), ("B", 3), ("C", 2), ("D", 3), ("E", 1), ("F", 1)] {
            for _ in 0..n {
                jobs.push(job("x", None, Some(&format!("{}, ZZ", city))));
            }
        }
        let summary = summarize(&jobs);

        let ranked: Vec<(&str, usize)> = summary
            .top_locations
            .iter()
            .map(|l| (l.location.as_str(), l.count))
            .collect();
        assert_eq!(ranked, vec![("B", 3), ("D", 3), ("C", 2), ("A", 1), ("E", 1)]);
    }

    #[test]
    fn test_roles_include_other() {
        let jobs = vec![
            job("Frontend Engineer", None, None),
            job("Accountant", None, None),
            job("Full Stack React Engineer", None, None),
            job("Nurse", None, None),
            job("Nurse Practitioner", None, None),
        ];
        let summary = summarize(&jobs);

        assert_eq!(
            summary.top_roles,
            vec![
                RoleCount {
                    role: "Other".to_string(),
                    count: 3
                },
                RoleCount {
                    role: "Frontend".to_string(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn test_companies_verbatim_without_placeholders() {
        let jobs = vec![
            job("x", Some("Acme"), None),
            job("x", Some("acme"), None),
            job("x", Some("N/A"), None),
            job("x", Some(""), None),
            job("x", None, None),
            job("x", Some("Acme"), None),
        ];
        let summary = summarize(&jobs);

        assert_eq!(
            summary.top_companies,
            vec![
                CompanyCount {
                    company: "Acme".to_string(),
                    count: 2
                },
                CompanyCount {
                    company: "acme".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_skill_counted_once_per_job() {
        let jobs = vec![
            described("Engineer", "React React React"),
            described("Engineer", "React and Docker"),
        ];
        let summary = summarize(&jobs);

        assert_eq!(
            summary.top_skills,
            vec![
                SkillCount {
                    skill: "React".to_string(),
                    count: 2
                },
                SkillCount {
                    skill: "Docker".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_skills_capped_at_ten() {
        let text = "react angular svelte gatsby javascript typescript html css sass python django flask";
        let jobs = vec![described("Engineer", text)];
        let summary = summarize(&jobs);

        assert_eq!(summary.top_skills.len(), TOP_SKILLS);
        assert_eq!(summary.top_skills[0].skill, "React");
        assert_eq!(summary.top_skills[9].skill, "Python");
    }

    #[test]
    fn test_bounds_and_ordering_hold() {
        let mut jobs = six_cities();
        jobs.extend(six_cities());
        jobs.push(described("Mobile Engineer", "Swift Kotlin Flutter"));
        jobs.push(job("Designer", Some("Studio"), Some("Remote, Earth")));
        let summary = summarize(&jobs);

        assert_eq!(summary.total_jobs, jobs.len());
        assert!(summary.top_locations.len() <= TOP_N);
        assert!(summary.top_roles.len() <= TOP_N);
        assert!(summary.top_companies.len() <= TOP_N);
        assert!(summary.top_skills.len() <= TOP_SKILLS);
        assert!(summary.remote_percentage <= 100);

        assert_non_increasing(&summary.top_locations.iter().map(|l| l.count).collect::<Vec<_>>());
        assert_non_increasing(&summary.top_roles.iter().map(|r| r.count).collect::<Vec<_>>());
        assert_non_increasing(&summary.top_companies.iter().map(|c| c.count).collect::<Vec<_>>());
        assert_non_increasing(&summary.top_skills.iter().map(|s| s.count).collect::<Vec<_>>());
    }

    #[test]
    fn test_deterministic() {
        let mut jobs = six_cities();
        jobs.push(described("Backend Engineer", "Go, Rust-adjacent, AWS and k8s"));
        assert_eq!(summarize(&jobs), summarize(&jobs));
    }

    #[test]
    fn test_remote_percentage_rounding() {
        let mut jobs: Vec<JobRecord> = (0..7).map(|_| job("x", None, Some("Denver"))).collect();
        jobs.push(job("x", None, Some("Remote")));
        // 1 of 8 = 12.5% rounds up.
        assert_eq!(remote_percentage(&jobs), 13);

        let all_remote = vec![job("x", None, Some("Remote"))];
        assert_eq!(remote_percentage(&all_remote), 100);
        assert_eq!(remote_percentage(&[]), 0);
    }

    #[test]
    fn test_normalize_location() {
        assert_eq!(normalize_location(Some("Austin, TX")), Some("Austin"));
        assert_eq!(normalize_location(Some("  Paris  ")), Some("Paris"));
        assert_eq!(normalize_location(Some("Remote")), None);
        assert_eq!(normalize_location(Some("")), None);
        assert_eq!(normalize_location(None), None);
    }

    #[test]
    fn test_tally_keeps_first_seen_order_for_ties() {
        let mut tally = Tally::new();
        for key in ["b", "a", "c", "a", "b"] {
            tally.add(key);
        }
        assert_eq!(tally.distinct(), 3);
        assert_eq!(
            tally.top(3),
            vec![
                ("b".to_string(), 2),
                ("a".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
    }
}
