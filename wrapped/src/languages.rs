use crate::api::Repository;
use chrono::Datelike;
use derive_more::Constructor;
use serde::Serialize;
use std::collections::HashMap;

const PROFILE_LIMIT: usize = 10;

#[derive(Constructor, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LanguageShare {
    pub name: String,
    pub color: Option<String>,
    pub percentage: u32,
}

/// Merges per-repository language byte counts into a ranked top-10 profile.
///
/// Only repositories last updated in `current_year` are counted. Percentages
/// are normalized over the retained top-10 entries, not the full language
/// population, and are rounded independently, so they need not sum to 100.
pub fn aggregate_languages(repos: &[Repository], current_year: i32) -> Vec<LanguageShare> {
    let mut totals: Vec<LanguageTotal> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for repo in repos {
        if repo.updated_at.year() != current_year {
            continue;
        }
        for edge in &repo.languages {
            match index.get(&edge.name) {
                Some(&at) => {
                    let total = &mut totals[at];
                    total.size += edge.size;
                    // Last write wins, as upstream reports colors per repository.
                    total.color = edge.color.clone();
                }
                None => {
                    index.insert(edge.name.clone(), totals.len());
                    totals.push(LanguageTotal {
                        name: edge.name.clone(),
                        color: edge.color.clone(),
                        size: edge.size,
                    });
                }
            }
        }
    }

    // Stable sort keeps encounter order among equally sized languages.
    totals.sort_by(|a, b| b.size.cmp(&a.size));
    totals.truncate(PROFILE_LIMIT);

    let total_size: u64 = totals.iter().map(|total| total.size).sum();
    if total_size == 0 {
        return Vec::new();
    }
    totals
        .into_iter()
        .map(|total| {
            let percentage = (total.size as f64 / total_size as f64 * 100.0).round() as u32;
            LanguageShare::new(total.name, total.color, percentage)
        })
        .collect()
}

struct LanguageTotal {
    name: String,
    color: Option<String>,
    size: u64,
}

/// Tests

#[cfg(test)]
use crate::api::LanguageEdge;
#[cfg(test)]
use chrono::{TimeZone, Utc};

#[cfg(test)]
fn repo(languages: Vec<(&str, u64)>, year: i32) -> Repository {
    Repository {
        name: "repo".to_string(),
        stars: 0,
        updated_at: Utc.with_ymd_and_hms(year, 6, 1, 12, 0, 0).unwrap(),
        languages: languages
            .into_iter()
            .map(|(name, size)| LanguageEdge {
                name: name.to_string(),
                color: Some(format!("#{}", name)),
                size,
            })
            .collect(),
    }
}

#[test]
fn merges_languages_within_current_year() {
    let repos = vec![
        repo(vec![("Go", 300)], 2022),
        repo(vec![("Go", 200)], 2022),
        repo(vec![("Rust", 500)], 2021),
    ];
    let profile = aggregate_languages(&repos, 2022);
    assert_eq!(
        profile,
        vec![LanguageShare::new(
            "Go".to_string(),
            Some("#Go".to_string()),
            100
        )]
    );
}

#[test]
fn profile_is_capped_at_ten_languages() {
    let languages: Vec<(String, u64)> = (0..15).map(|i| (format!("lang_{}", i), 100 + i)).collect();
    let languages: Vec<(&str, u64)> = languages.iter().map(|(n, s)| (n.as_str(), *s)).collect();
    let repos = vec![repo(languages, 2022)];
    let profile = aggregate_languages(&repos, 2022);
    assert_eq!(profile.len(), 10);
    assert_eq!(profile[0].name, "lang_14");
}

#[test]
fn repos_outside_year_yield_empty_profile() {
    let repos = vec![repo(vec![("Rust", 500)], 2020), repo(vec![("C", 100)], 2021)];
    assert!(aggregate_languages(&repos, 2022).is_empty());
}

#[test]
fn no_repos_yield_empty_profile() {
    assert!(aggregate_languages(&[], 2022).is_empty());
}

#[test]
fn percentages_cover_retained_subset_only() {
    let repos = vec![repo(vec![("Rust", 600), ("Go", 300), ("C", 100)], 2022)];
    let profile = aggregate_languages(&repos, 2022);
    let percentages: Vec<u32> = profile.iter().map(|share| share.percentage).collect();
    assert_eq!(percentages, vec![60, 30, 10]);
}

#[test]
fn color_of_last_seen_repo_wins() {
    let mut first = repo(vec![("Rust", 100)], 2022);
    first.languages[0].color = Some("#old".to_string());
    let second = repo(vec![("Rust", 200)], 2022);
    let profile = aggregate_languages(&[first, second], 2022);
    assert_eq!(profile[0].color, Some("#Rust".to_string()));
}

#[test]
fn equal_sizes_keep_encounter_order() {
    let repos = vec![repo(vec![("B", 100), ("A", 100)], 2022)];
    let profile = aggregate_languages(&repos, 2022);
    assert_eq!(profile[0].name, "B");
    assert_eq!(profile[1].name, "A");
}
