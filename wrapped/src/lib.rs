//! Year-in-review activity summary
//!
//! # Overview
//!
//! Library derives summary metrics from one calendar year of a GitHub user's activity.
//! Given the user's contribution calendar it computes the longest and the current streak of active days.
//! Given the user's repositories it merges per-repository language byte counts into a ranked, percentage-normalized top-10 language profile.
//! Given an aggregate activity total it estimates a percentile ranking against an assumed world-wide (and optionally regional) population of active users.
//! A thin orchestrator fetches the raw activity document through the `api::ActivityClient` trait, runs the three analyzers and assembles a single serializable summary record.
//!
//! The ranking model is an explicit heuristic, not derived from a real population dataset.

#[cfg(feature = "api")]
pub mod api;

#[cfg(feature = "calculator")]
mod languages;
#[cfg(feature = "calculator")]
mod rank;
#[cfg(feature = "calculator")]
mod streak;
#[cfg(feature = "calculator")]
mod summary;

#[cfg(feature = "calculator")]
pub use languages::{aggregate_languages, LanguageShare};
#[cfg(feature = "calculator")]
pub use rank::{estimate_ranking, RankResult, Rankings, RegionRanking};
#[cfg(feature = "calculator")]
pub use streak::{compute_streaks, compute_streaks_with, GapRule, Streaks};
#[cfg(feature = "calculator")]
pub use summary::{SummaryTotals, WrappedCalculator, WrappedSummary};
