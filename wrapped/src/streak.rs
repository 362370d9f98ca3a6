use crate::api::ActivityDay;
use chrono::NaiveDate;
use derive_more::Constructor;

#[derive(Constructor, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Streaks {
    pub longest: u32,
    pub current: u32,
}

/// Gap handling for the longest-streak scan.
///
/// The upstream calendar normally carries an explicit zero-count record for
/// every inactive day, so the scan only has to reset on zero counts. When
/// records are missing entirely, `Lenient` keeps counting across the hole
/// (the historical behavior) while `Strict` treats any non-adjacent pair of
/// records as a break.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GapRule {
    Lenient,
    Strict,
}

pub fn compute_streaks(days: &[ActivityDay], reference: NaiveDate) -> Streaks {
    compute_streaks_with(days, reference, GapRule::Lenient)
}

pub fn compute_streaks_with(days: &[ActivityDay], reference: NaiveDate, rule: GapRule) -> Streaks {
    let mut sorted: Vec<&ActivityDay> = days.iter().collect();
    sorted.sort_by_key(|day| day.date);

    let longest = longest_streak(&sorted, rule);
    let current = current_streak(&sorted, reference);
    Streaks::new(longest, current)
}

fn longest_streak(sorted: &[&ActivityDay], rule: GapRule) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut prev_date: Option<NaiveDate> = None;
    for day in sorted {
        if rule == GapRule::Strict {
            if let Some(prev) = prev_date {
                if (day.date - prev).num_days() > 1 {
                    run = 0;
                }
            }
        }
        if day.count > 0 {
            run += 1;
            longest = std::cmp::max(longest, run);
        } else {
            run = 0;
        }
        prev_date = Some(day.date);
    }
    longest
}

/// Scans backward from `reference`. A zero-count day today or yesterday kills
/// the streak outright; older zero days are passed over. A counted day more
/// than one day older than the previously counted one ends the scan without
/// being credited.
fn current_streak(sorted: &[&ActivityDay], reference: NaiveDate) -> u32 {
    let mut current = 0;
    let mut run = 0;
    let mut last_counted_diff: Option<i64> = None;
    for day in sorted.iter().rev() {
        let days_diff = (reference - day.date).num_days();
        if days_diff < 0 {
            continue;
        }
        if day.count > 0 {
            run += 1;
            if let Some(last) = last_counted_diff {
                if days_diff - last > 1 {
                    break;
                }
            }
            current = run;
            last_counted_diff = Some(days_diff);
        } else if days_diff <= 1 {
            break;
        }
    }
    current
}

/// Tests

#[cfg(test)]
fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[cfg(test)]
fn days(counts: &[(u32, u32)]) -> Vec<ActivityDay> {
    counts
        .iter()
        .map(|&(day, count)| ActivityDay::new(date(2022, 1, day), count))
        .collect()
}

#[test]
fn no_activity_yields_no_streaks() {
    let days = days(&[(1, 0), (2, 0), (3, 0)]);
    let streaks = compute_streaks(&days, date(2022, 1, 3));
    assert_eq!(streaks, Streaks::new(0, 0));
}

#[test]
fn empty_calendar_yields_no_streaks() {
    let streaks = compute_streaks(&[], date(2022, 1, 3));
    assert_eq!(streaks, Streaks::new(0, 0));
}

#[test]
fn contiguous_activity_counts_fully() {
    let days = days(&[(1, 2), (2, 1), (3, 4), (4, 1)]);
    let streaks = compute_streaks(&days, date(2022, 1, 4));
    assert_eq!(streaks, Streaks::new(4, 4));
}

#[test]
fn run_broken_by_inactive_day() {
    let days = days(&[(1, 3), (2, 0), (3, 5), (4, 2)]);
    let streaks = compute_streaks(&days, date(2022, 1, 4));
    assert_eq!(streaks, Streaks::new(2, 2));
}

#[test]
fn input_order_is_irrelevant() {
    let ordered = days(&[(1, 3), (2, 0), (3, 5), (4, 2)]);
    let shuffled = days(&[(3, 5), (1, 3), (4, 2), (2, 0)]);
    let reference = date(2022, 1, 4);
    assert_eq!(
        compute_streaks(&ordered, reference),
        compute_streaks(&shuffled, reference)
    );
}

#[test]
fn inactive_today_kills_current_streak() {
    let days = days(&[(1, 3), (2, 4), (3, 0)]);
    let streaks = compute_streaks(&days, date(2022, 1, 3));
    assert_eq!(streaks, Streaks::new(2, 0));
}

#[test]
fn inactive_yesterday_kills_current_streak() {
    let days = days(&[(1, 3), (2, 0), (3, 0), (4, 5)]);
    let streaks = compute_streaks(&days, date(2022, 1, 3));
    assert_eq!(streaks, Streaks::new(1, 0));
}

#[test]
fn future_days_are_ignored() {
    let days = days(&[(1, 1), (2, 1), (3, 7), (4, 9)]);
    let streaks = compute_streaks(&days, date(2022, 1, 2));
    assert_eq!(streaks.current, 2);
}

#[test]
fn lenient_rule_counts_across_missing_records() {
    let days = days(&[(1, 1), (5, 1), (6, 1)]);
    let streaks = compute_streaks_with(&days, date(2022, 1, 6), GapRule::Lenient);
    assert_eq!(streaks.longest, 3);
    assert_eq!(streaks.current, 2);
}

#[test]
fn strict_rule_breaks_on_missing_records() {
    let days = days(&[(1, 1), (5, 1), (6, 1)]);
    let streaks = compute_streaks_with(&days, date(2022, 1, 6), GapRule::Strict);
    assert_eq!(streaks.longest, 2);
    assert_eq!(streaks.current, 2);
}
