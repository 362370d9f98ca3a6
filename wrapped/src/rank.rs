use derive_more::Constructor;
use serde::Serialize;

/// Assumed population of active users the world percentile ranks against.
const WORLD_POPULATION: u64 = 40_000_000;
/// Assumed population of active users within one region.
const REGION_POPULATION: u64 = 1_500_000;

/// Small upward adjustment applied to the world percentile within a region,
/// capped at two percentile points.
const REGION_BONUS_CAP: f64 = 2.0;

/// Percentile rule applied across one contribution range.
#[derive(Clone, Copy, Debug)]
enum PercentileRule {
    Fixed(f64),
    /// Linear interpolation between two percentile anchors across the range.
    Linear { from: f64, to: f64 },
}

/// One row of the heuristic distribution table: contributions in
/// `lower..upper` map to a percentile. `upper: None` means unbounded.
#[derive(Clone, Copy, Debug)]
struct RankBucket {
    lower: u64,
    upper: Option<u64>,
    rule: PercentileRule,
}

/// Rough guess at how yearly contribution counts distribute over active
/// users. Not derived from a real dataset. The final bucket is unbounded so
/// the table is total over all non-negative inputs.
const RANK_TABLE: &[RankBucket] = &[
    RankBucket {
        lower: 0,
        upper: Some(10),
        rule: PercentileRule::Linear { from: 5.0, to: 20.0 },
    },
    RankBucket {
        lower: 10,
        upper: Some(50),
        rule: PercentileRule::Linear { from: 20.0, to: 40.0 },
    },
    RankBucket {
        lower: 50,
        upper: Some(200),
        rule: PercentileRule::Linear { from: 40.0, to: 60.0 },
    },
    RankBucket {
        lower: 200,
        upper: Some(500),
        rule: PercentileRule::Linear { from: 60.0, to: 75.0 },
    },
    RankBucket {
        lower: 500,
        upper: Some(1_000),
        rule: PercentileRule::Linear { from: 75.0, to: 85.0 },
    },
    RankBucket {
        lower: 1_000,
        upper: Some(2_000),
        rule: PercentileRule::Linear { from: 85.0, to: 92.0 },
    },
    RankBucket {
        lower: 2_000,
        upper: Some(5_000),
        rule: PercentileRule::Linear { from: 92.0, to: 98.0 },
    },
    RankBucket {
        lower: 5_000,
        upper: None,
        rule: PercentileRule::Fixed(99.0),
    },
];

#[derive(Constructor, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankResult {
    pub rank: u64,
    pub percentile: f64,
    pub top_percent: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRanking {
    pub name: String,
    #[serde(flatten)]
    pub result: RankResult,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rankings {
    pub world: RankResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<RegionRanking>,
}

/// Estimates where `activity_total` yearly contributions place a user within
/// the assumed world population, and within `region` when one is known.
///
/// Never fails: the table covers every non-negative total.
pub fn estimate_ranking(activity_total: u64, region: Option<&str>) -> Rankings {
    let world_percentile = round1(table_percentile(activity_total));
    let world = rank_result(world_percentile, WORLD_POPULATION);

    let region = region.map(|name| {
        let bonus = f64::min(REGION_BONUS_CAP, world_percentile * 0.02);
        let percentile = round1(f64::min(100.0, world_percentile + bonus));
        RegionRanking {
            name: name.to_string(),
            result: rank_result(percentile, REGION_POPULATION),
        }
    });

    Rankings { world, region }
}

fn rank_result(percentile: f64, population: u64) -> RankResult {
    let rank = (population as f64 * (100.0 - percentile) / 100.0).ceil() as u64;
    let top_percent = round1(f64::max(0.1, 100.0 - percentile));
    RankResult::new(std::cmp::max(1, rank), percentile, top_percent)
}

fn table_percentile(activity_total: u64) -> f64 {
    let bucket = RANK_TABLE
        .iter()
        .find(|bucket| bucket.contains(activity_total))
        .unwrap_or(RANK_TABLE.last().expect("table is non-empty"));
    let percentile = match bucket.rule {
        PercentileRule::Fixed(percentile) => percentile,
        PercentileRule::Linear { from, to } => {
            let upper = bucket.upper.expect("linear rule requires a bounded range");
            let span = (upper - bucket.lower) as f64;
            let offset = (activity_total - bucket.lower) as f64;
            from + (to - from) * offset / span
        }
    };
    percentile.clamp(0.0, 100.0)
}

impl RankBucket {
    fn contains(&self, total: u64) -> bool {
        total >= self.lower && self.upper.map_or(true, |upper| total < upper)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Tests

#[test]
fn table_is_contiguous_and_ends_unbounded() {
    let mut expected_lower = 0;
    for bucket in RANK_TABLE {
        assert_eq!(bucket.lower, expected_lower);
        match bucket.upper {
            Some(upper) => expected_lower = upper,
            None => return,
        }
    }
    panic!("final bucket must be unbounded");
}

#[test]
fn zero_activity_lands_in_lowest_bucket() {
    let rankings = estimate_ranking(0, None);
    assert_eq!(rankings.world.percentile, 5.0);
    assert!(rankings.world.rank >= 1);
    assert!(rankings.region.is_none());
}

#[test]
fn percentile_is_monotonic_within_buckets() {
    let samples = [0, 5, 9, 10, 30, 49, 50, 199, 200, 499, 500, 999, 1_500, 4_999, 5_000, 50_000];
    let mut previous = 0.0;
    for total in samples {
        let percentile = table_percentile(total);
        assert!(
            percentile >= previous,
            "percentile dropped at {} contributions",
            total
        );
        previous = percentile;
    }
}

#[test]
fn heavy_activity_lands_in_elite_bucket() {
    let rankings = estimate_ranking(10_000, None);
    assert!(rankings.world.percentile >= 98.0);
    assert_eq!(rankings.world.rank, 400_000);
}

#[test]
fn top_percent_never_reaches_zero() {
    for total in [0, 100, 5_000, 1_000_000] {
        let rankings = estimate_ranking(total, None);
        assert!(rankings.world.top_percent > 0.0);
        assert!(rankings.world.top_percent <= 100.0);
    }
}

#[test]
fn region_gets_a_small_bounded_bonus() {
    let rankings = estimate_ranking(1_500, Some("Finland"));
    let region = rankings.region.unwrap();
    assert_eq!(region.name, "Finland");
    assert!(region.result.percentile > rankings.world.percentile);
    assert!(region.result.percentile <= rankings.world.percentile + REGION_BONUS_CAP);
    assert!(region.result.rank >= 1);
}

#[test]
fn region_percentile_is_clamped() {
    let rankings = estimate_ranking(1_000_000, Some("Finland"));
    assert!(rankings.region.unwrap().result.percentile <= 100.0);
}

#[test]
fn percentiles_are_rounded_to_one_decimal() {
    let rankings = estimate_ranking(123, Some("Finland"));
    let world = rankings.world.percentile;
    let region = rankings.region.unwrap().result.percentile;
    assert_eq!(world, round1(world));
    assert_eq!(region, round1(region));
}
