//! Aggregation invariants over arbitrary claim collections.
//!
//! Run with: cargo test --package trustwatch-analytics --test proptest_pipeline

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use proptest::test_runner::Config;

use trustwatch_analytics::pipeline::{filter_claims, summarise, CategoryFilter, DateWindow};
use trustwatch_common::{Claim, VerificationStatus};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

// Small alphabet so categories collide; "" stands for a claim without one.
fn category() -> impl Strategy<Value = String> {
    "[A-C ]{0,2}"
}

fn date() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("2024-06-14".to_string()),
        Just("2024-06-08T12:00:00Z".to_string()),
        Just("2020-01-01".to_string()),
        Just("not a date".to_string()),
        Just(String::new()),
    ]
}

fn window() -> impl Strategy<Value = DateWindow> {
    prop_oneof![Just(DateWindow::AllTime), Just(DateWindow::LastSevenDays)]
}

fn claims() -> impl Strategy<Value = Vec<Claim>> {
    prop::collection::vec((category(), 0.0_f64..=100.0, date()), 0..24).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (category, trust_score, date))| Claim {
                id: format!("c{i}"),
                influencer_id: "inf".to_string(),
                content: format!("claim {i}"),
                category,
                verification_status: VerificationStatus::Unknown,
                trust_score,
                source: String::new(),
                date,
            })
            .collect()
    })
}

fn filter() -> impl Strategy<Value = CategoryFilter> {
    prop::collection::vec(category(), 0..3).prop_map(|cats| cats.into_iter().collect())
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn test_volume_percentages_sum_to_100_or_are_all_zero(
        claims in claims(),
        window in window(),
        filter in filter(),
    ) {
        let summary = summarise(&claims, window, &filter, now());
        let total: f64 = summary.volume_by_category.iter().map(|v| v.percentage).sum();
        if summary.filtered.is_empty() {
            prop_assert!(summary.volume_by_category.iter().all(|v| v.percentage == 0.0));
        } else {
            prop_assert!((total - 100.0).abs() < 1e-6, "sum was {}", total);
        }
    }

    #[test]
    fn test_unfiltered_all_time_keeps_every_claim(claims in claims()) {
        let summary = summarise(&claims, DateWindow::AllTime, &CategoryFilter::none(), now());
        prop_assert_eq!(summary.filtered.len(), claims.len());
    }

    #[test]
    fn test_means_are_never_nan_and_absent_categories_are_zero(
        claims in claims(),
        window in window(),
        filter in filter(),
    ) {
        let summary = summarise(&claims, window, &filter, now());
        for row in &summary.trust_by_category {
            prop_assert!(!row.avg_score.is_nan());
            if !summary.filtered.iter().any(|c| c.category == row.category) {
                prop_assert_eq!(row.avg_score, 0.0);
            }
        }
    }

    #[test]
    fn test_non_empty_filter_only_admits_members(
        claims in claims(),
        window in window(),
        cats in prop::collection::vec(category(), 1..3),
    ) {
        let filter: CategoryFilter = cats.iter().cloned().collect();
        prop_assert!(!filter.is_empty());
        for claim in filter_claims(&claims, window, &filter, now()) {
            prop_assert!(cats.contains(&claim.category), "admitted {:?}", claim.category);
        }
    }
}
