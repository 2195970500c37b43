//! Category and time-window aggregation over fetched claims.
//!
//! Every percentage and mean is computed over the filtered claim set, and an
//! empty denominator yields 0.0 rather than NaN.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use trustwatch_common::Claim;

/// Trailing window applied to claim dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateWindow {
    #[default]
    AllTime,
    LastSevenDays,
}

impl DateWindow {
    /// Form value: `"all"` or `"week"`. Anything else is all time.
    pub fn from_param(value: &str) -> Self {
        match value {
            "week" => DateWindow::LastSevenDays,
            _ => DateWindow::AllTime,
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            DateWindow::AllTime => "all",
            DateWindow::LastSevenDays => "week",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DateWindow::AllTime => "All Time",
            DateWindow::LastSevenDays => "Last 7 Days",
        }
    }

    /// Whether a claim passes the date test at `now`.
    /// Under the seven-day window an unparsable date fails.
    pub fn admits(self, claim: &Claim, now: DateTime<Utc>) -> bool {
        match self {
            DateWindow::AllTime => true,
            DateWindow::LastSevenDays => match claim.parsed_date() {
                Some(date) => date >= now - Duration::days(7) && date <= now,
                None => false,
            },
        }
    }
}

/// Selected categories; empty means no filtering.
///
/// `""` is a member like any other: claims without a category carry it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter(BTreeSet<String>);

impl CategoryFilter {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.0.contains(category)
    }

    pub fn admits(&self, claim: &Claim) -> bool {
        self.0.is_empty() || self.0.contains(&claim.category)
    }
}

impl<S: Into<String>> FromIterator<S> for CategoryFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub category: String,
    pub avg_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryVolume {
    pub category: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    /// Distinct categories across all claims, in order of first appearance.
    pub categories: Vec<String>,
    pub filtered: Vec<Claim>,
    pub trust_by_category: Vec<CategoryScore>,
    pub volume_by_category: Vec<CategoryVolume>,
}

/// Distinct category values in order of first appearance.
pub fn distinct_categories(claims: &[Claim]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    claims
        .iter()
        .filter(|c| seen.insert(c.category.as_str()))
        .map(|c| c.category.clone())
        .collect()
}

pub fn filter_claims(
    claims: &[Claim],
    window: DateWindow,
    filter: &CategoryFilter,
    now: DateTime<Utc>,
) -> Vec<Claim> {
    claims
        .iter()
        .filter(|c| filter.admits(c) && window.admits(c, now))
        .cloned()
        .collect()
}

/// Mean trust score per category; 0.0 where a category has no filtered claims.
pub fn trust_by_category(categories: &[String], filtered: &[Claim]) -> Vec<CategoryScore> {
    categories
        .iter()
        .map(|category| {
            let (sum, n) = filtered
                .iter()
                .filter(|c| &c.category == category)
                .fold((0.0, 0usize), |(sum, n), c| (sum + c.trust_score, n + 1));
            let avg_score = if n == 0 { 0.0 } else { sum / n as f64 };
            CategoryScore { category: category.clone(), avg_score }
        })
        .collect()
}

/// Count and share of the filtered total per category; all shares 0.0 when nothing passed.
pub fn volume_by_category(categories: &[String], filtered: &[Claim]) -> Vec<CategoryVolume> {
    let total = filtered.len();
    categories
        .iter()
        .map(|category| {
            let count = filtered.iter().filter(|c| &c.category == category).count();
            let percentage = if total == 0 { 0.0 } else { count as f64 / total as f64 * 100.0 };
            CategoryVolume { category: category.clone(), count, percentage }
        })
        .collect()
}

/// Run the full pipeline. Pure: same inputs, same output; `claims` is untouched.
pub fn summarise(
    claims: &[Claim],
    window: DateWindow,
    filter: &CategoryFilter,
    now: DateTime<Utc>,
) -> AnalyticsSummary {
    let categories = distinct_categories(claims);
    let filtered = filter_claims(claims, window, filter, now);
    let trust_by_category = trust_by_category(&categories, &filtered);
    let volume_by_category = volume_by_category(&categories, &filtered);
    AnalyticsSummary { categories, filtered, trust_by_category, volume_by_category }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use trustwatch_common::VerificationStatus;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn claim(category: &str, trust_score: f64, date: &str) -> Claim {
        Claim {
            id: format!("{category}-{trust_score}"),
            influencer_id: "inf".to_string(),
            content: "something about health".to_string(),
            category: category.to_string(),
            verification_status: VerificationStatus::Verified,
            trust_score,
            source: "twitter".to_string(),
            date: date.to_string(),
        }
    }

    fn round1(v: f64) -> f64 {
        (v * 10.0).round() / 10.0
    }

    #[test]
    fn test_scenario_two_categories() {
        let claims = vec![
            claim("Nutrition", 80.0, "2024-06-01"),
            claim("Nutrition", 60.0, "2024-06-02"),
            claim("Fitness", 90.0, "2024-06-03"),
        ];
        let summary = summarise(&claims, DateWindow::AllTime, &CategoryFilter::none(), now());

        assert_eq!(summary.categories, vec!["Nutrition", "Fitness"]);
        assert_eq!(summary.trust_by_category[0].avg_score, 70.0);
        assert_eq!(summary.trust_by_category[1].avg_score, 90.0);
        assert_eq!(summary.volume_by_category[0].count, 2);
        assert_eq!(round1(summary.volume_by_category[0].percentage), 66.7);
        assert_eq!(round1(summary.volume_by_category[1].percentage), 33.3);
    }

    #[test]
    fn test_empty_input_produces_empty_summary() {
        let summary = summarise(&[], DateWindow::AllTime, &CategoryFilter::none(), now());
        assert!(summary.categories.is_empty());
        assert!(summary.filtered.is_empty());
        assert!(summary.trust_by_category.is_empty());
        assert!(summary.volume_by_category.is_empty());
    }

    #[test]
    fn test_percentages_sum_to_100_without_filters() {
        let claims = vec![
            claim("A", 10.0, "x"),
            claim("B", 20.0, "x"),
            claim("B", 30.0, "x"),
            claim("C", 40.0, "x"),
            claim("A", 50.0, "x"),
            claim("D", 60.0, "x"),
            claim("B", 70.0, "x"),
        ];
        let summary = summarise(&claims, DateWindow::AllTime, &CategoryFilter::none(), now());
        let total: f64 = summary.volume_by_category.iter().map(|v| v.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9, "got {total}");
    }

    #[test]
    fn test_all_percentages_zero_when_nothing_passes() {
        let claims = vec![claim("Nutrition", 80.0, "2020-01-01"), claim("Fitness", 70.0, "bogus")];
        let summary = summarise(&claims, DateWindow::LastSevenDays, &CategoryFilter::none(), now());
        assert!(summary.filtered.is_empty());
        assert_eq!(summary.volume_by_category.len(), 2);
        for v in &summary.volume_by_category {
            assert_eq!(v.count, 0);
            assert_eq!(v.percentage, 0.0);
        }
    }

    #[test]
    fn test_filtered_out_category_has_zero_mean_not_nan() {
        let claims = vec![claim("Nutrition", 80.0, "x"), claim("Fitness", 70.0, "x")];
        let filter: CategoryFilter = ["Nutrition"].into_iter().collect();
        let summary = summarise(&claims, DateWindow::AllTime, &filter, now());

        let fitness = summary.trust_by_category.iter().find(|s| s.category == "Fitness").unwrap();
        assert_eq!(fitness.avg_score, 0.0);
        assert!(!fitness.avg_score.is_nan());
    }

    #[test]
    fn test_category_filter_only_admits_selected() {
        let claims = vec![
            claim("Nutrition", 80.0, "x"),
            claim("Fitness", 70.0, "x"),
            claim("Sleep", 60.0, "x"),
            claim("Fitness", 50.0, "x"),
        ];
        let filter: CategoryFilter = ["Fitness", "Sleep"].into_iter().collect();
        let filtered = filter_claims(&claims, DateWindow::AllTime, &filter, now());
        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().all(|c| filter.contains(&c.category)));
    }

    #[test]
    fn test_blank_category_is_a_real_selection() {
        let claims = vec![claim("", 30.0, "x"), claim("Fitness", 70.0, "x")];
        let filter: CategoryFilter = [""].into_iter().collect();
        assert!(!filter.is_empty());

        let filtered = filter_claims(&claims, DateWindow::AllTime, &filter, now());
        let cats: Vec<&str> = filtered.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(cats, vec![""]);
    }

    #[test]
    fn test_seven_day_window_lower_bound_is_inclusive() {
        let at_edge = (now() - Duration::days(7)).to_rfc3339();
        let past_edge = (now() - Duration::days(7) - Duration::seconds(1)).to_rfc3339();
        let claims = vec![claim("A", 1.0, &at_edge), claim("B", 2.0, &past_edge)];

        let filtered =
            filter_claims(&claims, DateWindow::LastSevenDays, &CategoryFilter::none(), now());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].category, "A");
    }

    #[test]
    fn test_seven_day_window_excludes_unparsable_and_future_dates() {
        let future = (now() + Duration::hours(1)).to_rfc3339();
        let claims = vec![
            claim("A", 1.0, "not a date"),
            claim("B", 2.0, &future),
            claim("C", 3.0, "2024-06-14"),
        ];
        let filtered =
            filter_claims(&claims, DateWindow::LastSevenDays, &CategoryFilter::none(), now());
        let cats: Vec<&str> = filtered.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(cats, vec!["C"]);
    }

    #[test]
    fn test_all_time_ignores_dates() {
        let claims = vec![claim("A", 1.0, "not a date"), claim("B", 2.0, "1999-01-01")];
        let filtered = filter_claims(&claims, DateWindow::AllTime, &CategoryFilter::none(), now());
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_summarise_is_idempotent_and_leaves_input_alone() {
        let claims = vec![
            claim("Nutrition", 80.0, "2024-06-14"),
            claim("Fitness", 70.0, "2024-06-01"),
        ];
        let before = claims.clone();
        let filter: CategoryFilter = ["Fitness"].into_iter().collect();
        let a = summarise(&claims, DateWindow::LastSevenDays, &filter, now());
        let b = summarise(&claims, DateWindow::LastSevenDays, &filter, now());
        assert_eq!(a, b);
        assert_eq!(claims, before);
    }

    #[test]
    fn test_window_param_parsing() {
        assert_eq!(DateWindow::from_param("week"), DateWindow::LastSevenDays);
        assert_eq!(DateWindow::from_param("all"), DateWindow::AllTime);
        assert_eq!(DateWindow::from_param("fortnight"), DateWindow::AllTime);
        assert_eq!(DateWindow::LastSevenDays.as_param(), "week");
    }
}
