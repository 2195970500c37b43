//! Small per-page derivations: dashboard breakdowns and influencer totals.

use serde::Serialize;
use trustwatch_common::{Claim, Stats, VerificationStatus};

/// Share of `part` in `total` as a percentage; 0.0 when `total` is 0.
pub fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusDistribution {
    pub verified: u64,
    /// Everything not verified.
    pub questionable: u64,
    pub verified_pct: f64,
    pub questionable_pct: f64,
}

/// Verified vs. not-yet-verified split of the server totals.
pub fn status_distribution(stats: &Stats) -> StatusDistribution {
    let total = stats.total_claims;
    let verified = stats.verified_claims.min(total);
    let questionable = total.saturating_sub(verified);
    StatusDistribution {
        verified,
        questionable,
        verified_pct: percent(verified, total),
        questionable_pct: percent(questionable, total),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub count: u64,
    pub percentage: f64,
}

/// Dashboard category rows, share taken over `total_claims`.
pub fn category_share(stats: &Stats) -> Vec<CategoryShare> {
    stats
        .categories
        .iter()
        .map(|(category, &count)| CategoryShare {
            category: category.clone(),
            count,
            percentage: percent(count, stats.total_claims),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClaimSummary {
    pub total: usize,
    pub verified: usize,
}

pub fn influencer_claim_summary(claims: &[Claim]) -> ClaimSummary {
    ClaimSummary {
        total: claims.len(),
        verified: claims.iter().filter(|c| c.verification_status.is_verified()).count(),
    }
}

/// Display tone of a verification status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Positive,
    Caution,
    Negative,
    Neutral,
}

impl StatusTone {
    pub fn of(status: &VerificationStatus) -> Self {
        match status {
            VerificationStatus::Verified => StatusTone::Positive,
            VerificationStatus::Questionable => StatusTone::Caution,
            VerificationStatus::Debunked => StatusTone::Negative,
            _ => StatusTone::Neutral,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            StatusTone::Positive => "success",
            StatusTone::Caution => "warning",
            StatusTone::Negative => "danger",
            StatusTone::Neutral => "outline",
        }
    }
}
