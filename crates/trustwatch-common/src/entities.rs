//! Entity types mirroring the backend's JSON payloads.
//! The dashboard only ever holds transient, read-only copies of these.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unrecognised fields of a loosely specified payload.
pub type Extra = Map<String, Value>;

// ---------------------------------------------------------------------------
// Influencer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Influencer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub follower_count: u64,
    /// 0–100, computed by the backend.
    #[serde(default)]
    pub trust_score: f64,
    pub platform: String,
}

/// Platforms offered by the add-influencer form. The field itself is open.
pub const PLATFORMS: [&str; 3] = ["Instagram", "YouTube", "Twitter"];

// ---------------------------------------------------------------------------
// Claim
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claim {
    pub id: String,
    pub influencer_id: String,
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub verification_status: VerificationStatus,
    #[serde(default)]
    pub trust_score: f64,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub date: String,
}

impl Claim {
    /// Parse `date` as a UTC instant.
    ///
    /// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.f]` (read as UTC) and a
    /// bare `YYYY-MM-DD` (midnight UTC). Anything else is `None`.
    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        parse_claim_date(&self.date)
    }
}

pub fn parse_claim_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Claim verification state. Unknown statuses are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VerificationStatus {
    Verified,
    Questionable,
    Debunked,
    #[default]
    Unknown,
    Other(String),
}

impl VerificationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            VerificationStatus::Verified => "Verified",
            VerificationStatus::Questionable => "Questionable",
            VerificationStatus::Debunked => "Debunked",
            VerificationStatus::Unknown => "",
            VerificationStatus::Other(s) => s,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationStatus::Verified)
    }
}

impl From<String> for VerificationStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Verified" => VerificationStatus::Verified,
            "Questionable" => VerificationStatus::Questionable,
            "Debunked" => VerificationStatus::Debunked,
            "" => VerificationStatus::Unknown,
            _ => VerificationStatus::Other(s),
        }
    }
}

impl From<VerificationStatus> for String {
    fn from(status: VerificationStatus) -> Self {
        match status {
            VerificationStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Aggregate stats (server-computed)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Stats {
    #[serde(default)]
    pub total_influencers: u64,
    #[serde(default)]
    pub total_claims: u64,
    #[serde(default)]
    pub verified_claims: u64,
    #[serde(default)]
    pub avg_trust_score: f64,
    #[serde(default)]
    pub categories: BTreeMap<String, u64>,
}

// ---------------------------------------------------------------------------
// Research configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResearchConfig {
    #[serde(rename = "dateRange")]
    pub date_range: String,
    #[serde(rename = "claimLimit")]
    pub claim_limit: u32,
    pub journals: Vec<String>,
    pub categories: Vec<String>,
    pub sources: SourceFilters,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceFilters {
    pub scientific_journals: Vec<String>,
    pub social_media: Vec<String>,
    pub claim_types: Vec<String>,
    /// 0.0–1.0
    pub min_confidence: f64,
}

pub const DATE_RANGES: [(&str, &str); 4] = [
    ("7d", "Last 7 days"),
    ("30d", "Last 30 days"),
    ("90d", "Last 90 days"),
    ("all", "All time"),
];
pub const JOURNALS: [&str; 4] = ["PubMed", "ScienceDirect", "NEJM", "The Lancet"];
pub const SOCIAL_MEDIA: [&str; 3] = ["Twitter", "YouTube", "Instagram"];
pub const CLAIM_TYPES: [&str; 2] = ["Explicit", "Implicit"];
pub const RESEARCH_CATEGORIES: [&str; 4] = ["Nutrition", "Medicine", "Mental Health", "Fitness"];
pub const CLAIM_LIMIT_RANGE: (u32, u32) = (10, 1000);

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            date_range: "7d".to_string(),
            claim_limit: 50,
            journals: strings(&["pubmed", "sciencedirect", "nejm"]),
            categories: strings(&RESEARCH_CATEGORIES),
            sources: SourceFilters::default(),
        }
    }
}

impl Default for SourceFilters {
    fn default() -> Self {
        Self {
            scientific_journals: strings(&["pubmed", "sciencedirect", "nejm"]),
            social_media: strings(&["twitter", "youtube", "instagram"]),
            claim_types: strings(&["explicit", "implicit"]),
            min_confidence: 0.7,
        }
    }
}

// ---------------------------------------------------------------------------
// Loosely structured responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScanResult {
    #[serde(default)]
    pub claims: Vec<Claim>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BatchResults {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsReport {
    #[serde(default)]
    pub overall_stats: OverallStats,
    #[serde(default)]
    pub trends: Trends,
    #[serde(default)]
    pub influencer_impact: Value,
    #[serde(default)]
    pub category_analysis: Value,
    #[serde(default)]
    pub trust_metrics: Value,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OverallStats {
    #[serde(default)]
    pub total_claims: u64,
    #[serde(default)]
    pub avg_trust_score: f64,
    #[serde(default)]
    pub verified_percentage: f64,
    #[serde(default)]
    pub claims_per_day: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Trends {
    #[serde(default)]
    pub daily_volume: BTreeMap<String, f64>,
    #[serde(default)]
    pub moving_average: BTreeMap<String, f64>,
    #[serde(default)]
    pub trend: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InfluencerAnalysis {
    pub name: Option<String>,
    pub platform: Option<String>,
    pub trust_score: Option<f64>,
    pub total_claims: Option<u64>,
    pub verified_claims: Option<u64>,
    #[serde(default)]
    pub category_breakdown: BTreeMap<String, u64>,
    #[serde(default)]
    pub status_breakdown: BTreeMap<String, u64>,
    #[serde(default)]
    pub recent_claims: Vec<RecentClaim>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecentClaim {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub verification_status: VerificationStatus,
    pub trust_score: Option<f64>,
    pub date: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Answer to a free-text, podcast or journal analysis request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReply {
    pub status: Option<String>,
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

pub type ClaimAnalysis = AnalysisReply;
pub type PodcastAnalysis = AnalysisReply;
pub type JournalValidation = AnalysisReply;
pub type ConfigAck = AnalysisReply;

impl AnalysisReply {
    /// Pretty JSON of the full reply, known fields included.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// The research configuration echoed back by `/api/config`, if any.
    /// Looks under a `config` key first, then at the top level.
    pub fn echoed_config(&self) -> Option<ResearchConfig> {
        if let Some(nested) = self.extra.get("config") {
            return serde_json::from_value(nested.clone()).ok();
        }
        serde_json::from_value(Value::Object(self.extra.clone())).ok()
    }
}
