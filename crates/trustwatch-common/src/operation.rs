//! Backend capabilities consumed by the dashboard.
//! One variant per HTTP endpoint; the gateway client and the error type both key off it.

use std::fmt;

use serde::Serialize;

/// HTTP verb of a backend operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verb {
    Get,
    Post,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ListInfluencers,
    AddInfluencer,
    ListClaims,
    AddClaim,
    GetStats,
    AnalyzeClaim,
    UpdateResearchConfig,
    ScanInfluencer,
    BatchProcessClaims,
    GetAnalyticsReport,
    GetInfluencerAnalysis,
    AnalyzePodcast,
    ValidateWithJournals,
}

impl Operation {
    pub const ALL: [Operation; 13] = [
        Operation::ListInfluencers,
        Operation::AddInfluencer,
        Operation::ListClaims,
        Operation::AddClaim,
        Operation::GetStats,
        Operation::AnalyzeClaim,
        Operation::UpdateResearchConfig,
        Operation::ScanInfluencer,
        Operation::BatchProcessClaims,
        Operation::GetAnalyticsReport,
        Operation::GetInfluencerAnalysis,
        Operation::AnalyzePodcast,
        Operation::ValidateWithJournals,
    ];

    pub fn verb(self) -> Verb {
        match self {
            Operation::AddInfluencer
            | Operation::AddClaim
            | Operation::UpdateResearchConfig
            | Operation::ScanInfluencer
            | Operation::BatchProcessClaims
            | Operation::ValidateWithJournals => Verb::Post,
            _ => Verb::Get,
        }
    }

    /// Path template; `{id}` is substituted with a percent-encoded segment.
    pub fn path_template(self) -> &'static str {
        match self {
            Operation::ListInfluencers | Operation::AddInfluencer => "/api/influencers",
            Operation::ListClaims => "/api/claims/{id}",
            Operation::AddClaim => "/api/claims",
            Operation::GetStats => "/api/stats",
            Operation::AnalyzeClaim => "/api/analyze",
            Operation::UpdateResearchConfig => "/api/config",
            Operation::ScanInfluencer => "/api/influencers/{id}/scan",
            Operation::BatchProcessClaims => "/api/batch-process",
            Operation::GetAnalyticsReport => "/api/analytics/report",
            Operation::GetInfluencerAnalysis => "/api/influencers/{id}/analyze",
            Operation::AnalyzePodcast => "/api/analyze/podcast",
            Operation::ValidateWithJournals => "/api/validate/journals",
        }
    }

    /// Static description carried by a failed request.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::ListInfluencers => "Failed to fetch influencers",
            Operation::AddInfluencer => "Failed to add influencer",
            Operation::ListClaims => "Failed to fetch claims",
            Operation::AddClaim => "Failed to add claim",
            Operation::GetStats => "Failed to fetch stats",
            Operation::AnalyzeClaim => "Failed to analyze claim",
            Operation::UpdateResearchConfig => "Failed to update research configuration",
            Operation::ScanInfluencer => "Failed to scan influencer content",
            Operation::BatchProcessClaims => "Failed to process claims batch",
            Operation::GetAnalyticsReport => "Failed to fetch analytics report",
            Operation::GetInfluencerAnalysis => "Failed to get influencer analysis",
            Operation::AnalyzePodcast => "Failed to analyze podcast",
            Operation::ValidateWithJournals => "Failed to validate with journals",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ListInfluencers => "list_influencers",
            Operation::AddInfluencer => "add_influencer",
            Operation::ListClaims => "list_claims",
            Operation::AddClaim => "add_claim",
            Operation::GetStats => "get_stats",
            Operation::AnalyzeClaim => "analyze_claim",
            Operation::UpdateResearchConfig => "update_research_config",
            Operation::ScanInfluencer => "scan_influencer",
            Operation::BatchProcessClaims => "batch_process_claims",
            Operation::GetAnalyticsReport => "get_analytics_report",
            Operation::GetInfluencerAnalysis => "get_influencer_analysis",
            Operation::AnalyzePodcast => "analyze_podcast",
            Operation::ValidateWithJournals => "validate_with_journals",
        };
        f.write_str(name)
    }
}
