//! The gateway seam: one async method per backend capability.

use async_trait::async_trait;
use trustwatch_common::entities::{
    AnalyticsReport, BatchResults, Claim, ClaimAnalysis, ConfigAck, Influencer,
    InfluencerAnalysis, JournalValidation, PodcastAnalysis, ResearchConfig, ScanResult, Stats,
};
use trustwatch_common::ApiResult;

/// Common interface for the remote trust-analysis service.
///
/// Every method is a single attempt: no retry, no timeout, no deduplication.
/// Failures are always `ApiError::RequestFailed` naming the operation.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /api/influencers`
    async fn list_influencers(&self) -> ApiResult<Vec<Influencer>>;

    /// `POST /api/influencers?name=&platform=`
    async fn add_influencer(&self, name: &str, platform: &str) -> ApiResult<Influencer>;

    /// `GET /api/claims/{influencer_id}`
    async fn list_claims(&self, influencer_id: &str) -> ApiResult<Vec<Claim>>;

    /// `POST /api/claims?influencer_id=&content=`
    async fn add_claim(&self, influencer_id: &str, content: &str) -> ApiResult<Claim>;

    /// `GET /api/stats`
    async fn stats(&self) -> ApiResult<Stats>;

    /// `GET /api/analyze?content=`
    async fn analyze_claim(&self, content: &str) -> ApiResult<ClaimAnalysis>;

    /// `POST /api/config` with the whole configuration as JSON.
    async fn update_research_config(&self, config: &ResearchConfig) -> ApiResult<ConfigAck>;

    /// `POST /api/influencers/{id}/scan`
    async fn scan_influencer(&self, influencer_id: &str) -> ApiResult<ScanResult>;

    /// `POST /api/batch-process` with a JSON array of claim texts.
    async fn batch_process_claims(&self, claims: &[String]) -> ApiResult<BatchResults>;

    /// `GET /api/analytics/report`
    async fn analytics_report(&self) -> ApiResult<AnalyticsReport>;

    /// `GET /api/influencers/{id}/analyze`
    async fn influencer_analysis(&self, influencer_id: &str) -> ApiResult<InfluencerAnalysis>;

    /// `GET /api/analyze/podcast?url=`
    async fn analyze_podcast(&self, url: &str) -> ApiResult<PodcastAnalysis>;

    /// `POST /api/validate/journals` with `{"claim": ...}`.
    async fn validate_with_journals(&self, claim: &str) -> ApiResult<JournalValidation>;
}
