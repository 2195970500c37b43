//! reqwest-backed gateway client.
//!
//! Endpoints are all relative to one fixed origin, [`API_BASE_URL`]. Scalar
//! inputs travel as query parameters, ids as percent-encoded path segments,
//! structured inputs as JSON bodies.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument, warn};
use url::Url;

use trustwatch_common::entities::{
    AnalyticsReport, BatchResults, Claim, ClaimAnalysis, ConfigAck, Influencer,
    InfluencerAnalysis, JournalValidation, PodcastAnalysis, ResearchConfig, ScanResult, Stats,
};
use trustwatch_common::error::{ApiError, ApiResult, TrustwatchError};
use trustwatch_common::operation::{Operation, Verb};

use crate::backend::Backend;

pub const API_BASE_URL: &str = "https://backend-fullstack-wn9a.onrender.com";

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    /// Client for the production backend.
    pub fn new() -> Result<Self, TrustwatchError> {
        Self::with_base_url(API_BASE_URL)
    }

    /// Client for an arbitrary origin. Used by tests against a local fake backend.
    pub fn with_base_url(base: &str) -> Result<Self, TrustwatchError> {
        let base = Url::parse(base)
            .map_err(|e| TrustwatchError::Config(format!("Invalid backend origin {base}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(TrustwatchError::Config(format!(
                "Backend origin {base} cannot be a base URL"
            )));
        }
        let client = Client::builder()
            .user_agent(concat!("trustwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TrustwatchError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolve an operation's path against the origin, substituting `{id}`.
    pub fn url_for(&self, op: Operation, id: Option<&str>) -> ApiResult<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::RequestFailed(op))?;
            segments.pop_if_empty();
            for part in op.path_template().split('/').filter(|p| !p.is_empty()) {
                if part == "{id}" {
                    segments.push(id.ok_or(ApiError::RequestFailed(op))?);
                } else {
                    segments.push(part);
                }
            }
        }
        Ok(url)
    }

    fn request(&self, op: Operation, id: Option<&str>) -> ApiResult<RequestBuilder> {
        let url = self.url_for(op, id)?;
        Ok(match op.verb() {
            Verb::Get => self.client.get(url),
            Verb::Post => self.client.post(url),
        })
    }

    /// Send once; collapse every failure into `RequestFailed(op)`.
    async fn execute<T: DeserializeOwned>(
        &self,
        op: Operation,
        req: RequestBuilder,
    ) -> ApiResult<T> {
        let resp = req.send().await.map_err(|e| {
            warn!(operation = %op, error = %e, "backend request failed");
            ApiError::RequestFailed(op)
        })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(operation = %op, %status, "backend returned non-success status");
            return Err(ApiError::RequestFailed(op));
        }

        resp.json::<T>().await.map_err(|e| {
            warn!(operation = %op, error = %e, "backend response could not be decoded");
            ApiError::RequestFailed(op)
        })
    }
}

#[async_trait]
impl Backend for ApiClient {
    #[instrument(skip(self))]
    async fn list_influencers(&self) -> ApiResult<Vec<Influencer>> {
        let op = Operation::ListInfluencers;
        let influencers: Vec<Influencer> = self.execute(op, self.request(op, None)?).await?;
        debug!(count = influencers.len(), "fetched influencers");
        Ok(influencers)
    }

    #[instrument(skip(self))]
    async fn add_influencer(&self, name: &str, platform: &str) -> ApiResult<Influencer> {
        let op = Operation::AddInfluencer;
        let req = self.request(op, None)?.query(&[("name", name), ("platform", platform)]);
        self.execute(op, req).await
    }

    #[instrument(skip(self))]
    async fn list_claims(&self, influencer_id: &str) -> ApiResult<Vec<Claim>> {
        let op = Operation::ListClaims;
        let claims: Vec<Claim> = self.execute(op, self.request(op, Some(influencer_id))?).await?;
        debug!(count = claims.len(), "fetched claims");
        Ok(claims)
    }

    #[instrument(skip(self, content))]
    async fn add_claim(&self, influencer_id: &str, content: &str) -> ApiResult<Claim> {
        let op = Operation::AddClaim;
        let req = self
            .request(op, None)?
            .query(&[("influencer_id", influencer_id), ("content", content)]);
        self.execute(op, req).await
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> ApiResult<Stats> {
        let op = Operation::GetStats;
        self.execute(op, self.request(op, None)?).await
    }

    #[instrument(skip(self, content))]
    async fn analyze_claim(&self, content: &str) -> ApiResult<ClaimAnalysis> {
        let op = Operation::AnalyzeClaim;
        let req = self.request(op, None)?.query(&[("content", content)]);
        self.execute(op, req).await
    }

    #[instrument(skip(self, config))]
    async fn update_research_config(&self, config: &ResearchConfig) -> ApiResult<ConfigAck> {
        let op = Operation::UpdateResearchConfig;
        let req = self.request(op, None)?.json(config);
        self.execute(op, req).await
    }

    #[instrument(skip(self))]
    async fn scan_influencer(&self, influencer_id: &str) -> ApiResult<ScanResult> {
        let op = Operation::ScanInfluencer;
        let result: ScanResult = self.execute(op, self.request(op, Some(influencer_id))?).await?;
        debug!(new_claims = result.claims.len(), "scan finished");
        Ok(result)
    }

    #[instrument(skip(self, claims), fields(batch = claims.len()))]
    async fn batch_process_claims(&self, claims: &[String]) -> ApiResult<BatchResults> {
        let op = Operation::BatchProcessClaims;
        let req = self.request(op, None)?.json(claims);
        self.execute(op, req).await
    }

    #[instrument(skip(self))]
    async fn analytics_report(&self) -> ApiResult<AnalyticsReport> {
        let op = Operation::GetAnalyticsReport;
        self.execute(op, self.request(op, None)?).await
    }

    #[instrument(skip(self))]
    async fn influencer_analysis(&self, influencer_id: &str) -> ApiResult<InfluencerAnalysis> {
        let op = Operation::GetInfluencerAnalysis;
        self.execute(op, self.request(op, Some(influencer_id))?).await
    }

    #[instrument(skip(self))]
    async fn analyze_podcast(&self, url: &str) -> ApiResult<PodcastAnalysis> {
        let op = Operation::AnalyzePodcast;
        let req = self.request(op, None)?.query(&[("url", url)]);
        self.execute(op, req).await
    }

    #[instrument(skip(self, claim))]
    async fn validate_with_journals(&self, claim: &str) -> ApiResult<JournalValidation> {
        let op = Operation::ValidateWithJournals;
        let req = self.request(op, None)?.json(&json!({ "claim": claim }));
        self.execute(op, req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_client_targets_the_fixed_origin() {
        let client = ApiClient::new().unwrap();
        let url = client.url_for(Operation::GetStats, None).unwrap();
        assert_eq!(url.as_str(), "https://backend-fullstack-wn9a.onrender.com/api/stats");
    }

    #[test]
    fn id_is_percent_encoded_as_one_segment() {
        let client = ApiClient::with_base_url("http://127.0.0.1:9").unwrap();
        let url = client.url_for(Operation::ScanInfluencer, Some("a/b c")).unwrap();
        assert_eq!(url.path(), "/api/influencers/a%2Fb%20c/scan");
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let client = ApiClient::with_base_url("http://127.0.0.1:9/proxy/").unwrap();
        let url = client.url_for(Operation::ListClaims, Some("42")).unwrap();
        assert_eq!(url.path(), "/proxy/api/claims/42");
    }

    #[test]
    fn missing_id_is_a_request_failure() {
        let client = ApiClient::with_base_url("http://127.0.0.1:9").unwrap();
        let err = client.url_for(Operation::ListClaims, None).unwrap_err();
        assert_eq!(err, ApiError::RequestFailed(Operation::ListClaims));
    }

    #[test]
    fn rejects_non_base_origin() {
        assert!(ApiClient::with_base_url("mailto:someone@example.com").is_err());
    }
}
