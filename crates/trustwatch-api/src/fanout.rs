//! Per-influencer claim fan-out.

use futures::future::try_join_all;
use tracing::debug;

use trustwatch_common::entities::{Claim, Influencer};
use trustwatch_common::ApiResult;

use crate::backend::Backend;

/// Fetch the claims of every influencer concurrently and flatten them.
///
/// Requests complete in any order; the result follows the order of
/// `influencers`. The first failure fails the whole join.
pub async fn claims_for_all(
    backend: &dyn Backend,
    influencers: &[Influencer],
) -> ApiResult<Vec<Claim>> {
    let per_influencer = try_join_all(
        influencers.iter().map(|inf| backend.list_claims(&inf.id)),
    )
    .await?;

    let claims: Vec<Claim> = per_influencer.into_iter().flatten().collect();
    debug!(influencers = influencers.len(), claims = claims.len(), "flattened claims");
    Ok(claims)
}

/// Influencers followed by all of their claims.
pub async fn influencers_with_claims(
    backend: &dyn Backend,
) -> ApiResult<(Vec<Influencer>, Vec<Claim>)> {
    let influencers = backend.list_influencers().await?;
    let claims = claims_for_all(backend, &influencers).await?;
    Ok((influencers, claims))
}
