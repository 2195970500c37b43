//! Single influencer: profile, claim totals, claim list and the server's analysis.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use trustwatch_analytics::derive::influencer_claim_summary;
use trustwatch_common::entities::InfluencerAnalysis;
use trustwatch_common::{ApiResult, Claim, Influencer};

use crate::render;
use crate::state::SharedState;
use crate::view::{abandoned, Notice, ViewState};

pub async fn influencer_detail(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Response {
    let scope = state.open_view();
    let backend = state.backend.as_ref();

    let Some((profile, analysis)) = scope
        .run(async {
            let profile = async {
                let (influencers, claims) =
                    tokio::try_join!(backend.list_influencers(), backend.list_claims(&id))?;
                let influencer = influencers.into_iter().find(|inf| inf.id == id);
                ApiResult::Ok((influencer, claims))
            };
            tokio::join!(profile, backend.influencer_analysis(&id))
        })
        .await
    else {
        return abandoned();
    };

    let profile: ViewState<(Option<Influencer>, Vec<Claim>)> = profile.into();
    let analysis: ViewState<InfluencerAnalysis> = analysis.into();

    let status = match profile.ready() {
        Some((None, _)) => StatusCode::NOT_FOUND,
        _ => StatusCode::OK,
    };
    (status, Html(render_page(&id, &profile, &analysis))).into_response()
}

fn render_page(
    id: &str,
    profile: &ViewState<(Option<Influencer>, Vec<Claim>)>,
    analysis: &ViewState<InfluencerAnalysis>,
) -> String {
    let body = match profile {
        ViewState::Failed(msg) => format!("{}{}",
            render::page_header("Influencer", id),
            Notice::Error(msg.clone()).to_html(),
        ),
        ViewState::Ready((None, _)) => format!("{}{}",
            render::page_header("Influencer", id),
            Notice::Error("Influencer not found".to_string()).to_html(),
        ),
        ViewState::Ready((Some(influencer), claims)) => {
            render_profile(influencer, claims, analysis)
        }
    };
    render::page("Influencer", "/influencers", &body)
}

fn render_profile(
    influencer: &Influencer,
    claims: &[Claim],
    analysis: &ViewState<InfluencerAnalysis>,
) -> String {
    let totals = influencer_claim_summary(claims);

    let claims_html: String = if claims.is_empty() {
        r#"<p class="text-muted">No claims recorded for this influencer.</p>"#.to_string()
    } else {
        claims.iter().map(|claim| format!(r#"
            <div class="row">
                <div>
                    <div>{}</div>
                    <div class="text-muted">{} · {:.1}% · {}</div>
                </div>
                {}
            </div>"#,
            render::escape(&claim.content),
            render::escape(&claim.category),
            claim.trust_score,
            render::escape(&claim.date),
            render::status_badge(&claim.verification_status),
        )).collect()
    };

    format!(r#"
    {}
    <div class="stats-grid">
        {}
        {}
        {}
    </div>
    <div class="card">
        <div class="card-header">Claims</div>
        {}
    </div>
    {}"#,
        render::page_header(
            &influencer.name,
            &format!(
                "{} · {} followers",
                influencer.platform,
                render::grouped(influencer.follower_count),
            ),
        ),
        render::stat_card("Trust Score", &format!("{:.1}%", influencer.trust_score)),
        render::stat_card("Total Claims", &totals.total.to_string()),
        render::stat_card("Verified Claims", &totals.verified.to_string()),
        claims_html,
        render_analysis(analysis),
    )
}

fn render_analysis(analysis: &ViewState<InfluencerAnalysis>) -> String {
    let inner = match analysis {
        ViewState::Failed(_) => {
            r#"<p class="text-muted">Server analysis unavailable.</p>"#.to_string()
        }
        ViewState::Ready(a) => {
            let breakdown = |title: &str, rows: &BTreeMap<String, u64>| -> String {
                if rows.is_empty() {
                    return String::new();
                }
                let items: String = rows.iter().map(|(k, v)| format!(
                    r#"<div class="row"><span>{}</span><span class="text-muted">{}</span></div>"#,
                    render::escape(k), v,
                )).collect();
                format!(r#"<div><h3>{}</h3>{}</div>"#, render::escape(title), items)
            };
            let recent: String = a.recent_claims.iter().map(|c| format!(
                r#"<div class="row"><span>{}</span>{}</div>"#,
                render::escape(&c.content),
                render::status_badge(&c.verification_status),
            )).collect();
            format!(r#"<div class="grid-2">{}{}</div>{}"#,
                breakdown("By Category", &a.category_breakdown),
                breakdown("By Status", &a.status_breakdown),
                recent,
            )
        }
    };
    format!(r#"<div class="card"><div class="card-header">Server Analysis</div>{}</div>"#, inner)
}
