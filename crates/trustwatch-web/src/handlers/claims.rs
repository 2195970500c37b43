//! Claims across all influencers, with an add-claim form.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tracing::info;
use trustwatch_api::fanout::influencers_with_claims;
use trustwatch_common::{Claim, Influencer};

use crate::render;
use crate::scope::ViewScope;
use crate::state::SharedState;
use crate::view::{abandoned, refresh, Flash, Notice, ViewState};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClaimForm {
    #[serde(default)]
    pub influencer_id: String,
    #[serde(default)]
    pub content: String,
}

pub async fn claims_page(
    State(state): State<SharedState>,
    Query(flash): Query<Flash>,
) -> Response {
    let scope = state.open_view();
    let notices: Vec<Notice> = flash.notice().into_iter().collect();
    remount(&state, &scope, &notices, None).await
}

pub async fn add_claim(
    State(state): State<SharedState>,
    Form(form): Form<ClaimForm>,
) -> Response {
    let scope = state.open_view();
    let content = form.content.trim();

    let notice = if form.influencer_id.is_empty() || content.is_empty() {
        Notice::Error("Choose an influencer and enter the claim".to_string())
    } else {
        let Some(result) = scope
            .run(state.backend.add_claim(&form.influencer_id, content))
            .await
        else {
            return abandoned();
        };
        match result {
            Ok(claim) => {
                info!(id = %claim.id, influencer = %claim.influencer_id, "claim added");
                return refresh("/claims?notice=claim_added");
            }
            Err(err) => Notice::failed(&err),
        }
    };

    remount(&state, &scope, &[notice], Some(&form)).await
}

async fn remount(
    state: &SharedState,
    scope: &ViewScope,
    notices: &[Notice],
    draft: Option<&ClaimForm>,
) -> Response {
    let Some(result) = scope.run(influencers_with_claims(state.backend.as_ref())).await else {
        return abandoned();
    };
    let view: ViewState<(Vec<Influencer>, Vec<Claim>)> = result.into();
    Html(render_page(&view, notices, draft)).into_response()
}

fn render_page(
    view: &ViewState<(Vec<Influencer>, Vec<Claim>)>,
    notices: &[Notice],
    draft: Option<&ClaimForm>,
) -> String {
    let no_influencers = Vec::new();
    let influencers = view.ready().map(|(infs, _)| infs).unwrap_or(&no_influencers);
    let names: HashMap<&str, &str> =
        influencers.iter().map(|i| (i.id.as_str(), i.name.as_str())).collect();

    let list_html = match view {
        ViewState::Failed(msg) => Notice::Error(msg.clone()).to_html(),
        ViewState::Ready((_, claims)) if claims.is_empty() => {
            r#"<p class="text-muted">No claims recorded yet.</p>"#.to_string()
        }
        ViewState::Ready((_, claims)) => claims
            .iter()
            .map(|claim| render_claim(claim, names.get(claim.influencer_id.as_str()).copied()))
            .collect(),
    };

    let body = format!(r#"
    {}
    {}
    {}
    <div class="card">
        {}
    </div>"#,
        render::page_header("Claims", "Health claims made by tracked influencers"),
        render::notices(notices),
        render_add_form(influencers, draft),
        list_html,
    );

    render::page("Claims", "/claims", &body)
}

fn render_claim(claim: &Claim, influencer: Option<&str>) -> String {
    format!(r#"
        <div class="row">
            <div>
                <div>{}</div>
                <div class="text-muted">{} · {} · {}</div>
            </div>
            {}
        </div>"#,
        render::escape(&claim.content),
        render::escape(influencer.unwrap_or("Unknown influencer")),
        render::escape(&claim.category),
        render::escape(&claim.date),
        render::status_badge(&claim.verification_status),
    )
}

fn render_add_form(influencers: &[Influencer], draft: Option<&ClaimForm>) -> String {
    let empty = ClaimForm::default();
    let form = draft.unwrap_or(&empty);
    let choices = std::iter::once(("", "Select Influencer"))
        .chain(influencers.iter().map(|i| (i.id.as_str(), i.name.as_str())));

    format!(r#"
    <details class="card"{}>
        <summary class="btn btn-primary">Add Claim</summary>
        <form method="post" action="/claims" style="margin-top:1rem;">
            <div class="form-group">
                <label for="influencer_id">Influencer</label>
                <select id="influencer_id" name="influencer_id" class="form-control" required>{}</select>
            </div>
            <div class="form-group">
                <label for="content">Claim</label>
                <textarea id="content" name="content" class="form-control" rows="4" required>{}</textarea>
            </div>
            <a href="/claims" class="btn btn-outline">Cancel</a>
            <button type="submit" class="btn btn-primary">Add Claim</button>
        </form>
    </details>"#,
        if draft.is_some() { " open" } else { "" },
        render::options(choices, &form.influencer_id),
        render::escape(&form.content),
    )
}
