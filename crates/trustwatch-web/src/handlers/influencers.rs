//! Influencer list with add and content-scan actions.

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tracing::info;
use trustwatch_common::entities::PLATFORMS;
use trustwatch_common::Influencer;

use crate::render;
use crate::scope::ViewScope;
use crate::state::SharedState;
use crate::view::{abandoned, refresh, Flash, Notice, ViewState};

// ── Form input ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InfluencerForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub platform: String,
}

// ── Handlers ──────────────────────────────────────────────────────────────────

pub async fn influencers_page(
    State(state): State<SharedState>,
    Query(flash): Query<Flash>,
) -> Response {
    let scope = state.open_view();
    let notices: Vec<Notice> = flash.notice().into_iter().collect();
    remount(&state, &scope, &notices, None).await
}

pub async fn add_influencer(
    State(state): State<SharedState>,
    Form(form): Form<InfluencerForm>,
) -> Response {
    let scope = state.open_view();
    let name = form.name.trim();
    let platform = form.platform.trim();

    let notice = if name.is_empty() || platform.is_empty() {
        Notice::Error("Name and platform are required".to_string())
    } else {
        let Some(result) = scope.run(state.backend.add_influencer(name, platform)).await else {
            return abandoned();
        };
        match result {
            Ok(created) => {
                info!(id = %created.id, name = %created.name, "influencer added");
                return refresh("/influencers?notice=influencer_added");
            }
            Err(err) => Notice::failed(&err),
        }
    };

    // Keep the form open with what the user typed.
    remount(&state, &scope, &[notice], Some(&form)).await
}

pub async fn scan_influencer(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Response {
    let scope = state.open_view();
    let Some(result) = scope.run(state.backend.scan_influencer(&id)).await else {
        return abandoned();
    };
    match result {
        Ok(scan) => {
            info!(%id, new_claims = scan.claims.len(), "influencer scanned");
            refresh(&format!("/influencers?notice=scanned&found={}", scan.claims.len()))
        }
        Err(err) => remount(&state, &scope, &[Notice::failed(&err)], None).await,
    }
}

/// Re-run the page's initial fetch and render; `draft` re-opens the add form.
async fn remount(
    state: &SharedState,
    scope: &ViewScope,
    notices: &[Notice],
    draft: Option<&InfluencerForm>,
) -> Response {
    let Some(result) = scope.run(state.backend.list_influencers()).await else {
        return abandoned();
    };
    let view: ViewState<Vec<Influencer>> = result.into();
    Html(render_page(&view, notices, draft)).into_response()
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn render_page(
    view: &ViewState<Vec<Influencer>>,
    notices: &[Notice],
    draft: Option<&InfluencerForm>,
) -> String {
    let list_html = match view {
        ViewState::Failed(msg) => Notice::Error(msg.clone()).to_html(),
        ViewState::Ready(influencers) if influencers.is_empty() => {
            r#"<p class="text-muted">No influencers tracked yet. Add one to get started.</p>"#
                .to_string()
        }
        ViewState::Ready(influencers) => influencers.iter().map(render_influencer).collect(),
    };

    let body = format!(r#"
    {}
    {}
    {}
    <div class="grid-3">
        {}
    </div>"#,
        render::page_header("Influencers", "Track and analyze health influencers"),
        render::notices(notices),
        render_add_form(draft),
        list_html,
    );

    render::page("Influencers", "/influencers", &body)
}

fn render_influencer(inf: &Influencer) -> String {
    let segment = render::encode_segment(&inf.id);
    format!(r#"
        <div class="card">
            <div class="row">
                <div>
                    <a href="/influencers/{}" style="font-weight:700;">{}</a>
                    <div class="text-muted">{} · {} followers</div>
                </div>
                <span class="badge badge-success">{:.1}%</span>
            </div>
            {}
            <form method="post" action="/influencers/{}/scan" style="margin-top:1rem;">
                <button type="submit" class="btn btn-outline">Scan Latest Content</button>
            </form>
        </div>"#,
        segment,
        render::escape(&inf.name),
        render::escape(&inf.platform),
        render::grouped(inf.follower_count),
        inf.trust_score,
        render::progress_bar(inf.trust_score),
        segment,
    )
}

fn render_add_form(draft: Option<&InfluencerForm>) -> String {
    let empty = InfluencerForm::default();
    let form = draft.unwrap_or(&empty);
    let choices = std::iter::once(("", "Select Platform"))
        .chain(PLATFORMS.iter().map(|p| (*p, *p)));

    format!(r#"
    <details class="card"{}>
        <summary class="btn btn-primary">Add Influencer</summary>
        <form method="post" action="/influencers" style="margin-top:1rem;">
            <div class="form-group">
                <label for="name">Name</label>
                <input type="text" id="name" name="name" class="form-control" value="{}" required>
            </div>
            <div class="form-group">
                <label for="platform">Platform</label>
                <select id="platform" name="platform" class="form-control" required>{}</select>
            </div>
            <a href="/influencers" class="btn btn-outline">Cancel</a>
            <button type="submit" class="btn btn-primary">Add Influencer</button>
        </form>
    </details>"#,
        if draft.is_some() { " open" } else { "" },
        render::escape(&form.name),
        render::options(choices, &form.platform),
    )
}
