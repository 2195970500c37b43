//! Dashboard handler: landing page with the server's aggregate stats.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use trustwatch_analytics::derive::{category_share, status_distribution};
use trustwatch_common::Stats;

use crate::render;
use crate::state::SharedState;
use crate::view::{abandoned, Notice, ViewState};

pub async fn dashboard(State(state): State<SharedState>) -> Response {
    let scope = state.open_view();
    let Some(result) = scope.run(state.backend.stats()).await else {
        return abandoned();
    };
    let view: ViewState<Stats> = result.into();
    Html(render_dashboard(&view)).into_response()
}

/// A failed fetch renders the zeroed stats under an error banner.
fn render_dashboard(view: &ViewState<Stats>) -> String {
    let fallback = Stats::default();
    let stats = view.ready().unwrap_or(&fallback);
    let banner = view
        .error()
        .map(|msg| Notice::Error(msg.to_string()).to_html())
        .unwrap_or_default();

    let categories_html = {
        let rows = category_share(stats);
        if rows.is_empty() {
            r#"<p class="text-muted">No claims categorised yet.</p>"#.to_string()
        } else {
            rows.iter().map(|row| format!(r#"
            <div class="row">
                <span>{}</span>
                <span class="text-muted">{}</span>
            </div>{}"#,
                render::escape(&row.category),
                row.count,
                render::progress_bar(row.percentage),
            )).collect()
        }
    };

    let dist = status_distribution(stats);

    let body = format!(r#"
    {}
    {}
    <div class="stats-grid">
        {}
        {}
        {}
    </div>

    <div class="grid-2">
        <div class="card">
            <div class="card-header">Category Breakdown</div>
            {}
        </div>
        <div class="card">
            <div class="card-header">Claim Status Distribution</div>
            <div class="row">
                <span>Verified</span>
                <span class="badge badge-success">{} ({:.1}%)</span>
            </div>
            {}
            <div class="row">
                <span>Questionable</span>
                <span class="badge badge-warning">{} ({:.1}%)</span>
            </div>
            {}
        </div>
    </div>"#,
        render::page_header("Dashboard", "Overview of health claims and influencer trust"),
        banner,
        render::stat_card("Total Influencers", &render::grouped(stats.total_influencers)),
        render::stat_card("Claims Analyzed", &render::grouped(stats.total_claims)),
        render::stat_card("Avg Trust Score", &format!("{:.1}%", stats.avg_trust_score)),
        categories_html,
        dist.verified, dist.verified_pct,
        render::progress_bar(dist.verified_pct),
        dist.questionable, dist.questionable_pct,
        render::progress_bar(dist.questionable_pct),
    );

    render::page("Dashboard", "/", &body)
}
