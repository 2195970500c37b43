//! Analytics page: client-side category aggregation plus the server report.
//!
//! Filters are plain GET parameters (`range=all|week`, repeated `category=`),
//! so changing them is just another mount.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::Query;
use chrono::Utc;
use serde::Deserialize;
use trustwatch_analytics::pipeline::{summarise, AnalyticsSummary, CategoryFilter, DateWindow};
use trustwatch_api::fanout::influencers_with_claims;
use trustwatch_common::entities::AnalyticsReport;

use crate::render;
use crate::state::SharedState;
use crate::view::{abandoned, ViewState};

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub category: Vec<String>,
}

impl AnalyticsQuery {
    pub fn window(&self) -> DateWindow {
        self.range.as_deref().map(DateWindow::from_param).unwrap_or_default()
    }

    pub fn filter(&self) -> CategoryFilter {
        self.category.iter().cloned().collect()
    }
}

pub async fn analytics_page(
    State(state): State<SharedState>,
    Query(query): Query<AnalyticsQuery>,
) -> Response {
    let scope = state.open_view();
    let backend = state.backend.as_ref();

    let Some((claims, report)) = scope
        .run(async { tokio::join!(influencers_with_claims(backend), backend.analytics_report()) })
        .await
    else {
        return abandoned();
    };

    let window = query.window();
    let filter = query.filter();
    let summary: ViewState<AnalyticsSummary> = ViewState::from(claims)
        .map(|(_, claims)| summarise(&claims, window, &filter, Utc::now()));
    let report: ViewState<AnalyticsReport> = report.into();

    Html(render_page(&summary, &report, window, &filter)).into_response()
}

fn render_page(
    summary: &ViewState<AnalyticsSummary>,
    report: &ViewState<AnalyticsReport>,
    window: DateWindow,
    filter: &CategoryFilter,
) -> String {
    let (controls, trust_html, volume_html) = match summary {
        ViewState::Failed(msg) => {
            let err = crate::view::Notice::Error(msg.clone()).to_html();
            (render_controls(&[], window, filter), err.clone(), err)
        }
        ViewState::Ready(s) => (
            render_controls(&s.categories, window, filter),
            render_trust(s),
            render_volume(s),
        ),
    };

    let body = format!(r#"
    {}
    {}
    <div class="card">
        <div class="card-header">Trust Score by Category</div>
        {}
    </div>
    <div class="card">
        <div class="card-header">Claims Volume</div>
        <div class="grid-3">{}</div>
    </div>
    {}"#,
        render::page_header("Analytics", "Analyze health claims and trends"),
        controls,
        trust_html,
        volume_html,
        render_report(report),
    );

    render::page("Analytics", "/analytics", &body)
}

/// Claims without a category still get a visible, selectable row.
fn category_label(category: &str) -> &str {
    if category.is_empty() { "Uncategorised" } else { category }
}

fn render_controls(categories: &[String], window: DateWindow, filter: &CategoryFilter) -> String {
    let windows = [DateWindow::AllTime, DateWindow::LastSevenDays]
        .map(|w| (w.as_param(), w.label()));
    let boxes: String = categories.iter().map(|category| format!(
        r#"<label class="check"><input type="checkbox" name="category" value="{}"{}> {}</label>"#,
        render::escape(category),
        if filter.contains(category) { " checked" } else { "" },
        render::escape(category_label(category)),
    )).collect();

    format!(r#"
    <form method="get" action="/analytics" class="card">
        <div class="form-group">
            <label for="range">Period</label>
            <select id="range" name="range" class="form-control">{}</select>
        </div>
        <details{}>
            <summary class="btn btn-outline">Filter Categories</summary>
            <div style="margin-top:.75rem;">{}</div>
        </details>
        <button type="submit" class="btn btn-primary" style="margin-top:1rem;">Apply</button>
    </form>"#,
        render::options(windows, window.as_param()),
        if filter.is_empty() { "" } else { " open" },
        boxes,
    )
}

fn render_trust(summary: &AnalyticsSummary) -> String {
    if summary.trust_by_category.is_empty() {
        return r#"<p class="text-muted">No claims to analyze.</p>"#.to_string();
    }
    summary.trust_by_category.iter().map(|row| format!(r#"
        <div style="margin-bottom:1rem;">
            <div class="row"><span>{}</span><span class="badge badge-success">{:.1}%</span></div>
            {}
        </div>"#,
        render::escape(category_label(&row.category)),
        row.avg_score,
        render::progress_bar(row.avg_score),
    )).collect()
}

fn render_volume(summary: &AnalyticsSummary) -> String {
    summary.volume_by_category.iter().map(|row| format!(r#"
        <div class="stat-card">
            <div class="stat-label">{}</div>
            <div class="stat-value">{}</div>
            <div class="text-muted">{:.1}%</div>
        </div>"#,
        render::escape(category_label(&row.category)),
        row.count,
        row.percentage,
    )).collect()
}

fn render_report(report: &ViewState<AnalyticsReport>) -> String {
    let inner = match report {
        ViewState::Failed(_) => {
            r#"<p class="text-muted">Server report unavailable.</p>"#.to_string()
        }
        ViewState::Ready(r) => {
            let trend = if r.trends.trend.is_empty() { "n/a" } else { r.trends.trend.as_str() };
            let days: String = r.trends.daily_volume.iter().rev().take(7).map(|(day, n)| format!(
                r#"<div class="row"><span>{}</span><span class="text-muted">{:.0}</span></div>"#,
                render::escape(day), n,
            )).collect();
            format!(r#"
            <div class="stats-grid">
                {}
                {}
                {}
                {}
            </div>
            {}"#,
                render::stat_card("Total Claims", &render::grouped(r.overall_stats.total_claims)),
                render::stat_card(
                    "Avg Trust Score",
                    &format!("{:.1}%", r.overall_stats.avg_trust_score),
                ),
                render::stat_card(
                    "Verified",
                    &format!("{:.1}%", r.overall_stats.verified_percentage),
                ),
                render::stat_card("Trend", trend),
                days,
            )
        }
    };
    format!(r#"<div class="card"><div class="card-header">Server Report</div>{}</div>"#, inner)
}
