//! Research configuration form and the ad-hoc analysis tools.
//!
//! The backend offers no way to read the current configuration back, so the
//! page mounts with the defaults. A save re-renders the configuration the
//! backend echoed in its acknowledgement, or what was submitted when it
//! echoed nothing.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::Form;
use serde::Deserialize;
use tracing::info;
use trustwatch_common::entities::{
    AnalysisReply, CLAIM_LIMIT_RANGE, CLAIM_TYPES, DATE_RANGES, JOURNALS, RESEARCH_CATEGORIES,
    SOCIAL_MEDIA,
};
use trustwatch_common::{ApiResult, ResearchConfig, SourceFilters};

use crate::render;
use crate::state::SharedState;
use crate::view::{abandoned, Notice};

// ── Form input ────────────────────────────────────────────────────────────────

/// Raw research form. Checkbox groups arrive as repeated keys; numbers arrive
/// as text so a malformed value falls back instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResearchForm {
    #[serde(default)]
    pub date_range: String,
    #[serde(default)]
    pub claim_limit: String,
    #[serde(default)]
    pub journals: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub scientific_journals: Vec<String>,
    #[serde(default)]
    pub social_media: Vec<String>,
    #[serde(default)]
    pub claim_types: Vec<String>,
    #[serde(default)]
    pub min_confidence: String,
}

impl ResearchForm {
    pub fn into_config(self) -> ResearchConfig {
        let defaults = ResearchConfig::default();
        let (lo, hi) = CLAIM_LIMIT_RANGE;

        let date_range = if DATE_RANGES.iter().any(|(value, _)| *value == self.date_range) {
            self.date_range
        } else {
            defaults.date_range
        };
        let claim_limit = self
            .claim_limit
            .trim()
            .parse::<u32>()
            .map(|n| n.clamp(lo, hi))
            .unwrap_or(defaults.claim_limit);
        let min_confidence = self
            .min_confidence
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.clamp(0.0, 1.0))
            .unwrap_or(defaults.sources.min_confidence);

        ResearchConfig {
            date_range,
            claim_limit,
            journals: self.journals,
            categories: self.categories,
            sources: SourceFilters {
                scientific_journals: self.scientific_journals,
                social_media: self.social_media,
                claim_types: self.claim_types,
                min_confidence,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PodcastForm {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct JournalsForm {
    #[serde(default)]
    pub claim: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BatchForm {
    #[serde(default)]
    pub claims: String,
}

impl BatchForm {
    /// One claim per line, blank lines dropped.
    pub fn claims(&self) -> Vec<String> {
        self.claims
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Result panel for one of the analysis tools.
struct ToolOutput {
    title: &'static str,
    outcome: Result<String, Notice>,
}

// ── Handlers ──────────────────────────────────────────────────────────────────

pub async fn research_page() -> Html<String> {
    Html(render_page(&ResearchConfig::default(), &[], None))
}

pub async fn save_config(
    State(state): State<SharedState>,
    Form(form): Form<ResearchForm>,
) -> Response {
    let scope = state.open_view();
    let config = form.into_config();

    let Some(result) = scope.run(state.backend.update_research_config(&config)).await else {
        return abandoned();
    };
    let (shown, notice) = match result {
        Ok(ack) => {
            info!(
                date_range = %config.date_range,
                claim_limit = config.claim_limit,
                "research config saved"
            );
            let shown = ack.echoed_config().unwrap_or(config);
            (shown, Notice::Success("Configuration saved".to_string()))
        }
        Err(err) => (config, Notice::failed(&err)),
    };
    Html(render_page(&shown, &[notice], None)).into_response()
}

pub async fn analyze_claim(
    State(state): State<SharedState>,
    Form(form): Form<AnalyzeForm>,
) -> Response {
    let content = form.content.trim().to_string();
    if content.is_empty() {
        let notice = Notice::Error("Enter a claim to analyze".to_string());
        return tool_page("Claim Analysis", Err(notice));
    }
    let scope = state.open_view();
    let Some(result) = scope.run(state.backend.analyze_claim(&content)).await else {
        return abandoned();
    };
    tool_page("Claim Analysis", pretty(result))
}

pub async fn analyze_podcast(
    State(state): State<SharedState>,
    Form(form): Form<PodcastForm>,
) -> Response {
    let url = form.url.trim().to_string();
    if url.is_empty() {
        let notice = Notice::Error("Enter a podcast URL".to_string());
        return tool_page("Podcast Analysis", Err(notice));
    }
    let scope = state.open_view();
    let Some(result) = scope.run(state.backend.analyze_podcast(&url)).await else {
        return abandoned();
    };
    tool_page("Podcast Analysis", pretty(result))
}

pub async fn validate_journals(
    State(state): State<SharedState>,
    Form(form): Form<JournalsForm>,
) -> Response {
    let claim = form.claim.trim().to_string();
    if claim.is_empty() {
        let notice = Notice::Error("Enter a claim to validate".to_string());
        return tool_page("Journal Validation", Err(notice));
    }
    let scope = state.open_view();
    let Some(result) = scope.run(state.backend.validate_with_journals(&claim)).await else {
        return abandoned();
    };
    tool_page("Journal Validation", pretty(result))
}

pub async fn batch_process(
    State(state): State<SharedState>,
    Form(form): Form<BatchForm>,
) -> Response {
    let claims = form.claims();
    if claims.is_empty() {
        let notice = Notice::Error("Enter at least one claim".to_string());
        return tool_page("Batch Processing", Err(notice));
    }
    let scope = state.open_view();
    let Some(result) = scope.run(state.backend.batch_process_claims(&claims)).await else {
        return abandoned();
    };
    let outcome = match result {
        Ok(batch) => {
            info!(submitted = claims.len(), results = batch.results.len(), "batch processed");
            Ok(serde_json::to_string_pretty(&batch).unwrap_or_default())
        }
        Err(err) => Err(Notice::failed(&err)),
    };
    tool_page("Batch Processing", outcome)
}

fn pretty(result: ApiResult<AnalysisReply>) -> Result<String, Notice> {
    result.map(|reply| reply.to_pretty_json()).map_err(|err| Notice::failed(&err))
}

fn tool_page(title: &'static str, outcome: Result<String, Notice>) -> Response {
    let output = ToolOutput { title, outcome };
    Html(render_page(&ResearchConfig::default(), &[], Some(&output))).into_response()
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn render_page(config: &ResearchConfig, notices: &[Notice], output: Option<&ToolOutput>) -> String {
    let body = format!(r#"
    {}
    {}
    {}
    <div class="grid-2">
        {}
        {}
    </div>"#,
        render::page_header("Research Configuration", "Configure claim analysis parameters"),
        render::notices(notices),
        output.map(render_output).unwrap_or_default(),
        render_config_form(config),
        render_tools(),
    );
    render::page("Research", "/research", &body)
}

fn render_output(output: &ToolOutput) -> String {
    let inner = match &output.outcome {
        Ok(json) => format!(r#"<pre class="json">{}</pre>"#, render::escape(json)),
        Err(notice) => notice.to_html(),
    };
    format!(r#"<div class="card"><div class="card-header">{}</div>{}</div>"#, output.title, inner)
}

fn checkboxes<'a>(
    name: &str,
    choices: impl IntoIterator<Item = (&'a str, &'a str)>,
    checked: &[String],
) -> String {
    choices.into_iter().map(|(value, label)| format!(
        r#"<label class="check"><input type="checkbox" name="{}" value="{}"{}> {}</label>"#,
        name,
        render::escape(value),
        if checked.iter().any(|c| c == value) { " checked" } else { "" },
        render::escape(label),
    )).collect()
}

fn render_config_form(config: &ResearchConfig) -> String {
    let journal_values: Vec<(String, &str)> =
        JOURNALS.iter().map(|j| (j.to_lowercase(), *j)).collect();
    let social_values: Vec<(String, &str)> =
        SOCIAL_MEDIA.iter().map(|s| (s.to_lowercase(), *s)).collect();
    let type_values: Vec<(String, &str)> =
        CLAIM_TYPES.iter().map(|t| (t.to_lowercase(), *t)).collect();

    let hidden: String = config.sources.scientific_journals.iter().map(|j| format!(
        r#"<input type="hidden" name="scientific_journals" value="{}">"#,
        render::escape(j),
    )).collect();
    let (lo, hi) = CLAIM_LIMIT_RANGE;

    format!(r#"
    <form method="post" action="/research" class="card">
        <div class="card-header">Analysis Parameters</div>
        <div class="form-group">
            <label for="date_range">Analysis Period</label>
            <select id="date_range" name="date_range" class="form-control">{}</select>
        </div>
        <div class="form-group">
            <label for="claim_limit">Claims Limit</label>
            <input type="number" id="claim_limit" name="claim_limit" class="form-control" min="{}" max="{}" value="{}">
        </div>
        <div class="form-group"><label>Scientific Journals</label>{}</div>
        <div class="form-group"><label>Categories</label>{}</div>
        <div class="form-group"><label>Social Media Sources</label>{}</div>
        <div class="form-group"><label>Claim Types</label>{}</div>
        <div class="form-group">
            <label for="min_confidence">Minimum Confidence Score ({:.0}%)</label>
            <input type="range" id="min_confidence" name="min_confidence" min="0" max="1" step="0.1" value="{}">
        </div>
        {}
        <button type="submit" class="btn btn-primary">Save Configuration</button>
    </form>"#,
        render::options(DATE_RANGES, &config.date_range),
        lo, hi, config.claim_limit,
        checkboxes("journals", pairs(&journal_values), &config.journals),
        checkboxes("categories", RESEARCH_CATEGORIES.iter().map(|c| (*c, *c)), &config.categories),
        checkboxes("social_media", pairs(&social_values), &config.sources.social_media),
        checkboxes("claim_types", pairs(&type_values), &config.sources.claim_types),
        config.sources.min_confidence * 100.0,
        config.sources.min_confidence,
        hidden,
    )
}

fn pairs<'a>(values: &'a [(String, &'a str)]) -> impl Iterator<Item = (&'a str, &'a str)> {
    values.iter().map(|(value, label)| (value.as_str(), *label))
}

fn render_tools() -> String {
    r#"
    <div>
        <form method="post" action="/research/analyze" class="card">
            <div class="card-header">Analyze Claim</div>
            <textarea name="content" class="form-control" rows="3" placeholder="Enter a health claim" required></textarea>
            <button type="submit" class="btn btn-primary" style="margin-top:.75rem;">Analyze</button>
        </form>
        <form method="post" action="/research/journals" class="card">
            <div class="card-header">Validate Against Journals</div>
            <textarea name="claim" class="form-control" rows="3" placeholder="Enter a health claim" required></textarea>
            <button type="submit" class="btn btn-primary" style="margin-top:.75rem;">Validate</button>
        </form>
        <form method="post" action="/research/podcast" class="card">
            <div class="card-header">Analyze Podcast</div>
            <input type="url" name="url" class="form-control" placeholder="https://" required>
            <button type="submit" class="btn btn-primary" style="margin-top:.75rem;">Analyze Podcast</button>
        </form>
        <form method="post" action="/research/batch" class="card">
            <div class="card-header">Batch Process Claims</div>
            <textarea name="claims" class="form-control" rows="5" placeholder="One claim per line" required></textarea>
            <button type="submit" class="btn btn-primary" style="margin-top:.75rem;">Process</button>
        </form>
    </div>"#
        .to_string()
}
