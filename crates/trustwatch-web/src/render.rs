//! Page shell and small HTML helpers shared by all handlers.

use trustwatch_analytics::derive::StatusTone;
use trustwatch_common::VerificationStatus;

/// Navigation sidebar shared across all pages
pub const NAV_HTML: &str = include_str!("../templates/nav.html");

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Percent-encode one URL path segment (RFC 3986 unreserved characters pass through).
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// `<option>` list with `selected` on the matching value.
pub fn options<'a>(
    choices: impl IntoIterator<Item = (&'a str, &'a str)>,
    selected: &str,
) -> String {
    choices
        .into_iter()
        .map(|(value, label)| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape(value),
                if value == selected { " selected" } else { "" },
                escape(label)
            )
        })
        .collect()
}

/// Full HTML document around `body`. `active` is the nav route to highlight.
pub fn page(title: &str, active: &str, body: &str) -> String {
    let nav = if active.is_empty() {
        NAV_HTML.to_string()
    } else {
        NAV_HTML.replace(
            &format!(r#"href="{}" class="nav-link""#, active),
            &format!(r#"href="{}" class="nav-link active""#, active),
        )
    };

    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{} — Trustwatch</title>
    <link rel="stylesheet" href="/static/css/main.css">
</head>
<body>
<div class="app-container">
{}
<main class="main-content">
{}
</main>
</div>
</body>
</html>"#, escape(title), nav, body)
}

pub fn page_header(title: &str, subtitle: &str) -> String {
    format!(r#"<div class="page-header">
        <div>
            <h1 class="page-title">{}</h1>
            <p class="text-muted">{}</p>
        </div>
    </div>"#, escape(title), escape(subtitle))
}

pub fn notices(items: &[crate::view::Notice]) -> String {
    items.iter().map(|n| n.to_html()).collect()
}

pub fn stat_card(label: &str, value: &str) -> String {
    format!(r#"<div class="stat-card">
            <div class="stat-value">{}</div>
            <div class="stat-label">{}</div>
        </div>"#, escape(value), escape(label))
}

/// Horizontal bar with width clamped to [0, 100].
pub fn progress_bar(pct: f64) -> String {
    let width = if pct.is_finite() { pct.clamp(0.0, 100.0) } else { 0.0 };
    format!(
        concat!(
            r#"<div class="progress-track">"#,
            r#"<div class="progress-bar" style="width:{:.1}%"></div></div>"#,
        ),
        width
    )
}

pub fn status_badge(status: &VerificationStatus) -> String {
    let label = if status.as_str().is_empty() { "Unverified" } else { status.as_str() };
    format!(
        r#"<span class="badge badge-{}">{}</span>"#,
        StatusTone::of(status).css_class(),
        escape(label)
    )
}

/// Thousands-separated integer, e.g. `1,250,000`.
pub fn grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;");
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("abc-123_x.y~z"), "abc-123_x.y~z");
        assert_eq!(encode_segment("a/b c"), "a%2Fb%20c");
        assert_eq!(encode_segment("é"), "%C3%A9");
    }

    #[test]
    fn test_options_mark_selected() {
        let html = options([("a", "A"), ("b", "B")], "b");
        assert_eq!(html, r#"<option value="a">A</option><option value="b" selected>B</option>"#);
    }

    #[test]
    fn test_grouped() {
        assert_eq!(grouped(0), "0");
        assert_eq!(grouped(999), "999");
        assert_eq!(grouped(1000), "1,000");
        assert_eq!(grouped(1_250_000), "1,250,000");
    }

    #[test]
    fn test_progress_bar_clamps() {
        assert!(progress_bar(140.0).contains("width:100.0%"));
        assert!(progress_bar(f64::NAN).contains("width:0.0%"));
    }

    #[test]
    fn test_active_nav_link_is_marked() {
        let html = page("Claims", "/claims", "");
        assert!(html.contains(r#"href="/claims" class="nav-link active""#));
        assert!(!html.contains(r#"href="/research" class="nav-link active""#));
    }
}
