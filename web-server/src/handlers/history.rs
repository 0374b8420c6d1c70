//! History handlers

use axum::{extract::State, response::Html, Json};
use phishguard_core::logic::history::BufferStatus;
use phishguard_core::HistoryEntry;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HistoryResponse {
    ok: bool,
    buffer: BufferStatus,
    /// Most recent first
    history: Vec<HistoryEntry>,
}

/// `GET /api/history`
pub async fn list(State(state): State<AppState>) -> Json<HistoryResponse> {
    let history = state.service.history();
    Json(HistoryResponse {
        ok: true,
        buffer: history.status(),
        history: history.recent_first(),
    })
}

/// `GET /`
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.service.history().recent_first()))
}

pub fn render_index(entries: &[HistoryEntry]) -> String {
    let mut rows = String::new();
    for entry in entries {
        let score = entry
            .score
            .map(|s| format!("{}%", s))
            .unwrap_or_else(|| "n/a".to_string());
        rows.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><pre>{}</pre></td></tr>\n",
            entry.label.as_str().to_ascii_lowercase(),
            entry.created_at.format("%Y-%m-%d %H:%M:%S"),
            entry.label,
            score,
            entry.source,
            escape_html(&entry.text),
        ));
    }
    if entries.is_empty() {
        rows.push_str("<tr><td colspan=\"5\">No emails checked yet.</td></tr>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>PhishGuard</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
table {{ border-collapse: collapse; width: 100%; }}
td, th {{ border: 1px solid #ccc; padding: 0.4rem; vertical-align: top; }}
tr.phishing td {{ background: #fdecea; }}
tr.safe td {{ background: #edf7ed; }}
pre {{ white-space: pre-wrap; margin: 0; }}
</style>
</head>
<body>
<h1>PhishGuard</h1>
<p>POST <code>{{"text": "..."}}</code> to <code>/predict</code> to classify an email.</p>
<h2>Recent emails</h2>
<table>
<tr><th>Time</th><th>Label</th><th>Score</th><th>Source</th><th>Text</th></tr>
{rows}</table>
</body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
