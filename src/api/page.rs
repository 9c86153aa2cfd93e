//! HTML rendering of the predictor page

use crate::controls::{SliderSpec, CONTROLS};
use crate::presenter::{Panel, PanelKind};
use crate::session::Session;
use crate::types::request::FEATURE_SCHEMA;
use std::fmt::Write;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; display: flex; min-height: 100vh; }
aside { width: 320px; padding: 1.5rem; background: #f0f2f6; }
main { flex: 1; padding: 2rem 3rem; max-width: 900px; }
label { display: block; margin-top: 1.2rem; font-weight: 600; }
input[type=range] { width: 100%; }
.caption { color: #6b6f76; font-size: 0.85rem; }
.value { float: right; font-weight: normal; }
button { margin-top: 1.5rem; padding: 0.6rem 1.2rem; background: #ff4b4b; color: #fff; border: 0; border-radius: 6px; font-size: 1rem; }
button:disabled { background: #c9c9c9; }
.panel { padding: 0.8rem 1rem; border-radius: 6px; margin: 1rem 0; }
.success { background: #dff5e3; color: #14532d; }
.info { background: #e0ecfb; color: #1e3a8a; }
.warning { background: #fff6d6; color: #713f12; }
.error { background: #fde2e2; color: #7f1d1d; }
details { margin-top: 2rem; border-top: 1px solid #ddd; padding-top: 1rem; }
"#;

/// Escape text for HTML element and attribute content
pub fn escape(text: &str) -> String {
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

fn panel_class(kind: PanelKind) -> &'static str {
    match kind {
        PanelKind::Success => "success",
        PanelKind::Info => "info",
        PanelKind::Warning => "warning",
        PanelKind::Error => "error",
    }
}

fn render_panel(out: &mut String, panel: &Panel) {
    if let Some(title) = &panel.title {
        let _ = write!(out, "<h3>{}</h3>", escape(title));
    }
    let _ = write!(
        out,
        r#"<div class="panel {}" role="status">{}</div>"#,
        panel_class(panel.kind),
        escape(&panel.body)
    );
}

fn render_control(out: &mut String, spec: &SliderSpec, value: &str) {
    let _ = write!(
        out,
        r#"<label for="{key}">{label} <span class="value" id="{key}_value">{value}</span></label>
<input type="range" id="{key}" name="{key}" min="{min}" max="{max}" step="{step}" value="{value}"
 oninput="document.getElementById('{key}_value').textContent = this.value">
<div class="caption">{caption}</div>
"#,
        key = spec.key,
        label = escape(spec.label),
        value = escape(value),
        min = spec.format(spec.min),
        max = spec.format(spec.max),
        step = spec.step,
        caption = escape(spec.caption),
    );
}

/// Render the whole page for a session plus the panels of the last trigger.
pub fn render(session: &Session, panels: &[Panel]) -> String {
    let mut out = String::with_capacity(8 * 1024);

    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Silica percentage predictor</title>
<style>{STYLE}</style>
</head>
<body>
<aside>
<h2>⚙️ Input parameters</h2>
<p>Adjust the sliders to match the flotation plant's operating parameters.</p>
<form method="post" action="/predict" id="parameters">
"#
    );

    for spec in &CONTROLS {
        render_control(&mut out, spec, &session.controls().display_value(spec));
    }

    out.push_str("</form>\n</aside>\n<main>\n");
    out.push_str(
        r#"<h1>🧪 Silica percentage predictor</h1>
<p>This application uses a machine learning model to predict the silica concentrate percentage of the flotation process from key operating parameters.</p>
<p><strong>Process engineers and operators can use it to:</strong></p>
<ul>
<li><strong>Optimize</strong> operating conditions to reach the target silica percentage.</li>
<li><strong>Predict</strong> the impact of process changes before applying them.</li>
<li><strong>Troubleshoot</strong> potential problems by simulating different scenarios.</li>
</ul>
"#,
    );

    if session.can_predict() {
        out.push_str(
            r#"<button type="submit" form="parameters">🚀 Predict the silica percentage</button>"#,
        );
    } else {
        out.push_str(
            r#"<button type="submit" form="parameters" disabled>🚀 Predict the silica percentage</button>"#,
        );
    }
    out.push('\n');

    if let Some(err) = session.load_error() {
        render_panel(&mut out, &crate::presenter::load_warning(err));
    }
    for panel in panels {
        if session.load_error().is_some() && panel.kind == PanelKind::Warning {
            continue;
        }
        render_panel(&mut out, panel);
    }

    let features = FEATURE_SCHEMA
        .iter()
        .map(|f| format!("<code>{}</code>", escape(f)))
        .collect::<Vec<_>>()
        .join(", ");

    let _ = write!(
        out,
        r#"
<details>
<summary>ℹ️ About this app</summary>
<p><strong>How does it work?</strong></p>
<ol>
<li><strong>Input:</strong> you provide the key operating parameters with the sliders in the sidebar.</li>
<li><strong>Prediction:</strong> the pre-trained model receives these inputs and evaluates them against the patterns it learned from historical data.</li>
<li><strong>Result:</strong> the application shows the predicted silica percentage.</li>
</ol>
<p><strong>Model details</strong></p>
<ul>
<li><strong>Model type:</strong> regression model</li>
<li><strong>Purpose:</strong> predict the silica percentage in the concentrate.</li>
<li><strong>Features used:</strong> {features}</li>
</ul>
</details>
</main>
</body>
</html>
"#
    );

    out
}
