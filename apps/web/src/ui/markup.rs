//! HTML rendering of the page: status card, toast container and results section.
//!
//! Every string that came from the backend goes through [`escape_html`] before it is
//! interpolated. The tailored résumé itself is emitted inside `<pre>` as text.

use std::fmt::Write;

use tokio::time::Instant;

use super::results::{ResultsView, ScorePanel};
use super::status::StatusBanner;
use super::toast::ToastStack;
use super::Page;

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Status card, live toasts and results, in page order.
pub fn render_page_html(page: &Page, now: Instant) -> String {
    let mut html = render_status_html(&page.status);
    html.push_str(&render_toasts_html(&page.toasts, now));
    html.push_str(&render_results_html(&page.results));
    html
}

pub fn render_status_html(banner: &StatusBanner) -> String {
    let color = banner.level.color();
    format!(
        "<div id=\"systemStatus\" class=\"status-card\" style=\"border-left: 4px solid {color}\"><i class=\"fas {}\" style=\"color: {color}\"></i><span>{}</span></div>\n",
        banner.level.icon(),
        escape_html(&banner.message)
    )
}

pub fn render_toasts_html(toasts: &ToastStack, now: Instant) -> String {
    let mut html = String::from("<div id=\"toastContainer\">");
    for toast in toasts.visible(now) {
        let _ = write!(
            html,
            "<div class=\"toast {}\" data-id=\"{}\"><i class=\"fas {}\" style=\"color: {}\"></i><span>{}</span></div>",
            toast.level.as_str(),
            toast.id,
            toast.level.icon(),
            toast.level.color(),
            escape_html(&toast.message)
        );
    }
    html.push_str("</div>\n");
    html
}

/// Renders the results section, or an empty string while it is hidden.
pub fn render_results_html(view: &ResultsView) -> String {
    if !view.visible {
        return String::new();
    }

    let mut html = String::from("<section id=\"resultsSection\">\n");
    if let Some(panel) = &view.score {
        render_score_panel(&mut html, panel);
    }
    let _ = writeln!(
        html,
        "<pre id=\"resultsContent\">{}</pre>",
        escape_html(&view.tailored_text)
    );
    html.push_str("</section>\n");
    html
}

fn render_score_panel(html: &mut String, panel: &ScorePanel) {
    let _ = writeln!(
        html,
        "<div class=\"ats-score\"><span id=\"scoreNumber\">{}</span></div>",
        escape_html(&panel.overall)
    );

    html.push_str("<div class=\"score-bars\">\n");
    for bar in &panel.bars {
        let _ = writeln!(
            html,
            "<div class=\"score-item\"><span>{}</span><div class=\"score-bar\"><div class=\"score-fill\" style=\"width: {}%\"></div></div><span>{}</span></div>",
            escape_html(bar.category.label()),
            bar.target_width,
            escape_html(&bar.value_label)
        );
    }
    html.push_str("</div>\n");

    let _ = writeln!(
        html,
        "<div id=\"atsAnalysis\"><h3>Detailed Analysis</h3><p>{}</p></div>",
        escape_html(&panel.analysis)
    );

    html.push_str("<div id=\"recommendations\"><h3>Recommendations</h3><ul>");
    for rec in &panel.recommendations {
        let _ = write!(html, "<li>{}</li>", escape_html(rec));
    }
    html.push_str("</ul>");
    if let Some(missing) = &panel.missing_keywords {
        let _ = write!(
            html,
            "<h4>Missing Keywords:</h4><p>{}</p>",
            escape_html(missing)
        );
    }
    html.push_str("</div>\n");
}
