use std::fmt::Write;

use tokio::time::Instant;

use super::status::StatusLevel;
use super::Page;

/// Plain-text rendering of the page for the terminal shell.
pub fn render_page(page: &Page, now: Instant) -> String {
    let mut out = String::new();

    let marker = match page.status.level {
        StatusLevel::Success => "[ok]",
        StatusLevel::Error => "[error]",
        StatusLevel::Warning => "[warn]",
    };
    let _ = writeln!(out, "{marker} {}", page.status.message);

    if let Some(message) = page.loading.message() {
        let _ = writeln!(out, "... {message}");
    }

    match &page.drop_zone.selection {
        Some(selection) => {
            let _ = writeln!(out, "Resume: {} ({})", selection.name, selection.size_label);
        }
        None => out.push_str("Resume: none selected\n"),
    }
    let _ = writeln!(
        out,
        "Upload: {} | Tailor: {}",
        enabled_label(page.upload_enabled),
        enabled_label(page.tailor_enabled)
    );

    for toast in page.toasts.visible(now) {
        let _ = writeln!(out, "  ({}) {}", toast.level.as_str(), toast.message);
    }

    if page.results.visible {
        out.push('\n');
        if let Some(panel) = &page.results.score {
            let _ = writeln!(out, "ATS score: {}", panel.overall);
            for bar in &panel.bars {
                let _ = writeln!(
                    out,
                    "  {:<20} {:>4}  {}",
                    bar.category.label(),
                    bar.value_label,
                    bar_glyphs(bar.target_width)
                );
            }
            if !panel.analysis.is_empty() {
                let _ = writeln!(out, "\nAnalysis:\n  {}", panel.analysis);
            }
            if !panel.recommendations.is_empty() {
                out.push_str("\nRecommendations:\n");
                for rec in &panel.recommendations {
                    let _ = writeln!(out, "  - {rec}");
                }
            }
            if let Some(missing) = &panel.missing_keywords {
                let _ = writeln!(out, "\nMissing keywords: {missing}");
            }
            out.push('\n');
        }
        out.push_str("Tailored resume:\n");
        out.push_str(&page.results.tailored_text);
        if !page.results.tailored_text.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}

/// Twenty-cell bar for a clamped percentage.
fn bar_glyphs(percent: f64) -> String {
    let filled = (percent / 5.0).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(20 - filled.min(20)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::FileSelection;

    #[test]
    fn test_bar_glyphs_scale() {
        assert_eq!(bar_glyphs(0.0), "....................");
        assert_eq!(bar_glyphs(50.0), "##########..........");
        assert_eq!(bar_glyphs(100.0), "####################");
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_page_shows_banner_selection_and_toasts() {
        let mut page = Page::default();
        page.status.set(StatusLevel::Success, "System ready!");
        page.drop_zone.selection = Some(FileSelection {
            name: "cv.pdf".to_string(),
            size_label: "1.5 KB".to_string(),
        });
        page.toasts
            .push("Resume uploaded", crate::ui::toast::ToastLevel::Success, Instant::now());

        let text = render_page(&page, Instant::now());
        assert!(text.starts_with("[ok] System ready!"));
        assert!(text.contains("Resume: cv.pdf (1.5 KB)"));
        assert!(text.contains("(success) Resume uploaded"));
        assert!(!text.contains("Tailored resume:"));
    }
}
