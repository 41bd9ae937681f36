//! Result Renderer: projects a [`TailoredResume`] into the results section widgets.
//!
//! Rendering is infallible: anything the decoder could not make sense of has already
//! been defaulted, so this module only formats and clamps.

use std::time::Duration;

use tokio::time::Instant;

use crate::models::score::{AtsScore, TailoredResume};

/// Bars are inserted at width 0 and widened after this delay so the CSS transition runs.
pub const BAR_ANIMATION_DELAY: Duration = Duration::from_millis(100);

/// Missing keywords shown before the list is cut off with an ellipsis.
pub const MAX_MISSING_KEYWORDS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreCategory {
    Keyword,
    Skills,
    Experience,
    Format,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; 4] = [
        ScoreCategory::Keyword,
        ScoreCategory::Skills,
        ScoreCategory::Experience,
        ScoreCategory::Format,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScoreCategory::Keyword => "Keyword Match",
            ScoreCategory::Skills => "Skills Match",
            ScoreCategory::Experience => "Experience Match",
            ScoreCategory::Format => "Format & Structure",
        }
    }

    fn value(self, score: &AtsScore) -> f64 {
        match self {
            ScoreCategory::Keyword => score.keyword_score,
            ScoreCategory::Skills => score.skill_score,
            ScoreCategory::Experience => score.experience_score,
            ScoreCategory::Format => score.format_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBar {
    pub category: ScoreCategory,
    /// e.g. `"40%"`.
    pub value_label: String,
    /// Final width in percent, already clamped.
    pub target_width: f64,
    pub animate_at: Instant,
}

impl ScoreBar {
    fn new(category: ScoreCategory, raw: f64, inserted_at: Instant) -> Self {
        let clamped = clamp_percent(raw);
        Self {
            category,
            value_label: format!("{}%", clamped.round()),
            target_width: clamped,
            animate_at: inserted_at + BAR_ANIMATION_DELAY,
        }
    }

    /// Rendered width at `now`: 0 until the animation delay has passed.
    pub fn width_at(&self, now: Instant) -> f64 {
        if now >= self.animate_at {
            self.target_width
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScorePanel {
    /// Overall score, displayed as-is (not clamped).
    pub overall: String,
    pub bars: Vec<ScoreBar>,
    pub analysis: String,
    pub recommendations: Vec<String>,
    pub missing_keywords: Option<String>,
}

impl ScorePanel {
    pub fn new(score: &AtsScore, inserted_at: Instant) -> Self {
        Self {
            // `+ 0.0` turns a negative zero into zero.
            overall: format!("{}", score.overall_score + 0.0),
            bars: ScoreCategory::ALL
                .iter()
                .map(|c| ScoreBar::new(*c, c.value(score), inserted_at))
                .collect(),
            analysis: score.analysis.clone(),
            recommendations: score.recommendations.clone(),
            missing_keywords: missing_keywords_line(&score.missing_keywords),
        }
    }

    pub fn bar(&self, category: ScoreCategory) -> Option<&ScoreBar> {
        self.bars.iter().find(|b| b.category == category)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsView {
    pub visible: bool,
    /// Shown verbatim as plain text, never interpreted as markup.
    pub tailored_text: String,
    pub score: Option<ScorePanel>,
    /// Set when the section should be scrolled into view (smoothly).
    pub scroll_requested: bool,
}

impl ResultsView {
    pub fn display(&mut self, result: &TailoredResume, now: Instant) {
        self.tailored_text = result.text.clone();
        self.score = result.ats_score.as_ref().map(|s| ScorePanel::new(s, now));
        self.visible = true;
        self.scroll_requested = true;
    }
}

/// Copy button label with its short-lived "Copied!" feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyButton {
    pub copied_until: Option<Instant>,
}

pub const COPIED_FEEDBACK: Duration = Duration::from_secs(2);

impl CopyButton {
    pub fn mark_copied(&mut self, now: Instant) {
        self.copied_until = Some(now + COPIED_FEEDBACK);
    }

    pub fn label(&self, now: Instant) -> &'static str {
        match self.copied_until {
            Some(until) if now < until => "Copied!",
            _ => "Copy",
        }
    }
}

pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0) + 0.0
    }
}

/// First [`MAX_MISSING_KEYWORDS`] keywords joined by `, `, with `...` when truncated.
pub fn missing_keywords_line(keywords: &[String]) -> Option<String> {
    if keywords.is_empty() {
        return None;
    }
    let mut line = keywords
        .iter()
        .take(MAX_MISSING_KEYWORDS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if keywords.len() > MAX_MISSING_KEYWORDS {
        line.push_str("...");
    }
    Some(line)
}
