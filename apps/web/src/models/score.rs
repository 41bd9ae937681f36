//! Tailoring results as returned by the backend, and their normalised internal shape.
//!
//! The backend has shipped two payload shapes for `tailored_resume`: a bare string
//! (legacy) and an object carrying an optional ATS score. Both are decoded into
//! [`TailorPayload`] and immediately normalised into [`TailoredResume`], so nothing
//! downstream branches on the wire shape.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// ATS compatibility score computed server-side.
///
/// Decoding is lenient: a missing, null or non-numeric score becomes `0.0`, and
/// non-string list entries are stringified, so a sloppy backend never breaks rendering.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AtsScore {
    #[serde(default, deserialize_with = "lenient_number")]
    pub overall_score: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub keyword_score: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub skill_score: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub experience_score: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub format_score: f64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub analysis: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub recommendations: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub missing_keywords: Vec<String>,
}

/// `tailored_resume` exactly as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TailorPayload {
    Legacy(String),
    Structured {
        #[serde(default, deserialize_with = "lenient_text")]
        tailored_resume: String,
        #[serde(default)]
        ats_score: Option<Value>,
    },
}

/// Normalised tailoring result consumed by the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TailoredResume {
    pub text: String,
    pub ats_score: Option<AtsScore>,
}

impl From<TailorPayload> for TailoredResume {
    fn from(payload: TailorPayload) -> Self {
        match payload {
            TailorPayload::Legacy(text) => Self {
                text,
                ats_score: None,
            },
            TailorPayload::Structured {
                tailored_resume,
                ats_score,
            } => Self {
                text: tailored_resume,
                ats_score: ats_score.and_then(decode_ats_score),
            },
        }
    }
}

fn decode_ats_score(raw: Value) -> Option<AtsScore> {
    if !raw.is_object() {
        warn!("Ignoring ats_score that is not an object: {raw}");
        return None;
    }
    match serde_json::from_value::<AtsScore>(raw) {
        Ok(score) => Some(score),
        Err(e) => {
            warn!("Ignoring malformed ats_score: {e}");
            None
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient field decoders
// ────────────────────────────────────────────────────────────────────────────

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(stringify(value).unwrap_or_default())
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.into_iter().filter_map(stringify).collect(),
        _ => Vec::new(),
    })
}

fn stringify(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
