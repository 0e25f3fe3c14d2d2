//! Authored question pools and quiz templates.
//!
//! A template is read-only at generation time: the pool is the fixed
//! catalogue of candidate items and carries all answer data. Generated
//! instances never embed correctness — the correction protocol resolves it
//! back against the pool.

use serde::{Deserialize, Serialize};

use crate::exercise_engine::error::{GenError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizMetadata {
    pub id: String,
    pub materia: String,
    pub titulo: String,
    pub idioma: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// How a generation call picks items from the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum SelectionConfig {
    /// Seeded sample from the whole pool.
    Random,
    /// Authored order; with `ids`, exactly those items in the given order.
    Fixed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ids: Option<Vec<String>>,
    },
    /// Filter by tag intersection first, then sample. An empty intersection
    /// yields fewer (possibly zero) questions than requested; that is
    /// documented behavior, not an error.
    ByTags { tags: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSettings {
    #[serde(rename = "displayCountDefault")]
    pub display_count_default: usize,
    #[serde(rename = "feedbackPolicyDefault")]
    pub feedback_policy_default: String,
    #[serde(rename = "selectionDefault")]
    pub selection_default: SelectionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McOption {
    pub text: String,
    pub correct: bool,
    pub because: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McQuestion {
    pub id: String,
    pub prompt: String,
    pub options: Vec<McOption>,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfQuestion {
    pub id: String,
    pub prompt: String,
    pub answer: bool,
    #[serde(rename = "becauseTrue")]
    pub because_true: String,
    #[serde(rename = "becauseFalse")]
    pub because_false: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPair {
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchQuestion {
    pub id: String,
    pub prompt: String,
    pub pairs: Vec<MatchPair>,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Closed set of authorable item shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Question {
    Mc(McQuestion),
    Tf(TfQuestion),
    Match(MatchQuestion),
}

impl Question {
    pub fn id(&self) -> &str {
        match self {
            Question::Mc(q) => &q.id,
            Question::Tf(q) => &q.id,
            Question::Match(q) => &q.id,
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            Question::Mc(q) => &q.tags,
            Question::Tf(q) => &q.tags,
            Question::Match(q) => &q.tags,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizTemplate {
    pub metadata: QuizMetadata,
    pub settings: QuizSettings,
    pub pool: Vec<Question>,
}

impl QuizTemplate {
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    /// Parse an authored template from JSON. A pool item whose `type` tag is
    /// outside the closed set fails fast as [`GenError::TipoNoSoportado`];
    /// other shape problems surface as validation errors.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| {
            let msg = e.to_string();
            if msg.contains("unknown variant") {
                GenError::TipoNoSoportado(format!("pregunta ({msg})"))
            } else {
                GenError::Validacion(vec![format!("template: {msg}")])
            }
        })
    }
}
