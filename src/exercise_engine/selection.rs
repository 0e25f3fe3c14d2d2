//! Pool-based question selection and rendering for template-driven quizzes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::exercise_engine::error::{GenError, Result};
use crate::exercise_engine::pool::{Question, QuizMetadata, QuizTemplate, SelectionConfig};
use crate::exercise_engine::prng::{Seed, SeededPrng};

/// Options for one generation call. Only the seed is required; everything
/// else falls back to the template defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateOptions {
    pub seed: Seed,
    #[serde(rename = "displayCount", default, skip_serializing_if = "Option::is_none")]
    pub display_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionConfig>,
    #[serde(rename = "shuffleOptions", default, skip_serializing_if = "Option::is_none")]
    pub shuffle_options: Option<bool>,
}

impl GenerateOptions {
    pub fn new(seed: impl Into<Seed>) -> Self {
        GenerateOptions {
            seed: seed.into(),
            display_count: None,
            selection: None,
            shuffle_options: None,
        }
    }

    fn validate(&self) -> Result<()> {
        let mut issues = Vec::new();

        if matches!(&self.seed, Seed::Texto(s) if s.is_empty()) {
            issues.push("seed: se requiere un seed provisto por el backend.".to_string());
        }
        if self.display_count == Some(0) {
            issues.push("displayCount: debe ser mayor a 0.".to_string());
        }
        match &self.selection {
            Some(SelectionConfig::Fixed { ids: Some(ids) }) if ids.is_empty() => {
                issues.push("selection.ids: la selección fija requiere al menos un id.".to_string());
            }
            Some(SelectionConfig::ByTags { tags }) if tags.is_empty() => {
                issues.push("selection.tags: la selección por tags requiere al menos un tag.".to_string());
            }
            _ => {}
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(GenError::Validacion(issues))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedOption {
    #[serde(rename = "optionId")]
    pub option_id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedItem {
    #[serde(rename = "itemId")]
    pub item_id: String,
    pub text: String,
}

/// Displayable question shape: no correctness anywhere inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GeneratedQuestion {
    Mc {
        id: String,
        prompt: String,
        options: Vec<RenderedOption>,
    },
    Tf {
        id: String,
        prompt: String,
    },
    Match {
        id: String,
        prompt: String,
        #[serde(rename = "leftItems")]
        left_items: Vec<RenderedItem>,
        #[serde(rename = "rightItems")]
        right_items: Vec<RenderedItem>,
    },
}

impl GeneratedQuestion {
    pub fn id(&self) -> &str {
        match self {
            GeneratedQuestion::Mc { id, .. } => id,
            GeneratedQuestion::Tf { id, .. } => id,
            GeneratedQuestion::Match { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceSettings {
    #[serde(rename = "displayCount")]
    pub display_count: usize,
    #[serde(rename = "feedbackPolicy")]
    pub feedback_policy: String,
}

/// One rendered quiz. Never persisted server-side: the seed inside is all a
/// caller needs to have it regenerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizInstance {
    pub seed: Seed,
    pub metadata: QuizMetadata,
    pub questions: Vec<GeneratedQuestion>,
    pub settings: InstanceSettings,
}

/// Template-driven quiz generator: selection, rendering, and (in
/// `correction.rs`) replay-based grading.
pub struct QuizGenerator {
    template: QuizTemplate,
}

impl QuizGenerator {
    pub const VERSION: u32 = 1;

    pub fn new(template: QuizTemplate) -> Self {
        QuizGenerator { template }
    }

    pub fn id(&self) -> &str {
        &self.template.metadata.id
    }

    pub fn version(&self) -> u32 {
        Self::VERSION
    }

    pub fn template(&self) -> &QuizTemplate {
        &self.template
    }

    pub fn generate(&self, options: GenerateOptions) -> Result<QuizInstance> {
        options.validate()?;

        let display_count = options
            .display_count
            .unwrap_or(self.template.settings.display_count_default);
        let selection = options
            .selection
            .unwrap_or_else(|| self.template.settings.selection_default.clone());
        let shuffle_options = options.shuffle_options.unwrap_or(true);

        debug!(template = self.id(), seed = %options.seed, display_count, "generando quiz");

        let mut rng = SeededPrng::new(&options.seed);
        let selected = self.select_questions(&selection, display_count, &mut rng);
        let questions = selected
            .iter()
            .map(|q| render_question(q, &mut rng, shuffle_options))
            .collect();

        Ok(QuizInstance {
            seed: options.seed,
            metadata: self.template.metadata.clone(),
            questions,
            settings: InstanceSettings {
                display_count,
                feedback_policy: self.template.settings.feedback_policy_default.clone(),
            },
        })
    }

    /// Choose an ordered subset of size `min(display_count, pool_size)`.
    fn select_questions<'a>(
        &'a self,
        selection: &SelectionConfig,
        display_count: usize,
        rng: &mut SeededPrng,
    ) -> Vec<&'a Question> {
        let actual_count = display_count.min(self.template.pool.len());

        let candidates: Vec<&Question> = match selection {
            SelectionConfig::ByTags { tags } => self
                .template
                .pool
                .iter()
                .filter(|q| q.tags().iter().any(|t| tags.contains(t)))
                .collect(),
            _ => self.template.pool.iter().collect(),
        };

        match selection {
            SelectionConfig::Fixed { ids: Some(ids) } => {
                let mut selected = Vec::new();
                for id in ids {
                    if let Some(q) = candidates.iter().find(|q| q.id() == id) {
                        selected.push(*q);
                    }
                    if selected.len() >= actual_count {
                        break;
                    }
                }
                selected
            }
            SelectionConfig::Fixed { ids: None } => {
                candidates.into_iter().take(actual_count).collect()
            }
            SelectionConfig::Random | SelectionConfig::ByTags { .. } => {
                rng.sample(&candidates, actual_count)
            }
        }
    }
}

/// Render one pool item into its displayable shape.
///
/// Option ids are minted fresh in display order (`opt_0`, `opt_1`, ...);
/// match item ids are fixed per authored pair (`left_N`/`right_N`) and only
/// the right-hand *order* is shuffled. Correctness stays recoverable from the
/// regenerated data itself: rendered text maps back to the pool.
fn render_question(question: &Question, rng: &mut SeededPrng, shuffle_options: bool) -> GeneratedQuestion {
    match question {
        Question::Mc(mc) => {
            let options = if shuffle_options {
                rng.shuffle(&mc.options)
            } else {
                mc.options.clone()
            };
            GeneratedQuestion::Mc {
                id: mc.id.clone(),
                prompt: mc.prompt.clone(),
                options: options
                    .iter()
                    .enumerate()
                    .map(|(idx, opt)| RenderedOption {
                        option_id: format!("opt_{idx}"),
                        text: opt.text.clone(),
                    })
                    .collect(),
            }
        }
        Question::Tf(tf) => GeneratedQuestion::Tf {
            id: tf.id.clone(),
            prompt: tf.prompt.clone(),
        },
        Question::Match(m) => {
            let left_items: Vec<RenderedItem> = m
                .pairs
                .iter()
                .enumerate()
                .map(|(idx, pair)| RenderedItem {
                    item_id: format!("left_{idx}"),
                    text: pair.left.clone(),
                })
                .collect();
            let right_raw: Vec<RenderedItem> = m
                .pairs
                .iter()
                .enumerate()
                .map(|(idx, pair)| RenderedItem {
                    item_id: format!("right_{idx}"),
                    text: pair.right.clone(),
                })
                .collect();
            let right_items = if shuffle_options {
                rng.shuffle(&right_raw)
            } else {
                right_raw
            };
            GeneratedQuestion::Match {
                id: m.id.clone(),
                prompt: m.prompt.clone(),
                left_items,
                right_items,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise_engine::banks;

    #[test]
    fn fixed_selection_preserves_order_and_skips_unknown_ids() {
        let quiz = QuizGenerator::new(banks::sumas_basicas());
        let mut options = GenerateOptions::new("fijo");
        options.selection = Some(SelectionConfig::Fixed {
            ids: Some(vec![
                "sumas_tf_1".to_string(),
                "no_existe".to_string(),
                "sumas_mc_1".to_string(),
            ]),
        });
        let instance = quiz.generate(options).unwrap();
        let ids: Vec<&str> = instance.questions.iter().map(|q| q.id()).collect();
        assert_eq!(ids, vec!["sumas_tf_1", "sumas_mc_1"]);
    }

    #[test]
    fn by_tags_with_no_intersection_yields_zero_questions() {
        let quiz = QuizGenerator::new(banks::sumas_basicas());
        let mut options = GenerateOptions::new("tags");
        options.selection = Some(SelectionConfig::ByTags {
            tags: vec!["geometria".to_string()],
        });
        let instance = quiz.generate(options).unwrap();
        assert!(instance.questions.is_empty());
    }

    #[test]
    fn display_count_is_clamped_to_pool_size() {
        let quiz = QuizGenerator::new(banks::sumas_basicas());
        let mut options = GenerateOptions::new("clamp");
        options.display_count = Some(99);
        let instance = quiz.generate(options).unwrap();
        assert_eq!(instance.questions.len(), quiz.template().pool_size());
    }

    #[test]
    fn mc_option_ids_follow_display_order() {
        let quiz = QuizGenerator::new(banks::sumas_basicas());
        let mut options = GenerateOptions::new("orden");
        options.selection = Some(SelectionConfig::Fixed {
            ids: Some(vec!["sumas_mc_1".to_string()]),
        });
        let instance = quiz.generate(options).unwrap();
        match &instance.questions[0] {
            GeneratedQuestion::Mc { options, .. } => {
                let ids: Vec<&str> = options.iter().map(|o| o.option_id.as_str()).collect();
                assert_eq!(ids, vec!["opt_0", "opt_1", "opt_2", "opt_3"]);
            }
            other => panic!("expected mc, got {other:?}"),
        }
    }

    #[test]
    fn unshuffled_generation_keeps_authored_order() {
        let quiz = QuizGenerator::new(banks::sumas_basicas());
        let mut options = GenerateOptions::new("plano");
        options.selection = Some(SelectionConfig::Fixed {
            ids: Some(vec!["sumas_mc_1".to_string()]),
        });
        options.shuffle_options = Some(false);
        let instance = quiz.generate(options).unwrap();
        match &instance.questions[0] {
            GeneratedQuestion::Mc { options, .. } => {
                let texts: Vec<&str> = options.iter().map(|o| o.text.as_str()).collect();
                assert_eq!(texts, vec!["8", "9", "10", "7"]);
            }
            other => panic!("expected mc, got {other:?}"),
        }
    }

    #[test]
    fn empty_seed_and_zero_display_count_are_rejected_together() {
        let quiz = QuizGenerator::new(banks::sumas_basicas());
        let mut options = GenerateOptions::new("");
        options.display_count = Some(0);
        let err = quiz.generate(options).unwrap_err().to_string();
        assert!(err.contains("seed"));
        assert!(err.contains("displayCount"));
    }

    #[test]
    fn empty_tag_list_is_rejected() {
        let quiz = QuizGenerator::new(banks::sumas_basicas());
        let mut options = GenerateOptions::new("x");
        options.selection = Some(SelectionConfig::ByTags { tags: Vec::new() });
        let err = quiz.generate(options).unwrap_err().to_string();
        assert!(err.contains("selección por tags requiere"));
    }
}
