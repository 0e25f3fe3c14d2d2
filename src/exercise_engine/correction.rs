//! Regeneration-based correction protocol.
//!
//! The server holds no record of which quiz was shown. Grading therefore
//! *replays* generation from the caller's seed — the same code path that
//! produced the displayed instance — and resolves every submitted answer
//! against the authored pool. This only works because everything upstream is
//! strictly deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::exercise_engine::error::Result;
use crate::exercise_engine::exercise::{ClaveRespuesta, Correccion};
use crate::exercise_engine::pool::Question;
use crate::exercise_engine::selection::{GenerateOptions, GeneratedQuestion, QuizGenerator, QuizInstance};
use crate::exercise_engine::prng::Seed;

/// A learner's submitted answer for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    /// True/false submission.
    Booleano(bool),
    /// Selected option id (`"opt_2"`).
    Opcion(String),
    /// Matching submission: rendered left id → rendered right id.
    Pares(BTreeMap<String, String>),
}

/// Grading outcome for one question. An unresolvable submission is a graded
/// miss (`correct: false`), never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub correct: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl QuizGenerator {
    /// Re-derive the instance that was shown for `seed`, using the canonical
    /// fixed configuration (template defaults, shuffle flag explicit) so the
    /// shown and graded instances come from the identical code path.
    pub fn recreate(&self, seed: impl Into<Seed>, shuffle_options: bool) -> Result<QuizInstance> {
        let mut options = GenerateOptions::new(seed);
        options.shuffle_options = Some(shuffle_options);
        self.generate(options)
    }

    /// Replay generation for `seed` and diff `answers` against it.
    ///
    /// Each regenerated question is resolved back to its pool item by id (not
    /// by position) and the correct answer is re-derived from the authored
    /// definition, independent of how the instance was shuffled for display.
    /// A regenerated question whose pool item has since been removed from the
    /// template is omitted from the result.
    pub fn validate_answers(
        &self,
        seed: impl Into<Seed>,
        answers: &BTreeMap<String, Answer>,
    ) -> Result<BTreeMap<String, QuestionResult>> {
        let instance = self.recreate(seed, true)?;
        let mut results = BTreeMap::new();

        for generated in &instance.questions {
            let Some(base) = self.template().pool.iter().find(|q| q.id() == generated.id()) else {
                warn!(
                    template = self.id(),
                    question = generated.id(),
                    "pregunta regenerada sin ítem en el pool; se omite de la corrección"
                );
                continue;
            };

            let submitted = answers.get(generated.id());
            let result = grade_question(base, generated, submitted);
            results.insert(generated.id().to_string(), result);
        }

        Ok(results)
    }

    /// Derive the full answer-key list for a regenerated instance. Keys are
    /// expressed in rendered ids, resolved through the pool by text.
    pub fn corrections(&self, instance: &QuizInstance) -> Vec<Correccion> {
        instance
            .questions
            .iter()
            .map(|generated| {
                let base = self.template().pool.iter().find(|q| q.id() == generated.id());
                match base {
                    Some(base) => derive_correction(base, generated),
                    None => Correccion {
                        id: generated.id().to_string(),
                        answer_key: ClaveRespuesta::Texto(String::new()),
                        pasos: Vec::new(),
                    },
                }
            })
            .collect()
    }
}

fn grade_question(
    base: &Question,
    generated: &GeneratedQuestion,
    submitted: Option<&Answer>,
) -> QuestionResult {
    match (base, generated) {
        (Question::Mc(mc), GeneratedQuestion::Mc { options, .. }) => {
            let selected = match submitted {
                Some(Answer::Opcion(id)) => options.iter().find(|o| o.option_id == *id),
                _ => None,
            };
            let Some(selected) = selected else {
                return QuestionResult {
                    correct: false,
                    explanation: None,
                };
            };
            let original = mc.options.iter().find(|o| o.text == selected.text);
            QuestionResult {
                correct: original.map(|o| o.correct).unwrap_or(false),
                explanation: Some(mc.explanation.clone()),
            }
        }
        (Question::Tf(tf), GeneratedQuestion::Tf { .. }) => {
            let submitted_value = match submitted {
                Some(Answer::Booleano(b)) => Some(*b),
                _ => None,
            };
            let explanation = if submitted_value.unwrap_or(false) {
                tf.because_true.clone()
            } else {
                tf.because_false.clone()
            };
            QuestionResult {
                correct: submitted_value == Some(tf.answer),
                explanation: Some(explanation),
            }
        }
        (Question::Match(m), GeneratedQuestion::Match { left_items, right_items, .. }) => {
            let pares = match submitted {
                Some(Answer::Pares(pares)) => pares.clone(),
                _ => BTreeMap::new(),
            };
            let mut all_correct = true;
            for (left_id, right_id) in &pares {
                let left = left_items.iter().find(|i| i.item_id == *left_id);
                let right = right_items.iter().find(|i| i.item_id == *right_id);
                let (Some(left), Some(right)) = (left, right) else {
                    all_correct = false;
                    break;
                };
                let pair = m.pairs.iter().find(|p| p.left == left.text);
                if pair.map(|p| p.right.as_str()) != Some(right.text.as_str()) {
                    all_correct = false;
                    break;
                }
            }
            QuestionResult {
                correct: all_correct,
                explanation: Some(m.explanation.clone()),
            }
        }
        // Shape mismatch between pool and regenerated question: graded miss.
        _ => QuestionResult {
            correct: false,
            explanation: None,
        },
    }
}

fn derive_correction(base: &Question, generated: &GeneratedQuestion) -> Correccion {
    match (base, generated) {
        (Question::Mc(mc), GeneratedQuestion::Mc { options, .. }) => {
            let correct_text = mc.options.iter().find(|o| o.correct).map(|o| o.text.as_str());
            let key = options
                .iter()
                .find(|o| Some(o.text.as_str()) == correct_text)
                .map(|o| o.option_id.clone())
                .unwrap_or_default();
            Correccion {
                id: mc.id.clone(),
                answer_key: ClaveRespuesta::Texto(key),
                pasos: vec![mc.explanation.clone()],
            }
        }
        (Question::Tf(tf), GeneratedQuestion::Tf { .. }) => Correccion {
            id: tf.id.clone(),
            answer_key: ClaveRespuesta::Texto(tf.answer.to_string()),
            pasos: vec![if tf.answer {
                tf.because_true.clone()
            } else {
                tf.because_false.clone()
            }],
        },
        (Question::Match(m), GeneratedQuestion::Match { left_items, right_items, .. }) => {
            let mut key = BTreeMap::new();
            for pair in &m.pairs {
                let left = left_items.iter().find(|i| i.text == pair.left);
                let right = right_items.iter().find(|i| i.text == pair.right);
                if let (Some(left), Some(right)) = (left, right) {
                    key.insert(left.item_id.clone(), right.item_id.clone());
                }
            }
            Correccion {
                id: m.id.clone(),
                answer_key: ClaveRespuesta::Pares(key),
                pasos: vec![m.explanation.clone()],
            }
        }
        _ => Correccion {
            id: generated.id().to_string(),
            answer_key: ClaveRespuesta::Texto(String::new()),
            pasos: Vec::new(),
        },
    }
}
