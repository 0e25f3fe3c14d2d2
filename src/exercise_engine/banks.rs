//! Built-in authored template banks for the basic quizzes.
//!
//! Pure data. Each pool mixes the three question shapes so the selection and
//! correction paths all get exercised by the default content.

use crate::exercise_engine::pool::{
    MatchPair, MatchQuestion, McOption, McQuestion, Question, QuizMetadata, QuizSettings,
    QuizTemplate, SelectionConfig, TfQuestion,
};

fn settings(pool: &[Question]) -> QuizSettings {
    QuizSettings {
        display_count_default: pool.len().min(5),
        feedback_policy_default: "inmediato".to_string(),
        selection_default: SelectionConfig::Random,
    }
}

fn mc(id: &str, prompt: &str, options: &[(&str, bool, &str)], explanation: &str, tags: &[&str]) -> Question {
    Question::Mc(McQuestion {
        id: id.to_string(),
        prompt: prompt.to_string(),
        options: options
            .iter()
            .map(|(text, correct, because)| McOption {
                text: (*text).to_string(),
                correct: *correct,
                because: (*because).to_string(),
            })
            .collect(),
        explanation: explanation.to_string(),
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
    })
}

fn tf(id: &str, prompt: &str, answer: bool, because_true: &str, because_false: &str, tags: &[&str]) -> Question {
    Question::Tf(TfQuestion {
        id: id.to_string(),
        prompt: prompt.to_string(),
        answer,
        because_true: because_true.to_string(),
        because_false: because_false.to_string(),
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
    })
}

fn matching(id: &str, prompt: &str, pairs: &[(&str, &str)], explanation: &str, tags: &[&str]) -> Question {
    Question::Match(MatchQuestion {
        id: id.to_string(),
        prompt: prompt.to_string(),
        pairs: pairs
            .iter()
            .map(|(left, right)| MatchPair {
                left: (*left).to_string(),
                right: (*right).to_string(),
            })
            .collect(),
        explanation: explanation.to_string(),
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
    })
}

/// Five-item pool over basic additions: two mc, two tf, one match.
pub fn sumas_basicas() -> QuizTemplate {
    let pool = vec![
        mc(
            "sumas_mc_1",
            "¿Cuánto es 4 + 5?",
            &[
                ("8", false, "4 + 5 suma 9."),
                ("9", true, "4 + 5 = 9."),
                ("10", false, "Es una suma menor."),
                ("7", false, "4 + 5 es mayor."),
            ],
            "Sumá ambos números para obtener el resultado.",
            &["sumas", "basico"],
        ),
        mc(
            "sumas_mc_2",
            "¿Cuál es el resultado de 7 + 3?",
            &[
                ("9", false, "Sumaste uno menos."),
                ("10", true, "7 + 3 = 10."),
                ("11", false, "Sumaste uno de más."),
                ("12", false, "Es demasiado alto."),
            ],
            "Agregar 3 a 7 completa la decena.",
            &["sumas", "basico"],
        ),
        tf(
            "sumas_tf_1",
            "8 + 2 = 10.",
            true,
            "Sumar 2 a 8 completa 10.",
            "La suma correcta es 10.",
            &["sumas", "basico"],
        ),
        tf(
            "sumas_tf_2",
            "6 + 7 = 12.",
            false,
            "No, 6 + 7 es mayor.",
            "6 + 7 = 13.",
            &["sumas", "basico"],
        ),
        matching(
            "sumas_match_1",
            "Relaciona cada suma con su resultado.",
            &[("2 + 3", "5"), ("4 + 4", "8"), ("6 + 3", "9")],
            "Calculá cada suma y unila con su resultado.",
            &["sumas", "basico"],
        ),
    ];
    QuizTemplate {
        metadata: QuizMetadata {
            id: "sumas_basicas".to_string(),
            materia: "matematica".to_string(),
            titulo: "Sumas básicas".to_string(),
            idioma: "es".to_string(),
            tags: vec!["sumas".to_string()],
        },
        settings: settings(&pool),
        pool,
    }
}

/// Five-item pool over basic subtractions.
pub fn restas_basicas() -> QuizTemplate {
    let pool = vec![
        mc(
            "restas_mc_1",
            "¿Cuánto es 9 - 4?",
            &[
                ("3", false, "Restaste de más."),
                ("5", true, "9 - 4 = 5."),
                ("6", false, "Restaste de menos."),
                ("7", false, "No corresponde."),
            ],
            "Quitá 4 unidades de 9.",
            &["restas", "basico"],
        ),
        mc(
            "restas_mc_2",
            "¿Cuál es el resultado de 12 - 3?",
            &[
                ("8", false, "Restaste una unidad extra."),
                ("9", true, "12 - 3 = 9."),
                ("10", false, "Restaste menos de lo indicado."),
                ("7", false, "Es demasiado bajo."),
            ],
            "Se restan 3 unidades del total.",
            &["restas", "basico"],
        ),
        tf(
            "restas_tf_1",
            "10 - 5 = 5.",
            true,
            "La mitad de 10 es 5.",
            "El resultado correcto es 5.",
            &["restas", "basico"],
        ),
        tf(
            "restas_tf_2",
            "15 - 6 = 8.",
            false,
            "No, 15 - 6 es 9.",
            "15 - 6 = 9.",
            &["restas", "basico"],
        ),
        matching(
            "restas_match_1",
            "Relaciona cada resta con su resultado.",
            &[("10 - 3", "7"), ("12 - 4", "8"), ("15 - 9", "6")],
            "Restá el segundo número del primero.",
            &["restas", "basico"],
        ),
    ];
    QuizTemplate {
        metadata: QuizMetadata {
            id: "restas_basicas".to_string(),
            materia: "matematica".to_string(),
            titulo: "Restas básicas".to_string(),
            idioma: "es".to_string(),
            tags: vec!["restas".to_string()],
        },
        settings: settings(&pool),
        pool,
    }
}

/// All built-in templates, keyed by template id.
pub fn basic_templates() -> Vec<QuizTemplate> {
    vec![sumas_basicas(), restas_basicas()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_pools_have_unique_ids() {
        for template in basic_templates() {
            let mut ids: Vec<&str> = template.pool.iter().map(|q| q.id()).collect();
            let before = ids.len();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), before, "ids duplicados en {}", template.metadata.id);
        }
    }

    #[test]
    fn match_right_sides_are_distinguishable() {
        // Correction resolves match answers by rendered text; authored right
        // sides must therefore be pairwise distinct within a question.
        for template in basic_templates() {
            for q in &template.pool {
                if let Question::Match(m) = q {
                    let mut rights: Vec<&str> = m.pairs.iter().map(|p| p.right.as_str()).collect();
                    let before = rights.len();
                    rights.sort_unstable();
                    rights.dedup();
                    assert_eq!(rights.len(), before, "pares ambiguos en {}", m.id);
                }
            }
        }
    }
}
