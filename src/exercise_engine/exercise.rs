//! Generated artifact types and the presentation-boundary mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::exercise_engine::params::{Materia, Nivel};

/// Answer shape of a generated exercise. Exhaustively matched at every
/// consumption site; adding a variant is a contract-breaking change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo", rename_all = "snake_case")]
pub enum Respuesta {
    Multiple {
        opciones: Vec<String>,
        correcta: String,
    },
    VerdaderoFalso {
        correcta: bool,
    },
    Numerica {
        valor: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unidad: Option<String>,
    },
}

/// One fully rendered exercise. Created fresh per call and never persisted;
/// two calls with identical `(seed, params)` produce structurally identical
/// values, which is what `PartialEq` is for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ejercicio {
    pub id: String,
    #[serde(rename = "generadorId")]
    pub generador_id: String,
    #[serde(rename = "generadorVersion")]
    pub generador_version: u32,
    pub materia: Materia,
    pub categoria: String,
    pub nivel: Nivel,
    pub enunciado: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub datos: BTreeMap<String, f64>,
    pub respuesta: Respuesta,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pasos: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Ejercicio {
    /// Skeleton with empty stamping fields; [`generate`] fills `id`,
    /// `generador_id` and `generador_version` centrally.
    ///
    /// [`generate`]: crate::exercise_engine::generator::generate
    pub fn sin_estampar(
        materia: Materia,
        categoria: impl Into<String>,
        nivel: Nivel,
        enunciado: impl Into<String>,
        respuesta: Respuesta,
    ) -> Self {
        Ejercicio {
            id: String::new(),
            generador_id: String::new(),
            generador_version: 0,
            materia,
            categoria: categoria.into(),
            nivel,
            enunciado: enunciado.into(),
            datos: BTreeMap::new(),
            respuesta,
            pasos: Vec::new(),
            tags: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Presentation DTOs — the boundary to the (out-of-scope) UI layer
// ---------------------------------------------------------------------------

/// Rendered option with a display id minted in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpcionRender {
    pub id: String,
    pub texto: String,
}

/// Question half of the renderable pair: no answer data inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreguntaRender {
    pub id: String,
    pub enunciado: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opciones: Option<Vec<OpcionRender>>,
}

/// Answer key: a single rendered id / formatted value, or a left→right id map
/// for matching questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaveRespuesta {
    Texto(String),
    Pares(BTreeMap<String, String>),
}

/// Derived answer key for one question. Always recomputed, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correccion {
    pub id: String,
    #[serde(rename = "answerKey")]
    pub answer_key: ClaveRespuesta,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pasos: Vec<String>,
}

/// Question + correction pair handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EjercicioRenderable {
    pub pregunta: PreguntaRender,
    pub correccion: Correccion,
}

/// Pure, order-preserving mapping from the internal exercise shape to the
/// presentation DTO. Multiple-choice correctness is resolved by matching the
/// rendered option *text* against the stored correct text — never by index.
pub fn renderable(ejercicio: &Ejercicio) -> EjercicioRenderable {
    let (opciones, answer_key) = match &ejercicio.respuesta {
        Respuesta::Multiple { opciones, correcta } => {
            let rendered: Vec<OpcionRender> = opciones
                .iter()
                .enumerate()
                .map(|(i, texto)| OpcionRender {
                    id: format!("opt_{i}"),
                    texto: texto.clone(),
                })
                .collect();
            let clave = rendered
                .iter()
                .find(|o| o.texto == *correcta)
                .map(|o| o.id.clone())
                .unwrap_or_default();
            (Some(rendered), ClaveRespuesta::Texto(clave))
        }
        Respuesta::VerdaderoFalso { correcta } => {
            let rendered = vec![
                OpcionRender {
                    id: "true".to_string(),
                    texto: "Verdadero".to_string(),
                },
                OpcionRender {
                    id: "false".to_string(),
                    texto: "Falso".to_string(),
                },
            ];
            (
                Some(rendered),
                ClaveRespuesta::Texto(correcta.to_string()),
            )
        }
        Respuesta::Numerica { valor, unidad } => {
            let clave = match unidad {
                Some(u) => format!("{valor} {u}"),
                None => valor.to_string(),
            };
            (None, ClaveRespuesta::Texto(clave))
        }
    };

    EjercicioRenderable {
        pregunta: PreguntaRender {
            id: ejercicio.id.clone(),
            enunciado: ejercicio.enunciado.clone(),
            opciones,
        },
        correccion: Correccion {
            id: ejercicio.id.clone(),
            answer_key,
            pasos: ejercicio.pasos.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mc() -> Ejercicio {
        let mut e = Ejercicio::sin_estampar(
            Materia::Matematica,
            "sumas_basicas",
            Nivel::Basico,
            "¿Cuánto es 4 + 5?",
            Respuesta::Multiple {
                opciones: vec!["8".into(), "9".into(), "10".into()],
                correcta: "9".into(),
            },
        );
        e.id = "SUM-00000001".to_string();
        e.pasos = vec!["4 + 5 = 9.".to_string()];
        e
    }

    #[test]
    fn renderable_resolves_correct_option_by_text() {
        let dto = renderable(&mc());
        let opciones = dto.pregunta.opciones.unwrap();
        assert_eq!(opciones[1].texto, "9");
        assert_eq!(dto.correccion.answer_key, ClaveRespuesta::Texto("opt_1".into()));
        assert_eq!(dto.correccion.pasos, vec!["4 + 5 = 9.".to_string()]);
    }

    #[test]
    fn renderable_preserves_option_order() {
        let dto = renderable(&mc());
        let textos: Vec<String> = dto
            .pregunta
            .opciones
            .unwrap()
            .into_iter()
            .map(|o| o.texto)
            .collect();
        assert_eq!(textos, vec!["8", "9", "10"]);
    }

    #[test]
    fn true_false_renders_fixed_ids() {
        let e = Ejercicio::sin_estampar(
            Materia::Economia,
            "margen_bruto",
            Nivel::Basico,
            "El margen bruto puede ser negativo.",
            Respuesta::VerdaderoFalso { correcta: true },
        );
        let dto = renderable(&e);
        assert_eq!(dto.correccion.answer_key, ClaveRespuesta::Texto("true".into()));
        let ids: Vec<String> = dto
            .pregunta
            .opciones
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["true", "false"]);
    }

    #[test]
    fn numeric_answers_format_their_unit() {
        let e = Ejercicio::sin_estampar(
            Materia::Fisica,
            "MRU",
            Nivel::Basico,
            "¿Qué distancia recorre?",
            Respuesta::Numerica {
                valor: 120.0,
                unidad: Some("m".to_string()),
            },
        );
        let dto = renderable(&e);
        assert_eq!(dto.pregunta.opciones, None);
        assert_eq!(dto.correccion.answer_key, ClaveRespuesta::Texto("120 m".into()));
    }
}
