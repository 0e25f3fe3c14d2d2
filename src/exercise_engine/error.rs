use thiserror::Error;

use crate::exercise_engine::params::Materia;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GenError>;

/// Failure taxonomy for generation and correction.
///
/// Everything here is synchronous and final: same inputs reproduce the same
/// failure, so nothing is ever retried. A submitted answer that cannot be
/// resolved against a regenerated instance is *not* an error — the correction
/// protocol marks it incorrect instead.
#[derive(Debug, Error)]
pub enum GenError {
    /// Structural or semantic parameter problem. Carries one message per
    /// violated rule, each prefixed with its field path (`"rangoMin: ..."`),
    /// and is raised strictly before any randomness is consumed.
    #[error("Parámetros inválidos: {}", .0.join("; "))]
    Validacion(Vec<String>),

    /// The request routed a `materia` to a generator of another subject.
    #[error("Materia inválida: el generador `{generador}` pertenece a `{esperada}` y recibió `{recibida}`")]
    MateriaInvalida {
        generador: String,
        esperada: Materia,
        recibida: Materia,
    },

    /// The requested `categoria` is outside the generator's declared set.
    #[error("Categoría inválida: el generador `{generador}` no maneja `{categoria}`")]
    CategoriaInvalida {
        generador: String,
        categoria: String,
    },

    /// A request or pool item outside the closed type set. Fails fast,
    /// never silently coerced.
    #[error("Tipo no soportado: {0}")]
    TipoNoSoportado(String),
}

impl GenError {
    /// Single-issue validation error.
    pub(crate) fn invalido(path: &str, msg: &str) -> Self {
        GenError::Validacion(vec![format!("{path}: {msg}")])
    }
}
