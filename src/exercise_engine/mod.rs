//! Core exercise engine — seeded generation, pool-based quizzes, and
//! replay-based correction.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `prng`       | 32-bit LCG seeded from numbers or strings; the replay contract |
//! | `error`      | Failure taxonomy: validation, routing, unsupported types |
//! | `params`     | Request parameters, difficulty tiers, and the aggregate validator |
//! | `calculator` | Injected pure-computation collaborator with step-by-step output |
//! | `helpers`    | Rounding, unit formatting, distractor synthesis, option shuffling |
//! | `exercise`   | Generated artifact types and the presentation-boundary mapping |
//! | `generator`  | The per-subject contract plus the validate/route/build/stamp pipeline |
//! | `catalog`    | Registry routing generator ids to implementations |
//! | `subjects`   | Bundled generators: arithmetic, physics, economics, accounting |
//! | `pool`       | Authored question pools, templates, and selection configuration |
//! | `banks`      | Built-in template data for the basic quizzes |
//! | `selection`  | Template-driven quiz generation: selection and rendering |
//! | `correction` | Answer validation and answer-key derivation by regeneration |

pub mod banks;
pub mod calculator;
pub mod catalog;
pub mod correction;
pub mod error;
pub mod exercise;
pub mod generator;
pub mod helpers;
pub mod params;
pub mod pool;
pub mod prng;
pub mod selection;
pub mod subjects;

// Re-export the public API surface so callers can use
// `exercise_engine::generate` without reaching into sub-modules.
pub use calculator::{CalcRequest, CalcResult, CalculadoraEscolar, Calculator};
pub use catalog::Catalog;
pub use correction::{Answer, QuestionResult};
pub use error::{GenError, Result};
pub use exercise::{
    ClaveRespuesta, Correccion, Ejercicio, EjercicioRenderable, OpcionRender, PreguntaRender,
    Respuesta,
};
pub use generator::{generate, generate_renderable, ExerciseGenerator};
pub use params::{GeneradorParametros, Materia, Nivel, Opciones, Unidad};
pub use pool::{Question, QuizTemplate, SelectionConfig};
pub use prng::{Seed, SeededPrng};
pub use selection::{GenerateOptions, GeneratedQuestion, QuizGenerator, QuizInstance};
