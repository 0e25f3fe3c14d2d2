//! # ejercicios_gen
//!
//! A fully offline, deterministic school-exercise generator with
//! regeneration-based correction.
//!
//! The engine produces two kinds of content: parametric exercises built by
//! per-subject generators (arithmetic, physics, economics, accounting) and
//! template-driven
//! quizzes selected from authored question pools. Both share the same seeded
//! PRNG, so the server never stores what it showed — grading re-derives the
//! exact instance from the seed and diffs the learner's answers against it.
//!
//! ## How it works
//!
//! 1. The backend mints a seed and calls [`Catalog::generate`] (parametric
//!    exercises) or [`QuizGenerator::generate`] (pool quizzes).
//! 2. Parameters are validated up front; only then is the PRNG derived from
//!    the seed and consumed in a fixed order to build the instance.
//! 3. At correction time the same seed comes back:
//!    [`QuizGenerator::validate_answers`] regenerates the instance, resolves
//!    every question to its authored pool item, and grades by rendered text —
//!    never by position.
//!
//! ## Key features
//!
//! - **Deterministic**: identical `(seed, parameters)` always produce
//!   structurally identical instances; seeds can be integers or strings
//!   (strings are folded with a 31x rolling hash over UTF-16 code units).
//! - **Versioned contract**: every exercise is stamped with its generator id
//!   and version, so a draw-order change can be shipped as a new version
//!   without breaking in-flight instances.
//! - **Spanish wire contract**: field names (`rangoMin`, `permitirNegativos`,
//!   `displayCount`) and validation messages keep the shapes existing
//!   callers already speak.
//!
//! ## Quick start
//!
//! ```rust
//! use ejercicios_gen::{
//!     Catalog, CalculadoraEscolar, GeneradorParametros, GenerateOptions, Materia, Nivel,
//!     QuizGenerator, Seed,
//! };
//! use ejercicios_gen::exercise_engine::banks;
//!
//! // Parametric exercise: route by generator id.
//! let catalog = Catalog::standard();
//! let params = GeneradorParametros::new(Materia::Fisica, "MRU", Nivel::Basico);
//! let ejercicio = catalog
//!     .generate("fisica/cinematica/mru", &Seed::from("demo-seed"), &params, &CalculadoraEscolar)
//!     .unwrap();
//! println!("{} [v{}] {}", ejercicio.id, ejercicio.generador_version, ejercicio.enunciado);
//!
//! // Pool quiz: generate, collect answers, grade by replay.
//! let quiz = QuizGenerator::new(banks::sumas_basicas());
//! let instance = quiz.generate(GenerateOptions::new("demo-seed")).unwrap();
//! for pregunta in &instance.questions {
//!     println!("- {}", pregunta.id());
//! }
//! let resultados = quiz
//!     .validate_answers("demo-seed", &Default::default())
//!     .unwrap();
//! assert_eq!(resultados.len(), instance.questions.len());
//! ```

pub mod exercise_engine;

// Convenience re-exports so callers can use `ejercicios_gen::Catalog`
// directly without reaching into `exercise_engine::`.
pub use exercise_engine::{
    generate, generate_renderable, Answer, CalcRequest, CalcResult, CalculadoraEscolar,
    Calculator, Catalog, ClaveRespuesta, Correccion, Ejercicio, EjercicioRenderable,
    ExerciseGenerator, GenError, GeneradorParametros, GenerateOptions, GeneratedQuestion,
    Materia, Nivel, Opciones, Question, QuestionResult, QuizGenerator, QuizInstance,
    QuizTemplate, Respuesta, Result, Seed, SeededPrng, SelectionConfig, Unidad,
};
