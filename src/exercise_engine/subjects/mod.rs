//! Subject generator implementations.
//!
//! | Module       | Generators                                                   |
//! |--------------|--------------------------------------------------------------|
//! | `matematica` | n-term additions, percentages                                |
//! | `fisica`     | uniform rectilinear motion, density                          |
//! | `economia`   | quiz topics (break-even point, gross margin, T-account balance) |
//!
//! Each generator implements [`ExerciseGenerator`] and is registered in the
//! [`Catalog`]; nothing here is reachable except through that contract.
//!
//! [`ExerciseGenerator`]: crate::exercise_engine::generator::ExerciseGenerator
//! [`Catalog`]: crate::exercise_engine::catalog::Catalog

pub mod economia;
pub mod fisica;
pub mod matematica;
