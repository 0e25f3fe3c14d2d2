//! Registry of subject generators.

use crate::exercise_engine::calculator::Calculator;
use crate::exercise_engine::error::{GenError, Result};
use crate::exercise_engine::exercise::{Ejercicio, EjercicioRenderable};
use crate::exercise_engine::generator::{self, ExerciseGenerator};
use crate::exercise_engine::params::{GeneradorParametros, Materia};
use crate::exercise_engine::prng::Seed;
use crate::exercise_engine::subjects::{economia, fisica, matematica};

/// Immutable lookup from generator id to implementation. Built once at
/// startup; registration order is the iteration order of [`ids`].
///
/// [`ids`]: Catalog::ids
pub struct Catalog {
    generadores: Vec<Box<dyn ExerciseGenerator>>,
}

impl Catalog {
    /// Catalog with every bundled subject generator registered.
    pub fn standard() -> Self {
        let mut generadores: Vec<Box<dyn ExerciseGenerator>> = vec![
            Box::new(matematica::SumasBasicas),
            Box::new(matematica::Porcentaje),
            Box::new(fisica::MruGenerator),
            Box::new(fisica::DensidadGenerator),
        ];
        for tema in economia::temas() {
            generadores.push(Box::new(tema));
        }
        Catalog { generadores }
    }

    /// Empty catalog for callers that register their own generators.
    pub fn new() -> Self {
        Catalog {
            generadores: Vec::new(),
        }
    }

    pub fn register(&mut self, gen: Box<dyn ExerciseGenerator>) {
        self.generadores.push(gen);
    }

    pub fn get(&self, id: &str) -> Option<&dyn ExerciseGenerator> {
        self.generadores
            .iter()
            .find(|g| g.id() == id)
            .map(|g| g.as_ref())
    }

    pub fn ids(&self) -> Vec<&str> {
        self.generadores.iter().map(|g| g.id()).collect()
    }

    pub fn for_materia(&self, materia: Materia) -> Vec<&dyn ExerciseGenerator> {
        self.generadores
            .iter()
            .filter(|g| g.materia() == materia)
            .map(|g| g.as_ref())
            .collect()
    }

    fn require(&self, id: &str) -> Result<&dyn ExerciseGenerator> {
        self.get(id).ok_or_else(|| {
            GenError::Validacion(vec![format!("generador: `{id}` no está registrado.")])
        })
    }

    /// Run the full pipeline for the generator registered under `id`.
    pub fn generate(
        &self,
        id: &str,
        seed: &Seed,
        params: &GeneradorParametros,
        calc: &dyn Calculator,
    ) -> Result<Ejercicio> {
        generator::generate(self.require(id)?, seed, params, calc)
    }

    /// [`generate`] plus the mapping to the presentation DTO.
    ///
    /// [`generate`]: Catalog::generate
    pub fn generate_renderable(
        &self,
        id: &str,
        seed: &Seed,
        params: &GeneradorParametros,
        calc: &dyn Calculator,
    ) -> Result<EjercicioRenderable> {
        generator::generate_renderable(self.require(id)?, seed, params, calc)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise_engine::calculator::CalculadoraEscolar;
    use crate::exercise_engine::params::Nivel;

    #[test]
    fn standard_catalog_registers_every_subject() {
        let catalog = Catalog::standard();
        let ids = catalog.ids();
        assert!(ids.contains(&"matematica/aritmetica/sumas_basicas"));
        assert!(ids.contains(&"fisica/cinematica/mru"));
        assert!(ids.contains(&"economia/costos/punto_equilibrio"));
        assert!(ids.contains(&"contabilidad/cuentas/saldo_normal"));
        assert_eq!(catalog.for_materia(Materia::Fisica).len(), 2);
        assert_eq!(catalog.for_materia(Materia::Contabilidad).len(), 1);
    }

    #[test]
    fn unknown_generator_id_is_an_error() {
        let catalog = Catalog::standard();
        let params = GeneradorParametros::new(Materia::Fisica, "MRU", Nivel::Basico);
        let err = catalog
            .generate("fisica/cinematica/mruv", &Seed::from("x"), &params, &CalculadoraEscolar)
            .unwrap_err()
            .to_string();
        assert!(err.contains("fisica/cinematica/mruv"));
    }

    #[test]
    fn catalog_routes_to_the_right_generator() {
        let catalog = Catalog::standard();
        let params = GeneradorParametros::new(Materia::Fisica, "MRU", Nivel::Basico);
        let e = catalog
            .generate("fisica/cinematica/mru", &Seed::from("ruta"), &params, &CalculadoraEscolar)
            .unwrap();
        assert!(e.id.starts_with("MRU-"));
        assert_eq!(e.generador_id, "fisica/cinematica/mru");
    }
}
