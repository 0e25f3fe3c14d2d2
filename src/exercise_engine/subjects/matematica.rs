//! Arithmetic generators.

use serde_json::json;

use crate::exercise_engine::calculator::{CalcRequest, Calculator};
use crate::exercise_engine::error::Result;
use crate::exercise_engine::exercise::{Ejercicio, Respuesta};
use crate::exercise_engine::generator::ExerciseGenerator;
use crate::exercise_engine::helpers::{distractores_enteros, opciones_multiple};
use crate::exercise_engine::params::{GeneradorParametros, Materia, Nivel};
use crate::exercise_engine::prng::SeededPrng;

/// Widest term range an override can request.
const RANGO_LIMITE: i64 = 1_000_000;

/// Inclusive term range per difficulty tier, before option overrides.
fn rango_por_nivel(nivel: Nivel) -> (i64, i64) {
    match nivel {
        Nivel::Basico => (1, 20),
        Nivel::Intermedio => (1, 100),
        _ => (1, 999),
    }
}

/// N-term addition with multiple-choice options.
///
/// Draw order: one draw per term, then the distractor loop, then the option
/// shuffle. Fixed since version 1.
pub struct SumasBasicas;

impl ExerciseGenerator for SumasBasicas {
    fn id(&self) -> &str {
        "matematica/aritmetica/sumas_basicas"
    }

    fn materia(&self) -> Materia {
        Materia::Matematica
    }

    fn categorias(&self) -> &[&str] {
        &["sumas_basicas"]
    }

    fn prefix(&self) -> &str {
        "SUM"
    }

    fn build(
        &self,
        params: &GeneradorParametros,
        calc: &dyn Calculator,
        rng: &mut SeededPrng,
    ) -> Result<Ejercicio> {
        let o = &params.opciones;
        let (mut min, mut max) = rango_por_nivel(params.nivel);
        // Finite but absurd overrides are clamped to the school domain; the
        // distractor spread below is derived from the span.
        if let Some(v) = o.rango_min {
            min = (v as i64).clamp(-RANGO_LIMITE, RANGO_LIMITE);
        }
        if let Some(v) = o.rango_max {
            max = (v as i64).clamp(-RANGO_LIMITE, RANGO_LIMITE);
        }
        if o.permitir_negativos == Some(true) && min > -max {
            min = -max;
        }
        // Overrides can invert the defaults (validation only compares the two
        // user-supplied bounds); a collapsed range beats a broken draw.
        if max < min {
            max = min;
        }

        let cantidad = o.cantidad_terminos.unwrap_or(2.0) as usize;
        let terminos: Vec<i64> = (0..cantidad).map(|_| rng.int(min, max)).collect();

        let computo = calc.calcular(&CalcRequest::new("suma", json!({ "terminos": terminos })))?;
        let total = computo.resultado as i64;

        let expresion = terminos
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(" + ");
        let spread = (max - min).max(1) / 4 + 1;
        let distractores: Vec<String> = distractores_enteros(rng, total, 3, spread)
            .into_iter()
            .map(|d| d.to_string())
            .collect();
        let opciones = opciones_multiple(rng, total.to_string(), distractores);

        let mut ejercicio = Ejercicio::sin_estampar(
            Materia::Matematica,
            params.categoria.clone(),
            params.nivel,
            format!("¿Cuánto es {expresion}?"),
            Respuesta::Multiple {
                opciones,
                correcta: total.to_string(),
            },
        );
        for (i, t) in terminos.iter().enumerate() {
            ejercicio.datos.insert(format!("termino{}", i + 1), *t as f64);
        }
        ejercicio.pasos = computo.pasos;
        ejercicio.tags = vec!["aritmetica".to_string(), "sumas".to_string()];
        Ok(ejercicio)
    }
}

/// Percentage-of-a-quantity exercises with a numeric answer.
pub struct Porcentaje;

impl ExerciseGenerator for Porcentaje {
    fn id(&self) -> &str {
        "matematica/aritmetica/porcentaje"
    }

    fn materia(&self) -> Materia {
        Materia::Matematica
    }

    fn categorias(&self) -> &[&str] {
        &["porcentaje"]
    }

    fn prefix(&self) -> &str {
        "PCT"
    }

    fn build(
        &self,
        params: &GeneradorParametros,
        calc: &dyn Calculator,
        rng: &mut SeededPrng,
    ) -> Result<Ejercicio> {
        // Friendly percentages only; the point is the mechanic, not division.
        const PORCENTAJES: [i64; 5] = [10, 20, 25, 50, 75];

        let (_, max) = rango_por_nivel(params.nivel);
        // Bases are multiples of 20 so every listed percentage lands exact.
        let base = rng.int(1, max / 20 + 1) * 20;
        let idx = rng.int(0, PORCENTAJES.len() as i64 - 1) as usize;
        let porcentaje = PORCENTAJES[idx];

        let computo = calc.calcular(&CalcRequest::new(
            "porcentaje",
            json!({ "base": base, "porcentaje": porcentaje }),
        ))?;

        let mut ejercicio = Ejercicio::sin_estampar(
            Materia::Matematica,
            params.categoria.clone(),
            params.nivel,
            format!("¿Cuánto es el {porcentaje}% de {base}?"),
            Respuesta::Numerica {
                valor: computo.resultado,
                unidad: None,
            },
        );
        ejercicio.datos.insert("base".to_string(), base as f64);
        ejercicio.datos.insert("porcentaje".to_string(), porcentaje as f64);
        ejercicio.pasos = computo.pasos;
        ejercicio.tags = vec!["aritmetica".to_string(), "porcentaje".to_string()];
        Ok(ejercicio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise_engine::calculator::CalculadoraEscolar;
    use crate::exercise_engine::generator::generate;
    use crate::exercise_engine::prng::Seed;

    fn params(categoria: &str, nivel: Nivel) -> GeneradorParametros {
        GeneradorParametros::new(Materia::Matematica, categoria, nivel)
    }

    #[test]
    fn sumas_respects_cantidad_terminos() {
        let mut p = params("sumas_basicas", Nivel::Basico);
        p.opciones.cantidad_terminos = Some(4.0);
        let e = generate(&SumasBasicas, &Seed::from("terminos"), &p, &CalculadoraEscolar).unwrap();
        assert_eq!(e.datos.len(), 4);
        assert_eq!(e.enunciado.matches('+').count(), 3);
    }

    #[test]
    fn sumas_correct_option_is_the_sum_of_datos() {
        let p = params("sumas_basicas", Nivel::Intermedio);
        let e = generate(&SumasBasicas, &Seed::from("suma"), &p, &CalculadoraEscolar).unwrap();
        let total: f64 = e.datos.values().sum();
        match &e.respuesta {
            Respuesta::Multiple { opciones, correcta } => {
                assert_eq!(correcta, &(total as i64).to_string());
                assert!(opciones.contains(correcta));
                assert_eq!(opciones.len(), 4);
            }
            otra => panic!("respuesta inesperada: {otra:?}"),
        }
    }

    #[test]
    fn sumas_negative_terms_need_opt_in() {
        let mut p = params("sumas_basicas", Nivel::Basico);
        p.opciones.cantidad_terminos = Some(6.0);
        let e = generate(&SumasBasicas, &Seed::from("positivos"), &p, &CalculadoraEscolar).unwrap();
        assert!(e.datos.values().all(|t| *t >= 1.0));
    }

    #[test]
    fn extreme_finite_range_overrides_are_clamped() {
        let mut p = params("sumas_basicas", Nivel::Basico);
        p.opciones.rango_min = Some(-1e300);
        p.opciones.rango_max = Some(1e300);
        let e = generate(&SumasBasicas, &Seed::from("extremo"), &p, &CalculadoraEscolar).unwrap();
        assert!(e
            .datos
            .values()
            .all(|t| t.abs() <= RANGO_LIMITE as f64));
    }

    #[test]
    fn porcentaje_answer_is_exact() {
        let p = params("porcentaje", Nivel::Basico);
        let e = generate(&Porcentaje, &Seed::from("pct"), &p, &CalculadoraEscolar).unwrap();
        let base = e.datos["base"];
        let porcentaje = e.datos["porcentaje"];
        match e.respuesta {
            Respuesta::Numerica { valor, .. } => {
                assert_eq!(valor, base * porcentaje / 100.0);
                assert_eq!(valor.fract(), 0.0);
            }
            otra => panic!("respuesta inesperada: {otra:?}"),
        }
    }
}
