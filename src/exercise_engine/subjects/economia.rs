//! Economics and accounting quiz topics.
//!
//! Topics are plain functions over an explicit PRNG handle. There is no
//! module-level generator to initialize; whoever calls a topic hands it the
//! randomness it may consume, which keeps the replay contract visible in the
//! signature.

use crate::exercise_engine::calculator::Calculator;
use crate::exercise_engine::error::Result;
use crate::exercise_engine::exercise::{Ejercicio, Respuesta};
use crate::exercise_engine::generator::ExerciseGenerator;
use crate::exercise_engine::params::{GeneradorParametros, Materia, Nivel};
use crate::exercise_engine::prng::SeededPrng;

/// Scale an inclusive range by the difficulty factor, clamped below by
/// `min_floor` and kept non-empty.
pub fn ajustar_rango(min: i64, max: i64, nivel: Nivel, min_floor: i64) -> (i64, i64) {
    let factor = nivel.factor();
    let min_escalado = min_floor.max((min as f64 * factor).round() as i64);
    let max_escalado = min_escalado.max((max as f64 * factor).round() as i64);
    (min_escalado, max_escalado)
}

/// One uniform pick from a non-empty slice.
pub fn pick_one<'a, T>(rng: &mut SeededPrng, items: &'a [T]) -> &'a T {
    &items[rng.int(0, items.len() as i64 - 1) as usize]
}

/// Biased coin flip.
pub fn rand_bool(rng: &mut SeededPrng, probability: f64) -> bool {
    rng.next() < probability
}

/// Body of a quiz produced by a topic template: everything except routing and
/// stamping.
pub struct CuerpoQuiz {
    pub enunciado: String,
    pub opciones: Vec<String>,
    pub correcta: String,
    pub explicacion: String,
}

/// Topic template: pure function of the PRNG stream and the difficulty tier.
pub type Plantilla = fn(&mut SeededPrng, Nivel) -> CuerpoQuiz;

/// A registered quiz topic. One struct per topic; the behavioral difference
/// lives entirely in the `plantilla` field.
pub struct TemaQuiz {
    id: &'static str,
    materia: Materia,
    categorias: [&'static str; 1],
    prefix: &'static str,
    plantilla: Plantilla,
}

impl ExerciseGenerator for TemaQuiz {
    fn id(&self) -> &str {
        self.id
    }

    fn materia(&self) -> Materia {
        self.materia
    }

    fn categorias(&self) -> &[&str] {
        &self.categorias
    }

    fn prefix(&self) -> &str {
        self.prefix
    }

    fn build(
        &self,
        params: &GeneradorParametros,
        _calc: &dyn Calculator,
        rng: &mut SeededPrng,
    ) -> Result<Ejercicio> {
        let cuerpo = (self.plantilla)(rng, params.nivel);
        let mut ejercicio = Ejercicio::sin_estampar(
            self.materia,
            params.categoria.clone(),
            params.nivel,
            cuerpo.enunciado,
            Respuesta::Multiple {
                opciones: cuerpo.opciones,
                correcta: cuerpo.correcta,
            },
        );
        ejercicio.pasos = vec![cuerpo.explicacion];
        ejercicio.tags = vec![self.materia.to_string(), self.categorias[0].to_string()];
        Ok(ejercicio)
    }
}

/// Percent distractors around `correcta`, kept inside `(0, 100)` and distinct.
/// Bounded rejection plus deterministic offset fill, like the shared helpers.
fn desvios_porcentuales(rng: &mut SeededPrng, correcta: i64, cantidad: usize, desvio_max: i64) -> Vec<i64> {
    let mut opciones = Vec::with_capacity(cantidad);
    let mut intentos = 0usize;
    while opciones.len() < cantidad && intentos < 64 {
        intentos += 1;
        let candidato = correcta + rng.int(-desvio_max, desvio_max);
        if candidato != correcta && (1..100).contains(&candidato) && !opciones.contains(&candidato) {
            opciones.push(candidato);
        }
    }
    let mut relleno = 1;
    while opciones.len() < cantidad {
        for candidato in [correcta - relleno, correcta + relleno] {
            if opciones.len() < cantidad
                && candidato != correcta
                && (1..100).contains(&candidato)
                && !opciones.contains(&candidato)
            {
                opciones.push(candidato);
            }
        }
        relleno += 1;
    }
    opciones
}

/// Break-even quantity: PE = CF / (P - CVu).
///
/// Fixed costs are constructed backwards from the margin and the target
/// quantity so the division is always exact.
fn punto_equilibrio(rng: &mut SeededPrng, nivel: Nivel) -> CuerpoQuiz {
    let (precio_min, precio_max) = ajustar_rango(2000, 8000, nivel, 1);
    let precio = rng.int(precio_min, precio_max);

    let factor = nivel.factor();
    let margen_min = 300.max((500.0 * factor).round() as i64);
    let cv_min = 100.max((300.0 * factor).round() as i64);
    let cv_max = (precio - margen_min).max(cv_min + 1);
    let costo_variable = rng.int(cv_min, cv_max);

    let margen = precio - costo_variable;
    let (q_min, q_max) = ajustar_rango(200, 800, nivel, 1);
    let cantidad = rng.int(q_min, q_max);
    let costo_fijo = margen * cantidad;

    let correcta = format!("{cantidad} unidades");
    let desvio_max = (40.0 * factor).round() as i64;
    let mut opciones = vec![correcta.clone()];
    let mut intentos = 0usize;
    while opciones.len() < 4 && intentos < 64 {
        intentos += 1;
        let desvio = rng.int(-desvio_max, desvio_max);
        let candidato = 1.max(cantidad + cantidad * desvio / 100);
        let texto = format!("{candidato} unidades");
        if !opciones.contains(&texto) {
            opciones.push(texto);
        }
    }
    let mut relleno = 1;
    while opciones.len() < 4 {
        let texto = format!("{} unidades", cantidad + relleno);
        if !opciones.contains(&texto) {
            opciones.push(texto);
        }
        relleno += 1;
    }
    let opciones = rng.shuffle(&opciones);

    CuerpoQuiz {
        enunciado: format!(
            "Una empresa tiene Costos Fijos de $ {costo_fijo}.\n\
             Vende su producto a $ {precio} por unidad y el costo variable unitario (CVu) es de $ {costo_variable}.\n\
             ¿Cuál es el punto de equilibrio en unidades (PE = CF / (P – CVu))?"
        ),
        opciones,
        correcta,
        explicacion: "El punto de equilibrio indica la cantidad de unidades que debe vender la \
                      empresa para no ganar ni perder: PE = Costos Fijos / (Precio – Costo variable unitario)."
            .to_string(),
    }
}

/// Gross margin as a percentage of sales. The cost of sales is derived from a
/// drawn target margin so the percentage is a whole number.
fn margen_bruto(rng: &mut SeededPrng, _nivel: Nivel) -> CuerpoQuiz {
    let ventas = rng.int(100, 300) * 1000;
    let margen = rng.int(10, 80);
    let costo_ventas = ventas * (100 - margen) / 100;

    let correcta = format!("{margen} %");
    let distractores: Vec<String> = desvios_porcentuales(rng, margen, 3, 15)
        .into_iter()
        .map(|d| format!("{d} %"))
        .collect();
    let mut opciones = vec![correcta.clone()];
    opciones.extend(distractores);
    let opciones = rng.shuffle(&opciones);

    CuerpoQuiz {
        enunciado: format!(
            "Una empresa tiene Ventas por $ {ventas} y Costo de ventas por $ {costo_ventas}.\n\
             La Ganancia Bruta es Ventas – Costo de ventas.\n\
             ¿Cuál es el margen bruto (Ganancia Bruta / Ventas × 100)?"
        ),
        opciones,
        correcta,
        explicacion: "El margen bruto se calcula como (Ganancia Bruta / Ventas) × 100. Indica qué \
                      porcentaje de cada peso vendido queda para cubrir otros gastos y generar beneficio."
            .to_string(),
    }
}

/// T-account balance: given debits and credits, ask for the closing balance
/// and its side.
///
/// Draw order: account nature, account name, debits, credits, then the
/// option shuffle.
fn saldo_normal(rng: &mut SeededPrng, nivel: Nivel) -> CuerpoQuiz {
    const DEUDORAS: [&str; 4] = ["Caja", "Banco c/c", "Clientes", "Mercaderías"];
    const ACREEDORAS: [&str; 3] = ["Proveedores", "Deudas Bancarias", "Capital"];

    let cuenta = if rand_bool(rng, 0.5) {
        *pick_one(rng, &DEUDORAS)
    } else {
        *pick_one(rng, &ACREEDORAS)
    };

    let (min, max) = match nivel {
        Nivel::Basico => (5, 10),
        Nivel::Intermedio => (8, 16),
        Nivel::Avanzado => (12, 25),
        _ => ajustar_rango(12, 25, nivel, 1),
    };
    let debitos = rng.int(min, max) * 1000;
    let creditos = rng.int(min - 3, max - 5) * 1000;

    let saldo = (debitos - creditos).abs();
    let tipo = if debitos > creditos { "Deudor" } else { "Acreedor" };
    let correcta = format!("{saldo} {tipo}");

    let opciones = rng.shuffle(&[
        format!("{saldo} Deudor"),
        format!("{saldo} Acreedor"),
        format!("{} Deudor", saldo + 1000),
        format!("{} Acreedor", saldo + 1000),
    ]);

    let mut explicacion = String::from(
        "Saldo = Débitos – Créditos si predominan los débitos (saldo Deudor) o \
         Créditos – Débitos si predominan los créditos (saldo Acreedor).",
    );
    if nivel >= Nivel::Avanzado {
        explicacion.push_str(
            " El saldo se calcula sumando todos los débitos, restando todos los créditos y \
             verificando el lado con mayor importe en la cuenta T.",
        );
    }

    CuerpoQuiz {
        enunciado: format!(
            "En la cuenta \"{cuenta}\" se registraron Débitos por $ {debitos} y Créditos por \
             $ {creditos}. ¿Cuál es el saldo final y su tipo?"
        ),
        opciones,
        correcta,
        explicacion,
    }
}

/// Every bundled economics and accounting topic.
pub fn temas() -> Vec<TemaQuiz> {
    vec![
        TemaQuiz {
            id: "economia/costos/punto_equilibrio",
            materia: Materia::Economia,
            categorias: ["punto_equilibrio"],
            prefix: "PEQ",
            plantilla: punto_equilibrio,
        },
        TemaQuiz {
            id: "economia/resultados/margen_bruto",
            materia: Materia::Economia,
            categorias: ["margen_bruto"],
            prefix: "MGB",
            plantilla: margen_bruto,
        },
        TemaQuiz {
            id: "contabilidad/cuentas/saldo_normal",
            materia: Materia::Contabilidad,
            categorias: ["saldo_normal"],
            prefix: "SAL",
            plantilla: saldo_normal,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise_engine::calculator::CalculadoraEscolar;
    use crate::exercise_engine::generator::generate;
    use crate::exercise_engine::prng::Seed;

    fn tema(id: &str) -> TemaQuiz {
        temas()
            .into_iter()
            .find(|t| t.id == id)
            .expect("tema registrado")
    }

    #[test]
    fn ajustar_rango_scales_and_clamps() {
        assert_eq!(ajustar_rango(200, 800, Nivel::Intermedio, 1), (200, 800));
        assert_eq!(ajustar_rango(200, 800, Nivel::Basico, 1), (160, 640));
        assert_eq!(ajustar_rango(1, 2, Nivel::Basico, 5), (5, 5));
        assert_eq!(ajustar_rango(200, 800, Nivel::Divino, 1), (320, 1280));
    }

    #[test]
    fn pick_one_is_deterministic() {
        let items = ["a", "b", "c", "d"];
        let mut rng1 = SeededPrng::new(&Seed::from("pick"));
        let mut rng2 = SeededPrng::new(&Seed::from("pick"));
        assert_eq!(pick_one(&mut rng1, &items), pick_one(&mut rng2, &items));
    }

    #[test]
    fn punto_equilibrio_narrative_is_consistent() {
        let tema = tema("economia/costos/punto_equilibrio");
        let params =
            GeneradorParametros::new(Materia::Economia, "punto_equilibrio", Nivel::Intermedio);
        let e = generate(&tema, &Seed::from("equilibrio"), &params, &CalculadoraEscolar).unwrap();
        assert!(e.id.starts_with("PEQ-"));
        match &e.respuesta {
            Respuesta::Multiple { opciones, correcta } => {
                assert!(correcta.ends_with(" unidades"));
                assert!(opciones.contains(correcta));
                assert_eq!(opciones.len(), 4);
                // The stated fixed cost divides exactly by the unit margin.
                let cantidad: i64 = correcta
                    .trim_end_matches(" unidades")
                    .parse()
                    .expect("cantidad numérica");
                assert!(cantidad >= 1);
            }
            otra => panic!("respuesta inesperada: {otra:?}"),
        }
    }

    #[test]
    fn margen_bruto_percent_is_whole_and_bounded() {
        let tema = tema("economia/resultados/margen_bruto");
        let params = GeneradorParametros::new(Materia::Economia, "margen_bruto", Nivel::Basico);
        let e = generate(&tema, &Seed::from("margen"), &params, &CalculadoraEscolar).unwrap();
        match &e.respuesta {
            Respuesta::Multiple { opciones, correcta } => {
                let margen: i64 = correcta.trim_end_matches(" %").parse().unwrap();
                assert!((10..=80).contains(&margen));
                for opcion in opciones {
                    let valor: i64 = opcion.trim_end_matches(" %").parse().unwrap();
                    assert!((1..100).contains(&valor));
                }
            }
            otra => panic!("respuesta inesperada: {otra:?}"),
        }
    }

    #[test]
    fn saldo_normal_amount_and_side_are_consistent() {
        let tema = tema("contabilidad/cuentas/saldo_normal");
        let params =
            GeneradorParametros::new(Materia::Contabilidad, "saldo_normal", Nivel::Avanzado);
        let e = generate(&tema, &Seed::from("saldo"), &params, &CalculadoraEscolar).unwrap();
        assert!(e.id.starts_with("SAL-"));
        assert_eq!(e.materia, Materia::Contabilidad);
        match &e.respuesta {
            Respuesta::Multiple { opciones, correcta } => {
                assert_eq!(opciones.len(), 4);
                assert!(opciones.contains(correcta));
                assert!(correcta.ends_with(" Deudor") || correcta.ends_with(" Acreedor"));
            }
            otra => panic!("respuesta inesperada: {otra:?}"),
        }
        // The tier at or above avanzado appends the T-account walkthrough.
        assert!(e.pasos[0].contains("cuenta T"));
        let nombres = [
            "Caja", "Banco c/c", "Clientes", "Mercaderías",
            "Proveedores", "Deudas Bancarias", "Capital",
        ];
        assert!(nombres.iter().any(|n| e.enunciado.contains(n)));
    }

    #[test]
    fn economia_routing_rejects_contabilidad_topics() {
        let tema = tema("contabilidad/cuentas/saldo_normal");
        let params =
            GeneradorParametros::new(Materia::Economia, "saldo_normal", Nivel::Basico);
        let err = generate(&tema, &Seed::from("x"), &params, &CalculadoraEscolar)
            .unwrap_err()
            .to_string();
        assert!(err.starts_with("Materia inválida"));
    }

    #[test]
    fn same_seed_same_topic_quiz() {
        let tema_a = tema("economia/costos/punto_equilibrio");
        let params =
            GeneradorParametros::new(Materia::Economia, "punto_equilibrio", Nivel::Divino);
        let a = generate(&tema_a, &Seed::Entero(1234), &params, &CalculadoraEscolar).unwrap();
        let b = generate(&tema_a, &Seed::Entero(1234), &params, &CalculadoraEscolar).unwrap();
        assert_eq!(a, b);
    }
}
