//! Shared builder functions used across subject generators.
//!
//! Every generator assembles the same pieces: round results, synthesize
//! plausible distractors, and shuffle the final option list. These helpers
//! centralise that work so subject files focus on domain logic only.
//!
//! ## RNG ordering
//!
//! Helpers that take `&mut SeededPrng` consume draws in a fixed order and
//! (for the rejection loops) a deterministic count for a given seed. Any
//! change to draw order or count is a contract break and requires a version
//! bump on every generator that calls the helper.

use crate::exercise_engine::prng::SeededPrng;

/// Round to `decimales` decimal places.
pub fn redondear(valor: f64, decimales: u32) -> f64 {
    let factor = 10f64.powi(decimales as i32);
    (valor * factor).round() / factor
}

/// Format a value with its unit, rounded to 2 decimals (`"13.5 m"`).
pub fn formatear_con_unidad(valor: f64, unidad: &str) -> String {
    format!("{} {unidad}", redondear(valor, 2))
}

/// Synthesize `cantidad` distinct wrong options around a correct value by
/// scaling it with a random factor in `1 ± variacion`.
///
/// Rejection sampling with a bounded attempt budget: after the budget is
/// exhausted (tiny or zero correct values can make multiplicative distractors
/// collide) the remainder is filled with fixed offsets so the function always
/// terminates and stays deterministic.
pub fn generar_opciones_incorrectas(
    rng: &mut SeededPrng,
    correcta: f64,
    cantidad: usize,
    variacion: f64,
) -> Vec<f64> {
    let mut opciones: Vec<f64> = Vec::with_capacity(cantidad);
    let mut intentos = 0usize;
    while opciones.len() < cantidad && intentos < 64 {
        intentos += 1;
        let factor = 1.0 + (rng.next() * variacion * 2.0 - variacion);
        let incorrecta = redondear(correcta * factor, 2);
        if incorrecta != correcta && incorrecta > 0.0 && !opciones.contains(&incorrecta) {
            opciones.push(incorrecta);
        }
    }
    let mut relleno = 1.0;
    while opciones.len() < cantidad {
        let candidata = redondear(correcta.abs() + relleno, 2);
        if candidata != correcta && !opciones.contains(&candidata) {
            opciones.push(candidata);
        }
        relleno += 1.0;
    }
    opciones
}

/// Integer distractors within `correcta ± spread`, never equal to the correct
/// value. Same bounded-rejection scheme as the float variant.
pub fn distractores_enteros(
    rng: &mut SeededPrng,
    correcta: i64,
    cantidad: usize,
    spread: i64,
) -> Vec<i64> {
    let spread = spread.max(1);
    let mut opciones: Vec<i64> = Vec::with_capacity(cantidad);
    let mut intentos = 0usize;
    while opciones.len() < cantidad && intentos < 64 {
        intentos += 1;
        let desvio = rng.int(1, spread);
        let candidata = if rng.next() < 0.5 {
            correcta - desvio
        } else {
            correcta + desvio
        };
        if candidata != correcta && !opciones.contains(&candidata) {
            opciones.push(candidata);
        }
    }
    let mut relleno = spread + 1;
    while opciones.len() < cantidad {
        let candidata = correcta + relleno;
        if !opciones.contains(&candidata) {
            opciones.push(candidata);
        }
        relleno += 1;
    }
    opciones
}

/// Shuffle the correct answer in with its distractors. The caller keeps track
/// of correctness by text, never by position.
pub fn opciones_multiple(
    rng: &mut SeededPrng,
    correcta: String,
    distractores: Vec<String>,
) -> Vec<String> {
    let mut todas = Vec::with_capacity(distractores.len() + 1);
    todas.push(correcta);
    todas.extend(distractores);
    rng.shuffle(&todas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise_engine::prng::Seed;

    #[test]
    fn redondear_truncates_to_decimals() {
        assert_eq!(redondear(13.257, 2), 13.26);
        assert_eq!(redondear(420.0, 2), 420.0);
    }

    #[test]
    fn distractors_are_distinct_and_never_correct() {
        let mut rng = SeededPrng::new(&Seed::from("distractores"));
        let ops = generar_opciones_incorrectas(&mut rng, 240.0, 3, 0.4);
        assert_eq!(ops.len(), 3);
        assert!(!ops.contains(&240.0));
        let mut dedup = ops.clone();
        dedup.sort_by(f64::total_cmp);
        dedup.dedup();
        assert_eq!(dedup.len(), 3);
    }

    #[test]
    fn distractors_terminate_on_zero_correct_value() {
        let mut rng = SeededPrng::new(&Seed::from("cero"));
        let ops = generar_opciones_incorrectas(&mut rng, 0.0, 3, 0.4);
        assert_eq!(ops.len(), 3);
    }

    #[test]
    fn integer_distractors_stay_distinct() {
        let mut rng = SeededPrng::new(&Seed::from("enteros"));
        let ops = distractores_enteros(&mut rng, 9, 3, 3);
        assert_eq!(ops.len(), 3);
        assert!(!ops.contains(&9));
    }

    #[test]
    fn opciones_multiple_keeps_all_texts() {
        let mut rng = SeededPrng::new(&Seed::from("mezcla"));
        let ops = opciones_multiple(
            &mut rng,
            "9".to_string(),
            vec!["8".to_string(), "10".to_string(), "7".to_string()],
        );
        assert_eq!(ops.len(), 4);
        assert!(ops.contains(&"9".to_string()));
    }
}
