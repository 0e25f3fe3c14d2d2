//! Physics generators: kinematics and fluids.

use serde_json::json;

use crate::exercise_engine::calculator::{CalcRequest, Calculator};
use crate::exercise_engine::error::Result;
use crate::exercise_engine::exercise::{Ejercicio, Respuesta};
use crate::exercise_engine::generator::ExerciseGenerator;
use crate::exercise_engine::helpers::{formatear_con_unidad, generar_opciones_incorrectas, opciones_multiple};
use crate::exercise_engine::params::{GeneradorParametros, Materia, Nivel, Unidad};
use crate::exercise_engine::prng::SeededPrng;

/// Convert a length in `unidad` to meters.
pub fn convertir_a_metros(valor: f64, unidad: Unidad) -> f64 {
    match unidad {
        Unidad::Cm => valor / 100.0,
        Unidad::M => valor,
        Unidad::Km => valor * 1000.0,
    }
}

/// Convert a length in meters to `unidad`.
pub fn convertir_desde_metros(valor: f64, unidad: Unidad) -> f64 {
    match unidad {
        Unidad::Cm => valor * 100.0,
        Unidad::M => valor,
        Unidad::Km => valor / 1000.0,
    }
}

/// Curriculum prompt for a physics routing key. A plain lookup: asking for a
/// key outside the table returns `None` instead of inventing a prompt.
pub fn enunciado_por_categoria(clave: &str) -> Option<&'static str> {
    let enunciado = match clave {
        "fisica/cinematica/mru" => {
            "Resolver MRU calculando distancia, tiempo o velocidad con datos coherentes y unidades claras."
        }
        "fisica/cinematica/mruv" => {
            "Resolver MRUV aplicando relaciones entre velocidad, aceleración y tiempo, con una incógnita principal."
        }
        "fisica/cinematica/caida_libre" => {
            "Resolver caída libre usando g≈9,8 m/s² e identificar la magnitud pedida según el contexto."
        }
        "fisica/cinematica/conversion_unidades" => {
            "Convertir magnitudes de cinemática entre unidades compatibles (m/s, km/h, cm/s)."
        }
        "fisica/dinamica/suma_fuerzas" => {
            "Calcular fuerza resultante en una dimensión considerando sentido y signos."
        }
        "fisica/dinamica/peso" => {
            "Calcular peso con P = m·g usando datos realistas y unidades del SI."
        }
        "fisica/energia/trabajo_mecanico" => {
            "Calcular trabajo mecánico con fuerza y desplazamiento en la dirección del movimiento."
        }
        "fisica/energia/energia_cinetica" => {
            "Calcular energía cinética a partir de masa y velocidad, interpretando el resultado."
        }
        "fisica/termodinamica/calor" => {
            "¿Cuánto calor se necesita para elevar la temperatura de una sustancia usando Q = m·c·ΔT?"
        }
        "fisica/electricidad/ley_ohm" => {
            "Aplicar ley de Ohm para calcular V, I o R en un circuito resistivo simple."
        }
        "fisica/fluidos/densidad" => {
            "Calcular densidad como masa sobre volumen e interpretar el resultado en g/cm³."
        }
        _ => return None,
    };
    Some(enunciado)
}

/// Uniform rectilinear motion: given speed and time, ask for the distance.
///
/// Draw order: speed, time, then the distractor loop, then the option
/// shuffle. Fixed since version 1.
pub struct MruGenerator;

impl ExerciseGenerator for MruGenerator {
    fn id(&self) -> &str {
        "fisica/cinematica/mru"
    }

    fn materia(&self) -> Materia {
        Materia::Fisica
    }

    fn categorias(&self) -> &[&str] {
        &["MRU"]
    }

    fn prefix(&self) -> &str {
        "MRU"
    }

    fn build(
        &self,
        params: &GeneradorParametros,
        calc: &dyn Calculator,
        rng: &mut SeededPrng,
    ) -> Result<Ejercicio> {
        let (velocidad, tiempo) = match params.nivel {
            Nivel::Basico => (rng.int(10, 60), rng.int(1, 5)),
            Nivel::Intermedio => (rng.int(20, 120), rng.int(2, 10)),
            _ => (rng.int(50, 200), rng.int(5, 20)),
        };

        let computo = calc.calcular(&CalcRequest::new(
            "mru_distancia",
            json!({ "velocidad": velocidad, "tiempo": tiempo }),
        ))?;
        let metros = computo.resultado;

        let unidad = params.opciones.unidades.unwrap_or(Unidad::M);
        let distancia = convertir_desde_metros(metros, unidad);

        let correcta = formatear_con_unidad(distancia, &unidad.to_string());
        let distractores: Vec<String> = generar_opciones_incorrectas(rng, distancia, 3, 0.4)
            .into_iter()
            .map(|d| formatear_con_unidad(d, &unidad.to_string()))
            .collect();
        let opciones = opciones_multiple(rng, correcta.clone(), distractores);

        let mut ejercicio = Ejercicio::sin_estampar(
            Materia::Fisica,
            params.categoria.clone(),
            params.nivel,
            format!(
                "Un móvil se desplaza a {velocidad} m/s durante {tiempo} s. ¿Qué distancia recorre en {unidad}?"
            ),
            Respuesta::Multiple { opciones, correcta },
        );
        ejercicio.datos.insert("velocidad".to_string(), velocidad as f64);
        ejercicio.datos.insert("tiempo".to_string(), tiempo as f64);
        ejercicio.datos.insert("distancia".to_string(), distancia);
        ejercicio.pasos = computo.pasos;
        ejercicio.tags = vec!["cinematica".to_string(), "mru".to_string()];
        Ok(ejercicio)
    }
}

/// Density from mass and volume, with a numeric answer in g/cm³.
pub struct DensidadGenerator;

impl ExerciseGenerator for DensidadGenerator {
    fn id(&self) -> &str {
        "fisica/fluidos/densidad"
    }

    fn materia(&self) -> Materia {
        Materia::Fisica
    }

    fn categorias(&self) -> &[&str] {
        &["densidad"]
    }

    fn prefix(&self) -> &str {
        "DEN"
    }

    fn build(
        &self,
        params: &GeneradorParametros,
        calc: &dyn Calculator,
        rng: &mut SeededPrng,
    ) -> Result<Ejercicio> {
        let escala = params.nivel.factor();
        let volumen = rng.int(2, (50.0 * escala) as i64);
        // Whole multiples of the volume keep the quotient exact.
        let densidad_objetivo = rng.int(1, 12);
        let masa = volumen * densidad_objetivo;

        let computo = calc.calcular(&CalcRequest::new(
            "densidad",
            json!({ "masa": masa, "volumen": volumen }),
        ))?;

        let mut ejercicio = Ejercicio::sin_estampar(
            Materia::Fisica,
            params.categoria.clone(),
            params.nivel,
            format!(
                "Una muestra tiene una masa de {masa} g y ocupa {volumen} cm³. ¿Cuál es su densidad?"
            ),
            Respuesta::Numerica {
                valor: computo.resultado,
                unidad: Some("g/cm³".to_string()),
            },
        );
        ejercicio.datos.insert("masa".to_string(), masa as f64);
        ejercicio.datos.insert("volumen".to_string(), volumen as f64);
        ejercicio.pasos = computo.pasos;
        ejercicio.tags = vec!["fluidos".to_string(), "densidad".to_string()];
        Ok(ejercicio)
    }
}
