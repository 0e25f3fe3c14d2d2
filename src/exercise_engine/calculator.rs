//! Calculation collaborator injected into subject generators.
//!
//! The calculator is outside the determinism core but feeds numbers into it,
//! so implementors must be pure functions of the request: same `tipo` and
//! `payload` always produce the same `resultado` and `pasos`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::exercise_engine::error::{GenError, Result};
use crate::exercise_engine::helpers::redondear;

/// One computation request: a type tag plus a free-form payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcRequest {
    pub tipo: String,
    pub payload: Value,
}

impl CalcRequest {
    pub fn new(tipo: impl Into<String>, payload: Value) -> Self {
        CalcRequest {
            tipo: tipo.into(),
            payload,
        }
    }
}

/// Result plus a human-readable step-by-step explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcResult {
    pub resultado: f64,
    pub pasos: Vec<String>,
}

pub trait Calculator {
    fn calcular(&self, request: &CalcRequest) -> Result<CalcResult>;
}

fn campo(payload: &Value, nombre: &str) -> Result<f64> {
    payload
        .get(nombre)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            GenError::invalido(&format!("payload.{nombre}"), "debe ser un número finito.")
        })
}

fn terminos(payload: &Value) -> Result<Vec<f64>> {
    let lista = payload
        .get("terminos")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            GenError::invalido("payload.terminos", "debe ser una lista de números.")
        })?;
    let mut out = Vec::with_capacity(lista.len());
    for (i, v) in lista.iter().enumerate() {
        let n = v.as_f64().filter(|v| v.is_finite()).ok_or_else(|| {
            GenError::invalido(&format!("payload.terminos[{i}]"), "debe ser un número finito.")
        })?;
        out.push(n);
    }
    if out.is_empty() {
        return Err(GenError::invalido("payload.terminos", "debe tener al menos un término."));
    }
    Ok(out)
}

fn formato(n: f64) -> String {
    redondear(n, 2).to_string()
}

/// Built-in school calculator covering the request types the bundled subject
/// generators emit. Stateless and deterministic.
pub struct CalculadoraEscolar;

impl Calculator for CalculadoraEscolar {
    fn calcular(&self, request: &CalcRequest) -> Result<CalcResult> {
        match request.tipo.as_str() {
            "suma" => {
                let ts = terminos(&request.payload)?;
                let total: f64 = ts.iter().sum();
                let expresion = ts
                    .iter()
                    .map(|t| formato(*t))
                    .collect::<Vec<_>>()
                    .join(" + ");
                Ok(CalcResult {
                    resultado: total,
                    pasos: vec![
                        format!("Sumamos los términos: {expresion}."),
                        format!("Resultado: {}.", formato(total)),
                    ],
                })
            }
            "porcentaje" => {
                let base = campo(&request.payload, "base")?;
                let porcentaje = campo(&request.payload, "porcentaje")?;
                let valor = redondear(base * porcentaje / 100.0, 2);
                Ok(CalcResult {
                    resultado: valor,
                    pasos: vec![
                        format!("Planteamos {porcentaje}% de {base} como {base} · {porcentaje} / 100."),
                        format!("Resultado: {}.", formato(valor)),
                    ],
                })
            }
            "mru_distancia" => {
                let velocidad = campo(&request.payload, "velocidad")?;
                let tiempo = campo(&request.payload, "tiempo")?;
                let distancia = velocidad * tiempo;
                Ok(CalcResult {
                    resultado: distancia,
                    pasos: vec![
                        "Aplicamos d = v · t.".to_string(),
                        format!(
                            "d = {} m/s · {} s = {} m.",
                            formato(velocidad),
                            formato(tiempo),
                            formato(distancia)
                        ),
                    ],
                })
            }
            "densidad" => {
                let masa = campo(&request.payload, "masa")?;
                let volumen = campo(&request.payload, "volumen")?;
                if volumen == 0.0 {
                    return Err(GenError::invalido("payload.volumen", "debe ser distinto de 0."));
                }
                let densidad = redondear(masa / volumen, 2);
                Ok(CalcResult {
                    resultado: densidad,
                    pasos: vec![
                        "Aplicamos ρ = m / V.".to_string(),
                        format!(
                            "ρ = {} g / {} cm³ = {} g/cm³.",
                            formato(masa),
                            formato(volumen),
                            formato(densidad)
                        ),
                    ],
                })
            }
            otro => Err(GenError::TipoNoSoportado(format!("cálculo `{otro}`"))),
        }
    }
}
