//! Request parameters and their validator.
//!
//! Validation is a pure function, independent of randomness, and runs to
//! completion: every violated rule contributes one path-prefixed message and
//! all of them surface in a single [`GenError::Validacion`]. Field names on
//! the wire keep the original Spanish contract (`rangoMin`, `permitirNegativos`,
//! ...) so existing callers keep working.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::exercise_engine::error::{GenError, Result};

/// Subject — first component of the routing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Materia {
    Matematica,
    Fisica,
    Economia,
    Contabilidad,
}

impl fmt::Display for Materia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Materia::Matematica => "matematica",
            Materia::Fisica => "fisica",
            Materia::Economia => "economia",
            Materia::Contabilidad => "contabilidad",
        };
        write!(f, "{s}")
    }
}

/// Difficulty tier.
///
/// The two escalation tiers beyond `avanzado` are intentional content tiers:
/// they share the schema and scale numeric ranges further via [`Nivel::factor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Nivel {
    #[serde(rename = "basico")]
    Basico,
    #[serde(rename = "intermedio")]
    Intermedio,
    #[serde(rename = "avanzado")]
    Avanzado,
    #[serde(rename = "Legendario")]
    Legendario,
    #[serde(rename = "Divino")]
    Divino,
}

impl Nivel {
    /// Multiplier applied to numeric ranges when scaling by difficulty.
    pub fn factor(self) -> f64 {
        match self {
            Nivel::Basico => 0.8,
            Nivel::Intermedio => 1.0,
            Nivel::Avanzado => 1.2,
            Nivel::Legendario => 1.4,
            Nivel::Divino => 1.6,
        }
    }
}

impl fmt::Display for Nivel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Nivel::Basico => "basico",
            Nivel::Intermedio => "intermedio",
            Nivel::Avanzado => "avanzado",
            Nivel::Legendario => "Legendario",
            Nivel::Divino => "Divino",
        };
        write!(f, "{s}")
    }
}

/// Length unit recognized by the physics generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unidad {
    Cm,
    M,
    Km,
}

impl fmt::Display for Unidad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Unidad::Cm => "cm",
            Unidad::M => "m",
            Unidad::Km => "km",
        };
        write!(f, "{s}")
    }
}

/// Generation options: an explicit enumerated set of recognized fields plus a
/// typed passthrough map for forward compatibility. The passthrough entries
/// travel unchanged and the validator never interprets them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Opciones {
    #[serde(rename = "rangoMin", default, skip_serializing_if = "Option::is_none")]
    pub rango_min: Option<f64>,
    #[serde(rename = "rangoMax", default, skip_serializing_if = "Option::is_none")]
    pub rango_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unidades: Option<Unidad>,
    #[serde(rename = "permitirNegativos", default, skip_serializing_if = "Option::is_none")]
    pub permitir_negativos: Option<bool>,
    #[serde(rename = "cantidadTerminos", default, skip_serializing_if = "Option::is_none")]
    pub cantidad_terminos: Option<f64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Validated request shape: the three-part routing key plus options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneradorParametros {
    pub materia: Materia,
    pub categoria: String,
    pub nivel: Nivel,
    #[serde(default)]
    pub opciones: Opciones,
}

impl GeneradorParametros {
    pub fn new(materia: Materia, categoria: impl Into<String>, nivel: Nivel) -> Self {
        GeneradorParametros {
            materia,
            categoria: categoria.into(),
            nivel,
            opciones: Opciones::default(),
        }
    }

    /// Deserialize from raw JSON with the strict schema: unknown top-level
    /// fields and out-of-set `materia`/`nivel` values are rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        let params: GeneradorParametros = serde_json::from_value(value)
            .map_err(|e| GenError::Validacion(vec![format!("params: {e}")]))?;
        validar(&params)?;
        Ok(params)
    }
}

fn exigir_finito(issues: &mut Vec<String>, path: &str, value: Option<f64>) {
    if let Some(v) = value {
        if !v.is_finite() {
            issues.push(format!("{path}: debe ser un número finito."));
        }
    }
}

/// Validate a parameter set. Structural (per-field) rules run first, then the
/// cross-field refinements; all violations aggregate into one error.
pub fn validar(params: &GeneradorParametros) -> Result<()> {
    let mut issues = Vec::new();
    let o = &params.opciones;

    if params.categoria.trim().is_empty() {
        issues.push("categoria: la categoría es obligatoria.".to_string());
    }

    exigir_finito(&mut issues, "rangoMin", o.rango_min);
    exigir_finito(&mut issues, "rangoMax", o.rango_max);
    exigir_finito(&mut issues, "cantidadTerminos", o.cantidad_terminos);

    if let Some(n) = o.cantidad_terminos {
        if n.is_finite() {
            if n.fract() != 0.0 {
                issues.push("cantidadTerminos: debe ser un entero.".to_string());
            } else if n <= 0.0 {
                issues.push("cantidadTerminos: debe ser mayor a 0.".to_string());
            }
        }
    }

    // Cross-field refinements, only over values that passed the per-field checks.
    if let (Some(min), Some(max)) = (o.rango_min, o.rango_max) {
        if min.is_finite() && max.is_finite() && min > max {
            issues.push("rangoMin: debe ser menor o igual a rangoMax.".to_string());
        }
    }

    if o.permitir_negativos == Some(false) {
        if matches!(o.rango_min, Some(v) if v.is_finite() && v < 0.0) {
            issues.push(
                "rangoMin: no puede ser negativo cuando permitirNegativos es false.".to_string(),
            );
        }
        if matches!(o.rango_max, Some(v) if v.is_finite() && v < 0.0) {
            issues.push(
                "rangoMax: no puede ser negativo cuando permitirNegativos es false.".to_string(),
            );
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(GenError::Validacion(issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> GeneradorParametros {
        GeneradorParametros::new(Materia::Fisica, "MRU", Nivel::Basico)
    }

    #[test]
    fn valid_params_pass() {
        let mut p = base();
        p.opciones.rango_min = Some(1.0);
        p.opciones.rango_max = Some(50.0);
        p.opciones.cantidad_terminos = Some(3.0);
        assert!(validar(&p).is_ok());
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let mut p = base();
        p.opciones.rango_min = Some(f64::NAN);
        p.opciones.rango_max = Some(f64::INFINITY);
        let err = validar(&p).unwrap_err().to_string();
        assert!(err.contains("rangoMin: debe ser un número finito."));
        assert!(err.contains("rangoMax: debe ser un número finito."));
    }

    #[test]
    fn violations_aggregate_into_one_error() {
        let mut p = base();
        p.categoria = "  ".to_string();
        p.opciones.cantidad_terminos = Some(2.5);
        p.opciones.rango_min = Some(10.0);
        p.opciones.rango_max = Some(2.0);
        let err = validar(&p).unwrap_err();
        match err {
            GenError::Validacion(issues) => assert_eq!(issues.len(), 3),
            other => panic!("expected Validacion, got {other:?}"),
        }
    }

    #[test]
    fn negative_bounds_need_permitir_negativos() {
        let mut p = base();
        p.opciones.rango_min = Some(-1.0);
        p.opciones.permitir_negativos = Some(false);
        let err = validar(&p).unwrap_err().to_string();
        assert!(err.contains("negativo"));

        p.opciones.permitir_negativos = Some(true);
        assert!(validar(&p).is_ok());
    }

    #[test]
    fn unknown_top_level_fields_are_rejected() {
        let raw = serde_json::json!({
            "materia": "fisica",
            "categoria": "MRU",
            "nivel": "basico",
            "sorpresa": 1
        });
        let err = GeneradorParametros::from_value(raw).unwrap_err().to_string();
        assert!(err.contains("Parámetros inválidos"));
    }

    #[test]
    fn extra_option_keys_pass_through_untouched() {
        let raw = serde_json::json!({
            "materia": "fisica",
            "categoria": "MRU",
            "nivel": "basico",
            "opciones": { "rangoMin": 1.0, "modoVisual": "grafico" }
        });
        let params = GeneradorParametros::from_value(raw).unwrap();
        assert_eq!(
            params.opciones.extra.get("modoVisual"),
            Some(&Value::String("grafico".to_string()))
        );
    }

    #[test]
    fn escalation_tiers_deserialize() {
        let nivel: Nivel = serde_json::from_str("\"Legendario\"").unwrap();
        assert_eq!(nivel, Nivel::Legendario);
        assert!(nivel.factor() > Nivel::Avanzado.factor());
    }
}
