//! Petición de generación: `{ n?, targetColored? }` con parseo tolerante.
//!
//! `n` admite enteros, flotantes (se truncan) y cadenas con prefijo numérico
//! (`"8px"` → 8). Cualquier otra cosa, o un cero, toma el valor por defecto.
//! El resultado se acota a [5, 9].
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::DEFAULT_N;

pub const MIN_N: usize = 5;
pub const MAX_N: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub n: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_colored: Option<usize>,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        GenerateRequest::new(DEFAULT_N, None)
    }
}

impl GenerateRequest {
    pub fn new(n: usize, target_colored: Option<usize>) -> Self {
        GenerateRequest { n: n.clamp(MIN_N, MAX_N),
                          target_colored: target_colored.filter(|t| *t >= 1) }
    }

    pub fn from_json(body: &Value) -> Self {
        Self::from_json_with_default(body, DEFAULT_N)
    }

    pub fn from_json_with_default(body: &Value, default_n: usize) -> Self {
        let n = body.get("n")
                    .and_then(lenient_int)
                    .filter(|v| *v != 0)
                    .map(|v| v.clamp(MIN_N as i64, MAX_N as i64) as usize)
                    .unwrap_or(default_n);
        let target = body.get("targetColored")
                         .and_then(lenient_int)
                         .filter(|v| *v >= 1)
                         .and_then(|v| usize::try_from(v).ok());
        GenerateRequest::new(n, target)
    }

    /// Texto crudo del cuerpo; un JSON ilegible equivale a `{}`.
    pub fn from_body(body: &str, default_n: usize) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_json_with_default(&value, default_n),
            Err(e) => {
                log::debug!("[request] cuerpo ilegible ({e}), se usan valores por defecto");
                GenerateRequest::new(default_n, None)
            }
        }
    }
}

pub(crate) fn lenient_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(num) => num.as_i64()
                                 .or_else(|| num.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => int_prefix(s),
        _ => None,
    }
}

fn int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|v| sign * v)
}
