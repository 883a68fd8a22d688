//! Matriz simple catión × catión: etiquetas y texto por celda.
//!
//! Variante ligera de la matriz de disoluciones: elige cationes distintos
//! al azar y describe cada cruce mirando ambas direcciones de la tabla
//! (`tabla[a][b]` y luego `tabla[b][a]`). La diagonal es `—`.
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use spot_domain::{OutcomeKind, OutcomeRecord, ReactionTable};

use super::request::lenient_int;
use super::{MAX_N, MIN_N};

pub const DEFAULT_COUNT: usize = 6;
pub const DIAGONAL: &str = "—";
pub const NO_REACTION: &str = "no reaction";

/// Petición `{ count? }`; sin valor legible se usan 6 cationes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMatrixRequest {
    pub count: usize,
}

impl Default for LabelMatrixRequest {
    fn default() -> Self {
        LabelMatrixRequest { count: DEFAULT_COUNT }
    }
}

impl LabelMatrixRequest {
    pub fn from_json(body: &Value) -> Self {
        let count = body.get("count")
                        .and_then(lenient_int)
                        .map(|v| v.max(0) as usize)
                        .unwrap_or(DEFAULT_COUNT);
        LabelMatrixRequest { count }
    }

    pub fn from_body(body: &str) -> Self {
        serde_json::from_str::<Value>(body).map(|v| Self::from_json(&v))
                                           .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMatrix {
    pub labels: Vec<String>,
    pub table: Vec<Vec<String>>,
}

fn kind_label(kind: OutcomeKind) -> &'static str {
    match kind {
        OutcomeKind::Precipitate => "ppt",
        OutcomeKind::Observation => "observation",
        OutcomeKind::NoReaction => "no-reaction",
        OutcomeKind::Unknown => "unknown",
    }
}

fn describe(record: &OutcomeRecord) -> String {
    match &record.color {
        Some(color) => format!("{} {DIAGONAL} {color}", kind_label(record.kind)),
        None => kind_label(record.kind).to_string(),
    }
}

/// Texto del cruce entre dos cationes; el primer registro encontrado gana.
pub fn describe_pair(table: &ReactionTable, a: &str, b: &str) -> String {
    table.lookup(a, b)
         .or_else(|| table.lookup(b, a))
         .map(describe)
         .unwrap_or_else(|| NO_REACTION.to_string())
}

/// Acota `count` a [5, min(9, cationes)] y rellena la matriz completa
/// (no sólo el triángulo superior).
pub fn build_label_matrix<R: Rng + ?Sized>(table: &ReactionTable, count: usize, rng: &mut R) -> LabelMatrix {
    let keys: Vec<&str> = table.cations().collect();
    let n = count.max(MIN_N).min(MAX_N.min(keys.len()));
    let labels: Vec<String> = keys.choose_multiple(rng, n).map(|k| k.to_string()).collect();
    let rows = labels.iter()
                     .enumerate()
                     .map(|(i, a)| {
                         labels.iter()
                               .enumerate()
                               .map(|(j, b)| if i == j { DIAGONAL.to_string() } else { describe_pair(table, a, b) })
                               .collect()
                     })
                     .collect();
    LabelMatrix { labels, table: rows }
}
