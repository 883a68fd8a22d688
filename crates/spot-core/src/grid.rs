//! GridBuilder: matriz N×N triangular superior de resultados.
//!
//! Celda (i, j):
//! - j < i → siempre ausente (la mezcla es simétrica, basta un triángulo).
//! - i == j → color intrínseco de la disolución i, o ausente.
//! - j > i → `OutcomeResolver::resolve(sol[i], sol[j])` reducido a tipo + color.
use serde::{Deserialize, Serialize};
use spot_domain::{OutcomeKind, OutcomeRecord, ReactionTable, Rgb, Solution};

use crate::OutcomeResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    #[serde(rename = "ppt")]
    Precipitate,
    #[serde(rename = "observation")]
    Observation,
    #[serde(rename = "no-reaction")]
    NoReaction,
    #[serde(rename = "unknown")]
    Unknown,
    /// Diagonal: color propio de la disolución, no una reacción.
    #[serde(rename = "intrinsic")]
    Intrinsic,
}

impl From<OutcomeKind> for CellKind {
    fn from(kind: OutcomeKind) -> Self {
        match kind {
            OutcomeKind::Precipitate => CellKind::Precipitate,
            OutcomeKind::Observation => CellKind::Observation,
            OutcomeKind::NoReaction => CellKind::NoReaction,
            OutcomeKind::Unknown => CellKind::Unknown,
        }
    }
}

/// Resumen de una celda poblada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub kind: CellKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_rgb: Option<Rgb>,
}

impl GridCell {
    fn from_record(table: &ReactionTable, record: &OutcomeRecord) -> Self {
        let color = record.color.clone().filter(|c| !record.is_no_reaction() && table.is_valid_color_name(c));
        GridCell { kind: record.kind.into(),
                   color,
                   color_rgb: table.outcome_rgb(record) }
    }

    /// Coloreada = muestra un color distinto de blanco y no es `no-reaction`.
    pub fn is_colored(&self) -> bool {
        self.kind != CellKind::NoReaction && self.color_rgb.is_some_and(|c| !c.is_white())
    }
}

/// Matriz de celdas opcionales; se serializa como lista de filas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Option<GridCell>>>,
}

impl Grid {
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Option<GridCell>>] {
        &self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&GridCell> {
        self.rows.get(row)?.get(col)?.as_ref()
    }

    /// Celdas pobladas como `(fila, columna, celda)`.
    pub fn populated(&self) -> impl Iterator<Item = (usize, usize, &GridCell)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.iter().enumerate().filter_map(move |(j, c)| c.as_ref().map(|c| (i, j, c))))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GridBuilder<'t> {
    table: &'t ReactionTable,
    resolver: OutcomeResolver<'t>,
}

impl<'t> GridBuilder<'t> {
    pub fn new(table: &'t ReactionTable) -> Self {
        Self { table,
               resolver: OutcomeResolver::new(table) }
    }

    /// Función pura de la lista de disoluciones.
    pub fn build(&self, solutions: &[Solution]) -> Grid {
        let n = solutions.len();
        let mut rows = Vec::with_capacity(n);
        for (i, a) in solutions.iter().enumerate() {
            let mut row = vec![None; n];
            row[i] = a.intrinsic_color().map(|sw| GridCell { kind: CellKind::Intrinsic,
                                                             color: Some(sw.name.clone()),
                                                             color_rgb: Some(sw.rgb) });
            for (j, b) in solutions.iter().enumerate().skip(i + 1) {
                row[j] = self.resolver.resolve(a, b).map(|rec| GridCell::from_record(self.table, rec));
            }
            rows.push(row);
        }
        Grid { rows }
    }
}
