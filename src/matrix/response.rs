use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spot_core::{Grid, GridStats, SearchOutcome, SearchResult};
use spot_domain::Solution;
use uuid::Uuid;

/// Respuesta de una generación correcta. `note` sólo aparece en resultados
/// best-effort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub solutions: Vec<Solution>,
    pub grid: Grid,
    pub stats: GridStats,
    pub attempts: usize,
    pub outcome: SearchOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<SearchResult> for GenerateResponse {
    fn from(result: SearchResult) -> Self {
        let note = result.note().map(str::to_string);
        GenerateResponse { id: result.id,
                           generated_at: result.generated_at,
                           solutions: result.solutions,
                           grid: result.grid,
                           stats: result.stats,
                           attempts: result.attempts,
                           outcome: result.outcome,
                           note }
    }
}

/// Cuerpo de error: `{ "error": mensaje }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl ErrorPayload {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorPayload { error: message.into() }
    }
}
