//! CoverageSearch: búsqueda con umbrales que se relajan.
//!
//! Cada intento sortea disoluciones nuevas, construye la matriz y mide su
//! diversidad visual. El primer candidato que alcanza los umbrales vigentes
//! se acepta; si se agota el presupuesto se devuelve el mejor visto (más
//! celdas coloreadas) marcado como best-effort. Sólo es un error que ningún
//! intento haya producido una matriz completa.
//!
//! Relajación (una vez cada una): en el intento `relax_target_at` el
//! objetivo baja a `max(5, floor(objetivo * 0.8))`; en `relax_distinct_at`
//! el mínimo de colores distintos baja en uno, con piso 3. Nunca suben.
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use spot_domain::{ReactionTable, Solution};
use uuid::Uuid;

use crate::constants::*;
use crate::{GenerationError, Grid, GridBuilder, SamplerOptions, SolutionSampler};

/// Parámetros ajustables de la búsqueda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub max_attempts: usize,
    pub initial_min_distinct: usize,
    pub relax_target_at: usize,
    pub relax_distinct_at: usize,
    pub bucket_size: u8,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { max_attempts: DEFAULT_MAX_ATTEMPTS,
               initial_min_distinct: DEFAULT_MIN_DISTINCT_COLORS,
               relax_target_at: RELAX_TARGET_AT,
               relax_distinct_at: RELAX_DISTINCT_AT,
               bucket_size: COLOR_BUCKET_SIZE }
    }
}

/// Métricas de diversidad de una matriz.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridStats {
    pub colored_count: usize,
    pub distinct_color_buckets: usize,
}

impl GridStats {
    /// Recorre todas las celdas pobladas (diagonal incluida).
    pub fn measure(grid: &Grid, bucket_size: u8) -> Self {
        let mut buckets = HashSet::new();
        let mut colored_count = 0;
        for (_, _, cell) in grid.populated() {
            if !cell.is_colored() {
                continue;
            }
            colored_count += 1;
            if let Some(rgb) = cell.color_rgb {
                buckets.insert(rgb.bucket(bucket_size));
            }
        }
        GridStats { colored_count,
                    distinct_color_buckets: buckets.len() }
    }
}

/// Umbrales de aceptación vigentes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    pub target_colored: usize,
    pub min_distinct_colors: usize,
}

impl Thresholds {
    pub fn initial(n: usize, target_colored: Option<usize>, params: &SearchParams) -> Self {
        let upper_cells = n * n.saturating_sub(1) / 2;
        let default_target = INITIAL_TARGET_FLOOR.max(upper_cells.div_ceil(4));
        Thresholds { target_colored: target_colored.unwrap_or(default_target),
                     min_distinct_colors: params.initial_min_distinct }
    }

    pub fn is_met(&self, stats: &GridStats) -> bool {
        stats.colored_count >= self.target_colored && stats.distinct_color_buckets >= self.min_distinct_colors
    }

    pub fn relax_target(&mut self) {
        let relaxed = RELAXED_TARGET_FLOOR.max(self.target_colored * 4 / 5);
        self.target_colored = self.target_colored.min(relaxed);
    }

    pub fn relax_distinct(&mut self) {
        let relaxed = RELAXED_DISTINCT_FLOOR.max(self.min_distinct_colors.saturating_sub(1));
        self.min_distinct_colors = self.min_distinct_colors.min(relaxed);
    }
}

/// Cómo terminó la búsqueda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum SearchOutcome {
    /// Aceptado en el intento `attempt` (1-based) con los umbrales vigentes.
    Accepted { attempt: usize, thresholds: Thresholds },
    /// Presupuesto agotado; se devuelve el mejor candidato.
    BestEffort { thresholds: Thresholds },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub solutions: Vec<Solution>,
    pub grid: Grid,
    pub stats: GridStats,
    pub attempts: usize,
    pub outcome: SearchOutcome,
}

impl SearchResult {
    pub fn is_best_effort(&self) -> bool {
        matches!(self.outcome, SearchOutcome::BestEffort { .. })
    }

    /// Aviso para el usuario cuando el resultado no alcanzó el objetivo.
    pub fn note(&self) -> Option<&'static str> {
        self.is_best_effort().then_some(BEST_EFFORT_NOTE)
    }
}

struct Candidate {
    solutions: Vec<Solution>,
    grid: Grid,
    stats: GridStats,
}

#[derive(Debug, Clone, Copy)]
pub struct CoverageSearch<'t> {
    sampler: SolutionSampler<'t>,
    builder: GridBuilder<'t>,
    params: SearchParams,
}

impl<'t> CoverageSearch<'t> {
    pub fn new(table: &'t ReactionTable) -> Self {
        Self { sampler: SolutionSampler::new(table),
               builder: GridBuilder::new(table),
               params: SearchParams::default() }
    }

    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_sampler_options(mut self, options: SamplerOptions) -> Self {
        self.sampler = self.sampler.with_options(options);
        self
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Búsqueda con el RNG del hilo; cada llamada es una instancia nueva.
    pub fn search(&self, n: usize, target_colored: Option<usize>) -> Result<SearchResult, GenerationError> {
        self.search_with_rng(n, target_colored, &mut rand::thread_rng())
    }

    pub fn search_with_rng<R>(&self, n: usize, target_colored: Option<usize>, rng: &mut R) -> Result<SearchResult, GenerationError>
        where R: Rng + ?Sized
    {
        let mut thresholds = Thresholds::initial(n, target_colored, &self.params);
        let mut best: Option<Candidate> = None;
        let mut last_error: Option<GenerationError> = None;

        for attempt in 0..self.params.max_attempts {
            if attempt == self.params.relax_target_at {
                thresholds.relax_target();
                debug!("[search] intento {attempt}: objetivo relajado a {}", thresholds.target_colored);
            }
            if attempt == self.params.relax_distinct_at {
                thresholds.relax_distinct();
                debug!("[search] intento {attempt}: colores distintos relajados a {}", thresholds.min_distinct_colors);
            }

            let solutions = match self.sampler.sample(n, rng) {
                Ok(s) => s,
                Err(e) => {
                    debug!("[search] intento {attempt}: {e}");
                    last_error = Some(e);
                    continue;
                }
            };
            let grid = self.builder.build(&solutions);
            let stats = GridStats::measure(&grid, self.params.bucket_size);
            debug!("[search] intento {attempt}: colored={} distinct={}", stats.colored_count, stats.distinct_color_buckets);

            if thresholds.is_met(&stats) {
                info!("[search] aceptado en el intento {} (colored={}, distinct={})",
                      attempt + 1,
                      stats.colored_count,
                      stats.distinct_color_buckets);
                return Ok(Self::finish(Candidate { solutions, grid, stats },
                                       attempt + 1,
                                       SearchOutcome::Accepted { attempt: attempt + 1,
                                                                 thresholds }));
            }
            let improves = best.as_ref().map_or(true, |b| stats.colored_count > b.stats.colored_count);
            if improves {
                best = Some(Candidate { solutions, grid, stats });
            }
        }

        match best {
            Some(candidate) => {
                warn!("[search] presupuesto agotado ({} intentos); best-effort con colored={}",
                      self.params.max_attempts,
                      candidate.stats.colored_count);
                Ok(Self::finish(candidate, self.params.max_attempts, SearchOutcome::BestEffort { thresholds }))
            }
            None => {
                let reason = last_error.map(|e| e.to_string()).unwrap_or_else(|| "no attempts were made".to_string());
                Err(GenerationError::Failed { attempts: self.params.max_attempts,
                                              reason })
            }
        }
    }

    fn finish(candidate: Candidate, attempts: usize, outcome: SearchOutcome) -> SearchResult {
        SearchResult { id: Uuid::new_v4(),
                       generated_at: Utc::now(),
                       solutions: candidate.solutions,
                       grid: candidate.grid,
                       stats: candidate.stats,
                       attempts,
                       outcome }
    }
}
