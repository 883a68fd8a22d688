//! spot-core: generador de matrices de reacción (pipetas desconocidas).
//!
//! Flujo de datos en un solo sentido:
//! `ReactionTable` → `SolutionSampler` / `OutcomeResolver` → `GridBuilder`
//! → `CoverageSearch` → llamador. Cada llamada es independiente y no
//! comparte estado mutable.
pub mod constants;
pub mod draw;
pub mod errors;
pub mod grid;
pub mod resolver;
pub mod sampler;
pub mod search;

pub use errors::GenerationError;
pub use grid::{CellKind, Grid, GridBuilder, GridCell};
pub use resolver::OutcomeResolver;
pub use sampler::{SamplerOptions, SolutionSampler};
pub use search::{CoverageSearch, GridStats, SearchOutcome, SearchParams, SearchResult, Thresholds};
