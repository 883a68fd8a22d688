//! Constantes del generador.
//!
//! Valores por defecto de la búsqueda de cobertura. Todos pueden
//! sobreescribirse vía `SearchParams`.

/// Presupuesto de intentos de la búsqueda.
pub const DEFAULT_MAX_ATTEMPTS: usize = 120;
/// Colores distintos (cubos) exigidos al inicio.
pub const DEFAULT_MIN_DISTINCT_COLORS: usize = 4;
/// Intento a partir del cual se relaja el objetivo de celdas coloreadas.
pub const RELAX_TARGET_AT: usize = 60;
/// Intento a partir del cual se relaja el mínimo de colores distintos.
pub const RELAX_DISTINCT_AT: usize = 90;
/// Ancho de cubo por canal para contar colores distintos.
pub const COLOR_BUCKET_SIZE: u8 = 24;

/// Piso del objetivo inicial de celdas coloreadas.
pub const INITIAL_TARGET_FLOOR: usize = 6;
/// Piso del objetivo tras la relajación.
pub const RELAXED_TARGET_FLOOR: usize = 5;
/// Piso del mínimo de colores distintos tras la relajación.
pub const RELAXED_DISTINCT_FLOOR: usize = 3;

/// Nota adjunta a un resultado que no alcanzó el objetivo.
pub const BEST_EFFORT_NOTE: &str = "Best-effort grid: diversity target not reached within the attempt budget.";
