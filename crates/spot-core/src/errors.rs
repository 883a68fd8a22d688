//! Errores del generador.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum GenerationError {
    /// El muestreador agotó los cationes antes de llegar a `requested`.
    #[error("could not generate enough non-reactive solutions ({produced}/{requested})")]
    Exhausted { requested: usize, produced: usize },
    /// Ningún intento de la búsqueda produjo una matriz completa.
    #[error("generation failed after {attempts} attempts: {reason}")]
    Failed { attempts: usize, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = GenerationError::Exhausted { requested: 7, produced: 4 };
        assert_eq!(e.to_string(), "could not generate enough non-reactive solutions (4/7)");
        let f = GenerationError::Failed { attempts: 120, reason: e.to_string() };
        assert!(f.to_string().starts_with("generation failed after 120 attempts"));
    }
}
