use spot_core::GenerationError;
use spot_quiz::QuizError;
use thiserror::Error;

/// Errores de las operaciones del servicio (peticiones, generación, quiz).
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validación fallida: {0}")]
    Validation(String),
    #[error("Generación fallida: {0}")]
    Generation(#[from] GenerationError),
    #[error("Quiz fallido: {0}")]
    Quiz(#[from] QuizError),
}
