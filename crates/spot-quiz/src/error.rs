use thiserror::Error;

/// Errores del generador de preguntas y del tutor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("Modo de quiz desconocido: {0}")]
    UnknownMode(String),

    #[error("Petición inválida: {0}")]
    InvalidRequest(String),

    #[error("No hay candidatos para el modo {0}")]
    NoCandidates(String),

    #[error("Fallo del servicio de completado: {0}")]
    Completion(String),
}

impl QuizError {
    /// Código HTTP equivalente: los fallos del cliente son 400.
    pub fn status(&self) -> u16 {
        match self {
            QuizError::UnknownMode(_) | QuizError::InvalidRequest(_) => 400,
            QuizError::NoCandidates(_) | QuizError::Completion(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_mode_is_client_error() {
        let err = QuizError::UnknownMode("bingo".into());
        assert_eq!(err.to_string(), "Modo de quiz desconocido: bingo");
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn server_side_variants() {
        assert_eq!(QuizError::NoCandidates("pair-to-color".into()).status(), 500);
        assert_eq!(QuizError::Completion("timeout".into()).to_string(),
                   "Fallo del servicio de completado: timeout");
    }
}
