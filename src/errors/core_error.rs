use thiserror::Error;

/// Errores de infraestructura del servicio (E/S, configuración, tareas).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error interno: {0}")]
    Internal(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Tabla de reacciones inválida: {0}")]
    Table(#[from] spot_domain::DomainError),
}
