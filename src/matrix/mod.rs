//! Capa de servicio del generador de matrices de reacciones.
pub mod labels;
pub mod request;
pub mod response;
pub mod service;

pub use labels::{LabelMatrix, LabelMatrixRequest};
pub use request::{GenerateRequest, MAX_N, MIN_N};
pub use response::{ErrorPayload, GenerateResponse};
pub use service::{MatrixService, ServiceError, ServiceReply};
