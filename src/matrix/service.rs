//! MatrixService: punto de entrada para generar matrices y preguntas.
//!
//! Cada petición es independiente: la tabla se comparte en modo lectura
//! (`Arc`) y todo el estado de la búsqueda vive dentro de la llamada. Las
//! variantes asíncronas sólo mueven el trabajo síncrono a un hilo bloqueante.
use log::{error, info};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use spot_core::CoverageSearch;
use spot_domain::ReactionTable;
use spot_quiz::{QuizGenerator, QuizQuestion, QuizRequest, TutorContext};
use std::sync::Arc;
use thiserror::Error;

use super::labels::build_label_matrix;
use super::{ErrorPayload, GenerateRequest, GenerateResponse, LabelMatrix, LabelMatrixRequest};
use crate::config::GenerationConfig;
use crate::errors::{CoreError, DomainError};
use crate::source::TableSource;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ServiceError {
    /// Sólo los errores de cliente del quiz son 4xx; el resto es 500.
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::Domain(DomainError::Quiz(q)) => q.status(),
            _ => 500,
        }
    }
}

/// Respuesta lista para un transporte HTTP: código y cuerpo JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceReply {
    pub status: u16,
    pub body: Value,
}

impl ServiceReply {
    pub fn ok<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(body) => ServiceReply { status: 200, body },
            Err(e) => Self::error(&ServiceError::Core(CoreError::Internal(e.to_string()))),
        }
    }

    pub fn error(err: &ServiceError) -> Self {
        let body = serde_json::to_value(ErrorPayload::new(err.to_string())).unwrap_or(Value::Null);
        ServiceReply { status: err.status(),
                       body }
    }

    pub fn from_result<T: Serialize>(result: Result<T, ServiceError>) -> Self {
        match result {
            Ok(payload) => Self::ok(&payload),
            Err(e) => {
                error!("[service] {e}");
                Self::error(&e)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatrixService {
    table: Arc<ReactionTable>,
    config: GenerationConfig,
}

impl MatrixService {
    pub fn new(table: Arc<ReactionTable>, config: GenerationConfig) -> Self {
        Self { table, config }
    }

    pub async fn from_source(source: &dyn TableSource, config: GenerationConfig) -> Result<Self, CoreError> {
        let table = source.load().await?;
        info!("[service] tabla '{}' lista ({} cationes)", source.get_name(), table.len());
        Ok(Self::new(Arc::new(table), config))
    }

    pub fn table(&self) -> &ReactionTable {
        &self.table
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    fn search(&self) -> CoverageSearch<'_> {
        CoverageSearch::new(&self.table).with_params(self.config.search)
                                        .with_sampler_options(self.config.sampler)
    }

    pub fn parse_request(&self, body: &str) -> GenerateRequest {
        GenerateRequest::from_body(body, self.config.default_n)
    }

    pub fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ServiceError> {
        let result = self.search()
                         .search(request.n, request.target_colored)
                         .map_err(DomainError::from)?;
        Ok(result.into())
    }

    /// Cuerpo JSON crudo → respuesta. Éxito 200, cualquier fallo 500.
    pub fn handle_json(&self, body: &str) -> ServiceReply {
        let request = self.parse_request(body);
        ServiceReply::from_result(self.generate(&request))
    }

    pub async fn handle_async(&self, body: String) -> ServiceReply {
        let service = self.clone();
        match tokio::task::spawn_blocking(move || service.handle_json(&body)).await {
            Ok(reply) => reply,
            Err(e) => ServiceReply::error(&ServiceError::Core(CoreError::Internal(e.to_string()))),
        }
    }

    /// Genera varias matrices independientes en paralelo; el orden de los
    /// resultados es el de las peticiones.
    pub fn generate_batch(&self, requests: &[GenerateRequest]) -> Vec<Result<GenerateResponse, ServiceError>> {
        requests.par_iter().map(|r| self.generate(r)).collect()
    }

    /// Matriz catión × catión con etiquetas y texto por celda.
    pub fn label_matrix(&self, request: &LabelMatrixRequest) -> LabelMatrix {
        build_label_matrix(&self.table, request.count, &mut rand::thread_rng())
    }

    pub fn handle_label_json(&self, body: &str) -> ServiceReply {
        ServiceReply::ok(&self.label_matrix(&LabelMatrixRequest::from_body(body)))
    }

    pub fn quiz(&self, request: &QuizRequest) -> Result<QuizQuestion, ServiceError> {
        let question = QuizGenerator::new(&self.table).generate(request, &mut rand::thread_rng())
                                                      .map_err(DomainError::from)?;
        Ok(question)
    }

    /// Cuerpo JSON del quiz. Un JSON ilegible es un error de servidor; un
    /// modo desconocido, de cliente.
    pub fn handle_quiz_json(&self, body: &str) -> ServiceReply {
        let result = serde_json::from_str::<Value>(body).map_err(|e| ServiceError::from(DomainError::Validation(e.to_string())))
                                                        .and_then(|v| QuizRequest::from_json(&v).map_err(|e| DomainError::from(e).into()))
                                                        .and_then(|req| self.quiz(&req));
        ServiceReply::from_result(result)
    }

    pub fn tutor_context(&self, user_text: &str) -> TutorContext {
        TutorContext::build(&self.table, user_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::BUNDLED_TABLE;

    fn service() -> MatrixService {
        let table = ReactionTable::from_json_str(BUNDLED_TABLE).unwrap();
        MatrixService::new(Arc::new(table), GenerationConfig::default())
    }

    #[test]
    fn generate_returns_requested_size() {
        let svc = service();
        let resp = svc.generate(&GenerateRequest::new(6, None)).unwrap();
        assert_eq!(resp.solutions.len(), 6);
        assert_eq!(resp.grid.size(), 6);
    }

    #[test]
    fn handle_json_ok() {
        let reply = service().handle_json(r#"{"n": "5"}"#);
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body["solutions"].as_array().unwrap().len(), 5);
        assert!(reply.body.get("stats").is_some());
    }

    #[test]
    fn failure_maps_to_500_with_message() {
        let table = ReactionTable::from_json_str(r#"{"inorganic": {"A+": {}}}"#).unwrap();
        let mut config = GenerationConfig::default();
        config.search.max_attempts = 3;
        let svc = MatrixService::new(Arc::new(table), config);
        let reply = svc.handle_json("{}");
        assert_eq!(reply.status, 500);
        let msg = reply.body["error"].as_str().unwrap();
        assert!(msg.contains("generation failed after 3 attempts"), "{msg}");
    }

    #[test]
    fn label_matrix_reply() {
        let reply = service().handle_label_json(r#"{"count": 7}"#);
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body["labels"].as_array().unwrap().len(), 7);
        assert_eq!(reply.body["table"][0][0], "—");
    }

    #[test]
    fn quiz_status_codes() {
        let svc = service();
        assert_eq!(svc.handle_quiz_json(r#"{"mode": "color-to-reactions"}"#).status, 200);
        assert_eq!(svc.handle_quiz_json(r#"{"mode": "bingo"}"#).status, 400);
        assert_eq!(svc.handle_quiz_json("nope").status, 500);
    }
}
