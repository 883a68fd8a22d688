use async_trait::async_trait;
use log::info;
use spot_domain::ReactionTable;
use std::path::{Path, PathBuf};

use crate::errors::CoreError;

/// Tabla incluida en el binario, usada cuando no hay fichero configurado.
pub const BUNDLED_TABLE: &str = include_str!("../data/chemdb.json");

/// Origen de la tabla de reacciones.
#[async_trait]
pub trait TableSource: Send + Sync {
    fn get_name(&self) -> &str;
    async fn load(&self) -> Result<ReactionTable, CoreError>;
}

/// Lee el documento JSON de disco.
pub struct JsonFileTableSource {
    path: PathBuf,
}

impl JsonFileTableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TableSource for JsonFileTableSource {
    fn get_name(&self) -> &str {
        "json-file"
    }

    async fn load(&self) -> Result<ReactionTable, CoreError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let table = ReactionTable::from_json_str(&raw)?;
        info!("[source] {} cationes cargados de {}", table.len(), self.path.display());
        Ok(table)
    }
}

/// Documento JSON en memoria.
pub struct StaticTableSource {
    raw: String,
}

impl StaticTableSource {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn bundled() -> Self {
        Self::new(BUNDLED_TABLE)
    }
}

#[async_trait]
impl TableSource for StaticTableSource {
    fn get_name(&self) -> &str {
        "static"
    }

    async fn load(&self) -> Result<ReactionTable, CoreError> {
        Ok(ReactionTable::from_json_str(&self.raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bundled_table_loads() {
        let src = StaticTableSource::bundled();
        assert_eq!(src.get_name(), "static");
        let table = src.load().await.unwrap();
        assert!(table.len() >= 16);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let src = JsonFileTableSource::new("/nonexistent/chemdb.json");
        let err = src.load().await.unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
    }

    #[tokio::test]
    async fn invalid_document_is_table_error() {
        let err = StaticTableSource::new(r#"{"organic": {}}"#).load().await.unwrap_err();
        assert!(matches!(err, CoreError::Table(_)));
    }
}
