//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
//! `AppConfig::from_env` es la variante estricta sin estado global; `CONFIG`
//! usa `from_lookup_lenient`, que sólo descarta las variables mal formadas.
use once_cell::sync::Lazy;
use spot_core::{SamplerOptions, SearchParams};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::CoreError;
use crate::logging::LOG_ENV;

pub const DEFAULT_TABLE_PATH: &str = "data/chemdb.json";
pub const DEFAULT_N: usize = 7;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Ruta del documento JSON con la tabla de reacciones.
    pub table_path: PathBuf,
    /// Configuración del generador de matrices.
    pub generation: GenerationConfig,
    /// Nivel de log (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

/// Parámetros del generador que se pueden fijar por entorno.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationConfig {
    pub default_n: usize,
    pub search: SearchParams,
    pub sampler: SamplerOptions,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig { default_n: DEFAULT_N,
                           search: SearchParams::default(),
                           sampler: SamplerOptions::default() }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig { table_path: PathBuf::from(DEFAULT_TABLE_PATH),
                    generation: GenerationConfig::default(),
                    log_level: DEFAULT_LOG_LEVEL.to_string() }
    }
}

impl AppConfig {
    /// Lee `CHEMSPOT_*` del entorno. Las variables ausentes toman su valor
    /// por defecto; las presentes pero mal formadas son un error.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
        where F: Fn(&str) -> Option<String>
    {
        let (cfg, errors) = Self::from_lookup_lenient(lookup);
        match errors.into_iter().next() {
            Some(e) => Err(e),
            None => Ok(cfg),
        }
    }

    /// Aplica cada variable por separado: una mal formada conserva su valor
    /// por defecto y se devuelve como error, sin afectar al resto.
    pub fn from_lookup_lenient<F>(lookup: F) -> (Self, Vec<CoreError>)
        where F: Fn(&str) -> Option<String>
    {
        let mut cfg = AppConfig::default();
        let mut errors = Vec::new();
        if let Some(path) = lookup("CHEMSPOT_TABLE_PATH") {
            cfg.table_path = PathBuf::from(path);
        }
        match parse_var(&lookup, "CHEMSPOT_DEFAULT_N", parse_number) {
            Ok(Some(n)) => cfg.generation.default_n = n,
            Ok(None) => {}
            Err(e) => errors.push(e),
        }
        match parse_var(&lookup, "CHEMSPOT_MAX_ATTEMPTS", parse_number) {
            Ok(Some(attempts)) => cfg.generation.search.max_attempts = attempts,
            Ok(None) => {}
            Err(e) => errors.push(e),
        }
        match parse_var(&lookup, "CHEMSPOT_ALLOW_REACTIVE_FALLBACK", parse_flag) {
            Ok(Some(fallback)) => cfg.generation.sampler.allow_reactive_fallback = fallback,
            Ok(None) => {}
            Err(e) => errors.push(e),
        }
        if let Some(level) = lookup(LOG_ENV) {
            cfg.log_level = level;
        }
        (cfg, errors)
    }
}

fn parse_number<T: FromStr>(raw: &str) -> Option<T> {
    raw.parse().ok()
}

/// `true/false`, `1/0`, `yes/no`, `on/off`.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_var<T, F>(lookup: &F, key: &str, parse: fn(&str) -> Option<T>) -> Result<Option<T>, CoreError>
    where F: Fn(&str) -> Option<String>
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => parse(raw.trim()).map(Some)
                                      .ok_or_else(|| CoreError::Config(format!("{key}: valor inválido '{raw}'"))),
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
/// Una variable mal formada no aborta: se registra y esa clave queda con su
/// valor por defecto. El logger debe estar instalado antes (`logging::init_from_env`).
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    dotenvy::dotenv().ok();
    let (cfg, errors) = AppConfig::from_lookup_lenient(|key| env::var(key).ok());
    for e in errors {
        log::warn!("[config] {e}; se mantiene el valor por defecto");
    }
    cfg
});
