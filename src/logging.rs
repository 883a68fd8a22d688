//! Backend mínimo para la fachada `log`: una línea por registro en stderr.
use chrono::Utc;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

static LOGGER: StderrLogger = StderrLogger;

/// Variable de entorno con el nivel de log.
pub const LOG_ENV: &str = "CHEMSPOT_LOG";

struct StderrLogger;

/// Convierte el nombre de nivel de `CHEMSPOT_LOG`; desconocido → `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    match name.trim().to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Instala el logger global. Falla si ya había uno instalado.
pub fn init(level: &str) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(parse_level(level)))
}

/// Instala el logger leyendo `CHEMSPOT_LOG` directamente, sin pasar por
/// `CONFIG`, para que los avisos de configuración ya tengan destino.
pub fn init_from_env() -> Result<(), SetLoggerError> {
    let level = std::env::var(LOG_ENV).unwrap_or_else(|_| crate::config::DEFAULT_LOG_LEVEL.to_string());
    init(&level)
}

fn tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN ",
        Level::Info => "INFO ",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} {} {}: {}",
                      Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
                      tag(record.level()),
                      record.target(),
                      record.args());
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }

    #[test]
    fn second_init_fails() {
        let _ = init("info");
        assert!(init("debug").is_err());
    }
}
