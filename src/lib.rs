//! ChemSpot Rust Library
//!
//! Este crate actúa como la capa de servicio de ChemSpot:
//! - Expone `errors` para manejar errores de núcleo y dominio.
//! - Expone `config` y `logging` para el entorno de ejecución.
//! - Expone `source` para cargar la tabla de reacciones.
//! - Expone `matrix` con el servicio de generación de matrices y quiz.
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub mod config;
pub mod errors;
pub mod logging;
pub mod matrix;
pub mod source;

pub use spot_core;
pub use spot_domain;
pub use spot_quiz;

#[cfg(test)]
mod tests {
	use super::errors::{core_error::CoreError, domain_error::DomainError};

	#[test]
	fn core_error_tests() {
		let i = CoreError::Internal("fallo".into()).to_string();
		assert_eq!(i, "Error interno: fallo");
	}

	#[test]
	fn domain_error_tests() {
		let d = DomainError::Validation("x".into()).to_string();
		assert_eq!(d, "Validación fallida: x");
	}
}
