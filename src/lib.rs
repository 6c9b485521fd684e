//! Callback Rust Library
//!
//! Este crate actúa como la librería de aplicación sobre `callback-core`:
//! - Expone `config` para cargar defaults del entorno (`.env`).
//! - Expone `errors` para errores propios de la aplicación.
//! - Re-exporta el core para que los clientes dependan de un único crate.
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub mod config;
pub mod errors;

pub use callback_core::*;
pub use config::{AppConfig, CONFIG};

#[cfg(test)]
mod tests {
	use super::errors::ConfigError;

	#[test]
	fn config_error_tests() {
		let e = ConfigError::Other("fallo".into()).to_string();
		assert_eq!(e, "Error de configuración: fallo");
	}

	#[test]
	fn core_is_reexported() {
		let sig = super::FunctionSignature::new(vec![super::DeclaredParameter::untyped("x", 0)]);
		let err = super::Callback::create(sig, |_args: Vec<serde_json::Value>| ()).unwrap().invoke().unwrap_err();
		assert!(matches!(err, super::CallbackError::UnresolvableArgument(_)));
	}
}
