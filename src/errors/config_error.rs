use thiserror::Error;

/// Errores al leer la configuración desde el entorno.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Valor inválido para {key}: {value:?}")]
    InvalidValue { key: String, value: String },
    #[error("Error de configuración: {0}")]
    Other(String),
}
