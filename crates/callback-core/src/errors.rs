//! Errores del core de invocación.
//!
//! Todas las fallas de resolución se reportan de forma síncrona en el punto
//! donde se detectan. Los errores propios de un `ValueFactory` viajan tal
//! cual (variante `Factory`, transparente) para que el caller pueda
//! distinguir "no se pudo resolver" de "la lógica del proveedor falló".

use thiserror::Error;

/// Error devuelto por un proveedor perezoso (`ValueFactory`).
pub type FactoryError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum CallbackError {
    /// El valor suministrado no es invocable (metadata de firma inválida).
    #[error("invalid callable: {0}")]
    InvalidInput(String),
    /// La firma declara menos parámetros que el mínimo configurado.
    #[error("{0} argument(s) required")]
    Arity(usize),
    /// El tipo declarado existe pero no es un tipo nombrado simple.
    #[error("unable to replace argument \"{parameter}\": declared type `{found}` is not a named type")]
    TypeMismatch { parameter: String, found: String },
    /// Ninguna regla aplica al parámetro.
    #[error("unable to resolve argument \"{0}\"")]
    UnresolvableArgument(String),
    #[error(transparent)]
    Factory(FactoryError),
}

impl CallbackError {
    /// Nombre del parámetro involucrado, si la falla es de resolución.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            CallbackError::TypeMismatch { parameter, .. } => Some(parameter),
            CallbackError::UnresolvableArgument(name) => Some(name),
            _ => None,
        }
    }
}
