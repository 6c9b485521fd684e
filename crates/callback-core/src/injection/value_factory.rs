//! Valores diferidos y entradas de reemplazo.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::{CallbackError, FactoryError};

type ProviderFn = dyn Fn(Option<&str>) -> Result<Value, FactoryError> + Send + Sync;

/// Valor calculado perezosamente en el momento de la resolución.
///
/// El proveedor recibe el nombre del tipo que hizo match (`None` si el
/// parámetro no tiene tipo). Se evalúa una vez por resolución y el resultado
/// nunca se memoiza.
#[derive(Clone)]
pub struct ValueFactory {
    provider: Arc<ProviderFn>,
}

impl ValueFactory {
    /// Proveedor infalible.
    pub fn new<F>(f: F) -> Self
        where F: Fn(Option<&str>) -> Value + Send + Sync + 'static
    {
        Self { provider: Arc::new(move |ty: Option<&str>| Ok::<_, FactoryError>(f(ty))) }
    }

    /// Proveedor que puede fallar; su error se propaga sin reclasificar.
    pub fn try_new<F>(f: F) -> Self
        where F: Fn(Option<&str>) -> Result<Value, FactoryError> + Send + Sync + 'static
    {
        Self { provider: Arc::new(f) }
    }

    pub fn call(&self, type_name: Option<&str>) -> Result<Value, CallbackError> {
        (self.provider)(type_name).map_err(CallbackError::Factory)
    }
}

impl fmt::Debug for ValueFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueFactory(..)")
    }
}

/// Entrada registrada bajo un discriminador o en una estrategia.
#[derive(Debug, Clone)]
pub enum Replacement {
    Value(Value),
    Factory(ValueFactory),
}

impl Replacement {
    /// Materializa la entrada. Un `Factory` recibe `type_name`.
    pub fn evaluate(&self, type_name: Option<&str>) -> Result<Value, CallbackError> {
        match self {
            Replacement::Value(v) => Ok(v.clone()),
            Replacement::Factory(f) => f.call(type_name),
        }
    }
}

impl From<Value> for Replacement {
    fn from(v: Value) -> Self {
        Replacement::Value(v)
    }
}

impl From<ValueFactory> for Replacement {
    fn from(f: ValueFactory) -> Self {
        Replacement::Factory(f)
    }
}
