//! `Callback`: envuelve un callable y le inyecta argumentos por tipo.
//!
//! Notas de diseño
//! - Las reglas se guardan en un `IndexMap<Discriminator, Replacement>`: el
//!   orden de registro decide el desempate (la primera regla que aplica gana).
//! - Re-registrar un discriminador sobrescribe su valor y conserva su
//!   posición original (semántica de `IndexMap::insert`).
//! - La aridad mínima se verifica antes de resolver cualquier parámetro; si
//!   falla, ni el callable ni los `ValueFactory` se ejecutan.
//! - El resultado del callable se devuelve sin modificar. Si el callable
//!   devuelve `Result`, su error llega intacto al caller dentro de `Ok(..)`.
//!
//! ```ignore
//! let cb = Callback::create(signature, |args| handle(args))?
//!     .min_arguments(2)
//!     .with_types(registry)
//!     .replace_typed("int", json!(42))
//!     .replace_typed("Animal", ValueFactory::new(|t| make_default(t)));
//! let out = cb.invoke()?;
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::errors::CallbackError;
use crate::injection::matching::{resolve_parameter, Discriminator};
use crate::injection::{ParameterStrategy, Replacement};
use crate::types::{ExactTypes, FunctionSignature, TypeHierarchy};

pub struct Callback<F> {
    signature: FunctionSignature,
    function: F,
    min_arguments: usize,
    replacements: IndexMap<Discriminator, Replacement>,
    types: Arc<dyn TypeHierarchy>,
}

impl<F> Callback<F> {
    /// Crea el invoker a partir de la firma reflejada y el callable.
    ///
    /// Falla con `InvalidInput` si la firma no describe un callable válido.
    pub fn create(signature: FunctionSignature, function: F) -> Result<Self, CallbackError> {
        signature.validate()?;
        Ok(Self { signature,
                  function,
                  min_arguments: 0,
                  replacements: IndexMap::new(),
                  types: Arc::new(ExactTypes) })
    }

    /// Igual que `create` pero leyendo la firma desde un descriptor JSON.
    pub fn from_descriptor(descriptor: &Value, function: F) -> Result<Self, CallbackError> {
        Self::create(FunctionSignature::from_json(descriptor)?, function)
    }

    #[inline]
    pub fn min_arguments(mut self, min: usize) -> Self {
        self.min_arguments = min;
        self
    }

    /// Registra un reemplazo para parámetros de tipo `ty` (o subtipos).
    #[inline]
    pub fn replace_typed(mut self, ty: impl Into<String>, value: impl Into<Replacement>) -> Self {
        self.replacements.insert(Discriminator::of_type(ty), value.into());
        self
    }

    /// Registra un reemplazo para parámetros sin tipo declarado.
    #[inline]
    pub fn replace_untyped(mut self, value: impl Into<Replacement>) -> Self {
        self.replacements.insert(Discriminator::Untyped, value.into());
        self
    }

    /// Jerarquía usada para las consultas de subtipo (por defecto `ExactTypes`).
    #[inline]
    pub fn with_types<T>(mut self, types: T) -> Self
        where T: TypeHierarchy + 'static
    {
        self.types = Arc::new(types);
        self
    }

    pub fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    pub fn required_arguments(&self) -> usize {
        self.min_arguments
    }

    /// Discriminadores registrados, en orden de matching.
    pub fn discriminators(&self) -> impl Iterator<Item = &Discriminator> {
        self.replacements.keys()
    }

    fn check_arity(&self) -> Result<(), CallbackError> {
        if self.signature.arity() < self.min_arguments {
            log::debug!("`{}` declares {} argument(s), {} required",
                        self.signature.display_name(),
                        self.signature.arity(),
                        self.min_arguments);
            return Err(CallbackError::Arity(self.min_arguments));
        }
        Ok(())
    }

    /// Resuelve los argumentos con las reglas registradas, sin invocar.
    pub fn arguments(&self) -> Result<Vec<Value>, CallbackError> {
        self.check_arity()?;
        self.signature
            .parameters
            .iter()
            .map(|p| resolve_parameter(p, &self.replacements, self.types.as_ref()))
            .collect()
    }

    /// Resuelve todos los argumentos con una única estrategia, sin invocar.
    pub fn arguments_with(&self, strategy: &dyn ParameterStrategy) -> Result<Vec<Value>, CallbackError> {
        self.check_arity()?;
        self.signature
            .parameters
            .iter()
            .map(|p| strategy.resolve(p, self.types.as_ref()))
            .collect()
    }

    /// Resuelve cada parámetro declarado y llama al callable posicionalmente.
    pub fn invoke<R>(&self) -> Result<R, CallbackError>
        where F: Fn(Vec<Value>) -> R
    {
        log::debug!("invoking `{}` ({} declared argument(s))",
                    self.signature.display_name(),
                    self.signature.arity());
        let args = self.arguments()?;
        Ok((self.function)(args))
    }

    /// Como `invoke`, pero todos los parámetros se resuelven con `strategy`.
    pub fn invoke_all<R>(&self, strategy: &dyn ParameterStrategy) -> Result<R, CallbackError>
        where F: Fn(Vec<Value>) -> R
    {
        log::debug!("invoking `{}` with strategy `{}`",
                    self.signature.display_name(),
                    strategy.type_label());
        let args = self.arguments_with(strategy)?;
        Ok((self.function)(args))
    }
}

impl<F> fmt::Debug for Callback<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
         .field("signature", &self.signature)
         .field("min_arguments", &self.min_arguments)
         .field("replacements", &self.replacements)
         .field("types", &self.types)
         .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::injection::ValueFactory;
    use crate::types::{DeclaredParameter, DeclaredType};
    use serde_json::json;

    fn sig(params: Vec<DeclaredParameter>) -> FunctionSignature {
        FunctionSignature::named("f", params)
    }

    #[test]
    fn overwrite_keeps_original_position() {
        let cb = Callback::create(sig(vec![]), |_args: Vec<Value>| ())
            .unwrap()
            .replace_typed("A", json!(1))
            .replace_typed("B", json!(2))
            .replace_typed("A", json!(3));
        let order: Vec<String> = cb.discriminators().map(|d| d.to_string()).collect();
        assert_eq!(order, vec!["A", "B"]);
    }

    #[test]
    fn overwritten_value_wins() {
        let p = DeclaredParameter::typed("a", 0, DeclaredType::nominal("A"));
        let cb = Callback::create(sig(vec![p]), |args: Vec<Value>| args)
            .unwrap()
            .replace_typed("A", json!(1))
            .replace_typed("A", ValueFactory::new(|t| json!(t)));
        assert_eq!(cb.invoke().unwrap(), vec![json!("A")]);
    }

    #[test]
    fn invalid_signature_is_rejected() {
        let bad = sig(vec![DeclaredParameter::untyped("a", 3)]);
        let err = Callback::create(bad, |_args: Vec<Value>| ()).unwrap_err();
        assert!(matches!(err, CallbackError::InvalidInput(_)));
    }

    #[test]
    fn zero_minimum_by_default() {
        let cb = Callback::create(sig(vec![]), |args: Vec<Value>| args.len()).unwrap();
        assert_eq!(cb.required_arguments(), 0);
        assert_eq!(cb.invoke().unwrap(), 0);
    }
}
