//! Estrategias componibles de resolución de parámetros.
//!
//! Cada estrategia expresa una regla de la política de matching:
//! - `TypedParameter`: un tipo (builtin exacto o nominal por subtipo).
//! - `UntypedParameter`: parámetros sin tipo declarado.
//! - `UnionParameter`: hijos en orden; el primero que aplica gana.
//!
//! Un `ValueFactory` no es una regla: se usa como valor de cualquiera de las
//! anteriores para diferir el cálculo hasta la resolución.
//!
//! ```ignore
//! let strategy = parameter::union(vec![
//!     Box::new(parameter::typed("int", json!(42))),
//!     Box::new(parameter::typed("Animal", parameter::factory(|t| json!({"made": t})))),
//!     Box::new(parameter::untyped(json!(null))),
//! ]);
//! let value = strategy.resolve(&declared, &registry)?;
//! ```

use std::fmt::Debug;

use serde_json::Value;

use super::matching::{applies, classify, Discriminator, ParameterShape};
use super::value_factory::{Replacement, ValueFactory};
use crate::errors::CallbackError;
use crate::types::{DeclaredParameter, TypeHierarchy};

/// Contrato de las estrategias de resolución.
pub trait ParameterStrategy: Send + Sync + Debug {
    /// Entrada que esta estrategia aporta para `shape`, o `None` si no aplica.
    fn value_for(&self, shape: &ParameterShape<'_>, types: &dyn TypeHierarchy) -> Option<&Replacement>;

    /// Descripción de lo que acepta la estrategia (`int`, `(untyped)`, `A|B`).
    fn type_label(&self) -> String;

    /// Resuelve el valor para `parameter`.
    ///
    /// Falla con `UnresolvableArgument` si la estrategia no aplica. Un error
    /// del `ValueFactory` elegido se propaga sin probar otras alternativas.
    fn resolve(&self, parameter: &DeclaredParameter, types: &dyn TypeHierarchy) -> Result<Value, CallbackError> {
        let shape = classify(parameter)?;
        match self.value_for(&shape, types) {
            Some(replacement) => replacement.evaluate(shape.type_name()),
            None => {
                log::debug!("strategy `{}` does not apply to argument \"{}\"", self.type_label(), parameter.name);
                Err(CallbackError::UnresolvableArgument(parameter.name.clone()))
            }
        }
    }
}

/// Regla para un tipo concreto.
#[derive(Debug, Clone)]
pub struct TypedParameter {
    discriminator: Discriminator,
    value: Replacement,
}

impl TypedParameter {
    pub fn new(ty: impl Into<String>, value: impl Into<Replacement>) -> Self {
        Self { discriminator: Discriminator::of_type(ty),
               value: value.into() }
    }
}

impl ParameterStrategy for TypedParameter {
    fn value_for(&self, shape: &ParameterShape<'_>, types: &dyn TypeHierarchy) -> Option<&Replacement> {
        applies(&self.discriminator, shape, types).then_some(&self.value)
    }

    fn type_label(&self) -> String {
        self.discriminator.to_string()
    }
}

/// Regla para parámetros sin tipo declarado.
#[derive(Debug, Clone)]
pub struct UntypedParameter {
    value: Replacement,
}

impl UntypedParameter {
    pub fn new(value: impl Into<Replacement>) -> Self {
        Self { value: value.into() }
    }
}

impl ParameterStrategy for UntypedParameter {
    fn value_for(&self, shape: &ParameterShape<'_>, types: &dyn TypeHierarchy) -> Option<&Replacement> {
        applies(&Discriminator::Untyped, shape, types).then_some(&self.value)
    }

    fn type_label(&self) -> String {
        Discriminator::Untyped.to_string()
    }
}

/// Unión ordenada de estrategias. Las uniones anidadas se recorren
/// recursivamente, sin aplanarlas.
#[derive(Debug, Default)]
pub struct UnionParameter {
    pub strategies: Vec<Box<dyn ParameterStrategy>>,
}

impl UnionParameter {
    pub fn new() -> Self {
        Self { strategies: vec![] }
    }

    pub fn with_strategies(strategies: Vec<Box<dyn ParameterStrategy>>) -> Self {
        Self { strategies }
    }
}

impl ParameterStrategy for UnionParameter {
    fn value_for(&self, shape: &ParameterShape<'_>, types: &dyn TypeHierarchy) -> Option<&Replacement> {
        self.strategies.iter().find_map(|s| s.value_for(shape, types))
    }

    fn type_label(&self) -> String {
        self.strategies.iter().map(|s| s.type_label()).collect::<Vec<_>>().join("|")
    }
}

pub fn typed(ty: impl Into<String>, value: impl Into<Replacement>) -> TypedParameter {
    TypedParameter::new(ty, value)
}

pub fn untyped(value: impl Into<Replacement>) -> UntypedParameter {
    UntypedParameter::new(value)
}

pub fn union(strategies: Vec<Box<dyn ParameterStrategy>>) -> UnionParameter {
    UnionParameter::with_strategies(strategies)
}

pub fn factory<F>(f: F) -> ValueFactory
    where F: Fn(Option<&str>) -> Value + Send + Sync + 'static
{
    ValueFactory::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeclaredType, ExactTypes, NamedType, TypeRegistry};
    use serde_json::json;

    #[test]
    fn type_labels() {
        let u = union(vec![Box::new(typed("int", json!(1))),
                           Box::new(union(vec![Box::new(typed("Animal", json!(2))), Box::new(untyped(json!(3)))]))]);
        assert_eq!(u.type_label(), "int|Animal|(untyped)");
        assert_eq!(UnionParameter::new().type_label(), "");
    }

    #[test]
    fn typed_does_not_apply_to_untyped_parameter() {
        let p = DeclaredParameter::untyped("x", 0);
        let err = typed("string", json!("s")).resolve(&p, &ExactTypes).unwrap_err();
        assert!(matches!(err, CallbackError::UnresolvableArgument(ref n) if n == "x"));
    }

    #[test]
    fn untyped_factory_receives_none() {
        let p = DeclaredParameter::untyped("x", 0);
        let v = untyped(factory(|t| json!({ "type": t }))).resolve(&p, &ExactTypes).unwrap();
        assert_eq!(v, json!({ "type": null }));
    }

    #[test]
    fn composite_parameter_is_rejected_before_matching() {
        let p = DeclaredParameter::typed("c", 0, DeclaredType::Intersection(vec![NamedType::nominal("A"), NamedType::nominal("B")]));
        let err = untyped(json!(1)).resolve(&p, &ExactTypes).unwrap_err();
        assert!(matches!(err, CallbackError::TypeMismatch { .. }));
    }

    #[test]
    fn nested_union_is_traversed() {
        let reg = TypeRegistry::new().with_type("Dog", ["Animal"]);
        let u = union(vec![Box::new(typed("int", json!(1))),
                           Box::new(union(vec![Box::new(typed("Animal", factory(|t| json!(t))))]))]);
        let p = DeclaredParameter::typed("d", 0, DeclaredType::nominal("Dog"));
        assert_eq!(u.resolve(&p, &reg).unwrap(), json!("Dog"));
    }
}
