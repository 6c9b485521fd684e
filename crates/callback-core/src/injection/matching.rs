//! Política de matching compartida entre `Callback` y las estrategias.
//!
//! Reglas, para un parámetro `p` con tipo declarado opcional `T`:
//! 1. `p` sin tipo: sólo aplica una regla `Untyped`.
//! 2. `T` presente pero compuesto (union/intersection): `TypeMismatch`.
//! 3. `T` builtin: match por igualdad exacta de nombre. `T` nominal: match si
//!    es igual o subtipo del tipo de la regla.
//! 4. La primera regla (en orden de registro) que aplica gana.

use std::fmt;

use serde_json::Value;

use super::value_factory::Replacement;
use crate::errors::CallbackError;
use crate::types::{DeclaredParameter, DeclaredType, NamedType, TypeHierarchy};

/// Clave de una regla de reemplazo.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Discriminator {
    Untyped,
    Type(String),
}

impl Discriminator {
    pub fn of_type(name: impl Into<String>) -> Self {
        Discriminator::Type(name.into())
    }
}

impl fmt::Display for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discriminator::Untyped => f.write_str("(untyped)"),
            Discriminator::Type(name) => f.write_str(name),
        }
    }
}

/// Forma de un parámetro una vez clasificado su tipo declarado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterShape<'a> {
    Untyped,
    Named(&'a NamedType),
}

impl<'a> ParameterShape<'a> {
    /// Argumento que recibe un `ValueFactory` al resolver esta forma.
    pub fn type_name(&self) -> Option<&'a str> {
        match self {
            ParameterShape::Untyped => None,
            ParameterShape::Named(t) => Some(t.name.as_str()),
        }
    }
}

/// Clasifica el tipo declarado de `parameter` (reglas 1 y 2).
pub fn classify(parameter: &DeclaredParameter) -> Result<ParameterShape<'_>, CallbackError> {
    match &parameter.ty {
        None => Ok(ParameterShape::Untyped),
        Some(DeclaredType::Named(t)) => Ok(ParameterShape::Named(t)),
        Some(other) => Err(CallbackError::TypeMismatch { parameter: parameter.name.clone(),
                                                         found: other.to_string() }),
    }
}

/// Regla 3 para un único tipo de regla.
pub fn type_matches(declared: &NamedType, rule_type: &str, types: &dyn TypeHierarchy) -> bool {
    if declared.name == rule_type {
        return true;
    }
    !declared.builtin && types.is_subtype(&declared.name, rule_type)
}

/// `true` si la regla con clave `discriminator` aplica a `shape`.
pub fn applies(discriminator: &Discriminator, shape: &ParameterShape<'_>, types: &dyn TypeHierarchy) -> bool {
    match (discriminator, shape) {
        (Discriminator::Untyped, ParameterShape::Untyped) => true,
        (Discriminator::Type(rule_type), ParameterShape::Named(declared)) => type_matches(declared, rule_type, types),
        _ => false,
    }
}

/// Primera regla de `rules` que aplica a `shape` (regla 4).
pub fn select<'r, I>(rules: I, shape: &ParameterShape<'_>, types: &dyn TypeHierarchy) -> Option<(&'r Discriminator, &'r Replacement)>
    where I: IntoIterator<Item = (&'r Discriminator, &'r Replacement)>
{
    rules.into_iter().find(|(d, _)| applies(d, shape, types))
}

/// Aplica la política completa a un parámetro contra un conjunto ordenado de
/// reglas y materializa el valor elegido.
pub fn resolve_parameter<'r, I>(parameter: &DeclaredParameter, rules: I, types: &dyn TypeHierarchy) -> Result<Value, CallbackError>
    where I: IntoIterator<Item = (&'r Discriminator, &'r Replacement)>
{
    let shape = classify(parameter)?;
    match select(rules, &shape, types) {
        Some((discriminator, replacement)) => {
            log::trace!("argument \"{}\" matched `{}`", parameter.name, discriminator);
            replacement.evaluate(shape.type_name())
        }
        None => {
            log::debug!("no rule matches argument \"{}\"", parameter.name);
            Err(CallbackError::UnresolvableArgument(parameter.name.clone()))
        }
    }
}
