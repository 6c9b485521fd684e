//! Metadata de firmas entregada por la capa de reflexión externa.
//!
//! Un `FunctionSignature` describe los parámetros declarados de un callable
//! (nombre, posición y tipo opcional). El core no obtiene esta metadata por sí
//! mismo: la recibe ya construida o deserializada desde JSON.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CallbackError;

/// Tipo nombrado simple: builtin (match exacto) o nominal (match por subtipo).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedType {
    pub name: String,
    #[serde(default)]
    pub builtin: bool,
}

impl NamedType {
    pub fn builtin(name: impl Into<String>) -> Self {
        Self { name: name.into(), builtin: true }
    }

    pub fn nominal(name: impl Into<String>) -> Self {
        Self { name: name.into(), builtin: false }
    }
}

impl fmt::Display for NamedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Tipo declarado de un parámetro.
///
/// Sólo `Named` participa en el matching; las formas compuestas existen para
/// que la capa de reflexión pueda describirlas y el core las rechace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum DeclaredType {
    Named(NamedType),
    Union(Vec<NamedType>),
    Intersection(Vec<NamedType>),
}

impl DeclaredType {
    pub fn builtin(name: impl Into<String>) -> Self {
        DeclaredType::Named(NamedType::builtin(name))
    }

    pub fn nominal(name: impl Into<String>) -> Self {
        DeclaredType::Named(NamedType::nominal(name))
    }

    /// Devuelve el tipo nombrado si la forma es simple.
    pub fn as_named(&self) -> Option<&NamedType> {
        match self {
            DeclaredType::Named(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |members: &[NamedType], sep: &str| {
            members.iter().map(|m| m.name.as_str()).collect::<Vec<_>>().join(sep)
        };
        match self {
            DeclaredType::Named(t) => write!(f, "{t}"),
            DeclaredType::Union(members) => f.write_str(&join(members.as_slice(), "|")),
            DeclaredType::Intersection(members) => f.write_str(&join(members.as_slice(), "&")),
        }
    }
}

/// Parámetro formal de un callable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredParameter {
    pub name: String,
    pub position: usize,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<DeclaredType>,
}

impl DeclaredParameter {
    pub fn untyped(name: impl Into<String>, position: usize) -> Self {
        Self { name: name.into(), position, ty: None }
    }

    pub fn typed(name: impl Into<String>, position: usize, ty: DeclaredType) -> Self {
        Self { name: name.into(), position, ty: Some(ty) }
    }
}

/// Firma reflejada de un callable: parámetros en orden posicional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub parameters: Vec<DeclaredParameter>,
}

impl FunctionSignature {
    pub fn new(parameters: Vec<DeclaredParameter>) -> Self {
        Self { name: None, parameters }
    }

    pub fn named(name: impl Into<String>, parameters: Vec<DeclaredParameter>) -> Self {
        Self { name: Some(name.into()), parameters }
    }

    /// Deserializa una firma desde su descriptor JSON.
    pub fn from_json(descriptor: &serde_json::Value) -> Result<Self, CallbackError> {
        serde_json::from_value(descriptor.clone())
            .map_err(|e| CallbackError::InvalidInput(format!("malformed signature descriptor: {e}")))
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Nombre para logs; closures anónimas aparecen como `{closure}`.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("{closure}")
    }

    /// Valida que la firma describa un callable real: posiciones contiguas
    /// desde 0 y nombres no vacíos y únicos.
    pub fn validate(&self) -> Result<(), CallbackError> {
        let mut seen = HashSet::new();
        for (index, p) in self.parameters.iter().enumerate() {
            if p.position != index {
                return Err(CallbackError::InvalidInput(format!(
                    "parameter \"{}\" declared at position {} but found at {}",
                    p.name, p.position, index
                )));
            }
            if p.name.is_empty() {
                return Err(CallbackError::InvalidInput(format!("parameter at position {index} has no name")));
            }
            if !seen.insert(p.name.as_str()) {
                return Err(CallbackError::InvalidInput(format!("duplicate parameter \"{}\"", p.name)));
            }
        }
        Ok(())
    }
}
