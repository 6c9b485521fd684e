//! Modelo de tipos: firmas reflejadas y jerarquía nominal.

pub mod descriptor;
pub mod hierarchy;

pub use descriptor::{DeclaredParameter, DeclaredType, FunctionSignature, NamedType};
pub use hierarchy::{ExactTypes, TypeHierarchy, TypeRegistry};
