//! callback-core: invocación de callables con inyección de argumentos por tipo.
//!
//! - `types`: firmas reflejadas (`FunctionSignature`) y jerarquía nominal.
//! - `injection`: política de matching y estrategias (`typed`, `untyped`,
//!   `union`, `factory`).
//! - `invoker`: `Callback`, que verifica aridad, resuelve y llama.
pub mod errors;
pub mod injection;
pub mod invoker;
pub mod types;

pub use errors::{CallbackError, FactoryError};
pub use injection::parameter;
pub use injection::{Discriminator, ParameterStrategy, Replacement, TypedParameter, UnionParameter, UntypedParameter, ValueFactory};
pub use invoker::Callback;
pub use types::{DeclaredParameter, DeclaredType, ExactTypes, FunctionSignature, NamedType, TypeHierarchy, TypeRegistry};
