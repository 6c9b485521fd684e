//! Invocación de callables con argumentos resueltos por tipo.

pub mod callback;

pub use callback::Callback;
