//! Inyección de argumentos por tipo.
//!
//! `matching` contiene la política única; `parameter` la expresa como
//! estrategias componibles y `value_factory` define los valores diferidos.

pub mod matching;
pub mod parameter;
pub mod value_factory;

pub use matching::{Discriminator, ParameterShape};
pub use parameter::{ParameterStrategy, TypedParameter, UnionParameter, UntypedParameter};
pub use value_factory::{Replacement, ValueFactory};
