//! Relación de subtipos entre tipos nominales.
//!
//! El core sólo necesita una consulta: "¿`sub` es subtipo de `sup`?". La
//! capa de reflexión del embebedor implementa `TypeHierarchy`; aquí se
//! incluyen dos implementaciones: `ExactTypes` (sin herencia) y
//! `TypeRegistry` (declaración en memoria de supertipos directos).

use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};

/// Consulta de subtipos entre nombres nominales (case-sensitive).
pub trait TypeHierarchy: Send + Sync + std::fmt::Debug {
    /// `true` si `sub` hereda de o implementa `sup` (directa o transitivamente).
    /// La igualdad la resuelve el matcher; implementaciones pueden ignorarla.
    fn is_subtype(&self, sub: &str, sup: &str) -> bool;
}

/// Jerarquía vacía: ningún tipo es subtipo de otro.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactTypes;

impl TypeHierarchy for ExactTypes {
    fn is_subtype(&self, _sub: &str, _sup: &str) -> bool {
        false
    }
}

/// Registro en memoria: cada tipo declara sus supertipos directos (clase
/// padre e interfaces). Las consultas recorren el grafo en anchura.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    supertypes: IndexMap<String, Vec<String>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declara (o amplía) los supertipos directos de `name`.
    pub fn declare<I, S>(&mut self, name: impl Into<String>, supertypes: I) -> &mut Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        let entry = self.supertypes.entry(name.into()).or_default();
        for s in supertypes {
            let s = s.into();
            if !entry.contains(&s) {
                entry.push(s);
            }
        }
        self
    }

    /// Variante builder de `declare`.
    pub fn with_type<I, S>(mut self, name: impl Into<String>, supertypes: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.declare(name, supertypes);
        self
    }

    /// Todos los supertipos transitivos de `name`, en orden de descubrimiento
    /// (los directos primero). Tolera ciclos.
    pub fn ancestors(&self, name: &str) -> IndexSet<String> {
        let mut found = IndexSet::new();
        let mut queue: VecDeque<&str> = VecDeque::from([name]);
        while let Some(current) = queue.pop_front() {
            let Some(parents) = self.supertypes.get(current) else { continue };
            for parent in parents {
                if parent != name && found.insert(parent.clone()) {
                    queue.push_back(parent.as_str());
                }
            }
        }
        found
    }
}

impl TypeHierarchy for TypeRegistry {
    fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        self.ancestors(sub).contains(sup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animals() -> TypeRegistry {
        TypeRegistry::new().with_type("Animal", ["Named"])
                           .with_type("Dog", ["Animal", "Pet"])
                           .with_type("Puppy", ["Dog"])
    }

    #[test]
    fn transitive_subtype_through_parent_and_interface() {
        let reg = animals();
        assert!(reg.is_subtype("Puppy", "Dog"));
        assert!(reg.is_subtype("Puppy", "Animal"));
        assert!(reg.is_subtype("Puppy", "Named"));
        assert!(reg.is_subtype("Dog", "Pet"));
        assert!(!reg.is_subtype("Animal", "Dog"));
    }

    #[test]
    fn ancestors_are_in_discovery_order() {
        let got: Vec<String> = animals().ancestors("Puppy").into_iter().collect();
        assert_eq!(got, vec!["Dog", "Animal", "Pet", "Named"]);
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert!(!animals().is_subtype("dog", "Animal"));
        assert!(!animals().is_subtype("Dog", "animal"));
    }

    #[test]
    fn cycles_terminate() {
        let reg = TypeRegistry::new().with_type("A", ["B"]).with_type("B", ["A"]);
        assert!(reg.is_subtype("A", "B"));
        assert!(!reg.is_subtype("A", "A"));
        assert_eq!(reg.ancestors("A").len(), 1);
    }

    #[test]
    fn exact_types_has_no_subtyping() {
        assert!(!ExactTypes.is_subtype("Dog", "Animal"));
    }
}
