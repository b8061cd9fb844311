//! Resolved bindings, as handed over by the dependency graph

use crate::code::CodeFragment;
use crate::types::{TypePath, TypeRef};

/// A resolved recipe for producing a value of the key type
///
/// Bindings are owned by the dependency graph and only read during code generation.
/// Dependencies of a binding are given as already generated expressions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    key: TypeRef,
    kind: BindingKind,
}

/// How a binding produces its value
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindingKind {
    /// Call a constructor of the bound type
    Injection {
        constructor: String,
        arguments: Vec<CodeFragment>,
    },
    /// Call a provider function of a module
    Provision {
        module: TypePath,
        method: String,
        arguments: Vec<CodeFragment>,
    },
    /// Instance given to the component when it was built
    BoundInstance { field: String },
    /// Set assembled from all its contributions
    MultiboundSet { elements: Vec<CodeFragment> },
}

impl Binding {
    pub fn new(key: TypeRef, kind: BindingKind) -> Self {
        Self { key, kind }
    }

    pub fn injection(
        key: TypeRef,
        constructor: &str,
        arguments: impl IntoIterator<Item = CodeFragment>,
    ) -> Self {
        Self::new(
            key,
            BindingKind::Injection {
                constructor: constructor.to_string(),
                arguments: arguments.into_iter().collect(),
            },
        )
    }

    pub fn provision(
        key: TypeRef,
        module: TypePath,
        method: &str,
        arguments: impl IntoIterator<Item = CodeFragment>,
    ) -> Self {
        Self::new(
            key,
            BindingKind::Provision {
                module,
                method: method.to_string(),
                arguments: arguments.into_iter().collect(),
            },
        )
    }

    pub fn bound_instance(key: TypeRef, field: &str) -> Self {
        Self::new(
            key,
            BindingKind::BoundInstance {
                field: field.to_string(),
            },
        )
    }

    pub fn multibound_set(key: TypeRef, elements: impl IntoIterator<Item = CodeFragment>) -> Self {
        Self::new(
            key,
            BindingKind::MultiboundSet {
                elements: elements.into_iter().collect(),
            },
        )
    }

    /// The bound type
    pub fn key(&self) -> &TypeRef {
        &self.key
    }

    pub fn kind(&self) -> &BindingKind {
        &self.kind
    }
}
