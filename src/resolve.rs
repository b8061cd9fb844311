//! Extension points of the expression generation
//!
//! The generation of binding expressions combines two layers:
//!
//! * The [InstanceExpression] trait is implemented once per category of binding
//!   (constructor injection, provider function, bound instance, ...).
//!   It builds the expression evaluating directly to an instance of the bound type.
//! * The [BindingExpression] trait fulfills a request of a given kind for a binding.
//!   It is the entry point used by the rest of the code generation.
//!
//! Request kinds that only need the instance, or an immediately completed handle of it,
//! share a single [BindingExpression] implementation built on top of any
//! [InstanceExpression] (see [crate::SimpleInvocationExpression]).

use thiserror::Error;

use crate::binding::Binding;
use crate::code::CodeFragment;
use crate::expression::Expression;
use crate::request::RequestKind;
use crate::types::ClassName;

/// Build the expression of a direct instance of the bound type
pub trait InstanceExpression: Send + Sync {
    /// The binding handled by this strategy
    fn binding(&self) -> &Binding;

    /// Returns an expression that evaluates to an instance of the dependency.
    ///
    /// The requesting class is the generated struct that will contain the expression.
    fn instance_expression(&self, requesting_class: &ClassName) -> Expression;

    /// Explicit type parameter for the immediately completed handle, such as `::<T>`.
    ///
    /// Inference through `ready(expr)` fails when the instance expression itself relies on
    /// the expected type (`collect()`, `Default::default()`), strategies producing such
    /// expressions override this hook.
    fn explicit_type_parameter(&self, _requesting_class: &ClassName) -> CodeFragment {
        CodeFragment::empty()
    }
}

impl<S: InstanceExpression + ?Sized> InstanceExpression for Box<S> {
    fn binding(&self) -> &Binding {
        (**self).binding()
    }

    fn instance_expression(&self, requesting_class: &ClassName) -> Expression {
        (**self).instance_expression(requesting_class)
    }

    fn explicit_type_parameter(&self, requesting_class: &ClassName) -> CodeFragment {
        (**self).explicit_type_parameter(requesting_class)
    }
}

/// Fulfill a request of a given kind for a binding
pub trait BindingExpression {
    fn request_kind(&self) -> RequestKind;

    /// Returns an expression fulfilling the request from within the requesting class
    fn dependency_expression(&self, requesting_class: &ClassName) -> Expression;
}

/// Errors triggered while generating binding expressions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    #[error("Unsupported request kind: {0} requests need a dedicated binding expression")]
    UnsupportedRequestKind(RequestKind),
    #[error("Invalid type `{ty}`: {reason}")]
    InvalidType { ty: String, reason: String },
    #[error("Could not tokenize `{code}`: {message}")]
    Tokenize { code: String, message: String },
    #[error("Generated code `{code}` is not an expression: {message}")]
    Syntax { code: String, message: String },
}
