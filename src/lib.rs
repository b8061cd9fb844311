//! Binding expression generation for compile-time dependency injection.
//!
//! Given a resolved binding (a recipe producing a value of some type) and a request kind
//! (how the dependent wants to consume the value), generate a typed Rust expression
//! fulfilling the request.
//!
//! # Simple use case
//!
//! ```
//! use hanami_codegen::*;
//!
//! # fn main() -> Result<(), CodegenError> {
//! // A set multibinding with two contributions
//! let binding = Binding::multibound_set(
//!     "::std::collections::HashSet<String>".parse()?,
//!     [CodeFragment::of("\"a\".to_string()"), CodeFragment::of("\"b\".to_string()")],
//! );
//!
//! let options = CodegenOptions::default();
//! let expressions = BindingExpressions::new(&Types, &options);
//! let component = ClassName::new("crate::AppComponent");
//!
//! let future = expressions.dependency_expression(&binding, RequestKind::Future, &component)?;
//! assert_eq!(
//!     future.ty().to_string(),
//!     "::std::future::Ready<::std::collections::HashSet<String>>"
//! );
//! assert_eq!(
//!     future.code().to_string(),
//!     "::std::future::ready::<::std::collections::HashSet<String>>\
//!      ([\"a\".to_string(), \"b\".to_string()].into_iter().collect())"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Mechanism
//!
//! * The [Expression] struct pairs a [TypeRef] with a [CodeFragment]. Fragments embed
//!   type and item paths instead of raw text, so that [Imports] can shorten them later.
//! * The [InstanceExpression] trait is implemented for each category of binding and
//!   builds the expression of a direct instance of the bound type ([helpers]).
//! * The [SimpleInvocationExpression] struct implements [BindingExpression] on top of any
//!   [InstanceExpression]. It only accepts the request kinds reduced to the instance
//!   ([RequestKind::Instance]) or an immediately completed handle of it
//!   ([RequestKind::Future]). The handle type is computed by a [TypeWrapper].
//! * The [BindingExpressions] struct selects the instance expression of a binding and
//!   rejects the request kinds that need a dedicated binding expression.
//!
//! Misuse of [SimpleInvocationExpression::new] with an unsupported request kind is a
//! programming error and panics.

mod binding;
mod code;
mod expression;
pub mod helpers;
mod inject;
mod options;
mod request;
mod resolve;
mod types;

pub use binding::{Binding, BindingKind};
pub use code::{CodeBuilder, CodeFragment, Imports};
pub use expression::Expression;
pub use inject::{BindingExpressions, SimpleInvocationExpression};
pub use options::{AsyncHandle, CodegenOptions, TypeParameterPolicy};
pub use request::{RequestKind, SimpleRequestKind};
pub use resolve::{BindingExpression, CodegenError, InstanceExpression};
pub use types::{ClassName, TypePath, TypeRef, TypeWrapper, Types};

#[cfg(test)]
mod tests;
