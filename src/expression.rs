//! Typed pieces of generated code

use std::fmt;

use proc_macro2::TokenStream;

use crate::code::CodeFragment;
use crate::resolve::CodegenError;
use crate::types::TypeRef;

/// A synthesized piece of code and the static type it evaluates to
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Expression {
    ty: TypeRef,
    code: CodeFragment,
}

impl Expression {
    pub fn new(ty: TypeRef, code: CodeFragment) -> Self {
        Self { ty, code }
    }

    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    pub fn code(&self) -> &CodeFragment {
        &self.code
    }

    pub fn into_parts(self) -> (TypeRef, CodeFragment) {
        (self.ty, self.code)
    }

    pub fn to_token_stream(&self) -> Result<TokenStream, CodegenError> {
        self.code.to_token_stream()
    }

    /// Parse the code as a Rust expression.
    ///
    /// Return an error if the generated code is not syntactically valid.
    pub fn to_syn_expr(&self) -> Result<syn::Expr, CodegenError> {
        let code = self.code.to_string();
        syn::parse_str(&code).map_err(|err| CodegenError::Syntax {
            message: err.to_string(),
            code,
        })
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.ty)
    }
}
