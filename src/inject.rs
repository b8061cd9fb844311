use crate::binding::Binding;
use crate::code::CodeFragment;
use crate::expression::Expression;
use crate::helpers::strategy_for;
use crate::options::{CodegenOptions, TypeParameterPolicy};
use crate::request::{RequestKind, SimpleRequestKind};
use crate::resolve::{BindingExpression, CodegenError, InstanceExpression};
use crate::types::{ClassName, TypeWrapper};

/// A binding expression using the instance expression for instance requests,
/// and an immediately completed handle of it for future requests.
///
/// It is created for a single request of a binding and only borrows its settings.
pub struct SimpleInvocationExpression<'a, S> {
    kind: SimpleRequestKind,
    strategy: S,
    types: &'a dyn TypeWrapper,
    options: &'a CodegenOptions,
}

impl<'a, S: InstanceExpression> SimpleInvocationExpression<'a, S> {
    /// Create the binding expression for a request kind.
    ///
    /// # Panics
    ///
    /// Panics if the request kind is neither [RequestKind::Instance] nor [RequestKind::Future]:
    /// the caller wired a request that needs a dedicated binding expression.
    pub fn new(
        kind: RequestKind,
        strategy: S,
        types: &'a dyn TypeWrapper,
        options: &'a CodegenOptions,
    ) -> Self {
        match Self::try_new(kind, strategy, types, options) {
            Ok(expression) => expression,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create the binding expression, or return an error for unsupported request kinds
    pub fn try_new(
        kind: RequestKind,
        strategy: S,
        types: &'a dyn TypeWrapper,
        options: &'a CodegenOptions,
    ) -> Result<Self, CodegenError> {
        let kind = SimpleRequestKind::try_from(kind)?;
        Ok(Self::with_kind(kind, strategy, types, options))
    }

    pub fn with_kind(
        kind: SimpleRequestKind,
        strategy: S,
        types: &'a dyn TypeWrapper,
        options: &'a CodegenOptions,
    ) -> Self {
        Self {
            kind,
            strategy,
            types,
            options,
        }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    fn future_expression(&self, requesting_class: &ClassName) -> Expression {
        let instance = self.strategy.instance_expression(requesting_class);
        let handle = self.options.async_handle();
        let type_parameter = match self.options.type_parameters() {
            TypeParameterPolicy::FromStrategy => {
                self.strategy.explicit_type_parameter(requesting_class)
            }
            TypeParameterPolicy::Always => CodeFragment::turbofish(instance.ty()),
        };
        let code = CodeFragment::builder()
            .path(handle.immediate())
            .fragment(&type_parameter)
            .text("(")
            .fragment(instance.code())
            .text(")")
            .build();
        Expression::new(self.types.wrap(instance.ty(), handle.handle_type()), code)
    }
}

impl<S: InstanceExpression> BindingExpression for SimpleInvocationExpression<'_, S> {
    fn request_kind(&self) -> RequestKind {
        self.kind.into()
    }

    #[tracing::instrument(level = "trace", skip_all, fields(
        key = %self.strategy.binding().key(),
        kind = %self.kind,
        requesting_class = %requesting_class
    ))]
    fn dependency_expression(&self, requesting_class: &ClassName) -> Expression {
        let expression = match self.kind {
            SimpleRequestKind::Instance => self.strategy.instance_expression(requesting_class),
            SimpleRequestKind::Future => self.future_expression(requesting_class),
        };
        tracing::trace!(%expression, "generated binding expression");
        expression
    }
}

/// Create the binding expressions of a generation run
///
/// The instance expression of each binding is selected from the category of the binding.
/// Request kinds that need a different expression shape are reported as
/// [CodegenError::UnsupportedRequestKind] so that the caller can route them elsewhere.
pub struct BindingExpressions<'a> {
    types: &'a dyn TypeWrapper,
    options: &'a CodegenOptions,
}

impl<'a> BindingExpressions<'a> {
    pub fn new(types: &'a dyn TypeWrapper, options: &'a CodegenOptions) -> Self {
        Self { types, options }
    }

    pub fn options(&self) -> &CodegenOptions {
        self.options
    }

    pub fn binding_expression<'b>(
        &self,
        binding: &'b Binding,
        kind: RequestKind,
    ) -> Result<Box<dyn BindingExpression + 'b>, CodegenError>
    where
        'a: 'b,
    {
        let simple = SimpleRequestKind::try_from(kind).map_err(|err| {
            tracing::debug!(key = %binding.key(), %kind, "no simple invocation for request");
            err
        })?;
        tracing::debug!(key = %binding.key(), %kind, "simple invocation");
        let strategy = strategy_for(binding);
        Ok(Box::new(SimpleInvocationExpression::with_kind(
            simple,
            strategy,
            self.types,
            self.options,
        )))
    }

    /// Shortcut for a single expression
    pub fn dependency_expression(
        &self,
        binding: &Binding,
        kind: RequestKind,
        requesting_class: &ClassName,
    ) -> Result<Expression, CodegenError> {
        let expression = self.binding_expression(binding, kind)?;
        Ok(expression.dependency_expression(requesting_class))
    }
}
