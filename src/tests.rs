use std::panic::{catch_unwind, AssertUnwindSafe};

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use quote::quote;

use super::*;

/// Instance expression with fixed code, optionally asking for an explicit type parameter
struct FixedInstance {
    binding: Binding,
    code: CodeFragment,
    hint: CodeFragment,
}

impl FixedInstance {
    fn new(key: TypeRef, code: CodeFragment) -> Self {
        Self {
            binding: Binding::bound_instance(key, "unused"),
            code,
            hint: CodeFragment::empty(),
        }
    }

    fn with_hint(mut self, hint: CodeFragment) -> Self {
        self.hint = hint;
        self
    }
}

impl InstanceExpression for FixedInstance {
    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn instance_expression(&self, _requesting_class: &ClassName) -> Expression {
        Expression::new(self.binding.key().clone(), self.code.clone())
    }

    fn explicit_type_parameter(&self, _requesting_class: &ClassName) -> CodeFragment {
        self.hint.clone()
    }
}

fn set_of_strings() -> TypeRef {
    TypeRef::generic(
        TypePath::new("::std::collections::HashSet"),
        [TypeRef::named("String")],
    )
}

fn new_set() -> CodeFragment {
    CodeFragment::builder()
        .path(&TypePath::new("::std::collections::HashSet"))
        .text("::new()")
        .build()
}

fn component() -> ClassName {
    ClassName::new("crate::AppComponent")
}

fn ready_of(ty: &TypeRef) -> TypeRef {
    TypeRef::generic(TypePath::new("::std::future::Ready"), [ty.clone()])
}

#[test]
fn instance_request_returns_instance_expression() {
    let options = CodegenOptions::default();
    let strategy = FixedInstance::new(set_of_strings(), new_set());
    let expected = strategy.instance_expression(&component());

    let expression = SimpleInvocationExpression::new(RequestKind::Instance, strategy, &Types, &options);
    assert_eq!(expression.request_kind(), RequestKind::Instance);
    assert_eq!(expression.dependency_expression(&component()), expected);
}

#[test]
fn future_request_wraps_in_ready() -> Result<(), CodegenError> {
    let options = CodegenOptions::default();
    let strategy = FixedInstance::new(set_of_strings(), new_set());

    let expression = SimpleInvocationExpression::new(RequestKind::Future, strategy, &Types, &options);
    let future = expression.dependency_expression(&component());
    assert_eq!(future.ty(), &ready_of(&set_of_strings()));
    assert_eq!(
        future.code().to_string(),
        "::std::future::ready(::std::collections::HashSet::new())"
    );
    assert_eq!(
        future.to_token_stream()?.to_string(),
        quote!(::std::future::ready(::std::collections::HashSet::new())).to_string()
    );
    Ok(())
}

#[test]
fn future_request_with_explicit_type_parameter() -> Result<(), CodegenError> {
    let options = CodegenOptions::default();
    let strategy = FixedInstance::new(set_of_strings(), new_set())
        .with_hint(CodeFragment::turbofish(&set_of_strings()));

    let expression = SimpleInvocationExpression::new(RequestKind::Future, strategy, &Types, &options);
    let future = expression.dependency_expression(&component());
    assert_eq!(future.ty(), &ready_of(&set_of_strings()));
    assert_eq!(
        future.code().to_string(),
        "::std::future::ready::<::std::collections::HashSet<String>>(::std::collections::HashSet::new())"
    );
    future.to_syn_expr()?;
    Ok(())
}

#[test]
#[should_panic(expected = "Unsupported request kind")]
fn unsupported_request_kind_panics() {
    let options = CodegenOptions::default();
    let strategy = FixedInstance::new(set_of_strings(), new_set());
    SimpleInvocationExpression::new(RequestKind::Lazy, strategy, &Types, &options);
}

#[test]
fn try_new_reports_unsupported_request_kind() {
    let options = CodegenOptions::default();
    let strategy = FixedInstance::new(set_of_strings(), new_set());
    let result = SimpleInvocationExpression::try_new(RequestKind::Producer, strategy, &Types, &options);
    assert_eq!(
        result.err(),
        Some(CodegenError::UnsupportedRequestKind(RequestKind::Producer))
    );
}

#[test]
fn always_annotate_type_parameter() -> Result<(), CodegenError> {
    let options = CodegenOptions::default().with_type_parameters(TypeParameterPolicy::Always);
    let binding = Binding::injection(TypeRef::named("crate::Config"), "new", Vec::<CodeFragment>::new());
    let expressions = BindingExpressions::new(&Types, &options);

    let future = expressions.dependency_expression(&binding, RequestKind::Future, &component())?;
    assert_eq!(
        future.code().to_string(),
        "::std::future::ready::<crate::Config>(crate::Config::new())"
    );
    Ok(())
}

#[test]
fn futures_crate_handle() -> Result<(), CodegenError> {
    let options = CodegenOptions::default().with_async_handle(AsyncHandle::futures());
    let binding = Binding::bound_instance("::std::sync::Arc<dyn crate::Logger>".parse()?, "logger");
    let expressions = BindingExpressions::new(&Types, &options);

    let future = expressions.dependency_expression(&binding, RequestKind::Future, &component())?;
    assert_eq!(
        future.ty().to_string(),
        "::futures::future::Ready<::std::sync::Arc<dyn crate::Logger>>"
    );
    assert_eq!(
        future.code().to_string(),
        "::futures::future::ready(self.logger.clone())"
    );
    Ok(())
}

#[test]
fn factory_rejects_dedicated_request_kinds() {
    let options = CodegenOptions::default();
    let binding = Binding::injection(TypeRef::named("crate::Config"), "new", Vec::<CodeFragment>::new());
    let expressions = BindingExpressions::new(&Types, &options);

    for kind in RequestKind::ALL {
        let result = expressions.binding_expression(&binding, kind);
        assert_eq!(result.is_ok(), kind.is_simple(), "{kind}");
        if let Ok(expression) = result {
            assert_eq!(expression.request_kind(), kind);
        }
    }
}

#[test]
fn imports_for_generated_expressions() -> Result<(), CodegenError> {
    let options = CodegenOptions::default();
    let expressions = BindingExpressions::new(&Types, &options);
    let set = Binding::multibound_set(set_of_strings(), Vec::<CodeFragment>::new());
    let config = Binding::provision(
        TypeRef::named("crate::Config"),
        TypePath::new("crate::modules::AppModule"),
        "provide_config",
        Vec::<CodeFragment>::new(),
    );

    let generated = [
        expressions.dependency_expression(&set, RequestKind::Future, &component())?,
        expressions.dependency_expression(&config, RequestKind::Instance, &component())?,
    ];
    let imports = Imports::collect(generated.iter().map(Expression::code));
    assert_eq!(
        imports.use_declarations(),
        vec![
            "use crate::modules::AppModule;",
            "use ::std::default::Default;",
            "use ::std::collections::HashSet;",
            "use ::std::future::ready;",
        ]
    );
    assert_eq!(
        imports.render(generated[0].code()),
        "ready::<HashSet<String>>(Default::default())"
    );
    assert_eq!(imports.render(generated[1].code()), "AppModule::provide_config()");
    Ok(())
}

fn any_binding() -> impl Strategy<Value = Binding> {
    let key = prop_oneof![
        Just("crate::Config"),
        Just("::std::collections::HashSet<String>"),
        Just("::std::sync::Arc<dyn crate::Logger>"),
        Just("(u32, String)"),
        Just("()"),
    ];
    let arguments = prop::collection::vec(
        prop_oneof![
            Just(CodeFragment::of("1")),
            Just(CodeFragment::of("self.settings.clone()")),
            Just(CodeFragment::of("\"name\".to_string()")),
        ],
        0..4,
    );
    (key, arguments, 0..4usize).prop_map(|(key, arguments, category)| {
        let key: TypeRef = key.parse().unwrap();
        match category {
            0 => Binding::injection(key, "new", arguments),
            1 => Binding::provision(key, TypePath::new("crate::modules::AppModule"), "provide", arguments),
            2 => Binding::bound_instance(key, "settings"),
            _ => Binding::multibound_set(key, arguments),
        }
    })
}

fn any_requesting_class() -> impl Strategy<Value = ClassName> {
    prop_oneof![
        Just(ClassName::new("crate::AppComponent")),
        Just(ClassName::new("crate::modules::AppModule")),
    ]
}

fn any_unsupported_kind() -> impl Strategy<Value = RequestKind> {
    prop::sample::select(
        RequestKind::ALL
            .into_iter()
            .filter(|kind| !kind.is_simple())
            .collect::<Vec<_>>(),
    )
}

proptest! {
    #[test]
    fn simple_kinds_produce_valid_expressions(binding in any_binding(), class in any_requesting_class()) {
        let options = CodegenOptions::default();
        let expressions = BindingExpressions::new(&Types, &options);
        for kind in [RequestKind::Instance, RequestKind::Future] {
            let expression = expressions.dependency_expression(&binding, kind, &class).unwrap();
            prop_assert!(!expression.code().is_empty());
            prop_assert!(expression.to_syn_expr().is_ok(), "{}", expression);
            prop_assert!(expression.ty().to_syn_type().is_ok());
        }
    }

    #[test]
    fn unsupported_kinds_fail_at_construction(binding in any_binding(), kind in any_unsupported_kind()) {
        let options = CodegenOptions::default();
        let types = Types;
        prop_assert!(SimpleInvocationExpression::try_new(kind, helpers::strategy_for(&binding), &types, &options).is_err());
        let constructed = catch_unwind(AssertUnwindSafe(|| {
            SimpleInvocationExpression::new(kind, helpers::strategy_for(&binding), &types, &options);
        }));
        prop_assert!(constructed.is_err());
    }

    #[test]
    fn instance_kind_is_identity(binding in any_binding(), class in any_requesting_class()) {
        let options = CodegenOptions::default();
        let strategy = helpers::strategy_for(&binding);
        let expected = strategy.instance_expression(&class);
        let expression = SimpleInvocationExpression::new(RequestKind::Instance, strategy, &Types, &options);
        prop_assert_eq!(expression.dependency_expression(&class), expected);
    }

    #[test]
    fn future_kind_wraps_instance(binding in any_binding(), class in any_requesting_class()) {
        let options = CodegenOptions::default();
        let strategy = helpers::strategy_for(&binding);
        let instance = strategy.instance_expression(&class);
        let hint = strategy.explicit_type_parameter(&class);
        let expression = SimpleInvocationExpression::new(RequestKind::Future, strategy, &Types, &options);

        let future = expression.dependency_expression(&class);
        prop_assert_eq!(future.ty(), &Types.wrap(instance.ty(), &TypePath::new("::std::future::Ready")));
        let code = future.code().to_string();
        prop_assert!(code.starts_with("::std::future::ready"));
        // the explicit type parameter, if any, directly precedes the argument list
        let call = format!("{}({})", hint, instance.code());
        prop_assert!(code.ends_with(&call), "{} does not end with {}", code, call);
        prop_assert_eq!(code.len(), "::std::future::ready".len() + call.len());
    }
}
